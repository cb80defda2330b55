//! End-to-end attention scenarios.
//!
//! Drives the state machine and scheduler tick by tick, directly and through
//! the simulator, and checks the beep and flash pacing users actually see.

use focus_assistant_core::{
    AlertScheduler, AttentionState, AttentionStateMachine, BuzzerPattern, Config, CoreRecord,
    LedColor, Scenario, Simulator, Timestamp,
};

fn tick(
    machine: &AttentionStateMachine,
    scheduler: &AlertScheduler,
    presence: bool,
    now: u32,
    record: &mut CoreRecord,
) -> (AttentionState, BuzzerPattern, LedColor) {
    let now = Timestamp(now);
    let (state, back) = machine.classify(presence, now, record);
    let cmd = scheduler.schedule(state, back, now, record);
    (state, cmd.buzzer, cmd.led)
}

#[test]
fn warning_beeps_four_times_in_two_minutes_at_fast_tick_rate() {
    let machine = AttentionStateMachine::default();
    let scheduler = AlertScheduler::default();
    let mut record = CoreRecord::new(Timestamp(0));

    let mut beeps = Vec::new();
    for k in 0..2_400u32 {
        let now = 120_000 + k * 50;
        let (state, buzzer, led) = tick(&machine, &scheduler, false, now, &mut record);
        assert_eq!(state, AttentionState::Warning);
        assert_eq!(led, LedColor::BLUE);
        if buzzer == BuzzerPattern::Short {
            beeps.push(now);
        }
    }
    assert_eq!(beeps, vec![120_000, 150_000, 180_000, 210_000]);
}

#[test]
fn flash_and_triple_beep_keep_separate_clocks() {
    let machine = AttentionStateMachine::default();
    let scheduler = AlertScheduler::default();
    let mut record = CoreRecord::new(Timestamp(0));
    let t0 = 320_000;
    // The entry tick already sounded the triple beep.
    record.last_distracted_beep_at = Some(Timestamp(t0 - 50));

    let mut toggles = 0;
    let mut beeps = 0;
    for k in 0..200u32 {
        let before = record.last_flash_toggle_at;
        let (state, buzzer, _) = tick(&machine, &scheduler, false, t0 + k * 50, &mut record);
        assert_eq!(state, AttentionState::Distracted);
        if record.last_flash_toggle_at != before {
            toggles += 1;
        }
        if !buzzer.is_silent() {
            beeps += 1;
        }
    }
    assert_eq!(toggles, 40);
    assert_eq!(beeps, 0);
}

#[test]
fn flash_alternates_red_and_off() {
    let machine = AttentionStateMachine::default();
    let scheduler = AlertScheduler::default();
    let mut record = CoreRecord::new(Timestamp(0));

    let leds: Vec<LedColor> = (0..4u32)
        .map(|k| tick(&machine, &scheduler, false, 300_000 + k * 250, &mut record).2)
        .collect();
    assert_eq!(
        leds,
        vec![LedColor::RED, LedColor::OFF, LedColor::RED, LedColor::OFF]
    );
}

#[test]
fn five_seconds_present_then_130_away_ends_in_warning_with_one_beep() {
    let scenario: Scenario = "present:5s,away:130s".parse().unwrap();
    let trace = Simulator::new(Config::default()).run(&scenario).unwrap();

    assert_eq!(trace.final_state(), Some(AttentionState::Warning));
    assert_eq!(trace.beep_count(BuzzerPattern::Short), 1);
    assert_eq!(trace.beep_count(BuzzerPattern::Triple), 0);

    let beep = trace
        .ticks
        .iter()
        .find(|t| t.buzzer == BuzzerPattern::Short)
        .unwrap();
    // Last present tick was at 4.8s, so warning starts 120s later.
    assert_eq!(beep.elapsed_ms, 124_800);
    let first_warning = trace
        .ticks
        .iter()
        .find(|t| t.state == AttentionState::Warning)
        .unwrap();
    assert_eq!(first_warning.elapsed_ms, beep.elapsed_ms);

    let states: Vec<AttentionState> = trace.states().collect();
    let mut order = states.clone();
    order.dedup();
    assert_eq!(
        order,
        vec![
            AttentionState::Focused,
            AttentionState::ShortBreak,
            AttentionState::Warning
        ]
    );
}

#[test]
fn return_after_310s_confirms_exactly_once() {
    let machine = AttentionStateMachine::default();
    let scheduler = AlertScheduler::default();
    let mut record = CoreRecord::new(Timestamp(0));

    let mut now = 0;
    while now < 310_000 {
        tick(&machine, &scheduler, false, now, &mut record);
        now += 200;
    }
    assert!(record.was_distracted);

    let (state, buzzer, led) = tick(&machine, &scheduler, true, now, &mut record);
    assert_eq!(state, AttentionState::Focused);
    assert_eq!(buzzer, BuzzerPattern::Short);
    assert_eq!(led, LedColor::GREEN);
    assert!(!record.was_distracted);

    for _ in 0..20 {
        now += 200;
        let (_, buzzer, _) = tick(&machine, &scheduler, true, now, &mut record);
        assert_eq!(buzzer, BuzzerPattern::None);
    }
}

#[test]
fn confirmation_only_follows_distracted_episodes() {
    let scenario: Scenario = "away:60s,present:1s,away:200s,present:1s,away:320s,present:2s"
        .parse()
        .unwrap();
    let trace = Simulator::new(Config::default()).run(&scenario).unwrap();

    let confirmations: Vec<u64> = trace
        .ticks
        .iter()
        .filter(|t| t.state == AttentionState::Focused && t.buzzer == BuzzerPattern::Short)
        .map(|t| t.elapsed_ms)
        .collect();
    // Only the third absence reached DISTRACTED.
    assert_eq!(confirmations, vec![582_000]);
    assert_eq!(trace.stats.distracted_episodes, 1);
}

#[test]
fn warning_reentry_after_a_brief_return_beeps_again() {
    let machine = AttentionStateMachine::default();
    let scheduler = AlertScheduler::default();
    let mut record = CoreRecord::new(Timestamp(0));

    let (_, first, _) = tick(&machine, &scheduler, false, 120_000, &mut record);
    assert_eq!(first, BuzzerPattern::Short);
    tick(&machine, &scheduler, true, 121_000, &mut record);
    // Back in WARNING 120s later; more than 30s since the last warning beep.
    let (state, again, _) = tick(&machine, &scheduler, false, 241_000, &mut record);
    assert_eq!(state, AttentionState::Warning);
    assert_eq!(again, BuzzerPattern::Short);
}

#[test]
fn simulation_is_deterministic() {
    let scenario: Scenario = "present:3s,away:400s,present:3s".parse().unwrap();
    let a = Simulator::new(Config::default()).run(&scenario).unwrap();
    let b = Simulator::new(Config::default()).run(&scenario).unwrap();
    assert_eq!(a, b);
}
