use clap::Args;
use focus_assistant_core::{Config, Scenario, SimulationOptions, Simulator};

#[derive(Args)]
pub struct SimulateArgs {
    /// Presence segments, e.g. "present:5s,away:130s"
    scenario: String,
    /// Tick length in milliseconds
    #[arg(long)]
    tick_ms: Option<u32>,
    /// Advance the clock by buzzer pulse time after each beep
    #[arg(long)]
    pulse_latency: bool,
    /// Print the full trace as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SimulateArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut scenario: Scenario = args.scenario.parse()?;
    if let Some(tick_ms) = args.tick_ms {
        scenario = scenario.with_tick_ms(tick_ms)?;
    }

    let trace = Simulator::new(config.clone())
        .with_options(SimulationOptions {
            include_pulse_latency: args.pulse_latency,
            ..SimulationOptions::default()
        })
        .run(&scenario)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else {
        for state in trace.states() {
            println!("{}", state.label());
        }
    }
    Ok(())
}
