use std::io;
use std::path::PathBuf;

use clap::Args;
use focus_assistant_core::{
    Clock, Config, ConsoleActuator, LineSensor, LineSink, Monitor, MonotonicClock,
};

#[derive(Args)]
pub struct RunArgs {
    /// File of distance samples, one per line (stdin when omitted)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Override the delay between ticks in milliseconds
    #[arg(long)]
    tick_delay_ms: Option<u32>,
    /// Block for buzzer pulses like the hardware loop does
    #[arg(long)]
    realtime_buzzer: bool,
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let input = super::open_input(args.input.as_deref())?;
    let clock = MonotonicClock::new();
    let actuator = ConsoleActuator::new(config.led.polarity, config.pulse_timing())
        .realtime(args.realtime_buzzer);
    let sink = LineSink::new(io::stdout().lock());

    let mut monitor = Monitor::new(config, LineSensor::new(input), actuator, sink, clock.now());
    let tick_delay_ms = args.tick_delay_ms.unwrap_or(config.tick_delay_ms);
    let ticks = monitor.run(&clock, tick_delay_ms)?;
    tracing::info!(ticks, "monitor stopped");
    Ok(())
}
