mod alert_scheduler;
mod record;
mod state;
mod state_machine;

pub use alert_scheduler::{
    AlertCommand, AlertScheduler, BuzzerPattern, LedColor, DISTRACTED_BEEP_PERIOD_MS,
    RED_FLASH_INTERVAL_MS, WARNING_BEEP_PERIOD_MS,
};
pub use record::CoreRecord;
pub use state::{AttentionState, StatusLabel, UnknownLabel};
pub use state_machine::{AttentionStateMachine, SHORT_BREAK_S, WARNING_S};
