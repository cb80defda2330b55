//! Range sensor interface and host-side sources.
//!
//! The physical trigger/echo drive lives outside this crate. What the
//! monitor sees is a distance in centimetres, with [`NO_ECHO_CM`] standing in
//! for "nothing came back", which is always treated as absence.

use std::collections::VecDeque;
use std::io::BufRead;

use tracing::warn;

/// Sentinel distance reported when no echo returns within the timeout.
pub const NO_ECHO_CM: u32 = 9999;

/// Readings strictly below this many centimetres count as presence.
pub const PRESENT_THRESHOLD_CM: u32 = 50;

/// Produces one distance sample per call.
pub trait RangeSensor {
    fn sample_distance_cm(&mut self) -> u32;

    /// True once a call to `sample_distance_cm` found no real sample left.
    /// Hardware sensors never run dry.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Presence rule. No-echo samples are absence whatever the threshold.
pub fn is_present(distance_cm: u32, threshold_cm: u32) -> bool {
    distance_cm < NO_ECHO_CM && distance_cm < threshold_cm
}

/// Convert an HC-SR04 echo pulse width to centimetres.
///
/// A zero-width pulse means the echo timed out.
pub fn distance_from_echo_us(echo_us: u32) -> u32 {
    if echo_us == 0 {
        return NO_ECHO_CM;
    }
    // Speed of sound 0.0343 cm/us, halved for the round trip.
    let cm = (f64::from(echo_us) * 0.0343 / 2.0) as u32;
    cm.min(NO_ECHO_CM)
}

/// Replays a fixed list of samples, then reports no echo forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    samples: VecDeque<u32>,
    exhausted: bool,
}

impl ScriptedSensor {
    pub fn new(samples: impl IntoIterator<Item = u32>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            exhausted: false,
        }
    }

    pub fn push(&mut self, distance_cm: u32) {
        self.samples.push_back(distance_cm);
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl RangeSensor for ScriptedSensor {
    fn sample_distance_cm(&mut self) -> u32 {
        match self.samples.pop_front() {
            Some(distance_cm) => distance_cm,
            None => {
                self.exhausted = true;
                NO_ECHO_CM
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Reads one sample per line from a text stream.
///
/// `42` is centimetres, `1200us` is a raw echo width. Blank or unparsable
/// lines are logged and read as no echo. End of input exhausts the sensor.
#[derive(Debug)]
pub struct LineSensor<R> {
    reader: R,
    line: String,
    exhausted: bool,
}

impl<R: BufRead> LineSensor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            exhausted: false,
        }
    }
}

impl<R: BufRead> RangeSensor for LineSensor<R> {
    fn sample_distance_cm(&mut self) -> u32 {
        if self.exhausted {
            return NO_ECHO_CM;
        }
        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => {
                self.exhausted = true;
                NO_ECHO_CM
            }
            Ok(_) => parse_sample(&self.line).unwrap_or_else(|| {
                warn!(line = %self.line.trim(), "unreadable distance sample, treating as no echo");
                NO_ECHO_CM
            }),
            Err(e) => {
                warn!(error = %e, "distance source failed, treating as exhausted");
                self.exhausted = true;
                NO_ECHO_CM
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

fn parse_sample(line: &str) -> Option<u32> {
    let trimmed = line.trim();
    if let Some(us) = trimmed.strip_suffix("us") {
        return us.trim().parse::<u32>().ok().map(distance_from_echo_us);
    }
    trimmed.parse::<u32>().ok().map(|cm| cm.min(NO_ECHO_CM))
}
