pub mod config;
pub mod relay;
pub mod run;
pub mod simulate;
pub mod stats;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Open `path` for line reading, or stdin when absent or `-`.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p != Path::new("-") => Ok(Box::new(BufReader::new(File::open(p)?))),
        _ => Ok(Box::new(io::stdin().lock())),
    }
}
