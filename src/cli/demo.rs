use crate::error::Result;
use crate::pipeline::build_processor;
use crate::source::FileSource;
use std::fmt;
use std::path::Path;

pub const DEMO_MESSAGE: &str =
    "This is the secret message for the decorator pattern demo. It is a very powerful pattern!";

pub const DEMO_STEPS: &str = "zip,encrypt";

/// Outcome of a write-then-read cycle
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub steps: String,
    pub original: Vec<u8>,
    pub stored: Vec<u8>,
    pub recovered: Vec<u8>,
}

impl DemoReport {
    pub fn succeeded(&self) -> bool {
        self.original == self.recovered
    }
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Steps: {}", if self.steps.trim().is_empty() { "(none)" } else { self.steps.as_str() })?;
        writeln!(f, "Original content:  {}", String::from_utf8_lossy(&self.original))?;
        writeln!(f, "Stored size:       {} bytes (original {} bytes)", self.stored.len(), self.original.len())?;
        writeln!(f, "Recovered content: {}", String::from_utf8_lossy(&self.recovered))?;
        if self.succeeded() {
            writeln!(f, "SUCCESS: The content was recovered perfectly!")
        } else {
            writeln!(f, "FAILURE: The content does not match!")
        }
    }
}

/// Write `message` to `stored_path` through one chain, then read it back through
/// a second chain built independently from the same step list
pub fn run_demo(stored_path: &Path, steps: &str, message: &[u8]) -> Result<DemoReport> {
    log::info!("Writing through steps '{}'", steps);
    {
        let mut writer = build_processor(Box::new(FileSource::new(stored_path)), steps);
        writer.write_data(message)?;
    }

    let stored = std::fs::read(stored_path)?;

    log::info!("Reading through steps '{}'", steps);
    let reader = build_processor(Box::new(FileSource::new(stored_path)), steps);
    let recovered = reader.read_data()?;

    Ok(DemoReport {
        steps: steps.to_string(),
        original: message.to_vec(),
        stored,
        recovered,
    })
}
