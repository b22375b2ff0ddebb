use crate::error::Result;
use crate::pipeline::build_processor;
use crate::source::FileSource;
use std::path::Path;

/// Options for the read command
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Must match the step list used when the file was written
    pub steps: String,
}

/// Load `stored_path` back through the chain
pub fn read_file(stored_path: &Path, options: &ReadOptions) -> Result<Vec<u8>> {
    let processor = build_processor(Box::new(FileSource::new(stored_path)), &options.steps);
    processor.read_data()
}

/// Load `stored_path` through the chain and write the recovered bytes to `output_path`
pub fn extract_file(stored_path: &Path, output_path: &Path, options: &ReadOptions) -> Result<usize> {
    let data = read_file(stored_path, options)?;
    std::fs::write(output_path, &data)?;
    Ok(data.len())
}
