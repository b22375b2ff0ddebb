use crate::error::Result;
use crate::pipeline::build_processor;
use crate::source::FileSource;
use std::path::Path;

/// Options for the write command
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Comma-separated step list
    pub steps: String,
}

/// Push the contents of `input_path` through the chain into `stored_path`.
/// Returns the number of bytes that reached the file.
pub fn write_file(input_path: &Path, stored_path: &Path, options: &WriteOptions) -> Result<u64> {
    let data = std::fs::read(input_path)?;
    write_bytes(&data, stored_path, options)
}

/// Push `data` through the chain into `stored_path`
pub fn write_bytes(data: &[u8], stored_path: &Path, options: &WriteOptions) -> Result<u64> {
    let mut processor = build_processor(Box::new(FileSource::new(stored_path)), &options.steps);
    processor.write_data(data)?;
    Ok(std::fs::metadata(stored_path)?.len())
}
