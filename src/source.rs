use crate::error::Result;
use std::io;
use std::path::PathBuf;

/// A byte endpoint that every pipeline stage implements, the terminal sink included.
///
/// Writes push a whole buffer inward, reads pull a whole buffer outward.
pub trait DataSource {
    fn write_data(&mut self, data: &[u8]) -> Result<()>;

    fn read_data(&self) -> Result<Vec<u8>>;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn write_data(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_data(data)
    }

    fn read_data(&self) -> Result<Vec<u8>> {
        (**self).read_data()
    }
}

impl<T: DataSource + ?Sized> DataSource for &mut T {
    fn write_data(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_data(data)
    }

    fn read_data(&self) -> Result<Vec<u8>> {
        (**self).read_data()
    }
}

/// File-backed sink. Holds only the path; every call touches the filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn write_data(&mut self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, data)?;
        log::info!("FileSource: wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }

    fn read_data(&self) -> Result<Vec<u8>> {
        let data = std::fs::read(&self.path)?;
        log::info!("FileSource: read {} bytes from {}", data.len(), self.path.display());
        Ok(data)
    }
}

/// In-memory sink holding the last buffer written to it
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Option<Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes as they reached the sink, before any decoding
    pub fn stored(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

impl DataSource for MemorySource {
    fn write_data(&mut self, data: &[u8]) -> Result<()> {
        self.data = Some(data.to_vec());
        log::info!("MemorySource: stored {} bytes", data.len());
        Ok(())
    }

    fn read_data(&self) -> Result<Vec<u8>> {
        match &self.data {
            Some(data) => {
                log::info!("MemorySource: retrieved {} bytes", data.len());
                Ok(data.clone())
            }
            None => Err(io::Error::new(io::ErrorKind::NotFound, "nothing has been written").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use tempfile::tempdir;

    #[test]
    fn test_file_source_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.bin");

        let mut sink = FileSource::new(&path);
        sink.write_data(b"payload").unwrap();

        assert!(path.exists());
        assert_eq!(sink.read_data().unwrap(), b"payload");
    }

    #[test]
    fn test_file_source_overwrites() {
        let dir = tempdir().unwrap();
        let mut sink = FileSource::new(dir.path().join("out.bin"));
        sink.write_data(b"a much longer first payload").unwrap();
        sink.write_data(b"short").unwrap();
        assert_eq!(sink.read_data().unwrap(), b"short");
    }

    #[test]
    fn test_file_source_missing_file() {
        let dir = tempdir().unwrap();
        let sink = FileSource::new(dir.path().join("absent.bin"));
        match sink.read_data() {
            Err(PipelineError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_source_read_before_write() {
        let sink = MemorySource::new();
        assert!(sink.stored().is_none());
        assert!(matches!(sink.read_data(), Err(PipelineError::Io(_))));
    }

    #[test]
    fn test_memory_source_empty_buffer() {
        let mut sink = MemorySource::new();
        sink.write_data(b"").unwrap();
        assert_eq!(sink.stored(), Some(&b""[..]));
        assert!(sink.read_data().unwrap().is_empty());
    }

    #[test]
    fn test_borrowed_source_writes_through() {
        let mut sink = MemorySource::new();
        {
            let mut borrowed: Box<dyn DataSource + '_> = Box::new(&mut sink);
            borrowed.write_data(b"through a borrow").unwrap();
        }
        assert_eq!(sink.stored(), Some(&b"through a borrow"[..]));
    }
}
