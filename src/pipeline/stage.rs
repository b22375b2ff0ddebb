use crate::error::Result;
use crate::source::DataSource;

/// Bytes shown in trace output before eliding
const PREVIEW_BYTES: usize = 16;

/// A reversible transform applied between a caller and an inner data source.
///
/// Both methods default to passing the buffer through unchanged, so a stage
/// only overrides the direction it cares about.
pub trait Stage {
    fn name(&self) -> &'static str;

    /// Write path: runs before the buffer is handed to the inner source
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(data.to_vec())
    }

    /// Read path: runs on whatever the inner source returned
    fn decode(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        Ok(data)
    }
}

/// One link of a chain: a stage plus the source it exclusively wraps
pub struct Layer<'a, S: Stage> {
    stage: S,
    inner: Box<dyn DataSource + 'a>,
}

impl<'a, S: Stage> Layer<'a, S> {
    pub fn new(stage: S, inner: Box<dyn DataSource + 'a>) -> Self {
        Self { stage, inner }
    }
}

impl<S: Stage> DataSource for Layer<'_, S> {
    fn write_data(&mut self, data: &[u8]) -> Result<()> {
        let encoded = self.stage.encode(data)?;
        log::debug!(
            "-> [{}] {} bytes in, {} bytes out ({})",
            self.stage.name(),
            data.len(),
            encoded.len(),
            preview(&encoded)
        );
        self.inner.write_data(&encoded)
    }

    fn read_data(&self) -> Result<Vec<u8>> {
        let raw = self.inner.read_data()?;
        let raw_len = raw.len();
        let decoded = self.stage.decode(raw)?;
        log::debug!(
            "<- [{}] {} bytes in, {} bytes out ({})",
            self.stage.name(),
            raw_len,
            decoded.len(),
            preview(&decoded)
        );
        Ok(decoded)
    }
}

/// Hex rendering of the leading bytes of a buffer for trace output
pub fn preview(data: &[u8]) -> String {
    if data.len() > PREVIEW_BYTES {
        format!("{}..", hex::encode(&data[..PREVIEW_BYTES]))
    } else {
        hex::encode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    struct Identity;

    impl Stage for Identity {
        fn name(&self) -> &'static str {
            "identity"
        }
    }

    struct Reverse;

    impl Stage for Reverse {
        fn name(&self) -> &'static str {
            "reverse"
        }

        fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
            Ok(data.iter().rev().copied().collect())
        }

        fn decode(&self, mut data: Vec<u8>) -> Result<Vec<u8>> {
            data.reverse();
            Ok(data)
        }
    }

    #[test]
    fn test_default_stage_delegates_unchanged() {
        let mut sink = MemorySource::new();
        {
            let mut layer = Layer::new(Identity, Box::new(&mut sink));
            layer.write_data(b"unchanged").unwrap();
            assert_eq!(layer.read_data().unwrap(), b"unchanged");
        }
        assert_eq!(sink.stored(), Some(&b"unchanged"[..]));
    }

    #[test]
    fn test_inner_receives_encoded_buffer() {
        let mut sink = MemorySource::new();
        {
            let mut layer = Layer::new(Reverse, Box::new(&mut sink));
            layer.write_data(b"abc").unwrap();
            assert_eq!(layer.read_data().unwrap(), b"abc");
        }
        assert_eq!(sink.stored(), Some(&b"cba"[..]));
    }

    #[test]
    fn test_inner_failure_propagates() {
        let layer = Layer::new(Reverse, Box::new(MemorySource::new()));
        assert!(layer.read_data().is_err());
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview(b"\x01\x02"), "0102");
        let long = [0xffu8; 20];
        assert_eq!(preview(&long), format!("{}..", "ff".repeat(16)));
    }
}
