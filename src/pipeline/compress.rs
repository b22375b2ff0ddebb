use crate::error::{PipelineError, Result};
use crate::pipeline::stage::Stage;
use flate2::write::ZlibEncoder;
use flate2::{Decompress, FlushDecompress, Status};
use std::io::Write;

/// Deflate `data` into a zlib stream at the default level
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| PipelineError::CompressionError(format!("deflate: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| PipelineError::CompressionError(format!("deflate: {}", e)))
}

/// Inflate a zlib stream, failing unless the stream end marker is reached.
/// Bytes after the end marker are ignored.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut output = Vec::with_capacity(data.len().saturating_mul(4).max(64));

    loop {
        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();
        let status = inflater
            .decompress_vec(&data[consumed..], &mut output, FlushDecompress::Finish)
            .map_err(|e| PipelineError::DecompressionError(format!("deflate: {}", e)))?;

        if status == Status::StreamEnd {
            return Ok(output);
        }

        if output.len() == output.capacity() {
            output.reserve(output.capacity().max(64));
            continue;
        }

        let progressed =
            inflater.total_in() as usize != consumed || inflater.total_out() != produced;
        if !progressed {
            return Err(PipelineError::DecompressionError(
                "deflate: truncated stream".into(),
            ));
        }
    }
}

/// Compresses on the way in, decompresses on the way out
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressStage;

impl Stage for CompressStage {
    fn name(&self) -> &'static str {
        "compress"
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let compressed = compress(data)?;
        log::info!(
            "[compress] original size: {}, compressed size: {}",
            data.len(),
            compressed.len()
        );
        Ok(compressed)
    }

    fn decode(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        let decompressed = decompress(&data)?;
        log::info!(
            "[compress] compressed size: {}, decompressed size: {}",
            data.len(),
            decompressed.len()
        );
        Ok(decompressed)
    }
}
