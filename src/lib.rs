//! batchproc - composable file processing pipeline
//!
//! Data is written to and read from a storage endpoint through an ordered
//! chain of reversible stages. The chain is assembled at runtime from a
//! comma-separated step list such as `"zip,encrypt"`.
//!
//! ## Stage Ordering
//!
//! The first listed step wraps the storage endpoint directly; each later
//! step wraps the chain built so far.
//!
//! ```text
//! write: caller → encrypt → zip → file
//! read:  caller ← encrypt ← zip ← file
//! ```
//!
//! - **zip**: deflate compression (zlib stream)
//! - **encrypt**: fixed single-byte XOR obfuscation (not real encryption)
//!
//! Unknown steps are logged and skipped. The step list is not recorded in
//! the stored bytes, so reading requires the same list used for writing.
//!
//! ## Example
//!
//! ```no_run
//! use batchproc::pipeline::build_processor;
//! use batchproc::source::{DataSource, FileSource};
//!
//! let mut writer = build_processor(Box::new(FileSource::new("out/doc.processed")), "zip,encrypt");
//! writer.write_data(b"secret message").unwrap();
//!
//! let reader = build_processor(Box::new(FileSource::new("out/doc.processed")), "zip,encrypt");
//! assert_eq!(reader.read_data().unwrap(), b"secret message");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;

pub use config::JobConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{build_chain, build_processor, parse_steps, StepKind, StepList};
pub use source::{DataSource, FileSource, MemorySource};
