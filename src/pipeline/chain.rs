//! Turns a comma-separated step list into a nested chain of stages.
//!
//! Steps wrap the running chain in the order given, so the first step sits
//! innermost (closest to the sink) and the last step outermost. Writing
//! through the chain applies steps first-to-last; reading undoes them
//! last-to-first. Building the read chain from the same step list as the
//! write chain is all a caller needs for a round trip.
//!
//! The step list is not stored with the data. Reading with a different list
//! than the one used for writing yields garbage or a decode error.

use crate::pipeline::compress::CompressStage;
use crate::pipeline::obfuscate::ObfuscateStage;
use crate::pipeline::stage::Layer;
use crate::source::DataSource;
use std::fmt;

/// A transform kind selectable from a step list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Deflate compression
    Zip,
    /// Fixed-key XOR obfuscation
    Encrypt,
}

/// Recognized tokens, matched after trimming and lower-casing
const STEP_TOKENS: &[(&str, StepKind)] = &[
    ("zip", StepKind::Zip),
    ("encrypt", StepKind::Encrypt),
];

impl StepKind {
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        STEP_TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, kind)| *kind)
    }

    pub fn token(&self) -> &'static str {
        STEP_TOKENS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    /// Wrap `inner` in the stage this kind names
    pub fn wrap<'a>(self, inner: Box<dyn DataSource + 'a>) -> Box<dyn DataSource + 'a> {
        match self {
            Self::Zip => Box::new(Layer::new(CompressStage, inner)),
            Self::Encrypt => Box::new(Layer::new(ObfuscateStage::default(), inner)),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Parsed step list: recognized steps in order, plus tokens that were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepList {
    steps: Vec<StepKind>,
    skipped: Vec<String>,
}

impl StepList {
    pub fn steps(&self) -> &[StepKind] {
        &self.steps
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

impl FromIterator<StepKind> for StepList {
    fn from_iter<I: IntoIterator<Item = StepKind>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
            skipped: Vec::new(),
        }
    }
}

impl fmt::Display for StepList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// Parse a comma-separated step list.
///
/// A blank list means no steps. Unknown tokens, including empty ones between
/// commas, are logged and skipped.
pub fn parse_steps(steps: &str) -> StepList {
    let mut list = StepList::default();
    if steps.trim().is_empty() {
        return list;
    }

    for raw in steps.split(',') {
        let token = raw.trim();
        match StepKind::from_token(token) {
            Some(kind) => list.steps.push(kind),
            None => {
                log::warn!("Unknown processing step '{}', skipping", token);
                list.skipped.push(token.to_string());
            }
        }
    }
    list
}

/// Wrap `base` with one layer per step, first step innermost
pub fn build_chain<'a>(base: Box<dyn DataSource + 'a>, steps: &StepList) -> Box<dyn DataSource + 'a> {
    steps.steps.iter().fold(base, |current, kind| {
        log::info!("Wrapping with {} stage", kind);
        kind.wrap(current)
    })
}

/// Parse `steps` and build the chain around `base`
pub fn build_processor<'a>(base: Box<dyn DataSource + 'a>, steps: &str) -> Box<dyn DataSource + 'a> {
    build_chain(base, &parse_steps(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compress::compress;
    use crate::pipeline::obfuscate::{mask, OBFUSCATION_KEY};
    use crate::source::MemorySource;

    const MESSAGE: &[u8] = b"Hello, Decorator Pattern!";

    fn stored_with(steps: &str, data: &[u8]) -> Vec<u8> {
        let mut sink = MemorySource::new();
        build_processor(Box::new(&mut sink), steps)
            .write_data(data)
            .unwrap();
        sink.stored().unwrap().to_vec()
    }

    #[test]
    fn test_parse_normalizes_tokens() {
        let list = parse_steps(" ZIP , Encrypt,zip ");
        assert_eq!(list.steps(), &[StepKind::Zip, StepKind::Encrypt, StepKind::Zip]);
        assert!(list.skipped().is_empty());
        assert_eq!(list.to_string(), "zip,encrypt,zip");
    }

    #[test]
    fn test_parse_blank_is_empty() {
        for steps in ["", "   "] {
            let list = parse_steps(steps);
            assert!(list.is_empty());
            assert!(list.skipped().is_empty());
        }
    }

    #[test]
    fn test_parse_records_unknown_tokens() {
        let list = parse_steps("zip,upload,,encrypt");
        assert_eq!(list.steps(), &[StepKind::Zip, StepKind::Encrypt]);
        assert_eq!(list.skipped(), &["upload".to_string(), String::new()]);
    }

    #[test]
    fn test_other_compressor_names_are_skipped() {
        let list = parse_steps("zip,zstd,lz4,brotli");
        assert_eq!(list.steps(), &[StepKind::Zip]);
        assert_eq!(list.skipped(), &["zstd".to_string(), "lz4".to_string(), "brotli".to_string()]);
        assert_eq!(stored_with("zip,zstd", MESSAGE), stored_with("zip", MESSAGE));
    }

    #[test]
    fn test_repeated_steps_are_kept() {
        assert_eq!(parse_steps("encrypt,encrypt").len(), 2);
    }

    #[test]
    fn test_first_step_is_innermost() {
        // zip then encrypt: the sink sees compress(mask(x))
        let expected = compress(&mask(MESSAGE, OBFUSCATION_KEY)).unwrap();
        assert_eq!(stored_with("zip,encrypt", MESSAGE), expected);

        // encrypt then zip: the sink sees mask(compress(x))
        let expected = mask(&compress(MESSAGE).unwrap(), OBFUSCATION_KEY);
        assert_eq!(stored_with("encrypt,zip", MESSAGE), expected);
    }

    #[test]
    fn test_empty_list_is_passthrough() {
        assert_eq!(stored_with("", MESSAGE), MESSAGE);
    }

    #[test]
    fn test_unknown_tokens_do_not_change_chain() {
        assert_eq!(stored_with("zip,bogus,encrypt", MESSAGE), stored_with("zip,encrypt", MESSAGE));
    }

    #[test]
    fn test_token_lookup() {
        assert_eq!(StepKind::from_token("Encrypt"), Some(StepKind::Encrypt));
        assert_eq!(StepKind::from_token("Brotli"), None);
        assert_eq!(StepKind::from_token("upload"), None);
        for (name, kind) in STEP_TOKENS {
            assert_eq!(kind.token(), *name);
        }
    }

    #[test]
    fn test_collect_into_step_list() {
        let list: StepList = [StepKind::Encrypt, StepKind::Zip].into_iter().collect();
        assert_eq!(list.to_string(), "encrypt,zip");
        assert_eq!(parse_steps(&list.to_string()), list);
    }
}
