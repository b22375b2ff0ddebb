use crate::error::Result;
use crate::pipeline::stage::Stage;

/// Single-byte mask applied by `encrypt` steps
pub const OBFUSCATION_KEY: u8 = 0xAB;

/// XOR every byte with `key`. Applying it twice with the same key is a no-op.
///
/// This is reversible scrambling, not encryption: the key is fixed and a
/// single known plaintext byte recovers it.
pub fn mask(data: &[u8], key: u8) -> Vec<u8> {
    data.iter().map(|b| b ^ key).collect()
}

/// Masks on the way in, unmasks on the way out
#[derive(Debug, Clone, Copy)]
pub struct ObfuscateStage {
    key: u8,
}

impl ObfuscateStage {
    pub fn new(key: u8) -> Self {
        Self { key }
    }
}

impl Default for ObfuscateStage {
    fn default() -> Self {
        Self::new(OBFUSCATION_KEY)
    }
}

impl Stage for ObfuscateStage {
    fn name(&self) -> &'static str {
        "obfuscate"
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(mask(data, self.key))
    }

    fn decode(&self, mut data: Vec<u8>) -> Result<Vec<u8>> {
        for byte in data.iter_mut() {
            *byte ^= self.key;
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mask_known_bytes() {
        assert_eq!(mask(&[0x00, 0xAB, 0xFF, b'H'], OBFUSCATION_KEY), vec![0xAB, 0x00, 0x54, 0xE3]);
    }

    #[test]
    fn test_mask_preserves_length() {
        assert!(mask(&[], OBFUSCATION_KEY).is_empty());
        assert_eq!(mask(&[7u8; 1000], 0x11).len(), 1000);
    }

    #[test]
    fn test_stage_changes_every_byte() {
        let stage = ObfuscateStage::default();
        let plain = b"Hello, Decorator Pattern!";
        let encoded = stage.encode(plain).unwrap();
        assert!(encoded.iter().zip(plain.iter()).all(|(a, b)| a != b));
        assert_eq!(stage.decode(encoded).unwrap(), plain);
    }

    #[test]
    fn test_zero_key_is_identity() {
        let stage = ObfuscateStage::new(0);
        assert_eq!(stage.encode(b"as is").unwrap(), b"as is");
    }

    proptest! {
        #[test]
        fn prop_mask_is_self_inverse(data in proptest::collection::vec(any::<u8>(), 0..512), key in any::<u8>()) {
            prop_assert_eq!(mask(&mask(&data, key), key), data);
        }
    }
}
