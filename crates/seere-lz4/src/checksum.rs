//! Streaming XXH32 facade used for block checksums.

use xxhash_rust::xxh32::{xxh32, Xxh32};

/// Seed for every block checksum on the wire.
pub const CHECKSUM_SEED: u32 = 0x9747_B28C;

/// Streaming XXH32 hasher seeded with [`CHECKSUM_SEED`].
///
/// Encoders and decoders own one instance each and reset it per block.
#[derive(Clone)]
pub struct BlockChecksum {
    hasher: Xxh32,
}

impl BlockChecksum {
    /// Create a fresh hasher.
    pub fn new() -> Self {
        Self {
            hasher: Xxh32::new(CHECKSUM_SEED),
        }
    }

    /// Discard any accumulated state.
    pub fn reset(&mut self) {
        self.hasher = Xxh32::new(CHECKSUM_SEED);
    }

    /// Feed `data` into the hash.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Current hash value over everything fed since the last reset.
    pub fn value(&self) -> u32 {
        self.hasher.digest()
    }

    /// One-shot checksum of `data`.
    pub fn checksum(data: &[u8]) -> u32 {
        xxh32(data, CHECKSUM_SEED)
    }
}

impl Default for BlockChecksum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaming_matches_one_shot() {
        let data = b"The checksum must not depend on update granularity.";

        let mut hasher = BlockChecksum::new();
        for chunk in data.chunks(7) {
            hasher.update(chunk);
        }

        assert_eq!(hasher.value(), BlockChecksum::checksum(data));
    }

    #[test]
    fn reset_discards_state() {
        let mut hasher = BlockChecksum::new();
        hasher.update(b"first block");
        hasher.reset();
        hasher.update(b"second block");

        assert_eq!(hasher.value(), BlockChecksum::checksum(b"second block"));
    }

    #[test]
    fn different_payloads_differ() {
        assert_ne!(
            BlockChecksum::checksum(b"TestData"),
            BlockChecksum::checksum(b"TestDatb")
        );
    }
}
