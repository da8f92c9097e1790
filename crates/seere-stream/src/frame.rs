//! Wire-format constants and the block token encoding.
//!
//! Every block opens with a 21-byte header: magic (8), token (1),
//! compressed length (4, LE), original length (4, LE), checksum (4, LE).
//! The token packs the compression method into its high nibble and the
//! ceiled-log2 of the block size, rebased by [`COMPRESSION_LEVEL_BASE`],
//! into its low nibble.

use seere_core::{Error, Result};

/// Magic bytes opening every block.
pub const MAGIC: [u8; 8] = *b"LZ4Block";

/// Length of [`MAGIC`].
pub const MAGIC_LENGTH: usize = MAGIC.len();

/// Full header length: magic, token, compressed length, original length,
/// checksum.
pub const HEADER_LENGTH: usize = MAGIC_LENGTH + 1 + 4 + 4 + 4;

/// Offset between the token's level nibble and the effective level.
pub const COMPRESSION_LEVEL_BASE: u32 = 10;

/// Blocks are levelled as if they held at least this many bytes.
pub const MIN_BLOCK_SIZE: usize = 64;

/// Compression method carried in the token's high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Payload stored verbatim.
    #[default]
    Raw,
    /// Payload compressed as an LZ4 block.
    Lz4,
}

impl Method {
    /// Token bits for this method.
    pub fn bits(self) -> u8 {
        match self {
            Method::Raw => 0x10,
            Method::Lz4 => 0x20,
        }
    }

    /// Decode the method from a token byte.
    pub fn from_token(token: u8) -> Result<Method> {
        match token & 0xF0 {
            0x10 => Ok(Method::Raw),
            0x20 => Ok(Method::Lz4),
            bits => Err(Error::corrupted(format!(
                "unknown compression method 0x{bits:02x}"
            ))),
        }
    }
}

/// Level code for a block of `block_size` bytes: the ceiling of log2,
/// rebased so the minimum block size maps to zero.
///
/// The code caps at 15 to fit the token nibble, bounding payloads at
/// `1 << 25` bytes per block.
pub fn compression_level_code(block_size: usize) -> u8 {
    debug_assert!(block_size >= MIN_BLOCK_SIZE);
    let level = 32 - (block_size as u32 - 1).leading_zeros();
    debug_assert!((1u64 << level) >= block_size as u64);
    debug_assert!((block_size as u64) * 2 > (1u64 << level));
    let code = level.saturating_sub(COMPRESSION_LEVEL_BASE);
    assert!(
        code <= 0x0F,
        "block of {block_size} bytes exceeds the maximum frame level"
    );
    code as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_code_rebases_at_1024() {
        // everything up to 1 KiB shares the minimum code
        assert_eq!(compression_level_code(MIN_BLOCK_SIZE), 0);
        assert_eq!(compression_level_code(100), 0);
        assert_eq!(compression_level_code(1024), 0);

        assert_eq!(compression_level_code(1025), 1);
        assert_eq!(compression_level_code(2048), 1);
        assert_eq!(compression_level_code(2049), 2);
        assert_eq!(compression_level_code(10 * 1024 * 1024), 14);
        assert_eq!(compression_level_code(1 << 25), 15);
    }

    #[test]
    fn level_code_is_ceiled_log2() {
        for code in 1..=15u32 {
            let level = COMPRESSION_LEVEL_BASE + code;
            let size = 1usize << level;
            // a power of two sits at the top of its level...
            assert_eq!(compression_level_code(size), code as u8);
            // ...and one byte more rolls over
            if code < 15 {
                assert_eq!(compression_level_code(size + 1), code as u8 + 1);
            }
        }
    }

    #[test]
    fn method_bits_roundtrip() {
        for method in [Method::Raw, Method::Lz4] {
            for level in 0..=0x0Fu8 {
                let token = method.bits() | level;
                assert_eq!(Method::from_token(token).unwrap(), method);
            }
        }
    }

    #[test]
    fn unknown_method_nibbles_are_rejected() {
        for high in [0x00u8, 0x30, 0x40, 0x70, 0x90, 0xF0] {
            let err = Method::from_token(high | 0x03).unwrap_err();
            assert!(err.is_corrupted(), "nibble 0x{high:02x} must be rejected");
        }
    }

    #[test]
    fn header_length_is_21() {
        assert_eq!(HEADER_LENGTH, 21);
    }
}
