//! # Seere LZ4
//!
//! LZ4 and LZ4-HC block compression primitives.
//!
//! These are the raw byte-level codecs behind the framed streams in
//! `seere-stream`: they know nothing about headers, checksums-on-the-wire,
//! or end-of-stream markers, only how to turn a slice into an LZ4 block
//! and back.
//!
//! ## Features
//!
//! - **LZ4**: greedy hash-table compression, built for speed
//! - **LZ4-HC**: hash-chain compression at levels 9-17, better ratio
//! - **Sized decompression**: the decoder is told the original size and
//!   reports how many input bytes it consumed
//! - **XXH32**: the streaming checksum used per block on the wire
//!
//! The produced byte streams are standard LZ4 blocks, interchangeable with
//! other LZ4 block codecs (the test suite round-trips against `lz4_flex`).
//!
//! ## Example
//!
//! ```ignore
//! use seere_lz4::block::{compress_block, decompress_block, max_compressed_size};
//!
//! let mut compressed = vec![0u8; max_compressed_size(data.len())];
//! let compressed_len = compress_block(data, &mut compressed)?;
//!
//! let mut original = vec![0u8; data.len()];
//! let consumed = decompress_block(&compressed[..compressed_len], &mut original)?;
//! assert_eq!(consumed, compressed_len);
//! ```

pub mod block;
pub mod checksum;
pub mod compress;
pub mod decompress;
pub mod hc;

pub use checksum::{BlockChecksum, CHECKSUM_SEED};
pub use compress::Lz4FastCompressor;
pub use decompress::Lz4FastDecompressor;
pub use hc::Lz4HighCompressor;
