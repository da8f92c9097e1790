//! Fast LZ4 decompressor behind the [`Decompressor`] trait.

use seere_core::{Decompressor, Result};

use crate::block;

/// LZ4 fast decompressor.
///
/// The caller supplies an output buffer of the exact original size; the
/// decompressor reports how many input bytes the block actually used.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4FastDecompressor;

impl Lz4FastDecompressor {
    /// Create a new fast decompressor.
    pub fn new() -> Self {
        Self
    }
}

impl Decompressor for Lz4FastDecompressor {
    fn decompress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        block::decompress_block(input, output)
    }
}
