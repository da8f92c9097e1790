//! Fast LZ4 compressor behind the [`Compressor`] trait.

use seere_core::{Compressor, Result};

use crate::block;

/// LZ4 fast compressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4FastCompressor;

impl Lz4FastCompressor {
    /// Create a new fast compressor.
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for Lz4FastCompressor {
    fn max_compressed_size(&self, input_len: usize) -> usize {
        block::max_compressed_size(input_len)
    }

    fn compress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        block::compress_block(input, output)
    }
}
