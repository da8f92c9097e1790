//! Collaborator traits for the block codec.
//!
//! The frame layer treats the compression primitives as opaque
//! collaborators: something that can bound and produce a compressed block,
//! and something that can reinflate one when told the exact original size.

use crate::error::Result;

/// One-shot block compression.
pub trait Compressor {
    /// Worst-case compressed size for `input_len` bytes.
    /// Useful for pre-allocating output buffers.
    fn max_compressed_size(&self, input_len: usize) -> usize;

    /// Compress `input` into `output`.
    ///
    /// `output` must hold at least
    /// [`max_compressed_size`](Self::max_compressed_size) bytes for the
    /// given input length.
    ///
    /// # Returns
    /// Number of bytes written to `output`.
    fn compress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize>;
}

/// One-shot block decompression with a known output size.
pub trait Decompressor {
    /// Decompress `input` into `output`, filling it exactly.
    ///
    /// The caller knows the decompressed size up front and sizes `output`
    /// accordingly.
    ///
    /// # Returns
    /// Number of **input** bytes consumed. A well-formed block consumes its
    /// input exactly; callers cross-check the returned count against the
    /// length they expected to consume.
    fn decompress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize>;
}
