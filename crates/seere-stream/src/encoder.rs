//! Block encoder: one framed block per input payload.

use bytes::Bytes;
use seere_core::{Compressor, Result};
use seere_lz4::{BlockChecksum, Lz4FastCompressor, Lz4HighCompressor};

use crate::frame::{compression_level_code, Method, HEADER_LENGTH, MAGIC, MAGIC_LENGTH, MIN_BLOCK_SIZE};

/// Encodes payloads into framed blocks.
///
/// Construction picks the compression backend. Whatever the backend, a
/// payload that LZ4 cannot shrink is stored RAW, so a block is never
/// larger than `HEADER_LENGTH + payload`.
pub struct BlockCompressor {
    compressor: Option<Box<dyn Compressor + Send>>,
    checksum: BlockChecksum,
    custom_end_of_stream: bool,
}

impl BlockCompressor {
    /// No compression backend: every block is stored RAW.
    ///
    /// Useful for measuring framing overhead and for tests.
    pub fn raw() -> Self {
        Self::create(None)
    }

    /// LZ4 fast compressor backend.
    pub fn fast() -> Self {
        Self::create(Some(Box::new(Lz4FastCompressor::new())))
    }

    /// LZ4 high compressor at its default level.
    pub fn high() -> Self {
        Self::create(Some(Box::new(Lz4HighCompressor::default())))
    }

    /// LZ4 high compressor at `level`.
    ///
    /// # Errors
    /// [`seere_core::Error::InvalidLevel`] when `level` is outside the
    /// high compressor's supported range.
    pub fn high_with_level(level: i32) -> Result<Self> {
        Ok(Self::create(Some(Box::new(Lz4HighCompressor::new(level)?))))
    }

    /// Custom compression backend.
    pub fn with_compressor(compressor: Box<dyn Compressor + Send>) -> Self {
        Self::create(Some(compressor))
    }

    fn create(compressor: Option<Box<dyn Compressor + Send>>) -> Self {
        Self {
            compressor,
            checksum: BlockChecksum::new(),
            custom_end_of_stream: false,
        }
    }

    /// Emit the end-of-stream block through the regular encoding path
    /// instead of as a fixed constant. Both spell the same 21 bytes.
    pub fn with_custom_end_of_stream_block(mut self, custom: bool) -> Self {
        self.custom_end_of_stream = custom;
        self
    }

    /// Encode one payload into one framed block.
    ///
    /// # Panics
    /// If `payload` is empty; empty blocks are reserved for the
    /// end-of-stream marker.
    pub fn compress(&mut self, payload: &[u8]) -> Result<Bytes> {
        assert!(
            !payload.is_empty(),
            "empty payloads cannot be encoded as data blocks"
        );
        self.do_compress(payload)
    }

    /// The end-of-stream block: header only, zero lengths, zero checksum.
    pub fn end_of_stream_block(&mut self) -> Result<Bytes> {
        if self.custom_end_of_stream {
            return self.do_compress(&[]);
        }

        let mut block = vec![0u8; HEADER_LENGTH];
        block[..MAGIC_LENGTH].copy_from_slice(&MAGIC);
        block[MAGIC_LENGTH] = Method::Raw.bits() | compression_level_code(MIN_BLOCK_SIZE);
        Ok(Bytes::from(block))
    }

    fn do_compress(&mut self, payload: &[u8]) -> Result<Bytes> {
        let len = payload.len();
        let level_code = compression_level_code(len.max(MIN_BLOCK_SIZE));

        let max_size = HEADER_LENGTH
            + match &self.compressor {
                Some(compressor) => compressor.max_compressed_size(len),
                None => len,
            };
        let mut block = vec![0u8; max_size];
        block[..MAGIC_LENGTH].copy_from_slice(&MAGIC);

        // The empty block is the end-of-stream marker; its checksum field
        // is zero by definition.
        let check = if len == 0 {
            0
        } else {
            self.checksum.reset();
            self.checksum.update(payload);
            self.checksum.value()
        };

        let mut compressed_len = len;
        if let Some(compressor) = &self.compressor {
            compressed_len = compressor.compress_to(payload, &mut block[HEADER_LENGTH..])?;
        }

        let method = if self.compressor.is_none() || compressed_len >= len {
            compressed_len = len;
            block[HEADER_LENGTH..HEADER_LENGTH + len].copy_from_slice(payload);
            Method::Raw
        } else {
            Method::Lz4
        };

        block[MAGIC_LENGTH] = method.bits() | level_code;
        block[MAGIC_LENGTH + 1..MAGIC_LENGTH + 5]
            .copy_from_slice(&(compressed_len as u32).to_le_bytes());
        block[MAGIC_LENGTH + 5..MAGIC_LENGTH + 9].copy_from_slice(&(len as u32).to_le_bytes());
        block[MAGIC_LENGTH + 9..MAGIC_LENGTH + 13].copy_from_slice(&check.to_le_bytes());

        block.truncate(HEADER_LENGTH + compressed_len);
        Ok(Bytes::from(block))
    }
}
