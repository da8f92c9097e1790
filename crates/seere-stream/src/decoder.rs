//! Streaming block decoder.

use bytes::Bytes;
use seere_core::{Decompressor, Error, Result};
use seere_lz4::{BlockChecksum, Lz4FastDecompressor};

use crate::frame::{Method, COMPRESSION_LEVEL_BASE, HEADER_LENGTH, MAGIC, MAGIC_LENGTH};
use crate::queue::ByteQueue;

/// One decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedBlock {
    /// A data block's decompressed payload.
    Data(Bytes),
    /// The end-of-stream block.
    EndOfStream,
}

/// Header fields of the frame under decode, refreshed per attempt.
#[derive(Debug, Default)]
struct BlockHeader {
    original_len: usize,
    compressed_len: usize,
    method: Method,
    check: u32,
    finished: bool,
}

/// Streaming decoder: consumes framed blocks from a byte queue.
///
/// Each [`try_decompress`](Self::try_decompress) call removes at most one
/// complete frame from the queue and yields its payload or the
/// end-of-stream marker. While a frame is incomplete the queue is only
/// peeked, never consumed, so input may arrive fragmented at any
/// granularity. Validation failures are terminal; the decoder is not
/// meant to be reused after reporting one.
pub struct BlockDecompressor {
    decompressor: Box<dyn Decompressor + Send>,
    checksum: BlockChecksum,
    header: BlockHeader,
    custom_end_of_stream: bool,
}

impl BlockDecompressor {
    /// Create a decoder backed by the LZ4 fast decompressor.
    pub fn new() -> Self {
        Self::with_decompressor(Box::new(Lz4FastDecompressor::new()))
    }

    /// Create a decoder over a custom decompression backend.
    pub fn with_decompressor(decompressor: Box<dyn Decompressor + Send>) -> Self {
        Self {
            decompressor,
            checksum: BlockChecksum::new(),
            header: BlockHeader::default(),
            custom_end_of_stream: false,
        }
    }

    /// Mirror of the encoder's custom end-of-stream flag.
    ///
    /// The standard and custom end-of-stream blocks are bit-identical on
    /// the wire, so the flag does not change what the decoder accepts; it
    /// exists so both ends of a pipeline can be configured symmetrically.
    pub fn with_custom_end_of_stream_block(mut self, custom: bool) -> Self {
        self.custom_end_of_stream = custom;
        self
    }

    /// Whether the custom end-of-stream flag is set.
    pub fn is_custom_end_of_stream(&self) -> bool {
        self.custom_end_of_stream
    }

    /// Try to consume one complete frame from `queue`.
    ///
    /// # Returns
    /// - `Ok(Some(DecodedBlock::Data(..)))` - one frame removed, payload
    ///   decompressed and verified
    /// - `Ok(Some(DecodedBlock::EndOfStream))` - the end-of-stream block
    ///   was removed
    /// - `Ok(None)` - more bytes are needed; nothing was consumed
    ///
    /// # Errors
    /// [`Error::Corrupted`] on any validation failure: bad magic, unknown
    /// method, inconsistent lengths, malformed LZ4 payload, or checksum
    /// mismatch.
    pub fn try_decompress(&mut self, queue: &mut ByteQueue) -> Result<Option<DecodedBlock>> {
        if !queue.has_remaining_bytes(HEADER_LENGTH) {
            // reject wrong magic as early as the bytes allow
            let present = queue.remaining_bytes().min(MAGIC_LENGTH);
            for i in 0..present {
                if queue.peek_byte(i) != MAGIC[i] {
                    return Err(Error::corrupted("invalid magic bytes"));
                }
            }
            return Ok(None);
        }

        self.read_header(queue)?;

        if !queue.has_remaining_bytes(HEADER_LENGTH + self.header.compressed_len) {
            return Ok(None);
        }

        queue.skip(HEADER_LENGTH);
        if self.header.finished {
            return Ok(Some(DecodedBlock::EndOfStream));
        }

        let payload = self.decompress_body(queue)?;
        Ok(Some(DecodedBlock::Data(payload)))
    }

    /// Parse and validate the 21 header bytes by peeking.
    fn read_header(&mut self, queue: &ByteQueue) -> Result<()> {
        self.header = BlockHeader::default();

        for i in 0..MAGIC_LENGTH {
            if queue.peek_byte(i) != MAGIC[i] {
                return Err(Error::corrupted("invalid magic bytes"));
            }
        }

        let token = queue.peek_byte(MAGIC_LENGTH);
        let method = Method::from_token(token)?;
        let level = COMPRESSION_LEVEL_BASE + (token & 0x0F) as u32;

        // lengths are signed on the wire; the high bit set means garbage
        let compressed_len = queue.peek_i32_le(MAGIC_LENGTH + 1);
        let original_len = queue.peek_i32_le(MAGIC_LENGTH + 5);
        let check = queue.peek_u32_le(MAGIC_LENGTH + 9);

        if original_len < 0 || compressed_len < 0 {
            return Err(Error::corrupted(format!(
                "negative block length: original {original_len}, compressed {compressed_len}"
            )));
        }
        if i64::from(original_len) > 1i64 << level {
            return Err(Error::corrupted(format!(
                "block of {original_len} bytes exceeds the {} byte bound of level {level}",
                1u64 << level
            )));
        }
        if (original_len == 0) != (compressed_len == 0) {
            return Err(Error::corrupted(format!(
                "inconsistent zero length: original {original_len}, compressed {compressed_len}"
            )));
        }
        if method == Method::Raw && original_len != compressed_len {
            return Err(Error::corrupted(format!(
                "raw block length mismatch: original {original_len}, compressed {compressed_len}"
            )));
        }

        if original_len == 0 {
            if check != 0 {
                return Err(Error::corrupted(
                    "end-of-stream block with nonzero checksum",
                ));
            }
            self.header.finished = true;
        }

        self.header.original_len = original_len as usize;
        self.header.compressed_len = compressed_len as usize;
        self.header.method = method;
        self.header.check = check;
        Ok(())
    }

    /// Take the block body off the queue, reinflate it, verify the checksum.
    fn decompress_body(&mut self, queue: &mut ByteQueue) -> Result<Bytes> {
        let input = queue.take_exact(self.header.compressed_len);
        let mut output = vec![0u8; self.header.original_len];

        match self.header.method {
            Method::Raw => output.copy_from_slice(&input),
            Method::Lz4 => {
                let consumed = self
                    .decompressor
                    .decompress_to(&input, &mut output)
                    .map_err(|e| Error::corrupted_with("malformed compressed block", e))?;
                if consumed != self.header.compressed_len {
                    return Err(Error::corrupted(format!(
                        "block consumed {consumed} bytes, header declares {}",
                        self.header.compressed_len
                    )));
                }
            }
        }

        self.checksum.reset();
        self.checksum.update(&output);
        let actual = self.checksum.value();
        if actual != self.header.check {
            return Err(Error::corrupted(format!(
                "checksum mismatch: expected 0x{:08x}, got 0x{actual:08x}",
                self.header.check
            )));
        }

        Ok(Bytes::from(output))
    }
}

impl Default for BlockDecompressor {
    fn default() -> Self {
        Self::new()
    }
}
