//! # Seere Stream
//!
//! Framed LZ4 block streams.
//!
//! A stream is a run of self-describing blocks, each carrying its own
//! compression method, lengths, and an XXH32 checksum of the decompressed
//! payload, closed by a single end-of-stream block. The
//! [`BlockCompressor`] turns one payload into one block; the
//! [`BlockDecompressor`] consumes a growing [`ByteQueue`] and yields
//! payloads, tolerating arbitrary fragmentation of the incoming bytes.
//! The channel drivers wire both into async pipelines.
//!
//! ## Wire format
//!
//! Each block is `21 + compressed_len` bytes:
//!
//! | field            | bytes | encoding                                  |
//! |------------------|-------|-------------------------------------------|
//! | magic            | 8     | `LZ4Block`                                |
//! | token            | 1     | method nibble + ceiled-log2 size nibble   |
//! | compressed_len   | 4     | little-endian                             |
//! | original_len     | 4     | little-endian                             |
//! | checksum         | 4     | XXH32 of the decompressed payload         |
//! | payload          | var   | raw or LZ4 per the method nibble          |
//!
//! ## Example
//!
//! ```ignore
//! use seere_stream::{BlockCompressor, BlockDecompressor, ChannelCompressor, ChannelDecompressor};
//!
//! let compressor = ChannelCompressor::new(BlockCompressor::fast());
//! compressor.run(&mut input_rx, &mut framed_tx).await?;
//!
//! let decompressor = ChannelDecompressor::new(BlockDecompressor::new());
//! decompressor.run(&mut framed_rx, &mut output_tx).await?;
//! ```

pub mod decoder;
pub mod driver;
pub mod encoder;
pub mod frame;
pub mod metrics;
pub mod queue;

pub use decoder::{BlockDecompressor, DecodedBlock};
pub use driver::{
    ChannelCompressor, ChannelDecompressor, ChunkSource, CompressInspector, DecompressInspector,
    FrameSink,
};
pub use encoder::BlockCompressor;
pub use frame::{Method, HEADER_LENGTH, MAGIC};
pub use metrics::{CompressionMetrics, DecompressionMetrics};
pub use queue::ByteQueue;
