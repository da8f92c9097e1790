//! Inspector-backed stream metrics.
//!
//! Plain atomic counters attached to the drivers through the inspector
//! hooks. Share an `Arc` with the driver and read the totals whenever.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::driver::{CompressInspector, DecompressInspector};

/// Running totals for the compressor end of a stream.
#[derive(Debug, Default)]
pub struct CompressionMetrics {
    blocks: AtomicU64,
    bytes_in: AtomicU64,
    bytes_out: AtomicU64,
    end_of_stream_blocks: AtomicU64,
}

impl CompressionMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Data blocks emitted.
    pub fn blocks(&self) -> u64 {
        self.blocks.load(Ordering::Relaxed)
    }

    /// Payload bytes consumed.
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in.load(Ordering::Relaxed)
    }

    /// Frame bytes emitted, end-of-stream block included.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out.load(Ordering::Relaxed)
    }

    /// End-of-stream blocks emitted.
    pub fn end_of_stream_blocks(&self) -> u64 {
        self.end_of_stream_blocks.load(Ordering::Relaxed)
    }

    /// Payload bytes over frame bytes; 1.0 before anything was emitted.
    pub fn ratio(&self) -> f64 {
        let out = self.bytes_out();
        if out == 0 {
            return 1.0;
        }
        self.bytes_in() as f64 / out as f64
    }
}

impl CompressInspector for CompressionMetrics {
    fn on_block(&self, input_len: usize, frame_len: usize) {
        self.blocks.fetch_add(1, Ordering::Relaxed);
        self.bytes_in.fetch_add(input_len as u64, Ordering::Relaxed);
        self.bytes_out.fetch_add(frame_len as u64, Ordering::Relaxed);
    }

    fn on_end_of_stream(&self, frame_len: usize) {
        self.end_of_stream_blocks.fetch_add(1, Ordering::Relaxed);
        self.bytes_out.fetch_add(frame_len as u64, Ordering::Relaxed);
    }
}

/// Running totals for the decompressor end of a stream.
#[derive(Debug, Default)]
pub struct DecompressionMetrics {
    blocks: AtomicU64,
    bytes_consumed: AtomicU64,
    bytes_out: AtomicU64,
    end_of_stream_blocks: AtomicU64,
}

impl DecompressionMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Data blocks decoded.
    pub fn blocks(&self) -> u64 {
        self.blocks.load(Ordering::Relaxed)
    }

    /// Wire bytes consumed, end-of-stream block included.
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed.load(Ordering::Relaxed)
    }

    /// Payload bytes emitted.
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out.load(Ordering::Relaxed)
    }

    /// End-of-stream blocks decoded.
    pub fn end_of_stream_blocks(&self) -> u64 {
        self.end_of_stream_blocks.load(Ordering::Relaxed)
    }
}

impl DecompressInspector for DecompressionMetrics {
    fn on_block(&self, consumed: usize, payload: &[u8]) {
        self.blocks.fetch_add(1, Ordering::Relaxed);
        self.bytes_consumed
            .fetch_add(consumed as u64, Ordering::Relaxed);
        self.bytes_out
            .fetch_add(payload.len() as u64, Ordering::Relaxed);
    }

    fn on_end_of_stream(&self, consumed: usize) {
        self.end_of_stream_blocks.fetch_add(1, Ordering::Relaxed);
        self.bytes_consumed
            .fetch_add(consumed as u64, Ordering::Relaxed);
    }
}
