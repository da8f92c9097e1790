//! Channel drivers: the compressor and decompressor ends of a framed
//! stream.
//!
//! Drivers pull opaque byte buffers from a [`ChunkSource`], run the block
//! codec, and hand results to a [`FrameSink`]. They suspend only while
//! pulling and while the sink accepts a buffer; between suspensions a
//! driver processes every complete frame already queued. Errors are
//! terminal: a driver returns at most one error through its completion
//! result, never emits a partial frame, and dropping its future cancels
//! the stream and releases any held buffers.

use std::collections::VecDeque;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use seere_core::{Error, Result};

use crate::decoder::{BlockDecompressor, DecodedBlock};
use crate::encoder::BlockCompressor;
use crate::queue::ByteQueue;

/// Supplies input buffers to a driver.
#[allow(async_fn_in_trait)]
pub trait ChunkSource {
    /// Await the next buffer. `Ok(None)` signals end of input; an error
    /// is passed through to the driver's completion result unchanged.
    async fn pull(&mut self) -> Result<Option<Bytes>>;
}

/// Accepts output buffers from a driver.
#[allow(async_fn_in_trait)]
pub trait FrameSink {
    /// Await acceptance of one buffer.
    async fn accept(&mut self, buf: Bytes) -> Result<()>;

    /// Signal that no further buffers will arrive.
    async fn end(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ChunkSource for mpsc::Receiver<Bytes> {
    async fn pull(&mut self) -> Result<Option<Bytes>> {
        Ok(self.recv().await)
    }
}

impl ChunkSource for VecDeque<Bytes> {
    async fn pull(&mut self) -> Result<Option<Bytes>> {
        Ok(self.pop_front())
    }
}

impl FrameSink for mpsc::Sender<Bytes> {
    async fn accept(&mut self, buf: Bytes) -> Result<()> {
        self.send(buf)
            .await
            .map_err(|_| Error::downstream("output channel closed"))
    }
}

impl FrameSink for Vec<Bytes> {
    async fn accept(&mut self, buf: Bytes) -> Result<()> {
        self.push(buf);
        Ok(())
    }
}

/// Observes compressor-side traffic. Purely informational: implementations
/// must not affect the stream.
pub trait CompressInspector {
    /// One payload was encoded into one frame.
    fn on_block(&self, input_len: usize, frame_len: usize);

    /// The end-of-stream block was emitted.
    fn on_end_of_stream(&self, frame_len: usize);
}

/// Observes decompressor-side traffic. Purely informational.
pub trait DecompressInspector {
    /// One frame of `consumed` wire bytes was decoded into `payload`.
    fn on_block(&self, consumed: usize, payload: &[u8]);

    /// The end-of-stream block of `consumed` wire bytes was decoded.
    fn on_end_of_stream(&self, consumed: usize);
}

/// Compressor end of a stream: one frame per pulled payload, then the
/// end-of-stream block.
pub struct ChannelCompressor {
    compressor: BlockCompressor,
    inspector: Option<Arc<dyn CompressInspector + Send + Sync>>,
}

impl ChannelCompressor {
    /// Create a driver around a block encoder.
    pub fn new(compressor: BlockCompressor) -> Self {
        Self {
            compressor,
            inspector: None,
        }
    }

    /// Attach a passive inspector.
    pub fn with_inspector(mut self, inspector: Arc<dyn CompressInspector + Send + Sync>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Drive the stream to completion.
    ///
    /// Every non-empty payload pulled from `source` becomes exactly one
    /// frame in `sink`; chunking is not normalized, so many small payloads
    /// make many small frames. When the source is exhausted, exactly one
    /// end-of-stream block is emitted and the sink is ended.
    pub async fn run<S, K>(mut self, source: &mut S, sink: &mut K) -> Result<()>
    where
        S: ChunkSource,
        K: FrameSink,
    {
        loop {
            match source.pull().await? {
                Some(payload) if payload.is_empty() => continue,
                Some(payload) => {
                    let frame = self.compressor.compress(&payload)?;
                    trace!(
                        payload_len = payload.len(),
                        frame_len = frame.len(),
                        "encoded block"
                    );
                    if let Some(inspector) = &self.inspector {
                        inspector.on_block(payload.len(), frame.len());
                    }
                    drop(payload);
                    sink.accept(frame).await?;
                }
                None => {
                    let block = self.compressor.end_of_stream_block()?;
                    debug!(frame_len = block.len(), "emitting end-of-stream block");
                    if let Some(inspector) = &self.inspector {
                        inspector.on_end_of_stream(block.len());
                    }
                    sink.accept(block).await?;
                    return sink.end().await;
                }
            }
        }
    }
}

/// Decompressor end of a stream: feeds pulled buffers through the block
/// decoder and emits payloads in wire order.
pub struct ChannelDecompressor {
    decompressor: BlockDecompressor,
    inspector: Option<Arc<dyn DecompressInspector + Send + Sync>>,
}

impl ChannelDecompressor {
    /// Create a driver around a block decoder.
    pub fn new(decompressor: BlockDecompressor) -> Self {
        Self {
            decompressor,
            inspector: None,
        }
    }

    /// Attach a passive inspector.
    pub fn with_inspector(mut self, inspector: Arc<dyn DecompressInspector + Send + Sync>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Drive the stream to completion.
    ///
    /// # Errors
    /// - [`Error::Corrupted`] on any malformed frame, or when the source
    ///   ends before the end-of-stream block
    /// - [`Error::UnexpectedTrailingData`] when bytes remain queued, or
    ///   keep arriving, after the end-of-stream block
    pub async fn run<S, K>(mut self, source: &mut S, sink: &mut K) -> Result<()>
    where
        S: ChunkSource,
        K: FrameSink,
    {
        let mut queue = ByteQueue::new();
        loop {
            // drain every frame already complete in the queue
            loop {
                let before = queue.remaining_bytes();
                match self.decompressor.try_decompress(&mut queue)? {
                    Some(DecodedBlock::Data(payload)) => {
                        let consumed = before - queue.remaining_bytes();
                        trace!(consumed, payload_len = payload.len(), "decoded block");
                        if let Some(inspector) = &self.inspector {
                            inspector.on_block(consumed, &payload);
                        }
                        sink.accept(payload).await?;
                    }
                    Some(DecodedBlock::EndOfStream) => {
                        let consumed = before - queue.remaining_bytes();
                        debug!(consumed, "decoded end-of-stream block");
                        if let Some(inspector) = &self.inspector {
                            inspector.on_end_of_stream(consumed);
                        }
                        if !queue.is_empty() {
                            return Err(Error::UnexpectedTrailingData);
                        }
                        // the source must be exhausted too
                        loop {
                            match source.pull().await? {
                                Some(buf) if buf.is_empty() => continue,
                                Some(_) => return Err(Error::UnexpectedTrailingData),
                                None => {
                                    return sink.end().await;
                                }
                            }
                        }
                    }
                    None => break,
                }
            }

            match source.pull().await? {
                Some(buf) => queue.push(buf),
                None => {
                    return Err(Error::corrupted(
                        "stream ended before the end-of-stream block",
                    ));
                }
            }
        }
    }
}
