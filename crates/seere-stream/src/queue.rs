//! FIFO queue of byte buffers with non-destructive peeks.
//!
//! The streaming decoder reads headers by peeking, commits by skipping,
//! and detaches block bodies with [`take_exact`](ByteQueue::take_exact);
//! none of those operations care how the incoming bytes were chunked.

use std::collections::VecDeque;

use bytes::{Buf, Bytes, BytesMut};

/// FIFO of [`Bytes`] buffers addressable as one contiguous byte sequence.
#[derive(Debug, Default)]
pub struct ByteQueue {
    bufs: VecDeque<Bytes>,
    remaining: usize,
}

impl ByteQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a buffer. Empty buffers are dropped.
    pub fn push(&mut self, buf: Bytes) {
        if buf.is_empty() {
            return;
        }
        self.remaining += buf.len();
        self.bufs.push_back(buf);
    }

    /// Total bytes across all queued buffers.
    pub fn remaining_bytes(&self) -> usize {
        self.remaining
    }

    /// Whether at least `n` bytes are queued.
    pub fn has_remaining_bytes(&self, n: usize) -> bool {
        self.remaining >= n
    }

    /// Whether no bytes are queued.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Byte at `offset` from the front, without consuming anything.
    ///
    /// # Panics
    /// If `offset` is past the queued data.
    pub fn peek_byte(&self, offset: usize) -> u8 {
        assert!(
            offset < self.remaining,
            "peek at offset {offset} past {} queued bytes",
            self.remaining
        );
        let mut rest = offset;
        for buf in &self.bufs {
            if rest < buf.len() {
                return buf[rest];
            }
            rest -= buf.len();
        }
        unreachable!("remaining count out of sync with queued buffers")
    }

    /// Little-endian i32 at `offset`, without consuming anything.
    pub fn peek_i32_le(&self, offset: usize) -> i32 {
        i32::from_le_bytes([
            self.peek_byte(offset),
            self.peek_byte(offset + 1),
            self.peek_byte(offset + 2),
            self.peek_byte(offset + 3),
        ])
    }

    /// Little-endian u32 at `offset`, without consuming anything.
    pub fn peek_u32_le(&self, offset: usize) -> u32 {
        self.peek_i32_le(offset) as u32
    }

    /// Drop `n` bytes from the front.
    ///
    /// # Panics
    /// If fewer than `n` bytes are queued.
    pub fn skip(&mut self, n: usize) {
        assert!(
            n <= self.remaining,
            "cannot skip {n} bytes, only {} queued",
            self.remaining
        );
        self.remaining -= n;
        let mut left = n;
        while left > 0 {
            let Some(front) = self.bufs.front_mut() else {
                return;
            };
            if left < front.len() {
                front.advance(left);
                return;
            }
            left -= front.len();
            self.bufs.pop_front();
        }
    }

    /// Detach exactly `n` bytes from the front as one owned buffer.
    ///
    /// Zero-copy when the run lies within the first queued buffer.
    ///
    /// # Panics
    /// If fewer than `n` bytes are queued.
    pub fn take_exact(&mut self, n: usize) -> Bytes {
        assert!(
            n <= self.remaining,
            "cannot take {n} bytes, only {} queued",
            self.remaining
        );
        self.remaining -= n;
        if n == 0 {
            return Bytes::new();
        }

        if let Some(front) = self.bufs.front_mut() {
            if n < front.len() {
                return front.split_to(n);
            }
            if n == front.len() {
                return self.bufs.pop_front().unwrap_or_default();
            }
        }

        let mut assembled = BytesMut::with_capacity(n);
        let mut left = n;
        while left > 0 {
            let Some(mut front) = self.bufs.pop_front() else {
                break;
            };
            if left < front.len() {
                assembled.extend_from_slice(&front.split_to(left));
                self.bufs.push_front(front);
                left = 0;
            } else {
                left -= front.len();
                assembled.extend_from_slice(&front);
            }
        }
        assembled.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(chunks: &[&[u8]]) -> ByteQueue {
        let mut queue = ByteQueue::new();
        for chunk in chunks {
            queue.push(Bytes::copy_from_slice(chunk));
        }
        queue
    }

    #[test]
    fn peeks_cross_buffer_boundaries() {
        let queue = queue_of(&[b"ab", b"", b"cde", b"f"]);
        assert_eq!(queue.remaining_bytes(), 6);

        let peeked: Vec<u8> = (0..6).map(|i| queue.peek_byte(i)).collect();
        assert_eq!(peeked, b"abcdef");
        // peeking consumed nothing
        assert_eq!(queue.remaining_bytes(), 6);
    }

    #[test]
    fn peek_i32_le_across_boundaries() {
        let value = 0x0403_0201i32;
        let bytes = value.to_le_bytes();
        let queue = queue_of(&[&bytes[..1], &bytes[1..3], &bytes[3..]]);
        assert_eq!(queue.peek_i32_le(0), value);
    }

    #[test]
    fn peek_reads_sign_bit() {
        let queue = queue_of(&[&[0xFF, 0xFF, 0xFF, 0xFF]]);
        assert_eq!(queue.peek_i32_le(0), -1);
        assert_eq!(queue.peek_u32_le(0), u32::MAX);
    }

    #[test]
    fn skip_drops_whole_and_partial_buffers() {
        let mut queue = queue_of(&[b"abc", b"def", b"ghi"]);
        queue.skip(4);
        assert_eq!(queue.remaining_bytes(), 5);
        assert_eq!(queue.peek_byte(0), b'e');

        queue.skip(5);
        assert!(queue.is_empty());
    }

    #[test]
    fn take_exact_within_one_buffer() {
        let mut queue = queue_of(&[b"abcdef"]);
        let taken = queue.take_exact(4);
        assert_eq!(&taken[..], b"abcd");
        assert_eq!(queue.remaining_bytes(), 2);
        assert_eq!(queue.peek_byte(0), b'e');
    }

    #[test]
    fn take_exact_assembles_across_buffers() {
        let mut queue = queue_of(&[b"ab", b"cd", b"efgh"]);
        let taken = queue.take_exact(5);
        assert_eq!(&taken[..], b"abcde");
        assert_eq!(queue.remaining_bytes(), 3);

        let rest = queue.take_exact(3);
        assert_eq!(&rest[..], b"fgh");
        assert!(queue.is_empty());
    }

    #[test]
    fn take_exact_zero_is_empty() {
        let mut queue = queue_of(&[b"xyz"]);
        assert!(queue.take_exact(0).is_empty());
        assert_eq!(queue.remaining_bytes(), 3);
    }

    #[test]
    #[should_panic(expected = "cannot take")]
    fn take_exact_past_end_panics() {
        let mut queue = queue_of(&[b"xy"]);
        let _ = queue.take_exact(3);
    }
}
