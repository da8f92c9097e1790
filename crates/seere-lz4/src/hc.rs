//! LZ4-HC (high compression) implementation.
//!
//! The fast compressor keeps one candidate position per hash and takes the
//! first match it finds. LZ4-HC keeps hash chains instead:
//!
//! 1. The hash table maps hash -> most recent position
//! 2. The chain table links each position -> previous position with the
//!    same hash
//! 3. Match search walks the chain and keeps the longest match, with the
//!    walk depth set by the compression level
//!
//! At the upper levels lazy matching is enabled: before committing to a
//! match, the next position is probed for a longer one.
//!
//! Levels run from [`MIN_COMPRESSION_LEVEL`] (9) to
//! [`MAX_COMPRESSION_LEVEL`] (17). The output is a standard LZ4 block
//! either way; the level trades compression time for ratio only.

use seere_core::{Compressor, Error, Result};

use crate::block::{
    count_match, max_compressed_size, read_u32_le, write_sequence, LAST_LITERALS, MIN_INPUT_SIZE,
    MIN_MATCH,
};

/// Lowest supported high-compression level.
pub const MIN_COMPRESSION_LEVEL: i32 = 9;

/// Highest supported high-compression level.
pub const MAX_COMPRESSION_LEVEL: i32 = 17;

/// Default high-compression level.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 9;

/// Hash table size (2^16 entries).
const HASH_TABLE_SIZE: usize = 1 << 16;

/// Window size for back-references (64 KB, the format's offset limit).
const WINDOW_SIZE: usize = 1 << 16;

/// Chain table size (matches the window).
const CHAIN_TABLE_SIZE: usize = WINDOW_SIZE;

/// Maximum chain walk per level, indexed by `level - MIN_COMPRESSION_LEVEL`.
const CHAIN_DEPTHS: [usize; 9] = [256, 512, 1024, 2048, 4096, 8192, 16384, 32768, 65536];

/// Lazy matching kicks in from this level up.
const LAZY_MATCH_LEVEL: i32 = 13;

/// Hash function for a 5-byte sequence (wider read than the fast path,
/// fewer chain collisions).
#[inline(always)]
fn hash5(data: &[u8], pos: usize) -> usize {
    let v = u64::from_le_bytes([
        data[pos],
        data[pos + 1],
        data[pos + 2],
        data[pos + 3],
        data[pos + 4],
        0,
        0,
        0,
    ]);
    ((v.wrapping_mul(889_523_592_379_u64)) >> 24) as usize & (HASH_TABLE_SIZE - 1)
}

/// Hash-chain search state for one compression pass.
struct HcContext {
    /// Maps hash -> most recent position with that hash.
    hash_table: Vec<u32>,

    /// Maps position (mod window) -> previous position with the same hash.
    chain_table: Vec<u32>,

    /// Chain walk budget for this level.
    max_chain: usize,

    /// Probe the next position before committing to a match.
    lazy_matching: bool,
}

impl HcContext {
    fn new(level: i32) -> Self {
        Self {
            hash_table: vec![0; HASH_TABLE_SIZE],
            chain_table: vec![0; CHAIN_TABLE_SIZE],
            max_chain: CHAIN_DEPTHS[(level - MIN_COMPRESSION_LEVEL) as usize],
            lazy_matching: level >= LAZY_MATCH_LEVEL,
        }
    }

    /// Link `pos` into the chain for its hash.
    #[inline]
    fn insert(&mut self, data: &[u8], pos: usize) {
        if pos + 5 > data.len() {
            return;
        }
        let h = hash5(data, pos);
        self.chain_table[pos & (CHAIN_TABLE_SIZE - 1)] = self.hash_table[h];
        self.hash_table[h] = pos as u32;
    }

    /// Link a run of positions (used when skipping over a match).
    fn insert_many(&mut self, data: &[u8], start: usize, end: usize) {
        for pos in start..end {
            self.insert(data, pos);
        }
    }

    /// Walk the chain at `pos` and return the best `(offset, match_len)`.
    fn find_best_match(
        &self,
        data: &[u8],
        pos: usize,
        match_limit: usize,
    ) -> Option<(usize, usize)> {
        if pos + 5 > data.len() {
            return None;
        }

        let mut candidate = self.hash_table[hash5(data, pos)] as usize;
        let mut best_len = MIN_MATCH - 1;
        let mut best_offset = 0;
        let mut depth = 0;

        while candidate > 0 && depth < self.max_chain {
            // chain entries may alias across window generations
            if candidate >= pos {
                break;
            }
            if pos - candidate >= WINDOW_SIZE {
                break;
            }

            if read_u32_le(data, candidate) == read_u32_le(data, pos) {
                let len = MIN_MATCH
                    + count_match(data, candidate + MIN_MATCH, pos + MIN_MATCH, match_limit);
                if len > best_len {
                    best_len = len;
                    best_offset = pos - candidate;
                }
            }

            let previous = self.chain_table[candidate & (CHAIN_TABLE_SIZE - 1)] as usize;
            if previous == 0 || previous >= candidate {
                break;
            }
            candidate = previous;
            depth += 1;
        }

        if best_len >= MIN_MATCH {
            Some((best_offset, best_len))
        } else {
            None
        }
    }
}

/// Compress data with the hash-chain search at the given level.
///
/// Levels outside [[`MIN_COMPRESSION_LEVEL`], [`MAX_COMPRESSION_LEVEL`]]
/// are clamped; use [`Lz4HighCompressor::new`] for validated construction.
/// Returns the number of bytes written to `output`.
pub fn compress_hc(input: &[u8], output: &mut [u8], level: i32) -> Result<usize> {
    let input_len = input.len();

    if input_len < MIN_INPUT_SIZE {
        return crate::block::compress_block(input, output);
    }

    let level = level.clamp(MIN_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL);
    let mut ctx = HcContext::new(level);

    let match_limit = input_len - LAST_LITERALS;
    let mf_limit = match_limit.saturating_sub(MIN_MATCH);

    let mut input_pos = 0;
    let mut output_pos = 0;
    let mut anchor = 0;

    while input_pos < mf_limit {
        let Some((offset, match_len)) = ctx.find_best_match(input, input_pos, match_limit) else {
            ctx.insert(input, input_pos);
            input_pos += 1;
            continue;
        };

        // lazy matching: defer if the next position matches longer
        let use_current = if ctx.lazy_matching && input_pos + 1 < mf_limit {
            match ctx.find_best_match(input, input_pos + 1, match_limit) {
                Some((_, next_len)) => match_len >= next_len + 1,
                None => true,
            }
        } else {
            true
        };

        if !use_current {
            ctx.insert(input, input_pos);
            input_pos += 1;
            continue;
        }

        let literal_len = input_pos - anchor;
        output_pos = write_sequence(
            input,
            output,
            output_pos,
            anchor,
            literal_len,
            Some((offset as u16, match_len)),
        )?;

        let match_end = input_pos + match_len;
        ctx.insert_many(input, input_pos, match_end.min(mf_limit));
        input_pos = match_end;
        anchor = input_pos;
    }

    write_sequence(input, output, output_pos, anchor, input_len - anchor, None)
}

/// LZ4-HC compressor at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct Lz4HighCompressor {
    level: i32,
}

impl Lz4HighCompressor {
    /// Create a high compressor at `level`.
    ///
    /// # Errors
    /// [`Error::InvalidLevel`] when `level` is outside
    /// [[`MIN_COMPRESSION_LEVEL`], [`MAX_COMPRESSION_LEVEL`]].
    pub fn new(level: i32) -> Result<Self> {
        if !(MIN_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL).contains(&level) {
            return Err(Error::invalid_level(
                level,
                MIN_COMPRESSION_LEVEL,
                MAX_COMPRESSION_LEVEL,
            ));
        }
        Ok(Self { level })
    }

    /// Get the compression level.
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for Lz4HighCompressor {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl Compressor for Lz4HighCompressor {
    fn max_compressed_size(&self, input_len: usize) -> usize {
        max_compressed_size(input_len)
    }

    fn compress_to(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        compress_hc(input, output, self.level)
    }
}
