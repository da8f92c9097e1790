//! # Seere Core
//!
//! Error types and collaborator traits for the seere framed block codec.
//!
//! Seere is named after the 70th demon of the Ars Goetia, who crosses the
//! earth in the twinkling of an eye - fitting for a library whose job is to
//! move byte streams quickly, packed into self-describing compressed blocks.
//!
//! ## Core Traits
//!
//! - [`Compressor`] - one-shot block compression into a caller buffer
//! - [`Decompressor`] - one-shot block decompression with a known output size
//!
//! The frame layer in `seere-stream` is written against these traits, so the
//! compression backend stays swappable; `seere-lz4` provides the LZ4 and
//! LZ4-HC implementations.
//!
//! ## Example
//!
//! ```ignore
//! use seere_core::Compressor;
//! use seere_lz4::Lz4FastCompressor;
//!
//! let compressor = Lz4FastCompressor::new();
//! let mut output = vec![0u8; compressor.max_compressed_size(data.len())];
//! let written = compressor.compress_to(data, &mut output)?;
//! ```

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::{Compressor, Decompressor};
