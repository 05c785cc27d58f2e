// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for the B-tree core.
//!
//! `FOUND` and `NOT_FOUND` are informational outcomes of search/insert/delete
//! (see `crate::tree`), not errors — only genuine failures are represented here.

use std::fmt;

/// Standard Result type for B-tree operations.
pub type BtreeResult<T> = Result<T, BtreeError>;

/// Error types raised by the B-tree core.
#[derive(Debug, Clone)]
pub enum BtreeError {
    /// Tree construction requested an invalid branching factor.
    InvalidOrder { max_node_size: u32 },

    /// A node's serialized form could not be parsed.
    Malformed { reason: String },

    /// A buffer passed to the type descriptor did not match its declared size.
    InvalidParameters { reason: String },

    /// An invariant that should always hold was violated.
    InvalidState { reason: String },

    /// A key's stored encoding does not match the type descriptor in use.
    WrongType { expected: &'static str, actual: &'static str },

    /// The accessor could not allocate a new node (paged accessor out of space).
    OutOfMemory { reason: String },

    /// I/O failure surfaced by the paged accessor.
    Io { operation: String, reason: String },

    /// A page's checksum or magic did not match on read.
    CorruptedPage { page_id: u32, reason: String },
}

impl fmt::Display for BtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrder { max_node_size } => {
                write!(
                    f,
                    "invalid branching factor {}: must be even and >= 4",
                    max_node_size
                )
            }
            Self::Malformed { reason } => write!(f, "malformed node: {}", reason),
            Self::InvalidParameters { reason } => {
                write!(f, "invalid parameters: {}", reason)
            }
            Self::InvalidState { reason } => write!(f, "invalid tree state: {}", reason),
            Self::WrongType { expected, actual } => {
                write!(f, "wrong type: expected '{}', found '{}'", expected, actual)
            }
            Self::OutOfMemory { reason } => write!(f, "out of memory: {}", reason),
            Self::Io { operation, reason } => {
                write!(f, "I/O error during '{}': {}", operation, reason)
            }
            Self::CorruptedPage { page_id, reason } => {
                write!(f, "corrupted page {}: {}", page_id, reason)
            }
        }
    }
}

impl std::error::Error for BtreeError {}

impl From<std::io::Error> for BtreeError {
    fn from(err: std::io::Error) -> Self {
        BtreeError::Io {
            operation: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}
