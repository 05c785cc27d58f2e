// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Branching factor and type descriptor: the value-neutral capability set that
//! lets a single [`crate::tree::Tree`] and accessor pair serve more than one
//! concrete key/value layout, chosen at runtime rather than at compile time.

use crate::error::{BtreeError, BtreeResult};
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::fmt;

/// Opaque node identifier minted by an accessor. `0` is reserved to mean
/// "no child" in the serialized form (§4.1 of the wire layout).
pub type NodeId = u32;

/// Validated branching factor (`max_node_size` in the data model): an even
/// positive integer `>= 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order(u16);

impl Order {
    /// Validate and wrap a branching factor.
    ///
    /// ## Error Conditions
    /// - `max_node_size` is odd or less than 4.
    pub fn new(max_node_size: u16) -> BtreeResult<Self> {
        if max_node_size < 4 || max_node_size % 2 != 0 {
            return Err(BtreeError::InvalidOrder {
                max_node_size: max_node_size as u32,
            });
        }
        Ok(Self(max_node_size))
    }

    /// The branching factor `m`.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Minimum number of keys a non-root node may hold, `ceil(m/2)`.
    pub fn min_keys(&self) -> u16 {
        self.0.div_ceil(2)
    }

    /// Maximum number of keys any node may hold before it must split.
    pub fn max_keys(&self) -> u16 {
        self.0
    }

    /// Split pivot index used by the insert algorithm, `m/2`.
    pub fn split_pivot(&self) -> usize {
        (self.0 / 2) as usize
    }
}

/// Value-neutral description of one kind of tree: key/value byte widths, a
/// total-order comparator, a debug formatter, and the node (de)serialization
/// pair. Mirrors the original `rl_btree_type` dispatch table: a single
/// `Tree` implementation is parameterized by one of these at construction
/// time instead of being generic over a Rust key type.
pub struct TypeDescriptor {
    /// Name used only for diagnostics (`BtreeError::WrongType`).
    pub name: &'static str,
    /// Byte width of a score (key). Fixed per tree instance.
    pub key_size: usize,
    /// Byte width of a value, or `0` for set-typed trees.
    pub value_size: usize,
    /// Total-order comparator over two score buffers of `key_size` bytes.
    pub compare: fn(&[u8], &[u8]) -> Ordering,
    /// Human-readable rendering of a score, for `Tree::print`.
    pub format: fn(&[u8]) -> String,
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("key_size", &self.key_size)
            .field("value_size", &self.value_size)
            .finish()
    }
}

fn compare_i64_be(a: &[u8], b: &[u8]) -> Ordering {
    let a = i64::from_be_bytes(a.try_into().expect("score buffer must be 8 bytes"));
    let b = i64::from_be_bytes(b.try_into().expect("score buffer must be 8 bytes"));
    a.cmp(&b)
}

fn format_i64_be(a: &[u8]) -> String {
    let v = i64::from_be_bytes(a.try_into().expect("score buffer must be 8 bytes"));
    v.to_string()
}

/// Encode a signed 64-bit score as its big-endian byte representation.
pub fn encode_i64(v: i64) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

/// Decode a big-endian score buffer back into a signed 64-bit integer.
pub fn decode_i64(buf: &[u8]) -> i64 {
    i64::from_be_bytes(buf.try_into().expect("score buffer must be 8 bytes"))
}

/// Built-in set-typed descriptor: 8-byte numeric keys, no values.
///
/// Lazily initialized once per process, per §9's guidance to prefer a
/// lazily-initialized singleton over a mutable global.
pub static LONG_SET: Lazy<TypeDescriptor> = Lazy::new(|| TypeDescriptor {
    name: "long_set",
    key_size: 8,
    value_size: 0,
    compare: compare_i64_be,
    format: format_i64_be,
});

/// Built-in map-typed descriptor: 8-byte numeric keys, 8-byte numeric values.
pub static LONG_HASH: Lazy<TypeDescriptor> = Lazy::new(|| TypeDescriptor {
    name: "long_hash",
    key_size: 8,
    value_size: 8,
    compare: compare_i64_be,
    format: format_i64_be,
});
