// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! A disk-backed classical B-tree, the storage core of an embeddable
//! key-value engine.
//!
//! The tree itself (`tree`) never touches storage directly: every node
//! lookup and mutation goes through a pluggable `accessor`, and every key
//! and value is an opaque byte buffer shaped by a `types::TypeDescriptor`
//! chosen at construction time rather than at compile time. This lets one
//! `Tree` implementation serve both a set-typed (`LONG_SET`) and a
//! map-typed (`LONG_HASH`) tree without generics over a Rust key type.
//!
//! ## Quick Start
//!
//! ```rust
//! use ixtree::accessor::memory::MemoryAccessor;
//! use ixtree::tree::Tree;
//! use ixtree::types::{encode_i64, Order, LONG_SET};
//!
//! let mut tree = Tree::create(&LONG_SET, Order::new(4).unwrap(), MemoryAccessor::new()).unwrap();
//! tree.add(encode_i64(42), None).unwrap();
//! assert!(tree.find(&encode_i64(42)).unwrap().is_some());
//! ```
//!
//! ## Modules
//!
//! - **error**: the crate's error type and result alias
//! - **types**: branching factor, type descriptors, and the built-in
//!   `long_set`/`long_hash` descriptors
//! - **node**: the in-memory node representation and its wire format
//! - **accessor**: the storage indirection trait, with in-memory and
//!   memory-mapped paged implementations
//! - **page**: fixed-size page framing used by the paged accessor
//! - **tree**: the B-tree itself: search, insert, delete, and diagnostics

pub mod accessor;
pub mod error;
pub mod node;
pub mod page;
pub mod tree;
pub mod types;

pub use error::{BtreeError, BtreeResult};
pub use tree::{InsertOutcome, RemoveOutcome, Tree};
pub use types::{NodeId, Order, TypeDescriptor, LONG_HASH, LONG_SET};
