// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The accessor abstraction: a four-operation indirection mapping node
//! identifiers to node objects, so that the tree logic never dereferences
//! a raw storage address (§4.3, §9's note on avoiding cyclic references).
//!
//! Two implementations are provided: [`memory::MemoryAccessor`] keeps every
//! node in a `HashMap`; [`paged::PagedAccessor`] persists each node as one
//! fixed-size page in a memory-mapped file with a free list and a bounded
//! page cache.

pub mod memory;
pub mod paged;

use crate::error::BtreeResult;
use crate::node::Node;
use crate::types::NodeId;

/// Indirection between node identifiers and node objects.
///
/// `select`/`insert`/`update`/`remove` mirror §4.3's quadruple exactly;
/// `list` additionally enumerates every live node, used only during tree
/// teardown. Rust's ownership model makes the C original's `id_out`
/// out-parameter unnecessary: `insert` simply returns the minted id.
pub trait Accessor {
    /// Return the live node for `id`. Side-effect-free from the tree's
    /// point of view (a caching paged accessor may still mutate its own
    /// private cache).
    fn select(&mut self, id: NodeId) -> BtreeResult<Node>;

    /// Install `node`, minting and returning a fresh, non-zero id such that
    /// a subsequent `select` of that id yields this node.
    fn insert(&mut self, node: Node) -> BtreeResult<NodeId>;

    /// Persist `node` under its already-registered `id`.
    fn update(&mut self, id: NodeId, node: Node) -> BtreeResult<()>;

    /// Unregister the node at `id`; its id may be recycled by a later
    /// `insert`. `select` of that id thereafter is undefined.
    fn remove(&mut self, id: NodeId) -> BtreeResult<()>;

    /// Enumerate every live node id, for teardown.
    fn list(&mut self) -> BtreeResult<Vec<NodeId>>;
}
