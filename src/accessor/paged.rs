// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Paged accessor: persists each node as one fixed-size page in a
//! memory-mapped file, with a free list for reclaimed pages and a bounded
//! page cache in front of the mapping (§4.3).
//!
//! Durability beyond "a committed page is visible to the next `select`" is
//! explicitly the accessor's own business and out of this crate's scope
//! (§1); this accessor does not keep a write-ahead log. Each `insert`/
//! `update` is written through to the mapping and flushed before it
//! returns, so the ordering guarantee of §5 holds without one.

use crate::accessor::Accessor;
use crate::error::{BtreeError, BtreeResult};
use crate::node::Node;
use crate::page::{Page, PageKind, HEADER_SIZE};
use crate::types::{NodeId, Order, TypeDescriptor};
use fs2::FileExt;
use memmap2::MmapMut;
use std::collections::{HashMap, VecDeque};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Page 0 is reserved (mirrors the wire format's "0 means no child"
/// sentinel), so newly created files start with this many pages.
const INITIAL_PAGES: u64 = 16;

/// Persists B-tree nodes to a memory-mapped file, one node per page.
pub struct PagedAccessor {
    file: File,
    mmap: MmapMut,
    type_desc: &'static TypeDescriptor,
    max_node_size: u16,
    page_size: usize,
    payload_size: usize,
    page_count: u64,
    next_page: NodeId,
    free_list_head: NodeId,
    cache: HashMap<NodeId, Node>,
    cache_order: VecDeque<NodeId>,
    cache_capacity: usize,
}

impl PagedAccessor {
    /// Open (creating if absent) a page file backing a tree of the given
    /// order and type descriptor.
    ///
    /// ## Error Conditions
    /// - I/O failure opening, locking, or sizing the file.
    /// - An existing file whose pages fail checksum validation on scan.
    pub fn open<P: AsRef<Path>>(
        path: P,
        type_desc: &'static TypeDescriptor,
        order: Order,
        cache_capacity: usize,
    ) -> BtreeResult<Self> {
        let max_node_size = order.value();
        let payload_size = 8 + max_node_size as usize * (type_desc.key_size + type_desc.value_size + 4);
        let page_size = HEADER_SIZE + payload_size;

        let file = OpenOptions::new().read(true).write(true).create(true).open(path)?;
        file.try_lock_exclusive().map_err(|e| BtreeError::Io {
            operation: "lock page file".to_string(),
            reason: e.to_string(),
        })?;

        let existing_len = file.metadata()?.len();
        let is_new = existing_len == 0;
        if is_new {
            file.set_len(page_size as u64 * INITIAL_PAGES)?;
        }

        let mmap = unsafe { MmapMut::map_mut(&file)? };
        let page_count = mmap.len() as u64 / page_size as u64;

        let mut accessor = Self {
            file,
            mmap,
            type_desc,
            max_node_size,
            page_size,
            payload_size,
            page_count,
            next_page: 1,
            free_list_head: 0,
            cache: HashMap::new(),
            cache_order: VecDeque::new(),
            cache_capacity: cache_capacity.max(1),
        };

        if is_new {
            accessor.next_page = 1;
        } else {
            accessor.rebuild_bookkeeping()?;
        }

        Ok(accessor)
    }

    /// Re-derive `next_page` and the free list by scanning every page, used
    /// when reopening an existing file (mirrors the teacher's `load()`
    /// scan-for-the-frontier approach).
    fn rebuild_bookkeeping(&mut self) -> BtreeResult<()> {
        let mut max_live = 0u32;
        let mut free_ids = Vec::new();
        for id in 1..self.page_count as u32 {
            let page = Page::read_from(&self.mmap, id, self.page_size)?;
            match page.header.kind {
                PageKind::Node => max_live = max_live.max(id),
                PageKind::Free => free_ids.push(id),
            }
        }
        self.next_page = max_live + 1;
        // Thread reclaimed pages into the free list, most-recently-scanned first.
        self.free_list_head = 0;
        for id in free_ids {
            self.link_free(id)?;
        }
        Ok(())
    }

    fn link_free(&mut self, id: NodeId) -> BtreeResult<()> {
        let mut page = Page::new_free(self.free_list_head, self.payload_size);
        page.write_to(&mut self.mmap, id, self.page_size)?;
        self.free_list_head = id;
        Ok(())
    }

    fn grow_if_needed(&mut self, id: NodeId) -> BtreeResult<()> {
        if (id as u64) < self.page_count {
            return Ok(());
        }
        let new_page_count = (self.page_count * 2).max(id as u64 + 1);
        self.mmap.flush()?;
        self.file.set_len(new_page_count * self.page_size as u64)?;
        self.mmap = unsafe { MmapMut::map_mut(&self.file)? };
        self.page_count = new_page_count;
        Ok(())
    }

    fn allocate_page(&mut self) -> BtreeResult<NodeId> {
        if self.free_list_head != 0 {
            let id = self.free_list_head;
            let page = Page::read_from(&self.mmap, id, self.page_size)?;
            self.free_list_head = page.header.next_free;
            return Ok(id);
        }
        let id = self.next_page;
        self.next_page += 1;
        self.grow_if_needed(id)?;
        Ok(id)
    }

    fn cache_put(&mut self, id: NodeId, node: Node) {
        if !self.cache.contains_key(&id) && self.cache.len() >= self.cache_capacity {
            if let Some(evicted) = self.cache_order.pop_front() {
                self.cache.remove(&evicted);
            }
        }
        self.cache.remove(&id);
        self.cache.insert(id, node);
        self.cache_order.push_back(id);
    }

    fn cache_invalidate(&mut self, id: NodeId) {
        self.cache.remove(&id);
    }

    fn write_node(&mut self, id: NodeId, node: &Node) -> BtreeResult<()> {
        let mut payload = node.serialize(self.type_desc);
        payload.resize(self.payload_size, 0);
        let mut page = Page::new_node(payload, node.size() as u16);
        page.write_to(&mut self.mmap, id, self.page_size)?;
        self.mmap.flush()?;
        Ok(())
    }
}

impl Accessor for PagedAccessor {
    fn select(&mut self, id: NodeId) -> BtreeResult<Node> {
        if let Some(node) = self.cache.get(&id) {
            return Ok(node.clone());
        }
        let page = Page::read_from(&self.mmap, id, self.page_size)?;
        if page.header.kind != PageKind::Node {
            return Err(BtreeError::InvalidState {
                reason: format!("select of non-node page {}", id),
            });
        }
        let node = Node::deserialize(&page.payload, self.type_desc, self.max_node_size)?;
        self.cache_put(id, node.clone());
        Ok(node)
    }

    fn insert(&mut self, node: Node) -> BtreeResult<NodeId> {
        let id = self.allocate_page()?;
        self.write_node(id, &node)?;
        self.cache_put(id, node);
        Ok(id)
    }

    fn update(&mut self, id: NodeId, node: Node) -> BtreeResult<()> {
        self.write_node(id, &node)?;
        self.cache_invalidate(id);
        self.cache_put(id, node);
        Ok(())
    }

    fn remove(&mut self, id: NodeId) -> BtreeResult<()> {
        self.link_free(id)?;
        self.mmap.flush()?;
        self.cache_invalidate(id);
        Ok(())
    }

    fn list(&mut self) -> BtreeResult<Vec<NodeId>> {
        let mut ids = Vec::new();
        for id in 1..self.next_page {
            let page = Page::read_from(&self.mmap, id, self.page_size)?;
            if page.header.kind == PageKind::Node {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "paged_test.rs"]
mod paged_test;
