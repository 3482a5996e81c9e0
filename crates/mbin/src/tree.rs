// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record trees and the non-owning parent relation.
//!
//! Re-parenting never shares ownership: records live in a caller-owned
//! [`RecordArena`] and the parent relation is an id lookup. Setting a
//! parent performs no cycle detection -- well-formed asset hierarchies
//! are trees -- but every traversal carries a visited check and fails
//! with [`EncodeError::CyclicStructure`] instead of looping if the
//! surrounding system has produced a cycle.

use crate::encode::{encode_record_with, EncodeError, InlineLayout, NestedLayout};
use crate::record::Record;

/// Identifier of a record inside a [`RecordArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(usize);

impl RecordId {
    /// Arena slot index.
    pub fn index(&self) -> usize {
        self.0
    }
}

struct Entry {
    record: Record,
    parent: Option<RecordId>,
}

/// Owner of a flat set of records plus their parent relations.
#[derive(Default)]
pub struct RecordArena {
    entries: Vec<Entry>,
}

impl RecordArena {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of records in the arena.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a record without a parent.
    pub fn insert(&mut self, record: Record) -> RecordId {
        let id = RecordId(self.entries.len());
        self.entries.push(Entry {
            record,
            parent: None,
        });
        id
    }

    /// Get a record by id.
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.entries.get(id.0).map(|e| &e.record)
    }

    /// Get a record's parent, if any.
    pub fn parent(&self, id: RecordId) -> Option<RecordId> {
        self.entries.get(id.0).and_then(|e| e.parent)
    }

    /// Record the parent relation for `child`. Field values are untouched.
    ///
    /// Returns false if the id does not belong to this arena.
    pub fn set_parent(&mut self, child: RecordId, parent: Option<RecordId>) -> bool {
        if parent.is_some_and(|p| p.0 >= self.entries.len()) {
            return false;
        }
        match self.entries.get_mut(child.0) {
            Some(entry) => {
                entry.parent = parent;
                true
            }
            None => false,
        }
    }

    /// Children of `id`, in insertion order.
    pub fn children(&self, id: RecordId) -> Vec<RecordId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.parent == Some(id))
            .map(|(i, _)| RecordId(i))
            .collect()
    }

    /// Records without a parent, in insertion order.
    pub fn roots(&self) -> Vec<RecordId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.parent.is_none())
            .map(|(i, _)| RecordId(i))
            .collect()
    }

    /// Parent chain from the root down to `id` (inclusive).
    ///
    /// Fails with `CyclicStructure` if the chain revisits an instance.
    pub fn ancestry(&self, id: RecordId) -> Result<Vec<RecordId>, EncodeError> {
        let mut chain = Vec::new();
        let mut visited = vec![false; self.entries.len()];
        let mut current = Some(id);
        while let Some(node) = current {
            let Some(entry) = self.entries.get(node.0) else {
                break;
            };
            if visited[node.0] {
                return Err(EncodeError::CyclicStructure {
                    name: entry.record.struct_name().to_string(),
                });
            }
            visited[node.0] = true;
            chain.push(node);
            current = entry.parent;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Serialize the subtree rooted at `root`, top-down: each record's
    /// packed image followed by its children depth-first, children in
    /// insertion order. Nested struct *fields* stay inline.
    pub fn serialize_tree(&self, root: RecordId) -> Result<Vec<u8>, EncodeError> {
        self.serialize_tree_with(root, &InlineLayout)
    }

    /// Like [`serialize_tree`](Self::serialize_tree) with a caller-supplied
    /// nested field layout.
    pub fn serialize_tree_with(
        &self,
        root: RecordId,
        layout: &dyn NestedLayout,
    ) -> Result<Vec<u8>, EncodeError> {
        if self.entries.get(root.0).is_none() {
            log::warn!("serialize_tree: id {} not in this arena", root.0);
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        let mut visited = vec![false; self.entries.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let entry = &self.entries[id.0];
            if visited[id.0] {
                return Err(EncodeError::CyclicStructure {
                    name: entry.record.struct_name().to_string(),
                });
            }
            visited[id.0] = true;
            out.extend(encode_record_with(&entry.record, layout)?);
            // Reverse push so the first-inserted child is emitted first.
            for child in self.children(id).into_iter().rev() {
                stack.push(child);
            }
        }
        log::debug!(
            "serialized tree of {} record(s), {} bytes",
            visited.iter().filter(|v| **v).count(),
            out.len()
        );
        Ok(out)
    }
}
