// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use std::sync::Arc;

/// 0-based index into a table's chunk list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkId(pub u32);

/// 0-based index into a chunk's (or table's) column list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(pub u16);

/// Row index within a chunk; always `< chunk size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkOffset(pub u32);

/// Addresses exactly one row in a specific table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    pub fn new(chunk_id: ChunkId, chunk_offset: ChunkOffset) -> Self {
        Self { chunk_id, chunk_offset }
    }
}

/// A dictionary code. The sentinel [`INVALID_VALUE_ID`] marks "no such value"
/// and is only ever used as a return value from bounds queries — it is never
/// stored in an attribute vector.
pub type ValueId = u32;

pub const INVALID_VALUE_ID: ValueId = u32::MAX;

/// An ordered sequence of [`RowId`]s produced by a scan, conventionally
/// grouped by `chunk_id` ascending. Shared by every reference column in a
/// scan's result chunk and immutable once built, so it is reference-counted
/// rather than cloned per column.
pub type PosList = Arc<Vec<RowId>>;

impl From<ChunkId> for u32 {
    fn from(id: ChunkId) -> Self {
        id.0
    }
}

impl From<ColumnId> for u16 {
    fn from(id: ColumnId) -> Self {
        id.0
    }
}

impl From<ChunkOffset> for u32 {
    fn from(offset: ChunkOffset) -> Self {
        offset.0
    }
}
