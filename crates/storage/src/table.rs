// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use chunktable_core::{ChunkId, ColumnId, Error, Result};
use chunktable_type::{AllTypeVariant, DataType};
use tracing::instrument;

use crate::chunk::Chunk;
use crate::column::Column;

/// Schema (column names and type tags) plus an ordered sequence of chunks
/// with a fixed per-chunk row capacity (spec.md `# 4.6`).
#[derive(Debug, Clone)]
pub struct Table {
    column_names: Vec<String>,
    column_types: Vec<DataType>,
    chunks: Vec<Chunk>,
    /// `u32::MAX` when the table was constructed with an unbounded capacity.
    chunk_capacity: u32,
}

impl Table {
    /// `chunk_capacity == 0` means effectively unbounded (internally
    /// `u32::MAX`, spec.md `# 3`).
    pub fn new(chunk_capacity: u32) -> Self {
        let chunk_capacity = if chunk_capacity == 0 { u32::MAX } else { chunk_capacity };
        let mut table = Self { column_names: Vec::new(), column_types: Vec::new(), chunks: Vec::new(), chunk_capacity };
        table.create_new_chunk();
        table
    }

    /// Schema-only variant of [`add_column`](Self::add_column), used when
    /// constructing a scan result table (spec.md `# 4.6`).
    pub fn add_column_definition(&mut self, name: impl Into<String>, data_type: DataType) {
        self.column_names.push(name.into());
        self.column_types.push(data_type);
    }

    /// Adds a schema entry and backfills a fresh value column of that type
    /// onto every existing chunk. Requires every chunk to currently be
    /// empty (spec.md `# 9` Open Question 1, resolved in `SPEC_FULL.md`
    /// `C.1`): backfilling a non-empty chunk would leave its columns with
    /// mismatched row counts.
    pub fn add_column(&mut self, name: impl Into<String>, data_type: DataType) -> Result<()> {
        if self.chunks.iter().any(|chunk| chunk.size() > 0) {
            return Err(Error::NonEmptyTable);
        }
        for chunk in &mut self.chunks {
            chunk.add_column(Column::new_value(data_type));
        }
        self.add_column_definition(name, data_type);
        Ok(())
    }

    #[instrument(level = "debug", skip(self, row), fields(row_len = row.len()))]
    pub fn append(&mut self, row: Vec<AllTypeVariant>) -> Result<()> {
        if row.len() != self.column_names.len() {
            return Err(Error::ArityMismatch { expected: self.column_names.len(), actual: row.len() });
        }
        let last_is_full = self.chunks.last().map(|c| c.size() as u64).unwrap_or(0) >= self.chunk_capacity as u64;
        if last_is_full {
            self.create_new_chunk();
        }
        self.chunks.last_mut().expect("a table always has at least one chunk").append(&row)
    }

    pub fn create_new_chunk(&mut self) {
        let mut chunk = Chunk::new();
        for data_type in &self.column_types {
            chunk.add_column(Column::new_value(*data_type));
        }
        self.chunks.push(chunk);
    }

    /// `(chunk_count - 1) * capacity + size_of_last_chunk` (spec.md `# 4.6`).
    pub fn row_count(&self) -> u64 {
        match self.chunks.len() {
            0 => 0,
            n => (n as u64 - 1) * self.chunk_capacity as u64 + self.chunks.last().unwrap().size() as u64,
        }
    }

    pub fn chunk_count(&self) -> u32 {
        self.chunks.len() as u32
    }

    pub fn col_count(&self) -> u16 {
        self.column_names.len() as u16
    }

    pub fn column_name(&self, id: ColumnId) -> Result<&str> {
        let index = u16::from(id) as usize;
        self.column_names.get(index).map(String::as_str).ok_or(Error::OutOfRange { index, len: self.column_names.len() })
    }

    pub fn column_type(&self, id: ColumnId) -> Result<DataType> {
        let index = u16::from(id) as usize;
        self.column_types.get(index).copied().ok_or(Error::OutOfRange { index, len: self.column_types.len() })
    }

    pub fn column_id_by_name(&self, name: &str) -> Result<ColumnId> {
        self.column_names
            .iter()
            .position(|candidate| candidate == name)
            .map(|index| ColumnId(index as u16))
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Returns 0 when the table's capacity was configured as unbounded
    /// (spec.md `# 4.6`).
    pub fn chunk_size(&self) -> u32 {
        if self.chunk_capacity == u32::MAX {
            0
        } else {
            self.chunk_capacity
        }
    }

    pub fn get_chunk(&self, id: ChunkId) -> Result<&Chunk> {
        let index = u32::from(id) as usize;
        self.chunks.get(index).ok_or(Error::OutOfRange { index, len: self.chunks.len() })
    }

    pub fn get_chunk_mut(&mut self, id: ChunkId) -> Result<&mut Chunk> {
        let index = u32::from(id) as usize;
        let len = self.chunks.len();
        self.chunks.get_mut(index).ok_or(Error::OutOfRange { index, len })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn compress_chunk(&mut self, id: ChunkId) -> Result<()> {
        self.get_chunk_mut(id)?.compress()
    }

    /// If the table has exactly one, empty chunk, replaces it; otherwise
    /// appends (spec.md `# 4.6`). Used by operators building a fresh result
    /// table.
    pub fn emplace_chunk(&mut self, chunk: Chunk) {
        if self.chunks.len() == 1 && self.chunks[0].size() == 0 {
            self.chunks[0] = chunk;
        } else {
            self.chunks.push(chunk);
        }
    }
}
