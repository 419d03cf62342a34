// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use chunktable_core::{ColumnId, Error, Result};
use chunktable_type::AllTypeVariant;

use crate::column::Column;

/// An ordered sequence of columns sharing a common row count — one column
/// per table attribute (spec.md `# 4.5`).
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    columns: Vec<Column>,
}

impl Chunk {
    pub fn new() -> Self {
        Self { columns: Vec::new() }
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Appends one row. `values.len()` must equal [`col_count`](Self::col_count).
    pub fn append(&mut self, values: &[AllTypeVariant]) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::ArityMismatch { expected: self.columns.len(), actual: values.len() });
        }
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.append(value)?;
        }
        Ok(())
    }

    pub fn get_column(&self, id: ColumnId) -> Result<&Column> {
        self.columns
            .get(u16::from(id) as usize)
            .ok_or(Error::OutOfRange { index: u16::from(id) as usize, len: self.columns.len() })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn col_count(&self) -> u16 {
        self.columns.len() as u16
    }

    /// Size of column 0, or 0 for a columnless chunk (spec.md `# 4.5`,
    /// `chunk.cpp`'s `Chunk::size()`).
    pub fn size(&self) -> usize {
        self.columns.first().map(Column::size).unwrap_or(0)
    }

    /// Replaces every column in place with a dictionary column over its
    /// current content (spec.md `# 4.6`).
    pub fn compress(&mut self) -> Result<()> {
        for column in &mut self.columns {
            *column = column.compress()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(a: i32, b: &str) -> Vec<AllTypeVariant> {
        vec![AllTypeVariant::Int(a), AllTypeVariant::Text(b.to_string())]
    }

    fn int_string_chunk() -> Chunk {
        let mut chunk = Chunk::new();
        chunk.add_column(Column::new_value(chunktable_type::DataType::Int));
        chunk.add_column(Column::new_value(chunktable_type::DataType::Text));
        chunk
    }

    #[test]
    fn append_requires_matching_arity() {
        let mut chunk = int_string_chunk();
        assert!(matches!(
            chunk.append(&[AllTypeVariant::Int(1)]),
            Err(Error::ArityMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn append_and_size_track_column_zero() {
        let mut chunk = int_string_chunk();
        assert_eq!(chunk.size(), 0);
        chunk.append(&row(1, "a")).unwrap();
        chunk.append(&row(2, "b")).unwrap();
        assert_eq!(chunk.size(), 2);
    }

    #[test]
    fn compress_preserves_row_order() {
        let mut chunk = int_string_chunk();
        chunk.append(&row(1, "Hi")).unwrap();
        chunk.append(&row(1, "Ho")).unwrap();
        chunk.compress().unwrap();

        let col0 = chunk.get_column(ColumnId(0)).unwrap();
        assert_eq!(col0.get(0).unwrap(), AllTypeVariant::Int(1));
        assert_eq!(col0.get(1).unwrap(), AllTypeVariant::Int(1));
        assert!(matches!(col0.append(&AllTypeVariant::Int(9)), Err(Error::ImmutableColumn)));
    }
}
