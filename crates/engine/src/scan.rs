// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use std::sync::Arc;

use chunktable_core::{ChunkId, ChunkOffset, ColumnId, PosList, Result, RowId, ValueId, INVALID_VALUE_ID};
use chunktable_storage::{AsTypedColumn, Chunk, Column, DictionaryColumn, ReferenceColumn, Table, TypedColumn};
use chunktable_type::{AllTypeVariant, ColumnDataType, DataType, OrderedF64};
use tracing::instrument;

use crate::operator::Operator;
use crate::scan_type::ScanType;

/// Evaluates `column_id <scan_type> search_value` over an input operator's
/// output, producing a table of matching rows as reference columns (spec.md
/// `# 4.8`).
pub struct TableScan {
    input: Arc<dyn Operator>,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: AllTypeVariant,
}

impl TableScan {
    pub fn new(input: Arc<dyn Operator>, column_id: ColumnId, scan_type: ScanType, search_value: AllTypeVariant) -> Self {
        Self { input, column_id, scan_type, search_value }
    }

    fn scan_for_type<T: ColumnDataType + AsTypedColumn>(&self, input_table: &Arc<Table>) -> Result<(Arc<Table>, PosList)> {
        let search = T::try_from_variant(&self.search_value)?;

        if input_table.chunk_count() == 1 {
            let chunk0 = input_table.get_chunk(ChunkId(0))?;
            let column0 = chunk0.get_column(self.column_id)?;
            let typed0 = T::as_typed(column0).expect("column data type matches the dispatched scan type");
            if let TypedColumn::Reference(reference) = typed0 {
                return self.scan_reference::<T>(reference, &search);
            }
        }

        let mut pos_list = Vec::new();
        for chunk_idx in 0..input_table.chunk_count() {
            let chunk_id = ChunkId(chunk_idx);
            let chunk = input_table.get_chunk(chunk_id)?;
            let column = chunk.get_column(self.column_id)?;
            let typed = T::as_typed(column).expect("column data type matches the dispatched scan type");
            scan_typed_column(typed, &search, self.scan_type, chunk_id, &mut pos_list)?;
        }
        Ok((input_table.clone(), Arc::new(pos_list)))
    }

    /// Path 1 (spec.md `# 4.8`): the target is a reference column over a
    /// single-chunk input. Resolves straight through to the column's origin
    /// table instead of re-wrapping a reference-to-a-reference, caching the
    /// resolved physical column across consecutive `RowId`s that share a
    /// `chunk_id`. Caching is a performance optimization only; correctness
    /// does not depend on it.
    fn scan_reference<T: ColumnDataType + AsTypedColumn>(&self, reference: &ReferenceColumn, search: &T) -> Result<(Arc<Table>, PosList)> {
        let origin = reference.referenced_table().clone();
        let origin_column_id = reference.referenced_column_id();

        let mut out = Vec::new();
        let mut cached: Option<(ChunkId, Column)> = None;

        for row_id in reference.pos_list().iter() {
            if cached.as_ref().map(|(id, _)| *id) != Some(row_id.chunk_id) {
                let chunk = origin.get_chunk(row_id.chunk_id)?;
                let column = chunk.get_column(origin_column_id)?.clone();
                cached = Some((row_id.chunk_id, column));
            }
            let (_, column) = cached.as_ref().expect("just populated above");
            let typed = T::as_typed(column).expect("column data type matches the dispatched scan type");
            let value = typed.get(u32::from(row_id.chunk_offset) as usize)?;
            if self.scan_type.matches(value.cmp(search)) {
                out.push(*row_id);
            }
        }
        Ok((origin, Arc::new(out)))
    }
}

impl Operator for TableScan {
    #[instrument(level = "debug", skip(self), fields(column_id = self.column_id.0))]
    fn execute(&self) -> Result<Arc<Table>> {
        let input_table = self.input.execute()?;
        let data_type = input_table.column_type(self.column_id)?;

        let mut output = Table::new(0);
        for i in 0..input_table.col_count() {
            let id = ColumnId(i);
            output.add_column_definition(input_table.column_name(id)?.to_string(), input_table.column_type(id)?);
        }

        let (origin, pos_list) = match data_type {
            DataType::Int => self.scan_for_type::<i32>(&input_table)?,
            DataType::Float => self.scan_for_type::<OrderedF64>(&input_table)?,
            DataType::Text => self.scan_for_type::<String>(&input_table)?,
        };

        let mut result_chunk = Chunk::new();
        for i in 0..origin.col_count() {
            let id = ColumnId(i);
            let column_data_type = origin.column_type(id)?;
            result_chunk.add_column(Column::new_reference(column_data_type, origin.clone(), id, pos_list.clone()));
        }
        output.emplace_chunk(result_chunk);
        Ok(Arc::new(output))
    }
}

/// Path 2 (spec.md `# 4.8`): a general value or dictionary column, scanned
/// chunk by chunk.
fn scan_typed_column<T: ColumnDataType>(
    typed: &TypedColumn<T>,
    search: &T,
    scan_type: ScanType,
    chunk_id: ChunkId,
    pos_list: &mut Vec<RowId>,
) -> Result<()> {
    match typed {
        TypedColumn::Value(column) => {
            for (offset, value) in column.values().iter().enumerate() {
                if scan_type.matches(value.cmp(search)) {
                    pos_list.push(RowId::new(chunk_id, ChunkOffset(offset as u32)));
                }
            }
        }
        TypedColumn::Dictionary(dictionary) => scan_dictionary(dictionary, search, scan_type, chunk_id, pos_list),
        TypedColumn::Reference(reference) => {
            for i in 0..reference.size() {
                let value = T::try_from_variant(&reference.get(i)?)?;
                if scan_type.matches(value.cmp(search)) {
                    pos_list.push(RowId::new(chunk_id, ChunkOffset(i as u32)));
                }
            }
        }
    }
    Ok(())
}

/// Scans a dictionary column without materializing a single decoded value:
/// resolves the search value to a value-id threshold once via `lower_bound`/
/// `upper_bound`, then compares codes directly (spec.md `# 4.8`).
fn scan_dictionary<T: ColumnDataType>(
    dictionary: &DictionaryColumn<T>,
    search: &T,
    scan_type: ScanType,
    chunk_id: ChunkId,
    pos_list: &mut Vec<RowId>,
) {
    let lower = dictionary.lower_bound(search);
    let upper = dictionary.upper_bound(search);
    let present = lower != INVALID_VALUE_ID && dictionary.value_by_value_id(lower) == search;

    let push_all = |pos_list: &mut Vec<RowId>| {
        for offset in 0..dictionary.size() {
            pos_list.push(RowId::new(chunk_id, ChunkOffset(offset as u32)));
        }
    };

    let threshold_and_predicate: Option<(ValueId, fn(ValueId, ValueId) -> bool)> = match scan_type {
        ScanType::OpEquals => {
            if !present {
                return;
            }
            Some((lower, |code, k| code == k))
        }
        ScanType::OpNotEquals => {
            if !present {
                push_all(pos_list);
                return;
            }
            Some((lower, |code, k| code != k))
        }
        ScanType::OpLessThan => {
            if lower == 0 {
                return;
            }
            if lower == INVALID_VALUE_ID {
                push_all(pos_list);
                return;
            }
            Some((lower, |code, k| code < k))
        }
        ScanType::OpLessThanEquals => {
            if upper == 0 {
                return;
            }
            if upper == INVALID_VALUE_ID {
                push_all(pos_list);
                return;
            }
            Some((upper, |code, k| code < k))
        }
        ScanType::OpGreaterThan => {
            if upper == INVALID_VALUE_ID {
                return;
            }
            if upper == 0 {
                push_all(pos_list);
                return;
            }
            Some((upper, |code, k| code >= k))
        }
        ScanType::OpGreaterThanEquals => {
            if lower == INVALID_VALUE_ID {
                return;
            }
            if lower == 0 {
                push_all(pos_list);
                return;
            }
            Some((lower, |code, k| code >= k))
        }
    };

    let Some((threshold, predicate)) = threshold_and_predicate else { return };
    for offset in 0..dictionary.size() {
        let code = dictionary.attribute_vector().get(offset).expect("offset within size");
        if predicate(code, threshold) {
            pos_list.push(RowId::new(chunk_id, ChunkOffset(offset as u32)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::TableWrapper;
    use chunktable_type::AllTypeVariant;

    fn int_string_table(capacity: u32, rows: &[(i32, &str)]) -> Arc<Table> {
        let mut t = Table::new(capacity);
        t.add_column("id", DataType::Int).unwrap();
        t.add_column("name", DataType::Text).unwrap();
        for (id, name) in rows {
            t.append(vec![AllTypeVariant::Int(*id), AllTypeVariant::Text(name.to_string())]).unwrap();
        }
        Arc::new(t)
    }

    // S5: scan a value column.
    #[test]
    fn scan_on_value_column_selects_matching_rows() {
        let table = int_string_table(10, &[(1, "a"), (2, "b"), (3, "c"), (2, "d")]);
        let scan = TableScan::new(
            Arc::new(TableWrapper::new(table)),
            ColumnId(0),
            ScanType::OpEquals,
            AllTypeVariant::Int(2),
        );
        let result = scan.execute().unwrap();
        assert_eq!(result.row_count(), 2);
        let chunk = result.get_chunk(ChunkId(0)).unwrap();
        assert_eq!(chunk.get_column(ColumnId(0)).unwrap().get(0).unwrap(), AllTypeVariant::Int(2));
        assert_eq!(chunk.get_column(ColumnId(1)).unwrap().get(0).unwrap(), AllTypeVariant::Text("b".to_string()));
        assert_eq!(chunk.get_column(ColumnId(1)).unwrap().get(1).unwrap(), AllTypeVariant::Text("d".to_string()));
    }

    // S6: scan a dictionary column for a value absent from the dictionary.
    #[test]
    fn scan_on_dictionary_column_for_absent_value_is_empty() {
        let mut table = int_string_table(10, &[(1, "a"), (3, "b"), (5, "c")]);
        Arc::get_mut(&mut table).unwrap().compress_chunk(ChunkId(0)).unwrap();

        let scan = TableScan::new(
            Arc::new(TableWrapper::new(table)),
            ColumnId(0),
            ScanType::OpEquals,
            AllTypeVariant::Int(4),
        );
        let result = scan.execute().unwrap();
        assert_eq!(result.row_count(), 0);
    }

    #[test]
    fn scan_on_dictionary_column_less_than_matches_original_semantics() {
        let mut table = int_string_table(10, &[(1, "a"), (3, "b"), (5, "c"), (7, "d")]);
        Arc::get_mut(&mut table).unwrap().compress_chunk(ChunkId(0)).unwrap();

        let scan = TableScan::new(
            Arc::new(TableWrapper::new(table)),
            ColumnId(0),
            ScanType::OpLessThan,
            AllTypeVariant::Int(5),
        );
        let result = scan.execute().unwrap();
        assert_eq!(result.row_count(), 2);
    }

    // S7: scan over a reference-column input collapses to the origin table.
    #[test]
    fn scan_over_reference_input_resolves_to_origin_table() {
        let base = int_string_table(10, &[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
        let first_scan = TableScan::new(
            Arc::new(TableWrapper::new(base.clone())),
            ColumnId(0),
            ScanType::OpGreaterThan,
            AllTypeVariant::Int(1),
        );
        let intermediate = Arc::new(first_scan);

        let second_scan = TableScan::new(intermediate, ColumnId(0), ScanType::OpLessThan, AllTypeVariant::Int(4));
        let result = second_scan.execute().unwrap();

        assert_eq!(result.row_count(), 2);
        let chunk = result.get_chunk(ChunkId(0)).unwrap();
        let reference = chunk.get_column(ColumnId(0)).unwrap().as_reference().unwrap();
        assert!(Arc::ptr_eq(reference.referenced_table(), &base));
    }

    // Property 7: scanning a reference column never nests a reference.
    #[test]
    fn scan_result_columns_are_never_references_to_references() {
        let base = int_string_table(10, &[(1, "a"), (2, "b"), (3, "c")]);
        let first_scan = TableScan::new(
            Arc::new(TableWrapper::new(base)),
            ColumnId(0),
            ScanType::OpGreaterThanEquals,
            AllTypeVariant::Int(1),
        );
        let second_scan = TableScan::new(Arc::new(first_scan), ColumnId(0), ScanType::OpNotEquals, AllTypeVariant::Int(2));
        let result = second_scan.execute().unwrap();

        let chunk = result.get_chunk(ChunkId(0)).unwrap();
        let reference = chunk.get_column(ColumnId(0)).unwrap().as_reference().unwrap();
        // The referenced table's own column 0 must not itself be a reference.
        let origin_chunk = reference.referenced_table().get_chunk(ChunkId(0)).unwrap();
        assert!(origin_chunk.get_column(ColumnId(0)).unwrap().as_reference().is_none());
    }
}
