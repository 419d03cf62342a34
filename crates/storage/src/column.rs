// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use std::sync::Arc;

use chunktable_core::{ColumnId, Error, PosList, Result, ValueId, INVALID_VALUE_ID};
use chunktable_type::{AllTypeVariant, ColumnDataType, DataType, OrderedF64};

use crate::attribute_vector::AttributeVector;
use crate::table::Table;

/// Mutable, typed, append-only sequence of decoded values (spec.md `# 4.2`).
#[derive(Debug, Clone, PartialEq)]
pub struct ValueColumn<T: ColumnDataType> {
    values: Vec<T>,
}

impl<T: ColumnDataType> Default for ValueColumn<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ColumnDataType> ValueColumn<T> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn append(&mut self, value: &AllTypeVariant) -> Result<()> {
        self.values.push(T::try_from_variant(value)?);
        Ok(())
    }

    pub fn append_value(&mut self, value: T) {
        self.values.push(value);
    }

    /// Diagnostic, variant-returning accessor. Hot paths use [`values`](Self::values)
    /// instead (spec.md `# 4.2`: "slow, diagnostic path").
    pub fn get(&self, i: usize) -> Result<T> {
        self.values.get(i).cloned().ok_or(Error::OutOfRange { index: i, len: self.values.len() })
    }

    /// Typed, borrowed access used by the scan's hot loop.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }
}

/// Immutable pair of a sorted, duplicate-free dictionary and a width-fitted
/// attribute vector (spec.md `# 4.3`).
#[derive(Debug, Clone)]
pub struct DictionaryColumn<T: ColumnDataType> {
    dictionary: Arc<Vec<T>>,
    attribute_vector: Arc<AttributeVector>,
}

impl<T: ColumnDataType> DictionaryColumn<T> {
    /// Builds a dictionary column from an already-materialized sequence of
    /// values, preserving row order in the attribute vector.
    pub fn from_values(values: &[T]) -> Self {
        let mut dictionary: Vec<T> = values.to_vec();
        dictionary.sort();
        dictionary.dedup();

        let mut attribute_vector = AttributeVector::for_dictionary_size(dictionary.len());
        for value in values {
            let code = dictionary.binary_search(value).expect("value came from its own dictionary");
            attribute_vector.set(attribute_vector.size(), code as ValueId).expect("code fits the fitted width by construction");
        }

        Self { dictionary: Arc::new(dictionary), attribute_vector: Arc::new(attribute_vector) }
    }

    /// Builds a dictionary column from any existing column of matching `T`
    /// — a value column, or (to support re-compression, spec.md `# 9`
    /// Open Question 2) an already-dictionary-encoded column.
    pub fn from_column(column: &TypedColumn<T>) -> Result<Self> {
        let mut values = Vec::with_capacity(column.size());
        for i in 0..column.size() {
            values.push(column.get(i)?);
        }
        Ok(Self::from_values(&values))
    }

    pub fn get(&self, i: usize) -> Result<T> {
        let code = self.attribute_vector.get(i)?;
        Ok(self.dictionary[code as usize].clone())
    }

    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    /// Looks up a dictionary entry directly by value id, without going
    /// through a row offset. Used by the scan's threshold comparison to
    /// check whether `lower_bound` actually landed on an equal value.
    pub fn value_by_value_id(&self, value_id: ValueId) -> &T {
        &self.dictionary[value_id as usize]
    }

    pub fn attribute_vector(&self) -> &AttributeVector {
        &self.attribute_vector
    }

    /// First value id whose value is `>= value`, or [`INVALID_VALUE_ID`] if
    /// none (spec.md `# 4.3`).
    pub fn lower_bound(&self, value: &T) -> ValueId {
        match self.dictionary.binary_search(value) {
            Ok(i) => i as ValueId,
            Err(i) if i < self.dictionary.len() => i as ValueId,
            Err(_) => INVALID_VALUE_ID,
        }
    }

    /// First value id whose value is `> value`, or [`INVALID_VALUE_ID`] if
    /// none.
    pub fn upper_bound(&self, value: &T) -> ValueId {
        let first_greater = match self.dictionary.binary_search(value) {
            Ok(i) => i + 1,
            Err(i) => i,
        };
        if first_greater < self.dictionary.len() {
            first_greater as ValueId
        } else {
            INVALID_VALUE_ID
        }
    }

    /// `lower_bound`, coercing a boundary value through the type dispatcher
    /// first (spec.md `# 4.3` "Observable": bounds have `AllTypeVariant`-
    /// accepting overloads, mirroring `dictionary_column.hpp`'s
    /// `lower_bound(const AllTypeVariant&)`).
    pub fn lower_bound_variant(&self, value: &AllTypeVariant) -> Result<ValueId> {
        Ok(self.lower_bound(&T::try_from_variant(value)?))
    }

    /// `upper_bound`, coercing a boundary value through the type dispatcher
    /// first (spec.md `# 4.3` "Observable").
    pub fn upper_bound_variant(&self, value: &AllTypeVariant) -> Result<ValueId> {
        Ok(self.upper_bound(&T::try_from_variant(value)?))
    }

    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    pub fn size(&self) -> usize {
        self.attribute_vector.size()
    }
}

/// Immutable view over another table's column, defined by a shared position
/// list (spec.md `# 4.4`). Does not own `referenced_table`; the scan that
/// builds a reference column guarantees it outlives every use of the
/// result, and `Arc` is the concrete, safe way this core upholds that
/// guarantee across shared, possibly concurrent readers.
#[derive(Debug, Clone)]
pub struct ReferenceColumn {
    referenced_table: Arc<Table>,
    referenced_column_id: ColumnId,
    pos_list: PosList,
}

impl ReferenceColumn {
    pub fn new(referenced_table: Arc<Table>, referenced_column_id: ColumnId, pos_list: PosList) -> Self {
        Self { referenced_table, referenced_column_id, pos_list }
    }

    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    pub fn referenced_column_id(&self) -> ColumnId {
        self.referenced_column_id
    }

    pub fn pos_list(&self) -> &PosList {
        &self.pos_list
    }

    pub fn size(&self) -> usize {
        self.pos_list.len()
    }

    pub fn get(&self, i: usize) -> Result<AllTypeVariant> {
        let row_id = *self.pos_list.get(i).ok_or(Error::OutOfRange { index: i, len: self.pos_list.len() })?;
        let chunk = self.referenced_table.get_chunk(row_id.chunk_id)?;
        let column = chunk.get_column(self.referenced_column_id)?;
        column.get(u32::from(row_id.chunk_offset) as usize)
    }
}

/// A column is exactly one of value, dictionary or reference, for a single
/// fixed scalar type `T` (spec.md `# 3`).
#[derive(Debug, Clone)]
pub enum TypedColumn<T: ColumnDataType> {
    Value(ValueColumn<T>),
    Dictionary(DictionaryColumn<T>),
    Reference(ReferenceColumn),
}

impl<T: ColumnDataType> TypedColumn<T> {
    pub fn size(&self) -> usize {
        match self {
            TypedColumn::Value(c) => c.size(),
            TypedColumn::Dictionary(c) => c.size(),
            TypedColumn::Reference(c) => c.size(),
        }
    }

    pub fn get(&self, i: usize) -> Result<T> {
        match self {
            TypedColumn::Value(c) => c.get(i),
            TypedColumn::Dictionary(c) => c.get(i),
            TypedColumn::Reference(c) => T::try_from_variant(&c.get(i)?),
        }
    }

    pub fn append(&mut self, value: &AllTypeVariant) -> Result<()> {
        match self {
            TypedColumn::Value(c) => c.append(value),
            TypedColumn::Dictionary(_) | TypedColumn::Reference(_) => Err(Error::ImmutableColumn),
        }
    }
}

/// Type-erased column as stored in a [`Chunk`](crate::chunk::Chunk): one of
/// the three column variants, for one of the three supported scalar types.
/// This is the boundary type the type dispatcher resolves a raw type tag
/// into (spec.md `# 4.7`).
#[derive(Debug, Clone)]
pub enum Column {
    Int(TypedColumn<i32>),
    Float(TypedColumn<OrderedF64>),
    Text(TypedColumn<String>),
}

impl Column {
    /// `make_value_by_type` (spec.md `# 4.7`): a fresh, empty value column
    /// of the given type.
    pub fn new_value(data_type: DataType) -> Self {
        match data_type {
            DataType::Int => Column::Int(TypedColumn::Value(ValueColumn::new())),
            DataType::Float => Column::Float(TypedColumn::Value(ValueColumn::new())),
            DataType::Text => Column::Text(TypedColumn::Value(ValueColumn::new())),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Column::Int(_) => DataType::Int,
            Column::Float(_) => DataType::Float,
            Column::Text(_) => DataType::Text,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Column::Int(c) => c.size(),
            Column::Float(c) => c.size(),
            Column::Text(c) => c.size(),
        }
    }

    /// Diagnostic `operator[]` (spec.md `# 4.2`/`# 4.4`): resolves through
    /// whichever variant this column is and returns a boundary value.
    pub fn get(&self, i: usize) -> Result<AllTypeVariant> {
        Ok(match self {
            Column::Int(c) => c.get(i)?.to_variant(),
            Column::Float(c) => c.get(i)?.to_variant(),
            Column::Text(c) => c.get(i)?.to_variant(),
        })
    }

    pub fn append(&mut self, value: &AllTypeVariant) -> Result<()> {
        match self {
            Column::Int(c) => c.append(value),
            Column::Float(c) => c.append(value),
            Column::Text(c) => c.append(value),
        }
    }

    /// `make_dict_by_type` (spec.md `# 4.7`): a dictionary column derived
    /// from this column's current content, of the same logical type.
    pub fn compress(&self) -> Result<Self> {
        Ok(match self {
            Column::Int(c) => Column::Int(TypedColumn::Dictionary(DictionaryColumn::from_column(c)?)),
            Column::Float(c) => Column::Float(TypedColumn::Dictionary(DictionaryColumn::from_column(c)?)),
            Column::Text(c) => Column::Text(TypedColumn::Dictionary(DictionaryColumn::from_column(c)?)),
        })
    }

    /// Exposes the reference column underneath this column, if it is one —
    /// used by the scan to detect a reference-column target (spec.md
    /// `# 4.8` Path 1).
    pub fn as_reference(&self) -> Option<&ReferenceColumn> {
        match self {
            Column::Int(TypedColumn::Reference(r)) => Some(r),
            Column::Float(TypedColumn::Reference(r)) => Some(r),
            Column::Text(TypedColumn::Reference(r)) => Some(r),
            _ => None,
        }
    }

    /// Builds a reference column of the given logical type, wrapping it in
    /// the matching `Column` variant. Used by the scan operator to build its
    /// result chunk (spec.md `# 4.8`).
    pub fn new_reference(data_type: DataType, referenced_table: Arc<Table>, referenced_column_id: ColumnId, pos_list: PosList) -> Self {
        let reference = ReferenceColumn::new(referenced_table, referenced_column_id, pos_list);
        match data_type {
            DataType::Int => Column::Int(TypedColumn::Reference(reference)),
            DataType::Float => Column::Float(TypedColumn::Reference(reference)),
            DataType::Text => Column::Text(TypedColumn::Reference(reference)),
        }
    }
}

/// Narrows a type-erased [`Column`] back down to `TypedColumn<Self>`, for the
/// three supported scalar types. A closed-set, type-safe alternative to a
/// runtime downcast — lets generic code (the scan operator) recover the
/// concrete column it needs once it already knows `T` from the schema.
pub trait AsTypedColumn: ColumnDataType {
    fn as_typed(column: &Column) -> Option<&TypedColumn<Self>>;
}

impl AsTypedColumn for i32 {
    fn as_typed(column: &Column) -> Option<&TypedColumn<i32>> {
        match column {
            Column::Int(c) => Some(c),
            _ => None,
        }
    }
}

impl AsTypedColumn for OrderedF64 {
    fn as_typed(column: &Column) -> Option<&TypedColumn<OrderedF64>> {
        match column {
            Column::Float(c) => Some(c),
            _ => None,
        }
    }
}

impl AsTypedColumn for String {
    fn as_typed(column: &Column) -> Option<&TypedColumn<String>> {
        match column {
            Column::Text(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v_int(v: i32) -> AllTypeVariant {
        AllTypeVariant::Int(v)
    }

    #[test]
    fn value_column_append_and_get() {
        let mut col: ValueColumn<i32> = ValueColumn::new();
        col.append(&v_int(1)).unwrap();
        col.append(&v_int(2)).unwrap();
        assert_eq!(col.size(), 2);
        assert_eq!(col.get(0).unwrap(), 1);
        assert_eq!(col.values(), &[1, 2]);
    }

    #[test]
    fn value_column_rejects_type_mismatch() {
        let mut col: ValueColumn<i32> = ValueColumn::new();
        assert!(col.append(&AllTypeVariant::Text("x".into())).is_err());
    }

    // S1: dictionary build from ["Bill","Steve","Alexander","Steve","Hasso","Bill"]
    #[test]
    fn dictionary_column_builds_sorted_unique_dictionary() {
        let values: Vec<String> =
            ["Bill", "Steve", "Alexander", "Steve", "Hasso", "Bill"].iter().map(|s| s.to_string()).collect();
        let dict = DictionaryColumn::from_values(&values);

        assert_eq!(
            dict.dictionary(),
            &["Alexander".to_string(), "Bill".to_string(), "Hasso".to_string(), "Steve".to_string()]
        );
        assert_eq!(dict.unique_values_count(), 4);
        assert_eq!(dict.size(), 6);
        assert_eq!(dict.attribute_vector().width(), 1);

        let codes: Vec<u32> = (0..6).map(|i| dict.attribute_vector().get(i).unwrap()).collect();
        assert_eq!(codes, vec![1, 3, 0, 3, 2, 1]);
    }

    // S2: bounds over [0,2,4,6,8,10]
    #[test]
    fn dictionary_column_bounds() {
        let dict = DictionaryColumn::from_values(&[0, 2, 4, 6, 8, 10]);
        assert_eq!(dict.lower_bound(&4), 2);
        assert_eq!(dict.upper_bound(&4), 3);
        assert_eq!(dict.lower_bound(&5), 3);
        assert_eq!(dict.upper_bound(&5), 3);
        assert_eq!(dict.lower_bound(&15), INVALID_VALUE_ID);
        assert_eq!(dict.upper_bound(&15), INVALID_VALUE_ID);
    }

    #[test]
    fn dictionary_column_is_immutable() {
        let mut col = Column::Int(TypedColumn::Dictionary(DictionaryColumn::from_values(&[1, 2])));
        assert!(matches!(col.append(&v_int(3)), Err(Error::ImmutableColumn)));
    }

    #[test]
    fn dictionary_column_bounds_accept_variants() {
        let dict = DictionaryColumn::from_values(&[0, 2, 4, 6, 8, 10]);
        assert_eq!(dict.lower_bound_variant(&v_int(4)).unwrap(), 2);
        assert_eq!(dict.upper_bound_variant(&v_int(4)).unwrap(), 3);
        assert_eq!(dict.lower_bound_variant(&v_int(15)).unwrap(), INVALID_VALUE_ID);
        assert!(matches!(dict.lower_bound_variant(&AllTypeVariant::Text("x".into())), Err(Error::TypeMismatch { .. })));
    }
}
