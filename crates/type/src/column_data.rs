// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use std::fmt::Debug;

use chunktable_core::Error;

use crate::data_type::DataType;
use crate::ordered_float::OrderedF64;
use crate::variant::AllTypeVariant;

/// A scalar type a column can store.
///
/// Implemented by the closed set of types behind [`DataType`]: `i32`,
/// [`OrderedF64`] and `String`. Dictionary columns require `Ord` for the
/// sorted, duplicate-free dictionary invariant (spec.md `# 3`).
pub trait ColumnDataType: Clone + Debug + Eq + Ord + Send + Sync + 'static {
    const DATA_TYPE: DataType;

    /// Casts a boundary value down to `Self`, failing with
    /// [`Error::TypeMismatch`] if the variant holds a different scalar type.
    fn try_from_variant(value: &AllTypeVariant) -> Result<Self, Error>;

    fn to_variant(&self) -> AllTypeVariant;
}

impl ColumnDataType for i32 {
    const DATA_TYPE: DataType = DataType::Int;

    fn try_from_variant(value: &AllTypeVariant) -> Result<Self, Error> {
        match value {
            AllTypeVariant::Int(v) => Ok(*v),
            other => Err(Error::TypeMismatch { expected: "int", found: other.data_type().as_tag() }),
        }
    }

    fn to_variant(&self) -> AllTypeVariant {
        AllTypeVariant::Int(*self)
    }
}

impl ColumnDataType for OrderedF64 {
    const DATA_TYPE: DataType = DataType::Float;

    fn try_from_variant(value: &AllTypeVariant) -> Result<Self, Error> {
        match value {
            AllTypeVariant::Float(v) => OrderedF64::try_from(*v)
                .map_err(|_| Error::TypeMismatch { expected: "float", found: "nan" }),
            other => Err(Error::TypeMismatch { expected: "float", found: other.data_type().as_tag() }),
        }
    }

    fn to_variant(&self) -> AllTypeVariant {
        AllTypeVariant::Float((*self).into())
    }
}

impl ColumnDataType for String {
    const DATA_TYPE: DataType = DataType::Text;

    fn try_from_variant(value: &AllTypeVariant) -> Result<Self, Error> {
        match value {
            AllTypeVariant::Text(v) => Ok(v.clone()),
            other => Err(Error::TypeMismatch { expected: "string", found: other.data_type().as_tag() }),
        }
    }

    fn to_variant(&self) -> AllTypeVariant {
        AllTypeVariant::Text(self.clone())
    }
}
