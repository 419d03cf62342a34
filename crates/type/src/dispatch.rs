// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use chunktable_core::Error;

use crate::column_data::ColumnDataType;
use crate::data_type::DataType;
use crate::ordered_float::OrderedF64;

/// A type-parameterized callable invoked once, instantiated for whichever
/// concrete scalar type a runtime type tag resolves to.
///
/// Implementers typically hold the data needed to build their result and
/// consume `self` in `visit`, since each call site dispatches to exactly one
/// of the closed set of scalar types.
pub trait TypeVisitor<R> {
    fn visit<T: ColumnDataType>(self) -> R;
}

/// Resolves `tag` to a [`DataType`] and dispatches `visitor` on the
/// corresponding scalar type. Fails with [`Error::UnknownType`] if `tag` is
/// not one of the closed set of known tags.
pub fn with_data_type<R>(tag: &str, visitor: impl TypeVisitor<R>) -> Result<R, Error> {
    Ok(with_data_type_of(DataType::from_tag(tag)?, visitor))
}

/// Same as [`with_data_type`], but for a [`DataType`] already resolved from
/// a schema lookup — dispatch itself cannot fail once the type is known.
pub fn with_data_type_of<R>(data_type: DataType, visitor: impl TypeVisitor<R>) -> R {
    match data_type {
        DataType::Int => visitor.visit::<i32>(),
        DataType::Float => visitor.visit::<OrderedF64>(),
        DataType::Text => visitor.visit::<String>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataType;

    struct NameOf;

    impl TypeVisitor<&'static str> for NameOf {
        fn visit<T: ColumnDataType>(self) -> &'static str {
            T::DATA_TYPE.as_tag()
        }
    }

    #[test]
    fn dispatches_on_tag() {
        assert_eq!(with_data_type("int", NameOf).unwrap(), "int");
        assert_eq!(with_data_type("float", NameOf).unwrap(), "float");
        assert_eq!(with_data_type("string", NameOf).unwrap(), "string");
    }

    #[test]
    fn unknown_tag_errors() {
        assert!(with_data_type("blob", NameOf).is_err());
    }

    #[test]
    fn dispatches_on_resolved_type() {
        assert_eq!(with_data_type_of(DataType::Text, NameOf), "string");
    }
}
