// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use std::fmt::{self, Display, Formatter};

use chunktable_core::Error;

/// The closed set of scalar types a column can hold.
///
/// Extending the type system means adding a case here and to every
/// [`TypeVisitor`](crate::TypeVisitor) implementation — there is no
/// open-ended plugin mechanism, by design (spec.md `# 3`: "Extensibility is
/// by adding a case to the type dispatcher").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Float,
    Text,
}

impl DataType {
    /// Canonical lowercase type tag, as used at the table/engine API surface.
    pub fn as_tag(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Text => "string",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, Error> {
        match tag {
            "int" => Ok(DataType::Int),
            "float" => Ok(DataType::Float),
            "string" => Ok(DataType::Text),
            other => Err(Error::UnknownType(other.to_string())),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_tags() {
        for ty in [DataType::Int, DataType::Float, DataType::Text] {
            assert_eq!(DataType::from_tag(ty.as_tag()).unwrap(), ty);
        }
    }

    #[test]
    fn unknown_tag_fails() {
        assert!(matches!(DataType::from_tag("blob"), Err(Error::UnknownType(tag)) if tag == "blob"));
    }
}
