// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use std::fmt::{self, Display, Formatter};

use crate::data_type::DataType;

/// Tagged union over the supported scalar types, used only at operator and
/// API boundaries (table `append`, the scan's search value, the diagnostic
/// `operator[]` accessors). Hot loops never touch this type; they operate on
/// the concrete `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum AllTypeVariant {
    Int(i32),
    Float(f64),
    Text(String),
}

impl AllTypeVariant {
    pub fn data_type(&self) -> DataType {
        match self {
            AllTypeVariant::Int(_) => DataType::Int,
            AllTypeVariant::Float(_) => DataType::Float,
            AllTypeVariant::Text(_) => DataType::Text,
        }
    }
}

impl Display for AllTypeVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AllTypeVariant::Int(v) => Display::fmt(v, f),
            AllTypeVariant::Float(v) => Display::fmt(v, f),
            AllTypeVariant::Text(v) => Display::fmt(v, f),
        }
    }
}

impl From<i32> for AllTypeVariant {
    fn from(v: i32) -> Self {
        AllTypeVariant::Int(v)
    }
}

impl From<f64> for AllTypeVariant {
    fn from(v: f64) -> Self {
        AllTypeVariant::Float(v)
    }
}

impl From<String> for AllTypeVariant {
    fn from(v: String) -> Self {
        AllTypeVariant::Text(v)
    }
}

impl From<&str> for AllTypeVariant {
    fn from(v: &str) -> Self {
        AllTypeVariant::Text(v.to_string())
    }
}
