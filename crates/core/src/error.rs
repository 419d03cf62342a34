// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use thiserror::Error;

/// Every failure kind the storage and scan core can raise.
///
/// All failures are surfaced to the caller; none are retried or swallowed
/// internally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("unknown type tag: {0:?}")]
    UnknownType(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },

    #[error("arity mismatch: row has {actual} values, expected {expected}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("value id {value_id} exceeds attribute vector width (max {max})")]
    ValueOutOfRange { value_id: u32, max: u32 },

    #[error("column is immutable")]
    ImmutableColumn,

    #[error("unknown column: {0:?}")]
    UnknownColumn(String),

    #[error("unknown table: {0:?}")]
    UnknownTable(String),

    #[error("table already exists: {0:?}")]
    DuplicateName(String),

    #[error("add_column requires every chunk of the table to be empty")]
    NonEmptyTable,
}
