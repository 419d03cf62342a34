// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

//! Shared identifiers, position lists and the error type used across the
//! storage and scan crates.

pub use error::Error;
pub use ids::{ChunkId, ChunkOffset, ColumnId, PosList, RowId, ValueId, INVALID_VALUE_ID};

mod error;
mod ids;

pub type Result<T> = std::result::Result<T, Error>;
