// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use std::sync::Arc;

use chunktable_core::Result;
use chunktable_storage::Table;

/// A unit of query execution that produces a table. Operators are read-only
/// with respect to their inputs: executing one never mutates the table it
/// was built from (spec.md `# 6`).
pub trait Operator: Send + Sync {
    fn execute(&self) -> Result<Arc<Table>>;
}

/// Wraps an already-materialized table so it can serve as an operator's
/// input — the leaf of an operator tree.
pub struct TableWrapper {
    table: Arc<Table>,
}

impl TableWrapper {
    pub fn new(table: Arc<Table>) -> Self {
        Self { table }
    }
}

impl Operator for TableWrapper {
    fn execute(&self) -> Result<Arc<Table>> {
        Ok(self.table.clone())
    }
}
