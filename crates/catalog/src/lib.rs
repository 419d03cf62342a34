// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

//! The process-wide table registry (spec.md `# 5`).

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use chunktable_core::{Error, Result};
use chunktable_storage::Table;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::instrument;

static STORAGE_MANAGER: Lazy<StorageManager> = Lazy::new(StorageManager::new);

/// Returns the process-wide storage manager singleton.
pub fn storage_manager() -> &'static StorageManager {
    &STORAGE_MANAGER
}

/// A name-to-table registry, one per process. Registered tables are shared
/// (`Arc`) so that a scan's reference columns can keep a table alive after
/// it is looked up, independent of whether it is later dropped from the
/// registry.
#[derive(Default)]
pub struct StorageManager {
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl StorageManager {
    fn new() -> Self {
        Self { tables: RwLock::new(HashMap::new()) }
    }

    /// The empty string is a permitted table name (spec.md `# 9` Open
    /// Question 3, resolved in `SPEC_FULL.md` `C.3`) — this registry treats
    /// names as opaque keys and does not validate their shape.
    #[instrument(level = "debug", skip(self, table))]
    pub fn add_table(&self, name: impl Into<String>, table: Arc<Table>) -> Result<()> {
        let name = name.into();
        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }
        tables.insert(name, table);
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let mut tables = self.tables.write();
        tables.remove(name).map(|_| ()).ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    pub fn get_table(&self, name: &str) -> Result<Arc<Table>> {
        self.tables.read().get(name).cloned().ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drops every registered table. Test-only: production code has no
    /// reason to clear the whole registry at once.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&self) {
        self.tables.write().clear();
    }

    /// One line per table, in the original's diagnostic format (spec.md `# 9`
    /// Open Question, resolved in `SPEC_FULL.md` `C.4`):
    /// `'<name>': <C> columns, <R> rows, <K> chunks`.
    pub fn print(&self) -> String {
        let tables = self.tables.read();
        let mut names: Vec<&String> = tables.keys().collect();
        names.sort();

        let mut out = String::new();
        for name in names {
            let table = &tables[name];
            let _ = writeln!(
                out,
                "'{}': {} columns, {} rows, {} chunks",
                name,
                table.col_count(),
                table.row_count(),
                table.chunk_count()
            );
        }
        out
    }
}
