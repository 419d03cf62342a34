// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

//! Integration test: a table registered in the storage manager stays
//! reachable through a scan built over it.

use std::sync::Arc;

use chunktable_catalog::StorageManager;
use chunktable_core::ColumnId;
use chunktable_storage::Table;
use chunktable_type::{AllTypeVariant, DataType};

#[test]
fn registered_table_is_reachable_by_name() {
    let manager = StorageManager::default();

    let mut people = Table::new(10);
    people.add_column("name", DataType::Text).unwrap();
    people.append(vec![AllTypeVariant::Text("Ada".to_string())]).unwrap();

    manager.add_table("people", Arc::new(people)).unwrap();

    let fetched = manager.get_table("people").unwrap();
    assert_eq!(fetched.row_count(), 1);
    assert_eq!(fetched.column_name(ColumnId(0)).unwrap(), "name");

    manager.reset();
    assert!(!manager.has_table("people"));
}
