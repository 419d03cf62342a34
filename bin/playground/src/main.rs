// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2026 chunktable contributors

use std::sync::Arc;

use chunktable_catalog::storage_manager;
use chunktable_core::{ChunkId, ColumnId};
use chunktable_engine::{Operator, ScanType, TableScan, TableWrapper};
use chunktable_storage::Table;
use chunktable_type::{AllTypeVariant, DataType};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut people = Table::new(2);
    people.add_column("name", DataType::Text).unwrap();
    people.add_column("age", DataType::Int).unwrap();

    for (name, age) in [("Alice", 16), ("Bob", 22), ("Charlie", 17), ("Diana", 25), ("Eve", 19)] {
        people.append(vec![AllTypeVariant::Text(name.to_string()), AllTypeVariant::Int(age)]).unwrap();
    }
    people.compress_chunk(ChunkId(0)).unwrap();
    people.compress_chunk(ChunkId(1)).unwrap();
    people.compress_chunk(ChunkId(2)).unwrap();

    let people = Arc::new(people);
    storage_manager().add_table("people", people.clone()).unwrap();

    let over_eighteen = TableScan::new(
        Arc::new(TableWrapper::new(people)),
        ColumnId(1),
        ScanType::OpGreaterThan,
        AllTypeVariant::Int(18),
    );
    let adults = over_eighteen.execute().unwrap();

    println!("adults: {} of {} rows", adults.row_count(), storage_manager().get_table("people").unwrap().row_count());
    let chunk = adults.get_chunk(ChunkId(0)).unwrap();
    for i in 0..adults.row_count() as usize {
        let name = chunk.get_column(ColumnId(0)).unwrap().get(i).unwrap();
        let age = chunk.get_column(ColumnId(1)).unwrap().get(i).unwrap();
        println!("  {name} ({age})");
    }

    println!("\n{}", storage_manager().print());
}
