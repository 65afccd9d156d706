#![allow(dead_code)]

use oxide_route_order::{BuildOptions, Plan, RouteTable};
use oxide_router::Method;

/// A table whose handlers are plain labels.
pub type Table = RouteTable<Plan<&'static str>>;

/// A table whose handlers are declaration indices.
pub type IndexTable = RouteTable<Plan<usize>>;

pub fn table() -> Table {
    Table::new()
}

pub fn get_order(table: &Table, options: Option<BuildOptions>) -> Vec<String> {
    table
        .build(options)
        .paths(Method::Get)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Declares `routes` as GET routes, handler = position in `routes`.
pub fn index_table(routes: &[(String, i32)]) -> IndexTable {
    let mut table = IndexTable::new();
    for (i, (path, priority)) in routes.iter().enumerate() {
        table.get_with_priority(path.as_str(), i, *priority);
    }
    table
}

/// Declaration indices of the GET routes, in built order.
pub fn built_indices(table: &IndexTable, options: BuildOptions) -> Vec<usize> {
    table
        .build(Some(options))
        .handlers(Method::Get)
        .into_iter()
        .copied()
        .collect()
}
