//! Removal of rows that carry no data.

use crate::core::{Series, Table, TimeAxis};

/// Drops every row whose value columns are all null, then re-sorts by
/// timestamp ascending.
///
/// The column set and names are unchanged. The sort is stable: duplicate
/// timestamps are expected to be deduplicated upstream but are tolerated
/// here, keeping their relative input order. Idempotent.
pub fn trim(table: &Table) -> Table {
    let stamps = table.axis().stamps();
    let mut keep: Vec<usize> = (0..table.n_rows())
        .filter(|&row| !table.row_is_all_null(row))
        .collect();
    keep.sort_by_key(|&row| stamps[row]);

    let axis = TimeAxis::from_stamps(keep.iter().map(|&row| stamps[row]).collect());
    let series = table
        .series()
        .iter()
        .map(|s| {
            Series::new(
                s.name(),
                keep.iter().map(|&row| s.values()[row]).collect(),
            )
        })
        .collect();
    Table::from_parts(axis, series)
}
