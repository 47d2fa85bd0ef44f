//! Stable element ids for scale-table cells.
//!
//! Ids are generated once, when the table is constructed, from
//! `(table id, row, column)` for grid cells and `(table id, index)` for
//! inferred-scale slots. Later lookups go through the registry rather than
//! re-deriving strings, so a partial re-render always addresses the same node
//! the construction pass created.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::fmt;

/// Opaque, stable element id of one table cell or inferred slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellId(String);

impl CellId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ids for a ragged grid plus an inferred-scale strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRegistry {
    table_id: String,
    cells: Vec<Vec<CellId>>,
    inferred: Vec<CellId>,
}

impl CellRegistry {
    /// Allocate ids for rows of the given lengths and `inferred` strip slots.
    #[must_use]
    pub fn new(table_id: &str, row_lengths: &[usize], inferred: usize) -> Self {
        let cells = row_lengths
            .iter()
            .enumerate()
            .map(|(row, &len)| {
                (0..len)
                    .map(|col| CellId(format!("{table_id}-cell-{row}-{col}")))
                    .collect()
            })
            .collect();
        let inferred = (0..inferred)
            .map(|index| CellId(format!("{table_id}-inferred-{index}")))
            .collect();
        Self { table_id: table_id.to_owned(), cells, inferred }
    }

    #[must_use]
    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Id of the value cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellId> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Id of inferred slot `index`.
    #[must_use]
    pub fn inferred(&self, index: usize) -> Option<&CellId> {
        self.inferred.get(index)
    }

    /// Row lengths of the grid.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        self.cells.iter().map(Vec::len).collect()
    }

    /// Number of inferred slots.
    #[must_use]
    pub fn inferred_len(&self) -> usize {
        self.inferred.len()
    }

    /// Every id the registry owns, grid first (row-major) then inferred slots.
    pub fn iter(&self) -> impl Iterator<Item = &CellId> {
        self.cells.iter().flatten().chain(self.inferred.iter())
    }
}
