//! The path table: per-path original, on-disk, and planned segment lists.

use crate::classify::ViolationSet;
use crate::path::{namefile_name_len, EntityKind, PathColumns};

/// One pending path and the three views of it the engine maintains.
///
/// `original` never changes. `source` is where the entity is on disk right now
/// and `target` is where it should end up; both are rewritten when an
/// ancestor is renamed on behalf of another path. The namefile paths owed by
/// a row are derived from `target` on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRow {
    /// Segments as first observed.
    pub original: PathColumns,
    /// Segments as currently on disk.
    pub source: PathColumns,
    /// Planned segments.
    pub target: PathColumns,
    /// Kind of the final segment. Every other segment is a directory.
    pub leaf_kind: EntityKind,
}

impl PathRow {
    /// A row with all three views equal to `columns`.
    #[must_use]
    pub fn new(columns: PathColumns, leaf_kind: EntityKind) -> Self {
        Self {
            original: columns.clone(),
            source: columns.clone(),
            target: columns,
            leaf_kind,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Kind of the entity at `column`.
    #[must_use]
    pub fn kind_at(&self, column: usize) -> EntityKind {
        if column + 1 == self.len() {
            self.leaf_kind
        } else {
            EntityKind::Directory
        }
    }

    /// Columns whose planned name differs from the original.
    pub fn changed_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (1..self.len()).filter(|&c| self.target.get(c) != self.original.get(c))
    }

    /// Rendered length of the longest namefile path owed for `column`.
    ///
    /// A file's namefile sits beside it; a directory's innermost namefile
    /// sits inside it.
    #[must_use]
    pub fn namefile_len(&self, column: usize) -> usize {
        let kind = self.kind_at(column);
        let name = self.target.get(column).unwrap_or_default();
        let dir_len = match kind {
            EntityKind::Directory => self.target.rendered_len_through(column),
            EntityKind::File => self.target.rendered_len_through(column - 1),
        };
        dir_len + 1 + namefile_name_len(name, kind)
    }

    /// The length the budget applies to: the planned path or the longest
    /// namefile it owes, whichever is longer.
    #[must_use]
    pub fn effective_len(&self) -> usize {
        self.changed_columns()
            .map(|c| self.namefile_len(c))
            .fold(self.target.rendered_len(), usize::max)
    }
}

/// All pending rows, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTable {
    rows: Vec<PathRow>,
}

impl PathTable {
    /// Build a table from classified violations.
    ///
    /// When `root_label` is given it replaces column zero of every row. Dry
    /// runs plan against the source tree under the name its copy would get.
    #[must_use]
    pub fn from_violations(violations: &ViolationSet, root_label: Option<&str>) -> Self {
        let rows = violations
            .iter()
            .filter(|v| !v.columns.is_empty())
            .map(|v| {
                let mut columns = v.columns.clone();
                if let Some(label) = root_label {
                    columns.set(0, label);
                }
                PathRow::new(columns, v.kind)
            })
            .collect();
        Self { rows }
    }

    /// Build a table from explicit rows.
    #[must_use]
    pub fn from_rows(rows: Vec<PathRow>) -> Self {
        Self { rows }
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[PathRow] {
        &self.rows
    }

    /// Row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> &PathRow {
        &self.rows[index]
    }

    /// Mutable row at `index`.
    pub fn row_mut(&mut self, index: usize) -> &mut PathRow {
        &mut self.rows[index]
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record that the entity whose on-disk segments are `old_prefix` is now
    /// called `new_name`.
    ///
    /// Every row located at or below that entity gets the new name in both
    /// its `source` and `target` at that column. Returns how many rows were
    /// updated.
    pub fn propagate(&mut self, old_prefix: &[String], new_name: &str) -> usize {
        let Some(column) = old_prefix.len().checked_sub(1) else {
            return 0;
        };
        let mut updated = 0;
        for row in &mut self.rows {
            if row.source.starts_with(old_prefix) {
                row.source.set(column, new_name);
                row.target.set(column, new_name);
                updated += 1;
            }
        }
        updated
    }
}
