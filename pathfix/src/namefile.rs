//! Namefiles: small text files recording the original name of a renamed
//! entity.
//!
//! A renamed file `S.ext` gets `S.origname.txt` beside it. A renamed
//! directory `D` gets `D.origdirname.txt` both inside and beside it. Each
//! namefile holds the original segment followed by a newline.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::path::{namefile_name, EntityKind};
use crate::table::PathTable;

/// A namefile owed for one renamed entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwedNamefile {
    /// Final on-disk path of the renamed entity.
    pub entity: PathBuf,
    /// The entity's original segment.
    pub original_name: String,
    /// The entity's kind.
    pub kind: EntityKind,
}

/// A namefile that was written, or would be written in a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamefileRecord {
    /// Path of the namefile.
    pub path: PathBuf,
    /// The renamed entity it describes.
    pub entity: PathBuf,
    /// The original name recorded in it.
    pub original_name: String,
}

/// Collect the namefiles owed by every row of `table`, one entry per
/// renamed entity.
///
/// `base` is the directory containing column zero. Must only be called once
/// every rename has been committed, so that each row's `source` is final.
#[must_use]
pub fn owed_namefiles(table: &PathTable, base: &Path) -> Vec<OwedNamefile> {
    let mut owed: BTreeMap<PathBuf, OwedNamefile> = BTreeMap::new();
    for row in table.rows() {
        for column in row.changed_columns() {
            let entity = base.join(row.source.prefix_path(column));
            owed.entry(entity.clone()).or_insert_with(|| OwedNamefile {
                entity,
                original_name: row.original.get(column).unwrap_or_default().to_string(),
                kind: row.kind_at(column),
            });
        }
    }
    owed.into_values().collect()
}

/// Writes namefiles, refusing to overwrite anything.
#[derive(Debug, Default)]
pub struct NamefileWriter {
    dry_run: bool,
    records: Vec<NamefileRecord>,
}

impl NamefileWriter {
    /// Create a writer. In a dry run nothing is written, only recorded.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            records: Vec::new(),
        }
    }

    /// Write the namefile(s) for one renamed entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NamefileCollision`] if a namefile path is already
    /// taken, or an I/O error if writing fails.
    pub fn write(&mut self, owed: &OwedNamefile) -> Result<()> {
        let name = owed
            .entity
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidPath {
                path: owed.entity.clone(),
                reason: "Renamed entity has no UTF-8 name".to_string(),
            })?;
        let namefile = namefile_name(name, owed.kind);
        let parent = owed.entity.parent().unwrap_or_else(|| Path::new(""));

        let mut paths = Vec::with_capacity(2);
        if owed.kind.is_dir() {
            paths.push(owed.entity.join(&namefile));
        }
        paths.push(parent.join(&namefile));

        for path in paths {
            if !self.dry_run {
                write_new(&path, &owed.original_name)?;
            }
            log::debug!("Namefile {} records {:?}", path.display(), owed.original_name);
            self.records.push(NamefileRecord {
                path,
                entity: owed.entity.clone(),
                original_name: owed.original_name.clone(),
            });
        }
        Ok(())
    }

    /// Namefiles written so far.
    #[must_use]
    pub fn records(&self) -> &[NamefileRecord] {
        &self.records
    }

    /// Consume the writer, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<NamefileRecord> {
        self.records
    }
}

fn write_new(path: &Path, original_name: &str) -> Result<()> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(Error::NamefileCollision {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(Error::path_io(path, e)),
    };
    writeln!(file, "{original_name}").map_err(|e| Error::path_io(path, e))
}
