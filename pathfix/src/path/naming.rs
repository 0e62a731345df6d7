//! Stem and extension handling, and namefile names.

use super::kind::EntityKind;

/// Suffix of the namefile recording a file's original name.
pub const FILE_NAMEFILE_SUFFIX: &str = ".origname.txt";

/// Suffix of the namefiles recording a directory's original name.
pub const DIR_NAMEFILE_SUFFIX: &str = ".origdirname.txt";

/// Split a segment into stem and extension.
///
/// Directories have no extension. For files the extension starts at the last
/// `.` that is not the first character, so `.bashrc` and `Makefile` are all
/// stem. The returned extension includes its dot.
///
/// # Examples
///
/// ```
/// use pathfix::path::{split_name, EntityKind};
///
/// assert_eq!(split_name("report.tar.gz", EntityKind::File), ("report.tar", ".gz"));
/// assert_eq!(split_name(".bashrc", EntityKind::File), (".bashrc", ""));
/// assert_eq!(split_name("v1.2", EntityKind::Directory), ("v1.2", ""));
/// ```
#[must_use]
pub fn split_name(name: &str, kind: EntityKind) -> (&str, &str) {
    if kind.is_dir() {
        return (name, "");
    }
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Character length of the stem of `name`.
#[must_use]
pub fn stem_len(name: &str, kind: EntityKind) -> usize {
    split_name(name, kind).0.chars().count()
}

/// Name of the namefile that records the original name of the entity now
/// called `name`.
///
/// A file `S.ext` gets `S.origname.txt` next to it. A directory `D` gets
/// `D.origdirname.txt`, written both inside and beside it.
///
/// # Examples
///
/// ```
/// use pathfix::path::{namefile_name, EntityKind};
///
/// assert_eq!(namefile_name("notes_1a2b.txt", EntityKind::File), "notes_1a2b.origname.txt");
/// assert_eq!(namefile_name("src_9f00", EntityKind::Directory), "src_9f00.origdirname.txt");
/// ```
#[must_use]
pub fn namefile_name(name: &str, kind: EntityKind) -> String {
    match kind {
        EntityKind::File => format!("{}{FILE_NAMEFILE_SUFFIX}", split_name(name, kind).0),
        EntityKind::Directory => format!("{name}{DIR_NAMEFILE_SUFFIX}"),
    }
}

/// Character length of [`namefile_name`] without building it.
#[must_use]
pub fn namefile_name_len(name: &str, kind: EntityKind) -> usize {
    match kind {
        EntityKind::File => stem_len(name, kind) + FILE_NAMEFILE_SUFFIX.len(),
        EntityKind::Directory => name.chars().count() + DIR_NAMEFILE_SUFFIX.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_file() {
        assert_eq!(split_name("readme.txt", EntityKind::File), ("readme", ".txt"));
        assert_eq!(split_name("Makefile", EntityKind::File), ("Makefile", ""));
        assert_eq!(split_name("trailing.", EntityKind::File), ("trailing", "."));
    }

    #[test]
    fn test_split_directory_keeps_dots() {
        assert_eq!(split_name("my.project", EntityKind::Directory), ("my.project", ""));
    }

    #[test]
    fn test_namefile_lengths_agree() {
        for (name, kind) in [
            ("caf\u{e9}.txt", EntityKind::File),
            ("noext", EntityKind::File),
            ("d\u{e9}p\u{f4}t", EntityKind::Directory),
        ] {
            assert_eq!(
                namefile_name(name, kind).chars().count(),
                namefile_name_len(name, kind)
            );
        }
    }

    #[test]
    fn test_namefile_for_extensionless_file() {
        assert_eq!(namefile_name("Makefile", EntityKind::File), "Makefile.origname.txt");
    }
}
