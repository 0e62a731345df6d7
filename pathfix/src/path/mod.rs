//! Path model: segment sequences, entity kinds, and naming rules.
//!
//! The remediation engine never manipulates paths as strings. A path is a
//! [`PathColumns`] value whose column zero is the tree root's own name; the
//! rendered length of that sequence is the quantity every length rule is
//! measured against.
//!
//! # Examples
//!
//! ```
//! use pathfix::path::{namefile_name, EntityKind, PathColumns};
//! use std::path::Path;
//!
//! let columns = PathColumns::from_root(Path::new("/data/tree"), Path::new("/data/tree/a.txt")).unwrap();
//! assert_eq!(columns.rendered_len(), "tree/a.txt".len());
//! assert_eq!(namefile_name("a.txt", EntityKind::File), "a.origname.txt");
//! ```

mod columns;
mod kind;
mod naming;
mod resolve;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use columns::{rendered_len, PathColumns};
pub use kind::EntityKind;
pub use naming::{
    namefile_name, namefile_name_len, split_name, stem_len, DIR_NAMEFILE_SUFFIX,
    FILE_NAMEFILE_SUFFIX,
};
pub use resolve::{absolutize, expand_tilde, resolve_tree_root, shortened_sibling};
