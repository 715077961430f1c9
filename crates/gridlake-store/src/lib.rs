//! # Gridlake Store
//!
//! File-based storage layers for extracted market data.
//!
//! ## Layers
//!
//! | Layer | Layout | Content |
//! |-------|--------|---------|
//! | bronze | `{root}/{source}/{logical_path}` | Raw response bodies, one file per request |
//! | silver | `{root}/{source}/{descriptor}/{table}.csv` | Normalized, sorted, de-duplicated records |
//!
//! Logical paths come from the parameter builders (`generation_per_type/2024-01-15.xml`,
//! `bid_offer_level_data/2024-01-15_P01.xml`, ...). Paths that are absolute or
//! contain `..` are rejected.

mod bronze;
mod error;
mod silver;

use std::path::{Component, Path, PathBuf};

pub use bronze::{BronzeFile, BronzeStore, BronzeWriteReport};
pub use error::StoreError;
pub use silver::{SilverStore, SilverTableReport};

/// Joins `relative` under `root`, refusing anything that could escape it.
fn join_relative(root: &Path, relative: &str) -> Result<PathBuf, StoreError> {
    let candidate = Path::new(relative);
    let safe = !relative.trim().is_empty()
        && candidate
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if !safe {
        return Err(StoreError::UnsafePath(relative.to_owned()));
    }
    Ok(root.join(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_nested_relative_paths() {
        let joined = join_relative(Path::new("/data"), "elexon/b1610/2024-01-15.xml")
            .expect("safe path");
        assert_eq!(joined, PathBuf::from("/data/elexon/b1610/2024-01-15.xml"));
    }

    #[test]
    fn rejects_escaping_paths() {
        for path in ["../etc/passwd", "/abs/file.xml", "a/../../b", "", "./x"] {
            assert!(
                matches!(join_relative(Path::new("/data"), path), Err(StoreError::UnsafePath(_))),
                "{path} should be rejected"
            );
        }
    }
}
