//! Property-based tests for ordering and reproducibility.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use detpack_core::PackRequest;
use detpack_core::pack_blocking;
use detpack_core::plan;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_tree(root: &Path, files: &[String]) {
    for relative in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, relative.as_bytes()).unwrap();
    }
}

/// Directory components carry no dot, so a file never collides with a
/// directory of the same name.
fn relative_paths() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-z0-9_-]{1,8}(/[a-z0-9_-]{1,8}){0,2}\\.txt", 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Planned entries are always sorted, whatever order files were created in.
    #[test]
    fn prop_plan_is_sorted(paths in relative_paths(), reverse in any::<bool>()) {
        let mut files: Vec<String> = paths.into_iter().collect();
        if reverse {
            files.reverse();
        }
        let temp = TempDir::new().expect("failed to create temp dir");
        write_tree(temp.path(), &files);

        let entries = plan(&PackRequest::new(temp.path(), "out.zip")).unwrap();
        let names: Vec<String> = entries.into_iter().map(|e| e.archive_name).collect();

        let mut expected = files.clone();
        expected.sort();
        prop_assert_eq!(names, expected);
    }

    /// Excluded files never appear; everything else always does.
    #[test]
    fn prop_exclusion_is_exact(paths in relative_paths()) {
        let files: Vec<String> = paths.into_iter().collect();
        let temp = TempDir::new().expect("failed to create temp dir");
        write_tree(temp.path(), &files);

        let excluded = files[0].clone();
        let request = PackRequest::new(temp.path(), "out.tar")
            .with_exclude(vec![excluded.clone()]);
        let names: Vec<String> = plan(&request)
            .unwrap()
            .into_iter()
            .map(|e| e.archive_name)
            .collect();

        prop_assert!(!names.contains(&excluded));
        prop_assert_eq!(names.len(), files.len() - 1);
    }

    /// Packing the same tree twice yields identical bytes.
    #[test]
    fn prop_pack_is_reproducible(paths in relative_paths(), zip in any::<bool>()) {
        let files: Vec<String> = paths.into_iter().collect();
        let src = TempDir::new().expect("failed to create temp dir");
        write_tree(src.path(), &files);
        let out = TempDir::new().expect("failed to create temp dir");
        let ext = if zip { "zip" } else { "tar" };
        let first = out.path().join(format!("first.{ext}"));
        let second = out.path().join(format!("second.{ext}"));

        pack_blocking(&PackRequest::new(src.path(), &first)).unwrap();
        pack_blocking(&PackRequest::new(src.path(), &second)).unwrap();

        prop_assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}
