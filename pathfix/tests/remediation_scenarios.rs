//! End-to-end remediation scenarios.
//!
//! Each test builds a small source tree, runs a full remediation, and checks
//! the copy against the naming rules and the recorded original names.

mod common;

use std::fs;

use common::{assert_compliant, namefiles, settings, write_file};
use pathfix::operations::{remediate, Outcome, RemediateOptions};
use pathfix::shorten::path_hash;
use tempfile::TempDir;

#[test]
fn test_sanitized_file_gets_namefile() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("A");
    write_file(&src, "readme<>.txt", "read me");

    let settings = settings(148);
    let report = remediate(&src, &settings, &RemediateOptions::new()).unwrap();
    assert_eq!(report.outcome, Outcome::Remediated);

    let copy = temp_dir.path().join("A_shortened");
    assert_eq!(fs::read_to_string(copy.join("readme_.txt")).unwrap(), "read me");
    assert_eq!(
        fs::read_to_string(copy.join("readme_.origname.txt")).unwrap(),
        "readme<>.txt\n"
    );
    assert_compliant(&copy, &settings);

    // The source is untouched.
    assert!(src.join("readme<>.txt").is_file());
    assert!(!src.join("readme_.txt").exists());
}

#[test]
fn test_sanitized_and_shortened_file() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("A");
    let long = format!("readme<>{}.txt", "x".repeat(60));
    write_file(&src, &long, "data");

    let settings = settings(50);
    remediate(&src, &settings, &RemediateOptions::new()).unwrap();

    let copy = temp_dir.path().join("A_shortened");
    assert_compliant(&copy, &settings);

    let hash = path_hash(&["A_shortened".to_string(), long.clone()], settings.hash_length);
    let recorded = namefiles(&copy);
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].1, long);

    let shortened = fs::read_dir(&copy)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .find(|n| n.ends_with(".txt") && !n.ends_with(".origname.txt"))
        .unwrap();
    assert!(shortened.starts_with("readme_"));
    assert!(shortened.ends_with(&format!("_{hash}.txt")));
}

#[test]
fn test_compliant_tree_reports_nothing_to_do() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("T");
    write_file(&src, "docs/guide.md", "");
    write_file(&src, "src/main.rs", "");

    let report = remediate(&src, &settings(148), &RemediateOptions::new()).unwrap();
    assert_eq!(report.outcome, Outcome::NothingToDo);
    assert!(report.copy.is_none());
    assert!(!temp_dir.path().join("T_shortened").exists());
}

#[test]
fn test_suffix_reserved_before_copying() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("T");
    // 1 + 1 + 25 = 27 chars: fits 30, but not once the root grows by 10.
    write_file(&src, &"n".repeat(25), "");

    let report = remediate(&src, &settings(30), &RemediateOptions::new()).unwrap();
    assert_eq!(report.outcome, Outcome::Remediated);
    assert_eq!(report.before.too_long, 1);
    assert_compliant(&temp_dir.path().join("T_shortened"), &settings(30));
}

#[test]
fn test_deep_tree_fits_budget() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("project");
    let mut relative = String::new();
    for level in 0..6 {
        relative.push_str(&format!("level {level} with a rather long: name/"));
    }
    write_file(&src, &format!("{relative}final file name?.txt"), "deep");
    write_file(&src, &format!("{relative}sibling.txt"), "sib");

    let settings = settings(120);
    let report = remediate(&src, &settings, &RemediateOptions::new()).unwrap();
    let after = report.after.unwrap();
    assert_eq!(after.needing_fix, 0);
    assert!(after.max_length <= 120);
    assert_compliant(&temp_dir.path().join("project_shortened"), &settings);
}

#[test]
fn test_unshortenable_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("a_root_directory_name_that_is_long");
    write_file(&src, "f<.txt", "");

    let err = remediate(&src, &settings(40), &RemediateOptions::new()).unwrap_err();
    assert!(matches!(err, pathfix::Error::Unshortenable { .. }), "{err}");
}

#[test]
fn test_dry_run_matches_real_run() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("T");
    write_file(&src, "dir:one/file?.txt", "");
    write_file(&src, &format!("dir:one/{}.md", "m".repeat(80)), "");
    // Only the path through the link is too long.
    #[cfg(unix)]
    {
        write_file(&src, &format!("real/{}.txt", "f".repeat(30)), "");
        std::os::unix::fs::symlink("real", src.join(format!("{}.v2", "l".repeat(40)))).unwrap();
    }

    let settings = settings(70);
    let planned = remediate(&src, &settings, &RemediateOptions::new().with_dry_run(true)).unwrap();
    assert_eq!(planned.outcome, Outcome::DryRun);
    assert!(!temp_dir.path().join("T_shortened").exists());

    let real = remediate(&src, &settings, &RemediateOptions::new()).unwrap();
    assert_eq!(planned.plan.rename_count(), real.plan.rename_count());
    assert_eq!(planned.plan.actions, real.plan.actions);
    #[cfg(unix)]
    assert!(real
        .plan
        .actions
        .iter()
        .any(|action| action.description().contains(".v2")));
}
