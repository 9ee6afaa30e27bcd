use std::{fs, path::PathBuf};

use tempfile::tempdir;

use documentize_cli::Args;

/// Collects all .svelte files from a directory
fn collect_svelte_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("svelte")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(inputs: Vec<String>, out_dir: &str) -> Args {
    Args {
        inputs,
        out_dir: Some(out_dir.to_string()),
        config: None,
        declarations: vec!["demos/ambient.d.ts".to_string()],
        debug: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().to_string_lossy().to_string();

    let demos = collect_svelte_files(PathBuf::from("demos"));
    assert!(!demos.is_empty(), "No demos found in demos/");

    let inputs = demos
        .iter()
        .map(|path| path.to_string_lossy().to_string())
        .collect();
    let summary = documentize_cli::run(&args(inputs, &out_dir)).expect("Failed to run");

    if !summary.is_success() {
        eprintln!("\nDemos that failed:");
        for failure in &summary.failures {
            eprintln!("  - {}: {}", failure.path, failure.error);
        }
        panic!("{} demo(s) failed unexpectedly", summary.failures.len());
    }

    assert_eq!(summary.skipped, vec!["demos/plain.svelte".to_string()]);
    assert_eq!(summary.patched.len(), demos.len() - 1);

    let button = fs::read_to_string(temp_dir.path().join("button.svelte")).unwrap();
    assert!(button.contains("<!--\n@component\n\nA clickable button.\n"));
    assert!(button.contains("| `click` |"));
    assert!(button.contains("| `disabled` |"));
    assert!(!button.contains("<meta data-documentize"));

    let list = fs::read_to_string(temp_dir.path().join("list.svelte")).unwrap();
    for row in ["| `class`", "| `id`", "| `items`", "| `selected`", "| `item`  ", "| `index`"] {
        assert!(list.contains(row), "missing `{row}` in:\n{list}");
    }

    assert!(!temp_dir.path().join("plain.svelte").exists());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().to_string_lossy().to_string();

    let error_demos = collect_svelte_files(PathBuf::from("demos/errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let inputs: Vec<String> = error_demos
        .iter()
        .map(|path| path.to_string_lossy().to_string())
        .collect();
    let summary = documentize_cli::run(&args(inputs.clone(), &out_dir)).expect("Failed to run");

    let failed: Vec<&str> = summary
        .failures
        .iter()
        .map(|failure| failure.path.as_str())
        .collect();
    let unexpectedly_succeeded: Vec<&String> = inputs
        .iter()
        .filter(|input| !failed.contains(&input.as_str()))
        .collect();

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {path}");
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    for failure in &summary.failures {
        let reports = documentize_cli::error_adapter::reports(&failure.path, &failure.error);
        assert!(!reports.is_empty(), "no report for {}", failure.path);
    }
}

#[test]
fn e2e_missing_input_is_reported_per_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().to_string_lossy().to_string();

    let inputs = vec![
        "demos/does-not-exist.svelte".to_string(),
        "demos/button.svelte".to_string(),
    ];
    let summary = documentize_cli::run(&args(inputs, &out_dir)).expect("Failed to run");

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].path, "demos/does-not-exist.svelte");
    assert_eq!(summary.patched, vec!["demos/button.svelte".to_string()]);
}

#[test]
fn e2e_missing_declarations_abort_run() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut args = args(
        vec!["demos/button.svelte".to_string()],
        &temp_dir.path().to_string_lossy(),
    );
    args.declarations = vec!["demos/missing.d.ts".to_string()];

    assert!(documentize_cli::run(&args).is_err());
}
