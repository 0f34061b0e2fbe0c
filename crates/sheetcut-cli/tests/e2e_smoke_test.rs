use std::{fs, path::PathBuf};

use tempfile::tempdir;

use sheetcut_cli::{Args, OutputFormat, SVG_FILE_NAME, run};

/// Collects all .toml job files from a directory
fn collect_job_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo jobs live at the workspace root
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &PathBuf, output_dir: &PathBuf, format: OutputFormat) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output_dir: output_dir.to_string_lossy().to_string(),
        config: None,
        format,
        optimize: false,
        log_level: "off".to_string(),
    }
}

fn has_placements(job: &PathBuf) -> bool {
    fs::read_to_string(job).unwrap().contains("[[placements]]")
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_job_files(demos_path());

    assert!(!valid_demos.is_empty(), "No demo jobs found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_dir = temp_dir
            .path()
            .join(demo_path.file_stem().unwrap().to_string_lossy().as_ref());

        for format in [OutputFormat::Svg, OutputFormat::Png] {
            if let Err(e) = run(&args(demo_path, &output_dir, format)) {
                failed_demos.push((demo_path.clone(), format, e));
            }
        }

        let svg = fs::read_to_string(output_dir.join(SVG_FILE_NAME)).unwrap_or_default();
        assert!(svg.contains("<svg"), "{} has no SVG output", demo_path.display());

        let png = output_dir.join("cut-layout.png");
        assert_eq!(
            png.exists(),
            has_placements(demo_path),
            "unexpected PNG output for {}",
            demo_path.display()
        );
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, format, err) in &failed_demos {
            eprintln!("  - {} ({format:?}): {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_job_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_dir = temp_dir.path().to_path_buf();
        if run(&args(demo_path, &output_dir, OutputFormat::Svg)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    assert!(!temp_dir.path().join(SVG_FILE_NAME).exists());
    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_missing_input_is_an_io_error() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let err = run(&args(&missing, &temp_dir.path().to_path_buf(), OutputFormat::Svg)).unwrap_err();

    assert!(matches!(err, sheetcut::SheetcutError::Io(_)));
}

#[test]
fn e2e_png_into_unwritable_output_fails() {
    let temp_dir = tempdir().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    fs::write(&blocker, b"").unwrap();

    let err = run(&args(
        &demos_path().join("wardrobe.toml"),
        &blocker,
        OutputFormat::Png,
    ))
    .unwrap_err();

    assert!(matches!(err, sheetcut::SheetcutError::Export(_)));
}

#[test]
fn e2e_png_replaces_stale_output() {
    let temp_dir = tempdir().unwrap();
    let output_dir = temp_dir.path().to_path_buf();
    let png = output_dir.join("cut-layout.png");
    fs::write(&png, b"stale").unwrap();

    run(&args(
        &demos_path().join("wardrobe.toml"),
        &output_dir,
        OutputFormat::Png,
    ))
    .unwrap();

    assert_eq!(&fs::read(&png).unwrap()[..8], b"\x89PNG\r\n\x1a\n");
}
