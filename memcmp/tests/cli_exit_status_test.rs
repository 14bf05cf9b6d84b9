use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn memcmp_in(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_memcmp"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

#[test]
fn default_paths_produce_report_and_success() {
    let temp = TempDir::new().unwrap();
    write_file(
        &temp.path().join("build/memstats/memstats_foo.log"),
        "header line\n10 20 5 35 0x23 libfoo.a\n\nT 0000000a global_fn\nb 00000003 local_var\n.text skip_me\n",
    );

    let output = memcmp_in(temp.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Read file: memstats_foo.log"));
    assert!(stdout.contains("Processed memstats_foo.log"));
    assert!(stdout.contains("Markdown report generated: build/memory_comparison.md"));

    let report = std::fs::read_to_string(temp.path().join("build/memory_comparison.md")).unwrap();
    assert!(report.contains("| foo | 10 | 20 | 5 | 35 |\n"));
    assert!(report.contains("| Configuration | global_fn | local_var |\n"));
    assert!(report.contains("| foo | 10 | 3 |\n"));
}

#[test]
fn missing_directory_exits_with_no_input_status() {
    let temp = TempDir::new().unwrap();
    let output = memcmp_in(temp.path()).arg("nowhere").output().unwrap();
    assert_eq!(output.status.code(), Some(3));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No files were read from nowhere"));
    assert!(!temp.path().join("build/memory_comparison.md").exists());
}

#[test]
fn allow_empty_from_config_file_exits_successfully() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("stats")).unwrap();
    write_file(
        &temp.path().join("memcmp.toml"),
        "input-dir = \"stats\"\noutput = \"out/report.md\"\nallow-empty = true\n",
    );

    let output = memcmp_in(temp.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(temp.path().join("out/report.md").exists());
}

#[test]
fn invalid_config_is_fatal() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("memcmp.toml"), "unknown-key = 1\n");

    let output = memcmp_in(temp.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse config"));
}

#[test]
fn usage_error_and_no_input_have_different_exit_codes() {
    let temp = TempDir::new().unwrap();

    let usage = memcmp_in(temp.path())
        .arg("--no-such-flag")
        .output()
        .unwrap();
    let no_input = memcmp_in(temp.path()).output().unwrap();

    assert_eq!(usage.status.code(), Some(2));
    assert_eq!(no_input.status.code(), Some(3));
    assert_ne!(usage.status.code(), no_input.status.code());
}
