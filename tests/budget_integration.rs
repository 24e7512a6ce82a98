use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestInput {
    root: PathBuf,
}

impl TestInput {
    fn new(prefix: &str, records: &str) -> Self {
        let root = unique_temp_dir(prefix);
        fs::create_dir_all(&root).expect("create temp dir");
        fs::write(root.join("employees.csv"), records).expect("write records");
        Self { root }
    }

    fn file(&self) -> PathBuf {
        self.root.join("employees.csv")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(orgchart_bin())
            .current_dir(&self.root)
            .env_remove("ORGCHART_CONFIG")
            .env_remove("ORGCHART_FIELD_SEPARATOR")
            .args(args)
            .output()
            .expect("run orgchart")
    }

    fn budget(&self, manager: &str) -> u64 {
        let file = self.file();
        let output = self.run(&["budget", file.to_str().expect("utf8 path"), manager]);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        assert!(
            output.status.success(),
            "budget command failed\nstdout:\n{stdout}\nstderr:\n{stderr}"
        );
        stdout.trim().parse().expect("budget is a number")
    }
}

impl Drop for TestInput {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn orgchart_bin() -> PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_orgchart") {
        return PathBuf::from(path);
    }

    let current_exe = std::env::current_exe().expect("resolve current test binary path");
    let target_dir = current_exe
        .parent()
        .and_then(|path| path.parent())
        .expect("derive cargo target dir from test binary path");
    let bin_name = if cfg!(windows) {
        "orgchart.exe"
    } else {
        "orgchart"
    };
    target_dir.join(bin_name)
}

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_nanos();
    let pid = std::process::id();
    std::env::temp_dir().join(format!("orgchart-{prefix}-{pid}-{nanos}"))
}

#[test]
fn budget_sums_manager_and_transitive_reports() {
    let input = TestInput::new("budget", "1,,1000\n2,1,500\n3,1,300\n4,2,200\n");
    assert_eq!(input.budget("1"), 2000);
    assert_eq!(input.budget("2"), 700);
    assert_eq!(input.budget("3"), 300);
}

#[test]
fn budget_of_unknown_manager_is_zero_with_warning() {
    let input = TestInput::new("budget-unknown", "1,,1000\n");
    let file = input.file();
    let output = input.run(&["--no-color", "budget", file.to_str().expect("utf8"), "42"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("salary budget for 42 unavailable"), "stderr: {stderr}");
}

#[test]
fn budget_skips_bad_records_and_keeps_going() {
    let input = TestInput::new(
        "budget-bad",
        "1,,1000\t2,1,500\n3,1,abc\n,1,50\n4,,70\n5,2,25\n",
    );
    assert_eq!(input.budget("1"), 1525);
}

#[test]
fn budget_json_output() {
    let input = TestInput::new("budget-json", "1,,10\n2,1,5\n");
    let file = input.file();
    let output = input.run(&["budget", file.to_str().expect("utf8"), "1", "--json"]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("parse budget json");
    assert_eq!(value["manager"], "1");
    assert_eq!(value["budget"], 15);
}

#[test]
fn config_file_in_working_directory_changes_separators() {
    let input = TestInput::new("budget-config", "1;;10 | 2;1;5\n");
    fs::write(
        input.root.join(".orgchart.toml"),
        "[input]\ngroup_separator = \"|\"\nfield_separator = \";\"\ntrim_fields = true\n",
    )
    .expect("write config");
    assert_eq!(input.budget("1"), 15);
}

#[test]
fn missing_input_file_fails() {
    let input = TestInput::new("budget-missing", "");
    let missing = input.root.join("nope.csv");
    let output = input.run(&["budget", missing.to_str().expect("utf8"), "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read records"), "stderr: {stderr}");
}
