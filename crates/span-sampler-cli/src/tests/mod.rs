//! Unit tests for the CLI runtime.

use std::ffi::OsString;
use std::io::Write as _;
use std::process::ExitCode;

use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use crate::run;

const PYTHON_SOURCE: &str = "\
def area(radius):
    squared = radius * radius
    return 3.14 * squared


def label(shape):
    if shape == \"circle\":
        name = \"round\"
    else:
        name = \"other\"
    return name
";

/// Output captured from one in-process CLI run.
struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn source_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write source");
    file
}

#[fixture]
fn python_file() -> NamedTempFile {
    source_file(".py", PYTHON_SOURCE)
}

fn run_cli(args: &[&str]) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("span-sampler")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit = run(argv, &mut stdout, &mut stderr, false);
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

fn json_records(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("json record"))
        .collect()
}

#[rstest]
fn json_output_emits_one_record_per_span(python_file: NamedTempFile) {
    let path = path_of(&python_file);
    let outcome = run_cli(&[
        "--seed",
        "1",
        "--num-samples",
        "3",
        "--output",
        "json",
        path.as_str(),
    ]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    let records = json_records(&outcome.stdout);
    assert_eq!(records.len(), 3);
    for record in &records {
        let text = record["text"].as_str().expect("text");
        assert!(PYTHON_SOURCE.contains(text));
        assert!(record["kind"].is_string());
        assert!(record["start_line"].as_u64().expect("start line") >= 2);
    }
}

#[rstest]
fn seeded_runs_are_reproducible(python_file: NamedTempFile) {
    let path = path_of(&python_file);
    let args = ["--seed", "42", "--num-samples", "4", "--output", "json", path.as_str()];

    let first = run_cli(&args);
    let second = run_cli(&args);

    assert_eq!(first.exit, ExitCode::SUCCESS);
    assert_eq!(first.stdout, second.stdout);
}

#[rstest]
fn human_output_shows_spans_in_context(python_file: NamedTempFile) {
    let path = path_of(&python_file);
    let outcome = run_cli(&[
        "--seed",
        "3",
        "--context-chars",
        "1000",
        "--output",
        "human",
        path.as_str(),
    ]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert!(outcome.stdout.starts_with("# "), "missing span header");
    assert!(outcome.stdout.contains("def area(radius):"));
    assert!(outcome.stdout.ends_with("-------\n"));
    assert!(!outcome.stdout.contains('\u{1b}'), "no highlighting off-terminal");
}

#[rstest]
fn whole_lines_widen_spans(python_file: NamedTempFile) {
    let path = path_of(&python_file);
    let outcome = run_cli(&[
        "--seed",
        "9",
        "--num-samples",
        "5",
        "--whole-lines",
        "--output",
        "json",
        path.as_str(),
    ]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    let records = json_records(&outcome.stdout);
    assert!(!records.is_empty());
    for record in &records {
        assert_eq!(record["start_column"], 1);
        assert!(record["text"].as_str().expect("text").ends_with('\n'));
    }
}

#[rstest]
fn line_restriction_keeps_spans_in_the_chosen_function(python_file: NamedTempFile) {
    let path = path_of(&python_file);
    let outcome = run_cli(&[
        "--seed",
        "5",
        "--num-samples",
        "10",
        "--line",
        "8",
        "--output",
        "json",
        path.as_str(),
    ]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    let records = json_records(&outcome.stdout);
    assert!(!records.is_empty());
    for record in &records {
        assert!(record["start_line"].as_u64().expect("start line") >= 7);
    }
}

#[rstest]
#[case(&[], 2)]
#[case(&["--num-samples", "4"], 4)]
fn config_file_settings_yield_to_flags(
    python_file: NamedTempFile,
    #[case] flags: &[&str],
    #[case] expected: usize,
) {
    let config = source_file(".toml", "num_samples = 2\n");
    let config_path = path_of(&config);
    let path = path_of(&python_file);
    let args: Vec<&str> = ["--config-path", config_path.as_str(), "--output", "json"]
        .into_iter()
        .chain(flags.iter().copied())
        .chain([path.as_str()])
        .collect();

    let outcome = run_cli(&args);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(json_records(&outcome.stdout).len(), expected);
}

#[test]
fn file_without_functions_succeeds_with_no_output() {
    let file = source_file(".py", "import os\nprint(os.getcwd())\n");
    let outcome = run_cli(&["--output", "json", path_of(&file).as_str()]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.is_empty());
}

#[test]
fn unknown_extension_requires_a_language() {
    let file = source_file(".txt", PYTHON_SOURCE);
    let outcome = run_cli(&[path_of(&file).as_str()]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("cannot detect the language"));
}

#[test]
fn explicit_language_overrides_the_extension() {
    let file = source_file(".txt", PYTHON_SOURCE);
    let path = path_of(&file);
    let outcome = run_cli(&["--language", "python", "--output", "json", path.as_str()]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(json_records(&outcome.stdout).len(), 1);
}

#[rstest]
#[case(&["--temperature", "-1"], "invalid temperature")]
#[case(&["--num-samples", "0"], "invalid num_samples")]
fn invalid_sampling_parameters_fail(
    python_file: NamedTempFile,
    #[case] flags: &[&str],
    #[case] message: &str,
) {
    let path = path_of(&python_file);
    let args: Vec<&str> = flags.iter().copied().chain([path.as_str()]).collect();
    let outcome = run_cli(&args);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(
        outcome.stderr.contains(message),
        "stderr: {}",
        outcome.stderr
    );
}

#[test]
fn missing_input_is_reported() {
    let outcome = run_cli(&["does-not-exist.py"]);

    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("failed to read input"));
}

#[test]
fn help_is_written_to_stdout() {
    let outcome = run_cli(&["--help"]);

    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("Usage: span-sampler"));
}
