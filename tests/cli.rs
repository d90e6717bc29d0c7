use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Run the ifdef binary with the given arguments, feeding `input` on stdin.
fn run_ifdef(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ifdef"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn ifdef");

    child
        .stdin
        .as_mut()
        .expect("Failed to open stdin")
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");

    child.wait_with_output().expect("Failed to wait for ifdef")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_keeps_then_branch_when_defined() {
    let output = run_ifdef(&["-DX"], "@ifdef X\nA\n@else\nB\n@endif\n");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "A\n");
}

#[test]
fn test_keeps_else_branch_when_undefined() {
    let output = run_ifdef(&[], "@ifdef X\nA\n@else\nB\n@endif\n");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "B\n");
}

#[test]
fn test_substitutes_defined_references() {
    let output = run_ifdef(&["-DNAME=world"], "hello @NAME@\n");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "hello world\n");
}

#[test]
fn test_last_define_wins() {
    let output = run_ifdef(&["-DV=first", "-DV=second"], "@V@\n");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "second\n");
}

#[test]
fn test_undefined_reference_fails() {
    let output = run_ifdef(&[], "fine\n@MISSING@\n");

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("undefined variable MISSING"),
        "stderr: {}",
        stderr
    );
    assert!(stderr.contains("line 2"), "stderr: {}", stderr);
}

#[test]
fn test_unbalanced_endif_fails() {
    let output = run_ifdef(&[], "@endif\n");

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("@endif without matching @ifdef"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_unterminated_ifdef_fails() {
    let output = run_ifdef(&["-DX"], "@ifdef X\ncontent\n");

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("unterminated @ifdef X"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_unknown_option_is_rejected() {
    let output = run_ifdef(&["--frobnicate"], "");

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("--frobnicate"), "stderr: {}", stderr);
}

#[test]
fn test_dash_reads_stdin() {
    let output = run_ifdef(&["-"], "plain text\n");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "plain text\n");
}

#[test]
fn test_file_input_and_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = dir.path().join("in.txt");
    let output_path = dir.path().join("out.txt");
    std::fs::write(&input_path, "@ifdef X\nkept\n@endif\ntail @V@\n")
        .expect("Failed to write input file");

    let output = run_ifdef(
        &[
            "-DX",
            "-DV=ok",
            "-o",
            output_path.to_str().unwrap(),
            input_path.to_str().unwrap(),
        ],
        "",
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "");
    let written = std::fs::read_to_string(&output_path).expect("Failed to read output file");
    assert_eq!(written, "kept\ntail ok\n");
}

#[test]
fn test_missing_input_file_fails() {
    let output = run_ifdef(&["no-such-file.txt"], "");

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("Failed to open input file"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_show_defines_prints_sorted_json() {
    let output = run_ifdef(&["-DB=two", "-DA", "--show-defines"], "");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "{\n  \"A\": 1,\n  \"B\": \"two\"\n}\n");
}

#[test]
fn test_verbose_summary_goes_to_stderr() {
    let output = run_ifdef(&["-v", "-DX"], "@ifdef X\nkept\n@endif\n");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "kept\n");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Processed 3 lines"), "stderr: {}", stderr);
}

#[test]
fn test_version_flag() {
    let output = run_ifdef(&["--version"], "");

    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("ifdef"));
}
