use super::*;
use std::ffi::OsStr;
use std::io::Cursor;

fn run_with_args<I, S>(args: I, input: &[u8]) -> (i32, Vec<u8>, Vec<u8>)
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut stdin = Cursor::new(input.to_vec());
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run_with_input(args, &mut stdin, &mut stdout, &mut stderr);
    (code, stdout, stderr)
}

#[test]
fn parse_args_recognises_flags() {
    let parsed = parse_args([
        "hashx4", "-vv", "--verify", "-a", "x4djbx33a-128-ref", "--cookie", "00", "a", "b",
    ])
    .expect("parse");

    assert!(parsed.verify);
    assert!(!parsed.list);
    assert_eq!(parsed.verbosity, 2);
    assert_eq!(parsed.algorithm.as_deref(), Some("x4djbx33a-128-ref"));
    assert_eq!(parsed.cookie.as_deref(), Some("00"));
    assert_eq!(parsed.files, vec![OsString::from("a"), OsString::from("b")]);
}

#[test]
fn parse_args_defaults_to_stdin() {
    let parsed = parse_args(["hashx4"]).expect("parse");
    assert!(parsed.files.is_empty());
    assert!(parsed.algorithm.is_none());
    assert_eq!(parsed.verbosity, 0);
}

#[test]
fn parse_args_accepts_dash_operand() {
    let parsed = parse_args(["hashx4", "-"]).expect("parse");
    assert_eq!(parsed.files, vec![OsString::from("-")]);
}

#[test]
fn parse_args_rejects_unknown_option() {
    assert!(parse_args(["hashx4", "--frobnicate"]).is_err());
}

#[test]
fn help_flag_renders_static_help_snapshot() {
    let (code, stdout, stderr) = run_with_args([OsStr::new("hashx4"), OsStr::new("--help")], b"");

    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    assert_eq!(stdout, render_help().into_bytes());
}

#[test]
fn version_flag_renders_banner() {
    let (code, stdout, stderr) = run_with_args(["hashx4", "-V"], b"");

    assert_eq!(code, 0);
    assert!(stderr.is_empty());
    assert_eq!(stdout, render_version().into_bytes());
}

#[test]
fn hashes_stdin_with_default_engine() {
    let (code, stdout, stderr) = run_with_args(["hashx4"], b"hello world");

    assert_eq!(code, 0, "{}", String::from_utf8_lossy(&stderr));
    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        "0e7c880b1665880b0c8e880ba0785900  -\n"
    );
}

#[test]
fn single_lane_with_cookie() {
    let (code, stdout, _) = run_with_args(
        ["hashx4", "-a", "djbx33a-32-scalar", "--cookie", "01020304", "-"],
        b"abc",
    );

    assert_eq!(code, 0);
    assert_eq!(String::from_utf8(stdout).unwrap(), "8a5e8b0f  -\n");
}

#[test]
fn hashes_named_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fox.txt");
    fs::write(&path, "The quick brown fox jumps over the lazy dog").expect("write");

    let (code, stdout, _) = run_with_args(
        [OsString::from("hashx4"), OsString::from("-a"), OsString::from("ref"), path.clone().into()],
        b"",
    );

    // bare engine names are not primitive names
    assert_eq!(code, EXIT_FAILURE);
    assert!(stdout.is_empty());

    let (code, stdout, _) = run_with_args(
        [
            OsString::from("hashx4"),
            OsString::from("-a"),
            OsString::from("x4djbx33a-128-copt"),
            path.clone().into(),
        ],
        b"",
    );
    assert_eq!(code, 0);
    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        format!("d90c5f427d0dffc75717b968e0978aea  {}\n", path.display())
    );
}

#[test]
fn missing_file_reports_read_failure() {
    let (code, stdout, stderr) = run_with_args(["hashx4", "/nonexistent/hashx4-input"], b"");

    assert_eq!(code, EXIT_FAILURE);
    assert!(stdout.is_empty());
    let stderr = String::from_utf8(stderr).unwrap();
    assert!(stderr.contains("failed to read /nonexistent/hashx4-input"), "{stderr}");
}

#[test]
fn unknown_algorithm_is_reported() {
    let (code, _, stderr) = run_with_args(["hashx4", "-a", "md5"], b"");

    assert_eq!(code, EXIT_FAILURE);
    assert!(String::from_utf8(stderr).unwrap().contains("unknown hash algorithm 'md5'"));
}

#[test]
fn short_cookie_is_reported() {
    let (code, stdout, stderr) = run_with_args(["hashx4", "--cookie", "0011"], b"data");

    assert_eq!(code, EXIT_FAILURE);
    assert!(stdout.is_empty());
    assert!(String::from_utf8(stderr).unwrap().contains("cookie of 2 bytes"));
}

#[test]
fn malformed_cookie_is_reported() {
    let (code, _, stderr) = run_with_args(["hashx4", "--cookie", "xyz"], b"");

    assert_eq!(code, EXIT_FAILURE);
    assert!(String::from_utf8(stderr).unwrap().contains("invalid cookie"));
}

#[test]
fn verify_passes_when_engines_agree() {
    let input: Vec<u8> = (0..=255u8).cycle().take(3000).collect();
    let (code, stdout, stderr) = run_with_args(["hashx4", "--verify"], &input);

    assert_eq!(code, 0, "{}", String::from_utf8_lossy(&stderr));
    assert!(stderr.is_empty());
    assert_eq!(String::from_utf8(stdout).unwrap().lines().count(), 1);
}

#[test]
fn verify_input_flags_disagreement() {
    let reference = Primitive::ALL[2].hasher().expect("reference");
    let single = Primitive::ALL[0].hasher().expect("single lane");
    let mut stderr = Vec::new();

    // a 4-byte digest never equals a 16-byte one
    let agreed =
        verify_input(&[reference, single], b"abc", &[0u8; 16], "-", &mut stderr).unwrap();

    assert!(!agreed);
    assert!(String::from_utf8(stderr).unwrap().contains("disagrees with x4djbx33a-128-ref"));
}

#[test]
fn list_marks_every_primitive() {
    let (code, stdout, _) = run_with_args(["hashx4", "--list"], b"");

    assert_eq!(code, 0);
    let listing = String::from_utf8(stdout).unwrap();
    assert_eq!(listing.lines().count(), Primitive::ALL.len());
    assert!(listing.contains("x4djbx33a-128-ref"));
    assert!(
        listing
            .lines()
            .any(|line| line.starts_with("x4djbx33a-128-scalar") && !line.contains("unavailable"))
    );
    assert_eq!(listing.matches("(default)").count(), 2);
}

#[test]
fn exit_code_from_clamps_range() {
    let debug = |code: std::process::ExitCode| format!("{code:?}");
    assert_eq!(debug(exit_code_from(-5)), debug(std::process::ExitCode::from(0)));
    assert_eq!(debug(exit_code_from(2)), debug(std::process::ExitCode::from(2)));
    assert_eq!(debug(exit_code_from(1000)), debug(std::process::ExitCode::from(255)));
}
