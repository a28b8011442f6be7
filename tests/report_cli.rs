use std::process::{Command, Output};

fn seqdiff(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seqdiff"))
        .args(args)
        .output()
        .expect("failed to run seqdiff")
}

#[test]
fn mismatched_lengths_fail_with_message() {
    let output = seqdiff(&["--seq1", "ARND", "--seq2", "AR", "-o", "-"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Sequence 2: Sequences have different lengths"),
        "{stderr}"
    );
    assert!(!stderr.contains("Sequence 1:"), "{stderr}");
}

#[test]
fn missing_and_invalid_fields_are_all_reported() {
    let output = seqdiff(&["--seq2", "ARXD", "-o", "-", "--plain"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Sequence 1: This field is required"), "{stderr}");
    assert!(
        stderr.contains("Sequence 2: Invalid characters in sequence 2"),
        "{stderr}"
    );
}

#[test]
fn valid_pair_prints_plain_report() {
    let output = seqdiff(&["--seq1", "arnd", "--seq2", "ARGD", "-o", "-", "--plain"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "ARND\nARGD\n  ^\nlength 4, 1 difference\n"
    );
}

#[test]
fn valid_pair_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let output = seqdiff(&[
        "--seq1",
        "AR",
        "--seq2",
        "AN",
        "-o",
        path.to_str().unwrap(),
        "--plain",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Wrote comparison to"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "AR\nAN\n ^\nlength 2, 1 difference\n"
    );
}
