use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::predicate;

fn check(file_name: &str, content: &str, reader: &str) -> assert_cmd::assert::Assert {
    let file = NamedTempFile::new(file_name).unwrap();
    file.write_str(content).unwrap();
    let mut cmd = Command::cargo_bin("dynaf").unwrap();
    cmd.arg("check")
        .arg("-f")
        .arg(file.path())
        .arg("-r")
        .arg(reader)
        .arg("--logging-level")
        .arg("off");
    let assert = cmd.assert();
    file.close().unwrap();
    assert
}

#[test]
fn test_check_apx_ok() {
    check("af.apx", "arg(a).\narg(b).\natt(a,b).\n", "apx")
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_check_tgf_ok() {
    check("af.tgf", "a\nb\n#\na b\n", "tgf").success();
}

#[test]
fn test_check_apx_unknown_argument() {
    check("af.apx", "arg(a).\natt(a,b).\n", "apx").failure().code(1);
}

#[test]
fn test_check_apx_duplicate_argument() {
    check("af.apx", "arg(a).\narg(a).\n", "apx").failure().code(1);
}

#[test]
fn test_check_tgf_syntax_error() {
    check("af.tgf", "a\n#\na b c\n", "tgf").failure().code(1);
}

#[test]
fn test_check_missing_file() {
    let mut cmd = Command::cargo_bin("dynaf").unwrap();
    cmd.arg("check")
        .arg("-f")
        .arg("/this/file/does/not/exist.apx")
        .arg("--logging-level")
        .arg("off");
    cmd.assert().failure().code(1);
}
