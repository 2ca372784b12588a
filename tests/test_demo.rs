use assert_cmd::Command;
use predicates::prelude::predicate;

#[test]
fn test_demo() {
    let expected = r#"step 1: empty framework
  expected: {}
  computed: {}
step 2: +arg(a) +arg(b) +att(a,b)
  expected: {} {a}
  computed: {} {a}
step 3: +arg(c)
  expected: {} {a} {c} {a,c}
  computed: {} {a} {c} {a,c}
step 4: +att(c,a)
  expected: {} {c} {b,c}
  computed: {} {c} {b,c}
"#;
    let mut cmd = Command::cargo_bin("dynaf").unwrap();
    cmd.arg("demo").arg("--logging-level").arg("off");
    cmd.assert().success().stdout(predicate::eq(expected));
}
