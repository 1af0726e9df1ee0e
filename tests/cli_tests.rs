use std::process::{Command, Output};

fn pl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pl"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn cli_show_prints_program_and_type() {
    let output = pl(&["show", "maximum"]);
    assert!(output.status.success());
    assert!(stdout(&output).ends_with(": Num\n"), "{}", stdout(&output));
}

#[test]
fn cli_show_ill_typed_sample_fails() {
    let output = pl(&["show", "ill-typed-addition"]);
    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("type mismatch in addition"),
        "{}",
        stderr(&output)
    );
    assert!(!stdout(&output).contains("type mismatch"));
}

#[test]
fn cli_run_prints_typed_result() {
    let output = pl(&["run", "range-sum"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "55 : Num\n");
}

#[test]
fn cli_unknown_sample_fails() {
    let output = pl(&["run", "no-such-sample"]);
    assert!(!output.status.success());
}
