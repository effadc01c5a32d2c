use assert_cmd::prelude::*;
use predicates::str::{contains, diff, is_empty};
use std::process::Command;

fn ls8() -> Command {
    let mut cmd = Command::cargo_bin("ls8").unwrap();
    cmd.env_remove("LS8_TRACE");
    cmd
}

#[test]
fn runs_without_arguments() {
    ls8().assert().success();
}

#[test]
fn prints_eight() {
    ls8()
        .args(["run", "tests/files/print8.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("8\n"))
        .stderr(is_empty());
}

#[test]
fn runs_path_shorthand() {
    ls8()
        .arg("tests/files/print8.ls8")
        .assert()
        .success()
        .stdout(diff("8\n"))
        .stderr(contains("Halted"));
}

#[test]
fn runs_binary_image() {
    ls8()
        .args(["run", "tests/files/print8.bin", "--minimal"])
        .assert()
        .success()
        .stdout(diff("8\n"));
}

#[test]
fn multiplies() {
    ls8()
        .args(["run", "tests/files/mult.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("90\n"));
}

#[test]
fn multiplication_wraps() {
    ls8()
        .args(["run", "tests/files/wrap.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("64\n"));
}

#[test]
fn unknown_instruction_halts() {
    ls8()
        .args(["run", "tests/files/unknown.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(is_empty())
        .stderr(contains("Unknown instruction 0b11111111 at address 0x00"));
}

#[test]
fn fault_exits_with_failure() {
    ls8()
        .args(["run", "tests/files/bad_register.ls8", "--minimal"])
        .assert()
        .failure()
        .stdout(is_empty())
        .stderr(contains("runtime::register"));

    // An unknown opcode only halts the machine
    ls8()
        .args(["run", "tests/files/unknown.ls8", "--minimal"])
        .assert()
        .code(0);
}

#[test]
fn traces_with_flag() {
    ls8()
        .args(["run", "tests/files/print8.ls8", "--minimal", "--trace"])
        .assert()
        .success()
        .stdout(diff("8\n"))
        .stderr(contains("TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4"))
        .stderr(contains("TRACE: 05 | 01 00 00 | 08 00 00 00 00 00 00 F4"));
}

#[test]
fn traces_with_env() {
    ls8()
        .env("LS8_TRACE", "1")
        .args(["run", "tests/files/mult.ls8", "--minimal"])
        .assert()
        .success()
        .stdout(diff("90\n"))
        .stderr(contains("TRACE: 06 | A2 00 01 | 09 0A 00 00 00 00 00 F4"));
}

#[test]
fn rejects_bad_digit() {
    ls8()
        .args(["run", "tests/files/bad_digit.ls8", "--minimal"])
        .assert()
        .failure()
        .stdout(is_empty())
        .stderr(contains("load::bad_digit"));
}

#[test]
fn rejects_unknown_extension() {
    ls8()
        .args(["run", "tests/integration_tests.rs"])
        .assert()
        .failure()
        .stderr(contains("unknown extension"));
}

#[test]
fn checks_without_running() {
    ls8()
        .args(["check", "tests/files/mult.ls8"])
        .assert()
        .success()
        .stdout(is_empty())
        .stderr(contains("12 bytes, no errors found!"));

    ls8()
        .args(["check", "tests/files/bad_digit.ls8"])
        .assert()
        .failure();
}
