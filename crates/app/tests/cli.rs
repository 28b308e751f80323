//! End to end runs of the sealpost binary

use std::path::Path;
use std::process::{Command, Output};

fn sealpost(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sealpost"))
        .current_dir(dir)
        .args(["--config", "config.toml"])
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_sign_and_verify_through_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "").unwrap();
    std::fs::write(dir.path().join("body.json"), "{\"test\":\"abcdefg\"}").unwrap();

    let printed = stdout(&sealpost(
        dir.path(),
        &["keygen", "signing-secret", "--output", "signing.key"],
    ));
    let public = printed
        .lines()
        .find_map(|line| line.strip_prefix("signing-public: "))
        .unwrap()
        .to_string();
    std::fs::write(dir.path().join("signing.pub"), &public).unwrap();

    let derived = stdout(&sealpost(
        dir.path(),
        &["public-key", "signing-secret", "signing.key"],
    ));
    assert_eq!(derived.trim(), public);

    let header = stdout(&sealpost(
        dir.path(),
        &[
            "protect", "sign", "--key", "signing.key", "--input", "body.json", "--output",
            "signed.json",
        ],
    ));
    let (name, value) = header.trim().split_once(": ").unwrap();
    assert_eq!(name, "body-signature-ed25519");

    stdout(&sealpost(
        dir.path(),
        &[
            "verify", "sign", "--key", "signing.pub", "--input", "signed.json", "--header", value,
            "--output", "verified.json",
        ],
    ));
    assert_eq!(
        std::fs::read(dir.path().join("verified.json")).unwrap(),
        b"{\"test\":\"abcdefg\"}"
    );
}

#[test]
fn test_failed_verification_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "").unwrap();
    std::fs::write(dir.path().join("body"), "payload").unwrap();

    stdout(&sealpost(
        dir.path(),
        &["keygen", "shared-authentication", "--output", "auth.key"],
    ));

    let output = sealpost(
        dir.path(),
        &[
            "verify", "auth", "--key", "auth.key", "--input", "body", "--header",
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", "--output", "out",
        ],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("authentication"));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "").unwrap();

    let printed = stdout(&sealpost(dir.path(), &["version"]));
    assert!(printed.starts_with(concat!("sealpost ", env!("CARGO_PKG_VERSION"))));
}
