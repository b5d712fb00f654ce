//! CLI integration tests using the REAL innorebuild binary

mod common;

use common::{TWO_ARCH_SCRIPT, TestExtraction, innorebuild_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    let temp = tempfile::TempDir::new().unwrap();
    innorebuild_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("per-architecture"))
        .stdout(predicate::str::contains("rebuild"))
        .stdout(predicate::str::contains("unpack"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_version_output() {
    let temp = tempfile::TempDir::new().unwrap();
    innorebuild_cmd(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("innorebuild"))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("x64, ARM64, x86"));
}

#[test]
fn test_completions_bash() {
    let temp = tempfile::TempDir::new().unwrap();
    innorebuild_cmd(temp.path())
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("innorebuild"));
}

#[test]
fn test_completions_unknown_shell_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    innorebuild_cmd(temp.path())
        .args(["completions", "--shell", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported shell: tcsh"));
}

#[test]
fn test_rebuild_requires_directory_argument() {
    let temp = tempfile::TempDir::new().unwrap();
    innorebuild_cmd(temp.path())
        .arg("rebuild")
        .assert()
        .failure()
        .stderr(predicate::str::contains("EXTRACTED"));
}

#[test]
fn test_inspect_lists_variants() {
    let fixture = TestExtraction::new().script(TWO_ARCH_SCRIPT);
    fixture
        .cmd()
        .args(["inspect", "setup_extracted/install_script.iss"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo Tool"))
        .stdout(predicate::str::contains("x64"))
        .stdout(predicate::str::contains("ARM64"))
        .stdout(predicate::str::contains("Common declarations: 1"));

    assert!(fixture.outputs().is_empty());
}

#[test]
fn test_inspect_json() {
    let fixture = TestExtraction::new().script(TWO_ARCH_SCRIPT);
    let output = fixture
        .cmd()
        .args(["inspect", "setup_extracted/install_script.iss", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let labels: Vec<&str> = json["variants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["x64", "ARM64"]);
    assert_eq!(json["setup"]["AppName"], "Demo Tool");
}

#[test]
fn test_inspect_missing_script_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    innorebuild_cmd(temp.path())
        .args(["inspect", "absent.iss"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Install script not found"));
}

#[test]
fn test_config_file_in_cwd_changes_prefix() {
    let fixture = TestExtraction::new()
        .script(TWO_ARCH_SCRIPT)
        .file("{app}/a.dll", "x64 payload")
        .file("{app}/readme.txt", "readme");
    std::fs::write(
        fixture.temp.path().join("innorebuild.yaml"),
        "output_prefix: Build_\n",
    )
    .unwrap();

    fixture
        .cmd()
        .args(["rebuild", "setup_extracted", "--quiet"])
        .assert()
        .success();

    assert!(fixture.temp.path().join("Build_x64/a.dll").is_file());
    assert!(fixture.temp.path().join("Build_ARM64/readme.txt").is_file());
    assert!(fixture.outputs().is_empty());
}

#[test]
fn test_explicit_config_with_extra_architecture() {
    let fixture = TestExtraction::new()
        .script(
            "[Components]\nName: rv; Description: \"RISC-V build\"\nName: x64; Description: \"x64 build\"\n\n[Files]\nSource: \"{app}\\rv.bin\"; DestDir: \"{app}\"; Components: rv\n",
        )
        .file("{app}/rv.bin", "rv");
    let config = fixture.temp.path().join("rules.yaml");
    std::fs::write(
        &config,
        "architectures:\n  - label: RISCV\n    patterns: [risc-v]\n",
    )
    .unwrap();

    fixture
        .cmd()
        .args(["--config", config.to_str().unwrap(), "rebuild", "setup_extracted", "-q"])
        .assert()
        .success();

    assert!(fixture.output("RISCV").join("rv.bin").is_file());
    assert!(fixture.output("x64").is_dir());
}

#[test]
fn test_invalid_config_is_fatal() {
    let fixture = TestExtraction::new()
        .script(TWO_ARCH_SCRIPT)
        .file("{app}/a.dll", "x64 payload");
    std::fs::write(fixture.temp.path().join("innorebuild.yaml"), "nonsense_key: 1\n").unwrap();

    fixture
        .cmd()
        .args(["rebuild", "setup_extracted"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("innorebuild.yaml"));

    assert!(fixture.outputs().is_empty());
}

#[test]
fn test_config_from_env() {
    let fixture = TestExtraction::new()
        .script(TWO_ARCH_SCRIPT)
        .file("{app}/a.dll", "x64 payload");
    let config = fixture.temp.path().join("env.yaml");
    std::fs::write(&config, "output_prefix: Env_\n").unwrap();

    fixture
        .cmd()
        .env("INNOREBUILD_CONFIG", &config)
        .args(["rebuild", "setup_extracted", "-q"])
        .assert()
        .success();

    assert!(fixture.temp.path().join("Env_x64/a.dll").is_file());
}

#[test]
fn test_log_file_receives_events() {
    let fixture = TestExtraction::new()
        .script(TWO_ARCH_SCRIPT)
        .file("{app}/a.dll", "x64 payload");
    let log = fixture.temp.path().join("run.log");

    fixture
        .cmd()
        .args(["-v", "--log-file", log.to_str().unwrap(), "rebuild", "setup_extracted"])
        .assert()
        .success();

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("parsing install script"));
    assert!(!text.contains('\u{1b}'));
}

#[cfg(unix)]
#[test]
fn test_unpack_with_fake_innounp() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::TempDir::new().unwrap();
    let unpacker = temp.path().join("fake-innounp");
    std::fs::write(
        &unpacker,
        "#!/bin/sh\nmkdir -p '{app}'\necho x > '{app}/a.dll'\necho r > '{app}/readme.txt'\ncat > install_script.iss <<'ISS'\n[Components]\nName: x64; Description: \"x64\"\nName: arm64; Description: \"ARM64\"\n[Files]\nSource: \"{app}\\a.dll\"; DestDir: \"{app}\"; Components: x64\nSource: \"{app}\\readme.txt\"; DestDir: \"{app}\"\nISS\n",
    )
    .unwrap();
    std::fs::set_permissions(&unpacker, std::fs::Permissions::from_mode(0o755)).unwrap();
    std::fs::write(temp.path().join("tool-setup.exe"), "MZ").unwrap();

    innorebuild_cmd(temp.path())
        .args(["unpack", "tool-setup.exe", "--innounp"])
        .arg(&unpacker)
        .arg("-q")
        .assert()
        .success();

    let staging: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with("tmp_tool-setup_"))
        })
        .collect();
    assert_eq!(staging.len(), 1);
    let staging = &staging[0];
    assert!(staging.join("tool-setup_extracted/{app}/a.dll").is_file());
    assert!(staging.join("Output_x64/a.dll").is_file());
    assert!(staging.join("Output_ARM64/readme.txt").is_file());
    assert!(!staging.join("Output_ARM64/a.dll").exists());
    assert!(temp.path().join("tool-setup.exe").is_file());
}

#[test]
fn test_unpack_without_unpacker_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    std::fs::write(temp.path().join("tool-setup.exe"), "MZ").unwrap();

    innorebuild_cmd(temp.path())
        .args(["unpack", "tool-setup.exe", "--innounp", "missing-innounp.exe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unpacker executable not found"));
}
