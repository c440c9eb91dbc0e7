//! CLI tests against the built binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use crate::helpers::*;

/// Run aciextract with HOME pointed at `home` so no user config is read.
fn aciextract(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aciextract").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("ACIEXTRACT_LOG")
        .env_remove("XDG_CONFIG_HOME")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn help_lists_the_commands() {
    let home = TempDir::new().unwrap();
    aciextract(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("sections"))
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("completions").not());
}

#[test]
fn extract_prints_the_whole_configuration() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    let output = aciextract(&home).arg("extract").arg(&backup).output().unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["fabric_details"]["fabric_initialization"]["fabric_name"], "Fab1");
    assert_eq!(value["fabric_details"]["fabric_inventory"]["Leaf101"]["ip"], "192.168.1.101/24");
    assert!(String::from_utf8_lossy(&output.stdout).contains("\n    \"backup_file\""));
}

#[test]
fn extract_selects_a_section() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    let output = aciextract(&home)
        .arg("extract")
        .arg(&backup)
        .args(["--section", "system_settings.bgp", "--indent", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.starts_with("{\n  \"bgp_policy_name\": \"default\""));
    assert_eq!(stdout_json(&output)["bgp_route_reflectors"][0], "pod-1/spine-201");
}

#[test]
fn extract_selects_a_section_by_json_pointer() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    let output = aciextract(&home)
        .arg("extract")
        .arg(&backup)
        .args(["--section", "/fabric_details/fabric_inventory/Leaf101/ip"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), "192.168.1.101/24");
}

#[test]
fn extract_unknown_section_fails() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    aciextract(&home)
        .arg("extract")
        .arg(&backup)
        .args(["--section", "fabric_details.nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No section 'fabric_details.nothing'"));
}

#[test]
fn extract_write_replaces_config_json_in_working_directory() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);
    let work = TempDir::new().unwrap();
    std::fs::write(work.path().join("config.json"), "old").unwrap();

    aciextract(&home)
        .current_dir(work.path())
        .arg("extract")
        .arg(&backup)
        .arg("--write")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote config.json"));

    let written = std::fs::read_to_string(work.path().join("config.json")).unwrap();
    let value: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["tenants"][0]["attributes"]["name"], "common");
}

#[test]
fn extract_output_file_from_config() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("aciextract");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[output]\nfile = \"fabric.json\"\nindent = 2\n",
    )
    .unwrap();
    let backup = sample_archive(&home);
    let work = TempDir::new().unwrap();

    aciextract(&home)
        .current_dir(work.path())
        .arg("extract")
        .arg(&backup)
        .args(["--write", "--section", "backup_file"])
        .assert()
        .success();

    let written = std::fs::read_to_string(work.path().join("fabric.json")).unwrap();
    assert!(written.trim_end().ends_with(".tar.gz\""));
}

#[test]
fn xml_backup_is_rejected() {
    let home = TempDir::new().unwrap();
    let backup = write_raw_backup(
        &home,
        "legacy.tar",
        &tar_bytes(&[("legacy_1.xml", b"<polUni/>".to_vec())]),
    );

    aciextract(&home)
        .arg("extract")
        .arg(&backup)
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML backup parsing is not supported"));
}

#[test]
fn sections_lists_counts() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    aciextract(&home)
        .arg("sections")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("fabric_details\n"))
        .stdout(predicate::str::contains("  fabric_inventory"))
        .stdout(predicate::str::is_match(r"(?m)^tenants\s+1$").unwrap());
}

#[test]
fn keys_reports_sources_and_strictness() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    aciextract(&home)
        .arg("keys")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^fvTenant\s+1  ce2_defaultOneTime_1\.json$").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^vmmProvP\s+0  -$").unwrap());

    aciextract(&home)
        .arg("keys")
        .arg(&backup)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not locate key"));
}

#[test]
fn query_walks_a_key_path() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    let output = aciextract(&home)
        .arg("query")
        .arg(&backup)
        .args(["infraInfra", "infraFuncP", "infraAccBndlGrp"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["attributes"]["lagT"], "node");
}

#[test]
fn query_reports_unwalkable_paths_and_unknown_roots() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    aciextract(&home)
        .arg("query")
        .arg(&backup)
        .args(["infraInfra", "fvnsVlanInstP", "fvnsEncapBlk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot walk infraInfra/fvnsVlanInstP/fvnsEncapBlk"));

    aciextract(&home)
        .arg("query")
        .arg(&backup)
        .args(["fvAp", "fvAEPg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown root key: 'fvAp'"));
}

#[test]
fn config_path_and_show() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join(".config").join("aciextract").join("config.toml");

    aciextract(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));

    aciextract(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[output]"))
        .stdout(predicate::str::contains("file = \"config.json\""))
        .stdout(predicate::str::contains("indent = 4"))
        .stdout(predicate::str::contains("max_document_mb = 512"));
}

#[test]
fn invalid_indent_is_rejected() {
    let home = TempDir::new().unwrap();
    let backup = sample_archive(&home);

    aciextract(&home)
        .arg("extract")
        .arg(&backup)
        .args(["--indent", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("output.indent must be > 0"));
}

#[test]
fn completions_generate_a_script() {
    let home = TempDir::new().unwrap();
    aciextract(&home)
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aciextract"));
}
