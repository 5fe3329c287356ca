//! End-to-end tests for the satchel binary

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const PROFILE_JSON: &str = r#"{
  "name": "Charlie",
  "age": 35,
  "email": "charlie@example.com",
  "phone": "123-456-7890",
  "user": {
    "profile": { "name": "Alice" },
    "roles": [{ "name": "admin" }, { "name": "ops" }]
  }
}"#;

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Command isolated from the user's home and working directory
fn satchel_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("satchel").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("SATCHEL_DIG_POLICY")
        .env_remove("SATCHEL_PRETTY")
        .arg("--compact");
    cmd
}

mod lookups {
    use super::*;

    #[test]
    fn test_get_present_key() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .arg("get")
            .arg(&file)
            .arg("email")
            .assert()
            .success()
            .stdout("\"charlie@example.com\"\n");
    }

    #[test]
    fn test_get_absent_key_prints_null() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .arg("get")
            .arg(&file)
            .arg("location")
            .assert()
            .success()
            .stdout("null\n");
    }

    #[test]
    fn test_fetch_absent_key_fails() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .arg("fetch")
            .arg(&file)
            .arg("location")
            .assert()
            .failure()
            .stderr(predicate::str::contains("key not found: \"location\""));
    }

    #[test]
    fn test_fetch_absent_key_with_default() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .args(["fetch"])
            .arg(&file)
            .args(["location", "--default", "Unknown"])
            .assert()
            .success()
            .stdout("\"Unknown\"\n");
    }

    #[test]
    fn test_has_key_and_value() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .arg("has")
            .arg(&file)
            .arg("phone")
            .assert()
            .success()
            .stdout("true\n");
        satchel_cmd(&dir)
            .arg("has")
            .arg(&file)
            .args(["35", "--value"])
            .assert()
            .success()
            .stdout("true\n");
    }
}

mod dig {
    use super::*;

    #[test]
    fn test_dig_nested_name() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .arg("dig")
            .arg(&file)
            .args(["user", "profile", "name"])
            .assert()
            .success()
            .stdout("\"Alice\"\n");
    }

    #[test]
    fn test_dig_array_index() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .arg("dig")
            .arg(&file)
            .args(["user", "roles", "-1", "name"])
            .assert()
            .success()
            .stdout("\"ops\"\n");
    }

    #[test]
    fn test_dig_missing_prints_null() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .arg("dig")
            .arg(&file)
            .args(["user", "profile", "age"])
            .assert()
            .success()
            .stdout("null\n");
    }

    #[test]
    fn test_dig_through_scalar_strict_fails() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        satchel_cmd(&dir)
            .arg("dig")
            .arg(&file)
            .args(["name", "first"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("does not support dig"));
    }

    #[test]
    fn test_dig_policy_from_project_config() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        write_fixture(dir.path(), "satchel.toml", "[dig]\npolicy = \"lenient\"\n");
        satchel_cmd(&dir)
            .arg("dig")
            .arg(&file)
            .args(["name", "first"])
            .assert()
            .success()
            .stdout("null\n");
    }

    #[test]
    fn test_dig_policy_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "profile.json", PROFILE_JSON);
        write_fixture(dir.path(), "satchel.toml", "[dig]\npolicy = \"lenient\"\n");
        satchel_cmd(&dir)
            .arg("dig")
            .arg(&file)
            .args(["name", "first", "--policy", "strict"])
            .assert()
            .failure();
    }
}

mod listings {
    use super::*;

    #[test]
    fn test_keys_in_document_order() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "h.json", r#"{"foo": 0, "bar": 1, "baz": 2}"#);
        satchel_cmd(&dir)
            .arg("keys")
            .arg(&file)
            .assert()
            .success()
            .stdout("[\"foo\",\"bar\",\"baz\"]\n");
    }

    #[test]
    fn test_values_in_document_order() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "h.json", r#"{"foo": 0, "bar": 1, "baz": 2}"#);
        satchel_cmd(&dir)
            .arg("values")
            .arg(&file)
            .assert()
            .success()
            .stdout("[0,1,2]\n");
    }

    #[test]
    fn test_pairs_from_toml() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "h.toml", "foo = 0\nbar = \"one\"\n");
        satchel_cmd(&dir)
            .arg("pairs")
            .arg(&file)
            .assert()
            .success()
            .stdout("[[\"foo\",0],[\"bar\",\"one\"]]\n");
    }

    #[test]
    fn test_pretty_output_from_config() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "h.json", r#"{"foo": 0}"#);
        write_fixture(dir.path(), "satchel.toml", "[output]\nindent = 4\n");
        Command::cargo_bin("satchel")
            .unwrap()
            .current_dir(dir.path())
            .env("HOME", dir.path())
            .env_remove("SATCHEL_PRETTY")
            .arg("values")
            .arg(&file)
            .assert()
            .success()
            .stdout("[\n    0\n]\n");
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        satchel_cmd(&dir)
            .args(["keys", "nope.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read document"));
    }

    #[test]
    fn test_non_object_root() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(dir.path(), "list.json", "[1, 2, 3]");
        satchel_cmd(&dir)
            .arg("keys")
            .arg(&file)
            .assert()
            .failure()
            .stderr(predicate::str::contains("document root must be an object"));
    }

    #[test]
    fn test_help_lists_commands() {
        let dir = TempDir::new().unwrap();
        satchel_cmd(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("dig"))
            .stdout(predicate::str::contains("fetch"))
            .stdout(predicate::str::contains("EXAMPLES"));
    }
}
