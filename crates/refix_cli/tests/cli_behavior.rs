//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the refix-cache tool against
//! caches written through the library.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use refix_cache::{Cache, CacheStore, FileCache, RuleSignature, checksum};
use refix_core::RUNTIME_VERSION;

/// Helper to create a command running inside `dir`
fn refix_cache_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_refix-cache"));
    cmd.current_dir(dir.path());
    cmd
}

fn scenario_rules() -> RuleSignature {
    RuleSignature::from_json(r#"{"A": true}"#).unwrap()
}

/// Writes a config with rule `A` and a matching cache containing `entries`.
fn setup(dir: &TempDir, entries: &[(&str, &str)]) {
    dir.child(".refix.json")
        .write_str(r#"{ "rules": { "A": true } }"#)
        .unwrap();

    let mut cache = FileCache::new(RUNTIME_VERSION, false, scenario_rules());
    for (name, content) in entries {
        dir.child(name).write_str(content).unwrap();
        cache.set(name, checksum(content.as_bytes()));
    }
    CacheStore::new(dir.path().join(".refix.cache"))
        .save(&cache)
        .unwrap();
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        let dir = TempDir::new().unwrap();
        refix_cache_cmd(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        let dir = TempDir::new().unwrap();
        refix_cache_cmd(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod show_command {
    use super::*;

    #[test]
    fn prints_fingerprint_and_entries() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[("a.php", "<?php\n")]);

        refix_cache_cmd(&dir)
            .arg("show")
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "Runtime version: {}",
                RUNTIME_VERSION
            )))
            .stdout(predicate::str::contains(r#"Rules: {"A":true}"#))
            .stdout(predicate::str::contains("Entries: 1"))
            .stdout(predicate::str::contains("a.php"));
    }

    #[test]
    fn prints_json() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[("a.php", "<?php\n")]);

        let output = refix_cache_cmd(&dir)
            .args(["show", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["linting"], false);
        assert_eq!(json["rules"]["A"], true);
        assert_eq!(json["entries"]["a.php"], checksum(b"<?php\n"));
    }

    #[test]
    fn fails_without_cache() {
        let dir = TempDir::new().unwrap();

        refix_cache_cmd(&dir)
            .arg("show")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("No usable cache"));
    }
}

mod status_command {
    use super::*;

    #[test]
    fn reports_fresh() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[("a.php", "<?php\n")]);

        refix_cache_cmd(&dir)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("fresh: 1 entries"));
    }

    #[test]
    fn reports_stale_rules() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[]);
        dir.child(".refix.json")
            .write_str(r#"{ "rules": { "A": false } }"#)
            .unwrap();

        refix_cache_cmd(&dir)
            .arg("status")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("stale: rules changed"));
    }

    #[test]
    fn reports_stale_linting() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[]);
        dir.child("lint.json")
            .write_str(r#"{ "rules": { "A": true }, "linting": true }"#)
            .unwrap();

        refix_cache_cmd(&dir)
            .args(["status", "--config", "lint.json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("stale: linting changed"));
    }

    #[test]
    fn reports_cold_when_malformed() {
        let dir = TempDir::new().unwrap();
        dir.child(".refix.cache").write_binary(b"garbage").unwrap();

        refix_cache_cmd(&dir)
            .arg("status")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("cold: Corrupted cache"));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn distinguishes_fresh_and_dirty_files() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[("a.php", "<?php\n"), ("b.php", "<?php\n")]);
        dir.child("b.php").write_str("<?php echo 1;\n").unwrap();

        refix_cache_cmd(&dir)
            .args(["check", "a.php", "b.php", "new.php"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("fresh  a.php"))
            .stdout(predicate::str::contains("dirty  b.php"))
            .stdout(predicate::str::contains("dirty  new.php"));
    }

    #[test]
    fn all_fresh_exits_zero() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[("a.php", "<?php\n")]);

        refix_cache_cmd(&dir)
            .args(["check", "a.php"])
            .assert()
            .success();
    }

    #[test]
    fn stale_cache_makes_everything_dirty() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[("a.php", "<?php\n")]);
        dir.child(".refix.json")
            .write_str(r#"{ "rules": { "A": { "nested": 1 } } }"#)
            .unwrap();

        refix_cache_cmd(&dir)
            .args(["check", "a.php"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("dirty  a.php"));
    }
}

mod forget_and_clear_commands {
    use super::*;

    #[test]
    fn forget_removes_entry() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[("a.php", "<?php\n"), ("b.php", "<?php\n")]);

        refix_cache_cmd(&dir)
            .args(["forget", "a.php"])
            .assert()
            .success()
            .stdout(predicate::str::contains("forgot a.php"));

        let cache = CacheStore::new(dir.path().join(".refix.cache"))
            .load()
            .into_cache()
            .unwrap();
        assert_eq!(cache.get("a.php"), None);
        assert_eq!(cache.get("b.php"), Some(checksum(b"<?php\n")));
    }

    #[test]
    fn forget_unknown_key_exits_one() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[]);

        refix_cache_cmd(&dir)
            .args(["forget", "missing.php"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("not cached missing.php"));
    }

    #[test]
    fn clear_deletes_cache_file() {
        let dir = TempDir::new().unwrap();
        setup(&dir, &[]);

        refix_cache_cmd(&dir).arg("clear").assert().success();

        dir.child(".refix.cache").assert(predicate::path::missing());
    }

    #[test]
    fn cache_file_flag_overrides_location() {
        let dir = TempDir::new().unwrap();

        refix_cache_cmd(&dir)
            .args(["--cache-file", "elsewhere.cache", "status"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("cold: file does not exist"));
    }
}
