#![allow(deprecated)]

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const MARKER_START: &str = "# >>> arc-init >>>";
const MARKER_END: &str = "# <<< arc-init <<<";

/// `arc-init` with an isolated home directory and a fixed `$SHELL`
fn arc_init(home: &assert_fs::TempDir, shell: &str) -> Command {
    let mut cmd = Command::cargo_bin("arc-init").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .env("SHELL", shell)
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_shell_detects_zsh() {
    let home = assert_fs::TempDir::new().unwrap();

    arc_init(&home, "/bin/zsh")
        .arg("shell")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Shell Completions Status ==="))
        .stdout(predicate::str::contains("ZSH:"))
        .stdout(predicate::str::contains("Completions: INSTALLED"))
        .stdout(predicate::str::contains("BASH:").not());

    home.child(".zsh/completions/_arc-init")
        .assert(predicate::str::starts_with("#compdef arc-init"));
    home.child(".zshrc").assert(predicate::path::missing());

    home.close().unwrap();
}

#[test]
fn test_shell_all_writes_every_completion() {
    let home = assert_fs::TempDir::new().unwrap();

    arc_init(&home, "/bin/sh")
        .args(["shell", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BASH:"))
        .stdout(predicate::str::contains("ZSH:"))
        .stdout(predicate::str::contains("FISH:"))
        .stdout(predicate::str::contains("POWERSHELL:"));

    home.child(".config/bash/completions/arc-init.bash")
        .assert(predicate::str::contains("complete -F"));
    home.child(".zsh/completions/_arc-init")
        .assert(predicate::path::exists());
    home.child(".config/fish/completions/arc-init.fish")
        .assert(predicate::str::contains("complete -c arc-init"));
    home.child(".config/powershell/arc-init.ps1")
        .assert(predicate::str::contains("Register-ArgumentCompleter"));

    home.close().unwrap();
}

#[test]
fn test_shell_respects_xdg_config_home() {
    let home = assert_fs::TempDir::new().unwrap();
    let xdg = assert_fs::TempDir::new().unwrap();

    arc_init(&home, "/bin/sh")
        .env("XDG_CONFIG_HOME", xdg.path())
        .args(["shell", "--fish"])
        .assert()
        .success();

    xdg.child("fish/completions/arc-init.fish")
        .assert(predicate::path::exists());
    home.child(".config").assert(predicate::path::missing());

    home.close().unwrap();
    xdg.close().unwrap();
}

#[test]
fn test_shell_skip_existing_without_force() {
    let home = assert_fs::TempDir::new().unwrap();
    let completion = home.child(".config/bash/completions/arc-init.bash");
    completion.write_str("# existing content").unwrap();

    arc_init(&home, "/bin/bash")
        .arg("shell")
        .assert()
        .success()
        .stdout(predicate::str::contains("SKIPPED"))
        .stdout(predicate::str::contains("--force"));

    completion.assert("# existing content");

    home.close().unwrap();
}

#[test]
fn test_shell_force_overwrite() {
    let home = assert_fs::TempDir::new().unwrap();
    let completion = home.child(".config/bash/completions/arc-init.bash");
    completion.write_str("# existing content").unwrap();

    arc_init(&home, "/bin/bash")
        .args(["shell", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completions: INSTALLED"));

    completion.assert(predicate::str::contains("complete -F"));

    home.close().unwrap();
}

#[test]
fn test_write_rc_is_idempotent() {
    let home = assert_fs::TempDir::new().unwrap();
    let bashrc = home.child(".bashrc");
    bashrc.write_str("export FOO=bar\n").unwrap();

    arc_init(&home, "/bin/bash")
        .args(["shell", "--write-rc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RC block: ADDED"));

    arc_init(&home, "/bin/bash")
        .args(["shell", "--write-rc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RC block: SKIPPED"));

    let content = std::fs::read_to_string(bashrc.path()).unwrap();
    assert!(content.starts_with("export FOO=bar\n\n"));
    assert_eq!(content.matches(MARKER_START).count(), 1);
    assert_eq!(content.matches(MARKER_END).count(), 1);
    assert!(content.contains("$HOME/.config/bash/completions/arc-init.bash"));

    home.child(".bashrc.arc-init.bak")
        .assert("export FOO=bar\n");

    home.close().unwrap();
}

#[test]
fn test_write_rc_handles_latin1_rc_file() {
    let home = assert_fs::TempDir::new().unwrap();
    let zshrc = home.child(".zshrc");
    let original: &[u8] = b"# caf\xe9\nexport FOO=bar\n";
    zshrc.write_binary(original).unwrap();

    arc_init(&home, "/bin/zsh")
        .args(["shell", "--write-rc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RC block: ADDED"));

    arc_init(&home, "/bin/zsh")
        .args(["shell", "--uninstall-rc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RC block: REMOVED"));

    assert_eq!(std::fs::read(zshrc.path()).unwrap(), original);

    home.close().unwrap();
}

#[test]
fn test_write_rc_bash_falls_back_to_bash_profile() {
    let home = assert_fs::TempDir::new().unwrap();

    arc_init(&home, "/bin/bash")
        .args(["shell", "--write-rc"])
        .assert()
        .success();

    home.child(".bash_profile")
        .assert(predicate::str::contains(MARKER_START));
    home.child(".bashrc").assert(predicate::path::missing());

    home.close().unwrap();
}

#[test]
fn test_uninstall_rc_removes_block() {
    let home = assert_fs::TempDir::new().unwrap();
    let zshrc = home.child(".zshrc");
    zshrc.write_str("export FOO=bar\n").unwrap();

    arc_init(&home, "/bin/zsh")
        .args(["shell", "--write-rc"])
        .assert()
        .success();
    zshrc.assert(predicate::str::contains(MARKER_START));

    arc_init(&home, "/bin/zsh")
        .args(["shell", "--write-rc", "--uninstall-rc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RC block: REMOVED"));

    zshrc.assert("export FOO=bar\n");

    home.close().unwrap();
}

#[test]
fn test_uninstall_rc_missing_file_still_succeeds() {
    let home = assert_fs::TempDir::new().unwrap();

    arc_init(&home, "/bin/zsh")
        .args(["shell", "--uninstall-rc"])
        .assert()
        .success()
        .stderr(predicate::str::contains("remove zsh RC"))
        .stderr(predicate::str::contains("1 shell operation failed"));

    home.child(".zshrc").assert(predicate::path::missing());

    home.close().unwrap();
}

#[test]
fn test_write_rc_not_managed_for_fish() {
    let home = assert_fs::TempDir::new().unwrap();

    arc_init(&home, "/usr/bin/fish")
        .args(["shell", "--write-rc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RC block: NOT MANAGED"));

    home.child(".config/fish/config.fish")
        .assert(predicate::path::missing());

    home.close().unwrap();
}

#[test]
fn test_config_fallback_used_for_unknown_shell() {
    let home = assert_fs::TempDir::new().unwrap();
    home.child(".config/arc-init/config.toml")
        .write_str("[shell]\nfallback = [\"fish\"]\n")
        .unwrap();

    arc_init(&home, "/bin/sh")
        .arg("shell")
        .assert()
        .success()
        .stdout(predicate::str::contains("FISH:"))
        .stdout(predicate::str::contains("BASH:").not());

    home.close().unwrap();
}

#[test]
fn test_invalid_config_fails() {
    let home = assert_fs::TempDir::new().unwrap();
    home.child(".config/arc-init/config.toml")
        .write_str("[shell]\nfallback = [\"tcsh\"]\n")
        .unwrap();

    arc_init(&home, "/bin/zsh")
        .arg("shell")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));

    home.close().unwrap();
}

#[test]
fn test_unknown_flag_rejected() {
    Command::cargo_bin("arc-init")
        .unwrap()
        .args(["shell", "--tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
