#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for a full provisioning run.
//!
//! Each test resolves the registry through the recording executor, exactly as
//! the binary does, and drives the real runner against a temporary home.

mod common;

use common::{RecordingExecutor, TestHome};
use provision::commands::Provisioner;
use provision::error::{ExecError, ProvisionError, ResourceError};
use provision::logging::{Logger, TaskStatus};
use provision::operations::SystemFileSystemOps;
use provision::tasks::{Features, Runner};

const BIN: Features = Features {
    binaries: true,
    configuration: false,
};

const CONFIG: Features = Features {
    binaries: false,
    configuration: true,
};

// ---------------------------------------------------------------------------
// --bin
// ---------------------------------------------------------------------------

#[test]
fn bin_dry_run_prints_package_commands_in_order() {
    let home = TestHome::new();
    let overrides = home.write_overrides("");
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("dry-run", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    Provisioner::new(&registry, BIN)
        .run(&mut runner, &log)
        .unwrap();

    assert!(executor.commands().is_empty(), "dry run executes nothing");
    insta::assert_snapshot!(runner.commands().join("\n"), @r#"
    sudo pacman -Syu git-lfs zsh
    sudo pacman -Syu tmux htop
    yay -y -a --removemake --answerclean All --answerdiff None sakura
    yay -y -a --removemake --answerclean All --answerdiff None protonvpn
    sh -c "$(curl -fsSL https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh)"
    "#);
}

#[test]
fn bin_execute_runs_the_same_commands() {
    let home = TestHome::new();
    let overrides = home.write_overrides("");
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("execute", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    Provisioner::new(&registry, BIN)
        .run(&mut runner, &log)
        .unwrap();

    let issued: Vec<String> = runner.commands().iter().map(ToString::to_string).collect();
    assert_eq!(executor.commands(), issued);
    assert_eq!(
        executor
            .commands()
            .iter()
            .filter(|c| c.starts_with("yay "))
            .count(),
        2
    );
    assert!(!home.path().join("dev").exists(), "--bin never clones");
}

// ---------------------------------------------------------------------------
// --config
// ---------------------------------------------------------------------------

#[test]
fn config_execute_backs_up_then_links() {
    let home = TestHome::new();
    let overrides = home.write_overrides("");
    home.touch(".zshrc", "old zshrc");
    home.touch("bin/hx", "");
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("execute", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    Provisioner::new(&registry, CONFIG)
        .run(&mut runner, &log)
        .unwrap();

    let h = home.path().display().to_string();
    let c = home.clone_dir().display().to_string();
    let b = home.bin().display().to_string();
    assert_eq!(
        executor.commands(),
        vec![
            format!("git clone https://github.com/dhoko/dotfiles.git --depth 1 {c} --quiet"),
            format!("sudo ln -s {c}/scripts/finder {b}/finder"),
            format!("ln -s {c}/.tmux {h}/.tmux"),
            format!("ln -s {c}/.tmux.conf {h}/.tmux.conf"),
            format!("ln -s {c}/.bashrc.d {h}/.bashrc.d"),
            format!("ln -s {c}/.zshrc {h}/.zshrc"),
            format!("ln -s {c}/.vimrc {h}/.vimrc"),
            format!("sudo mv -- {b}/hx {b}/hx.back"),
            format!("sudo ln -s /usr/bin/helix {b}/hx"),
        ]
    );

    assert!(home.path().join("dev").is_dir(), "clone parent is created");
    assert_eq!(
        std::fs::read_to_string(home.path().join(".zshrc.back")).unwrap(),
        "old zshrc"
    );
    assert!(home.path().join(".zshrc").symlink_metadata().is_err());
    assert!(!home.path().join(".tmux.back").exists(), "absent destination is not renamed");
}

#[cfg(unix)]
#[test]
fn dangling_symlink_counts_as_existing() {
    let home = TestHome::new();
    let overrides = home.write_overrides("");
    std::os::unix::fs::symlink(home.path().join("gone"), home.path().join(".tmux")).unwrap();
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("execute", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    Provisioner::new(&registry, CONFIG)
        .run(&mut runner, &log)
        .unwrap();

    let backup = home.path().join(".tmux.back");
    assert!(backup.symlink_metadata().unwrap().file_type().is_symlink());
}

#[test]
fn config_dry_run_leaves_filesystem_alone() {
    let home = TestHome::new();
    let overrides = home.write_overrides("");
    home.touch(".zshrc", "old zshrc");
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("dry-run", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    Provisioner::new(&registry, CONFIG)
        .run(&mut runner, &log)
        .unwrap();

    assert!(executor.commands().is_empty());
    assert!(!home.path().join("dev").exists());
    assert!(!home.path().join(".zshrc.back").exists());
    assert_eq!(
        std::fs::read_to_string(home.path().join(".zshrc")).unwrap(),
        "old zshrc"
    );
    let link = format!(
        "ln -s {}/.zshrc {}/.zshrc",
        home.clone_dir().display(),
        home.path().display()
    );
    assert!(runner.commands().contains(&link.as_str()));
}

#[test]
fn existing_backup_aborts_by_default() {
    let home = TestHome::new();
    let overrides = home.write_overrides("");
    home.touch(".vimrc", "current");
    home.touch(".vimrc.back", "previous");
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("execute", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    let err = Provisioner::new(&registry, CONFIG)
        .run(&mut runner, &log)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::Resource(ResourceError::BackupExists(p)))
            if p == &home.path().join(".vimrc.back")
    ));
    assert_eq!(
        std::fs::read_to_string(home.path().join(".vimrc.back")).unwrap(),
        "previous"
    );
    assert!(
        executor.commands().iter().all(|c| !c.contains(".vimrc") && !c.contains("helix")),
        "nothing after the conflict runs"
    );
    assert_eq!(log.failure_count(), 1);
}

#[test]
fn overwrite_policy_replaces_old_backup() {
    let home = TestHome::new();
    let overrides = home.write_overrides("backup_policy = \"overwrite\"");
    home.touch(".vimrc", "current");
    home.touch(".vimrc.back", "previous");
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("execute", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    Provisioner::new(&registry, CONFIG)
        .run(&mut runner, &log)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(home.path().join(".vimrc.back")).unwrap(),
        "current"
    );
}

#[test]
fn skip_policy_leaves_destination_unlinked() {
    let home = TestHome::new();
    let overrides = home.write_overrides("backup_policy = \"skip\"");
    home.touch(".vimrc", "current");
    home.touch(".vimrc.back", "previous");
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("execute", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    Provisioner::new(&registry, CONFIG)
        .run(&mut runner, &log)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(home.path().join(".vimrc")).unwrap(),
        "current"
    );
    assert!(executor.commands().iter().all(|c| !c.contains(".vimrc")));
    assert!(executor.commands().iter().any(|c| c.ends_with("/hx")));
}

#[test]
fn failing_clone_aborts_before_linking() {
    let home = TestHome::new();
    let overrides = home.write_overrides("");
    let executor = RecordingExecutor::new(home.path()).failing_on("git clone");
    let settings = home.settings("execute", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    let err = Provisioner::new(&registry, CONFIG)
        .run(&mut runner, &log)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::Exec(ExecError::Failed { code: 1, .. }))
    ));
    assert_eq!(executor.commands().len(), 1);
    let entries = log.task_entries();
    assert_eq!(entries.last().unwrap().name, "clone dotfiles");
    assert_eq!(entries.last().unwrap().status, TaskStatus::Failed);
}

// ---------------------------------------------------------------------------
// No flags
// ---------------------------------------------------------------------------

#[test]
fn no_flags_is_a_no_op() {
    let home = TestHome::new();
    let overrides = home.write_overrides("");
    home.touch(".zshrc", "old zshrc");
    let executor = RecordingExecutor::new(home.path());
    let settings = home.settings("execute", &overrides);
    let registry = home.registry(&executor, &settings);
    let log = Logger::new();
    let fs = SystemFileSystemOps;
    let mut runner = Runner::new(settings.mode, &executor, &fs, &log);

    Provisioner::new(&registry, Features::default())
        .run(&mut runner, &log)
        .unwrap();

    assert!(executor.commands().is_empty());
    assert!(runner.journal().is_empty());
    assert!(!home.path().join(".zshrc.back").exists());
    assert!(
        log.task_entries()
            .iter()
            .all(|t| t.status == TaskStatus::NotApplicable)
    );
}
