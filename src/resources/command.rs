//! Shell command lines and the builders for every command the provisioner issues.
use std::fmt;
use std::path::Path;

/// Installer script fetched and piped to `sh` for the oh-my-zsh framework.
pub const OH_MY_ZSH_INSTALLER: &str =
    "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh";

/// A single shell command line, optionally run through `sudo`.
///
/// Rendering is deterministic: arguments are joined by single spaces and only
/// quoted when they contain characters the shell would interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    line: String,
    elevated: bool,
}

impl ShellCommand {
    /// Start a command from a program name.
    #[must_use]
    pub fn new(program: &str) -> Self {
        Self {
            line: quote(program),
            elevated: false,
        }
    }

    /// Wrap an already-formed shell line. It is passed to the shell untouched.
    #[must_use]
    pub fn raw(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            elevated: false,
        }
    }

    /// Append one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.line.push(' ');
        self.line.push_str(&quote(arg.as_ref()));
        self
    }

    /// Append every argument in order.
    #[must_use]
    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter().fold(self, |cmd, a| cmd.arg(a))
    }

    /// Append a path argument.
    #[must_use]
    pub fn path(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    /// Mark the command as requiring superuser privileges.
    #[must_use]
    pub const fn elevate(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Whether the command is prefixed with `sudo`.
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// The full line handed to `sh -c`.
    #[must_use]
    pub fn line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elevated {
            write!(f, "sudo {}", self.line)
        } else {
            f.write_str(&self.line)
        }
    }
}

/// Single-quote `s` when it contains anything outside a conservative safe set.
fn quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// `sudo pacman -Syu <packages…>` covering the whole list in one call.
#[must_use]
pub fn pacman_install<S: AsRef<str>>(packages: &[S]) -> ShellCommand {
    ShellCommand::new("pacman")
        .arg("-Syu")
        .args(packages)
        .elevate(true)
}

/// One AUR build through `yay`, answering every prompt up front.
#[must_use]
pub fn aur_install(package: &str) -> ShellCommand {
    ShellCommand::new("yay")
        .args([
            "-y",
            "-a",
            "--removemake",
            "--answerclean",
            "All",
            "--answerdiff",
            "None",
        ])
        .arg(package)
}

/// `rsync -r[v] <src> <dest>`: merges `src` into `dest` instead of nesting it.
#[must_use]
pub fn merge_directories(src: &Path, dest: &Path, verbose: bool) -> ShellCommand {
    let flags = if verbose { "-rv" } else { "-r" };
    ShellCommand::new("rsync").arg(flags).path(src).path(dest)
}

/// Shallow, quiet clone of `url` into `dir`.
#[must_use]
pub fn git_clone(url: &str, dir: &Path) -> ShellCommand {
    ShellCommand::new("git")
        .arg("clone")
        .arg(url)
        .args(["--depth", "1"])
        .path(dir)
        .arg("--quiet")
}

/// `ln -s <source> <destination>`.
#[must_use]
pub fn symlink(source: &Path, destination: &Path, elevated: bool) -> ShellCommand {
    ShellCommand::new("ln")
        .arg("-s")
        .path(source)
        .path(destination)
        .elevate(elevated)
}

/// `mv <from> <to>`, used for backups the current user cannot rename.
#[must_use]
pub fn rename(from: &Path, to: &Path, elevated: bool) -> ShellCommand {
    ShellCommand::new("mv")
        .arg("--")
        .path(from)
        .path(to)
        .elevate(elevated)
}

/// `rm -rf <path>`, used to clear a stale backup the current user cannot remove.
#[must_use]
pub fn remove_all(path: &Path, elevated: bool) -> ShellCommand {
    ShellCommand::new("rm")
        .args(["-rf", "--"])
        .path(path)
        .elevate(elevated)
}

/// Fetch an installer script and pipe it into `sh`.
#[must_use]
pub fn remote_bootstrap(url: &str) -> ShellCommand {
    ShellCommand::raw(format!(r#"sh -c "$(curl -fsSL {url})""#))
}
