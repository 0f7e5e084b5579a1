// The single seam through which the provisioner touches the machine:
// spawning commands, resolving executables, probing and writing files and
// creating symlinks. Installers never call `std::process::Command` or
// `std::fs` directly; they go through a `Host`, which lets the tests swap
// in the recording `fake::FakeHost`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::errors::{ProvisionError, Result};
use crate::log_debug;

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    /// When set, stdout/stderr go straight to the terminal instead of being captured.
    /// Used for long installs so the user sees the tool's own progress output.
    pub inherit_output: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            inherit_output: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets (or replaces) an environment variable for this command only.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.envs.retain(|(k, _)| *k != key);
        self.envs.push((key, value.into()));
        self
    }

    pub fn inherit_output(mut self) -> Self {
        self.inherit_output = true;
        self
    }

    /// Human-readable command line, used in logs and error messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// What came back from a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Side-effect capability used by every installer.
pub trait Host {
    /// Runs a command to completion. `Err` only when the process could not be started.
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput>;
    /// Resolves `program` against the given PATH string.
    fn which(&self, program: &str, path: &str) -> Option<PathBuf>;
    fn exists(&self, path: &Path) -> bool;
    /// Reads a file, `Ok(None)` when it does not exist.
    fn read_to_string(&self, path: &Path) -> Result<Option<String>>;
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
    fn symlink(&self, original: &Path, link: &Path) -> Result<()>;
}

/// The real machine.
#[derive(Debug, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        log_debug!("[Host] Executing: {}", cmd.display());

        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);
        for (key, value) in &cmd.envs {
            command.env(key, value);
        }

        if cmd.inherit_output {
            let status = command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|source| ProvisionError::Spawn {
                    program: cmd.program.clone(),
                    source,
                })?;
            return Ok(CommandOutput {
                code: status.code(),
                ..CommandOutput::default()
            });
        }

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProvisionError::Spawn {
                program: cmd.program.clone(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !result.stdout.is_empty() {
            log_debug!("[Host] Stdout: {}", result.stdout.trim_end());
        }
        if !result.stderr.is_empty() {
            log_debug!("[Host] Stderr: {}", result.stderr.trim_end());
        }
        Ok(result)
    }

    fn which(&self, program: &str, path: &str) -> Option<PathBuf> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        which::which_in(program, Some(path), cwd).ok()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ProvisionError::io(path, e)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ProvisionError::io(parent, e))?;
            }
        }
        fs::write(path, contents).map_err(|e| ProvisionError::io(path, e))
    }

    #[cfg(unix)]
    fn symlink(&self, original: &Path, link: &Path) -> Result<()> {
        std::os::unix::fs::symlink(original, link).map_err(|e| ProvisionError::io(link, e))
    }

    #[cfg(not(unix))]
    fn symlink(&self, _original: &Path, link: &Path) -> Result<()> {
        Err(ProvisionError::io(
            link,
            std::io::Error::new(std::io::ErrorKind::Unsupported, "symlinks need a unix host"),
        ))
    }
}
