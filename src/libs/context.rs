// Per-run session state.
//
// Instead of exporting variables into the provisioner's own process, the
// session keeps an explicit PATH string and a set of environment overrides
// and applies both to every command it builds. `brew shellenv` output, the
// analytics opt-out and PATH additions made by earlier ensurers therefore
// reach later ones without touching process-wide state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{ProvisionError, Result};
use crate::libs::host::{CommandOutput, CommandSpec, Host};
use crate::schemas::workstation::WorkstationConfig;
use crate::{log_debug, log_warn};

pub struct Context<'h> {
    pub host: &'h dyn Host,
    pub config: WorkstationConfig,
    /// Resolved (tilde-expanded) shell profile path.
    pub profile_path: PathBuf,
    path: String,
    env: BTreeMap<String, String>,
    warnings: Vec<String>,
}

impl<'h> Context<'h> {
    pub fn new(
        host: &'h dyn Host,
        config: WorkstationConfig,
        path: impl Into<String>,
        profile_path: impl Into<PathBuf>,
    ) -> Self {
        Context {
            host,
            config,
            profile_path: profile_path.into(),
            path: path.into(),
            env: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// The session PATH, as seen by every command this session runs.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Puts `dir` at the front of the session PATH unless it is already a component.
    pub fn prepend_path(&mut self, dir: &Path) {
        let dir = dir.to_string_lossy();
        if path_has_component(&self.path, &dir) {
            return;
        }
        log_debug!("[Session] Prepending {} to PATH", dir);
        self.path = if self.path.is_empty() {
            dir.into_owned()
        } else {
            format!("{}:{}", dir, self.path)
        };
    }

    pub fn set_env(&mut self, key: &str, value: &str) {
        if key == "PATH" {
            self.path = value.to_string();
        } else {
            self.env.insert(key.to_string(), value.to_string());
        }
    }

    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Builds a command carrying the session PATH and environment overrides.
    pub fn command(&self, program: &str) -> CommandSpec {
        let mut spec = CommandSpec::new(program);
        for (key, value) in &self.env {
            spec = spec.env(key.as_str(), value.as_str());
        }
        spec.env("PATH", self.path.as_str())
    }

    /// Runs a command; a non-zero exit is *not* an error here.
    pub fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        log_debug!("[Session] Running: {}", cmd.display());
        self.host.run(cmd)
    }

    /// Runs a command and turns a non-zero exit into `ProvisionError::CommandFailed`.
    pub fn run_checked(&self, cmd: &CommandSpec) -> Result<CommandOutput> {
        let output = self.run(cmd)?;
        if output.success() {
            Ok(output)
        } else {
            Err(ProvisionError::CommandFailed {
                command: cmd.display(),
                code: output.code.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    /// Runs a best-effort step: any failure becomes a recorded warning.
    /// Returns whether the step succeeded.
    pub fn best_effort(&mut self, what: &str, cmd: &CommandSpec) -> bool {
        match self.run_checked(cmd) {
            Ok(_) => true,
            Err(e) => {
                self.warn(format!("{what} failed: {e}"));
                false
            }
        }
    }

    pub fn resolve(&self, program: &str) -> Option<PathBuf> {
        self.host.which(program, &self.path)
    }

    /// Resolves an executable that an install step should have provided,
    /// recording a missing-tool warning when it is not there.
    pub fn require(&mut self, program: &str) -> Option<PathBuf> {
        let resolved = self.resolve(program);
        if resolved.is_none() {
            self.warn(ProvisionError::ToolMissing(program.to_string()).to_string());
        }
        resolved
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log_warn!("{}", message);
        self.warnings.push(message);
    }

    /// Hands the warnings gathered since the last call to the pipeline.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

/// Exact PATH component match (trailing slashes ignored).
pub fn path_has_component(path: &str, dir: &str) -> bool {
    let wanted = dir.trim_end_matches('/');
    !wanted.is_empty()
        && path
            .split(':')
            .any(|component| component.trim_end_matches('/') == wanted)
}
