// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Synchronous git command runner.
//!
//! ```text
//! run(args, cwd)
//!      |
//!      v
//! git [auth -c args] <args>      cwd applied to the child only
//!   env GIT_TERMINAL_PROMPT=0
//!   env GCM_INTERACTIVE=never
//!   env <runner env> <auth env>
//!      |
//!      v
//! CommandOutput { status, stdout, stderr }
//!      |
//!      +-- run            non-zero exit is a value
//!      +-- run_checked    non-zero exit -> GitError::Transport
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

use super::credentials::{AuthContext, CredentialProvider};
use crate::config::types::AuthHelper;
use crate::error::{GitError, HubResult, ProcessError};

/// Exit status and captured output of one git call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `-1` when the child was terminated by a signal.
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.status == 0
    }

    /// Convert a non-zero exit into `GitError::Transport`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Transport` naming `command` if the call failed.
    pub fn check(self, command: impl Into<String>) -> HubResult<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(GitError::Transport {
            command: command.into(),
            code: self.status,
            stderr: self.stderr.trim().to_string(),
        }
        .into())
    }
}

/// Runs `git` as a child process.
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: PathBuf,
    env: Vec<(OsString, OsString)>,
    helper: AuthHelper,
}

impl GitRunner {
    /// Locate `git` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if git is not installed.
    pub fn new() -> HubResult<Self> {
        let program = which::which("git").map_err(|_| ProcessError::ExecutableNotFound {
            name: "git".to_string(),
        })?;
        Ok(Self::with_program(program))
    }

    /// Use a specific git executable.
    #[must_use]
    pub const fn with_program(program: PathBuf) -> Self {
        Self {
            program,
            env: Vec::new(),
            helper: AuthHelper::Environment,
        }
    }

    /// Add an environment variable to every call made by this runner.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Choose how `run_authenticated` hands credentials to git.
    #[must_use]
    pub const fn with_auth_helper(mut self, helper: AuthHelper) -> Self {
        self.helper = helper;
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub const fn auth_helper(&self) -> AuthHelper {
        self.helper
    }

    /// Run `git <args>` in `cwd`.
    ///
    /// A non-zero exit is returned as a value, not an error.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if git cannot be started.
    pub fn run<S: AsRef<OsStr>>(&self, args: &[S], cwd: &Path) -> HubResult<CommandOutput> {
        self.execute(args, cwd, None)
    }

    /// Run `git <args>` in `cwd`, treating a non-zero exit as an error.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if git cannot be started, or
    /// `GitError::Transport` if it exits non-zero.
    pub fn run_checked<S: AsRef<OsStr>>(&self, args: &[S], cwd: &Path) -> HubResult<CommandOutput> {
        self.execute(args, cwd, None)?.check(command_line(args))
    }

    /// Run `git <args>` in `cwd` with credentials from `provider`.
    ///
    /// The authentication responder exists only for this call.
    ///
    /// # Errors
    ///
    /// Returns a `CredentialError` if the responder cannot be set up, or
    /// `ProcessError::SpawnFailed` if git cannot be started.
    pub fn run_authenticated<S: AsRef<OsStr>>(
        &self,
        args: &[S],
        cwd: &Path,
        provider: &dyn CredentialProvider,
    ) -> HubResult<CommandOutput> {
        let auth = AuthContext::prepare(self.helper, provider)?;
        self.run_with_auth(args, cwd, &auth)
    }

    /// Run `git <args>` in `cwd` using an already prepared [`AuthContext`].
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if git cannot be started.
    pub fn run_with_auth<S: AsRef<OsStr>>(
        &self,
        args: &[S],
        cwd: &Path,
        auth: &AuthContext,
    ) -> HubResult<CommandOutput> {
        self.execute(args, cwd, Some(auth))
    }

    fn execute<S: AsRef<OsStr>>(
        &self,
        args: &[S],
        cwd: &Path,
        auth: Option<&AuthContext>,
    ) -> HubResult<CommandOutput> {
        let cmd_line = command_line(args);
        debug!(cwd = %cwd.display(), cmd = %cmd_line, authenticated = auth.is_some(), "exec");

        let mut command = Command::new(&self.program);
        if let Some(auth) = auth {
            command.args(auth.config_args());
        }
        command
            .args(args)
            .current_dir(cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never")
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null());
        if let Some(auth) = auth {
            command.envs(auth.envs());
        }

        let output = command
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        let result = CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        trace!(
            cmd = %cmd_line,
            status = result.status,
            stdout = %result.stdout.trim(),
            stderr = %result.stderr.trim(),
            "completed"
        );
        Ok(result)
    }
}

fn command_line<S: AsRef<OsStr>>(args: &[S]) -> String {
    let mut line = String::from("git");
    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        line.push(' ');
        if arg.contains(' ') {
            line.push('"');
            line.push_str(&arg);
            line.push('"');
        } else {
            line.push_str(&arg);
        }
    }
    line
}
