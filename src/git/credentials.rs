// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Credential injection for authenticated git calls.
//!
//! ```text
//! CredentialProvider (username, secret)
//!        |
//!        v
//! AuthContext::prepare(helper, provider)
//!        |
//!        +-- Environment: -c credential.helper=
//!        |                -c credential.helper=!f() { ... }; f
//!        |                env MRHUB_GIT_USERNAME / MRHUB_GIT_PASSWORD
//!        |
//!        +-- Script:      GIT_ASKPASS=<tempdir>/askpass(.sh|.bat)
//!                         env MRHUB_GIT_USERNAME / MRHUB_GIT_PASSWORD
//!                         tempdir removed when the context drops
//! ```
//!
//! Credentials only ever travel through the child's environment. Neither the
//! argument list nor the askpass script contains them.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::trace;

use crate::config::types::AuthHelper;
use crate::error::{CredentialError, HubResult};

/// Child environment variable carrying the git username.
pub const USERNAME_VAR: &str = "MRHUB_GIT_USERNAME";
/// Child environment variable carrying the password or token.
pub const PASSWORD_VAR: &str = "MRHUB_GIT_PASSWORD";

const INLINE_HELPER: &str = "credential.helper=!f() { test \"$1\" = get || exit 0; \
    echo \"username=${MRHUB_GIT_USERNAME}\"; echo \"password=${MRHUB_GIT_PASSWORD}\"; }; f";

const POSIX_ASKPASS: &str = "#!/bin/sh
case \"$1\" in
  Username*) printf '%s\\n' \"$MRHUB_GIT_USERNAME\" ;;
  Password*) printf '%s\\n' \"$MRHUB_GIT_PASSWORD\" ;;
esac
";

const WINDOWS_ASKPASS: &str = "@echo off\r
set arg=%~1\r
if \"%arg:~0,8%\"==\"Username\" echo %MRHUB_GIT_USERNAME%\r
if \"%arg:~0,8%\"==\"Password\" echo %MRHUB_GIT_PASSWORD%\r
";

/// Something that can answer git's username and password prompts.
pub trait CredentialProvider {
    /// Username presented to git.
    fn username(&self) -> &str;

    /// Password or token presented to git.
    fn secret(&self) -> &str;
}

/// Askpass script living in its own temporary directory.
struct AskpassScript {
    // Dropping the directory removes the script.
    _dir: TempDir,
    path: PathBuf,
}

impl AskpassScript {
    fn create() -> Result<Self, CredentialError> {
        let (file_name, body) = script_template()?;
        let dir = tempfile::Builder::new()
            .prefix("mrhub-askpass-")
            .tempdir()
            .map_err(CredentialError::HelperSetup)?;
        let path = dir.path().join(file_name);
        std::fs::write(&path, body).map_err(CredentialError::HelperSetup)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o700))
                .map_err(CredentialError::HelperSetup)?;
        }

        trace!(script = %path.display(), "askpass script created");
        Ok(Self { _dir: dir, path })
    }
}

fn script_template() -> Result<(&'static str, &'static str), CredentialError> {
    if cfg!(unix) {
        Ok(("askpass.sh", POSIX_ASKPASS))
    } else if cfg!(windows) {
        Ok(("askpass.bat", WINDOWS_ASKPASS))
    } else {
        Err(CredentialError::UnsupportedPlatform {
            os: std::env::consts::OS.to_string(),
        })
    }
}

/// Extra arguments and environment enabling one authenticated git call.
///
/// Keep the context alive until the child exits; in script mode dropping it
/// deletes the askpass script.
pub struct AuthContext {
    config_args: Vec<String>,
    env: Vec<(&'static str, OsString)>,
    script: Option<AskpassScript>,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("config_args", &self.config_args)
            .field("env", &self.env.iter().map(|(k, _)| *k).collect::<Vec<_>>())
            .field("script", &self.script_path())
            .finish()
    }
}

impl AuthContext {
    /// Build the context for `helper`.
    ///
    /// # Errors
    ///
    /// Returns a `CredentialError` if the askpass script cannot be created, or
    /// if script mode is requested on an unsupported operating system.
    pub fn prepare(helper: AuthHelper, provider: &dyn CredentialProvider) -> HubResult<Self> {
        let mut env = vec![
            (USERNAME_VAR, OsString::from(provider.username())),
            (PASSWORD_VAR, OsString::from(provider.secret())),
        ];

        match helper {
            AuthHelper::Environment => Ok(Self {
                config_args: vec![
                    "-c".to_string(),
                    "credential.helper=".to_string(),
                    "-c".to_string(),
                    INLINE_HELPER.to_string(),
                ],
                env,
                script: None,
            }),
            AuthHelper::Script => {
                let script = AskpassScript::create()?;
                env.push(("GIT_ASKPASS", script.path.clone().into_os_string()));
                Ok(Self {
                    // Stored helpers would answer before the askpass prompt.
                    config_args: vec!["-c".to_string(), "credential.helper=".to_string()],
                    env,
                    script: Some(script),
                })
            }
        }
    }

    /// Arguments to place before the git subcommand.
    #[must_use]
    pub fn config_args(&self) -> &[String] {
        &self.config_args
    }

    /// Environment variables to set on the child.
    pub fn envs(&self) -> impl Iterator<Item = (&'static str, &OsString)> {
        self.env.iter().map(|(k, v)| (*k, v))
    }

    /// Location of the askpass script, in script mode.
    #[must_use]
    pub fn script_path(&self) -> Option<&Path> {
        self.script.as_ref().map(|s| s.path.as_path())
    }
}
