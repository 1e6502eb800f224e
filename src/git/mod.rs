// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!              sync.rs
//!   clone_fork  track_upstream  create_branch
//!   stage  commit_all  push_branch  ensure_git_identity
//!         |                        |
//!         v                        v
//!     runner.rs                query.rs
//!   GitRunner (git CLI)      gix (read-only)
//!   run / run_checked        is_work_tree
//!   run_authenticated        current_branch
//!         |
//!         v
//!   credentials.rs
//!   AuthContext: inline credential.helper | askpass script
//! ```
//!
//! **`GitRunner`**: git CLI for every write, captured output, never changes
//! the parent's working directory.
//! **`query`**: pure Rust, no subprocess, read-only.

pub mod credentials;
pub mod query;
pub mod runner;
pub mod sync;

pub use credentials::CredentialProvider;
pub use runner::{CommandOutput, GitRunner};
