// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   citation, config, git, publish, record
//! ```

pub mod citation;
pub mod config;
pub mod git;
pub mod publish;
pub mod record;

#[cfg(test)]
mod tests;
