// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |         record / publish / citation
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            |
//!                            v
//!                        workflow
//!               Session, publish, copy_image
//!                 |          |          |
//!                 v          v          v
//!              hosting      git       catalog
//!            GitHub API  runner/sync  record/form
//!             (reqwest)   gix query   insert
//!                 |
//!                 v
//!                net   shared client, citation lookup
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod catalog;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod hosting;
pub mod logging;
pub mod net;
pub mod workflow;
