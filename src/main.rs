// mrhub-submit: MR-Hub catalog submission tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Record | CheckGit | Publish | Citation | Clean | Config
//! ```

use anyhow::Context;
use std::process::ExitCode;

use mrhub_submit::cli::global::GlobalOptions;
use mrhub_submit::cli::{self, Command};
use mrhub_submit::cmd::citation::run_citation_command;
use mrhub_submit::cmd::config::{run_inis_command, run_options_command};
use mrhub_submit::cmd::git::{run_check_git_command, run_clean_command};
use mrhub_submit::cmd::publish::run_publish_command;
use mrhub_submit::cmd::record::run_record_command;
use mrhub_submit::config::Config;
use mrhub_submit::config::loader::ConfigLoader;
use mrhub_submit::error::Result;
use mrhub_submit::logging::init_logging;
use mrhub_submit::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    // Config failures are reported by the commands that need it; logging
    // then falls back to the CLI flags alone.
    let config = load_config(&cli.global);
    let log_config = config
        .as_ref()
        .map_or_else(|_| build_log_config(&cli.global), |c| c.global.log_config());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => {
            let loader = ConfigLoader::standard(&cli.global.configs);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Record(args)) => run_record_command(args),
        Some(Command::CheckGit) => config.and_then(|config| run_check_git_command(&config)),
        Some(Command::Publish(args)) => match config {
            Ok(config) => run_publish_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Citation(args)) => match config {
            Ok(config) => run_citation_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Clean(args)) => config.and_then(|config| run_clean_command(args, &config)),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    ConfigLoader::standard(&global.configs)
        .apply_overrides(global.to_config_overrides())?
        .build()
        .context("failed to load config")
}
