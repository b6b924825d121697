// Copyright 2026 Pagevault Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, unused_imports)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod address;
mod archive;
mod cli;
mod config;
mod error;
mod fetch;
mod normalize;
mod renderer;
mod rest;
mod saver;

#[derive(Parser)]
#[command(
    name = "pagevault",
    about = "Pagevault — archive URLs as rendered HTML, PDF, screenshot, or raw-file snapshots",
    version,
    after_help = "Run 'pagevault <command> --help' for details on each command."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the archive server
    Serve {
        /// Port for the HTTP API
        #[arg(long)]
        port: Option<u16>,
        /// Root directory for archived artifacts
        #[arg(long)]
        archive_dir: Option<PathBuf>,
        /// Public base URL for artifact links
        #[arg(long)]
        public_url: Option<String>,
        /// Maximum simultaneous archive sessions
        #[arg(long)]
        concurrency: Option<usize>,
        /// Per-file size ceiling in bytes
        #[arg(long)]
        max_bytes: Option<u64>,
        /// Browser navigation timeout in milliseconds
        #[arg(long)]
        nav_timeout_ms: Option<u64>,
    },
    /// Archive a single URL and print the artifact record as JSON
    Archive {
        /// URL to archive
        url: String,
        /// Root directory for archived artifacts
        #[arg(long)]
        archive_dir: Option<PathBuf>,
        /// Browser navigation timeout in milliseconds
        #[arg(long)]
        nav_timeout_ms: Option<u64>,
    },
    /// Check environment readiness (Chromium, archive root)
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            archive_dir,
            public_url,
            concurrency,
            max_bytes,
            nav_timeout_ms,
        } => {
            let mut cfg = config::Config::from_env();
            if let Some(p) = port {
                cfg.port = p;
                cfg.public_base_url = format!("http://localhost:{p}");
            }
            if let Some(dir) = archive_dir {
                cfg.archive_root = dir;
            }
            if let Some(base) = public_url {
                cfg.public_base_url = base;
            }
            if let Some(n) = concurrency {
                cfg.max_concurrent = n.max(1);
            }
            if let Some(max) = max_bytes {
                cfg.max_content_length = max;
            }
            if let Some(ms) = nav_timeout_ms {
                cfg.nav_timeout_ms = ms;
            }
            cli::serve::run(cfg).await
        }
        Commands::Archive {
            url,
            archive_dir,
            nav_timeout_ms,
        } => {
            let mut cfg = config::Config::from_env();
            if let Some(dir) = archive_dir {
                cfg.archive_root = dir;
            }
            if let Some(ms) = nav_timeout_ms {
                cfg.nav_timeout_ms = ms;
            }
            cli::archive_cmd::run(&url, cfg).await
        }
        Commands::Doctor => cli::doctor::run().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "pagevault", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    result
}
