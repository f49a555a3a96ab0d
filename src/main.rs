// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scopedeck CLI entrypoint.
//!
//! Runs the terminal launchpad against the built-in demo studio. `--check`
//! resolves the studio once without a terminal and prints what it found.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use scopedeck::app::Launchpad;
use scopedeck::backend::BackendRegistry;
use scopedeck::busy::BusyFilter;
use scopedeck::config::{AppConfig, ConfigError};
use scopedeck::demo::DemoResolver;
use scopedeck::resolver::ResolverHandle;
use scopedeck::tui::{self, TuiTheme};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_new(&config.log_filter)?;
    if config.check {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    if let Some(parent) = config.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|err| format!("cannot open log file {}: {err}", config.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

fn demo_resolver(work_dir: Option<&Path>) -> DemoResolver {
    work_dir.map_or_else(DemoResolver::default, DemoResolver::new)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "scopedeck".to_owned());

        let config = match AppConfig::from_env(args) {
            Ok(config) => config,
            Err(ConfigError::HelpRequested) => {
                println!("{}", AppConfig::usage(&program));
                return Ok(());
            }
            Err(err) => {
                eprintln!("{program}: {err}\n\n{}", AppConfig::usage(&program));
                std::process::exit(2);
            }
        };
        init_logging(&config)?;
        let resolver = demo_resolver(config.work_dir.as_deref());
        info!(
            backends = ?config.backends,
            work_root = %resolver.work_root().display(),
            "starting"
        );

        if config.check {
            for line in resolver.check(&config.backends)? {
                println!("{line}");
            }
            return Ok(());
        }

        let theme = TuiTheme::from_palette(config.palette.as_deref())?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let launchpad = Launchpad::new(
            ResolverHandle::spawning(Arc::new(resolver), runtime.handle().clone()),
            BackendRegistry::with_defaults(),
            BusyFilter::shared(),
        );
        tui::run(launchpad, theme, &config.backends)
    })();

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
