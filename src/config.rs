// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Startup configuration from command-line flags and environment variables.
//!
//! Flags win over the environment. Unset values fall back to the defaults
//! below.

use std::fmt;
use std::path::PathBuf;

use crate::backend::{AssetsBackend, ProfilesBackend};

pub const BACKENDS_ENV: &str = "SCOPEDECK_BACKENDS";
pub const LOG_ENV: &str = "SCOPEDECK_LOG";
pub const PALETTE_ENV: &str = "SCOPEDECK_TUI_PALETTE";

pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_LOG_FILE: &str = "scopedeck.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    HelpRequested,
    UnknownArgument(String),
    MissingValue(&'static str),
    DuplicateFlag(&'static str),
    EmptyBackendName,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HelpRequested => f.write_str("help requested"),
            Self::UnknownArgument(arg) => write!(f, "unknown argument {arg:?}"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::DuplicateFlag(flag) => write!(f, "{flag} given more than once"),
            Self::EmptyBackendName => f.write_str("backend names must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backends to register, in selector order.
    pub backends: Vec<String>,
    /// Root of the demo resolver's work directories.
    pub work_dir: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_filter: String,
    /// Palette CSV for the terminal theme.
    pub palette: Option<String>,
    /// Resolve the demo studio once, print a summary and exit.
    pub check: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            work_dir: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            palette: None,
            check: false,
        }
    }
}

fn default_backends() -> Vec<String> {
    vec![AssetsBackend::NAME.to_owned(), ProfilesBackend::NAME.to_owned()]
}

fn backend_list(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .map(|name| {
            if name.is_empty() {
                Err(ConfigError::EmptyBackendName)
            } else {
                Ok(name.to_owned())
            }
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl AppConfig {
    pub fn usage(program: &str) -> String {
        format!(
            "Usage:\n  {program} [--backend <name>]... [--work-dir <dir>] [--log-file <path>] [--check]\n\n\
             --backend may be repeated; the first one is shown at startup.\n\
             Defaults to ${BACKENDS_ENV} (comma separated) or \"assets,profiles\".\n\
             --work-dir sets where the demo studio places work directories.\n\
             --check resolves the demo studio once and prints a summary.\n\n\
             Logging goes to --log-file (default {DEFAULT_LOG_FILE}) filtered by ${LOG_ENV}.\n\
             ${PALETTE_ENV} overrides the terminal palette."
        )
    }

    /// Reads the process arguments (without the program name) and environment.
    pub fn from_env(args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        Self::parse(args, |key| std::env::var(key).ok())
    }

    pub fn parse(
        mut args: impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let mut backends = Vec::new();
        let mut work_dir = None;
        let mut log_file = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                "--backend" => {
                    let raw = args.next().ok_or(ConfigError::MissingValue("--backend"))?;
                    backends.extend(backend_list(&raw)?);
                }
                "--work-dir" => {
                    if work_dir.is_some() {
                        return Err(ConfigError::DuplicateFlag("--work-dir"));
                    }
                    let raw = args.next().ok_or(ConfigError::MissingValue("--work-dir"))?;
                    work_dir = Some(PathBuf::from(raw));
                }
                "--log-file" => {
                    if log_file.is_some() {
                        return Err(ConfigError::DuplicateFlag("--log-file"));
                    }
                    let raw = args.next().ok_or(ConfigError::MissingValue("--log-file"))?;
                    log_file = Some(PathBuf::from(raw));
                }
                "--check" => {
                    if config.check {
                        return Err(ConfigError::DuplicateFlag("--check"));
                    }
                    config.check = true;
                }
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        if !backends.is_empty() {
            config.backends = backends;
        } else if let Some(raw) = non_blank(env(BACKENDS_ENV)) {
            config.backends = backend_list(&raw)?;
        }
        config.work_dir = work_dir;
        if let Some(path) = log_file {
            config.log_file = path;
        }
        if let Some(filter) = non_blank(env(LOG_ENV)) {
            config.log_filter = filter;
        }
        config.palette = non_blank(env(PALETTE_ENV));
        Ok(config)
    }
}
