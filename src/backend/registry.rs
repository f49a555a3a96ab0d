// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use super::{AssetsBackend, ProfilesBackend, WorkspaceBackend};

pub type BackendFactory =
    Box<dyn Fn() -> Result<Box<dyn WorkspaceBackend>, String> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendLoadError {
    Unknown(String),
    Failed { name: String, reason: String },
}

impl fmt::Display for BackendLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(f, "no widget for backend {name:?}"),
            Self::Failed { name, reason } => {
                write!(f, "failed to get widget for backend {name:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for BackendLoadError {}

/// Backend constructors keyed by name. Nothing is built until [`Self::load`].
#[derive(Default)]
pub struct BackendRegistry {
    factories: BTreeMap<String, BackendFactory>,
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every backend this crate ships.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AssetsBackend::NAME, || Ok(Box::new(AssetsBackend::new())));
        registry.register(ProfilesBackend::NAME, || Ok(Box::new(ProfilesBackend::new())));
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn WorkspaceBackend>, String> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn load(&self, name: &str) -> Result<Box<dyn WorkspaceBackend>, BackendLoadError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| BackendLoadError::Unknown(name.to_owned()))?;
        factory().map_err(|reason| BackendLoadError::Failed {
            name: name.to_owned(),
            reason,
        })
    }
}
