// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Workspace backends: pluggable drivers for one scope hierarchy each.
//!
//! A backend receives scopes and their children from the navigation root,
//! keeps whatever selection state its pages need, and reports the user's
//! choices back as [`BackendEvent`]s. Backends never resolve anything
//! themselves.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use smallvec::SmallVec;

use crate::model::{Scope, ScopeVariant};
use crate::nav::{PagePlacement, Viewport};

pub mod assets;
pub mod profiles;
pub mod registry;
pub mod search;

pub use assets::AssetsBackend;
pub use profiles::ProfilesBackend;
pub use registry::{BackendFactory, BackendLoadError, BackendRegistry};

pub const DEFAULT_ICON: &str = "server";

#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    WorkspaceChanged(Arc<Scope>),
    ToolsRequested(Arc<Scope>),
}

/// Terminal input a backend page understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendInput {
    Up,
    Down,
    Activate,
    Home,
    SearchChar(char),
    SearchBackspace,
    ToggleTaskedOnly,
    NextTask,
    PreviousTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    /// The backend has no handling for this scope (or parent/child pair).
    UnsupportedScope { backend: String, scope: String },
    /// An entrance was entered whose name is not in the backend selector.
    UnknownRoot(String),
    NoBackendAvailable,
}

impl WorkspaceError {
    pub(crate) fn unsupported(backend: &str, scope: &Scope) -> Self {
        Self::UnsupportedScope {
            backend: backend.to_owned(),
            scope: scope.to_string(),
        }
    }

    pub(crate) fn unsupported_children(
        backend: &str,
        scope: &Scope,
        child: ScopeVariant,
    ) -> Self {
        Self::UnsupportedScope {
            backend: backend.to_owned(),
            scope: format!("{scope} with {child} children"),
        }
    }
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedScope { backend, scope } => {
                write!(f, "backend {backend:?} does not support {scope}")
            }
            Self::UnknownRoot(name) => write!(f, "unknown root level {name:?}"),
            Self::NoBackendAvailable => f.write_str("no backend available"),
        }
    }
}

impl std::error::Error for WorkspaceError {}

/// One visible row of a backend page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub label: String,
    pub depth: usize,
    pub dimmed: bool,
}

/// Render-ready state of one backend page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageView {
    pub title: String,
    pub header: Vec<String>,
    pub search: String,
    pub search_placeholder: &'static str,
    pub rows: Vec<PageRow>,
    pub cursor: Option<usize>,
    pub footer: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedPage {
    pub placement: PagePlacement,
    pub view: PageView,
}

pub type PlacedPages = SmallVec<[PlacedPage; 2]>;

/// The contract every backend page satisfies.
pub trait WorkspaceBackend: fmt::Debug + Send {
    fn name(&self) -> &str;

    fn icon_path(&self) -> &str {
        DEFAULT_ICON
    }

    /// Presents `scope`. `backend_changed` is set when this backend just
    /// became the visible one.
    fn enter_workspace(
        &mut self,
        scope: &Arc<Scope>,
        backend_changed: bool,
        now: Instant,
    ) -> Result<(), WorkspaceError>;

    /// Whether entering `scope` should fetch its children.
    fn wants_children(&self, scope: &Scope) -> bool {
        scope.has_children()
    }

    /// Shows the resolved `children` of `scope`.
    fn update_workspace(
        &mut self,
        scope: &Arc<Scope>,
        children: &[Arc<Scope>],
    ) -> Result<(), WorkspaceError>;

    /// Drops transient selection state; loaded scopes stay.
    fn on_cache_cleared(&mut self);

    fn drain_events(&mut self) -> Vec<BackendEvent>;

    fn current_page(&self) -> usize;

    /// Advances animations. Returns `true` when something needs a redraw.
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }

    fn handle_input(&mut self, input: BackendInput, now: Instant);

    fn set_viewport(&mut self, _viewport: Viewport) {}

    fn pages(&self, now: Instant) -> PlacedPages;
}
