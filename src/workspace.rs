// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The workspace pane: a backend selector over a stack of backend pages.
//!
//! Stack index 0 is the "No Available Backend" page; backend `i` of the
//! selector lives at stack index `i + 1`.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error};

use crate::backend::{
    BackendEvent, BackendInput, BackendRegistry, WorkspaceBackend, WorkspaceError,
};
use crate::busy::{BusyFilter, BusyWidget};
use crate::events::ShellEvent;
use crate::model::Scope;
use crate::nav::Viewport;

pub const VOID_PAGE_TEXT: &str = "No Available Backend";

#[derive(Debug)]
struct BackendEntry {
    name: String,
    backend: Box<dyn WorkspaceBackend>,
}

#[derive(Debug)]
pub struct WorkspaceNav {
    registry: BackendRegistry,
    entries: Vec<BackendEntry>,
    /// Stack index of the visible page.
    current: usize,
    /// Selector index.
    selected: usize,
    busy: BusyWidget,
    viewport: Viewport,
    events: Vec<ShellEvent>,
}

fn report(err: &WorkspaceError) {
    match err {
        WorkspaceError::UnsupportedScope { .. } | WorkspaceError::UnknownRoot(_) => {
            error!(severity = "critical", "{err}");
        }
        WorkspaceError::NoBackendAvailable => error!("{err}"),
    }
}

impl WorkspaceNav {
    pub fn new(registry: BackendRegistry, filter: Arc<BusyFilter>) -> Self {
        Self {
            registry,
            entries: Vec::new(),
            current: 0,
            selected: 0,
            busy: BusyWidget::new(filter),
            viewport: Viewport::default(),
            events: Vec::new(),
        }
    }

    /// Instantiates the named backends in order. Runs once; later calls are
    /// ignored while any backend is registered.
    pub fn register_backends<S: AsRef<str>>(&mut self, names: &[S]) {
        if !self.entries.is_empty() {
            return;
        }

        for name in names.iter().map(AsRef::as_ref) {
            match self.registry.load(name) {
                Ok(mut backend) => {
                    debug!(backend = name, icon = backend.icon_path(), "backend registered");
                    backend.set_viewport(self.viewport);
                    self.entries.push(BackendEntry {
                        name: name.to_owned(),
                        backend,
                    });
                }
                Err(err) => error!("{err}"),
            }
        }

        match self.entries.first() {
            Some(first) => {
                self.selected = 0;
                self.events.push(ShellEvent::BackendChanged(first.name.clone()));
            }
            None => error!("no valid backend registered"),
        }
    }

    pub fn backend_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn selected(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|entry| entry.name.as_str())
    }

    /// Stack index of the visible page; 0 is the void page.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_void(&self) -> bool {
        self.current == 0
    }

    /// The selector changed to entry `index`.
    pub fn on_backend_selected(&mut self, index: usize) {
        let Some(entry) = self.entries.get(index) else {
            return;
        };
        if index == self.selected {
            return;
        }
        self.selected = index;
        self.events.push(ShellEvent::BackendChanged(entry.name.clone()));
    }

    pub fn cycle_backend(&mut self) {
        if !self.entries.is_empty() {
            self.on_backend_selected((self.selected + 1) % self.entries.len());
        }
    }

    pub fn current_backend(&self) -> Option<&dyn WorkspaceBackend> {
        let entry = self.entries.get(self.current.checked_sub(1)?)?;
        Some(entry.backend.as_ref())
    }

    fn current_backend_mut(&mut self) -> Result<&mut Box<dyn WorkspaceBackend>, WorkspaceError> {
        let idx = self.current.checked_sub(1).ok_or(WorkspaceError::NoBackendAvailable)?;
        self.entries
            .get_mut(idx)
            .map(|entry| &mut entry.backend)
            .ok_or(WorkspaceError::NoBackendAvailable)
    }

    /// Shows `scope`. An entrance switches the stack to its backend first.
    pub fn on_workspace_entered(
        &mut self,
        scope: &Arc<Scope>,
        now: Instant,
    ) -> Result<(), WorkspaceError> {
        let previous = (self.current, self.selected);
        let mut backend_changed = false;
        if scope.is_entrance() {
            let Some(idx) = self
                .entries
                .iter()
                .position(|entry| entry.name == scope.name().as_str())
            else {
                let err = WorkspaceError::UnknownRoot(scope.name().to_string());
                report(&err);
                return Err(err);
            };
            if idx + 1 != self.current {
                self.current = idx + 1;
                self.selected = idx;
                backend_changed = true;
            }
        }

        let result = self
            .current_backend_mut()
            .and_then(|backend| backend.enter_workspace(scope, backend_changed, now));
        if let Err(err) = &result {
            report(err);
            (self.current, self.selected) = previous;
        }
        result
    }

    /// Whether the visible backend lists what lies below `scope`.
    pub fn wants_children(&self, scope: &Scope) -> bool {
        self.current_backend()
            .is_some_and(|backend| backend.wants_children(scope))
    }

    pub fn on_workspace_updated(
        &mut self,
        scope: &Arc<Scope>,
        children: &[Arc<Scope>],
    ) -> Result<(), WorkspaceError> {
        let result = self
            .current_backend_mut()
            .and_then(|backend| backend.update_workspace(scope, children));
        if let Err(err) = &result {
            report(err);
        }
        result
    }

    pub fn on_cache_cleared(&mut self) {
        if let Ok(backend) = self.current_backend_mut() {
            backend.on_cache_cleared();
        }
    }

    pub fn handle_input(&mut self, input: BackendInput, now: Instant) {
        if let Ok(backend) = self.current_backend_mut() {
            backend.handle_input(input, now);
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.current_backend_mut()
            .map(|backend| backend.tick(now))
            .unwrap_or(false)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for entry in &mut self.entries {
            entry.backend.set_viewport(viewport);
        }
    }

    pub fn busy(&self) -> &BusyWidget {
        &self.busy
    }

    pub fn busy_mut(&mut self) -> &mut BusyWidget {
        &mut self.busy
    }

    /// Selector changes plus everything the backends raised, in that order.
    pub fn drain_events(&mut self) -> Vec<ShellEvent> {
        let mut events = std::mem::take(&mut self.events);
        for entry in &mut self.entries {
            events.extend(entry.backend.drain_events().into_iter().map(|event| match event {
                BackendEvent::WorkspaceChanged(scope) => ShellEvent::WorkspaceChanged(scope),
                BackendEvent::ToolsRequested(scope) => ShellEvent::ToolsRequested(scope),
            }));
        }
        events
    }
}
