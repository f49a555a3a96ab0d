// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A flat backend: one list of profiles, each entered directly for its tools.

use std::sync::Arc;
use std::time::Instant;

use smallvec::smallvec;

use super::search;
use super::{
    BackendEvent, BackendInput, PageRow, PageView, PlacedPage, PlacedPages, WorkspaceBackend,
    WorkspaceError,
};
use crate::model::{Scope, ScopeKind};
use crate::nav::PagePlacement;

#[derive(Debug, Default)]
pub struct ProfilesBackend {
    entrance: Option<Arc<Scope>>,
    profiles: Vec<Arc<Scope>>,
    current: Option<Arc<Scope>>,
    search: String,
    cursor: usize,
    events: Vec<BackendEvent>,
}

impl ProfilesBackend {
    pub const NAME: &'static str = "profiles";

    pub fn new() -> Self {
        Self::default()
    }

    fn visible(&self) -> Vec<usize> {
        search::rank(
            &self.search,
            self.profiles.iter().map(|profile| profile.name().as_str()),
        )
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.visible()
            .into_iter()
            .map(|idx| self.profiles[idx].name().to_string())
            .collect()
    }

    fn view(&self) -> PageView {
        let current = self.current.as_ref().map(|scope| scope.name().as_str());
        let rows = self
            .visible()
            .into_iter()
            .map(|idx| {
                let label = self.profiles[idx].name().to_string();
                PageRow {
                    dimmed: current.is_some_and(|current| current != label),
                    label,
                    depth: 0,
                }
            })
            .collect::<Vec<_>>();
        PageView {
            title: "Profiles".to_owned(),
            header: self
                .entrance
                .iter()
                .map(|entrance| entrance.name().to_string())
                .collect(),
            search: self.search.clone(),
            search_placeholder: "search profiles..",
            cursor: (!rows.is_empty()).then_some(self.cursor),
            rows,
            footer: Vec::new(),
        }
    }
}

impl WorkspaceBackend for ProfilesBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn enter_workspace(
        &mut self,
        scope: &Arc<Scope>,
        _backend_changed: bool,
        _now: Instant,
    ) -> Result<(), WorkspaceError> {
        match scope.kind() {
            ScopeKind::Entrance(_) => {
                self.entrance = Some(Arc::clone(scope));
                self.current = None;
                Ok(())
            }
            ScopeKind::Project(_) => {
                self.current = Some(Arc::clone(scope));
                self.events.push(BackendEvent::ToolsRequested(Arc::clone(scope)));
                Ok(())
            }
            ScopeKind::Asset(_) | ScopeKind::Task => {
                Err(WorkspaceError::unsupported(Self::NAME, scope))
            }
        }
    }

    fn wants_children(&self, scope: &Scope) -> bool {
        matches!(scope.kind(), ScopeKind::Entrance(_))
    }

    fn update_workspace(
        &mut self,
        scope: &Arc<Scope>,
        children: &[Arc<Scope>],
    ) -> Result<(), WorkspaceError> {
        match scope.kind() {
            ScopeKind::Entrance(_) => {
                let expected = scope.variant().expected_child();
                if let Some(child) = children
                    .iter()
                    .map(|child| child.variant())
                    .find(|variant| Some(*variant) != expected)
                {
                    return Err(WorkspaceError::unsupported_children(Self::NAME, scope, child));
                }
                self.profiles = children.to_vec();
                self.cursor = 0;
                Ok(())
            }
            // Profiles are leaves here; whatever lies below them is not shown.
            ScopeKind::Project(_) => Ok(()),
            ScopeKind::Asset(_) | ScopeKind::Task => {
                Err(WorkspaceError::unsupported(Self::NAME, scope))
            }
        }
    }

    fn on_cache_cleared(&mut self) {
        self.cursor = 0;
        self.current = None;
    }

    fn drain_events(&mut self) -> Vec<BackendEvent> {
        std::mem::take(&mut self.events)
    }

    fn current_page(&self) -> usize {
        0
    }

    fn handle_input(&mut self, input: BackendInput, _now: Instant) {
        let len = self.visible().len();
        match input {
            BackendInput::Up => self.cursor = self.cursor.saturating_sub(1),
            BackendInput::Down => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
            }
            BackendInput::Activate => {
                let selected = self
                    .visible()
                    .get(self.cursor)
                    .and_then(|idx| self.profiles.get(*idx))
                    .cloned();
                if let Some(profile) = selected {
                    self.events.push(BackendEvent::WorkspaceChanged(profile));
                }
            }
            BackendInput::SearchChar(ch) => {
                self.search.push(ch);
                self.cursor = 0;
            }
            BackendInput::SearchBackspace => {
                self.search.pop();
                self.cursor = 0;
            }
            BackendInput::Home
            | BackendInput::ToggleTaskedOnly
            | BackendInput::NextTask
            | BackendInput::PreviousTask => {}
        }
    }

    fn pages(&self, _now: Instant) -> PlacedPages {
        smallvec![PlacedPage {
            placement: PagePlacement { page: 0, x: 0, y: 0 },
            view: self.view(),
        }]
    }
}
