// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The launchpad controller.
//!
//! Owns the current scope and wires the workspace pane, the tool list and the
//! tool context pane to the resolver. Everything runs on the caller's thread;
//! resolver work comes back as completions applied by [`Launchpad::pump`].

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::backend::BackendRegistry;
use crate::busy::{BusyFilter, OVERWHELMED_NOTICE};
use crate::display::{ToolContext, ToolList, WorkDirLabel};
use crate::events::ShellEvent;
use crate::model::{Scope, ScopeName, ScopePath, WorkerId};
use crate::resolver::{Completion, ResolverHandle, ScopeToken};
use crate::workspace::WorkspaceNav;

#[derive(Debug)]
pub struct Launchpad {
    resolver: ResolverHandle,
    filter: Arc<BusyFilter>,
    workspace: WorkspaceNav,
    tools: ToolList,
    tool_context: ToolContext,
    work_dir: WorkDirLabel,
    current: Option<ScopePath>,
    token: ScopeToken,
    published: Vec<ShellEvent>,
}

fn worker_id(kind: &str, token: ScopeToken) -> Option<WorkerId> {
    match WorkerId::new(format!("{kind}-{token}")) {
        Ok(id) => Some(id),
        Err(err) => {
            warn!("BUG: invalid worker id: {err}");
            None
        }
    }
}

impl Launchpad {
    pub fn new(resolver: ResolverHandle, registry: BackendRegistry, filter: Arc<BusyFilter>) -> Self {
        Self {
            resolver,
            workspace: WorkspaceNav::new(registry, Arc::clone(&filter)),
            filter,
            tools: ToolList::new(),
            tool_context: ToolContext::new(),
            work_dir: WorkDirLabel::default(),
            current: None,
            token: ScopeToken::default(),
            published: Vec::new(),
        }
    }

    pub fn workspace(&self) -> &WorkspaceNav {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut WorkspaceNav {
        &mut self.workspace
    }

    pub fn tools(&self) -> &ToolList {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolList {
        &mut self.tools
    }

    pub fn tool_context(&self) -> &ToolContext {
        &self.tool_context
    }

    pub fn tool_context_mut(&mut self) -> &mut ToolContext {
        &mut self.tool_context
    }

    pub fn work_dir(&self) -> &WorkDirLabel {
        &self.work_dir
    }

    pub fn current_scope(&self) -> Option<&Arc<Scope>> {
        self.current.as_ref().map(ScopePath::leaf)
    }

    pub fn token(&self) -> ScopeToken {
        self.token
    }

    pub fn register_backends<S: AsRef<str>>(&mut self, names: &[S], now: Instant) {
        self.workspace.register_backends(names);
        self.route(now);
    }

    /// Makes `scope` current and asks for its children when the backend
    /// shows them.
    ///
    /// A scope the workspace refuses leaves everything as it was. Results of
    /// requests made for an earlier scope are dropped when they arrive.
    pub fn enter_workspace(&mut self, scope: Arc<Scope>, now: Instant) {
        if self.workspace.on_workspace_entered(&scope, now).is_err() {
            return;
        }
        self.token = self.token.next();
        self.current = Some(ScopePath::of(&scope));
        self.tools.on_tools_updated(Vec::new());
        self.tool_context.on_tool_cleared();
        self.work_dir.on_work_dir_reset();

        if self.workspace.wants_children(&scope) {
            let Some(worker) = worker_id("children", self.token) else {
                return;
            };
            self.workspace.busy_mut().set_overwhelmed(worker.clone());
            self.resolver.request_children(self.token, worker, scope);
        }
    }

    pub fn update_workspace(&mut self, scope: Arc<Scope>, children: Vec<Arc<Scope>>) {
        let ok = self.workspace.on_workspace_updated(&scope, &children).is_ok();
        self.published.push(ShellEvent::WorkspaceRefreshed { scope, ok });
    }

    pub fn on_cache_cleared(&mut self) {
        self.workspace.on_cache_cleared();
        self.tools.on_cache_cleared();
    }

    fn request_tools(&mut self, scope: Arc<Scope>) {
        let Some(worker) = worker_id("tools", self.token) else {
            return;
        };
        self.workspace.busy_mut().set_overwhelmed(worker.clone());
        self.resolver.request_tools(self.token, worker, scope);
    }

    /// Applies finished resolver work, advances timers and routes events.
    /// Returns whether anything visible may have changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for completion in self.resolver.drain() {
            changed = true;
            self.apply(completion);
        }
        changed |= self.workspace.tick(now);
        changed |= self.tool_context.environ_mut().tick(now);
        changed |= self.route(now);

        let swallowed = self.filter.take_swallowed();
        for _ in 0..swallowed {
            self.published
                .push(ShellEvent::Overwhelmed(OVERWHELMED_NOTICE.to_owned()));
        }
        changed || swallowed > 0
    }

    fn apply(&mut self, completion: Completion) {
        self.workspace.busy_mut().pop_overwhelmed(completion.worker());
        if completion.token() != self.token {
            debug!(
                worker = completion.worker().as_str(),
                token = completion.token().get(),
                current = self.token.get(),
                "stale result ignored"
            );
            return;
        }

        match completion {
            Completion::Children { scope, result, .. } => match result {
                Ok(children) => self.update_workspace(scope, children),
                Err(err) => {
                    warn!(scope = %scope, "cannot resolve children: {err}");
                    self.published
                        .push(ShellEvent::WorkspaceRefreshed { scope, ok: false });
                }
            },
            Completion::Tools { scope, result, .. } => match result {
                Ok(resolved) => {
                    self.tools.set_work_env(resolved.overrides);
                    self.tools.on_tools_updated(resolved.tools);
                    match &resolved.work_dir {
                        Some(dir) => self.work_dir.on_work_dir_obtained(dir),
                        None => self.work_dir.on_work_dir_reset(),
                    }
                }
                Err(err) => warn!(scope = %scope, "cannot resolve tools: {err}"),
            },
        }
    }

    /// Drains component events until none are left. Returns whether any ran.
    fn route(&mut self, now: Instant) -> bool {
        let mut queue = VecDeque::new();
        let mut routed = false;
        loop {
            queue.extend(self.workspace.drain_events());
            queue.extend(self.tools.drain_events());
            queue.extend(self.tool_context.drain_events());
            let Some(event) = queue.pop_front() else {
                return routed;
            };
            routed = true;
            self.handle(event, now);
        }
    }

    fn handle(&mut self, event: ShellEvent, now: Instant) {
        self.published.push(event.clone());
        match event {
            ShellEvent::BackendChanged(name) => match ScopeName::new(name.as_str()) {
                Ok(root) => self.enter_workspace(Scope::entrance(root, name), now),
                Err(err) => warn!("cannot enter backend {name:?}: {err}"),
            },
            ShellEvent::WorkspaceChanged(scope) => self.enter_workspace(scope, now),
            ShellEvent::ToolsRequested(scope) => self.request_tools(scope),
            ShellEvent::ToolSelected { tool, work_env } => {
                if let Err(err) =
                    self.tool_context
                        .on_tool_selected(&tool, &work_env, self.resolver.resolver())
                {
                    warn!(tool = tool.name.as_str(), "cannot resolve environment: {err}");
                }
            }
            ShellEvent::ToolCleared => self.tool_context.on_tool_cleared(),
            ShellEvent::WorkspaceRefreshed { .. }
            | ShellEvent::ToolLaunched(_)
            | ShellEvent::ShellLaunched(_)
            | ShellEvent::EnvironHovered(_)
            | ShellEvent::Overwhelmed(_) => {}
        }
    }

    /// Events published since the last call, for the host.
    pub fn drain_events(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.published)
    }
}
