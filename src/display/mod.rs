// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! What the selected tool resolves to: launcher, context tree and environment.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::environ::{merge_local_overrides, HoverNotice, Provenance, ResolvedEnvironmentView};
use crate::events::ShellEvent;
use crate::model::SuiteTool;
use crate::resolver::{ResolveError, Resolver};

pub mod context_tree;
pub mod launcher;
pub mod tools;

pub use context_tree::{ContextNode, ContextRow, ContextTree};
pub use launcher::{Launcher, LauncherField};
pub use tools::ToolList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolTab {
    #[default]
    Tool,
    Context,
    Environ,
}

impl ToolTab {
    pub const ALL: [ToolTab; 3] = [Self::Tool, Self::Context, Self::Environ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Tool => "Tool",
            Self::Context => "Context",
            Self::Environ => "Environ",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Tool => Self::Context,
            Self::Context => Self::Environ,
            Self::Environ => Self::Tool,
        }
    }
}

/// The read-only work directory line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkDirLabel {
    text: String,
}

impl WorkDirLabel {
    pub fn on_work_dir_obtained(&mut self, path: &Path) {
        self.text = path.display().to_string();
    }

    pub fn on_work_dir_reset(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The tabbed pane showing everything about the selected tool.
#[derive(Debug, Default)]
pub struct ToolContext {
    tab: ToolTab,
    launcher: Launcher,
    context: ContextTree,
    environ: ResolvedEnvironmentView,
}

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> ToolTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ToolTab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn launcher_mut(&mut self) -> &mut Launcher {
        &mut self.launcher
    }

    pub fn context(&self) -> &ContextTree {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ContextTree {
        &mut self.context
    }

    pub fn environ(&self) -> &ResolvedEnvironmentView {
        &self.environ
    }

    pub fn environ_mut(&mut self) -> &mut ResolvedEnvironmentView {
        &mut self.environ
    }

    /// Shows `tool`: its context tree, its environment merged with `work_env`
    /// and annotated with provenance, and the launcher.
    ///
    /// When the environment cannot be resolved the environment tab stays
    /// empty and the error is returned; the rest is still shown.
    pub fn on_tool_selected(
        &mut self,
        tool: &SuiteTool,
        work_env: &BTreeMap<String, String>,
        resolver: &dyn Resolver,
    ) -> Result<(), ResolveError> {
        let context = tool.context.as_ref();
        self.context.load(context);
        self.launcher.set_tool(tool);

        let mut env = match resolver.resolve_environment(context) {
            Ok(env) => env,
            Err(err) => {
                self.environ.clear();
                return Err(err);
            }
        };
        merge_local_overrides(&mut env, work_env);
        let provenance = resolver.inspect_context(context).unwrap_or_else(|err| {
            warn!(context = context.name(), "cannot inspect context: {err}");
            Provenance::new()
        });
        self.environ.load(env, &provenance);
        Ok(())
    }

    pub fn on_tool_cleared(&mut self) {
        self.context.reset();
        self.environ.clear();
        self.launcher.reset();
    }

    /// Launch requests and hover reports raised since the last call.
    pub fn drain_events(&mut self) -> Vec<ShellEvent> {
        let mut events = self.launcher.drain_events();
        events.extend(self.environ.drain_notices().into_iter().map(|notice| {
            ShellEvent::EnvironHovered(match notice {
                HoverNotice::Show(text) => Some(text),
                HoverNotice::Clear => None,
            })
        }));
        events
    }
}
