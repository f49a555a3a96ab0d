// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Events published to whoever hosts the launchpad.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::{Scope, SuiteTool};

#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// A scope became current and its children/tools should be resolved.
    WorkspaceChanged(Arc<Scope>),
    /// Children of `scope` were applied (`ok`) or failed to resolve.
    WorkspaceRefreshed { scope: Arc<Scope>, ok: bool },
    BackendChanged(String),
    /// A leaf scope was reached and its tools should be listed.
    ToolsRequested(Arc<Scope>),
    /// `work_env` holds the work directory's local overrides.
    ToolSelected { tool: SuiteTool, work_env: BTreeMap<String, String> },
    ToolCleared,
    ToolLaunched(SuiteTool),
    ShellLaunched(SuiteTool),
    /// Provenance text for the status line; `None` clears it.
    EnvironHovered(Option<String>),
    Overwhelmed(String),
}

impl ShellEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WorkspaceChanged(_) => "workspace_changed",
            Self::WorkspaceRefreshed { .. } => "workspace_refreshed",
            Self::BackendChanged(_) => "backend_changed",
            Self::ToolsRequested(_) => "tools_requested",
            Self::ToolSelected { .. } => "tool_selected",
            Self::ToolCleared => "tool_cleared",
            Self::ToolLaunched(_) => "tool_launched",
            Self::ShellLaunched(_) => "shell_launched",
            Self::EnvironHovered(_) => "environ_hovered",
            Self::Overwhelmed(_) => "overwhelmed",
        }
    }
}
