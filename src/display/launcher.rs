// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::events::ShellEvent;
use crate::model::SuiteTool;

pub const DEFAULT_TOOL_ICON: &str = "joystick";

/// A read-only field with the text shown while it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LauncherField<'a> {
    pub placeholder: &'static str,
    pub value: &'a str,
}

/// The "Tool" tab: what will be launched, and the two launch buttons.
#[derive(Debug, Default)]
pub struct Launcher {
    tool: Option<SuiteTool>,
    icon: Option<String>,
    events: Vec<ShellEvent>,
}

impl Launcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tool(&mut self, tool: &SuiteTool) {
        self.icon = tool.icon_path();
        self.tool = Some(tool.clone());
    }

    pub fn reset(&mut self) {
        self.tool = None;
        self.icon = None;
    }

    pub fn tool(&self) -> Option<&SuiteTool> {
        self.tool.as_ref()
    }

    /// Both launch buttons share this state.
    pub fn is_enabled(&self) -> bool {
        self.tool.is_some()
    }

    pub fn icon(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_TOOL_ICON)
    }

    /// Label, context name and tool command, in display order.
    pub fn fields(&self) -> [LauncherField<'_>; 3] {
        let (label, ctx_name, name) = match &self.tool {
            Some(tool) => (tool.label(), tool.ctx_name.as_str(), tool.name.as_str()),
            None => ("", "", ""),
        };
        [
            LauncherField {
                placeholder: "App name",
                value: label,
            },
            LauncherField {
                placeholder: "Workspace setup name",
                value: ctx_name,
            },
            LauncherField {
                placeholder: "App command",
                value: name,
            },
        ]
    }

    pub fn launch(&mut self) {
        if let Some(tool) = &self.tool {
            self.events.push(ShellEvent::ToolLaunched(tool.clone()));
        }
    }

    pub fn launch_shell(&mut self) {
        if let Some(tool) = &self.tool {
            self.events.push(ShellEvent::ShellLaunched(tool.clone()));
        }
    }

    pub fn drain_events(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{Launcher, DEFAULT_TOOL_ICON};
    use crate::test_support::tool;
    use crate::events::ShellEvent;

    #[test]
    fn disabled_launcher_ignores_buttons() {
        let mut launcher = Launcher::new();
        launcher.launch();
        launcher.launch_shell();
        assert!(!launcher.is_enabled());
        assert!(launcher.drain_events().is_empty());
        assert!(launcher.fields().iter().all(|field| field.value.is_empty()));
        assert_eq!(launcher.fields()[2].placeholder, "App command");
    }

    #[test]
    fn set_tool_enables_and_reset_blanks() {
        let maya = tool("maya");
        let mut launcher = Launcher::new();
        launcher.set_tool(&maya);
        assert!(launcher.is_enabled());
        assert_eq!(launcher.fields()[0].value, "Maya");
        assert_eq!(launcher.fields()[1].value, "alpha");
        assert_eq!(launcher.icon(), "/opt/maya/icon_32x32.png");

        launcher.launch();
        launcher.launch_shell();
        assert_eq!(
            launcher.drain_events(),
            [ShellEvent::ToolLaunched(maya.clone()), ShellEvent::ShellLaunched(maya)]
        );

        launcher.reset();
        assert!(!launcher.is_enabled());
        assert_eq!(launcher.icon(), DEFAULT_TOOL_ICON);
        assert_eq!(launcher.fields()[0].value, "");
    }
}
