// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::events::ShellEvent;
use crate::model::SuiteTool;

/// Tools of the current workspace, with at most one selected.
#[derive(Debug, Default)]
pub struct ToolList {
    tools: Vec<SuiteTool>,
    selected: Option<usize>,
    cursor: usize,
    work_env: BTreeMap<String, String>,
    events: Vec<ShellEvent>,
}

impl ToolList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tools(&self) -> &[SuiteTool] {
        &self.tools
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_tool(&self) -> Option<&SuiteTool> {
        self.tools.get(self.selected?)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Local overrides of the work directory, passed along with each selection.
    pub fn set_work_env(&mut self, work_env: BTreeMap<String, String>) {
        self.work_env = work_env;
    }

    /// Replaces the list. A previous selection is dropped without an event.
    pub fn on_tools_updated(&mut self, tools: Vec<SuiteTool>) {
        self.tools = tools;
        self.selected = None;
        self.cursor = 0;
    }

    pub fn on_cache_cleared(&mut self) {
        self.select(None);
    }

    /// Changes the selection. Emits only when the selection actually changes.
    pub fn select(&mut self, index: Option<usize>) {
        let index = index.filter(|idx| *idx < self.tools.len());
        if index == self.selected {
            return;
        }
        self.selected = index;
        match index {
            Some(idx) => {
                self.cursor = idx;
                self.events.push(ShellEvent::ToolSelected {
                    tool: self.tools[idx].clone(),
                    work_env: self.work_env.clone(),
                });
            }
            None => self.events.push(ShellEvent::ToolCleared),
        }
    }

    pub fn move_cursor(&mut self, forward: bool) {
        if self.tools.is_empty() {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1).min(self.tools.len() - 1)
        } else {
            self.cursor.saturating_sub(1)
        };
        self.select(Some(self.cursor));
    }

    /// Double activation: launch without going through the launcher.
    pub fn activate(&mut self, index: usize) {
        if let Some(tool) = self.tools.get(index) {
            self.events.push(ShellEvent::ToolLaunched(tool.clone()));
        }
    }

    pub fn drain_events(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::ToolList;
    use crate::test_support::tool;
    use crate::events::ShellEvent;

    fn list() -> ToolList {
        let mut list = ToolList::new();
        list.on_tools_updated(vec![tool("maya"), tool("nuke")]);
        list
    }

    #[test]
    fn selection_changes_emit_selected_then_cleared() {
        let mut list = list();
        let work_env = BTreeMap::from([("PATH".to_owned(), "/c".to_owned())]);
        list.set_work_env(work_env.clone());

        list.select(Some(1));
        list.select(Some(1));
        list.select(None);
        assert_eq!(
            list.drain_events(),
            [
                ShellEvent::ToolSelected {
                    tool: tool("nuke"),
                    work_env,
                },
                ShellEvent::ToolCleared,
            ]
        );
    }

    #[test]
    fn out_of_range_selection_clears() {
        let mut list = list();
        list.select(Some(0));
        list.drain_events();
        list.select(Some(9));
        assert_eq!(list.drain_events(), [ShellEvent::ToolCleared]);
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn activation_launches_and_cache_clear_deselects() {
        let mut list = list();
        list.activate(0);
        list.activate(5);
        assert_eq!(list.drain_events(), [ShellEvent::ToolLaunched(tool("maya"))]);

        list.move_cursor(true);
        assert_eq!(list.selected_tool().map(|t| t.name.as_str()), Some("nuke"));
        list.on_cache_cleared();
        assert_eq!(list.selected(), None);
        assert_eq!(list.drain_events().last(), Some(&ShellEvent::ToolCleared));
    }

    #[test]
    fn updating_tools_resets_selection_silently() {
        let mut list = list();
        list.select(Some(0));
        list.drain_events();
        list.on_tools_updated(vec![tool("houdini")]);
        assert_eq!(list.selected(), None);
        assert!(list.drain_events().is_empty());
    }
}
