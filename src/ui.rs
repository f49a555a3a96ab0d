// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Status line state fed from published shell events.
//!
//! Hover text from the environment view sticks until cleared. Other notices
//! expire after [`NOTICE_TTL`].

use std::time::{Duration, Instant};

use crate::events::ShellEvent;

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    rev: u64,
    hover: Option<String>,
    notice: Option<(String, Instant)>,
    launched: Vec<String>,
}

impl StatusLine {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Launch requests seen so far, as "tool" or "tool (shell)".
    pub fn launched(&self) -> &[String] {
        &self.launched
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }

    /// Shows `text` until [`NOTICE_TTL`] has passed.
    pub fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some((text.into(), now + NOTICE_TTL));
        self.bump();
    }

    pub fn on_event(&mut self, event: &ShellEvent, now: Instant) {
        match event {
            ShellEvent::EnvironHovered(text) => {
                if self.hover != *text {
                    self.hover = text.clone();
                    self.bump();
                }
            }
            ShellEvent::Overwhelmed(text) => self.notify(text.clone(), now),
            ShellEvent::BackendChanged(name) => self.notify(format!("backend: {name}"), now),
            ShellEvent::WorkspaceRefreshed { scope, ok: false } => {
                self.notify(format!("cannot refresh {}", scope.display_path()), now);
            }
            ShellEvent::ToolLaunched(tool) => {
                self.launched.push(tool.name.clone());
                self.notify(format!("launching {}", tool.label()), now);
            }
            ShellEvent::ShellLaunched(tool) => {
                self.launched.push(format!("{} (shell)", tool.name));
                self.notify(format!("opening shell for {}", tool.label()), now);
            }
            ShellEvent::WorkspaceChanged(_)
            | ShellEvent::WorkspaceRefreshed { ok: true, .. }
            | ShellEvent::ToolsRequested(_)
            | ShellEvent::ToolSelected { .. }
            | ShellEvent::ToolCleared => {}
        }
    }

    /// Drops an expired notice. Returns whether the line changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.notice {
            Some((_, until)) if *until <= now => {
                self.notice = None;
                self.bump();
                true
            }
            _ => false,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.hover
            .as_deref()
            .or_else(|| self.notice.as_ref().map(|(text, _)| text.as_str()))
    }
}
