// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Input blocking while backend work is outstanding.
//!
//! Instead of disabling a pane (which restyles it and flickers between short
//! operations), a busy pane routes its input through the shared
//! [`BusyFilter`], which swallows keyboard, button and scroll input and lets
//! everything else through. The pointer turns busy while it rests over a
//! blocked pane.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crossterm::event::{Event, KeyEventKind, MouseEventKind};

use crate::model::WorkerId;

pub const OVERWHELMED_NOTICE: &str = "Not allowed at this moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputClass {
    Scroll,
    KeyPress,
    KeyRelease,
    MouseButtonPress,
    MouseButtonRelease,
    MouseButtonDblClick,
    MouseMove,
    Focus,
    Resize,
    Paste,
}

impl InputClass {
    pub fn is_blockable(self) -> bool {
        matches!(
            self,
            Self::Scroll
                | Self::KeyPress
                | Self::KeyRelease
                | Self::MouseButtonPress
                | Self::MouseButtonRelease
                | Self::MouseButtonDblClick
        )
    }

    pub fn of(event: &Event) -> Self {
        match event {
            Event::Key(key) => match key.kind {
                KeyEventKind::Release => Self::KeyRelease,
                KeyEventKind::Press | KeyEventKind::Repeat => Self::KeyPress,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) => Self::MouseButtonPress,
                MouseEventKind::Up(_) => Self::MouseButtonRelease,
                MouseEventKind::ScrollDown
                | MouseEventKind::ScrollUp
                | MouseEventKind::ScrollLeft
                | MouseEventKind::ScrollRight => Self::Scroll,
                MouseEventKind::Drag(_) | MouseEventKind::Moved => Self::MouseMove,
            },
            Event::FocusGained | Event::FocusLost => Self::Focus,
            Event::Resize(_, _) => Self::Resize,
            Event::Paste(_) => Self::Paste,
        }
    }
}

/// The process-wide input filter shared by every busy pane.
#[derive(Debug, Default)]
pub struct BusyFilter {
    swallowed: AtomicUsize,
}

static SHARED_FILTER: OnceLock<Arc<BusyFilter>> = OnceLock::new();

impl BusyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared instance, created on first use and kept until exit.
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED_FILTER.get_or_init(|| Arc::new(Self::new())))
    }

    /// Returns `true` when the input is swallowed.
    pub fn filter(&self, class: InputClass) -> bool {
        if class.is_blockable() {
            self.swallowed.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Number of inputs swallowed since the last call.
    pub fn take_swallowed(&self) -> usize {
        self.swallowed.swap(0, Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerShape {
    #[default]
    Arrow,
    Busy,
}

/// Busy state of one pane and everything inside it.
#[derive(Debug)]
pub struct BusyWidget {
    works: BTreeSet<WorkerId>,
    entered: bool,
    filter: Arc<BusyFilter>,
    installed: bool,
    pointer: PointerShape,
}

impl BusyWidget {
    pub fn new(filter: Arc<BusyFilter>) -> Self {
        Self {
            works: BTreeSet::new(),
            entered: false,
            filter,
            installed: false,
            pointer: PointerShape::Arrow,
        }
    }

    pub fn set_overwhelmed(&mut self, worker: WorkerId) {
        if self.works.is_empty() {
            if self.entered {
                self.pointer = PointerShape::Busy;
            }
            self.installed = true;
        }
        self.works.insert(worker);
    }

    pub fn pop_overwhelmed(&mut self, worker: &WorkerId) {
        self.works.remove(worker);
        if self.works.is_empty() {
            if self.entered {
                self.pointer = PointerShape::Arrow;
            }
            self.installed = false;
        }
    }

    pub fn on_enter(&mut self) {
        if !self.works.is_empty() {
            self.pointer = PointerShape::Busy;
        }
        self.entered = true;
    }

    pub fn on_leave(&mut self) {
        if !self.works.is_empty() {
            self.pointer = PointerShape::Arrow;
        }
        self.entered = false;
    }

    pub fn is_blocked(&self) -> bool {
        self.installed
    }

    pub fn pointer(&self) -> PointerShape {
        self.pointer
    }

    pub fn workers(&self) -> impl Iterator<Item = &WorkerId> {
        self.works.iter()
    }

    /// Routes one input through the pane. Returns whether it reaches the pane.
    pub fn deliver(&self, class: InputClass) -> bool {
        !(self.installed && self.filter.filter(class))
    }
}
