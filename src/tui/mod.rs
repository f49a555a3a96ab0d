// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Renders the launchpad with ratatui and feeds it crossterm input. Input
//! aimed at the workspace pane passes through the pane's busy filter first,
//! so keys pressed while children are still resolving are swallowed.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{info, warn};

use crate::app::Launchpad;
use crate::backend::BackendInput;
use crate::busy::InputClass;
use crate::display::ToolTab;
use crate::environ::{EnvColumn, RowIndex};
use crate::events::ShellEvent;
use crate::ui::StatusLine;

mod render;
pub mod theme;

pub use theme::{ThemeError, TuiTheme};

const POLL_IDLE: Duration = Duration::from_millis(100);
const POLL_ANIMATING: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Workspace,
    Tools,
    Context,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Workspace => Self::Tools,
            Self::Tools => Self::Context,
            Self::Context => Self::Workspace,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::Workspace => Self::Context,
            Self::Tools => Self::Workspace,
            Self::Context => Self::Tools,
        }
    }
}

/// Runs the interactive terminal UI until the user quits.
pub fn run<S: AsRef<str>>(
    launchpad: Launchpad,
    theme: TuiTheme,
    backends: &[S],
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(launchpad, theme);
    app.start(backends, Instant::now());

    while !app.should_quit {
        let now = Instant::now();
        let changed = app.pump(now);
        terminal.draw(|frame| render::draw(frame, &mut app, now))?;

        if let Some(text) = app.take_clipboard() {
            match copy_to_clipboard(&text) {
                Ok(how) => app.status.notify(format!("copied to clipboard ({how})"), now),
                Err(err) => app.status.notify(format!("clipboard error: {err}"), now),
            }
        }

        if event::poll(app.poll_timeout(changed, Instant::now()))? {
            let event = event::read()?;
            app.handle_event(event, Instant::now());
        }
    }

    app.shutdown();
    Ok(())
}

struct App {
    launchpad: Launchpad,
    theme: TuiTheme,
    status: StatusLine,
    focus: Focus,
    environ_cursor: usize,
    /// Search text being typed into the environment filter.
    environ_search: Option<String>,
    show_help: bool,
    clipboard: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(mut launchpad: Launchpad, theme: TuiTheme) -> Self {
        launchpad
            .tool_context_mut()
            .context_mut()
            .set_placeholder_color(theme.placeholder_color());
        launchpad.workspace_mut().busy_mut().on_enter();
        Self {
            launchpad,
            theme,
            status: StatusLine::default(),
            focus: Focus::Workspace,
            environ_cursor: 0,
            environ_search: None,
            show_help: false,
            clipboard: None,
            should_quit: false,
        }
    }

    fn start<S: AsRef<str>>(&mut self, backends: &[S], now: Instant) {
        self.launchpad.register_backends(backends, now);
    }

    /// Applies resolver completions and published events. Returns whether
    /// the screen needs another frame soon.
    fn pump(&mut self, now: Instant) -> bool {
        let mut changed = self.launchpad.pump(now);
        for event in self.launchpad.drain_events() {
            match &event {
                ShellEvent::ToolLaunched(tool) => {
                    info!(tool = tool.name.as_str(), context = tool.ctx_name.as_str(), "launch requested");
                }
                ShellEvent::ShellLaunched(tool) => {
                    info!(tool = tool.name.as_str(), context = tool.ctx_name.as_str(), "shell requested");
                }
                ShellEvent::ToolSelected { .. } | ShellEvent::ToolCleared => {
                    self.environ_cursor = 0;
                }
                _ => {}
            }
            self.status.on_event(&event, now);
            changed = true;
        }
        changed |= self.status.tick(now);

        let visible = self.launchpad.tool_context().environ().visible_rows().len();
        self.environ_cursor = self.environ_cursor.min(visible.saturating_sub(1));
        changed
    }

    fn poll_timeout(&self, changed: bool, now: Instant) -> Duration {
        if changed {
            return POLL_ANIMATING;
        }
        match self.launchpad.tool_context().environ().next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(POLL_IDLE),
            None => POLL_IDLE,
        }
    }

    fn take_clipboard(&mut self) -> Option<String> {
        self.clipboard.take()
    }

    fn shutdown(&mut self) {
        self.launchpad.tool_context_mut().environ_mut().teardown();
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        if let Event::Key(key) = &event {
            if key.kind == KeyEventKind::Press && is_quit_key(key) {
                self.should_quit = true;
                return;
            }
        }
        if self.focus == Focus::Workspace
            && !self.show_help
            && self.environ_search.is_none()
            && !is_focus_key(&event)
            && !self.launchpad.workspace().busy().deliver(InputClass::of(&event))
        {
            return;
        }

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Paste(text) if self.environ_search.is_some() => {
                for ch in text.chars() {
                    self.edit_search(KeyCode::Char(ch), now);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }
        if self.environ_search.is_some() {
            self.edit_search(key.code, now);
            return;
        }

        match key.code {
            KeyCode::Tab => return self.set_focus(self.focus.cycle()),
            KeyCode::BackTab => return self.set_focus(self.focus.cycle_back()),
            KeyCode::F(1) => {
                self.show_help = true;
                return;
            }
            KeyCode::F(2) => return self.launchpad.workspace_mut().cycle_backend(),
            KeyCode::F(5) => return self.launchpad.on_cache_cleared(),
            _ => {}
        }

        match self.focus {
            Focus::Workspace => {
                if let Some(input) = backend_input(key) {
                    self.launchpad.workspace_mut().handle_input(input, now);
                }
            }
            Focus::Tools => self.handle_tools_key(key.code),
            Focus::Context => self.handle_context_key(key.code),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus == focus {
            return;
        }
        if self.focus == Focus::Workspace {
            self.launchpad.workspace_mut().busy_mut().on_leave();
        }
        if self.focus == Focus::Context {
            self.launchpad.tool_context_mut().environ_mut().on_left();
        }
        if focus == Focus::Workspace {
            self.launchpad.workspace_mut().busy_mut().on_enter();
        }
        self.focus = focus;
    }

    fn handle_tools_key(&mut self, code: KeyCode) {
        let tools = self.launchpad.tools_mut();
        match code {
            KeyCode::Up | KeyCode::Char('k') => tools.move_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => tools.move_cursor(true),
            KeyCode::Char(' ') => {
                let cursor = tools.cursor();
                tools.select(Some(cursor));
            }
            KeyCode::Enter => {
                let cursor = tools.cursor();
                tools.activate(cursor);
            }
            KeyCode::Esc => tools.select(None),
            _ => {}
        }
    }

    fn handle_context_key(&mut self, code: KeyCode) {
        let context = self.launchpad.tool_context_mut();
        if matches!(code, KeyCode::Right | KeyCode::Char('t')) {
            if context.tab() == ToolTab::Environ {
                context.environ_mut().on_left();
            }
            context.next_tab();
            return;
        }

        match context.tab() {
            ToolTab::Tool => match code {
                KeyCode::Enter | KeyCode::Char('l') => context.launcher_mut().launch(),
                KeyCode::Char('s') => context.launcher_mut().launch_shell(),
                _ => {}
            },
            ToolTab::Context => {
                if code == KeyCode::Char('p') {
                    context.context_mut().toggle_pretty();
                }
            }
            ToolTab::Environ => self.handle_environ_key(code),
        }
    }

    fn handle_environ_key(&mut self, code: KeyCode) {
        let cursor = self.environ_cursor;
        let environ = self.launchpad.tool_context_mut().environ_mut();
        let visible = environ.visible_rows();
        let current = visible.get(cursor).copied();
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_environ_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_environ_cursor(true),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(index) = current {
                    environ.toggle_expanded(index.row);
                }
            }
            KeyCode::Char('/') => self.environ_search = Some(environ.search_text().to_owned()),
            KeyCode::Char('m') => environ.toggle_mode(),
            KeyCode::Char('i') => {
                let inverse = !environ.filter().is_inverse();
                environ.on_inverse(inverse);
            }
            KeyCode::Char('e') => environ.expand_all(),
            KeyCode::Char('c') => environ.collapse_all(),
            KeyCode::Char('y') => {
                self.clipboard = current.and_then(|index| environ.copy_json(index));
            }
            KeyCode::Char('Y') => self.clipboard = Some(environ.full_json()),
            KeyCode::Esc => environ.on_left(),
            _ => {}
        }
    }

    fn move_environ_cursor(&mut self, forward: bool) {
        let environ = self.launchpad.tool_context_mut().environ_mut();
        let visible = environ.visible_rows();
        if visible.is_empty() {
            return;
        }
        self.environ_cursor = if forward {
            (self.environ_cursor + 1).min(visible.len() - 1)
        } else {
            self.environ_cursor.saturating_sub(1)
        };
        let index: RowIndex = visible[self.environ_cursor];
        environ.on_entered(index, EnvColumn::Value);
    }

    fn edit_search(&mut self, code: KeyCode, now: Instant) {
        let Some(text) = self.environ_search.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                self.environ_search = None;
                return;
            }
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(ch) => text.push(ch),
            _ => return,
        }
        let text = text.clone();
        self.launchpad
            .tool_context_mut()
            .environ_mut()
            .on_searched(&text, now);
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

/// Keys that move focus away from the workspace pane are never swallowed.
fn is_focus_key(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Tab | KeyCode::BackTab | KeyCode::F(1),
            ..
        })
    )
}

fn backend_input(key: KeyEvent) -> Option<BackendInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('t') => Some(BackendInput::ToggleTaskedOnly),
            _ => None,
        };
    }
    Some(match key.code {
        KeyCode::Up => BackendInput::Up,
        KeyCode::Down => BackendInput::Down,
        KeyCode::Enter => BackendInput::Activate,
        KeyCode::Esc | KeyCode::Home => BackendInput::Home,
        KeyCode::Left => BackendInput::PreviousTask,
        KeyCode::Right => BackendInput::NextTask,
        KeyCode::Backspace => BackendInput::SearchBackspace,
        KeyCode::Char(ch) => BackendInput::SearchChar(ch),
        _ => return None,
    })
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, LeaveAlternateScreen) {
        warn!("cannot leave alternate screen: {err}");
    }
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

#[cfg(test)]
mod tests;
