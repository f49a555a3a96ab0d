// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use rstest::rstest;

use super::render::{clip_page, draw, footer_help_line, page_lines};
use super::{backend_input, osc52_sequence, App, Focus, TuiTheme};
use crate::app::Launchpad;
use crate::backend::{BackendInput, BackendRegistry, PageRow, PageView};
use crate::busy::{BusyFilter, OVERWHELMED_NOTICE};
use crate::demo::DemoResolver;
use crate::display::ToolTab;
use crate::nav::PagePlacement;
use crate::resolver::ResolverHandle;
use crate::workspace::VOID_PAGE_TEXT;

fn demo_app() -> App {
    let launchpad = Launchpad::new(
        ResolverHandle::inline(Arc::new(DemoResolver::new("/tmp/scopedeck-tests"))),
        BackendRegistry::with_defaults(),
        Arc::new(BusyFilter::new()),
    );
    App::new(launchpad, TuiTheme::default())
}

fn started_app(now: Instant) -> App {
    let mut app = demo_app();
    app.start(&["assets", "profiles"], now);
    app.pump(now);
    app
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

fn page_labels(app: &App, now: Instant) -> Vec<String> {
    let backend = app
        .launchpad
        .workspace()
        .current_backend()
        .expect("backend");
    backend.pages(now)[0]
        .view
        .rows
        .iter()
        .map(|row| row.label.clone())
        .collect()
}

fn screen(app: &mut App, now: Instant) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 32)).expect("terminal");
    terminal.draw(|frame| draw(frame, app, now)).expect("draw");
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn start_lists_visible_projects() {
    let now = Instant::now();
    let app = started_app(now);
    assert_eq!(app.launchpad.workspace().selected(), Some("assets"));
    assert_eq!(page_labels(&app, now), ["sintel", "spring"]);
}

#[test]
fn keys_pressed_while_resolving_are_swallowed() {
    let now = Instant::now();
    let mut app = demo_app();
    app.start(&["assets"], now);
    assert!(app.launchpad.workspace().busy().is_blocked());

    app.handle_event(key(KeyCode::Char('s')), now);
    app.pump(now);
    assert_eq!(app.status.text(), Some(OVERWHELMED_NOTICE));

    let backend = app.launchpad.workspace().current_backend().expect("backend");
    assert_eq!(backend.pages(now)[0].view.search, "");
}

#[test]
fn typing_in_workspace_searches_the_page() {
    let now = Instant::now();
    let mut app = started_app(now);
    app.handle_event(key(KeyCode::Char('s')), now);
    app.handle_event(key(KeyCode::Char('p')), now);

    let backend = app.launchpad.workspace().current_backend().expect("backend");
    assert_eq!(backend.pages(now)[0].view.search, "sp");
}

#[test]
fn enter_opens_the_selected_project() {
    let now = Instant::now();
    let mut app = started_app(now);
    app.handle_event(key(KeyCode::Enter), now);
    app.pump(now);
    app.pump(now);

    let scope = app.launchpad.current_scope().expect("scope");
    assert_eq!(scope.name().as_str(), "sintel");
    assert!(!app.launchpad.workspace().busy().is_blocked());
}

#[test]
fn tab_cycles_focus_both_ways() {
    let now = Instant::now();
    let mut app = started_app(now);
    app.handle_event(key(KeyCode::Tab), now);
    assert_eq!(app.focus, Focus::Tools);
    app.handle_event(key(KeyCode::Tab), now);
    assert_eq!(app.focus, Focus::Context);
    app.handle_event(key(KeyCode::BackTab), now);
    app.handle_event(key(KeyCode::BackTab), now);
    assert_eq!(app.focus, Focus::Workspace);
}

#[test]
fn help_overlay_swallows_keys_until_closed() {
    let now = Instant::now();
    let mut app = started_app(now);
    app.handle_event(key(KeyCode::F(1)), now);
    assert!(app.show_help);

    app.handle_event(key(KeyCode::Char('x')), now);
    let backend = app.launchpad.workspace().current_backend().expect("backend");
    assert_eq!(backend.pages(now)[0].view.search, "");

    app.handle_event(key(KeyCode::Esc), now);
    assert!(!app.show_help);
}

#[test]
fn control_q_quits() {
    let now = Instant::now();
    let mut app = started_app(now);
    app.handle_event(key(KeyCode::Char('q')), now);
    assert!(!app.should_quit);
    app.handle_event(ctrl('q'), now);
    assert!(app.should_quit);
}

#[test]
fn f2_switches_backend() {
    let now = Instant::now();
    let mut app = started_app(now);
    app.handle_event(key(KeyCode::F(2)), now);
    app.pump(now);
    assert_eq!(app.launchpad.workspace().selected(), Some("profiles"));
    assert_eq!(app.status.text(), Some("backend: profiles"));
}

#[test]
fn environ_filter_is_edited_in_the_footer() {
    let now = Instant::now();
    let mut app = started_app(now);
    app.handle_event(key(KeyCode::BackTab), now);
    app.handle_event(key(KeyCode::Char('t')), now);
    app.handle_event(key(KeyCode::Char('t')), now);
    assert_eq!(app.launchpad.tool_context().tab(), ToolTab::Environ);

    app.handle_event(key(KeyCode::Char('/')), now);
    for ch in "PATH".chars() {
        app.handle_event(key(KeyCode::Char(ch)), now);
    }
    app.handle_event(key(KeyCode::Backspace), now);
    assert_eq!(app.environ_search.as_deref(), Some("PAT"));

    app.handle_event(key(KeyCode::Enter), now);
    assert_eq!(app.environ_search, None);
}

#[rstest]
#[case(KeyCode::Up, KeyModifiers::NONE, Some(BackendInput::Up))]
#[case(KeyCode::Enter, KeyModifiers::NONE, Some(BackendInput::Activate))]
#[case(KeyCode::Esc, KeyModifiers::NONE, Some(BackendInput::Home))]
#[case(KeyCode::Right, KeyModifiers::NONE, Some(BackendInput::NextTask))]
#[case(KeyCode::Char('a'), KeyModifiers::NONE, Some(BackendInput::SearchChar('a')))]
#[case(KeyCode::Char('t'), KeyModifiers::CONTROL, Some(BackendInput::ToggleTaskedOnly))]
#[case(KeyCode::Char('x'), KeyModifiers::CONTROL, None)]
#[case(KeyCode::F(9), KeyModifiers::NONE, None)]
fn keys_map_to_backend_input(
    #[case] code: KeyCode,
    #[case] modifiers: KeyModifiers,
    #[case] expected: Option<BackendInput>,
) {
    assert_eq!(backend_input(KeyEvent::new(code, modifiers)), expected);
}

#[rstest]
#[case(0, 0, Some((Rect::new(2, 3, 10, 5), (0, 0))))]
#[case(-4, 0, Some((Rect::new(2, 3, 6, 5), (0, 4))))]
#[case(6, 2, Some((Rect::new(8, 5, 4, 3), (0, 0))))]
#[case(10, 0, None)]
#[case(0, -5, None)]
fn pages_are_clipped_to_the_pane(
    #[case] x: i32,
    #[case] y: i32,
    #[case] expected: Option<(Rect, (u16, u16))>,
) {
    let area = Rect::new(2, 3, 10, 5);
    assert_eq!(clip_page(area, PagePlacement { page: 0, x, y }), expected);
}

#[test]
fn page_lines_keep_the_cursor_row_visible() {
    let view = PageView {
        title: "Projects".to_owned(),
        search_placeholder: "search projects..",
        rows: (0..10)
            .map(|idx| PageRow {
                label: format!("p{idx}"),
                depth: 0,
                dimmed: false,
            })
            .collect(),
        cursor: Some(8),
        ..PageView::default()
    };
    let lines = page_lines(&view, 7, &TuiTheme::default());
    let text = lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
        .collect::<Vec<_>>();
    assert_eq!(text[0], "Projects");
    assert_eq!(text[1], "> search projects..");
    assert_eq!(&text[2..5], ["p6", "p7", "p8"]);
}

#[test]
fn footer_help_follows_focus() {
    let theme = TuiTheme::default();
    let text = |focus| {
        footer_help_line(focus, &theme)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect::<String>()
    };
    assert!(text(Focus::Workspace).contains("search"));
    assert!(text(Focus::Context).contains("filter"));
    assert!(text(Focus::Tools).contains("launch"));
}

#[test]
fn osc52_wraps_base64_payload() {
    assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
}

#[test]
fn draw_shows_void_page_without_backends() {
    let now = Instant::now();
    let mut app = demo_app();
    assert!(screen(&mut app, now).contains(VOID_PAGE_TEXT));
}

#[test]
fn draw_shows_projects_and_panels() {
    let now = Instant::now();
    let mut app = started_app(now);
    let screen = screen(&mut app, now);
    assert!(screen.contains("Projects"));
    assert!(screen.contains("sintel"));
    assert!(screen.contains("Tools"));
    assert!(screen.contains("[Environ]"));
}
