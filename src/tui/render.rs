// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout, panels, footer and help rendering.

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{App, Focus, TuiTheme};
use crate::backend::PageView;
use crate::busy::PointerShape;
use crate::display::{ContextTree, Launcher, ToolTab};
use crate::environ::{ResolvedEnvironmentView, RowIndex};
use crate::nav::{PagePlacement, Viewport};
use crate::workspace::VOID_PAGE_TEXT;

/// Lines a page spends on everything but its rows.
const PAGE_CHROME_LINES: usize = 4;

pub(super) fn draw(frame: &mut Frame<'_>, app: &mut App, now: Instant) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let (main_area, status_area) = (layout[0], layout[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(35), Constraint::Min(0)])
        .split(columns[1]);

    draw_workspace(frame, app, columns[0], now);
    draw_tools(frame, app, right[0]);
    draw_tool_context(frame, app, right[1]);

    frame.render_widget(Paragraph::new(footer_line(app)), status_area);
    if let Some(search) = &app.environ_search {
        let prefix = "filter: ".chars().count() as u16;
        let cursor_x = status_area
            .x
            .saturating_add(prefix)
            .saturating_add(search.chars().count() as u16)
            .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
        frame.set_cursor(cursor_x, status_area.y);
    }

    if app.show_help {
        draw_help(frame, &app.theme, main_area);
    }
}

fn panel_block<'a>(title: Line<'a>, focused: bool, theme: &TuiTheme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.panel_border_style(focused))
}

fn draw_workspace(frame: &mut Frame<'_>, app: &mut App, area: Rect, now: Instant) {
    let workspace = app.launchpad.workspace();
    let busy = workspace.busy().is_blocked();
    let title = workspace_title(
        workspace.backend_names().collect::<Vec<_>>().as_slice(),
        workspace.selected(),
        busy,
        &app.theme,
    );
    let mut block = panel_block(title, app.focus == Focus::Workspace, &app.theme);
    if workspace.busy().pointer() == PointerShape::Busy {
        block = block.border_style(app.theme.busy_border_style());
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.launchpad.workspace_mut().set_viewport(Viewport {
        width: inner.width,
        height: inner.height,
    });
    let workspace = app.launchpad.workspace();
    let backend = match workspace.current_backend() {
        Some(backend) if !workspace.is_void() => backend,
        _ => {
            let void = Paragraph::new(VOID_PAGE_TEXT)
                .style(app.theme.dimmed_style())
                .alignment(Alignment::Center);
            frame.render_widget(void, inner);
            return;
        }
    };

    for placed in backend.pages(now) {
        let Some((rect, scroll)) = clip_page(inner, placed.placement) else {
            continue;
        };
        let lines = page_lines(&placed.view, inner.height as usize, &app.theme);
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(lines).scroll(scroll), rect);
    }
}

/// Where a page offset by `placement` lands inside `area`, and how far its
/// content must scroll to stay aligned. `None` when it is fully outside.
pub(super) fn clip_page(area: Rect, placement: PagePlacement) -> Option<(Rect, (u16, u16))> {
    let clip = |origin: u16, extent: u16, offset: i32| -> Option<(u16, u16, u16)> {
        let origin = i32::from(origin);
        let start = origin + offset;
        let visible_start = start.max(origin);
        let visible_end = (start + i32::from(extent)).min(origin + i32::from(extent));
        if visible_end <= visible_start {
            return None;
        }
        Some((
            u16::try_from(visible_start).ok()?,
            u16::try_from(visible_end - visible_start).ok()?,
            u16::try_from(visible_start - start).ok()?,
        ))
    };
    let (x, width, scroll_x) = clip(area.x, area.width, placement.x)?;
    let (y, height, scroll_y) = clip(area.y, area.height, placement.y)?;
    Some((Rect::new(x, y, width, height), (scroll_y, scroll_x)))
}

pub(super) fn workspace_title(
    names: &[&str],
    selected: Option<&str>,
    busy: bool,
    theme: &TuiTheme,
) -> Line<'static> {
    let mut spans = vec![Span::raw(" Workspace ")];
    for name in names {
        let style = if Some(*name) == selected {
            theme.active_style()
        } else {
            theme.dimmed_style()
        };
        spans.push(Span::styled(format!("[{name}]"), style));
    }
    if busy {
        spans.push(Span::styled(" busy..", theme.busy_border_style()));
    }
    spans.push(Span::raw(" "));
    Line::from(spans)
}

/// Lines of one backend page, scrolled so the cursor row stays within `height`.
pub(super) fn page_lines(view: &PageView, height: usize, theme: &TuiTheme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        view.title.clone(),
        theme.base_style().add_modifier(Modifier::BOLD),
    )];
    lines.extend(view.header.iter().map(|header| Line::raw(header.clone())));
    lines.push(if view.search.is_empty() {
        Line::styled(format!("> {}", view.search_placeholder), theme.dimmed_style())
    } else {
        Line::raw(format!("> {}", view.search))
    });

    let budget = height
        .saturating_sub(PAGE_CHROME_LINES + view.header.len() + view.footer.len())
        .max(1);
    let first = view
        .cursor
        .map_or(0, |cursor| (cursor + 1).saturating_sub(budget));
    for (idx, row) in view.rows.iter().enumerate().skip(first).take(budget) {
        let style = if view.cursor == Some(idx) {
            theme.selection_style()
        } else if row.dimmed {
            theme.dimmed_style()
        } else {
            theme.base_style()
        };
        let indent = "  ".repeat(row.depth);
        lines.push(Line::styled(format!("{indent}{}", row.label), style));
    }

    lines.push(Line::raw(""));
    lines.extend(
        view.footer
            .iter()
            .map(|footer| Line::styled(footer.clone(), theme.dimmed_style())),
    );
    lines
}

fn draw_tools(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let tools = app.launchpad.tools();
    let work_dir = app.launchpad.work_dir().text();
    let title = if work_dir.is_empty() {
        " Tools ".to_owned()
    } else {
        format!(" Tools - {work_dir} ")
    };
    let items = tools
        .tools()
        .iter()
        .enumerate()
        .map(|(idx, tool)| {
            let marker = if tools.selected() == Some(idx) { "* " } else { "  " };
            let style = if tools.selected() == Some(idx) {
                app.theme.active_style()
            } else {
                app.theme.base_style()
            };
            ListItem::new(Line::styled(
                format!("{marker}{} ({})", tool.label(), tool.variant.qualified_name()),
                style,
            ))
        })
        .collect::<Vec<_>>();

    let focused = app.focus == Focus::Tools;
    let list = List::new(items)
        .block(panel_block(Line::raw(title), focused, &app.theme))
        .highlight_style(if focused {
            app.theme.selection_style()
        } else {
            Style::default()
        });
    let mut state = ListState::default();
    if !tools.tools().is_empty() {
        state.select(Some(tools.cursor()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

pub(super) fn tab_line(active: ToolTab, theme: &TuiTheme) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for tab in ToolTab::ALL {
        let style = if tab == active {
            theme.active_style()
        } else {
            theme.dimmed_style()
        };
        spans.push(Span::styled(format!("[{}]", tab.title()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_tool_context(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let context = app.launchpad.tool_context();
    let block = panel_block(
        tab_line(context.tab(), &app.theme),
        app.focus == Focus::Context,
        &app.theme,
    );
    let lines = match context.tab() {
        ToolTab::Tool => launcher_lines(context.launcher(), &app.theme),
        ToolTab::Context => context_lines(context.context(), &app.theme),
        ToolTab::Environ => environ_lines(
            context.environ(),
            (app.focus == Focus::Context).then_some(app.environ_cursor),
            &app.theme,
        ),
    };
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

pub(super) fn launcher_lines(launcher: &Launcher, theme: &TuiTheme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        format!("icon: {}", launcher.icon()),
        theme.dimmed_style(),
    )];
    for field in launcher.fields() {
        lines.push(if field.value.is_empty() {
            Line::styled(field.placeholder.to_owned(), theme.dimmed_style())
        } else {
            Line::from(vec![
                Span::styled(format!("{}: ", field.placeholder), theme.dimmed_style()),
                Span::raw(field.value.to_owned()),
            ])
        });
    }
    lines.push(Line::raw(""));
    let button = if launcher.is_enabled() {
        theme.key_style()
    } else {
        theme.dimmed_style()
    };
    lines.push(Line::from(vec![
        Span::styled("[Enter] Launch", button),
        Span::raw("   "),
        Span::styled("[s] Shell", button),
    ]));
    lines
}

pub(super) fn context_lines(tree: &ContextTree, theme: &TuiTheme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(name) = tree.context_name() {
        let mode = if tree.is_pretty() { "pretty" } else { "raw" };
        lines.push(Line::styled(format!("{name} ({mode})"), theme.dimmed_style()));
    }
    for row in tree.rows() {
        let indent = "  ".repeat(row.depth);
        lines.push(if row.placeholder {
            Line::styled(
                format!("{indent}{}", row.key),
                theme.base_style().fg(tree.placeholder_color()),
            )
        } else {
            Line::from(vec![
                Span::styled(format!("{indent}{}", row.key), theme.key_style()),
                Span::raw(format!(": {}", row.value)),
            ])
        });
    }
    lines
}

pub(super) fn environ_lines(
    view: &ResolvedEnvironmentView,
    cursor: Option<usize>,
    theme: &TuiTheme,
) -> Vec<Line<'static>> {
    let filter = view.filter();
    let search = if view.search_text().is_empty() {
        "-".to_owned()
    } else {
        view.search_text().to_owned()
    };
    let mut lines = vec![Line::styled(
        format!(
            "filter [{}]{}: {search}",
            filter.mode().label(),
            if filter.is_inverse() { " (inverse)" } else { "" }
        ),
        theme.dimmed_style(),
    )];

    let model = view.model();
    for (idx, index) in view.visible_rows().into_iter().enumerate() {
        let Some(row) = model.row(index) else {
            continue;
        };
        let selected = cursor == Some(idx);
        let mut line = match index {
            RowIndex { child: None, row: top } => {
                let marker = match (row.children.is_empty(), view.is_expanded(top)) {
                    (true, _) => " ",
                    (false, true) => "v",
                    (false, false) => ">",
                };
                Line::from(vec![
                    Span::raw(format!("{marker} ")),
                    Span::styled(row.key.to_string(), theme.key_style()),
                    Span::raw(format!(" = {} ", row.value)),
                    Span::styled(format!("<- {}", row.source), theme.source_style()),
                ])
            }
            RowIndex { child: Some(_), .. } => Line::from(vec![
                Span::raw(format!("    {} ", row.value)),
                Span::styled(format!("<- {}", row.source), theme.source_style()),
            ]),
        };
        if selected {
            line.style = line.style.patch(theme.selection_style());
        }
        lines.push(line);
    }
    lines
}

fn footer_line(app: &App) -> Line<'static> {
    if let Some(search) = &app.environ_search {
        return Line::raw(format!("filter: {search}"));
    }
    if app.launchpad.workspace().busy().is_blocked() {
        let text = app.status.text().unwrap_or("resolving..").to_owned();
        return Line::styled(text, app.theme.busy_border_style());
    }
    if let Some(text) = app.status.text() {
        return Line::raw(text.to_owned());
    }
    footer_help_line(app.focus, &app.theme)
}

pub(super) fn footer_help_line(focus: Focus, theme: &TuiTheme) -> Line<'static> {
    let keys: &[(&str, &str)] = match focus {
        Focus::Workspace => &[("type", "search"), ("enter", "open"), ("esc", "home"), ("←/→", "task")],
        Focus::Tools => &[("space", "select"), ("enter", "launch"), ("esc", "clear")],
        Focus::Context => &[("t", "tab"), ("/", "filter"), ("m", "mode"), ("y", "copy")],
    };
    let mut spans = Vec::new();
    for (key, label) in keys.iter().chain(&[("tab", "focus"), ("F1", "help"), ("^q", "quit")]) {
        spans.push(Span::styled(format!(" {key}"), theme.key_style()));
        spans.push(Span::styled(format!(" {label} "), theme.dimmed_style()));
    }
    Line::from(spans)
}

const HELP: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "cycle focus"),
    ("F2", "next backend"),
    ("F5", "clear cached selection"),
    ("Ctrl-q / Ctrl-c", "quit"),
    ("", ""),
    ("Workspace", ""),
    ("  type / Backspace", "search the page"),
    ("  Up / Down / Enter", "move and open"),
    ("  Esc", "back to the project list"),
    ("  Left / Right", "previous / next task"),
    ("  Ctrl-t", "show tasked assets only"),
    ("", ""),
    ("Tools", ""),
    ("  Space / Enter / Esc", "select, launch, clear"),
    ("", ""),
    ("Tool context", ""),
    ("  t", "next tab"),
    ("  Enter / s", "launch tool / shell"),
    ("  p", "toggle pretty context"),
    ("  / m i", "filter text, key/value mode, inverse"),
    ("  e c Space", "expand all, collapse all, toggle row"),
    ("  y / Y", "copy row / everything as JSON"),
];

fn draw_help(frame: &mut Frame<'_>, theme: &TuiTheme, area: Rect) {
    let width = area.width.min(64);
    let height = area.height.min(HELP.len() as u16 + 2);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let lines = HELP
        .iter()
        .map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("{key:<24}"), theme.key_style()),
                Span::raw(*label),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(panel_block(Line::raw(" Help (Esc) "), true, theme)),
        popup,
    );
}
