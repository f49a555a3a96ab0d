// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::debounce::Debounce;
use super::filter::{EnvFilter, FilterMode};
use super::model::{EnvironmentModel, Provenance, ResolvedEnvironment, RowIndex};

/// Quiet period between the last keystroke and re-filtering.
pub const SEARCH_DELAY: Duration = Duration::from_millis(400);

const FULL_JSON_INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvColumn {
    Key,
    Value,
    Source,
}

/// Provenance report for the status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverNotice {
    Show(String),
    Clear,
}

/// The resolved environment pane: rows, filter, debounced search and hover.
#[derive(Debug)]
pub struct ResolvedEnvironmentView {
    model: EnvironmentModel,
    filter: EnvFilter,
    search_text: String,
    debounce: Debounce<String>,
    expanded: BTreeSet<usize>,
    notices: Vec<HoverNotice>,
}

impl Default for ResolvedEnvironmentView {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolvedEnvironmentView {
    pub fn new() -> Self {
        Self {
            model: EnvironmentModel::new(),
            filter: EnvFilter::new(),
            search_text: String::new(),
            debounce: Debounce::new(SEARCH_DELAY),
            expanded: BTreeSet::new(),
            notices: Vec::new(),
        }
    }

    pub fn model(&self) -> &EnvironmentModel {
        &self.model
    }

    pub fn filter(&self) -> &EnvFilter {
        &self.filter
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn load(&mut self, env: ResolvedEnvironment, provenance: &Provenance) {
        self.model.load(env);
        self.model.note(provenance);
        self.apply_expansion();
    }

    pub fn clear(&mut self) {
        self.model.clear();
        self.expanded.clear();
    }

    /// Records new search text; the filter picks it up after [`SEARCH_DELAY`].
    pub fn on_searched(&mut self, text: &str, now: Instant) {
        self.search_text = text.to_owned();
        self.debounce.push(self.search_text.clone(), now);
    }

    /// Applies a due search. Returns whether the filter changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(text) = self.debounce.poll(now) else {
            return false;
        };
        self.filter.set_text(&text);
        self.apply_expansion();
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    pub fn on_switched(&mut self, by_key: bool) {
        if by_key {
            self.filter.filter_by_key();
        } else {
            self.filter.filter_by_value();
        }
        self.apply_expansion();
    }

    pub fn toggle_mode(&mut self) {
        let by_key = self.filter.mode() != FilterMode::Key;
        self.on_switched(by_key);
    }

    pub fn on_inverse(&mut self, inverse: bool) {
        self.filter.set_inverse(inverse);
        self.apply_expansion();
    }

    /// Stops a pending search so it never fires into a torn-down view.
    pub fn teardown(&mut self) {
        self.debounce.cancel();
    }

    fn apply_expansion(&mut self) {
        if self.search_text.chars().count() > 1 {
            self.expand_all();
        } else {
            self.collapse_all();
        }
    }

    pub fn expand_all(&mut self) {
        self.expanded = (0..self.model.rows().len()).collect();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn toggle_expanded(&mut self, row: usize) {
        if !self.expanded.remove(&row) {
            self.expanded.insert(row);
        }
    }

    pub fn is_expanded(&self, row: usize) -> bool {
        self.expanded.contains(&row)
    }

    /// Rows currently shown: accepted rows, plus accepted children of expanded rows.
    pub fn visible_rows(&self) -> Vec<RowIndex> {
        self.filter
            .visible_rows(&self.model, true)
            .into_iter()
            .filter(|index| index.child.is_none() || self.expanded.contains(&index.row))
            .collect()
    }

    pub fn on_entered(&mut self, index: RowIndex, column: EnvColumn) {
        let Some(row) = self.model.row(index) else {
            return;
        };
        if column == EnvColumn::Key {
            self.notices.push(HoverNotice::Clear);
            return;
        }

        let key = match index.parent().and_then(|parent| self.model.row(parent)) {
            Some(parent) => parent.key.as_str(),
            None => row.key.as_str(),
        };
        let text = format!("{key} | {} <- {}", row.value, row.source);
        self.notices.push(HoverNotice::Show(text));
    }

    pub fn on_left(&mut self) {
        self.notices.push(HoverNotice::Clear);
    }

    pub fn drain_notices(&mut self) -> Vec<HoverNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Pretty JSON object `{key: value}` of one row, for the clipboard.
    pub fn copy_json(&self, index: RowIndex) -> Option<String> {
        let value = self.model.row_json(index)?;
        let key = self.model.row(index.parent().unwrap_or(index))?.key.to_string();
        let mut object = serde_json::Map::new();
        object.insert(key, value);
        serde_json::to_string_pretty(&object).ok()
    }

    /// Every row as JSON indented by four spaces, ignoring the filter.
    pub fn full_json(&self) -> String {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(FULL_JSON_INDENT);
        let mut serializer = Serializer::with_formatter(&mut out, formatter);
        if self.model.to_json().serialize(&mut serializer).is_err() {
            return String::new();
        }
        String::from_utf8(out).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::{Duration, Instant};

    use super::{EnvColumn, HoverNotice, ResolvedEnvironmentView, SEARCH_DELAY};
    use crate::environ::model::{
        Contribution, EnvValue, Provenance, ResolvedEnvironment, RowIndex,
    };

    fn loaded_view() -> ResolvedEnvironmentView {
        let env: ResolvedEnvironment = [
            ("PROJECT_ROOT", "/proj/alpha", "alpha"),
            ("EDITOR", "vim", "studio"),
        ]
        .into_iter()
        .map(|(key, value, source)| (key.to_owned(), EnvValue::new(value, source)))
        .collect();
        let provenance: Provenance = BTreeMap::from([(
            "PROJECT_ROOT".to_owned(),
            vec![
                Contribution { scope: "studio".into(), value: "/proj".to_owned() },
                Contribution { scope: "alpha".into(), value: "/proj/alpha".to_owned() },
            ],
        )]);
        let mut view = ResolvedEnvironmentView::new();
        view.load(env, &provenance);
        view
    }

    #[test]
    fn search_applies_only_after_delay() {
        let start = Instant::now();
        let mut view = loaded_view();

        view.on_searched("e", start);
        view.on_searched("ed", start + Duration::from_millis(100));
        assert!(!view.tick(start + SEARCH_DELAY));
        assert_eq!(view.filter().text(), "");

        assert!(view.tick(start + Duration::from_millis(100) + SEARCH_DELAY));
        assert_eq!(view.filter().text(), "ed");
    }

    #[test]
    fn long_filter_text_expands_short_text_collapses() {
        let start = Instant::now();
        let mut view = loaded_view();

        view.on_searched("pro", start);
        view.tick(start + SEARCH_DELAY);
        assert!(view.is_expanded(1));
        assert_eq!(view.visible_rows().len(), 3);

        view.on_searched("p", start + SEARCH_DELAY);
        view.tick(start + SEARCH_DELAY * 2);
        assert!(!view.is_expanded(1));
        assert!(view.visible_rows().iter().all(|index| index.child.is_none()));
    }

    #[test]
    fn inverse_reapplies_expansion_from_current_text() {
        let start = Instant::now();
        let mut view = loaded_view();
        view.on_searched("editor", start);
        view.tick(start + SEARCH_DELAY);
        view.collapse_all();

        view.on_inverse(true);
        assert!(view.is_expanded(1));
        let keys = view
            .visible_rows()
            .into_iter()
            .map(|index| view.model().row(index).expect("row").key.to_string())
            .collect::<Vec<_>>();
        assert_eq!(keys, ["PROJECT_ROOT", "PROJECT_ROOT", "PROJECT_ROOT"]);
    }

    #[test]
    fn mode_switch_reapplies_expansion() {
        let start = Instant::now();
        let mut view = loaded_view();
        view.on_searched("alpha", start);
        view.tick(start + SEARCH_DELAY);
        view.collapse_all();

        view.on_switched(false);
        assert!(view.is_expanded(1));

        view.on_searched("a", start + SEARCH_DELAY);
        view.tick(start + SEARCH_DELAY * 2);
        view.expand_all();
        view.toggle_mode();
        assert!(!view.is_expanded(1));
    }

    #[test]
    fn hover_reports_provenance_and_clears() {
        let mut view = loaded_view();

        view.on_entered(RowIndex::child(1, 0), EnvColumn::Value);
        view.on_entered(RowIndex::top(0), EnvColumn::Source);
        view.on_entered(RowIndex::top(0), EnvColumn::Key);
        view.on_left();

        assert_eq!(
            view.drain_notices(),
            vec![
                HoverNotice::Show("PROJECT_ROOT | /proj <- studio".to_owned()),
                HoverNotice::Show("EDITOR | vim <- studio".to_owned()),
                HoverNotice::Clear,
                HoverNotice::Clear,
            ]
        );
        assert!(view.drain_notices().is_empty());
    }

    #[test]
    fn copy_json_includes_children() {
        let view = loaded_view();
        let text = view.copy_json(RowIndex::top(1)).expect("row json");
        assert!(text.contains("PROJECT_ROOT"));
        assert!(text.contains("/proj/alpha"));
        assert!(view.copy_json(RowIndex::top(9)).is_none());
        assert!(view.full_json().contains("EDITOR"));
    }

    #[test]
    fn full_json_is_indented_by_four_spaces() {
        let view = loaded_view();
        let text = view.full_json();
        assert!(text.starts_with("{\n    \""));
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value, view.model().to_json());
    }

    #[test]
    fn teardown_cancels_pending_search() {
        let start = Instant::now();
        let mut view = loaded_view();
        view.on_searched("vim", start);
        view.teardown();
        assert!(!view.tick(start + SEARCH_DELAY * 4));
        assert_eq!(view.next_deadline(), None);
    }
}
