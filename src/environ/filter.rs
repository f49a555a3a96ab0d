// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::{Regex, RegexBuilder};

use super::model::{EnvRow, EnvironmentModel, RowIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Key,
    Value,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Key => "On Key",
            Self::Value => "On Value",
        }
    }
}

/// Filter parameters over an [`EnvironmentModel`].
///
/// The filter never touches the rows themselves; it only decides which of
/// them are visible. A row is visible when it is accepted on its own or when
/// any of its children is.
#[derive(Debug, Clone, Default)]
pub struct EnvFilter {
    mode: FilterMode,
    text: String,
    pattern: Option<Regex>,
    inverse: bool,
}

impl EnvFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    pub fn filter_by_key(&mut self) {
        self.mode = FilterMode::Key;
    }

    pub fn filter_by_value(&mut self) {
        self.mode = FilterMode::Value;
    }

    pub fn set_inverse(&mut self, inverse: bool) {
        self.inverse = inverse;
    }

    /// Sets the filter text. It is matched case-insensitively as a regular
    /// expression, or as a literal when it does not compile.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        self.pattern = if text.is_empty() {
            None
        } else {
            Some(compile_pattern(text))
        };
    }

    fn field<'a>(&self, row: &'a EnvRow) -> &'a str {
        match self.mode {
            FilterMode::Key => row.key.as_str(),
            FilterMode::Value => row.value.as_str(),
        }
    }

    fn accepts_self(&self, row: &EnvRow) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        pattern.is_match(self.field(row)) != self.inverse
    }

    pub fn accepts(&self, row: &EnvRow) -> bool {
        self.accepts_self(row) || row.children.iter().any(|child| self.accepts(child))
    }

    /// Visible rows in display order, optionally including children.
    pub fn visible_rows(&self, model: &EnvironmentModel, with_children: bool) -> Vec<RowIndex> {
        let mut out = Vec::new();
        for (row_idx, row) in model.rows().iter().enumerate() {
            if !self.accepts(row) {
                continue;
            }
            out.push(RowIndex::top(row_idx));
            if !with_children {
                continue;
            }
            for (child_idx, child) in row.children.iter().enumerate() {
                if self.accepts(child) {
                    out.push(RowIndex::child(row_idx, child_idx));
                }
            }
        }
        out
    }
}

fn compile_pattern(text: &str) -> Regex {
    let build = |source: &str| RegexBuilder::new(source).case_insensitive(true).build();
    match build(text) {
        Ok(regex) => regex,
        // Escaped input always compiles.
        Err(_) => build(&regex::escape(text)).unwrap_or_else(|_| unreachable!()),
    }
}
