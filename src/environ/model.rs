// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use smol_str::SmolStr;

/// Source label of values coming from work-directory overrides.
pub const LOCAL_SOURCE: &str = "local";

#[cfg(windows)]
const PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_SEPARATOR: char = ':';

/// A resolved value and the scope that contributed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvValue {
    pub value: String,
    pub source: SmolStr,
}

impl EnvValue {
    pub fn new(value: impl Into<String>, source: impl Into<SmolStr>) -> Self {
        Self {
            value: value.into(),
            source: source.into(),
        }
    }
}

pub type ResolvedEnvironment = BTreeMap<String, EnvValue>;

/// One upstream scope's contribution to a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub scope: SmolStr,
    pub value: String,
}

/// Per-key contributions in application order, as reported by context inspection.
pub type Provenance = BTreeMap<String, Vec<Contribution>>;

/// Applies work-directory overrides on top of a resolved environment.
///
/// Overrides win per key and are tagged with [`LOCAL_SOURCE`]; keys without an
/// override keep their resolved value.
pub fn merge_local_overrides(env: &mut ResolvedEnvironment, overrides: &BTreeMap<String, String>) {
    for (key, value) in overrides {
        env.insert(key.clone(), EnvValue::new(value.clone(), LOCAL_SOURCE));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvRow {
    pub key: SmolStr,
    pub value: String,
    pub source: SmolStr,
    pub children: Vec<EnvRow>,
}

impl EnvRow {
    fn leaf(key: SmolStr, value: String, source: SmolStr) -> Self {
        Self {
            key,
            value,
            source,
            children: Vec::new(),
        }
    }
}

/// Position of a row: a top-level row, or one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowIndex {
    pub row: usize,
    pub child: Option<usize>,
}

impl RowIndex {
    pub fn top(row: usize) -> Self {
        Self { row, child: None }
    }

    pub fn child(row: usize, child: usize) -> Self {
        Self {
            row,
            child: Some(child),
        }
    }

    pub fn parent(self) -> Option<RowIndex> {
        self.child.map(|_| RowIndex::top(self.row))
    }
}

/// Rows of the resolved environment, one per variable.
///
/// Variables set by several scopes get one child row per contribution; path
/// lists without such provenance get one child row per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentModel {
    rows: Vec<EnvRow>,
}

impl EnvironmentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, env: ResolvedEnvironment) {
        self.rows = env
            .into_iter()
            .map(|(key, entry)| {
                let key = SmolStr::from(key);
                let children = split_path_list(&key, &entry);
                EnvRow {
                    key,
                    value: entry.value,
                    source: entry.source,
                    children,
                }
            })
            .collect();
    }

    /// Annotates loaded rows with per-scope contributions.
    pub fn note(&mut self, provenance: &Provenance) {
        for row in &mut self.rows {
            let Some(contributions) = provenance.get(row.key.as_str()) else {
                continue;
            };
            let Some(last) = contributions.last() else {
                continue;
            };

            if row.source.is_empty() {
                row.source = last.scope.clone();
            }
            if contributions.len() > 1 {
                row.children = contributions
                    .iter()
                    .map(|c| EnvRow::leaf(row.key.clone(), c.value.clone(), c.scope.clone()))
                    .collect();
            }
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[EnvRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: RowIndex) -> Option<&EnvRow> {
        let top = self.rows.get(index.row)?;
        match index.child {
            Some(child) => top.children.get(child),
            None => Some(top),
        }
    }

    /// JSON of one row: a plain string, or a list for rows with children.
    pub fn row_json(&self, index: RowIndex) -> Option<Value> {
        let row = self.row(index)?;
        Some(row_value(row))
    }

    /// The whole environment as a JSON object, as copied by "copy full JSON".
    pub fn to_json(&self) -> Value {
        let map = self
            .rows
            .iter()
            .map(|row| (row.key.to_string(), row_value(row)))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

fn row_value(row: &EnvRow) -> Value {
    if row.children.is_empty() {
        Value::String(row.value.clone())
    } else {
        Value::Array(row.children.iter().map(|c| Value::String(c.value.clone())).collect())
    }
}

fn split_path_list(key: &SmolStr, entry: &EnvValue) -> Vec<EnvRow> {
    if !entry.value.contains(PATH_SEPARATOR) {
        return Vec::new();
    }
    entry
        .value
        .split(PATH_SEPARATOR)
        .filter(|part| !part.is_empty())
        .map(|part| EnvRow::leaf(key.clone(), part.to_owned(), entry.source.clone()))
        .collect()
}
