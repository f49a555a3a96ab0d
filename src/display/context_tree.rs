// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::Color;
use serde_json::Value;

use crate::model::ResolvedContext;

pub const PENDING_TEXT: &str = "pending..";

/// One attribute of the resolved context, flattened depth-first.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextNode {
    pub key: String,
    pub value: Value,
    pub depth: usize,
}

/// A rendered row: key, formatted value and nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRow {
    pub key: String,
    pub value: String,
    pub depth: usize,
    pub placeholder: bool,
}

/// The "Context" tab: the resolved context as an attribute tree.
#[derive(Debug, Clone)]
pub struct ContextTree {
    context: Option<String>,
    nodes: Vec<ContextNode>,
    pretty: bool,
    placeholder_color: Color,
}

impl Default for ContextTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextTree {
    pub fn new() -> Self {
        Self {
            context: None,
            nodes: Vec::new(),
            pretty: true,
            placeholder_color: Color::DarkGray,
        }
    }

    pub fn load(&mut self, context: &ResolvedContext) {
        self.context = Some(context.name().to_owned());
        self.nodes.clear();
        flatten(context.data(), 0, &mut self.nodes);
    }

    /// Back to the pending placeholder.
    pub fn reset(&mut self) {
        self.context = None;
        self.nodes.clear();
    }

    pub fn is_pending(&self) -> bool {
        self.context.is_none()
    }

    pub fn context_name(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn nodes(&self) -> &[ContextNode] {
        &self.nodes
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    pub fn set_pretty(&mut self, pretty: bool) {
        self.pretty = pretty;
    }

    pub fn toggle_pretty(&mut self) {
        self.pretty = !self.pretty;
    }

    pub fn placeholder_color(&self) -> Color {
        self.placeholder_color
    }

    pub fn set_placeholder_color(&mut self, color: Color) {
        self.placeholder_color = color;
    }

    pub fn rows(&self) -> Vec<ContextRow> {
        if self.is_pending() {
            return vec![ContextRow {
                key: PENDING_TEXT.to_owned(),
                value: String::new(),
                depth: 0,
                placeholder: true,
            }];
        }
        self.nodes
            .iter()
            .map(|node| ContextRow {
                key: node.key.clone(),
                value: self.format_value(&node.value),
                depth: node.depth,
                placeholder: false,
            })
            .collect()
    }

    fn format_value(&self, value: &Value) -> String {
        if !self.pretty {
            return value.to_string();
        }
        match value {
            Value::Null => "-".to_owned(),
            Value::Bool(flag) => if *flag { "yes" } else { "no" }.to_owned(),
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.clone(),
            Value::Array(items) => match items.len() {
                1 => "1 item".to_owned(),
                n => format!("{n} items"),
            },
            Value::Object(map) => match map.len() {
                1 => "1 attribute".to_owned(),
                n => format!("{n} attributes"),
            },
        }
    }
}

fn flatten(value: &Value, depth: usize, out: &mut Vec<ContextNode>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                out.push(ContextNode {
                    key: key.clone(),
                    value: child.clone(),
                    depth,
                });
                flatten(child, depth + 1, out);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                out.push(ContextNode {
                    key: idx.to_string(),
                    value: child.clone(),
                    depth,
                });
                flatten(child, depth + 1, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;
    use serde_json::json;

    use super::{ContextTree, PENDING_TEXT};
    use crate::model::ResolvedContext;

    fn context() -> ResolvedContext {
        ResolvedContext::new(
            "alpha",
            json!({"packages": ["maya-2024", "python-3.11"], "ok": true, "timestamp": 3}),
        )
    }

    #[test]
    fn starts_pending_and_reset_returns_there() {
        let mut tree = ContextTree::new();
        assert!(tree.is_pending());
        assert_eq!(tree.rows()[0].key, PENDING_TEXT);

        tree.load(&context());
        assert!(!tree.is_pending());
        tree.reset();
        assert!(tree.rows()[0].placeholder);
    }

    #[test]
    fn pretty_toggle_only_changes_value_text() {
        let mut tree = ContextTree::new();
        tree.load(&context());

        let pretty = tree.rows();
        let keys = pretty.iter().map(|row| (row.depth, row.key.as_str())).collect::<Vec<_>>();
        assert_eq!(keys, [(0, "ok"), (0, "packages"), (1, "0"), (1, "1"), (0, "timestamp")]);
        assert_eq!(pretty[0].value, "yes");
        assert_eq!(pretty[1].value, "2 items");
        assert_eq!(pretty[2].value, "maya-2024");

        tree.toggle_pretty();
        let raw = tree.rows();
        assert_eq!(raw.len(), pretty.len());
        assert_eq!(raw[0].value, "true");
        assert_eq!(raw[1].value, r#"["maya-2024","python-3.11"]"#);
        assert_eq!(raw[2].value, r#""maya-2024""#);
    }

    #[test]
    fn placeholder_color_survives_reset() {
        let mut tree = ContextTree::new();
        tree.set_placeholder_color(Color::Yellow);
        tree.reset();
        assert_eq!(tree.placeholder_color(), Color::Yellow);
    }
}
