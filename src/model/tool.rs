// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Pixel size substituted into icon templates.
const ICON_SIZE: u32 = 32;

/// A resolved context as delivered by the resolver.
///
/// The payload is opaque structured data; the crate only projects it for
/// display and hands it back to the resolver for environment queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedContext {
    name: String,
    data: serde_json::Value,
}

impl ResolvedContext {
    pub fn new(name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub label: String,
    /// Icon path template, e.g. `{root}/resources/icon_{width}x{height}.png`.
    pub icon: Option<String>,
}

/// The package variant that provides a tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolVariant {
    pub package: String,
    pub version: String,
    pub root: String,
}

impl ToolVariant {
    pub fn qualified_name(&self) -> String {
        if self.version.is_empty() {
            self.package.clone()
        } else {
            format!("{}-{}", self.package, self.version)
        }
    }
}

/// One launchable tool resolved for a workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteTool {
    pub name: String,
    pub ctx_name: String,
    pub context: Arc<ResolvedContext>,
    pub metadata: ToolMetadata,
    pub variant: ToolVariant,
}

impl SuiteTool {
    pub fn label(&self) -> &str {
        if self.metadata.label.is_empty() {
            &self.name
        } else {
            &self.metadata.label
        }
    }

    pub fn icon_path(&self) -> Option<String> {
        let template = self.metadata.icon.as_deref()?;
        expand_icon_template(template, &self.variant.root)
    }
}

/// Expands `{root}`, `{width}`, `{height}`, `{w}` and `{h}` in an icon template.
///
/// Unknown placeholders or unbalanced braces yield `None` so the caller can
/// fall back to a default icon.
pub fn expand_icon_template(template: &str, root: &str) -> Option<String> {
    let size = ICON_SIZE.to_string();
    let mut out = String::with_capacity(template.len() + root.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        if let Some(stripped) = after.strip_prefix('{') {
            out.push('{');
            rest = stripped;
            continue;
        }
        let close = after.find('}')?;
        let key = &after[..close];
        match key {
            "root" => out.push_str(root),
            "width" | "height" | "w" | "h" => out.push_str(&size),
            _ => return None,
        }
        rest = &after[close + 1..];
    }

    if rest.contains('}') && !rest.contains("}}") {
        return None;
    }
    out.push_str(&rest.replace("}}", "}"));

    let trimmed = out.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
