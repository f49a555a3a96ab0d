// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Scopes form the navigable hierarchy; suite tools carry the resolved context a tool launches in.

pub mod ids;
pub mod scope;
pub mod tool;

pub use ids::{Name, NameError, ScopeName, WorkerId};
pub use scope::{
    AssetScope, EntranceScope, ProjectScope, Scope, ScopeError, ScopeKind, ScopePath,
    ScopeVariant, MAX_SCOPE_DEPTH,
};
pub use tool::{expand_icon_template, ResolvedContext, SuiteTool, ToolMetadata, ToolVariant};
