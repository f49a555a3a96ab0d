// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Resolved environment presentation.
//!
//! The model holds one row per variable with its contributing scope. The filter decides which rows
//! are visible (by key or by value, optionally inverted) without touching the rows; the view adds
//! debounced search, expansion state and hover provenance reports.

pub mod debounce;
pub mod filter;
pub mod model;
pub mod view;

pub use debounce::Debounce;
pub use filter::{EnvFilter, FilterMode};
pub use model::{
    merge_local_overrides, Contribution, EnvRow, EnvValue, EnvironmentModel, Provenance,
    ResolvedEnvironment, RowIndex, LOCAL_SOURCE,
};
pub use view::{EnvColumn, HoverNotice, ResolvedEnvironmentView, SEARCH_DELAY};
