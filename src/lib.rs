// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scopedeck: a terminal launchpad for scoped tool environments.
//!
//! Navigate a studio's scope hierarchy (projects, assets, tasks or profiles),
//! pick a tool resolved for the current scope, and inspect the environment it
//! would launch with, including which scope set each variable.

pub mod app;
pub mod backend;
pub mod busy;
pub mod config;
pub mod demo;
pub mod display;
pub mod environ;
pub mod events;
pub mod model;
pub mod nav;
pub mod resolver;
pub mod tui;
pub mod ui;
pub mod workspace;

#[cfg(test)]
mod test_support;
