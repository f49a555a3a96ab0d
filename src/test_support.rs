// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared test helpers: log capture, sample tools and a table-driven resolver.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

use crate::environ::{Provenance, ResolvedEnvironment};
use crate::model::{
    ResolvedContext, Scope, ScopeKind, ScopeName, SuiteTool, ToolMetadata, ToolVariant,
};
use crate::resolver::{ResolveError, Resolver};

#[derive(Debug, Clone)]
pub(crate) struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub critical: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedLogs {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    pub(crate) fn count(&self, level: Level) -> usize {
        self.events().iter().filter(|event| event.level == level).count()
    }

    pub(crate) fn critical(&self) -> usize {
        self.events().iter().filter(|event| event.critical).count()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.message).collect()
    }
}

struct CaptureLayer {
    logs: CapturedLogs,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        if let Ok(mut events) = self.logs.events.lock() {
            events.push(CapturedEvent {
                level: *event.metadata().level(),
                message: visitor.message,
                critical: visitor.critical,
            });
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    critical: bool,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "severity" => self.critical = value == "critical",
            "message" => self.message = value.to_owned(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

/// Runs `f` with a thread-local subscriber and returns what it logged.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = Registry::default().with(CaptureLayer { logs: logs.clone() });
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs)
}

/// A tool for `name` in context "alpha", labelled with the capitalized name.
pub(crate) fn tool(name: &str) -> SuiteTool {
    let mut label = name.to_owned();
    if let Some(first) = label.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    SuiteTool {
        name: name.to_owned(),
        ctx_name: "alpha".to_owned(),
        context: Arc::new(ResolvedContext::new(
            "alpha",
            json!({"name": "alpha", "packages": [format!("{name}-1.0")]}),
        )),
        metadata: ToolMetadata {
            label,
            icon: Some("{root}/icon_{w}x{h}.png".to_owned()),
        },
        variant: ToolVariant {
            package: name.to_owned(),
            version: "1.0".to_owned(),
            root: format!("/opt/{name}"),
        },
    }
}

/// A resolver answering from fixed tables. Children are keyed by scope path.
#[derive(Debug, Default)]
pub(crate) struct StaticResolver {
    pub children: BTreeMap<String, Vec<(String, ScopeKind)>>,
    pub failing: BTreeSet<String>,
    pub tools: Vec<SuiteTool>,
    pub environment: ResolvedEnvironment,
    pub provenance: Provenance,
    pub overrides: BTreeMap<String, String>,
    pub work_dir: Option<PathBuf>,
}

impl Resolver for StaticResolver {
    fn resolve_children(&self, scope: &Arc<Scope>) -> Result<Vec<Arc<Scope>>, ResolveError> {
        let path = scope.display_path();
        if self.failing.contains(&path) {
            return Err(ResolveError::Failed(format!("{path} is offline")));
        }
        self.children
            .get(&path)
            .into_iter()
            .flatten()
            .map(|(name, kind)| {
                let name = ScopeName::new(name.as_str())
                    .map_err(|err| ResolveError::Failed(err.to_string()))?;
                Scope::child(scope, name, kind.clone())
                    .map_err(|err| ResolveError::Failed(err.to_string()))
            })
            .collect()
    }

    fn resolve_tools(&self, _scope: &Arc<Scope>) -> Result<Vec<SuiteTool>, ResolveError> {
        Ok(self.tools.clone())
    }

    fn resolve_environment(
        &self,
        _context: &ResolvedContext,
    ) -> Result<ResolvedEnvironment, ResolveError> {
        Ok(self.environment.clone())
    }

    fn inspect_context(&self, _context: &ResolvedContext) -> Result<Provenance, ResolveError> {
        Ok(self.provenance.clone())
    }

    fn get_local_overrides(
        &self,
        _work_dir: &Path,
    ) -> Result<BTreeMap<String, String>, ResolveError> {
        Ok(self.overrides.clone())
    }

    fn work_dir(&self, _scope: &Arc<Scope>) -> Option<PathBuf> {
        self.work_dir.clone()
    }
}
