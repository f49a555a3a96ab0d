// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The resolution engine boundary.
//!
//! [`Resolver`] is implemented outside this crate (the demo resolver aside).
//! Children and tool lookups may be slow, so [`ResolverHandle`] runs them on
//! the blocking pool and hands completions back through a channel that the UI
//! loop drains. Environment queries on an already resolved context are cheap
//! and stay synchronous.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::environ::{Provenance, ResolvedEnvironment};
use crate::model::{ResolvedContext, Scope, SuiteTool, WorkerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    Failed(String),
    /// The worker running the request died before answering.
    Aborted(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "resolve failed: {reason}"),
            Self::Aborted(reason) => write!(f, "resolve task aborted: {reason}"),
        }
    }
}

impl std::error::Error for ResolveError {}

pub trait Resolver: Send + Sync {
    /// Children of `scope`, created with `scope` as their upstream.
    fn resolve_children(&self, scope: &Arc<Scope>) -> Result<Vec<Arc<Scope>>, ResolveError>;

    fn resolve_tools(&self, scope: &Arc<Scope>) -> Result<Vec<SuiteTool>, ResolveError>;

    fn resolve_environment(
        &self,
        context: &ResolvedContext,
    ) -> Result<ResolvedEnvironment, ResolveError>;

    /// Per-variable contributions, in the order the scopes applied them.
    fn inspect_context(&self, context: &ResolvedContext) -> Result<Provenance, ResolveError>;

    fn get_local_overrides(
        &self,
        work_dir: &Path,
    ) -> Result<BTreeMap<String, String>, ResolveError>;

    fn work_dir(&self, scope: &Arc<Scope>) -> Option<PathBuf>;
}

/// Generation of the current scope. Completions carrying an older token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ScopeToken(u64);

impl ScopeToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTools {
    pub tools: Vec<SuiteTool>,
    pub work_dir: Option<PathBuf>,
    pub overrides: BTreeMap<String, String>,
}

#[derive(Debug)]
pub enum Completion {
    Children {
        token: ScopeToken,
        worker: WorkerId,
        scope: Arc<Scope>,
        result: Result<Vec<Arc<Scope>>, ResolveError>,
    },
    Tools {
        token: ScopeToken,
        worker: WorkerId,
        scope: Arc<Scope>,
        result: Result<ResolvedTools, ResolveError>,
    },
}

impl Completion {
    pub fn token(&self) -> ScopeToken {
        match self {
            Self::Children { token, .. } | Self::Tools { token, .. } => *token,
        }
    }

    pub fn worker(&self) -> &WorkerId {
        match self {
            Self::Children { worker, .. } | Self::Tools { worker, .. } => worker,
        }
    }
}

fn resolve_tools_for(resolver: &dyn Resolver, scope: &Arc<Scope>) -> Result<ResolvedTools, ResolveError> {
    let tools = resolver.resolve_tools(scope)?;
    let work_dir = resolver.work_dir(scope);
    let overrides = match &work_dir {
        Some(dir) => resolver.get_local_overrides(dir)?,
        None => BTreeMap::new(),
    };
    Ok(ResolvedTools {
        tools,
        work_dir,
        overrides,
    })
}

#[derive(Debug, Clone)]
enum Mode {
    Runtime(Handle),
    /// Requests resolve on the calling thread; completions still queue.
    Inline,
}

pub struct ResolverHandle {
    resolver: Arc<dyn Resolver>,
    mode: Mode,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl fmt::Debug for ResolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverHandle").field("mode", &self.mode).finish_non_exhaustive()
    }
}

impl ResolverHandle {
    pub fn spawning(resolver: Arc<dyn Resolver>, runtime: Handle) -> Self {
        Self::with_mode(resolver, Mode::Runtime(runtime))
    }

    pub fn inline(resolver: Arc<dyn Resolver>) -> Self {
        Self::with_mode(resolver, Mode::Inline)
    }

    fn with_mode(resolver: Arc<dyn Resolver>, mode: Mode) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            resolver,
            mode,
            tx,
            rx,
        }
    }

    pub fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    pub fn request_children(&self, token: ScopeToken, worker: WorkerId, scope: Arc<Scope>) {
        self.run(
            move |resolver: &dyn Resolver, scope: &Arc<Scope>| resolver.resolve_children(scope),
            scope,
            move |scope, result| Completion::Children {
                token,
                worker,
                scope,
                result,
            },
        );
    }

    pub fn request_tools(&self, token: ScopeToken, worker: WorkerId, scope: Arc<Scope>) {
        self.run(resolve_tools_for, scope, move |scope, result| Completion::Tools {
            token,
            worker,
            scope,
            result,
        });
    }

    fn run<T, W, C>(&self, work: W, scope: Arc<Scope>, complete: C)
    where
        T: Send + 'static,
        W: FnOnce(&dyn Resolver, &Arc<Scope>) -> Result<T, ResolveError> + Send + 'static,
        C: FnOnce(Arc<Scope>, Result<T, ResolveError>) -> Completion + Send + 'static,
    {
        let resolver = Arc::clone(&self.resolver);
        let tx = self.tx.clone();
        match &self.mode {
            Mode::Inline => {
                let result = work(resolver.as_ref(), &scope);
                let _ = tx.send(complete(scope, result));
            }
            Mode::Runtime(runtime) => {
                runtime.spawn(async move {
                    let worker_scope = Arc::clone(&scope);
                    let result = tokio::task::spawn_blocking(move || {
                        work(resolver.as_ref(), &worker_scope)
                    })
                    .await
                    .unwrap_or_else(|err| Err(ResolveError::Aborted(err.to_string())));
                    // The receiver only goes away at shutdown.
                    let _ = tx.send(complete(scope, result));
                });
            }
        }
    }

    /// Completions that arrived since the last call, oldest first.
    pub fn drain(&mut self) -> Vec<Completion> {
        let mut out = Vec::new();
        while let Ok(completion) = self.rx.try_recv() {
            out.push(completion);
        }
        out
    }

    /// Waits for the next completion. Used by hosts without their own loop.
    pub async fn recv(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }
}
