// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::{Arc, Weak};

use smallvec::SmallVec;

use super::ids::{NameError, ScopeName};

/// Upper bound for any upstream walk. Real hierarchies are four levels deep.
pub const MAX_SCOPE_DEPTH: usize = 64;

/// Discriminant of a [`ScopeKind`], used for dispatch tables and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeVariant {
    Entrance,
    Project,
    Asset,
    Task,
}

impl ScopeVariant {
    /// The only child variant a scope of this variant may own.
    pub fn expected_child(self) -> Option<ScopeVariant> {
        match self {
            Self::Entrance => Some(Self::Project),
            Self::Project => Some(Self::Asset),
            Self::Asset => Some(Self::Task),
            Self::Task => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Entrance => "entrance",
            Self::Project => "project",
            Self::Asset => "asset",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for ScopeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntranceScope {
    pub backend: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectScope {
    /// Membership roles of the current user. Empty means "open to everyone".
    pub roles: Vec<String>,
    pub is_active: bool,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetScope {
    /// Name of the asset this one is nested under in the asset tree.
    pub visual_parent: Option<ScopeName>,
    pub is_hidden: bool,
    pub is_silo: bool,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    Entrance(EntranceScope),
    Project(ProjectScope),
    Asset(AssetScope),
    Task,
}

impl ScopeKind {
    pub fn variant(&self) -> ScopeVariant {
        match self {
            Self::Entrance(_) => ScopeVariant::Entrance,
            Self::Project(_) => ScopeVariant::Project,
            Self::Asset(_) => ScopeVariant::Asset,
            Self::Task => ScopeVariant::Task,
        }
    }
}

/// A node in the navigable hierarchy.
///
/// Scopes are handed around as `Arc<Scope>`. Each node keeps only a weak
/// reference to its upstream, so whoever displays a scope is expected to keep
/// its ancestors alive (see [`ScopePath`]).
#[derive(Debug)]
pub struct Scope {
    name: ScopeName,
    upstream: Option<Weak<Scope>>,
    kind: ScopeKind,
}

impl Scope {
    pub fn entrance(name: ScopeName, backend: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name,
            upstream: None,
            kind: ScopeKind::Entrance(EntranceScope {
                backend: backend.into(),
            }),
        })
    }

    /// Creates a child of `parent`.
    ///
    /// The child variant must be the one `parent` expects; upstream links are
    /// fixed at construction, which keeps the hierarchy acyclic.
    pub fn child(
        parent: &Arc<Scope>,
        name: ScopeName,
        kind: ScopeKind,
    ) -> Result<Arc<Self>, ScopeError> {
        let parent_variant = parent.variant();
        let child_variant = kind.variant();
        if parent_variant.expected_child() != Some(child_variant) {
            return Err(ScopeError::UnexpectedChild {
                parent: parent_variant,
                child: child_variant,
            });
        }

        Ok(Arc::new(Self {
            name,
            upstream: Some(Arc::downgrade(parent)),
            kind,
        }))
    }

    pub fn name(&self) -> &ScopeName {
        &self.name
    }

    pub fn kind(&self) -> &ScopeKind {
        &self.kind
    }

    pub fn variant(&self) -> ScopeVariant {
        self.kind.variant()
    }

    pub fn upstream(&self) -> Option<Arc<Scope>> {
        self.upstream.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_entrance(&self) -> bool {
        self.upstream.is_none()
    }

    pub fn has_children(&self) -> bool {
        self.variant().expected_child().is_some()
    }

    pub fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// Tasks offered by a project or an asset. Other variants have none.
    pub fn tasks(&self) -> &[String] {
        match &self.kind {
            ScopeKind::Project(project) => &project.tasks,
            ScopeKind::Asset(asset) => &asset.tasks,
            ScopeKind::Entrance(_) | ScopeKind::Task => &[],
        }
    }

    /// Number of upstream hops to the root, bounded by [`MAX_SCOPE_DEPTH`].
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.upstream();
        while let Some(scope) = cursor {
            depth += 1;
            if depth >= MAX_SCOPE_DEPTH {
                break;
            }
            cursor = scope.upstream();
        }
        depth
    }

    /// Root-first names of every live scope above and including this one.
    pub fn display_path(&self) -> String {
        let mut names = vec![self.name.as_str().to_owned()];
        let mut cursor = self.upstream();
        while let Some(scope) = cursor {
            if names.len() >= MAX_SCOPE_DEPTH {
                break;
            }
            names.push(scope.name.as_str().to_owned());
            cursor = scope.upstream();
        }
        names.reverse();
        names.join("/")
    }

    /// Whether two handles point at the same hierarchy position.
    pub fn same_position(&self, other: &Scope) -> bool {
        self.variant() == other.variant() && self.display_path() == other.display_path()
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.same_position(other)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.variant(), self.display_path())
    }
}

/// Strong handles for a scope and all of its ancestors, root first.
#[derive(Debug, Clone)]
pub struct ScopePath {
    chain: SmallVec<[Arc<Scope>; 4]>,
}

impl ScopePath {
    pub fn of(scope: &Arc<Scope>) -> Self {
        let mut chain = SmallVec::<[Arc<Scope>; 4]>::new();
        chain.push(Arc::clone(scope));
        let mut cursor = scope.upstream();
        while let Some(next) = cursor {
            if chain.len() >= MAX_SCOPE_DEPTH {
                break;
            }
            cursor = next.upstream();
            chain.push(next);
        }
        chain.reverse();
        Self { chain }
    }

    pub fn root(&self) -> &Arc<Scope> {
        &self.chain[0]
    }

    pub fn leaf(&self) -> &Arc<Scope> {
        &self.chain[self.chain.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Scope>> {
        self.chain.iter()
    }

    /// The closest scope of `variant` on this path.
    pub fn find(&self, variant: ScopeVariant) -> Option<&Arc<Scope>> {
        self.chain.iter().rev().find(|scope| scope.variant() == variant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    InvalidName(NameError),
    UnexpectedChild {
        parent: ScopeVariant,
        child: ScopeVariant,
    },
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "invalid scope name: {err}"),
            Self::UnexpectedChild { parent, child } => {
                write!(f, "a {parent} scope cannot own a {child} scope")
            }
        }
    }
}

impl std::error::Error for ScopeError {}

impl From<NameError> for ScopeError {
    fn from(value: NameError) -> Self {
        Self::InvalidName(value)
    }
}
