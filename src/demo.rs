// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A small in-memory studio used to drive the terminal front-end without a
//! real resolution engine.
//!
//! Contexts carry the list of scopes they were resolved through in their
//! JSON payload; the environment is rebuilt from that list on demand.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{json, Value};

use crate::environ::{Contribution, EnvValue, Provenance, ResolvedEnvironment};
use crate::model::{
    AssetScope, ProjectScope, ResolvedContext, Scope, ScopeKind, ScopeName, ScopePath,
    ScopeVariant, SuiteTool, ToolMetadata, ToolVariant,
};
use crate::resolver::{ResolveError, Resolver};

const STUDIO: &str = "studio";

struct DemoProject {
    name: &'static str,
    roles: &'static [&'static str],
    active: bool,
    tasks: &'static [&'static str],
    assets: &'static [DemoAsset],
}

struct DemoAsset {
    name: &'static str,
    parent: Option<&'static str>,
    silo: bool,
    hidden: bool,
    tasks: &'static [&'static str],
}

const fn asset(
    name: &'static str,
    parent: Option<&'static str>,
    tasks: &'static [&'static str],
) -> DemoAsset {
    DemoAsset {
        name,
        parent,
        silo: false,
        hidden: false,
        tasks,
    }
}

const fn silo(name: &'static str) -> DemoAsset {
    DemoAsset {
        name,
        parent: None,
        silo: true,
        hidden: false,
        tasks: &[],
    }
}

const PROJECTS: &[DemoProject] = &[
    DemoProject {
        name: "sintel",
        roles: &[],
        active: true,
        tasks: &["model", "rig", "lookdev", "comp"],
        assets: &[
            silo("chars"),
            asset("sintel", Some("chars"), &["model", "rig", "lookdev"]),
            asset("scales", Some("chars"), &["model", "rig"]),
            silo("props"),
            asset("staff", Some("props"), &["model", "lookdev"]),
            asset("pouch", Some("props"), &["model"]),
            silo("shots"),
            asset("sh010", Some("shots"), &["comp"]),
            asset("sh020", Some("shots"), &["comp"]),
            DemoAsset {
                name: "sh030",
                parent: Some("shots"),
                silo: false,
                hidden: true,
                tasks: &["comp"],
            },
        ],
    },
    DemoProject {
        name: "spring",
        roles: &["member"],
        active: true,
        tasks: &["model", "anim", "fx"],
        assets: &[
            silo("env"),
            asset("forest", Some("env"), &["model", "fx"]),
            asset("cave", Some("env"), &["model"]),
            asset("spring", None, &["model", "anim"]),
        ],
    },
    DemoProject {
        name: "agent327",
        roles: &["admin"],
        active: true,
        tasks: &["anim"],
        assets: &[asset("hendrik", None, &["anim"])],
    },
    DemoProject {
        name: "caminandes",
        roles: &[],
        active: false,
        tasks: &["model"],
        assets: &[asset("koro", None, &["model"])],
    },
];

const PROFILES: &[&str] = &["generalist", "lighting", "pipeline"];

/// `(name, label, version)` of the tools offered in every workspace.
const TOOLS: &[(&str, &str, &str)] = &[
    ("blender", "Blender", "4.2"),
    ("houdini", "Houdini", "20.5"),
    ("nuke", "Nuke", "15.1"),
    ("python", "Python Shell", "3.11"),
];

/// Resolves the built-in studio. Work directories live under `work_root`.
#[derive(Debug, Clone)]
pub struct DemoResolver {
    work_root: PathBuf,
}

impl Default for DemoResolver {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join("scopedeck-demo"))
    }
}

fn failed(err: impl ToString) -> ResolveError {
    ResolveError::Failed(err.to_string())
}

fn scope_name(value: &str) -> Result<ScopeName, ResolveError> {
    ScopeName::new(value).map_err(failed)
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

impl DemoResolver {
    pub fn new(work_root: impl Into<PathBuf>) -> Self {
        Self {
            work_root: work_root.into(),
        }
    }

    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    /// Walks each backend down its first branch, ending on the first task
    /// when the branch offers one, and resolves tools and the first tool's
    /// environment there. One summary line per backend.
    pub fn check<S: AsRef<str>>(&self, backends: &[S]) -> Result<Vec<String>, ResolveError> {
        let mut lines = Vec::with_capacity(backends.len());
        for backend in backends.iter().map(AsRef::as_ref) {
            let mut scope = Scope::entrance(scope_name(backend)?, backend);
            let mut visited = 1;
            while let Some(child) = self.resolve_children(&scope)?.into_iter().next() {
                scope = child;
                visited += 1;
            }
            if let Some(task) = scope.tasks().first() {
                scope = Scope::child(&scope, scope_name(task)?, ScopeKind::Task).map_err(failed)?;
                visited += 1;
            }

            let tools = self.resolve_tools(&scope)?;
            let variables = match tools.first() {
                Some(tool) => self.resolve_environment(&tool.context)?.len(),
                None => 0,
            };
            lines.push(format!(
                "{backend}: {} ({visited} scopes, {} tools, {variables} variables)",
                scope.display_path(),
                tools.len()
            ));
        }
        Ok(lines)
    }

    fn backend_of(path: &ScopePath) -> Option<&str> {
        match path.root().kind() {
            ScopeKind::Entrance(entrance) => Some(entrance.backend.as_str()),
            _ => None,
        }
    }

    fn project(name: &str) -> Option<&'static DemoProject> {
        PROJECTS.iter().find(|project| project.name == name)
    }

    fn children_of(&self, scope: &Arc<Scope>) -> Result<Vec<Arc<Scope>>, ResolveError> {
        let path = ScopePath::of(scope);
        let backend = Self::backend_of(&path).unwrap_or_default();
        let kinds: Vec<(&str, ScopeKind)> = match (backend, scope.kind()) {
            ("profiles", ScopeKind::Entrance(_)) => PROFILES
                .iter()
                .map(|profile| {
                    let kind = ScopeKind::Project(ProjectScope {
                        is_active: true,
                        ..ProjectScope::default()
                    });
                    (*profile, kind)
                })
                .collect(),
            (_, ScopeKind::Entrance(_)) => PROJECTS
                .iter()
                .map(|project| {
                    let kind = ScopeKind::Project(ProjectScope {
                        roles: owned(project.roles),
                        is_active: project.active,
                        tasks: owned(project.tasks),
                    });
                    (project.name, kind)
                })
                .collect(),
            ("profiles", ScopeKind::Project(_)) => Vec::new(),
            (_, ScopeKind::Project(_)) => {
                let project = Self::project(scope.name().as_str()).ok_or_else(|| {
                    failed(format!("unknown project {:?}", scope.name().as_str()))
                })?;
                project
                    .assets
                    .iter()
                    .map(|asset| {
                        let kind = ScopeKind::Asset(AssetScope {
                            visual_parent: asset.parent.map(scope_name).transpose()?,
                            is_hidden: asset.hidden,
                            is_silo: asset.silo,
                            tasks: owned(asset.tasks),
                        });
                        Ok((asset.name, kind))
                    })
                    .collect::<Result<_, ResolveError>>()?
            }
            (_, ScopeKind::Asset(_) | ScopeKind::Task) => Vec::new(),
        };

        kinds
            .into_iter()
            .map(|(name, kind)| Scope::child(scope, scope_name(name)?, kind).map_err(failed))
            .collect()
    }

    /// Names of the scopes a workspace resolves through, outermost first.
    fn layers(path: &ScopePath) -> Vec<String> {
        let mut layers = vec![STUDIO.to_owned()];
        layers.extend(
            path.iter()
                .filter(|scope| scope.variant() != ScopeVariant::Entrance)
                .map(|scope| scope.name().to_string()),
        );
        layers
    }

    fn tool_for(layers: &[String], (name, label, version): (&str, &str, &str)) -> SuiteTool {
        let ctx_name = layers[1..].join(".");
        let packages = [
            format!("{name}-{version}"),
            format!("{}-tools-1.0", layers.last().map_or(STUDIO, String::as_str)),
        ];
        SuiteTool {
            name: name.to_owned(),
            ctx_name: ctx_name.clone(),
            context: Arc::new(ResolvedContext::new(
                ctx_name.clone(),
                json!({
                    "name": ctx_name,
                    "layers": layers,
                    "tool": name,
                    "packages": packages,
                    "implicits": ["platform-linux", "arch-x86_64"],
                }),
            )),
            metadata: ToolMetadata {
                label: label.to_owned(),
                icon: Some("{root}/resources/icon_{w}x{h}.png".to_owned()),
            },
            variant: ToolVariant {
                package: name.to_owned(),
                version: version.to_owned(),
                root: format!("/opt/packages/{name}/{version}"),
            },
        }
    }

    fn layers_of(context: &ResolvedContext) -> Result<Vec<String>, ResolveError> {
        context
            .data()
            .get("layers")
            .and_then(Value::as_array)
            .map(|layers| {
                layers
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .ok_or_else(|| failed(format!("context {:?} has no layers", context.name())))
    }

    /// Every contribution a context's layers make, in application order.
    fn contributions(
        context: &ResolvedContext,
    ) -> Result<Vec<(String, Contribution)>, ResolveError> {
        let layers = Self::layers_of(context)?;
        let tool = context.data().get("tool").and_then(Value::as_str).unwrap_or("shell");
        let mut out = Vec::new();
        let mut path = String::new();
        for layer in &layers {
            let bin = format!("/opt/{layer}/bin");
            path = if path.is_empty() { bin } else { format!("{bin}:{path}") };
            out.push((
                "PATH".to_owned(),
                Contribution {
                    scope: layer.as_str().into(),
                    value: path.clone(),
                },
            ));
        }
        let mut push = |key: &str, layer: &str, value: String| {
            out.push((
                key.to_owned(),
                Contribution {
                    scope: layer.into(),
                    value,
                },
            ));
        };
        push("STUDIO", STUDIO, "Blender Studio".to_owned());
        push("EDITOR", STUDIO, "vim".to_owned());
        push("OCIO", STUDIO, "/opt/studio/ocio/config.ocio".to_owned());
        if let Some(project) = layers.get(1) {
            push("PROJECT", project, project.clone());
            push("OCIO", project, format!("/proj/{project}/color/config.ocio"));
        }
        if let Some(asset) = layers.get(2) {
            push("ASSET", asset, asset.clone());
        }
        if let Some(task) = layers.get(3) {
            push("TASK", task, task.clone());
        }
        push("SCOPEDECK_TOOL", tool, tool.to_owned());
        Ok(out)
    }
}

impl Resolver for DemoResolver {
    fn resolve_children(&self, scope: &Arc<Scope>) -> Result<Vec<Arc<Scope>>, ResolveError> {
        self.children_of(scope)
    }

    fn resolve_tools(&self, scope: &Arc<Scope>) -> Result<Vec<SuiteTool>, ResolveError> {
        let path = ScopePath::of(scope);
        let layers = Self::layers(&path);
        Ok(TOOLS.iter().map(|tool| Self::tool_for(&layers, *tool)).collect())
    }

    fn resolve_environment(
        &self,
        context: &ResolvedContext,
    ) -> Result<ResolvedEnvironment, ResolveError> {
        let mut env = ResolvedEnvironment::new();
        for (key, contribution) in Self::contributions(context)? {
            env.insert(key, EnvValue::new(contribution.value, contribution.scope));
        }
        Ok(env)
    }

    fn inspect_context(&self, context: &ResolvedContext) -> Result<Provenance, ResolveError> {
        let mut provenance = Provenance::new();
        for (key, contribution) in Self::contributions(context)? {
            provenance.entry(key).or_default().push(contribution);
        }
        Ok(provenance)
    }

    fn get_local_overrides(
        &self,
        work_dir: &Path,
    ) -> Result<BTreeMap<String, String>, ResolveError> {
        let mut overrides = BTreeMap::new();
        overrides.insert("SCOPEDECK_WORK_DIR".to_owned(), work_dir.display().to_string());
        if work_dir.ends_with("comp") {
            overrides.insert("NUKE_PATH".to_owned(), work_dir.join("gizmos").display().to_string());
        }
        Ok(overrides)
    }

    fn work_dir(&self, scope: &Arc<Scope>) -> Option<PathBuf> {
        let path = ScopePath::of(scope);
        if path.len() < 2 {
            return None;
        }
        let mut dir = self.work_root.clone();
        for scope in path.iter() {
            dir.push(scope.name().as_str());
        }
        Some(dir)
    }
}
