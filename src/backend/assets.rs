// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Scopedeck-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scopedeck and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The asset-management backend: projects, then an asset tree per project.
//!
//! Page 0 lists the projects the user may work in. Page 1 shows the assets of
//! the entered project as a tree (nested by each asset's visual parent) with a
//! task selector. Picking an asset enters its task matching the selector.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use super::search;
use super::{
    BackendEvent, BackendInput, PageRow, PageView, PlacedPage, PlacedPages, WorkspaceBackend,
    WorkspaceError,
};
use crate::model::{AssetScope, ProjectScope, Scope, ScopeKind, ScopeName, MAX_SCOPE_DEPTH};
use crate::nav::{SlidePages, Viewport};

pub const MEMBER_ROLE: &str = "member";

const PROJECT_PAGE: usize = 0;
const ASSET_PAGE: usize = 1;

fn project_of(scope: &Scope) -> Option<&ProjectScope> {
    match scope.kind() {
        ScopeKind::Project(project) => Some(project),
        _ => None,
    }
}

fn asset_of(scope: &Scope) -> Option<&AssetScope> {
    match scope.kind() {
        ScopeKind::Asset(asset) => Some(asset),
        _ => None,
    }
}

/// Only assets listing the task count as tasked.
pub fn is_asset_tasked(asset: &AssetScope, task: Option<&str>) -> bool {
    task.is_some_and(|task| asset.tasks.iter().any(|t| t == task))
}

fn is_listed_project(project: &ProjectScope) -> bool {
    project.is_active
        && (project.roles.is_empty() || project.roles.iter().any(|role| role == MEMBER_ROLE))
}

fn step(cursor: usize, len: usize, forward: bool) -> usize {
    match (len, forward) {
        (0, _) => 0,
        (_, true) => (cursor + 1).min(len - 1),
        (_, false) => cursor.saturating_sub(1),
    }
}

#[derive(Debug, Default)]
struct ProjectList {
    projects: Vec<Arc<Scope>>,
    search: String,
    cursor: usize,
}

impl ProjectList {
    fn refresh(&mut self, scopes: &[Arc<Scope>]) {
        self.projects = scopes
            .iter()
            .filter(|scope| project_of(scope).is_some_and(is_listed_project))
            .cloned()
            .collect();
        self.cursor = 0;
    }

    fn clear(&mut self) {
        self.projects.clear();
        self.cursor = 0;
    }

    fn visible(&self) -> Vec<usize> {
        search::rank(
            &self.search,
            self.projects.iter().map(|project| project.name().as_str()),
        )
    }

    fn selected(&self) -> Option<&Arc<Scope>> {
        let idx = *self.visible().get(self.cursor)?;
        self.projects.get(idx)
    }

    fn view(&self) -> PageView {
        let rows = self
            .visible()
            .into_iter()
            .map(|idx| PageRow {
                label: self.projects[idx].name().to_string(),
                depth: 0,
                dimmed: false,
            })
            .collect::<Vec<_>>();
        PageView {
            title: "Projects".to_owned(),
            header: Vec::new(),
            search: self.search.clone(),
            search_placeholder: "search projects..",
            cursor: (!rows.is_empty()).then_some(self.cursor),
            rows,
            footer: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct AssetNode {
    scope: Arc<Scope>,
    depth: usize,
    parent: Option<usize>,
}

#[derive(Debug, Default)]
struct AssetTree {
    /// Depth-first order, parents before their children.
    nodes: Vec<AssetNode>,
    task: Option<String>,
    tasked_only: bool,
    search: String,
    cursor: usize,
}

impl AssetTree {
    /// Forgets the loaded assets; task, filters and search stay.
    fn clear(&mut self) {
        self.nodes.clear();
        self.cursor = 0;
    }

    fn refresh(&mut self, scopes: &[Arc<Scope>]) {
        self.clear();

        let assets = scopes
            .iter()
            .filter_map(|scope| asset_of(scope).map(|asset| (scope, asset)))
            .collect::<Vec<_>>();
        let hidden = assets
            .iter()
            .filter(|(_, asset)| asset.is_hidden)
            .map(|(scope, _)| scope.name().as_str())
            .collect::<BTreeSet<_>>();
        let known = assets
            .iter()
            .map(|(scope, _)| scope.name().as_str())
            .collect::<BTreeSet<_>>();

        let mut roots = Vec::new();
        let mut children: BTreeMap<&str, Vec<&Arc<Scope>>> = BTreeMap::new();
        for (scope, asset) in &assets {
            if asset.is_hidden {
                continue;
            }
            match asset.visual_parent.as_ref().map(ScopeName::as_str) {
                None => roots.push(*scope),
                Some(parent) if hidden.contains(parent) => {}
                Some(parent) if known.contains(parent) => {
                    children.entry(parent).or_default().push(*scope);
                }
                Some(parent) => {
                    debug!(asset = %scope.name(), parent, "visual parent missing, listing at top");
                    roots.push(*scope);
                }
            }
        }

        let mut stack = roots
            .into_iter()
            .rev()
            .map(|scope| (scope, 0usize, None))
            .collect::<Vec<_>>();
        while let Some((scope, depth, parent)) = stack.pop() {
            let idx = self.nodes.len();
            self.nodes.push(AssetNode {
                scope: Arc::clone(scope),
                depth,
                parent,
            });
            if depth + 1 >= MAX_SCOPE_DEPTH {
                continue;
            }
            if let Some(kids) = children.get(scope.name().as_str()) {
                stack.extend(kids.iter().rev().map(|kid| (*kid, depth + 1, Some(idx))));
            }
        }
    }

    fn is_tasked(&self, node: &AssetNode) -> bool {
        asset_of(&node.scope).is_some_and(|asset| is_asset_tasked(asset, self.task.as_deref()))
    }

    fn accepts_itself(&self, node: &AssetNode) -> bool {
        if !search::matches(&self.search, node.scope.name().as_str()) {
            return false;
        }
        if !self.tasked_only {
            return true;
        }
        let silo = asset_of(&node.scope).is_some_and(|asset| asset.is_silo);
        !silo && self.is_tasked(node)
    }

    /// Node indices shown: accepted nodes and the ancestors of accepted nodes.
    fn visible(&self) -> Vec<usize> {
        let mut accepted = self
            .nodes
            .iter()
            .map(|node| self.accepts_itself(node))
            .collect::<Vec<_>>();
        for idx in (0..self.nodes.len()).rev() {
            if accepted[idx] {
                if let Some(parent) = self.nodes[idx].parent {
                    accepted[parent] = true;
                }
            }
        }
        (0..self.nodes.len()).filter(|idx| accepted[*idx]).collect()
    }

    fn selected(&self) -> Option<&Arc<Scope>> {
        let idx = *self.visible().get(self.cursor)?;
        self.nodes.get(idx).map(|node| &node.scope)
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible().len().saturating_sub(1));
    }

    fn rows(&self) -> Vec<PageRow> {
        self.visible()
            .into_iter()
            .map(|idx| {
                let node = &self.nodes[idx];
                PageRow {
                    label: node.scope.name().to_string(),
                    depth: node.depth,
                    dimmed: !self.is_tasked(node),
                }
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct AssetsBackend {
    entrance: Option<Arc<Scope>>,
    project: Option<Arc<Scope>>,
    current_asset: Option<String>,
    current_task: Option<String>,
    projects: ProjectList,
    assets: AssetTree,
    tasks: Vec<String>,
    task_index: usize,
    slider: SlidePages,
    page: usize,
    events: Vec<BackendEvent>,
}

impl Default for AssetsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetsBackend {
    pub const NAME: &'static str = "assets";

    pub fn new() -> Self {
        Self {
            entrance: None,
            project: None,
            current_asset: None,
            current_task: None,
            projects: ProjectList::default(),
            assets: AssetTree::default(),
            tasks: Vec::new(),
            task_index: 0,
            slider: SlidePages::new(2),
            page: PROJECT_PAGE,
            events: Vec::new(),
        }
    }

    fn set_page(&mut self, page: usize, now: Instant) {
        let current = self.slider.current_index();
        if current == page && self.page == page {
            return;
        }
        let direction = if page > current { "right" } else { "left" };
        self.page = page;
        self.slider.slide_view(page, direction, now);
    }

    pub fn current_task(&self) -> Option<&str> {
        self.tasks.get(self.task_index).map(String::as_str)
    }

    pub fn set_task(&mut self, task: &str) {
        if let Some(idx) = self.tasks.iter().position(|t| t == task) {
            self.select_task(idx);
        }
    }

    fn select_task(&mut self, idx: usize) {
        self.task_index = idx;
        self.assets.task = self.current_task().map(str::to_owned);
        self.assets.clamp_cursor();
    }

    fn cycle_task(&mut self, forward: bool) {
        let len = self.tasks.len();
        if len == 0 {
            return;
        }
        let idx = if forward {
            (self.task_index + 1) % len
        } else {
            (self.task_index + len - 1) % len
        };
        self.select_task(idx);
    }

    pub fn set_tasked_only(&mut self, enabled: bool) {
        self.assets.tasked_only = enabled;
        self.assets.clamp_cursor();
    }

    pub fn set_asset_search(&mut self, text: &str) {
        self.assets.search = text.to_owned();
        self.assets.cursor = 0;
    }

    pub fn set_project_search(&mut self, text: &str) {
        self.projects.search = text.to_owned();
        self.projects.cursor = 0;
    }

    /// Names of the listed projects, in display order.
    pub fn project_names(&self) -> Vec<String> {
        self.projects.view().rows.into_iter().map(|row| row.label).collect()
    }

    /// Visible asset rows, in display order.
    pub fn asset_rows(&self) -> Vec<PageRow> {
        self.assets.rows()
    }

    fn on_home(&mut self) {
        match &self.entrance {
            Some(entrance) => self
                .events
                .push(BackendEvent::WorkspaceChanged(Arc::clone(entrance))),
            None => warn!("BUG: home requested before any entrance was entered"),
        }
    }

    /// Enters the task of `asset` matching the task selector.
    pub fn on_asset_selected(&mut self, asset: &Arc<Scope>) {
        let Some(task) = self.current_task().map(str::to_owned) else {
            warn!("no matched task for {:?}", asset.name().as_str());
            return;
        };
        if !asset.tasks().iter().any(|t| *t == task) {
            warn!("no matched task for {:?}", asset.name().as_str());
            return;
        }
        let scope = ScopeName::new(task)
            .map_err(|err| err.to_string())
            .and_then(|name| {
                Scope::child(asset, name, ScopeKind::Task).map_err(|err| err.to_string())
            });
        match scope {
            Ok(task) => self.events.push(BackendEvent::WorkspaceChanged(task)),
            Err(err) => warn!("cannot enter task of {:?}: {err}", asset.name().as_str()),
        }
    }

    fn activate(&mut self) {
        match self.page {
            PROJECT_PAGE => {
                if let Some(project) = self.projects.selected().cloned() {
                    self.events.push(BackendEvent::WorkspaceChanged(project));
                }
            }
            _ => {
                if let Some(asset) = self.assets.selected().cloned() {
                    self.on_asset_selected(&asset);
                }
            }
        }
    }

    fn asset_view(&self) -> PageView {
        let rows = self.assets.rows();
        let task = match self.current_task() {
            Some(task) => format!("task: {task} ({}/{})", self.task_index + 1, self.tasks.len()),
            None => "task: -".to_owned(),
        };
        let tasked = if self.assets.tasked_only { "[x]" } else { "[ ]" };
        PageView {
            title: "Assets".to_owned(),
            header: vec![
                self.project
                    .as_ref()
                    .map_or_else(|| "current project..".to_owned(), |p| p.name().to_string()),
                format!("{tasked} Show Tasked Only   {task}"),
            ],
            search: self.assets.search.clone(),
            search_placeholder: "search assets..",
            cursor: (!rows.is_empty()).then_some(self.assets.cursor),
            rows,
            footer: vec![
                self.current_asset
                    .clone()
                    .unwrap_or_else(|| "current asset..".to_owned()),
                self.current_task
                    .clone()
                    .unwrap_or_else(|| "current task..".to_owned()),
            ],
        }
    }
}

impl WorkspaceBackend for AssetsBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn icon_path(&self) -> &str {
        "assets"
    }

    fn enter_workspace(
        &mut self,
        scope: &Arc<Scope>,
        _backend_changed: bool,
        now: Instant,
    ) -> Result<(), WorkspaceError> {
        match scope.kind() {
            ScopeKind::Entrance(_) => {
                let same_root = self
                    .entrance
                    .as_ref()
                    .is_some_and(|entrance| entrance.display_path() == scope.display_path());
                if !same_root {
                    self.projects.clear();
                }
                self.entrance = Some(Arc::clone(scope));
                self.current_asset = None;
                self.current_task = None;
                self.set_page(PROJECT_PAGE, now);
            }
            ScopeKind::Project(project) => {
                self.assets.clear();
                self.project = Some(Arc::clone(scope));
                self.current_asset = None;
                self.current_task = None;
                self.set_page(ASSET_PAGE, now);
                self.tasks = project.tasks.clone();
                self.select_task(0);
            }
            ScopeKind::Asset(_) => {
                self.current_asset = Some(scope.name().to_string());
                self.current_task = None;
            }
            ScopeKind::Task => {
                self.current_asset = scope.upstream().map(|asset| asset.name().to_string());
                self.current_task = Some(scope.name().to_string());
                self.events.push(BackendEvent::ToolsRequested(Arc::clone(scope)));
            }
        }
        Ok(())
    }

    fn update_workspace(
        &mut self,
        scope: &Arc<Scope>,
        children: &[Arc<Scope>],
    ) -> Result<(), WorkspaceError> {
        let expected = scope.variant().expected_child();
        if let Some(child) = children
            .iter()
            .map(|child| child.variant())
            .find(|variant| Some(*variant) != expected)
        {
            return Err(WorkspaceError::unsupported_children(Self::NAME, scope, child));
        }

        match scope.kind() {
            ScopeKind::Entrance(_) => self.projects.refresh(children),
            ScopeKind::Project(_) => self.assets.refresh(children),
            ScopeKind::Asset(_) | ScopeKind::Task => {}
        }
        Ok(())
    }

    fn on_cache_cleared(&mut self) {
        self.projects.cursor = 0;
        self.assets.cursor = 0;
        self.current_asset = None;
        self.current_task = None;
    }

    fn drain_events(&mut self) -> Vec<BackendEvent> {
        std::mem::take(&mut self.events)
    }

    fn current_page(&self) -> usize {
        self.slider.current_index()
    }

    fn tick(&mut self, now: Instant) -> bool {
        let animating = self.slider.is_animating();
        self.slider.tick(now) || animating
    }

    fn handle_input(&mut self, input: BackendInput, _now: Instant) {
        let on_projects = self.page == PROJECT_PAGE;
        match input {
            BackendInput::Up | BackendInput::Down => {
                let forward = input == BackendInput::Down;
                if on_projects {
                    let len = self.projects.visible().len();
                    self.projects.cursor = step(self.projects.cursor, len, forward);
                } else {
                    let len = self.assets.visible().len();
                    self.assets.cursor = step(self.assets.cursor, len, forward);
                }
            }
            BackendInput::Activate => self.activate(),
            BackendInput::Home => {
                if !on_projects {
                    self.on_home();
                }
            }
            BackendInput::SearchChar(ch) => {
                if on_projects {
                    let text = format!("{}{ch}", self.projects.search);
                    self.set_project_search(&text);
                } else {
                    let text = format!("{}{ch}", self.assets.search);
                    self.set_asset_search(&text);
                }
            }
            BackendInput::SearchBackspace => {
                if on_projects {
                    let mut text = self.projects.search.clone();
                    text.pop();
                    self.set_project_search(&text);
                } else {
                    let mut text = self.assets.search.clone();
                    text.pop();
                    self.set_asset_search(&text);
                }
            }
            BackendInput::ToggleTaskedOnly => {
                if !on_projects {
                    self.set_tasked_only(!self.assets.tasked_only);
                }
            }
            BackendInput::NextTask => self.cycle_task(true),
            BackendInput::PreviousTask => self.cycle_task(false),
        }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.slider.set_viewport(viewport);
    }

    fn pages(&self, now: Instant) -> PlacedPages {
        self.slider
            .placements(now)
            .into_iter()
            .map(|placement| PlacedPage {
                placement,
                view: if placement.page == PROJECT_PAGE {
                    self.projects.view()
                } else {
                    self.asset_view()
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use rstest::{fixture, rstest};
    use tracing::Level;

    use super::{AssetsBackend, MEMBER_ROLE};
    use crate::backend::{BackendEvent, BackendInput, WorkspaceBackend, WorkspaceError};
    use crate::model::{AssetScope, ProjectScope, Scope, ScopeKind, ScopeName, ScopeVariant};
    use crate::nav::SLIDE_DURATION;
    use crate::test_support::capture_logs;

    fn name(value: &str) -> ScopeName {
        ScopeName::new(value).expect("scope name")
    }

    fn project(entrance: &Arc<Scope>, label: &str, active: bool, roles: &[&str]) -> Arc<Scope> {
        Scope::child(
            entrance,
            name(label),
            ScopeKind::Project(ProjectScope {
                roles: roles.iter().map(|r| (*r).to_owned()).collect(),
                is_active: active,
                tasks: vec!["model".to_owned(), "rig".to_owned()],
            }),
        )
        .expect("project")
    }

    fn asset(project: &Arc<Scope>, label: &str, parent: Option<&str>, tasks: &[&str]) -> Arc<Scope> {
        asset_with(project, label, parent, tasks, |_| {})
    }

    fn asset_with(
        project: &Arc<Scope>,
        label: &str,
        parent: Option<&str>,
        tasks: &[&str],
        tweak: impl FnOnce(&mut AssetScope),
    ) -> Arc<Scope> {
        let mut payload = AssetScope {
            visual_parent: parent.map(name),
            tasks: tasks.iter().map(|t| (*t).to_owned()).collect(),
            ..AssetScope::default()
        };
        tweak(&mut payload);
        Scope::child(project, name(label), ScopeKind::Asset(payload)).expect("asset")
    }

    struct Studio {
        entrance: Arc<Scope>,
        alpha: Arc<Scope>,
        assets: Vec<Arc<Scope>>,
    }

    #[fixture]
    fn studio() -> Studio {
        let entrance = Scope::entrance(name("Studio"), "assets");
        let alpha = project(&entrance, "alpha", true, &[]);
        let assets = vec![
            asset(&alpha, "chars", None, &[]),
            asset(&alpha, "hero", Some("chars"), &["model", "rig"]),
            asset(&alpha, "sidekick", Some("chars"), &["rig"]),
            asset_with(&alpha, "secret", None, &["model"], |a| a.is_hidden = true),
            asset(&alpha, "secret_child", Some("secret"), &["model"]),
            asset_with(&alpha, "library", None, &["model"], |a| a.is_silo = true),
        ];
        Studio {
            entrance,
            alpha,
            assets,
        }
    }

    fn entered(studio: &Studio) -> AssetsBackend {
        let now = Instant::now();
        let mut backend = AssetsBackend::new();
        backend
            .enter_workspace(&studio.entrance, true, now)
            .expect("entrance");
        backend
            .update_workspace(&studio.entrance, &[Arc::clone(&studio.alpha)])
            .expect("projects");
        backend
            .enter_workspace(&studio.alpha, false, now)
            .expect("project");
        backend
            .update_workspace(&studio.alpha, &studio.assets)
            .expect("assets");
        backend.tick(now + SLIDE_DURATION);
        backend
    }

    fn labels(backend: &AssetsBackend) -> Vec<String> {
        backend
            .asset_rows()
            .into_iter()
            .map(|row| format!("{}{}", "  ".repeat(row.depth), row.label))
            .collect()
    }

    #[test]
    fn project_list_keeps_active_projects_open_to_members() {
        let entrance = Scope::entrance(name("Studio"), "assets");
        let projects = vec![
            project(&entrance, "open", true, &[]),
            project(&entrance, "members", true, &[MEMBER_ROLE]),
            project(&entrance, "admins", true, &["admin"]),
            project(&entrance, "archived", false, &[]),
        ];
        let mut backend = AssetsBackend::new();
        backend
            .update_workspace(&entrance, &projects)
            .expect("projects");
        assert_eq!(backend.project_names(), ["open", "members"]);

        backend.set_project_search("mem");
        assert_eq!(backend.project_names(), ["members"]);
    }

    #[rstest]
    fn asset_tree_nests_by_visual_parent_and_hides_hidden(studio: Studio) {
        let backend = entered(&studio);
        assert_eq!(labels(&backend), ["chars", "  hero", "  sidekick", "library"]);
        assert_eq!(backend.current_page(), 1);
    }

    #[rstest]
    fn untasked_assets_are_dimmed(studio: Studio) {
        let backend = entered(&studio);
        let dimmed = backend
            .asset_rows()
            .into_iter()
            .filter(|row| row.dimmed)
            .map(|row| row.label)
            .collect::<Vec<_>>();
        assert_eq!(dimmed, ["chars", "sidekick"]);
    }

    #[rstest]
    fn tasked_only_drops_silos_and_untasked_but_keeps_ancestors(studio: Studio) {
        let mut backend = entered(&studio);
        backend.set_tasked_only(true);
        assert_eq!(labels(&backend), ["chars", "  hero"]);

        backend.set_task("rig");
        assert_eq!(labels(&backend), ["chars", "  hero", "  sidekick"]);
    }

    #[rstest]
    fn asset_search_is_recursive(studio: Studio) {
        let mut backend = entered(&studio);
        backend.set_asset_search("side");
        assert_eq!(labels(&backend), ["chars", "  sidekick"]);
    }

    #[rstest]
    fn selecting_asset_enters_matching_task(studio: Studio) {
        let mut backend = entered(&studio);
        backend.on_asset_selected(&studio.assets[1]);

        let events = backend.drain_events();
        let [BackendEvent::WorkspaceChanged(task)] = events.as_slice() else {
            panic!("expected one workspace change, got {events:?}");
        };
        assert_eq!(task.variant(), ScopeVariant::Task);
        assert_eq!(task.display_path(), "Studio/alpha/hero/model");

        let task = Arc::clone(task);
        backend
            .enter_workspace(&task, false, Instant::now())
            .expect("task");
        assert_eq!(backend.drain_events(), [BackendEvent::ToolsRequested(task)]);
        assert_eq!(backend.pages(Instant::now())[0].view.footer, ["hero", "model"]);
    }

    #[rstest]
    fn selecting_untasked_asset_warns(studio: Studio) {
        let mut backend = entered(&studio);
        let ((), logs) = capture_logs(|| backend.on_asset_selected(&studio.assets[2]));
        assert_eq!(logs.count(Level::WARN), 1);
        assert!(logs.messages()[0].contains("no matched task"));
        assert!(backend.drain_events().is_empty());
    }

    #[rstest]
    fn home_returns_to_entrance(studio: Studio) {
        let mut backend = entered(&studio);
        backend.handle_input(BackendInput::Home, Instant::now());
        assert_eq!(
            backend.drain_events(),
            [BackendEvent::WorkspaceChanged(Arc::clone(&studio.entrance))]
        );
    }

    #[rstest]
    fn mismatched_children_are_unsupported(studio: Studio) {
        let mut backend = AssetsBackend::new();
        let err = backend
            .update_workspace(&studio.entrance, &studio.assets)
            .expect_err("assets under entrance");
        assert!(matches!(err, WorkspaceError::UnsupportedScope { .. }));
    }

    #[rstest]
    fn pages_slide_between_projects_and_assets(studio: Studio) {
        let mut backend = entered(&studio);
        let now = Instant::now();
        backend
            .enter_workspace(&studio.entrance, false, now)
            .expect("entrance");
        assert_eq!(backend.pages(now).len(), 2);
        backend.tick(now + SLIDE_DURATION);
        assert_eq!(backend.current_page(), 0);

        backend
            .enter_workspace(&studio.entrance, false, now + SLIDE_DURATION)
            .expect("entrance again");
        assert_eq!(backend.pages(now + SLIDE_DURATION).len(), 1);
    }

    #[rstest]
    fn entering_another_project_drops_the_previous_assets(studio: Studio) {
        let mut backend = entered(&studio);
        let beta = project(&studio.entrance, "beta", true, &[]);
        backend
            .enter_workspace(&beta, false, Instant::now())
            .expect("beta");

        let view = backend
            .pages(Instant::now() + SLIDE_DURATION)
            .into_iter()
            .find(|page| page.placement.page == 1)
            .map(|page| page.view)
            .expect("asset page");
        assert_eq!(view.header[0], "beta");
        assert!(view.rows.is_empty());

        backend.handle_input(BackendInput::Activate, Instant::now());
        assert!(backend.drain_events().is_empty());
    }

    #[rstest]
    fn another_root_drops_the_project_list(studio: Studio) {
        let mut backend = entered(&studio);
        let now = Instant::now();
        backend
            .enter_workspace(&studio.entrance, false, now)
            .expect("same root");
        assert_eq!(backend.project_names(), ["alpha"]);

        let other = Scope::entrance(name("Archive"), "assets");
        backend.enter_workspace(&other, false, now).expect("other root");
        assert!(backend.project_names().is_empty());
    }
}
