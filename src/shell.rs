//! Dashboard shell state: sidebar collapse and the mobile drawer, plus the top bar's own
//! mobile menu. All transitions are plain functions over small `Copy` states.

use serde::Serialize;
use tracing::debug;

use crate::identity::Identity;
use crate::navigation::{resolve, Icon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellEvent {
    /// Collapse/expand button in the sidebar header.
    ToggleCollapse,
    /// Menu button in the header (small screens).
    OpenMenu,
    /// Click on the dimmed overlay behind the open drawer.
    DismissOverlay,
    /// A sidebar link was activated.
    NavigateLink,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShellState {
    pub sidebar_collapsed: bool,
    pub mobile_drawer_open: bool,
}

impl ShellState {
    pub fn apply(self, event: ShellEvent) -> ShellState {
        match event {
            ShellEvent::ToggleCollapse => ShellState { sidebar_collapsed: !self.sidebar_collapsed, ..self },
            ShellEvent::OpenMenu => ShellState { mobile_drawer_open: true, ..self },
            ShellEvent::DismissOverlay | ShellEvent::NavigateLink => ShellState { mobile_drawer_open: false, ..self },
        }
    }

    pub fn dispatch(&mut self, event: ShellEvent) {
        let next = self.apply(event);
        debug!(target: "shell", "shell.event {:?} {:?} -> {:?}", event, self, next);
        *self = next;
    }

    /// The overlay only exists while the drawer is open.
    pub fn overlay_visible(&self) -> bool { self.mobile_drawer_open }
}

/// Top bar mobile menu, shown on public pages. Unlike the drawer's menu button this one toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavbarState {
    pub mobile_menu_open: bool,
}

impl NavbarState {
    pub fn toggle(&mut self) { self.mobile_menu_open = !self.mobile_menu_open; }
    pub fn close(&mut self) { self.mobile_menu_open = false; }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// `None` while the sidebar is collapsed (icon only).
    pub label: Option<&'static str>,
    pub path: &'static str,
    pub icon: Icon,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBadge {
    pub name: String,
    pub role_label: &'static str,
}

/// What the shell draws for one identity at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub state: ShellState,
    pub items: Vec<SidebarItem>,
    /// Name and role under the nav list; hidden while collapsed.
    pub badge: Option<UserBadge>,
    pub overlay_visible: bool,
}

impl ShellView {
    pub fn build(state: ShellState, identity: &Identity, location: &str) -> ShellView {
        let expanded = !state.sidebar_collapsed;
        let items = resolve(identity.role())
            .iter()
            .map(|e| SidebarItem { label: expanded.then_some(e.label), path: e.path, icon: e.icon, active: e.path == location })
            .collect();
        let badge = expanded.then(|| UserBadge { name: identity.display_name().to_string(), role_label: identity.role().label() });
        ShellView { state, items, badge, overlay_visible: state.overlay_visible() }
    }

    pub fn active_item(&self) -> Option<&SidebarItem> { self.items.iter().find(|i| i.active) }
}
