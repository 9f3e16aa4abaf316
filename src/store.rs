//! View state shared between the orchestrator and the UI bindings.
//!
//! The store is handed around through the application [`Context`]
//! (dependency injection) rather than living in a process global. Writes
//! are whole-field replacements behind one lock, so readers always observe
//! a complete state; a `watch` channel carries a change counter for
//! observers that re-run the pipeline on writes.
//!
//! [`Context`]: crate::context::Context

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::models::{LinkKey, LinkType, NodeType};

/// Active graph filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub node_types: Vec<NodeType>,
    pub link_types: Vec<LinkType>,
    /// When set, only nodes carrying one of these relationship types survive.
    pub relationship_types: Option<Vec<String>>,
    pub search_query: String,
    /// Maximum hop distance from the root; unset disables the cutoff.
    pub max_distance: Option<u32>,
    pub show_labels: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            node_types: NodeType::ALL.to_vec(),
            link_types: LinkType::ALL.to_vec(),
            relationship_types: None,
            search_query: String::new(),
            max_distance: None,
            show_labels: true,
        }
    }
}

/// Renderer preferences and transient highlight state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPreferences {
    pub dark_mode: bool,
    pub node_size: f32,
    pub link_width: f32,
    pub label_font_size: f32,
    /// Force-simulation charge; negative repels.
    pub charge_strength: f32,
    /// Force-simulation target link length.
    pub link_distance: f32,
    /// Hovered or otherwise singled-out node.
    pub highlighted_node: Option<String>,
    /// Links of the root → selection path.
    pub highlighted_path: Option<Vec<LinkKey>>,
    pub auto_zoom: bool,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            node_size: 8.0,
            link_width: 1.5,
            label_font_size: 12.0,
            charge_strength: -300.0,
            link_distance: 100.0,
            highlighted_node: None,
            highlighted_path: None,
            auto_zoom: true,
        }
    }
}

/// Complete view state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub filters: FilterState,
    pub view_preferences: ViewPreferences,
    pub selected_node: Option<String>,
    pub zoom_level: f32,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            view_preferences: ViewPreferences::default(),
            selected_node: None,
            zoom_level: 1.0,
            is_loading: false,
            error: None,
            last_updated: None,
        }
    }
}

/// Cheap-to-clone handle to the shared view state.
#[derive(Clone)]
pub struct ViewStateStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<ViewState>,
    changes: watch::Sender<u64>,
}

impl ViewStateStore {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(ViewState::default()),
                changes,
            }),
        }
    }

    /// Observer handle; the carried counter increments on every write.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    pub fn snapshot(&self) -> ViewState {
        self.read(|state| state.clone())
    }

    pub fn filters(&self) -> FilterState {
        self.read(|state| state.filters.clone())
    }

    pub fn view_preferences(&self) -> ViewPreferences {
        self.read(|state| state.view_preferences.clone())
    }

    pub fn selected_node(&self) -> Option<String> {
        self.read(|state| state.selected_node.clone())
    }

    /// Merge-style update of the filter sub-object.
    pub fn update_filters(&self, update: impl FnOnce(&mut FilterState)) {
        self.write(|state| update(&mut state.filters));
    }

    /// Merge-style update of the view preferences.
    pub fn update_view_preferences(&self, update: impl FnOnce(&mut ViewPreferences)) {
        self.write(|state| update(&mut state.view_preferences));
    }

    /// Restores the documented filter defaults.
    pub fn reset_filters(&self) {
        self.write(|state| state.filters = FilterState::default());
    }

    /// Restores the documented view-preference defaults.
    pub fn reset_view_preferences(&self) {
        self.write(|state| state.view_preferences = ViewPreferences::default());
    }

    pub fn set_selected_node(&self, node_id: Option<String>) {
        self.write(|state| state.selected_node = node_id);
    }

    pub fn set_zoom_level(&self, zoom: f32) {
        self.write(|state| state.zoom_level = zoom);
    }

    /// Resets zoom and lets the renderer re-frame the graph.
    pub fn center_graph(&self) {
        self.write(|state| {
            state.zoom_level = 1.0;
            state.view_preferences.auto_zoom = true;
        });
    }

    /// `None` clears the node highlight.
    pub fn highlight_node(&self, node_id: Option<String>) {
        self.write(|state| state.view_preferences.highlighted_node = node_id);
    }

    /// `None` clears the path highlight.
    pub fn highlight_path(&self, path: Option<Vec<LinkKey>>) {
        self.write(|state| state.view_preferences.highlighted_path = path);
    }

    pub fn set_loading(&self, loading: bool) {
        self.write(|state| state.is_loading = loading);
    }

    pub fn set_error(&self, message: impl Into<String>) {
        self.write(|state| state.error = Some(message.into()));
    }

    pub fn clear_error(&self) {
        self.write(|state| state.error = None);
    }

    pub fn touch_updated(&self, at: DateTime<Utc>) {
        self.write(|state| state.last_updated = Some(at));
    }

    /// Restores every field to its default; used by reset actions and for
    /// test isolation.
    pub fn reset(&self) {
        self.write(|state| *state = ViewState::default());
    }

    fn read<T>(&self, f: impl FnOnce(&ViewState) -> T) -> T {
        let state = self.inner.state.read().unwrap_or_else(|e| e.into_inner());
        f(&state)
    }

    fn write(&self, f: impl FnOnce(&mut ViewState)) {
        {
            let mut state = self.inner.state.write().unwrap_or_else(|e| e.into_inner());
            f(&mut state);
        }
        self.inner.changes.send_modify(|version| *version += 1);
    }
}

impl Default for ViewStateStore {
    fn default() -> Self {
        Self::new()
    }
}
