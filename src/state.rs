// src/state.rs

use crate::config::{ColorMode, Config};
use crate::model::dataset::Dataset;
use crate::model::elements::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
  Mobile,
  Desktop,
}

impl ViewportClass {
  pub fn classify(width: f64, breakpoint: f64) -> Self {
    if width < breakpoint {
      ViewportClass::Mobile
    } else {
      ViewportClass::Desktop
    }
  }
}

/// Outcome of the one-time data load.
#[derive(Debug, Clone)]
pub enum LoadStatus {
  Loading,
  Ready(Dataset),
  Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
  /// Degrees.
  pub rot_x: f64,
  /// Degrees.
  pub rot_y: f64,
  pub zoom: f64,
}

impl ViewState {
  pub const MAX_TILT: f64 = 80.0;
  pub const MIN_ZOOM: f64 = 0.3;
  pub const MAX_ZOOM: f64 = 4.0;

  pub fn set_rotation(&mut self, rot_x: f64, rot_y: f64) {
    self.rot_x = rot_x.clamp(-Self::MAX_TILT, Self::MAX_TILT);
    self.rot_y = rot_y.clamp(-Self::MAX_TILT, Self::MAX_TILT);
  }

  pub fn zoom_by(&mut self, factor: f64) {
    self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }
}

impl Default for ViewState {
  fn default() -> Self {
    Self {
      rot_x: -22.0,
      rot_y: -14.0,
      zoom: 1.0,
    }
  }
}

/// Ephemeral interaction state. At most one hovered and one selected id.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
  pub hovered: Option<u8>,
  pub selected: Option<u8>,
  pub color_mode: ColorMode,
  pub dropdown_open: bool,
  pub viewport: ViewportClass,
}

impl UiState {
  pub fn new(color_mode: ColorMode) -> Self {
    Self {
      hovered: None,
      selected: None,
      color_mode,
      dropdown_open: false,
      viewport: ViewportClass::Desktop,
    }
  }

  /// Updates the hover target. Ignored while an element is selected.
  /// Returns true when the visible state changed.
  pub fn set_hovered(&mut self, id: Option<u8>) -> bool {
    if self.selected.is_some() || self.hovered == id {
      return false;
    }
    self.hovered = id;
    true
  }

  /// Selects `id`, or clears the selection if `id` is already selected.
  pub fn toggle_selected(&mut self, id: u8) {
    if self.selected == Some(id) {
      self.selected = None;
    } else {
      self.selected = Some(id);
    }
    self.hovered = None;
  }

  pub fn clear_selection(&mut self) -> bool {
    let had = self.selected.is_some();
    self.selected = None;
    had
  }

  /// The element the detail card shows.
  pub fn focused(&self) -> Option<u8> {
    self.selected.or(self.hovered)
  }

  pub fn set_color_mode(&mut self, mode: ColorMode) -> bool {
    self.dropdown_open = false;
    if self.color_mode == mode {
      return false;
    }
    self.color_mode = mode;
    true
  }

  pub fn set_dropdown_open(&mut self, open: bool) {
    self.dropdown_open = open;
  }

  pub fn update_viewport(&mut self, width: f64, breakpoint: f64) -> bool {
    let class = ViewportClass::classify(width, breakpoint);
    if class == self.viewport {
      return false;
    }
    self.viewport = class;
    true
  }
}

pub struct AppState {
  pub config: Config,
  pub data: LoadStatus,
  pub view: ViewState,
  pub ui: UiState,
  /// Bumped by every `begin_load`; results of older reads are discarded.
  load_generation: u64,
}

impl AppState {
  pub fn new(config: Config) -> Self {
    let ui = UiState::new(config.default_color_mode);
    Self {
      config,
      data: LoadStatus::Loading,
      view: ViewState::default(),
      ui,
      load_generation: 0,
    }
  }

  /// Marks a new read as in flight and returns its ticket.
  pub fn begin_load(&mut self) -> u64 {
    self.load_generation += 1;
    self.data = LoadStatus::Loading;
    self.load_generation
  }

  pub fn is_current_load(&self, generation: u64) -> bool {
    self.load_generation == generation
  }

  pub fn dataset(&self) -> Option<&Dataset> {
    match &self.data {
      LoadStatus::Ready(ds) => Some(ds),
      _ => None,
    }
  }

  pub fn focused_element(&self) -> Option<&Element> {
    let id = self.ui.focused()?;
    self.dataset()?.elements.get(id)
  }

  /// Installs a freshly loaded dataset and drops interaction state that
  /// might point at records of the previous one.
  pub fn set_dataset(&mut self, ds: Dataset) {
    self.data = LoadStatus::Ready(ds);
    self.ui.hovered = None;
    self.ui.selected = None;
  }

  pub fn set_load_error(&mut self, message: String) {
    self.data = LoadStatus::Failed(message);
    self.ui.hovered = None;
    self.ui.selected = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::dataset::ElementSet;

  fn ui() -> UiState {
    UiState::new(ColorMode::Category)
  }

  #[test]
  fn test_hover_tracks_pointer() {
    let mut s = ui();
    assert!(s.set_hovered(Some(8)));
    assert!(!s.set_hovered(Some(8)));
    assert_eq!(s.focused(), Some(8));
    assert!(s.set_hovered(None));
    assert_eq!(s.focused(), None);
  }

  #[test]
  fn test_selection_locks_out_hover() {
    let mut s = ui();
    s.set_hovered(Some(1));
    s.toggle_selected(26);
    assert_eq!(s.hovered, None);
    assert!(!s.set_hovered(Some(79)));
    assert_eq!(s.hovered, None);
    assert_eq!(s.focused(), Some(26));

    assert!(s.clear_selection());
    assert!(s.set_hovered(Some(79)));
    assert_eq!(s.focused(), Some(79));
  }

  #[test]
  fn test_toggle_same_deselects() {
    let mut s = ui();
    s.toggle_selected(6);
    assert_eq!(s.selected, Some(6));
    s.toggle_selected(7);
    assert_eq!(s.selected, Some(7));
    s.toggle_selected(7);
    assert_eq!(s.selected, None);
    assert!(!s.clear_selection());
  }

  #[test]
  fn test_mode_change_closes_dropdown() {
    let mut s = ui();
    s.set_dropdown_open(true);
    assert!(s.set_color_mode(ColorMode::Density));
    assert!(!s.dropdown_open);

    s.set_dropdown_open(true);
    assert!(!s.set_color_mode(ColorMode::Density));
    assert!(!s.dropdown_open);
  }

  #[test]
  fn test_viewport_breakpoint() {
    let mut s = ui();
    assert!(!s.update_viewport(1280.0, 768.0));
    assert!(s.update_viewport(767.0, 768.0));
    assert_eq!(s.viewport, ViewportClass::Mobile);
    assert!(!s.update_viewport(500.0, 768.0));
    assert!(s.update_viewport(768.0, 768.0));
    assert_eq!(s.viewport, ViewportClass::Desktop);
  }

  #[test]
  fn test_view_clamps() {
    let mut v = ViewState::default();
    v.set_rotation(200.0, -200.0);
    assert_eq!(v.rot_x, ViewState::MAX_TILT);
    assert_eq!(v.rot_y, -ViewState::MAX_TILT);
    for _ in 0..100 {
      v.zoom_by(1.5);
    }
    assert_eq!(v.zoom, ViewState::MAX_ZOOM);
    v.reset();
    assert_eq!(v, ViewState::default());
  }

  #[test]
  fn test_focused_element_lookup() {
    let mut st = AppState::new(Config::default());
    assert!(st.focused_element().is_none());

    let set = ElementSet::from_json_str(include_str!("../assets/elements.json")).unwrap();
    st.set_dataset(Dataset::new(set));
    st.ui.toggle_selected(79);
    assert_eq!(st.focused_element().map(|e| e.name.as_str()), Some("Gold"));

    st.set_load_error("boom".into());
    assert!(st.dataset().is_none());
    assert!(st.ui.selected.is_none());
  }

  #[test]
  fn test_newer_load_supersedes_older() {
    let mut st = AppState::new(Config::default());
    let first = st.begin_load();
    let second = st.begin_load();
    assert!(matches!(st.data, LoadStatus::Loading));
    assert!(!st.is_current_load(first));
    assert!(st.is_current_load(second));
  }
}
