// src/rendering/scene.rs

use super::colors::{element_color, scale as scale_color, Rgb};
use crate::config::SceneStyle;
use crate::model::dataset::{Dataset, GRID_COLUMNS, GRID_ROWS};
use crate::state::{AppState, UiState, ViewState};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
  Normal,
  Hovered,
  Selected,
  Dimmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
  Front,
  Back,
  Left,
  Right,
  Top,
  Bottom,
}

impl FaceKind {
  const ALL: [FaceKind; 6] = [
    FaceKind::Front,
    FaceKind::Back,
    FaceKind::Left,
    FaceKind::Right,
    FaceKind::Top,
    FaceKind::Bottom,
  ];

  /// Corner indices, walking the face outline. Corner `i` has
  /// x = bit 0, y = bit 1, z = bit 2 (1 = toward the viewer).
  fn corners(&self) -> [usize; 4] {
    match self {
      FaceKind::Front => [4, 5, 7, 6],
      FaceKind::Back => [0, 2, 3, 1],
      FaceKind::Left => [0, 4, 6, 2],
      FaceKind::Right => [1, 3, 7, 5],
      FaceKind::Top => [0, 1, 5, 4],
      FaceKind::Bottom => [2, 6, 7, 3],
    }
  }

  // Screen y grows downward, so "top" points to -y.
  fn normal(&self) -> [f64; 3] {
    match self {
      FaceKind::Front => [0.0, 0.0, 1.0],
      FaceKind::Back => [0.0, 0.0, -1.0],
      FaceKind::Left => [-1.0, 0.0, 0.0],
      FaceKind::Right => [1.0, 0.0, 0.0],
      FaceKind::Top => [0.0, -1.0, 0.0],
      FaceKind::Bottom => [0.0, 1.0, 0.0],
    }
  }
}

#[derive(Debug, Clone)]
pub struct TileFace {
  pub kind: FaceKind,
  pub points: [[f64; 2]; 4],
  /// Brightness factor from how squarely the face looks at the viewer.
  pub shade: f64,
}

/// One element tile, projected to screen space.
/// Used by picking.rs for hit-testing and by painter.rs for drawing.
#[derive(Debug, Clone)]
pub struct RenderTile {
  pub number: u8,
  pub color: Rgb,
  pub highlight: Highlight,
  /// Screen x, y and depth (larger = nearer) of the eight box corners.
  pub corners: [[f64; 3]; 8],
  /// Visible faces only.
  pub faces: Vec<TileFace>,
  pub depth: f64,
  /// Edge length of the front face in pixels.
  pub size_px: f64,
}

impl RenderTile {
  pub fn front(&self) -> Option<&TileFace> {
    self.faces.iter().find(|f| f.kind == FaceKind::Front)
  }
}

/// Rotation about X, then about Y. Angles in degrees.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
  sin_x: f64,
  cos_x: f64,
  sin_y: f64,
  cos_y: f64,
}

impl Rotation {
  pub fn new(rot_x: f64, rot_y: f64) -> Self {
    let (sin_x, cos_x) = rot_x.to_radians().sin_cos();
    let (sin_y, cos_y) = rot_y.to_radians().sin_cos();
    Self {
      sin_x,
      cos_x,
      sin_y,
      cos_y,
    }
  }

  pub fn apply(&self, p: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = p;

    // Around X
    let y1 = y * self.cos_x - z * self.sin_x;
    let z1 = y * self.sin_x + z * self.cos_x;

    // Around Y
    let x2 = x * self.cos_y + z1 * self.sin_y;
    let z2 = -x * self.sin_y + z1 * self.cos_y;

    [x2, y1, z2]
  }
}

/// Grid center in world units; rotation pivots here.
fn grid_center() -> [f64; 3] {
  [GRID_COLUMNS as f64 / 2.0, GRID_ROWS as f64 / 2.0, 0.0]
}

fn box_corners(xpos: u8, ypos: u8, lift: f64, style: &SceneStyle) -> [[f64; 3]; 8] {
  let c = grid_center();
  let cx = xpos as f64 - 0.5 - c[0];
  let cy = ypos as f64 - 0.5 - c[1];
  let h = style.tile_size / 2.0;

  let mut out = [[0.0; 3]; 8];
  for (i, corner) in out.iter_mut().enumerate() {
    let dx = if i & 1 == 0 { -h } else { h };
    let dy = if i & 2 == 0 { -h } else { h };
    let dz = if i & 4 == 0 { 0.0 } else { style.tile_depth };
    *corner = [cx + dx, cy + dy, lift + dz];
  }
  out
}

pub fn calculate_scene(state: &AppState, win_w: f64, win_h: f64) -> Vec<RenderTile> {
  match state.dataset() {
    Some(ds) => build_scene(ds, &state.ui, &state.view, &state.config.style, win_w, win_h),
    None => vec![],
  }
}

// Return: tiles sorted far-to-near
pub fn build_scene(
  ds: &Dataset,
  ui: &UiState,
  view: &ViewState,
  style: &SceneStyle,
  win_w: f64,
  win_h: f64,
) -> Vec<RenderTile> {
  let rot = Rotation::new(view.rot_x, view.rot_y);

  // --- 1. Fit: bounds of the resting grid, so lifting a tile never rescales the scene ---
  let mut min_x = f64::MAX;
  let mut max_x = f64::MIN;
  let mut min_y = f64::MAX;
  let mut max_y = f64::MIN;
  for el in ds.elements.iter() {
    for p in box_corners(el.xpos, el.ypos, 0.0, style) {
      let r = rot.apply(p);
      min_x = min_x.min(r[0]);
      max_x = max_x.max(r[0]);
      min_y = min_y.min(r[1]);
      max_y = max_y.max(r[1]);
    }
  }

  let margin = 0.88;
  let model_w = (max_x - min_x).max(1.0);
  let model_h = (max_y - min_y).max(1.0);
  let scale = ((win_w * margin) / model_w).min((win_h * margin) / model_h) * view.zoom;
  let box_cx = (min_x + max_x) / 2.0;
  let box_cy = (min_y + max_y) / 2.0;
  let win_cx = win_w / 2.0;
  let win_cy = win_h / 2.0;

  let to_screen = |r: [f64; 3]| -> [f64; 3] {
    [
      (r[0] - box_cx) * scale + win_cx,
      (r[1] - box_cy) * scale + win_cy,
      r[2],
    ]
  };

  // Face visibility depends only on the rotation, not on the tile.
  let face_facing: Vec<(FaceKind, f64)> = FaceKind::ALL
    .iter()
    .map(|k| (*k, rot.apply(k.normal())[2]))
    .filter(|(_, nz)| *nz > 1e-6)
    .collect();

  // --- 2. Tiles ---
  let mut tiles = Vec::with_capacity(ds.elements.len());
  for el in ds.elements.iter() {
    let highlight = if ui.selected == Some(el.number) {
      Highlight::Selected
    } else if ui.hovered == Some(el.number) {
      Highlight::Hovered
    } else if ui.selected.is_some() {
      Highlight::Dimmed
    } else {
      Highlight::Normal
    };

    let lift = match highlight {
      Highlight::Selected => style.select_lift,
      Highlight::Hovered => style.hover_lift,
      _ => 0.0,
    };

    let base = element_color(el, ui.color_mode, &ds.ranges);
    let color = if highlight == Highlight::Dimmed {
      scale_color(base, style.dim_factor)
    } else {
      base
    };

    let world = box_corners(el.xpos, el.ypos, lift, style);
    let mut corners = [[0.0; 3]; 8];
    for (dst, p) in corners.iter_mut().zip(world.iter()) {
      *dst = to_screen(rot.apply(*p));
    }

    let faces = face_facing
      .iter()
      .map(|(kind, nz)| {
        let idx = kind.corners();
        TileFace {
          kind: *kind,
          points: idx.map(|i| [corners[i][0], corners[i][1]]),
          shade: 0.5 + 0.5 * nz,
        }
      })
      .collect();

    let depth = corners.iter().map(|c| c[2]).sum::<f64>() / 8.0;

    tiles.push(RenderTile {
      number: el.number,
      color,
      highlight,
      corners,
      faces,
      depth,
      size_px: style.tile_size * scale,
    });
  }

  // Painter's algorithm: far first
  tiles.sort_by(|a, b| a.depth.partial_cmp(&b.depth).unwrap_or(Ordering::Equal));
  tiles
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ColorMode;
  use crate::model::dataset::ElementSet;

  fn dataset() -> Dataset {
    Dataset::new(ElementSet::from_json_str(include_str!("../../assets/elements.json")).unwrap())
  }

  fn flat_view() -> ViewState {
    ViewState {
      rot_x: 0.0,
      rot_y: 0.0,
      zoom: 1.0,
    }
  }

  #[test]
  fn test_one_tile_per_element() {
    let ds = dataset();
    let ui = UiState::new(ColorMode::Category);
    let tiles = build_scene(&ds, &ui, &ViewState::default(), &SceneStyle::default(), 1200.0, 800.0);
    assert_eq!(tiles.len(), 118);
    assert!(tiles.iter().all(|t| t.size_px > 0.0));
    for w in tiles.windows(2) {
      assert!(w[0].depth <= w[1].depth);
    }
  }

  #[test]
  fn test_flat_view_shows_only_front_faces() {
    let ds = dataset();
    let ui = UiState::new(ColorMode::Category);
    let tiles = build_scene(&ds, &ui, &flat_view(), &SceneStyle::default(), 1800.0, 1000.0);
    for t in &tiles {
      assert_eq!(t.faces.len(), 1);
      assert!(t.front().is_some());
    }
  }

  #[test]
  fn test_tilted_view_shows_sides() {
    let ds = dataset();
    let ui = UiState::new(ColorMode::Category);
    let tiles = build_scene(&ds, &ui, &ViewState::default(), &SceneStyle::default(), 1200.0, 800.0);
    assert!(tiles.iter().all(|t| t.faces.len() == 3));
  }

  #[test]
  fn test_grid_order_on_screen() {
    let ds = dataset();
    let ui = UiState::new(ColorMode::Category);
    let tiles = build_scene(&ds, &ui, &flat_view(), &SceneStyle::default(), 1800.0, 1000.0);
    let center = |n: u8| {
      let t = tiles.iter().find(|t| t.number == n).unwrap();
      let f = t.front().unwrap();
      (
        f.points.iter().map(|p| p[0]).sum::<f64>() / 4.0,
        f.points.iter().map(|p| p[1]).sum::<f64>() / 4.0,
      )
    };
    let (hx, hy) = center(1);
    let (hex, hey) = center(2);
    let (lix, liy) = center(3);
    assert!(hex > hx);
    assert!((hey - hy).abs() < 1e-6);
    assert!(liy > hy);
    assert!((lix - hx).abs() < 1e-6);
  }

  #[test]
  fn test_selection_lifts_and_dims() {
    let ds = dataset();
    let mut ui = UiState::new(ColorMode::Category);
    ui.toggle_selected(26);
    let tiles = build_scene(&ds, &ui, &flat_view(), &SceneStyle::default(), 1200.0, 800.0);

    let fe = tiles.iter().find(|t| t.number == 26).unwrap();
    assert_eq!(fe.highlight, Highlight::Selected);
    assert_eq!(tiles.last().map(|t| t.number), Some(26));
    assert!(tiles
      .iter()
      .filter(|t| t.number != 26)
      .all(|t| t.highlight == Highlight::Dimmed));
  }

  #[test]
  fn test_rotation_preserves_length() {
    let r = Rotation::new(33.0, -71.0);
    let p = r.apply([1.0, 2.0, 3.0]);
    let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
    assert!((len - 14f64.sqrt()).abs() < 1e-9);
  }
}
