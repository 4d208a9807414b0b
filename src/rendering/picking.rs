// src/rendering/picking.rs

use super::scene::{build_scene, RenderTile};
use crate::config::SceneStyle;
use crate::model::dataset::Dataset;
use crate::state::{UiState, ViewState};

/// Even-odd ray cast. Works for any simple polygon; tile faces are convex quads.
fn point_in_polygon(x: f64, y: f64, poly: &[[f64; 2]]) -> bool {
    let mut inside = false;
    let mut j = poly.len().wrapping_sub(1);
    for i in 0..poly.len() {
        let (xi, yi) = (poly[i][0], poly[i][1]);
        let (xj, yj) = (poly[j][0], poly[j][1]);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Returns the element under the screen point, nearest tile first.
/// `tiles` must be sorted far-to-near, as `calculate_scene` returns them.
pub fn pick(tiles: &[RenderTile], x: f64, y: f64) -> Option<u8> {
    tiles
        .iter()
        .rev()
        .find(|t| t.faces.iter().any(|f| point_in_polygon(x, y, &f.points)))
        .map(|t| t.number)
}

/// Hover target under the pointer, tested against the resting geometry.
/// The hovered tile's lift moves it on screen; picking the lifted scene
/// would drop the hover as soon as the tile rises out from under the pointer.
pub fn pick_resting(
    ds: &Dataset,
    ui: &UiState,
    view: &ViewState,
    style: &SceneStyle,
    size: (f64, f64),
    x: f64,
    y: f64,
) -> Option<u8> {
    let resting = UiState {
        hovered: None,
        ..ui.clone()
    };
    let tiles = build_scene(ds, &resting, view, style, size.0, size.1);
    pick(&tiles, x, y)
}
