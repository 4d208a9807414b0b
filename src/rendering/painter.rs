// src/rendering/painter.rs

use super::colors::{contrast_text, Rgb};
use super::primitives::{centered_text, face_matrix, fill_face, stroke_face};
use super::scene::{self, FaceKind, Highlight, RenderTile};
use crate::config::SceneStyle;
use crate::model::dataset::Dataset;
use crate::state::{AppState, LoadStatus, ViewportClass};
use gtk4::cairo;

// Front faces smaller than this (px) get only the symbol.
const MIN_DETAILED_TILE: f64 = 46.0;

/// Whether a tile shows number, name and mass besides its symbol.
/// Mobile always shows the symbol only.
pub fn shows_details(viewport: ViewportClass, size_px: f64) -> bool {
    viewport == ViewportClass::Desktop && size_px >= MIN_DETAILED_TILE
}

pub struct TileLabels {
    pub viewport: ViewportClass,
    pub show_names: bool,
}

/// One full frame: background, then either the table or the load status.
pub fn draw_frame(
    cr: &cairo::Context,
    state: &AppState,
    w: f64,
    h: f64,
    viewport: ViewportClass,
) -> Result<(), cairo::Error> {
    draw_background(cr, &state.config.style)?;
    let Some(ds) = state.dataset() else {
        return draw_status(cr, &state.data, w, h);
    };
    let tiles = scene::calculate_scene(state, w, h);
    let labels = TileLabels {
        viewport,
        show_names: state.config.style.show_names,
    };
    draw_tiles(cr, &tiles, ds, &labels)
}

pub fn draw_background(cr: &cairo::Context, style: &SceneStyle) -> Result<(), cairo::Error> {
    let (r, g, b) = style.background_color;
    cr.set_source_rgb(r, g, b);
    cr.paint()
}

/// Draws all tiles. `tiles` must already be sorted far-to-near.
pub fn draw_tiles(
    cr: &cairo::Context,
    tiles: &[RenderTile],
    ds: &Dataset,
    labels: &TileLabels,
) -> Result<(), cairo::Error> {
    for tile in tiles {
        draw_tile(cr, tile, ds, labels)?;
    }
    Ok(())
}

fn draw_tile(
    cr: &cairo::Context,
    tile: &RenderTile,
    ds: &Dataset,
    labels: &TileLabels,
) -> Result<(), cairo::Error> {
    // Sides first so the front face covers their shared edges
    for face in tile.faces.iter().filter(|f| f.kind != FaceKind::Front) {
        fill_face(cr, &face.points, tile.color, face.shade * 0.8)?;
        stroke_face(cr, &face.points, (0.0, 0.0, 0.0, 0.25), 0.8)?;
    }

    let Some(front) = tile.front() else {
        return Ok(());
    };
    fill_face(cr, &front.points, tile.color, front.shade)?;

    match tile.highlight {
        Highlight::Selected => stroke_face(cr, &front.points, (1.0, 0.84, 0.2, 1.0), 3.0)?,
        Highlight::Hovered => stroke_face(cr, &front.points, (1.0, 1.0, 1.0, 0.9), 2.0)?,
        _ => stroke_face(cr, &front.points, (0.0, 0.0, 0.0, 0.35), 1.0)?,
    }

    if let Some(el) = ds.elements.get(tile.number) {
        draw_tile_text(cr, tile, &el.symbol, &el.name, labels)?;
    }
    Ok(())
}

fn draw_tile_text(
    cr: &cairo::Context,
    tile: &RenderTile,
    symbol: &str,
    name: &str,
    labels: &TileLabels,
) -> Result<(), cairo::Error> {
    // Text is laid out in the front face's own unit square, so it follows the tilt.
    let c = &tile.corners;
    let Some(m) = face_matrix([c[4][0], c[4][1]], [c[5][0], c[5][1]], [c[6][0], c[6][1]]) else {
        return Ok(());
    };

    let (r, g, b) = text_color(tile);
    let detailed = shows_details(labels.viewport, tile.size_px);

    cr.save()?;
    cr.transform(m);
    cr.set_source_rgb(r, g, b);

    if detailed {
        centered_text(cr, symbol, 0.5, 0.5, 0.38, cairo::FontWeight::Bold)?;
        centered_text(cr, &tile.number.to_string(), 0.5, 0.17, 0.15, cairo::FontWeight::Normal)?;
        if labels.show_names {
            centered_text(cr, name, 0.5, 0.83, fit_name_size(name), cairo::FontWeight::Normal)?;
        }
    } else {
        centered_text(cr, symbol, 0.5, 0.5, 0.5, cairo::FontWeight::Bold)?;
    }

    cr.restore()
}

fn text_color(tile: &RenderTile) -> Rgb {
    let (r, g, b) = contrast_text(tile.color);
    if tile.highlight == Highlight::Dimmed {
        (r * 0.7, g * 0.7, b * 0.7)
    } else {
        (r, g, b)
    }
}

/// Long names ("Rutherfordium") shrink to stay inside the tile.
fn fit_name_size(name: &str) -> f64 {
    let chars = name.chars().count().max(1) as f64;
    (1.45 / chars).min(0.13)
}

/// Shown instead of the table while loading or after a failed load.
pub fn draw_status(cr: &cairo::Context, status: &LoadStatus, w: f64, h: f64) -> Result<(), cairo::Error> {
    let text = match status {
        LoadStatus::Loading => "Loading element data…".to_string(),
        LoadStatus::Failed(msg) => format!("Failed to load element data: {}", msg),
        LoadStatus::Ready(_) => return Ok(()),
    };
    cr.set_source_rgb(0.85, 0.85, 0.85);
    centered_text(cr, &text, w / 2.0, h / 2.0, 15.0, cairo::FontWeight::Normal)
}
