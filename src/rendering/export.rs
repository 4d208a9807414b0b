// src/rendering/export.rs

use super::legend::{build_legend, draw_legend, required_height};
use super::painter;
use crate::state::{AppState, ViewportClass};
use gtk4::cairo;

const LEGEND_WIDTH: f64 = 220.0;

/// Renders the current view (table plus legend) to a PNG or PDF file.
/// `width`/`height` are the output size in pixels (points for PDF).
pub fn export_image(
    state: &AppState,
    path: &str,
    width: i32,
    height: i32,
    format_pdf: bool,
) -> Result<(), String> {
    if width <= 0 || height <= 0 {
        return Err(format!("invalid export size {}x{}", width, height));
    }
    let Some(ds) = state.dataset() else {
        return Err("no element data loaded".to_string());
    };

    let (w, h) = (width as f64, height as f64);

    if format_pdf {
        let surface = cairo::PdfSurface::new(w, h, path).map_err(|e| e.to_string())?;
        let cr = cairo::Context::new(&surface).map_err(|e| e.to_string())?;
        render(&cr, state, w, h).map_err(|e| e.to_string())?;
        surface.finish();
    } else {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
            .map_err(|e| e.to_string())?;
        {
            let cr = cairo::Context::new(&surface).map_err(|e| e.to_string())?;
            render(&cr, state, w, h).map_err(|e| e.to_string())?;
        }
        let mut file = std::fs::File::create(path).map_err(|e| e.to_string())?;
        surface.write_to_png(&mut file).map_err(|e| e.to_string())?;
    }

    log::info!(
        "Exported {} elements to {} ({}x{})",
        ds.elements.len(),
        path,
        width,
        height
    );
    Ok(())
}

fn render(cr: &cairo::Context, state: &AppState, w: f64, h: f64) -> Result<(), cairo::Error> {
    painter::draw_frame(cr, state, w, h, ViewportClass::Desktop)?;
    let Some(ds) = state.dataset() else {
        return Ok(());
    };

    // Legend in the bottom-left corner
    let legend = build_legend(state.ui.color_mode, Some(ds));
    let lh = required_height(&legend);
    cr.save()?;
    cr.translate(12.0, (h - lh - 12.0).max(0.0));
    draw_legend(cr, &legend, LEGEND_WIDTH, lh)?;
    cr.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::dataset::{Dataset, ElementSet};
    use std::fs;

    #[test]
    fn test_export_requires_data() {
        let state = AppState::new(Config::default());
        let err = export_image(&state, "/tmp/unused.png", 100, 100, false).unwrap_err();
        assert!(err.contains("no element data"));
    }

    #[test]
    fn test_export_rejects_empty_size() {
        let state = AppState::new(Config::default());
        assert!(export_image(&state, "/tmp/unused.png", 0, 100, false).is_err());
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(Config::default());
        let set = ElementSet::from_json_str(include_str!("../../assets/elements.json")).unwrap();
        state.set_dataset(Dataset::new(set));
        state
    }

    #[test]
    fn test_export_writes_png_and_pdf() {
        let state = loaded_state();
        for (ext, pdf) in [("png", false), ("pdf", true)] {
            let path = std::env::temp_dir().join(format!("ptable3d-export-{}.{}", std::process::id(), ext));
            let path_str = path.to_string_lossy().into_owned();
            export_image(&state, &path_str, 400, 250, pdf).unwrap();
            let len = fs::metadata(&path).unwrap().len();
            let _ = fs::remove_file(&path);
            assert!(len > 0, "{} export is empty", ext);
        }
    }
}
