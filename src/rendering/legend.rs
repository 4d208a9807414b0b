// src/rendering/legend.rs

use super::colors::{block_color, category_color, gradient_for, phase_color, Rgb, NO_DATA};
use super::primitives::centered_text;
use crate::config::ColorMode;
use crate::model::dataset::Dataset;
use crate::model::elements::{Block, Category, Phase};
use gtk4::cairo;

#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
  /// One swatch per value present in the data.
  Swatches {
    title: String,
    entries: Vec<(String, Rgb)>,
  },
  Gradient {
    title: String,
    unit: &'static str,
    min: f64,
    max: f64,
    low: Rgb,
    high: Rgb,
    /// Elements without a value, drawn in the no-data color.
    missing: usize,
  },
  Note {
    title: String,
    text: String,
  },
}

impl Legend {
  pub fn title(&self) -> &str {
    match self {
      Legend::Swatches { title, .. } | Legend::Gradient { title, .. } | Legend::Note { title, .. } => title,
    }
  }
}

fn swatches<T, F, L>(title: &str, all: &[T], present: &[T], color: F, label: L) -> Legend
where
  T: PartialEq + Copy,
  F: Fn(T) -> Rgb,
  L: Fn(T) -> &'static str,
{
  let entries = all
    .iter()
    .filter(|v| present.contains(v))
    .map(|v| (label(*v).to_string(), color(*v)))
    .collect();
  Legend::Swatches {
    title: title.to_string(),
    entries,
  }
}

pub fn build_legend(mode: ColorMode, ds: Option<&Dataset>) -> Legend {
  let title = mode.label().to_string();
  let Some(ds) = ds else {
    return Legend::Note {
      title,
      text: "No data loaded".to_string(),
    };
  };

  match mode {
    ColorMode::Category => {
      let present: Vec<Category> = ds.elements.iter().map(|e| e.category).collect();
      swatches(&title, &Category::ALL, &present, category_color, |c| c.label())
    }
    ColorMode::Phase => {
      let present: Vec<Phase> = ds.elements.iter().map(|e| e.phase).collect();
      swatches(&title, &Phase::ALL, &present, phase_color, |p| p.label())
    }
    ColorMode::Block => {
      let present: Vec<Block> = ds.elements.iter().map(|e| e.block).collect();
      swatches(&title, &Block::ALL, &present, block_color, |b| b.label())
    }
    ColorMode::Cpk => Legend::Note {
      title,
      text: "Conventional CPK colors per element".to_string(),
    },
    numeric => {
      let Some(prop) = numeric.property() else {
        return Legend::Note {
          title,
          text: String::new(),
        };
      };
      match ds.ranges.get(prop) {
        Some(range) => {
          let (low, high) = gradient_for(prop);
          let missing = ds.elements.iter().filter(|e| prop.value(e).is_none()).count();
          Legend::Gradient {
            title,
            unit: prop.unit(),
            min: range.min,
            max: range.max,
            low,
            high,
            missing,
          }
        }
        None => Legend::Note {
          title,
          text: "No values in data".to_string(),
        },
      }
    }
  }
}

/// Compact number formatting for range labels.
pub fn format_value(v: f64) -> String {
  let a = v.abs();
  if a >= 1000.0 {
    format!("{:.0}", v)
  } else if a >= 100.0 {
    format!("{:.1}", v)
  } else if a >= 1.0 {
    format!("{:.2}", v)
  } else {
    format!("{:.3}", v)
  }
}

// --- Drawing ---

const PAD: f64 = 10.0;
const ROW: f64 = 18.0;

/// Height the legend needs, so the widget can request it.
pub fn required_height(legend: &Legend) -> f64 {
  let body = match legend {
    Legend::Swatches { entries, .. } => entries.len() as f64 * ROW,
    Legend::Gradient { missing, .. } => 44.0 + if *missing > 0 { ROW } else { 0.0 },
    Legend::Note { .. } => ROW,
  };
  PAD * 2.0 + 20.0 + body
}

fn left_text(cr: &cairo::Context, text: &str, x: f64, y: f64, size: f64) -> Result<(), cairo::Error> {
  cr.set_font_size(size);
  cr.move_to(x, y);
  cr.show_text(text)
}

fn swatch(cr: &cairo::Context, x: f64, y: f64, c: Rgb) -> Result<(), cairo::Error> {
  cr.set_source_rgb(c.0, c.1, c.2);
  cr.rectangle(x, y, 12.0, 12.0);
  cr.fill()
}

pub fn draw_legend(cr: &cairo::Context, legend: &Legend, w: f64, h: f64) -> Result<(), cairo::Error> {
  cr.set_source_rgba(0.12, 0.13, 0.17, 0.92);
  cr.rectangle(0.0, 0.0, w, h);
  cr.fill()?;

  cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
  cr.set_source_rgb(0.95, 0.95, 0.95);
  left_text(cr, legend.title(), PAD, PAD + 12.0, 13.0)?;
  cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);

  let top = PAD + 24.0;
  match legend {
    Legend::Swatches { entries, .. } => {
      for (i, (label, c)) in entries.iter().enumerate() {
        let y = top + i as f64 * ROW;
        swatch(cr, PAD, y, *c)?;
        cr.set_source_rgb(0.9, 0.9, 0.9);
        left_text(cr, label, PAD + 20.0, y + 10.5, 11.5)?;
      }
    }
    Legend::Gradient {
      unit,
      min,
      max,
      low,
      high,
      missing,
      ..
    } => {
      let bar_w = (w - PAD * 2.0).max(10.0);
      let grad = cairo::LinearGradient::new(PAD, 0.0, PAD + bar_w, 0.0);
      grad.add_color_stop_rgb(0.0, low.0, low.1, low.2);
      grad.add_color_stop_rgb(1.0, high.0, high.1, high.2);
      cr.set_source(&grad)?;
      cr.rectangle(PAD, top, bar_w, 14.0);
      cr.fill()?;

      cr.set_source_rgb(0.9, 0.9, 0.9);
      left_text(cr, &format_value(*min), PAD, top + 30.0, 11.0)?;
      let max_label = format!("{} {}", format_value(*max), unit);
      cr.set_font_size(11.0);
      let ext = cr.text_extents(&max_label)?;
      left_text(cr, &max_label, PAD + bar_w - ext.width(), top + 30.0, 11.0)?;

      if *missing > 0 {
        let y = top + 40.0;
        swatch(cr, PAD, y, NO_DATA)?;
        cr.set_source_rgb(0.9, 0.9, 0.9);
        left_text(cr, &format!("No data ({})", missing), PAD + 20.0, y + 10.5, 11.5)?;
      }
    }
    Legend::Note { text, .. } => {
      cr.set_source_rgb(0.8, 0.8, 0.8);
      centered_text(cr, text, w / 2.0, top + 6.0, 11.5, cairo::FontWeight::Normal)?;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::dataset::ElementSet;

  fn dataset() -> Dataset {
    Dataset::new(ElementSet::from_json_str(include_str!("../../assets/elements.json")).unwrap())
  }

  #[test]
  fn test_category_legend_lists_present_values() {
    let ds = dataset();
    match build_legend(ColorMode::Category, Some(&ds)) {
      Legend::Swatches { entries, .. } => {
        assert_eq!(entries.len(), 11);
        assert_eq!(entries[0].0, "Alkali Metal");
      }
      other => panic!("unexpected legend {:?}", other),
    }
  }

  #[test]
  fn test_phase_legend_skips_absent_values() {
    let ds = dataset();
    match build_legend(ColorMode::Phase, Some(&ds)) {
      Legend::Swatches { entries, .. } => {
        let labels: Vec<&str> = entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Solid", "Liquid", "Gas"]);
      }
      other => panic!("unexpected legend {:?}", other),
    }
  }

  #[test]
  fn test_gradient_legend_counts_missing() {
    let ds = dataset();
    match build_legend(ColorMode::Electronegativity, Some(&ds)) {
      Legend::Gradient { min, max, missing, unit, .. } => {
        assert!((min - 0.79).abs() < 1e-9);
        assert!((max - 3.98).abs() < 1e-9);
        assert!(missing > 0);
        assert_eq!(unit, "Pauling");
      }
      other => panic!("unexpected legend {:?}", other),
    }
  }

  #[test]
  fn test_legend_without_data() {
    let l = build_legend(ColorMode::Density, None);
    assert!(matches!(l, Legend::Note { .. }));
    assert_eq!(l.title(), "Density");
  }

  #[test]
  fn test_format_value() {
    assert_eq!(format_value(3410.4), "3410");
    assert_eq!(format_value(294.0), "294.0");
    assert_eq!(format_value(3.98), "3.98");
    assert_eq!(format_value(0.0899), "0.090");
  }
}
