// src/config.rs

use crate::model::property::Property;
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

// --- Enums ---

/// How tiles are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
  Category,
  Cpk,
  Phase,
  Block,
  AtomicMass,
  Electronegativity,
  Density,
  MeltingPoint,
  BoilingPoint,
  IonizationEnergy,
  ElectronAffinity,
}

impl ColorMode {
  /// Dropdown order.
  pub const ALL: [ColorMode; 11] = [
    ColorMode::Category,
    ColorMode::Cpk,
    ColorMode::Phase,
    ColorMode::Block,
    ColorMode::AtomicMass,
    ColorMode::Electronegativity,
    ColorMode::Density,
    ColorMode::MeltingPoint,
    ColorMode::BoilingPoint,
    ColorMode::IonizationEnergy,
    ColorMode::ElectronAffinity,
  ];

  /// The numeric property behind a gradient mode; `None` for categorical modes.
  pub fn property(&self) -> Option<Property> {
    match self {
      ColorMode::Category | ColorMode::Cpk | ColorMode::Phase | ColorMode::Block => None,
      ColorMode::AtomicMass => Some(Property::AtomicMass),
      ColorMode::Electronegativity => Some(Property::Electronegativity),
      ColorMode::Density => Some(Property::Density),
      ColorMode::MeltingPoint => Some(Property::MeltingPoint),
      ColorMode::BoilingPoint => Some(Property::BoilingPoint),
      ColorMode::IonizationEnergy => Some(Property::IonizationEnergy),
      ColorMode::ElectronAffinity => Some(Property::ElectronAffinity),
    }
  }

  pub fn is_categorical(&self) -> bool {
    self.property().is_none()
  }

  pub fn label(&self) -> &'static str {
    match self {
      ColorMode::Category => "Category",
      ColorMode::Cpk => "CPK Color",
      ColorMode::Phase => "Phase",
      ColorMode::Block => "Block",
      other => other.property().map(|p| p.label()).unwrap_or("Unknown"),
    }
  }

  pub fn index(&self) -> usize {
    Self::ALL.iter().position(|m| m == self).unwrap_or(0)
  }

  pub fn from_index(i: usize) -> Option<Self> {
    Self::ALL.get(i).copied()
  }
}

// --- SceneStyle ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
  pub background_color: (f64, f64, f64),
  /// Side length of a tile in grid units (1.0 = touching neighbours).
  pub tile_size: f64,
  /// Extrusion of a tile toward the viewer, in grid units.
  pub tile_depth: f64,
  pub hover_lift: f64,
  pub select_lift: f64,
  /// Brightness factor applied to unselected tiles while something is selected.
  pub dim_factor: f64,
  pub show_names: bool,
}

impl Default for SceneStyle {
  fn default() -> Self {
    Self {
      background_color: (0.08, 0.09, 0.12),
      tile_size: 0.9,
      tile_depth: 0.35,
      hover_lift: 0.35,
      select_lift: 0.8,
      dim_factor: 0.45,
      show_names: true,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
  /// Element data document. Falls back to the bundled `assets/elements.json`.
  #[serde(default)]
  pub data_path: Option<PathBuf>,

  #[serde(default = "default_color_mode")]
  pub default_color_mode: ColorMode,

  /// Widths below this (px) use the compact mobile layout.
  #[serde(default = "default_breakpoint")]
  pub mobile_breakpoint: f64,

  #[serde(default = "default_log_level")]
  pub log_level: String,

  #[serde(default)]
  pub style: SceneStyle,
}

fn default_color_mode() -> ColorMode {
  ColorMode::Category
}

fn default_breakpoint() -> f64 {
  768.0
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self {
      data_path: None,
      default_color_mode: default_color_mode(),
      mobile_breakpoint: default_breakpoint(),
      log_level: default_log_level(),
      style: SceneStyle::default(),
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/ptable3d/settings.json)
  pub fn load() -> (Self, String) {
    let path = Self::get_path();
    if path.exists() {
      match File::open(&path) {
        Ok(file) => {
          let reader = BufReader::new(file);
          match serde_json::from_reader(reader) {
            Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
          }
        }
        Err(e) => (Self::default(), format!("Error opening config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    let path = Self::get_path();
    if let Some(parent) = path.parent() {
      let _ = fs::create_dir_all(parent);
    }

    match File::create(&path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Config saved to {:?}", path),
          Err(e) => format!("Failed to save config: {}", e),
        }
      }
      Err(e) => format!("Could not create config file: {}", e),
    }
  }

  pub fn level_filter(&self) -> LevelFilter {
    self.log_level.parse().unwrap_or(LevelFilter::Info)
  }

  fn get_path() -> PathBuf {
    // Must match the application id in main.rs
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "ptable3d") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}
