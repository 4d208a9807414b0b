// src/rendering/colors.rs

use crate::config::ColorMode;
use crate::model::dataset::Dataset;
use crate::model::elements::{Block, Category, Element, Phase};
use crate::model::property::{Property, PropertyRange, PropertyRanges};

pub type Rgb = (f64, f64, f64);

/// Used when an element has no value for the active mode.
pub const NO_DATA: Rgb = (0.42, 0.42, 0.45);

/// Linear per-channel blend. `t` is clamped to [0, 1].
pub fn lerp_color(low: Rgb, high: Rgb, t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    (
        low.0 + (high.0 - low.0) * t,
        low.1 + (high.1 - low.1) * t,
        low.2 + (high.2 - low.2) * t,
    )
}

/// Maps `value` inside `range` onto the low→high gradient.
/// Values outside the range clamp to the end colors.
pub fn interpolate(value: f64, range: PropertyRange, low: Rgb, high: Rgb) -> Rgb {
    lerp_color(low, high, range.normalize(value))
}

/// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
pub fn parse_hex(raw: &str) -> Option<Rgb> {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let double = |i: usize| hex[i..i + 1].repeat(2);
            Some((channel(&double(0))?, channel(&double(1))?, channel(&double(2))?))
        }
        _ => None,
    }
}

pub fn to_hex(c: Rgb) -> String {
    let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(c.0), byte(c.1), byte(c.2))
}

/// Relative luminance (sRGB weights, no gamma).
pub fn luminance(c: Rgb) -> f64 {
    0.2126 * c.0 + 0.7152 * c.1 + 0.0722 * c.2
}

/// Black or white, whichever reads better on `bg`.
pub fn contrast_text(bg: Rgb) -> Rgb {
    if luminance(bg) > 0.55 {
        (0.08, 0.08, 0.1)
    } else {
        (0.97, 0.97, 0.97)
    }
}

pub fn scale(c: Rgb, k: f64) -> Rgb {
    (
        (c.0 * k).clamp(0.0, 1.0),
        (c.1 * k).clamp(0.0, 1.0),
        (c.2 * k).clamp(0.0, 1.0),
    )
}

pub fn category_color(c: Category) -> Rgb {
    match c {
        Category::AlkaliMetal => (0.96, 0.42, 0.38),
        Category::AlkalineEarthMetal => (0.99, 0.66, 0.30),
        Category::TransitionMetal => (0.96, 0.80, 0.38),
        Category::PostTransitionMetal => (0.55, 0.80, 0.62),
        Category::Metalloid => (0.36, 0.76, 0.72),
        Category::PolyatomicNonmetal => (0.40, 0.66, 0.92),
        Category::DiatomicNonmetal => (0.52, 0.56, 0.96),
        Category::NobleGas => (0.74, 0.52, 0.92),
        Category::Lanthanide => (0.94, 0.52, 0.74),
        Category::Actinide => (0.86, 0.44, 0.56),
        Category::Unknown => (0.60, 0.60, 0.62),
    }
}

pub fn phase_color(p: Phase) -> Rgb {
    match p {
        Phase::Solid => (0.62, 0.64, 0.70),
        Phase::Liquid => (0.25, 0.55, 0.95),
        Phase::Gas => (0.95, 0.78, 0.30),
        Phase::Unknown => NO_DATA,
    }
}

pub fn block_color(b: Block) -> Rgb {
    match b {
        Block::S => (0.93, 0.45, 0.40),
        Block::P => (0.98, 0.80, 0.35),
        Block::D => (0.40, 0.70, 0.95),
        Block::F => (0.55, 0.82, 0.52),
        Block::Unknown => NO_DATA,
    }
}

/// End colors (low, high) of the gradient for a numeric property.
pub fn gradient_for(prop: Property) -> (Rgb, Rgb) {
    match prop {
        Property::AtomicMass => ((0.80, 0.92, 1.00), (0.10, 0.20, 0.60)),
        Property::Electronegativity => ((1.00, 0.95, 0.70), (0.80, 0.10, 0.15)),
        Property::Density => ((0.85, 0.95, 0.85), (0.10, 0.40, 0.20)),
        Property::MeltingPoint | Property::BoilingPoint => ((0.25, 0.45, 0.95), (0.98, 0.30, 0.12)),
        Property::IonizationEnergy => ((0.95, 0.90, 1.00), (0.40, 0.10, 0.65)),
        Property::ElectronAffinity => ((0.20, 0.55, 0.60), (1.00, 0.85, 0.30)),
    }
}

/// The display color of `el` under `mode`.
pub fn element_color(el: &Element, mode: ColorMode, ranges: &PropertyRanges) -> Rgb {
    match mode {
        ColorMode::Category => category_color(el.category),
        ColorMode::Cpk => el.cpk_color().unwrap_or(NO_DATA),
        ColorMode::Phase => phase_color(el.phase),
        ColorMode::Block => block_color(el.block),
        numeric => {
            let Some(prop) = numeric.property() else {
                return NO_DATA;
            };
            match (prop.value(el), ranges.get(prop)) {
                (Some(v), Some(range)) => {
                    let (low, high) = gradient_for(prop);
                    interpolate(v, range, low, high)
                }
                _ => NO_DATA,
            }
        }
    }
}

/// Convenience for painters that only have the dataset at hand.
pub fn color_in(ds: &Dataset, number: u8, mode: ColorMode) -> Rgb {
    ds.elements
        .get(number)
        .map(|el| element_color(el, mode, &ds.ranges))
        .unwrap_or(NO_DATA)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOW: Rgb = (0.0, 0.2, 1.0);
    const HIGH: Rgb = (1.0, 0.6, 0.0);

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9 && (a.2 - b.2).abs() < 1e-9
    }

    #[test]
    fn test_interpolate_endpoints() {
        let r = PropertyRange { min: 2.0, max: 6.0 };
        assert!(close(interpolate(2.0, r, LOW, HIGH), LOW));
        assert!(close(interpolate(6.0, r, LOW, HIGH), HIGH));
        assert!(close(interpolate(4.0, r, LOW, HIGH), (0.5, 0.4, 0.5)));
    }

    #[test]
    fn test_interpolate_clamps_outside_range() {
        let r = PropertyRange { min: 2.0, max: 6.0 };
        assert!(close(interpolate(-50.0, r, LOW, HIGH), LOW));
        assert!(close(interpolate(600.0, r, LOW, HIGH), HIGH));
    }

    #[test]
    fn test_interpolate_degenerate_range_is_low() {
        let r = PropertyRange { min: 3.0, max: 3.0 };
        assert!(close(interpolate(3.0, r, LOW, HIGH), LOW));
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("#ffffff"), Some((1.0, 1.0, 1.0)));
        assert_eq!(parse_hex("000000"), Some((0.0, 0.0, 0.0)));
        assert_eq!(parse_hex("#f00"), Some((1.0, 0.0, 0.0)));
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("zzzzzz"), None);
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(to_hex(parse_hex("e06633").unwrap()), "#e06633");
    }

    #[test]
    fn test_contrast_text() {
        assert!(luminance(contrast_text((1.0, 1.0, 1.0))) < 0.2);
        assert!(luminance(contrast_text((0.05, 0.05, 0.2))) > 0.9);
    }

    #[test]
    fn test_element_color_by_mode() {
        let set = crate::model::dataset::ElementSet::from_json_str(include_str!(
            "../../assets/elements.json"
        ))
        .unwrap();
        let ds = Dataset::new(set);

        // Iron carries its own hex color.
        assert!(close(color_in(&ds, 26, ColorMode::Cpk), parse_hex("e06633").unwrap()));
        assert!(close(
            color_in(&ds, 2, ColorMode::Category),
            category_color(Category::NobleGas)
        ));

        // Helium has no electronegativity; hydrogen has the lightest mass.
        assert!(close(color_in(&ds, 2, ColorMode::Electronegativity), NO_DATA));
        let (low, _) = gradient_for(Property::AtomicMass);
        assert!(close(color_in(&ds, 1, ColorMode::AtomicMass), low));

        // Darmstadtium ships without a hex color.
        assert!(close(color_in(&ds, 110, ColorMode::Cpk), NO_DATA));
        assert!(close(color_in(&ds, 200, ColorMode::Category), NO_DATA));
    }
}
