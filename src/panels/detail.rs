use crate::model::elements::Element;
use crate::rendering::colors::{color_in, to_hex, NO_DATA};
use crate::state::AppState;
use gtk4::prelude::*;
use gtk4::{Align, Box, Frame, Grid, Label, Orientation, PolicyType, ScrolledWindow};

pub const PLACEHOLDER: &str = "Hover over an element to preview it.\nClick to pin it here.";

/// Formats an optional measurement; absent values read "Unknown".
pub fn format_measure(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if unit.is_empty() {
                format!("{:.*}", decimals, v)
            } else {
                format!("{:.*} {}", decimals, v, unit)
            }
        }
        _ => "Unknown".to_string(),
    }
}

fn format_ionization(values: &[f64]) -> String {
    if values.is_empty() {
        return "Unknown".to_string();
    }
    let joined: Vec<String> = values.iter().map(|v| format!("{:.1}", v)).collect();
    format!("{} kJ/mol", joined.join(", "))
}

/// The label/value pairs shown on the card, in display order.
pub fn detail_rows(el: &Element) -> Vec<(&'static str, String)> {
    vec![
        ("Name", el.name.clone()),
        ("Symbol", el.symbol.clone()),
        ("Atomic number", el.number.to_string()),
        ("Category", el.category.label().to_string()),
        ("Phase", el.phase.label().to_string()),
        ("Block", el.block.label().to_string()),
        ("Period", el.period().to_string()),
        ("Atomic mass", format_measure(Some(el.atomic_mass), 3, "u")),
        ("Melting point", format_measure(el.melt, 2, "K")),
        ("Boiling point", format_measure(el.boil, 2, "K")),
        ("Density", format_measure(el.density, 3, "g/cm³")),
        (
            "Electronegativity",
            format_measure(el.electronegativity_pauling, 2, ""),
        ),
        ("Ionization energies", format_ionization(&el.ionization_energies)),
        (
            "Electron affinity",
            format_measure(el.electron_affinity, 2, "kJ/mol"),
        ),
    ]
}

pub struct DetailPanel {
    pub container: Box,
    header: Label,
    placeholder: Label,
    grid: Grid,
    summary: Label,
}

impl DetailPanel {
    pub fn new() -> Self {
        let container = Box::new(Orientation::Vertical, 10);
        container.set_width_request(280);
        container.set_margin_start(10);
        container.set_margin_end(10);
        container.set_margin_top(10);
        container.set_margin_bottom(10);

        let title = Label::new(Some("<b>Element</b>"));
        title.set_use_markup(true);
        title.set_halign(Align::Start);
        container.append(&title);

        let frame = Frame::new(None);
        let inner = Box::new(Orientation::Vertical, 8);
        inner.set_margin_top(10);
        inner.set_margin_bottom(10);
        inner.set_margin_start(10);
        inner.set_margin_end(10);

        let header = Label::new(None);
        header.set_use_markup(true);
        header.set_halign(Align::Start);

        let placeholder = Label::new(Some(PLACEHOLDER));
        placeholder.set_wrap(true);
        placeholder.set_xalign(0.0);
        placeholder.add_css_class("dim-label");

        let grid = Grid::new();
        grid.set_row_spacing(4);
        grid.set_column_spacing(12);

        let summary = Label::new(None);
        summary.set_wrap(true);
        summary.set_xalign(0.0);
        summary.set_margin_top(6);

        inner.append(&header);
        inner.append(&placeholder);
        inner.append(&grid);
        inner.append(&summary);

        let scroll = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .vexpand(true)
            .child(&inner)
            .build();
        frame.set_child(Some(&scroll));
        container.append(&frame);

        let panel = Self {
            container,
            header,
            placeholder,
            grid,
            summary,
        };
        panel.show_placeholder();
        panel
    }

    fn show_placeholder(&self) {
        self.header.set_visible(false);
        self.grid.set_visible(false);
        self.summary.set_visible(false);
        self.placeholder.set_visible(true);
    }

    pub fn update(&self, state: &AppState) {
        let Some(el) = state.focused_element() else {
            self.show_placeholder();
            return;
        };

        while let Some(child) = self.grid.first_child() {
            self.grid.remove(&child);
        }

        // Symbol tinted with the tile's color under the active mode
        let tint = state
            .dataset()
            .map(|ds| color_in(ds, el.number, state.ui.color_mode))
            .unwrap_or(NO_DATA);
        let swatch = to_hex(tint);
        self.header.set_markup(&format!(
            "<span size='xx-large' weight='bold' foreground='{}'>{}</span>  <span size='large'>{}</span>",
            swatch,
            glib_escape(&el.symbol),
            glib_escape(&el.name)
        ));

        for (row, (key, value)) in detail_rows(el).into_iter().enumerate() {
            let k = Label::new(Some(key));
            k.set_xalign(0.0);
            k.add_css_class("dim-label");
            let v = Label::new(Some(&value));
            v.set_xalign(0.0);
            v.set_selectable(true);
            self.grid.attach(&k, 0, row as i32, 1, 1);
            self.grid.attach(&v, 1, row as i32, 1, 1);
        }

        self.summary.set_label(&el.summary);
        self.summary.set_visible(!el.summary.is_empty());
        self.header.set_visible(true);
        self.grid.set_visible(true);
        self.placeholder.set_visible(false);
    }
}

fn glib_escape(s: &str) -> String {
    gtk4::glib::markup_escape_text(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dataset::ElementSet;

    #[test]
    fn test_iron_rows() {
        let set = ElementSet::from_json_str(include_str!("../../assets/elements.json")).unwrap();
        let fe = set.get(26).unwrap();
        let rows = detail_rows(fe);
        let get = |k: &str| rows.iter().find(|(key, _)| *key == k).map(|(_, v)| v.clone()).unwrap();

        assert_eq!(get("Name"), "Iron");
        assert_eq!(get("Atomic number"), "26");
        assert_eq!(get("Category"), "Transition Metal");
        assert_eq!(get("Block"), "d-block");
        assert_eq!(get("Atomic mass"), "55.845 u");
        assert_eq!(get("Melting point"), "1811.00 K");
        assert_eq!(get("Density"), "7.874 g/cm³");
        assert_eq!(get("Electronegativity"), "1.83");
        assert_eq!(get("Ionization energies"), "762.5 kJ/mol");
    }

    #[test]
    fn test_missing_values_read_unknown() {
        let set = ElementSet::from_json_str(include_str!("../../assets/elements.json")).unwrap();
        let og = set.get(118).unwrap();
        let rows = detail_rows(og);
        let get = |k: &str| rows.iter().find(|(key, _)| *key == k).map(|(_, v)| v.clone()).unwrap();
        assert_eq!(get("Melting point"), "Unknown");
        assert_eq!(get("Electronegativity"), "Unknown");
        assert_eq!(get("Period"), "7");
    }

    #[test]
    fn test_format_measure() {
        assert_eq!(format_measure(None, 2, "K"), "Unknown");
        assert_eq!(format_measure(Some(f64::NAN), 2, "K"), "Unknown");
        assert_eq!(format_measure(Some(0.5), 1, ""), "0.5");
        assert_eq!(format_ionization(&[]), "Unknown");
        assert_eq!(format_ionization(&[1312.0, 2372.3]), "1312.0, 2372.3 kJ/mol");
    }
}
