// src/model/elements.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rendering::colors::{parse_hex, Rgb};

/// Chemical family of an element, as written in the dataset's `category` field.
///
/// The dataset spells the families as lowercase phrases ("alkali metal").
/// Superheavy elements carry hedged strings like "unknown, probably
/// transition metal"; those all collapse into `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    PolyatomicNonmetal,
    DiatomicNonmetal,
    NobleGas,
    Lanthanide,
    Actinide,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::AlkaliMetal,
        Category::AlkalineEarthMetal,
        Category::TransitionMetal,
        Category::PostTransitionMetal,
        Category::Metalloid,
        Category::PolyatomicNonmetal,
        Category::DiatomicNonmetal,
        Category::NobleGas,
        Category::Lanthanide,
        Category::Actinide,
        Category::Unknown,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "alkali metal" => Category::AlkaliMetal,
            "alkaline earth metal" => Category::AlkalineEarthMetal,
            "transition metal" => Category::TransitionMetal,
            "post-transition metal" => Category::PostTransitionMetal,
            "metalloid" => Category::Metalloid,
            "polyatomic nonmetal" => Category::PolyatomicNonmetal,
            "diatomic nonmetal" => Category::DiatomicNonmetal,
            "noble gas" => Category::NobleGas,
            "lanthanide" => Category::Lanthanide,
            "actinide" => Category::Actinide,
            _ => Category::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AlkaliMetal => "alkali metal",
            Category::AlkalineEarthMetal => "alkaline earth metal",
            Category::TransitionMetal => "transition metal",
            Category::PostTransitionMetal => "post-transition metal",
            Category::Metalloid => "metalloid",
            Category::PolyatomicNonmetal => "polyatomic nonmetal",
            Category::DiatomicNonmetal => "diatomic nonmetal",
            Category::NobleGas => "noble gas",
            Category::Lanthanide => "lanthanide",
            Category::Actinide => "actinide",
            Category::Unknown => "unknown",
        }
    }

    /// Title-cased label for the legend and detail card.
    pub fn label(&self) -> &'static str {
        match self {
            Category::AlkaliMetal => "Alkali Metal",
            Category::AlkalineEarthMetal => "Alkaline Earth Metal",
            Category::TransitionMetal => "Transition Metal",
            Category::PostTransitionMetal => "Post-Transition Metal",
            Category::Metalloid => "Metalloid",
            Category::PolyatomicNonmetal => "Polyatomic Nonmetal",
            Category::DiatomicNonmetal => "Diatomic Nonmetal",
            Category::NobleGas => "Noble Gas",
            Category::Lanthanide => "Lanthanide",
            Category::Actinide => "Actinide",
            Category::Unknown => "Unknown",
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standard state at room temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
    Unknown,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Solid, Phase::Liquid, Phase::Gas, Phase::Unknown];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Solid => "Solid",
            Phase::Liquid => "Liquid",
            Phase::Gas => "Gas",
            Phase::Unknown => "Unknown",
        }
    }
}

impl From<String> for Phase {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "solid" => Phase::Solid,
            "liquid" => Phase::Liquid,
            "gas" => Phase::Gas,
            _ => Phase::Unknown,
        }
    }
}

impl From<Phase> for String {
    fn from(p: Phase) -> Self {
        p.label().to_string()
    }
}

/// Electron block (s/p/d/f).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Block {
    S,
    P,
    D,
    F,
    Unknown,
}

impl Block {
    pub const ALL: [Block; 5] = [Block::S, Block::P, Block::D, Block::F, Block::Unknown];

    pub fn label(&self) -> &'static str {
        match self {
            Block::S => "s-block",
            Block::P => "p-block",
            Block::D => "d-block",
            Block::F => "f-block",
            Block::Unknown => "Unknown",
        }
    }
}

impl From<String> for Block {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "s" => Block::S,
            "p" => Block::P,
            "d" => Block::D,
            "f" => Block::F,
            _ => Block::Unknown,
        }
    }
}

impl From<Block> for String {
    fn from(b: Block) -> Self {
        match b {
            Block::S => "s",
            Block::P => "p",
            Block::D => "d",
            Block::F => "f",
            Block::Unknown => "unknown",
        }
        .to_string()
    }
}

/// One record of the element dataset. Never mutated after load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub symbol: String,
    /// Atomic number, the unique key (1..=118).
    pub number: u8,
    /// Grid column (1..=18).
    pub xpos: u8,
    /// Grid row (1..=10). Rows 9 and 10 hold the f-block.
    pub ypos: u8,
    pub category: Category,
    pub phase: Phase,
    pub block: Block,

    // The source document spells this key with a hyphen.
    #[serde(rename = "cpk-hex", alias = "cpk_hex", alias = "cpkHex", default)]
    pub cpk_hex: Option<String>,

    pub atomic_mass: f64,
    #[serde(default)]
    pub melt: Option<f64>,
    #[serde(default)]
    pub boil: Option<f64>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub electronegativity_pauling: Option<f64>,
    #[serde(default)]
    pub ionization_energies: Vec<f64>,
    #[serde(default)]
    pub electron_affinity: Option<f64>,
    #[serde(default)]
    pub summary: String,
}

impl Element {
    pub fn first_ionization(&self) -> Option<f64> {
        self.ionization_energies.first().copied()
    }

    /// The element's own display color, if the dataset carries a valid one.
    pub fn cpk_color(&self) -> Option<Rgb> {
        self.cpk_hex.as_deref().and_then(parse_hex)
    }

    /// Period of the element. The detached f-block rows map back to 6 and 7.
    pub fn period(&self) -> u8 {
        match self.ypos {
            9 => 6,
            10 => 7,
            row => row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IRON: &str = r#"{
        "name": "Iron", "symbol": "Fe", "number": 26, "xpos": 8, "ypos": 4,
        "category": "transition metal", "phase": "Solid", "block": "d",
        "cpk-hex": "e06633", "atomic_mass": 55.845, "melt": 1811, "boil": 3134,
        "density": 7.874, "electronegativity_pauling": 1.83,
        "ionization_energies": [762.5, 1561.9], "electron_affinity": 14.785,
        "summary": "Iron is a metal."
    }"#;

    #[test]
    fn test_parse_full_record() {
        let fe: Element = serde_json::from_str(IRON).unwrap();
        assert_eq!(fe.number, 26);
        assert_eq!(fe.category, Category::TransitionMetal);
        assert_eq!(fe.phase, Phase::Solid);
        assert_eq!(fe.block, Block::D);
        assert_eq!(fe.cpk_hex.as_deref(), Some("e06633"));
        assert_eq!(fe.first_ionization(), Some(762.5));
        assert_eq!(fe.period(), 4);
    }

    #[test]
    fn test_cpk_field_name_variants() {
        for key in ["cpk-hex", "cpk_hex", "cpkHex"] {
            let json = format!(
                r##"{{"name":"X","symbol":"X","number":1,"xpos":1,"ypos":1,
                "category":"noble gas","phase":"Gas","block":"s","atomic_mass":1.0,
                "{}":"#ff0000"}}"##,
                key
            );
            let el: Element = serde_json::from_str(&json).unwrap();
            assert_eq!(el.cpk_color(), Some((1.0, 0.0, 0.0)), "key {}", key);
        }
    }

    #[test]
    fn test_missing_optionals_default() {
        let json = r#"{"name":"Oganesson","symbol":"Og","number":118,"xpos":18,"ypos":7,
            "category":"unknown, predicted to be noble gas","phase":"Solid","block":"p",
            "atomic_mass":294,"cpk-hex":null}"#;
        let og: Element = serde_json::from_str(json).unwrap();
        assert_eq!(og.category, Category::Unknown);
        assert!(og.melt.is_none());
        assert!(og.ionization_energies.is_empty());
        assert!(og.first_ionization().is_none());
        assert!(og.cpk_color().is_none());
        assert!(og.summary.is_empty());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("Noble Gas"), Category::NobleGas);
        assert_eq!(Category::parse("  actinide "), Category::Actinide);
        assert_eq!(
            Category::parse("unknown, probably post-transition metal"),
            Category::Unknown
        );
    }

    #[test]
    fn test_f_block_period() {
        let json = r#"{"name":"Cerium","symbol":"Ce","number":58,"xpos":4,"ypos":9,
            "category":"lanthanide","phase":"Solid","block":"f","atomic_mass":140.12}"#;
        let ce: Element = serde_json::from_str(json).unwrap();
        assert_eq!(ce.period(), 6);
    }
}
