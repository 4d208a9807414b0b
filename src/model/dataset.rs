// src/model/dataset.rs

use super::elements::Element;
use super::property::PropertyRanges;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::io;

pub const MAX_ATOMIC_NUMBER: u8 = 118;
pub const GRID_COLUMNS: u8 = 18;
pub const GRID_ROWS: u8 = 10;

#[derive(Debug)]
pub enum DataError {
    Io(io::Error),
    Json(serde_json::Error),
    Empty,
    NumberOutOfRange { symbol: String, number: u8 },
    DuplicateNumber(u8),
    PositionOutOfRange { number: u8, xpos: u8, ypos: u8 },
    DuplicatePosition { number: u8, xpos: u8, ypos: u8 },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "could not read element data: {e}"),
            DataError::Json(e) => write!(f, "malformed element data: {e}"),
            DataError::Empty => write!(f, "element data contains no records"),
            DataError::NumberOutOfRange { symbol, number } => write!(
                f,
                "element {symbol} has atomic number {number}, expected 1..={MAX_ATOMIC_NUMBER}"
            ),
            DataError::DuplicateNumber(n) => write!(f, "atomic number {n} appears twice"),
            DataError::PositionOutOfRange { number, xpos, ypos } => write!(
                f,
                "element {number} sits at ({xpos}, {ypos}), outside the {GRID_COLUMNS}x{GRID_ROWS} grid"
            ),
            DataError::DuplicatePosition { number, xpos, ypos } => {
                write!(f, "element {number} shares grid cell ({xpos}, {ypos})")
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DataError {
    fn from(e: io::Error) -> Self {
        DataError::Io(e)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Json(e)
    }
}

/// The loaded periodic table. Sorted by atomic number, read-only after load.
#[derive(Debug, Clone)]
pub struct ElementSet {
    elements: Vec<Element>,
}

impl ElementSet {
    pub fn from_slice(raw: &[u8]) -> Result<Self, DataError> {
        // Either a bare array or wrapped as {"elements": [...]}.
        let doc: Value = serde_json::from_slice(raw)?;
        let list = match doc {
            Value::Object(mut map) if map.contains_key("elements") => {
                map.remove("elements").unwrap_or(Value::Null)
            }
            other => other,
        };
        let elements: Vec<Element> = serde_json::from_value(list)?;
        Self::from_elements(elements)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DataError> {
        Self::from_slice(raw.as_bytes())
    }

    pub fn from_elements(mut elements: Vec<Element>) -> Result<Self, DataError> {
        if elements.is_empty() {
            return Err(DataError::Empty);
        }

        let mut numbers = HashSet::new();
        let mut cells = HashSet::new();
        for el in &elements {
            if el.number == 0 || el.number > MAX_ATOMIC_NUMBER {
                return Err(DataError::NumberOutOfRange {
                    symbol: el.symbol.clone(),
                    number: el.number,
                });
            }
            if !numbers.insert(el.number) {
                return Err(DataError::DuplicateNumber(el.number));
            }
            let in_grid = (1..=GRID_COLUMNS).contains(&el.xpos) && (1..=GRID_ROWS).contains(&el.ypos);
            if !in_grid {
                return Err(DataError::PositionOutOfRange {
                    number: el.number,
                    xpos: el.xpos,
                    ypos: el.ypos,
                });
            }
            if !cells.insert((el.xpos, el.ypos)) {
                return Err(DataError::DuplicatePosition {
                    number: el.number,
                    xpos: el.xpos,
                    ypos: el.ypos,
                });
            }
        }

        elements.sort_by_key(|e| e.number);
        Ok(Self { elements })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, number: u8) -> Option<&Element> {
        self.elements
            .binary_search_by_key(&number, |e| e.number)
            .ok()
            .map(|i| &self.elements[i])
    }

}

/// A loaded set plus the ranges derived from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub elements: ElementSet,
    pub ranges: PropertyRanges,
}

impl Dataset {
    pub fn new(elements: ElementSet) -> Self {
        let ranges = PropertyRanges::compute(elements.as_slice());
        Self { elements, ranges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::property::Property;

    const SHIPPED: &str = include_str!("../../assets/elements.json");

    fn record(number: u8, symbol: &str, xpos: u8, ypos: u8) -> String {
        format!(
            r#"{{"name":"{symbol}","symbol":"{symbol}","number":{number},"xpos":{xpos},"ypos":{ypos},
            "category":"metalloid","phase":"Solid","block":"p","atomic_mass":{number}.5}}"#
        )
    }

    #[test]
    fn test_shipped_dataset_loads() {
        let set = ElementSet::from_json_str(SHIPPED).expect("shipped data must load");
        assert_eq!(set.len(), 118);
        for (i, el) in set.iter().enumerate() {
            assert_eq!(el.number as usize, i + 1);
        }
        assert_eq!(set.get(26).map(|e| e.symbol.as_str()), Some("Fe"));
        assert_eq!(set.get(118).map(|e| e.symbol.as_str()), Some("Og"));
        assert!(set.get(0).is_none());
        assert!(set.get(119).is_none());
    }

    #[test]
    fn test_shipped_dataset_ranges() {
        let set = ElementSet::from_json_str(SHIPPED).unwrap();
        let ds = Dataset::new(set);
        let mass = ds.ranges.get(Property::AtomicMass).unwrap();
        assert!((mass.min - 1.008).abs() < 1e-9);
        let en = ds.ranges.get(Property::Electronegativity).unwrap();
        assert!((en.max - 3.98).abs() < 1e-9);
    }

    #[test]
    fn test_bare_array_and_sorting() {
        let json = format!("[{}, {}]", record(6, "C", 14, 2), record(5, "B", 13, 2));
        let set = ElementSet::from_json_str(&json).unwrap();
        let numbers: Vec<u8> = set.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![5, 6]);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            ElementSet::from_json_str(r#"{"elements": []}"#),
            Err(DataError::Empty)
        ));
    }

    #[test]
    fn test_rejects_duplicate_number() {
        let json = format!("[{}, {}]", record(6, "C", 14, 2), record(6, "X", 15, 2));
        assert!(matches!(
            ElementSet::from_json_str(&json),
            Err(DataError::DuplicateNumber(6))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_number() {
        let json = format!("[{}]", record(119, "Uue", 1, 8));
        assert!(matches!(
            ElementSet::from_json_str(&json),
            Err(DataError::NumberOutOfRange { number: 119, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_positions() {
        let off_grid = format!("[{}]", record(1, "H", 19, 1));
        assert!(matches!(
            ElementSet::from_json_str(&off_grid),
            Err(DataError::PositionOutOfRange { .. })
        ));

        let shared = format!("[{}, {}]", record(1, "H", 1, 1), record(3, "Li", 1, 1));
        assert!(matches!(
            ElementSet::from_json_str(&shared),
            Err(DataError::DuplicatePosition { number: 3, .. })
        ));
    }

    #[test]
    fn test_malformed_json_reports_parse_error() {
        let err = ElementSet::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
        assert!(err.to_string().starts_with("malformed element data"));
    }

    #[test]
    fn test_io_error_message() {
        let err = DataError::from(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(err.to_string(), "could not read element data: no such file");
    }
}
