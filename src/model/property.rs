// src/model/property.rs

use super::elements::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric element properties that can drive a color gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    AtomicMass,
    Electronegativity,
    Density,
    MeltingPoint,
    BoilingPoint,
    IonizationEnergy,
    ElectronAffinity,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::AtomicMass,
        Property::Electronegativity,
        Property::Density,
        Property::MeltingPoint,
        Property::BoilingPoint,
        Property::IonizationEnergy,
        Property::ElectronAffinity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Property::AtomicMass => "Atomic Mass",
            Property::Electronegativity => "Electronegativity",
            Property::Density => "Density",
            Property::MeltingPoint => "Melting Point",
            Property::BoilingPoint => "Boiling Point",
            Property::IonizationEnergy => "Ionization Energy",
            Property::ElectronAffinity => "Electron Affinity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Property::AtomicMass => "u",
            Property::Electronegativity => "Pauling",
            Property::Density => "g/cm³",
            Property::MeltingPoint | Property::BoilingPoint => "K",
            Property::IonizationEnergy | Property::ElectronAffinity => "kJ/mol",
        }
    }

    /// Reads the property off an element. `None` means the dataset has no value.
    pub fn value(&self, el: &Element) -> Option<f64> {
        let v = match self {
            Property::AtomicMass => Some(el.atomic_mass),
            Property::Electronegativity => el.electronegativity_pauling,
            Property::Density => el.density,
            Property::MeltingPoint => el.melt,
            Property::BoilingPoint => el.boil,
            Property::IonizationEnergy => el.first_ionization(),
            Property::ElectronAffinity => el.electron_affinity,
        };
        v.filter(|x| x.is_finite())
    }
}

/// Min/max bounds of one property across the loaded set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyRange {
    pub min: f64,
    pub max: f64,
}

impl PropertyRange {
    /// Scans the values, skipping missing ones. Returns `None` when nothing is left.
    pub fn scan<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<PropertyRange>, v| match acc {
                None => Some(PropertyRange { min: v, max: v }),
                Some(r) => Some(PropertyRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` inside the range, clamped to [0, 1].
    /// A degenerate range maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span.abs() < f64::EPSILON || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Ranges for every numeric property, computed once after load.
#[derive(Debug, Clone, Default)]
pub struct PropertyRanges {
    ranges: HashMap<Property, PropertyRange>,
}

impl PropertyRanges {
    pub fn compute(elements: &[Element]) -> Self {
        let mut ranges = HashMap::new();
        for prop in Property::ALL {
            if let Some(r) = PropertyRange::scan(elements.iter().map(|e| prop.value(e))) {
                ranges.insert(prop, r);
            }
        }
        Self { ranges }
    }

    pub fn get(&self, prop: Property) -> Option<PropertyRange> {
        self.ranges.get(&prop).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_skips_missing() {
        let r = PropertyRange::scan(vec![Some(3.0), None, Some(-1.0), Some(7.5), None]).unwrap();
        assert_eq!(r.min, -1.0);
        assert_eq!(r.max, 7.5);
    }

    #[test]
    fn test_scan_empty_is_none() {
        assert!(PropertyRange::scan(vec![None, None]).is_none());
        assert!(PropertyRange::scan(Vec::<Option<f64>>::new()).is_none());
        assert!(PropertyRange::scan(vec![Some(f64::NAN)]).is_none());
    }

    #[test]
    fn test_normalize_clamps() {
        let r = PropertyRange { min: 10.0, max: 20.0 };
        assert_eq!(r.normalize(10.0), 0.0);
        assert_eq!(r.normalize(20.0), 1.0);
        assert!((r.normalize(15.0) - 0.5).abs() < 1e-12);
        assert_eq!(r.normalize(-100.0), 0.0);
        assert_eq!(r.normalize(1e9), 1.0);
    }

    #[test]
    fn test_normalize_degenerate_range() {
        let r = PropertyRange { min: 4.0, max: 4.0 };
        assert_eq!(r.normalize(4.0), 0.0);
        assert_eq!(r.normalize(9.0), 0.0);
    }
}
