// material/metal.rs
// Metal property table and the resolver that maps any symbol onto it

use once_cell::sync::Lazy;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{is_positive, Error, Result};

/// Electrochemical properties of the framework metal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetalProperties {
    /// Canonical element symbol ("Cu", "Ru", ...)
    pub symbol: String,
    /// Relative redox activity, 1.0 is the neutral baseline
    pub redox_factor: f64,
    /// Relative electronic conductivity, 1.0 is the neutral baseline
    pub conductivity: f64,
    /// Color used by plotting front-ends
    pub display_color: Srgb<u8>,
    /// Bulk plasmon loss energy (eV)
    pub plasmon_peak_ev: f64,
    /// d-d transition loss energy (eV)
    pub d_transition_ev: f64,
}

impl MetalProperties {
    pub const NEUTRAL_REDOX: f64 = 1.0;
    pub const NEUTRAL_CONDUCTIVITY: f64 = 1.0;
    pub const NEUTRAL_COLOR: [u8; 3] = [0x80, 0x80, 0x80];
    pub const NEUTRAL_PLASMON_EV: f64 = 20.0;
    pub const NEUTRAL_D_TRANSITION_EV: f64 = 6.0;

    /// Baseline record for a metal the table does not know.
    pub fn neutral(symbol: impl Into<String>) -> Self {
        let [r, g, b] = Self::NEUTRAL_COLOR;
        Self {
            symbol: symbol.into(),
            redox_factor: Self::NEUTRAL_REDOX,
            conductivity: Self::NEUTRAL_CONDUCTIVITY,
            display_color: Srgb::new(r, g, b),
            plasmon_peak_ev: Self::NEUTRAL_PLASMON_EV,
            d_transition_ev: Self::NEUTRAL_D_TRANSITION_EV,
        }
    }

    /// Hex form of the display color, e.g. "#b87333"
    pub fn color_hex(&self) -> String {
        let c = self.display_color;
        format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
    }

    fn validate(&self) -> Result<()> {
        let checks = [
            ("redox_factor", self.redox_factor),
            ("conductivity", self.conductivity),
            ("plasmon_peak_ev", self.plasmon_peak_ev),
            ("d_transition_ev", self.d_transition_ev),
        ];
        for (field, value) in checks {
            if !is_positive(value) {
                return Err(Error::InvalidTableEntry {
                    key: self.symbol.clone(),
                    reason: format!("{} must be positive, got {}", field, value),
                });
            }
        }
        Ok(())
    }
}

/// Trim and bring a symbol into element form: first letter upper, rest lower.
pub fn normalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// symbol, redox, conductivity, color, plasmon (eV), d-transition (eV)
const CURATED_METALS: &[(&str, f64, f64, [u8; 3], f64, f64)] = &[
    ("Cu", 1.20, 1.15, [0xb8, 0x73, 0x33], 22.0, 5.0),
    ("Ni", 1.10, 1.10, [0x8c, 0x92, 0xac], 20.0, 6.0),
    ("Co", 1.15, 1.12, [0x00, 0x47, 0xab], 21.0, 5.5),
    ("Zn", 0.95, 1.05, [0x7a, 0x7f, 0x84], 19.0, 7.0),
    ("Fe", 1.05, 1.08, [0xb7, 0x41, 0x0e], 20.5, 6.5),
    ("Mn", 1.00, 1.06, [0x9c, 0x6f, 0x7b], 19.5, 6.8),
    ("Ag", 1.25, 1.20, [0xc0, 0xc0, 0xc0], 23.0, 4.5),
    ("Au", 1.18, 1.18, [0xff, 0xd7, 0x00], 24.0, 4.8),
    ("Pd", 1.12, 1.14, [0xcc, 0xc5, 0xb9], 21.5, 5.2),
    ("Pt", 1.22, 1.17, [0xe5, 0xe4, 0xe2], 23.5, 5.0),
    ("Cr", 1.08, 1.09, [0x8a, 0x99, 0xc7], 20.2, 6.2),
    ("V", 1.06, 1.07, [0xa6, 0xa6, 0xab], 19.8, 6.5),
    ("Ti", 0.98, 1.04, [0xbf, 0xc2, 0xc7], 18.5, 7.2),
    ("Mo", 1.13, 1.11, [0x54, 0xb5, 0xb5], 21.8, 5.8),
    ("W", 1.16, 1.13, [0x21, 0x94, 0xd6], 22.5, 5.5),
];

static CURATED: Lazy<MetalTable> = Lazy::new(|| {
    let mut table = MetalTable::new();
    for &(symbol, redox, conductivity, [r, g, b], plasmon, d_transition) in CURATED_METALS {
        table.push(MetalProperties {
            symbol: symbol.to_string(),
            redox_factor: redox,
            conductivity,
            display_color: Srgb::new(r, g, b),
            plasmon_peak_ev: plasmon,
            d_transition_ev: d_transition,
        });
    }
    table
});

/// Lookup table of known metals, keyed by canonical symbol
#[derive(Clone, Debug, Default)]
pub struct MetalTable {
    entries: Vec<MetalProperties>,
    index: HashMap<String, usize>,
}

impl MetalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of curated metals.
    pub fn curated() -> &'static MetalTable {
        &CURATED
    }

    /// Add an entry. Symbols are normalized; duplicates and non-positive
    /// factors are rejected.
    pub fn insert(&mut self, mut props: MetalProperties) -> Result<()> {
        props.symbol = normalize_symbol(&props.symbol);
        props.validate()?;
        if self.index.contains_key(&props.symbol) {
            return Err(Error::InvalidTableEntry {
                key: props.symbol,
                reason: "duplicate metal symbol".to_string(),
            });
        }
        self.push(props);
        Ok(())
    }

    fn push(&mut self, props: MetalProperties) {
        self.index.insert(props.symbol.clone(), self.entries.len());
        self.entries.push(props);
    }

    /// Known entry for `symbol`, if any.
    pub fn get(&self, symbol: &str) -> Option<&MetalProperties> {
        self.index
            .get(&normalize_symbol(symbol))
            .map(|&i| &self.entries[i])
    }

    /// Resolve any symbol. Unknown metals get the neutral record.
    pub fn resolve(&self, symbol: &str) -> MetalProperties {
        let symbol = normalize_symbol(symbol);
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].clone(),
            None => MetalProperties::neutral(symbol),
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &MetalProperties> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve against the curated table.
pub fn resolve(symbol: &str) -> MetalProperties {
    MetalTable::curated().resolve(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curated_table_has_fifteen_metals() {
        assert_eq!(MetalTable::curated().len(), 15);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        for input in ["cu", "CU", " Cu ", "cU"] {
            let props = resolve(input);
            assert_eq!(props.symbol, "Cu");
            assert_eq!(props.redox_factor, 1.2);
            assert_eq!(props.conductivity, 1.15);
        }
    }

    #[test]
    fn unknown_metal_is_neutral() {
        let props = resolve("ru");
        assert_eq!(props.symbol, "Ru");
        assert_eq!(props.redox_factor, 1.0);
        assert_eq!(props.conductivity, 1.0);
        assert_eq!(props.color_hex(), "#808080");
    }

    #[test]
    fn color_hex_formats_lowercase() {
        assert_eq!(resolve("Cu").color_hex(), "#b87333");
        assert_eq!(resolve("Co").color_hex(), "#0047ab");
    }

    #[test]
    fn substitute_table_rejects_duplicates_and_bad_factors() {
        let mut table = MetalTable::new();
        table.insert(MetalProperties::neutral("ru")).unwrap();
        assert!(table.contains("Ru"));

        let dup = table.insert(MetalProperties::neutral("RU")).unwrap_err();
        assert!(dup.is_invalid_input());

        let mut bad = MetalProperties::neutral("Os");
        bad.conductivity = 0.0;
        assert!(table.insert(bad).is_err());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn substitute_table_replaces_curated_values() {
        let mut table = MetalTable::new();
        let mut cu = MetalProperties::neutral("Cu");
        cu.redox_factor = 2.0;
        table.insert(cu).unwrap();
        assert_eq!(table.resolve("cu").redox_factor, 2.0);
        assert_eq!(table.resolve("Ni").redox_factor, 1.0);
    }

    #[test]
    fn normalize_handles_empty_and_single_letter() {
        assert_eq!(normalize_symbol(""), "");
        assert_eq!(normalize_symbol("w"), "W");
        assert_eq!(normalize_symbol("MO"), "Mo");
    }
}
