// material/electrode.rs
// Electrode substrates (current collectors) and their effect on capacity and resistance

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::table_key;
use crate::error::{is_positive, Error, Result};

/// Substrate the active material is coated on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectrodeProperties {
    pub name: String,
    /// Capacity multiplier (3D foams expose more active material)
    pub capacity_boost: f64,
    /// Resistance multiplier, lower is a better collector
    pub resistance_factor: f64,
}

// name, capacity boost, resistance factor
const CURATED_ELECTRODES: &[(&str, f64, f64)] = &[
    ("Nickel Foam", 1.3, 0.8),
    ("Glassy Carbon", 1.0, 1.0),
    ("Carbon Cloth", 1.15, 0.9),
    ("Stainless Steel", 1.1, 1.1),
];

static CURATED: Lazy<ElectrodeTable> = Lazy::new(|| {
    let mut table = ElectrodeTable::default();
    for &(name, capacity_boost, resistance_factor) in CURATED_ELECTRODES {
        table.push(ElectrodeProperties {
            name: name.to_string(),
            capacity_boost,
            resistance_factor,
        });
    }
    table
});

#[derive(Clone, Debug, Default)]
pub struct ElectrodeTable {
    entries: Vec<ElectrodeProperties>,
    index: HashMap<String, usize>,
}

impl ElectrodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn curated() -> &'static ElectrodeTable {
        &CURATED
    }

    pub fn insert(&mut self, props: ElectrodeProperties) -> Result<()> {
        for (field, value) in [
            ("capacity_boost", props.capacity_boost),
            ("resistance_factor", props.resistance_factor),
        ] {
            if !is_positive(value) {
                return Err(Error::InvalidTableEntry {
                    key: props.name,
                    reason: format!("{} must be positive, got {}", field, value),
                });
            }
        }
        if self.index.contains_key(&table_key(&props.name)) {
            return Err(Error::InvalidTableEntry {
                key: props.name,
                reason: "duplicate electrode".to_string(),
            });
        }
        self.push(props);
        Ok(())
    }

    fn push(&mut self, props: ElectrodeProperties) {
        self.index.insert(table_key(&props.name), self.entries.len());
        self.entries.push(props);
    }

    pub fn get(&self, electrode: &str) -> Option<&ElectrodeProperties> {
        self.index.get(&table_key(electrode)).map(|&i| &self.entries[i])
    }

    pub fn capacity_boost(&self, electrode: &str) -> f64 {
        self.get(electrode).map(|e| e.capacity_boost).unwrap_or(1.0)
    }

    pub fn resistance_factor(&self, electrode: &str) -> f64 {
        self.get(electrode).map(|e| e.resistance_factor).unwrap_or(1.0)
    }

    pub fn position(&self, electrode: &str) -> Option<usize> {
        self.index.get(&table_key(electrode)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElectrodeProperties> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickel_foam_lowers_resistance_and_boosts_capacity() {
        let table = ElectrodeTable::curated();
        assert_eq!(table.capacity_boost("nickel foam"), 1.3);
        assert_eq!(table.resistance_factor("Nickel Foam"), 0.8);
    }

    #[test]
    fn unknown_substrate_is_neutral() {
        let table = ElectrodeTable::curated();
        assert_eq!(table.capacity_boost("Graphene Paper"), 1.0);
        assert_eq!(table.resistance_factor("Graphene Paper"), 1.0);
    }

    #[test]
    fn table_order_is_preserved() {
        let names: Vec<_> = ElectrodeTable::curated().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Nickel Foam", "Glassy Carbon", "Carbon Cloth", "Stainless Steel"]
        );
    }
}
