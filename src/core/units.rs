use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::number_format::{
    UnitPrefixes, approx_age, bytes_human_readable_list, fmt_bytes, fmt_number_with_precision,
    percent, physical_precision, physical_precision_list, scientific,
};

/// Renders a single value including its unit suffix.
pub type UnitRenderFn = fn(f64) -> String;

/// Derives one graph-wide unit for a set of axis values and returns the
/// values rendered against it (without suffix), in input order.
pub type GraphUnitFn = fn(&[f64]) -> (String, Vec<String>);

/// Axis-tick granularity family preferred by a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Stepping {
    /// Steps of 1, 2, 2.5 and 5 times a power of ten. Unknown names map here.
    #[default]
    Decimal,
    /// Like decimal but never below 1.
    Integer,
    /// Powers of two, for byte sizes.
    Binary,
    /// Seconds, minutes and days.
    Time,
}

impl Stepping {
    /// Parses a stepping policy name; unrecognized names fall back to decimal.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "integer" => Self::Integer,
            "binary" => Self::Binary,
            "time" => Self::Time,
            _ => Self::Decimal,
        }
    }
}

impl From<String> for Stepping {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Display semantics of a graph's unit, resolved by the caller and injected
/// into the engine.
#[derive(Debug, Clone)]
pub struct UnitInfo {
    pub title: String,
    pub symbol: String,
    pub render: UnitRenderFn,
    pub graph_unit: Option<GraphUnitFn>,
    pub stepping: Stepping,
}

impl UnitInfo {
    #[must_use]
    pub fn new(title: impl Into<String>, symbol: impl Into<String>, render: UnitRenderFn) -> Self {
        Self {
            title: title.into(),
            symbol: symbol.into(),
            render,
            graph_unit: None,
            stepping: Stepping::Decimal,
        }
    }

    #[must_use]
    pub fn with_stepping(mut self, stepping: Stepping) -> Self {
        self.stepping = stepping;
        self
    }

    #[must_use]
    pub fn with_graph_unit(mut self, graph_unit: GraphUnitFn) -> Self {
        self.graph_unit = Some(graph_unit);
        self
    }

    /// Renders `value` with the unit's formatter.
    #[must_use]
    pub fn render(&self, value: f64) -> String {
        (self.render)(value)
    }

    /// Plain floating point number.
    #[must_use]
    pub fn number() -> Self {
        Self::new("", "", |value| scientific(value, 2))
    }

    #[must_use]
    pub fn count() -> Self {
        Self::new("Count", "", |value| {
            fmt_number_with_precision(value, 2, true, UnitPrefixes::Si, "")
        })
        .with_stepping(Stepping::Integer)
    }

    /// Percentage in the range `0..=100`.
    #[must_use]
    pub fn percentage() -> Self {
        Self::new("%", "%", percent)
    }

    /// Timespan in seconds.
    #[must_use]
    pub fn seconds() -> Self {
        Self::new("sec", "s", approx_age).with_stepping(Stepping::Time)
    }

    #[must_use]
    pub fn per_second() -> Self {
        Self::new("per second", "/s", |value| format!("{}/s", scientific(value, 2)))
    }

    #[must_use]
    pub fn hertz() -> Self {
        Self::new("Hz", "Hz", |value| physical_precision(value, 3, "Hz"))
    }

    #[must_use]
    pub fn bytes() -> Self {
        Self::new("Bytes", "B", fmt_bytes).with_stepping(Stepping::Binary)
    }

    #[must_use]
    pub fn bytes_per_second() -> Self {
        Self::new("Bytes per second", "B/s", |value| format!("{}/s", fmt_bytes(value)))
            .with_stepping(Stepping::Binary)
    }

    #[must_use]
    pub fn bits_per_second() -> Self {
        Self::new("Bits per second", "bits/s", |value| {
            physical_precision(value, 3, "bit/s")
        })
        .with_graph_unit(bits_per_second_graph_unit)
    }

    /// Stored as bytes per second, displayed per day.
    #[must_use]
    pub fn bytes_per_day() -> Self {
        Self::new("Bytes per day", "B/d", |value| {
            format!("{}/d", fmt_bytes(value * 86_400.0))
        })
        .with_graph_unit(bytes_per_day_graph_unit)
        .with_stepping(Stepping::Binary)
    }
}

fn bits_per_second_graph_unit(values: &[f64]) -> (String, Vec<String>) {
    physical_precision_list(values, 3, "bit/s")
}

fn bytes_per_day_graph_unit(values: &[f64]) -> (String, Vec<String>) {
    let per_day: Vec<f64> = values.iter().map(|value| value * 86_400.0).collect();
    bytes_human_readable_list(&per_day, 2, "B/d")
}

/// Ordered unit lookup table for callers that resolve a recipe's unit id.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: IndexMap<String, UnitInfo>,
}

impl UnitCatalog {
    /// Catalog with the built-in monitoring units.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        catalog.insert("", UnitInfo::number());
        catalog.insert("count", UnitInfo::count());
        catalog.insert("%", UnitInfo::percentage());
        catalog.insert("s", UnitInfo::seconds());
        catalog.insert("1/s", UnitInfo::per_second());
        catalog.insert("hz", UnitInfo::hertz());
        catalog.insert("bytes", UnitInfo::bytes());
        catalog.insert("bytes/s", UnitInfo::bytes_per_second());
        catalog.insert("bits/s", UnitInfo::bits_per_second());
        catalog.insert("bytes/d", UnitInfo::bytes_per_day());
        catalog
    }

    /// Registers or replaces a unit.
    pub fn insert(&mut self, id: impl Into<String>, unit: UnitInfo) {
        self.units.insert(id.into(), unit);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&UnitInfo> {
        self.units.get(id)
    }

    /// Looks up `id`, falling back to the plain number unit.
    #[must_use]
    pub fn resolve(&self, id: &str) -> UnitInfo {
        self.get(id)
            .or_else(|| self.get(""))
            .cloned()
            .unwrap_or_else(UnitInfo::number)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
