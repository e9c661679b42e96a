use serde::{Deserialize, Serialize};

use crate::core::{LineType, Seconds, Timestamp, VerticalRangeRequest};
use crate::error::{ArtworkError, ArtworkResult};

/// One metric of a graph as defined by the user or a graph template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetric {
    pub title: String,
    pub line_type: LineType,
    /// Metric expression handed to the resolver unchanged.
    pub expression: String,
    pub color: String,
}

/// Static marker line drawn across the graph (e.g. a threshold).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalRule {
    pub value: f64,
    pub rendered_value: String,
    pub color: String,
    pub title: String,
}

/// Full definition of a graph, kept in the artwork to reproduce it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphRecipe {
    #[serde(default)]
    pub title: Option<String>,
    /// Unit id; resolved by the caller, see [`crate::UnitCatalog`].
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub metrics: Vec<GraphMetric>,
    #[serde(default)]
    pub explicit_vertical_range: (Option<f64>, Option<f64>),
    #[serde(default)]
    pub horizontal_rules: Vec<HorizontalRule>,
    /// Drop curves without a single non-zero sample.
    #[serde(default)]
    pub omit_zero_metrics: bool,
}

impl GraphRecipe {
    #[must_use]
    pub fn new(title: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            unit: unit.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_metric(mut self, metric: GraphMetric) -> Self {
        self.metrics.push(metric);
        self
    }

    #[must_use]
    pub fn with_explicit_vertical_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.explicit_vertical_range = (min, max);
        self
    }

    #[must_use]
    pub fn with_horizontal_rule(mut self, rule: HorizontalRule) -> Self {
        self.horizontal_rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_omit_zero_metrics(mut self, omit: bool) -> Self {
        self.omit_zero_metrics = omit;
        self
    }
}

/// Requested time window, sampling step and optional vertical zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphDataRange {
    pub time_range: (Timestamp, Timestamp),
    pub step: Seconds,
    #[serde(default)]
    pub vertical_range: Option<(f64, f64)>,
}

impl GraphDataRange {
    pub fn new(start: Timestamp, end: Timestamp, step: Seconds) -> ArtworkResult<Self> {
        if end <= start || step <= 0 {
            return Err(ArtworkError::InvalidTimeWindow { start, end, step });
        }
        Ok(Self {
            time_range: (start, end),
            step,
            vertical_range: None,
        })
    }

    #[must_use]
    pub fn with_vertical_range(mut self, min: f64, max: f64) -> Self {
        self.vertical_range = Some((min, max));
        self
    }

    /// Vertical range constraints combining the recipe and this zoom.
    #[must_use]
    pub fn vertical_range_request(&self, recipe: &GraphRecipe) -> VerticalRangeRequest {
        VerticalRangeRequest {
            explicit: recipe.explicit_vertical_range,
            zoom: self.vertical_range,
        }
    }
}
