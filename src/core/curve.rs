use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::scalars::CurveScalars;
use crate::core::types::TimeSeries;
use crate::error::{ArtworkError, ArtworkResult};

/// How a curve is drawn, independent of the mirroring flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineShape {
    /// Plain line, never stacked.
    Line,
    /// Filled band. `stacked` continues the running stack of its side,
    /// otherwise the band starts at zero.
    Area { stacked: bool },
    /// Invisible baseline (forecast reference) later stacks build upon.
    Reference,
}

/// Parsed rendering intent of a curve (`line`, `-area`, `stack`, `ref`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineType {
    pub shape: LineShape,
    /// Values are drawn on the negative side of the vertical axis.
    pub mirrored: bool,
}

impl LineType {
    pub const LINE: Self = Self::new(LineShape::Line, false);
    pub const AREA: Self = Self::new(LineShape::Area { stacked: false }, false);
    pub const STACK: Self = Self::new(LineShape::Area { stacked: true }, false);
    pub const REFERENCE: Self = Self::new(LineShape::Reference, false);

    #[must_use]
    pub const fn new(shape: LineShape, mirrored: bool) -> Self {
        Self { shape, mirrored }
    }

    #[must_use]
    pub const fn mirror(self) -> Self {
        Self {
            shape: self.shape,
            mirrored: true,
        }
    }
}

impl FromStr for LineType {
    type Err = ArtworkError;

    fn from_str(input: &str) -> ArtworkResult<Self> {
        if input == "ref" {
            return Ok(Self::REFERENCE);
        }

        let (mirrored, name) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let shape = match name {
            "line" => LineShape::Line,
            "area" => LineShape::Area { stacked: false },
            "stack" => LineShape::Area { stacked: true },
            _ => return Err(ArtworkError::InvalidLineType(input.to_owned())),
        };
        Ok(Self { shape, mirrored })
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.shape {
            LineShape::Line => "line",
            LineShape::Area { stacked: false } => "area",
            LineShape::Area { stacked: true } => "stack",
            LineShape::Reference => return f.write_str("ref"),
        };
        if self.mirrored {
            f.write_str("-")?;
        }
        f.write_str(name)
    }
}

impl TryFrom<String> for LineType {
    type Error = ArtworkError;

    fn try_from(value: String) -> ArtworkResult<Self> {
        value.parse()
    }
}

impl From<LineType> for String {
    fn from(value: LineType) -> Self {
        value.to_string()
    }
}

/// One metric's time series together with its rendering intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub series: TimeSeries,
    pub line_type: LineType,
    pub color: String,
    pub title: String,
    /// Excluded from painting, scalars and hover values.
    #[serde(default)]
    pub dont_paint: bool,
    /// Filled in by scalar computation; defaults to all `n/a`.
    #[serde(default)]
    pub scalars: CurveScalars,
}

impl Curve {
    #[must_use]
    pub fn new(
        series: TimeSeries,
        line_type: LineType,
        color: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            series,
            line_type,
            color: color.into(),
            title: title.into(),
            dont_paint: false,
            scalars: CurveScalars::default(),
        }
    }

    #[must_use]
    pub fn with_dont_paint(mut self, dont_paint: bool) -> Self {
        self.dont_paint = dont_paint;
        self
    }
}

/// Drawing primitive a layouted curve maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    Line,
    Area,
}

/// A point after half-step interpolation, stacking and mirroring.
///
/// Serializes as a bare number (or `null`) for lines and as a
/// `[lower, upper]` pair for areas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisualPoint {
    Line(Option<f64>),
    Area(Option<f64>, Option<f64>),
}

impl VisualPoint {
    /// Lowest and highest present value carried by the point.
    #[must_use]
    pub fn bounds(self) -> (Option<f64>, Option<f64>) {
        match self {
            Self::Line(value) => (value, value),
            Self::Area(lower, upper) => (lower, upper),
        }
    }
}

/// A curve ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutedCurve {
    pub kind: CurveKind,
    pub points: Vec<VisualPoint>,
    pub color: String,
    pub title: String,
    pub scalars: CurveScalars,
}

impl LayoutedCurve {
    pub(crate) fn line(curve: &Curve, values: Vec<Option<f64>>) -> Self {
        Self {
            kind: CurveKind::Line,
            points: values.into_iter().map(VisualPoint::Line).collect(),
            color: curve.color.clone(),
            title: curve.title.clone(),
            scalars: curve.scalars.clone(),
        }
    }

    pub(crate) fn area(curve: &Curve, bands: Vec<(Option<f64>, Option<f64>)>) -> Self {
        Self {
            kind: CurveKind::Area,
            points: bands
                .into_iter()
                .map(|(lower, upper)| VisualPoint::Area(lower, upper))
                .collect(),
            color: curve.color.clone(),
            title: curve.title.clone(),
            scalars: curve.scalars.clone(),
        }
    }
}
