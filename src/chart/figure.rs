//! Declarative figure model handed to the sinks.
//!
//! Nothing in here draws. A [`Figure`] is plain data: sinks walk its panels
//! and layers in order and translate each element to their own primitives.

use serde::Deserialize;

use crate::color::Rgb;

/// Dash pattern of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

/// How a sampled series is joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Value `y[i]` is held over `(x[i-1], x[i]]`.
    Step,
    /// Straight segments between samples.
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    pub color: Rgb,
    pub dash: Dash,
    pub width: f32,
}

/// A named curve whose `points` are already drawable vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: String,
    pub kind: CurveKind,
    pub points: Vec<[f64; 2]>,
    pub style: CurveStyle,
}

impl Curve {
    pub fn new(name: &str, kind: CurveKind, x: &[f64], y: &[f64], style: CurveStyle) -> Self {
        let points = match kind {
            CurveKind::Step => step_points(x, y),
            CurveKind::Line => x.iter().zip(y).map(|(&x, &y)| [x, y]).collect(),
        };
        Curve {
            name: name.to_string(),
            kind,
            points,
            style,
        }
    }
}

/// Scatter overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Markers {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub color: Rgb,
    pub radius: f32,
}

/// One drawable element of a panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Curve(Curve),
    Markers(Markers),
}

impl Layer {
    /// Larger is drawn later (on top).
    pub fn z_order(&self) -> u8 {
        match self {
            Layer::Curve(_) => 1,
            Layer::Markers(_) => 2,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Layer::Curve(c) => &c.name,
            Layer::Markers(m) => &m.name,
        }
    }

    fn points(&self) -> &[[f64; 2]] {
        match self {
            Layer::Curve(c) => &c.points,
            Layer::Markers(m) => &m.points,
        }
    }
}

/// Closed axis interval, kept in the order it was given.
///
/// `start == end` is allowed (single sample).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}

impl AxisRange {
    pub fn new(start: f64, end: f64) -> Self {
        AxisRange { start, end }
    }

    pub fn low(&self) -> f64 {
        self.start.min(self.end)
    }

    pub fn high(&self) -> f64 {
        self.start.max(self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Ascending, drawable bounds; a degenerate range is opened up by `±pad`.
    ///
    /// Orientation is dropped: a descending range `[1, -1]` draws as `-1..1`,
    /// so sinks never show a reversed axis.
    pub fn drawable(&self, pad: f64) -> (f64, f64) {
        if self.is_degenerate() {
            (self.start - pad, self.start + pad)
        } else {
            (self.low(), self.high())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub title: f32,
    pub label: f32,
    pub legend: f32,
    pub tick: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: String,
    /// Always `[x[0], x[last]]` of the sampled axis.
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub layers: Vec<Layer>,
}

impl Panel {
    pub fn new(y_label: &str, x_range: AxisRange) -> Self {
        Panel {
            title: None,
            x_label: None,
            y_label: y_label.to_string(),
            x_range,
            y_range: AxisRange::new(0.0, 0.0),
            layers: Vec::new(),
        }
    }

    /// Layers in draw order: stable sort by z-order.
    pub fn layers_by_priority(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.iter().collect();
        layers.sort_by_key(|l| l.z_order());
        layers
    }

    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.layers.iter().filter_map(|l| match l {
            Layer::Curve(c) => Some(c),
            Layer::Markers(_) => None,
        })
    }

    pub fn markers(&self) -> Option<&Markers> {
        self.layers.iter().find_map(|l| match l {
            Layer::Markers(m) => Some(m),
            Layer::Curve(_) => None,
        })
    }

    /// Legend entries in draw order.
    pub fn legend(&self) -> Vec<&str> {
        self.layers_by_priority().into_iter().map(Layer::name).collect()
    }

    /// Fit `y_range` to every layer's points with `pad` of relative margin.
    pub fn fit_y(&mut self, pad: f64) {
        let (lo, hi) = self
            .layers
            .iter()
            .flat_map(|l| l.points().iter().map(|p| p[1]))
            .filter(|y| y.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        self.y_range = if lo > hi {
            AxisRange::new(-0.5, 0.5)
        } else if lo == hi {
            AxisRange::new(lo - 0.5, hi + 0.5)
        } else {
            let margin = (hi - lo) * pad;
            AxisRange::new(lo - margin, hi + margin)
        };
    }
}

/// The composed two-panel chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Pixels, width × height.
    pub size: (u32, u32),
    pub fonts: FontSizes,
    /// Stacked top to bottom: value comparison, then error comparison.
    pub panels: Vec<Panel>,
}

/// Expand samples into step-curve vertices (`y[i]` held over `(x[i-1], x[i]]`).
///
/// `n` samples give `2n - 1` vertices.
pub fn step_points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity((2 * x.len()).saturating_sub(1));
    for (i, (&xi, &yi)) in x.iter().zip(y).enumerate() {
        if i > 0 {
            out.push([x[i - 1], yi]);
        }
        out.push([xi, yi]);
    }
    out
}
