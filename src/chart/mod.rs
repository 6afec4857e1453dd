//! Comparison chart: turns series sets into a two-panel [`Figure`].
//!
//! ```text
//!   SeriesSet (values) ──┐
//!   SeriesSet (errors?) ─┼──► validate ──► Panel A (values) ─┐
//!   MarkerSet ───────────┘                 Panel B (errors) ─┴──► Figure
//! ```
//!
//! Validation runs to completion before any panel is built.

pub mod figure;

use std::collections::BTreeMap;

use crate::color::{MethodColors, Rgb};
use crate::data::model::{MarkerSet, SeriesSet};
use crate::error::{CompareError, Result};
use figure::{AxisRange, Curve, CurveKind, CurveStyle, Dash, Figure, FontSizes, Layer, Markers, Panel};

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Every fixed string, size and colour of the chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub size: (u32, u32),
    pub fonts: FontSizes,
    pub title: String,
    pub value_label: String,
    pub error_label: String,
    pub x_label: String,
    pub truth_label: String,
    pub truth_color: Rgb,
    pub truth_dash: Dash,
    pub method_colors: BTreeMap<String, Rgb>,
    pub method_dashes: BTreeMap<String, Dash>,
    pub line_width: f32,
    pub error_curve: CurveKind,
    pub marker_label: String,
    pub marker_color: Rgb,
    pub marker_radius: f32,
    /// Relative margin added above and below the data on the y axis.
    pub y_padding: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle {
            size: (1000, 700),
            fonts: FontSizes {
                title: 20.0,
                label: 15.0,
                legend: 15.0,
                tick: 13.0,
            },
            title: "Approximate curve".to_string(),
            value_label: "sinc(x)".to_string(),
            error_label: "error".to_string(),
            x_label: "x [rad]".to_string(),
            truth_label: "true".to_string(),
            truth_color: Rgb::new(0x1f, 0x77, 0xb4),
            truth_dash: Dash::DashDot,
            method_colors: BTreeMap::new(),
            method_dashes: BTreeMap::new(),
            line_width: 1.5,
            error_curve: CurveKind::Step,
            marker_label: "deviation point".to_string(),
            marker_color: Rgb::new(0xd6, 0x27, 0x28),
            marker_radius: 5.0,
            y_padding: 0.05,
        }
    }
}

/// What the renderer consumes. `errors` replaces the error series of
/// `values` in the bottom panel when present.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonInput<'a> {
    pub values: &'a SeriesSet,
    pub errors: Option<&'a SeriesSet>,
    pub markers: &'a MarkerSet,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check_len(what: String, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CompareError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}

/// Length and ordering checks for one set.
pub fn validate(set: &SeriesSet) -> Result<()> {
    if set.is_empty() {
        return Err(CompareError::EmptySeries);
    }
    let n = set.len();
    check_len("length of true series".into(), n, set.truth.len())?;
    for m in &set.methods {
        check_len(format!("length of '{}' values", m.name), n, m.values.len())?;
        check_len(format!("length of '{}' errors", m.name), n, m.errors.len())?;
    }

    // Strictly ascending or strictly descending, decided by the first step.
    if n > 1 {
        let ascending = set.x[1] > set.x[0];
        for i in 1..n {
            let ok = if ascending {
                set.x[i] > set.x[i - 1]
            } else {
                set.x[i] < set.x[i - 1]
            };
            if !ok {
                return Err(CompareError::UnorderedAxis { index: i });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Build the two-panel comparison figure.
pub fn compose(input: &ComparisonInput<'_>, style: &ChartStyle) -> Result<Figure> {
    let values = input.values;
    validate(values)?;
    if let Some(errors) = input.errors {
        validate(errors)?;
        check_len(
            "number of methods in error series".into(),
            values.methods.len(),
            errors.methods.len(),
        )?;
        check_len("samples in error series".into(), values.len(), errors.len())?;
        let shared = values.x.iter().zip(&errors.x).filter(|(a, b)| a == b).count();
        check_len("x samples shared with error series".into(), values.len(), shared)?;
    }
    let errors = input.errors.unwrap_or(values);

    let colors = MethodColors::new(
        values.method_names().chain(errors.method_names()),
        &style.method_colors,
    );
    let method_style = |name: &str| CurveStyle {
        color: colors.color_for(name),
        dash: style.method_dashes.get(name).copied().unwrap_or(Dash::Solid),
        width: style.line_width,
    };

    let x_range = AxisRange::new(values.x[0], values.x[values.x.len() - 1]);

    // ---- Panel A: values ----
    let mut top = Panel::new(&style.value_label, x_range);
    top.title = Some(style.title.clone());
    top.layers.push(Layer::Curve(Curve::new(
        &style.truth_label,
        CurveKind::Step,
        &values.x,
        &values.truth,
        CurveStyle {
            color: style.truth_color,
            dash: style.truth_dash,
            width: style.line_width,
        },
    )));
    for m in &values.methods {
        top.layers.push(Layer::Curve(Curve::new(
            &m.name,
            CurveKind::Step,
            &values.x,
            &m.values,
            method_style(&m.name),
        )));
    }
    top.fit_y(style.y_padding);

    // ---- Panel B: errors ----
    let mut bottom = Panel::new(&style.error_label, x_range);
    bottom.x_label = Some(style.x_label.clone());
    for m in &errors.methods {
        bottom.layers.push(Layer::Curve(Curve::new(
            &m.name,
            style.error_curve,
            &errors.x,
            &m.errors,
            method_style(&m.name),
        )));
    }
    if !input.markers.is_empty() {
        bottom.layers.push(Layer::Markers(Markers {
            name: style.marker_label.clone(),
            points: input.markers.points.clone(),
            color: style.marker_color,
            radius: style.marker_radius,
        }));
    }
    bottom.fit_y(style.y_padding);

    log::debug!(
        "Composed figure: {} samples, {} methods, {} markers, x in [{}, {}]",
        values.len(),
        values.methods.len(),
        input.markers.len(),
        x_range.start,
        x_range.end
    );

    Ok(Figure {
        size: style.size,
        fonts: style.fonts,
        panels: vec![top, bottom],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::RowReader;
    use crate::data::model::{ColumnRoles, MethodSeries};

    const EXAMPLE: &str = "0,0,0,0.1,0,0.1\n0.5,0.48,0.47,0.49,0.01,0.01\n";

    fn example() -> SeriesSet {
        let roles = ColumnRoles::standard(&["maclaurin", "chebyshev"]);
        SeriesSet::build(RowReader::from_reader("result.csv", EXAMPLE.as_bytes()), &roles).unwrap()
    }

    fn method(name: &str, values: Vec<f64>, errors: Vec<f64>) -> MethodSeries {
        MethodSeries {
            name: name.to_string(),
            values,
            errors,
        }
    }

    fn input<'a>(values: &'a SeriesSet, markers: &'a MarkerSet) -> ComparisonInput<'a> {
        ComparisonInput {
            values,
            errors: None,
            markers,
        }
    }

    #[test]
    fn example_scenario() {
        let set = example();
        let markers = MarkerSet::default();
        let fig = compose(&input(&set, &markers), &ChartStyle::default()).unwrap();

        assert_eq!(fig.panels.len(), 2);
        let (top, bottom) = (&fig.panels[0], &fig.panels[1]);

        assert_eq!(top.legend(), vec!["true", "maclaurin", "chebyshev"]);
        assert_eq!(top.x_range, AxisRange::new(0.0, 0.5));
        assert_eq!(top.title.as_deref(), Some("Approximate curve"));

        assert_eq!(bottom.legend(), vec!["maclaurin", "chebyshev"]);
        assert!(bottom.markers().is_none());
        assert_eq!(bottom.x_range, top.x_range);
        assert_eq!(bottom.x_label.as_deref(), Some("x [rad]"));
    }

    #[test]
    fn truth_is_dash_dot_and_methods_share_styles_across_panels() {
        let set = example();
        let markers = MarkerSet::default();
        let fig = compose(&input(&set, &markers), &ChartStyle::default()).unwrap();

        let top: Vec<&Curve> = fig.panels[0].curves().collect();
        let bottom: Vec<&Curve> = fig.panels[1].curves().collect();
        assert_eq!(top[0].style.dash, Dash::DashDot);
        assert_eq!(top[1].style, bottom[0].style);
        assert_eq!(top[2].style, bottom[1].style);
        assert_ne!(top[1].style.color, top[2].style.color);
    }

    #[test]
    fn composing_twice_is_identical() {
        let set = example();
        let markers = MarkerSet {
            points: vec![[0.25, 0.005]],
        };
        let style = ChartStyle::default();
        let a = compose(&input(&set, &markers), &style).unwrap();
        let b = compose(&input(&set, &markers), &style).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn method_styles_do_not_depend_on_column_order() {
        let a = example();
        let mut b = a.clone();
        b.methods.reverse();
        let markers = MarkerSet::default();
        let style = ChartStyle::default();
        let fa = compose(&input(&a, &markers), &style).unwrap();
        let fb = compose(&input(&b, &markers), &style).unwrap();

        let style_of = |fig: &Figure, name: &str| {
            fig.panels[0]
                .curves()
                .find(|c| c.name == name)
                .map(|c| c.style)
                .unwrap()
        };
        for name in ["maclaurin", "chebyshev"] {
            assert_eq!(style_of(&fa, name), style_of(&fb, name));
        }
    }

    #[test]
    fn configured_colors_and_dashes_are_used() {
        let set = example();
        let markers = MarkerSet::default();
        let mut style = ChartStyle::default();
        style
            .method_colors
            .insert("chebyshev".into(), Rgb::new(255, 165, 0));
        style.method_dashes.insert("maclaurin".into(), Dash::Dashed);
        let fig = compose(&input(&set, &markers), &style).unwrap();
        let top: Vec<&Curve> = fig.panels[0].curves().collect();
        assert_eq!(top[1].style.dash, Dash::Dashed);
        assert_eq!(top[2].style.color, Rgb::new(255, 165, 0));
    }

    #[test]
    fn markers_sit_on_top_of_the_error_panel() {
        let set = example();
        let markers = MarkerSet {
            points: vec![[0.1, 0.02], [0.4, -0.02]],
        };
        let fig = compose(&input(&set, &markers), &ChartStyle::default()).unwrap();
        let bottom = &fig.panels[1];
        let order = bottom.layers_by_priority();
        assert!(matches!(order.last(), Some(Layer::Markers(m)) if m.points.len() == 2));
        assert!(fig.panels[0].markers().is_none());
        // markers extend the y range
        assert!(bottom.y_range.low() < -0.02);
    }

    #[test]
    fn x_domain_is_first_and_last_sample() {
        let set = SeriesSet {
            x: vec![-1.0, -0.2, 0.7, 1.0],
            truth: vec![0.0, 5.0, -5.0, 0.0],
            methods: vec![method("m", vec![0.0; 4], vec![0.0; 4])],
        };
        let markers = MarkerSet {
            points: vec![[3.0, 0.0]],
        };
        let fig = compose(&input(&set, &markers), &ChartStyle::default()).unwrap();
        for panel in &fig.panels {
            assert_eq!(panel.x_range, AxisRange::new(-1.0, 1.0));
        }
    }

    #[test]
    fn single_sample_gives_degenerate_domain() {
        let set = SeriesSet {
            x: vec![0.3],
            truth: vec![1.0],
            methods: vec![method("m", vec![1.0], vec![0.0])],
        };
        let markers = MarkerSet::default();
        let fig = compose(&input(&set, &markers), &ChartStyle::default()).unwrap();
        assert_eq!(fig.panels[0].x_range, AxisRange::new(0.3, 0.3));
        assert!(fig.panels[1].x_range.is_degenerate());
    }

    #[test]
    fn descending_axis_is_accepted() {
        let set = SeriesSet {
            x: vec![1.0, 0.0, -1.0],
            truth: vec![0.0; 3],
            methods: vec![method("m", vec![0.0; 3], vec![0.0; 3])],
        };
        let markers = MarkerSet::default();
        let fig = compose(&input(&set, &markers), &ChartStyle::default()).unwrap();
        assert_eq!(fig.panels[0].x_range, AxisRange::new(1.0, -1.0));
    }

    #[test]
    fn unordered_axis_is_rejected() {
        let set = SeriesSet {
            x: vec![0.0, 1.0, 1.0],
            truth: vec![0.0; 3],
            methods: vec![],
        };
        assert!(matches!(
            validate(&set),
            Err(CompareError::UnorderedAxis { index: 2 })
        ));
    }

    #[test]
    fn empty_series_is_rejected() {
        let set = SeriesSet {
            x: vec![],
            truth: vec![],
            methods: vec![],
        };
        let markers = MarkerSet::default();
        assert!(matches!(
            compose(&input(&set, &markers), &ChartStyle::default()),
            Err(CompareError::EmptySeries)
        ));
    }

    #[test]
    fn value_error_length_mismatch_fails_before_drawing() {
        let set = SeriesSet {
            x: vec![0.0, 1.0],
            truth: vec![0.0, 1.0],
            methods: vec![method("m", vec![0.0, 1.0], vec![0.0])],
        };
        let markers = MarkerSet::default();
        match compose(&input(&set, &markers), &ChartStyle::default()) {
            Err(CompareError::DimensionMismatch {
                expected, actual, ..
            }) => assert_eq!((expected, actual), (2, 1)),
            other => panic!("expected dimension mismatch, got {other:?}"),
        }
    }

    #[test]
    fn separate_error_set_must_have_same_method_count() {
        let values = example();
        let mut errors = values.clone();
        errors.methods.pop();
        let markers = MarkerSet::default();
        let input = ComparisonInput {
            values: &values,
            errors: Some(&errors),
            markers: &markers,
        };
        assert!(matches!(
            compose(&input, &ChartStyle::default()),
            Err(CompareError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn separate_error_set_must_have_same_sample_count() {
        let values = example();
        let errors = SeriesSet {
            x: vec![-3.0, 0.0, 0.5, 7.0],
            truth: vec![0.0; 4],
            methods: vec![
                method("maclaurin", vec![0.0; 4], vec![0.0; 4]),
                method("chebyshev", vec![0.0; 4], vec![0.0; 4]),
            ],
        };
        let markers = MarkerSet::default();
        let input = ComparisonInput {
            values: &values,
            errors: Some(&errors),
            markers: &markers,
        };
        assert!(matches!(
            compose(&input, &ChartStyle::default()),
            Err(CompareError::DimensionMismatch { expected: 2, actual: 4, .. })
        ));
    }

    #[test]
    fn separate_error_set_must_share_the_x_samples() {
        let values = example();
        let mut errors = values.clone();
        errors.x = vec![0.0, 0.75];
        let markers = MarkerSet::default();
        let input = ComparisonInput {
            values: &values,
            errors: Some(&errors),
            markers: &markers,
        };
        match compose(&input, &ChartStyle::default()) {
            Err(CompareError::DimensionMismatch {
                what,
                expected,
                actual,
            }) => {
                assert!(what.contains("x samples"), "{what}");
                assert_eq!((expected, actual), (2, 1));
            }
            other => panic!("expected dimension mismatch, got {other:?}"),
        }
    }

    #[test]
    fn separate_error_set_feeds_the_bottom_panel() {
        let values = example();
        let mut errors = values.clone();
        for m in &mut errors.methods {
            m.errors = vec![1.0, 2.0];
        }
        let markers = MarkerSet::default();
        let mut style = ChartStyle::default();
        style.error_curve = CurveKind::Line;
        let input = ComparisonInput {
            values: &values,
            errors: Some(&errors),
            markers: &markers,
        };
        let fig = compose(&input, &style).unwrap();
        let first = fig.panels[1].curves().next().unwrap();
        assert_eq!(first.kind, CurveKind::Line);
        assert_eq!(first.points, vec![[0.0, 1.0], [0.5, 2.0]]);
    }
}
