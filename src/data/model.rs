use std::io;
use std::path::Path;

use super::loader::{Row, RowReader};
use crate::error::{CompareError, Result};

// ---------------------------------------------------------------------------
// Column roles – which CSV column feeds which named series
// ---------------------------------------------------------------------------

/// Column indices of one approximation method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodColumns {
    pub name: String,
    pub value: usize,
    pub error: usize,
}

/// Role mapping for a results file.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRoles {
    pub x: usize,
    pub truth: usize,
    pub methods: Vec<MethodColumns>,
}

impl ColumnRoles {
    /// The conventional layout `[x, y_true, y_1..y_n, e_1..e_n]`.
    pub fn standard<S: AsRef<str>>(names: &[S]) -> Self {
        let n = names.len();
        let methods = names
            .iter()
            .enumerate()
            .map(|(i, name)| MethodColumns {
                name: name.as_ref().to_string(),
                value: 2 + i,
                error: 2 + n + i,
            })
            .collect();
        ColumnRoles {
            x: 0,
            truth: 1,
            methods,
        }
    }

    /// `(role, column)` pairs, used for range checks.
    fn columns(&self) -> Vec<(String, usize)> {
        let mut cols = vec![("x".to_string(), self.x), ("truth".to_string(), self.truth)];
        for m in &self.methods {
            cols.push((format!("{} value", m.name), m.value));
            cols.push((format!("{} error", m.name), m.error));
        }
        cols
    }
}

/// Role mapping for a marker file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerRoles {
    pub x: usize,
    pub y: usize,
}

impl Default for MarkerRoles {
    fn default() -> Self {
        MarkerRoles { x: 0, y: 1 }
    }
}

// ---------------------------------------------------------------------------
// SeriesSet – aligned vectors sharing one x axis
// ---------------------------------------------------------------------------

/// Reconstructed values and errors of one method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub errors: Vec<f64>,
}

/// All sampled series of a results file; index `i` of every vector is sample `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    pub x: Vec<f64>,
    pub truth: Vec<f64>,
    pub methods: Vec<MethodSeries>,
}

impl SeriesSet {
    /// Collect `rows` into named vectors according to `roles`, keeping row order.
    ///
    /// The first row fixes the expected width. Any later row of a different
    /// width is a [`CompareError::Schema`]; a role pointing past the width is a
    /// [`CompareError::ColumnIndex`].
    pub fn build<I>(rows: I, roles: &ColumnRoles) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        let mut set = SeriesSet {
            x: Vec::new(),
            truth: Vec::new(),
            methods: roles
                .methods
                .iter()
                .map(|m| MethodSeries {
                    name: m.name.clone(),
                    values: Vec::new(),
                    errors: Vec::new(),
                })
                .collect(),
        };

        let columns = roles.columns();
        let mut width = None;
        for row in rows {
            let row = row?;
            check_width(&row, &mut width, &columns)?;

            let v = &row.values;
            set.x.push(v[roles.x]);
            set.truth.push(v[roles.truth]);
            for (series, cols) in set.methods.iter_mut().zip(&roles.methods) {
                series.values.push(v[cols.value]);
                series.errors.push(v[cols.error]);
            }
        }
        Ok(set)
    }

    /// Load and build in one step.
    pub fn load(path: &Path, roles: &ColumnRoles) -> Result<Self> {
        Self::build(RowReader::open(path)?, roles)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.name.as_str())
    }
}

/// Shared width bookkeeping for both builders.
fn check_width(row: &Row, width: &mut Option<usize>, columns: &[(String, usize)]) -> Result<()> {
    match *width {
        Some(expected) if expected != row.len() => {
            return Err(CompareError::Schema {
                line: row.line,
                expected,
                actual: row.len(),
            })
        }
        Some(_) => {}
        None => {
            for (role, index) in columns {
                if *index >= row.len() {
                    return Err(CompareError::ColumnIndex {
                        role: role.clone(),
                        index: *index,
                        width: row.len(),
                    });
                }
            }
            *width = Some(row.len());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// MarkerSet – sparse (x, y) overlay
// ---------------------------------------------------------------------------

/// Notable points drawn over the error panel. Not aligned with any series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    pub points: Vec<[f64; 2]>,
}

impl MarkerSet {
    pub fn build<I>(rows: I, roles: &MarkerRoles) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        let columns = [("marker x".to_string(), roles.x), ("marker y".to_string(), roles.y)];
        let mut width = None;
        let mut points = Vec::new();
        for row in rows {
            let row = row?;
            check_width(&row, &mut width, &columns)?;
            points.push([row.values[roles.x], row.values[roles.y]]);
        }
        Ok(MarkerSet { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Load the optional marker file. A file that does not exist is an empty set.
pub fn load_markers(path: &Path, roles: &MarkerRoles) -> Result<MarkerSet> {
    match RowReader::open(path) {
        Ok(reader) => MarkerSet::build(reader, roles),
        Err(CompareError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::info!("No marker file at {}, skipping overlay", path.display());
            Ok(MarkerSet::default())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reader(text: &str) -> RowReader<&[u8]> {
        RowReader::from_reader("test.csv", text.as_bytes())
    }

    const EXAMPLE: &str = "0,0,0,0.1,0,0.1\n0.5,0.48,0.47,0.49,0.01,0.01\n";

    #[test]
    fn standard_layout_places_values_before_errors() {
        let roles = ColumnRoles::standard(&["a", "b", "c"]);
        assert_eq!(roles.x, 0);
        assert_eq!(roles.truth, 1);
        let cols: Vec<(usize, usize)> = roles.methods.iter().map(|m| (m.value, m.error)).collect();
        assert_eq!(cols, vec![(2, 5), (3, 6), (4, 7)]);
    }

    #[test]
    fn builds_two_method_example() {
        let roles = ColumnRoles::standard(&["maclaurin", "chebyshev"]);
        let set = SeriesSet::build(reader(EXAMPLE), &roles).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.x, vec![0.0, 0.5]);
        assert_eq!(set.truth, vec![0.0, 0.48]);
        assert_eq!(set.methods.len(), 2);
        assert_eq!(set.methods[0].values, vec![0.0, 0.47]);
        assert_eq!(set.methods[1].values, vec![0.1, 0.49]);
        assert_eq!(set.methods[0].errors, vec![0.0, 0.01]);
        assert_eq!(set.methods[1].errors, vec![0.1, 0.01]);
        for m in &set.methods {
            assert_eq!(m.values.len(), set.len());
            assert_eq!(m.errors.len(), set.len());
        }
    }

    #[test]
    fn rebuilt_csv_round_trips_values() {
        let text = "-1,0.8414709848078965,0.841468253968254,0.8414710097,2.7e-6,-2.4e-8\n\
                    0,1,1,1,0,0\n\
                    1,0.8414709848078965,0.841468253968254,0.8414710097,2.7e-6,-2.4e-8\n";
        let roles = ColumnRoles::standard(&["m1", "m2"]);
        let set = SeriesSet::build(reader(text), &roles).unwrap();

        let rebuilt: String = (0..set.len())
            .map(|i| {
                format!(
                    "{},{},{},{},{},{}\n",
                    set.x[i],
                    set.truth[i],
                    set.methods[0].values[i],
                    set.methods[1].values[i],
                    set.methods[0].errors[i],
                    set.methods[1].errors[i]
                )
            })
            .collect();

        let original: Vec<Row> = reader(text).collect::<Result<_>>().unwrap();
        let again: Vec<Row> = reader(&rebuilt).collect::<Result<_>>().unwrap();
        assert_eq!(original.len(), again.len());
        for (a, b) in original.iter().zip(&again) {
            for (x, y) in a.values.iter().zip(&b.values) {
                assert_relative_eq!(*x, *y, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn three_method_layout_uses_same_builder() {
        let text = "0,1,1.1,1.2,1.3,0.1,0.2,0.3\n1,2,2.1,2.2,2.3,0.1,0.2,0.3\n";
        let roles = ColumnRoles::standard(&["a", "b", "c"]);
        let set = SeriesSet::build(reader(text), &roles).unwrap();
        assert_eq!(set.methods[2].values, vec![1.3, 2.3]);
        assert_eq!(set.methods[2].errors, vec![0.3, 0.3]);
    }

    #[test]
    fn inconsistent_row_width_is_a_schema_error() {
        let text = "0,1,2,3,4,5\n1,2,3,4,5\n";
        let roles = ColumnRoles::standard(&["a", "b"]);
        match SeriesSet::build(reader(text), &roles) {
            Err(CompareError::Schema {
                line,
                expected,
                actual,
            }) => {
                assert_eq!((line, expected, actual), (2, 6, 5));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn role_past_row_width_is_a_column_index_error() {
        let roles = ColumnRoles::standard(&["a", "b", "c"]);
        match SeriesSet::build(reader(EXAMPLE), &roles) {
            Err(CompareError::ColumnIndex { index, width, .. }) => {
                assert_eq!(width, 6);
                assert!(index >= 6);
            }
            other => panic!("expected column index error, got {other:?}"),
        }
    }

    #[test]
    fn parse_errors_propagate_from_the_loader() {
        let roles = ColumnRoles::standard(&["a", "b"]);
        let err = SeriesSet::build(reader("0,1,2,3,4,x\n"), &roles).unwrap_err();
        assert!(matches!(err, CompareError::Parse { field: 5, .. }));
    }

    #[test]
    fn markers_keep_file_order() {
        let set = MarkerSet::build(reader("0.5,1e-6\n-1,-2e-6\n0,3e-6\n"), &MarkerRoles::default())
            .unwrap();
        assert_eq!(set.points, vec![[0.5, 1e-6], [-1.0, -2e-6], [0.0, 3e-6]]);
    }

    #[test]
    fn missing_marker_file_is_empty() {
        let path = std::env::temp_dir().join("curve-compare-no-points.csv");
        let set = load_markers(&path, &MarkerRoles::default()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("curve-compare-{}.csv", std::process::id()));
        std::fs::write(&path, EXAMPLE).unwrap();
        let set = SeriesSet::load(&path, &ColumnRoles::standard(&["a", "b"])).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(set.len(), 2);
    }
}
