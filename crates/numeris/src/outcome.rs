//! Result records returned by every method.

use numeris_core::Rounding;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{Error, ErrorKind};

/// The result of running one method.
///
/// `is_successful` and `have_solution` are independent: a method can run to
/// its iteration limit (`is_successful`) without producing a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Registry name of the method that produced this outcome.
    pub method: &'static str,
    /// Human-readable summary.
    pub message: String,
    pub trace: Trace,
    /// The method ran to a valid termination.
    pub is_successful: bool,
    /// A root, solution vector, or interpolant was produced.
    pub have_solution: bool,
    pub value: Value,
    /// Why the method was rejected or aborted.
    pub failure: Option<ErrorKind>,
    /// Input for an external plotting collaborator.
    pub plot: Option<PlotRequest>,
}

impl Outcome {
    /// The input was rejected before any computation.
    #[must_use]
    pub fn rejected(method: &'static str, err: &Error) -> Self {
        Self {
            method,
            message: format!("could not run: {err}"),
            trace: Trace::default(),
            is_successful: false,
            have_solution: false,
            value: Value::None,
            failure: Some(err.kind()),
            plot: None,
        }
    }

    /// The method started but hit a terminal failure.
    ///
    /// Iterations recorded before the failure are kept.
    #[must_use]
    pub fn aborted(method: &'static str, err: &Error, trace: Trace) -> Self {
        Self {
            method,
            message: format!("stopped after {} iteration(s): {err}", trace.len()),
            trace,
            is_successful: false,
            have_solution: false,
            value: Value::None,
            failure: Some(err.kind()),
            plot: None,
        }
    }

    /// The method produced a solution.
    #[must_use]
    pub fn solved(method: &'static str, message: String, trace: Trace, value: Value) -> Self {
        Self {
            method,
            message,
            trace,
            is_successful: true,
            have_solution: true,
            value,
            failure: None,
            plot: None,
        }
    }

    /// The method ran to completion without a solution.
    #[must_use]
    pub fn exhausted(method: &'static str, message: String, trace: Trace, value: Value) -> Self {
        Self {
            method,
            message,
            trace,
            is_successful: true,
            have_solution: false,
            value,
            failure: None,
            plot: None,
        }
    }

    /// Attaches a plot request.
    #[must_use]
    pub fn with_plot(mut self, plot: PlotRequest) -> Self {
        self.plot = Some(plot);
        self
    }
}

/// The value produced by a method, tagged by family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Value {
    None,
    Root {
        root: f64,
    },
    Vector {
        solution: Vec<f64>,
        /// Spectral radius of the iteration matrix, if it could be computed.
        spectral_radius: Option<f64>,
    },
    Polynomial {
        /// Re-parsable expression in `x`.
        expression: String,
        /// Coefficients by ascending power.
        coefficients: Vec<f64>,
    },
    Piecewise {
        pieces: Vec<PieceValue>,
    },
}

/// One spline piece and the interval where it applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceValue {
    pub interval: [f64; 2],
    pub expression: String,
}

/// Ordered iteration records of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace(Vec<IterationRecord>);

impl Trace {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[IterationRecord] {
        &self.0
    }

    #[must_use]
    pub fn last(&self) -> Option<&IterationRecord> {
        self.0.last()
    }

    pub(crate) fn push(&mut self, record: IterationRecord) {
        self.0.push(record);
    }
}

/// One row of a [`Trace`].
///
/// Recorded values are rounded for display; the solver itself always works
/// in full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationRecord {
    /// 1-based iteration index.
    pub iteration: usize,
    pub approximation: Approximation,
    /// Method-specific columns, in display order.
    #[serde(serialize_with = "ordered_map")]
    pub columns: Vec<(&'static str, f64)>,
    /// Error against the previous approximation; infinite on the first row.
    pub error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Approximation {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl IterationRecord {
    pub(crate) fn scalar(
        iteration: usize,
        x: f64,
        columns: &[(&'static str, f64)],
        error: f64,
        rounding: Rounding,
    ) -> Self {
        Self {
            iteration,
            approximation: Approximation::Scalar(rounding.apply(x)),
            columns: columns
                .iter()
                .map(|&(name, value)| (name, rounding.apply(value)))
                .collect(),
            error: rounding.apply(error),
        }
    }

    pub(crate) fn vector(iteration: usize, x: &[f64], error: f64, rounding: Rounding) -> Self {
        Self {
            iteration,
            approximation: Approximation::Vector(rounding.apply_all(x)),
            columns: Vec::new(),
            error: rounding.apply(error),
        }
    }

    /// Returns the value of a named column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find_map(|&(key, value)| (key == name).then_some(value))
    }
}

fn ordered_map<S: Serializer>(
    columns: &[(&'static str, f64)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(columns.len()))?;
    for (name, value) in columns {
        map.serialize_entry(name, value)?;
    }
    map.end()
}

/// What an external plotter needs to draw a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRequest {
    /// Expressions in `x`, one curve each.
    pub curves: Vec<String>,
    /// Whether the run produced a solution.
    pub success: bool,
    pub points: Vec<LabeledPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl LabeledPoint {
    pub(crate) fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }
}
