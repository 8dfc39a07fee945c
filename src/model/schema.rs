//! Fixed input schema for stroke-risk predictions
//!
//! Every field a client must submit is declared here once, together with the
//! constraint its value has to satisfy. The table is a `const` and is never
//! mutated after compilation.

use std::fmt;

/// One allowed value of a categorical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// A string label, e.g. `"Urban"`
    Text(&'static str),
    /// An integer code, e.g. `0` / `1` for medical history flags
    Code(i64),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Text(label) => write!(f, "'{}'", label),
            Category::Code(code) => write!(f, "{}", code),
        }
    }
}

/// Constraint a field value must satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Numeric value within `[low, high]`, inclusive on both ends
    NumericRange { low: f64, high: f64 },
    /// Value must be one of the listed categories
    Categorical(&'static [Category]),
}

impl Constraint {
    pub fn contains_number(&self, value: f64) -> bool {
        match self {
            Constraint::NumericRange { low, high } => *low <= value && value <= *high,
            Constraint::Categorical(_) => false,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::NumericRange { low, high } => write!(f, "[{}, {}]", low, high),
            Constraint::Categorical(allowed) => {
                write!(f, "[{}]", join_categories(allowed))
            }
        }
    }
}

/// Render a category list the way error messages show it: `'a', 'b'`
pub fn join_categories(allowed: &[Category]) -> String {
    allowed
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Declarative description of one expected input field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub constraint: Constraint,
}

const BINARY_CODES: &[Category] = &[Category::Code(0), Category::Code(1)];

/// Every field of a patient record, in declared order.
///
/// Column names must match the names the model artifact was fit against,
/// including the capitalised `Residence_type`.
pub const FIELD_SPECS: [FieldSpec; 10] = [
    FieldSpec {
        name: "gender",
        constraint: Constraint::Categorical(&[
            Category::Text("Male"),
            Category::Text("Female"),
            Category::Text("Other"),
        ]),
    },
    FieldSpec {
        name: "age",
        constraint: Constraint::NumericRange {
            low: 0.0,
            high: 120.0,
        },
    },
    FieldSpec {
        name: "ever_married",
        constraint: Constraint::Categorical(&[Category::Text("Yes"), Category::Text("No")]),
    },
    FieldSpec {
        name: "work_type",
        constraint: Constraint::Categorical(&[
            Category::Text("Private"),
            Category::Text("Self-employed"),
            Category::Text("Govt_job"),
            Category::Text("children"),
            Category::Text("Never_worked"),
        ]),
    },
    FieldSpec {
        name: "Residence_type",
        constraint: Constraint::Categorical(&[Category::Text("Urban"), Category::Text("Rural")]),
    },
    FieldSpec {
        name: "avg_glucose_level",
        constraint: Constraint::NumericRange {
            low: 0.0,
            high: 400.0,
        },
    },
    FieldSpec {
        name: "bmi",
        constraint: Constraint::NumericRange {
            low: 10.0,
            high: 100.0,
        },
    },
    FieldSpec {
        name: "smoking_status",
        constraint: Constraint::Categorical(&[
            Category::Text("formerly smoked"),
            Category::Text("never smoked"),
            Category::Text("smokes"),
        ]),
    },
    FieldSpec {
        name: "hypertension",
        constraint: Constraint::Categorical(BINARY_CODES),
    },
    FieldSpec {
        name: "heart_disease",
        constraint: Constraint::Categorical(BINARY_CODES),
    },
];

/// Look up the spec of a field by name
pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELD_SPECS.iter().find(|spec| spec.name == name)
}
