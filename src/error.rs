use thiserror::Error;

pub type Result<T> = std::result::Result<T, FuzzyError>;

/// Mistakes in how variables and rules were put together. These are found
/// while building a [`ControlSystem`](crate::system::ControlSystem) and are
/// never produced by a well-formed system during inference.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("variable `{variable}` has no fuzzy set `{term}`")]
    UndefinedSet { variable: String, term: String },
    #[error("rule references a variable that is not part of this system")]
    UnknownVariable,
    #[error("triangle points must satisfy a <= b <= c, got ({a}, {b}, {c})")]
    InvalidTriangle { a: f64, b: f64, c: f64 },
    #[error("variable `{variable}` has an invalid universe [{min}, {max}] with step {step}")]
    InvalidUniverse {
        variable: String,
        min: f64,
        max: f64,
        step: f64,
    },
    #[error("And/Or expressions need at least one operand")]
    EmptyExpression,
    #[error("rule consequence must be a single `is` or a conjunction of them")]
    InvalidConsequence,
    #[error("rule weight must lie in [0, 1], got {0}")]
    InvalidWeight(f64),
    #[error("rule set has no rule targeting any output variable")]
    MissingConsequent,
    #[error("no rule for `{variable}` fires at {probe}")]
    Uncovered { variable: String, probe: String },
}

#[derive(Debug, Error)]
pub enum FuzzyError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("no rule produced any output for `{variable}`")]
    NoResult { variable: String },
    #[error("no input was provided for `{variable}`")]
    MissingInput { variable: String },
    #[error("could not parse settings: {0}")]
    Settings(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl FuzzyError {
    pub fn is_no_result(&self) -> bool {
        matches!(self, FuzzyError::NoResult { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, FuzzyError::Config(_))
    }
}
