use std::fmt::{Display, Formatter, Result};

#[derive(Debug)]
pub(crate) enum ClassifierError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnsupportedVersion(u32),
    FeatureMismatch(Vec<String>),
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    InvalidModel(String),
    UnknownClassCode(i64),
}

impl From<std::io::Error> for ClassifierError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl std::error::Error for ClassifierError {}

impl Display for ClassifierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ClassifierError::Io(err) => write!(f, "Classifier: Unable to read artifact: {err}"),
            ClassifierError::Parse(err) => write!(f, "Classifier: Malformed artifact: {err}"),
            ClassifierError::UnsupportedVersion(version) => {
                write!(f, "Classifier: Unsupported artifact version {version}")
            }
            ClassifierError::FeatureMismatch(features) => write!(
                f,
                "Classifier: Artifact features {features:?} do not match the expected column order"
            ),
            ClassifierError::DimensionMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "Classifier: Dimension mismatch in {what}. Expected: {expected}, Actual: {actual}"
            ),
            ClassifierError::InvalidModel(reason) => {
                write!(f, "Classifier: Invalid model: {reason}")
            }
            ClassifierError::UnknownClassCode(code) => write!(
                f,
                "Classifier: Class code {code} has no occupation label"
            ),
        }
    }
}
