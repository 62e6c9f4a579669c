use crate::classifier::ClassifierError;
use std::fmt::{Display, Formatter, Result};

#[derive(Debug)]
pub(crate) enum QueryEngineError {
    Classifier(ClassifierError),
}

impl From<ClassifierError> for QueryEngineError {
    fn from(value: ClassifierError) -> Self {
        Self::Classifier(value)
    }
}

impl std::error::Error for QueryEngineError {}

impl Display for QueryEngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            QueryEngineError::Classifier(err) => write!(f, "{}", err),
        }
    }
}
