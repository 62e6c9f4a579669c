mod artifact;
mod error;
mod model;
mod occupation;

use std::path::Path;

pub(crate) use artifact::ModelArtifact;
pub(crate) use error::ClassifierError;
pub(crate) use occupation::{occupation_label, JobFeatures};

use artifact::ARTIFACT_VERSION;
use model::{KNeighborsClassifier, StandardScaler};
use occupation::FEATURE_NAMES;
#[cfg(test)]
use occupation::CATEGORY_NAMES;

/// Predicts likely occupation categories from demographic features with a frozen scaler and
/// nearest-neighbour model.
#[derive(Debug, Clone)]
pub(crate) struct OccupationClassifier {
    scaler: StandardScaler,
    model: KNeighborsClassifier,
}

impl OccupationClassifier {
    pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        Self::from_artifact(&ModelArtifact::from_path(path)?)
    }

    pub(crate) fn from_artifact(artifact: &ModelArtifact) -> Result<Self, ClassifierError> {
        if artifact.version != ARTIFACT_VERSION {
            return Err(ClassifierError::UnsupportedVersion(artifact.version));
        }
        if artifact.features != FEATURE_NAMES {
            return Err(ClassifierError::FeatureMismatch(artifact.features.clone()));
        }

        let classes = &artifact.model.classes;
        if classes.len() < 3 {
            return Err(ClassifierError::InvalidModel(format!(
                "at least 3 classes are required, found {}",
                classes.len()
            )));
        }
        for code in classes {
            occupation_label(*code)?;
        }

        let scaler = StandardScaler::new(&artifact.scaler)?;
        let model = KNeighborsClassifier::new(&artifact.model, &scaler)?;
        Ok(Self { scaler, model })
    }

    pub(crate) fn classes(&self) -> &[i64] {
        self.model.classes()
    }

    /// Class codes with their probability, most likely first. Equal probabilities keep the
    /// model's class order.
    pub(crate) fn ranked(&self, features: &JobFeatures) -> Vec<(i64, f64)> {
        let scaled = self.scaler.transform(&features.row());
        let probabilities = self.model.predict_proba(&scaled);

        let mut ranked = self
            .classes()
            .iter()
            .copied()
            .zip(probabilities)
            .collect::<Vec<_>>();
        ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        ranked
    }

    pub(crate) fn predict_top3(
        &self,
        features: &JobFeatures,
    ) -> Result<[String; 3], ClassifierError> {
        let top = self
            .ranked(features)
            .into_iter()
            .take(3)
            .map(|(code, _)| occupation_label(code).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        let found = top.len();
        top.try_into().map_err(|_| {
            ClassifierError::InvalidModel(format!("expected 3 ranked classes, found {found}"))
        })
    }
}
