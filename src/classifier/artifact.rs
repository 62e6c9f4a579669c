use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use super::ClassifierError;

pub(crate) const ARTIFACT_VERSION: u32 = 1;

/// On-disk form of the fitted scaler and nearest-neighbour model.
///
/// `fit_x` holds the raw (unscaled) training rows; they are standardized with `scaler` when the
/// classifier is built.
#[derive(Deserialize, Debug, Clone)]
pub(crate) struct ModelArtifact {
    pub(crate) version: u32,
    pub(crate) features: Vec<String>,
    pub(crate) scaler: ScalerParams,
    pub(crate) model: NeighborsParams,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct ScalerParams {
    pub(crate) mean: Vec<f64>,
    pub(crate) scale: Vec<f64>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Weights {
    #[default]
    Uniform,
    Distance,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct NeighborsParams {
    pub(crate) n_neighbors: usize,
    #[serde(default)]
    pub(crate) weights: Weights,
    #[serde(default = "euclidean")]
    pub(crate) p: f64,
    pub(crate) classes: Vec<i64>,
    pub(crate) fit_x: Vec<Vec<f64>>,
    pub(crate) fit_y: Vec<i64>,
}

fn euclidean() -> f64 {
    2.0
}

impl ModelArtifact {
    pub(crate) fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let file = File::open(path)?;
        let artifact = serde_json::from_reader(BufReader::new(file))?;
        Ok(artifact)
    }

    #[cfg(test)]
    pub(crate) fn from_json(json: &str) -> Result<Self, ClassifierError> {
        Ok(serde_json::from_str(json)?)
    }
}
