use super::{
    artifact::{NeighborsParams, ScalerParams, Weights},
    ClassifierError,
};

pub(crate) const N_FEATURES: usize = 6;

type Row = [f64; N_FEATURES];

fn to_row(values: &[f64], what: &'static str) -> Result<Row, ClassifierError> {
    Row::try_from(values).map_err(|_| ClassifierError::DimensionMismatch {
        what,
        expected: N_FEATURES,
        actual: values.len(),
    })
}

/// Standardization fitted on the training set: `(x - mean) / scale`.
#[derive(Debug, Clone)]
pub(crate) struct StandardScaler {
    mean: Row,
    scale: Row,
}

impl StandardScaler {
    pub(crate) fn new(ScalerParams { mean, scale }: &ScalerParams) -> Result<Self, ClassifierError> {
        let mean = to_row(mean, "scaler mean")?;
        let mut scale = to_row(scale, "scaler scale")?;
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(ClassifierError::InvalidModel(
                "scaler parameters must be finite".to_string(),
            ));
        }
        // Constant columns were fitted with zero variance.
        for s in scale.iter_mut().filter(|s| **s == 0.0) {
            *s = 1.0;
        }
        Ok(Self { mean, scale })
    }

    pub(crate) fn transform(&self, row: &Row) -> Row {
        let mut scaled = *row;
        for ((x, mean), scale) in scaled.iter_mut().zip(self.mean).zip(self.scale) {
            *x = (*x - mean) / scale;
        }
        scaled
    }
}

/// Brute force k-nearest-neighbour classifier over the standardized training set.
#[derive(Debug, Clone)]
pub(crate) struct KNeighborsClassifier {
    n_neighbors: usize,
    weights: Weights,
    p: f64,
    classes: Vec<i64>,
    fit_x: Vec<Row>,
    // Index into `classes` for every training row.
    fit_y: Vec<usize>,
}

impl KNeighborsClassifier {
    pub(crate) fn new(
        params: &NeighborsParams,
        scaler: &StandardScaler,
    ) -> Result<Self, ClassifierError> {
        let NeighborsParams {
            n_neighbors,
            weights,
            p,
            classes,
            fit_x,
            fit_y,
        } = params;

        if !(p.is_finite() && *p > 0.0) {
            return Err(ClassifierError::InvalidModel(format!(
                "minkowski power must be positive, got {p}"
            )));
        }
        if fit_x.len() != fit_y.len() {
            return Err(ClassifierError::DimensionMismatch {
                what: "training labels",
                expected: fit_x.len(),
                actual: fit_y.len(),
            });
        }
        if *n_neighbors == 0 || *n_neighbors > fit_x.len() {
            return Err(ClassifierError::InvalidModel(format!(
                "n_neighbors is {n_neighbors} with {} training rows",
                fit_x.len()
            )));
        }
        for (i, class) in classes.iter().enumerate() {
            if classes[..i].contains(class) {
                return Err(ClassifierError::InvalidModel(format!(
                    "class {class} listed twice"
                )));
            }
        }

        let fit_x = fit_x
            .iter()
            .map(|row| to_row(row, "training row").map(|row| scaler.transform(&row)))
            .collect::<Result<Vec<_>, _>>()?;
        let fit_y = fit_y
            .iter()
            .map(|label| {
                classes.iter().position(|class| class == label).ok_or_else(|| {
                    ClassifierError::InvalidModel(format!(
                        "training label {label} is not a declared class"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            n_neighbors: *n_neighbors,
            weights: *weights,
            p: *p,
            classes: classes.clone(),
            fit_x,
            fit_y,
        })
    }

    pub(crate) fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Probability for every entry of `classes()`, in the same order. `row` must already be
    /// standardized. Neighbours at equal distance are taken in training-row order.
    pub(crate) fn predict_proba(&self, row: &Row) -> Vec<f64> {
        let mut distances = self
            .fit_x
            .iter()
            .enumerate()
            .map(|(index, fitted)| (minkowski(row, fitted, self.p), index))
            .collect::<Vec<_>>();
        distances.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        let neighbors = &distances[..self.n_neighbors];

        let mut weights = vec![0.0; self.classes.len()];
        let exact = neighbors.iter().any(|(distance, _)| *distance == 0.0);
        for (distance, index) in neighbors {
            let weight = match self.weights {
                Weights::Uniform => 1.0,
                Weights::Distance if exact => {
                    if *distance == 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                }
                Weights::Distance => 1.0 / distance,
            };
            weights[self.fit_y[*index]] += weight;
        }

        let total: f64 = weights.iter().sum();
        weights.iter().map(|weight| weight / total).collect()
    }
}

fn minkowski(a: &Row, b: &Row, p: f64) -> f64 {
    if p == 2.0 {
        let mut sum = 0.0;
        for (x, y) in a.iter().zip(b) {
            let d = x - y;
            sum += d * d;
        }
        return sum.sqrt();
    }
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        sum += (x - y).abs().powf(p);
    }
    sum.powf(1.0 / p)
}
