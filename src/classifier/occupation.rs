use super::ClassifierError;

/// Occupation categories in class-code order: code `c` is `CATEGORY_NAMES[c - 1]`.
pub(crate) const CATEGORY_NAMES: [&str; 11] = [
    "Management",
    "Business",
    "Applied Sciences",
    "Health",
    "Education",
    "Arts",
    "Sales",
    "Service",
    "Trades",
    "Agriculture",
    "Manufacturing",
];

/// Column order the model was fitted with.
pub(crate) const FEATURE_NAMES: [&str; 6] = ["PROV", "CMA", "AGE_12", "GENDER", "MARSTAT", "EDUC"];

pub(crate) fn occupation_label(code: i64) -> Result<&'static str, ClassifierError> {
    usize::try_from(code)
        .ok()
        .and_then(|code| code.checked_sub(1))
        .and_then(|index| CATEGORY_NAMES.get(index))
        .copied()
        .ok_or(ClassifierError::UnknownClassCode(code))
}

/// Integer coded demographic features of one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct JobFeatures {
    pub(crate) prov: i64,
    pub(crate) cma: i64,
    pub(crate) age_12: i64,
    pub(crate) gender: i64,
    pub(crate) marstat: i64,
    pub(crate) educ: i64,
}

impl JobFeatures {
    pub(crate) fn row(&self) -> [f64; 6] {
        let JobFeatures {
            prov,
            cma,
            age_12,
            gender,
            marstat,
            educ,
        } = *self;
        [prov, cma, age_12, gender, marstat, educ].map(|feature| feature as f64)
    }
}
