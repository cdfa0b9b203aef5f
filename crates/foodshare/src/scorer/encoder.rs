use super::Candidate;

use indexmap::IndexSet;

/// Categorical columns, in encoding order.
const CATEGORICAL: [&str; 4] = ["provider_type", "location", "food_type", "meal_type"];

/// Turns a [`Candidate`] into a feature vector.
///
/// Layout: `quantity` followed by one indicator per category seen during
/// fitting, column by column. A missing value counts as a category of its
/// own. Categories not seen during fitting set no indicator.
#[derive(Debug, Clone, Default)]
pub(super) struct Encoder {
    categories: [IndexSet<Option<String>>; 4],
}

impl Encoder {
    pub(super) fn fit<'a>(candidates: impl IntoIterator<Item = &'a Candidate>) -> Encoder {
        let mut encoder = Encoder::default();
        for candidate in candidates {
            for (set, value) in encoder.categories.iter_mut().zip(values(candidate)) {
                set.insert(value.cloned());
            }
        }
        encoder
    }

    pub(super) fn width(&self) -> usize {
        1 + self.categories.iter().map(IndexSet::len).sum::<usize>()
    }

    pub(super) fn encode(&self, candidate: &Candidate) -> Vec<f64> {
        let mut features = vec![0.0; self.width()];
        features[0] = candidate.quantity as f64;

        let mut offset = 1;
        for (set, value) in self.categories.iter().zip(values(candidate)) {
            if let Some(index) = set.get_index_of(&value.cloned()) {
                features[offset + index] = 1.0;
            }
            offset += set.len();
        }
        features
    }

    pub(super) fn feature_names(&self) -> Vec<String> {
        let mut names = vec!["quantity".to_string()];
        for (column, set) in CATEGORICAL.iter().zip(&self.categories) {
            for value in set {
                match value {
                    Some(value) => names.push(format!("{column}={value}")),
                    None => names.push(format!("{column}=<none>")),
                }
            }
        }
        names
    }
}

fn values(candidate: &Candidate) -> [Option<&String>; 4] {
    [
        candidate.provider_type.as_ref(),
        candidate.location.as_ref(),
        candidate.food_type.as_ref(),
        candidate.meal_type.as_ref(),
    ]
}
