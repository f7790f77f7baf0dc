use serde::{Deserialize, Serialize};

use crate::{Metadata, Value};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum MetadataFilter {
    Eq(String, Value),
    In(String, Vec<Value>),
    Range {
        key: String,
        min: Option<Value>,
        max: Option<Value>,
    },
    All(Vec<MetadataFilter>),
    Any(Vec<MetadataFilter>),
}

impl MetadataFilter {
    pub fn matches(&self, metadata: &Metadata) -> bool {
        match self {
            MetadataFilter::Eq(key, value) => metadata.get(key).map_or(false, |entry| entry == value),
            MetadataFilter::In(key, values) => metadata
                .get(key)
                .map_or(false, |entry| values.iter().any(|value| value == entry)),
            MetadataFilter::Range { key, min, max } => {
                let Some(value) = metadata.get(key).and_then(Value::as_f64) else {
                    return false;
                };
                within_bound(min.as_ref(), |bound| value >= bound)
                    && within_bound(max.as_ref(), |bound| value <= bound)
            }
            MetadataFilter::All(filters) => filters.iter().all(|filter| filter.matches(metadata)),
            MetadataFilter::Any(filters) => filters.iter().any(|filter| filter.matches(metadata)),
        }
    }
}

// A bound that is present but not numeric never matches.
fn within_bound(bound: Option<&Value>, check: impl Fn(f64) -> bool) -> bool {
    match bound {
        None => true,
        Some(bound) => bound.as_f64().map_or(false, check),
    }
}
