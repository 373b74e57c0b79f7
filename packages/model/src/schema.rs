use crate::error::SchemaError;
use ahash::AHashSet;

/// Ordered feature names the classifier was trained on.
///
/// The order defines which submitted value belongs to which column, so it has
/// to match training exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = AHashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::Duplicate(name.clone()));
            }
        }

        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Pairs `values` with the schema names by position.
    ///
    /// Returns `None` when the number of values differs from the schema length.
    pub fn record<'a>(&'a self, values: &'a [f64]) -> Option<FeatureRecord<'a>> {
        if values.len() != self.names.len() {
            return None;
        }
        Some(FeatureRecord {
            names: &self.names,
            values,
        })
    }
}

/// A single labeled row: every value paired with its column name.
#[derive(Debug, Clone, Copy)]
pub struct FeatureRecord<'a> {
    names: &'a [String],
    values: &'a [f64],
}

impl<'a> FeatureRecord<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values[idx])
    }

    pub fn at(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        let (names, values) = (self.names, self.values);
        names
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_empty_list() {
        assert!(matches!(
            FeatureSchema::new(Vec::new()),
            Err(SchemaError::Empty)
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = FeatureSchema::new(names(&["age", "education", "age"])).unwrap_err();
        assert!(matches!(err, SchemaError::Duplicate(name) if name == "age"));
    }

    #[test]
    fn record_requires_matching_length() {
        let schema = FeatureSchema::new(names(&["age", "hours-per-week"])).unwrap();
        assert!(schema.record(&[1.0]).is_none());
        assert!(schema.record(&[1.0, 2.0, 3.0]).is_none());
        assert!(schema.record(&[1.0, 2.0]).is_some());
    }

    #[test]
    fn record_pairs_values_by_position() {
        let schema = FeatureSchema::new(names(&["age", "capital-gain", "sex_Male"])).unwrap();
        let values = [39.0, 2174.0, 1.0];
        let record = schema.record(&values).unwrap();

        assert_eq!(record.get("capital-gain"), Some(2174.0));
        assert_eq!(record.get("race_White"), None);
        assert_eq!(record.at(2), Some(1.0));
        assert_eq!(record.at(3), None);

        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(
            pairs,
            vec![("age", 39.0), ("capital-gain", 2174.0), ("sex_Male", 1.0)]
        );
    }
}
