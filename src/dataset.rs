//! A named collection of fields and event series.
use crate::{
    error::{AnalysisError, Result},
    grid::Field,
    ssw::EventSeries,
};
use std::collections::BTreeMap;

/// A set of variables sharing a grid, either model output handed in for analysis or the merged
/// results of an analysis.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    fields: BTreeMap<String, Field>,
    events: BTreeMap<String, EventSeries>,
}

impl Dataset {
    /// Create an empty dataset.
    #[inline]
    pub fn new() -> Self {
        Dataset::default()
    }

    /// Add a field under its own name, replacing any field with the same name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ifs_diagnostics::{Dataset, Field, Metadata};
    ///
    /// let ds = Dataset::new().with_variable(Field::scalar(Metadata::new("2t"), 288.0));
    /// assert!(ds.variable("2t").is_ok());
    /// assert!(ds.variable("10u").is_err());
    /// ```
    pub fn with_variable(mut self, field: Field) -> Self {
        self.fields.insert(field.name().to_owned(), field);
        self
    }

    /// Add an event series under its own name, replacing any series with the same name.
    pub fn with_events(mut self, events: EventSeries) -> Self {
        self.events
            .insert(events.metadata().name().to_owned(), events);
        self
    }

    /// Look up a variable, failing with the name if it is missing.
    pub fn variable(&self, name: &str) -> Result<&Field> {
        self.fields
            .get(name)
            .ok_or_else(|| AnalysisError::MissingVariable(name.to_owned()))
    }

    /// Look up an event series.
    pub fn event_series(&self, name: &str) -> Option<&EventSeries> {
        self.events.get(name)
    }

    /// Does the dataset hold a field or event series with this name?
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name) || self.events.contains_key(name)
    }

    /// Number of fields plus event series.
    pub fn len(&self) -> usize {
        self.fields.len() + self.events.len()
    }

    /// True if there is nothing in the dataset.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Combine two datasets, e.g. surface and pressure level output of the same run.
    ///
    /// Where both hold an entry with the same name the one in `self` is kept.
    pub fn merge(mut self, other: Dataset) -> Self {
        for (name, field) in other.fields {
            if !self.contains(&name) {
                self.fields.insert(name, field);
            }
        }

        for (name, events) in other.events {
            if !self.contains(&name) {
                self.events.insert(name, events);
            }
        }

        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::Metadata;

    #[test]
    fn test_missing_variable_is_named() {
        let ds = Dataset::new();
        assert_eq!(
            ds.variable("ttrc").unwrap_err(),
            AnalysisError::MissingVariable("ttrc".to_owned())
        );
    }

    #[test]
    fn test_merge_keeps_first() {
        let sfc = Dataset::new()
            .with_variable(Field::scalar(Metadata::new("2t"), 1.0))
            .with_variable(Field::scalar(Metadata::new("shared"), 1.0));
        let pl = Dataset::new()
            .with_variable(Field::scalar(Metadata::new("u"), 2.0))
            .with_variable(Field::scalar(Metadata::new("shared"), 2.0));

        let ds = sfc.merge(pl);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.variable("shared").unwrap().get(&[]), Some(1.0));
        assert_eq!(ds.variable("u").unwrap().get(&[]), Some(2.0));
    }
}
