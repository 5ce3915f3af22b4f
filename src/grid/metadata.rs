use serde::{Deserialize, Serialize};

/// Descriptive attributes attached to a field or a coordinate.
///
/// Metadata is a plain value. Derived fields copy the metadata of their source and override
/// single entries with the `with_*` methods, they never share or mutate the original.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    name: String,
    long_name: Option<String>,
    standard_name: Option<String>,
    units: Option<String>,
}

impl Metadata {
    /// Create metadata with only a name set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ifs_diagnostics::Metadata;
    ///
    /// let meta = Metadata::new("u").with_units("m s**-1");
    /// assert_eq!(meta.name(), "u");
    /// assert_eq!(meta.units(), Some("m s**-1"));
    /// assert!(meta.long_name().is_none());
    /// ```
    #[inline]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Metadata {
            name: name.into(),
            ..Metadata::default()
        }
    }

    /// Replace the name.
    #[inline]
    pub fn with_name<S: Into<String>>(self, name: S) -> Self {
        Metadata {
            name: name.into(),
            ..self
        }
    }

    /// Replace the long name.
    #[inline]
    pub fn with_long_name<S: Into<String>>(self, long_name: S) -> Self {
        Metadata {
            long_name: Some(long_name.into()),
            ..self
        }
    }

    /// Replace the CF standard name.
    #[inline]
    pub fn with_standard_name<S: Into<String>>(self, standard_name: S) -> Self {
        Metadata {
            standard_name: Some(standard_name.into()),
            ..self
        }
    }

    /// Replace the units.
    #[inline]
    pub fn with_units<S: Into<String>>(self, units: S) -> Self {
        Metadata {
            units: Some(units.into()),
            ..self
        }
    }

    /// The variable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The long (descriptive) name.
    #[inline]
    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    /// The CF standard name.
    #[inline]
    pub fn standard_name(&self) -> Option<&str> {
        self.standard_name.as_deref()
    }

    /// The units.
    #[inline]
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }
}
