//! Running a batch of diagnostics and collecting what they produce.
use crate::{
    config::Config,
    dataset::Dataset,
    error::Result,
    grid::Field,
    jet::{jet_position_and_strength, mass_weighted_jet},
    keys::Diagnostic,
    means::{cloud_radiative_forcing, global_mean_of, seasonal_mean_of, zonal_mean},
    ssw::{ssw_analysis, EventSeries},
    wind::{polar_vortex, qbo},
};
use log::{debug, warn};

/// One output of a diagnostic.
#[derive(Clone, Debug)]
pub enum Product {
    /// A gridded field or time series.
    Field(Field),
    /// A list of event dates.
    Events(EventSeries),
}

impl Product {
    /// The variable name the product carries in its own metadata.
    pub fn name(&self) -> &str {
        match self {
            Product::Field(fld) => fld.name(),
            Product::Events(events) => events.metadata().name(),
        }
    }

    /// Get the field, if this is one.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Product::Field(fld) => Some(fld),
            Product::Events(_) => None,
        }
    }

    /// Get the event series, if this is one.
    pub fn as_events(&self) -> Option<&EventSeries> {
        match self {
            Product::Events(events) => Some(events),
            Product::Field(_) => None,
        }
    }
}

impl From<Field> for Product {
    fn from(fld: Field) -> Self {
        Product::Field(fld)
    }
}

impl From<EventSeries> for Product {
    fn from(events: EventSeries) -> Self {
        Product::Events(events)
    }
}

/// The products of an analysis, keyed by result name in the order they were computed.
///
/// Most diagnostics are stored under their request token. `jet` and `mw_jet` produce several
/// products each, stored under `jet_nh_pos`, `jet_nh_value`, `jet_sh_pos`, `jet_sh_value` and
/// `mwu`, `mwp`, `mw_jet_nh`, `mw_jet_sht`, `mw_jet_shp`, `ws_jet_nh`, `ws_jet_sht`, `ws_jet_shp`.
#[derive(Clone, Debug, Default)]
pub struct Results {
    products: Vec<(String, Product)>,
}

impl Results {
    /// Create an empty set of results.
    pub fn new() -> Self {
        Results::default()
    }

    /// Add a product, replacing an earlier one stored under the same key.
    pub fn with_product<K, P>(mut self, key: K, product: P) -> Self
    where
        K: Into<String>,
        P: Into<Product>,
    {
        let key = key.into();
        let product = product.into();

        match self.products.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = product,
            None => self.products.push((key, product)),
        }

        self
    }

    /// Look up a product by key.
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p)
    }

    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.get(key).and_then(Product::as_field)
    }

    /// Look up an event series by key.
    pub fn events(&self, key: &str) -> Option<&EventSeries> {
        self.get(key).and_then(Product::as_events)
    }

    /// Iterate over `(key, product)` in the order the products were added.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Product)> {
        self.products.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// The keys in the order the products were added.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|(k, _)| k.as_str())
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True if there are no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Merge all products into one dataset under their own variable names.
    ///
    /// When two products share a name the one added first is kept.
    pub fn into_dataset(self) -> Dataset {
        self.products
            .into_iter()
            .fold(Dataset::new(), |ds, (_, product)| {
                if ds.contains(product.name()) {
                    debug!("dropping duplicate product {}", product.name());
                    return ds;
                }

                match product {
                    Product::Field(fld) => ds.with_variable(fld),
                    Product::Events(events) => ds.with_events(events),
                }
            })
    }
}

/// Compute each diagnostic in turn.
///
/// The first error aborts the whole batch, e.g. a missing variable or axis, or an invalid
/// configuration.
pub fn analyze(diagnostics: &[Diagnostic], ds: &Dataset, cfg: &Config) -> Result<Results> {
    cfg.validate()?;

    diagnostics
        .iter()
        .try_fold(Results::new(), |results, diagnostic| {
            debug!("computing {}", diagnostic);
            run_one(results, diagnostic, ds, cfg)
        })
}

/// Parse request tokens and compute the diagnostics they name.
///
/// Unknown tokens are logged and skipped, the rest of the batch still runs.
///
/// ```rust
/// use ifs_diagnostics::{analyze_tokens, Config, Dataset};
///
/// let ds = Dataset::new();
/// let results = analyze_tokens(&["not_a_diagnostic"], &ds, &Config::default()).unwrap();
/// assert!(results.is_empty());
/// ```
pub fn analyze_tokens(tokens: &[&str], ds: &Dataset, cfg: &Config) -> Result<Results> {
    let diagnostics: Vec<Diagnostic> = tokens
        .iter()
        .filter_map(|token| match token.parse() {
            Ok(diagnostic) => Some(diagnostic),
            Err(err) => {
                warn!("skipping: {}", err);
                None
            }
        })
        .collect();

    analyze(&diagnostics, ds, cfg)
}

fn run_one(
    results: Results,
    diagnostic: &Diagnostic,
    ds: &Dataset,
    cfg: &Config,
) -> Result<Results> {
    let key = diagnostic.to_string();

    let results = match diagnostic {
        Diagnostic::GlobalMean(var) => results.with_product(key, global_mean_of(ds, var)?),
        Diagnostic::CloudRadiativeForcing => {
            results.with_product(key, cloud_radiative_forcing(ds)?)
        }
        Diagnostic::SeasonalMean(var) => results.with_product(key, seasonal_mean_of(ds, var)?),
        Diagnostic::ZonalMean(var) => results.with_product(key, zonal_mean(ds, *var)?),
        Diagnostic::PolarVortex => results.with_product(key, polar_vortex(ds, &cfg.polar_vortex)?),
        Diagnostic::Qbo => results.with_product(key, qbo(ds, &cfg.qbo)?),
        Diagnostic::Ssw => results.with_product(key, ssw_analysis(ds, cfg)?),
        Diagnostic::Jet => {
            let jets = jet_position_and_strength(ds, &cfg.jet)?;
            results
                .with_product("jet_nh_pos", jets.northern_position)
                .with_product("jet_nh_value", jets.northern_strength)
                .with_product("jet_sh_pos", jets.southern_position)
                .with_product("jet_sh_value", jets.southern_strength)
        }
        Diagnostic::MassWeightedJet => {
            let jets = mass_weighted_jet(ds, &cfg.mass_weighted_jet)?;
            results
                .with_product("mwu", jets.wind_speed)
                .with_product("mwp", jets.pressure)
                .with_product("mw_jet_nh", jets.northern.latitude)
                .with_product("mw_jet_sht", jets.southern_subtropical.latitude)
                .with_product("mw_jet_shp", jets.southern_polar.latitude)
                .with_product("ws_jet_nh", jets.northern.wind_speed)
                .with_product("ws_jet_sht", jets.southern_subtropical.wind_speed)
                .with_product("ws_jet_shp", jets.southern_polar.wind_speed)
        }
    };

    Ok(results)
}
