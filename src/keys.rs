//! Enums used as keys for requesting diagnostics.
use crate::error::AnalysisError;
use std::{fmt, str::FromStr};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The kinds of diagnostics, with the token each is requested by.
///
/// Kinds that need a variable are requested as `<token>_<variable>`, e.g. `glomean_2t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum DiagnosticKind {
    /// Area weighted global mean of a variable.
    #[strum(serialize = "glomean")]
    GlobalMean,
    /// Month length weighted seasonal mean of a variable.
    #[strum(serialize = "seasmean")]
    SeasonalMean,
    /// Seasonal mean of a zonal mean.
    #[strum(serialize = "zonalmean")]
    ZonalMean,
    /// Polar vortex index.
    #[strum(serialize = "polar_vortex")]
    PolarVortex,
    /// Quasi-Biennial Oscillation index.
    #[strum(serialize = "QBO")]
    Qbo,
    /// Jet position and strength from the wind maximum.
    #[strum(serialize = "jet")]
    Jet,
    /// Mass weighted jets.
    #[strum(serialize = "mw_jet")]
    MassWeightedJet,
    /// Sudden Stratospheric Warming central dates.
    #[strum(serialize = "SSW")]
    Ssw,
}

impl DiagnosticKind {
    /// Does this kind need a variable name after its token?
    pub fn takes_variable(self) -> bool {
        matches!(
            self,
            DiagnosticKind::GlobalMean | DiagnosticKind::SeasonalMean | DiagnosticKind::ZonalMean
        )
    }
}

/// A variable for global and seasonal means.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Wind speed from the 10 metre wind components `10u` and `10v`.
    TotalWind,
    /// Net top of atmosphere flux, `tsr + ttr`.
    ToaFluxes,
    /// Net surface heat flux, `slhf + sshf + ssr + str`.
    SurfaceHeatFluxes,
    /// A variable stored in the dataset under this name.
    Raw(String),
}

impl FromStr for Variable {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(AnalysisError::InvalidInput("empty variable name")),
            "totalwind" => Ok(Variable::TotalWind),
            "toa_fluxes" => Ok(Variable::ToaFluxes),
            "surface_heat_fluxes" => Ok(Variable::SurfaceHeatFluxes),
            name => Ok(Variable::Raw(name.to_owned())),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Variable::TotalWind => write!(f, "totalwind"),
            Variable::ToaFluxes => write!(f, "toa_fluxes"),
            Variable::SurfaceHeatFluxes => write!(f, "surface_heat_fluxes"),
            Variable::Raw(name) => write!(f, "{}", name),
        }
    }
}

/// Variables available as zonal mean cross sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ZonalVariable {
    /// Temperature, `t`.
    #[strum(serialize = "t")]
    Temperature,
    /// Zonal wind, `u`.
    #[strum(serialize = "wind")]
    Wind,
}

impl ZonalVariable {
    /// Name of the dataset variable.
    pub(crate) fn source(self) -> &'static str {
        match self {
            ZonalVariable::Temperature => "t",
            ZonalVariable::Wind => "u",
        }
    }
}

/// A diagnostic that can be requested from [`analyze`](crate::analyze).
///
/// Diagnostics round trip through their tokens:
///
/// ```rust
/// use ifs_diagnostics::{Diagnostic, Variable};
///
/// let d: Diagnostic = "seasmean_2t".parse().unwrap();
/// assert_eq!(d, Diagnostic::SeasonalMean(Variable::Raw("2t".to_owned())));
/// assert_eq!(d.to_string(), "seasmean_2t");
///
/// assert_eq!("glomean_crf".parse::<Diagnostic>().unwrap(), Diagnostic::CloudRadiativeForcing);
/// assert_eq!("polar_vortex".parse::<Diagnostic>().unwrap(), Diagnostic::PolarVortex);
/// assert!("maxwind".parse::<Diagnostic>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// Global mean of a variable.
    GlobalMean(Variable),
    /// Global mean cloud radiative forcing.
    CloudRadiativeForcing,
    /// Seasonal mean of a variable.
    SeasonalMean(Variable),
    /// Seasonal mean zonal mean.
    ZonalMean(ZonalVariable),
    /// Polar vortex index.
    PolarVortex,
    /// QBO index.
    Qbo,
    /// Jet position and strength from the wind maximum.
    Jet,
    /// Mass weighted jets.
    MassWeightedJet,
    /// SSW central dates.
    Ssw,
}

impl Diagnostic {
    /// The kind of this diagnostic.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::GlobalMean(_) | Diagnostic::CloudRadiativeForcing => {
                DiagnosticKind::GlobalMean
            }
            Diagnostic::SeasonalMean(_) => DiagnosticKind::SeasonalMean,
            Diagnostic::ZonalMean(_) => DiagnosticKind::ZonalMean,
            Diagnostic::PolarVortex => DiagnosticKind::PolarVortex,
            Diagnostic::Qbo => DiagnosticKind::Qbo,
            Diagnostic::Jet => DiagnosticKind::Jet,
            Diagnostic::MassWeightedJet => DiagnosticKind::MassWeightedJet,
            Diagnostic::Ssw => DiagnosticKind::Ssw,
        }
    }
}

impl FromStr for Diagnostic {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || AnalysisError::UnknownDiagnostic(s.to_owned());

        if let Ok(kind) = s.parse::<DiagnosticKind>() {
            return match kind {
                DiagnosticKind::PolarVortex => Ok(Diagnostic::PolarVortex),
                DiagnosticKind::Qbo => Ok(Diagnostic::Qbo),
                DiagnosticKind::Jet => Ok(Diagnostic::Jet),
                DiagnosticKind::MassWeightedJet => Ok(Diagnostic::MassWeightedJet),
                DiagnosticKind::Ssw => Ok(Diagnostic::Ssw),
                // A mean without a variable
                _ => Err(unknown()),
            };
        }

        let (token, var) = s.split_once('_').ok_or_else(unknown)?;
        let kind = token
            .parse::<DiagnosticKind>()
            .ok()
            .filter(|kind| kind.takes_variable())
            .ok_or_else(unknown)?;

        match kind {
            DiagnosticKind::GlobalMean if var == "crf" => Ok(Diagnostic::CloudRadiativeForcing),
            DiagnosticKind::GlobalMean => var
                .parse()
                .map(Diagnostic::GlobalMean)
                .map_err(|_| unknown()),
            DiagnosticKind::SeasonalMean => var
                .parse()
                .map(Diagnostic::SeasonalMean)
                .map_err(|_| unknown()),
            DiagnosticKind::ZonalMean => var
                .parse()
                .map(Diagnostic::ZonalMean)
                .map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = self.kind();
        match self {
            Diagnostic::GlobalMean(var) | Diagnostic::SeasonalMean(var) => {
                write!(f, "{}_{}", kind, var)
            }
            Diagnostic::CloudRadiativeForcing => write!(f, "{}_crf", kind),
            Diagnostic::ZonalMean(var) => write!(f, "{}_{}", kind, var),
            _ => write!(f, "{}", kind),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_token_round_trips() {
        let tokens = [
            "glomean_2t",
            "glomean_totalwind",
            "glomean_toa_fluxes",
            "glomean_surface_heat_fluxes",
            "glomean_crf",
            "seasmean_msl",
            "seasmean_totalwind",
            "zonalmean_t",
            "zonalmean_wind",
            "polar_vortex",
            "QBO",
            "jet",
            "mw_jet",
            "SSW",
        ];

        for token in tokens.iter() {
            let diagnostic: Diagnostic = token.parse().unwrap();
            assert_eq!(diagnostic.to_string(), *token);
        }
    }

    #[test]
    fn test_rejects_unknown_tokens() {
        let tokens = ["", "glomean", "glomean_", "zonalmean_q", "ssw", "jet_nh", "QBO_10", "foo_2t"];
        for token in tokens.iter() {
            assert_eq!(
                token.parse::<Diagnostic>(),
                Err(AnalysisError::UnknownDiagnostic(token.to_string()))
            );
        }
    }

    #[test]
    fn test_only_means_take_variables() {
        let with_var: Vec<DiagnosticKind> =
            DiagnosticKind::iter().filter(|k| k.takes_variable()).collect();
        assert_eq!(
            with_var,
            vec![
                DiagnosticKind::GlobalMean,
                DiagnosticKind::SeasonalMean,
                DiagnosticKind::ZonalMean
            ]
        );
    }
}
