//! Parameters for a complete source-to-snow simulation.

use super::{
    DistillationParameters, EvaporationParameters, FinalSiteParameters, FractionationParameters,
};
use isofrac_core::errors::IsoFracResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All parameters of one sensitivity-experiment point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    pub fractionation: FractionationParameters,
    pub evaporation: EvaporationParameters,
    pub distillation: DistillationParameters,
    pub final_site: FinalSiteParameters,
}

impl ModelParameters {
    /// Parse parameters from a TOML document. Missing values keep their defaults.
    pub fn from_toml_str(content: &str) -> IsoFracResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read parameters from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> IsoFracResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let params = ModelParameters::from_toml_str("").unwrap();
        assert_eq!(params, ModelParameters::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let params = ModelParameters::default();
        let serialised = toml::to_string(&params).unwrap();
        let deserialised = ModelParameters::from_toml_str(&serialised).unwrap();
        assert_eq!(params, deserialised);
    }

    #[test]
    fn test_nested_override() {
        let params = ModelParameters::from_toml_str(
            r#"
            [evaporation]
            sea_temperature = 15.0
            air_temperature = 12.0
            wind_speed = 8.0

            [final_site]
            sublimation_fraction = 0.3

            [final_site.surface]
            delta = { H218O = -20.0, HDO = -150.0 }
            "#,
        )
        .unwrap();
        assert_eq!(params.evaporation.sea_temperature, 15.0);
        assert_eq!(params.evaporation.wind_speed, Some(8.0));
        assert_eq!(params.final_site.sublimation_fraction, 0.3);
        assert_eq!(params.final_site.surface.delta.hdo, -150.0);
        assert_eq!(params.final_site.cloud_base_pressure, 700.0);
    }

    #[test]
    fn test_invalid_document_is_config_error() {
        let err = ModelParameters::from_toml_str("[evaporation]\nsea_temperature = \"warm\"")
            .unwrap_err();
        assert!(matches!(
            err,
            isofrac_core::errors::IsoFracError::Config(_)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ModelParameters::from_path("/nonexistent/isofrac.toml").unwrap_err();
        assert!(matches!(err, isofrac_core::errors::IsoFracError::Io(_)));
    }
}
