//! End-to-end pipeline from sea-surface evaporation to surface vapour at the
//! deposition site.

use crate::distillation::{DistillationTrajectory, RayleighDistillation, TransportProfile};
use crate::evaporation::InitialCondition;
use crate::final_site::{FinalSiteProcess, FinalSiteResult};
use crate::fractionation::EffectiveFractionation;
use crate::parameters::ModelParameters;
use crate::state::AirParcelState;
use isofrac_core::errors::IsoFracResult;
use isofrac_core::species::IsotopeSpecies;
use isofrac_core::FloatValue;
use log::debug;
use serde::{Deserialize, Serialize};

/// Results of one model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Effective humidity at the sea surface
    pub effective_humidity: FloatValue,
    /// Vapour leaving the moisture source
    pub initial: AirParcelState,
    pub trajectory: DistillationTrajectory,
    /// Vapour arriving at the deposition site
    pub arriving: AirParcelState,
    pub final_site: FinalSiteResult,
}

/// Key deltas (‰) of one species through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub species: IsotopeSpecies,
    pub initial: FloatValue,
    pub arriving: FloatValue,
    pub snow: FloatValue,
    pub surface_before: FloatValue,
    pub surface_after: FloatValue,
}

impl ModelOutput {
    pub fn summary(&self, species: IsotopeSpecies) -> SpeciesSummary {
        SpeciesSummary {
            species,
            initial: self.initial.delta[species],
            arriving: self.arriving.delta[species],
            snow: self.final_site.snowfall.snow_delta[species],
            surface_before: self.final_site.initial_surface[species].delta,
            surface_after: self.final_site.surface[species].delta,
        }
    }
}

/// Source-to-snow isotope model for one parameter set.
///
/// Components are built once from the parameters and hold only immutable
/// coefficient tables, so a model can be run any number of times and shared
/// between threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsotopeModel {
    parameters: ModelParameters,
    initial: InitialCondition,
    distillation: RayleighDistillation,
    final_site: FinalSiteProcess,
}

impl IsotopeModel {
    pub fn from_parameters(parameters: ModelParameters) -> IsoFracResult<Self> {
        let fractionation =
            EffectiveFractionation::from_parameters(parameters.fractionation.clone())?;
        let initial = InitialCondition::from_parameters(
            parameters.evaporation.clone(),
            parameters.fractionation.clone(),
        );
        let final_site = FinalSiteProcess::from_parameters(
            parameters.final_site.clone(),
            fractionation.clone(),
            parameters.evaporation.saturation_formula,
            parameters.evaporation.pressure,
        );
        Ok(Self {
            parameters,
            initial,
            distillation: RayleighDistillation::new(fractionation),
            final_site,
        })
    }

    pub fn from_toml_str(content: &str) -> IsoFracResult<Self> {
        Self::from_parameters(ModelParameters::from_toml_str(content)?)
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    pub fn distillation(&self) -> &RayleighDistillation {
        &self.distillation
    }

    /// Saturated cooling path from `initial` to the deposition site temperature.
    pub fn transport_profile(&self, initial: &AirParcelState) -> IsoFracResult<TransportProfile> {
        let p = &self.parameters;
        TransportProfile::saturated(
            initial,
            p.distillation.final_temperature,
            p.distillation.temperature_step,
            p.evaporation.pressure,
            p.evaporation.saturation_formula,
        )
    }

    /// Run every stage of the pipeline.
    pub fn run(&self) -> IsoFracResult<ModelOutput> {
        let effective_humidity = self.initial.effective_humidity()?;
        let initial = self.initial.solve()?;
        let profile = self.transport_profile(&initial)?;
        let trajectory = self.distillation.run_from(&initial, &profile)?;
        let arriving = trajectory.terminal_state()?;
        let final_site = self.final_site.run(&arriving)?;
        debug!(
            "Model run complete: surface δ18O = {:.2}‰, δD = {:.2}‰",
            final_site.surface.h2o18.delta, final_site.surface.hdo.delta
        );
        Ok(ModelOutput {
            effective_humidity,
            initial,
            trajectory,
            arriving,
            final_site,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> ModelParameters {
        let mut params = ModelParameters::default();
        params.evaporation.relative_humidity = 0.8;
        params.final_site.time_step = 600.0;
        params
    }

    #[test]
    fn test_default_run() {
        let model = IsotopeModel::from_parameters(quick()).unwrap();
        let output = model.run().unwrap();
        assert_eq!(output.trajectory.len(), 81);
        assert_eq!(output.arriving.temperature, -30.0);
        assert_eq!(output.final_site.snowfall.steps, 144);

        for species in IsotopeSpecies::ALL {
            let summary = output.summary(species);
            assert!(summary.arriving < summary.initial);
            assert!(summary.surface_after != summary.surface_before);
        }
    }

    #[test]
    fn test_from_toml() {
        let model = IsotopeModel::from_toml_str(
            r#"
            [distillation]
            final_temperature = -20.0

            [final_site]
            time_step = 3600.0
            "#,
        )
        .unwrap();
        let output = model.run().unwrap();
        assert_eq!(output.arriving.temperature, -20.0);
        assert_eq!(output.final_site.snowfall.steps, 24);
    }

    #[test]
    fn test_summary_serialisation() {
        let model = IsotopeModel::from_parameters(quick()).unwrap();
        let output = model.run().unwrap();
        let json = serde_json::to_value(output.summary(IsotopeSpecies::HDO)).unwrap();
        assert_eq!(json["species"], "HDO");
        assert_eq!(json["snow"], output.final_site.snowfall.snow_delta.hdo);
    }

    #[test]
    fn test_invalid_thresholds_fail_at_construction() {
        let mut params = quick();
        params.fractionation.ice_threshold = 5.0;
        assert!(IsotopeModel::from_parameters(params).unwrap_err().is_domain());
    }
}
