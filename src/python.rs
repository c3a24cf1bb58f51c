use isofrac_core::errors::IsoFracError;
use isofrac_core::species::{BySpecies, IsotopeSpecies};
use isofrac_core::FloatValue;
use isofrac_model::final_site::SnowfallSummary;
use isofrac_model::fractionation::EffectiveFractionation;
use isofrac_model::parameters::{FractionationParameters, ModelParameters};
use isofrac_model::state::{AirParcelState, SurfaceState};
use isofrac_model::IsotopeModel;
use numpy::ToPyArray;
use pyo3::exceptions::{PyArithmeticError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyString};
use serde::Serialize;

fn to_py_err(error: IsoFracError) -> PyErr {
    if error.is_numerical() {
        PyArithmeticError::new_err(error.to_string())
    } else {
        PyValueError::new_err(error.to_string())
    }
}

/// Scalar results passed back to Python as plain dicts
#[derive(Serialize)]
struct RunSummary<'a> {
    effective_humidity: FloatValue,
    initial: &'a AirParcelState,
    arriving: &'a AirParcelState,
    snowfall: &'a SnowfallSummary,
    sublimated_humidity: FloatValue,
    initial_surface: &'a BySpecies<SurfaceState>,
    surface: &'a BySpecies<SurfaceState>,
}

fn parse_parameters(parameters: Option<Bound<'_, PyAny>>) -> PyResult<ModelParameters> {
    match parameters {
        None => Ok(ModelParameters::default()),
        Some(obj) if obj.is_instance_of::<PyString>() => {
            let content: String = obj.extract()?;
            ModelParameters::from_toml_str(&content).map_err(to_py_err)
        }
        Some(obj) => pythonize::depythonize_bound::<ModelParameters>(obj)
            .map_err(|e| PyValueError::new_err(format!("{}", e))),
    }
}

/// Run the model for one parameter set.
///
/// `parameters` is either a TOML document or a dict with the same layout.
/// Returns a dict with the transport trajectory as numpy arrays and the
/// remaining results as nested dicts.
#[pyfunction]
#[pyo3(signature = (parameters=None))]
fn run_model<'py>(
    py: Python<'py>,
    parameters: Option<Bound<'py, PyAny>>,
) -> PyResult<Bound<'py, PyDict>> {
    let parameters = parse_parameters(parameters)?;
    let model = IsotopeModel::from_parameters(parameters).map_err(to_py_err)?;
    let output = py.allow_threads(|| model.run()).map_err(to_py_err)?;

    let result = PyDict::new_bound(py);
    result.set_item(
        "temperature",
        output.trajectory.temperature.to_pyarray_bound(py),
    )?;
    result.set_item("humidity", output.trajectory.humidity.to_pyarray_bound(py))?;
    for (species, delta) in output.trajectory.delta.iter() {
        result.set_item(format!("delta_{species}"), delta.to_pyarray_bound(py))?;
    }

    let summary = RunSummary {
        effective_humidity: output.effective_humidity,
        initial: &output.initial,
        arriving: &output.arriving,
        snowfall: &output.final_site.snowfall,
        sublimated_humidity: output.final_site.sublimated_humidity,
        initial_surface: &output.final_site.initial_surface,
        surface: &output.final_site.surface,
    };
    let summary = pythonize::pythonize(py, &summary)
        .map_err(|e| PyValueError::new_err(format!("{}", e)))?;
    result.set_item("summary", summary)?;
    Ok(result)
}

/// Effective condensation fractionation factor at `temperature` (°C).
#[pyfunction]
#[pyo3(signature = (temperature, species, ice_kinetics=true))]
fn effective_alpha(
    temperature: FloatValue,
    species: &str,
    ice_kinetics: bool,
) -> PyResult<FloatValue> {
    let species = match species {
        "H218O" | "H2O18" | "18O" => IsotopeSpecies::H2O18,
        "HDO" | "D" => IsotopeSpecies::HDO,
        other => {
            return Err(PyValueError::new_err(format!(
                "Unknown isotope species: {other}. Expected H218O or HDO."
            )))
        }
    };
    let fractionation = EffectiveFractionation::from_parameters(FractionationParameters {
        ice_kinetics,
        ..Default::default()
    })
    .map_err(to_py_err)?;
    fractionation.alpha(temperature, species).map_err(to_py_err)
}

#[pymodule]
#[pyo3(name = "_lib")]
fn isofrac(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(run_model, m)?)?;
    m.add_function(wrap_pyfunction!(effective_alpha, m)?)?;
    Ok(())
}
