use exact_sim::{EnumerationConfig, EnumerationError, ModelParams};
use numpy::ndarray::Array1;
use numpy::{IntoPyArray, PyReadonlyArray1};
use pyo3::exceptions::{PyKeyboardInterrupt, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::driver;

fn to_py_err(err: EnumerationError) -> PyErr {
    match err {
        EnumerationError::Interrupted => PyKeyboardInterrupt::new_err("interrupted"),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn enumeration_config(n_rows: usize, n_cols: usize, max_sites: Option<usize>) -> EnumerationConfig {
    EnumerationConfig::new(n_rows, n_cols)
        .with_max_sites(max_sites.unwrap_or(exact_sim::DEFAULT_MAX_SITES))
}

/// Exact partition function of the periodic n_rows x n_cols Ising model.
///
/// Arguments:
///   coupling: exchange coupling J
///   field: external field h
///   beta: inverse temperature
///   max_sites: enumeration ceiling (default 30)
#[pyfunction]
#[pyo3(signature = (coupling, field, beta, n_rows, n_cols, max_sites=None))]
fn partition_function(
    py: Python<'_>,
    coupling: f64,
    field: f64,
    beta: f64,
    n_rows: usize,
    n_cols: usize,
    max_sites: Option<usize>,
) -> PyResult<f64> {
    let config = enumeration_config(n_rows, n_cols, max_sites);
    let params = ModelParams::new(coupling, field);
    py.allow_threads(|| exact_sim::partition_function(&config, &params, beta))
        .map_err(to_py_err)
}

/// Exact observables over a temperature ladder, from one enumeration pass.
///
/// Arguments:
///   lattice_shape: (n_rows, n_cols)
///   temperatures: numpy array of shape (n_temps,), float64
///
/// Returns: dict with keys "partition_functions", "energies", "energies2",
///   "mags", "mags_abs", "mags2", "mags4", "free_energy", "specific_heat",
///   "susceptibility", "binder". Each is a numpy array of shape (n_temps,).
#[pyfunction]
#[pyo3(signature = (lattice_shape, coupling, field, temperatures, max_sites=None))]
fn exact_observables<'py>(
    py: Python<'py>,
    lattice_shape: (usize, usize),
    coupling: f64,
    field: f64,
    temperatures: PyReadonlyArray1<f64>,
    max_sites: Option<usize>,
) -> PyResult<Bound<'py, PyDict>> {
    let betas =
        driver::betas_from_temperatures(temperatures.as_slice()?).map_err(PyValueError::new_err)?;
    let config = enumeration_config(lattice_shape.0, lattice_shape.1, max_sites);
    let params = ModelParams::new(coupling, field);

    let should_stop = || Python::with_gil(|py| py.check_signals().is_err());
    let result =
        driver::run_with_progress(&config, &params, &betas, &should_stop).map_err(to_py_err)?;

    let dict = PyDict::new(py);
    let derived = [
        ("free_energy", result.free_energy()),
        ("specific_heat", result.specific_heat()),
        ("susceptibility", result.susceptibility()),
        ("binder", result.binder_cumulant()),
    ];
    let moments = [
        ("partition_functions", result.partition_functions),
        ("energies", result.energies),
        ("energies2", result.energies2),
        ("mags", result.mags),
        ("mags_abs", result.mags_abs),
        ("mags2", result.mags2),
        ("mags4", result.mags4),
    ];
    for (key, values) in moments.into_iter().chain(derived) {
        dict.set_item(key, Array1::from(values).into_pyarray(py))?;
    }

    Ok(dict)
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(partition_function, m)?)?;
    m.add_function(wrap_pyfunction!(exact_observables, m)?)?;
    Ok(())
}
