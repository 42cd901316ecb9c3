//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use crate::error::TableFftError;

mod table_fft_bindings;
mod window_bindings;

impl From<TableFftError> for PyErr {
    fn from(err: TableFftError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn table_fft(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<table_fft_bindings::PyTableFft>()?;

    // Add WindowFunction enum
    m.add_class::<window_bindings::PyWindowFunction>()?;
    m.add_function(wrap_pyfunction!(window_bindings::window, m)?)?;

    Ok(())
}
