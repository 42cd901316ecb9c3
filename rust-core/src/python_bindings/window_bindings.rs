//! Python bindings for windowing functions

use pyo3::prelude::*;
use numpy::PyArray1;
use crate::window::{Window, WindowFunction};

/// Windowing function enum exposed to Python
#[pyclass(name = "WindowFunction")]
#[derive(Clone, Copy)]
pub enum PyWindowFunction {
    Hanning,
    Bartlett,
    Sine,
    Blackman,
    Rectangular,
}

impl From<PyWindowFunction> for WindowFunction {
    fn from(py_win: PyWindowFunction) -> Self {
        match py_win {
            PyWindowFunction::Hanning => WindowFunction::Hanning,
            PyWindowFunction::Bartlett => WindowFunction::Bartlett,
            PyWindowFunction::Sine => WindowFunction::Sine,
            PyWindowFunction::Blackman => WindowFunction::Blackman,
            PyWindowFunction::Rectangular => WindowFunction::Rectangular,
        }
    }
}

impl From<WindowFunction> for PyWindowFunction {
    fn from(function: WindowFunction) -> Self {
        match function {
            WindowFunction::Hanning => PyWindowFunction::Hanning,
            WindowFunction::Bartlett => PyWindowFunction::Bartlett,
            WindowFunction::Sine => PyWindowFunction::Sine,
            WindowFunction::Blackman => PyWindowFunction::Blackman,
            WindowFunction::Rectangular => PyWindowFunction::Rectangular,
        }
    }
}

/// Generate a window kernel
///
/// Args:
///     function: Windowing function
///     length: Number of samples
///
/// Returns:
///     Tuple of (coefficients, ponderation)
#[pyfunction]
pub fn window(py: Python<'_>, function: PyWindowFunction, length: usize) -> (&PyArray1<f64>, f64) {
    let window = Window::new(function.into(), length);
    (PyArray1::from_slice(py, window.samples()), window.ponderation())
}
