//! Python bindings for the table FFT

use pyo3::prelude::*;
use numpy::{PyArray2, PyReadonlyArray1, ToPyArray};
use crate::spectrum::{FftConfig, TableFft};
use crate::table::{Column, ColumnValues, Table};
use super::window_bindings::PyWindowFunction;

/// Table FFT exposed to Python
///
/// Tables are passed as lists of (name, 1-D array) pairs.
#[pyclass(name = "TableFft", unsendable)]
pub struct PyTableFft {
    engine: TableFft,
    config: FftConfig,
}

#[pymethods]
impl PyTableFft {
    /// Create a new table FFT
    ///
    /// Args:
    ///     windowing_function: Window applied to each block
    ///     average_fft: Average the spectra of several blocks
    ///     block_size: Samples per block (rounded up to a power of 2)
    ///     number_of_blocks: Blocks to average
    ///     normalize: Output a scaled power spectrum instead of (re, im) pairs
    ///     optimize_for_real_input: Only keep non-negative frequencies
    ///     create_frequency_column: Append a "Frequency" column
    ///     default_sample_rate: Sample rate when there is no "time" column
    #[new]
    #[pyo3(signature = (
        windowing_function=PyWindowFunction::Rectangular,
        average_fft=false,
        block_size=1024,
        number_of_blocks=2,
        normalize=false,
        optimize_for_real_input=false,
        create_frequency_column=false,
        default_sample_rate=1.0e4
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        windowing_function: PyWindowFunction,
        average_fft: bool,
        block_size: usize,
        number_of_blocks: usize,
        normalize: bool,
        optimize_for_real_input: bool,
        create_frequency_column: bool,
        default_sample_rate: f64,
    ) -> Self {
        let mut config = FftConfig::default();
        config.set_windowing_function(windowing_function.into());
        config.set_average_fft(average_fft);
        config.set_block_size(block_size);
        config.set_number_of_blocks(number_of_blocks);
        config.set_normalize(normalize);
        config.set_optimize_for_real_input(optimize_for_real_input);
        config.set_create_frequency_column(create_frequency_column);
        config.set_default_sample_rate(default_sample_rate);

        Self {
            engine: TableFft::new(),
            config,
        }
    }

    /// Transform a table
    ///
    /// Args:
    ///     columns: List of (name, values) pairs, all the same length
    ///
    /// Returns:
    ///     List of (name, 2-D array of shape (rows, components)) pairs
    fn transform<'py>(
        &mut self,
        py: Python<'py>,
        columns: Vec<(String, PyReadonlyArray1<'py, f64>)>,
    ) -> PyResult<Vec<(String, &'py PyArray2<f64>)>> {
        let mut table = Table::new();
        for (name, values) in columns {
            table.add_column(Column::scalar(name, values.as_array().to_vec()))?;
        }

        let output = self.engine.transform(&self.config, &table)?;

        Ok(output
            .columns()
            .iter()
            .filter_map(|column| match column.values() {
                ColumnValues::Numeric(data) => {
                    Some((column.name().to_string(), data.to_pyarray(py)))
                }
                _ => None,
            })
            .collect())
    }

    /// Update configuration
    ///
    /// Only the given options change; window-affecting ones invalidate the
    /// cached window.
    #[pyo3(signature = (
        windowing_function=None,
        average_fft=None,
        block_size=None,
        number_of_blocks=None,
        normalize=None,
        optimize_for_real_input=None,
        create_frequency_column=None,
        default_sample_rate=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn update_config(
        &mut self,
        windowing_function: Option<PyWindowFunction>,
        average_fft: Option<bool>,
        block_size: Option<usize>,
        number_of_blocks: Option<usize>,
        normalize: Option<bool>,
        optimize_for_real_input: Option<bool>,
        create_frequency_column: Option<bool>,
        default_sample_rate: Option<f64>,
    ) {
        if let Some(win) = windowing_function {
            self.config.set_windowing_function(win.into());
        }
        if let Some(avg) = average_fft {
            self.config.set_average_fft(avg);
        }
        if let Some(size) = block_size {
            self.config.set_block_size(size);
        }
        if let Some(blocks) = number_of_blocks {
            self.config.set_number_of_blocks(blocks);
        }
        if let Some(norm) = normalize {
            self.config.set_normalize(norm);
        }
        if let Some(opt) = optimize_for_real_input {
            self.config.set_optimize_for_real_input(opt);
        }
        if let Some(freq) = create_frequency_column {
            self.config.set_create_frequency_column(freq);
        }
        if let Some(sr) = default_sample_rate {
            self.config.set_default_sample_rate(sr);
        }
    }

    /// Select the windowing function by index (clamped to the valid range)
    fn set_windowing_function_index(&mut self, index: i64) {
        self.config.set_windowing_function_index(index);
    }

    /// Current windowing function
    fn get_windowing_function(&self) -> PyWindowFunction {
        self.config.windowing_function().into()
    }

    /// Sample rate of the last transformed table
    fn get_sample_rate(&self) -> f64 {
        self.engine.last_report().sample_rate
    }

    /// Rows of the transformed columns in the last call
    fn get_output_rows(&self) -> usize {
        self.engine.last_report().output_rows
    }

    /// Warnings raised by the last call
    fn get_warnings(&self) -> Vec<String> {
        self.engine
            .last_report()
            .warnings
            .iter()
            .map(|w| w.to_string())
            .collect()
    }

    /// Number of times the window kernel has been generated
    fn window_rebuilds(&self) -> u64 {
        self.engine.window_rebuilds()
    }

    fn __repr__(&self) -> String {
        format!("TableFft(\n{}\n)", self.config)
    }
}
