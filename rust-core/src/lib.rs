//! Table FFT - spectral analysis of tabular time series
//!
//! Converts every numeric column of a table of time samples into its
//! frequency-domain representation, with windowing, block averaging and
//! power-spectrum normalization. Optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod spectrum;
pub mod table;
pub mod window;
#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, TableFftError};
pub use spectrum::{FftConfig, TableFft, TransformReport, TransformWarning};
pub use table::{Column, ColumnValues, Table};
pub use window::{Window, WindowFunction};
