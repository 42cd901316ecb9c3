//! Spectral analysis of tables

pub mod config;
pub mod fft;
pub mod table_fft;

pub use config::FftConfig;
pub use fft::{fft_freq, rfft_freq, FftKernel};
pub use table_fft::{TableFft, TransformReport, TransformWarning};
