//! Error types for the table FFT pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableFftError {
    #[error("No input table")]
    MissingInput,

    #[error("No output table")]
    MissingOutput,

    #[error("Column '{column}' has {found} rows, table has {expected}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' has {len} values, not a multiple of {components} components")]
    ComponentMismatch {
        column: String,
        len: usize,
        components: usize,
    },

    #[error("FFT kernel failed: {0}")]
    Kernel(#[from] realfft::FftError),
}

pub type Result<T> = std::result::Result<T, TableFftError>;
