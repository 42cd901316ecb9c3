//! Table FFT engine
//!
//! Converts every eligible time-domain column of a table into its spectrum,
//! optionally averaging the spectra of several blocks (Welch-style) and
//! normalizing the result to a power spectrum.

use super::config::FftConfig;
use super::fft::{fft_freq, rfft_freq, FftKernel};
use crate::error::{Result, TableFftError};
use crate::table::{Column, ColumnValues, Table};
use crate::window::{Window, WindowCache, WindowFunction};
use ndarray::{Array2, ArrayView1};
use num_complex::Complex64;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Name of the column holding sample timestamps (matched ignoring case)
pub const TIME_COLUMN: &str = "time";

/// Name of the synthesized frequency axis column
pub const FREQUENCY_COLUMN: &str = "Frequency";

/// Prefix prepended to the name of every transformed column
pub const FFT_PREFIX: &str = "FFT_";

/// Columns whose name starts with this prefix are internal and never transformed
pub const RESERVED_PREFIX: &str = "vtk";

/// Recoverable conditions met while transforming a table
#[derive(Debug, Clone, PartialEq)]
pub enum TransformWarning {
    /// The input table has no rows; the output is empty
    EmptyInput,

    /// Block averaging was requested but the blocks do not fit in the input
    AveragingDisabled {
        /// Requested block size, before power-of-two rounding
        block_size: usize,
        rows: usize,
        blocks: usize,
    },

    /// The first time step gives no usable sample rate
    DegenerateTimeStep { delta: f64 },
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformWarning::EmptyInput => write!(f, "input table has no rows"),
            TransformWarning::AveragingDisabled {
                block_size,
                rows,
                blocks,
            } => write!(
                f,
                "cannot average {blocks} blocks of {block_size} samples over {rows} rows, \
                 computing FFT on the whole input"
            ),
            TransformWarning::DegenerateTimeStep { delta } => {
                write!(f, "time step {delta} gives no sample rate, using the default")
            }
        }
    }
}

/// State derived for the last transformed table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformReport {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Samples per FFT (window length)
    pub analysis_len: usize,

    /// Rows of the transformed columns
    pub output_rows: usize,

    /// Whether the spectra of several blocks were averaged
    pub averaged: bool,

    /// Number of blocks per column
    pub blocks: usize,

    pub warnings: Vec<TransformWarning>,
}

/// Spectral transform of tables
///
/// Owns the window cache, so the same engine applied to similar tables with an
/// unchanged configuration reuses its window. Not meant to be shared between
/// threads without external locking.
pub struct TableFft {
    window: WindowCache,
    kernel: FftKernel,
    report: TransformReport,
}

impl TableFft {
    pub fn new() -> Self {
        Self {
            window: WindowCache::new(),
            kernel: FftKernel::new(),
            report: TransformReport::default(),
        }
    }

    /// Transform `input` into a new frequency-domain table
    pub fn transform(&mut self, config: &FftConfig, input: &Table) -> Result<Table> {
        let mut output = Table::new();
        self.run(config, input, &mut output)?;
        Ok(output)
    }

    /// Pipeline entry point: fill `output` from `input`
    ///
    /// Both containers must be present; `output` is cleared before use.
    pub fn request_data(
        &mut self,
        config: &FftConfig,
        input: Option<&Table>,
        output: Option<&mut Table>,
    ) -> Result<()> {
        let (input, output) = match (input, output) {
            (Some(input), Some(output)) => (input, output),
            (input, _) => {
                warn!("No input or output.");
                return Err(if input.is_none() {
                    TableFftError::MissingInput
                } else {
                    TableFftError::MissingOutput
                });
            }
        };

        output.clear();
        self.run(config, input, output)
    }

    /// Derived state of the last call
    pub fn last_report(&self) -> &TransformReport {
        &self.report
    }

    /// Window used by the last call
    pub fn window(&self) -> Option<&Window> {
        self.window.window()
    }

    /// Number of times the window has been generated
    pub fn window_rebuilds(&self) -> u64 {
        self.window.rebuild_count()
    }

    fn run(&mut self, config: &FftConfig, input: &Table, output: &mut Table) -> Result<()> {
        self.report = TransformReport::default();

        if input.row_count() == 0 {
            warn!("input table has no rows");
            self.report.warnings.push(TransformWarning::EmptyInput);
            return Ok(());
        }

        self.initialize(config, input);

        let window = self.window.ensure(
            config.windowing_function(),
            self.report.analysis_len,
            config.window_stamp(),
        );
        let report = &self.report;

        for column in input.columns() {
            let name = column.name();

            if name.eq_ignore_ascii_case(TIME_COLUMN) {
                trace!(column = name, "dropping time column");
                continue;
            }

            match column.first_component() {
                Some(values) if is_transformable(column) => {
                    trace!(column = name, "transforming");
                    let spectrum = do_fft(&mut self.kernel, window, config, report, values)?;
                    output.push_unchecked(Arc::new(spectrum.into_column(
                        format!("{FFT_PREFIX}{name}"),
                        window,
                        config,
                        report,
                    )));
                }
                _ if config.optimize_for_real_input() => {
                    trace!(column = name, rows = report.output_rows, "truncating passthrough");
                    output.push_unchecked(Arc::new(column.truncated(report.output_rows)));
                }
                _ => {
                    trace!(column = name, "passthrough");
                    output.push_unchecked(Arc::clone(column));
                }
            }
        }

        if config.create_frequency_column() {
            let spacing = 1.0 / report.sample_rate;
            let freqs = if config.optimize_for_real_input() {
                rfft_freq(window.len(), spacing)
            } else {
                fft_freq(window.len(), spacing)
            };
            output.push_unchecked(Arc::new(Column::scalar(FREQUENCY_COLUMN, freqs)));
        }

        Ok(())
    }

    /// Resolve sample rate, analysis length and output size for `input`
    fn initialize(&mut self, config: &FftConfig, input: &Table) {
        let report = &mut self.report;
        let rows = input.row_count();

        report.sample_rate = config.default_sample_rate();
        let first_step = input
            .column_by_name_ci(TIME_COLUMN)
            .and_then(|time| Some((time.value(0, 0)?, time.value(1, 0)?)));
        if let Some((t0, t1)) = first_step {
            let delta = t1 - t0;
            let rate = 1.0 / delta;
            if rate.is_finite() {
                report.sample_rate = rate;
            } else {
                warn!(delta, "time step gives no sample rate, using the default");
                report.warnings.push(TransformWarning::DegenerateTimeStep { delta });
            }
        }

        report.analysis_len = rows;
        report.averaged = config.average_fft();
        if report.averaged {
            let block_size = config.block_size();
            let blocks = config.number_of_blocks();
            match config.resolved_block_size() {
                Some(resolved) if resolved <= rows.saturating_sub(blocks) => {
                    report.analysis_len = resolved;
                }
                _ => {
                    warn!(
                        block_size,
                        rows,
                        blocks,
                        "Cannot average FFT per block: block size is too large compared to the input. \
                         Computing FFT on the whole input."
                    );
                    report.warnings.push(TransformWarning::AveragingDisabled {
                        block_size,
                        rows,
                        blocks,
                    });
                    report.averaged = false;
                }
            }
        }

        report.blocks = if report.averaged {
            config.number_of_blocks().max(1)
        } else {
            1
        };
        report.output_rows = if config.optimize_for_real_input() {
            report.analysis_len / 2 + 1
        } else {
            report.analysis_len
        };

        debug!(
            sample_rate = report.sample_rate,
            analysis_len = report.analysis_len,
            output_rows = report.output_rows,
            blocks = report.blocks,
            "table FFT initialized"
        );
    }
}

impl Default for TableFft {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-component numeric columns that are neither identifiers nor reserved
fn is_transformable(column: &Column) -> bool {
    column.is_numeric()
        && !column.is_identifier()
        && column.components() == 1
        && !column.name().starts_with(RESERVED_PREFIX)
}

/// Block-averaged complex spectrum of one column
struct Spectrum(Vec<Complex64>);

/// Spectrum of `values`, averaged over `report.blocks` evenly spaced blocks
fn do_fft(
    kernel: &mut FftKernel,
    window: &Window,
    config: &FftConfig,
    report: &TransformReport,
    values: ArrayView1<'_, f64>,
) -> Result<Spectrum> {
    let nvalues = values.len();
    let nfft = window.len();
    let nblocks = report.blocks;
    let block_coef = 1.0 / nblocks as f64;

    // Truncating division: the last block may stop short of the final sample
    let stride = if nblocks <= 1 {
        0
    } else {
        nvalues.saturating_sub(nfft + 1) / (nblocks - 1)
    };

    // Mean removal follows `normalize` only, never the window choice
    let taper = config.normalize() || window.function() != WindowFunction::Rectangular;

    let mut block = vec![0.0; nfft];
    let mut accumulated = vec![Complex64::new(0.0, 0.0); report.output_rows];

    for b in 0..nblocks {
        let start = b * stride;
        for (dst, &src) in block.iter_mut().zip(values.iter().skip(start)) {
            *dst = src;
        }

        if taper {
            let mean = if config.normalize() {
                block.iter().sum::<f64>() / nfft as f64
            } else {
                0.0
            };
            for (sample, &w) in block.iter_mut().zip(window.samples()) {
                *sample = (*sample - mean) * w;
            }
        }

        let bins = if config.optimize_for_real_input() {
            kernel.rfft(&block)?
        } else {
            kernel.fft(&block)
        };
        for (acc, bin) in accumulated.iter_mut().zip(bins) {
            *acc += bin * block_coef;
        }
    }

    Ok(Spectrum(accumulated))
}

impl Spectrum {
    /// Scaled magnitude column when normalizing, raw (re, im) pairs otherwise
    fn into_column(
        self,
        name: String,
        window: &Window,
        config: &FftConfig,
        report: &TransformReport,
    ) -> Column {
        let bins = self.0;

        if config.normalize() {
            let norm = 1.0 / (window.ponderation() * window.len() as f64 * report.sample_rate);
            // Bins above DC also carry the energy of their negative twin
            let magnitude = bins
                .iter()
                .enumerate()
                .map(|(i, bin)| {
                    if i == 0 {
                        bin.norm() * norm
                    } else {
                        bin.norm() * 2.0 * norm
                    }
                })
                .collect();
            Column::scalar(name, magnitude)
        } else {
            let mut pairs = Array2::zeros((bins.len(), 2));
            for (mut row, bin) in pairs.rows_mut().into_iter().zip(&bins) {
                row[0] = bin.re;
                row[1] = bin.im;
            }
            Column::new(name, ColumnValues::Numeric(pairs))
        }
    }
}
