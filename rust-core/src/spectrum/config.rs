//! Table FFT configuration
//!
//! Options that shape the analysis window carry a modification stamp so the
//! engine can tell whether its cached window is still valid.

use crate::window::WindowFunction;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide modification counter
static MODIFIED: AtomicU64 = AtomicU64::new(0);

/// Next value of the process-wide modification counter (strictly increasing)
pub fn next_stamp() -> u64 {
    MODIFIED.fetch_add(1, Ordering::Relaxed) + 1
}

/// Table FFT configuration
#[derive(Debug, Clone)]
pub struct FftConfig {
    /// Window applied to every block before its FFT
    windowing_function: WindowFunction,

    /// Split each column into blocks and average their spectra
    average_fft: bool,

    /// Requested samples per block (rounded up to a power of two)
    block_size: usize,

    /// Number of blocks to average
    number_of_blocks: usize,

    /// Output a scaled power spectrum instead of raw complex bins
    normalize: bool,

    /// Only keep non-negative frequencies
    optimize_for_real_input: bool,

    /// Append a "Frequency" column to the output
    create_frequency_column: bool,

    /// Sample rate used when the table has no usable time column
    default_sample_rate: f64,

    /// Last modification of a window-affecting option
    window_stamp: u64,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self {
            windowing_function: WindowFunction::Rectangular,
            average_fft: false,
            block_size: 1024,
            number_of_blocks: 2,
            normalize: false,
            optimize_for_real_input: false,
            create_frequency_column: false,
            default_sample_rate: 1.0e4,
            window_stamp: next_stamp(),
        }
    }
}

impl FftConfig {
    pub fn new() -> Self {
        Self::default()
    }

    fn window_modified(&mut self) {
        self.window_stamp = next_stamp();
    }

    pub fn windowing_function(&self) -> WindowFunction {
        self.windowing_function
    }

    pub fn set_windowing_function(&mut self, function: WindowFunction) {
        if self.windowing_function != function {
            self.windowing_function = function;
            self.window_modified();
        }
    }

    /// Select the windowing function by index, clamping to the valid range
    pub fn set_windowing_function_index(&mut self, index: i64) {
        self.set_windowing_function(WindowFunction::from_index(index));
    }

    pub fn average_fft(&self) -> bool {
        self.average_fft
    }

    pub fn set_average_fft(&mut self, average: bool) {
        if self.average_fft != average {
            self.average_fft = average;
            self.window_modified();
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn set_block_size(&mut self, block_size: usize) {
        if self.block_size != block_size {
            self.block_size = block_size;
            self.window_modified();
        }
    }

    /// Block size rounded up to the nearest power of two, `None` when that
    /// power of two does not fit in a `usize`
    pub fn resolved_block_size(&self) -> Option<usize> {
        self.block_size.checked_next_power_of_two()
    }

    pub fn number_of_blocks(&self) -> usize {
        self.number_of_blocks
    }

    pub fn set_number_of_blocks(&mut self, blocks: usize) {
        self.number_of_blocks = blocks;
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn set_normalize(&mut self, normalize: bool) {
        self.normalize = normalize;
    }

    pub fn optimize_for_real_input(&self) -> bool {
        self.optimize_for_real_input
    }

    pub fn set_optimize_for_real_input(&mut self, optimize: bool) {
        self.optimize_for_real_input = optimize;
    }

    pub fn create_frequency_column(&self) -> bool {
        self.create_frequency_column
    }

    pub fn set_create_frequency_column(&mut self, create: bool) {
        self.create_frequency_column = create;
    }

    pub fn default_sample_rate(&self) -> f64 {
        self.default_sample_rate
    }

    pub fn set_default_sample_rate(&mut self, sample_rate: f64) {
        self.default_sample_rate = sample_rate;
    }

    /// Stamp of the last change to an option that affects the window
    pub fn window_stamp(&self) -> u64 {
        self.window_stamp
    }
}

impl fmt::Display for FftConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WindowingFunction: {}", self.windowing_function.name())?;
        writeln!(f, "AverageFft: {}", self.average_fft)?;
        writeln!(f, "BlockSize: {}", self.block_size)?;
        writeln!(f, "NumberOfBlock: {}", self.number_of_blocks)?;
        writeln!(f, "Normalize: {}", self.normalize)?;
        writeln!(f, "OptimizeForRealInput: {}", self.optimize_for_real_input)?;
        writeln!(f, "CreateFrequencyColumn: {}", self.create_frequency_column)?;
        write!(f, "DefaultSampleRate: {}", self.default_sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FftConfig::default();
        assert_eq!(config.windowing_function(), WindowFunction::Rectangular);
        assert!(!config.average_fft());
        assert_eq!(config.block_size(), 1024);
        assert_eq!(config.number_of_blocks(), 2);
        assert!(!config.normalize());
        assert!(!config.optimize_for_real_input());
        assert!(!config.create_frequency_column());
        assert_eq!(config.default_sample_rate(), 1.0e4);
    }

    #[test]
    fn test_window_options_bump_stamp() {
        let mut config = FftConfig::default();

        let stamp = config.window_stamp();
        config.set_windowing_function(WindowFunction::Hanning);
        assert!(config.window_stamp() > stamp);

        let stamp = config.window_stamp();
        config.set_block_size(300);
        assert!(config.window_stamp() > stamp);

        let stamp = config.window_stamp();
        config.set_average_fft(true);
        assert!(config.window_stamp() > stamp);
    }

    #[test]
    fn test_unchanged_values_keep_stamp() {
        let mut config = FftConfig::default();
        let stamp = config.window_stamp();

        config.set_windowing_function(WindowFunction::Rectangular);
        config.set_block_size(1024);
        config.set_average_fft(false);
        config.set_normalize(true);
        config.set_number_of_blocks(8);
        config.set_default_sample_rate(44100.0);

        assert_eq!(config.window_stamp(), stamp);
    }

    #[test]
    fn test_windowing_index_is_clamped() {
        let mut config = FftConfig::default();

        config.set_windowing_function_index(-1);
        assert_eq!(config.windowing_function(), WindowFunction::Hanning);

        config.set_windowing_function_index(42);
        assert_eq!(config.windowing_function(), WindowFunction::Rectangular);

        config.set_windowing_function_index(3);
        assert_eq!(config.windowing_function(), WindowFunction::Blackman);
    }

    #[test]
    fn test_block_size_rounding() {
        let mut config = FftConfig::default();

        config.set_block_size(300);
        assert_eq!(config.resolved_block_size(), Some(512));

        config.set_block_size(256);
        assert_eq!(config.resolved_block_size(), Some(256));

        config.set_block_size(0);
        assert_eq!(config.resolved_block_size(), Some(1));

        config.set_block_size((1usize << (usize::BITS - 1)) + 1);
        assert_eq!(config.resolved_block_size(), None);
    }

    #[test]
    fn test_display_lists_options() {
        let text = FftConfig::default().to_string();
        assert!(text.contains("WindowingFunction: Rectangular"));
        assert!(text.contains("BlockSize: 1024"));
        assert!(text.contains("DefaultSampleRate: 10000"));
    }
}
