//! Window kernels applied to a block before its FFT
//!
//! Every kernel is symmetric: the first half is generated and mirrored onto
//! the second half, so `w[n] == w[N-1-n]` holds exactly.

use std::f64::consts::PI;

/// Windowing function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowFunction {
    /// Hanning window: w[n] = 0.5*(1 - cos(2πn/(N-1)))
    Hanning,

    /// Bartlett (triangular) window: w[n] = 2n/(N-1) on the first half
    Bartlett,

    /// Sine window: w[n] = sin(πn/(N-1))
    Sine,

    /// Blackman window: w[n] = 0.42 - 0.5*c + 0.08*(2c² - 1), c = cos(2πn/(N-1))
    Blackman,

    /// Rectangular window (no windowing)
    #[default]
    Rectangular,
}

/// Kernel generator: value of sample `n` for a window of `size` samples
type Generator = fn(usize, usize) -> f64;

impl WindowFunction {
    /// All windowing functions, in index order
    pub const ALL: [WindowFunction; 5] = [
        WindowFunction::Hanning,
        WindowFunction::Bartlett,
        WindowFunction::Sine,
        WindowFunction::Blackman,
        WindowFunction::Rectangular,
    ];

    /// Map an integer index to a windowing function, clamping out-of-range
    /// values to the first or last function
    pub fn from_index(index: i64) -> Self {
        let last = Self::ALL.len() as i64 - 1;
        Self::ALL[index.clamp(0, last) as usize]
    }

    /// Position of this function in [`WindowFunction::ALL`]
    pub fn index(self) -> usize {
        match self {
            WindowFunction::Hanning => 0,
            WindowFunction::Bartlett => 1,
            WindowFunction::Sine => 2,
            WindowFunction::Blackman => 3,
            WindowFunction::Rectangular => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WindowFunction::Hanning => "Hanning",
            WindowFunction::Bartlett => "Bartlett",
            WindowFunction::Sine => "Sine",
            WindowFunction::Blackman => "Blackman",
            WindowFunction::Rectangular => "Rectangular",
        }
    }

    fn generator(self) -> Generator {
        match self {
            WindowFunction::Hanning => hanning,
            WindowFunction::Bartlett => bartlett,
            WindowFunction::Sine => sine,
            WindowFunction::Blackman => blackman,
            WindowFunction::Rectangular => rectangular,
        }
    }
}

fn hanning(n: usize, size: usize) -> f64 {
    0.5 * (1.0 - (2.0 * PI * n as f64 / (size - 1) as f64).cos())
}

fn bartlett(n: usize, size: usize) -> f64 {
    2.0 * n as f64 / (size - 1) as f64
}

fn sine(n: usize, size: usize) -> f64 {
    (PI * n as f64 / (size - 1) as f64).sin()
}

fn blackman(n: usize, size: usize) -> f64 {
    let c = (2.0 * PI * n as f64 / (size - 1) as f64).cos();
    0.42 - 0.5 * c + 0.08 * (2.0 * c * c - 1.0)
}

fn rectangular(_n: usize, _size: usize) -> f64 {
    1.0
}

/// Generate window coefficients
///
/// # Arguments
/// * `function` - Windowing function
/// * `length` - Number of samples (N)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..N-1
pub fn generate_window(function: WindowFunction, length: usize) -> Vec<f64> {
    // A single sample has no extent to taper (and N-1 would be zero)
    if length <= 1 {
        return vec![1.0; length];
    }

    let generator = function.generator();
    let mut window = vec![0.0; length];
    let half = length / 2 + length % 2;
    for n in 0..half {
        let value = generator(n, length);
        window[n] = value;
        window[length - 1 - n] = value;
    }

    window
}

/// Mean energy of a window, used to correct power-spectrum scaling
///
/// Rectangular windows are exactly 1 everywhere, so their ponderation is 1.0
/// without summing.
pub fn ponderation(function: WindowFunction, window: &[f64]) -> f64 {
    if function == WindowFunction::Rectangular || window.is_empty() {
        return 1.0;
    }
    window.iter().map(|&w| w * w).sum::<f64>() / window.len() as f64
}
