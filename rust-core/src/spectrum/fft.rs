//! FFT kernel using realfft for real-valued blocks and rustfft for the full
//! spectrum
//!
//! Plans are cached by the planners, so repeated blocks of the same length
//! reuse the same transform.

use crate::error::Result;
use num_complex::Complex64;
use realfft::RealFftPlanner;
use rustfft::FftPlanner;

/// Forward FFT of real-valued blocks
pub struct FftKernel {
    /// Real-to-complex planner (half spectrum)
    real_planner: RealFftPlanner<f64>,

    /// Complex planner (full spectrum)
    complex_planner: FftPlanner<f64>,

    /// Reusable input buffer (realfft uses its input as scratch)
    input_buffer: Vec<f64>,
}

impl FftKernel {
    pub fn new() -> Self {
        Self {
            real_planner: RealFftPlanner::new(),
            complex_planner: FftPlanner::new(),
            input_buffer: Vec::new(),
        }
    }

    /// Non-negative frequency bins of a real signal
    ///
    /// # Returns
    /// `signal.len() / 2 + 1` complex bins
    pub fn rfft(&mut self, signal: &[f64]) -> Result<Vec<Complex64>> {
        let r2c = self.real_planner.plan_fft_forward(signal.len());

        self.input_buffer.clear();
        self.input_buffer.extend_from_slice(signal);

        let mut spectrum = r2c.make_output_vec();
        r2c.process(&mut self.input_buffer, &mut spectrum)?;

        Ok(spectrum)
    }

    /// Full spectrum of a real signal
    ///
    /// # Returns
    /// `signal.len()` complex bins, standard FFT ordering
    pub fn fft(&mut self, signal: &[f64]) -> Vec<Complex64> {
        let fft = self.complex_planner.plan_fft_forward(signal.len());

        let mut buffer: Vec<Complex64> = signal
            .iter()
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        fft.process(&mut buffer);

        buffer
    }
}

impl Default for FftKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Bin centers of [`FftKernel::rfft`] output
///
/// # Arguments
/// * `length` - Number of samples fed to the transform
/// * `spacing` - Time between samples (1 / sample rate)
pub fn rfft_freq(length: usize, spacing: f64) -> Vec<f64> {
    let step = 1.0 / (length as f64 * spacing);
    (0..=length / 2).map(|i| i as f64 * step).collect()
}

/// Bin centers of [`FftKernel::fft`] output: non-negative frequencies first,
/// then the negative ones in increasing order
pub fn fft_freq(length: usize, spacing: f64) -> Vec<f64> {
    let step = 1.0 / (length as f64 * spacing);
    let positive = (length + 1) / 2;

    let mut freqs = Vec::with_capacity(length);
    freqs.extend((0..positive).map(|i| i as f64 * step));
    freqs.extend((positive..length).map(|i| -((length - i) as f64) * step));
    freqs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut kernel = FftKernel::new();

        let signal = vec![1.0; 100];
        let spectrum = kernel.rfft(&signal).unwrap();

        assert_eq!(spectrum.len(), 51);
        assert!((spectrum[0].re - 100.0).abs() < 1e-9);
        assert!(spectrum[10].norm() < 1e-9);
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut kernel = FftKernel::new();

        // 64 cycles over 1024 samples
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 64.0 * n as f64 / 1024.0).sin())
            .collect();

        let spectrum = kernel.rfft(&signal).unwrap();
        let (peak_bin, peak) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().partial_cmp(&b.norm()).unwrap())
            .unwrap();

        assert_eq!(peak_bin, 64);
        // N/2 for a unit sine on an exact bin
        assert!((peak.norm() - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_real_and_full_spectrum_agree() {
        let mut kernel = FftKernel::new();
        let signal: Vec<f64> = (0..37).map(|n| ((n * n) % 11) as f64 - 3.0).collect();

        let half = kernel.rfft(&signal).unwrap();
        let full = kernel.fft(&signal);

        assert_eq!(half.len(), 19);
        assert_eq!(full.len(), 37);
        for (a, b) in half.iter().zip(full.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
        // Conjugate symmetry of the discarded half
        for k in 1..37 {
            assert!((full[k] - full[37 - k].conj()).norm() < 1e-9);
        }
    }

    #[test]
    fn test_single_sample() {
        let mut kernel = FftKernel::new();
        assert_eq!(kernel.rfft(&[3.0]).unwrap(), vec![Complex64::new(3.0, 0.0)]);
        assert_eq!(kernel.fft(&[3.0]), vec![Complex64::new(3.0, 0.0)]);
    }

    #[test]
    fn test_frequency_axes() {
        let rfreq = rfft_freq(8, 0.1);
        assert_eq!(rfreq.len(), 5);
        assert!((rfreq[4] - 5.0).abs() < 1e-12); // Nyquist

        let even = fft_freq(4, 1.0);
        assert_eq!(even, vec![0.0, 0.25, -0.5, -0.25]);

        let odd = fft_freq(5, 1.0);
        assert_eq!(odd, vec![0.0, 0.2, 0.4, -0.4, -0.2]);
    }
}
