//! Lazily rebuilt window kernel
//!
//! The cache is stamped with the configuration version it was built from and
//! is only regenerated when the requested length or function changes, or when
//! the configuration has been modified since the last build.

use super::functions::{generate_window, ponderation, WindowFunction};
use tracing::debug;

/// Window kernel with its normalization energy
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    function: WindowFunction,
    samples: Vec<f64>,
    ponderation: f64,
}

impl Window {
    /// Build a window of `length` samples
    pub fn new(function: WindowFunction, length: usize) -> Self {
        let samples = generate_window(function, length);
        let ponderation = ponderation(function, &samples);
        Self {
            function,
            samples,
            ponderation,
        }
    }

    pub fn function(&self) -> WindowFunction {
        self.function
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Mean of squared window samples (1.0 for rectangular)
    pub fn ponderation(&self) -> f64 {
        self.ponderation
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Version-stamped window cache
#[derive(Debug, Default)]
pub struct WindowCache {
    window: Option<Window>,

    /// Configuration stamp the current window was built at
    built_at: u64,

    /// Number of times a kernel has been generated
    rebuilds: u64,
}

impl WindowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a window valid for (`function`, `length`) at configuration
    /// version `stamp`, regenerating it if needed
    pub fn ensure(&mut self, function: WindowFunction, length: usize, stamp: u64) -> &Window {
        let stale = match &self.window {
            Some(window) => {
                window.len() != length || window.function() != function || self.built_at < stamp
            }
            None => true,
        };

        if stale {
            debug!(
                function = function.name(),
                length,
                stamp,
                "regenerating window kernel"
            );
            self.window = Some(Window::new(function, length));
            self.built_at = stamp;
            self.rebuilds += 1;
        }

        self.window.get_or_insert_with(|| Window::new(function, length))
    }

    /// Cached window, if one has been built
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// Configuration stamp of the last rebuild
    pub fn built_at(&self) -> u64 {
        self.built_at
    }

    /// Number of kernel generations since creation
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}
