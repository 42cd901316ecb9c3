//! Windowing functions for spectral analysis and the cache that holds them

pub mod functions;
pub mod cache;

pub use functions::{generate_window, ponderation, WindowFunction};
pub use cache::{Window, WindowCache};
