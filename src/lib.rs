//! Cityscape Shuffle — loading-screen backgrounds drawn from the main-menu
//! slideshow, each shown once before any repeats.

pub mod config;
pub mod headless;
pub mod hooks;
pub mod logging;
pub mod material;
pub mod pool;
pub mod shuffle;
pub mod types;
