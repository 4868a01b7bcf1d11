//! Shared building blocks
//!
//! Math aliases and camera matrices, RGB colors with packed and HSL forms,
//! frame timing and logger setup.

pub mod math;
pub mod color;
pub mod time;
pub mod logging;
