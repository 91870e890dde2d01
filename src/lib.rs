//! Bootcamp image utilities - library crate.
//!
//! Display helpers for microscopy-style images (intensity maps, channel
//! merges, RGBA packing) plus the lookup tables and plot style defaults
//! used by the viewer binary.

pub mod bioinfo;
pub mod color;
pub mod demo;
pub mod display;
pub mod error;
pub mod pixels;
pub mod style;

pub use color::rgb_frac_to_hex;
pub use display::{ImshowParams, imshow};
pub use error::VizError;
pub use pixels::{Image, merge_channels, rgb_to_rgba32};
