//! Numeric preparation of images for display.

pub mod array;
pub mod merge;
pub mod rgba;

pub use array::{Image, MAX_8BIT, PixelData, Plane, RgbFrame};
pub use merge::{ChannelBounds, MergeMode, merge_channels};
pub use rgba::{PackedImage, frac_to_ubyte, rgb_to_rgba32};
