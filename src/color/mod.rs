pub mod colormap;
pub mod hex;

pub use colormap::ColorMapper;
pub use hex::{hex_to_rgb, rgb_frac_to_hex};
