use std::fmt;

/// Error raised by the image preparation and colour helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct VizError {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 3D image whose channel axis is not 1, 2 or 3 long.
    UnsupportedChannelCount,
    /// Array is neither 2D nor 3D, or the data length disagrees with the shape.
    InvalidDimensions,
    /// Colour mapping that does not apply to this kind of image.
    InvalidColorMapper,
    /// Explicit channel bound tighter than the data range.
    InvalidChannelBound,
    /// Channels handed to a merge have different shapes.
    ShapeMismatch,
    /// Packing input is not a 3-channel image.
    NotRgb,
    /// Pixel value outside [0, 1].
    ValueOutOfRange,
    /// Fractional RGB value with the wrong number of components or out of range.
    InvalidColorComponents,
    EmptyImage,
}

impl VizError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn channel_count(count: usize) -> Self {
        Self::new(
            ErrorKind::UnsupportedChannelCount,
            format!("Can only display 1, 2, or 3 channels, got {count}."),
        )
    }

    pub fn dimensions(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDimensions, message)
    }

    pub fn color_mapper(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidColorMapper, message)
    }

    pub fn channel_bound(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidChannelBound, message)
    }

    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ShapeMismatch, message)
    }

    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValueOutOfRange, message)
    }
}

impl fmt::Display for VizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for VizError {}
