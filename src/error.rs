use thiserror::Error;

/// Buffer extent does not match the claimed image geometry.
///
/// Every painting entry point checks the buffer against its dimensions
/// before touching a single byte, so an `Err` always means the buffer is
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SizeError {
    /// Width or height is zero (or negative at the C boundary).
    #[error("image dimensions must be positive")]
    InvalidDimensions,
    /// `width * height * 4` (or the strided extent) does not fit in `usize`.
    #[error("image extent overflows the address space")]
    Overflow,
    /// Contiguous buffer length differs from `width * height * 4`.
    #[error("buffer holds {actual} bytes, image needs exactly {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    /// Stride shorter than a row, or buffer shorter than the strided extent.
    #[error("stride does not fit the image rows or buffer")]
    InvalidStride,
}

/// The two points do not define a line.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LineError {
    #[error("line endpoints must be finite")]
    NonFinite,
    #[error("line endpoints coincide at ({x}, {y})")]
    Coincident { x: f32, y: f32 },
}

/// Anything a plugin entry point can reject.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Size(#[from] SizeError),
    #[error(transparent)]
    Line(#[from] LineError),
    #[error("pixel buffer pointer is null")]
    NullBuffer,
    #[error("side must be 0 (above) or 1 (below), got {0}")]
    InvalidSide(i32),
}

impl Error {
    /// Status code returned across the C ABI. Always negative.
    pub fn code(&self) -> i32 {
        match self {
            Self::NullBuffer => -1,
            Self::Size(SizeError::InvalidDimensions) => -2,
            Self::Size(SizeError::Overflow) => -3,
            Self::Size(SizeError::LengthMismatch { .. }) => -4,
            Self::Size(SizeError::InvalidStride) => -5,
            Self::Line(LineError::NonFinite) => -6,
            Self::Line(LineError::Coincident { .. }) => -7,
            Self::InvalidSide(_) => -8,
        }
    }
}
