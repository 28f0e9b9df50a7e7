use std::fmt;

use crate::vga::mode::Mode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VgaError {
    /// Bad construction parameters: dimensions, buffer lengths, glyph data.
    InvalidArgument(String),
    /// A palette index or coordinate outside its valid range.
    OutOfRange {
        what: &'static str,
        value: usize,
        limit: usize,
    },
    UnknownMode(Mode),
    ResourceCreationFailed(String),
    PresentFailed(String),
}

impl VgaError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        VgaError::InvalidArgument(msg.into())
    }

    pub(crate) fn out_of_range(what: &'static str, value: usize, limit: usize) -> Self {
        VgaError::OutOfRange { what, value, limit }
    }
}

impl fmt::Display for VgaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VgaError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            VgaError::OutOfRange { what, value, limit } => {
                write!(f, "{} {} out of range (limit {})", what, value, limit)
            }
            VgaError::UnknownMode(mode) => write!(f, "unknown video mode {}", mode),
            VgaError::ResourceCreationFailed(msg) => {
                write!(f, "failed to create presentation resource: {}", msg)
            }
            VgaError::PresentFailed(msg) => write!(f, "failed to present frame: {}", msg),
        }
    }
}

impl std::error::Error for VgaError {}
