//! Error types for the descent-engine core.

use thiserror::Error;

/// Errors produced by simulation, landscape, and rendering operations.
///
/// The simulation tick itself cannot fail: all of its inputs are internally
/// generated and bounded. These variants exist at construction, validation,
/// and I/O boundaries.
#[derive(Debug, Error)]
pub enum SimError {
    /// Width or height was zero when creating a height map.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// An (x, y) sample coordinate was outside the height map bounds.
    #[error("sample ({x}, {y}) out of bounds for height map of size ({width}, {height})")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A landscape failed validation (global basin count, degenerate spreads).
    #[error("invalid landscape: {0}")]
    InvalidLandscape(String),

    /// A palette name was not recognized.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A palette could not be constructed from the given color stops.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A run recipe was malformed (non-object params, unparsable JSON).
    #[error("invalid run recipe: {0}")]
    InvalidRecipe(String),

    /// An I/O failure while writing a snapshot.
    #[error("{0}")]
    Io(String),
}
