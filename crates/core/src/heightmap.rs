//! Two-dimensional grid of raw loss samples.
//!
//! A `HeightMap` holds `width * height` f64 values in row-major layout,
//! produced by sampling a landscape over its render domain. Values are raw
//! loss — unbounded in either direction — so consumers normalize with
//! [`HeightMap::min_max`] before mapping to colors.

use crate::error::SimError;

/// A 2D grid of raw loss samples in row-major layout.
#[derive(Debug, Clone)]
pub struct HeightMap {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl HeightMap {
    /// Creates a zero-filled map of the given dimensions.
    ///
    /// Returns `SimError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(SimError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Creates a map by evaluating `f(x, y)` at every cell.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, SimError> {
        let mut map = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                map.data[y * width + x] = f(x, y);
            }
        }
        Ok(map)
    }

    /// Map width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// The value at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Sets the value at `(x, y)`.
    ///
    /// Returns `SimError::OutOfBounds` when the coordinate is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: f64) -> Result<(), SimError> {
        if x >= self.width || y >= self.height {
            return Err(SimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.data[y * self.width + x] = value;
        Ok(())
    }

    /// The minimum and maximum sample values.
    ///
    /// NaN samples are ignored; an all-NaN map reports `(0.0, 0.0)`.
    pub fn min_max(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in &self.data {
            if v.is_nan() {
                continue;
            }
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo > hi {
            (0.0, 0.0)
        } else {
            (lo, hi)
        }
    }
}
