//! Color ramps for height-mapped rendering.
//!
//! A [`Palette`] is a short list of sRGB stops interpolated linearly; the
//! snapshot path maps normalized loss height through a palette to color a
//! surface from valley to peak.

use crate::error::SimError;

/// An sRGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Creates a color from channel values in [0, 1].
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channel values.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Linear interpolation toward `other` by `t` in [0, 1], per channel.
    pub fn lerp(self, other: Srgb, t: f64) -> Srgb {
        Srgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// Names of all built-in palettes.
const PALETTE_NAMES: &[&str] = &["violet", "ocean", "ember", "mono"];

/// A piecewise-linear color ramp over [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    stops: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette from ordered stops (valley first, peak last).
    ///
    /// Returns `SimError::InvalidPalette` when fewer than two stops are given.
    pub fn new(stops: Vec<Srgb>) -> Result<Self, SimError> {
        if stops.len() < 2 {
            return Err(SimError::InvalidPalette(
                "a palette needs at least two stops".into(),
            ));
        }
        Ok(Self { stops })
    }

    /// Valley-to-peak violet ramp: pale lilac low ground, deep blue peaks.
    pub fn violet() -> Self {
        Self {
            stops: vec![
                Srgb::from_u8(0xc0, 0x84, 0xfc),
                Srgb::from_u8(0x7c, 0x3a, 0xed),
                Srgb::from_u8(0x1e, 0x40, 0xaf),
            ],
        }
    }

    /// Deep-water blues rising to foam white.
    pub fn ocean() -> Self {
        Self {
            stops: vec![
                Srgb::from_u8(0x06, 0x1a, 0x33),
                Srgb::from_u8(0x1d, 0x6f, 0xa3),
                Srgb::from_u8(0xe8, 0xf4, 0xf8),
            ],
        }
    }

    /// Charcoal through orange to pale yellow.
    pub fn ember() -> Self {
        Self {
            stops: vec![
                Srgb::from_u8(0x1a, 0x0a, 0x00),
                Srgb::from_u8(0xe8, 0x5d, 0x1a),
                Srgb::from_u8(0xff, 0xe8, 0xb0),
            ],
        }
    }

    /// Black to white.
    pub fn mono() -> Self {
        Self {
            stops: vec![Srgb::new(0.0, 0.0, 0.0), Srgb::new(1.0, 1.0, 1.0)],
        }
    }

    /// Constructs a built-in palette by name.
    ///
    /// Returns `SimError::UnknownPalette` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name {
            "violet" => Ok(Self::violet()),
            "ocean" => Ok(Self::ocean()),
            "ember" => Ok(Self::ember()),
            "mono" => Ok(Self::mono()),
            other => Err(SimError::UnknownPalette(other.to_string())),
        }
    }

    /// Returns the names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Samples the ramp at `t`, clamped to [0, 1].
    pub fn sample(&self, t: f64) -> Srgb {
        let t = t.clamp(0.0, 1.0);
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f64;
        let idx = (scaled.floor() as usize).min(segments - 1);
        let frac = scaled - idx as f64;
        self.stops[idx].lerp(self.stops[idx + 1], frac)
    }
}
