use crate::{Error, ErrorKind, Result};

/// Fixed-point scale used for shaping.
///
/// Shaping engines round positions to integers at whatever size they are
/// given. Shaping at `size * factor` and dividing every returned value by
/// `factor` keeps `1 / factor` of a point of precision. The same factor is
/// used for the size handed to the engine and for both axes of every value
/// coming back.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ScaleContext {
    factor: u32,
}

impl ScaleContext {
    pub const DEFAULT_FACTOR: u32 = 10_000;

    /// A factor of zero is treated as one.
    pub const fn new(factor: u32) -> ScaleContext {
        ScaleContext {
            factor: if factor == 0 { 1 } else { factor },
        }
    }

    pub const fn factor(self) -> u32 {
        self.factor
    }

    /// Converts a font size in points to the integer size fed to the engine.
    pub fn to_engine_size(self, size: f64) -> Result<i32> {
        if !size.is_finite() || size <= 0.0 {
            return Err(Error::new(
                ErrorKind::InvalidFontSize,
                format!("invalid font size {size}"),
            ));
        }

        let engine_size = (size * f64::from(self.factor)).round();
        if engine_size < 1.0 || engine_size > f64::from(i32::MAX) {
            return Err(Error::new(
                ErrorKind::InvalidFontSize,
                format!(
                    "font size {size} doesn't fit the engine scale (factor {})",
                    self.factor
                ),
            ));
        }

        Ok(engine_size as i32)
    }

    /// Converts a value in font design units to engine units, for a font with
    /// `units_per_em` units per em shaped at `engine_size`. Rounds half away
    /// from zero.
    pub fn units_to_engine(self, units: i32, engine_size: i32, units_per_em: u16) -> i32 {
        if units_per_em == 0 {
            return 0;
        }

        let upem = i64::from(units_per_em);
        let scaled = i64::from(units) * i64::from(engine_size);
        let rounded = if scaled >= 0 {
            (scaled + upem / 2) / upem
        } else {
            (scaled - upem / 2) / upem
        };

        rounded.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Converts an engine value (or a sum of them) back to points.
    pub fn from_engine(self, value: i64) -> f64 {
        value as f64 / f64::from(self.factor)
    }
}

impl Default for ScaleContext {
    fn default() -> Self {
        ScaleContext::new(ScaleContext::DEFAULT_FACTOR)
    }
}
