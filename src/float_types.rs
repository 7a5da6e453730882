// Our Real scalar type:
pub type Real = f64;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Conversion defaults
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Default quantization cell size for vertex welding, in model units.
pub const DEFAULT_EPS: Real = 1e-4;

/// Default cylinder radius, before the scene scale is applied.
pub const DEFAULT_RADIUS: Real = 0.008;

/// Z scale given to a cylinder whose edge has zero length.
pub const DEGENERATE_LENGTH: Real = 1e-6;

/// Decimal digits are never allowed to drop below this.
pub const MIN_DIGITS: usize = 1;
