//! Planar flattening of geographic coordinates.
//!
//! The spatial index needs a coordinate system where straight-line distance
//! behaves like distance on the ground, at least locally.  A transverse
//! Mercator projection centered on the map's origin gives exactly that:
//!
//! ```text
//! b = sin(Δλ) · cos(φ)
//! x = k0 / 2 · ln((1 + b) / (1 - b))
//! y = k0 · (atan(tan(φ) / cos(Δλ)) - φ0)
//! ```
//!
//! with `Δλ = lon - lon0`.  Output units are radians of arc scaled by `k0`.
//! This is never used for routing costs; those stay on the sphere
//! (see [`GeoPoint::distance_miles`]).

use crate::config::MapConfig;
use crate::geo::GeoPoint;

/// Transverse Mercator projection around a fixed origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projection {
    origin: GeoPoint,
    scale_factor: f64,
}

impl Projection {
    /// Unit-scale projection centered on `origin`.
    pub fn centered_at(origin: GeoPoint) -> Self {
        Self { origin, scale_factor: 1.0 }
    }

    /// Projection centered on the middle of the configured map box.
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            origin: config.origin(),
            scale_factor: config.scale_factor,
        }
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Flatten `p` into `[x, y]`.
    #[inline]
    pub fn project(&self, p: GeoPoint) -> [f64; 2] {
        let d_lon = (p.lon - self.origin.lon).to_radians();
        let phi = p.lat.to_radians();

        let b = d_lon.sin() * phi.cos();
        let x = self.scale_factor * 0.5 * ((1.0 + b) / (1.0 - b)).ln();
        let y = self.scale_factor * ((phi.tan() / d_lon.cos()).atan() - self.origin.lat.to_radians());
        [x, y]
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}
