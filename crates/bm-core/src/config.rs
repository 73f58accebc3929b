//! Map geometry configuration.

use crate::error::{CoreError, CoreResult};
use crate::geo::GeoPoint;
use crate::projection::Projection;

/// Bounding box and projection parameters for one map.
///
/// Typically loaded from a TOML/JSON file by the application crate.  The
/// projection origin is the center of the box, not anything derived from
/// the loaded road data, so indexes built from different extracts of the
/// same map share one coordinate system.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    /// North-west corner of the map.
    pub upper_left: GeoPoint,

    /// South-east corner of the map.
    pub lower_right: GeoPoint,

    /// Scale factor at the projection origin.  UTM uses 0.9996; a single
    /// city-sized map is better served by 1.0.
    pub scale_factor: f64,
}

impl MapConfig {
    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(
            (self.upper_left.lat + self.lower_right.lat) / 2.0,
            (self.upper_left.lon + self.lower_right.lon) / 2.0,
        )
    }

    /// `true` if `p` lies inside the box (edges inclusive).
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat <= self.upper_left.lat
            && p.lat >= self.lower_right.lat
            && p.lon >= self.upper_left.lon
            && p.lon <= self.lower_right.lon
    }

    pub fn projection(&self) -> Projection {
        Projection::from_config(self)
    }

    /// Reject boxes that are inverted or degenerate and unusable scale factors.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.upper_left.is_finite() || !self.lower_right.is_finite() {
            return Err(CoreError::Config("map corners must be finite".into()));
        }
        if self.upper_left.lat <= self.lower_right.lat {
            return Err(CoreError::Config(format!(
                "upper-left latitude {} is not north of lower-right latitude {}",
                self.upper_left.lat, self.lower_right.lat
            )));
        }
        if self.upper_left.lon >= self.lower_right.lon {
            return Err(CoreError::Config(format!(
                "upper-left longitude {} is not west of lower-right longitude {}",
                self.upper_left.lon, self.lower_right.lon
            )));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(CoreError::Config(format!(
                "scale factor must be positive, got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }
}

impl Default for MapConfig {
    /// Berkeley, CA.
    fn default() -> Self {
        Self {
            upper_left:   GeoPoint::new(37.892195547244356, -122.2998046875),
            lower_right:  GeoPoint::new(37.82280243352756, -122.2119140625),
            scale_factor: 1.0,
        }
    }
}
