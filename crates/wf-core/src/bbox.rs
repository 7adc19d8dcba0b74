//! Axis-aligned geographic bounding box.
//!
//! Boxes are described the way map viewports are: by the upper-left
//! (north-west) and lower-right (south-east) corners.  Latitude decreases
//! from `ul_lat` to `lr_lat`; longitude increases from `ul_lon` to `lr_lon`.

use crate::{GeoPoint, WfError, WfResult};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub ul_lon: f64,
    pub ul_lat: f64,
    pub lr_lon: f64,
    pub lr_lat: f64,
}

impl BoundingBox {
    /// Construct a box, rejecting inverted or non-finite corners.
    pub fn new(ul_lon: f64, ul_lat: f64, lr_lon: f64, lr_lat: f64) -> WfResult<Self> {
        let b = Self { ul_lon, ul_lat, lr_lon, lr_lat };
        b.validate()?;
        Ok(b)
    }

    /// Check the `ul_lat >= lr_lat`, `ul_lon <= lr_lon` invariant.
    pub fn validate(&self) -> WfResult<()> {
        let coords = [self.ul_lon, self.ul_lat, self.lr_lon, self.lr_lat];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(WfError::InvalidBox(format!("non-finite corner in {self}")));
        }
        if self.ul_lat < self.lr_lat {
            return Err(WfError::InvalidBox(format!("north edge below south edge in {self}")));
        }
        if self.ul_lon > self.lr_lon {
            return Err(WfError::InvalidBox(format!("west edge east of east edge in {self}")));
        }
        Ok(())
    }

    #[inline]
    pub fn lon_span(&self) -> f64 {
        self.lr_lon - self.ul_lon
    }

    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.ul_lat - self.lr_lat
    }

    pub fn upper_left(&self) -> GeoPoint {
        GeoPoint::new(self.ul_lat, self.ul_lon)
    }

    pub fn lower_right(&self) -> GeoPoint {
        GeoPoint::new(self.lr_lat, self.lr_lon)
    }

    /// `true` if the two boxes share any area or edge.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.ul_lon <= other.lr_lon
            && other.ul_lon <= self.lr_lon
            && self.lr_lat <= other.ul_lat
            && other.lr_lat <= self.ul_lat
    }

    /// `true` if `other` lies entirely inside (or on the edge of) `self`.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.ul_lon <= other.ul_lon
            && self.lr_lon >= other.lr_lon
            && self.ul_lat >= other.ul_lat
            && self.lr_lat <= other.lr_lat
    }

    pub fn contains_point(&self, p: GeoPoint) -> bool {
        (self.ul_lon..=self.lr_lon).contains(&p.lon) && (self.lr_lat..=self.ul_lat).contains(&p.lat)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[ul=({:.6}, {:.6}) lr=({:.6}, {:.6})]",
            self.ul_lat, self.ul_lon, self.lr_lat, self.lr_lon
        )
    }
}
