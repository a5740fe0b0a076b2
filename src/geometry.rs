//! Detector geometry constants shared by the selection cuts
//!
//! Both detector sites are modeled as axis-aligned boxes in detector
//! coordinates. Each site carries its full instrumented extent, used by the
//! loose fiducial and track-containment cuts (with an inward buffer), and a
//! smaller fiducial volume inside which reconstructed vertices are trusted.

use crate::{
    linalg::{Position, X, Y, Z},
    numeric::Float,
};

/// An axis-aligned box in detector coordinates
///
/// Bounds are inclusive: a point exactly on a face is inside the box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorBox {
    /// Lower X bound (west side)
    pub left: Float,

    /// Upper X bound (east side)
    pub right: Float,

    /// Lower Y bound
    pub bottom: Float,

    /// Upper Y bound
    pub top: Float,

    /// Lower Z bound (beam-facing side)
    pub front: Float,

    /// Upper Z bound
    pub back: Float,
}
//
impl DetectorBox {
    /// Check whether a position lies within the box
    pub fn contains(&self, pos: &Position) -> bool {
        pos[X] >= self.left
            && pos[X] <= self.right
            && pos[Y] >= self.bottom
            && pos[Y] <= self.top
            && pos[Z] >= self.front
            && pos[Z] <= self.back
    }

    /// Shrink the box by moving every face inwards by `buffer` units
    pub fn shrunk(&self, buffer: Float) -> Self {
        Self {
            left: self.left + buffer,
            right: self.right - buffer,
            bottom: self.bottom + buffer,
            top: self.top - buffer,
            front: self.front + buffer,
            back: self.back - buffer,
        }
    }
}

/// Geometry of one detector site
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorSite {
    /// Full instrumented extent of the detector
    pub full: DetectorBox,

    /// Fiducial volume for reconstructed vertices
    pub fiducial: DetectorBox,
}

/// Geometry of both detector sites, injected into cut construction
///
/// Kept as an explicit value rather than module globals so that the coupling
/// between cuts and survey constants stays visible at the construction site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Near detector
    pub nd: DetectorSite,

    /// Far detector
    pub fd: DetectorSite,
}
//
impl Geometry {
    /// Surveyed geometry of the two detector sites
    pub const STANDARD: Self = Self {
        nd: DetectorSite {
            full: DetectorBox {
                left: -191.,
                right: 192.,
                bottom: -187.,
                top: 194.,
                front: 0.,
                back: 1270.,
            },
            fiducial: DetectorBox {
                left: -140.,
                right: 140.,
                bottom: -140.,
                top: 140.,
                front: 100.,
                back: 1000.,
            },
        },
        fd: DetectorSite {
            full: DetectorBox {
                left: -758.,
                right: 765.,
                bottom: -749.,
                top: 765.,
                front: 0.,
                back: 5962.,
            },
            fiducial: DetectorBox {
                left: -720.,
                right: 720.,
                bottom: -720.,
                top: 300.,
                front: 50.,
                back: 5450.,
            },
        },
    };
}

impl Default for Geometry {
    fn default() -> Self {
        Self::STANDARD
    }
}
