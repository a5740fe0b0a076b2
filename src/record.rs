//! This module defines the reconstructed event record that cuts are applied to
//!
//! The record mirrors the analysis framework's per-event summary tree: a
//! slice-level block, candidate lists for elastic vertices, Kalman tracks and
//! showers, and the outputs of the selection algorithms (particle-ID scores
//! and containment margins). Candidate lists may be empty; cuts must treat an
//! absent candidate as a selection failure, never as a reason to crash.

use crate::{linalg::Position, numeric::Float};

/// One reconstructed detector event
#[derive(Clone, Debug, Default)]
pub struct StandardRecord {
    /// Slice-level summary quantities
    pub slc: SliceInfo,

    /// Reconstructed vertex candidates
    pub vtx: VertexBranch,

    /// Reconstructed track candidates
    pub trk: TrackBranch,

    /// Reconstructed shower candidates
    pub shw: ShowerBranch,

    /// Selection-algorithm outputs
    pub sel: SelectionInfo,
}
//
impl StandardRecord {
    /// Position of the primary elastic vertex, if one was reconstructed
    pub fn primary_vertex(&self) -> Option<&Position> {
        self.vtx.elastic.first().map(|vtx| &vtx.vtx)
    }
}

/// Summary quantities of the event slice
#[derive(Clone, Debug, Default)]
pub struct SliceInfo {
    /// Number of hits in the slice
    pub nhit: u32,

    /// Number of contiguous planes with activity
    pub ncontplanes: u32,

    /// Calorimetric energy of the slice (GeV)
    pub cal_e: Float,
}

/// Elastic-arms vertex candidates
#[derive(Clone, Debug, Default)]
pub struct VertexBranch {
    /// Vertex candidates, best candidate first
    pub elastic: Vec<ElasticVertex>,
}
//
impl VertexBranch {
    /// Number of elastic vertex candidates
    pub fn nelastic(&self) -> usize {
        self.elastic.len()
    }
}

/// One elastic-arms vertex candidate
#[derive(Clone, Debug)]
pub struct ElasticVertex {
    /// Reconstructed vertex position
    pub vtx: Position,
}
//
impl Default for ElasticVertex {
    fn default() -> Self {
        Self {
            vtx: Position::zeros(),
        }
    }
}

/// Kalman-filter track candidates
#[derive(Clone, Debug, Default)]
pub struct TrackBranch {
    /// Track candidates, best candidate first
    pub kalman: Vec<KalmanTrack>,
}
//
impl TrackBranch {
    /// Number of Kalman track candidates
    pub fn nkalman(&self) -> usize {
        self.kalman.len()
    }
}

/// One Kalman-filter track candidate
#[derive(Clone, Debug)]
pub struct KalmanTrack {
    /// Track start point
    pub start: Position,

    /// Track end point
    pub stop: Position,

    /// Track length (detector-length units)
    pub len: Float,
}
//
impl Default for KalmanTrack {
    fn default() -> Self {
        Self {
            start: Position::zeros(),
            stop: Position::zeros(),
            len: 0.,
        }
    }
}

/// Shower candidates with lid (leakage) information
#[derive(Clone, Debug, Default)]
pub struct ShowerBranch {
    /// Shower candidates, best candidate first
    pub shwlid: Vec<ShowerLid>,
}
//
impl ShowerBranch {
    /// Number of shower candidates
    pub fn nshwlid(&self) -> usize {
        self.shwlid.len()
    }
}

/// One shower candidate
#[derive(Clone, Debug, Default)]
pub struct ShowerLid {
    /// Gap between the vertex and the shower start (planes)
    pub gap: Float,
}

/// Outputs of the selection algorithms run upstream of these cuts
#[derive(Clone, Debug, Default)]
pub struct SelectionInfo {
    /// Muon-removal particle ID
    pub remid: ReMId,

    /// Electron identification
    pub elecid: ElectronId,

    /// Cosmic-rejection scores shared with the muon-neutrino analysis
    pub cosrej: CosmicRej,

    /// Cosmic-rejection scores of the electron-neutrino analysis
    pub nuecosrej: NueCosRej,
}

/// Muon-removal particle-ID output
#[derive(Clone, Debug, Default)]
pub struct ReMId {
    /// Muon PID score, higher means more muon-like
    pub pid: Float,
}

/// Electron-ID algorithm output
#[derive(Clone, Debug, Default)]
pub struct ElectronId {
    /// Artificial-neural-network electron score
    pub ann: Float,

    /// Shower candidates as classified by the electron ID
    pub shwlid: Vec<ElectronShower>,
}
//
impl ElectronId {
    /// Number of electron-ID shower candidates
    pub fn nshwlid(&self) -> usize {
        self.shwlid.len()
    }
}

/// One shower candidate as seen by the electron ID
#[derive(Clone, Debug, Default)]
pub struct ElectronShower {
    /// Whether the shower was classified as a muon
    pub is_muon: bool,
}

/// Cosmic-rejection output shared with the muon-neutrino analysis
#[derive(Clone, Debug, Default)]
pub struct CosmicRej {
    /// Containment PID for contained muon neutrinos
    pub numu_cont_pid: Float,
}

/// Cosmic-rejection output of the electron-neutrino analysis
///
/// The `start_*`/`stop_*` pairs are distances (detector-length units) from
/// the slice's start/stop points to the six detector walls, used as
/// containment margins.
///
#[derive(Clone, Debug, Default)]
pub struct NueCosRej {
    /// Average number of hits per plane in the slice
    pub hits_per_plane: Float,

    /// Partial-containment transverse-momentum-fraction PID
    pub part_ptp: Float,

    /// Distance from slice start to the front wall
    pub start_front: Float,
    /// Distance from slice stop to the front wall
    pub stop_front: Float,

    /// Distance from slice start to the back wall
    pub start_back: Float,
    /// Distance from slice stop to the back wall
    pub stop_back: Float,

    /// Distance from slice start to the east wall
    pub start_east: Float,
    /// Distance from slice stop to the east wall
    pub stop_east: Float,

    /// Distance from slice start to the west wall
    pub start_west: Float,
    /// Distance from slice stop to the west wall
    pub stop_west: Float,

    /// Distance from slice start to the top wall
    pub start_top: Float,
    /// Distance from slice stop to the top wall
    pub stop_top: Float,

    /// Distance from slice start to the bottom wall
    pub start_bottom: Float,
    /// Distance from slice stop to the bottom wall
    pub stop_bottom: Float,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn default_record_has_no_candidates() {
        let sr = StandardRecord::default();
        assert_eq!(sr.vtx.nelastic(), 0);
        assert_eq!(sr.trk.nkalman(), 0);
        assert_eq!(sr.shw.nshwlid(), 0);
        assert_eq!(sr.sel.elecid.nshwlid(), 0);
        assert!(sr.primary_vertex().is_none());
    }

    #[test]
    fn primary_vertex_is_first_candidate() {
        let mut sr = StandardRecord::default();
        sr.vtx.elastic.push(ElasticVertex {
            vtx: vector![1., 2., 3.],
        });
        sr.vtx.elastic.push(ElasticVertex {
            vtx: vector![4., 5., 6.],
        });
        assert_eq!(sr.primary_vertex(), Some(&vector![1., 2., 3.]));
    }
}
