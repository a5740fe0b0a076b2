//! The NC-sample selection cuts themselves
//!
//! Thresholds follow the analysis documentation (docdb 14241 for the data
//! quality, fiducial, containment, CC-rejection and cosmic-rejection cuts,
//! docdb 15152 for the decaf cut). They are gathered in [`CutParams`] rather
//! than scattered through the scoring closures, so that a variation study can
//! rebuild the whole catalog from a modified table.

use crate::{
    cut::Cut,
    geometry::{DetectorBox, Geometry},
    numeric::Float,
};

/// Thresholds of the selection cuts
///
/// `Default` yields the documented analysis values; every cut in [`NusCuts`]
/// reads its thresholds from here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutParams {
    /// Slices with at least this many hits per plane fail the quality cut
    pub hits_per_plane_max: Float,

    /// Showers with at least this large a lid gap fail the quality cut
    pub shower_gap_max: Float,

    /// Slices spanning fewer contiguous planes than this fail the quality cut
    pub cont_planes_min: u32,

    /// Slices closer than this to any detector wall fail the containment cut
    pub containment_margin_min: Float,

    /// Slices with at least this many hits fail the NC selection
    pub nhit_max: u32,

    /// Events whose leading track is at least this long fail the NC selection
    pub track_len_max: Float,

    /// Events at least this muon-like (ReMId) fail the NC selection
    pub remid_pid_max: Float,

    /// Events at least this electron-like (ANN) fail the NC selection
    pub elec_ann_max: Float,

    /// Decaf events must exceed this numu containment PID
    pub decaf_numu_cont_pid_min: Float,

    /// Cosmic rejection requires more than this numu containment PID
    pub numu_cont_pid_min: Float,

    /// Cosmic rejection requires less than this partial-containment PTP
    pub part_ptp_max: Float,

    /// Cosmic rejection requires more calorimetric energy per hit than this
    pub cal_e_per_hit_min: Float,

    /// Inward buffer applied to the full detector extent by the loose
    /// fiducial cuts
    pub fid_buffer: Float,

    /// Inward buffer applied to the near detector extent by the harsh track
    /// containment cut
    pub track_buffer: Float,
}
//
impl Default for CutParams {
    fn default() -> Self {
        Self {
            hits_per_plane_max: 8.,
            shower_gap_max: 100.,
            cont_planes_min: 3,
            containment_margin_min: 10.,
            nhit_max: 200,
            track_len_max: 400.,
            remid_pid_max: 0.6,
            elec_ann_max: 0.5,
            decaf_numu_cont_pid_min: 0.42,
            numu_cont_pid_min: 0.5,
            part_ptp_max: 0.8,
            cal_e_per_hit_min: 0.02,
            fid_buffer: 10.,
            track_buffer: 25.,
        }
    }
}

/// The full catalog of NC-sample selection cuts
///
/// Built once from an immutable geometry and threshold configuration; every
/// field is a ready-to-apply [`Cut`].
#[derive(Clone, Debug)]
pub struct NusCuts {
    /// Data quality cut
    pub event_quality: Cut,

    /// FD fiducial volume cut
    pub fd_fiducial: Cut,

    /// Loose FD fiducial cut (full extent minus a buffer), for decafs
    pub fd_fid_loose: Cut,

    /// Containment cut on the six wall margins
    pub containment: Cut,

    /// NC selection; in practice more CC rejection than NC selection
    pub nc_sel: Cut,

    /// Decaf cosmic cut for the FD
    pub fd_decaf: Cut,

    /// Cosmic rejection for the NC sample
    pub cos_rej: Cut,

    /// FD preselection: quality, fiducial and containment
    pub fd_presel: Cut,

    /// Full FD selection
    pub fd: Cut,

    /// Strict ND fiducial volume cut
    ///
    /// # Panics
    ///
    /// Assumes the data-quality cut has already removed records without a
    /// vertex candidate, and aborts on records violating that precondition
    /// instead of re-checking it. Apply [`NusCuts::event_quality`] first;
    /// the shipped [`NusCuts::nd_presel`] composite does so.
    pub nd_fiducial: Cut,

    /// Loose ND fiducial cut (full extent minus a buffer), for decafs
    pub nd_fid_loose: Cut,

    /// Harsh track containment cut for the ND
    pub nd_harsh_trk: Cut,

    /// ND preselection: quality, fiducial, containment and track containment
    pub nd_presel: Cut,

    /// Full ND selection
    pub nd: Cut,
}
//
impl NusCuts {
    /// Build the cut catalog from a geometry and a threshold table
    pub fn new(geometry: &Geometry, params: &CutParams) -> Self {
        let event_quality = event_quality(params);
        let fd_fiducial = fd_fiducial(geometry);
        let fd_fid_loose = fid_loose("NusFDFidLoose", geometry.fd.full, params.fid_buffer);
        let containment = containment(params);
        let nc_sel = nc_sel(params);
        let fd_decaf = fd_decaf(params);
        let cos_rej = cos_rej(params);
        let nd_fiducial = nd_fiducial(geometry);
        let nd_fid_loose = fid_loose("NusNDFidLoose", geometry.nd.full, params.fid_buffer);
        let nd_harsh_trk = nd_harsh_trk(geometry, params);

        // The composites keep the documented evaluation order: the quality
        // cut must run before the strict ND fiducial cut.
        let fd_presel = (&event_quality & &fd_fiducial & &containment).named("NusFDPresel");
        let fd = (&fd_presel & &nc_sel & &cos_rej).named("NusFD");
        let nd_presel = (&event_quality & &nd_fiducial & &containment & &nd_harsh_trk)
            .named("NusNDPresel");
        let nd = (&nd_presel & &nc_sel).named("NusND");

        Self {
            event_quality,
            fd_fiducial,
            fd_fid_loose,
            containment,
            nc_sel,
            fd_decaf,
            cos_rej,
            fd_presel,
            fd,
            nd_fiducial,
            nd_fid_loose,
            nd_harsh_trk,
            nd_presel,
            nd,
        }
    }
}

impl Default for NusCuts {
    /// Catalog with the surveyed geometry and documented thresholds
    fn default() -> Self {
        Self::new(&Geometry::STANDARD, &CutParams::default())
    }
}

/// Data quality cut
fn event_quality(params: &CutParams) -> Cut {
    let hits_per_plane_max = params.hits_per_plane_max;
    let shower_gap_max = params.shower_gap_max;
    let cont_planes_min = params.cont_planes_min;
    Cut::new(
        "NusEventQuality",
        &[
            "slc.ncontplanes",
            "vtx.nelastic",
            "sel.nuecosrej.hitsperplane",
            "shw.nshwlid",
            "shw.shwlid.gap",
        ],
        move |sr| {
            if sr.sel.nuecosrej.hits_per_plane >= hits_per_plane_max {
                return false;
            }
            let Some(shower) = sr.shw.shwlid.first() else {
                return false;
            };
            if shower.gap >= shower_gap_max {
                return false;
            }
            if sr.slc.ncontplanes < cont_planes_min {
                return false;
            }
            sr.vtx.nelastic() > 0
        },
    )
}

/// FD fiducial volume cut
fn fd_fiducial(geometry: &Geometry) -> Cut {
    let fiducial = geometry.fd.fiducial;
    Cut::new(
        "NusFDFiducial",
        &["vtx.nelastic", "vtx.elastic.*"],
        move |sr| {
            // No vertex is an ordinary failure here: unlike the strict ND
            // variant, this cut must stay usable in N-1 studies where the
            // data-quality cut has not run.
            match sr.primary_vertex() {
                Some(vtx) => fiducial.contains(vtx),
                None => false,
            }
        },
    )
}

/// Loose fiducial cut: vertex within the full detector extent minus a buffer
fn fid_loose(name: &str, full: DetectorBox, buffer: Float) -> Cut {
    let volume = full.shrunk(buffer);
    Cut::new(name, &["vtx.nelastic", "vtx.elastic.*"], move |sr| {
        match sr.primary_vertex() {
            Some(vtx) => volume.contains(vtx),
            None => false,
        }
    })
}

/// Containment cut on the six wall margins of the slice
fn containment(params: &CutParams) -> Cut {
    let margin = params.containment_margin_min;
    Cut::new(
        "NusContain",
        &[
            "sel.nuecosrej.startfront",
            "sel.nuecosrej.stopfront",
            "sel.nuecosrej.startback",
            "sel.nuecosrej.stopback",
            "sel.nuecosrej.starteast",
            "sel.nuecosrej.stopeast",
            "sel.nuecosrej.startwest",
            "sel.nuecosrej.stopwest",
            "sel.nuecosrej.starttop",
            "sel.nuecosrej.stoptop",
            "sel.nuecosrej.startbottom",
            "sel.nuecosrej.stopbottom",
        ],
        move |sr| {
            let cr = &sr.sel.nuecosrej;
            cr.start_east.min(cr.stop_east) >= margin
                && cr.start_west.min(cr.stop_west) >= margin
                && cr.start_top.min(cr.stop_top) >= margin
                && cr.start_bottom.min(cr.stop_bottom) >= margin
                && cr.start_front.min(cr.stop_front) >= margin
                && cr.start_back.min(cr.stop_back) >= margin
        },
    )
}

/// NC selection cut; in practice more CC rejection than NC selection
fn nc_sel(params: &CutParams) -> Cut {
    let nhit_max = params.nhit_max;
    let track_len_max = params.track_len_max;
    let remid_pid_max = params.remid_pid_max;
    let elec_ann_max = params.elec_ann_max;
    Cut::new(
        "NusNCSel",
        &[
            "slc.nhit",
            "trk.nkalman",
            "trk.kalman.len",
            "sel.remid.pid",
            "sel.elecid.ann",
        ],
        move |sr| {
            if sr.slc.nhit >= nhit_max {
                return false;
            }
            let Some(track) = sr.trk.kalman.first() else {
                return false;
            };
            if track.len >= track_len_max {
                return false;
            }
            if sr.sel.remid.pid >= remid_pid_max {
                return false;
            }
            sr.sel.elecid.ann < elec_ann_max
        },
    )
}

/// Decaf cosmic cut for the FD
fn fd_decaf(params: &CutParams) -> Cut {
    let pid_min = params.decaf_numu_cont_pid_min;
    Cut::new("NusFDDecafCut", &["sel.cosrej.numucontpid"], move |sr| {
        sr.sel.cosrej.numu_cont_pid > pid_min
    })
}

/// Cosmic rejection for the NC sample
fn cos_rej(params: &CutParams) -> Cut {
    let numu_cont_pid_min = params.numu_cont_pid_min;
    let part_ptp_max = params.part_ptp_max;
    let cal_e_per_hit_min = params.cal_e_per_hit_min;
    Cut::new(
        "NusCosRej",
        &[
            "sel.cosrej.numucontpid",
            "sel.nuecosrej.partptp",
            "sel.elecid.nshwlid",
            "sel.elecid.shwlid.ismuon",
            "slc.calE",
            "slc.nhit",
        ],
        move |sr| {
            if sr.sel.elecid.nshwlid() == 0 {
                return false;
            }
            if sr.sel.cosrej.numu_cont_pid <= numu_cont_pid_min {
                return false;
            }
            if sr.sel.nuecosrej.part_ptp >= part_ptp_max {
                return false;
            }
            if sr.sel.elecid.shwlid.iter().any(|shw| shw.is_muon) {
                return false;
            }
            if sr.slc.nhit == 0 {
                return false;
            }
            sr.slc.cal_e / sr.slc.nhit as Float > cal_e_per_hit_min
        },
    )
}

/// Strict ND fiducial volume cut
///
/// Does not re-check the vertex multiplicity: records without a vertex must
/// have been removed by the data-quality cut before this one runs.
fn nd_fiducial(geometry: &Geometry) -> Cut {
    let fiducial = geometry.nd.fiducial;
    Cut::new(
        "NusNDFiducial",
        &["vtx.nelastic", "vtx.elastic.*"],
        move |sr| {
            assert!(
                sr.vtx.nelastic() > 0,
                "must apply the data-quality cut before the strict ND fiducial cut"
            );
            fiducial.contains(&sr.vtx.elastic[0].vtx)
        },
    )
}

/// Harsh track containment cut for the ND
fn nd_harsh_trk(geometry: &Geometry, params: &CutParams) -> Cut {
    let volume = geometry.nd.full.shrunk(params.track_buffer);
    Cut::new(
        "NusNDHarshTrk",
        &[
            "trk.nkalman",
            "trk.kalman.start.fX",
            "trk.kalman.stop.fX",
            "trk.kalman.start.fY",
            "trk.kalman.stop.fY",
            "trk.kalman.start.fZ",
            "trk.kalman.stop.fZ",
        ],
        move |sr| {
            if sr.trk.nkalman() == 0 {
                return false;
            }
            // Both endpoints in the buffered box means every per-axis
            // min/max lies within it too.
            sr.trk
                .kalman
                .iter()
                .all(|trk| volume.contains(&trk.start) && volume.contains(&trk.stop))
        },
    )
}
