//! End-to-end checks of the shipped NC-sample selections

use nus_cuts::{
    linalg::Position,
    record::{ElasticVertex, ElectronShower, KalmanTrack, ShowerLid, StandardRecord},
    NusCuts,
};

use nalgebra::vector;
use proptest::prelude::*;

/// A record that passes the data-quality cut, is contained, and carries one
/// short track inside the near-detector buffered bounds, with a vertex at
/// (0, 0, 100): inside both the near and far fiducial volumes.
fn clean_signal_record() -> StandardRecord {
    let mut sr = StandardRecord::default();

    // Data quality
    sr.sel.nuecosrej.hits_per_plane = 4.;
    sr.shw.shwlid.push(ShowerLid { gap: 20. });
    sr.slc.ncontplanes = 10;
    sr.vtx.elastic.push(ElasticVertex {
        vtx: vector![0., 0., 100.],
    });

    // Containment margins, all comfortably away from the walls
    let cr = &mut sr.sel.nuecosrej;
    for margin in [
        &mut cr.start_front,
        &mut cr.stop_front,
        &mut cr.start_back,
        &mut cr.stop_back,
        &mut cr.start_east,
        &mut cr.stop_east,
        &mut cr.start_west,
        &mut cr.stop_west,
        &mut cr.start_top,
        &mut cr.stop_top,
        &mut cr.start_bottom,
        &mut cr.stop_bottom,
    ] {
        *margin = 50.;
    }

    // One short, fully contained track and neutral-current-looking PIDs
    sr.slc.nhit = 50;
    sr.trk.kalman.push(KalmanTrack {
        start: vector![0., 0., 100.],
        stop: vector![20., 10., 250.],
        len: 160.,
    });
    sr.sel.remid.pid = 0.1;
    sr.sel.elecid.ann = 0.1;

    sr
}

#[test]
fn record_without_vertex_fails_quality_and_preselection() {
    let cuts = NusCuts::default();
    let sr = StandardRecord::default();
    assert!(!cuts.event_quality.keep(&sr));
    // The FD preselection must fail through the quality cut without ever
    // reaching vertex-dependent logic
    assert!(!cuts.fd_presel.keep(&sr));
    assert!(!cuts.nd_presel.keep(&sr));
}

#[test]
fn clean_signal_record_passes_the_nd_selection() {
    let cuts = NusCuts::default();
    let sr = clean_signal_record();
    assert!(cuts.event_quality.keep(&sr));
    assert!(cuts.nd_fiducial.keep(&sr));
    assert!(cuts.containment.keep(&sr));
    assert!(cuts.nd_harsh_trk.keep(&sr));
    assert!(cuts.nc_sel.keep(&sr));
    assert!(cuts.nd.keep(&sr));
}

#[test]
fn cosmic_like_pid_vetoes_the_fd_selection() {
    let cuts = NusCuts::default();
    let mut sr = clean_signal_record();

    // Make the cosmic-rejection inputs otherwise acceptable...
    sr.sel.elecid.shwlid.push(ElectronShower { is_muon: false });
    sr.sel.nuecosrej.part_ptp = 0.1;
    sr.slc.cal_e = 2.;

    // ...then give the event a cosmic-like containment PID
    sr.sel.cosrej.numu_cont_pid = 0.3;

    assert!(cuts.fd_presel.keep(&sr));
    assert!(cuts.nc_sel.keep(&sr));
    assert!(!cuts.cos_rej.keep(&sr));
    assert!(!cuts.fd.keep(&sr));

    // Restoring the PID recovers the event
    sr.sel.cosrej.numu_cont_pid = 0.9;
    assert!(cuts.fd.keep(&sr));
}

fn position() -> impl Strategy<Value = Position> {
    (-1000.0..1000.0, -1000.0..1000.0, -100.0..6500.0).prop_map(|(x, y, z)| vector![x, y, z])
}

prop_compose! {
    /// Records with configurable candidate multiplicities and otherwise
    /// arbitrary (but physically plausible) field values
    fn arb_record(nvtx: std::ops::Range<usize>, ntrk: std::ops::Range<usize>)(
        vertices in prop::collection::vec(position(), nvtx),
        tracks in prop::collection::vec((position(), position(), 0.0..2000.0), ntrk),
        shower_gaps in prop::collection::vec(0.0..200.0, 0..3),
        muon_flags in prop::collection::vec(any::<bool>(), 0..3),
        nhit in 0u32..500,
        ncontplanes in 0u32..50,
        cal_e in 0.0..10.0,
        hits_per_plane in 0.0..20.0,
        part_ptp in 0.0..1.0,
        remid in 0.0..1.0,
        ann in 0.0..1.0,
        numu_cont_pid in 0.0..1.0,
        margins in prop::collection::vec(-50.0..200.0, 12),
    ) -> StandardRecord {
        let mut sr = StandardRecord::default();
        sr.vtx.elastic = vertices
            .into_iter()
            .map(|vtx| ElasticVertex { vtx })
            .collect();
        sr.trk.kalman = tracks
            .into_iter()
            .map(|(start, stop, len)| KalmanTrack { start, stop, len })
            .collect();
        sr.shw.shwlid = shower_gaps.into_iter().map(|gap| ShowerLid { gap }).collect();
        sr.sel.elecid.shwlid = muon_flags
            .into_iter()
            .map(|is_muon| ElectronShower { is_muon })
            .collect();
        sr.slc.nhit = nhit;
        sr.slc.ncontplanes = ncontplanes;
        sr.slc.cal_e = cal_e;
        sr.sel.nuecosrej.hits_per_plane = hits_per_plane;
        sr.sel.nuecosrej.part_ptp = part_ptp;
        sr.sel.remid.pid = remid;
        sr.sel.elecid.ann = ann;
        sr.sel.cosrej.numu_cont_pid = numu_cont_pid;
        let cr = &mut sr.sel.nuecosrej;
        [
            &mut cr.start_front,
            &mut cr.stop_front,
            &mut cr.start_back,
            &mut cr.stop_back,
            &mut cr.start_east,
            &mut cr.stop_east,
            &mut cr.start_west,
            &mut cr.stop_west,
            &mut cr.start_top,
            &mut cr.stop_top,
            &mut cr.start_bottom,
            &mut cr.stop_bottom,
        ]
        .into_iter()
        .zip(margins)
        .for_each(|(slot, margin)| *slot = margin);
        sr
    }
}

proptest! {
    #[test]
    fn vertex_cuts_fail_gracefully_without_a_vertex(sr in arb_record(0..1, 0..3)) {
        let cuts = NusCuts::default();
        // Every vertex-dependent cut except the strict ND fiducial one treats
        // a missing vertex as an ordinary selection failure
        prop_assert!(!cuts.event_quality.keep(&sr));
        prop_assert!(!cuts.fd_fiducial.keep(&sr));
        prop_assert!(!cuts.fd_fid_loose.keep(&sr));
        prop_assert!(!cuts.nd_fid_loose.keep(&sr));
        // And the composites fail through their quality gate without
        // reaching the strict ND fiducial cut
        prop_assert!(!cuts.fd_presel.keep(&sr));
        prop_assert!(!cuts.nd_presel.keep(&sr));
        prop_assert!(!cuts.fd.keep(&sr));
        prop_assert!(!cuts.nd.keep(&sr));
    }

    #[test]
    fn track_cuts_fail_without_a_track(sr in arb_record(0..3, 0..1)) {
        let cuts = NusCuts::default();
        prop_assert!(!cuts.nc_sel.keep(&sr));
        prop_assert!(!cuts.nd_harsh_trk.keep(&sr));
    }

    #[test]
    fn fd_composites_match_elementwise_conjunction(sr in arb_record(0..3, 0..3)) {
        let cuts = NusCuts::default();
        let presel = cuts.event_quality.keep(&sr)
            && cuts.fd_fiducial.keep(&sr)
            && cuts.containment.keep(&sr);
        prop_assert_eq!(cuts.fd_presel.keep(&sr), presel);
        prop_assert_eq!(
            cuts.fd.keep(&sr),
            presel && cuts.nc_sel.keep(&sr) && cuts.cos_rej.keep(&sr)
        );
    }

    #[test]
    fn nd_composites_match_elementwise_conjunction(sr in arb_record(1..3, 0..3)) {
        let cuts = NusCuts::default();
        // The strict ND fiducial cut demands a vertex, which this strategy
        // always provides, so elementwise evaluation is well-defined
        let presel = cuts.event_quality.keep(&sr)
            && cuts.nd_fiducial.keep(&sr)
            && cuts.containment.keep(&sr)
            && cuts.nd_harsh_trk.keep(&sr);
        prop_assert_eq!(cuts.nd_presel.keep(&sr), presel);
        prop_assert_eq!(cuts.nd.keep(&sr), presel && cuts.nc_sel.keep(&sr));
    }
}
