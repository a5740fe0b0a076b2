//! NC-sample event selection cuts
//!
//!
//! # Introduction (for the physicist)
//!
//! This small library implements the event selection for a neutral-current
//! neutrino sample in a two-detector oscillation search. Each selection
//! criterion is a "cut": a boolean test over one reconstructed event record,
//! comparing vertex positions, track and shower quantities, particle-ID
//! scores, and containment margins against thresholds taken from the analysis
//! documentation. Cuts are combined by logical AND into a preselection and a
//! final selection for each of the two detector sites (near and far).
//!
//!
//! # Introduction (for the computer guy)
//!
//! There are three layers here:
//!
//! * a [`StandardRecord`](record::StandardRecord) schema describing one
//!   reconstructed event, with possibly-empty candidate lists,
//! * a composable [`Cut`](cut::Cut) value pairing a pure scoring function
//!   with the list of record branches it reads,
//! * a [`NusCuts`](cuts::NusCuts) catalog instantiating every named cut from
//!   an immutable geometry + threshold configuration.
//!
//! Every cut is a pure function of its record: evaluation never mutates
//! shared state, so cuts may be applied from any number of threads at once.

#![warn(missing_docs)]

pub mod config;
pub mod cut;
pub mod cuts;
pub mod flow;
pub mod geometry;
pub mod linalg;
pub mod numeric;
pub mod record;

pub use crate::{
    config::Configuration,
    cut::Cut,
    cuts::{CutParams, NusCuts},
    flow::CutFlow,
    geometry::{DetectorBox, DetectorSite, Geometry},
    record::StandardRecord,
};

/// We'll use anyhow's type-erased result type throughout the crate
pub type Result<T> = anyhow::Result<T>;
