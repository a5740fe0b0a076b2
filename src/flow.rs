//! Survivor bookkeeping for an ordered sequence of cuts
//!
//! Analysis jobs usually want to know not just how many events pass the full
//! selection, but where the others were lost. A [`CutFlow`] applies a cut
//! sequence to each record it is fed and tabulates the survivor count after
//! every stage; printing it yields the familiar cut-flow table.

use crate::{cut::Cut, numeric::Float, record::StandardRecord};

use std::fmt;

/// One stage of a cut flow: a cut and its survivor count
struct Stage {
    /// The cut applied at this stage
    cut: Cut,

    /// Number of records that survived up to and including this stage
    survivors: u64,
}

/// Survivor counts of an ordered cut sequence over a stream of records
pub struct CutFlow {
    /// The stages, in application order
    stages: Vec<Stage>,

    /// Number of records fed in
    seen: u64,
}
//
impl CutFlow {
    /// Set up a cut flow for an ordered sequence of cuts
    pub fn new(cuts: impl IntoIterator<Item = Cut>) -> Self {
        Self {
            stages: cuts
                .into_iter()
                .map(|cut| Stage { cut, survivors: 0 })
                .collect(),
            seen: 0,
        }
    }

    /// Feed one record through the sequence, and tell whether it survived
    ///
    /// Later stages are not evaluated once an earlier one has failed, so a
    /// gating cut placed first protects precondition-sensitive cuts placed
    /// after it, exactly as in a conjunction.
    pub fn fill(&mut self, sr: &StandardRecord) -> bool {
        self.seen += 1;
        for stage in &mut self.stages {
            if !stage.cut.keep(sr) {
                return false;
            }
            stage.survivors += 1;
        }
        true
    }

    /// Number of records fed in so far
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Number of records that survived the full sequence so far
    pub fn survivors(&self) -> u64 {
        self.stages.last().map_or(self.seen, |stage| stage.survivors)
    }
}

impl fmt::Display for CutFlow {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(fmt, "{:<31}: {:>10} {:>10}", "Cut", "Survivors", "Eff.")?;
        writeln!(fmt, "{:<31}: {:>10}", "(none)", self.seen)?;
        for stage in &self.stages {
            let efficiency = if self.seen > 0 {
                stage.survivors as Float / self.seen as Float
            } else {
                0.
            };
            writeln!(
                fmt,
                "{:<31}: {:>10} {:>10.4}",
                stage.cut.name(),
                stage.survivors,
                efficiency
            )?;
        }
        Ok(())
    }
}
