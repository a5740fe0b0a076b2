//! Mechanism to apply a selection cut to reconstructed event records
//!
//! A [`Cut`] pairs a pure scoring function over a [`StandardRecord`] with the
//! list of record branches the function reads. The branch list is purely
//! descriptive metadata, used for reporting which parts of the record a
//! selection depends on; it plays no role in evaluation.
//!
//! Cuts form a small boolean algebra: `&` builds the short-circuit
//! conjunction of two cuts, `|` the disjunction and `!` the negation. The
//! shipped selections only use conjunction, but there is no reason to
//! artificially truncate the algebra.

use crate::record::StandardRecord;

use std::{
    fmt,
    ops::{BitAnd, BitOr, Not},
    sync::Arc,
};

/// Scoring functions are shared so that composite cuts can reuse their
/// operands without copying them, and `Send + Sync` so that evaluation can
/// happen from any thread.
type Scorer = Arc<dyn Fn(&StandardRecord) -> bool + Send + Sync>;

/// A named boolean selection criterion over event records
#[derive(Clone)]
pub struct Cut {
    /// Human-readable name of the selection
    name: String,

    /// Record branches the scoring function reads, sorted and deduplicated
    branches: Vec<&'static str>,

    /// The selection itself
    scorer: Scorer,
}
//
impl Cut {
    /// Build a cut from a branch list and a scoring function
    pub fn new(
        name: impl Into<String>,
        branches: &[&'static str],
        scorer: impl Fn(&StandardRecord) -> bool + Send + Sync + 'static,
    ) -> Self {
        let mut branches = branches.to_vec();
        branches.sort_unstable();
        branches.dedup();
        Self {
            name: name.into(),
            branches,
            scorer: Arc::new(scorer),
        }
    }

    /// Decide whether an event record passes this cut
    pub fn keep(&self, sr: &StandardRecord) -> bool {
        (self.scorer)(sr)
    }

    /// Name of this cut
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record branches this cut declares a dependency on
    pub fn branches(&self) -> &[&'static str] {
        &self.branches
    }

    /// Replace the (possibly machine-generated) name of this cut
    ///
    /// Composite cuts get a name derived from their operands; registries can
    /// use this to substitute the name the analysis knows them by.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Union of the branch lists of two cuts
    fn merged_branches(&self, other: &Self) -> Vec<&'static str> {
        let mut branches = [&self.branches[..], &other.branches[..]].concat();
        branches.sort_unstable();
        branches.dedup();
        branches
    }
}

impl fmt::Debug for Cut {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Cut")
            .field("name", &self.name)
            .field("branches", &self.branches)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Cut {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self.name)
    }
}

impl BitAnd for &Cut {
    type Output = Cut;

    /// Short-circuit conjunction: the right operand is not evaluated on
    /// records that already fail the left operand
    fn bitand(self, rhs: &Cut) -> Cut {
        let lhs_scorer = Arc::clone(&self.scorer);
        let rhs_scorer = Arc::clone(&rhs.scorer);
        Cut {
            name: format!("{} && {}", self.name, rhs.name),
            branches: self.merged_branches(rhs),
            scorer: Arc::new(move |sr| lhs_scorer(sr) && rhs_scorer(sr)),
        }
    }
}

impl BitAnd for Cut {
    type Output = Cut;

    fn bitand(self, rhs: Cut) -> Cut {
        &self & &rhs
    }
}

impl BitAnd<&Cut> for Cut {
    type Output = Cut;

    fn bitand(self, rhs: &Cut) -> Cut {
        &self & rhs
    }
}

impl BitAnd<Cut> for &Cut {
    type Output = Cut;

    fn bitand(self, rhs: Cut) -> Cut {
        self & &rhs
    }
}

impl BitOr for &Cut {
    type Output = Cut;

    /// Short-circuit disjunction
    fn bitor(self, rhs: &Cut) -> Cut {
        let lhs_scorer = Arc::clone(&self.scorer);
        let rhs_scorer = Arc::clone(&rhs.scorer);
        Cut {
            name: format!("{} || {}", self.name, rhs.name),
            branches: self.merged_branches(rhs),
            scorer: Arc::new(move |sr| lhs_scorer(sr) || rhs_scorer(sr)),
        }
    }
}

impl BitOr for Cut {
    type Output = Cut;

    fn bitor(self, rhs: Cut) -> Cut {
        &self | &rhs
    }
}

impl BitOr<&Cut> for Cut {
    type Output = Cut;

    fn bitor(self, rhs: &Cut) -> Cut {
        &self | rhs
    }
}

impl BitOr<Cut> for &Cut {
    type Output = Cut;

    fn bitor(self, rhs: Cut) -> Cut {
        self | &rhs
    }
}

impl Not for &Cut {
    type Output = Cut;

    fn not(self) -> Cut {
        let scorer = Arc::clone(&self.scorer);
        Cut {
            name: format!("!({})", self.name),
            branches: self.branches.clone(),
            scorer: Arc::new(move |sr| !scorer(sr)),
        }
    }
}

impl Not for Cut {
    type Output = Cut;

    fn not(self) -> Cut {
        !&self
    }
}
