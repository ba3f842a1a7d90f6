//! Objective functions over score results.

use super::types::ScoreResult;
use crate::model::SlotGroup;

/// Scalar objective driving every optimizer.
///
/// Higher values are better. Implemented for any
/// `Fn(&ScoreResult) -> f64`, so closures can be passed directly.
pub trait Objective: Send + Sync {
    fn evaluate(&self, score: &ScoreResult) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&ScoreResult) -> f64 + Send + Sync,
{
    fn evaluate(&self, score: &ScoreResult) -> f64 {
        self(score)
    }
}

/// Which aggregate an objective reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreScope {
    #[default]
    Overall,
    Group(SlotGroup),
}

/// Continuous or integer-rounded score path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreKind {
    Raw,
    #[default]
    Rounded,
}

/// Reads one aggregate of a [`ScoreResult`].
///
/// The default is the overall rounded score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreObjective {
    pub scope: ScoreScope,
    pub kind: ScoreKind,
}

impl ScoreObjective {
    pub fn new(scope: ScoreScope, kind: ScoreKind) -> Self {
        Self { scope, kind }
    }

    pub fn overall_raw() -> Self {
        Self::new(ScoreScope::Overall, ScoreKind::Raw)
    }
}

impl Objective for ScoreObjective {
    fn evaluate(&self, score: &ScoreResult) -> f64 {
        let agg = match self.scope {
            ScoreScope::Overall => score.overall,
            ScoreScope::Group(g) => score.group(g),
        };
        match self.kind {
            ScoreKind::Raw => agg.raw,
            ScoreKind::Rounded => agg.rounded,
        }
    }
}
