//! Stake escalation ladders.
//!
//! A hand starts at the ladder's first step and every accepted raise moves it
//! one step up. Variants differ only in the steps, so the ladder is plain
//! configuration rather than code.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LadderError {
    #[error("stake ladder must have at least one step")]
    Empty,
    #[error("stake ladder must start above zero")]
    ZeroStart,
    #[error("stake ladder must be strictly increasing: {prev} then {next}")]
    NotIncreasing { prev: u32, next: u32 },
}

/// A fixed, strictly increasing progression of hand values.
///
/// ```
/// use truco_rs::stakes::StakeLadder;
///
/// let ladder = StakeLadder::default();
/// assert_eq!(ladder.initial(), 1);
/// assert_eq!(ladder.next_after(1), Some(3));
/// assert_eq!(ladder.next_after(12), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct StakeLadder {
    steps: Vec<u32>,
}

impl StakeLadder {
    pub fn try_new(steps: Vec<u32>) -> Result<Self, LadderError> {
        let first = *steps.first().ok_or(LadderError::Empty)?;
        if first == 0 {
            return Err(LadderError::ZeroStart);
        }
        if let Some(w) = steps.windows(2).find(|w| w[1] <= w[0]) {
            return Err(LadderError::NotIncreasing { prev: w[0], next: w[1] });
        }
        Ok(Self { steps })
    }

    /// Paulista progression: 1, 3, 6, 9, 12.
    pub fn paulista() -> Self {
        Self { steps: vec![1, 3, 6, 9, 12] }
    }

    /// Mineiro progression: 2, 4, 6, 10, 12.
    pub fn mineiro() -> Self {
        Self { steps: vec![2, 4, 6, 10, 12] }
    }

    pub fn initial(&self) -> u32 {
        self.steps[0]
    }

    pub fn max(&self) -> u32 {
        self.steps[self.steps.len() - 1]
    }

    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step a raise from `stake` would propose, if any remains.
    pub fn next_after(&self, stake: u32) -> Option<u32> {
        self.steps.iter().copied().find(|&s| s > stake)
    }

    pub fn is_max(&self, stake: u32) -> bool {
        self.next_after(stake).is_none()
    }
}

impl Default for StakeLadder {
    fn default() -> Self {
        Self::paulista()
    }
}

impl TryFrom<Vec<u32>> for StakeLadder {
    type Error = LadderError;
    fn try_from(steps: Vec<u32>) -> Result<Self, Self::Error> {
        Self::try_new(steps)
    }
}

impl From<StakeLadder> for Vec<u32> {
    fn from(ladder: StakeLadder) -> Self {
        ladder.steps
    }
}
