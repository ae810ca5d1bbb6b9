//! Break-even aggregation over a batch of rides.

use crate::money::Money;
use crate::ride::Ride;
use std::fmt;

/// How spending is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// The pass actually held: spend is the pass plus every row adjustment.
    FixedPass,

    /// A what-if pass covering rides up to `limit`: spend is the pass plus
    /// whatever each ride costs above the limit.
    Limit(Money),
}

/// Which side of break-even the batch landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Regular fares met or exceeded spend by this much.
    Saved(Money),

    /// Spend exceeded regular fares by this much.
    Shortfall(Money),
}

/// Result of a break-even check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub mode: PassMode,

    /// Sum of regular fares of every ride.
    pub total_regular: Money,

    /// What was (or would have been) spent.
    pub total_spent: Money,

    pub outcome: Outcome,
}

impl Verdict {
    /// `true` when the pass at least broke even.
    pub fn broke_even(&self) -> bool {
        matches!(self.outcome, Outcome::Saved(_))
    }

    /// Surplus if positive, shortfall as a negative amount.
    pub fn balance(&self) -> Money {
        self.total_regular - self.total_spent
    }

    /// Human-readable verdict.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mode, self.outcome) {
            (PassMode::FixedPass, Outcome::Saved(amount)) => {
                write!(f, "You have saved ${} with your pass!", amount)
            }
            (PassMode::FixedPass, Outcome::Shortfall(amount)) => write!(
                f,
                "You have not broken even with the pass. You need to spend at least ${} more to break even.",
                amount
            ),
            (PassMode::Limit(_), Outcome::Saved(amount)) => {
                write!(f, "You would save ${} with that pass!", amount)
            }
            (PassMode::Limit(_), Outcome::Shortfall(amount)) => write!(
                f,
                "You would not break even with that pass. You'd need to spend at least ${} more to break even.",
                amount
            ),
        }
    }
}

/// Aggregates rides against a pass price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakEvenCalculator {
    pass_cost: Money,
    mode: PassMode,
}

impl BreakEvenCalculator {
    /// Picks fixed-pass mode when `limit` is `None`, limit mode otherwise.
    pub fn new(pass_cost: Money, limit: Option<Money>) -> Self {
        let mode = match limit {
            Some(limit) => PassMode::Limit(limit),
            None => PassMode::FixedPass,
        };
        BreakEvenCalculator { pass_cost, mode }
    }

    pub fn mode(&self) -> PassMode {
        self.mode
    }

    pub fn evaluate(&self, rides: &[Ride]) -> Verdict {
        let total_regular: Money = rides.iter().map(Ride::regular_cost).sum();
        let extra: Money = match self.mode {
            PassMode::FixedPass => rides.iter().map(Ride::adjustment).sum(),
            PassMode::Limit(limit) => rides
                .iter()
                .map(|ride| ride.regular_cost().excess_over(limit))
                .sum(),
        };
        let total_spent = self.pass_cost + extra;

        let outcome = if total_regular >= total_spent {
            Outcome::Saved(total_regular - total_spent)
        } else {
            Outcome::Shortfall(total_spent - total_regular)
        };

        Verdict {
            mode: self.mode,
            total_regular,
            total_spent,
            outcome,
        }
    }
}
