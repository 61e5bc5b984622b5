//! Bounded balance-correction state machine.
//!
//! ```text
//! checking → passed
//!          → rebalancing → checking
//!          → violated
//! ```
//!
//! A stage is checked once, then re-run at most `max_attempts` times with
//! adjusted parameters. Every state entered is recorded in the returned
//! [`StageBalance`].

use std::collections::BTreeMap;

use telos_config::PipelineConfig;
use telos_core::entities::StageBalance;
use telos_core::enums::{BalanceStage, BalanceState, BalanceStatus, Purpose};

use crate::balance::{BalanceThresholds, measure};
use crate::error::AnalysisError;

/// A pipeline stage whose output the rebalancer can measure and re-run.
pub trait RebalanceStage {
    type Params;
    type Output;

    /// Which stage this is, for the balance record.
    fn stage(&self) -> BalanceStage;

    /// Produce the stage output for `params`.
    ///
    /// # Errors
    ///
    /// Any error aborts rebalancing and is returned unchanged.
    fn run(&self, params: &Self::Params) -> Result<Self::Output, AnalysisError>;

    /// Per-purpose quantity to balance.
    fn measure(&self, output: &Self::Output) -> BTreeMap<Purpose, f64>;

    /// Adjust `params` in favour of the under-represented purposes.
    fn adjust(&self, params: &mut Self::Params, under_represented: &[Purpose]);
}

/// Drives a [`RebalanceStage`] until it balances or runs out of attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rebalancer {
    pub thresholds: BalanceThresholds,
    pub max_attempts: u32,
}

impl From<&PipelineConfig> for Rebalancer {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            thresholds: BalanceThresholds::from(config),
            max_attempts: config.max_rebalance_attempts,
        }
    }
}

impl Rebalancer {
    /// Run `stage`, rebalancing on failed checks.
    ///
    /// A violated balance is not an error: the final output is returned with
    /// a `violated` status.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`RebalanceStage::run`].
    pub fn drive<S: RebalanceStage>(
        &self,
        stage: &S,
        mut params: S::Params,
    ) -> Result<(S::Output, StageBalance), AnalysisError> {
        let kind = stage.stage();
        let mut transitions = vec![BalanceState::Checking];
        let mut output = stage.run(&params)?;
        let mut values = stage.measure(&output);
        let mut metrics = measure(&values, self.thresholds);
        let mut attempts = 0u32;

        while !metrics.balance_passed && attempts < self.max_attempts {
            let under = under_represented(&values);
            tracing::debug!(
                stage = %kind,
                attempt = attempts + 1,
                balance_ratio = metrics.balance_ratio,
                under_represented = ?under,
                "rebalancing"
            );
            transitions.push(BalanceState::Rebalancing);
            stage.adjust(&mut params, &under);
            attempts += 1;

            transitions.push(BalanceState::Checking);
            output = stage.run(&params)?;
            values = stage.measure(&output);
            metrics = measure(&values, self.thresholds);
        }

        let (state, status) = if metrics.balance_passed {
            (BalanceState::Passed, BalanceStatus::Passed)
        } else {
            tracing::warn!(
                stage = %kind,
                attempts,
                balance_ratio = metrics.balance_ratio,
                max_ratio = ?metrics.max_ratio,
                "balance violated after exhausting rebalancing attempts"
            );
            (BalanceState::Violated, BalanceStatus::Violated)
        };
        transitions.push(state);

        Ok((
            output,
            StageBalance {
                stage: kind,
                metrics,
                status,
                attempts,
                transitions,
            },
        ))
    }
}

/// Purposes holding the minimum value, in declaration order.
#[must_use]
pub fn under_represented(values: &BTreeMap<Purpose, f64>) -> Vec<Purpose> {
    let min = values.values().copied().fold(f64::INFINITY, f64::min);
    values
        .iter()
        .filter(|(_, value)| (**value - min).abs() <= f64::EPSILON)
        .map(|(purpose, _)| *purpose)
        .collect()
}

/// True when every recorded transition is allowed by the state machine.
#[must_use]
pub fn transitions_are_valid(record: &StageBalance) -> bool {
    record.transitions.first() == Some(&BalanceState::Checking)
        && record
            .transitions
            .windows(2)
            .all(|pair| pair[0].can_transition_to(pair[1]))
        && record
            .transitions
            .last()
            .is_some_and(|state| state.is_terminal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// Values start skewed; each adjustment adds `step` to the given purposes.
    struct Counter {
        step: f64,
        runs: Cell<u32>,
    }

    impl RebalanceStage for Counter {
        type Params = BTreeMap<Purpose, f64>;
        type Output = BTreeMap<Purpose, f64>;

        fn stage(&self) -> BalanceStage {
            BalanceStage::Vocabulary
        }

        fn run(&self, params: &Self::Params) -> Result<Self::Output, AnalysisError> {
            self.runs.set(self.runs.get() + 1);
            Ok(params.clone())
        }

        fn measure(&self, output: &Self::Output) -> BTreeMap<Purpose, f64> {
            output.clone()
        }

        fn adjust(&self, params: &mut Self::Params, under_represented: &[Purpose]) {
            for purpose in under_represented {
                *params.entry(*purpose).or_default() += self.step;
            }
        }
    }

    fn skewed() -> BTreeMap<Purpose, f64> {
        BTreeMap::from([
            (Purpose::Descriptive, 0.0),
            (Purpose::Explanatory, 4.0),
            (Purpose::Predictive, 4.0),
        ])
    }

    fn rebalancer(max_attempts: u32) -> Rebalancer {
        Rebalancer {
            thresholds: BalanceThresholds::default(),
            max_attempts,
        }
    }

    #[test]
    fn balanced_output_passes_without_rebalancing() {
        let stage = Counter {
            step: 1.0,
            runs: Cell::new(0),
        };
        let params = BTreeMap::from([(Purpose::Causal, 2.0), (Purpose::Intervention, 2.0)]);
        let (_, record) = rebalancer(3).drive(&stage, params).unwrap();
        assert_eq!(record.status, BalanceStatus::Passed);
        assert_eq!(record.attempts, 0);
        assert_eq!(
            record.transitions,
            vec![BalanceState::Checking, BalanceState::Passed]
        );
        assert_eq!(stage.runs.get(), 1);
    }

    #[test]
    fn adjustment_reaches_a_passing_balance() {
        let stage = Counter {
            step: 3.0,
            runs: Cell::new(0),
        };
        let (output, record) = rebalancer(3).drive(&stage, skewed()).unwrap();
        // 0 -> 3: ratio 0.75
        assert!((output[&Purpose::Descriptive] - 3.0).abs() < f64::EPSILON);
        assert_eq!(record.status, BalanceStatus::Passed);
        assert_eq!(record.attempts, 1);
        assert_eq!(
            record.transitions,
            vec![
                BalanceState::Checking,
                BalanceState::Rebalancing,
                BalanceState::Checking,
                BalanceState::Passed,
            ]
        );
        assert!(transitions_are_valid(&record));
    }

    #[test]
    fn exhausted_attempts_report_violation() {
        let stage = Counter {
            step: 0.0,
            runs: Cell::new(0),
        };
        let (_, record) = rebalancer(3).drive(&stage, skewed()).unwrap();
        assert_eq!(record.status, BalanceStatus::Violated);
        assert_eq!(record.attempts, 3);
        assert_eq!(record.transitions.len(), 8);
        assert_eq!(record.transitions.last(), Some(&BalanceState::Violated));
        assert!(transitions_are_valid(&record));
        // initial check plus one run per attempt
        assert_eq!(stage.runs.get(), 4);
    }

    #[test]
    fn zero_attempts_checks_once() {
        let stage = Counter {
            step: 10.0,
            runs: Cell::new(0),
        };
        let (_, record) = rebalancer(0).drive(&stage, skewed()).unwrap();
        assert_eq!(record.status, BalanceStatus::Violated);
        assert_eq!(
            record.transitions,
            vec![BalanceState::Checking, BalanceState::Violated]
        );
        assert_eq!(stage.runs.get(), 1);
    }

    #[test]
    fn minimum_ties_are_all_under_represented() {
        let values = BTreeMap::from([
            (Purpose::Descriptive, 1.0),
            (Purpose::Causal, 1.0),
            (Purpose::Predictive, 5.0),
        ]);
        assert_eq!(
            under_represented(&values),
            vec![Purpose::Descriptive, Purpose::Causal]
        );
    }
}
