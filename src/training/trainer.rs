use log::{info, warn};

use super::{CycleStatus, Outcome, StoppingCondition};
use crate::{exemplar::Exemplar, graph::Network, Result};

/// A learning rule training the network it owns.
pub trait Trainer {
    /// Trains on every exemplar once, in order.
    ///
    /// # Returns
    /// Whether the rule converged during this cycle, or whether its stopping condition halted it.
    fn train_cycle(&mut self, exemplars: &[Exemplar]) -> Result<CycleStatus>;

    fn network(&self) -> &Network;

    fn network_mut(&mut self) -> &mut Network;

    /// Checks the configuration needed to run `train`, before anything is evaluated.
    fn check_ready(&self) -> Result<()> {
        Ok(())
    }

    /// Runs training cycles until convergence or until the stopping condition halts training.
    fn train(&mut self, exemplars: &[Exemplar]) -> Result<Outcome> {
        self.check_ready()?;
        run_cycles(|| self.train_cycle(exemplars))
    }
}

/// Repeats `cycle` until it converges or halts.
pub(crate) fn run_cycles<F>(mut cycle: F) -> Result<Outcome>
where
    F: FnMut() -> Result<CycleStatus>,
{
    let mut cycles = 0;

    loop {
        let status = cycle()?;
        cycles += 1;

        match status {
            CycleStatus::Converged => {
                info!(cycles = cycles; "training converged");
                return Ok(Outcome::Converged { cycles });
            }
            CycleStatus::Halted => {
                info!(cycles = cycles; "training halted");
                return Ok(Outcome::Halted { cycles });
            }
            CycleStatus::NotConverged => {}
        }
    }
}

/// Registers a finished cycle with an optional stopping condition.
pub(crate) fn should_halt(stopping: &mut Option<StoppingCondition>) -> bool {
    let halt = stopping.as_mut().is_some_and(StoppingCondition::tick);
    if halt {
        warn!("the stopping condition was reached, training has ended");
    }

    halt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_cycles_counts_until_convergence() {
        let mut remaining = 3;
        let outcome = run_cycles(|| {
            remaining -= 1;
            Ok(if remaining == 0 {
                CycleStatus::Converged
            } else {
                CycleStatus::NotConverged
            })
        })
        .unwrap();

        assert_eq!(outcome, Outcome::Converged { cycles: 3 });
    }

    #[test]
    fn run_cycles_reports_halts() {
        let outcome = run_cycles(|| Ok(CycleStatus::Halted)).unwrap();
        assert_eq!(outcome, Outcome::Halted { cycles: 1 });
        assert!(!outcome.is_converged());
    }

    #[test]
    fn run_cycles_propagates_errors() {
        let err = run_cycles(|| Err(crate::NetErr::MissingErrorMax)).unwrap_err();
        assert_eq!(err, crate::NetErr::MissingErrorMax);
    }
}
