use std::{fmt, num::NonZeroUsize};

use crate::{NetErr, Result};

type Predicate = Box<dyn FnMut() -> bool>;

/// A predicate checked every `interval` training cycles; training halts once it returns `true`.
pub struct StoppingCondition {
    predicate: Predicate,
    interval: NonZeroUsize,
    cycles: usize,
}

impl StoppingCondition {
    /// Creates a new `StoppingCondition`.
    ///
    /// # Arguments
    /// * `predicate` - Decides whether training should end.
    /// * `interval` - The amount of cycles completed between two checks.
    pub fn new<P>(predicate: P, interval: NonZeroUsize) -> Self
    where
        P: FnMut() -> bool + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            interval,
            cycles: 0,
        }
    }

    /// Builds a stopping condition out of optional parts, both or neither have to be present.
    ///
    /// # Errors
    /// * `StoppingConditionWithoutInterval` if only the predicate is given, or the interval is 0.
    /// * `IntervalWithoutStoppingCondition` if only the interval is given.
    pub fn try_new(predicate: Option<Predicate>, interval: Option<usize>) -> Result<Option<Self>> {
        match (predicate, interval.map(NonZeroUsize::new)) {
            (None, None) => Ok(None),
            (Some(predicate), Some(Some(interval))) => Ok(Some(Self {
                predicate,
                interval,
                cycles: 0,
            })),
            (Some(_), _) => Err(NetErr::StoppingConditionWithoutInterval),
            (None, Some(_)) => Err(NetErr::IntervalWithoutStoppingCondition),
        }
    }

    /// Halts training once `max` cycles have run.
    pub fn max_cycles(max: NonZeroUsize) -> Self {
        Self::new(|| true, max)
    }

    pub fn interval(&self) -> NonZeroUsize {
        self.interval
    }

    /// Cycles completed since the last check.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Registers a completed cycle.
    ///
    /// # Returns
    /// `true` if the check was due and the predicate asked to stop.
    pub(crate) fn tick(&mut self) -> bool {
        self.cycles += 1;
        if self.cycles < self.interval.get() {
            return false;
        }

        if (self.predicate)() {
            return true;
        }

        self.cycles = 0;
        false
    }
}

impl fmt::Debug for StoppingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoppingCondition")
            .field("interval", &self.interval)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}
