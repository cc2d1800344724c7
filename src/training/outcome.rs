/// The result of a single training cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStatus {
    Converged,
    NotConverged,
    /// The stopping condition asked to end training.
    Halted,
}

/// How a training run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Converged { cycles: usize },
    Halted { cycles: usize },
}

impl Outcome {
    /// The amount of training cycles that were run.
    pub fn cycles(&self) -> usize {
        match *self {
            Outcome::Converged { cycles } | Outcome::Halted { cycles } => cycles,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Outcome::Converged { .. })
    }
}
