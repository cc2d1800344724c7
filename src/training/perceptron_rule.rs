use log::{debug, trace};

use super::{
    trainer::should_halt,
    weights::{SignRule, WeightChanger},
    CycleStatus, StoppingCondition, Trainer,
};
use crate::{
    exemplar::{self, Exemplar},
    graph::Network,
    NetErr, Result,
};

/// The discrete perceptron learning rule for networks made of an input and an output layer.
///
/// An exemplar is classified correctly when every output matches its desired value exactly, so
/// the output units should use a threshold activation. A cycle converges once every exemplar of
/// the cycle was classified correctly.
#[derive(Debug)]
pub struct PerceptronRule {
    network: Network,
    changer: SignRule,
    stopping: Option<StoppingCondition>,
    cycles: usize,
}

impl PerceptronRule {
    /// Creates a new `PerceptronRule`.
    ///
    /// # Arguments
    /// * `network` - An input layer fully connected to an output layer.
    /// * `learning_constant` - The size of every weight change.
    /// * `stopping` - An optional condition to end training early.
    ///
    /// # Errors
    /// `TooFewLayers`, `SizeMismatch` or `Miswired` if the network is not a single input to output
    /// weight matrix.
    pub fn new(
        network: Network,
        learning_constant: f32,
        stopping: Option<StoppingCondition>,
    ) -> Result<Self> {
        network.validate_stack()?;

        let layers = network.layers().len();
        if layers != 2 {
            return Err(NetErr::SizeMismatch {
                what: "layers",
                got: layers,
                expected: 2,
            });
        }

        Ok(Self {
            network,
            changer: SignRule::new(learning_constant),
            stopping,
            cycles: 0,
        })
    }

    pub fn changer(&self) -> &SignRule {
        &self.changer
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Evaluates an exemplar, changes the weights if it was misclassified and resets the network.
    ///
    /// # Returns
    /// Whether the exemplar was classified correctly before any weight changed.
    pub fn train_single(&mut self, exemplar: &Exemplar) -> Result<bool> {
        exemplar::validate(std::slice::from_ref(exemplar), &self.network)?;
        self.network.validate_stack()?;

        let correct = self.classify_and_correct(exemplar);
        self.network.reset();

        let correct = correct?;
        trace!(correct = correct; "exemplar trained");
        Ok(correct)
    }

    fn classify_and_correct(&mut self, exemplar: &Exemplar) -> Result<bool> {
        let outputs = self.network.activate(exemplar.inputs())?;

        let correct = outputs
            .iter()
            .zip(exemplar.desired())
            .all(|(actual, desired)| actual == desired);

        if !correct {
            let errors: Vec<f32> = outputs
                .iter()
                .zip(exemplar.desired())
                .map(|(actual, desired)| actual - desired)
                .collect();

            self.changer
                .change_weights(&mut self.network, 0, &errors, exemplar.inputs())?;
        }

        Ok(correct)
    }
}

impl Trainer for PerceptronRule {
    fn train_cycle(&mut self, exemplars: &[Exemplar]) -> Result<CycleStatus> {
        exemplar::validate(exemplars, &self.network)?;

        let mut correct = 0;
        for exemplar in exemplars {
            if self.train_single(exemplar)? {
                correct += 1;
            }
        }

        self.cycles += 1;
        debug!(
            cycle = self.cycles,
            correct = correct,
            total = exemplars.len();
            "training cycle finished"
        );

        if should_halt(&mut self.stopping) {
            return Ok(CycleStatus::Halted);
        }

        if correct == exemplars.len() {
            Ok(CycleStatus::Converged)
        } else {
            Ok(CycleStatus::NotConverged)
        }
    }

    fn network(&self) -> &Network {
        &self.network
    }

    fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }
}
