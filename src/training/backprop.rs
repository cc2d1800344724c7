use log::{debug, trace};

use super::{
    trainer::should_halt,
    weights::{GradientDescent, GradientDescentConfig, WeightChanger},
    CycleStatus, StoppingCondition, Trainer,
};
use crate::{
    exemplar::{self, Exemplar},
    graph::Network,
    NetErr, Result,
};

/// Multi layer gradient descent through error back propagation.
///
/// Each exemplar is trained on as soon as it is evaluated (online learning): the output layer's
/// weights are changed first, then the error travels down one layer at a time through the already
/// changed weights. A cycle converges when the quadratic error summed over all of its exemplars
/// drops below `error_max`.
#[derive(Debug)]
pub struct ErrorBackPropagation {
    network: Network,
    changer: GradientDescent,
    error_max: Option<f32>,
    stopping: Option<StoppingCondition>,
    cycles: usize,
}

impl ErrorBackPropagation {
    /// Creates a new `ErrorBackPropagation`.
    ///
    /// # Arguments
    /// * `network` - The network to train, a stack of fully connected layers.
    /// * `config` - The gradient descent settings.
    /// * `stopping` - An optional condition to end training early.
    ///
    /// # Errors
    /// `TooFewLayers`, `SizeMismatch` or `Miswired` if the network is not a stack of fully
    /// connected layers.
    pub fn new(
        network: Network,
        config: GradientDescentConfig,
        stopping: Option<StoppingCondition>,
    ) -> Result<Self> {
        network.validate_stack()?;
        let transitions = network.layers().len() - 1;
        let changer = GradientDescent::new(config, transitions);
        Self::with_changer(network, changer, stopping)
    }

    /// Creates a new `ErrorBackPropagation` with a weight changer configured elsewhere.
    ///
    /// # Errors
    /// `MomentumMismatch` if the changer does not expect one weight change per layer transition of
    /// the network.
    pub fn with_changer(
        network: Network,
        changer: GradientDescent,
        stopping: Option<StoppingCondition>,
    ) -> Result<Self> {
        network.validate_stack()?;

        let expected = network.layers().len() - 1;
        let got = changer.history().transitions();
        if got != expected {
            return Err(NetErr::MomentumMismatch { got, expected });
        }

        Ok(Self {
            network,
            changer,
            error_max: None,
            stopping,
            cycles: 0,
        })
    }

    /// Sets the cycle error below which training has converged.
    pub fn set_error_max(&mut self, error_max: f32) {
        self.error_max = Some(error_max);
    }

    pub fn with_error_max(mut self, error_max: f32) -> Self {
        self.set_error_max(error_max);
        self
    }

    pub fn error_max(&self) -> Option<f32> {
        self.error_max
    }

    pub fn changer(&self) -> &GradientDescent {
        &self.changer
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Trains on a single exemplar and resets the network.
    ///
    /// # Returns
    /// The exemplar's quadratic error, `0.5 * sum((desired - actual)^2)`, measured before the
    /// weights changed.
    ///
    /// # Errors
    /// `SizeMismatch` or `Miswired` if the exemplar or the network's wiring no longer fit, before
    /// any weight changes. A pass failing halfway leaves no pending momentum behind.
    pub fn train_single(&mut self, exemplar: &Exemplar) -> Result<f32> {
        exemplar::validate(std::slice::from_ref(exemplar), &self.network)?;
        self.network.validate_stack()?;

        let error = self.propagate(exemplar);
        self.network.reset();
        if error.is_err() {
            self.changer.abort_pass();
        }

        let error = error?;
        trace!(error = error; "exemplar trained");
        Ok(error)
    }

    fn propagate(&mut self, exemplar: &Exemplar) -> Result<f32> {
        let outputs = self.network.activate(exemplar.inputs())?;
        let top = self.network.layers().len() - 1;

        let mut errors: Vec<f32> = outputs
            .iter()
            .zip(exemplar.desired())
            .map(|(&actual, &desired)| output_error(desired, actual))
            .collect();

        let below = self.network.activations(top - 1)?;
        self.changer
            .change_weights(&mut self.network, top - 1, &errors, &below)?;

        for layer in (1..top).rev() {
            let hidden = self.hidden_errors(layer, &errors)?;
            let below = self.network.activations(layer - 1)?;
            self.changer
                .change_weights(&mut self.network, layer - 1, &hidden, &below)?;
            errors = hidden;
        }

        self.changer.end_pass()?;

        Ok(quadratic_error(&outputs, exemplar.desired()))
    }

    /// Back propagates the errors of the layer above to the units of `layer`:
    /// `a * (1 - a) * sum(upper_errors[k] * strength_k)` over each unit's outgoing weights.
    fn hidden_errors(&self, layer: usize, upper_errors: &[f32]) -> Result<Vec<f32>> {
        let units = self.network.layer(layer)?.units();

        units
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let unit = self.network.unit(id);
                let activation = unit
                    .activation()
                    .ok_or(NetErr::UnitNotFired { layer, unit: i })?;

                if unit.outgoing().len() != upper_errors.len() {
                    return Err(NetErr::SizeMismatch {
                        what: "outgoing weights",
                        got: unit.outgoing().len(),
                        expected: upper_errors.len(),
                    });
                }

                let weighted: f32 = unit
                    .outgoing()
                    .iter()
                    .zip(upper_errors)
                    .map(|(&w, &error)| error * self.network.weight(w).strength())
                    .sum();

                Ok(activation * (1. - activation) * weighted)
            })
            .collect()
    }
}

impl Trainer for ErrorBackPropagation {
    fn train_cycle(&mut self, exemplars: &[Exemplar]) -> Result<CycleStatus> {
        let error_max = self.error_max.ok_or(NetErr::MissingErrorMax)?;
        exemplar::validate(exemplars, &self.network)?;

        let mut total = 0.;
        for exemplar in exemplars {
            total += self.train_single(exemplar)?;
        }

        self.cycles += 1;
        debug!(cycle = self.cycles, error = total; "training cycle finished");

        if should_halt(&mut self.stopping) {
            return Ok(CycleStatus::Halted);
        }

        if total < error_max {
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

    fn check_ready(&self) -> Result<()> {
        self.error_max.map(|_| ()).ok_or(NetErr::MissingErrorMax)
    }
}

/// The sigmoid weighted delta of an output unit.
fn output_error(desired: f32, actual: f32) -> f32 {
    (desired - actual) * actual * (1. - actual)
}

fn quadratic_error(outputs: &[f32], desired: &[f32]) -> f32 {
    0.5 * outputs
        .iter()
        .zip(desired)
        .map(|(&actual, &desired)| (desired - actual).powi(2))
        .sum::<f32>()
}
