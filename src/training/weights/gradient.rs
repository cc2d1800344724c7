use serde::{Deserialize, Serialize};

use super::{apply, check_shape, weight_changes, MomentumHistory, WeightChanger, WeightChanges};
use crate::{graph::Network, Result};

/// Settings of the gradient descent weight changer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDescentConfig {
    /// Scales every weight change.
    pub learning_constant: f32,
    /// Share of the previous pass's change added to each weight, 0 disables momentum.
    pub momentum_constant: f32,
    /// Whether each upper unit also adds its own error to its next input.
    pub use_bias: bool,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self {
            learning_constant: 0.1,
            momentum_constant: 0.,
            use_bias: false,
        }
    }
}

/// Gradient descent with momentum: the change of the weight from input `w` to unit `i` is
/// `learning_constant * errors[i] * inputs[w]`, plus `momentum_constant` times the change the
/// same weight received during the previous pass.
#[derive(Clone, Debug)]
pub struct GradientDescent {
    config: GradientDescentConfig,
    history: MomentumHistory,
}

impl GradientDescent {
    /// Creates a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `config` - The learning settings.
    /// * `transitions` - The amount of layer transitions changed on each pass.
    pub fn new(config: GradientDescentConfig, transitions: usize) -> Self {
        Self {
            config,
            history: MomentumHistory::new(transitions),
        }
    }

    pub fn config(&self) -> &GradientDescentConfig {
        &self.config
    }

    pub fn history(&self) -> &MomentumHistory {
        &self.history
    }

    /// Closes a training pass, every transition must have changed its weights once.
    pub fn end_pass(&mut self) -> Result<()> {
        self.history.commit()
    }

    /// Forgets the changes of a pass that failed before [`end_pass`](GradientDescent::end_pass).
    pub fn abort_pass(&mut self) {
        self.history.discard_pending();
    }
}

impl WeightChanger for GradientDescent {
    fn change_weights(
        &mut self,
        network: &mut Network,
        transition: usize,
        errors: &[f32],
        inputs: &[f32],
    ) -> Result<WeightChanges> {
        let upper = transition + 1;
        check_shape(network, upper, errors.len(), inputs.len())?;

        let GradientDescentConfig {
            learning_constant,
            momentum_constant,
            use_bias,
        } = self.config;

        let changes = weight_changes(errors, inputs, |error, input| {
            learning_constant * error * input
        });
        self.history.enqueue(transition, changes.clone())?;

        if use_bias {
            let units = network.layer(upper)?.units().to_vec();
            for (id, &error) in units.into_iter().zip(errors) {
                network.add_input(id, error);
            }
        }

        let momentum = match self.history.dequeue(transition) {
            Some(previous) if momentum_constant > 0. => Some((momentum_constant, previous)),
            _ => None,
        };

        apply(network, upper, &changes, momentum)?;
        Ok(changes)
    }
}
