use super::{apply, check_shape, weight_changes, WeightChanger, WeightChanges};
use crate::{graph::Network, Result};

/// The discrete perceptron rule: each weight moves `learning_constant * input` against the sign
/// of the error of its unit. There is no momentum and no bias.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignRule {
    learning_constant: f32,
}

impl SignRule {
    pub fn new(learning_constant: f32) -> Self {
        Self { learning_constant }
    }

    pub fn learning_constant(&self) -> f32 {
        self.learning_constant
    }

    /// The change of a weight fed by `input` into a unit whose error is `error`.
    pub fn change(&self, error: f32, input: f32) -> f32 {
        let direction = if error > 0. {
            -1.
        } else if error < 0. {
            1.
        } else {
            0.
        };

        direction * self.learning_constant * input
    }
}

impl WeightChanger for SignRule {
    fn change_weights(
        &mut self,
        network: &mut Network,
        transition: usize,
        errors: &[f32],
        inputs: &[f32],
    ) -> Result<WeightChanges> {
        let upper = transition + 1;
        check_shape(network, upper, errors.len(), inputs.len())?;

        let changes = weight_changes(errors, inputs, |error, input| self.change(error, input));
        apply(network, upper, &changes, None)?;
        Ok(changes)
    }
}
