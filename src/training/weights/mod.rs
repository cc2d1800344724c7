//! Weight change strategies: they compute the change of every weight entering a layer and apply
//! it in place.
//!
//! A weight change matrix has one row per unit of the upper layer and one column per input
//! activation, so `changes[i][w]` belongs to the `w`-th incoming weight of the `i`-th unit.

mod gradient;
mod momentum;
mod sign;

pub use gradient::{GradientDescent, GradientDescentConfig};
pub use momentum::MomentumHistory;
pub use sign::SignRule;

use crate::{graph::Network, NetErr, Result};

/// The changes computed for the weights between two adjacent layers.
pub type WeightChanges = Vec<Vec<f32>>;

/// A strategy mutating the weights of one layer transition.
///
/// Transition `t` is made of the weights going from layer `t` to layer `t + 1`.
pub trait WeightChanger {
    /// Computes and applies the weight changes of a transition.
    ///
    /// # Arguments
    /// * `network` - The network whose weights change.
    /// * `transition` - The index of the layer below the weights.
    /// * `errors` - One error per unit of the upper layer.
    /// * `inputs` - The activations feeding the weights, one per incoming weight.
    ///
    /// # Returns
    /// The applied changes, without any momentum.
    fn change_weights(
        &mut self,
        network: &mut Network,
        transition: usize,
        errors: &[f32],
        inputs: &[f32],
    ) -> Result<WeightChanges>;
}

/// Builds a weight change matrix, `change(error, input)` for every (error, input) pair.
fn weight_changes<F>(errors: &[f32], inputs: &[f32], change: F) -> WeightChanges
where
    F: Fn(f32, f32) -> f32,
{
    errors
        .iter()
        .map(|&error| inputs.iter().map(|&input| change(error, input)).collect())
        .collect()
}

/// Checks that `upper` has one unit per error and that each of them has one incoming weight per
/// input.
fn check_shape(network: &Network, upper: usize, errors: usize, inputs: usize) -> Result<()> {
    let layer = network.layer(upper)?;
    if layer.len() != errors {
        return Err(NetErr::SizeMismatch {
            what: "errors",
            got: errors,
            expected: layer.len(),
        });
    }

    for &id in layer.units() {
        let expected = network.unit(id).incoming().len();
        if expected != inputs {
            return Err(NetErr::SizeMismatch {
                what: "input activations",
                got: inputs,
                expected,
            });
        }
    }

    Ok(())
}

/// Adds `changes`, plus `momentum.0 * momentum.1` when given, to the weights entering `upper`.
fn apply(
    network: &mut Network,
    upper: usize,
    changes: &WeightChanges,
    momentum: Option<(f32, &WeightChanges)>,
) -> Result<()> {
    if let Some((_, previous)) = momentum {
        let same_shape = previous.len() == changes.len()
            && previous.iter().zip(changes).all(|(p, c)| p.len() == c.len());

        if !same_shape {
            return Err(NetErr::SizeMismatch {
                what: "previous weight changes",
                got: previous.len(),
                expected: changes.len(),
            });
        }
    }

    let units = network.layer(upper)?.units().to_vec();

    for (i, (row, id)) in changes.iter().zip(units).enumerate() {
        for (w, &change) in row.iter().enumerate() {
            let momentum_change =
                momentum.map_or(0., |(constant, previous)| constant * previous[i][w]);
            let weight = network.unit(id).incoming()[w];
            network.weight_mut(weight).adjust(change + momentum_change);
        }
    }

    Ok(())
}
