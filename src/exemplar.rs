use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{graph::Network, NetErr, Result};

/// A labeled training example: the inputs fed to the network and the outputs it should give.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exemplar {
    inputs: Vec<f32>,
    desired: Vec<f32>,
}

impl Exemplar {
    pub fn new(inputs: Vec<f32>, desired: Vec<f32>) -> Self {
        Self { inputs, desired }
    }

    pub fn inputs(&self) -> &[f32] {
        &self.inputs
    }

    pub fn desired(&self) -> &[f32] {
        &self.desired
    }
}

impl<const I: usize, const O: usize> From<([f32; I], [f32; O])> for Exemplar {
    fn from((inputs, desired): ([f32; I], [f32; O])) -> Self {
        Self::new(inputs.to_vec(), desired.to_vec())
    }
}

/// Checks that every exemplar matches the sizes of the network's input and output layers.
///
/// # Errors
/// `SizeMismatch` for the first offending exemplar.
pub fn validate(exemplars: &[Exemplar], network: &Network) -> Result<()> {
    let inputs = network.input_layer()?.len();
    let outputs = network.output_layer()?.len();

    for exemplar in exemplars {
        if exemplar.inputs.len() != inputs {
            return Err(NetErr::SizeMismatch {
                what: "exemplar inputs",
                got: exemplar.inputs.len(),
                expected: inputs,
            });
        }

        if exemplar.desired.len() != outputs {
            return Err(NetErr::SizeMismatch {
                what: "exemplar desired outputs",
                got: exemplar.desired.len(),
                expected: outputs,
            });
        }
    }

    Ok(())
}

/// Shuffles an exemplar set in place.
pub fn shuffle<R: Rng + ?Sized>(exemplars: &mut [Exemplar], rng: &mut R) {
    exemplars.shuffle(rng);
}
