use log::info;
use rand::rngs::StdRng;

use super::{trainer::run_cycles, Outcome, Trainer};
use crate::{
    exemplar::{self, Exemplar},
    graph::Network,
    initialization::{initialize, WeightGen},
    Result,
};

/// Drives a learning rule from randomized weights to the end of training.
pub struct PerceptronTrainer {
    rule: Box<dyn Trainer>,
    weight_gen: Box<dyn WeightGen>,
    shuffle: Option<StdRng>,
}

impl PerceptronTrainer {
    /// Creates a new `PerceptronTrainer`.
    ///
    /// # Arguments
    /// * `rule` - The learning rule, owning the network to train.
    /// * `weight_gen` - Draws the initial strength of every weight.
    pub fn new(rule: Box<dyn Trainer>, weight_gen: Box<dyn WeightGen>) -> Self {
        Self {
            rule,
            weight_gen,
            shuffle: None,
        }
    }

    /// Shuffles the exemplars before every training cycle.
    pub fn with_shuffle(mut self, rng: StdRng) -> Self {
        self.shuffle = Some(rng);
        self
    }

    pub fn rule(&self) -> &dyn Trainer {
        self.rule.as_ref()
    }

    pub fn network(&self) -> &Network {
        self.rule.network()
    }

    pub fn network_mut(&mut self) -> &mut Network {
        self.rule.network_mut()
    }

    /// Randomizes every weight of the network and trains it on `exemplars`.
    ///
    /// The configuration of the rule and the exemplars are checked before the weights are
    /// touched.
    pub fn train(&mut self, exemplars: &[Exemplar]) -> Result<Outcome> {
        self.rule.check_ready()?;
        exemplar::validate(exemplars, self.rule.network())?;

        initialize(self.rule.network_mut(), &mut *self.weight_gen);
        info!(
            weights = self.rule.network().weights().len(),
            exemplars = exemplars.len();
            "weights randomized, training started"
        );

        let Self { rule, shuffle, .. } = self;
        match shuffle {
            None => rule.train(exemplars),
            Some(rng) => {
                let mut working = exemplars.to_vec();
                run_cycles(|| {
                    exemplar::shuffle(&mut working, rng);
                    rule.train_cycle(&working)
                })
            }
        }
    }
}
