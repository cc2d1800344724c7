use rand::{rngs::StdRng, SeedableRng};

use crate::{
    activations::ActFn,
    graph::{InputArea, Network, Unit},
    initialization::{RandWeightGen, WeightGen},
    specs::{
        ActFnSpec, InputAreaSpec, LayerSpec, LearningRuleSpec, NetworkSpec, TrainerSpec,
        WeightInitSpec,
    },
    training::{
        ErrorBackPropagation, PerceptronRule, PerceptronTrainer, StoppingCondition, Trainer,
    },
    Result,
};

/// Builds `Network`s given a specification.
#[derive(Default)]
pub struct NetworkBuilder;

impl NetworkBuilder {
    /// Creates a new `NetworkBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Network` following a spec, every layer fully connected to the next one and
    /// every weight at 0.
    ///
    /// # Arguments
    /// * `spec` - The specification for the network.
    pub fn build(&self, spec: &NetworkSpec) -> Result<Network> {
        let mut network = Network::new();

        for &layer_spec in &spec.layers {
            let layer = network.create();
            let units = self.resolve_layer(layer_spec);
            network.add_units(layer, units)?;
        }

        Ok(network)
    }

    fn resolve_layer(&self, spec: LayerSpec) -> impl Iterator<Item = Unit> {
        let act_fn = self.resolve_act_fn(spec.act_fn);
        let input_area = self.resolve_input_area(spec.input_area);
        (0..spec.units).map(move |_| Unit::new(act_fn, input_area))
    }

    fn resolve_act_fn(&self, spec: ActFnSpec) -> ActFn {
        match spec {
            ActFnSpec::Threshold { threshold } => ActFn::threshold(threshold),
            ActFnSpec::Sigmoid { steepness } => ActFn::sigmoid(steepness),
            ActFnSpec::Identity => ActFn::identity(),
        }
    }

    fn resolve_input_area(&self, spec: InputAreaSpec) -> InputArea {
        match spec {
            InputAreaSpec::Summed => InputArea::summed(),
            InputAreaSpec::Multiplied => InputArea::multiplied(),
        }
    }
}

/// Builds `PerceptronTrainer`s given a specification.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `PerceptronTrainer` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the trainer.
    ///
    /// # Errors
    /// If the network does not suit the learning rule or the weight distribution is invalid.
    pub fn build(&self, spec: &TrainerSpec) -> Result<PerceptronTrainer> {
        let network = NetworkBuilder::new().build(&spec.network)?;
        let rule = self.resolve_rule(spec, network)?;

        let mut rng = self.generate_rng(spec.seed);
        let weight_gen = self.resolve_weight_gen(spec.weights, StdRng::from_rng(&mut rng))?;

        let trainer = PerceptronTrainer::new(rule, weight_gen);
        if spec.shuffle {
            return Ok(trainer.with_shuffle(rng));
        }

        Ok(trainer)
    }

    fn resolve_rule(&self, spec: &TrainerSpec, network: Network) -> Result<Box<dyn Trainer>> {
        let stopping = spec.max_cycles.map(StoppingCondition::max_cycles);

        let rule: Box<dyn Trainer> = match spec.rule {
            LearningRuleSpec::ErrorBackPropagation { config, error_max } => {
                let mut rule = ErrorBackPropagation::new(network, config, stopping)?;
                if let Some(error_max) = error_max {
                    rule.set_error_max(error_max);
                }
                Box::new(rule)
            }
            LearningRuleSpec::PerceptronRule { learning_constant } => {
                Box::new(PerceptronRule::new(network, learning_constant, stopping)?)
            }
        };

        Ok(rule)
    }

    fn resolve_weight_gen(
        &self,
        spec: WeightInitSpec,
        rng: StdRng,
    ) -> Result<Box<dyn WeightGen>> {
        let weight_gen: Box<dyn WeightGen> = match spec {
            WeightInitSpec::Uniform { low, high } => {
                Box::new(RandWeightGen::uniform(rng, low, high)?)
            }
            WeightInitSpec::Normal { mean, std_dev } => {
                Box::new(RandWeightGen::normal(rng, mean, std_dev)?)
            }
        };

        Ok(weight_gen)
    }

    fn generate_rng(&self, seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
