use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{
    exemplar::Exemplar, initialization::DEFAULT_RANGE, training::weights::GradientDescentConfig,
};

/// The specification for the `ActFn` enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActFnSpec {
    Threshold { threshold: f32 },
    Sigmoid { steepness: f32 },
    Identity,
}

/// The specification for the `InputArea` struct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAreaSpec {
    #[default]
    Summed,
    Multiplied,
}

/// The specification for a `Layer` and the units in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub units: usize,
    pub act_fn: ActFnSpec,
    #[serde(default)]
    pub input_area: InputAreaSpec,
}

/// The specification for the `Network` struct, from the input layer to the output layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// The classical perceptron layout.
    ///
    /// Input units pass their input through, hidden units use the sigmoid and output units use
    /// the sigmoid when there are hidden layers or a threshold at 1 otherwise. Every unit sums
    /// its inputs.
    ///
    /// # Arguments
    /// * `inputs` - The size of the input layer.
    /// * `hidden` - The size of every hidden layer, bottom to top.
    /// * `outputs` - The size of the output layer.
    pub fn perceptron(inputs: usize, hidden: &[usize], outputs: usize) -> Self {
        let layer = |units, act_fn| LayerSpec {
            units,
            act_fn,
            input_area: InputAreaSpec::Summed,
        };

        let sigmoid = ActFnSpec::Sigmoid { steepness: 1. };
        let output_act_fn = if hidden.is_empty() {
            ActFnSpec::Threshold { threshold: 1. }
        } else {
            sigmoid
        };

        let mut layers = vec![layer(inputs, ActFnSpec::Identity)];
        layers.extend(hidden.iter().map(|&units| layer(units, sigmoid)));
        layers.push(layer(outputs, output_act_fn));

        Self { layers }
    }
}

/// The specification for the learning rule to train with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningRuleSpec {
    ErrorBackPropagation {
        #[serde(flatten)]
        config: GradientDescentConfig,
        error_max: Option<f32>,
    },
    PerceptronRule {
        learning_constant: f32,
    },
}

/// The specification for the distribution initial weight strengths are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightInitSpec {
    Uniform { low: f32, high: f32 },
    Normal { mean: f32, std_dev: f32 },
}

impl Default for WeightInitSpec {
    fn default() -> Self {
        let (low, high) = DEFAULT_RANGE;
        Self::Uniform { low, high }
    }
}

/// The specification for the `PerceptronTrainer` struct and the data it trains on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerSpec {
    pub network: NetworkSpec,
    pub rule: LearningRuleSpec,
    #[serde(default)]
    pub weights: WeightInitSpec,
    /// Halts training after this many cycles.
    pub max_cycles: Option<NonZeroUsize>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub shuffle: bool,
    pub exemplars: Vec<Exemplar>,
}
