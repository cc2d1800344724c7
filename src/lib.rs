//! Feed forward perceptron networks built as a dataflow graph of units and weights, trained with
//! error back propagation or the discrete perceptron rule.

pub mod activations;
pub mod builder;
pub mod exemplar;
pub mod graph;
pub mod initialization;
pub mod specs;
pub mod training;

mod error;

pub use error::{NetErr, Result};
pub use exemplar::Exemplar;
pub use graph::Network;
pub use training::{
    CycleStatus, ErrorBackPropagation, Outcome, PerceptronRule, PerceptronTrainer,
    StoppingCondition, Trainer,
};
