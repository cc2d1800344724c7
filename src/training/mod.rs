mod backprop;
mod outcome;
mod perceptron_rule;
mod perceptron_trainer;
mod stopping;
mod trainer;
pub mod weights;

pub use backprop::ErrorBackPropagation;
pub use outcome::{CycleStatus, Outcome};
pub use perceptron_rule::PerceptronRule;
pub use perceptron_trainer::PerceptronTrainer;
pub use stopping::StoppingCondition;
pub use trainer::Trainer;
