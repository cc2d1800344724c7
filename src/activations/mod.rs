mod act_fn;
mod sigmoid;
mod threshold;

pub use act_fn::ActFn;
pub use sigmoid::Sigmoid;
pub use threshold::Threshold;
