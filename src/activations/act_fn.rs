use super::{Sigmoid, Threshold};

/// The activation function a unit applies to its accumulated input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Threshold(Threshold),
    Sigmoid(Sigmoid),
    Identity,
}
use ActFn::*;

impl ActFn {
    pub fn threshold(threshold: f32) -> Self {
        Threshold(Threshold::new(threshold))
    }

    /// The unipolar sigmoid with the given steepness.
    pub fn sigmoid(steepness: f32) -> Self {
        Sigmoid(Sigmoid::new(steepness))
    }

    pub fn identity() -> Self {
        Identity
    }

    pub fn f(&self, x: f32) -> f32 {
        match self {
            Threshold(a) => a.f(x),
            Sigmoid(a) => a.f(x),
            Identity => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_through() {
        let act_fn = ActFn::identity();
        assert_eq!(act_fn.f(-3.5), -3.5);
        assert_eq!(act_fn.f(0.25), 0.25);
    }

    #[test]
    fn dispatches_to_the_wrapped_function() {
        assert_eq!(ActFn::threshold(1.).f(0.99), 0.);
        assert_eq!(ActFn::threshold(1.).f(1.), 1.);
        assert_eq!(ActFn::sigmoid(1.).f(0.), 0.5);
    }
}
