use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, NetErr>;

/// The crate's error type.
///
/// Every variant is a configuration error: it is reported before any weight is mutated by the
/// operation that detects it.
#[derive(Debug, Clone, PartialEq)]
pub enum NetErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    TooFewLayers {
        got: usize,
    },
    NoSuchLayer {
        layer: usize,
    },
    MissingErrorMax,
    StoppingConditionWithoutInterval,
    IntervalWithoutStoppingCondition,
    MomentumMismatch {
        got: usize,
        expected: usize,
    },
    NotReset {
        layer: usize,
        unit: usize,
    },
    UnitNotFired {
        layer: usize,
        unit: usize,
    },
    Miswired {
        layer: usize,
        unit: usize,
    },
    InvalidDistribution(String),
}

impl Display for NetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch for {what}: got {got}, expected {expected}"),
            NetErr::TooFewLayers { got } => write!(
                f,
                "the network has {got} layers, at least an input and an output layer are needed"
            ),
            NetErr::NoSuchLayer { layer } => write!(f, "there is no layer {layer}"),
            NetErr::MissingErrorMax => write!(
                f,
                "error_max should be defined, training aborted to prevent an infinite loop"
            ),
            NetErr::StoppingConditionWithoutInterval => write!(
                f,
                "a stopping condition needs the number of training cycles to complete before it is checked"
            ),
            NetErr::IntervalWithoutStoppingCondition => {
                write!(f, "a stopping interval was given without a stopping condition")
            }
            NetErr::MomentumMismatch { got, expected } => write!(
                f,
                "momentum history holds {got} weight change matrices per pass, expected {expected}"
            ),
            NetErr::NotReset { layer, unit } => write!(
                f,
                "unit {unit} of layer {layer} still holds state from a previous activation, reset the network first"
            ),
            NetErr::UnitNotFired { layer, unit } => write!(
                f,
                "unit {unit} of layer {layer} did not fire, some of its incoming weights were never signaled"
            ),
            NetErr::Miswired { layer, unit } => write!(
                f,
                "unit {unit} of layer {layer} is not connected to the adjacent layers in unit order"
            ),
            NetErr::InvalidDistribution(detail) => {
                write!(f, "invalid weight distribution: {detail}")
            }
        }
    }
}

impl Error for NetErr {}

impl From<rand::distr::uniform::Error> for NetErr {
    fn from(value: rand::distr::uniform::Error) -> Self {
        Self::InvalidDistribution(value.to_string())
    }
}

impl From<rand_distr::NormalError> for NetErr {
    fn from(value: rand_distr::NormalError) -> Self {
        Self::InvalidDistribution(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_unit() {
        let err = NetErr::NotReset { layer: 1, unit: 3 };
        let msg = err.to_string();
        assert!(msg.contains("unit 3"));
        assert!(msg.contains("layer 1"));
    }

    #[test]
    fn display_miswired_unit() {
        let err = NetErr::Miswired { layer: 2, unit: 0 };
        assert_eq!(
            err.to_string(),
            "unit 0 of layer 2 is not connected to the adjacent layers in unit order"
        );
    }

    #[test]
    fn display_size_mismatch() {
        let err = NetErr::SizeMismatch {
            what: "inputs",
            got: 3,
            expected: 2,
        };
        assert_eq!(err.to_string(), "size mismatch for inputs: got 3, expected 2");
    }
}
