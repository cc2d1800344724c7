use super::UnitId;

/// Index of a `Weight` inside its `Network`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeightId(pub(crate) usize);

impl WeightId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A directed connection from a source unit to a destination unit.
///
/// A weight is listed in its source's outgoing weights and in its destination's incoming weights
/// for its whole lifetime; only its strength changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Weight {
    source: UnitId,
    destination: UnitId,
    strength: f32,
}

impl Weight {
    pub(crate) fn new(source: UnitId, destination: UnitId) -> Self {
        Self {
            source,
            destination,
            strength: 0.,
        }
    }

    pub fn source(&self) -> UnitId {
        self.source
    }

    pub fn destination(&self) -> UnitId {
        self.destination
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength;
    }

    pub fn adjust(&mut self, delta: f32) {
        self.strength += delta;
    }

    /// The contribution this weight forwards to its destination for a source activation.
    pub fn transmit(&self, activation: f32) -> f32 {
        activation * self.strength
    }
}
