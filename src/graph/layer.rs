use super::UnitId;

/// An ordered group of units at the same depth.
///
/// The order of `units` is meaningful: the `i`-th unit of a layer is the `i`-th row of every weight
/// change matrix computed for the weights entering that layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    units: Vec<UnitId>,
    below: Option<usize>,
    above: Option<usize>,
}

impl Layer {
    pub(crate) fn new(below: Option<usize>) -> Self {
        Self {
            units: Vec::new(),
            below,
            above: None,
        }
    }

    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The index of the layer below this one, if any.
    pub fn below(&self) -> Option<usize> {
        self.below
    }

    /// The index of the layer above this one, if any.
    pub fn above(&self) -> Option<usize> {
        self.above
    }

    pub(crate) fn set_above(&mut self, above: usize) {
        self.above = Some(above);
    }

    pub(crate) fn push(&mut self, unit: UnitId) {
        self.units.push(unit);
    }
}
