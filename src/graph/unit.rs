use super::{InputArea, WeightId};
use crate::activations::ActFn;

/// Index of a `Unit` inside its `Network`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub(crate) usize);

impl UnitId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A node of the network.
///
/// A unit fires once it has received one signal per incoming weight: it applies its activation
/// function to the total of its input area, which is then cleared. Units without incoming weights
/// (the input layer) fire on the first signal.
#[derive(Clone, Debug)]
pub struct Unit {
    act_fn: ActFn,
    input_area: InputArea,
    activation: Option<f32>,
    incoming: Vec<WeightId>,
    outgoing: Vec<WeightId>,
    signals: usize,

    // Position in the network, (layer, index within the layer).
    position: (usize, usize),
}

impl Unit {
    /// Creates a new, unconnected `Unit`.
    ///
    /// # Arguments
    /// * `act_fn` - The activation function applied when firing.
    /// * `input_area` - The strategy accumulating incoming signals.
    pub fn new(act_fn: ActFn, input_area: InputArea) -> Self {
        Self {
            act_fn,
            input_area,
            activation: None,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            signals: 0,
            position: (0, 0),
        }
    }

    /// The activation of the last firing, `None` if the unit has not fired since its last reset.
    pub fn activation(&self) -> Option<f32> {
        self.activation
    }

    pub fn act_fn(&self) -> &ActFn {
        &self.act_fn
    }

    pub fn input_area(&self) -> &InputArea {
        &self.input_area
    }

    /// The incoming weights, in connection order.
    pub fn incoming(&self) -> &[WeightId] {
        &self.incoming
    }

    /// The outgoing weights, in connection order.
    pub fn outgoing(&self) -> &[WeightId] {
        &self.outgoing
    }

    /// The signals accumulated towards the next firing.
    pub fn pending_signals(&self) -> usize {
        self.signals
    }

    /// The `(layer, index)` pair locating this unit in its network.
    pub fn position(&self) -> (usize, usize) {
        self.position
    }

    pub(crate) fn set_position(&mut self, layer: usize, index: usize) {
        self.position = (layer, index);
    }

    pub(crate) fn push_incoming(&mut self, weight: WeightId) {
        self.incoming.push(weight);
    }

    pub(crate) fn push_outgoing(&mut self, weight: WeightId) {
        self.outgoing.push(weight);
    }

    /// Adds a value straight to the input area, without counting it as a signal.
    pub(crate) fn add_input(&mut self, value: f32) {
        self.input_area.add_input(value);
    }

    /// Delivers one incoming contribution.
    ///
    /// # Returns
    /// The new activation if this signal made the unit fire.
    pub(crate) fn signal(&mut self, value: f32) -> Option<f32> {
        self.signals += 1;
        self.input_area.add_input(value);

        if self.signals < self.incoming.len() {
            return None;
        }

        let activation = self.act_fn.f(self.input_area.total());
        self.activation = Some(activation);
        self.signals = 0;
        self.input_area.reset();

        Some(activation)
    }

    pub(crate) fn reset(&mut self) {
        self.activation = None;

        // a half accumulated area belongs to an aborted propagation
        if self.signals > 0 {
            self.input_area.reset();
            self.signals = 0;
        }
    }

    pub(crate) fn is_reset(&self) -> bool {
        self.activation.is_none() && self.signals == 0
    }
}
