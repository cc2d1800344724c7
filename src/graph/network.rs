use std::collections::VecDeque;

use log::trace;

use super::{Layer, Unit, UnitId, Weight, WeightId};
use crate::{NetErr, Result};

/// A feed forward network: an ordered stack of layers, the first being the input layer and the
/// last the output layer.
///
/// Units and weights live in arenas owned by the network and are referenced by index, nothing is
/// ever removed from them. A unit's incoming and outgoing weights keep their connection order, so
/// for a network built with [`Network::add_units`] the `w`-th incoming weight of a unit comes from
/// the `w`-th unit of the layer below.
#[derive(Clone, Debug, Default)]
pub struct Network {
    layers: Vec<Layer>,
    units: Vec<Unit>,
    weights: Vec<Weight>,
}

impl Network {
    /// Creates a new, empty `Network`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty layer on top of the current last layer.
    ///
    /// # Returns
    /// The index of the new layer.
    pub fn create(&mut self) -> usize {
        let index = self.layers.len();
        let below = index.checked_sub(1);

        if let Some(below) = below {
            self.layers[below].set_above(index);
        }

        self.layers.push(Layer::new(below));
        index
    }

    /// Appends units to a layer without connecting them.
    ///
    /// # Arguments
    /// * `layer` - The index of the layer receiving the units.
    /// * `units` - The units to append.
    ///
    /// # Returns
    /// The ids of the appended units, in order.
    pub fn add_disconnected<I>(&mut self, layer: usize, units: I) -> Result<Vec<UnitId>>
    where
        I: IntoIterator<Item = Unit>,
    {
        if layer >= self.layers.len() {
            return Err(NetErr::NoSuchLayer { layer });
        }

        let ids = units
            .into_iter()
            .map(|mut unit| {
                let id = UnitId(self.units.len());
                unit.set_position(layer, self.layers[layer].len());
                self.layers[layer].push(id);
                self.units.push(unit);
                id
            })
            .collect();

        Ok(ids)
    }

    /// Appends units to a layer and connects each of them with every unit of the layers directly
    /// below and above it. New weights start with a strength of zero.
    ///
    /// # Arguments
    /// * `layer` - The index of the layer receiving the units.
    /// * `units` - The units to append.
    ///
    /// # Returns
    /// The ids of the appended units, in order.
    pub fn add_units<I>(&mut self, layer: usize, units: I) -> Result<Vec<UnitId>>
    where
        I: IntoIterator<Item = Unit>,
    {
        let ids = self.add_disconnected(layer, units)?;

        let below = self.layers[layer]
            .below()
            .map(|b| self.layers[b].units().to_vec())
            .unwrap_or_default();

        let above = self.layers[layer]
            .above()
            .map(|a| self.layers[a].units().to_vec())
            .unwrap_or_default();

        for &id in &ids {
            for &from in &below {
                self.connect(from, id);
            }

            for &to in &above {
                self.connect(id, to);
            }
        }

        Ok(ids)
    }

    /// Adds a weight going from `source` to `destination`.
    ///
    /// The weight is appended at the end of the source's outgoing weights and of the
    /// destination's incoming weights.
    pub fn connect(&mut self, source: UnitId, destination: UnitId) -> WeightId {
        let id = WeightId(self.weights.len());
        self.weights.push(Weight::new(source, destination));
        self.units[source.0].push_outgoing(id);
        self.units[destination.0].push_incoming(id);
        id
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, layer: usize) -> Result<&Layer> {
        self.layers.get(layer).ok_or(NetErr::NoSuchLayer { layer })
    }

    pub fn input_layer(&self) -> Result<&Layer> {
        self.layers
            .first()
            .ok_or(NetErr::TooFewLayers { got: 0 })
    }

    pub fn output_layer(&self) -> Result<&Layer> {
        self.layers
            .last()
            .ok_or(NetErr::TooFewLayers { got: 0 })
    }

    /// # Panics
    /// If `id` was not handed out by this network.
    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.0]
    }

    /// The `index`-th unit of `layer`.
    pub fn unit_at(&self, layer: usize, index: usize) -> Result<&Unit> {
        let layer_ref = self.layer(layer)?;
        let id = layer_ref
            .units()
            .get(index)
            .ok_or(NetErr::SizeMismatch {
                what: "units in layer",
                got: index + 1,
                expected: layer_ref.len(),
            })?;

        Ok(&self.units[id.0])
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// # Panics
    /// If `id` was not handed out by this network.
    pub fn weight(&self, id: WeightId) -> &Weight {
        &self.weights[id.0]
    }

    /// # Panics
    /// If `id` was not handed out by this network.
    pub fn weight_mut(&mut self, id: WeightId) -> &mut Weight {
        &mut self.weights[id.0]
    }

    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> impl Iterator<Item = &mut Weight> {
        self.weights.iter_mut()
    }

    /// Adds a value to a unit's input area outside of the signaling protocol. It is accumulated
    /// into the unit's next firing.
    pub fn add_input(&mut self, unit: UnitId, value: f32) {
        self.units[unit.0].add_input(value);
    }

    /// Checks the topology the training algorithms rely on: at least an input and an output
    /// layer, and every pair of adjacent layers fully connected in unit order.
    ///
    /// The `w`-th incoming weight of a unit has to come from the `w`-th unit of the layer below
    /// and the `k`-th outgoing weight has to reach the `k`-th unit of the layer above. Input units
    /// have no incoming weights and output units no outgoing ones.
    ///
    /// # Errors
    /// * `TooFewLayers` if there are less than two layers.
    /// * `SizeMismatch` if a unit has a wrong number of incoming or outgoing weights.
    /// * `Miswired` if a unit has the right number of weights but connected out of order.
    pub fn validate_stack(&self) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(NetErr::TooFewLayers {
                got: self.layers.len(),
            });
        }

        for (index, layer) in self.layers.iter().enumerate() {
            let below = index
                .checked_sub(1)
                .map_or(&[][..], |below| self.layers[below].units());
            let above = self.layers.get(index + 1).map_or(&[][..], Layer::units);

            for (position, &id) in layer.units().iter().enumerate() {
                let unit = &self.units[id.0];
                let at = (index, position);

                self.check_wiring(unit.incoming(), below, "incoming weights", at, Weight::source)?;
                self.check_wiring(
                    unit.outgoing(),
                    above,
                    "outgoing weights",
                    at,
                    Weight::destination,
                )?;
            }
        }

        Ok(())
    }

    /// Checks that `weights` reach exactly `expected`, in order, through `end`.
    fn check_wiring<F>(
        &self,
        weights: &[WeightId],
        expected: &[UnitId],
        what: &'static str,
        (layer, unit): (usize, usize),
        end: F,
    ) -> Result<()>
    where
        F: Fn(&Weight) -> UnitId,
    {
        if weights.len() != expected.len() {
            return Err(NetErr::SizeMismatch {
                what,
                got: weights.len(),
                expected: expected.len(),
            });
        }

        let in_order = weights
            .iter()
            .zip(expected)
            .all(|(&w, &id)| end(&self.weights[w.0]) == id);

        if !in_order {
            return Err(NetErr::Miswired { layer, unit });
        }

        Ok(())
    }

    /// Makes a forward pass through the network.
    ///
    /// Each input signals its input unit directly, firing units forward their activation through
    /// their outgoing weights until every reachable unit has fired. The network has to be
    /// [`reset`](Network::reset) before being activated again.
    ///
    /// # Arguments
    /// * `inputs` - One value per input unit.
    ///
    /// # Returns
    /// The activations of the output layer, in unit order.
    ///
    /// # Errors
    /// * `SizeMismatch` if `inputs` does not match the input layer.
    /// * `NotReset` if some unit still holds state from a previous pass.
    /// * `UnitNotFired` if an output unit could not fire.
    pub fn activate(&mut self, inputs: &[f32]) -> Result<Vec<f32>> {
        let input_layer = self.input_layer()?;
        if inputs.len() != input_layer.len() {
            return Err(NetErr::SizeMismatch {
                what: "inputs",
                got: inputs.len(),
                expected: input_layer.len(),
            });
        }

        self.ensure_reset()?;

        let mut pending: VecDeque<(UnitId, f32)> =
            input_layer.units().iter().copied().zip(inputs.iter().copied()).collect();

        let mut fired = 0;
        while let Some((id, value)) = pending.pop_front() {
            let Some(activation) = self.units[id.0].signal(value) else {
                continue;
            };

            fired += 1;
            for &w in self.units[id.0].outgoing() {
                let weight = &self.weights[w.0];
                pending.push_back((weight.destination(), weight.transmit(activation)));
            }
        }

        trace!(fired = fired; "forward pass finished");
        self.activations(self.layers.len() - 1)
    }

    /// Activates the network and resets it, leaving it ready for the next pass.
    pub fn predict(&mut self, inputs: &[f32]) -> Result<Vec<f32>> {
        let outputs = self.activate(inputs);
        self.reset();
        outputs
    }

    /// The activations of the units of `layer`, in unit order.
    ///
    /// # Errors
    /// `UnitNotFired` if some unit of the layer has no activation.
    pub fn activations(&self, layer: usize) -> Result<Vec<f32>> {
        self.layer(layer)?
            .units()
            .iter()
            .enumerate()
            .map(|(i, id)| {
                self.units[id.0]
                    .activation()
                    .ok_or(NetErr::UnitNotFired { layer, unit: i })
            })
            .collect()
    }

    /// Clears every unit's activation and fan-in counter.
    pub fn reset(&mut self) {
        self.units.iter_mut().for_each(Unit::reset);
    }

    fn ensure_reset(&self) -> Result<()> {
        match self.units.iter().find(|unit| !unit.is_reset()) {
            Some(unit) => {
                let (layer, unit) = unit.position();
                Err(NetErr::NotReset { layer, unit })
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{activations::ActFn, graph::InputArea};

    fn identity_units(n: usize) -> Vec<Unit> {
        (0..n)
            .map(|_| Unit::new(ActFn::identity(), InputArea::summed()))
            .collect()
    }

    /// Builds a fully connected network of identity units with the given layer sizes.
    fn stack(sizes: &[usize]) -> Network {
        let mut net = Network::new();
        for &size in sizes {
            let layer = net.create();
            net.add_units(layer, identity_units(size)).unwrap();
        }
        net
    }

    #[test]
    fn create_links_layers() {
        let mut net = Network::new();
        let input = net.create();
        let hidden = net.create();
        let output = net.create();

        assert_eq!(net.layer(input).unwrap().below(), None);
        assert_eq!(net.layer(input).unwrap().above(), Some(hidden));
        assert_eq!(net.layer(hidden).unwrap().below(), Some(input));
        assert_eq!(net.layer(hidden).unwrap().above(), Some(output));
        assert_eq!(net.layer(output).unwrap().above(), None);
    }

    #[test]
    fn add_units_connects_fully_to_the_layer_below() {
        let net = stack(&[3, 2]);
        assert_eq!(net.weights().len(), 6);

        for &id in net.layer(1).unwrap().units() {
            assert_eq!(net.unit(id).incoming().len(), 3);
        }

        for &id in net.layer(0).unwrap().units() {
            assert_eq!(net.unit(id).outgoing().len(), 2);
        }

        net.validate_stack().unwrap();
    }

    #[test]
    fn incoming_weights_follow_the_order_of_the_layer_below() {
        let net = stack(&[3, 2]);
        let below = net.layer(0).unwrap().units().to_vec();

        for &id in net.layer(1).unwrap().units() {
            let sources: Vec<_> = net
                .unit(id)
                .incoming()
                .iter()
                .map(|&w| net.weight(w).source())
                .collect();
            assert_eq!(sources, below);
        }
    }

    #[test]
    fn outgoing_weights_follow_the_order_of_the_layer_above() {
        let net = stack(&[2, 3]);
        let above = net.layer(1).unwrap().units().to_vec();

        for &id in net.layer(0).unwrap().units() {
            let destinations: Vec<_> = net
                .unit(id)
                .outgoing()
                .iter()
                .map(|&w| net.weight(w).destination())
                .collect();
            assert_eq!(destinations, above);
        }
    }

    #[test]
    fn add_units_to_a_missing_layer_fails() {
        let mut net = Network::new();
        let err = net.add_units(0, identity_units(1)).unwrap_err();
        assert_eq!(err, NetErr::NoSuchLayer { layer: 0 });
    }

    #[test]
    fn activate_propagates_weighted_sums() {
        let mut net = stack(&[2, 1]);
        let strengths = [0.5, -2.];
        for (w, s) in net.weights_mut().zip(strengths) {
            w.set_strength(s);
        }

        let out = net.activate(&[4., 1.]).unwrap();
        assert_eq!(out, vec![0.]);
    }

    #[test]
    fn activate_through_a_hidden_layer() {
        let mut net = stack(&[2, 2, 1]);
        net.weights_mut().for_each(|w| w.set_strength(1.));

        // each hidden unit sees 1 + 2, the output sees both hidden units
        assert_eq!(net.activate(&[1., 2.]).unwrap(), vec![6.]);
        assert_eq!(net.activations(1).unwrap(), vec![3., 3.]);
    }

    #[test]
    fn activate_rejects_wrong_input_length() {
        let mut net = stack(&[2, 1]);
        let err = net.activate(&[1.]).unwrap_err();
        assert_eq!(
            err,
            NetErr::SizeMismatch {
                what: "inputs",
                got: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn activate_without_reset_is_rejected() {
        let mut net = stack(&[2, 1]);
        net.activate(&[1., 1.]).unwrap();

        let err = net.activate(&[1., 1.]).unwrap_err();
        assert_eq!(err, NetErr::NotReset { layer: 0, unit: 0 });
    }

    #[test]
    fn reset_clears_every_unit() {
        let mut net = stack(&[2, 3, 1]);
        net.weights_mut().for_each(|w| w.set_strength(0.3));
        net.activate(&[0.2, 0.9]).unwrap();

        net.reset();
        for unit in net.units() {
            assert_eq!(unit.activation(), None);
            assert_eq!(unit.pending_signals(), 0);
        }
    }

    #[test]
    fn activation_is_deterministic_after_reset() {
        let mut net = stack(&[2, 3, 2]);
        for (i, w) in net.weights_mut().enumerate() {
            w.set_strength(0.1 * i as f32 - 0.4);
        }

        let first = net.predict(&[0.3, -1.2]).unwrap();
        let second = net.predict(&[0.3, -1.2]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unit_that_cannot_fire_is_reported() {
        let mut net = Network::new();
        let input = net.create();
        let output = net.create();
        let ins = net.add_disconnected(input, identity_units(2)).unwrap();
        let outs = net.add_disconnected(output, identity_units(2)).unwrap();

        // the second output unit waits for a signal from a unit that is never activated
        let orphan = net.add_disconnected(output, identity_units(1)).unwrap()[0];
        net.connect(ins[0], outs[0]);
        net.connect(ins[1], outs[1]);
        net.connect(orphan, outs[1]);

        let err = net.activate(&[1., 1.]).unwrap_err();
        assert_eq!(err, NetErr::UnitNotFired { layer: 1, unit: 1 });

        // the stale counter is cleared by a reset
        net.reset();
        assert!(net.units().iter().all(|u| u.pending_signals() == 0));
    }

    #[test]
    fn arbitrary_dag_wiring_fires_after_all_signals() {
        let mut net = Network::new();
        let input = net.create();
        let hidden = net.create();
        let output = net.create();
        let i = net.add_disconnected(input, identity_units(1)).unwrap()[0];
        let h = net.add_disconnected(hidden, identity_units(1)).unwrap()[0];
        let o = net.add_disconnected(output, identity_units(1)).unwrap()[0];

        // a skip connection: the output waits for both the hidden unit and the input
        let ih = net.connect(i, h);
        let ho = net.connect(h, o);
        let io = net.connect(i, o);
        net.weight_mut(ih).set_strength(2.);
        net.weight_mut(ho).set_strength(3.);
        net.weight_mut(io).set_strength(1.);

        assert_eq!(net.predict(&[1.]).unwrap(), vec![7.]);

        // fine for a forward pass, but not a stack the learning rules can train
        assert!(net.validate_stack().is_err());
    }

    #[test]
    fn added_input_acts_as_a_one_shot_bias() {
        let mut net = stack(&[1, 1]);
        net.weights_mut().for_each(|w| w.set_strength(1.));
        let out_id = net.output_layer().unwrap().units()[0];

        net.add_input(out_id, 0.5);
        assert_eq!(net.predict(&[1.]).unwrap(), vec![1.5]);
        assert_eq!(net.predict(&[1.]).unwrap(), vec![1.]);
    }

    #[test]
    fn validate_stack_requires_two_layers() {
        let net = stack(&[2]);
        assert_eq!(
            net.validate_stack().unwrap_err(),
            NetErr::TooFewLayers { got: 1 }
        );
    }

    #[test]
    fn validate_stack_rejects_weights_connected_out_of_order() {
        let mut net = Network::new();
        let input = net.create();
        let output = net.create();
        let ins = net.add_disconnected(input, identity_units(2)).unwrap();
        let out = net.add_disconnected(output, identity_units(1)).unwrap()[0];

        // the right number of weights, but the first one comes from the second input
        net.connect(ins[1], out);
        net.connect(ins[0], out);

        assert_eq!(
            net.validate_stack().unwrap_err(),
            NetErr::Miswired { layer: 1, unit: 0 }
        );
    }

    #[test]
    fn validate_stack_rejects_a_doubled_outgoing_weight() {
        let mut net = stack(&[2, 2]);
        let output = net.create();
        let out = net.add_disconnected(output, identity_units(1)).unwrap()[0];
        let hidden = net.layer(1).unwrap().units().to_vec();

        // every output incoming weight comes from the first hidden unit
        net.connect(hidden[0], out);
        net.connect(hidden[0], out);

        assert_eq!(
            net.validate_stack().unwrap_err(),
            NetErr::SizeMismatch {
                what: "outgoing weights",
                got: 2,
                expected: 1,
            }
        );
    }

    #[test]
    fn validate_stack_rejects_weights_inside_a_layer() {
        let mut net = stack(&[2, 1]);
        let ins = net.layer(0).unwrap().units().to_vec();
        net.connect(ins[0], ins[1]);

        assert_eq!(
            net.validate_stack().unwrap_err(),
            NetErr::SizeMismatch {
                what: "outgoing weights",
                got: 2,
                expected: 1,
            }
        );
    }

    #[test]
    fn validate_stack_accepts_units_added_after_the_layer_above() {
        let mut net = stack(&[2, 2, 1]);
        net.add_units(1, identity_units(1)).unwrap();
        net.add_units(0, identity_units(1)).unwrap();

        net.validate_stack().unwrap();
    }

    #[test]
    #[should_panic]
    fn weight_of_another_network_panics() {
        let big = stack(&[3, 3]);
        let small = stack(&[1, 1]);
        let foreign = big.unit(big.layer(1).unwrap().units()[2]).incoming()[2];
        assert_eq!(foreign, WeightId(8));

        small.weight(foreign);
    }
}
