use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::{graph::Network, Result};

/// Range of the default uniform weight initialization.
pub const DEFAULT_RANGE: (f32, f32) = (-2., 2.);

/// A source of initial weight strengths.
pub trait WeightGen {
    /// Draws the next weight strength.
    fn sample(&mut self) -> f32;
}

impl<F: FnMut() -> f32> WeightGen for F {
    fn sample(&mut self) -> f32 {
        self()
    }
}

/// A weight generator that follows a certain probabilistic distribution.
pub struct RandWeightGen<R: Rng, D: Distribution<f32>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f32>> RandWeightGen<R, D> {
    /// Creates a new `RandWeightGen` weight generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }
}

impl<R: Rng> RandWeightGen<R, Uniform<f32>> {
    /// Creates a new `RandWeightGen` weight generator with a uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(rng: R, low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?))
    }

    /// A uniform generator over [`DEFAULT_RANGE`].
    pub fn standard(rng: R) -> Result<Self> {
        let (low, high) = DEFAULT_RANGE;
        Self::uniform(rng, low, high)
    }
}

impl<R: Rng> RandWeightGen<R, Normal<f32>> {
    /// Creates a new `RandWeightGen` weight generator with a normal distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `mean` - The mean of the distribution.
    /// * `std_dev` - The standard deviation of the distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is not finite (Nan or infinite).
    pub fn normal(rng: R, mean: f32, std_dev: f32) -> Result<Self> {
        Ok(Self::new(rng, Normal::new(mean, std_dev)?))
    }
}

impl<R: Rng, D: Distribution<f32>> WeightGen for RandWeightGen<R, D> {
    fn sample(&mut self) -> f32 {
        self.distribution.sample(&mut self.rng)
    }
}

/// Overwrites the strength of every weight of the network with a fresh sample.
pub fn initialize<G: WeightGen + ?Sized>(network: &mut Network, weight_gen: &mut G) {
    network
        .weights_mut()
        .for_each(|w| w.set_strength(weight_gen.sample()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        activations::ActFn,
        graph::{InputArea, Unit},
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn network() -> Network {
        let mut net = Network::new();
        for size in [3, 4, 2] {
            let layer = net.create();
            let units = (0..size).map(|_| Unit::new(ActFn::sigmoid(1.), InputArea::summed()));
            net.add_units(layer, units).unwrap();
        }
        net
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut weight_gen = RandWeightGen::uniform(seeded_rng(), -0.5, 0.5).unwrap();
        for _ in 0..1000 {
            let s = weight_gen.sample();
            assert!((-0.5..0.5).contains(&s));
        }
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(RandWeightGen::uniform(seeded_rng(), 1., 1.).is_err());
        assert!(RandWeightGen::uniform(seeded_rng(), 2., -2.).is_err());
    }

    #[test]
    fn nan_std_dev_is_rejected() {
        assert!(RandWeightGen::normal(seeded_rng(), 0., f32::NAN).is_err());
    }

    #[test]
    fn initialize_touches_every_weight() {
        let mut net = network();
        let mut weight_gen = RandWeightGen::standard(seeded_rng()).unwrap();
        initialize(&mut net, &mut weight_gen);

        assert_eq!(net.weights().len(), 3 * 4 + 4 * 2);
        assert!(net.weights().iter().all(|w| w.strength() != 0.));
        assert!(net
            .weights()
            .iter()
            .all(|w| (-2. ..2.).contains(&w.strength())));
    }

    #[test]
    fn same_seed_same_weights() {
        let mut a = network();
        let mut b = network();
        initialize(&mut a, &mut RandWeightGen::standard(seeded_rng()).unwrap());
        initialize(&mut b, &mut RandWeightGen::standard(seeded_rng()).unwrap());

        let strengths = |n: &Network| n.weights().iter().map(|w| w.strength()).collect::<Vec<_>>();
        assert_eq!(strengths(&a), strengths(&b));
    }

    #[test]
    fn closures_are_generators() {
        let mut net = network();
        let mut next = 0f32;
        initialize(&mut net, &mut || {
            next += 1.;
            next
        });

        assert_eq!(net.weights()[0].strength(), 1.);
        assert_eq!(net.weights().last().unwrap().strength(), 20.);
    }
}
