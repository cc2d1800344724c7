/// The unipolar sigmoid `1 / (1 + e^(-steepness * z))`, its image is `(0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sigmoid {
    steepness: f32,
}

impl Sigmoid {
    pub fn new(steepness: f32) -> Self {
        Self { steepness }
    }

    pub fn steepness(&self) -> f32 {
        self.steepness
    }

    pub fn f(&self, z: f32) -> f32 {
        1. / (1. + (-self.steepness * z).exp())
    }
}

impl Default for Sigmoid {
    fn default() -> Self {
        Self::new(1.)
    }
}
