/// A step that yields `1` once the input reaches `threshold` and `0` below it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Threshold {
    threshold: f32,
}

impl Threshold {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn f(&self, z: f32) -> f32 {
        if z >= self.threshold {
            1.
        } else {
            0.
        }
    }
}
