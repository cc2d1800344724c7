/// How an input area folds the signals it receives into its running total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Accumulation {
    #[default]
    Summed,
    Multiplied,
}

/// The accumulation strategy of a unit: it collects every incoming signal until the unit fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputArea {
    accumulation: Accumulation,
    total: f32,
}

impl InputArea {
    /// Creates a new, empty `InputArea`.
    ///
    /// # Arguments
    /// * `accumulation` - How incoming values are combined.
    pub fn new(accumulation: Accumulation) -> Self {
        Self {
            accumulation,
            total: Self::identity(accumulation),
        }
    }

    pub fn summed() -> Self {
        Self::new(Accumulation::Summed)
    }

    pub fn multiplied() -> Self {
        Self::new(Accumulation::Multiplied)
    }

    pub fn accumulation(&self) -> Accumulation {
        self.accumulation
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn add_input(&mut self, value: f32) {
        match self.accumulation {
            Accumulation::Summed => self.total += value,
            Accumulation::Multiplied => self.total *= value,
        }
    }

    pub fn reset(&mut self) {
        self.total = Self::identity(self.accumulation);
    }

    fn identity(accumulation: Accumulation) -> f32 {
        match accumulation {
            Accumulation::Summed => 0.,
            Accumulation::Multiplied => 1.,
        }
    }
}

impl Default for InputArea {
    fn default() -> Self {
        Self::summed()
    }
}
