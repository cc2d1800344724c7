mod input_area;
mod layer;
mod network;
mod unit;
mod weight;

pub use input_area::{Accumulation, InputArea};
pub use layer::Layer;
pub use network::Network;
pub use unit::{Unit, UnitId};
pub use weight::{Weight, WeightId};
