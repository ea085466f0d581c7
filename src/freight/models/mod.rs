mod quote;
mod schedule;
mod shipment;

pub use quote::*;
pub use schedule::*;
pub use shipment::*;
