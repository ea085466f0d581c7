pub mod config;
pub mod error;
pub mod freight;
pub mod logging;
pub mod quotes;
pub mod schedule;
pub mod shipment;
pub mod util;

pub use error::{Error, Result};
pub use shipment::{ShipmentDraft, ShipmentStore, apply_quote_to_store, from_api_shipment, to_api_shipment};
