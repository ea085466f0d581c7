pub mod draft;
pub mod mapper;
pub mod store;

pub use draft::{LocationGroup, LocationRole, ShipmentDraft};
pub use mapper::{from_api_shipment, to_api_shipment};
pub use store::{DraftField, ShipmentStore, apply_quote_to_store};
