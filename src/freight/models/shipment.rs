use serde::{Deserialize, Serialize};

use crate::util::{
    count_or_zero, lenient_number, lenient_un_number, nullable, number_or_zero, or_none,
    string_or_number,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiShipment {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,

    #[serde(deserialize_with = "nullable")]
    pub cargo_detail: CargoDetail,

    #[serde(deserialize_with = "nullable")]
    pub cargo_type: CargoType,

    #[serde(deserialize_with = "nullable")]
    pub commodity: String,

    #[serde(deserialize_with = "or_none")]
    pub container_pick_up_location: Option<ApiLocation>,

    #[serde(deserialize_with = "or_none")]
    pub container_delivery_location: Option<ApiLocation>,

    #[serde(deserialize_with = "nullable")]
    pub container_size: ContainerSize,

    #[serde(deserialize_with = "nullable")]
    pub container_type: ContainerCategory,

    #[serde(deserialize_with = "nullable")]
    pub delivery_position: ApiLocation,

    #[serde(deserialize_with = "nullable")]
    pub pick_up_position: ApiLocation,

    #[serde(deserialize_with = "nullable")]
    pub position_a: ApiLocation,

    #[serde(deserialize_with = "nullable")]
    pub position_b: ApiLocation,

    #[serde(deserialize_with = "nullable")]
    pub service_addons: ServiceAddons,

    #[serde(deserialize_with = "number_or_zero")]
    pub gross_weight: f64,

    #[serde(deserialize_with = "nullable")]
    pub shipment_method: String,

    #[serde(deserialize_with = "nullable")]
    pub shipment_mode: ShipmentMode,

    #[serde(deserialize_with = "nullable")]
    pub status: String,

    #[serde(deserialize_with = "nullable")]
    pub track_id: String,

    #[serde(deserialize_with = "nullable")]
    pub creation_date: String,

    #[serde(deserialize_with = "nullable")]
    pub update_date: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CargoDetail {
    #[serde(deserialize_with = "nullable")]
    pub access_conditions: AccessCondition,

    #[serde(deserialize_with = "count_or_zero")]
    pub cargo_probs: u32,

    #[serde(deserialize_with = "nullable")]
    pub cold_traitement: bool,

    #[serde(deserialize_with = "nullable")]
    pub drain_holes_open: bool,

    #[serde(deserialize_with = "nullable")]
    pub fresh_air_exchange_open: bool,

    #[serde(deserialize_with = "nullable")]
    pub genset_during_export: bool,

    #[serde(deserialize_with = "nullable")]
    pub genset_during_import: bool,

    #[serde(deserialize_with = "lenient_number")]
    pub height: Option<f64>,

    #[serde(deserialize_with = "lenient_number")]
    pub length: Option<f64>,

    #[serde(deserialize_with = "lenient_number")]
    pub width: Option<f64>,

    #[serde(deserialize_with = "lenient_number")]
    pub number_of_packages: Option<f64>,

    #[serde(deserialize_with = "lenient_number")]
    pub number_of_pallets: Option<f64>,

    #[serde(deserialize_with = "string_or_number")]
    pub humidity: String,

    #[serde(deserialize_with = "nullable")]
    pub humidity_control: bool,

    #[serde(deserialize_with = "nullable")]
    pub id: i64,

    #[serde(deserialize_with = "nullable")]
    pub imo_class: String,

    #[serde(deserialize_with = "nullable")]
    pub lift_gate: bool,

    #[serde(deserialize_with = "nullable")]
    pub package_type: String,

    #[serde(deserialize_with = "nullable")]
    pub stackable_cargo: bool,

    #[serde(deserialize_with = "string_or_number")]
    pub temperature: String,

    #[serde(deserialize_with = "nullable")]
    pub temperature_set_points: TemperatureSetPoints,

    #[serde(deserialize_with = "nullable")]
    pub truck_type: String,

    #[serde(deserialize_with = "lenient_un_number")]
    pub un_number: Option<u32>,

    #[serde(deserialize_with = "nullable")]
    pub unit: LengthUnit,

    #[serde(deserialize_with = "string_or_number")]
    pub ventilation_volume: String,

    #[serde(deserialize_with = "string_or_number")]
    pub volume: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureSetPoints {
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,

    #[serde(deserialize_with = "nullable")]
    pub mode: String,

    #[serde(deserialize_with = "nullable")]
    pub sets: Vec<SetPoint>,
}

/// Точка температурного режима: день рейса и температура
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetPoint {
    #[serde(deserialize_with = "string_or_number")]
    pub day: String,

    #[serde(deserialize_with = "string_or_number")]
    pub temperature: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiLocation {
    #[serde(deserialize_with = "nullable")]
    pub city: String,

    #[serde(deserialize_with = "nullable")]
    pub country: String,

    #[serde(deserialize_with = "nullable")]
    pub country_code: String,

    #[serde(deserialize_with = "string_or_number")]
    pub lat: String,

    #[serde(deserialize_with = "string_or_number")]
    pub lon: String,

    #[serde(deserialize_with = "nullable")]
    pub id: i64,

    #[serde(deserialize_with = "nullable")]
    pub location_type: LocationType,

    /// Код локации перевозчика для поиска расписаний
    #[serde(deserialize_with = "nullable")]
    pub unicode: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceAddons {
    #[serde(deserialize_with = "nullable")]
    pub id: i64,

    #[serde(deserialize_with = "nullable")]
    pub change_destination: bool,

    #[serde(deserialize_with = "nullable")]
    pub extra_free_time: bool,

    #[serde(deserialize_with = "nullable")]
    pub port_agent: bool,

    #[serde(deserialize_with = "nullable")]
    pub ready_to_load: bool,

    #[serde(deserialize_with = "nullable")]
    pub reduce_emission: bool,

    #[serde(deserialize_with = "nullable")]
    pub repositionning: bool,

    #[serde(deserialize_with = "nullable")]
    pub soc_for_all: bool,

    #[serde(deserialize_with = "nullable")]
    pub live_tracking: bool,

    #[serde(deserialize_with = "or_none")]
    pub customer_brokerage: Option<CustomsBrokerage>,

    #[serde(deserialize_with = "or_none")]
    pub inspection: Option<Inspection>,

    #[serde(deserialize_with = "number_or_zero")]
    pub insurance: f64,

    #[serde(deserialize_with = "nullable")]
    pub insurance_currency: String,

    #[serde(deserialize_with = "or_none")]
    pub stuffing: Option<String>,

    #[serde(deserialize_with = "count_or_zero")]
    pub stuffing_number_workers: u32,

    #[serde(deserialize_with = "or_none")]
    pub un_stuffing: Option<String>,

    #[serde(deserialize_with = "count_or_zero")]
    pub un_stuffing_number_workers: u32,

    #[serde(deserialize_with = "nullable")]
    pub troke_trace: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inspection {
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CargoType {
    Imo,
    Reefer,
    Oog,
    Lquid,
    Dry,
    OogImo,
    ReeferImo,
    #[default]
    #[serde(other)]
    General,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerSize {
    #[serde(rename = "SIZE_20")]
    Size20,
    #[serde(rename = "SIZE_45")]
    Size45,
    #[default]
    #[serde(rename = "SIZE_40", other)]
    Size40,
}

impl ContainerSize {
    pub fn feet(self) -> &'static str {
        match self {
            ContainerSize::Size20 => "20",
            ContainerSize::Size40 => "40",
            ContainerSize::Size45 => "45",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerCategory {
    Reefer,
    FlatRack,
    OpenTop,
    Tank,
    HighCube,
    #[default]
    #[serde(other)]
    Standard,
}

impl ContainerCategory {
    /// Название типа контейнера в том виде, в каком его выбирают в форме
    pub fn display_name(self) -> &'static str {
        match self {
            ContainerCategory::Standard => "Standard",
            ContainerCategory::Reefer => "Reefer",
            ContainerCategory::FlatRack => "Flat Rack",
            ContainerCategory::OpenTop => "Open Top",
            ContainerCategory::Tank => "Tank",
            ContainerCategory::HighCube => "High Cube",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessCondition {
    Limited,
    Difficult,
    #[default]
    #[serde(other)]
    Easy,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentMode {
    Air,
    Road,
    Rail,
    Ecomm,
    Combined,
    #[default]
    #[serde(other)]
    Sea,
}

impl ShipmentMode {
    /// Режим в нотации формы (нижний регистр, ECOMM -> ecommerce)
    pub fn ui_mode(self) -> &'static str {
        match self {
            ShipmentMode::Sea => "sea",
            ShipmentMode::Air => "air",
            ShipmentMode::Road => "road",
            ShipmentMode::Rail => "rail",
            ShipmentMode::Ecomm => "ecommerce",
            ShipmentMode::Combined => "combined",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "Meter", alias = "METER")]
    Meter,
    #[default]
    #[serde(rename = "INCH", other)]
    Inch,
}

/// Поле историческое: бэкенд всегда получает PORT, независимо от вида транспорта
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    #[default]
    #[serde(other)]
    Port,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomsBrokerage {
    Origin,
    Destination,
    Both,
}
