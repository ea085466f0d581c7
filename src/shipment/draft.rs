use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    ser::SerializeMap,
};
use serde_json::{Map, Value};

use crate::{
    freight::models::SetPoint,
    schedule::ComparisonOption,
    util::{count_or_zero, nullable, string_or_number, value_to_string},
};

/// Роль локации в заявке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationRole {
    Pol,
    Pod,
    Plor,
    Plod,
    Pickup,
    Return,
}

impl LocationRole {
    pub const ALL: [LocationRole; 6] = [
        LocationRole::Pol,
        LocationRole::Pod,
        LocationRole::Plor,
        LocationRole::Plod,
        LocationRole::Pickup,
        LocationRole::Return,
    ];

    /// Префикс полей группы: `polCity`, `pickupLat` и т.д.
    pub fn prefix(self) -> &'static str {
        match self {
            LocationRole::Pol => "pol",
            LocationRole::Pod => "pod",
            LocationRole::Plor => "plor",
            LocationRole::Plod => "plod",
            LocationRole::Pickup => "pickup",
            LocationRole::Return => "return",
        }
    }

    /// Ключ строки "City, CountryCode"
    pub fn display_key(self) -> &'static str {
        match self {
            LocationRole::Pickup => "pickupLocation",
            LocationRole::Return => "returnLocation",
            role => role.prefix(),
        }
    }

    /// POL и POD обязательны, остальные включаются флажком
    pub fn is_optional(self) -> bool {
        !matches!(self, LocationRole::Pol | LocationRole::Pod)
    }
}

/// Группа полей одной локации
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LocationGroup {
    pub display: String,
    pub city: String,
    pub country: String,
    pub country_code: String,
    pub lat: String,
    pub lon: String,
    pub location_id: String,
    pub unicode: String,
}

const GROUP_SUFFIXES: [&str; 7] = [
    "City",
    "Country",
    "CountryCode",
    "Lat",
    "Lon",
    "LocationId",
    "Unicode",
];

impl LocationGroup {
    /// Локация считается указанной, если есть строка отображения или город
    pub fn is_present(&self) -> bool {
        !self.display.trim().is_empty() || !self.city.trim().is_empty()
    }

    fn field_mut(&mut self, suffix: &str) -> Option<&mut String> {
        match suffix {
            "City" => Some(&mut self.city),
            "Country" => Some(&mut self.country),
            "CountryCode" => Some(&mut self.country_code),
            "Lat" => Some(&mut self.lat),
            "Lon" => Some(&mut self.lon),
            "LocationId" => Some(&mut self.location_id),
            "Unicode" => Some(&mut self.unicode),
            _ => None,
        }
    }

    fn field(&self, suffix: &str) -> &str {
        match suffix {
            "City" => &self.city,
            "Country" => &self.country,
            "CountryCode" => &self.country_code,
            "Lat" => &self.lat,
            "Lon" => &self.lon,
            "LocationId" => &self.location_id,
            "Unicode" => &self.unicode,
            _ => "",
        }
    }

    fn take_from(role: LocationRole, map: &mut Map<String, Value>) -> Self {
        let mut group = LocationGroup {
            display: map
                .remove(role.display_key())
                .map(|v| value_to_string(&v))
                .unwrap_or_default(),
            ..Default::default()
        };
        for suffix in GROUP_SUFFIXES {
            let key = format!("{}{}", role.prefix(), suffix);
            if let (Some(value), Some(slot)) = (map.remove(&key), group.field_mut(suffix)) {
                *slot = value_to_string(&value);
            }
        }
        group
    }
}

/// Все шесть групп локаций заявки.
///
/// В JSON формы группы лежат плоско, рядом с остальными полями
/// (`pol`, `polCity`, `polLat`, ..., `pickupLocation`, `pickupCity`, ...),
/// поэтому (де)сериализация написана вручную и подключается через `flatten`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Locations {
    pub pol: LocationGroup,
    pub pod: LocationGroup,
    pub plor: LocationGroup,
    pub plod: LocationGroup,
    pub pickup: LocationGroup,
    pub ret: LocationGroup,
}

impl Locations {
    pub fn get(&self, role: LocationRole) -> &LocationGroup {
        match role {
            LocationRole::Pol => &self.pol,
            LocationRole::Pod => &self.pod,
            LocationRole::Plor => &self.plor,
            LocationRole::Plod => &self.plod,
            LocationRole::Pickup => &self.pickup,
            LocationRole::Return => &self.ret,
        }
    }

    pub fn get_mut(&mut self, role: LocationRole) -> &mut LocationGroup {
        match role {
            LocationRole::Pol => &mut self.pol,
            LocationRole::Pod => &mut self.pod,
            LocationRole::Plor => &mut self.plor,
            LocationRole::Plod => &mut self.plod,
            LocationRole::Pickup => &mut self.pickup,
            LocationRole::Return => &mut self.ret,
        }
    }
}

impl Serialize for Locations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LocationRole::ALL.len() * 8))?;
        for role in LocationRole::ALL {
            let group = self.get(role);
            map.serialize_entry(role.display_key(), &group.display)?;
            for suffix in GROUP_SUFFIXES {
                map.serialize_entry(&format!("{}{}", role.prefix(), suffix), group.field(suffix))?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Locations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let mut locations = Locations::default();
        for role in LocationRole::ALL {
            *locations.get_mut(role) = LocationGroup::take_from(role, &mut map);
        }
        Ok(locations)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColdTreatment {
    #[serde(deserialize_with = "nullable")]
    pub required: bool,

    #[serde(deserialize_with = "string_or_number")]
    pub temperature: String,

    #[serde(deserialize_with = "nullable")]
    pub temperature_set_points: Vec<SetPoint>,

    #[serde(deserialize_with = "nullable")]
    pub multiple_set_points: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Probes {
    #[serde(deserialize_with = "count_or_zero")]
    pub number_of_cargo_probes: u32,

    #[serde(deserialize_with = "nullable")]
    pub drain_holes: bool,

    /// "open" или "closed"
    #[serde(deserialize_with = "string_or_number")]
    pub fresh_air_exchange: String,

    #[serde(deserialize_with = "string_or_number")]
    pub ventilation_volume: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Humidity {
    #[serde(deserialize_with = "nullable")]
    pub required: bool,

    #[serde(deserialize_with = "string_or_number")]
    pub percentage: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Genset {
    #[serde(deserialize_with = "nullable")]
    pub during_export: bool,

    #[serde(deserialize_with = "nullable")]
    pub during_import: bool,
}

/// Физические параметры груза; числа хранятся строками, как их ввели
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CargoDimensions {
    #[serde(deserialize_with = "string_or_number")]
    pub class: String,

    #[serde(deserialize_with = "string_or_number")]
    pub un_number: String,

    #[serde(deserialize_with = "string_or_number")]
    pub width: String,

    #[serde(deserialize_with = "string_or_number")]
    pub length: String,

    #[serde(deserialize_with = "string_or_number")]
    pub height: String,

    /// "m" или "in"
    #[serde(deserialize_with = "string_or_number")]
    pub length_metrics: String,

    #[serde(deserialize_with = "string_or_number")]
    pub package_type: String,

    #[serde(deserialize_with = "string_or_number")]
    pub number_of_packages: String,

    #[serde(deserialize_with = "string_or_number")]
    pub volume: String,

    #[serde(deserialize_with = "string_or_number")]
    pub truck_type: String,

    #[serde(deserialize_with = "string_or_number")]
    pub number_of_pallets: String,

    #[serde(deserialize_with = "nullable")]
    pub stackable_cargo: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Liftgate {
    #[serde(deserialize_with = "nullable")]
    pub required: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Addons {
    #[serde(deserialize_with = "nullable")]
    pub port_agent: bool,

    #[serde(deserialize_with = "nullable")]
    pub track_live: bool,

    #[serde(deserialize_with = "nullable")]
    pub troke_trace: bool,

    #[serde(deserialize_with = "nullable")]
    pub soc_for_all: bool,

    #[serde(deserialize_with = "nullable")]
    pub ready_to_load: bool,

    #[serde(deserialize_with = "nullable")]
    pub change_destination: bool,

    #[serde(deserialize_with = "nullable")]
    pub extra_free_time: bool,

    #[serde(deserialize_with = "nullable")]
    pub reduce_emission: bool,

    #[serde(deserialize_with = "nullable")]
    pub reposition: bool,

    #[serde(deserialize_with = "nullable")]
    pub stuffing: StuffingAddon,

    #[serde(deserialize_with = "nullable")]
    pub unstuffing: StuffingAddon,

    #[serde(deserialize_with = "nullable")]
    pub customs_brokerage: CustomsBrokerageAddon,

    #[serde(deserialize_with = "nullable")]
    pub inspection: InspectionAddon,

    #[serde(deserialize_with = "nullable")]
    pub insurance: InsuranceAddon,
}

/// Затарка / растарка контейнера
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StuffingAddon {
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,

    #[serde(deserialize_with = "string_or_number")]
    pub equipment: String,

    /// Количество рабочих
    #[serde(deserialize_with = "string_or_number")]
    pub resources: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomsBrokerageAddon {
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,

    #[serde(deserialize_with = "nullable")]
    pub origin: bool,

    #[serde(deserialize_with = "nullable")]
    pub destination: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionAddon {
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,

    #[serde(rename = "type", deserialize_with = "string_or_number")]
    pub kind: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsuranceAddon {
    #[serde(deserialize_with = "nullable")]
    pub enabled: bool,

    #[serde(deserialize_with = "string_or_number")]
    pub cargo_value: String,

    #[serde(deserialize_with = "string_or_number")]
    pub currency: String,
}

/// Черновик заявки, который заполняется в форме
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipmentDraft {
    /// sea | air | road | rail | combined | ecommerce
    #[serde(deserialize_with = "string_or_number")]
    pub mode: String,

    #[serde(deserialize_with = "string_or_number")]
    pub shipment_type: String,

    #[serde(deserialize_with = "string_or_number")]
    pub container_type: String,

    #[serde(deserialize_with = "string_or_number")]
    pub cargo_type: String,

    #[serde(deserialize_with = "string_or_number")]
    pub commodity: String,

    #[serde(deserialize_with = "string_or_number")]
    pub gross_weight: String,

    #[serde(
        rename = "accsesConditions",
        alias = "accessConditions",
        deserialize_with = "string_or_number"
    )]
    pub access_conditions: String,

    #[serde(deserialize_with = "nullable")]
    pub plor_checked: bool,

    #[serde(deserialize_with = "nullable")]
    pub plod_checked: bool,

    #[serde(deserialize_with = "nullable")]
    pub pickup_checked: bool,

    #[serde(deserialize_with = "nullable")]
    pub return_checked: bool,

    #[serde(flatten)]
    pub locations: Locations,

    #[serde(deserialize_with = "nullable")]
    pub cold_treatment: ColdTreatment,

    #[serde(deserialize_with = "nullable")]
    pub probes: Probes,

    #[serde(deserialize_with = "nullable")]
    pub humidity: Humidity,

    #[serde(deserialize_with = "nullable")]
    pub genset: Genset,

    #[serde(deserialize_with = "nullable")]
    pub cargo: CargoDimensions,

    #[serde(deserialize_with = "nullable")]
    pub liftgate: Liftgate,

    #[serde(deserialize_with = "nullable")]
    pub addons: Addons,

    #[serde(deserialize_with = "nullable")]
    pub comparison_results: Vec<ComparisonOption>,
}

impl ShipmentDraft {
    /// Применяется ли локация; POL и POD применяются всегда
    pub fn is_checked(&self, role: LocationRole) -> bool {
        match role {
            LocationRole::Pol | LocationRole::Pod => true,
            LocationRole::Plor => self.plor_checked,
            LocationRole::Plod => self.plod_checked,
            LocationRole::Pickup => self.pickup_checked,
            LocationRole::Return => self.return_checked,
        }
    }

    pub(crate) fn set_checked(&mut self, role: LocationRole, checked: bool) {
        match role {
            LocationRole::Pol | LocationRole::Pod => {}
            LocationRole::Plor => self.plor_checked = checked,
            LocationRole::Plod => self.plod_checked = checked,
            LocationRole::Pickup => self.pickup_checked = checked,
            LocationRole::Return => self.return_checked = checked,
        }
    }
}
