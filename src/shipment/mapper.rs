//! Преобразование черновика формы в документ заявки и обратно.
//!
//! Обе функции чистые и не падают: пустые и битые значения превращаются
//! в значения по умолчанию, нераспознанные перечисления уходят в
//! GENERAL / EASY / STANDARD / SIZE_40 / SEA.

use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::{
    freight::models::{
        AccessCondition, ApiLocation, ApiShipment, CargoDetail, CargoType, ContainerCategory,
        ContainerSize, CustomsBrokerage, Inspection, LengthUnit, LocationType, ServiceAddons,
        ShipmentMode, TemperatureSetPoints,
    },
    shipment::draft::{
        Addons, CargoDimensions, ColdTreatment, CustomsBrokerageAddon, Genset, Humidity,
        InspectionAddon, InsuranceAddon, Liftgate, LocationGroup, LocationRole, Locations,
        Probes, ShipmentDraft, StuffingAddon,
    },
    util::{
        format_number, format_optional_number, parse_leading_int, parse_un_number, safe_number,
    },
};

pub const PENDING_STATUS: &str = "PENDING";
pub const DEFAULT_SHIPMENT_METHOD: &str = "LCL";
pub const DEFAULT_INSURANCE_CURRENCY: &str = "EURO";
pub const DEFAULT_STUFFING_EQUIPMENT: &str = "MANUALLY";
const SET_POINTS_MODE: &str = "string";

/* =========================
   Форма -> API
========================= */

pub fn to_api_shipment(draft: &ShipmentDraft) -> ApiShipment {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let pick_up_position = build_location(LocationRole::Pol, draft);
    let delivery_position = build_location(LocationRole::Pod, draft);

    let position_a = if draft.plor_checked && draft.locations.plor.is_present() {
        build_location(LocationRole::Plor, draft)
    } else {
        pick_up_position.clone()
    };

    let position_b = if draft.plod_checked && draft.locations.plod.is_present() {
        build_location(LocationRole::Plod, draft)
    } else {
        delivery_position.clone()
    };

    ApiShipment {
        id: 0,
        cargo_detail: build_cargo_detail(draft),
        cargo_type: map_cargo_type(&draft.cargo_type),
        commodity: draft.commodity.clone(),
        container_pick_up_location: draft
            .pickup_checked
            .then(|| build_location(LocationRole::Pickup, draft)),
        container_delivery_location: draft
            .return_checked
            .then(|| build_location(LocationRole::Return, draft)),
        container_size: extract_container_size(&draft.container_type),
        container_type: extract_container_type_category(&draft.container_type),
        delivery_position,
        pick_up_position,
        position_a,
        position_b,
        service_addons: build_service_addons(&draft.addons),
        gross_weight: safe_number(&draft.gross_weight).unwrap_or(0.0),
        shipment_method: non_empty_or(&draft.shipment_type, DEFAULT_SHIPMENT_METHOD),
        shipment_mode: map_shipment_mode(&draft.mode),
        status: PENDING_STATUS.to_string(),
        track_id: String::new(),
        creation_date: now.clone(),
        update_date: now,
    }
}

fn build_cargo_detail(draft: &ShipmentDraft) -> CargoDetail {
    let cargo = &draft.cargo;
    let cold = &draft.cold_treatment;
    let probes = &draft.probes;

    CargoDetail {
        access_conditions: map_access_condition(&draft.access_conditions),
        cargo_probs: probes.number_of_cargo_probes,
        cold_traitement: cold.required,
        drain_holes_open: probes.drain_holes,
        fresh_air_exchange_open: probes.fresh_air_exchange == "open",
        genset_during_export: draft.genset.during_export,
        genset_during_import: draft.genset.during_import,
        height: safe_number(&cargo.height),
        length: safe_number(&cargo.length),
        width: safe_number(&cargo.width),
        number_of_packages: safe_number(&cargo.number_of_packages),
        number_of_pallets: safe_number(&cargo.number_of_pallets),
        humidity: draft.humidity.percentage.clone(),
        humidity_control: draft.humidity.required,
        id: 0,
        imo_class: cargo.class.clone(),
        lift_gate: draft.liftgate.required,
        package_type: cargo.package_type.clone(),
        stackable_cargo: cargo.stackable_cargo,
        temperature: cold.temperature.clone(),
        temperature_set_points: TemperatureSetPoints {
            enabled: cold.multiple_set_points,
            mode: SET_POINTS_MODE.to_string(),
            sets: cold.temperature_set_points.clone(),
        },
        truck_type: cargo.truck_type.clone(),
        un_number: parse_un_number(&cargo.un_number),
        unit: if cargo.length_metrics == "m" {
            LengthUnit::Meter
        } else {
            LengthUnit::Inch
        },
        ventilation_volume: probes.ventilation_volume.clone(),
        volume: cargo.volume.clone(),
    }
}

/// Локация роли; без города и страны подставляется вся строка отображения,
/// код страны не подставляется
pub fn build_location(role: LocationRole, draft: &ShipmentDraft) -> ApiLocation {
    let group = draft.locations.get(role);

    ApiLocation {
        city: non_empty_or(&group.city, &group.display),
        country: non_empty_or(&group.country, &group.display),
        country_code: group.country_code.clone(),
        lat: group.lat.clone(),
        lon: group.lon.clone(),
        id: group.location_id.trim().parse().unwrap_or(0),
        location_type: LocationType::Port,
        unicode: group.unicode.clone(),
    }
}

fn build_service_addons(addons: &Addons) -> ServiceAddons {
    ServiceAddons {
        id: 0,
        change_destination: addons.change_destination,
        extra_free_time: addons.extra_free_time,
        port_agent: addons.port_agent,
        ready_to_load: addons.ready_to_load,
        reduce_emission: addons.reduce_emission,
        repositionning: addons.reposition,
        soc_for_all: addons.soc_for_all,
        live_tracking: addons.track_live,
        customer_brokerage: map_customs_brokerage(&addons.customs_brokerage),
        inspection: addons.inspection.enabled.then(|| Inspection {
            kind: addons.inspection.kind.clone(),
        }),
        insurance: if addons.insurance.enabled {
            safe_number(&addons.insurance.cargo_value).unwrap_or(0.0)
        } else {
            0.0
        },
        insurance_currency: non_empty_or(&addons.insurance.currency, DEFAULT_INSURANCE_CURRENCY),
        stuffing: map_stuffing(&addons.stuffing),
        stuffing_number_workers: parse_workers(&addons.stuffing.resources),
        un_stuffing: map_stuffing(&addons.unstuffing),
        un_stuffing_number_workers: parse_workers(&addons.unstuffing.resources),
        troke_trace: addons.troke_trace,
    }
}

pub fn map_customs_brokerage(customs: &CustomsBrokerageAddon) -> Option<CustomsBrokerage> {
    if !customs.enabled {
        return None;
    }
    match (customs.origin, customs.destination) {
        (true, true) => Some(CustomsBrokerage::Both),
        (true, false) => Some(CustomsBrokerage::Origin),
        (false, true) => Some(CustomsBrokerage::Destination),
        (false, false) => None,
    }
}

fn map_stuffing(stuffing: &StuffingAddon) -> Option<String> {
    stuffing.enabled.then(|| {
        let equipment = stuffing.equipment.trim();
        if equipment.is_empty() {
            DEFAULT_STUFFING_EQUIPMENT.to_string()
        } else {
            equipment.to_uppercase()
        }
    })
}

fn parse_workers(resources: &str) -> u32 {
    parse_leading_int(resources)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

/// Условия доступа по подстроке; всё нераспознанное считается EASY
pub fn map_access_condition(input: &str) -> AccessCondition {
    let v = input.to_lowercase();
    if v.contains("limited") {
        AccessCondition::Limited
    } else if v.contains("difficult") || v.contains("restricted") {
        AccessCondition::Difficult
    } else {
        AccessCondition::Easy
    }
}

pub fn map_cargo_type(input: &str) -> CargoType {
    match input.trim().to_lowercase().as_str() {
        "hazardous" => CargoType::Imo,
        "perishable" | "reefer" => CargoType::Reefer,
        "oversized" | "oog" => CargoType::Oog,
        "liquid" => CargoType::Lquid,
        "general" | "" => CargoType::General,
        other => {
            debug!("Неизвестный тип груза {other:?}, используется GENERAL");
            CargoType::General
        }
    }
}

pub fn extract_container_size(container_type: &str) -> ContainerSize {
    if container_type.contains("20") {
        ContainerSize::Size20
    } else if container_type.contains("45") {
        ContainerSize::Size45
    } else {
        ContainerSize::Size40
    }
}

/// Первое совпадение подстроки выигрывает
pub fn extract_container_type_category(container_type: &str) -> ContainerCategory {
    let t = container_type.to_lowercase();
    if t.contains("reefer") || t.contains("refrigerated") {
        ContainerCategory::Reefer
    } else if t.contains("flat") {
        ContainerCategory::FlatRack
    } else if t.contains("open") {
        ContainerCategory::OpenTop
    } else if t.contains("tank") {
        ContainerCategory::Tank
    } else if t.contains("high cube") {
        ContainerCategory::HighCube
    } else {
        ContainerCategory::Standard
    }
}

/// Режим перевозки: верхний регистр, ecommerce -> ECOMM
pub fn map_shipment_mode(mode: &str) -> ShipmentMode {
    match mode.trim().to_lowercase().as_str() {
        "" | "sea" => ShipmentMode::Sea,
        "air" => ShipmentMode::Air,
        "road" => ShipmentMode::Road,
        "rail" => ShipmentMode::Rail,
        "ecommerce" | "ecomm" => ShipmentMode::Ecomm,
        "combined" => {
            debug!("Комбинированный режим отправляется как COMBINED");
            ShipmentMode::Combined
        }
        other => {
            warn!("Неизвестный режим перевозки {other:?}, используется SEA");
            ShipmentMode::Sea
        }
    }
}

/* =========================
   API -> форма
========================= */

pub fn from_api_shipment(api: &ApiShipment) -> ShipmentDraft {
    let detail = &api.cargo_detail;

    // PLOR/PLOD не хранятся: считаем их выбранными, если город отличается от POL/POD
    let plor_checked = !api.position_a.city.is_empty()
        && api.position_a.city != api.pick_up_position.city;
    let plod_checked = !api.position_b.city.is_empty()
        && api.position_b.city != api.delivery_position.city;

    let locations = Locations {
        pol: flatten_location(Some(&api.pick_up_position)),
        pod: flatten_location(Some(&api.delivery_position)),
        plor: flatten_location(plor_checked.then_some(&api.position_a)),
        plod: flatten_location(plod_checked.then_some(&api.position_b)),
        pickup: flatten_location(api.container_pick_up_location.as_ref()),
        ret: flatten_location(api.container_delivery_location.as_ref()),
    };

    ShipmentDraft {
        mode: api.shipment_mode.ui_mode().to_string(),
        shipment_type: api.shipment_method.clone(),
        container_type: container_display(api.container_size, api.container_type),
        cargo_type: cargo_type_label(api.cargo_type).to_string(),
        commodity: api.commodity.clone(),
        gross_weight: format_optional_number(Some(api.gross_weight)),
        access_conditions: access_condition_phrase(detail.access_conditions).to_string(),
        plor_checked,
        plod_checked,
        pickup_checked: api.container_pick_up_location.is_some(),
        return_checked: api.container_delivery_location.is_some(),
        locations,
        cold_treatment: ColdTreatment {
            required: detail.cold_traitement,
            temperature: detail.temperature.clone(),
            temperature_set_points: detail.temperature_set_points.sets.clone(),
            multiple_set_points: detail.temperature_set_points.enabled,
        },
        probes: Probes {
            number_of_cargo_probes: detail.cargo_probs,
            drain_holes: detail.drain_holes_open,
            fresh_air_exchange: if detail.fresh_air_exchange_open {
                "open".to_string()
            } else {
                "closed".to_string()
            },
            ventilation_volume: detail.ventilation_volume.clone(),
        },
        humidity: Humidity {
            required: detail.humidity_control,
            percentage: detail.humidity.clone(),
        },
        genset: Genset {
            during_export: detail.genset_during_export,
            during_import: detail.genset_during_import,
        },
        cargo: CargoDimensions {
            class: detail.imo_class.clone(),
            un_number: detail
                .un_number
                .filter(|n| *n > 0)
                .map(|n| format!("UN{n}"))
                .unwrap_or_default(),
            width: format_optional_number(detail.width),
            length: format_optional_number(detail.length),
            height: format_optional_number(detail.height),
            length_metrics: match detail.unit {
                LengthUnit::Meter => "m".to_string(),
                LengthUnit::Inch => "in".to_string(),
            },
            package_type: detail.package_type.clone(),
            number_of_packages: format_optional_number(detail.number_of_packages),
            volume: detail.volume.clone(),
            truck_type: detail.truck_type.clone(),
            number_of_pallets: format_optional_number(detail.number_of_pallets),
            stackable_cargo: detail.stackable_cargo,
        },
        liftgate: Liftgate {
            required: detail.lift_gate,
        },
        addons: expand_service_addons(&api.service_addons),
        comparison_results: Vec::new(),
    }
}

fn flatten_location(location: Option<&ApiLocation>) -> LocationGroup {
    let Some(loc) = location else {
        return LocationGroup::default();
    };

    LocationGroup {
        display: if loc.city.is_empty() {
            String::new()
        } else {
            format!("{}, {}", loc.city, loc.country_code)
        },
        city: loc.city.clone(),
        country: loc.country.clone(),
        country_code: loc.country_code.clone(),
        lat: loc.lat.clone(),
        lon: loc.lon.clone(),
        location_id: if loc.id != 0 {
            loc.id.to_string()
        } else {
            String::new()
        },
        unicode: loc.unicode.clone(),
    }
}

fn expand_service_addons(addons: &ServiceAddons) -> Addons {
    let (origin, destination) = match addons.customer_brokerage {
        Some(CustomsBrokerage::Both) => (true, true),
        Some(CustomsBrokerage::Origin) => (true, false),
        Some(CustomsBrokerage::Destination) => (false, true),
        None => (false, false),
    };

    Addons {
        port_agent: addons.port_agent,
        track_live: addons.live_tracking,
        troke_trace: addons.troke_trace,
        soc_for_all: addons.soc_for_all,
        ready_to_load: addons.ready_to_load,
        change_destination: addons.change_destination,
        extra_free_time: addons.extra_free_time,
        reduce_emission: addons.reduce_emission,
        reposition: addons.repositionning,
        stuffing: expand_stuffing(addons.stuffing.as_deref(), addons.stuffing_number_workers),
        unstuffing: expand_stuffing(
            addons.un_stuffing.as_deref(),
            addons.un_stuffing_number_workers,
        ),
        customs_brokerage: CustomsBrokerageAddon {
            enabled: addons.customer_brokerage.is_some(),
            origin,
            destination,
        },
        inspection: addons
            .inspection
            .as_ref()
            .map(|i| InspectionAddon {
                enabled: true,
                kind: i.kind.clone(),
            })
            .unwrap_or_default(),
        insurance: InsuranceAddon {
            enabled: addons.insurance > 0.0,
            cargo_value: if addons.insurance > 0.0 {
                format_number(addons.insurance)
            } else {
                String::new()
            },
            currency: addons.insurance_currency.clone(),
        },
    }
}

fn expand_stuffing(equipment: Option<&str>, workers: u32) -> StuffingAddon {
    StuffingAddon {
        enabled: equipment.is_some(),
        equipment: equipment.map(str::to_lowercase).unwrap_or_default(),
        resources: if workers > 0 {
            workers.to_string()
        } else {
            String::new()
        },
    }
}

pub fn cargo_type_label(cargo_type: CargoType) -> &'static str {
    match cargo_type {
        CargoType::Imo | CargoType::OogImo | CargoType::ReeferImo => "Hazardous",
        CargoType::Reefer => "Perishable",
        CargoType::Oog => "Oversized",
        CargoType::Lquid => "Liquid",
        CargoType::General | CargoType::Dry => "General",
    }
}

pub fn access_condition_phrase(condition: AccessCondition) -> &'static str {
    match condition {
        AccessCondition::Limited => "limited access",
        AccessCondition::Difficult => "difficult access",
        AccessCondition::Easy => "easy access",
    }
}

/// SIZE_40 + REEFER -> "40' Reefer"
pub fn container_display(size: ContainerSize, category: ContainerCategory) -> String {
    format!("{}' {}", size.feet(), category.display_name())
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
