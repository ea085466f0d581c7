use freightbook::{
    freight::models::{CargoType, ContainerCategory, ContainerSize},
    schedule::format_schedule_date,
    shipment::{
        DraftField, LocationGroup, LocationRole, ShipmentDraft, ShipmentStore,
        apply_quote_to_store, from_api_shipment,
        mapper::{extract_container_size, extract_container_type_category},
        to_api_shipment,
    },
};
use serde_json::json;

fn location(city: &str, code: &str, unicode: &str) -> LocationGroup {
    LocationGroup {
        display: format!("{city}, {code}"),
        city: city.into(),
        country_code: code.into(),
        unicode: unicode.into(),
        ..Default::default()
    }
}

fn sample_draft() -> ShipmentDraft {
    serde_json::from_value(json!({
        "mode": "sea",
        "shipmentType": "FCL",
        "containerType": "40' Reefer",
        "cargoType": "Perishable",
        "commodity": "Citrus",
        "grossWeight": "18000",
        "accsesConditions": "Limited access",
        "pol": "Agadir, MA",
        "polCity": "Agadir",
        "polCountryCode": "MA",
        "polUnicode": "MAAGA",
        "pod": "Rotterdam, NL",
        "podCity": "Rotterdam",
        "podCountryCode": "NL",
        "podUnicode": "NLRTM",
        "coldTreatment": { "required": true, "temperature": "-1" },
        "probes": { "numberOfCargoProbes": "3", "freshAirExchange": "closed" },
        "cargo": { "unNumber": "", "height": "", "lengthMetrics": "m" },
        "addons": {
            "insurance": { "enabled": true, "cargoValue": "5000", "currency": "USD" },
            "customsBrokerage": { "enabled": true, "origin": true }
        }
    }))
    .unwrap()
}

#[test]
fn forward_cargo_type_stays_in_forward_set() {
    let allowed = [
        CargoType::Imo,
        CargoType::Reefer,
        CargoType::Oog,
        CargoType::Lquid,
        CargoType::General,
    ];

    for label in ["Hazardous", "Perishable", "Oversized", "Liquid", "General", "DRY", "", "?"] {
        let draft = ShipmentDraft {
            cargo_type: label.into(),
            ..Default::default()
        };
        assert!(allowed.contains(&to_api_shipment(&draft).cargo_type), "{label}");
    }
}

#[test]
fn unchecked_plor_round_trips_as_unchecked() {
    let mut draft = sample_draft();
    draft.locations.plor = location("Casablanca", "MA", "MACAS");

    let back = from_api_shipment(&to_api_shipment(&draft));
    assert!(!back.plor_checked);
    assert!(!back.plod_checked);
}

#[test]
fn checked_plor_with_distinct_city_round_trips() {
    let mut draft = sample_draft();
    draft.plor_checked = true;
    draft.locations.plor = location("Casablanca", "MA", "MACAS");

    let back = from_api_shipment(&to_api_shipment(&draft));
    assert!(back.plor_checked);
    assert_eq!(back.locations.plor.display, "Casablanca, MA");
    assert_eq!(back.locations.plor.unicode, "MACAS");
}

#[test]
fn mode_round_trips() {
    for mode in ["sea", "air", "road", "rail", "ecommerce"] {
        let draft = ShipmentDraft {
            mode: mode.into(),
            ..Default::default()
        };
        assert_eq!(from_api_shipment(&to_api_shipment(&draft)).mode, mode);
    }
}

#[test]
fn high_cube_container_is_split() {
    assert_eq!(extract_container_size("40ft High Cube"), ContainerSize::Size40);
    assert_eq!(
        extract_container_type_category("40ft High Cube"),
        ContainerCategory::HighCube
    );
}

#[test]
fn insurance_value_and_currency() {
    let api = to_api_shipment(&sample_draft());
    assert_eq!(api.service_addons.insurance, 5000.0);
    assert_eq!(api.service_addons.insurance_currency, "USD");
}

#[test]
fn missing_cut_off_formats_to_none() {
    assert_eq!(format_schedule_date(None), None);
}

#[test]
fn unchecking_pickup_clears_payload_location() {
    let mut store = ShipmentStore::with_draft(sample_draft());
    store.set_field(DraftField::Checked(LocationRole::Pickup, true));
    store.set_field(DraftField::Location(
        LocationRole::Pickup,
        location("Marrakech", "MA", ""),
    ));
    assert!(store.to_api_shipment().container_pick_up_location.is_some());

    store.set_field(DraftField::Checked(LocationRole::Pickup, false));

    let value = serde_json::to_value(store.draft()).unwrap();
    for key in [
        "pickupLocation",
        "pickupCity",
        "pickupCountry",
        "pickupCountryCode",
        "pickupLat",
        "pickupLon",
        "pickupLocationId",
        "pickupUnicode",
    ] {
        assert_eq!(value[key], "", "{key}");
    }

    let payload = serde_json::to_value(store.to_api_shipment()).unwrap();
    assert!(payload["containerPickUpLocation"].is_null());
}

#[test]
fn api_document_uses_backend_names() {
    let payload = serde_json::to_value(to_api_shipment(&sample_draft())).unwrap();

    assert_eq!(payload["shipmentMode"], "SEA");
    assert_eq!(payload["cargoType"], "REEFER");
    assert_eq!(payload["containerSize"], "SIZE_40");
    assert_eq!(payload["containerType"], "REEFER");
    assert_eq!(payload["shipmentMethod"], "FCL");
    assert_eq!(payload["grossWeight"], 18000.0);
    assert_eq!(payload["status"], "PENDING");
    assert_eq!(payload["trackId"], "");
    assert_eq!(payload["cargoDetail"]["accessConditions"], "LIMITED");
    assert_eq!(payload["cargoDetail"]["cargoProbs"], 3);
    assert_eq!(payload["cargoDetail"]["coldTraitement"], true);
    assert_eq!(payload["cargoDetail"]["freshAirExchangeOpen"], false);
    assert!(payload["cargoDetail"]["height"].is_null());
    assert!(payload["cargoDetail"]["unNumber"].is_null());
    assert_eq!(payload["serviceAddons"]["customerBrokerage"], "ORIGIN");
    assert_eq!(payload["pickUpPosition"]["unicode"], "MAAGA");
    assert_eq!(payload["positionA"]["city"], "Agadir");
    assert_eq!(payload["positionB"]["city"], "Rotterdam");
    assert!(payload["containerDeliveryLocation"].is_null());
}

#[test]
fn reverse_mapping_restores_the_form() {
    let back = from_api_shipment(&to_api_shipment(&sample_draft()));

    assert_eq!(back.cargo_type, "Perishable");
    assert_eq!(back.container_type, "40' Reefer");
    assert_eq!(back.access_conditions, "limited access");
    assert_eq!(back.gross_weight, "18000");
    assert_eq!(back.locations.pol.display, "Agadir, MA");
    assert_eq!(back.locations.pod.unicode, "NLRTM");
    assert!(back.cold_treatment.required);
    assert_eq!(back.probes.number_of_cargo_probes, 3);
    assert_eq!(back.probes.fresh_air_exchange, "closed");
    assert!(back.addons.customs_brokerage.origin);
    assert_eq!(back.addons.insurance.cargo_value, "5000");
}

#[test]
fn applying_reloaded_quote_fills_fresh_store() {
    let quote = from_api_shipment(&to_api_shipment(&sample_draft()));

    let mut store = ShipmentStore::new();
    store.set_field(DraftField::Commodity("stale".into()));
    apply_quote_to_store(&quote, |field| store.set_field(field));

    let mut expected = quote.clone();
    expected.comparison_results.clear();
    assert_eq!(store.draft(), &expected);
}
