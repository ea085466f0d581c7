//! Нормализация расписаний для экрана сравнения вариантов.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::freight::models::{CutOffTime, Leg, RawSchedule, SchedulePoint};

/// Расписание в плоском виде для отображения
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizedSchedule {
    pub company: Option<String>,
    pub solution_number: Option<i64>,
    pub price: Option<f64>,

    pub transit_time_hours: Option<f64>,
    pub transit_time_days: Option<i64>,

    pub departure_date: Option<String>,
    pub arrival_date: Option<String>,

    pub origin_location: Option<String>,
    pub origin_facility: Option<String>,
    pub destination_location: Option<String>,
    pub destination_facility: Option<String>,

    pub receipt_type_at_origin: Option<String>,
    pub delivery_type_at_destination: Option<String>,

    pub cut_off_times: Vec<CutOffTime>,
    pub legs: Vec<LegSummary>,

    #[serde(rename = "_raw")]
    pub raw: RawSchedule,
}

/// Одно плечо маршрута
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegSummary {
    pub sequence_number: Option<u32>,
    pub vessel_name: Option<String>,
    #[serde(rename = "vesselIMO")]
    pub vessel_imo: Option<String>,
    pub vessel_flag: Option<String>,
    pub service_name: Option<String>,
    pub service_code: Option<String>,
    pub voyage_number: Option<String>,
    pub departure_location: Option<String>,
    pub departure_date_time: Option<String>,
    pub arrival_location: Option<String>,
    pub arrival_date_time: Option<String>,
}

/// Метаданные варианта до подмешивания расписания
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultMeta {
    pub id: String,
    pub company: Option<String>,
    pub transit_days: Option<i64>,
    pub price: Option<f64>,
}

/// Вариант на экране сравнения
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComparisonOption {
    pub id: String,
    pub price: Option<f64>,
    pub company: Option<String>,
    pub transit_days: Option<i64>,
    pub departure_date: Option<String>,
    pub arrival_date: Option<String>,
    pub schedule: Option<NormalizedSchedule>,
}

pub fn normalize_schedule_data(data: Option<&RawSchedule>) -> Option<NormalizedSchedule> {
    let data = data?;
    let receipt = data.place_of_receipt.as_ref();
    let delivery = data.place_of_delivery.as_ref();

    let location_name = |point: Option<&SchedulePoint>| {
        point
            .and_then(|p| p.location.as_ref())
            .and_then(|l| l.location_name.clone())
    };
    let facility_code = |point: Option<&SchedulePoint>| {
        point
            .and_then(|p| p.location.as_ref())
            .and_then(|l| l.facility.as_ref())
            .and_then(|f| f.facility_code.clone())
    };

    Some(NormalizedSchedule {
        company: data.company.clone(),
        solution_number: data.solution_number,
        price: data.price,
        transit_time_hours: data.transit_time,
        transit_time_days: data.transit_time.and_then(hours_to_days),
        departure_date: receipt.and_then(|p| non_empty(p.date_time.as_deref())),
        arrival_date: delivery.and_then(|p| non_empty(p.date_time.as_deref())),
        origin_location: location_name(receipt),
        origin_facility: facility_code(receipt),
        destination_location: location_name(delivery),
        destination_facility: facility_code(delivery),
        receipt_type_at_origin: data.receipt_type_at_origin.clone(),
        delivery_type_at_destination: data.delivery_type_at_destination.clone(),
        cut_off_times: data.cut_off_times.clone(),
        legs: extract_vessel_info(data.legs.as_deref()),
        raw: data.clone(),
    })
}

pub fn extract_vessel_info(legs: Option<&[Leg]>) -> Vec<LegSummary> {
    let Some(legs) = legs else {
        return Vec::new();
    };

    legs.iter()
        .map(|leg| {
            let transport = leg.transport.as_ref();
            let vessel = transport.and_then(|t| t.vessel.as_ref());
            let partner = transport.and_then(|t| t.service_partners.first());

            LegSummary {
                sequence_number: leg.sequence_number,
                vessel_name: vessel.and_then(|v| v.name.clone()),
                vessel_imo: vessel.and_then(|v| v.vessel_imo_number.clone()),
                vessel_flag: vessel.and_then(|v| v.flag.clone()),
                service_name: partner.and_then(|p| p.carrier_service_name.clone()),
                service_code: partner.and_then(|p| p.carrier_service_code.clone()),
                voyage_number: partner.and_then(|p| p.carrier_import_voyage_number.clone()),
                departure_location: leg
                    .departure
                    .as_ref()
                    .and_then(|d| d.location.as_ref())
                    .and_then(|l| l.location_name.clone()),
                departure_date_time: leg.departure.as_ref().and_then(|d| d.date_time.clone()),
                arrival_location: leg
                    .arrival
                    .as_ref()
                    .and_then(|a| a.location.as_ref())
                    .and_then(|l| l.location_name.clone()),
                arrival_date_time: leg.arrival.as_ref().and_then(|a| a.date_time.clone()),
            }
        })
        .collect()
}

/// "Departed", "Today", "1 day", "<n> days" относительно сегодняшней даты
pub fn calculate_days_until_departure(departure: Option<&str>) -> Option<String> {
    calculate_days_until_departure_from(departure, Local::now().date_naive())
}

pub fn calculate_days_until_departure_from(
    departure: Option<&str>,
    today: NaiveDate,
) -> Option<String> {
    let departure = parse_schedule_date_time(departure?)?.date();
    let days = (departure - today).num_days();

    Some(match days {
        d if d < 0 => "Departed".to_string(),
        0 => "Today".to_string(),
        d => format!("{d} {}", day_word(d)),
    })
}

/// "Oct 19"
pub fn format_schedule_date(value: Option<&str>) -> Option<String> {
    let dt = parse_schedule_date_time(value?)?;
    Some(dt.format("%b %-d").to_string())
}

/// "Oct 19, 02:30 PM"
pub fn format_schedule_date_time(value: Option<&str>) -> Option<String> {
    let dt = parse_schedule_date_time(value?)?;
    Some(dt.format("%b %-d, %I:%M %p").to_string())
}

pub fn format_transit_time(hours: Option<f64>) -> Option<String> {
    let days = hours_to_days(hours?)?;
    Some(format!("{days} {}", day_word(days)))
}

pub fn cut_off_label(code: &str) -> &str {
    match code {
        "DGC" => "Dangerous Cargo Cut-off",
        "DCO" => "Documentation Cut-off",
        "FCO" => "Full Container Cut-off",
        "VGM" => "VGM Cut-off",
        "ECP" => "Empty Container Pick-up",
        other => other,
    }
}

pub fn receipt_delivery_type(code: &str) -> &str {
    match code {
        "CY" => "Container Yard",
        "CFS" => "Container Freight Station",
        "SD" => "Store Door",
        "DOOR" => "Door to Door",
        other => other,
    }
}

/// Есть перевозчик и обе даты
pub fn is_valid_schedule_data(data: Option<&RawSchedule>) -> bool {
    let Some(data) = data else {
        return false;
    };
    let has_date = |p: &Option<SchedulePoint>| {
        p.as_ref()
            .and_then(|p| p.date_time.as_deref())
            .is_some_and(|d| !d.is_empty())
    };

    data.company.as_deref().is_some_and(|c| !c.is_empty())
        && has_date(&data.place_of_receipt)
        && has_date(&data.place_of_delivery)
}

/// Данные расписания перекрывают перевозчика и срок из метаданных
pub fn merge_schedule_with_result(
    meta: ResultMeta,
    data: Option<&RawSchedule>,
) -> ComparisonOption {
    let normalized = normalize_schedule_data(data);

    let company = normalized
        .as_ref()
        .and_then(|s| s.company.clone())
        .filter(|c| !c.is_empty())
        .or(meta.company);
    let transit_days = normalized
        .as_ref()
        .and_then(|s| s.transit_time_days)
        .or(meta.transit_days);

    ComparisonOption {
        id: meta.id,
        price: meta.price,
        company,
        transit_days,
        departure_date: normalized.as_ref().and_then(|s| s.departure_date.clone()),
        arrival_date: normalized.as_ref().and_then(|s| s.arrival_date.clone()),
        schedule: normalized,
    }
}

/// RFC 3339 переводится в локальное время, даты без зоны берутся как есть
fn parse_schedule_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn hours_to_days(hours: f64) -> Option<i64> {
    (hours.is_finite() && hours != 0.0).then(|| (hours / 24.0).ceil() as i64)
}

fn day_word(n: i64) -> &'static str {
    if n == 1 { "day" } else { "days" }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
