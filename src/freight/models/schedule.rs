use serde::{Deserialize, Serialize};

use crate::util::nullable;

/// Одно решение из ответа `schedule/points-to-points`
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSchedule {
    pub company: Option<String>,
    pub solution_number: Option<i64>,
    pub price: Option<f64>,

    /// Время в пути в часах
    pub transit_time: Option<f64>,

    pub place_of_receipt: Option<SchedulePoint>,
    pub place_of_delivery: Option<SchedulePoint>,
    pub receipt_type_at_origin: Option<String>,
    pub delivery_type_at_destination: Option<String>,

    #[serde(deserialize_with = "nullable")]
    pub cut_off_times: Vec<CutOffTime>,

    pub legs: Option<Vec<Leg>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulePoint {
    pub date_time: Option<String>,
    pub location: Option<ScheduleLocation>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleLocation {
    pub location_name: Option<String>,
    pub facility: Option<Facility>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Facility {
    pub facility_code: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CutOffTime {
    pub cut_off_date_time_code: Option<String>,
    pub cut_off_date_time: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Leg {
    pub sequence_number: Option<u32>,
    pub transport: Option<Transport>,
    pub departure: Option<SchedulePoint>,
    pub arrival: Option<SchedulePoint>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transport {
    pub vessel: Option<Vessel>,

    #[serde(deserialize_with = "nullable")]
    pub service_partners: Vec<ServicePartner>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vessel {
    pub name: Option<String>,

    #[serde(rename = "vesselIMONumber")]
    pub vessel_imo_number: Option<String>,

    pub flag: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePartner {
    pub carrier_service_name: Option<String>,
    pub carrier_service_code: Option<String>,
    pub carrier_import_voyage_number: Option<String>,
}

/// Тело запроса `schedule/points-to-points`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    pub cargo_type: String,
    pub place_of_delivery_code: String,
    pub place_of_receipt_code: String,
    pub stuffing_volume: Option<f64>,
    pub stuffing_weight: f64,
}

/// Сервис расписаний отвечает то массивом, то одиночным объектом
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScheduleResponse {
    Many(Vec<RawSchedule>),
    One(RawSchedule),
}

impl ScheduleResponse {
    pub fn into_vec(self) -> Vec<RawSchedule> {
        match self {
            ScheduleResponse::Many(v) => v,
            ScheduleResponse::One(s) => vec![s],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_object_response_is_wrapped() {
        let one: ScheduleResponse =
            serde_json::from_value(json!({ "company": "MAERSK", "transitTime": 240 })).unwrap();
        let schedules = one.into_vec();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].company.as_deref(), Some("MAERSK"));

        let many: ScheduleResponse =
            serde_json::from_value(json!([{ "company": "CMA" }, { "company": "MSC" }])).unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn vessel_imo_uses_upper_case_key() {
        let vessel: Vessel =
            serde_json::from_value(json!({ "name": "EVER GIVEN", "vesselIMONumber": "9811000" }))
                .unwrap();
        assert_eq!(vessel.vessel_imo_number.as_deref(), Some("9811000"));
    }
}
