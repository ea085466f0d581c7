use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::ApiShipment;
use crate::util::{nullable, or_none};

/// Заявка в том виде, в каком её возвращает бэкенд
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteRecord {
    #[serde(flatten)]
    pub shipment: ApiShipment,

    pub price: Option<Value>,
    pub total_price: Option<Value>,

    #[serde(deserialize_with = "or_none")]
    pub carrier: Option<String>,

    #[serde(deserialize_with = "or_none")]
    pub customer: Option<String>,
}

impl QuoteRecord {
    /// Цена для отображения: price, затем totalPrice
    pub fn display_price(&self) -> Option<String> {
        [&self.price, &self.total_price]
            .into_iter()
            .flatten()
            .find_map(|v| match v {
                Value::Number(n) => Some(n.to_string()),
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                _ => None,
            })
    }
}

/// Страница ответа `request-quotations/v2/search`
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuotePage {
    #[serde(deserialize_with = "nullable")]
    pub content: Vec<QuoteRecord>,

    #[serde(deserialize_with = "nullable")]
    pub total_elements: u64,

    #[serde(deserialize_with = "or_none")]
    pub total_pages: Option<u64>,

    #[serde(deserialize_with = "or_none")]
    pub has_next: Option<bool>,

    #[serde(deserialize_with = "or_none")]
    pub has_previous: Option<bool>,
}

/// Фильтры поиска заявок
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Роль пользователя, как её отдаёт бэкенд: `{ "nom": "ADMIN" }`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    #[serde(deserialize_with = "nullable")]
    pub nom: String,
}

impl Role {
    pub fn new(nom: impl Into<String>) -> Self {
        Self { nom: nom.into() }
    }
}

/// Пользователь, от имени которого ищутся заявки
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteUser {
    #[serde(deserialize_with = "nullable")]
    pub id: String,

    #[serde(deserialize_with = "or_none")]
    pub role: Option<Role>,
}

impl QuoteUser {
    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(|role| role.nom == "ADMIN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_shipment_and_listing_fields() {
        let record: QuoteRecord = serde_json::from_value(json!({
            "trackId": "TRK-1",
            "shipmentMode": "SEA",
            "totalPrice": 1250.5,
            "carrier": "CMA CGM"
        }))
        .unwrap();

        assert_eq!(record.shipment.track_id, "TRK-1");
        assert_eq!(record.display_price().as_deref(), Some("1250.5"));
        assert_eq!(record.carrier.as_deref(), Some("CMA CGM"));
    }

    #[test]
    fn admin_is_read_from_role_object() {
        let admin: QuoteUser =
            serde_json::from_value(json!({ "id": "u1", "role": { "nom": "ADMIN" } })).unwrap();
        assert!(admin.is_admin());

        let client: QuoteUser =
            serde_json::from_value(json!({ "id": "u2", "role": { "nom": "CLIENT" } })).unwrap();
        assert!(!client.is_admin());

        // роль строкой не распознаётся как объект
        let flat: QuoteUser =
            serde_json::from_value(json!({ "id": "u3", "role": "ADMIN" })).unwrap();
        assert_eq!(flat.role, None);
        assert!(!flat.is_admin());

        assert!(!QuoteUser::default().is_admin());
    }

    #[test]
    fn empty_filter_serializes_to_empty_object() {
        assert_eq!(serde_json::to_value(QuoteFilter::default()).unwrap(), json!({}));
    }

    #[test]
    fn page_with_null_fields_deserializes() {
        let page: QuotePage = serde_json::from_value(json!({
            "content": [
                {
                    "trackId": "TRK-2",
                    "carrier": null,
                    "grossWeight": null,
                    "serviceAddons": { "liveTracking": null, "customerBrokerage": "UNKNOWN" },
                    "cargoDetail": { "unNumber": "UN1993", "numberOfPallets": "12" }
                }
            ],
            "totalElements": 1,
            "totalPages": null,
            "hasNext": null
        }))
        .unwrap();

        assert_eq!(page.content.len(), 1);
        let record = &page.content[0];
        assert_eq!(record.shipment.track_id, "TRK-2");
        assert_eq!(record.carrier, None);
        assert!(!record.shipment.service_addons.live_tracking);
        assert_eq!(record.shipment.service_addons.customer_brokerage, None);
        assert_eq!(record.shipment.cargo_detail.un_number, Some(1993));
        assert_eq!(record.shipment.cargo_detail.number_of_pallets, Some(12.0));
        assert_eq!(page.total_pages, None);
    }
}
