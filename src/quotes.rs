//! Список заявок пользователя: фильтры, строки таблицы, пагинация.

use serde::Serialize;

use crate::{
    freight::models::{QuoteFilter, QuotePage, QuoteRecord},
    shipment::{ShipmentDraft, from_api_shipment},
};

/// Фильтр колонки таблицы
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    pub id: String,
    pub value: String,
}

impl ColumnFilter {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Фильтры колонок в тело запроса поиска; "all" и пустые значения пропускаются
pub fn build_api_filters(columns: &[ColumnFilter]) -> QuoteFilter {
    let mut filter = QuoteFilter::default();

    for ColumnFilter { id, value } in columns {
        if value.is_empty() {
            continue;
        }
        let selective = value != "all";

        match id.as_str() {
            "status" if selective => filter.status = Some(value.to_uppercase()),
            "mode" if selective => filter.shipment_mode = Some(value.to_uppercase()),
            "cargoType" if selective => filter.cargo_type = Some(value.to_uppercase()),
            "origin" => filter.pickup_location = Some(value.clone()),
            "destination" => filter.delivery_location = Some(value.clone()),
            "status" | "mode" | "cargoType" => {}
            other if selective => {
                filter.extra.insert(other.to_string(), value.clone());
            }
            _ => {}
        }
    }

    filter
}

/// Строка таблицы заявок
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub track_id: String,
    pub status: String,
    pub created_at: String,

    pub origin: String,
    pub destination: String,
    pub origin_country: String,
    pub destination_country: String,
    pub route: [String; 2],

    pub mode: String,
    pub cargo_type: String,
    pub container: String,
    pub commodity: String,
    pub price: String,
    pub carrier: String,
    pub customer: String,

    /// Черновик для повторного открытия заявки в форме
    pub draft: ShipmentDraft,
}

pub fn transform_quote(record: &QuoteRecord) -> QuoteSummary {
    let api = &record.shipment;
    let draft = from_api_shipment(api);

    let origin = first_non_empty(&api.pick_up_position.city, &draft.locations.pol.city);
    let destination = first_non_empty(&api.delivery_position.city, &draft.locations.pod.city);

    QuoteSummary {
        track_id: api.track_id.clone(),
        status: api.status.clone(),
        created_at: api.creation_date.clone(),
        route: [
            fallback(&origin, "Origin"),
            fallback(&destination, "Destination"),
        ],
        origin,
        destination,
        origin_country: first_non_empty(&api.pick_up_position.country, &draft.locations.pol.country),
        destination_country: first_non_empty(
            &api.delivery_position.country,
            &draft.locations.pod.country,
        ),
        mode: api.shipment_mode.ui_mode().to_string(),
        cargo_type: draft.cargo_type.clone(),
        container: draft.container_type.clone(),
        commodity: api.commodity.clone(),
        price: record.display_price().unwrap_or_else(|| "N/A".to_string()),
        carrier: record.carrier.clone().unwrap_or_default(),
        customer: record.customer.clone().unwrap_or_default(),
        draft,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// Недостающие поля страницы досчитываются из totalElements
    pub fn from_page(page: &QuotePage, page_index: u32, page_size: u32) -> Self {
        let total = page.total_elements;
        let total_pages = page
            .total_pages
            .filter(|p| *p > 0)
            .unwrap_or_else(|| total.div_ceil(u64::from(page_size.max(1))));

        Self {
            page_index,
            page_size,
            total,
            total_pages,
            has_next_page: page
                .has_next
                .unwrap_or(u64::from(page_index) + 1 < total_pages),
            has_previous_page: page.has_previous.unwrap_or(page_index > 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteList {
    pub quotes: Vec<QuoteSummary>,
    pub pagination: Pagination,
}

pub fn transform_page(page: &QuotePage, page_index: u32, page_size: u32) -> QuoteList {
    QuoteList {
        quotes: page.content.iter().map(transform_quote).collect(),
        pagination: Pagination::from_page(page, page_index, page_size),
    }
}

fn first_non_empty(primary: &str, secondary: &str) -> String {
    if primary.is_empty() {
        secondary.to_string()
    } else {
        primary.to_string()
    }
}

fn fallback(value: &str, default: &str) -> String {
    first_non_empty(value, default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freight::models::{ApiShipment, ShipmentMode};
    use serde_json::json;

    #[test]
    fn filters_map_columns_to_api_names() {
        let filter = build_api_filters(&[
            ColumnFilter::new("status", "pending"),
            ColumnFilter::new("mode", "all"),
            ColumnFilter::new("cargoType", "reefer"),
            ColumnFilter::new("origin", "Casablanca"),
            ColumnFilter::new("destination", ""),
            ColumnFilter::new("carrier", "MSC"),
            ColumnFilter::new("customer", "all"),
        ]);

        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "status": "PENDING",
                "cargoType": "REEFER",
                "pickupLocation": "Casablanca",
                "carrier": "MSC"
            })
        );
    }

    #[test]
    fn summary_uses_positions_and_reverse_mapping() {
        let mut record = QuoteRecord {
            shipment: ApiShipment {
                track_id: "TRK-9".into(),
                status: "PENDING".into(),
                shipment_mode: ShipmentMode::Ecomm,
                commodity: "Shoes".into(),
                ..Default::default()
            },
            total_price: Some(json!("1450")),
            ..Default::default()
        };
        record.shipment.pick_up_position.city = "Casablanca".into();
        record.shipment.pick_up_position.country = "Morocco".into();

        let summary = transform_quote(&record);
        assert_eq!(summary.track_id, "TRK-9");
        assert_eq!(summary.origin, "Casablanca");
        assert_eq!(summary.origin_country, "Morocco");
        assert_eq!(summary.destination, "");
        assert_eq!(summary.route, ["Casablanca".to_string(), "Destination".to_string()]);
        assert_eq!(summary.mode, "ecommerce");
        assert_eq!(summary.cargo_type, "General");
        assert_eq!(summary.container, "40' Standard");
        assert_eq!(summary.price, "1450");
        assert_eq!(summary.carrier, "");
        assert_eq!(summary.draft.mode, "ecommerce");
    }

    #[test]
    fn missing_price_is_not_available() {
        let summary = transform_quote(&QuoteRecord::default());
        assert_eq!(summary.price, "N/A");
    }

    #[test]
    fn pagination_falls_back_to_totals() {
        let page = QuotePage {
            total_elements: 25,
            ..Default::default()
        };

        let first = Pagination::from_page(&page, 0, 10);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next_page);
        assert!(!first.has_previous_page);

        let last = Pagination::from_page(&page, 2, 10);
        assert!(!last.has_next_page);
        assert!(last.has_previous_page);

        let explicit = Pagination::from_page(
            &QuotePage {
                total_elements: 25,
                total_pages: Some(5),
                has_next: Some(false),
                ..Default::default()
            },
            0,
            10,
        );
        assert_eq!(explicit.total_pages, 5);
        assert!(!explicit.has_next_page);
    }

    #[test]
    fn empty_page_has_no_pages() {
        let list = transform_page(&QuotePage::default(), 0, 10);
        assert!(list.quotes.is_empty());
        assert_eq!(list.pagination.total_pages, 0);
        assert!(!list.pagination.has_next_page);
    }
}
