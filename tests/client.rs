use freightbook::freight::{
    Client, FreightError,
    models::{ApiShipment, QuoteFilter, QuoteUser, Role},
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn shipment_with_codes(pol: &str, pod: &str) -> ApiShipment {
    let mut shipment = ApiShipment::default();
    shipment.pick_up_position.unicode = pol.into();
    shipment.delivery_position.unicode = pod.into();
    shipment.gross_weight = 2500.0;
    shipment
}

async fn mount_quote(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/request-quotations/v2/"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "trackId": "TRK-1", "status": "PENDING" })),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn compare_chain_returns_quote_and_schedules() {
    let server = MockServer::start().await;
    mount_quote(&server).await;

    Mock::given(method("POST"))
        .and(path("/schedule/points-to-points"))
        .and(body_json(json!({
            "cargoType": "DRY",
            "placeOfDeliveryCode": "NLRTM",
            "placeOfReceiptCode": "MACAS",
            "stuffingVolume": null,
            "stuffingWeight": 2500.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "company": "MAERSK", "solutionNumber": 1, "transitTime": 240 },
            { "company": "MSC", "solutionNumber": 2, "transitTime": 300 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "secret").unwrap();
    let outcome = client
        .submit_compare_options(&shipment_with_codes("MACAS", "NLRTM"))
        .await
        .unwrap();

    assert_eq!(outcome.track_id, "TRK-1");
    assert_eq!(outcome.quote.shipment.status, "PENDING");
    assert_eq!(outcome.schedule.len(), 2);

    let options = outcome.comparison_options();
    assert_eq!(options[0].id, "TRK-1-1");
    assert_eq!(options[0].transit_days, Some(10));
    assert_eq!(options[1].company.as_deref(), Some("MSC"));
}

#[tokio::test]
async fn single_schedule_object_is_wrapped() {
    let server = MockServer::start().await;
    mount_quote(&server).await;

    Mock::given(method("POST"))
        .and(path("/schedule/points-to-points"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "company": "CMA CGM", "transitTime": 72 })),
        )
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "secret").unwrap();
    let outcome = client
        .submit_compare_options(&shipment_with_codes("MACAS", "NLRTM"))
        .await
        .unwrap();

    assert_eq!(outcome.schedule.len(), 1);
    assert_eq!(outcome.schedule[0].company.as_deref(), Some("CMA CGM"));
}

#[tokio::test]
async fn schedule_failure_is_not_fatal() {
    let server = MockServer::start().await;
    mount_quote(&server).await;

    Mock::given(method("POST"))
        .and(path("/schedule/points-to-points"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "secret").unwrap();
    let outcome = client
        .submit_compare_options(&shipment_with_codes("MACAS", "NLRTM"))
        .await
        .unwrap();

    assert_eq!(outcome.track_id, "TRK-1");
    assert!(outcome.schedule.is_empty());
    assert!(outcome.comparison_options().is_empty());
}

#[tokio::test]
async fn missing_location_code_skips_schedule_lookup() {
    let server = MockServer::start().await;
    mount_quote(&server).await;

    Mock::given(method("POST"))
        .and(path("/schedule/points-to-points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "secret").unwrap();
    let outcome = client
        .submit_compare_options(&shipment_with_codes("MACAS", ""))
        .await
        .unwrap();

    assert!(outcome.schedule.is_empty());
}

#[tokio::test]
async fn quote_failure_aborts_chain() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/request-quotations/v2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/schedule/points-to-points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "secret").unwrap();
    let result = client
        .submit_compare_options(&shipment_with_codes("MACAS", "NLRTM"))
        .await;

    assert!(matches!(result, Err(FreightError::Reqwest(_))));
}

#[tokio::test]
async fn search_adds_user_id_for_regular_users() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/request-quotations/v2/search"))
        .and(query_param("page", "1"))
        .and(query_param("size", "5"))
        .and(body_json(json!({ "status": "PENDING", "userId": "u-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "trackId": "TRK-7", "shipmentMode": "AIR" }],
            "totalElements": 6
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "").unwrap();
    let user = QuoteUser {
        id: "u-1".into(),
        role: Some(Role::new("CLIENT")),
    };
    let filter = QuoteFilter {
        status: Some("PENDING".into()),
        ..Default::default()
    };

    let page = client.search_quotes(&user, 1, 5, &filter).await.unwrap();
    assert_eq!(page.total_elements, 6);
    assert_eq!(page.content[0].shipment.track_id, "TRK-7");
}

#[tokio::test]
async fn admin_search_is_global() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/request-quotations/v2/search"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "").unwrap();
    let admin = QuoteUser {
        id: "root".into(),
        role: Some(Role::new("ADMIN")),
    };

    let page = client
        .search_quotes(&admin, 0, 10, &QuoteFilter::default())
        .await
        .unwrap();
    assert!(page.content.is_empty());
    assert_eq!(page.total_elements, 0);
}
