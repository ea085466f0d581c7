use reqwest::{
    RequestBuilder,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    freight::models::{
        ApiShipment, QuoteFilter, QuotePage, QuoteRecord, QuoteUser, RawSchedule,
        ScheduleResponse, SchedulePayload,
    },
    schedule::{ComparisonOption, ResultMeta, merge_schedule_with_result},
};

use super::error::{FreightError, Result};

pub const DEFAULT_SCHEDULE_CARGO_TYPE: &str = "DRY";
pub const DEFAULT_STUFFING_WEIGHT: f64 = 100.0;

/// HTTP-клиент бэкенда заявок и расписаний
#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    pub headers: HeaderMap,
    pub schedule_cargo_type: String,
    pub default_weight: f64,
    http: reqwest::Client,
}

/// Результат отправки формы сравнения
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompareOutcome {
    pub quote: QuoteRecord,
    pub schedule: Vec<RawSchedule>,
    pub track_id: String,
}

impl CompareOutcome {
    /// Варианты для экрана сравнения, по одному на расписание
    pub fn comparison_options(&self) -> Vec<ComparisonOption> {
        self.schedule
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let meta = ResultMeta {
                    id: match raw.solution_number {
                        Some(n) => format!("{}-{n}", self.track_id),
                        None => format!("{}-{}", self.track_id, i + 1),
                    },
                    company: None,
                    transit_days: None,
                    price: raw.price,
                };
                merge_schedule_with_result(meta, Some(raw))
            })
            .collect()
    }
}

impl Client {
    /// Клиент с bearer-токеном; пустой токен не отправляется
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !token.is_empty() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))?,
            );
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
            schedule_cargo_type: DEFAULT_SCHEDULE_CARGO_TYPE.to_string(),
            default_weight: DEFAULT_STUFFING_WEIGHT,
            http: reqwest::Client::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(&config.api.domain, &config.api_token())?;
        client.schedule_cargo_type = config.schedule.cargo_type.clone();
        client.default_weight = config.schedule.default_weight;
        Ok(client)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Отправка HTTP-запроса и десериализация ответа
    async fn send_request<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder
            .headers(self.headers.clone())
            .send()
            .await?
            .error_for_status()?;

        let parsed = response.json::<T>().await?;

        Ok(parsed)
    }

    /// Создание заявки
    pub async fn create_quote(&self, shipment: &ApiShipment) -> Result<QuoteRecord> {
        let builder = self
            .http
            .post(self.url("/request-quotations/v2/"))
            .json(shipment);

        self.send_request(builder).await
    }

    /// Поиск расписаний между двумя точками
    pub async fn points_to_points(&self, payload: &SchedulePayload) -> Result<Vec<RawSchedule>> {
        let builder = self
            .http
            .post(self.url("/schedule/points-to-points"))
            .json(payload);

        let response: Option<ScheduleResponse> = self.send_request(builder).await?;

        Ok(response.map(ScheduleResponse::into_vec).unwrap_or_default())
    }

    /// Тело запроса расписаний; `None`, если у POL или POD нет кода
    pub fn schedule_payload(&self, shipment: &ApiShipment) -> Option<SchedulePayload> {
        let pol_code = shipment.pick_up_position.unicode.trim();
        let pod_code = shipment.delivery_position.unicode.trim();

        if pol_code.is_empty() || pod_code.is_empty() {
            return None;
        }

        Some(SchedulePayload {
            cargo_type: self.schedule_cargo_type.clone(),
            place_of_delivery_code: pod_code.to_string(),
            place_of_receipt_code: pol_code.to_string(),
            stuffing_volume: None,
            stuffing_weight: if shipment.gross_weight != 0.0 {
                shipment.gross_weight
            } else {
                self.default_weight
            },
        })
    }

    /// Создание заявки и подбор расписаний.
    ///
    /// Ошибка создания заявки прерывает цепочку, ошибка расписаний
    /// только логируется и даёт пустой список.
    pub async fn submit_compare_options(&self, shipment: &ApiShipment) -> Result<CompareOutcome> {
        let quote = self.create_quote(shipment).await?;
        let track_id = quote.shipment.track_id.clone();
        info!("Заявка создана, trackId: {track_id:?}");

        let schedule = match self.schedule_payload(shipment) {
            Some(payload) => {
                debug!(
                    "Запрос расписаний {} -> {}",
                    payload.place_of_receipt_code, payload.place_of_delivery_code
                );
                self.points_to_points(&payload).await.unwrap_or_else(|e| {
                    warn!("Запрос расписаний не удался: {e}");
                    Vec::new()
                })
            }
            None => {
                warn!("Нет кодов POL/POD, расписания не запрашиваются");
                Vec::new()
            }
        };

        Ok(CompareOutcome {
            quote,
            schedule,
            track_id,
        })
    }

    /// Страница заявок; для не-администратора поиск ограничен его userId
    pub async fn search_quotes(
        &self,
        user: &QuoteUser,
        page: u32,
        size: u32,
        filters: &QuoteFilter,
    ) -> Result<QuotePage> {
        if size == 0 {
            return Err(FreightError::Custom("page size must be positive".into()));
        }

        let mut body = filters.clone();
        if !user.id.is_empty() && !user.is_admin() {
            body.user_id = Some(user.id.clone());
        }

        let builder = self
            .http
            .post(self.url("/request-quotations/v2/search"))
            .query(&[("page", page), ("size", size)])
            .json(&body);

        let response: Option<QuotePage> = self.send_request(builder).await?;

        Ok(response.unwrap_or_default())
    }
}
