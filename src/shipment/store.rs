use tracing::debug;

use crate::{
    freight::models::ApiShipment,
    schedule::ComparisonOption,
    shipment::{
        draft::{
            Addons, CargoDimensions, ColdTreatment, Genset, Humidity, Liftgate, LocationGroup,
            LocationRole, Probes, ShipmentDraft,
        },
        mapper::to_api_shipment,
    },
};

/// Одно поле черновика с новым значением
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    Mode(String),
    ShipmentType(String),
    ContainerType(String),
    CargoType(String),
    Commodity(String),
    GrossWeight(String),
    AccessConditions(String),
    Checked(LocationRole, bool),
    Location(LocationRole, LocationGroup),
    ColdTreatment(ColdTreatment),
    Probes(Probes),
    Humidity(Humidity),
    Genset(Genset),
    Cargo(CargoDimensions),
    Liftgate(Liftgate),
    Addons(Addons),
}

/// Начальное состояние формы: обмен воздуха по умолчанию открыт
pub fn initial_draft() -> ShipmentDraft {
    ShipmentDraft {
        probes: Probes {
            fresh_air_exchange: "open".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Состояние формы; у каждого экрана и теста свой экземпляр
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentStore {
    draft: ShipmentDraft,
}

impl Default for ShipmentStore {
    fn default() -> Self {
        Self::with_draft(initial_draft())
    }
}

impl ShipmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: ShipmentDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &ShipmentDraft {
        &self.draft
    }

    pub fn into_draft(self) -> ShipmentDraft {
        self.draft
    }

    /// Снятый флажок роли очищает всю группу её полей
    pub fn set_field(&mut self, field: DraftField) {
        let draft = &mut self.draft;
        match field {
            DraftField::Mode(v) => draft.mode = v,
            DraftField::ShipmentType(v) => draft.shipment_type = v,
            DraftField::ContainerType(v) => draft.container_type = v,
            DraftField::CargoType(v) => draft.cargo_type = v,
            DraftField::Commodity(v) => draft.commodity = v,
            DraftField::GrossWeight(v) => draft.gross_weight = v,
            DraftField::AccessConditions(v) => draft.access_conditions = v,
            DraftField::Checked(role, checked) => {
                draft.set_checked(role, checked);
                if role.is_optional() && !checked {
                    debug!("Флажок {} снят, группа очищена", role.prefix());
                    *draft.locations.get_mut(role) = LocationGroup::default();
                }
            }
            DraftField::Location(role, group) => *draft.locations.get_mut(role) = group,
            DraftField::ColdTreatment(v) => draft.cold_treatment = v,
            DraftField::Probes(v) => draft.probes = v,
            DraftField::Humidity(v) => draft.humidity = v,
            DraftField::Genset(v) => draft.genset = v,
            DraftField::Cargo(v) => draft.cargo = v,
            DraftField::Liftgate(v) => draft.liftgate = v,
            DraftField::Addons(v) => draft.addons = v,
        }
    }

    pub fn set_comparison_results(&mut self, results: Vec<ComparisonOption>) {
        self.draft.comparison_results = results;
    }

    pub fn reset(&mut self) {
        self.draft = initial_draft();
    }

    pub fn to_api_shipment(&self) -> ApiShipment {
        to_api_shipment(&self.draft)
    }
}

/// Полный набор полей черновика в порядке применения
pub fn draft_fields(quote: &ShipmentDraft) -> Vec<DraftField> {
    let mut fields = vec![
        DraftField::Mode(quote.mode.clone()),
        DraftField::ShipmentType(quote.shipment_type.clone()),
        DraftField::ContainerType(quote.container_type.clone()),
        DraftField::CargoType(quote.cargo_type.clone()),
        DraftField::Commodity(quote.commodity.clone()),
        DraftField::GrossWeight(quote.gross_weight.clone()),
        DraftField::AccessConditions(quote.access_conditions.clone()),
    ];

    for role in LocationRole::ALL {
        let checked = quote.is_checked(role);
        if role.is_optional() {
            fields.push(DraftField::Checked(role, checked));
        }
        let group = if checked {
            quote.locations.get(role).clone()
        } else {
            LocationGroup::default()
        };
        fields.push(DraftField::Location(role, group));
    }

    fields.extend([
        DraftField::ColdTreatment(quote.cold_treatment.clone()),
        DraftField::Probes(quote.probes.clone()),
        DraftField::Humidity(quote.humidity.clone()),
        DraftField::Genset(quote.genset.clone()),
        DraftField::Cargo(quote.cargo.clone()),
        DraftField::Liftgate(quote.liftgate.clone()),
        DraftField::Addons(quote.addons.clone()),
    ]);

    fields
}

/// Переносит заявку в черновик через сеттер, не оставляя старых значений
pub fn apply_quote_to_store<F>(quote: &ShipmentDraft, mut set_field: F)
where
    F: FnMut(DraftField),
{
    for field in draft_fields(quote) {
        set_field(field);
    }
}
