use shared::{
    domain::{BenefitId, InitiativeId, KpiId},
    protocol::{Benefit, BenefitPayload, Kpi, KpiPayload, Pir, PirPayload},
};
use tokio::sync::Mutex;

use crate::{
    collection::Collection,
    error::ClientResult,
    forms::FormMode,
    stores::{track, Activity, StoreStatus},
    transport::ApiClient,
};

#[derive(Debug, Clone, Default)]
pub struct BenefitsState {
    pub benefits: Collection<Benefit>,
    pub kpis: Collection<Kpi>,
    pub pir: Option<Pir>,
    pub status: StoreStatus,
}

impl_has_status!(BenefitsState);

pub struct BenefitsStore {
    api: ApiClient,
    state: Mutex<BenefitsState>,
}

impl BenefitsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(BenefitsState::default()),
        }
    }

    pub async fn snapshot(&self) -> BenefitsState {
        self.state.lock().await.clone()
    }

    /// `None` lists benefits across the whole portfolio.
    pub async fn fetch_benefits(&self, initiative_id: Option<InitiativeId>) -> ClientResult<Vec<Benefit>> {
        let query: Vec<(&str, i64)> = initiative_id
            .map(|id| vec![("initiative_id", id.0)])
            .unwrap_or_default();
        let request = self.api.get_list_query::<Benefit, _>("benefits", &query);
        track(
            &self.state,
            Activity::Load,
            "benefits.fetch_benefits",
            request,
            |state, items| state.benefits.replace_all(items.clone()),
        )
        .await
    }

    pub async fn save_benefit(
        &self,
        mode: FormMode<BenefitId>,
        payload: &BenefitPayload,
    ) -> ClientResult<Benefit> {
        match mode {
            FormMode::Create => {
                let request = self.api.post::<Benefit, _>("benefits", payload);
                track(
                    &self.state,
                    Activity::Load,
                    "benefits.create_benefit",
                    request,
                    |state, benefit| state.benefits.append(benefit.clone()),
                )
                .await
            }
            FormMode::Edit(id) => {
                let path = format!("benefits/{id}");
                let request = self.api.put::<Benefit, _>(&path, payload);
                track(
                    &self.state,
                    Activity::Load,
                    "benefits.update_benefit",
                    request,
                    |state, benefit| {
                        state.benefits.upsert(benefit.clone());
                    },
                )
                .await
            }
        }
    }

    pub async fn create_benefit(&self, payload: &BenefitPayload) -> ClientResult<Benefit> {
        self.save_benefit(FormMode::Create, payload).await
    }

    pub async fn update_benefit(&self, id: BenefitId, payload: &BenefitPayload) -> ClientResult<Benefit> {
        self.save_benefit(FormMode::Edit(id), payload).await
    }

    pub async fn fetch_kpis(&self, initiative_id: InitiativeId) -> ClientResult<Vec<Kpi>> {
        let query = [("initiative_id", initiative_id.0)];
        let request = self.api.get_list_query::<Kpi, _>("benefits/kpis", &query);
        track(
            &self.state,
            Activity::Load,
            "benefits.fetch_kpis",
            request,
            |state, items| state.kpis.replace_all(items.clone()),
        )
        .await
    }

    pub async fn create_kpi(&self, payload: &KpiPayload) -> ClientResult<Kpi> {
        let request = self.api.post::<Kpi, _>("benefits/kpis", payload);
        track(
            &self.state,
            Activity::Load,
            "benefits.create_kpi",
            request,
            |state, kpi| state.kpis.append(kpi.clone()),
        )
        .await
    }

    pub async fn update_kpi(&self, id: KpiId, payload: &KpiPayload) -> ClientResult<Kpi> {
        let path = format!("benefits/kpis/{id}");
        let request = self.api.put::<Kpi, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "benefits.update_kpi",
            request,
            |state, kpi| {
                state.kpis.upsert(kpi.clone());
            },
        )
        .await
    }

    pub async fn fetch_pir(&self, initiative_id: InitiativeId) -> ClientResult<Pir> {
        let path = format!("benefits/pir/{initiative_id}");
        let request = self.api.get::<Pir>(&path);
        track(
            &self.state,
            Activity::Load,
            "benefits.fetch_pir",
            request,
            |state, pir| state.pir = Some(pir.clone()),
        )
        .await
    }

    pub async fn save_pir(&self, payload: &PirPayload) -> ClientResult<Pir> {
        let request = self.api.post::<Pir, _>("benefits/pir", payload);
        track(
            &self.state,
            Activity::Load,
            "benefits.save_pir",
            request,
            |state, pir| state.pir = Some(pir.clone()),
        )
        .await
    }
}
