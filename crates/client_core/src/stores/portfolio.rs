use shared::{
    domain::InitiativeId,
    protocol::{Benefit, Initiative, Milestone, PortfolioBalance, Risk},
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    collection::Collection,
    error::{ClientError, ClientResult},
    stores::{track, Activity, StoreStatus},
    transport::ApiClient,
};

/// An initiative with the three collections shown alongside it. A related
/// collection that failed to load is empty and named in `failures`.
#[derive(Debug, Clone, Default)]
pub struct InitiativeDetail {
    pub initiative: Initiative,
    pub benefits: Vec<Benefit>,
    pub risks: Vec<Risk>,
    pub milestones: Vec<Milestone>,
    pub failures: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PortfolioState {
    pub initiatives: Collection<Initiative>,
    pub current: Option<Initiative>,
    pub detail: Option<InitiativeDetail>,
    pub balance: Option<PortfolioBalance>,
    pub roadmap: Vec<Milestone>,
    pub status: StoreStatus,
}

impl_has_status!(PortfolioState);

pub struct PortfolioStore {
    api: ApiClient,
    state: Mutex<PortfolioState>,
}

impl PortfolioStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(PortfolioState::default()),
        }
    }

    pub async fn snapshot(&self) -> PortfolioState {
        self.state.lock().await.clone()
    }

    pub async fn fetch_initiatives(&self) -> ClientResult<Vec<Initiative>> {
        let request = self.api.get_list::<Initiative>("initiatives");
        track(
            &self.state,
            Activity::Load,
            "portfolio.fetch_initiatives",
            request,
            |state, items| state.initiatives.replace_all(items.clone()),
        )
        .await
    }

    pub async fn fetch_initiative(&self, id: InitiativeId) -> ClientResult<Initiative> {
        let path = format!("initiatives/{id}");
        let request = self.api.get::<Initiative>(&path);
        track(
            &self.state,
            Activity::Load,
            "portfolio.fetch_initiative",
            request,
            |state, initiative| {
                state.current = Some(initiative.clone());
                if state.initiatives.get(initiative.id).is_some() {
                    state.initiatives.upsert(initiative.clone());
                }
            },
        )
        .await
    }

    pub async fn delete_initiative(&self, id: InitiativeId) -> ClientResult<()> {
        let path = format!("initiatives/{id}");
        let request = self.api.delete(&path);
        track(
            &self.state,
            Activity::Load,
            "portfolio.delete_initiative",
            request,
            |state, _| {
                state.initiatives.remove(id);
                if state.current.as_ref().map(|i| i.id) == Some(id) {
                    state.current = None;
                }
                if state.detail.as_ref().map(|d| d.initiative.id) == Some(id) {
                    state.detail = None;
                }
            },
        )
        .await?;
        info!(initiative_id = id.0, "portfolio: initiative deleted");
        Ok(())
    }

    pub async fn fetch_balance(&self) -> ClientResult<PortfolioBalance> {
        let request = self.api.get::<PortfolioBalance>("portfolio/balance");
        track(
            &self.state,
            Activity::Load,
            "portfolio.fetch_balance",
            request,
            |state, balance| state.balance = Some(balance.clone()),
        )
        .await
    }

    pub async fn fetch_roadmap(&self) -> ClientResult<Vec<Milestone>> {
        let request = self.api.get_list::<Milestone>("roadmap/milestones");
        track(
            &self.state,
            Activity::Load,
            "portfolio.fetch_roadmap",
            request,
            |state, milestones| state.roadmap = milestones.clone(),
        )
        .await
    }

    /// Loads the initiative first, then its benefits, risks and milestones
    /// concurrently. Only the initiative itself is required.
    pub async fn fetch_initiative_detail(&self, id: InitiativeId) -> ClientResult<InitiativeDetail> {
        let api = &self.api;
        let request = async move {
            let initiative: Initiative = api.get(&format!("initiatives/{id}")).await?;

            let id_query = [("initiative_id", id.0)];
            let risks_path = format!("initiatives/{id}/risks");
            let (benefits, risks, milestones) = futures::join!(
                api.get_list_query::<Benefit, _>("benefits", &id_query),
                api.get_list::<Risk>(&risks_path),
                api.get_list_query::<Milestone, _>("roadmap/milestones", &id_query),
            );

            let mut failures = Vec::new();
            let benefits = keep_or_log(benefits, "benefits", id, &mut failures);
            let risks = keep_or_log(risks, "risks", id, &mut failures);
            let milestones = keep_or_log(milestones, "milestones", id, &mut failures);

            Ok::<_, ClientError>(InitiativeDetail {
                initiative,
                benefits,
                risks,
                milestones,
                failures,
            })
        };

        track(
            &self.state,
            Activity::Load,
            "portfolio.fetch_initiative_detail",
            request,
            |state, detail| {
                state.current = Some(detail.initiative.clone());
                state.detail = Some(detail.clone());
            },
        )
        .await
    }
}

fn keep_or_log<T>(
    result: ClientResult<Vec<T>>,
    what: &str,
    id: InitiativeId,
    failures: &mut Vec<String>,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(initiative_id = id.0, what, error = %err, "portfolio: related fetch failed");
            failures.push(format!("{what}: {}", err.display_message()));
            Vec::new()
        }
    }
}
