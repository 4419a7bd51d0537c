use std::collections::BTreeMap;

use serde::Serialize;
use shared::protocol::{AnalyticsDashboard, TrendPoint};
use tokio::sync::Mutex;

use crate::{
    error::ClientResult,
    stores::{track, Activity, StoreStatus},
    transport::ApiClient,
};

#[derive(Debug, Clone, Default)]
pub struct AnalyticsState {
    pub dashboard: Option<AnalyticsDashboard>,
    /// Keyed by metric name.
    pub trends: BTreeMap<String, Vec<TrendPoint>>,
    pub status: StoreStatus,
}

impl_has_status!(AnalyticsState);

#[derive(Serialize)]
struct TrendQuery<'a> {
    metric: &'a str,
    period: &'a str,
}

pub struct AnalyticsStore {
    api: ApiClient,
    state: Mutex<AnalyticsState>,
}

impl AnalyticsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(AnalyticsState::default()),
        }
    }

    pub async fn snapshot(&self) -> AnalyticsState {
        self.state.lock().await.clone()
    }

    pub async fn fetch_dashboard(&self) -> ClientResult<AnalyticsDashboard> {
        let request = self.api.get::<AnalyticsDashboard>("analytics/dashboard");
        track(
            &self.state,
            Activity::Load,
            "analytics.fetch_dashboard",
            request,
            |state, dashboard| state.dashboard = Some(dashboard.clone()),
        )
        .await
    }

    pub async fn fetch_trends(&self, metric: &str, period: &str) -> ClientResult<Vec<TrendPoint>> {
        let query = TrendQuery { metric, period };
        let request = self
            .api
            .get_list_query::<TrendPoint, _>("analytics/trends", &query);
        let key = metric.to_string();
        track(
            &self.state,
            Activity::Load,
            "analytics.fetch_trends",
            request,
            move |state, points| {
                state.trends.insert(key, points.clone());
            },
        )
        .await
    }
}
