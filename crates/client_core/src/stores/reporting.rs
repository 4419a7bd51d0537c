use shared::{
    domain::ReportId,
    protocol::{ExecutiveSummary, GenerateReportRequest, Report},
};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    collection::Collection,
    error::ClientResult,
    stores::{track, Activity, StoreStatus},
    transport::ApiClient,
    AssistKind, ClientEvent,
};

#[derive(Debug, Clone, Default)]
pub struct ReportingState {
    pub reports: Collection<Report>,
    pub current: Option<Report>,
    pub executive_summary: Option<ExecutiveSummary>,
    pub status: StoreStatus,
}

impl_has_status!(ReportingState);

pub struct ReportingStore {
    api: ApiClient,
    state: Mutex<ReportingState>,
}

impl ReportingStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(ReportingState::default()),
        }
    }

    pub async fn snapshot(&self) -> ReportingState {
        self.state.lock().await.clone()
    }

    pub async fn fetch_reports(&self) -> ClientResult<Vec<Report>> {
        let request = self.api.get_list::<Report>("reporting/reports");
        track(
            &self.state,
            Activity::Load,
            "reporting.fetch_reports",
            request,
            |state, items| state.reports.replace_all(items.clone()),
        )
        .await
    }

    pub async fn fetch_report(&self, id: ReportId) -> ClientResult<Report> {
        let path = format!("reporting/reports/{id}");
        let request = self.api.get::<Report>(&path);
        track(
            &self.state,
            Activity::Load,
            "reporting.fetch_report",
            request,
            |state, report| state.current = Some(report.clone()),
        )
        .await
    }

    /// Report generation runs the AI summarizer server-side, so it counts as
    /// an assist call.
    pub async fn generate_report(&self, body: &GenerateReportRequest) -> ClientResult<Report> {
        let request = self
            .api
            .post::<Report, _>("reporting/reports/generate", body);
        let report = track(
            &self.state,
            Activity::Assist,
            "reporting.generate_report",
            request,
            |state, report| {
                state.reports.append(report.clone());
                state.current = Some(report.clone());
            },
        )
        .await?;
        info!(report_id = report.id.0, "reporting: report generated");
        self.api.session().emit(ClientEvent::AssistCompleted {
            kind: AssistKind::Report,
        });
        Ok(report)
    }

    pub async fn fetch_executive_summary(&self) -> ClientResult<ExecutiveSummary> {
        let request = self
            .api
            .get::<ExecutiveSummary>("reporting/executive-summary");
        track(
            &self.state,
            Activity::Load,
            "reporting.fetch_executive_summary",
            request,
            |state, summary| state.executive_summary = Some(summary.clone()),
        )
        .await
    }
}
