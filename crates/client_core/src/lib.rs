use std::sync::Arc;

pub mod collection;
pub mod config;
pub mod error;
pub mod forms;
pub mod normalize;
pub mod routes;
pub mod scope;
pub mod session;
pub mod stores;
pub mod transport;
pub mod wizard;

pub use config::{load_settings, ClientSettings};
pub use error::{ClientError, ClientResult};
pub use routes::{Navigation, NavigationState, Route, Router};
pub use scope::ViewScope;
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use transport::ApiClient;
pub use wizard::{BusinessUnderstandingWizard, LinkChoice, WizardStep, MIN_PROBLEM_LEN};

use stores::{
    AiProjectsStore, AnalyticsStore, AuthStore, BenefitsStore, PortfolioStore, ReportingStore,
};
use tokio::sync::broadcast;

/// One-shot AI analysis kinds, reported once per completed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistKind {
    PatternClassification,
    Feasibility,
    GoNoGo,
    InitiativeRecommendation,
    DataQuality,
    Preparation,
    ModelSelection,
    Drift,
    Report,
}

impl AssistKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::PatternClassification => "pattern classification",
            Self::Feasibility => "feasibility assessment",
            Self::GoNoGo => "go/no-go assessment",
            Self::InitiativeRecommendation => "initiative recommendation",
            Self::DataQuality => "data quality analysis",
            Self::Preparation => "preparation recommendation",
            Self::ModelSelection => "model recommendation",
            Self::Drift => "drift analysis",
            Self::Report => "report generation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    LoggedIn,
    LoggedOut,
    /// The backend answered 401. The token has already been cleared.
    Unauthorized,
    AssistCompleted { kind: AssistKind },
    Error(String),
}

/// Every state container wired to one shared [`ApiClient`] and [`Session`].
pub struct PortfolioClient {
    api: ApiClient,
    pub auth: Arc<AuthStore>,
    pub portfolio: Arc<PortfolioStore>,
    pub ai_projects: Arc<AiProjectsStore>,
    pub benefits: Arc<BenefitsStore>,
    pub reporting: Arc<ReportingStore>,
    pub analytics: Arc<AnalyticsStore>,
}

impl PortfolioClient {
    pub fn new(api: ApiClient) -> Arc<Self> {
        Arc::new(Self {
            auth: Arc::new(AuthStore::new(api.clone())),
            portfolio: Arc::new(PortfolioStore::new(api.clone())),
            ai_projects: Arc::new(AiProjectsStore::new(api.clone())),
            benefits: Arc::new(BenefitsStore::new(api.clone())),
            reporting: Arc::new(ReportingStore::new(api.clone())),
            analytics: Arc::new(AnalyticsStore::new(api.clone())),
            api,
        })
    }

    /// Builds the client from settings, persisting the token at
    /// `settings.token_path`.
    pub fn from_settings(settings: &ClientSettings) -> ClientResult<Arc<Self>> {
        let tokens = Arc::new(FileTokenStore::new(settings.token_path.clone()));
        let api = ApiClient::new(settings, Session::new(tokens))?;
        Ok(Self::new(api))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.session().subscribe()
    }

    pub fn wizard(&self) -> BusinessUnderstandingWizard {
        BusinessUnderstandingWizard::new(self.ai_projects.clone())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
