//! Feature state containers, one per backend area.
//!
//! Every operation follows the same cycle: raise the `loading` (or
//! `ai_loading`) flag and clear the previous error, perform the request, then
//! either apply the result to the cached slice or record the error message and
//! leave the cached slice as it was. Two requests for the same entity are not
//! coordinated; whichever resolves last is what stays cached.

use std::future::Future;

use tokio::sync::Mutex;
use tracing::warn;

use crate::error::{ClientError, ClientResult};

macro_rules! impl_has_status {
    ($($state:ty),+ $(,)?) => {
        $(
            impl $crate::stores::HasStatus for $state {
                fn status_mut(&mut self) -> &mut $crate::stores::StoreStatus {
                    &mut self.status
                }
            }
        )+
    };
}

pub mod ai_projects;
pub mod analytics;
pub mod auth;
pub mod benefits;
pub mod portfolio;
pub mod reporting;

pub use ai_projects::{AiProjectsState, AiProjectsStore, AssistResults};
pub use analytics::{AnalyticsState, AnalyticsStore};
pub use auth::{AuthState, AuthStore};
pub use benefits::{BenefitsState, BenefitsStore};
pub use portfolio::{InitiativeDetail, PortfolioState, PortfolioStore};
pub use reporting::{ReportingState, ReportingStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Load,
    Assist,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub loading: bool,
    pub ai_loading: bool,
    pub error: Option<String>,
}

impl StoreStatus {
    pub fn begin(&mut self, activity: Activity) {
        match activity {
            Activity::Load => self.loading = true,
            Activity::Assist => self.ai_loading = true,
        }
        self.error = None;
    }

    pub fn succeed(&mut self, activity: Activity) {
        self.finish(activity);
    }

    pub fn fail(&mut self, activity: Activity, err: &ClientError) {
        self.finish(activity);
        self.error = Some(err.display_message());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn finish(&mut self, activity: Activity) {
        match activity {
            Activity::Load => self.loading = false,
            Activity::Assist => self.ai_loading = false,
        }
    }
}

pub trait HasStatus {
    fn status_mut(&mut self) -> &mut StoreStatus;
}

/// Runs `request` inside the loading/error cycle and applies the result to the
/// state under the same lock that clears the flag.
pub(crate) async fn track<S, T, Fut>(
    state: &Mutex<S>,
    activity: Activity,
    operation: &'static str,
    request: Fut,
    apply: impl FnOnce(&mut S, &T),
) -> ClientResult<T>
where
    S: HasStatus,
    Fut: Future<Output = ClientResult<T>>,
{
    state.lock().await.status_mut().begin(activity);
    let result = request.await;

    let mut guard = state.lock().await;
    match &result {
        Ok(value) => {
            guard.status_mut().succeed(activity);
            apply(&mut *guard, value);
        }
        Err(err) => {
            warn!(operation, error = %err, "store: operation failed");
            guard.status_mut().fail(activity, err);
        }
    }
    result
}

#[cfg(test)]
#[path = "../tests/stores_tests.rs"]
mod tests;
