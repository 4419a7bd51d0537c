use serde::Serialize;
use shared::protocol::{CurrentUser, TokenResponse};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    error::{ClientError, ClientResult},
    stores::{track, Activity, StoreStatus},
    transport::ApiClient,
};

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<CurrentUser>,
    pub status: StoreStatus,
}

impl_has_status!(AuthState);

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct AuthStore {
    api: ApiClient,
    state: Mutex<AuthState>,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(AuthState::default()),
        }
    }

    pub async fn snapshot(&self) -> AuthState {
        self.state.lock().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated().await
    }

    /// Form-encoded login; the returned bearer token goes to the session's
    /// token store.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        if username.trim().is_empty() || password.is_empty() {
            let err = ClientError::Validation("Username and password are required".into());
            self.state
                .lock()
                .await
                .status
                .fail(Activity::Load, &err);
            return Err(err);
        }

        let api = &self.api;
        let form = LoginForm {
            username: username.trim(),
            password,
        };
        let request = async {
            let token: TokenResponse = api.post_form("auth/login", &form).await?;
            api.session().set_token(&token.access_token).await?;
            Ok::<_, ClientError>(token)
        };
        track(&self.state, Activity::Load, "auth.login", request, |_, _| {}).await?;
        info!(username = username.trim(), "auth: logged in");

        // A rejected profile means the new token is already gone; anything else
        // leaves the login in place.
        match self.fetch_current_user().await {
            Err(err) if err.requires_reauth() => Err(err),
            Err(err) => {
                warn!(error = %err, "auth: profile fetch failed after login");
                Ok(())
            }
            Ok(_) => Ok(()),
        }
    }

    pub async fn logout(&self) -> ClientResult<()> {
        self.api.session().clear().await?;
        let mut guard = self.state.lock().await;
        guard.user = None;
        guard.status = StoreStatus::default();
        info!("auth: logged out");
        Ok(())
    }

    pub async fn fetch_current_user(&self) -> ClientResult<CurrentUser> {
        let request = self.api.get::<CurrentUser>("auth/me");
        track(
            &self.state,
            Activity::Load,
            "auth.me",
            request,
            |state, user| state.user = Some(user.clone()),
        )
        .await
    }
}
