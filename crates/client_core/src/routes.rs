//! URL paths for the views and the navigation history between them.
//!
//! The transport never navigates. It raises [`ClientEvent::Unauthorized`] and
//! [`Router::handle_event`] turns that into a move to `/login`.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::{
    domain::{AiPattern, InitiativeId},
    protocol::UseCase,
};
use tracing::info;

use crate::ClientEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BusinessUnderstanding,
    DataUnderstanding,
    DataPreparation,
    ModelDevelopment,
    Deployment,
    Monitoring,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::BusinessUnderstanding,
        Phase::DataUnderstanding,
        Phase::DataPreparation,
        Phase::ModelDevelopment,
        Phase::Deployment,
        Phase::Monitoring,
    ];

    pub fn segment(self) -> &'static str {
        match self {
            Self::BusinessUnderstanding => "business-understanding",
            Self::DataUnderstanding => "data-understanding",
            Self::DataPreparation => "data-preparation",
            Self::ModelDevelopment => "model-development",
            Self::Deployment => "deployment",
            Self::Monitoring => "monitoring",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.segment() == segment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Portfolio,
    Initiative(InitiativeId),
    AiProjects,
    NewAiProject,
    Phase {
        initiative_id: InitiativeId,
        phase: Phase,
    },
    Benefits,
    InitiativeBenefits(InitiativeId),
    Reporting,
    Analytics,
    Roadmap,
    NotFound(String),
}

impl Route {
    /// Parses the path part only; strip the query first or use
    /// [`Location::parse`].
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["dashboard"] => Self::Dashboard,
            ["login"] => Self::Login,
            ["portfolio"] => Self::Portfolio,
            ["portfolio", "initiatives", id] => parse_id(id)
                .map(Self::Initiative)
                .unwrap_or_else(|| Self::NotFound(path.to_string())),
            ["ai-projects"] => Self::AiProjects,
            ["ai-projects", "new"] => Self::NewAiProject,
            ["ai-projects", id, phase] => match (parse_id(id), Phase::from_segment(phase)) {
                (Some(initiative_id), Some(phase)) => Self::Phase {
                    initiative_id,
                    phase,
                },
                _ => Self::NotFound(path.to_string()),
            },
            ["benefits"] => Self::Benefits,
            ["benefits", id] => parse_id(id)
                .map(Self::InitiativeBenefits)
                .unwrap_or_else(|| Self::NotFound(path.to_string())),
            ["reporting"] => Self::Reporting,
            ["analytics"] => Self::Analytics,
            ["roadmap"] => Self::Roadmap,
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn business_understanding(initiative_id: InitiativeId) -> Self {
        Self::Phase {
            initiative_id,
            phase: Phase::BusinessUnderstanding,
        }
    }

    /// Views that render without a token.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login)
    }
}

fn parse_id(raw: &str) -> Option<InitiativeId> {
    raw.parse::<i64>().ok().map(InitiativeId)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("/login"),
            Self::Dashboard => f.write_str("/dashboard"),
            Self::Portfolio => f.write_str("/portfolio"),
            Self::Initiative(id) => write!(f, "/portfolio/initiatives/{id}"),
            Self::AiProjects => f.write_str("/ai-projects"),
            Self::NewAiProject => f.write_str("/ai-projects/new"),
            Self::Phase {
                initiative_id,
                phase,
            } => write!(f, "/ai-projects/{initiative_id}/{}", phase.segment()),
            Self::Benefits => f.write_str("/benefits"),
            Self::InitiativeBenefits(id) => write!(f, "/benefits/{id}"),
            Self::Reporting => f.write_str("/reporting"),
            Self::Analytics => f.write_str("/analytics"),
            Self::Roadmap => f.write_str("/roadmap"),
            Self::NotFound(path) => f.write_str(path),
        }
    }
}

/// A route plus the query string it was reached with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub query: Option<String>,
}

impl Location {
    pub fn new(route: Route) -> Self {
        Self { route, query: None }
    }

    pub fn with_query(route: Route, query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            route,
            query: (!query.is_empty()).then_some(query),
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.split_once('?') {
            Some((path, query)) => Self::with_query(Route::parse(path), query),
            None => Self::new(Route::parse(raw)),
        }
    }

    pub fn query_param(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.query {
            Some(query) => write!(f, "{}?{query}", self.route),
            None => write!(f, "{}", self.route),
        }
    }
}

/// Payload carried from one view to the next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub selected_use_case: Option<UseCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_pattern: Option<AiPattern>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub location: Location,
    pub state: Option<NavigationState>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self {
            location: Location::new(route),
            state: None,
        }
    }

    pub fn with_state(route: Route, state: NavigationState) -> Self {
        Self {
            location: Location::new(route),
            state: Some(state),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    current: Navigation,
    history: Vec<Navigation>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self::starting_at(Location::new(start))
    }

    pub fn starting_at(location: Location) -> Self {
        Self {
            current: Navigation {
                location,
                state: None,
            },
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Location {
        &self.current.location
    }

    pub fn route(&self) -> &Route {
        &self.current.location.route
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.current.state.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        info!(from = %self.current.location, to = %navigation.location, "router: navigate");
        let previous = std::mem::replace(&mut self.current, navigation);
        self.history.push(previous);
    }

    pub fn navigate_to(&mut self, route: Route) {
        self.navigate(Navigation::to(route));
    }

    /// Returns to the previous location together with the state it was
    /// entered with. `false` when there is nothing to go back to.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// `/login?next=<current>`, for sending the user back after sign-in.
    pub fn login_redirect(&self) -> Navigation {
        let next = self.current.location.to_string();
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("next", &next)
            .finish();
        Navigation {
            location: Location::with_query(Route::Login, query),
            state: None,
        }
    }

    /// Reacts to session events. Returns whether the location changed.
    pub fn handle_event(&mut self, event: &ClientEvent) -> bool {
        match event {
            ClientEvent::Unauthorized | ClientEvent::LoggedOut => {
                if self.current.location.route == Route::Login {
                    return false;
                }
                let redirect = self.login_redirect();
                self.navigate(redirect);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;
