use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(InitiativeId);
id_newtype!(BusinessUnderstandingId);
id_newtype!(DatasetId);
id_newtype!(PreparationStepId);
id_newtype!(ModelId);
id_newtype!(EvaluationId);
id_newtype!(DeploymentId);
id_newtype!(MonitoringRecordId);
id_newtype!(BenefitId);
id_newtype!(KpiId);
id_newtype!(ReportId);
id_newtype!(RiskId);
id_newtype!(MilestoneId);
id_newtype!(PirId);

/// Governance gate recorded against a business-understanding record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoNoGoDecision {
    #[default]
    Pending,
    Go,
    #[serde(alias = "no-go", alias = "nogo")]
    NoGo,
}

impl GoNoGoDecision {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Go => "go",
            Self::NoGo => "no_go",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Some(Self::Pending),
            "go" => Some(Self::Go),
            "no_go" | "nogo" => Some(Self::NoGo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "healthy" => Self::Healthy,
            "degraded" => Self::Degraded,
            "critical" => Self::Critical,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl PipelineStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" | "" => Self::Pending,
            "in_progress" | "running" => Self::InProgress,
            "completed" | "done" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    #[default]
    Pending,
    Active,
    Paused,
    Retired,
    Failed,
    #[serde(other)]
    Unknown,
}

impl DeploymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Retired => "retired",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "" => Self::Pending,
            "active" | "live" => Self::Active,
            "paused" => Self::Paused,
            "retired" => Self::Retired,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

/// The seven machine-learning approach categories a business problem is
/// classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AiPattern {
    Hyperpersonalization,
    AutonomousSystems,
    PredictiveAnalytics,
    ConversationalInteraction,
    PatternsAndAnomalies,
    Recognition,
    GoalDrivenSystems,
}

impl AiPattern {
    pub const ALL: [AiPattern; 7] = [
        AiPattern::Hyperpersonalization,
        AiPattern::AutonomousSystems,
        AiPattern::PredictiveAnalytics,
        AiPattern::ConversationalInteraction,
        AiPattern::PatternsAndAnomalies,
        AiPattern::Recognition,
        AiPattern::GoalDrivenSystems,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Hyperpersonalization => "hyperpersonalization",
            Self::AutonomousSystems => "autonomous_systems",
            Self::PredictiveAnalytics => "predictive_analytics",
            Self::ConversationalInteraction => "conversational_interaction",
            Self::PatternsAndAnomalies => "patterns_and_anomalies",
            Self::Recognition => "recognition",
            Self::GoalDrivenSystems => "goal_driven_systems",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hyperpersonalization => "Hyperpersonalization",
            Self::AutonomousSystems => "Autonomous Systems",
            Self::PredictiveAnalytics => "Predictive Analytics & Decision Support",
            Self::ConversationalInteraction => "Conversational & Human Interaction",
            Self::PatternsAndAnomalies => "Patterns & Anomalies",
            Self::Recognition => "Recognition",
            Self::GoalDrivenSystems => "Goal-Driven Systems",
        }
    }

    /// Accepts the wire key, the display label, or a kebab/space separated
    /// variant of either.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = pattern_token(raw);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|pattern| {
            pattern_token(pattern.key()) == wanted || pattern_token(pattern.label()) == wanted
        })
    }
}

fn pattern_token(raw: &str) -> String {
    raw.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty() && *part != "and")
        .collect::<Vec<_>>()
        .join("_")
}

impl<'de> Deserialize<'de> for AiPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        AiPattern::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown AI pattern '{raw}'")))
    }
}

impl fmt::Display for AiPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[default]
    Executive,
    Portfolio,
    Benefits,
    Risk,
    #[serde(other)]
    Custom,
}

impl ReportType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "executive" => Some(Self::Executive),
            "portfolio" => Some(Self::Portfolio),
            "benefits" => Some(Self::Benefits),
            "risk" => Some(Self::Risk),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}
