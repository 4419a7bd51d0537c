use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{
        AiPattern, BenefitId, BusinessUnderstandingId, DatasetId, DeploymentId,
        DeploymentStatus, EvaluationId, GoNoGoDecision, HealthStatus, InitiativeId, KpiId,
        MilestoneId, ModelId, MonitoringRecordId, PipelineStatus, PirId, PreparationStepId,
        ReportId, ReportType, RiskId, UserId,
    },
    wire::{
        lenient_datetime, lenient_f64, lenient_f64_or_zero, lenient_i64, lenient_i64_or_zero,
        lenient_pattern, lenient_string_list, null_as_default, EmbeddedJson,
    },
};

// ---------------------------------------------------------------------------
// auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(alias = "accessToken", alias = "token")]
    pub access_token: String,
    #[serde(default = "default_token_type", alias = "tokenType")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_true", alias = "isActive")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// portfolio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Initiative {
    pub id: InitiativeId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub budget: Option<f64>,
    #[serde(default, alias = "actualCost", deserialize_with = "lenient_f64")]
    pub actual_cost: Option<f64>,
    #[serde(
        default,
        alias = "expected_roi",
        alias = "expectedRoi",
        deserialize_with = "lenient_f64"
    )]
    pub roi: Option<f64>,
    #[serde(default, alias = "priorityScore", deserialize_with = "lenient_f64")]
    pub priority_score: Option<f64>,
    #[serde(
        default,
        alias = "strategicAlignment",
        alias = "strategic_alignment",
        deserialize_with = "lenient_f64"
    )]
    pub strategic_alignment_score: Option<f64>,
    #[serde(default, alias = "riskScore", deserialize_with = "lenient_f64")]
    pub risk_score: Option<f64>,
    #[serde(default, alias = "aiPattern", deserialize_with = "lenient_pattern")]
    pub ai_pattern: Option<AiPattern>,
    #[serde(
        default,
        alias = "classification_tags",
        deserialize_with = "lenient_string_list"
    )]
    pub tags: Vec<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, alias = "startDate", deserialize_with = "lenient_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        alias = "end_date",
        alias = "targetEndDate",
        deserialize_with = "lenient_datetime"
    )]
    pub target_end_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt", deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioBalance {
    #[serde(default, alias = "totalInitiatives", deserialize_with = "lenient_i64_or_zero")]
    pub total_initiatives: i64,
    #[serde(default, alias = "totalBudget", deserialize_with = "lenient_f64_or_zero")]
    pub total_budget: f64,
    #[serde(default, alias = "byStatus", deserialize_with = "null_as_default")]
    pub by_status: BTreeMap<String, f64>,
    #[serde(default, alias = "byPattern", deserialize_with = "null_as_default")]
    pub by_pattern: BTreeMap<String, f64>,
    #[serde(default, alias = "byRisk", deserialize_with = "null_as_default")]
    pub by_risk: BTreeMap<String, f64>,
    #[serde(default, alias = "balanceScore", deserialize_with = "lenient_f64")]
    pub balance_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Risk {
    pub id: RiskId,
    #[serde(default, alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub likelihood: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default, alias = "riskScore", deserialize_with = "lenient_f64")]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub mitigation: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    #[serde(default, alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "dueDate", deserialize_with = "lenient_datetime")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "completedAt", deserialize_with = "lenient_datetime")]
    pub completed_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// business understanding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UseCase {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "initiativeId")]
    pub initiative_id: Option<InitiativeId>,
    #[serde(default, alias = "aiPattern", deserialize_with = "lenient_pattern")]
    pub ai_pattern: Option<AiPattern>,
    #[serde(default, alias = "expectedValue")]
    pub expected_value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentFactor {
    #[serde(alias = "factor")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: Option<f64>,
    #[serde(default, alias = "notes", alias = "explanation")]
    pub rationale: Option<String>,
}

/// AI-generated feasibility or go/no-go assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiAssessment {
    #[serde(default, alias = "decision")]
    pub recommendation: Option<String>,
    #[serde(
        default,
        alias = "overallScore",
        alias = "score",
        deserialize_with = "lenient_f64"
    )]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub factors: Vec<AssessmentFactor>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub risks: Vec<String>,
    #[serde(default, alias = "generatedAt", deserialize_with = "lenient_datetime")]
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessUnderstanding {
    pub id: BusinessUnderstandingId,
    #[serde(alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(default, alias = "problemStatement", alias = "business_problem")]
    pub problem_statement: Option<String>,
    #[serde(default, alias = "aiPattern", deserialize_with = "lenient_pattern")]
    pub ai_pattern: Option<AiPattern>,
    #[serde(default, alias = "businessObjectives")]
    pub business_objectives: Option<String>,
    #[serde(
        default,
        alias = "successCriteria",
        deserialize_with = "lenient_string_list"
    )]
    pub success_criteria: Vec<String>,
    #[serde(default, alias = "dataSources", deserialize_with = "lenient_string_list")]
    pub data_sources: Vec<String>,
    #[serde(
        default,
        alias = "complianceRequirements",
        deserialize_with = "lenient_string_list"
    )]
    pub compliance_requirements: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub stakeholders: Vec<String>,
    #[serde(default, alias = "goNoGoDecision", deserialize_with = "null_as_default")]
    pub go_no_go_decision: GoNoGoDecision,
    #[serde(default, alias = "decisionNotes")]
    pub decision_notes: Option<String>,
    #[serde(default, alias = "selectedUseCase")]
    pub selected_use_case: EmbeddedJson<UseCase>,
    #[serde(default, alias = "feasibilityAssessment")]
    pub feasibility_assessment: Option<AiAssessment>,
    #[serde(default, alias = "goNoGoAssessment")]
    pub go_no_go_assessment: Option<AiAssessment>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt", deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessUnderstandingPayload {
    pub initiative_id: InitiativeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_pattern: Option<AiPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_objectives: Option<String>,
    pub success_criteria: Vec<String>,
    pub data_sources: Vec<String>,
    pub compliance_requirements: Vec<String>,
    pub stakeholders: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoNoGoRequest {
    pub decision: GoNoGoDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternClassificationRequest {
    pub problem_statement: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternAlternative {
    #[serde(default, deserialize_with = "lenient_pattern")]
    pub pattern: Option<AiPattern>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternClassification {
    #[serde(
        default,
        alias = "suggested_pattern",
        alias = "ai_pattern",
        deserialize_with = "lenient_pattern"
    )]
    pub pattern: Option<AiPattern>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    #[serde(default, alias = "reasoning", alias = "explanation")]
    pub rationale: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alternatives: Vec<PatternAlternative>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimilarInitiative {
    #[serde(alias = "initiativeId", alias = "id")]
    pub initiative_id: InitiativeId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(
        default,
        alias = "similarity",
        alias = "score",
        alias = "similarityScore",
        deserialize_with = "lenient_f64"
    )]
    pub similarity_score: Option<f64>,
    #[serde(default, alias = "aiPattern", deserialize_with = "lenient_pattern")]
    pub ai_pattern: Option<AiPattern>,
    #[serde(default, alias = "description")]
    pub summary: Option<String>,
    #[serde(default, alias = "useCase")]
    pub use_case: EmbeddedJson<UseCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub problem_statement: String,
    pub ai_pattern: AiPattern,
    pub candidate_ids: Vec<InitiativeId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitiativeRecommendation {
    #[serde(
        default,
        alias = "initiative_id",
        alias = "recommendedInitiativeId"
    )]
    pub recommended_initiative_id: Option<InitiativeId>,
    #[serde(default, alias = "reasoning")]
    pub rationale: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkFeedback {
    Selected,
    Skipped,
    NoMatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkInitiativeRequest {
    pub initiative_id: InitiativeId,
    pub problem_statement: String,
    pub ai_pattern: AiPattern,
    pub selected_use_case: Option<UseCase>,
    pub match_feedback: LinkFeedback,
}

// ---------------------------------------------------------------------------
// data understanding / preparation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataIssue {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl DataIssue {
    fn from_value(raw: Value) -> Option<Self> {
        match raw {
            Value::String(description) if !description.trim().is_empty() => Some(Self {
                description,
                severity: None,
            }),
            Value::Object(map) => {
                let description = map
                    .get("description")
                    .or_else(|| map.get("issue"))
                    .or_else(|| map.get("message"))
                    .and_then(Value::as_str)?
                    .to_string();
                let severity = map
                    .get("severity")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(Self {
                    description,
                    severity,
                })
            }
            _ => None,
        }
    }
}

fn lenient_issues<'de, D>(deserializer: D) -> Result<Vec<DataIssue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items.into_iter().filter_map(DataIssue::from_value).collect(),
        Some(single @ Value::String(_)) => DataIssue::from_value(single).into_iter().collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    #[serde(alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(alias = "dataset_name")]
    pub name: String,
    #[serde(default, alias = "data_source")]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "recordCount", deserialize_with = "lenient_i64")]
    pub record_count: Option<i64>,
    #[serde(default, alias = "featureCount", deserialize_with = "lenient_i64")]
    pub feature_count: Option<i64>,
    #[serde(default, alias = "completeness", deserialize_with = "lenient_f64")]
    pub completeness_score: Option<f64>,
    #[serde(default, alias = "accuracy", deserialize_with = "lenient_f64")]
    pub accuracy_score: Option<f64>,
    #[serde(default, alias = "consistency", deserialize_with = "lenient_f64")]
    pub consistency_score: Option<f64>,
    #[serde(
        default,
        alias = "overall_quality",
        alias = "qualityScore",
        deserialize_with = "lenient_f64"
    )]
    pub quality_score: Option<f64>,
    #[serde(default, alias = "profiling_results", deserialize_with = "null_as_default")]
    pub profiling: Value,
    #[serde(default, alias = "quality_issues", deserialize_with = "lenient_issues")]
    pub issues: Vec<DataIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetPayload {
    pub name: String,
    pub source: Option<String>,
    pub description: Option<String>,
    pub record_count: Option<i64>,
    pub feature_count: Option<i64>,
    pub completeness_score: Option<f64>,
    pub accuracy_score: Option<f64>,
    pub consistency_score: Option<f64>,
    pub quality_score: Option<f64>,
    pub profiling: Value,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreparationStep {
    pub id: PreparationStepId,
    #[serde(alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(default, alias = "stepOrder", deserialize_with = "lenient_i64_or_zero")]
    pub step_order: i64,
    #[serde(alias = "step_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "stepType")]
    pub step_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PipelineStatus,
    #[serde(
        default,
        alias = "before_quality_score",
        alias = "qualityBefore",
        deserialize_with = "lenient_f64"
    )]
    pub quality_before: Option<f64>,
    #[serde(
        default,
        alias = "after_quality_score",
        alias = "qualityAfter",
        deserialize_with = "lenient_f64"
    )]
    pub quality_after: Option<f64>,
    #[serde(default, alias = "recordsAffected", deserialize_with = "lenient_i64")]
    pub records_affected: Option<i64>,
    #[serde(default, alias = "transformation_config", deserialize_with = "null_as_default")]
    pub transformation: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparationStepPayload {
    pub step_order: i64,
    pub name: String,
    pub description: Option<String>,
    pub step_type: Option<String>,
    pub status: PipelineStatus,
    pub quality_before: Option<f64>,
    pub quality_after: Option<f64>,
    pub records_affected: Option<i64>,
    pub transformation: Value,
}

// ---------------------------------------------------------------------------
// model development / deployment / monitoring
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    #[serde(alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(alias = "model_name")]
    pub name: String,
    #[serde(default, alias = "model_type")]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "trainingDatasetId")]
    pub training_dataset_id: Option<DatasetId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hyperparameters: Value,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precision: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub recall: Option<f64>,
    #[serde(default, alias = "f1", deserialize_with = "lenient_f64")]
    pub f1_score: Option<f64>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPayload {
    pub name: String,
    pub algorithm: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
    pub training_dataset_id: Option<DatasetId>,
    pub hyperparameters: Value,
    pub accuracy: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    #[serde(alias = "modelId")]
    pub model_id: ModelId,
    #[serde(default, alias = "evaluationType")]
    pub evaluation_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precision: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub recall: Option<f64>,
    #[serde(default, alias = "f1", deserialize_with = "lenient_f64")]
    pub f1_score: Option<f64>,
    #[serde(default, alias = "auc", deserialize_with = "lenient_f64")]
    pub auc_roc: Option<f64>,
    #[serde(default, alias = "meets_criteria")]
    pub passed: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "evaluatedAt", deserialize_with = "lenient_datetime")]
    pub evaluated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPayload {
    pub evaluation_type: Option<String>,
    pub accuracy: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1_score: Option<f64>,
    pub auc_roc: Option<f64>,
    pub passed: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    #[serde(alias = "modelId")]
    pub model_id: ModelId,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default, alias = "endpointUrl", alias = "endpoint")]
    pub endpoint_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: DeploymentStatus,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, alias = "deployedAt", deserialize_with = "lenient_datetime")]
    pub deployed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPayload {
    pub environment: Option<String>,
    pub endpoint_url: Option<String>,
    pub status: DeploymentStatus,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringRecord {
    pub id: MonitoringRecordId,
    #[serde(alias = "deploymentId")]
    pub deployment_id: DeploymentId,
    #[serde(default, alias = "driftScore", deserialize_with = "lenient_f64")]
    pub drift_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accuracy: Option<f64>,
    #[serde(default, alias = "latencyMs", alias = "latency", deserialize_with = "lenient_f64")]
    pub latency_ms: Option<f64>,
    #[serde(default, alias = "errorRate", deserialize_with = "lenient_f64")]
    pub error_rate: Option<f64>,
    #[serde(default, alias = "predictionCount", deserialize_with = "lenient_i64")]
    pub prediction_count: Option<i64>,
    #[serde(default, alias = "healthStatus", deserialize_with = "null_as_default")]
    pub health_status: HealthStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(
        default,
        alias = "recordedAt",
        alias = "created_at",
        deserialize_with = "lenient_datetime"
    )]
    pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoringPayload {
    pub drift_score: Option<f64>,
    pub accuracy: Option<f64>,
    pub latency_ms: Option<f64>,
    pub error_rate: Option<f64>,
    pub prediction_count: Option<i64>,
    pub health_status: HealthStatus,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// AI assist results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataQualityAnalysis {
    #[serde(default, alias = "overallScore", alias = "quality_score", deserialize_with = "lenient_f64")]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_issues")]
    pub issues: Vec<DataIssue>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendedStep {
    #[serde(alias = "step_name", alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreparationRecommendation {
    #[serde(default, alias = "recommendations", deserialize_with = "null_as_default")]
    pub steps: Vec<RecommendedStep>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendedModel {
    #[serde(alias = "model_type", alias = "name")]
    pub algorithm: String,
    #[serde(default, alias = "reasoning")]
    pub rationale: Option<String>,
    #[serde(default, alias = "score", alias = "suitability", deserialize_with = "lenient_f64")]
    pub suitability_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelRecommendation {
    #[serde(default, alias = "models", deserialize_with = "null_as_default")]
    pub recommendations: Vec<RecommendedModel>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriftAnalysis {
    #[serde(default, alias = "driftDetected")]
    pub drift_detected: bool,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, alias = "healthStatus", deserialize_with = "null_as_default")]
    pub health_status: HealthStatus,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(
        default,
        alias = "recommendations",
        alias = "recommendedActions",
        deserialize_with = "lenient_string_list"
    )]
    pub recommended_actions: Vec<String>,
}

// ---------------------------------------------------------------------------
// benefits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Benefit {
    pub id: BenefitId,
    #[serde(alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(alias = "title", alias = "benefit_name")]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "baselineValue", deserialize_with = "lenient_f64")]
    pub baseline_value: Option<f64>,
    #[serde(default, alias = "targetValue", deserialize_with = "lenient_f64")]
    pub target_value: Option<f64>,
    #[serde(default, alias = "actualValue", deserialize_with = "lenient_f64")]
    pub actual_value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(
        default,
        alias = "realizationPercentage",
        alias = "realization_rate",
        deserialize_with = "lenient_f64"
    )]
    pub realization_percentage: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "measuredAt", deserialize_with = "lenient_datetime")]
    pub measured_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenefitPayload {
    pub initiative_id: InitiativeId,
    pub name: String,
    pub category: Option<String>,
    pub baseline_value: Option<f64>,
    pub target_value: Option<f64>,
    pub actual_value: Option<f64>,
    pub unit: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kpi {
    pub id: KpiId,
    #[serde(alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(alias = "kpi_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, alias = "baseline_value", deserialize_with = "lenient_f64")]
    pub baseline: Option<f64>,
    #[serde(default, alias = "target_value", deserialize_with = "lenient_f64")]
    pub target: Option<f64>,
    #[serde(
        default,
        alias = "current_value",
        alias = "currentValue",
        deserialize_with = "lenient_f64"
    )]
    pub current: Option<f64>,
    #[serde(default, alias = "measurement_frequency")]
    pub frequency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiPayload {
    pub initiative_id: InitiativeId,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub baseline: Option<f64>,
    pub target: Option<f64>,
    pub current: Option<f64>,
    pub frequency: Option<String>,
}

/// Post-implementation review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pir {
    pub id: PirId,
    #[serde(alias = "initiativeId")]
    pub initiative_id: InitiativeId,
    #[serde(default, alias = "reviewDate", deserialize_with = "lenient_datetime")]
    pub review_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "overallRating", deserialize_with = "lenient_f64")]
    pub overall_rating: Option<f64>,
    #[serde(default, alias = "objectivesMet")]
    pub objectives_met: Option<bool>,
    #[serde(default, alias = "lessonsLearned", deserialize_with = "lenient_string_list")]
    pub lessons_learned: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PirPayload {
    pub initiative_id: InitiativeId,
    pub overall_rating: Option<f64>,
    pub objectives_met: Option<bool>,
    pub lessons_learned: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: Option<String>,
}

// ---------------------------------------------------------------------------
// reporting / analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, alias = "reportType", deserialize_with = "null_as_default")]
    pub report_type: ReportType,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Value,
    #[serde(default, alias = "generatedBy")]
    pub generated_by: Option<String>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    pub report_type: ReportType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub initiative_ids: Vec<InitiativeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    #[serde(default, alias = "totalInitiatives", deserialize_with = "lenient_i64_or_zero")]
    pub total_initiatives: i64,
    #[serde(default, alias = "activeInitiatives", deserialize_with = "lenient_i64_or_zero")]
    pub active_initiatives: i64,
    #[serde(default, alias = "totalBudget", deserialize_with = "lenient_f64_or_zero")]
    pub total_budget: f64,
    #[serde(
        default,
        alias = "totalRealizedBenefits",
        alias = "realized_benefits",
        deserialize_with = "lenient_f64_or_zero"
    )]
    pub total_realized_benefits: f64,
    #[serde(default, alias = "averageRoi", deserialize_with = "lenient_f64")]
    pub average_roi: Option<f64>,
    #[serde(default, alias = "atRiskCount", deserialize_with = "lenient_i64_or_zero")]
    pub at_risk_count: i64,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub highlights: Vec<String>,
    #[serde(default, alias = "generatedAt", deserialize_with = "lenient_datetime")]
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsDashboard {
    #[serde(default, alias = "initiativeCount", deserialize_with = "lenient_i64_or_zero")]
    pub initiative_count: i64,
    #[serde(default, alias = "activeDeployments", deserialize_with = "lenient_i64_or_zero")]
    pub active_deployments: i64,
    #[serde(default, alias = "averageDrift", deserialize_with = "lenient_f64")]
    pub average_drift: Option<f64>,
    #[serde(default, alias = "healthyDeployments", deserialize_with = "lenient_i64_or_zero")]
    pub healthy_deployments: i64,
    #[serde(default, alias = "degradedDeployments", deserialize_with = "lenient_i64_or_zero")]
    pub degraded_deployments: i64,
    #[serde(default, alias = "criticalDeployments", deserialize_with = "lenient_i64_or_zero")]
    pub critical_deployments: i64,
    #[serde(
        default,
        alias = "benefitRealizationRate",
        deserialize_with = "lenient_f64"
    )]
    pub benefit_realization_rate: Option<f64>,
    #[serde(default, alias = "phaseDistribution", deserialize_with = "null_as_default")]
    pub phase_distribution: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(alias = "date", alias = "label")]
    pub period: String,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub value: f64,
}
