//! Add/edit forms for the phase views.
//!
//! Forms hold what the user typed, as strings. Converting to a payload never
//! fails: a number that does not parse becomes 0 or `None` depending on the
//! field, JSON that does not parse becomes the field's empty value.

use serde_json::Value;
use shared::{
    domain::{
        AiPattern, DatasetId, DeploymentStatus, HealthStatus, InitiativeId, PipelineStatus,
    },
    protocol::{
        Benefit, BenefitPayload, BusinessUnderstanding, BusinessUnderstandingPayload, Dataset,
        DatasetPayload, DeploymentPayload, EvaluationPayload, Kpi, KpiPayload, Model,
        ModelPayload, MonitoringPayload, PirPayload, PreparationStep, PreparationStepPayload,
    },
};

pub fn number_or_zero(raw: &str) -> f64 {
    number_or_none(raw).unwrap_or(0.0)
}

pub fn number_or_none(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn integer_or_zero(raw: &str) -> i64 {
    integer_or_none(raw).unwrap_or(0)
}

/// Accepts `"12"` and `"12.0"`; anything else is `None`.
pub fn integer_or_none(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        number_or_none(trimmed)
            .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
            .map(|value| value as i64)
    })
}

/// Empty input and invalid JSON both yield an empty object.
pub fn json_or_default(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::Object(Default::default()))
}

pub fn lines_to_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn text_or_none(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn flag_or_none(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn fmt_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn fmt_json(value: &Value) -> String {
    if value.is_null() {
        String::new()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<K> {
    Create,
    Edit(K),
}

/// Toggleable add/edit form: open it empty to create, open it pre-filled to
/// edit, take the submission to get the payload back and reset.
#[derive(Debug, Clone)]
pub struct PhaseEditor<K, F> {
    open: bool,
    mode: FormMode<K>,
    pub form: F,
}

impl<K: Copy, F: Default> Default for PhaseEditor<K, F> {
    fn default() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            form: F::default(),
        }
    }
}

impl<K: Copy, F: Default> PhaseEditor<K, F> {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> FormMode<K> {
        self.mode
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.reset();
        } else {
            self.begin_create();
        }
    }

    pub fn begin_create(&mut self) {
        self.open = true;
        self.mode = FormMode::Create;
        self.form = F::default();
    }

    pub fn begin_edit(&mut self, id: K, form: F) {
        self.open = true;
        self.mode = FormMode::Edit(id);
        self.form = form;
    }

    pub fn reset(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.form = F::default();
    }

    /// Returns the mode and the filled form, then closes and clears the
    /// editor.
    pub fn take_submission(&mut self) -> (FormMode<K>, F) {
        let mode = self.mode;
        let form = std::mem::take(&mut self.form);
        self.reset();
        (mode, form)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessUnderstandingForm {
    pub problem_statement: String,
    pub ai_pattern: String,
    pub business_objectives: String,
    pub success_criteria: String,
    pub data_sources: String,
    pub compliance_requirements: String,
    pub stakeholders: String,
}

impl BusinessUnderstandingForm {
    pub fn from_record(record: &BusinessUnderstanding) -> Self {
        Self {
            problem_statement: record.problem_statement.clone().unwrap_or_default(),
            ai_pattern: record.ai_pattern.map(|p| p.key().to_string()).unwrap_or_default(),
            business_objectives: record.business_objectives.clone().unwrap_or_default(),
            success_criteria: record.success_criteria.join("\n"),
            data_sources: record.data_sources.join("\n"),
            compliance_requirements: record.compliance_requirements.join("\n"),
            stakeholders: record.stakeholders.join("\n"),
        }
    }

    pub fn to_payload(&self, initiative_id: InitiativeId) -> BusinessUnderstandingPayload {
        BusinessUnderstandingPayload {
            initiative_id,
            problem_statement: text_or_none(&self.problem_statement),
            ai_pattern: AiPattern::parse(&self.ai_pattern),
            business_objectives: text_or_none(&self.business_objectives),
            success_criteria: lines_to_list(&self.success_criteria),
            data_sources: lines_to_list(&self.data_sources),
            compliance_requirements: lines_to_list(&self.compliance_requirements),
            stakeholders: lines_to_list(&self.stakeholders),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetForm {
    pub name: String,
    pub source: String,
    pub description: String,
    pub record_count: String,
    pub feature_count: String,
    pub completeness_score: String,
    pub accuracy_score: String,
    pub consistency_score: String,
    pub quality_score: String,
    pub profiling: String,
    pub issues: String,
}

impl DatasetForm {
    pub fn from_record(record: &Dataset) -> Self {
        Self {
            name: record.name.clone(),
            source: record.source.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            record_count: fmt_opt(record.record_count),
            feature_count: fmt_opt(record.feature_count),
            completeness_score: fmt_opt(record.completeness_score),
            accuracy_score: fmt_opt(record.accuracy_score),
            consistency_score: fmt_opt(record.consistency_score),
            quality_score: fmt_opt(record.quality_score),
            profiling: fmt_json(&record.profiling),
            issues: record
                .issues
                .iter()
                .map(|issue| issue.description.clone())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn to_payload(&self) -> DatasetPayload {
        DatasetPayload {
            name: self.name.trim().to_string(),
            source: text_or_none(&self.source),
            description: text_or_none(&self.description),
            record_count: Some(integer_or_zero(&self.record_count)),
            feature_count: integer_or_none(&self.feature_count),
            completeness_score: number_or_none(&self.completeness_score),
            accuracy_score: number_or_none(&self.accuracy_score),
            consistency_score: number_or_none(&self.consistency_score),
            quality_score: number_or_none(&self.quality_score),
            profiling: json_or_default(&self.profiling),
            issues: lines_to_list(&self.issues),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparationStepForm {
    pub step_order: String,
    pub name: String,
    pub description: String,
    pub step_type: String,
    pub status: String,
    pub quality_before: String,
    pub quality_after: String,
    pub records_affected: String,
    pub transformation: String,
}

impl PreparationStepForm {
    pub fn from_record(record: &PreparationStep) -> Self {
        Self {
            step_order: record.step_order.to_string(),
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            step_type: record.step_type.clone().unwrap_or_default(),
            status: record.status.label().to_string(),
            quality_before: fmt_opt(record.quality_before),
            quality_after: fmt_opt(record.quality_after),
            records_affected: fmt_opt(record.records_affected),
            transformation: fmt_json(&record.transformation),
        }
    }

    pub fn to_payload(&self) -> PreparationStepPayload {
        PreparationStepPayload {
            step_order: integer_or_zero(&self.step_order),
            name: self.name.trim().to_string(),
            description: text_or_none(&self.description),
            step_type: text_or_none(&self.step_type),
            status: PipelineStatus::parse(&self.status),
            quality_before: number_or_none(&self.quality_before),
            quality_after: number_or_none(&self.quality_after),
            records_affected: integer_or_none(&self.records_affected),
            transformation: json_or_default(&self.transformation),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelForm {
    pub name: String,
    pub algorithm: String,
    pub version: String,
    pub status: String,
    pub training_dataset_id: String,
    pub hyperparameters: String,
    pub accuracy: String,
    pub precision: String,
    pub recall: String,
    pub f1_score: String,
}

impl ModelForm {
    pub fn from_record(record: &Model) -> Self {
        Self {
            name: record.name.clone(),
            algorithm: record.algorithm.clone().unwrap_or_default(),
            version: record.version.clone().unwrap_or_default(),
            status: record.status.clone().unwrap_or_default(),
            training_dataset_id: fmt_opt(record.training_dataset_id.map(|id| id.0)),
            hyperparameters: fmt_json(&record.hyperparameters),
            accuracy: fmt_opt(record.accuracy),
            precision: fmt_opt(record.precision),
            recall: fmt_opt(record.recall),
            f1_score: fmt_opt(record.f1_score),
        }
    }

    pub fn to_payload(&self) -> ModelPayload {
        ModelPayload {
            name: self.name.trim().to_string(),
            algorithm: text_or_none(&self.algorithm),
            version: text_or_none(&self.version),
            status: text_or_none(&self.status),
            training_dataset_id: integer_or_none(&self.training_dataset_id).map(DatasetId),
            hyperparameters: json_or_default(&self.hyperparameters),
            accuracy: number_or_none(&self.accuracy),
            precision: number_or_none(&self.precision),
            recall: number_or_none(&self.recall),
            f1_score: number_or_none(&self.f1_score),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationForm {
    pub evaluation_type: String,
    pub accuracy: String,
    pub precision: String,
    pub recall: String,
    pub f1_score: String,
    pub auc_roc: String,
    pub passed: String,
    pub notes: String,
}

impl EvaluationForm {
    pub fn to_payload(&self) -> EvaluationPayload {
        EvaluationPayload {
            evaluation_type: text_or_none(&self.evaluation_type),
            accuracy: number_or_none(&self.accuracy),
            precision: number_or_none(&self.precision),
            recall: number_or_none(&self.recall),
            f1_score: number_or_none(&self.f1_score),
            auc_roc: number_or_none(&self.auc_roc),
            passed: flag_or_none(&self.passed),
            notes: text_or_none(&self.notes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentForm {
    pub environment: String,
    pub endpoint_url: String,
    pub status: String,
    pub version: String,
}

impl DeploymentForm {
    pub fn to_payload(&self) -> DeploymentPayload {
        DeploymentPayload {
            environment: text_or_none(&self.environment),
            endpoint_url: text_or_none(&self.endpoint_url),
            status: DeploymentStatus::parse(&self.status),
            version: text_or_none(&self.version),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitoringForm {
    pub drift_score: String,
    pub accuracy: String,
    pub latency_ms: String,
    pub error_rate: String,
    pub prediction_count: String,
    pub health_status: String,
    pub notes: String,
}

impl MonitoringForm {
    pub fn to_payload(&self) -> MonitoringPayload {
        MonitoringPayload {
            drift_score: Some(number_or_zero(&self.drift_score)),
            accuracy: number_or_none(&self.accuracy),
            latency_ms: number_or_none(&self.latency_ms),
            error_rate: number_or_none(&self.error_rate),
            prediction_count: integer_or_none(&self.prediction_count),
            health_status: HealthStatus::parse(&self.health_status),
            notes: text_or_none(&self.notes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenefitForm {
    pub name: String,
    pub category: String,
    pub baseline_value: String,
    pub target_value: String,
    pub actual_value: String,
    pub unit: String,
    pub status: String,
}

impl BenefitForm {
    pub fn from_record(record: &Benefit) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.clone().unwrap_or_default(),
            baseline_value: fmt_opt(record.baseline_value),
            target_value: fmt_opt(record.target_value),
            actual_value: fmt_opt(record.actual_value),
            unit: record.unit.clone().unwrap_or_default(),
            status: record.status.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self, initiative_id: InitiativeId) -> BenefitPayload {
        BenefitPayload {
            initiative_id,
            name: self.name.trim().to_string(),
            category: text_or_none(&self.category),
            baseline_value: number_or_none(&self.baseline_value),
            target_value: Some(number_or_zero(&self.target_value)),
            actual_value: number_or_none(&self.actual_value),
            unit: text_or_none(&self.unit),
            status: text_or_none(&self.status),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiForm {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub baseline: String,
    pub target: String,
    pub current: String,
    pub frequency: String,
}

impl KpiForm {
    pub fn from_record(record: &Kpi) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            unit: record.unit.clone().unwrap_or_default(),
            baseline: fmt_opt(record.baseline),
            target: fmt_opt(record.target),
            current: fmt_opt(record.current),
            frequency: record.frequency.clone().unwrap_or_default(),
        }
    }

    pub fn to_payload(&self, initiative_id: InitiativeId) -> KpiPayload {
        KpiPayload {
            initiative_id,
            name: self.name.trim().to_string(),
            description: text_or_none(&self.description),
            unit: text_or_none(&self.unit),
            baseline: number_or_none(&self.baseline),
            target: Some(number_or_zero(&self.target)),
            current: number_or_none(&self.current),
            frequency: text_or_none(&self.frequency),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PirForm {
    pub overall_rating: String,
    pub objectives_met: String,
    pub lessons_learned: String,
    pub recommendations: String,
    pub summary: String,
}

impl PirForm {
    pub fn to_payload(&self, initiative_id: InitiativeId) -> PirPayload {
        PirPayload {
            initiative_id,
            overall_rating: number_or_none(&self.overall_rating),
            objectives_met: flag_or_none(&self.objectives_met),
            lessons_learned: lines_to_list(&self.lessons_learned),
            recommendations: lines_to_list(&self.recommendations),
            summary: text_or_none(&self.summary),
        }
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
