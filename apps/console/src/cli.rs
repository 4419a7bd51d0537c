use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use client_core::{
    forms::{
        BenefitForm, BusinessUnderstandingForm, DatasetForm, DeploymentForm, EvaluationForm,
        KpiForm, ModelForm, MonitoringForm, PirForm, PreparationStepForm,
    },
    routes::{Location, Phase},
    Route,
};
use shared::domain::InitiativeId;

#[derive(Parser, Debug)]
#[command(name = "portfolio", version, about = "AI project portfolio console")]
pub struct Cli {
    /// Settings file; `portfolio.toml` in the working directory when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Overrides the configured API base URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    #[command(subcommand)]
    Initiatives(InitiativesCommand),
    Balance,
    Roadmap,
    /// Guided business-understanding flow for a new AI project.
    Wizard(WizardArgs),
    #[command(subcommand)]
    Business(BusinessCommand),
    #[command(subcommand)]
    Datasets(DatasetsCommand),
    #[command(subcommand)]
    Prep(PrepCommand),
    #[command(subcommand)]
    Models(ModelsCommand),
    #[command(subcommand)]
    Deployments(DeploymentsCommand),
    #[command(subcommand)]
    Monitoring(MonitoringCommand),
    #[command(subcommand)]
    Benefits(BenefitsCommand),
    #[command(subcommand)]
    Reports(ReportsCommand),
    #[command(subcommand)]
    Analytics(AnalyticsCommand),
}

impl Command {
    /// The view this command renders.
    pub fn location(&self) -> Location {
        let phase = |initiative: i64, phase: Phase| Route::Phase {
            initiative_id: InitiativeId(initiative),
            phase,
        };
        let route = match self {
            Command::Login { .. } => Route::Login,
            Command::Logout | Command::Whoami => Route::Dashboard,
            Command::Initiatives(InitiativesCommand::Show { id }) => {
                Route::Initiative(InitiativeId(*id))
            }
            Command::Initiatives(_) | Command::Balance => Route::Portfolio,
            Command::Roadmap => Route::Roadmap,
            Command::Wizard(args) => {
                return match args.initiative {
                    Some(id) => {
                        Location::with_query(Route::NewAiProject, format!("initiative_id={id}"))
                    }
                    None => Location::new(Route::NewAiProject),
                }
            }
            Command::Business(cmd) => phase(cmd.initiative(), Phase::BusinessUnderstanding),
            Command::Datasets(cmd) => match cmd.initiative() {
                Some(id) => phase(id, Phase::DataUnderstanding),
                None => Route::AiProjects,
            },
            Command::Prep(cmd) => phase(cmd.initiative(), Phase::DataPreparation),
            Command::Models(cmd) => match cmd.initiative() {
                Some(id) => phase(id, Phase::ModelDevelopment),
                None => Route::AiProjects,
            },
            Command::Deployments(DeploymentsCommand::List { initiative }) => {
                phase(*initiative, Phase::Deployment)
            }
            Command::Deployments(_) | Command::Monitoring(_) => Route::AiProjects,
            Command::Benefits(cmd) => match cmd.initiative() {
                Some(id) => Route::InitiativeBenefits(InitiativeId(id)),
                None => Route::Benefits,
            },
            Command::Reports(_) => Route::Reporting,
            Command::Analytics(_) => Route::Analytics,
        };
        Location::new(route)
    }
}

#[derive(Subcommand, Debug)]
pub enum InitiativesCommand {
    List,
    /// Initiative with its benefits, risks and milestones.
    Show { id: i64 },
    Delete {
        id: i64,
        /// Confirms the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct WizardArgs {
    /// Problem statement text (at least 100 characters).
    #[arg(conflicts_with = "problem_file")]
    pub problem: Option<String>,
    #[arg(long)]
    pub problem_file: Option<PathBuf>,
    /// Overrides the suggested AI pattern.
    #[arg(long)]
    pub pattern: Option<String>,
    /// Initiative to link when skipping or reporting no match.
    #[arg(long)]
    pub initiative: Option<i64>,
    /// Ask for an AI recommendation among the similar initiatives.
    #[arg(long)]
    pub recommend: bool,
    #[arg(long, conflicts_with_all = ["skip", "no_match"])]
    pub select: Option<i64>,
    #[arg(long, conflicts_with = "no_match")]
    pub skip: bool,
    #[arg(long)]
    pub no_match: bool,
}

#[derive(Subcommand, Debug)]
pub enum BusinessCommand {
    Show {
        initiative: i64,
    },
    /// Creates the record, or updates the fields given when it exists.
    Save {
        initiative: i64,
        #[command(flatten)]
        fields: BusinessFields,
    },
    /// Records the go/no-go gate: go, no_go or pending.
    Decide {
        initiative: i64,
        decision: String,
        #[arg(long)]
        notes: Option<String>,
    },
    Feasibility {
        initiative: i64,
    },
    /// AI go/no-go assessment.
    Assess {
        initiative: i64,
    },
}

impl BusinessCommand {
    fn initiative(&self) -> i64 {
        match self {
            Self::Show { initiative }
            | Self::Save { initiative, .. }
            | Self::Decide { initiative, .. }
            | Self::Feasibility { initiative }
            | Self::Assess { initiative } => *initiative,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum DatasetsCommand {
    List {
        initiative: i64,
    },
    Add {
        initiative: i64,
        #[command(flatten)]
        fields: DatasetFields,
    },
    Update {
        initiative: i64,
        dataset: i64,
        #[command(flatten)]
        fields: DatasetFields,
    },
    /// AI data quality analysis.
    Analyze {
        dataset: i64,
    },
}

impl DatasetsCommand {
    fn initiative(&self) -> Option<i64> {
        match self {
            Self::List { initiative }
            | Self::Add { initiative, .. }
            | Self::Update { initiative, .. } => Some(*initiative),
            Self::Analyze { .. } => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PrepCommand {
    List {
        initiative: i64,
    },
    Add {
        initiative: i64,
        #[command(flatten)]
        fields: PrepFields,
    },
    Update {
        initiative: i64,
        step: i64,
        #[command(flatten)]
        fields: PrepFields,
    },
    Recommend {
        initiative: i64,
    },
}

impl PrepCommand {
    fn initiative(&self) -> i64 {
        match self {
            Self::List { initiative }
            | Self::Add { initiative, .. }
            | Self::Update { initiative, .. }
            | Self::Recommend { initiative } => *initiative,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ModelsCommand {
    List {
        initiative: i64,
    },
    Add {
        initiative: i64,
        #[command(flatten)]
        fields: ModelFields,
    },
    Update {
        initiative: i64,
        model: i64,
        #[command(flatten)]
        fields: ModelFields,
    },
    Recommend {
        initiative: i64,
    },
    Evaluations {
        model: i64,
    },
    Evaluate {
        model: i64,
        #[command(flatten)]
        fields: EvaluationFields,
    },
}

impl ModelsCommand {
    fn initiative(&self) -> Option<i64> {
        match self {
            Self::List { initiative }
            | Self::Add { initiative, .. }
            | Self::Update { initiative, .. }
            | Self::Recommend { initiative } => Some(*initiative),
            Self::Evaluations { .. } | Self::Evaluate { .. } => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum DeploymentsCommand {
    /// Deployments of every model of the initiative.
    List {
        initiative: i64,
    },
    Add {
        model: i64,
        #[command(flatten)]
        fields: DeploymentFields,
    },
}

#[derive(Subcommand, Debug)]
pub enum MonitoringCommand {
    History {
        deployment: i64,
    },
    Record {
        deployment: i64,
        #[command(flatten)]
        fields: MonitoringFields,
    },
    Drift {
        deployment: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum BenefitsCommand {
    List {
        #[arg(long)]
        initiative: Option<i64>,
    },
    Add {
        initiative: i64,
        #[command(flatten)]
        fields: BenefitFields,
    },
    Update {
        initiative: i64,
        benefit: i64,
        #[command(flatten)]
        fields: BenefitFields,
    },
    Kpis {
        initiative: i64,
    },
    AddKpi {
        initiative: i64,
        #[command(flatten)]
        fields: KpiFields,
    },
    /// Shows the post-implementation review, or saves it when fields are given.
    Pir {
        initiative: i64,
        #[command(flatten)]
        fields: PirFields,
    },
}

impl BenefitsCommand {
    fn initiative(&self) -> Option<i64> {
        match self {
            Self::List { initiative } => *initiative,
            Self::Add { initiative, .. }
            | Self::Update { initiative, .. }
            | Self::Kpis { initiative }
            | Self::AddKpi { initiative, .. }
            | Self::Pir { initiative, .. } => Some(*initiative),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    List,
    Show {
        id: i64,
    },
    Generate {
        /// executive, portfolio, benefits, risk or custom.
        #[arg(long = "type", default_value = "executive")]
        report_type: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "initiative")]
        initiatives: Vec<i64>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    Summary,
}

#[derive(Subcommand, Debug)]
pub enum AnalyticsCommand {
    Dashboard,
    Trends {
        metric: String,
        #[arg(long, default_value = "monthly")]
        period: String,
    },
}

// Field flags are raw text, exactly what a user would type into the form.
// Unset flags keep the form's current value.

fn overlay(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Repeated flags become one entry per line.
fn overlay_lines(target: &mut String, values: &[String]) {
    if !values.is_empty() {
        *target = values.join("\n");
    }
}

#[derive(Args, Debug, Default)]
pub struct BusinessFields {
    #[arg(long)]
    pub problem: Option<String>,
    #[arg(long)]
    pub pattern: Option<String>,
    #[arg(long)]
    pub objectives: Option<String>,
    #[arg(long = "criterion")]
    pub success_criteria: Vec<String>,
    #[arg(long = "data-source")]
    pub data_sources: Vec<String>,
    #[arg(long = "compliance")]
    pub compliance_requirements: Vec<String>,
    #[arg(long = "stakeholder")]
    pub stakeholders: Vec<String>,
}

impl BusinessFields {
    pub fn apply(&self, form: &mut BusinessUnderstandingForm) {
        overlay(&mut form.problem_statement, &self.problem);
        overlay(&mut form.ai_pattern, &self.pattern);
        overlay(&mut form.business_objectives, &self.objectives);
        overlay_lines(&mut form.success_criteria, &self.success_criteria);
        overlay_lines(&mut form.data_sources, &self.data_sources);
        overlay_lines(&mut form.compliance_requirements, &self.compliance_requirements);
        overlay_lines(&mut form.stakeholders, &self.stakeholders);
    }
}

#[derive(Args, Debug, Default)]
pub struct DatasetFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub records: Option<String>,
    #[arg(long)]
    pub features: Option<String>,
    #[arg(long)]
    pub completeness: Option<String>,
    #[arg(long)]
    pub accuracy: Option<String>,
    #[arg(long)]
    pub consistency: Option<String>,
    #[arg(long)]
    pub quality: Option<String>,
    /// JSON document.
    #[arg(long)]
    pub profiling: Option<String>,
    #[arg(long = "issue")]
    pub issues: Vec<String>,
}

impl DatasetFields {
    pub fn apply(&self, form: &mut DatasetForm) {
        overlay(&mut form.name, &self.name);
        overlay(&mut form.source, &self.source);
        overlay(&mut form.description, &self.description);
        overlay(&mut form.record_count, &self.records);
        overlay(&mut form.feature_count, &self.features);
        overlay(&mut form.completeness_score, &self.completeness);
        overlay(&mut form.accuracy_score, &self.accuracy);
        overlay(&mut form.consistency_score, &self.consistency);
        overlay(&mut form.quality_score, &self.quality);
        overlay(&mut form.profiling, &self.profiling);
        overlay_lines(&mut form.issues, &self.issues);
    }
}

#[derive(Args, Debug, Default)]
pub struct PrepFields {
    #[arg(long)]
    pub order: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "step-type")]
    pub step_type: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub quality_before: Option<String>,
    #[arg(long)]
    pub quality_after: Option<String>,
    #[arg(long)]
    pub records_affected: Option<String>,
    /// JSON document.
    #[arg(long)]
    pub transformation: Option<String>,
}

impl PrepFields {
    pub fn apply(&self, form: &mut PreparationStepForm) {
        overlay(&mut form.step_order, &self.order);
        overlay(&mut form.name, &self.name);
        overlay(&mut form.description, &self.description);
        overlay(&mut form.step_type, &self.step_type);
        overlay(&mut form.status, &self.status);
        overlay(&mut form.quality_before, &self.quality_before);
        overlay(&mut form.quality_after, &self.quality_after);
        overlay(&mut form.records_affected, &self.records_affected);
        overlay(&mut form.transformation, &self.transformation);
    }
}

#[derive(Args, Debug, Default)]
pub struct ModelFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub algorithm: Option<String>,
    #[arg(long = "model-version")]
    pub version: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub dataset: Option<String>,
    /// JSON document.
    #[arg(long)]
    pub hyperparameters: Option<String>,
    #[arg(long)]
    pub accuracy: Option<String>,
    #[arg(long)]
    pub precision: Option<String>,
    #[arg(long)]
    pub recall: Option<String>,
    #[arg(long)]
    pub f1: Option<String>,
}

impl ModelFields {
    pub fn apply(&self, form: &mut ModelForm) {
        overlay(&mut form.name, &self.name);
        overlay(&mut form.algorithm, &self.algorithm);
        overlay(&mut form.version, &self.version);
        overlay(&mut form.status, &self.status);
        overlay(&mut form.training_dataset_id, &self.dataset);
        overlay(&mut form.hyperparameters, &self.hyperparameters);
        overlay(&mut form.accuracy, &self.accuracy);
        overlay(&mut form.precision, &self.precision);
        overlay(&mut form.recall, &self.recall);
        overlay(&mut form.f1_score, &self.f1);
    }
}

#[derive(Args, Debug, Default)]
pub struct EvaluationFields {
    #[arg(long = "kind")]
    pub evaluation_type: Option<String>,
    #[arg(long)]
    pub accuracy: Option<String>,
    #[arg(long)]
    pub precision: Option<String>,
    #[arg(long)]
    pub recall: Option<String>,
    #[arg(long)]
    pub f1: Option<String>,
    #[arg(long)]
    pub auc: Option<String>,
    #[arg(long)]
    pub passed: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl EvaluationFields {
    pub fn to_form(&self) -> EvaluationForm {
        let mut form = EvaluationForm::default();
        overlay(&mut form.evaluation_type, &self.evaluation_type);
        overlay(&mut form.accuracy, &self.accuracy);
        overlay(&mut form.precision, &self.precision);
        overlay(&mut form.recall, &self.recall);
        overlay(&mut form.f1_score, &self.f1);
        overlay(&mut form.auc_roc, &self.auc);
        overlay(&mut form.passed, &self.passed);
        overlay(&mut form.notes, &self.notes);
        form
    }
}

#[derive(Args, Debug, Default)]
pub struct DeploymentFields {
    #[arg(long)]
    pub environment: Option<String>,
    #[arg(long)]
    pub endpoint: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long = "model-version")]
    pub version: Option<String>,
}

impl DeploymentFields {
    pub fn to_form(&self) -> DeploymentForm {
        let mut form = DeploymentForm::default();
        overlay(&mut form.environment, &self.environment);
        overlay(&mut form.endpoint_url, &self.endpoint);
        overlay(&mut form.status, &self.status);
        overlay(&mut form.version, &self.version);
        form
    }
}

#[derive(Args, Debug, Default)]
pub struct MonitoringFields {
    #[arg(long)]
    pub drift: Option<String>,
    #[arg(long)]
    pub accuracy: Option<String>,
    #[arg(long)]
    pub latency_ms: Option<String>,
    #[arg(long)]
    pub error_rate: Option<String>,
    #[arg(long)]
    pub predictions: Option<String>,
    /// healthy, degraded or critical.
    #[arg(long)]
    pub health: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl MonitoringFields {
    pub fn to_form(&self) -> MonitoringForm {
        let mut form = MonitoringForm::default();
        overlay(&mut form.drift_score, &self.drift);
        overlay(&mut form.accuracy, &self.accuracy);
        overlay(&mut form.latency_ms, &self.latency_ms);
        overlay(&mut form.error_rate, &self.error_rate);
        overlay(&mut form.prediction_count, &self.predictions);
        overlay(&mut form.health_status, &self.health);
        overlay(&mut form.notes, &self.notes);
        form
    }
}

#[derive(Args, Debug, Default)]
pub struct BenefitFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub baseline: Option<String>,
    #[arg(long)]
    pub target: Option<String>,
    #[arg(long)]
    pub actual: Option<String>,
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl BenefitFields {
    pub fn apply(&self, form: &mut BenefitForm) {
        overlay(&mut form.name, &self.name);
        overlay(&mut form.category, &self.category);
        overlay(&mut form.baseline_value, &self.baseline);
        overlay(&mut form.target_value, &self.target);
        overlay(&mut form.actual_value, &self.actual);
        overlay(&mut form.unit, &self.unit);
        overlay(&mut form.status, &self.status);
    }
}

#[derive(Args, Debug, Default)]
pub struct KpiFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long)]
    pub baseline: Option<String>,
    #[arg(long)]
    pub target: Option<String>,
    #[arg(long)]
    pub current: Option<String>,
    #[arg(long)]
    pub frequency: Option<String>,
}

impl KpiFields {
    pub fn to_form(&self) -> KpiForm {
        let mut form = KpiForm::default();
        overlay(&mut form.name, &self.name);
        overlay(&mut form.description, &self.description);
        overlay(&mut form.unit, &self.unit);
        overlay(&mut form.baseline, &self.baseline);
        overlay(&mut form.target, &self.target);
        overlay(&mut form.current, &self.current);
        overlay(&mut form.frequency, &self.frequency);
        form
    }
}

#[derive(Args, Debug, Default)]
pub struct PirFields {
    #[arg(long)]
    pub rating: Option<String>,
    #[arg(long)]
    pub objectives_met: Option<String>,
    #[arg(long = "lesson")]
    pub lessons_learned: Vec<String>,
    #[arg(long = "recommendation")]
    pub recommendations: Vec<String>,
    #[arg(long)]
    pub summary: Option<String>,
}

impl PirFields {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none()
            && self.objectives_met.is_none()
            && self.lessons_learned.is_empty()
            && self.recommendations.is_empty()
            && self.summary.is_none()
    }

    pub fn to_form(&self) -> PirForm {
        let mut form = PirForm::default();
        overlay(&mut form.overall_rating, &self.rating);
        overlay(&mut form.objectives_met, &self.objectives_met);
        overlay_lines(&mut form.lessons_learned, &self.lessons_learned);
        overlay_lines(&mut form.recommendations, &self.recommendations);
        overlay(&mut form.summary, &self.summary);
        form
    }
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
