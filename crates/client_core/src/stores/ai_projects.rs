//! Staged methodology state for one initiative: business understanding,
//! data understanding, data preparation, model development, deployment and
//! monitoring, plus the read-only results of the AI assist calls.

use serde::Serialize;
use shared::{
    domain::{
        AiPattern, DatasetId, DeploymentId, GoNoGoDecision, InitiativeId, ModelId,
        PreparationStepId,
    },
    protocol::{
        AiAssessment, BusinessUnderstanding, BusinessUnderstandingPayload, DataQualityAnalysis,
        Dataset, DatasetPayload, Deployment, DeploymentPayload, DriftAnalysis, Evaluation,
        EvaluationPayload, GoNoGoRequest, InitiativeRecommendation, LinkInitiativeRequest, Model,
        ModelPayload, ModelRecommendation, MonitoringPayload, MonitoringRecord,
        PatternClassification, PatternClassificationRequest, PreparationRecommendation,
        PreparationStep, PreparationStepPayload, RecommendationRequest, SimilarInitiative,
    },
};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    collection::Collection,
    error::ClientResult,
    forms::FormMode,
    stores::{track, Activity, StoreStatus},
    transport::ApiClient,
    AssistKind, ClientEvent,
};

const BU_BASE: &str = "ai-projects/business-understanding";

/// Results of one-shot AI assist calls. Display only; nothing here is
/// persisted unless the user saves it back through a CRUD operation.
#[derive(Debug, Clone, Default)]
pub struct AssistResults {
    pub pattern: Option<PatternClassification>,
    pub similar: Vec<SimilarInitiative>,
    pub recommendation: Option<InitiativeRecommendation>,
    pub feasibility: Option<AiAssessment>,
    pub go_no_go: Option<AiAssessment>,
    pub data_quality: Option<(DatasetId, DataQualityAnalysis)>,
    pub preparation: Option<PreparationRecommendation>,
    pub models: Option<ModelRecommendation>,
    pub drift: Option<(DeploymentId, DriftAnalysis)>,
}

#[derive(Debug, Clone, Default)]
pub struct AiProjectsState {
    pub business_understanding: Option<BusinessUnderstanding>,
    pub datasets: Collection<Dataset>,
    pub preparation_steps: Collection<PreparationStep>,
    pub models: Collection<Model>,
    pub evaluations: Collection<Evaluation>,
    pub deployments: Collection<Deployment>,
    pub monitoring_history: Collection<MonitoringRecord>,
    pub latest_monitoring: Option<MonitoringRecord>,
    pub assist: AssistResults,
    pub status: StoreStatus,
}

impl_has_status!(AiProjectsState);

#[derive(Serialize)]
struct SimilarityQuery<'a> {
    problem_statement: &'a str,
    ai_pattern: &'static str,
    limit: u32,
}

pub struct AiProjectsStore {
    api: ApiClient,
    state: Mutex<AiProjectsState>,
}

impl AiProjectsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(AiProjectsState::default()),
        }
    }

    pub async fn snapshot(&self) -> AiProjectsState {
        self.state.lock().await.clone()
    }

    fn announce(&self, kind: AssistKind) {
        self.api
            .session()
            .emit(ClientEvent::AssistCompleted { kind });
    }

    // -- business understanding ---------------------------------------------

    pub async fn fetch_business_understanding(
        &self,
        initiative_id: InitiativeId,
    ) -> ClientResult<BusinessUnderstanding> {
        let path = format!("ai-projects/{initiative_id}/business-understanding");
        let request = self.api.get::<BusinessUnderstanding>(&path);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.fetch_business_understanding",
            request,
            |state, record| state.business_understanding = Some(record.clone()),
        )
        .await
    }

    pub async fn save_business_understanding(
        &self,
        mode: FormMode<InitiativeId>,
        payload: &BusinessUnderstandingPayload,
    ) -> ClientResult<BusinessUnderstanding> {
        let path = format!(
            "ai-projects/{}/business-understanding",
            payload.initiative_id
        );
        let api = &self.api;
        let request = async move {
            match mode {
                FormMode::Create => api.post::<BusinessUnderstanding, _>(&path, payload).await,
                FormMode::Edit(_) => api.put::<BusinessUnderstanding, _>(&path, payload).await,
            }
        };
        track(
            &self.state,
            Activity::Load,
            "ai_projects.save_business_understanding",
            request,
            |state, record| state.business_understanding = Some(record.clone()),
        )
        .await
    }

    pub async fn record_go_no_go(
        &self,
        initiative_id: InitiativeId,
        decision: GoNoGoDecision,
        notes: Option<String>,
    ) -> ClientResult<BusinessUnderstanding> {
        let path = format!("ai-projects/{initiative_id}/business-understanding/go-no-go");
        let body = GoNoGoRequest { decision, notes };
        let request = self.api.put::<BusinessUnderstanding, _>(&path, &body);
        let record = track(
            &self.state,
            Activity::Load,
            "ai_projects.record_go_no_go",
            request,
            |state, record| state.business_understanding = Some(record.clone()),
        )
        .await?;
        info!(
            initiative_id = initiative_id.0,
            decision = decision.label(),
            "ai_projects: go/no-go recorded"
        );
        Ok(record)
    }

    pub async fn assess_feasibility(&self, initiative_id: InitiativeId) -> ClientResult<AiAssessment> {
        let path = format!("ai-projects/{initiative_id}/business-understanding/feasibility");
        let request = self.api.post_empty::<AiAssessment>(&path);
        let assessment = track(
            &self.state,
            Activity::Assist,
            "ai_projects.assess_feasibility",
            request,
            |state, assessment| state.assist.feasibility = Some(assessment.clone()),
        )
        .await?;
        self.announce(AssistKind::Feasibility);
        Ok(assessment)
    }

    pub async fn assess_go_no_go(&self, initiative_id: InitiativeId) -> ClientResult<AiAssessment> {
        let path = format!("ai-projects/{initiative_id}/business-understanding/go-no-go-assessment");
        let request = self.api.post_empty::<AiAssessment>(&path);
        let assessment = track(
            &self.state,
            Activity::Assist,
            "ai_projects.assess_go_no_go",
            request,
            |state, assessment| state.assist.go_no_go = Some(assessment.clone()),
        )
        .await?;
        self.announce(AssistKind::GoNoGo);
        Ok(assessment)
    }

    // -- wizard endpoints -----------------------------------------------------

    pub async fn classify_pattern(&self, problem_statement: &str) -> ClientResult<PatternClassification> {
        let body = PatternClassificationRequest {
            problem_statement: problem_statement.to_string(),
        };
        let path = format!("{BU_BASE}/classify-pattern");
        let request = self.api.post::<PatternClassification, _>(&path, &body);
        let classification = track(
            &self.state,
            Activity::Assist,
            "ai_projects.classify_pattern",
            request,
            |state, result| {
                state.assist.pattern = Some(result.clone());
                state.assist.similar.clear();
                state.assist.recommendation = None;
            },
        )
        .await?;
        self.announce(AssistKind::PatternClassification);
        Ok(classification)
    }

    pub async fn find_similar_initiatives(
        &self,
        problem_statement: &str,
        pattern: AiPattern,
    ) -> ClientResult<Vec<SimilarInitiative>> {
        let query = SimilarityQuery {
            problem_statement,
            ai_pattern: pattern.key(),
            limit: 10,
        };
        let path = format!("{BU_BASE}/similar-initiatives");
        let request = self.api.get_list_query::<SimilarInitiative, _>(&path, &query);
        track(
            &self.state,
            Activity::Assist,
            "ai_projects.find_similar_initiatives",
            request,
            |state, matches| {
                state.assist.similar = matches.clone();
                state.assist.recommendation = None;
            },
        )
        .await
    }

    pub async fn recommend_initiative(
        &self,
        request_body: &RecommendationRequest,
    ) -> ClientResult<InitiativeRecommendation> {
        let path = format!("{BU_BASE}/recommend-initiative");
        let request = self
            .api
            .post::<InitiativeRecommendation, _>(&path, request_body);
        let recommendation = track(
            &self.state,
            Activity::Assist,
            "ai_projects.recommend_initiative",
            request,
            |state, rec| state.assist.recommendation = Some(rec.clone()),
        )
        .await?;
        self.announce(AssistKind::InitiativeRecommendation);
        Ok(recommendation)
    }

    pub async fn link_initiative(
        &self,
        request_body: &LinkInitiativeRequest,
    ) -> ClientResult<BusinessUnderstanding> {
        let path = format!("{BU_BASE}/link");
        let request = self.api.post::<BusinessUnderstanding, _>(&path, request_body);
        let record = track(
            &self.state,
            Activity::Load,
            "ai_projects.link_initiative",
            request,
            |state, record| state.business_understanding = Some(record.clone()),
        )
        .await?;
        info!(
            initiative_id = request_body.initiative_id.0,
            feedback = ?request_body.match_feedback,
            "ai_projects: initiative linked"
        );
        Ok(record)
    }

    // -- data understanding ---------------------------------------------------

    pub async fn fetch_datasets(&self, initiative_id: InitiativeId) -> ClientResult<Vec<Dataset>> {
        let path = format!("ai-projects/{initiative_id}/data-understanding");
        let request = self.api.get_list::<Dataset>(&path);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.fetch_datasets",
            request,
            |state, items| state.datasets.replace_all(items.clone()),
        )
        .await
    }

    pub async fn create_dataset(
        &self,
        initiative_id: InitiativeId,
        payload: &DatasetPayload,
    ) -> ClientResult<Dataset> {
        let path = format!("ai-projects/{initiative_id}/data-understanding");
        let request = self.api.post::<Dataset, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.create_dataset",
            request,
            |state, dataset| state.datasets.append(dataset.clone()),
        )
        .await
    }

    pub async fn update_dataset(
        &self,
        dataset_id: DatasetId,
        payload: &DatasetPayload,
    ) -> ClientResult<Dataset> {
        let path = format!("ai-projects/data-understanding/{dataset_id}");
        let request = self.api.put::<Dataset, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.update_dataset",
            request,
            |state, dataset| {
                state.datasets.upsert(dataset.clone());
            },
        )
        .await
    }

    pub async fn save_dataset(
        &self,
        initiative_id: InitiativeId,
        mode: FormMode<DatasetId>,
        payload: &DatasetPayload,
    ) -> ClientResult<Dataset> {
        match mode {
            FormMode::Create => self.create_dataset(initiative_id, payload).await,
            FormMode::Edit(id) => self.update_dataset(id, payload).await,
        }
    }

    pub async fn analyze_dataset_quality(
        &self,
        dataset_id: DatasetId,
    ) -> ClientResult<DataQualityAnalysis> {
        let path = format!("ai-projects/data-understanding/{dataset_id}/analyze");
        let request = self.api.post_empty::<DataQualityAnalysis>(&path);
        let analysis = track(
            &self.state,
            Activity::Assist,
            "ai_projects.analyze_dataset_quality",
            request,
            |state, analysis| state.assist.data_quality = Some((dataset_id, analysis.clone())),
        )
        .await?;
        self.announce(AssistKind::DataQuality);
        Ok(analysis)
    }

    // -- data preparation -----------------------------------------------------

    pub async fn fetch_preparation_steps(
        &self,
        initiative_id: InitiativeId,
    ) -> ClientResult<Vec<PreparationStep>> {
        let path = format!("ai-projects/{initiative_id}/data-preparation");
        let request = self.api.get_list::<PreparationStep>(&path);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.fetch_preparation_steps",
            request,
            |state, steps| {
                state.preparation_steps.replace_all(steps.clone());
                state.preparation_steps.sort_by_key(|step| step.step_order);
            },
        )
        .await
    }

    pub async fn create_preparation_step(
        &self,
        initiative_id: InitiativeId,
        payload: &PreparationStepPayload,
    ) -> ClientResult<PreparationStep> {
        let path = format!("ai-projects/{initiative_id}/data-preparation");
        let request = self.api.post::<PreparationStep, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.create_preparation_step",
            request,
            |state, step| {
                state.preparation_steps.append(step.clone());
                state.preparation_steps.sort_by_key(|step| step.step_order);
            },
        )
        .await
    }

    pub async fn update_preparation_step(
        &self,
        step_id: PreparationStepId,
        payload: &PreparationStepPayload,
    ) -> ClientResult<PreparationStep> {
        let path = format!("ai-projects/data-preparation/{step_id}");
        let request = self.api.put::<PreparationStep, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.update_preparation_step",
            request,
            |state, step| {
                state.preparation_steps.upsert(step.clone());
                state.preparation_steps.sort_by_key(|step| step.step_order);
            },
        )
        .await
    }

    pub async fn save_preparation_step(
        &self,
        initiative_id: InitiativeId,
        mode: FormMode<PreparationStepId>,
        payload: &PreparationStepPayload,
    ) -> ClientResult<PreparationStep> {
        match mode {
            FormMode::Create => self.create_preparation_step(initiative_id, payload).await,
            FormMode::Edit(id) => self.update_preparation_step(id, payload).await,
        }
    }

    pub async fn recommend_preparation(
        &self,
        initiative_id: InitiativeId,
    ) -> ClientResult<PreparationRecommendation> {
        let path = format!("ai-projects/{initiative_id}/data-preparation/recommend");
        let request = self.api.post_empty::<PreparationRecommendation>(&path);
        let recommendation = track(
            &self.state,
            Activity::Assist,
            "ai_projects.recommend_preparation",
            request,
            |state, rec| state.assist.preparation = Some(rec.clone()),
        )
        .await?;
        self.announce(AssistKind::Preparation);
        Ok(recommendation)
    }

    // -- model development ----------------------------------------------------

    pub async fn fetch_models(&self, initiative_id: InitiativeId) -> ClientResult<Vec<Model>> {
        let path = format!("ai-projects/{initiative_id}/models");
        let request = self.api.get_list::<Model>(&path);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.fetch_models",
            request,
            |state, models| state.models.replace_all(models.clone()),
        )
        .await
    }

    pub async fn create_model(
        &self,
        initiative_id: InitiativeId,
        payload: &ModelPayload,
    ) -> ClientResult<Model> {
        let path = format!("ai-projects/{initiative_id}/models");
        let request = self.api.post::<Model, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.create_model",
            request,
            |state, model| state.models.append(model.clone()),
        )
        .await
    }

    pub async fn update_model(&self, model_id: ModelId, payload: &ModelPayload) -> ClientResult<Model> {
        let path = format!("ai-projects/models/{model_id}");
        let request = self.api.put::<Model, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.update_model",
            request,
            |state, model| {
                state.models.upsert(model.clone());
            },
        )
        .await
    }

    pub async fn recommend_models(
        &self,
        initiative_id: InitiativeId,
    ) -> ClientResult<ModelRecommendation> {
        let path = format!("ai-projects/{initiative_id}/models/recommend");
        let request = self.api.post_empty::<ModelRecommendation>(&path);
        let recommendation = track(
            &self.state,
            Activity::Assist,
            "ai_projects.recommend_models",
            request,
            |state, rec| state.assist.models = Some(rec.clone()),
        )
        .await?;
        self.announce(AssistKind::ModelSelection);
        Ok(recommendation)
    }

    pub async fn fetch_evaluations(&self, model_id: ModelId) -> ClientResult<Vec<Evaluation>> {
        let path = format!("ai-projects/models/{model_id}/evaluations");
        let request = self.api.get_list::<Evaluation>(&path);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.fetch_evaluations",
            request,
            |state, items| state.evaluations.replace_all(items.clone()),
        )
        .await
    }

    pub async fn create_evaluation(
        &self,
        model_id: ModelId,
        payload: &EvaluationPayload,
    ) -> ClientResult<Evaluation> {
        let path = format!("ai-projects/models/{model_id}/evaluations");
        let request = self.api.post::<Evaluation, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.create_evaluation",
            request,
            |state, evaluation| state.evaluations.append(evaluation.clone()),
        )
        .await
    }

    // -- deployment -----------------------------------------------------------

    pub async fn fetch_deployments(&self, model_id: ModelId) -> ClientResult<Vec<Deployment>> {
        let path = format!("ai-projects/models/{model_id}/deployments");
        let request = self.api.get_list::<Deployment>(&path);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.fetch_deployments",
            request,
            |state, items| state.deployments.replace_all(items.clone()),
        )
        .await
    }

    pub async fn create_deployment(
        &self,
        model_id: ModelId,
        payload: &DeploymentPayload,
    ) -> ClientResult<Deployment> {
        let path = format!("ai-projects/models/{model_id}/deployments");
        let request = self.api.post::<Deployment, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.create_deployment",
            request,
            |state, deployment| state.deployments.append(deployment.clone()),
        )
        .await
    }

    pub async fn update_deployment(
        &self,
        deployment_id: DeploymentId,
        payload: &DeploymentPayload,
    ) -> ClientResult<Deployment> {
        let path = format!("ai-projects/deployments/{deployment_id}");
        let request = self.api.put::<Deployment, _>(&path, payload);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.update_deployment",
            request,
            |state, deployment| {
                state.deployments.upsert(deployment.clone());
            },
        )
        .await
    }

    // -- monitoring -----------------------------------------------------------

    pub async fn fetch_monitoring_history(
        &self,
        deployment_id: DeploymentId,
    ) -> ClientResult<Vec<MonitoringRecord>> {
        let path = format!("ai-projects/deployments/{deployment_id}/monitoring");
        let request = self.api.get_list::<MonitoringRecord>(&path);
        track(
            &self.state,
            Activity::Load,
            "ai_projects.fetch_monitoring_history",
            request,
            |state, records| {
                state.latest_monitoring = most_recent(records).cloned();
                state.monitoring_history.replace_all(records.clone());
            },
        )
        .await
    }

    /// Appends the new record to the history and makes it the latest one.
    pub async fn record_monitoring(
        &self,
        deployment_id: DeploymentId,
        payload: &MonitoringPayload,
    ) -> ClientResult<MonitoringRecord> {
        let path = format!("ai-projects/deployments/{deployment_id}/monitoring");
        let request = self.api.post::<MonitoringRecord, _>(&path, payload);
        let record = track(
            &self.state,
            Activity::Load,
            "ai_projects.record_monitoring",
            request,
            |state, record| {
                state.monitoring_history.append(record.clone());
                state.latest_monitoring = Some(record.clone());
            },
        )
        .await?;
        info!(
            deployment_id = deployment_id.0,
            health = record.health_status.label(),
            "ai_projects: monitoring recorded"
        );
        Ok(record)
    }

    pub async fn analyze_drift(&self, deployment_id: DeploymentId) -> ClientResult<DriftAnalysis> {
        let path = format!("ai-projects/deployments/{deployment_id}/monitoring/analyze-drift");
        let request = self.api.post_empty::<DriftAnalysis>(&path);
        let analysis = track(
            &self.state,
            Activity::Assist,
            "ai_projects.analyze_drift",
            request,
            |state, analysis| state.assist.drift = Some((deployment_id, analysis.clone())),
        )
        .await?;
        self.announce(AssistKind::Drift);
        Ok(analysis)
    }
}

/// Latest by `recorded_at`; records without a timestamp fall back to list
/// order.
pub fn most_recent(records: &[MonitoringRecord]) -> Option<&MonitoringRecord> {
    let timestamped = records
        .iter()
        .filter(|record| record.recorded_at.is_some())
        .max_by_key(|record| record.recorded_at);
    timestamped.or_else(|| records.last())
}
