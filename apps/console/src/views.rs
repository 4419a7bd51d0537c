//! One function per view. Each drives its state container and prints what
//! the container returned; none of them keep state between invocations.

use std::sync::Arc;

use client_core::{
    forms::{
        BenefitForm, BusinessUnderstandingForm, DatasetForm, FormMode, ModelForm, PhaseEditor,
        PreparationStepForm,
    },
    ClientError, ClientResult, LinkChoice, Navigation, PortfolioClient, ViewScope,
    MIN_PROBLEM_LEN,
};
use shared::{
    domain::{
        AiPattern, BenefitId, DatasetId, DeploymentId, GoNoGoDecision, InitiativeId, ModelId,
        PreparationStepId, ReportId, ReportType,
    },
    protocol::{
        BusinessUnderstanding, Dataset, Deployment, GenerateReportRequest, Initiative, Model,
        MonitoringRecord, PreparationStep, Report,
    },
};

use crate::{
    cli::{
        AnalyticsCommand, BenefitsCommand, BusinessCommand, DatasetsCommand, DeploymentsCommand,
        InitiativesCommand, ModelsCommand, MonitoringCommand, PrepCommand, ReportsCommand,
    },
    render::{self, field, heading, opt, percent, score, table, text},
};

/// Where the view wants to go next, if anywhere.
pub type ViewResult = ClientResult<Option<Navigation>>;

// -- auth ---------------------------------------------------------------------

pub async fn login(client: Arc<PortfolioClient>, username: String, password: String) -> ViewResult {
    client.auth.login(&username, &password).await?;
    match client.auth.snapshot().await.user {
        Some(user) => println!("Signed in as {}", user.username),
        None => println!("Signed in"),
    }
    Ok(None)
}

pub async fn logout(client: Arc<PortfolioClient>) -> ViewResult {
    client.auth.logout().await?;
    println!("Signed out");
    Ok(None)
}

pub async fn whoami(client: Arc<PortfolioClient>) -> ViewResult {
    if !client.auth.is_authenticated().await {
        return Err(ClientError::NotLoggedIn);
    }
    let user = client.auth.fetch_current_user().await?;
    heading(&user.username);
    field("Name", text(user.full_name.as_deref()));
    field("Email", text(user.email.as_deref()));
    field("Role", text(user.role.as_deref()));
    field("Active", user.is_active);
    Ok(None)
}

// -- portfolio ----------------------------------------------------------------

pub async fn initiatives(client: Arc<PortfolioClient>, cmd: InitiativesCommand) -> ViewResult {
    let portfolio = &client.portfolio;
    match cmd {
        InitiativesCommand::List => {
            let initiatives = portfolio.fetch_initiatives().await?;
            initiative_table(&initiatives);
        }
        InitiativesCommand::Show { id } => {
            let detail = portfolio.fetch_initiative_detail(InitiativeId(id)).await?;
            show_initiative(&detail.initiative);

            println!();
            heading("Benefits");
            let rows: Vec<[String; 4]> = detail
                .benefits
                .iter()
                .map(|b| {
                    [
                        b.name.clone(),
                        score(b.target_value),
                        score(b.actual_value),
                        percent(b.realization_percentage),
                    ]
                })
                .collect();
            table(["NAME", "TARGET", "ACTUAL", "REALIZED"], &rows);

            println!();
            heading("Risks");
            let rows: Vec<[String; 4]> = detail
                .risks
                .iter()
                .map(|r| {
                    [
                        r.title.clone(),
                        text(r.likelihood.as_deref()),
                        text(r.impact.as_deref()),
                        text(r.status.as_deref()),
                    ]
                })
                .collect();
            table(["RISK", "LIKELIHOOD", "IMPACT", "STATUS"], &rows);

            println!();
            heading("Milestones");
            let rows: Vec<[String; 3]> = detail
                .milestones
                .iter()
                .map(|m| {
                    [
                        m.title.clone(),
                        render::date(m.due_date),
                        text(m.status.as_deref()),
                    ]
                })
                .collect();
            table(["MILESTONE", "DUE", "STATUS"], &rows);

            for failure in &detail.failures {
                render::banner(&format!("Could not load {failure}"));
            }
        }
        InitiativesCommand::Delete { id, yes } => {
            if !yes {
                return Err(ClientError::Validation(format!(
                    "Deleting initiative {id} cannot be undone; re-run with --yes to confirm"
                )));
            }
            portfolio.delete_initiative(InitiativeId(id)).await?;
            println!("Deleted initiative {id}");
        }
    }
    Ok(None)
}

fn initiative_table(initiatives: &[Initiative]) {
    let rows: Vec<[String; 6]> = initiatives
        .iter()
        .map(|i| {
            [
                i.id.to_string(),
                i.title.clone(),
                text(i.status.as_deref()),
                opt(i.ai_pattern.map(AiPattern::label)),
                render::money(i.budget),
                score(i.priority_score),
            ]
        })
        .collect();
    table(["ID", "TITLE", "STATUS", "PATTERN", "BUDGET", "PRIORITY"], &rows);
}

fn show_initiative(initiative: &Initiative) {
    heading(&format!("#{} {}", initiative.id, initiative.title));
    field("Status", text(initiative.status.as_deref()));
    field("Owner", text(initiative.owner.as_deref()));
    field("Description", text(initiative.description.as_deref()));
    field("AI pattern", opt(initiative.ai_pattern.map(AiPattern::label)));
    field("Budget", render::money(initiative.budget));
    field("Actual cost", render::money(initiative.actual_cost));
    field("ROI", percent(initiative.roi));
    field("Priority", score(initiative.priority_score));
    field("Strategic alignment", score(initiative.strategic_alignment_score));
    field("Risk score", score(initiative.risk_score));
    field("Start", render::date(initiative.start_date));
    field("Target end", render::date(initiative.target_end_date));
    render::list("Tags", &initiative.tags);
}

pub async fn balance(client: Arc<PortfolioClient>) -> ViewResult {
    let balance = client.portfolio.fetch_balance().await?;
    heading("Portfolio balance");
    field("Initiatives", balance.total_initiatives);
    field("Total budget", render::money(Some(balance.total_budget)));
    field("Balance score", score(balance.balance_score));
    for (title, split) in [
        ("By status", &balance.by_status),
        ("By pattern", &balance.by_pattern),
        ("By risk", &balance.by_risk),
    ] {
        println!();
        println!("{title}:");
        let rows: Vec<[String; 2]> = split
            .iter()
            .map(|(key, value)| [key.clone(), value.to_string()])
            .collect();
        table(["KEY", "VALUE"], &rows);
    }
    println!();
    render::list("Recommendations", &balance.recommendations);
    Ok(None)
}

pub async fn roadmap(client: Arc<PortfolioClient>) -> ViewResult {
    let milestones = client.portfolio.fetch_roadmap().await?;
    let rows: Vec<[String; 5]> = milestones
        .iter()
        .map(|m| {
            [
                m.initiative_id.to_string(),
                m.title.clone(),
                text(m.phase.as_deref()),
                render::date(m.due_date),
                text(m.status.as_deref()),
            ]
        })
        .collect();
    table(["INITIATIVE", "MILESTONE", "PHASE", "DUE", "STATUS"], &rows);
    Ok(None)
}

// -- wizard -------------------------------------------------------------------

pub struct WizardRequest {
    pub problem: String,
    pub pattern: Option<String>,
    pub target: Option<InitiativeId>,
    pub recommend: bool,
    pub choice: Option<LinkChoice>,
}

pub async fn wizard(client: Arc<PortfolioClient>, request: WizardRequest) -> ViewResult {
    let mut wizard = client.wizard();
    if let Some(target) = request.target {
        wizard.set_target(target);
    }
    wizard.set_problem(request.problem);
    println!(
        "Problem statement: {} characters (minimum {MIN_PROBLEM_LEN})",
        wizard.problem_len()
    );

    let classification = wizard.analyze().await?;
    heading("Suggested AI pattern");
    field("Pattern", opt(classification.pattern.map(AiPattern::label)));
    field("Confidence", score(classification.confidence));
    field("Rationale", text(classification.rationale.as_deref()));
    for alternative in &classification.alternatives {
        field(
            "  alternative",
            format!(
                "{} ({})",
                opt(alternative.pattern.map(AiPattern::label)),
                score(alternative.confidence)
            ),
        );
    }

    if let Some(raw) = &request.pattern {
        let Some(pattern) = AiPattern::parse(raw) else {
            let known: Vec<&str> = AiPattern::ALL.iter().map(|p| p.key()).collect();
            return Err(ClientError::Validation(format!(
                "Unknown AI pattern '{raw}'; expected one of {}",
                known.join(", ")
            )));
        };
        wizard.override_pattern(pattern)?;
        println!("Using pattern: {}", pattern.label());
    }

    println!();
    heading("Similar initiatives");
    let candidates = wizard.search_similar().await?;
    let rows: Vec<[String; 4]> = candidates
        .iter()
        .map(|c| {
            let use_case = if c.use_case.as_ref().is_some() {
                "yes"
            } else {
                render::NO_USE_CASE
            };
            [
                c.initiative_id.to_string(),
                c.title.clone(),
                score(c.similarity_score),
                use_case.to_string(),
            ]
        })
        .collect();
    table(["ID", "TITLE", "SIMILARITY", "USE CASE"], &rows);

    if request.recommend {
        let recommendation = wizard.recommend().await?;
        println!();
        field("Recommended", opt(recommendation.recommended_initiative_id));
        field("Confidence", score(recommendation.confidence));
        field("Rationale", text(recommendation.rationale.as_deref()));
    }

    let Some(choice) = request.choice else {
        println!();
        println!("Re-run with --select <id>, --skip or --no-match to link an initiative.");
        return Ok(None);
    };
    if let LinkChoice::Selected(id) = choice {
        wizard.select_candidate(id)?;
    }
    let navigation = wizard.link(choice).await?;
    println!();
    println!("Linked. Next: {}", navigation.location);
    render::use_case_opt(
        navigation
            .state
            .as_ref()
            .and_then(|state| state.selected_use_case.as_ref()),
    );
    Ok(Some(navigation))
}

// -- business understanding ---------------------------------------------------

pub async fn business(client: Arc<PortfolioClient>, cmd: BusinessCommand) -> ViewResult {
    let ai = &client.ai_projects;
    match cmd {
        BusinessCommand::Show { initiative } => {
            let record = ai.fetch_business_understanding(InitiativeId(initiative)).await?;
            show_business(&record);
        }
        BusinessCommand::Save { initiative, fields } => {
            let id = InitiativeId(initiative);
            let mut editor: PhaseEditor<InitiativeId, BusinessUnderstandingForm> =
                PhaseEditor::default();
            match ai.fetch_business_understanding(id).await {
                Ok(record) => {
                    editor.begin_edit(id, BusinessUnderstandingForm::from_record(&record))
                }
                Err(ClientError::Status { status: 404, .. }) => editor.begin_create(),
                Err(err) => return Err(err),
            }
            fields.apply(&mut editor.form);
            let (mode, form) = editor.take_submission();
            let record = ai
                .save_business_understanding(mode, &form.to_payload(id))
                .await?;
            println!("{}", saved_label(mode, "business understanding"));
            show_business(&record);
        }
        BusinessCommand::Decide {
            initiative,
            decision,
            notes,
        } => {
            let Some(decision) = GoNoGoDecision::parse(&decision) else {
                return Err(ClientError::Validation(format!(
                    "Unknown decision '{decision}'; expected go, no_go or pending"
                )));
            };
            let record = ai
                .record_go_no_go(InitiativeId(initiative), decision, notes)
                .await?;
            field("Decision", record.go_no_go_decision.label());
            field("Notes", text(record.decision_notes.as_deref()));
        }
        BusinessCommand::Feasibility { initiative } => {
            let assessment = ai.assess_feasibility(InitiativeId(initiative)).await?;
            render::assessment("Feasibility assessment", &assessment);
        }
        BusinessCommand::Assess { initiative } => {
            let assessment = ai.assess_go_no_go(InitiativeId(initiative)).await?;
            render::assessment("Go/no-go assessment", &assessment);
        }
    }
    Ok(None)
}

fn saved_label<K>(mode: FormMode<K>, what: &str) -> String {
    match mode {
        FormMode::Create => format!("Created {what}"),
        FormMode::Edit(_) => format!("Updated {what}"),
    }
}

fn show_business(record: &BusinessUnderstanding) {
    heading(&format!("Business understanding for initiative {}", record.initiative_id));
    field("Problem", text(record.problem_statement.as_deref()));
    field("AI pattern", opt(record.ai_pattern.map(AiPattern::label)));
    field("Objectives", text(record.business_objectives.as_deref()));
    render::list("Success criteria", &record.success_criteria);
    render::list("Data sources", &record.data_sources);
    render::list("Compliance", &record.compliance_requirements);
    render::list("Stakeholders", &record.stakeholders);
    render::use_case(&record.selected_use_case);
    field("Go/no-go", record.go_no_go_decision.label());
    field("Decision notes", text(record.decision_notes.as_deref()));
    if let Some(assessment) = &record.feasibility_assessment {
        println!();
        render::assessment("Feasibility assessment", assessment);
    }
    if let Some(assessment) = &record.go_no_go_assessment {
        println!();
        render::assessment("Go/no-go assessment", assessment);
    }
}

// -- data understanding -------------------------------------------------------

pub async fn datasets(client: Arc<PortfolioClient>, cmd: DatasetsCommand) -> ViewResult {
    let ai = &client.ai_projects;
    let mut editor: PhaseEditor<DatasetId, DatasetForm> = PhaseEditor::default();
    let (initiative, fields) = match cmd {
        DatasetsCommand::List { initiative } => {
            let datasets = ai.fetch_datasets(InitiativeId(initiative)).await?;
            dataset_table(&datasets);
            return Ok(None);
        }
        DatasetsCommand::Analyze { dataset } => {
            let analysis = ai.analyze_dataset_quality(DatasetId(dataset)).await?;
            heading(&format!("Data quality of dataset {dataset}"));
            field("Overall score", score(analysis.overall_score));
            field("Summary", text(analysis.summary.as_deref()));
            let rows: Vec<[String; 2]> = analysis
                .issues
                .iter()
                .map(|issue| [text(issue.severity.as_deref()), issue.description.clone()])
                .collect();
            table(["SEVERITY", "ISSUE"], &rows);
            render::list("Recommendations", &analysis.recommendations);
            return Ok(None);
        }
        DatasetsCommand::Add { initiative, fields } => {
            editor.begin_create();
            (initiative, fields)
        }
        DatasetsCommand::Update {
            initiative,
            dataset,
            fields,
        } => {
            let datasets = ai.fetch_datasets(InitiativeId(initiative)).await?;
            let record = datasets
                .iter()
                .find(|d| d.id == DatasetId(dataset))
                .ok_or_else(|| not_found("Dataset", dataset, initiative))?;
            editor.begin_edit(record.id, DatasetForm::from_record(record));
            (initiative, fields)
        }
    };

    fields.apply(&mut editor.form);
    let (mode, form) = editor.take_submission();
    let dataset = ai
        .save_dataset(InitiativeId(initiative), mode, &form.to_payload())
        .await?;
    println!("{}", saved_label(mode, "dataset"));
    dataset_table(std::slice::from_ref(&dataset));
    Ok(None)
}

fn not_found(what: &str, id: i64, initiative: i64) -> ClientError {
    ClientError::Validation(format!("{what} {id} not found for initiative {initiative}"))
}

fn dataset_table(datasets: &[Dataset]) {
    let rows: Vec<[String; 6]> = datasets
        .iter()
        .map(|d| {
            [
                d.id.to_string(),
                d.name.clone(),
                text(d.source.as_deref()),
                opt(d.record_count),
                score(d.quality_score),
                d.issues.len().to_string(),
            ]
        })
        .collect();
    table(["ID", "NAME", "SOURCE", "RECORDS", "QUALITY", "ISSUES"], &rows);
}

// -- data preparation ---------------------------------------------------------

pub async fn prep(client: Arc<PortfolioClient>, cmd: PrepCommand) -> ViewResult {
    let ai = &client.ai_projects;
    let mut editor: PhaseEditor<PreparationStepId, PreparationStepForm> = PhaseEditor::default();
    let (initiative, fields) = match cmd {
        PrepCommand::List { initiative } => {
            let steps = ai.fetch_preparation_steps(InitiativeId(initiative)).await?;
            step_table(&steps);
            return Ok(None);
        }
        PrepCommand::Recommend { initiative } => {
            let recommendation = ai.recommend_preparation(InitiativeId(initiative)).await?;
            heading("Recommended preparation steps");
            field("Summary", text(recommendation.summary.as_deref()));
            let rows: Vec<[String; 3]> = recommendation
                .steps
                .iter()
                .map(|s| {
                    [
                        s.name.clone(),
                        text(s.priority.as_deref()),
                        text(s.description.as_deref()),
                    ]
                })
                .collect();
            table(["STEP", "PRIORITY", "DESCRIPTION"], &rows);
            return Ok(None);
        }
        PrepCommand::Add { initiative, fields } => {
            editor.begin_create();
            (initiative, fields)
        }
        PrepCommand::Update {
            initiative,
            step,
            fields,
        } => {
            let steps = ai.fetch_preparation_steps(InitiativeId(initiative)).await?;
            let record = steps
                .iter()
                .find(|s| s.id == PreparationStepId(step))
                .ok_or_else(|| not_found("Preparation step", step, initiative))?;
            editor.begin_edit(record.id, PreparationStepForm::from_record(record));
            (initiative, fields)
        }
    };

    fields.apply(&mut editor.form);
    let (mode, form) = editor.take_submission();
    let step = ai
        .save_preparation_step(InitiativeId(initiative), mode, &form.to_payload())
        .await?;
    println!("{}", saved_label(mode, "preparation step"));
    step_table(std::slice::from_ref(&step));
    Ok(None)
}

fn step_table(steps: &[PreparationStep]) {
    let mut ordered: Vec<&PreparationStep> = steps.iter().collect();
    ordered.sort_by_key(|s| s.step_order);
    let rows: Vec<[String; 6]> = ordered
        .iter()
        .map(|s| {
            [
                s.id.to_string(),
                s.step_order.to_string(),
                s.name.clone(),
                s.status.label().to_string(),
                score(s.quality_before),
                score(s.quality_after),
            ]
        })
        .collect();
    table(["ID", "ORDER", "STEP", "STATUS", "BEFORE", "AFTER"], &rows);
}

// -- model development --------------------------------------------------------

pub async fn models(client: Arc<PortfolioClient>, cmd: ModelsCommand) -> ViewResult {
    let ai = &client.ai_projects;
    let mut editor: PhaseEditor<ModelId, ModelForm> = PhaseEditor::default();
    let (initiative, fields) = match cmd {
        ModelsCommand::List { initiative } => {
            let models = ai.fetch_models(InitiativeId(initiative)).await?;
            model_table(&models);
            return Ok(None);
        }
        ModelsCommand::Recommend { initiative } => {
            let recommendation = ai.recommend_models(InitiativeId(initiative)).await?;
            heading("Recommended models");
            field("Summary", text(recommendation.summary.as_deref()));
            let rows: Vec<[String; 3]> = recommendation
                .recommendations
                .iter()
                .map(|m| {
                    [
                        m.algorithm.clone(),
                        score(m.suitability_score),
                        text(m.rationale.as_deref()),
                    ]
                })
                .collect();
            table(["ALGORITHM", "SUITABILITY", "RATIONALE"], &rows);
            return Ok(None);
        }
        ModelsCommand::Evaluations { model } => {
            let evaluations = ai.fetch_evaluations(ModelId(model)).await?;
            let rows: Vec<[String; 7]> = evaluations
                .iter()
                .map(|e| {
                    [
                        e.id.to_string(),
                        text(e.evaluation_type.as_deref()),
                        score(e.accuracy),
                        score(e.f1_score),
                        score(e.auc_roc),
                        opt(e.passed),
                        render::date(e.evaluated_at),
                    ]
                })
                .collect();
            table(["ID", "TYPE", "ACCURACY", "F1", "AUC", "PASSED", "DATE"], &rows);
            return Ok(None);
        }
        ModelsCommand::Evaluate { model, fields } => {
            let payload = fields.to_form().to_payload();
            let evaluation = ai.create_evaluation(ModelId(model), &payload).await?;
            println!("Recorded evaluation {} for model {model}", evaluation.id);
            return Ok(None);
        }
        ModelsCommand::Add { initiative, fields } => {
            editor.begin_create();
            (initiative, fields)
        }
        ModelsCommand::Update {
            initiative,
            model,
            fields,
        } => {
            let models = ai.fetch_models(InitiativeId(initiative)).await?;
            let record = models
                .iter()
                .find(|m| m.id == ModelId(model))
                .ok_or_else(|| not_found("Model", model, initiative))?;
            editor.begin_edit(record.id, ModelForm::from_record(record));
            (initiative, fields)
        }
    };

    fields.apply(&mut editor.form);
    let (mode, form) = editor.take_submission();
    let payload = form.to_payload();
    let model = match mode {
        FormMode::Create => ai.create_model(InitiativeId(initiative), &payload).await?,
        FormMode::Edit(id) => ai.update_model(id, &payload).await?,
    };
    println!("{}", saved_label(mode, "model"));
    model_table(std::slice::from_ref(&model));
    Ok(None)
}

fn model_table(models: &[Model]) {
    let rows: Vec<[String; 7]> = models
        .iter()
        .map(|m| {
            [
                m.id.to_string(),
                m.name.clone(),
                text(m.algorithm.as_deref()),
                text(m.version.as_deref()),
                text(m.status.as_deref()),
                score(m.accuracy),
                score(m.f1_score),
            ]
        })
        .collect();
    table(["ID", "NAME", "ALGORITHM", "VERSION", "STATUS", "ACCURACY", "F1"], &rows);
}

// -- deployment ---------------------------------------------------------------

pub async fn deployments(client: Arc<PortfolioClient>, cmd: DeploymentsCommand) -> ViewResult {
    match cmd {
        DeploymentsCommand::List { initiative } => {
            let models = client.ai_projects.fetch_models(InitiativeId(initiative)).await?;

            // One request per model, all in flight together.
            let mut scope = ViewScope::new("deployments");
            let tasks: Vec<_> = models
                .iter()
                .map(|model| {
                    let client = client.clone();
                    let model_id = model.id;
                    scope.spawn(async move { client.ai_projects.fetch_deployments(model_id).await })
                })
                .collect();

            let mut deployments: Vec<Deployment> = Vec::new();
            for (model, task) in models.iter().zip(tasks) {
                match task.join().await {
                    Ok(items) => deployments.extend(items),
                    Err(err) if err.requires_reauth() => return Err(err),
                    Err(err) => render::banner(&format!(
                        "Deployments of model {} could not be loaded: {}",
                        model.id,
                        err.display_message()
                    )),
                }
            }
            deployment_table(&deployments);
        }
        DeploymentsCommand::Add { model, fields } => {
            let payload = fields.to_form().to_payload();
            let deployment = client
                .ai_projects
                .create_deployment(ModelId(model), &payload)
                .await?;
            println!("Created deployment {}", deployment.id);
            deployment_table(std::slice::from_ref(&deployment));
        }
    }
    Ok(None)
}

fn deployment_table(deployments: &[Deployment]) {
    let rows: Vec<[String; 6]> = deployments
        .iter()
        .map(|d| {
            [
                d.id.to_string(),
                d.model_id.to_string(),
                text(d.environment.as_deref()),
                d.status.label().to_string(),
                text(d.endpoint_url.as_deref()),
                render::date(d.deployed_at),
            ]
        })
        .collect();
    table(["ID", "MODEL", "ENVIRONMENT", "STATUS", "ENDPOINT", "DEPLOYED"], &rows);
}

// -- monitoring ---------------------------------------------------------------

pub async fn monitoring(client: Arc<PortfolioClient>, cmd: MonitoringCommand) -> ViewResult {
    let ai = &client.ai_projects;
    match cmd {
        MonitoringCommand::History { deployment } => {
            let history = ai.fetch_monitoring_history(DeploymentId(deployment)).await?;
            monitoring_table(&history);
            if let Some(latest) = ai.snapshot().await.latest_monitoring {
                println!();
                show_latest(&latest);
            }
        }
        MonitoringCommand::Record { deployment, fields } => {
            let payload = fields.to_form().to_payload();
            let record = ai
                .record_monitoring(DeploymentId(deployment), &payload)
                .await?;
            println!("Recorded monitoring entry {}", record.id);
            show_latest(&record);
        }
        MonitoringCommand::Drift { deployment } => {
            let analysis = ai.analyze_drift(DeploymentId(deployment)).await?;
            heading(&format!("Drift analysis for deployment {deployment}"));
            field("Drift detected", analysis.drift_detected);
            field("Severity", text(analysis.severity.as_deref()));
            field("Health", analysis.health_status.label());
            field("Summary", text(analysis.summary.as_deref()));
            render::list("Recommended actions", &analysis.recommended_actions);
        }
    }
    Ok(None)
}

fn monitoring_table(records: &[MonitoringRecord]) {
    let rows: Vec<[String; 6]> = records
        .iter()
        .map(|r| {
            [
                render::timestamp(r.recorded_at),
                r.health_status.label().to_string(),
                score(r.drift_score),
                score(r.accuracy),
                opt(r.latency_ms),
                score(r.error_rate),
            ]
        })
        .collect();
    table(["RECORDED", "HEALTH", "DRIFT", "ACCURACY", "LATENCY MS", "ERROR RATE"], &rows);
}

fn show_latest(record: &MonitoringRecord) {
    heading("Latest");
    field("Recorded", render::timestamp(record.recorded_at));
    field("Health", record.health_status.label());
    field("Drift score", score(record.drift_score));
    field("Accuracy", score(record.accuracy));
    field("Predictions", opt(record.prediction_count));
    field("Notes", text(record.notes.as_deref()));
}

// -- benefits -----------------------------------------------------------------

pub async fn benefits(client: Arc<PortfolioClient>, cmd: BenefitsCommand) -> ViewResult {
    let store = &client.benefits;
    match cmd {
        BenefitsCommand::List { initiative } => {
            let benefits = store.fetch_benefits(initiative.map(InitiativeId)).await?;
            let rows: Vec<[String; 7]> = benefits
                .iter()
                .map(|b| {
                    [
                        b.id.to_string(),
                        b.initiative_id.to_string(),
                        b.name.clone(),
                        text(b.category.as_deref()),
                        score(b.target_value),
                        score(b.actual_value),
                        percent(b.realization_percentage),
                    ]
                })
                .collect();
            table(["ID", "INITIATIVE", "NAME", "CATEGORY", "TARGET", "ACTUAL", "REALIZED"], &rows);
        }
        BenefitsCommand::Add { initiative, fields } => {
            let mut editor: PhaseEditor<BenefitId, BenefitForm> = PhaseEditor::default();
            editor.begin_create();
            fields.apply(&mut editor.form);
            let (mode, form) = editor.take_submission();
            let benefit = store
                .save_benefit(mode, &form.to_payload(InitiativeId(initiative)))
                .await?;
            println!("Created benefit {} ({})", benefit.id, benefit.name);
        }
        BenefitsCommand::Update {
            initiative,
            benefit,
            fields,
        } => {
            let benefits = store.fetch_benefits(Some(InitiativeId(initiative))).await?;
            let record = benefits
                .iter()
                .find(|b| b.id == BenefitId(benefit))
                .ok_or_else(|| not_found("Benefit", benefit, initiative))?;
            let mut editor: PhaseEditor<BenefitId, BenefitForm> = PhaseEditor::default();
            editor.begin_edit(record.id, BenefitForm::from_record(record));
            fields.apply(&mut editor.form);
            let (mode, form) = editor.take_submission();
            let saved = store
                .save_benefit(mode, &form.to_payload(InitiativeId(initiative)))
                .await?;
            println!("Updated benefit {} ({})", saved.id, saved.name);
        }
        BenefitsCommand::Kpis { initiative } => {
            let kpis = store.fetch_kpis(InitiativeId(initiative)).await?;
            let rows: Vec<[String; 6]> = kpis
                .iter()
                .map(|k| {
                    [
                        k.name.clone(),
                        text(k.unit.as_deref()),
                        score(k.baseline),
                        score(k.target),
                        score(k.current),
                        text(k.frequency.as_deref()),
                    ]
                })
                .collect();
            table(["KPI", "UNIT", "BASELINE", "TARGET", "CURRENT", "FREQUENCY"], &rows);
        }
        BenefitsCommand::AddKpi { initiative, fields } => {
            let payload = fields.to_form().to_payload(InitiativeId(initiative));
            let kpi = store.create_kpi(&payload).await?;
            println!("Created KPI {} ({})", kpi.id, kpi.name);
        }
        BenefitsCommand::Pir { initiative, fields } => {
            let pir = if fields.is_empty() {
                store.fetch_pir(InitiativeId(initiative)).await?
            } else {
                let payload = fields.to_form().to_payload(InitiativeId(initiative));
                store.save_pir(&payload).await?
            };
            heading(&format!("Post-implementation review, initiative {initiative}"));
            field("Review date", render::date(pir.review_date));
            field("Overall rating", score(pir.overall_rating));
            field("Objectives met", opt(pir.objectives_met));
            field("Summary", text(pir.summary.as_deref()));
            render::list("Lessons learned", &pir.lessons_learned);
            render::list("Recommendations", &pir.recommendations);
        }
    }
    Ok(None)
}

// -- reporting / analytics ----------------------------------------------------

pub async fn reports(client: Arc<PortfolioClient>, cmd: ReportsCommand) -> ViewResult {
    let store = &client.reporting;
    match cmd {
        ReportsCommand::List => {
            let reports = store.fetch_reports().await?;
            let rows: Vec<[String; 4]> = reports
                .iter()
                .map(|r| {
                    [
                        r.id.to_string(),
                        r.title.clone(),
                        format!("{:?}", r.report_type).to_lowercase(),
                        render::date(r.created_at),
                    ]
                })
                .collect();
            table(["ID", "TITLE", "TYPE", "CREATED"], &rows);
        }
        ReportsCommand::Show { id } => {
            let report = store.fetch_report(ReportId(id)).await?;
            show_report(&report);
        }
        ReportsCommand::Generate {
            report_type,
            title,
            initiatives,
            from,
            to,
        } => {
            let Some(kind) = ReportType::parse(&report_type) else {
                return Err(ClientError::Validation(format!(
                    "Unknown report type '{report_type}'; expected executive, portfolio, \
                     benefits, risk or custom"
                )));
            };
            let body = GenerateReportRequest {
                report_type: kind,
                title,
                initiative_ids: initiatives.into_iter().map(InitiativeId).collect(),
                period_start: from,
                period_end: to,
            };
            let report = store.generate_report(&body).await?;
            show_report(&report);
        }
        ReportsCommand::Summary => {
            let summary = store.fetch_executive_summary().await?;
            heading("Executive summary");
            field("Initiatives", summary.total_initiatives);
            field("Active", summary.active_initiatives);
            field("At risk", summary.at_risk_count);
            field("Total budget", render::money(Some(summary.total_budget)));
            field("Realized benefits", render::money(Some(summary.total_realized_benefits)));
            field("Average ROI", percent(summary.average_roi));
            render::list("Highlights", &summary.highlights);
            field("Generated", render::timestamp(summary.generated_at));
        }
    }
    Ok(None)
}

fn show_report(report: &Report) {
    heading(&format!("#{} {}", report.id, report.title));
    field("Type", format!("{:?}", report.report_type).to_lowercase());
    field("Generated by", text(report.generated_by.as_deref()));
    field("Created", render::timestamp(report.created_at));
    field("Summary", text(report.summary.as_deref()));
    if !report.content.is_null() {
        match serde_json::to_string_pretty(&report.content) {
            Ok(content) => println!("{content}"),
            Err(err) => render::banner(&format!("Report content could not be shown: {err}")),
        }
    }
}

pub async fn analytics(client: Arc<PortfolioClient>, cmd: AnalyticsCommand) -> ViewResult {
    let store = &client.analytics;
    match cmd {
        AnalyticsCommand::Dashboard => {
            let dashboard = store.fetch_dashboard().await?;
            heading("Analytics");
            field("Initiatives", dashboard.initiative_count);
            field("Active deployments", dashboard.active_deployments);
            field("Healthy", dashboard.healthy_deployments);
            field("Degraded", dashboard.degraded_deployments);
            field("Critical", dashboard.critical_deployments);
            field("Average drift", score(dashboard.average_drift));
            field("Benefit realization", percent(dashboard.benefit_realization_rate));
            let rows: Vec<[String; 2]> = dashboard
                .phase_distribution
                .iter()
                .map(|(phase, count)| [phase.clone(), count.to_string()])
                .collect();
            table(["PHASE", "INITIATIVES"], &rows);
        }
        AnalyticsCommand::Trends { metric, period } => {
            let points = store.fetch_trends(&metric, &period).await?;
            let rows: Vec<[String; 2]> = points
                .iter()
                .map(|p| [p.period.clone(), format!("{:.2}", p.value)])
                .collect();
            table(["PERIOD", &metric.to_uppercase()], &rows);
        }
    }
    Ok(None)
}
