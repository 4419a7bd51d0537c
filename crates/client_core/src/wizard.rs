//! Guided business-understanding flow for a new AI project.
//!
//! Problem statement, then pattern classification, then a similarity search
//! against existing initiatives, then linking. Each step needs the output of
//! the one before it. A failed step leaves the wizard where it was with the
//! error in [`BusinessUnderstandingWizard::banner`].

use std::sync::Arc;

use shared::{
    domain::{AiPattern, InitiativeId},
    protocol::{
        InitiativeRecommendation, LinkFeedback, LinkInitiativeRequest, PatternClassification,
        RecommendationRequest, SimilarInitiative, UseCase,
    },
};
use tracing::info;

use crate::{
    error::{ClientError, ClientResult},
    routes::{Navigation, NavigationState, Route},
    stores::AiProjectsStore,
};

/// Minimum problem statement length, in characters, before classification
/// is offered.
pub const MIN_PROBLEM_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Problem,
    Pattern,
    Similarity,
    Link,
}

impl WizardStep {
    fn previous(self) -> Self {
        match self {
            Self::Problem | Self::Pattern => Self::Problem,
            Self::Similarity => Self::Pattern,
            Self::Link => Self::Similarity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkChoice {
    /// Link this candidate and carry its use case forward.
    Selected(InitiativeId),
    /// Link without a use case.
    Skip,
    /// None of the candidates fit.
    NoMatch,
}

pub struct BusinessUnderstandingWizard {
    store: Arc<AiProjectsStore>,
    step: WizardStep,
    problem: String,
    target: Option<InitiativeId>,
    classification: Option<PatternClassification>,
    pattern_override: Option<AiPattern>,
    candidates: Vec<SimilarInitiative>,
    recommendation: Option<InitiativeRecommendation>,
    selected: Option<InitiativeId>,
    banner: Option<String>,
}

impl BusinessUnderstandingWizard {
    pub fn new(store: Arc<AiProjectsStore>) -> Self {
        Self {
            store,
            step: WizardStep::Problem,
            problem: String::new(),
            target: None,
            classification: None,
            pattern_override: None,
            candidates: Vec::new(),
            recommendation: None,
            selected: None,
            banner: None,
        }
    }

    /// Rebuilds the wizard from the payload it navigated with, so going back
    /// from the detail page lands on the pattern step with the same input.
    pub fn restore(store: Arc<AiProjectsStore>, state: &NavigationState) -> Self {
        let mut wizard = Self::new(store);
        if let Some(problem) = &state.problem_statement {
            wizard.problem = problem.clone();
        }
        wizard.pattern_override = state.ai_pattern;
        if let Some(use_case) = &state.selected_use_case {
            wizard.target = use_case.initiative_id;
        }
        if wizard.pattern_override.is_some() {
            wizard.step = WizardStep::Pattern;
        }
        wizard
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn problem_len(&self) -> usize {
        self.problem.trim().chars().count()
    }

    /// Initiative linked on skip or no-match when no candidate was chosen.
    pub fn set_target(&mut self, initiative_id: InitiativeId) {
        self.target = Some(initiative_id);
    }

    /// Editing the problem after classification invalidates everything
    /// derived from it.
    pub fn set_problem(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.problem {
            return;
        }
        self.problem = text;
        self.banner = None;
        if self.step > WizardStep::Problem {
            self.classification = None;
            self.pattern_override = None;
            self.candidates.clear();
            self.recommendation = None;
            self.selected = None;
            self.step = WizardStep::Problem;
        }
    }

    pub fn can_analyze(&self) -> bool {
        self.problem_len() >= MIN_PROBLEM_LEN
    }

    pub async fn analyze(&mut self) -> ClientResult<&PatternClassification> {
        self.banner = None;
        if !self.can_analyze() {
            return Err(self.refuse(format!(
                "Describe the business problem in at least {MIN_PROBLEM_LEN} characters ({} so far)",
                self.problem_len()
            )));
        }

        let result = self.store.classify_pattern(self.problem.trim()).await;
        let classification = match result {
            Ok(classification) => classification,
            Err(err) => return Err(self.fail(err)),
        };
        info!(
            pattern = ?classification.pattern,
            confidence = ?classification.confidence,
            "wizard: problem classified"
        );
        self.pattern_override = None;
        self.candidates.clear();
        self.recommendation = None;
        self.selected = None;
        self.step = WizardStep::Pattern;
        Ok(self.classification.insert(classification))
    }

    pub fn classification(&self) -> Option<&PatternClassification> {
        self.classification.as_ref()
    }

    pub fn suggested_pattern(&self) -> Option<AiPattern> {
        self.classification.as_ref().and_then(|c| c.pattern)
    }

    pub fn override_pattern(&mut self, pattern: AiPattern) -> ClientResult<()> {
        if self.step < WizardStep::Pattern {
            return Err(self.refuse("Analyze the problem before choosing a pattern"));
        }
        self.banner = None;
        if self.effective_pattern() != Some(pattern) {
            self.candidates.clear();
            self.recommendation = None;
            self.selected = None;
            self.step = WizardStep::Pattern;
        }
        self.pattern_override = Some(pattern);
        Ok(())
    }

    /// The user's choice if they overrode the suggestion, else the suggestion.
    pub fn effective_pattern(&self) -> Option<AiPattern> {
        self.pattern_override.or_else(|| self.suggested_pattern())
    }

    pub async fn search_similar(&mut self) -> ClientResult<&[SimilarInitiative]> {
        self.banner = None;
        let Some(pattern) = self.effective_pattern() else {
            return Err(self.refuse("Choose an AI pattern before searching"));
        };

        let result = self
            .store
            .find_similar_initiatives(self.problem.trim(), pattern)
            .await;
        let matches = match result {
            Ok(matches) => matches,
            Err(err) => return Err(self.fail(err)),
        };
        info!(pattern = pattern.key(), count = matches.len(), "wizard: similar initiatives");
        self.candidates = matches;
        self.recommendation = None;
        self.selected = None;
        self.step = WizardStep::Similarity;
        Ok(self.candidates.as_slice())
    }

    pub fn candidates(&self) -> &[SimilarInitiative] {
        &self.candidates
    }

    pub async fn recommend(&mut self) -> ClientResult<&InitiativeRecommendation> {
        self.banner = None;
        if self.step < WizardStep::Similarity || self.candidates.is_empty() {
            return Err(self.refuse("Search for similar initiatives first"));
        }
        let Some(pattern) = self.effective_pattern() else {
            return Err(self.refuse("Choose an AI pattern before searching"));
        };

        let body = RecommendationRequest {
            problem_statement: self.problem.trim().to_string(),
            ai_pattern: pattern,
            candidate_ids: self.candidates.iter().map(|c| c.initiative_id).collect(),
        };
        let result = self.store.recommend_initiative(&body).await;
        match result {
            Ok(recommendation) => Ok(self.recommendation.insert(recommendation)),
            Err(err) => Err(self.fail(err)),
        }
    }

    pub fn recommendation(&self) -> Option<&InitiativeRecommendation> {
        self.recommendation.as_ref()
    }

    pub fn select_candidate(&mut self, initiative_id: InitiativeId) -> ClientResult<()> {
        if self.step < WizardStep::Similarity {
            return Err(self.refuse("Search for similar initiatives first"));
        }
        if self.candidate(initiative_id).is_none() {
            return Err(self.refuse(format!(
                "Initiative {initiative_id} is not among the matches"
            )));
        }
        self.banner = None;
        self.selected = Some(initiative_id);
        self.step = WizardStep::Link;
        Ok(())
    }

    pub fn selected(&self) -> Option<InitiativeId> {
        self.selected
    }

    /// Links the business-understanding record and returns where to go next.
    /// On skip or no match the navigation state carries no use case.
    pub async fn link(&mut self, choice: LinkChoice) -> ClientResult<Navigation> {
        self.banner = None;
        if self.step < WizardStep::Similarity {
            return Err(self.refuse("Search for similar initiatives first"));
        }
        let Some(pattern) = self.effective_pattern() else {
            return Err(self.refuse("Choose an AI pattern before linking"));
        };

        let (initiative_id, use_case, feedback) = match choice {
            LinkChoice::Selected(id) => {
                let use_case = self.candidate(id).map(|candidate| use_case_of(candidate, pattern));
                if use_case.is_none() {
                    return Err(self.refuse(format!("Initiative {id} is not among the matches")));
                }
                (id, use_case, LinkFeedback::Selected)
            }
            LinkChoice::Skip | LinkChoice::NoMatch => {
                let Some(id) = self.selected.or(self.target) else {
                    return Err(self.refuse("Choose the initiative to link"));
                };
                let feedback = if choice == LinkChoice::Skip {
                    LinkFeedback::Skipped
                } else {
                    LinkFeedback::NoMatch
                };
                (id, None, feedback)
            }
        };

        let body = LinkInitiativeRequest {
            initiative_id,
            problem_statement: self.problem.trim().to_string(),
            ai_pattern: pattern,
            selected_use_case: use_case.clone(),
            match_feedback: feedback,
        };
        let result = self.store.link_initiative(&body).await;
        if let Err(err) = result {
            return Err(self.fail(err));
        }

        self.selected = Some(initiative_id);
        self.step = WizardStep::Link;
        Ok(Navigation::with_state(
            Route::business_understanding(initiative_id),
            NavigationState {
                selected_use_case: use_case,
                problem_statement: Some(self.problem.trim().to_string()),
                ai_pattern: Some(pattern),
            },
        ))
    }

    /// Steps back without discarding anything collected so far.
    pub fn back(&mut self) -> WizardStep {
        self.banner = None;
        self.step = self.step.previous();
        self.step
    }

    fn candidate(&self, initiative_id: InitiativeId) -> Option<&SimilarInitiative> {
        self.candidates
            .iter()
            .find(|candidate| candidate.initiative_id == initiative_id)
    }

    fn refuse(&mut self, message: impl Into<String>) -> ClientError {
        let message = message.into();
        self.banner = Some(message.clone());
        ClientError::Validation(message)
    }

    fn fail(&mut self, err: ClientError) -> ClientError {
        self.banner = Some(err.display_message());
        err
    }
}

/// The candidate's own use case when it decodes, otherwise one assembled
/// from the match itself.
fn use_case_of(candidate: &SimilarInitiative, pattern: AiPattern) -> UseCase {
    candidate
        .use_case
        .as_ref()
        .cloned()
        .unwrap_or_else(|| UseCase {
            title: candidate.title.clone(),
            description: candidate.summary.clone(),
            initiative_id: Some(candidate.initiative_id),
            ai_pattern: candidate.ai_pattern.or(Some(pattern)),
            expected_value: None,
        })
}

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod tests;
