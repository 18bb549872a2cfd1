//! Run Pipeline use case
//!
//! The Orchestrator: sequences the role executors into one research run,
//! owns the hypothesis store, the refinement loop and the relevance gate.
//!
//! | Stage              | State              | Runs when                     |
//! |--------------------|--------------------|-------------------------------|
//! | 1. Planning        | `GoalSet`          | supervisor enabled            |
//! | 2. Generation      | `Generating`       | always                        |
//! | 3. Reflection      | `Reviewing`        | always                        |
//! | 4. Proximity gate  | `Filtering`        | plan has a proximity step     |
//! | 5. Initial ranking | `InitialRanking`   | always                        |
//! | 6. Refinement      | `Refining(1..=N)`  | N > 0 iterations planned      |
//! | 7. Final ranking   | `FinalRanking`     | always                        |
//! | 8. Synthesis       | `Synthesizing`     | always                        |
//!
//! Cancellation and the time budget are checked before each stage. A failed
//! run comes back as a [`PipelineFailure`] carrying the store as it was.

mod planning;
mod refine;
mod types;

pub use types::{
    BundleConfiguration, BundleHypotheses, BundleMeta, PipelineFailure, PipelineOutput,
    ResultBundle, RunPipelineError, RunPipelineInput,
};

use crate::config::{PipelineParams, RoleSettings};
use crate::ports::conversation_logger::{ConversationLogger, NoConversationLogger};
use crate::ports::feedback::{FeedbackProvider, NoFeedback};
use crate::ports::literature::LiteratureSource;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::reasoning_gateway::ReasoningGateway;
use crate::ports::result_sink::ResultSink;
use crate::use_cases::roles::{
    GenerationRole, ProximityRole, RankingRole, ReflectionRole, RoleRunner, SupervisorRole,
    SynthesisRole,
};
use crate::use_cases::shared::{check_boundary, check_cancelled, display_timestamp, iso_timestamp};
use coscientist_domain::{
    Comparison, FilterOutcome, Hypothesis, HypothesisIdGenerator, HypothesisStore, PipelineState,
    RankingMethod, ReportFormat, ResearchGoal, ResearchPlan, ResearchReport, SearchResult, Stage,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Use case for running one research goal end to end
pub struct RunPipelineUseCase<G: ReasoningGateway + 'static> {
    gateway: Arc<G>,
    settings: Arc<RoleSettings>,
    logger: Arc<dyn ConversationLogger>,
    literature: Option<Arc<dyn LiteratureSource>>,
    feedback: Arc<dyn FeedbackProvider>,
    result_sink: Option<Arc<dyn ResultSink>>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: ReasoningGateway + 'static> Clone for RunPipelineUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            settings: self.settings.clone(),
            logger: self.logger.clone(),
            literature: self.literature.clone(),
            feedback: self.feedback.clone(),
            result_sink: self.result_sink.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

/// Mutable state of one run.
pub(super) struct Run {
    goal: ResearchGoal,
    params: PipelineParams,
    state: PipelineState,
    store: HypothesisStore,
    plan: ResearchPlan,
    ids: HypothesisIdGenerator,
    started: Instant,
    issues: Vec<String>,
}

impl Run {
    fn new(goal: ResearchGoal, params: PipelineParams, state: PipelineState) -> Self {
        let plan = ResearchPlan::create(
            goal.content(),
            &params.plan_settings(),
            "",
            display_timestamp(),
        );
        Self {
            goal,
            params,
            state,
            store: HypothesisStore::new(),
            plan,
            ids: HypothesisIdGenerator::new(),
            started: Instant::now(),
            issues: Vec::new(),
        }
    }

    /// Record a recoverable problem.
    fn note(&mut self, progress: &dyn ProgressNotifier, message: String) {
        warn!("{}", message);
        progress.on_notice(&message);
        self.issues.push(message);
    }

    /// Fail the stage when too many of its reasoning calls failed.
    fn check_tolerance(
        &mut self,
        stage: Stage,
        failed: usize,
        total: usize,
    ) -> Result<(), RunPipelineError> {
        if self.params.exceeds_tolerance(failed, total) {
            return Err(RunPipelineError::TooManyFailures {
                stage,
                failed,
                total,
            });
        }
        if failed > 0 {
            self.issues
                .push(format!("{failed} of {total} reasoning calls failed during {stage}"));
        }
        Ok(())
    }

    fn check_failures(
        &mut self,
        stage: Stage,
        hypotheses: &[Hypothesis],
    ) -> Result<(), RunPipelineError> {
        let failed = hypotheses.iter().filter(|h| h.has_error()).count();
        self.check_tolerance(stage, failed, hypotheses.len())
    }
}

/// What the stages hand back besides the run state.
struct Completed {
    initial: Vec<Hypothesis>,
    ranked: Vec<Hypothesis>,
    comparisons: Vec<Comparison>,
    report: ResearchReport,
    iterations_run: u32,
}

impl<G: ReasoningGateway + 'static> RunPipelineUseCase<G> {
    pub fn new(gateway: Arc<G>, settings: RoleSettings) -> Self {
        Self {
            gateway,
            settings: Arc::new(settings),
            logger: Arc::new(NoConversationLogger),
            literature: None,
            feedback: Arc::new(NoFeedback),
            result_sink: None,
            cancellation_token: None,
        }
    }

    /// Record every reasoning exchange
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Quote search results to Generation
    pub fn with_literature(mut self, source: Arc<dyn LiteratureSource>) -> Self {
        self.literature = Some(source);
        self
    }

    /// Consult `feedback` before each plan update
    pub fn with_feedback(mut self, feedback: Arc<dyn FeedbackProvider>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Write a result bundle after a completed run
    pub fn with_result_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.result_sink = Some(sink);
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn settings(&self) -> &RoleSettings {
        &self.settings
    }

    /// Execute the pipeline without progress reporting
    pub async fn execute(
        &self,
        input: RunPipelineInput,
    ) -> Result<PipelineOutput, PipelineFailure> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the pipeline with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunPipelineInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<PipelineOutput, PipelineFailure> {
        let RunPipelineInput { goal, params } = input;
        info!("Starting research pipeline for goal: {}", goal);

        let mut state = PipelineState::Idle;
        let parsed = state
            .advance(PipelineState::GoalSet)
            .map_err(RunPipelineError::from)
            .and_then(|()| check_cancelled(&self.cancellation_token))
            .and_then(|()| ResearchGoal::parse(goal.as_str()).map_err(RunPipelineError::from));
        let research_goal = match parsed {
            Ok(g) => g,
            Err(cause) => return Err(failure(goal, state, cause, HypothesisStore::new())),
        };

        let mut run = Run::new(research_goal, params, state);
        match self.drive(&mut run, progress).await {
            Ok(completed) => Ok(self.finish(run, completed)),
            Err(cause) => {
                run.plan.finish(false);
                Err(failure(goal, run.state, cause, run.store))
            }
        }
    }

    fn boundary(&self, run: &Run) -> Result<(), RunPipelineError> {
        check_boundary(&self.cancellation_token, run.started, run.params.time_budget)
    }

    async fn drive(
        &self,
        run: &mut Run,
        progress: &dyn ProgressNotifier,
    ) -> Result<Completed, RunPipelineError> {
        let runner = RoleRunner::new(
            self.gateway.clone(),
            self.settings.clone(),
            self.logger.clone(),
            run.params.max_concurrency,
        );
        let supervisor = SupervisorRole::new(runner.clone());
        let mut conversation = SupervisorRole::<G>::conversation();

        // ==================== Planning ====================
        if run.params.use_supervisor {
            self.boundary(run)?;
            self.create_plan(run, &supervisor, &mut conversation, progress)
                .await;
        }
        let count = run
            .plan
            .hypothesis_count()
            .unwrap_or(run.params.hypothesis_count);
        let iterations = run.params.clamped_iterations(run.plan.iterations());
        let format = run.plan.report_format().unwrap_or(run.params.report_format);

        // ==================== Generation ====================
        self.boundary(run)?;
        run.state.advance(PipelineState::Generating)?;
        progress.on_stage_start(Stage::Generation, 1);
        let literature = self.gather_literature(run, progress).await;
        let generated = GenerationRole::new(runner.clone())
            .run(&run.goal, count, &literature, &run.ids)
            .await;
        progress.on_task_complete(Stage::Generation, generated.is_ok());
        let generated = generated?;
        if generated.is_empty() {
            return Err(RunPipelineError::NoHypotheses);
        }
        let initial = generated.clone();
        for hypothesis in generated {
            run.store.insert_active(hypothesis)?;
        }
        if run.params.validate_hypotheses {
            apply_checklist(run, progress);
        }
        run.plan.mark_executed(1);
        progress.on_stage_complete(Stage::Generation);

        // ==================== Reflection ====================
        self.boundary(run)?;
        run.state.advance(PipelineState::Reviewing)?;
        let active = run.store.active_snapshot();
        progress.on_stage_start(Stage::Reflection, active.len());
        let reviewed = ReflectionRole::new(runner.clone())
            .run(&run.goal, active, progress)
            .await;
        progress.on_stage_complete(Stage::Reflection);
        run.check_failures(Stage::Reflection, &reviewed)?;
        run.store.update_all(reviewed)?;
        run.plan.mark_executed(1);

        // ==================== Proximity Gate ====================
        if let Some(threshold) = run.plan.proximity_threshold() {
            self.boundary(run)?;
            run.state.advance(PipelineState::Filtering)?;
            let active = run.store.active_snapshot();
            progress.on_stage_start(Stage::Proximity, active.len());
            let evaluated = ProximityRole::new(runner.clone())
                .run(&run.goal, active, progress)
                .await;
            progress.on_stage_complete(Stage::Proximity);
            run.check_failures(Stage::Proximity, &evaluated)?;
            run.store.update_all(evaluated)?;

            match run.store.filter_relevant(threshold) {
                FilterOutcome::Applied { kept, excluded } => {
                    info!(
                        "Relevance filter kept {} hypotheses, excluded {}",
                        kept,
                        excluded.len()
                    );
                }
                FilterOutcome::WouldEmpty { evaluated } => run.note(
                    progress,
                    format!(
                        "All {evaluated} hypotheses scored below {threshold}; keeping the unfiltered set"
                    ),
                ),
            }
            run.plan.mark_executed(1);
        }

        // ==================== Initial Ranking ====================
        self.boundary(run)?;
        run.state.advance(PipelineState::InitialRanking)?;
        let ranking = RankingRole::new(runner.clone());
        self.rank_active(run, &ranking, progress).await?;
        run.plan.mark_executed(1);

        // ==================== Refinement ====================
        let iterations_run = self
            .refine(run, &runner, &supervisor, &mut conversation, iterations, progress)
            .await?;
        run.plan.mark_executed(1);

        // ==================== Final Ranking ====================
        self.boundary(run)?;
        run.state.advance(PipelineState::FinalRanking)?;
        let comparisons = self.rank_active(run, &ranking, progress).await?;
        run.plan.mark_executed(1);

        // ==================== Synthesis ====================
        self.boundary(run)?;
        run.state.advance(PipelineState::Synthesizing)?;
        let ranked: Vec<Hypothesis> = run.store.ranked().into_iter().cloned().collect();
        let report = self
            .synthesize(run, SynthesisRole::new(runner), &ranked, format, progress)
            .await?;
        run.plan.mark_executed(1);

        run.store.verify_lineage()?;
        run.state.advance(PipelineState::Done)?;
        run.plan.finish(true);
        info!(
            "Research pipeline finished: {} hypotheses in history, {} ranked",
            run.store.len(),
            ranked.len()
        );

        Ok(Completed {
            initial,
            ranked,
            comparisons,
            report,
            iterations_run,
        })
    }

    async fn gather_literature(
        &self,
        run: &mut Run,
        progress: &dyn ProgressNotifier,
    ) -> Vec<String> {
        let Some(source) = &self.literature else {
            return Vec::new();
        };
        let limit = run.params.literature_results;
        match source.search(run.goal.content(), None, limit).await {
            Ok(results) => results
                .iter()
                .take(limit)
                .map(SearchResult::prompt_line)
                .collect(),
            Err(e) => {
                run.note(progress, format!("Literature search skipped: {e}"));
                Vec::new()
            }
        }
    }

    /// Rank the active set and reorder it by rank.
    async fn rank_active(
        &self,
        run: &mut Run,
        ranking: &RankingRole<G>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Comparison>, RunPipelineError> {
        let active = run.store.active_snapshot();
        let method = RankingMethod::for_set_size(active.len(), run.params.pairwise_threshold);
        progress.on_stage_start(Stage::Ranking, method.judgment_count(active.len()));
        let outcome = ranking
            .run(&run.goal, active, run.params.pairwise_threshold, progress)
            .await?;
        progress.on_stage_complete(Stage::Ranking);
        run.check_tolerance(Stage::Ranking, outcome.failed_calls, outcome.total_calls)?;

        let order = outcome.ranked.iter().map(|h| h.id().clone()).collect();
        run.store.update_all(outcome.ranked)?;
        run.store.set_active(order)?;
        Ok(outcome.comparisons)
    }

    async fn synthesize(
        &self,
        run: &mut Run,
        synthesis: SynthesisRole<G>,
        ranked: &[Hypothesis],
        format: ReportFormat,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchReport, RunPipelineError> {
        let wants_summary = run.params.executive_summary || run.plan.wants_executive_summary();
        progress.on_stage_start(Stage::Synthesis, 1 + usize::from(wants_summary));

        let report = synthesis
            .report(
                &run.goal,
                ranked,
                format,
                run.params.report_cap,
                display_timestamp(),
            )
            .await;
        progress.on_task_complete(Stage::Synthesis, report.is_ok());
        let mut report = report?;

        if wants_summary {
            let summary = synthesis
                .executive_summary(&report, run.params.summary_max_length)
                .await;
            progress.on_task_complete(Stage::Synthesis, summary.is_ok());
            match summary {
                Ok(text) => report.executive_summary = Some(text),
                Err(e) => run.note(progress, format!("Executive summary skipped: {e}")),
            }
        }

        progress.on_stage_complete(Stage::Synthesis);
        Ok(report)
    }

    fn finish(&self, run: Run, completed: Completed) -> PipelineOutput {
        let Run {
            goal,
            params,
            state,
            store,
            plan,
            mut issues,
            ..
        } = run;

        let mut output = PipelineOutput {
            plan,
            store,
            initial: completed.initial,
            ranked: completed.ranked,
            comparisons: completed.comparisons,
            report: completed.report,
            iterations_run: completed.iterations_run,
            issues: Vec::new(),
            state,
            saved_to: None,
        };

        if let Some(sink) = &self.result_sink {
            let bundle = ResultBundle::new(
                goal.content(),
                &self.settings,
                &params,
                &output,
                iso_timestamp(),
            );
            match sink.write(&bundle) {
                Ok(location) => {
                    info!("Saved research results to {}", location);
                    output.saved_to = Some(location);
                }
                Err(e) => {
                    warn!("Failed to save research results: {}", e);
                    issues.push(format!("Result bundle not saved: {e}"));
                }
            }
        }

        output.issues = issues;
        output
    }
}

/// Drop hypotheses failing the statement checklist from the active set,
/// unless none would remain.
fn apply_checklist(run: &mut Run, progress: &dyn ProgressNotifier) {
    let active = run.store.active();
    let passing = active.iter().filter(|h| h.passes_checklist()).count();
    let total = active.len();
    if passing == 0 {
        run.note(
            progress,
            "No generated hypothesis passes the statement checklist; keeping all".to_string(),
        );
        return;
    }
    run.store.retain_active(Hypothesis::passes_checklist);
    if passing < total {
        info!(
            "Statement checklist excluded {} of {} hypotheses",
            total - passing,
            total
        );
    }
}

fn failure(
    research_goal: String,
    reached: PipelineState,
    cause: RunPipelineError,
    store: HypothesisStore,
) -> PipelineFailure {
    warn!(
        "Research run failed in {} ({}): {}",
        reached.stage(),
        reached,
        cause
    );
    PipelineFailure {
        research_goal,
        stage: reached.stage(),
        state: reached,
        cause,
        store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoning_gateway::{GatewayError, ReasoningRequest};
    use crate::ports::result_sink::ResultSinkError;
    use crate::use_cases::testing::ScriptedGateway;
    use coscientist_domain::{AgentRole, HypothesisId, Origin, PlanStatus};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    const CAFFEINE: &str =
        "To investigate the effect of caffeine intake on reaction time in sleep-deprived adults.";

    fn generation_reply(n: usize) -> String {
        (1..=n)
            .map(|i| {
                format!(
                    "Hypothesis {i}: Caffeine intake of {i}00mg decreases reaction time in sleep-deprived adults.\n\nRationale: Adenosine antagonism, dose {i}."
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn last_prompt(request: &ReasoningRequest) -> &str {
        request
            .messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }

    /// Gateway scripted for a full run over `n` generated hypotheses.
    ///
    /// The 500mg hypothesis scores 3 for proximity, everything else 8, and
    /// the first hypothesis of every pair wins.
    fn scripted(n: usize) -> ScriptedGateway {
        let gateway = ScriptedGateway::new();
        gateway.push(AgentRole::Generation, Ok(generation_reply(n)));
        gateway.respond(AgentRole::Proximity, |request| {
            let score = if last_prompt(request).contains("500mg") { 3 } else { 8 };
            Ok(format!("Proximity score: {score}"))
        });
        gateway.respond(AgentRole::Ranking, |_| Ok("Hypothesis 1 is superior.".into()));
        gateway.respond(AgentRole::Evolution, |_| {
            Ok("Statement: Refined caffeine statement.\n\nRationale: Better controlled.".into())
        });
        gateway.push(
            AgentRole::MetaReview,
            Ok("Caffeine and Reaction Time\n\nThe leading hypothesis is: Refined caffeine statement.".into()),
        );
        gateway
    }

    fn use_case(gateway: ScriptedGateway) -> (RunPipelineUseCase<ScriptedGateway>, Arc<ScriptedGateway>) {
        let gateway = Arc::new(gateway);
        (
            RunPipelineUseCase::new(Arc::clone(&gateway), RoleSettings::default()),
            gateway,
        )
    }

    fn params(iterations: u32) -> PipelineParams {
        PipelineParams::default()
            .with_iterations(iterations)
            .with_supervisor(false)
    }

    fn id(s: &str) -> HypothesisId {
        HypothesisId::new(s)
    }

    // ==================== End-to-End ====================

    #[tokio::test]
    async fn test_caffeine_scenario() {
        let (use_case, gateway) = use_case(scripted(5));

        let output = use_case
            .execute(RunPipelineInput::new(CAFFEINE, params(1)))
            .await
            .unwrap();

        // Generation and review
        assert_eq!(output.initial.len(), 5);
        for h in &output.initial {
            assert!(output.store.get(h.id()).unwrap().review.is_some());
        }

        // The 500mg hypothesis is filtered out but kept in history
        let excluded = output.store.get(&id("H-0005")).unwrap();
        assert!(!excluded.is_relevant());
        assert!(!output.store.active_ids().contains(&id("H-0005")));

        // Evolution: three refinements and one combination
        assert_eq!(output.store.count_by_origin(Origin::EvolvedIndividual), 3);
        assert_eq!(output.store.count_by_origin(Origin::EvolvedCombination), 1);
        let hybrid = output.store.get(&id("H-0009")).unwrap();
        assert_eq!(hybrid.parent_ids(), &[id("H-0001"), id("H-0002")]);
        output.store.verify_lineage().unwrap();

        // Accepted refinements replaced their parents
        let active: Vec<&str> = output.store.active_ids().iter().map(|i| i.as_str()).collect();
        assert_eq!(active, vec!["H-0006", "H-0007", "H-0008", "H-0004", "H-0009"]);

        // Final ranks are contiguous from 1
        let ranks: Vec<usize> = output.ranked.iter().filter_map(Hypothesis::rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(output.comparisons.len(), 10);

        // Report
        assert_eq!(output.report.title, "Caffeine and Reaction Time");
        assert!(output.report.body_text.contains(&output.ranked[0].statement));
        assert_eq!(output.report.hypothesis_count, 5);
        assert!(output.report.executive_summary.is_some());

        assert_eq!(output.state, PipelineState::Done);
        assert_eq!(output.iterations_run, 1);
        assert_eq!(output.plan.status, PlanStatus::Completed);
        assert_eq!(gateway.calls_for(AgentRole::Supervisor), 0);
        assert!(output.issues.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_variants_keep_parents() {
        let gateway = scripted(3);
        gateway.respond(AgentRole::Proximity, |request| {
            let score = if last_prompt(request).contains("Refined") { 6 } else { 8 };
            Ok(format!("Proximity score: {score}"))
        });
        let (use_case, _) = use_case(gateway);

        let output = use_case
            .execute(RunPipelineInput::new(CAFFEINE, params(1)))
            .await
            .unwrap();

        let active: Vec<&str> = output.store.active_ids().iter().map(|i| i.as_str()).collect();
        assert_eq!(active, vec!["H-0001", "H-0002", "H-0003"]);
        // Rejected variants stay in history
        assert_eq!(output.store.len(), 7);
    }

    #[tokio::test]
    async fn test_filter_that_would_empty_is_skipped() {
        let gateway = scripted(3);
        gateway.respond(AgentRole::Proximity, |_| Ok("Proximity score: 2".into()));
        let (use_case, _) = use_case(gateway);

        let output = use_case
            .execute(RunPipelineInput::new(CAFFEINE, params(0)))
            .await
            .unwrap();

        assert_eq!(output.ranked.len(), 3);
        assert_eq!(output.iterations_run, 0);
        assert!(output.issues[0].contains("keeping the unfiltered set"));
    }

    #[tokio::test]
    async fn test_supervisor_can_skip_proximity() {
        let gateway = scripted(3);
        gateway.push(
            AgentRole::Supervisor,
            Ok("This is an explanation task with a narrow scope.".into()),
        );
        gateway.push(
            AgentRole::Supervisor,
            Ok("The set is small, so skip proximity evaluation.".into()),
        );
        let (use_case, gateway) = use_case(gateway);

        let output = use_case
            .execute(RunPipelineInput::new(
                CAFFEINE,
                params(0).with_supervisor(true),
            ))
            .await
            .unwrap();

        assert!(!output.plan.has_role(AgentRole::Proximity));
        assert_eq!(gateway.calls_for(AgentRole::Proximity), 0);
        assert_eq!(gateway.calls_for(AgentRole::Supervisor), 2);
        assert_eq!(output.state, PipelineState::Done);
    }

    #[tokio::test]
    async fn test_explicit_relevance_verdict_decides_filter() {
        let gateway = scripted(3);
        gateway.respond(AgentRole::Proximity, |request| {
            let prompt = last_prompt(request);
            Ok(if prompt.contains("100mg") {
                "Overall proximity score: 8. It is not relevant to sleep deprivation.".into()
            } else if prompt.contains("200mg") {
                "Overall proximity score: 3, yet highly relevant to the goal.".into()
            } else {
                "Overall proximity score: 7".into()
            })
        });
        let (use_case, _) = use_case(gateway);

        let output = use_case
            .execute(RunPipelineInput::new(CAFFEINE, params(0)))
            .await
            .unwrap();

        let active: Vec<&str> = output.store.active_ids().iter().map(|i| i.as_str()).collect();
        assert!(!active.contains(&"H-0001"));
        assert!(active.contains(&"H-0002"));
        assert!(!output.store.get(&id("H-0001")).unwrap().is_relevant());
        assert!(output.store.get(&id("H-0002")).unwrap().is_relevant());
        for h in &output.ranked {
            assert!(h.is_relevant());
        }
    }

    #[tokio::test]
    async fn test_plan_update_extends_refinement() {
        let gateway = scripted(3);
        gateway.push(AgentRole::Supervisor, Ok("A causal question.".into()));
        gateway.push(AgentRole::Supervisor, Ok("Follow the default plan.".into()));
        gateway.push(
            AgentRole::Supervisor,
            Ok("Results are promising; run additional iterations.".into()),
        );
        let (use_case, gateway) = use_case(gateway);

        let output = use_case
            .execute(RunPipelineInput::new(
                CAFFEINE,
                params(2).with_supervisor(true),
            ))
            .await
            .unwrap();

        assert_eq!(output.iterations_run, 3);
        assert_eq!(output.plan.iterations(), 3);
        // Two planning calls plus an update after iterations 1 and 2
        assert_eq!(gateway.calls_for(AgentRole::Supervisor), 4);
        assert_eq!(output.state, PipelineState::Done);
    }

    #[tokio::test]
    async fn test_plan_update_shortens_refinement() {
        let gateway = scripted(3);
        gateway.push(AgentRole::Supervisor, Ok("A causal question.".into()));
        gateway.push(AgentRole::Supervisor, Ok("Follow the default plan.".into()));
        gateway.push(
            AgentRole::Supervisor,
            Ok("Converged early; reduce iterations.".into()),
        );
        let (use_case, _) = use_case(gateway);

        let output = use_case
            .execute(RunPipelineInput::new(
                CAFFEINE,
                params(3).with_supervisor(true),
            ))
            .await
            .unwrap();

        assert_eq!(output.iterations_run, 2);
    }

    #[tokio::test]
    async fn test_supervisor_failure_falls_back_to_default_plan() {
        let gateway = scripted(3);
        gateway.push(AgentRole::Supervisor, Err(GatewayError::Timeout));
        let (use_case, _) = use_case(gateway);

        let output = use_case
            .execute(RunPipelineInput::new(
                CAFFEINE,
                params(0).with_supervisor(true),
            ))
            .await
            .unwrap();

        assert!(output.plan.has_role(AgentRole::Proximity));
        assert!(output.issues[0].starts_with("Goal analysis failed"));
    }

    // ==================== Failures ====================

    #[tokio::test]
    async fn test_invalid_goal_fails_in_goal_set() {
        let (use_case, gateway) = use_case(ScriptedGateway::new());

        let failure = use_case
            .execute(RunPipelineInput::new("Why is the sky blue?", params(1)))
            .await
            .unwrap_err();

        assert!(matches!(failure.cause, RunPipelineError::InvalidGoal(_)));
        assert_eq!(failure.state, PipelineState::GoalSet);
        assert_eq!(failure.stage, Stage::Planning);
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_generation_is_fatal() {
        let gateway = ScriptedGateway::new();
        gateway.push(AgentRole::Generation, Ok("I cannot help with that.".into()));
        let (use_case, _) = use_case(gateway);

        let failure = use_case
            .execute(RunPipelineInput::new(CAFFEINE, params(1)))
            .await
            .unwrap_err();

        assert_eq!(failure.cause, RunPipelineError::NoHypotheses);
        assert_eq!(failure.stage, Stage::Generation);
        assert_eq!(failure.research_goal, CAFFEINE);
    }

    #[tokio::test]
    async fn test_too_many_review_failures_keep_partial_results() {
        let gateway = scripted(2);
        gateway.respond(AgentRole::Reflection, |_| Err(GatewayError::Timeout));
        let (use_case, _) = use_case(gateway);

        let failure = use_case
            .execute(RunPipelineInput::new(CAFFEINE, params(1)))
            .await
            .unwrap_err();

        assert_eq!(
            failure.cause,
            RunPipelineError::TooManyFailures {
                stage: Stage::Reflection,
                failed: 2,
                total: 2,
            }
        );
        assert_eq!(failure.state, PipelineState::Reviewing);
        assert_eq!(failure.store.len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let (use_case, gateway) = use_case(scripted(3));
        let use_case = use_case.with_cancellation(token);

        let failure = use_case
            .execute(RunPipelineInput::new(CAFFEINE, params(1)))
            .await
            .unwrap_err();

        assert!(failure.is_cancelled());
        assert!(gateway.requests().is_empty());
    }

    // ==================== Result Bundle ====================

    #[derive(Default)]
    struct MemorySink {
        written: Mutex<Option<ResultBundle>>,
    }

    impl ResultSink for MemorySink {
        fn write(&self, bundle: &ResultBundle) -> Result<String, ResultSinkError> {
            *self.written.lock().unwrap() = Some(bundle.clone());
            Ok("memory://bundle".to_string())
        }
    }

    #[tokio::test]
    async fn test_result_bundle_is_written() {
        let sink = Arc::new(MemorySink::default());
        let (use_case, _) = use_case(scripted(3));
        let use_case = use_case.with_result_sink(sink.clone());

        let output = use_case
            .execute(RunPipelineInput::new(CAFFEINE, params(1)))
            .await
            .unwrap();

        assert_eq!(output.saved_to.as_deref(), Some("memory://bundle"));
        let bundle = sink.written.lock().unwrap().clone().unwrap();
        assert_eq!(bundle.research_goal, CAFFEINE);
        assert_eq!(bundle.hypotheses.initial.len(), 3);
        assert_eq!(bundle.hypotheses.ranked.len(), output.ranked.len());
        assert_eq!(bundle.configuration.iterations, 1);
        assert_eq!(bundle.meta.model, bundle.configuration.model);
    }
}
