//! Backchain stress test workflow.
//!
//! For every depth `d` of the schedule, party A issues one unit of cash, pays
//! a unit to the notary and gets it back `d` times, then pays party B. Each
//! payment spends outputs of earlier ones, so the transaction history behind
//! party A's cash keeps growing from depth to depth. Nothing is reset between
//! depths.
//!
//! Every flow is awaited before the next one starts. The first failure ends
//! the run: a broken chain makes later timings meaningless.

use super::{DemoWorkflow, Phase, PhaseTiming, ProgressCallback, WorkflowResult};
use crate::config::{BackchainConfig, DemoConfig};
use crate::error::DemoError;
use crate::report::BackchainReport;
use crate::schedule::DepthSchedule;
use async_trait::async_trait;
use ledger_rpc::{
    close_quietly, Amount, FlowInvocation, FlowOutcome, IssueRef, RpcSession, SessionConnector,
};
use std::time::{Duration, Instant};

const STEP_ISSUE: &str = "cash issuance";
const STEP_TO_NOTARY: &str = "payment party A -> notary";
const STEP_FROM_NOTARY: &str = "payment notary -> party A";
const STEP_TO_PARTY_B: &str = "payment party A -> party B";

/// The three open sessions a run drives
pub struct BackchainSessions<'a, S> {
    pub party_a: &'a S,
    pub party_b: &'a S,
    pub notary: &'a S,
}

/// What a completed run produced
#[derive(Debug, Clone, Default)]
pub struct BackchainRun {
    pub timings: Vec<PhaseTiming>,
    pub flows_started: usize,
}

impl BackchainRun {
    fn record(
        &mut self,
        depth: u32,
        phase: Phase,
        elapsed: Duration,
        progress: Option<&ProgressCallback>,
    ) {
        tracing::info!("{}: {} took {} msec", depth, phase.label(), elapsed.as_millis());

        let timing = PhaseTiming {
            depth,
            phase,
            elapsed,
        };
        if let Some(cb) = progress {
            cb(&timing);
        }
        self.timings.push(timing);
    }
}

async fn start_flow<S: RpcSession>(
    session: &S,
    invocation: FlowInvocation,
    depth: u32,
    step: &'static str,
    run: &mut BackchainRun,
) -> Result<FlowOutcome, DemoError> {
    run.flows_started += 1;
    let outcome = session
        .start_flow(invocation)
        .await
        .map_err(|source| DemoError::BackchainAborted {
            depth,
            step,
            source,
        })?;
    tracing::debug!(depth, step, run_id = %outcome.run_id, "Flow completed");
    Ok(outcome)
}

/// Run the stress schedule against three established sessions.
///
/// Identities are resolved once up front. Per depth `d` this starts exactly
/// `1 + 2d + 1` flows: the issuance, `d` pairs of A -> notary / notary -> A
/// payments, and the A -> B payment. The creation phase timing covers only the
/// `d` pairs; the transfer phase covers only the A -> B payment.
pub async fn drive_backchain<S: RpcSession>(
    sessions: &BackchainSessions<'_, S>,
    schedule: &DepthSchedule,
    unit: Amount,
    progress: Option<&ProgressCallback>,
) -> Result<BackchainRun, DemoError> {
    let party_a = sessions.party_a.node_identity().await?;
    let party_b = sessions.party_b.node_identity().await?;
    let notary = sessions.notary.node_identity().await?;

    tracing::info!(
        party_a = %party_a,
        party_b = %party_b,
        notary = %notary,
        depths = schedule.len(),
        unit = %unit,
        "Starting backchain run"
    );

    let mut run = BackchainRun::default();

    for depth in schedule.depths() {
        let issue = FlowInvocation::cash_issue(unit, IssueRef::fresh(), &notary);
        start_flow(sessions.party_a, issue, depth, STEP_ISSUE, &mut run).await?;

        let started = Instant::now();
        for _ in 0..depth {
            let to_notary = FlowInvocation::cash_payment(unit, &notary);
            start_flow(sessions.party_a, to_notary, depth, STEP_TO_NOTARY, &mut run).await?;

            let back_to_a = FlowInvocation::cash_payment(unit, &party_a);
            start_flow(sessions.notary, back_to_a, depth, STEP_FROM_NOTARY, &mut run).await?;
        }
        run.record(depth, Phase::BackchainCreation, started.elapsed(), progress);

        let started = Instant::now();
        let to_party_b = FlowInvocation::cash_payment(unit, &party_b);
        start_flow(sessions.party_a, to_party_b, depth, STEP_TO_PARTY_B, &mut run).await?;
        run.record(depth, Phase::CrossPartyTransfer, started.elapsed(), progress);
    }

    Ok(run)
}

/// Backchain stress test workflow: opens the three sessions, drives the
/// schedule, and closes the sessions on every exit path.
pub struct BackchainWorkflow<C> {
    connector: C,
}

impl<C: SessionConnector> BackchainWorkflow<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Connect A, B and the notary in that order. Sessions already opened are
    /// closed again when a later connect fails.
    async fn open_sessions(
        &self,
        config: &BackchainConfig,
    ) -> Result<(C::Session, C::Session, C::Session), DemoError> {
        let party_a = self.connector.connect(&config.party_a).await?;

        let party_b = match self.connector.connect(&config.party_b).await {
            Ok(session) => session,
            Err(e) => {
                close_quietly(party_a).await;
                return Err(e.into());
            }
        };

        let notary = match self.connector.connect(&config.notary).await {
            Ok(session) => session,
            Err(e) => {
                close_quietly(party_a).await;
                close_quietly(party_b).await;
                return Err(e.into());
            }
        };

        Ok((party_a, party_b, notary))
    }
}

#[async_trait]
impl<C: SessionConnector> DemoWorkflow for BackchainWorkflow<C> {
    fn name(&self) -> &str {
        "Backchain Stress Test"
    }

    async fn run(
        &self,
        config: &DemoConfig,
        progress: Option<ProgressCallback>,
    ) -> Result<WorkflowResult, DemoError> {
        let start = Instant::now();
        let backchain = &config.backchain;

        tracing::info!(
            "Starting {} over depths {}..={} step {}",
            self.name(),
            backchain.schedule.start(),
            backchain.schedule.end(),
            backchain.schedule.step()
        );

        let (party_a, party_b, notary) = self.open_sessions(backchain).await?;

        let sessions = BackchainSessions {
            party_a: &party_a,
            party_b: &party_b,
            notary: &notary,
        };
        let outcome = drive_backchain(
            &sessions,
            &backchain.schedule,
            backchain.unit_amount,
            progress.as_ref(),
        )
        .await;

        close_quietly(party_a).await;
        close_quietly(party_b).await;
        close_quietly(notary).await;

        let run = outcome?;
        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "{} completed: {} flows in {}ms",
            self.name(),
            run.flows_started,
            duration_ms
        );

        let mut result =
            WorkflowResult::new(duration_ms, run.flows_started).with_timings(run.timings);

        if let Some(dir) = &config.report_dir {
            let report = BackchainReport::new(&backchain.schedule, &result);
            match report.write_to_dir(dir) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "Timing report written");
                    result.report_path = Some(path);
                }
                Err(e) => tracing::warn!("Failed to write timing report: {}", e),
            }
        }

        Ok(result)
    }
}
