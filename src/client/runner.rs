//! Sequential run loop
//!
//! Drives the catalog through a [`CaseRunner`] one case at a time and
//! collects the outcomes into a [`Run`].

use async_trait::async_trait;

use crate::types::{Case, Outcome, Run};

/// Anything able to submit a single case and classify the result.
///
/// Implementations never fail: every error becomes an error [`Outcome`].
#[async_trait]
pub trait CaseRunner: Send + Sync {
    async fn run_case(&self, case: &Case, model_label: &str) -> Outcome;
}

/// Decides, between two cases, whether the run goes on.
pub trait ContinuePolicy {
    /// Called once `completed` cases are done and `next` is still pending.
    /// Returning `false` ends the run.
    fn should_continue(&mut self, completed: usize, next: &Case) -> bool;
}

/// Non-interactive policy: never stops early
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysContinue;

impl ContinuePolicy for AlwaysContinue {
    fn should_continue(&mut self, _completed: usize, _next: &Case) -> bool {
        true
    }
}

/// Progress notifications emitted by [`run_all`].
pub trait RunObserver {
    fn case_started(&mut self, _case: &Case) {}
    fn case_finished(&mut self, _case: &Case, _outcome: &Outcome) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// Run every case of `catalog` in order.
///
/// After each case except the last, `policy` is consulted; an abort keeps
/// the outcomes collected so far. No case is retried or reordered.
pub async fn run_all<R>(
    runner: &R,
    catalog: &[Case],
    model_label: &str,
    policy: &mut dyn ContinuePolicy,
    observer: &mut dyn RunObserver,
) -> Run
where
    R: CaseRunner + ?Sized,
{
    let mut run = Run::new(model_label);
    let mut cases = catalog.iter().peekable();

    while let Some(case) = cases.next() {
        observer.case_started(case);
        let outcome = runner.run_case(case, model_label).await;
        observer.case_finished(case, &outcome);
        run.push(outcome);

        if let Some(next) = cases.peek() {
            if !policy.should_continue(run.len(), next) {
                tracing::info!(
                    "Run aborted by operator after {} of {} cases",
                    run.len(),
                    catalog.len()
                );
                break;
            }
        }
    }

    tracing::info!(
        model = model_label,
        "Run finished: {} cases, {} successful",
        run.len(),
        run.success_count()
    );
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::OutcomeStatus;
    use std::sync::Mutex;

    /// Replies instantly and records every submitted case id.
    #[derive(Default)]
    struct RecordingRunner {
        seen: Mutex<Vec<u32>>,
        failing: Vec<u32>,
    }

    #[async_trait]
    impl CaseRunner for RecordingRunner {
        async fn run_case(&self, case: &Case, _model_label: &str) -> Outcome {
            self.seen.lock().unwrap().push(case.id);
            if self.failing.contains(&case.id) {
                Outcome::error(case, 0.0, "Erro: 500")
            } else {
                Outcome::success(case, 0.5, format!("resposta {}", case.id))
            }
        }
    }

    /// Aborts once `limit` cases are complete.
    struct StopAfter {
        limit: usize,
        asked: usize,
    }

    impl ContinuePolicy for StopAfter {
        fn should_continue(&mut self, completed: usize, _next: &Case) -> bool {
            self.asked += 1;
            completed < self.limit
        }
    }

    #[derive(Default)]
    struct CountingObserver {
        started: Vec<u32>,
        finished: Vec<(u32, OutcomeStatus)>,
    }

    impl RunObserver for CountingObserver {
        fn case_started(&mut self, case: &Case) {
            self.started.push(case.id);
        }
        fn case_finished(&mut self, case: &Case, outcome: &Outcome) {
            self.finished.push((case.id, outcome.status));
        }
    }

    #[tokio::test]
    async fn test_every_case_yields_one_outcome() {
        let runner = RecordingRunner::default();
        let catalog = catalog::cases();

        let run = run_all(&runner, &catalog, "llama3", &mut AlwaysContinue, &mut SilentObserver).await;

        assert_eq!(run.len(), catalog.len());
        assert_eq!(run.model_label, "llama3");
        for (case, outcome) in catalog.iter().zip(run.outcomes()) {
            assert_eq!(outcome.case_id, case.id);
            assert_eq!(outcome.label, case.label);
        }
    }

    #[tokio::test]
    async fn test_abort_after_third_case() {
        let runner = RecordingRunner::default();
        let catalog = catalog::cases();
        let mut policy = StopAfter { limit: 3, asked: 0 };

        let run = run_all(&runner, &catalog, "llama3", &mut policy, &mut SilentObserver).await;

        let ids: Vec<u32> = run.outcomes().iter().map(|o| o.case_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(*runner.seen.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(policy.asked, 3);
    }

    #[tokio::test]
    async fn test_policy_not_consulted_after_last_case() {
        let runner = RecordingRunner::default();
        let catalog = catalog::cases();
        let mut policy = StopAfter { limit: usize::MAX, asked: 0 };

        let run = run_all(&runner, &catalog, "llama3", &mut policy, &mut SilentObserver).await;

        assert_eq!(run.len(), 10);
        assert_eq!(policy.asked, 9);
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_run() {
        let runner = RecordingRunner {
            failing: vec![2, 5],
            ..Default::default()
        };
        let catalog = catalog::cases();
        let mut observer = CountingObserver::default();

        let run = run_all(&runner, &catalog, "llama3", &mut AlwaysContinue, &mut observer).await;

        assert_eq!(run.len(), 10);
        assert_eq!(run.success_count(), 8);
        assert_eq!(observer.started, (1..=10).collect::<Vec<u32>>());
        assert_eq!(observer.finished[1], (2, OutcomeStatus::Error));
        assert_eq!(observer.finished[0], (1, OutcomeStatus::Success));
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let runner = RecordingRunner::default();
        let run = run_all(&runner, &[], "llama3", &mut AlwaysContinue, &mut SilentObserver).await;
        assert!(run.is_empty());
    }
}
