use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::{
    error::ApiResult,
    feed::paginator::{FeedError, FeedSnapshot, FetchPlan, IdentityChange, Paginator},
    feed::trigger::{SentinelId, SentinelTrigger},
    models::{Identity, RecommendationPage},
    services::recommendations::RecommendationSource,
};

const COMMAND_BUFFER: usize = 16;

#[derive(Debug)]
enum FeedCommand {
    Initialize(Identity),
    LoadMore,
}

type FetchOutcome = (u64, u32, ApiResult<RecommendationPage>);
type PendingFetch = Pin<Box<dyn Future<Output = FetchOutcome> + Send>>;

enum Wake {
    Outcome(FetchOutcome),
    Command(Option<FeedCommand>),
}

/// Consumer handle to a running recommendation feed
///
/// Spawning a feed starts one background task that owns all pagination
/// state; this handle sends it commands and observes its snapshots. The
/// sentinel trigger lives on the handle because visibility events arrive
/// from the rendering layer, not from the engine.
pub struct RecommendationFeed {
    commands: mpsc::Sender<FeedCommand>,
    snapshots: watch::Receiver<FeedSnapshot>,
    trigger: SentinelTrigger,
}

impl RecommendationFeed {
    /// Start the feed engine task.
    pub fn spawn(source: Arc<dyn RecommendationSource>, page_size: u32) -> Self {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(FeedSnapshot::default());

        let engine = FeedEngine {
            source,
            paginator: Paginator::new(page_size),
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        tokio::spawn(engine.run());

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            trigger: SentinelTrigger::new(),
        }
    }

    /// (Re)start pagination for a subject. A change of identity discards
    /// all accumulated state; passing the current identity is a no-op.
    pub async fn initialize(&self, identity: Identity) {
        self.send(FeedCommand::Initialize(identity)).await;
    }

    /// Request the next page if eligible; otherwise a no-op.
    pub async fn load_more(&self) {
        self.send(FeedCommand::LoadMore).await;
    }

    /// Current observable state.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait for the next state transition and return the new snapshot.
    pub async fn changed(&mut self) -> FeedSnapshot {
        // A closed channel means the engine task is gone; the last
        // published snapshot is still the truth.
        let _ = self.snapshots.changed().await;
        self.snapshots.borrow_and_update().clone()
    }

    /// Watch channel for callers that poll state on their own schedule.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.snapshots.clone()
    }

    /// Register the current last row for viewport observation.
    pub fn attach_sentinel(&mut self, row: SentinelId) {
        self.trigger.attach(row);
    }

    /// Report a sentinel visibility change from the rendering layer,
    /// firing load-more on a rising edge when eligible.
    pub async fn sentinel_visibility(&mut self, row: SentinelId, visible: bool) {
        let snapshot = self.snapshot();
        if self.trigger.visibility_changed(row, visible, &snapshot) {
            self.load_more().await;
        }
    }

    async fn send(&self, command: FeedCommand) {
        if self.commands.send(command).await.is_err() {
            tracing::warn!("Feed engine task is no longer running");
        }
    }
}

/// The background task driving fetches
///
/// Runs a single event loop over commands and the (at most one) pending
/// fetch, so state transitions happen in a strict serial order and the
/// pending slot is the only in-flight gate needed. When the identity
/// changes while a fetch is outstanding the replacement page-1 fetch is
/// queued until the stale one resolves, keeping "never dispatch while a
/// fetch is in flight" true even across resets.
struct FeedEngine {
    source: Arc<dyn RecommendationSource>,
    paginator: Paginator,
    commands: mpsc::Receiver<FeedCommand>,
    snapshots: watch::Sender<FeedSnapshot>,
}

impl FeedEngine {
    async fn run(mut self) {
        let mut pending: Option<PendingFetch> = None;
        let mut queued: Option<FetchPlan> = None;

        loop {
            let wake = if let Some(fetch) = pending.as_mut() {
                tokio::select! {
                    outcome = fetch.as_mut() => Wake::Outcome(outcome),
                    command = self.commands.recv() => Wake::Command(command),
                }
            } else {
                Wake::Command(self.commands.recv().await)
            };

            match wake {
                Wake::Outcome(outcome) => {
                    pending = None;
                    self.apply_outcome(outcome);
                    if let Some(plan) = queued.take() {
                        pending = Some(self.dispatch(plan));
                    }
                    self.publish();
                }
                Wake::Command(None) => break,
                Wake::Command(Some(FeedCommand::Initialize(identity))) => {
                    match self.paginator.set_identity(identity) {
                        IdentityChange::Unchanged => continue,
                        IdentityChange::Reset => queued = None,
                        IdentityChange::ResetAndFetch(plan) => {
                            if pending.is_some() {
                                // An outstanding fetch for the old identity
                                // must resolve (and be discarded as stale)
                                // before the fresh page 1 goes out.
                                queued = Some(plan);
                            } else {
                                pending = Some(self.dispatch(plan));
                            }
                        }
                    }
                    self.publish();
                }
                Wake::Command(Some(FeedCommand::LoadMore)) => {
                    // load_more never plans a fetch while one is already
                    // loading, so the pending slot is free here.
                    if let Some(plan) = self.paginator.load_more() {
                        pending = Some(self.dispatch(plan));
                        self.publish();
                    }
                }
            }
        }
    }

    fn dispatch(&self, plan: FetchPlan) -> PendingFetch {
        tracing::debug!(
            page = plan.page,
            epoch = plan.epoch,
            "Dispatching recommendation fetch"
        );
        let source = Arc::clone(&self.source);
        Box::pin(async move {
            let result = source
                .fetch_page(&plan.identity, plan.page, plan.page_size)
                .await;
            (plan.epoch, plan.page, result)
        })
    }

    fn apply_outcome(&mut self, (epoch, page, result): FetchOutcome) {
        match result {
            Ok(body) => {
                if !self.paginator.fetch_succeeded(epoch, body) {
                    tracing::debug!(page, epoch, "Discarded stale recommendation page");
                }
            }
            Err(error) => {
                tracing::warn!(page, error = %error, "Recommendation fetch failed");
                if !self.paginator.fetch_failed(epoch, FeedError::from(&error)) {
                    tracing::debug!(page, epoch, "Discarded stale fetch failure");
                }
            }
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.paginator.snapshot());
    }
}
