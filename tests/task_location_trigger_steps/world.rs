//! Shared world state for task location trigger BDD scenarios.

use std::sync::Arc;

use geotask::{
    location::{adapters::memory::InMemoryTriggerStore, services::GeofenceTriggerManager},
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::TaskDraft,
        services::{
            LocationTriggerRequest, TaskLocationOrchestrator, TaskLocationResult,
            TaskWithTrigger,
        },
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Orchestrator type used by the BDD world.
pub type TestOrchestrator =
    TaskLocationOrchestrator<InMemoryTaskStore, InMemoryTriggerStore, DefaultClock>;

/// Scenario world for task location trigger behaviour tests.
pub struct TriggerWorld {
    pub tasks: Arc<InMemoryTaskStore>,
    pub triggers: Arc<InMemoryTriggerStore>,
    pub orchestrator: TestOrchestrator,
    pub pending_draft: Option<TaskDraft>,
    pub pending_request: Option<LocationTriggerRequest>,
    pub last_saved: Option<TaskWithTrigger>,
    pub last_save_result: Option<TaskLocationResult<TaskWithTrigger>>,
}

impl TriggerWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskStore::new());
        let triggers = Arc::new(InMemoryTriggerStore::new());
        let orchestrator = TaskLocationOrchestrator::new(
            Arc::clone(&tasks),
            GeofenceTriggerManager::new(Arc::clone(&triggers)),
            Arc::new(DefaultClock),
        );
        Self {
            tasks,
            triggers,
            orchestrator,
            pending_draft: None,
            pending_request: None,
            last_saved: None,
            last_save_result: None,
        }
    }

    /// Returns the pending draft and request, failing when a step is missing.
    pub fn pending(&self) -> Result<(TaskDraft, LocationTriggerRequest), eyre::Report> {
        let draft = self
            .pending_draft
            .clone()
            .ok_or_else(|| eyre::eyre!("missing task draft in scenario world"))?;
        let request = self
            .pending_request
            .clone()
            .ok_or_else(|| eyre::eyre!("missing location request in scenario world"))?;
        Ok((draft, request))
    }
}

impl Default for TriggerWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TriggerWorld {
    TriggerWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
