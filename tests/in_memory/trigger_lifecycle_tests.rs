//! Trigger edits and cascade deletes on tasks created through the saga.

use std::sync::Arc;

use geotask::{
    location::{
        adapters::memory::InMemoryTriggerStore,
        domain::{Coordinate, GeofenceSpec, TriggerKind},
        services::GeofenceTriggerManager,
    },
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::TaskDraft,
        ports::TaskStore,
        services::{LocationTriggerRequest, TaskLocationOrchestrator, TaskWithTrigger},
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestOrchestrator =
    TaskLocationOrchestrator<InMemoryTaskStore, InMemoryTriggerStore, DefaultClock>;

const MISSION_DISTRICT: Coordinate = Coordinate::new(37.7599, -122.4148);

struct Harness {
    tasks: Arc<InMemoryTaskStore>,
    triggers: Arc<InMemoryTriggerStore>,
    orchestrator: TestOrchestrator,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskStore::new());
    let triggers = Arc::new(InMemoryTriggerStore::new());
    let orchestrator = TaskLocationOrchestrator::new(
        Arc::clone(&tasks),
        GeofenceTriggerManager::new(Arc::clone(&triggers)),
        Arc::new(DefaultClock),
    );
    Harness {
        tasks,
        triggers,
        orchestrator,
    }
}

async fn saved_task(harness: &Harness) -> Result<TaskWithTrigger, eyre::Report> {
    let request = LocationTriggerRequest::new(MISSION_DISTRICT, 400.0, TriggerKind::Exit)
        .with_label("Mission");
    Ok(harness
        .orchestrator
        .create_task_with_trigger(&TaskDraft::new("Return library books")?, request)
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edited_geofence_keeps_trigger_binding(harness: Harness) -> Result<(), eyre::Report> {
    let saved = saved_task(&harness).await?;
    let manager = harness.orchestrator.triggers();
    let edit = GeofenceSpec::new(
        "Mission library",
        Coordinate::new(37.7644, -122.4196),
        120.0,
        TriggerKind::Enter,
        &DefaultClock,
    );

    manager.update_geofence(saved.trigger.id(), edit).await?;
    manager.toggle_enabled(saved.trigger.id()).await?;

    let stored = manager
        .find_trigger(saved.trigger.id())
        .await?
        .ok_or_else(|| eyre::eyre!("trigger should still exist"))?;
    eyre::ensure!(stored.task_id() == saved.task.id(), "trigger lost its task");
    eyre::ensure!(stored.geofence().name() == "Mission library", "name not updated");
    eyre::ensure!(
        stored.geofence().trigger_kind() == TriggerKind::Enter,
        "kind not updated"
    );
    eyre::ensure!(!stored.is_enabled(), "toggle should disable the trigger");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_one_task_keeps_other_triggers(harness: Harness) -> Result<(), eyre::Report> {
    let first = saved_task(&harness).await?;
    let second = saved_task(&harness).await?;

    let removed = harness
        .orchestrator
        .delete_task_with_triggers(first.task.id())
        .await?;

    eyre::ensure!(removed == 1, "expected one trigger removed, found {removed}");
    eyre::ensure!(
        harness.tasks.find_by_id(first.task.id()).await?.is_none(),
        "deleted task should be gone"
    );
    eyre::ensure!(
        harness.tasks.find_by_id(second.task.id()).await?.is_some(),
        "other task should remain"
    );
    eyre::ensure!(harness.triggers.len()? == 1, "other trigger should remain");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_trigger_twice_succeeds(harness: Harness) -> Result<(), eyre::Report> {
    let saved = saved_task(&harness).await?;
    let manager = harness.orchestrator.triggers();

    manager.remove_trigger(saved.trigger.id()).await?;
    manager.remove_trigger(saved.trigger.id()).await?;

    eyre::ensure!(harness.triggers.is_empty()?, "trigger should be removed");
    eyre::ensure!(
        harness.tasks.find_by_id(saved.task.id()).await?.is_some(),
        "removing a trigger keeps its task"
    );
    Ok(())
}
