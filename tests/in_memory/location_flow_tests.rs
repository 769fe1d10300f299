//! Location selection flows ending in a saved task with a trigger.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use geotask::{
    location::{
        adapters::{InMemoryLocationProvider, memory::InMemoryTriggerStore},
        config::{CurrentLocationConfig, LocationSearchConfig},
        domain::{Coordinate, LocationSample, PermissionState, TriggerKind},
        services::{
            CurrentLocationService, GeofenceTriggerManager, LocationSearchCoordinator,
            PermissionStateMachine, PromptPolicy,
        },
    },
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{TaskDraft, TaskId},
        services::{LocationTriggerRequest, TaskLocationOrchestrator},
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

const FERRY_BUILDING: Coordinate = Coordinate::new(37.7955, -122.3937);

type TestOrchestrator =
    TaskLocationOrchestrator<InMemoryTaskStore, InMemoryTriggerStore, DefaultClock>;

#[fixture]
fn orchestrator() -> TestOrchestrator {
    TaskLocationOrchestrator::new(
        Arc::new(InMemoryTaskStore::new()),
        GeofenceTriggerManager::new(Arc::new(InMemoryTriggerStore::new())),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn searched_place_becomes_trigger_named_after_query(
    orchestrator: TestOrchestrator,
) -> Result<(), eyre::Report> {
    let provider = Arc::new(InMemoryLocationProvider::new());
    provider.script_forward(
        "Ferry Building",
        Ok(Some(LocationSample::new(FERRY_BUILDING, Utc::now()))),
    );
    let search =
        LocationSearchCoordinator::new(Arc::clone(&provider), LocationSearchConfig::default());

    search.on_query_changed("Ferry");
    tokio::time::sleep(Duration::from_millis(50)).await;
    search.on_query_changed("Ferry Building");
    let mut updates = search.subscribe();
    let snapshot = updates.wait_for(|snapshot| !snapshot.pending).await?.clone();
    let sample = snapshot
        .result
        .ok_or_else(|| eyre::eyre!("search should produce a location"))?;

    let request = LocationTriggerRequest::from_sample(&sample, 250.0, TriggerKind::Both)
        .with_search_query(snapshot.query);
    let saved = orchestrator
        .create_task_with_trigger(&TaskDraft::new("Buy bread")?, request)
        .await?;

    eyre::ensure!(
        saved.trigger.geofence().name() == "Ferry Building",
        "unexpected trigger name {}",
        saved.trigger.geofence().name()
    );
    eyre::ensure!(
        saved.trigger.geofence().coordinate() == &FERRY_BUILDING,
        "trigger should be centred on the search result"
    );
    eyre::ensure!(
        provider.forward_queries() == ["Ferry Building"],
        "expected a single debounced lookup"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn current_location_becomes_trigger_named_after_address(
    orchestrator: TestOrchestrator,
) -> Result<(), eyre::Report> {
    let provider = Arc::new(InMemoryLocationProvider::new());
    provider.set_prompt_outcome(PermissionState::WhileInUse);
    provider.set_position(Ok(LocationSample::new(FERRY_BUILDING, Utc::now())));
    provider.script_reverse(
        &FERRY_BUILDING,
        Ok(Some("1 Ferry Building, San Francisco".to_owned())),
    );
    let permissions = Arc::new(PermissionStateMachine::new(Arc::clone(&provider)));
    let current = CurrentLocationService::new(
        Arc::clone(&provider),
        Arc::clone(&permissions),
        CurrentLocationConfig::default(),
    );

    let sample = current.resolve(PromptPolicy::IfPromptable).await?;
    let saved = orchestrator
        .create_task_with_trigger(
            &TaskDraft::new("Buy bread")?,
            LocationTriggerRequest::from_sample(&sample, 100.0, TriggerKind::Enter),
        )
        .await?;

    eyre::ensure!(permissions.has_access(), "permission should be granted");
    eyre::ensure!(
        saved.trigger.geofence().name() == "1 Ferry Building, San Francisco",
        "unexpected trigger name {}",
        saved.trigger.geofence().name()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn denied_permission_stops_before_any_write(
    orchestrator: TestOrchestrator,
) -> Result<(), eyre::Report> {
    let provider = Arc::new(InMemoryLocationProvider::new());
    provider.set_permission(PermissionState::DeniedForever);
    let current = CurrentLocationService::new(
        Arc::clone(&provider),
        Arc::new(PermissionStateMachine::new(Arc::clone(&provider))),
        CurrentLocationConfig::default(),
    );

    let result = current.resolve(PromptPolicy::IfPromptable).await;

    eyre::ensure!(result.is_err(), "resolving without permission should fail");
    eyre::ensure!(
        provider.permission_prompts() == 0,
        "no prompt should be shown after a permanent denial"
    );
    let triggers = orchestrator
        .triggers()
        .triggers_for_task(TaskId::new())
        .await?;
    eyre::ensure!(triggers.is_empty(), "no trigger should exist");
    Ok(())
}
