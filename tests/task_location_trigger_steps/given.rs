//! Given steps for task location trigger BDD scenarios.

use super::world::{TriggerWorld, run_async};
use eyre::WrapErr;
use geotask::{
    location::{
        adapters::memory::TriggerStoreOperation,
        domain::{Coordinate, TriggerKind},
    },
    task::{
        adapters::memory::TaskStoreOperation, domain::TaskDraft, services::LocationTriggerRequest,
    },
};
use rstest_bdd_macros::given;

#[given(r#"a task titled "{title}""#)]
fn task_titled(world: &mut TriggerWorld, title: String) -> Result<(), eyre::Report> {
    world.pending_draft = Some(TaskDraft::new(title).wrap_err("build task draft")?);
    Ok(())
}

#[given(
    r#"a location at {latitude}, {longitude} with radius {radius} metres triggering on "{kind}""#
)]
fn location_with_radius(
    world: &mut TriggerWorld,
    latitude: f64,
    longitude: f64,
    radius: f64,
    kind: TriggerKind,
) {
    world.pending_request = Some(LocationTriggerRequest::new(
        Coordinate::new(latitude, longitude),
        radius,
        kind,
    ));
}

#[given("the trigger store rejects inserts")]
fn trigger_store_rejects_inserts(world: &mut TriggerWorld) -> Result<(), eyre::Report> {
    world
        .triggers
        .fail(TriggerStoreOperation::Insert, "trigger store offline")
        .wrap_err("script trigger insert failure")
}

#[given("the task store rejects deletes")]
fn task_store_rejects_deletes(world: &mut TriggerWorld) -> Result<(), eyre::Report> {
    world
        .tasks
        .fail(TaskStoreOperation::Delete, "task store offline")
        .wrap_err("script task delete failure")
}

#[given("the task has been saved with its location trigger")]
fn task_already_saved(world: &mut TriggerWorld) -> Result<(), eyre::Report> {
    let (draft, request) = world.pending()?;
    let saved = run_async(world.orchestrator.create_task_with_trigger(&draft, request))
        .wrap_err("save task with trigger for setup")?;
    world.last_saved = Some(saved);
    Ok(())
}
