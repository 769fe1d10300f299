//! Then steps for task location trigger BDD scenarios.

use super::world::{TriggerWorld, run_async};
use geotask::{
    location::{
        domain::{LocationValidationError, TriggerKind},
        services::GeofenceTriggerError,
    },
    task::{
        ports::TaskStore,
        services::{TaskLocationError, TaskWithTrigger},
    },
};
use rstest_bdd_macros::then;
use std::cmp::Ordering;

fn saved(world: &TriggerWorld) -> Result<&TaskWithTrigger, eyre::Report> {
    world
        .last_save_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing save result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected save failure: {err}"))
}

fn save_error(world: &TriggerWorld) -> Result<&TaskLocationError, eyre::Report> {
    match world.last_save_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(_)) => Err(eyre::eyre!("expected the save to fail, but it succeeded")),
        None => Err(eyre::eyre!("missing save result in scenario world")),
    }
}

#[then("the task exists in the task store")]
fn task_exists(world: &TriggerWorld) -> Result<(), eyre::Report> {
    let saved = saved(world)?;
    let stored = run_async(world.tasks.find_by_id(saved.task.id()))
        .map_err(|err| eyre::eyre!("task lookup failed: {err}"))?;
    eyre::ensure!(
        stored.as_ref() == Some(&saved.task),
        "stored task does not match saved task"
    );
    Ok(())
}

#[then(r#"one "{kind}" trigger of {radius} metres is attached to the task"#)]
fn one_trigger_attached(
    world: &TriggerWorld,
    kind: TriggerKind,
    radius: f64,
) -> Result<(), eyre::Report> {
    let saved = saved(world)?;
    let attached = run_async(world.orchestrator.triggers().triggers_for_task(saved.task.id()))
        .map_err(|err| eyre::eyre!("trigger lookup failed: {err}"))?;
    let [trigger] = attached.as_slice() else {
        return Err(eyre::eyre!("expected one trigger, found {}", attached.len()));
    };

    let geofence = trigger.geofence();
    eyre::ensure!(
        geofence.trigger_kind() == kind,
        "expected {kind} trigger, found {}",
        geofence.trigger_kind()
    );
    eyre::ensure!(
        geofence.radius_meters().partial_cmp(&radius) == Some(Ordering::Equal),
        "expected radius {radius}, found {}",
        geofence.radius_meters()
    );
    eyre::ensure!(trigger.is_enabled(), "expected the trigger to be enabled");
    Ok(())
}

#[then("the save fails with a trigger error")]
fn save_fails_with_trigger_error(world: &TriggerWorld) -> Result<(), eyre::Report> {
    let err = save_error(world)?;
    eyre::ensure!(
        matches!(
            err,
            TaskLocationError::Trigger {
                source: GeofenceTriggerError::Store(_),
                ..
            }
        ),
        "expected a trigger store error, found {err}"
    );
    Ok(())
}

#[then("no rollback failure is reported")]
fn no_rollback_failure(world: &TriggerWorld) -> Result<(), eyre::Report> {
    let err = save_error(world)?;
    eyre::ensure!(
        err.rollback_failure().is_none(),
        "unexpected rollback failure reported"
    );
    Ok(())
}

#[then("the rollback failure names the task delete")]
fn rollback_failure_names_task_delete(world: &TriggerWorld) -> Result<(), eyre::Report> {
    let rollback = save_error(world)?
        .rollback_failure()
        .ok_or_else(|| eyre::eyre!("expected a rollback failure"))?;
    let steps: Vec<&str> = rollback
        .failures()
        .iter()
        .map(|failure| failure.step())
        .collect();
    eyre::ensure!(
        steps == ["delete created task"],
        "unexpected failed compensations: {steps:?}"
    );
    Ok(())
}

#[then("the save fails with an invalid radius error")]
fn save_fails_with_invalid_radius(world: &TriggerWorld) -> Result<(), eyre::Report> {
    let err = save_error(world)?;
    eyre::ensure!(
        matches!(
            err,
            TaskLocationError::Validation(LocationValidationError::InvalidRadius(_))
        ),
        "expected an invalid radius error, found {err}"
    );
    Ok(())
}

#[then("the task store is empty")]
fn task_store_empty(world: &TriggerWorld) -> Result<(), eyre::Report> {
    let empty = world
        .tasks
        .is_empty()
        .map_err(|err| eyre::eyre!("task store unreadable: {err}"))?;
    eyre::ensure!(empty, "expected no tasks to remain");
    Ok(())
}

#[then("the trigger store is empty")]
fn trigger_store_empty(world: &TriggerWorld) -> Result<(), eyre::Report> {
    let empty = world
        .triggers
        .is_empty()
        .map_err(|err| eyre::eyre!("trigger store unreadable: {err}"))?;
    eyre::ensure!(empty, "expected no triggers to remain");
    Ok(())
}
