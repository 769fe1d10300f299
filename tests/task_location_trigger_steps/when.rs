//! When steps for task location trigger BDD scenarios.

use super::world::{TriggerWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the task is saved with its location trigger")]
fn save_task_with_trigger(world: &mut TriggerWorld) -> Result<(), eyre::Report> {
    let (draft, request) = world.pending()?;
    let result = run_async(world.orchestrator.create_task_with_trigger(&draft, request));
    if let Ok(saved) = &result {
        world.last_saved = Some(saved.clone());
    }
    world.last_save_result = Some(result);
    Ok(())
}

#[when("the task is deleted with its triggers")]
fn delete_task_with_triggers(world: &mut TriggerWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .last_saved
        .as_ref()
        .map(|saved| saved.task.id())
        .ok_or_else(|| eyre::eyre!("missing saved task in scenario world"))?;
    let removed = run_async(world.orchestrator.delete_task_with_triggers(task_id))
        .wrap_err("delete task with triggers")?;
    eyre::ensure!(removed == 1, "expected one trigger removed, found {removed}");
    Ok(())
}
