//! Application services that write tasks together with location triggers.

mod location_trigger;
mod naming;
mod saga;

pub use location_trigger::{
    LocationTriggerRequest, TaskLocationError, TaskLocationOrchestrator, TaskLocationResult,
    TaskWithTrigger,
};
pub use naming::{
    FALLBACK_TRIGGER_NAME, TITLE_QUALIFIER, TriggerNameSources, trigger_display_name,
};
pub use saga::{CompensationError, CompensationLog, RollbackFailure};
