//! Display names for triggers created without an explicit label.

use crate::location::validation::looks_like_coordinate_pair;
use crate::task::domain::TaskTitle;

/// Qualifier appended to a task title when nothing better names the place.
pub const TITLE_QUALIFIER: &str = "location";

/// Name used when no other source is available.
pub const FALLBACK_TRIGGER_NAME: &str = "Selected location";

/// Sources a trigger name can be derived from, most preferred first.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerNameSources<'a> {
    /// Label chosen by the user.
    pub label: Option<&'a str>,
    /// Address resolved by reverse geocoding.
    pub resolved_address: Option<&'a str>,
    /// Free text the user searched for.
    pub search_query: Option<&'a str>,
    /// Title of the owning task.
    pub task_title: Option<&'a TaskTitle>,
}

/// Picks the display name for a trigger.
///
/// An explicit label wins. Otherwise the resolved address, then the search
/// query unless it is a raw coordinate pair, then the task title with
/// [`TITLE_QUALIFIER`], then [`FALLBACK_TRIGGER_NAME`].
#[must_use]
pub fn trigger_display_name(sources: TriggerNameSources<'_>) -> String {
    if let Some(label) = non_blank(sources.label) {
        return label.to_owned();
    }
    if let Some(address) = non_blank(sources.resolved_address) {
        return address.to_owned();
    }
    if let Some(query) =
        non_blank(sources.search_query).filter(|query| !looks_like_coordinate_pair(query))
    {
        return query.to_owned();
    }
    sources.task_title.map_or_else(
        || FALLBACK_TRIGGER_NAME.to_owned(),
        |title| format!("{title} {TITLE_QUALIFIER}"),
    )
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}
