use serde::{Deserialize, Serialize};

/// A schedule event as the platform API returns it. Dates are "DD/MM/YYYY"
/// strings and `time` is "HH:MM" or "HH:MM-HH:MM"; nothing here is validated
/// yet, that happens in `model::ScheduleEvent::from_raw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleEvent {
    pub title: String,
    pub due_date: String,
    pub end_date: Option<String>,
    pub time: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
}

/// Response from the schedule listing endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub items: Option<Vec<RawScheduleEvent>>,
}
