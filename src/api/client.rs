use chrono::NaiveDate;
use reqwest::Client;

use crate::api::types::{RawScheduleEvent, ScheduleResponse};
use crate::config::SessionToken;
use crate::error::{Result, check_api_response};
use crate::logging::{log_request, log_response};

/// Client for the platform's schedule endpoint
#[derive(Clone)]
pub struct ScheduleClient {
    client: Client,
    base_url: String,
}

impl ScheduleClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a student's schedule events for an inclusive date range.
    /// One request per visible-range change; no retry.
    pub async fn list_events(
        &self,
        session: Option<&SessionToken>,
        student_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawScheduleEvent>> {
        let url = format!(
            "{}/students/{}/schedule",
            self.base_url,
            urlencoding::encode(student_id)
        );

        let mut request = self.client.get(&url).query(&[
            ("from", from.to_string().as_str()),
            ("to", to.to_string().as_str()),
        ]);

        if let Some(session) = session {
            request = request.bearer_auth(&session.token);
        }

        log_request("GET", &url);
        let response = request.send().await?;
        log_response(response.status().as_u16(), &url);

        let body = check_api_response(response, "Schedule fetch").await?;
        let parsed: ScheduleResponse = serde_json::from_str(&body)?;
        Ok(parsed.items.unwrap_or_default())
    }
}
