//! Built-in activity tools for the agent.
//!
//! Provides the four tools the model can call (`get_location`,
//! `get_current_weather`, `search_local_events`,
//! `get_time_based_suggestions`). Each tool is constructed via
//! [`AgentTool::new`] and returned as `Arc<dyn Tool>`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use outing::config::OutingConfig;
//! use outing::tools::builtin::{all_tools, AcceptDetected};
//!
//! let tools = all_tools(&OutingConfig::from_env(), Arc::new(AcceptDetected));
//! assert_eq!(tools.len(), 4);
//! ```

use std::sync::Arc;

use chrono::Timelike;
use tracing::warn;

use crate::config::OutingConfig;
use crate::error::OutingError;
use crate::provider::http::shared_client;
use crate::tools::tool::{AgentTool, Tool, ToolExecutionContext};
use crate::tools::types::AgentToolParameters;

const IPAPI_BASE_URL: &str = "https://ipapi.co";
const IPINFO_BASE_URL: &str = "https://ipinfo.io";
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";
const TICKETMASTER_BASE_URL: &str = "https://app.ticketmaster.com";

// ipapi.co rejects requests with a default library user agent.
const LOCATION_USER_AGENT: &str = "curl/7.64.1";

const MAX_EVENTS: usize = 5;

/// Answer to the location confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationAnswer {
    /// The detected city is correct.
    Confirmed,
    /// The user supplied a different city.
    Corrected(String),
}

/// Console interaction seam for the `get_location` tool.
pub trait LocationPrompt: Send + Sync {
    /// Ask whether the detected city is correct, returning either a
    /// confirmation or the corrected city name.
    fn confirm_city(&self, detected: Option<&str>) -> Result<LocationAnswer, OutingError>;
}

/// Interactive prompt reading answers from stdin.
pub struct StdinPrompt;

impl LocationPrompt for StdinPrompt {
    fn confirm_city(&self, detected: Option<&str>) -> Result<LocationAnswer, OutingError> {
        use std::io::{BufRead, Write};

        let city = detected.unwrap_or("unknown");
        print!("Is {city} your correct location? (Y/N) ");
        std::io::stdout().flush()?;

        let stdin = std::io::stdin();
        let mut answer = String::new();
        stdin.lock().read_line(&mut answer)?;

        if answer.trim().eq_ignore_ascii_case("y") {
            return Ok(LocationAnswer::Confirmed);
        }

        print!("Please enter your correct city: ");
        std::io::stdout().flush()?;
        let mut corrected = String::new();
        stdin.lock().read_line(&mut corrected)?;
        Ok(LocationAnswer::Corrected(corrected.trim().to_string()))
    }
}

/// Non-interactive prompt that accepts the detected city as-is.
pub struct AcceptDetected;

impl LocationPrompt for AcceptDetected {
    fn confirm_city(&self, _detected: Option<&str>) -> Result<LocationAnswer, OutingError> {
        Ok(LocationAnswer::Confirmed)
    }
}

async fn fetch_json(url: &str, user_agent: Option<&str>) -> Result<serde_json::Value, OutingError> {
    let mut req = shared_client().get(url);
    if let Some(ua) = user_agent {
        req = req.header(reqwest::header::USER_AGENT, ua);
    }
    let resp = req.send().await?.error_for_status()?;
    Ok(resp.json().await?)
}

/// Create the `get_location` tool — IP geolocation with a console
/// confirmation step.
///
/// Queries the primary endpoint first and falls back to the secondary one on
/// failure; when both fail the tool errors out, which aborts the run. The
/// detected city is confirmed (or corrected) through the given prompt.
pub fn get_location_tool(config: &OutingConfig, prompt: Arc<dyn LocationPrompt>) -> Arc<dyn Tool> {
    let primary = config
        .get_base_url("ipapi")
        .unwrap_or_else(|| IPAPI_BASE_URL.to_string());
    let fallback = config
        .get_base_url("ipinfo")
        .unwrap_or_else(|| IPINFO_BASE_URL.to_string());

    Arc::new(AgentTool::new(
        "get_location",
        "Get the user's location based on their IP address",
        AgentToolParameters::empty(),
        move |_args, _ctx: ToolExecutionContext| {
            let primary = primary.clone();
            let fallback = fallback.clone();
            let prompt = prompt.clone();
            async move {
                let mut payload =
                    match fetch_json(&format!("{primary}/json/"), Some(LOCATION_USER_AGENT)).await {
                        Ok(payload) => payload,
                        Err(e) => {
                            warn!(error = %e, "primary location lookup failed, trying fallback");
                            fetch_json(&format!("{fallback}/json"), None)
                                .await
                                .map_err(|e| {
                                    warn!(error = %e, "fallback location lookup failed");
                                    OutingError::tool("get_location", "unable to fetch location data")
                                })?
                        }
                    };

                let detected = payload
                    .get("city")
                    .and_then(|c| c.as_str())
                    .map(str::to_string);
                println!(
                    "Detected location: {}",
                    detected.as_deref().unwrap_or("unknown")
                );

                // The prompt blocks on stdin; keep it off the runtime threads.
                let answer = tokio::task::spawn_blocking(move || {
                    prompt.confirm_city(detected.as_deref())
                })
                .await
                .map_err(|e| OutingError::tool("get_location", e.to_string()))??;

                if let LocationAnswer::Corrected(city) = answer {
                    if let Some(obj) = payload.as_object_mut() {
                        obj.insert("city".to_string(), serde_json::Value::String(city));
                    }
                }

                Ok(payload)
            }
        },
    ))
}

/// Create the `get_current_weather` tool — open-meteo forecast lookup.
///
/// Passes the model-supplied coordinates straight through and returns the
/// JSON payload verbatim. Failures propagate as tool errors.
pub fn get_current_weather_tool(config: &OutingConfig) -> Arc<dyn Tool> {
    let base = config
        .get_base_url("open-meteo")
        .unwrap_or_else(|| OPEN_METEO_BASE_URL.to_string());

    Arc::new(AgentTool::new(
        "get_current_weather",
        "Get the current weather in a given location",
        AgentToolParameters::object()
            .string("latitude", "Latitude of the location", true)
            .string("longitude", "Longitude of the location", true)
            .build(),
        move |args, _ctx: ToolExecutionContext| {
            let base = base.clone();
            async move {
                let latitude = args.get_str("latitude")?.to_string();
                let longitude = args.get_str("longitude")?.to_string();

                let resp = shared_client()
                    .get(format!("{base}/v1/forecast"))
                    .query(&[
                        ("latitude", latitude.as_str()),
                        ("longitude", longitude.as_str()),
                        ("hourly", "apparent_temperature"),
                    ])
                    .send()
                    .await?
                    .error_for_status()
                    .map_err(|e| OutingError::tool("get_current_weather", e.to_string()))?;

                let payload: serde_json::Value = resp.json().await?;
                Ok(payload)
            }
        },
    ))
}

/// Create the `search_local_events` tool — Ticketmaster Discovery search.
///
/// Returns at most the first five events mapped to `{name, date, time,
/// venue}`. Any failure (missing key, HTTP error, malformed payload) yields
/// an empty list rather than an error.
pub fn search_local_events_tool(config: &OutingConfig) -> Arc<dyn Tool> {
    let base = config
        .get_base_url("ticketmaster")
        .unwrap_or_else(|| TICKETMASTER_BASE_URL.to_string());
    let api_key = config.get_api_key("ticketmaster");

    Arc::new(AgentTool::new(
        "search_local_events",
        "Search for local events in a given city",
        AgentToolParameters::object()
            .string("city", "The city to search for events in", true)
            .string(
                "start_date",
                "The start date for the event search (YYYY-MM-DD)",
                true,
            )
            .string(
                "end_date",
                "The end date for the event search (YYYY-MM-DD)",
                true,
            )
            .build(),
        move |args, _ctx: ToolExecutionContext| {
            let base = base.clone();
            let api_key = api_key.clone();
            async move {
                let city = args.get_str("city")?.to_string();
                let start_date = args.get_str("start_date")?;
                let end_date = args.get_str("end_date")?;

                let Some(api_key) = api_key else {
                    warn!("TICKETMASTER_API_KEY not configured; returning no events");
                    return Ok(serde_json::json!([]));
                };

                let (Some(start), Some(end)) = (
                    format_event_datetime(start_date),
                    format_event_datetime(end_date),
                ) else {
                    warn!(start_date, end_date, "unparseable event search dates");
                    return Ok(serde_json::json!([]));
                };

                let payload = match fetch_events(&base, &city, &start, &end, &api_key).await {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(error = %e, city, "event search failed");
                        return Ok(serde_json::json!([]));
                    }
                };

                let events: Vec<serde_json::Value> = payload["_embedded"]["events"]
                    .as_array()
                    .map(|events| {
                        events
                            .iter()
                            .take(MAX_EVENTS)
                            .map(|event| {
                                serde_json::json!({
                                    "name": event["name"],
                                    "date": event["dates"]["start"]["localDate"],
                                    "time": event["dates"]["start"]["localTime"],
                                    "venue": event["_embedded"]["venues"][0]["name"],
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                Ok(serde_json::Value::Array(events))
            }
        },
    ))
}

async fn fetch_events(
    base: &str,
    city: &str,
    start: &str,
    end: &str,
    api_key: &str,
) -> Result<serde_json::Value, OutingError> {
    let resp = shared_client()
        .get(format!("{base}/discovery/v2/events.json"))
        .query(&[
            ("city", city),
            ("startDateTime", start),
            ("endDateTime", end),
            ("apikey", api_key),
        ])
        .send()
        .await?
        .error_for_status()?;
    Ok(resp.json().await?)
}

/// Normalize a date to Ticketmaster's `YYYY-MM-DDTHH:MM:SSZ` format.
///
/// Accepts a bare `YYYY-MM-DD` (treated as midnight UTC) or a full RFC 3339
/// timestamp.
fn format_event_datetime(input: &str) -> Option<String> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(input) {
        return Some(
            dt.with_timezone(&chrono::Utc)
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string(),
        );
    }
    chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|d| format!("{d}T00:00:00Z"))
}

/// Create the `get_time_based_suggestions` tool — time-of-day classifier.
pub fn get_time_based_suggestions_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "get_time_based_suggestions",
        "Get activity suggestions based on the time of day",
        AgentToolParameters::object()
            .string("time", "The current time in ISO 8601 format", true)
            .build(),
        |args, _ctx: ToolExecutionContext| async move {
            let time = args.get_str("time")?;
            let hour = parse_hour(time).ok_or_else(|| {
                OutingError::InvalidArgument(format!("Unparseable time: {time}"))
            })?;
            Ok(serde_json::Value::String(
                daypart_label(hour).to_string(),
            ))
        },
    ))
}

fn parse_hour(time: &str) -> Option<u32> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(time) {
        return Some(dt.hour());
    }
    chrono::NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.hour())
}

fn daypart_label(hour: u32) -> &'static str {
    match hour {
        5..=11 => "morning activities (5 AM to 11:59 AM)",
        12..=16 => "afternoon activities (12 PM to 4:59 PM)",
        17..=20 => "evening activities (5 PM to 8:59 PM)",
        _ => "night activities (9 PM to 4:59 AM)",
    }
}

/// Return all built-in activity tools.
pub fn all_tools(config: &OutingConfig, prompt: Arc<dyn LocationPrompt>) -> Vec<Arc<dyn Tool>> {
    vec![
        get_location_tool(config, prompt),
        get_current_weather_tool(config),
        search_local_events_tool(config),
        get_time_based_suggestions_tool(),
    ]
}
