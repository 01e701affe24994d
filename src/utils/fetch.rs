use std::collections::BTreeMap;
use std::future::Future;
use futures::future::join_all;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::{json, Value};
use crate::config::Settings;
use crate::error::ResultError;
use crate::models::AcademicRecord;
use crate::utils::parser;
use crate::utils::range::{expand, MAX_BATCH};

/// Fetches the raw response for one identifier from the result service.
pub trait ResultSource {
    fn fetch_raw(&self, identifier: &str, source_url: &str) -> impl Future<Output = Result<Value, ResultError>> + Send;
}

/// The result service over HTTP: `POST {base}/single-post` with `{"usn", "index_url"}`.
pub struct HttpResultSource {
    client: Client,
    endpoint: String,
}

impl HttpResultSource {
    pub fn new(settings: &Settings) -> Result<Self, ResultError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(HttpResultSource { client, endpoint: settings.endpoint() })
    }
}

impl ResultSource for HttpResultSource {
    async fn fetch_raw(&self, identifier: &str, source_url: &str) -> Result<Value, ResultError> {
        debug!("POST {} for {}", self.endpoint, identifier);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "usn": identifier, "index_url": source_url }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResultError::Status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("").to_string(),
            ));
        }

        let body = response.text().await?;
        decode_body(&body)
    }
}

// JSON bodies are decoded as-is; a non-JSON body is accepted only when it is itself markup.
fn decode_body(body: &str) -> Result<Value, ResultError> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(_) if body.trim_start().starts_with('<') => Ok(Value::String(body.to_string())),
        Err(e) => Err(ResultError::Malformed(format!("response is neither JSON nor HTML ({})", e))),
    }
}

/// Reduces a service response to the HTML page for `identifier`.
///
/// Accepted shapes: `{"<identifier>": "<html>"}`, `{"html": "<html>"}` or a bare string.
pub fn normalize_payload(payload: &Value, identifier: &str) -> Result<String, ResultError> {
    let html = match payload {
        Value::String(html) => Some(html.as_str()),
        Value::Object(map) => {
            // A blank page under the identifier key does not shadow a usable `html` entry.
            let keyed = map.get(identifier).and_then(Value::as_str);
            keyed
                .filter(|html| !html.trim().is_empty())
                .or_else(|| map.get("html").and_then(Value::as_str))
                .or(keyed)
        }
        _ => None,
    };
    non_empty(html, payload, identifier)
}

// Single lookups also take the first entry of an object when none of the usual keys match.
fn normalize_lenient(payload: &Value, identifier: &str) -> Result<String, ResultError> {
    if let Ok(html) = normalize_payload(payload, identifier) {
        return Ok(html);
    }
    let html = payload
        .as_object()
        .and_then(|map| map.values().next())
        .and_then(|first| first.as_str().or_else(|| first.get("html").and_then(Value::as_str)));
    non_empty(html, payload, identifier)
}

fn non_empty(html: Option<&str>, payload: &Value, identifier: &str) -> Result<String, ResultError> {
    match html {
        Some(html) if !html.trim().is_empty() => Ok(html.to_string()),
        Some(_) => Err(ResultError::EmptyHtml(identifier.to_string())),
        None => Err(ResultError::Malformed(describe(payload))),
    }
}

fn describe(payload: &Value) -> String {
    match payload {
        Value::Object(map) => format!("object with keys [{}]", map.keys().cloned().collect::<Vec<_>>().join(", ")),
        Value::Null => "null".to_string(),
        Value::Array(_) => "array".to_string(),
        other => format!("unexpected value {}", other),
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ResultError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ResultError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Fetches the result page for one identifier. Every failure is returned to the caller.
pub async fn fetch_single<S: ResultSource>(source: &S, identifier: &str, source_url: &str) -> Result<String, ResultError> {
    let identifier = required(identifier, "USN")?.to_uppercase();
    let source_url = required(source_url, "Index URL")?;

    let payload = source.fetch_raw(&identifier, source_url).await?;
    let html = normalize_lenient(&payload, &identifier)?;
    info!("Fetched result page for {} ({} bytes)", identifier, html.len());
    Ok(html)
}

/// Fetches and extracts the record for one identifier.
pub async fn fetch_record<S: ResultSource>(source: &S, identifier: &str, source_url: &str) -> Result<AcademicRecord, ResultError> {
    let html = fetch_single(source, identifier, source_url).await?;
    parser::extract(&html, &identifier.trim().to_uppercase())
}

/// What a batch asked for and what came back.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub requested: Vec<String>,
    pub pages: BTreeMap<String, String>,
}

impl BatchReport {
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.requested
            .iter()
            .filter(|id| !self.pages.contains_key(*id))
            .map(String::as_str)
    }
}

/// Fetches every identifier of `start..=end` concurrently and keeps the pages that arrived.
///
/// Individual failures are logged and dropped. Errors are only returned for an invalid request,
/// a range larger than [`MAX_BATCH`], or when no identifier produced a page.
pub async fn fetch_batch_report<S: ResultSource + Sync>(
    source: &S,
    start_identifier: &str,
    end_identifier: &str,
    source_url: &str,
) -> Result<BatchReport, ResultError> {
    let source_url = required(source_url, "Index URL")?;
    let start = required(start_identifier, "Start USN")?;
    let end = required(end_identifier, "End USN")?;

    let expansion = expand(start, end);
    if expansion.is_fallback() {
        warn!("Could not auto-generate range {}..{}, using only start and end", start, end);
    }
    if expansion.len() > MAX_BATCH {
        return Err(ResultError::RangeTooLarge { requested: expansion.len(), cap: MAX_BATCH });
    }
    let requested = expansion.to_vec();
    info!("Fetching {} results", requested.len());

    let settled = join_all(requested.iter().map(|id| async move {
        let outcome = match source.fetch_raw(id, source_url).await {
            Ok(payload) => normalize_payload(&payload, id),
            Err(e) => Err(e),
        };
        (id, outcome)
    }))
    .await;

    let mut pages = BTreeMap::new();
    for (id, outcome) in settled {
        match outcome {
            Ok(html) => {
                pages.insert(id.clone(), html);
            }
            Err(e) => warn!("Failed to fetch for {}: {}", id, e),
        }
    }

    if pages.is_empty() {
        return Err(ResultError::NoResults);
    }
    info!("Fetched {} of {} results", pages.len(), requested.len());
    Ok(BatchReport { requested, pages })
}

/// Like [`fetch_batch_report`], returning only the identifier-to-page map.
pub async fn fetch_batch<S: ResultSource + Sync>(
    source: &S,
    start_identifier: &str,
    end_identifier: &str,
    source_url: &str,
) -> Result<BTreeMap<String, String>, ResultError> {
    Ok(fetch_batch_report(source, start_identifier, end_identifier, source_url).await?.pages)
}
