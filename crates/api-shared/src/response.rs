use serde::Serialize;
use utoipa::ToSchema;

/// Uniform response returned by every score calculation.
///
/// `result` is usually a number (the total score or computed value) but a few
/// calculators return a structured breakdown instead, so it is kept as raw
/// JSON.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreResponse {
    /// Numeric result or structured breakdown.
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
    /// Unit of `result` ("points", "%", "mg/dL", ...).
    pub unit: String,
    /// Clinical guidance for the computed value.
    pub interpretation: String,
    /// Canonical bucket label, e.g. "Class II" or "High Risk".
    pub stage: String,
    /// One-line description of the bucket.
    pub stage_description: String,
}

/// Catalog entry describing one available calculator.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreInfo {
    /// Stable identifier, also the request path segment.
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
}

/// Response of the catalog listing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreListRes {
    pub scores: Vec<ScoreInfo>,
    pub total: usize,
}

/// Error body returned for validation failures and unknown scores.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error class ("ValidationError", "ScoreNotFound").
    pub error: String,
    /// Human-readable message naming the offending field and allowed range.
    pub message: String,
    /// The offending request field, when a single one can be blamed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
