//! Maddrey's discriminant function for alcoholic hepatitis severity.
//!
//! DF = 4.6 × (patient PT − control PT) + total bilirubin. A value of 32 or
//! more marks severe disease with poor short-term prognosis (Maddrey 1978).

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::round_to;
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "maddrey_discriminant_function",
    title: "Maddrey's Discriminant Function for Alcoholic Hepatitis",
    specialty: Specialty::Gastroenterology,
    description: "Assesses severity and steroid-treatment benefit in alcoholic hepatitis \
                  from prothrombin time and bilirubin.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaddreyRequest {
    /// Patient prothrombin time in seconds.
    pub patient_pt: f64,
    /// Laboratory control prothrombin time in seconds.
    pub control_pt: f64,
    pub total_bilirubin: f64,
}

pub fn evaluate(req: &MaddreyRequest) -> ScoreResult<ScoreResponse> {
    require_range("patient_pt", req.patient_pt, 8.0, 120.0, "seconds")?;
    require_range("control_pt", req.control_pt, 8.0, 20.0, "seconds")?;
    require_range("total_bilirubin", req.total_bilirubin, 0.1, 50.0, "mg/dL")?;

    let df = round_to(
        4.6 * (req.patient_pt - req.control_pt) + req.total_bilirubin,
        1,
    );

    let (stage, description, interpretation) = if df >= 32.0 {
        (
            "Severe",
            "Severe alcoholic hepatitis",
            format!(
                "Discriminant function {df}: Severe alcoholic hepatitis with poor short-term \
                 prognosis (one-month mortality 35-45% untreated). Corticosteroid therapy \
                 should be considered in the absence of contraindications; reassess response \
                 with the Lille model at day 7."
            ),
        )
    } else {
        (
            "Mild to Moderate",
            "Mild to moderate alcoholic hepatitis",
            format!(
                "Discriminant function {df}: Mild to moderate alcoholic hepatitis. \
                 Corticosteroids are unlikely to benefit; supportive care, alcohol \
                 abstinence, and nutritional support are the mainstays."
            ),
        )
    };

    Ok(ScoreResponse {
        result: json!(df),
        unit: "points".into(),
        interpretation,
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
