//! LRINEC score for necrotizing soft tissue infection.
//!
//! Laboratory Risk Indicator for Necrotizing Fasciitis, Wong 2004. Six
//! routine labs, maximum 13 points; scores ≤5 / 6-7 / ≥8 stratify risk.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::{le, lt, pick, rest, Band};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "lrinec_score",
    title: "LRINEC Score for Necrotizing Soft Tissue Infection",
    specialty: Specialty::Emergency,
    description: "Distinguishes necrotizing fasciitis from other soft tissue infections \
                  using six routine laboratory values.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LrinecRequest {
    /// C-reactive protein, mg/L.
    pub crp: f64,
    /// White blood cell count, cells/µL.
    pub wbc: f64,
    pub hemoglobin: f64,
    pub sodium: f64,
    pub creatinine: f64,
    pub glucose: f64,
}

const WBC_POINTS: [Band<i32>; 3] = [lt(15_000.0, 0), le(25_000.0, 1), rest(2)];
const HEMOGLOBIN_POINTS: [Band<i32>; 3] = [lt(11.0, 2), le(13.5, 1), rest(0)];

pub fn evaluate(req: &LrinecRequest) -> ScoreResult<ScoreResponse> {
    require_range("crp", req.crp, 0.0, 1000.0, "mg/L")?;
    require_range("wbc", req.wbc, 0.0, 200_000.0, "cells/µL")?;
    require_range("hemoglobin", req.hemoglobin, 0.0, 25.0, "g/dL")?;
    require_range("sodium", req.sodium, 100.0, 180.0, "mEq/L")?;
    require_range("creatinine", req.creatinine, 0.0, 20.0, "mg/dL")?;
    require_range("glucose", req.glucose, 0.0, 2000.0, "mg/dL")?;

    let crp_score = if req.crp >= 150.0 { 4 } else { 0 };
    let wbc_score = *pick(req.wbc, &WBC_POINTS);
    let hemoglobin_score = *pick(req.hemoglobin, &HEMOGLOBIN_POINTS);
    let sodium_score = if req.sodium < 135.0 { 2 } else { 0 };
    let creatinine_score = if req.creatinine > 1.6 { 2 } else { 0 };
    let glucose_score = if req.glucose > 180.0 { 1 } else { 0 };

    let total =
        crp_score + wbc_score + hemoglobin_score + sodium_score + creatinine_score + glucose_score;

    let (stage, description, probability, guidance) = if total <= 5 {
        (
            "Low Risk",
            "Necrotizing fasciitis unlikely",
            "<50%",
            "Continue standard soft tissue infection management with close monitoring. Note \
             that 10% of patients with necrotizing fasciitis had scores below 6, so maintain \
             clinical suspicion if the patient deteriorates.",
        )
    } else if total <= 7 {
        (
            "Moderate Risk",
            "Intermediate probability",
            "50-75%",
            "Urgent evaluation for necrotizing fasciitis. Consider urgent surgical \
             consultation, empirical broad-spectrum antibiotics, and close monitoring for \
             systemic toxicity.",
        )
    } else {
        (
            "High Risk",
            "Necrotizing fasciitis likely",
            ">75%",
            "Immediate operative intervention strongly recommended with urgent surgical \
             consultation, broad-spectrum antibiotics, and ICU-level supportive care.",
        )
    };

    Ok(ScoreResponse {
        result: json!(total),
        unit: "points".into(),
        interpretation: format!(
            "LRINEC score {total}/13: {description} (probability {probability}). {guidance} \
             The score should supplement, not replace, clinical judgment."
        ),
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
