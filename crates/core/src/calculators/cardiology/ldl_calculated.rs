//! Calculated LDL cholesterol via the Friedewald formula.
//!
//! LDL = total cholesterol − HDL − triglycerides/5 (all mg/dL). The formula
//! is unreliable above 400 mg/dL triglycerides, which the interpretation
//! calls out rather than refusing the calculation.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::{lt, pick, rest, round_to, stage, Band, Stage};
use crate::error::{ScoreError, ScoreResult};
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "ldl_calculated",
    title: "LDL Cholesterol Calculated (Friedewald Formula)",
    specialty: Specialty::Cardiology,
    description: "Estimates LDL cholesterol from a standard fasting lipid panel using the \
                  Friedewald formula, with NCEP ATP III category staging.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LdlRequest {
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    pub triglycerides: f64,
}

/// NCEP ATP III categories.
const LDL_STAGES: [Band<Stage>; 5] = [
    lt(100.0, stage("Optimal", "Optimal LDL cholesterol")),
    lt(
        130.0,
        stage("Near Optimal", "Near optimal/above optimal LDL cholesterol"),
    ),
    lt(160.0, stage("Borderline High", "Borderline high LDL cholesterol")),
    lt(190.0, stage("High", "High LDL cholesterol")),
    rest(stage("Very High", "Very high LDL cholesterol")),
];

pub fn evaluate(req: &LdlRequest) -> ScoreResult<ScoreResponse> {
    require_range("total_cholesterol", req.total_cholesterol, 50.0, 1000.0, "mg/dL")?;
    require_range("hdl_cholesterol", req.hdl_cholesterol, 10.0, 200.0, "mg/dL")?;
    require_range("triglycerides", req.triglycerides, 30.0, 5000.0, "mg/dL")?;

    if req.hdl_cholesterol >= req.total_cholesterol {
        return Err(ScoreError::InvalidInput(
            "HDL cholesterol cannot be greater than or equal to total cholesterol".into(),
        ));
    }

    let ldl = round_to(
        req.total_cholesterol - req.hdl_cholesterol - req.triglycerides / 5.0,
        1,
    );
    let bucket = pick(ldl, &LDL_STAGES);

    let mut interpretation = format!(
        "Calculated LDL cholesterol {ldl} mg/dL: {}.",
        bucket.description
    );
    if req.triglycerides > 400.0 {
        interpretation.push_str(
            " Triglycerides exceed 400 mg/dL, where the Friedewald formula is inaccurate; \
             direct LDL measurement is recommended.",
        );
    } else if req.triglycerides < 100.0 {
        interpretation
            .push_str(" Triglycerides below 100 mg/dL may cause the formula to underestimate LDL.");
    }

    Ok(ScoreResponse {
        result: json!(ldl),
        unit: "mg/dL".into(),
        interpretation,
        stage: bucket.stage.into(),
        stage_description: bucket.description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friedewald_formula() {
        let res = evaluate(&LdlRequest {
            total_cholesterol: 200.0,
            hdl_cholesterol: 50.0,
            triglycerides: 150.0,
        })
        .unwrap();
        assert_eq!(res.result, json!(120.0));
        assert_eq!(res.stage, "Near Optimal");
    }

    #[test]
    fn test_stage_boundaries() {
        // LDL of exactly 190 is Very High, 189.9 is High
        let res = evaluate(&LdlRequest {
            total_cholesterol: 280.0,
            hdl_cholesterol: 40.0,
            triglycerides: 250.0,
        })
        .unwrap();
        assert_eq!(res.result, json!(190.0));
        assert_eq!(res.stage, "Very High");
    }

    #[test]
    fn test_rejects_hdl_at_or_above_total() {
        let err = evaluate(&LdlRequest {
            total_cholesterol: 100.0,
            hdl_cholesterol: 100.0,
            triglycerides: 150.0,
        })
        .unwrap_err();
        assert!(matches!(err, ScoreError::InvalidInput(_)));
    }

    #[test]
    fn test_high_triglyceride_warning() {
        let res = evaluate(&LdlRequest {
            total_cholesterol: 250.0,
            hdl_cholesterol: 40.0,
            triglycerides: 500.0,
        })
        .unwrap();
        assert!(res.interpretation.contains("direct LDL measurement"));
    }
}
