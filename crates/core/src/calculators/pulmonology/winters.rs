//! Winters' formula for respiratory compensation in metabolic acidosis.
//!
//! Expected pCO2 = 1.5 x [HCO3-] + 8, with a tolerance of +/- 2 mmHg. When a
//! measured pCO2 is supplied the verdict classifies the compensation as
//! appropriate, inadequate, or overcompensation; without one the response
//! reports only the expected value and range.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::round_to;
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "winters_formula",
    title: "Winters' Formula for Metabolic Acidosis Compensation",
    specialty: Specialty::Pulmonology,
    description: "Expected arterial pCO2 in pure metabolic acidosis, optionally compared \
                  against a measured pCO2 to judge respiratory compensation.",
};

const BICARBONATE_COEFFICIENT: f64 = 1.5;
const CONSTANT_OFFSET: f64 = 8.0;
const TOLERANCE_MMHG: f64 = 2.0;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WintersRequest {
    pub bicarbonate: f64,
    #[serde(default)]
    pub measured_pco2: Option<f64>,
}

pub fn evaluate(req: &WintersRequest) -> ScoreResult<ScoreResponse> {
    require_range("bicarbonate", req.bicarbonate, 5.0, 35.0, "mEq/L")?;
    if let Some(measured) = req.measured_pco2 {
        require_range("measured_pco2", measured, 10.0, 80.0, "mmHg")?;
    }

    let expected = round_to(BICARBONATE_COEFFICIENT * req.bicarbonate + CONSTANT_OFFSET, 1);
    let lower = round_to(expected - TOLERANCE_MMHG, 1);
    let upper = round_to(expected + TOLERANCE_MMHG, 1);

    let (stage, description, interpretation) = match req.measured_pco2 {
        None => (
            "Expected Compensation",
            "Calculated expected respiratory compensation",
            format!(
                "For a serum bicarbonate of {} mEq/L, the expected arterial pCO2 should be \
                 {expected:.1} mmHg (range: {lower:.1}-{upper:.1} mmHg) if respiratory \
                 compensation is appropriate. Obtain arterial blood gas to measure actual \
                 pCO2 and assess compensation adequacy. Ensure this represents pure \
                 metabolic acidosis before applying Winters' formula.",
                req.bicarbonate
            ),
        ),
        Some(measured) => {
            let difference = measured - expected;
            if difference < -TOLERANCE_MMHG {
                (
                    "Overcompensation",
                    "Respiratory overcompensation",
                    format!(
                        "The measured pCO2 ({measured} mmHg) is {:.1} mmHg lower than \
                         expected ({expected:.1} mmHg), suggesting respiratory \
                         overcompensation. This may indicate a concurrent primary \
                         respiratory alkalosis or mixed acid-base disorder. Review clinical \
                         context and arterial pH to confirm acid-base status.",
                        difference.abs()
                    ),
                )
            } else if difference > TOLERANCE_MMHG {
                (
                    "Undercompensation",
                    "Inadequate respiratory compensation",
                    format!(
                        "The measured pCO2 ({measured} mmHg) is {difference:.1} mmHg higher \
                         than expected ({expected:.1} mmHg), suggesting inadequate \
                         respiratory compensation. This may indicate respiratory impairment, \
                         fatigue, or a concurrent primary respiratory acidosis. Evaluate \
                         respiratory function and consider ventilatory support if severe."
                    ),
                )
            } else {
                (
                    "Appropriate Compensation",
                    "Expected respiratory compensation",
                    format!(
                        "The measured pCO2 ({measured} mmHg) is within the expected range \
                         ({lower:.1}-{upper:.1} mmHg) for metabolic acidosis, indicating \
                         appropriate respiratory compensation. Focus on identifying and \
                         treating the underlying cause of metabolic acidosis."
                    ),
                )
            }
        }
    };

    Ok(ScoreResponse {
        result: json!({
            "expected_pco2": expected,
            "expected_range_lower": lower,
            "expected_range_upper": upper,
            "measured_pco2": req.measured_pco2,
        }),
        unit: "mmHg".into(),
        interpretation,
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
