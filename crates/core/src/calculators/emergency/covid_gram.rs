//! COVID-GRAM critical illness risk score.
//!
//! Logistic regression model from Liang 2020 predicting ICU admission,
//! mechanical ventilation, or death in hospitalized COVID-19 patients. The
//! output probability is bounded to [0.1, 99.9]% as published.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, YesNo};
use crate::engine::{logistic, round_to};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::{require_int_range, require_range};

pub const META: ScoreMeta = ScoreMeta {
    id: "covid_gram_critical_illness",
    title: "COVID-GRAM Critical Illness Risk Score",
    specialty: Specialty::Emergency,
    description: "Ten-variable logistic model estimating the probability of critical illness \
                  in hospitalized COVID-19 patients.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CovidGramRequest {
    pub chest_xray_abnormality: YesNo,
    pub age: i64,
    pub hemoptysis: YesNo,
    pub dyspnea: YesNo,
    pub unconsciousness: YesNo,
    pub number_of_comorbidities: i64,
    pub cancer_history: YesNo,
    pub neutrophil_lymphocyte_ratio: f64,
    /// LDH in U/L.
    pub lactate_dehydrogenase: f64,
    pub direct_bilirubin: f64,
}

// Original model coefficients, Liang 2020.
const INTERCEPT: f64 = -146.5;
const COEF_XRAY: f64 = 27.1464;
const COEF_AGE: f64 = 0.6139;
const COEF_HEMOPTYSIS: f64 = 33.6210;
const COEF_DYSPNEA: f64 = 14.0569;
const COEF_UNCONSCIOUSNESS: f64 = 34.4617;
const COEF_COMORBIDITIES: f64 = 10.3826;
const COEF_CANCER: f64 = 31.2211;
const COEF_NLR: f64 = 1.25;
const COEF_LDH: f64 = 0.0534;
const COEF_BILIRUBIN: f64 = 3.0605;

fn indicator(flag: YesNo) -> f64 {
    if flag.is_yes() {
        1.0
    } else {
        0.0
    }
}

pub fn evaluate(req: &CovidGramRequest) -> ScoreResult<ScoreResponse> {
    require_int_range("age", req.age, 18, 120, "years")?;
    require_int_range(
        "number_of_comorbidities",
        req.number_of_comorbidities,
        0,
        10,
        "",
    )?;
    require_range(
        "neutrophil_lymphocyte_ratio",
        req.neutrophil_lymphocyte_ratio,
        0.5,
        50.0,
        "",
    )?;
    require_range(
        "lactate_dehydrogenase",
        req.lactate_dehydrogenase,
        100.0,
        2000.0,
        "U/L",
    )?;
    require_range("direct_bilirubin", req.direct_bilirubin, 0.1, 20.0, "mg/dL")?;

    let linear_predictor = INTERCEPT
        + indicator(req.chest_xray_abnormality) * COEF_XRAY
        + req.age as f64 * COEF_AGE
        + indicator(req.hemoptysis) * COEF_HEMOPTYSIS
        + indicator(req.dyspnea) * COEF_DYSPNEA
        + indicator(req.unconsciousness) * COEF_UNCONSCIOUSNESS
        + req.number_of_comorbidities as f64 * COEF_COMORBIDITIES
        + indicator(req.cancer_history) * COEF_CANCER
        + req.neutrophil_lymphocyte_ratio * COEF_NLR
        + req.lactate_dehydrogenase * COEF_LDH
        + req.direct_bilirubin * COEF_BILIRUBIN;

    // probability bounded to [0.1, 99.9]% per the published model
    let probability = (logistic(linear_predictor) * 100.0).clamp(0.1, 99.9);
    let probability = round_to(probability, 1);

    let (stage, description, interpretation) = if probability < 1.7 {
        (
            "Low Risk",
            "Low risk of critical illness",
            format!(
                "COVID-GRAM risk probability of {probability:.1}% indicates low risk for \
                 critical illness. Standard monitoring and care protocols are appropriate. \
                 Low probability of requiring ICU admission, mechanical ventilation, or death."
            ),
        )
    } else if probability < 40.4 {
        (
            "Medium Risk",
            "Medium risk of critical illness",
            format!(
                "COVID-GRAM risk probability of {probability:.1}% indicates medium risk for \
                 critical illness. Enhanced monitoring and close observation are recommended. \
                 Intermediate probability of requiring ICU admission, mechanical ventilation, \
                 or death."
            ),
        )
    } else {
        (
            "High Risk",
            "High risk of critical illness",
            format!(
                "COVID-GRAM risk probability of {probability:.1}% indicates high risk for \
                 critical illness. Intensive monitoring and ICU consideration are \
                 recommended. High probability of requiring ICU admission, mechanical \
                 ventilation, or death."
            ),
        )
    };

    Ok(ScoreResponse {
        result: json!(probability),
        unit: "%".into(),
        interpretation,
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
