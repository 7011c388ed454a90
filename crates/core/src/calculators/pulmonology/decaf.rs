//! DECAF score for acute exacerbation of COPD (Steer 2012).
//!
//! Dyspnoea (extended MRC scale), Eosinopenia, Consolidation, Acidaemia and
//! atrial Fibrillation, summed to 0-6. Validated in patients aged 35 or
//! older with a smoking history; the optional age and smoking fields only
//! feed a validity note, never the score.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, YesNo};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_int_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "decaf_score",
    title: "DECAF Score for Acute Exacerbation of COPD",
    specialty: Specialty::Pulmonology,
    description: "Predicts in-hospital mortality in acute COPD exacerbation from dyspnoea, \
                  eosinopenia, consolidation, acidaemia, and atrial fibrillation.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmrcdDyspnea {
    NotTooDyspneic,
    TooDyspneicIndependent,
    TooDyspneicDependent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingHistory {
    Yes,
    No,
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecafRequest {
    pub emrcd_dyspnea: EmrcdDyspnea,
    pub eosinopenia: YesNo,
    pub consolidation: YesNo,
    pub acidemia: YesNo,
    pub atrial_fibrillation: YesNo,
    #[serde(default)]
    pub patient_age: Option<i64>,
    #[serde(default)]
    pub smoking_history: Option<SmokingHistory>,
}

/// In-hospital mortality by score, 0..=6.
const MORTALITY_BY_SCORE: [&str; 7] = ["0%", "1.5%", "5.4%", "15.3%", "31%", "40%", "50%"];

fn risk_row(score: i32) -> (&'static str, &'static str, &'static str, &'static str) {
    match score {
        0..=1 => (
            "Low Risk",
            "Low mortality risk",
            "0-1.5%",
            "Routine ward-based management is appropriate with standard COPD exacerbation \
             care.",
        ),
        2 => (
            "Intermediate Risk",
            "Intermediate mortality risk",
            "5.4%",
            "Use clinical judgment regarding disposition and consider closer monitoring \
             with frequent reassessment.",
        ),
        _ => (
            "High Risk",
            "High mortality risk",
            "15.3-50%",
            "Strong consideration for escalation of care (HDU/ICU) or palliative care \
             discussions depending on goals of care.",
        ),
    }
}

fn validity_note(req: &DecafRequest) -> Option<&'static str> {
    match req.smoking_history {
        Some(SmokingHistory::No) => {
            Some(" Note: no significant smoking history reported; score validity may be limited.")
        }
        Some(SmokingHistory::Unknown) => {
            Some(" Note: smoking history unknown; verify for score validity.")
        }
        _ => None,
    }
}

pub fn evaluate(req: &DecafRequest) -> ScoreResult<ScoreResponse> {
    if let Some(age) = req.patient_age {
        require_int_range("patient_age", age, 35, 120, "years")?;
    }

    let dyspnea_points = match req.emrcd_dyspnea {
        EmrcdDyspnea::NotTooDyspneic => 0,
        EmrcdDyspnea::TooDyspneicIndependent => 1,
        EmrcdDyspnea::TooDyspneicDependent => 2,
    };
    let total = dyspnea_points
        + req.eosinopenia.points(1)
        + req.consolidation.points(1)
        + req.acidemia.points(1)
        + req.atrial_fibrillation.points(1);

    let (label, description, mortality_range, guidance) = risk_row(total);
    let specific_mortality = MORTALITY_BY_SCORE[total as usize];

    let mut interpretation = format!(
        "DECAF score of {total} indicates {label} with {mortality_range} in-hospital \
         mortality risk ({specific_mortality} at this score). {guidance}"
    );
    if let Some(note) = validity_note(req) {
        interpretation.push_str(note);
    }

    Ok(ScoreResponse {
        result: json!(total),
        unit: "points".into(),
        interpretation,
        stage: label.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
