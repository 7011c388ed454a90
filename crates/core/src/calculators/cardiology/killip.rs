//! Killip classification of heart failure severity in acute MI.
//!
//! Bedside classification from Killip & Kimball 1967; in-hospital mortality
//! figures are the original series.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};

pub const META: ScoreMeta = ScoreMeta {
    id: "killip_class",
    title: "Killip Classification for Heart Failure in Acute MI",
    specialty: Specialty::Cardiology,
    description: "Classifies heart failure severity after acute myocardial infarction from \
                  bedside examination findings, with in-hospital mortality from the original \
                  1967 series.",
};

/// Examination-based class, worst finding wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KillipClass {
    /// No clinical signs of heart failure.
    Class1,
    /// Rales, S3 gallop, or elevated jugular venous pressure.
    Class2,
    /// Frank acute pulmonary edema.
    Class3,
    /// Cardiogenic shock or hypotension with evidence of low output.
    Class4,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KillipRequest {
    pub killip_class: KillipClass,
}

struct ClassRow {
    numeral: &'static str,
    mortality_percent: f64,
    findings: &'static str,
    guidance: &'static str,
}

const CLASS_ROWS: [ClassRow; 4] = [
    ClassRow {
        numeral: "I",
        mortality_percent: 6.0,
        findings: "No clinical signs of heart failure",
        guidance: "Standard acute MI management; monitor for development of heart failure.",
    },
    ClassRow {
        numeral: "II",
        mortality_percent: 17.0,
        findings: "Rales, S3 gallop, or elevated jugular venous pressure",
        guidance: "Initiate heart failure therapy alongside reperfusion; close hemodynamic \
                   monitoring.",
    },
    ClassRow {
        numeral: "III",
        mortality_percent: 38.0,
        findings: "Frank acute pulmonary edema",
        guidance: "Aggressive decongestion and early revascularization; consider intensive \
                   care admission.",
    },
    ClassRow {
        numeral: "IV",
        mortality_percent: 81.0,
        findings: "Cardiogenic shock",
        guidance: "Emergent revascularization and circulatory support; intensive care \
                   management required.",
    },
];

pub fn evaluate(req: &KillipRequest) -> ScoreResult<ScoreResponse> {
    let index = match req.killip_class {
        KillipClass::Class1 => 0,
        KillipClass::Class2 => 1,
        KillipClass::Class3 => 2,
        KillipClass::Class4 => 3,
    };
    let row = &CLASS_ROWS[index];

    Ok(ScoreResponse {
        result: json!({
            "killip_class": row.numeral,
            "in_hospital_mortality_percent": row.mortality_percent,
        }),
        unit: "class".into(),
        interpretation: format!(
            "Killip Class {}: {}. Reported in-hospital mortality approximately {}%. {}",
            row.numeral, row.findings, row.mortality_percent, row.guidance
        ),
        stage: format!("Class {}", row.numeral),
        stage_description: row.findings.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
