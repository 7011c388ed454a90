//! Reticulocyte Production Index (RPI).
//!
//! Corrects the raw reticulocyte percentage for the degree of anemia and for
//! reticulocyte maturation time. The maturation factor depends on the
//! measured hematocrit (half-open bands, e.g. Hct 20 falls in the 2.0 band).

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::{lt, pick, rest, round_to, Band};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "reticulocyte_production_index",
    title: "Reticulocyte Production Index (RPI)",
    specialty: Specialty::Hematology,
    description: "Assesses whether the bone marrow response to anemia is adequate, correcting \
                  the reticulocyte count for hematocrit and maturation time.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpiRequest {
    pub reticulocyte_percentage: f64,
    pub measured_hematocrit: f64,
    pub normal_hematocrit: f64,
}

/// Maturation factor by measured hematocrit.
const MATURATION_FACTORS: [Band<f64>; 4] =
    [lt(20.0, 2.5), lt(25.0, 2.0), lt(35.0, 1.5), rest(1.0)];

fn anemia_severity(hematocrit: f64) -> &'static str {
    if hematocrit >= 35.0 {
        "No anemia or mild anemia"
    } else if hematocrit >= 25.0 {
        "Mild to moderate anemia"
    } else if hematocrit >= 20.0 {
        "Moderate anemia"
    } else {
        "Severe anemia"
    }
}

pub fn evaluate(req: &RpiRequest) -> ScoreResult<ScoreResponse> {
    require_range(
        "reticulocyte_percentage",
        req.reticulocyte_percentage,
        0.0,
        50.0,
        "%",
    )?;
    require_range("measured_hematocrit", req.measured_hematocrit, 5.0, 65.0, "%")?;
    require_range("normal_hematocrit", req.normal_hematocrit, 35.0, 50.0, "%")?;

    let corrected =
        req.reticulocyte_percentage * (req.measured_hematocrit / req.normal_hematocrit);
    let maturation_factor = *pick(req.measured_hematocrit, &MATURATION_FACTORS);
    let rpi = round_to(corrected / maturation_factor, 2);

    let (stage, description, detail) = if rpi < 0.5 {
        (
            "Very Low Response",
            "Very decreased reticulocyte production",
            format!(
                "RPI of {rpi:.2} is <0.5, indicating very decreased reticulocyte production. \
                 This suggests bone marrow failure, severe nutritional deficiency, or other \
                 causes of impaired erythropoiesis requiring immediate evaluation."
            ),
        )
    } else if rpi < 2.0 {
        (
            "Inadequate Response",
            "Inadequate bone marrow response",
            format!(
                "RPI of {rpi:.2} is <2.0, indicating inadequate bone marrow response to \
                 anemia. This suggests hypoproliferative anemia due to bone marrow \
                 dysfunction, nutritional deficiencies, chronic disease, or renal failure."
            ),
        )
    } else if rpi < 3.0 {
        (
            "Borderline Response",
            "Borderline bone marrow response",
            format!(
                "RPI of {rpi:.2} is borderline (2.0-3.0), indicating a marginal bone marrow \
                 response. This may suggest early recovery from bone marrow suppression, mild \
                 nutritional deficiency, or a transition phase in treatment."
            ),
        )
    } else {
        (
            "Appropriate Response",
            "Appropriate bone marrow response",
            format!(
                "RPI of {rpi:.2} is >3.0, indicating appropriate bone marrow response to \
                 anemia. This suggests hemolytic anemia, acute blood loss, or other causes of \
                 increased red cell destruction with compensatory reticulocytosis."
            ),
        )
    };

    let interpretation = format!(
        "{detail} Patient has {} (Hct {}%).",
        anemia_severity(req.measured_hematocrit).to_lowercase(),
        req.measured_hematocrit
    );

    Ok(ScoreResponse {
        result: json!(rpi),
        unit: "index".into(),
        interpretation,
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
