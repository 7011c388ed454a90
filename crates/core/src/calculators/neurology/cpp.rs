//! Cerebral perfusion pressure.
//!
//! CPP = MAP − ICP, the net pressure gradient driving cerebral blood flow.
//! An ICP at or above the MAP is physiologically untenable and is rejected
//! rather than reported as a zero or negative pressure.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::{lt, pick, rest, round_to, Band};
use crate::error::{ScoreError, ScoreResult};
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "cerebral_perfusion_pressure",
    title: "Cerebral Perfusion Pressure",
    specialty: Specialty::Neurology,
    description: "Net pressure gradient driving oxygen delivery to cerebral tissue, \
                  from mean arterial pressure and intracranial pressure.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CppRequest {
    pub mean_arterial_pressure: f64,
    pub intracranial_pressure: f64,
}

struct CppBand {
    category: &'static str,
    description: &'static str,
    risk_level: &'static str,
    urgency: &'static str,
    guidance: &'static str,
}

const CPP_BANDS: [Band<CppBand>; 6] = [
    lt(30.0, CppBand {
        category: "Critical",
        description: "Critically low cerebral perfusion",
        risk_level: "Critical",
        urgency: "Immediate intervention required",
        guidance: "Critical risk of cerebral ischemia and brain death. Immediate aggressive \
                   intervention required to increase MAP (vasopressors, fluid resuscitation) \
                   and/or reduce ICP (osmotic therapy, positioning, surgical decompression). \
                   Consider emergency neurosurgical consultation.",
    }),
    lt(50.0, CppBand {
        category: "Severely Low",
        description: "High risk of cerebral ischemia",
        risk_level: "High Risk",
        urgency: "Urgent intervention needed",
        guidance: "High risk of cerebral ischemia and secondary brain injury. Urgent \
                   intervention needed to optimize cerebral perfusion. Consider vasopressor \
                   support, ICP-lowering measures, and close neurological monitoring.",
    }),
    lt(60.0, CppBand {
        category: "Low",
        description: "Below optimal range",
        risk_level: "Moderate Risk",
        urgency: "Consider interventions",
        guidance: "Below optimal range. May indicate risk of ischemia, especially in patients \
                   with impaired autoregulation. Consider interventions to improve cerebral \
                   perfusion while monitoring neurological status.",
    }),
    lt(80.0, CppBand {
        category: "Optimal",
        description: "Target range for cerebral perfusion",
        risk_level: "Low Risk",
        urgency: "Maintain current management",
        guidance: "Optimal range for cerebral perfusion in most patients. Maintain current \
                   management strategies while continuing to monitor for changes. Target \
                   range for TBI management.",
    }),
    lt(100.0, CppBand {
        category: "Adequate",
        description: "Adequate cerebral perfusion",
        risk_level: "Low Risk",
        urgency: "Monitor for complications",
        guidance: "Adequate cerebral perfusion. Continue monitoring for potential \
                   complications of elevated pressures while maintaining adequate cerebral \
                   blood flow. Balance perfusion needs with hemodynamic stability.",
    }),
    rest(CppBand {
        category: "High",
        description: "Elevated cerebral perfusion pressure",
        risk_level: "Moderate Risk",
        urgency: "Balance perfusion with pressure management",
        guidance: "Elevated cerebral perfusion pressure. While perfusion is adequate, \
                   consider potential complications of high pressures including increased \
                   risk of cerebral edema and respiratory complications. Balance perfusion \
                   needs with pressure management.",
    }),
];

pub fn evaluate(req: &CppRequest) -> ScoreResult<ScoreResponse> {
    require_range(
        "mean_arterial_pressure",
        req.mean_arterial_pressure,
        30.0,
        200.0,
        "mmHg",
    )?;
    require_range(
        "intracranial_pressure",
        req.intracranial_pressure,
        0.0,
        80.0,
        "mmHg",
    )?;
    if req.intracranial_pressure >= req.mean_arterial_pressure {
        return Err(ScoreError::InvalidInput(
            "intracranial pressure cannot be greater than or equal to mean arterial pressure"
                .into(),
        ));
    }

    let cpp = round_to(req.mean_arterial_pressure - req.intracranial_pressure, 1);
    let band = pick(cpp, &CPP_BANDS);

    Ok(ScoreResponse {
        result: json!({
            "cpp_value": cpp,
            "map_value": req.mean_arterial_pressure,
            "icp_value": req.intracranial_pressure,
            "risk_level": band.risk_level,
            "urgency": band.urgency,
            "is_adequate": cpp >= 60.0,
            "is_critical": cpp < 50.0,
        }),
        unit: "mmHg".into(),
        interpretation: format!("CPP {cpp:.1} mmHg: {}", band.guidance),
        stage: band.category.into(),
        stage_description: band.description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}
