//! Mangled Extremity Severity Score (MESS).
//!
//! Johansen 1990. The ischemia component doubles when warm ischemia has
//! lasted more than six hours; 6.0 hours exactly is not doubled.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::{require_int_range, require_range};

pub const META: ScoreMeta = ScoreMeta {
    id: "mangled_extremity_severity_score",
    title: "Mangled Extremity Severity Score (MESS)",
    specialty: Specialty::Emergency,
    description: "Predicts salvageability of a mangled lower extremity from ischemia, shock, \
                  age, and injury energy; scores of 7 or more traditionally favored \
                  amputation.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbIschemia {
    ReducedPulseNormalPerfusion,
    PulselessParesthesiasSlowCapillaryRefill,
    CoolParalyzedNumbInsensate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShockStatus {
    NoShockSbpGreaterThan90,
    TransientHypotension,
    PersistentHypotension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryMechanism {
    LowEnergy,
    MediumEnergy,
    HighEnergy,
    VeryHighEnergy,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessRequest {
    pub limb_ischemia: LimbIschemia,
    pub ischemia_duration_hours: f64,
    pub patient_age: i64,
    pub shock_status: ShockStatus,
    pub injury_mechanism: InjuryMechanism,
}

pub fn evaluate(req: &MessRequest) -> ScoreResult<ScoreResponse> {
    require_range(
        "ischemia_duration_hours",
        req.ischemia_duration_hours,
        0.0,
        24.0,
        "hours",
    )?;
    require_int_range("patient_age", req.patient_age, 0, 120, "years")?;

    let ischemia_base = match req.limb_ischemia {
        LimbIschemia::ReducedPulseNormalPerfusion => 1,
        LimbIschemia::PulselessParesthesiasSlowCapillaryRefill => 2,
        LimbIschemia::CoolParalyzedNumbInsensate => 3,
    };
    let ischemia_multiplier = if req.ischemia_duration_hours > 6.0 { 2 } else { 1 };

    let age_score = if req.patient_age < 30 {
        0
    } else if req.patient_age < 50 {
        1
    } else {
        2
    };

    let shock_score = match req.shock_status {
        ShockStatus::NoShockSbpGreaterThan90 => 0,
        ShockStatus::TransientHypotension => 1,
        ShockStatus::PersistentHypotension => 2,
    };

    let mechanism_score = match req.injury_mechanism {
        InjuryMechanism::LowEnergy => 1,
        InjuryMechanism::MediumEnergy => 2,
        InjuryMechanism::HighEnergy => 3,
        InjuryMechanism::VeryHighEnergy => 4,
    };

    let total = ischemia_base * ischemia_multiplier + age_score + shock_score + mechanism_score;

    let (stage, description, interpretation) = if total <= 6 {
        (
            "Limb Salvage Likely",
            "Low risk for amputation with good salvage potential",
            "MESS score suggests limb salvage is likely to be successful. Proceed with \
             aggressive limb preservation efforts including vascular repair, fracture \
             stabilization, and soft tissue reconstruction, with multidisciplinary \
             orthopedic, vascular, and plastic surgery involvement.",
        )
    } else if total == 7 {
        (
            "Borderline Decision",
            "Traditional threshold for amputation consideration",
            "MESS score of 7 represents the traditional threshold for amputation \
             consideration, though modern surgical advances have led some experts to \
             suggest higher thresholds (8-9 points). Careful multidisciplinary judgment \
             weighing patient factors, expertise, and preferences is required.",
        )
    } else {
        (
            "Amputation Likely",
            "High probability of amputation requirement",
            "High MESS score suggests that primary amputation may be the most appropriate \
             treatment option. Salvage may still be possible in selected cases with \
             experienced teams; discuss risks and benefits of salvage versus amputation \
             with the patient and family.",
        )
    };

    Ok(ScoreResponse {
        result: json!({
            "total_score": total,
            "ischemia_base_score": ischemia_base,
            "ischemia_multiplier": ischemia_multiplier,
            "age_score": age_score,
            "shock_score": shock_score,
            "mechanism_score": mechanism_score,
        }),
        unit: "points".into(),
        interpretation: interpretation.into(),
        stage: stage.into(),
        stage_description: description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> MessRequest {
        MessRequest {
            limb_ischemia: LimbIschemia::ReducedPulseNormalPerfusion,
            ischemia_duration_hours: 2.0,
            patient_age: 25,
            shock_status: ShockStatus::NoShockSbpGreaterThan90,
            injury_mechanism: InjuryMechanism::LowEnergy,
        }
    }

    #[test]
    fn test_minimum_score() {
        let res = evaluate(&base()).unwrap();
        assert_eq!(res.result["total_score"], 2);
        assert_eq!(res.stage, "Limb Salvage Likely");
    }

    #[test]
    fn test_six_hours_exactly_is_not_doubled() {
        let mut req = base();
        req.limb_ischemia = LimbIschemia::CoolParalyzedNumbInsensate;
        req.ischemia_duration_hours = 6.0;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["ischemia_multiplier"], 1);
        assert_eq!(res.result["total_score"], 4);
    }

    #[test]
    fn test_over_six_hours_doubles() {
        let mut req = base();
        req.limb_ischemia = LimbIschemia::CoolParalyzedNumbInsensate;
        req.ischemia_duration_hours = 6.5;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["ischemia_multiplier"], 2);
        assert_eq!(res.result["total_score"], 7);
        assert_eq!(res.stage, "Borderline Decision");
    }

    #[test]
    fn test_high_score_profile() {
        let req = MessRequest {
            limb_ischemia: LimbIschemia::CoolParalyzedNumbInsensate,
            ischemia_duration_hours: 8.0,
            patient_age: 55,
            shock_status: ShockStatus::PersistentHypotension,
            injury_mechanism: InjuryMechanism::VeryHighEnergy,
        };
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["total_score"], 14);
        assert_eq!(res.stage, "Amputation Likely");
    }

    #[test]
    fn test_age_boundaries() {
        for (age, expected) in [(29, 2), (30, 3), (49, 3), (50, 4)] {
            let mut req = base();
            req.patient_age = age;
            let res = evaluate(&req).unwrap();
            assert_eq!(res.result["total_score"], expected, "age {age}");
        }
    }
}
