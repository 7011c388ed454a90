//! Rule of Nines estimate of total body surface area burned.
//!
//! Each body region contributes its fixed share of body surface, weighted by
//! the fraction of that region burned. Children and infants use a different
//! table (larger head, smaller legs).

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::engine::{lt, pick, rest, round_to, stage, Band, Stage};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "rule_of_nines",
    title: "Rule of Nines for Burn Surface Area",
    specialty: Specialty::Emergency,
    description: "Estimates total body surface area burned from per-region burn fractions, \
                  with age-appropriate region weights and burn severity staging.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Adult,
    Child,
    Infant,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOfNinesRequest {
    pub patient_age_group: AgeGroup,
    pub head_neck_percentage: f64,
    pub anterior_torso_percentage: f64,
    pub posterior_torso_percentage: f64,
    pub right_arm_percentage: f64,
    pub left_arm_percentage: f64,
    pub right_leg_percentage: f64,
    pub left_leg_percentage: f64,
    pub genitalia_percentage: f64,
}

/// Region weights: head/neck, anterior torso, posterior torso, right arm,
/// left arm, right leg, left leg, genitalia.
const ADULT_WEIGHTS: [f64; 8] = [9.0, 18.0, 18.0, 9.0, 9.0, 18.0, 18.0, 1.0];
const PEDIATRIC_WEIGHTS: [f64; 8] = [18.0, 18.0, 18.0, 9.0, 9.0, 13.5, 13.5, 1.0];

const TBSA_STAGES: [Band<Stage>; 4] = [
    lt(10.0, stage("Minor Burn", "Outpatient management usually appropriate")),
    lt(
        20.0,
        stage(
            "Moderate Burn",
            "Consider hospital admission and burn center consultation",
        ),
    ),
    lt(
        30.0,
        stage(
            "Major Burn",
            "Hospital admission and burn center transfer required",
        ),
    ),
    rest(stage(
        "Severe Burn",
        "Life-threatening injury requiring immediate intensive care",
    )),
];

pub fn evaluate(req: &RuleOfNinesRequest) -> ScoreResult<ScoreResponse> {
    let regions: [(&'static str, f64); 8] = [
        ("head_neck_percentage", req.head_neck_percentage),
        ("anterior_torso_percentage", req.anterior_torso_percentage),
        ("posterior_torso_percentage", req.posterior_torso_percentage),
        ("right_arm_percentage", req.right_arm_percentage),
        ("left_arm_percentage", req.left_arm_percentage),
        ("right_leg_percentage", req.right_leg_percentage),
        ("left_leg_percentage", req.left_leg_percentage),
        ("genitalia_percentage", req.genitalia_percentage),
    ];
    for (field, value) in regions {
        require_range(field, value, 0.0, 100.0, "%")?;
    }

    let weights = match req.patient_age_group {
        AgeGroup::Adult => &ADULT_WEIGHTS,
        AgeGroup::Child | AgeGroup::Infant => &PEDIATRIC_WEIGHTS,
    };

    let tbsa: f64 = regions
        .iter()
        .zip(weights)
        .map(|((_, burned), weight)| burned / 100.0 * weight)
        .sum();
    let tbsa = round_to(tbsa, 1);

    let bucket = pick(tbsa, &TBSA_STAGES);

    let fluid_note = match req.patient_age_group {
        AgeGroup::Adult => {
            "Adult patients require fluid resuscitation at ≥10% TBSA; calculate the Parkland \
             formula (4 mL/kg/% TBSA over 24 hours)."
        }
        AgeGroup::Child | AgeGroup::Infant => {
            "Pediatric patients require fluid resuscitation at ≥5% TBSA; consider early burn \
             center transfer for specialized pediatric burn care."
        }
    };

    Ok(ScoreResponse {
        result: json!(tbsa),
        unit: "%".into(),
        interpretation: format!(
            "{} ({tbsa:.1}% TBSA): {}. {fluid_note}",
            bucket.stage, bucket.description
        ),
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

    fn unburned(age: AgeGroup) -> RuleOfNinesRequest {
        RuleOfNinesRequest {
            patient_age_group: age,
            head_neck_percentage: 0.0,
            anterior_torso_percentage: 0.0,
            posterior_torso_percentage: 0.0,
            right_arm_percentage: 0.0,
            left_arm_percentage: 0.0,
            right_leg_percentage: 0.0,
            left_leg_percentage: 0.0,
            genitalia_percentage: 0.0,
        }
    }

    #[test]
    fn test_no_burns() {
        let res = evaluate(&unburned(AgeGroup::Adult)).unwrap();
        assert_eq!(res.result, json!(0.0));
        assert_eq!(res.stage, "Minor Burn");
    }

    #[test]
    fn test_fully_burned_adult_sums_to_100() {
        let req = RuleOfNinesRequest {
            patient_age_group: AgeGroup::Adult,
            head_neck_percentage: 100.0,
            anterior_torso_percentage: 100.0,
            posterior_torso_percentage: 100.0,
            right_arm_percentage: 100.0,
            left_arm_percentage: 100.0,
            right_leg_percentage: 100.0,
            left_leg_percentage: 100.0,
            genitalia_percentage: 100.0,
        };
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result, json!(100.0));
        assert_eq!(res.stage, "Severe Burn");
    }

    #[test]
    fn test_child_head_weight_is_18() {
        let mut req = unburned(AgeGroup::Child);
        req.head_neck_percentage = 100.0;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result, json!(18.0));
        assert_eq!(res.stage, "Moderate Burn");
    }

    #[test]
    fn test_partial_region() {
        // half an adult anterior torso: 9% TBSA, still minor
        let mut req = unburned(AgeGroup::Adult);
        req.anterior_torso_percentage = 50.0;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result, json!(9.0));
        assert_eq!(res.stage, "Minor Burn");
    }

    #[test]
    fn test_rejects_region_over_100() {
        let mut req = unburned(AgeGroup::Adult);
        req.left_arm_percentage = 120.0;
        assert!(evaluate(&req).is_err());
    }
}
