//! Free water deficit in hypernatremia (Adrogue & Madias 2000).
//!
//! Deficit (L) = TBW fraction x weight (kg) x (current Na / desired Na - 1),
//! with the total body water fraction chosen by age group and sex. The safe
//! correction rate of 0.5 mEq/L per hour drives the minimum-hours figure in
//! the interpretation.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, Sex};
use crate::engine::{lt, pick, rest, round_to, Band};
use crate::error::{ScoreError, ScoreResult};
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "free_water_deficit",
    title: "Free Water Deficit in Hypernatremia",
    specialty: Specialty::Nephrology,
    description: "Estimates the free water needed to correct hypernatremia from total body \
                  water fraction, weight, and the sodium correction target.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    Child,
    Adult,
    Elderly,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FreeWaterDeficitRequest {
    pub sex: Sex,
    pub age_category: AgeCategory,
    pub weight: f64,
    pub current_sodium: f64,
    pub desired_sodium: f64,
}

/// Total body water as a fraction of body weight. Children are 0.6
/// regardless of sex; muscle mass loss lowers the elderly fractions.
fn tbw_fraction(age_category: AgeCategory, sex: Sex) -> f64 {
    match (age_category, sex) {
        (AgeCategory::Child, _) => 0.6,
        (AgeCategory::Adult, Sex::Male) => 0.6,
        (AgeCategory::Adult, Sex::Female) => 0.5,
        (AgeCategory::Elderly, Sex::Male) => 0.5,
        (AgeCategory::Elderly, Sex::Female) => 0.45,
    }
}

struct DeficitBand {
    stage: &'static str,
    description: &'static str,
    management: &'static str,
}

const DEFICIT_BANDS: [Band<DeficitBand>; 4] = [
    lt(2.0, DeficitBand {
        stage: "Mild Deficit",
        description: "Mild free water deficit",
        management: "Mild deficit often manageable with oral hydration if tolerated. Monitor \
                     serum sodium every 12 hours.",
    }),
    lt(5.0, DeficitBand {
        stage: "Moderate Deficit",
        description: "Moderate free water deficit",
        management: "Moderate deficit requiring IV fluid replacement with 5% dextrose or \
                     hypotonic saline. Monitor electrolytes every 12 hours.",
    }),
    lt(10.0, DeficitBand {
        stage: "Severe Deficit",
        description: "Severe free water deficit",
        management: "Severe deficit requiring careful IV fluid management with close \
                     monitoring. Use 5% dextrose or hypotonic solutions and consider ICU \
                     monitoring.",
    }),
    rest(DeficitBand {
        stage: "Critical Deficit",
        description: "Critical free water deficit",
        management: "Critical deficit requiring intensive monitoring with mandatory \
                     nephrology consultation. ICU management recommended with hourly \
                     electrolytes initially.",
    }),
];

pub fn evaluate(req: &FreeWaterDeficitRequest) -> ScoreResult<ScoreResponse> {
    require_range("weight", req.weight, 0.226, 226.796, "kg")?;
    require_range("current_sodium", req.current_sodium, 100.0, 200.0, "mEq/L")?;
    require_range("desired_sodium", req.desired_sodium, 135.0, 145.0, "mEq/L")?;
    if req.current_sodium <= req.desired_sodium {
        return Err(ScoreError::InvalidInput(
            "current sodium must be greater than the desired sodium for a deficit \
             calculation"
                .into(),
        ));
    }

    let fraction = tbw_fraction(req.age_category, req.sex);
    let deficit = round_to(
        fraction * req.weight * (req.current_sodium / req.desired_sodium - 1.0),
        2,
    );

    // safe correction is capped at 0.5 mEq/L per hour
    let min_hours = round_to((req.current_sodium - req.desired_sodium) / 0.5, 1);
    let band = pick(deficit, &DEFICIT_BANDS);

    Ok(ScoreResponse {
        result: json!(deficit),
        unit: "L".into(),
        interpretation: format!(
            "Free water deficit of {deficit:.2} L calculated to correct serum sodium from \
             {} to {} mEq/L. {} Correction should not exceed 0.5 mEq/L per hour to prevent \
             cerebral edema (minimum {min_hours:.1} hours for safe correction). Target \
             maximum 10 mEq/L correction in 24 hours, then 10 mEq/L per day. Account for \
             ongoing losses and insensible losses.",
            req.current_sodium, req.desired_sodium, band.management
        ),
        stage: band.stage.into(),
        stage_description: band.description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adult_male_moderate_deficit() {
        // 0.6 * 70 * (155/140 - 1) = 4.5 L
        let res = evaluate(&FreeWaterDeficitRequest {
            sex: Sex::Male,
            age_category: AgeCategory::Adult,
            weight: 70.0,
            current_sodium: 155.0,
            desired_sodium: 140.0,
        })
        .unwrap();
        assert_eq!(res.result, json!(4.5));
        assert_eq!(res.stage, "Moderate Deficit");
        assert!(res.interpretation.contains("minimum 30.0 hours"));
    }

    #[test]
    fn test_elderly_female_uses_lowest_fraction() {
        // 0.45 * 60 * (150/140 - 1) = 1.93 L
        let res = evaluate(&FreeWaterDeficitRequest {
            sex: Sex::Female,
            age_category: AgeCategory::Elderly,
            weight: 60.0,
            current_sodium: 150.0,
            desired_sodium: 140.0,
        })
        .unwrap();
        assert_eq!(res.result, json!(1.93));
        assert_eq!(res.stage, "Mild Deficit");
    }

    #[test]
    fn test_child_fraction_ignores_sex() {
        assert_eq!(tbw_fraction(AgeCategory::Child, Sex::Female), 0.6);
        assert_eq!(tbw_fraction(AgeCategory::Child, Sex::Male), 0.6);
    }

    #[test]
    fn test_critical_deficit() {
        // 0.6 * 100 * (175/140 - 1) = 15.0 L
        let res = evaluate(&FreeWaterDeficitRequest {
            sex: Sex::Male,
            age_category: AgeCategory::Adult,
            weight: 100.0,
            current_sodium: 175.0,
            desired_sodium: 140.0,
        })
        .unwrap();
        assert_eq!(res.result, json!(15.0));
        assert_eq!(res.stage, "Critical Deficit");
    }

    #[test]
    fn test_rejects_sodium_already_at_target() {
        let err = evaluate(&FreeWaterDeficitRequest {
            sex: Sex::Male,
            age_category: AgeCategory::Adult,
            weight: 70.0,
            current_sodium: 140.0,
            desired_sodium: 140.0,
        })
        .unwrap_err();
        assert!(matches!(err, ScoreError::InvalidInput(_)));
    }

    #[test]
    fn test_wire_literals() {
        let res = apply(serde_json::json!({
            "sex": "female",
            "age_category": "adult",
            "weight": 60.0,
            "current_sodium": 154.0,
            "desired_sodium": 140.0,
        }))
        .unwrap();
        // 0.5 * 60 * 0.1 = 3.0
        assert_eq!(res.result, json!(3.0));
    }
}
