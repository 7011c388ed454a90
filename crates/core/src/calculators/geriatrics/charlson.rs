//! Charlson Comorbidity Index (Charlson 1987, age-adjusted).
//!
//! Weighted comorbidities plus one point per decade from age 50 (capped at
//! four). Estimated 10-year survival uses 0.983^(CCI x 0.9), assuming a
//! theoretical low-risk population with 98.3% 10-year survival; staging is
//! driven by the survival estimate rather than the raw score.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, YesNo};
use crate::engine::{lt, pick, rest, round_to, Band};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_int_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "charlson_comorbidity_index",
    title: "Charlson Comorbidity Index (CCI)",
    specialty: Specialty::Geriatrics,
    description: "Predicts 10-year survival from weighted comorbidity categories plus an \
                  age adjustment.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiverDisease {
    None,
    Mild,
    ModerateSevere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diabetes {
    None,
    Uncomplicated,
    WithEndOrganDamage,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharlsonRequest {
    pub age: i64,
    pub myocardial_infarction: YesNo,
    pub congestive_heart_failure: YesNo,
    pub peripheral_vascular_disease: YesNo,
    pub cerebrovascular_disease: YesNo,
    pub dementia: YesNo,
    pub chronic_pulmonary_disease: YesNo,
    pub connective_tissue_disease: YesNo,
    pub peptic_ulcer_disease: YesNo,
    pub liver_disease: LiverDisease,
    pub diabetes: Diabetes,
    pub hemiplegia: YesNo,
    pub moderate_severe_ckd: YesNo,
    pub localized_solid_tumor: YesNo,
    pub leukemia: YesNo,
    pub lymphoma: YesNo,
    pub metastatic_solid_tumor: YesNo,
    pub aids: YesNo,
}

/// One age-adjustment point per decade from 50, capped at 4.
const AGE_POINTS: [Band<i32>; 5] = [lt(50.0, 0), lt(60.0, 1), lt(70.0, 2), lt(80.0, 3), rest(4)];

struct RiskRow {
    category: &'static str,
    stage: &'static str,
    description: &'static str,
    summary: &'static str,
}

/// Staged by predicted survival percentage, worst first.
const RISK_ROWS: [Band<RiskRow>; 4] = [
    lt(30.0, RiskRow {
        category: "Very High Risk",
        stage: "Severe Comorbidity",
        description: "Severe comorbidity burden with poor prognosis",
        summary: "Poor 10-year survival (<30%). Severe impact from comorbidities.",
    }),
    lt(70.0, RiskRow {
        category: "High Risk",
        stage: "Significant Comorbidity",
        description: "Significant comorbidity burden with reduced survival",
        summary: "Reduced 10-year survival (30-69%). Significant impact from comorbidities.",
    }),
    lt(90.0, RiskRow {
        category: "Moderate Risk",
        stage: "Moderate Comorbidity",
        description: "Moderate comorbidity burden with good prognosis",
        summary: "Good 10-year survival (70-89%). Moderate impact from comorbidities.",
    }),
    rest(RiskRow {
        category: "Low Risk",
        stage: "Minimal Comorbidity",
        description: "Minimal comorbidity burden with excellent prognosis",
        summary: "Excellent 10-year survival (\u{2265}90%). Minimal impact from comorbidities.",
    }),
];

pub fn evaluate(req: &CharlsonRequest) -> ScoreResult<ScoreResponse> {
    require_int_range("age", req.age, 0, 120, "years")?;

    let age_points = *pick(req.age as f64, &AGE_POINTS);

    let one_point_conditions = [
        req.myocardial_infarction,
        req.congestive_heart_failure,
        req.peripheral_vascular_disease,
        req.cerebrovascular_disease,
        req.dementia,
        req.chronic_pulmonary_disease,
        req.connective_tissue_disease,
        req.peptic_ulcer_disease,
    ];
    let two_point_conditions = [
        req.hemiplegia,
        req.moderate_severe_ckd,
        req.localized_solid_tumor,
        req.leukemia,
        req.lymphoma,
    ];
    let six_point_conditions = [req.metastatic_solid_tumor, req.aids];

    let mut comorbidity_points: i32 = 0;
    for c in one_point_conditions {
        comorbidity_points += c.points(1);
    }
    for c in two_point_conditions {
        comorbidity_points += c.points(2);
    }
    for c in six_point_conditions {
        comorbidity_points += c.points(6);
    }
    comorbidity_points += match req.liver_disease {
        LiverDisease::None => 0,
        LiverDisease::Mild => 1,
        LiverDisease::ModerateSevere => 3,
    };
    comorbidity_points += match req.diabetes {
        Diabetes::None => 0,
        Diabetes::Uncomplicated => 1,
        Diabetes::WithEndOrganDamage => 2,
    };

    let total = age_points + comorbidity_points;

    let survival = (0.983f64.powf(f64::from(total) * 0.9) * 100.0).clamp(0.0, 100.0);
    let survival = round_to(survival, 2);

    let row = pick(survival, &RISK_ROWS);

    Ok(ScoreResponse {
        result: json!({
            "total_score": total,
            "age_points": age_points,
            "comorbidity_points": comorbidity_points,
            "ten_year_survival_probability": survival,
            "risk_category": row.category,
        }),
        unit: "points".into(),
        interpretation: format!(
            "Charlson Comorbidity Index Score: {total} points. Predicted 10-year survival: \
             {survival:.1}%. {} Consider individual patient factors and treatment goals when \
             making clinical decisions based on this assessment.",
            row.summary
        ),
        stage: row.stage.into(),
        stage_description: row.description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy(age: i64) -> CharlsonRequest {
        CharlsonRequest {
            age,
            myocardial_infarction: YesNo::No,
            congestive_heart_failure: YesNo::No,
            peripheral_vascular_disease: YesNo::No,
            cerebrovascular_disease: YesNo::No,
            dementia: YesNo::No,
            chronic_pulmonary_disease: YesNo::No,
            connective_tissue_disease: YesNo::No,
            peptic_ulcer_disease: YesNo::No,
            liver_disease: LiverDisease::None,
            diabetes: Diabetes::None,
            hemiplegia: YesNo::No,
            moderate_severe_ckd: YesNo::No,
            localized_solid_tumor: YesNo::No,
            leukemia: YesNo::No,
            lymphoma: YesNo::No,
            metastatic_solid_tumor: YesNo::No,
            aids: YesNo::No,
        }
    }

    #[test]
    fn test_healthy_young_patient() {
        let res = evaluate(&healthy(40)).unwrap();
        assert_eq!(res.result["total_score"], json!(0));
        assert_eq!(res.result["ten_year_survival_probability"], json!(100.0));
        assert_eq!(res.stage, "Minimal Comorbidity");
    }

    #[test]
    fn test_age_points_per_decade() {
        assert_eq!(*pick(49.0, &AGE_POINTS), 0);
        assert_eq!(*pick(50.0, &AGE_POINTS), 1);
        assert_eq!(*pick(79.0, &AGE_POINTS), 3);
        assert_eq!(*pick(80.0, &AGE_POINTS), 4);
        assert_eq!(*pick(110.0, &AGE_POINTS), 4);
    }

    #[test]
    fn test_weighted_comorbidities() {
        let mut req = healthy(45);
        req.metastatic_solid_tumor = YesNo::Yes;
        req.hemiplegia = YesNo::Yes;
        req.liver_disease = LiverDisease::ModerateSevere;
        req.diabetes = Diabetes::WithEndOrganDamage;
        req.myocardial_infarction = YesNo::Yes;
        // 6 + 2 + 3 + 2 + 1 = 14
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["total_score"], json!(14));
        assert_eq!(res.stage, "Severe Comorbidity");
    }

    #[test]
    fn test_survival_formula() {
        // CCI 5: 0.983^4.5 * 100 = 92.57%
        let mut req = healthy(65);
        req.congestive_heart_failure = YesNo::Yes;
        req.localized_solid_tumor = YesNo::Yes;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["total_score"], json!(5));
        assert_eq!(res.result["ten_year_survival_probability"], json!(92.57));
        assert_eq!(res.stage, "Minimal Comorbidity");
    }

    #[test]
    fn test_moderate_band() {
        // CCI 10: 0.983^9 * 100 = 85.71% -> Moderate Comorbidity
        let mut req = healthy(80);
        req.metastatic_solid_tumor = YesNo::Yes;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["total_score"], json!(10));
        assert_eq!(res.stage, "Moderate Comorbidity");
    }

    #[test]
    fn test_rejects_invalid_age() {
        assert!(evaluate(&healthy(130)).is_err());
    }
}
