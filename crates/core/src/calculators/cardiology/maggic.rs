//! MAGGIC risk score for mortality in chronic heart failure.
//!
//! Meta-Analysis Global Group in Chronic Heart Failure, Pocock 2013. Age
//! points depend on whether ejection fraction is reduced (≤40%) or preserved,
//! and missing guideline therapy (beta-blocker, ACE-I/ARB) adds points.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, Sex, YesNo};
use crate::engine::{le, lt, pick, rest, Band};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::{require_int_range, require_range};

pub const META: ScoreMeta = ScoreMeta {
    id: "maggic_risk_calculator",
    title: "MAGGIC Risk Calculator for Heart Failure",
    specialty: Specialty::Cardiology,
    description: "Thirteen-item integer score estimating 1- and 3-year mortality in chronic \
                  heart failure, from the MAGGIC meta-analysis.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum NyhaClass {
    I,
    II,
    III,
    IV,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaggicRequest {
    pub age: i64,
    pub gender: Sex,
    pub ejection_fraction: i64,
    pub nyha_class: NyhaClass,
    pub creatinine: f64,
    pub systolic_bp: i64,
    pub bmi: f64,
    pub diabetes: YesNo,
    pub copd: YesNo,
    pub current_smoker: YesNo,
    pub hf_duration_over_18_months: YesNo,
    pub beta_blocker: YesNo,
    pub ace_arb: YesNo,
}

/// Age points when EF ≤ 40% (reduced).
const AGE_HFREF: [Band<i32>; 7] = [
    le(55.0, 0),
    le(60.0, 1),
    le(65.0, 2),
    le(70.0, 3),
    le(75.0, 5),
    le(80.0, 6),
    rest(8),
];

/// Age points when EF > 40% (preserved).
const AGE_HFPEF: [Band<i32>; 7] = [
    le(55.0, 0),
    le(60.0, 2),
    le(65.0, 4),
    le(70.0, 6),
    le(75.0, 8),
    le(80.0, 10),
    rest(13),
];

const EF_POINTS: [Band<i32>; 6] = [
    le(19.0, 6),
    le(24.0, 5),
    le(29.0, 3),
    le(34.0, 2),
    le(39.0, 1),
    rest(0),
];

const CREATININE_POINTS: [Band<i32>; 6] = [
    le(1.2, 0),
    le(1.4, 1),
    le(1.8, 2),
    le(2.3, 3),
    le(2.8, 4),
    rest(5),
];

const SBP_POINTS: [Band<i32>; 5] = [
    lt(100.0, 5),
    lt(110.0, 3),
    lt(120.0, 2),
    lt(140.0, 1),
    rest(0),
];

const BMI_POINTS: [Band<i32>; 5] = [
    lt(18.0, 5),
    lt(22.0, 3),
    lt(25.0, 2),
    lt(30.0, 1),
    rest(0),
];

fn nyha_points(class: NyhaClass) -> i32 {
    match class {
        NyhaClass::I => 0,
        NyhaClass::II => 2,
        NyhaClass::III => 6,
        NyhaClass::IV => 8,
    }
}

pub fn evaluate(req: &MaggicRequest) -> ScoreResult<ScoreResponse> {
    require_int_range("age", req.age, 18, 120, "years")?;
    require_int_range("ejection_fraction", req.ejection_fraction, 10, 80, "%")?;
    require_range("creatinine", req.creatinine, 0.3, 15.0, "mg/dL")?;
    require_int_range("systolic_bp", req.systolic_bp, 60, 250, "mmHg")?;
    require_range("bmi", req.bmi, 10.0, 60.0, "kg/m²")?;

    let age_table = if req.ejection_fraction <= 40 {
        &AGE_HFREF
    } else {
        &AGE_HFPEF
    };

    let total = *pick(req.age as f64, age_table)
        + if matches!(req.gender, Sex::Male) { 1 } else { 0 }
        + *pick(req.ejection_fraction as f64, &EF_POINTS)
        + nyha_points(req.nyha_class)
        + *pick(req.creatinine, &CREATININE_POINTS)
        + *pick(req.systolic_bp as f64, &SBP_POINTS)
        + *pick(req.bmi, &BMI_POINTS)
        + req.diabetes.points(3)
        + req.copd.points(2)
        + req.current_smoker.points(1)
        + req.hf_duration_over_18_months.points(2)
        // absence of guideline therapy scores
        + if req.beta_blocker.is_yes() { 0 } else { 3 }
        + if req.ace_arb.is_yes() { 0 } else { 1 };

    let (stage, description, interpretation) = interpret(total);

    Ok(ScoreResponse {
        result: json!(total),
        unit: "points".into(),
        interpretation: interpretation.into(),
        stage: stage.into(),
        stage_description: description.into(),
    })
}

fn interpret(score: i32) -> (&'static str, &'static str, &'static str) {
    match score {
        s if s <= 15 => (
            "Low Risk",
            "Low mortality risk",
            "Low risk for 1-year (<5%) and 3-year (<15%) mortality. Standard heart failure \
             management appropriate. Continue evidence-based medical therapy including \
             ACE-I/ARB, beta-blockers, and lifestyle modifications.",
        ),
        s if s <= 25 => (
            "Intermediate Risk",
            "Intermediate mortality risk",
            "Intermediate risk for 1-year (5-15%) and 3-year (15-40%) mortality. Ensure \
             maximal tolerated evidence-based therapy and consider device therapy \
             evaluation if indicated.",
        ),
        s if s <= 35 => (
            "High Risk",
            "High mortality risk",
            "High risk for 1-year (15-40%) and 3-year (40-70%) mortality. Consider referral \
             to an advanced heart failure specialist and evaluation for device therapy \
             (ICD/CRT).",
        ),
        _ => (
            "Very High Risk",
            "Very high mortality risk",
            "Very high risk for 1-year (>40%) and 3-year (>70%) mortality. Urgent referral \
             to an advanced heart failure center recommended, including consideration of \
             mechanical circulatory support, transplant evaluation, or palliative care \
             discussions.",
        ),
    }
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> MaggicRequest {
        MaggicRequest {
            age: 50,
            gender: Sex::Female,
            ejection_fraction: 45,
            nyha_class: NyhaClass::I,
            creatinine: 1.0,
            systolic_bp: 150,
            bmi: 31.0,
            diabetes: YesNo::No,
            copd: YesNo::No,
            current_smoker: YesNo::No,
            hf_duration_over_18_months: YesNo::No,
            beta_blocker: YesNo::Yes,
            ace_arb: YesNo::Yes,
        }
    }

    #[test]
    fn test_all_favorable_scores_zero() {
        let res = evaluate(&base()).unwrap();
        assert_eq!(res.result, json!(0));
        assert_eq!(res.stage, "Low Risk");
    }

    #[test]
    fn test_age_points_depend_on_ef_category() {
        let mut reduced = base();
        reduced.age = 72;
        reduced.ejection_fraction = 40;
        let mut preserved = base();
        preserved.age = 72;
        preserved.ejection_fraction = 41;

        // EF 40 itself earns 0 EF points but selects the reduced age table
        let reduced_score = evaluate(&reduced).unwrap().result.as_i64().unwrap();
        let preserved_score = evaluate(&preserved).unwrap().result.as_i64().unwrap();
        assert_eq!(reduced_score, 5);
        assert_eq!(preserved_score, 8);
    }

    #[test]
    fn test_missing_therapy_scores() {
        let mut req = base();
        req.beta_blocker = YesNo::No;
        req.ace_arb = YesNo::No;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result, json!(4));
    }

    #[test]
    fn test_high_risk_profile() {
        let req = MaggicRequest {
            age: 82,
            gender: Sex::Male,
            ejection_fraction: 18,
            nyha_class: NyhaClass::IV,
            creatinine: 3.0,
            systolic_bp: 95,
            bmi: 17.0,
            diabetes: YesNo::Yes,
            copd: YesNo::Yes,
            current_smoker: YesNo::Yes,
            hf_duration_over_18_months: YesNo::Yes,
            beta_blocker: YesNo::No,
            ace_arb: YesNo::No,
        };
        // 8 + 1 + 6 + 8 + 5 + 5 + 5 + 3 + 2 + 1 + 2 + 3 + 1
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result, json!(50));
        assert_eq!(res.stage, "Very High Risk");
    }

    #[test]
    fn test_rejects_out_of_range_bmi() {
        let mut req = base();
        req.bmi = 5.0;
        assert!(evaluate(&req).is_err());
    }
}
