//! CHA₂DS₂-VA score for stroke risk in nonvalvular atrial fibrillation.
//!
//! Simplified CHA₂DS₂-VASc without the sex criterion, as recommended by the
//! 2024 ESC guidelines. Stroke rates per Lip 2018.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, YesNo};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};
use crate::validation::require_int_range;

pub const META: ScoreMeta = ScoreMeta {
    id: "cha2ds2_va_score",
    title: "CHA₂DS₂-VA Score for Atrial Fibrillation Stroke Risk",
    specialty: Specialty::Cardiology,
    description: "Estimates annual stroke risk in atrial fibrillation without the sex \
                  criterion, per the 2024 ESC guidelines.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cha2ds2VaRequest {
    pub age: i64,
    pub congestive_heart_failure: YesNo,
    pub hypertension: YesNo,
    pub diabetes_mellitus: YesNo,
    pub stroke_tia_thromboembolism: YesNo,
    pub vascular_disease: YesNo,
}

/// Annual strokes per 100 patient-years, indexed by total score (0..=8).
const STROKE_RATES: [f64; 9] = [0.5, 1.5, 2.9, 4.6, 6.7, 9.2, 11.9, 15.2, 19.5];

fn age_points(age: i64) -> i32 {
    if age < 65 {
        0
    } else if age < 75 {
        1
    } else {
        2
    }
}

pub fn evaluate(req: &Cha2ds2VaRequest) -> ScoreResult<ScoreResponse> {
    require_int_range("age", req.age, 18, 120, "years")?;

    let total = age_points(req.age)
        + req.congestive_heart_failure.points(1)
        + req.hypertension.points(1)
        + req.diabetes_mellitus.points(1)
        + req.stroke_tia_thromboembolism.points(2)
        + req.vascular_disease.points(1);

    let rate = STROKE_RATES[total as usize];

    let (stage, stage_description, interpretation) = match total {
        0 => (
            "Low Risk",
            "Very low stroke risk",
            format!(
                "CHA₂DS₂-VA Score {total}: Very low stroke risk ({rate} strokes per 100 \
                 patient-years). Anticoagulation is not recommended. Consider bleeding risk \
                 assessment."
            ),
        ),
        1 => (
            "Moderate Risk",
            "Low-moderate stroke risk",
            format!(
                "CHA₂DS₂-VA Score {total}: Low-moderate stroke risk ({rate} strokes per 100 \
                 patient-years). Use clinical judgment to weigh risks and benefits of \
                 anticoagulation. Consider individual patient factors."
            ),
        ),
        _ => (
            "High Risk",
            "High stroke risk",
            format!(
                "CHA₂DS₂-VA Score {total}: High stroke risk ({rate} strokes per 100 \
                 patient-years). Oral anticoagulation is recommended to reduce stroke risk \
                 unless contraindicated."
            ),
        ),
    };

    Ok(ScoreResponse {
        result: json!({
            "total_score": total,
            "annual_stroke_risk_percent": rate,
            "stroke_incidence": format!("{rate} per 100 patient-years"),
        }),
        unit: "points".into(),
        interpretation,
        stage: stage.into(),
        stage_description: stage_description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;

    fn base() -> Cha2ds2VaRequest {
        Cha2ds2VaRequest {
            age: 50,
            congestive_heart_failure: YesNo::No,
            hypertension: YesNo::No,
            diabetes_mellitus: YesNo::No,
            stroke_tia_thromboembolism: YesNo::No,
            vascular_disease: YesNo::No,
        }
    }

    #[test]
    fn test_all_negative_scores_zero() {
        let res = evaluate(&base()).unwrap();
        assert_eq!(res.result["total_score"], 0);
        assert_eq!(res.stage, "Low Risk");
    }

    #[test]
    fn test_age_70_with_hypertension_is_high_risk() {
        let mut req = base();
        req.age = 70;
        req.hypertension = YesNo::Yes;
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["total_score"], 2);
        assert_eq!(res.stage, "High Risk");
        assert_eq!(res.result["annual_stroke_risk_percent"], 2.9);
    }

    #[test]
    fn test_age_boundaries() {
        for (age, points) in [(64, 0), (65, 1), (74, 1), (75, 2)] {
            let mut req = base();
            req.age = age;
            let res = evaluate(&req).unwrap();
            assert_eq!(res.result["total_score"], points, "age {age}");
        }
    }

    #[test]
    fn test_maximum_score() {
        let req = Cha2ds2VaRequest {
            age: 80,
            congestive_heart_failure: YesNo::Yes,
            hypertension: YesNo::Yes,
            diabetes_mellitus: YesNo::Yes,
            stroke_tia_thromboembolism: YesNo::Yes,
            vascular_disease: YesNo::Yes,
        };
        let res = evaluate(&req).unwrap();
        assert_eq!(res.result["total_score"], 8);
        assert_eq!(res.result["annual_stroke_risk_percent"], 19.5);
    }

    #[test]
    fn test_rejects_out_of_range_age() {
        let mut req = base();
        req.age = -5;
        let err = evaluate(&req).unwrap_err();
        assert!(matches!(err, ScoreError::OutOfRange { field: "age", .. }));
    }
}
