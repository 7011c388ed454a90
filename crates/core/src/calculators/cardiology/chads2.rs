//! CHADS₂ score for stroke risk in atrial fibrillation.
//!
//! Gage 2001. Superseded in many guidelines by CHA₂DS₂-VASc but still widely
//! reported; annual stroke rates carry the original 95% confidence intervals.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::{parse_request, YesNo};
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};

pub const META: ScoreMeta = ScoreMeta {
    id: "chads2_score",
    title: "CHADS₂ Score for Atrial Fibrillation Stroke Risk",
    specialty: Specialty::Cardiology,
    description: "Classic five-item stroke risk score for atrial fibrillation with annual \
                  stroke rates from the original validation cohort.",
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chads2Request {
    pub congestive_heart_failure: YesNo,
    pub hypertension: YesNo,
    pub age_75_or_older: YesNo,
    pub diabetes_mellitus: YesNo,
    pub stroke_tia_thromboembolism: YesNo,
}

struct RiskRow {
    rate: f64,
    ci: &'static str,
    category: &'static str,
    stage: &'static str,
}

/// Annual stroke rate per score (0..=6) with 95% CI, Gage 2001.
const RISK_ROWS: [RiskRow; 7] = [
    RiskRow { rate: 1.9, ci: "1.2-3.0", category: "Low", stage: "Low Risk" },
    RiskRow { rate: 2.8, ci: "2.0-3.8", category: "Low-Intermediate", stage: "Low-Intermediate Risk" },
    RiskRow { rate: 4.0, ci: "3.1-5.1", category: "Intermediate", stage: "Intermediate Risk" },
    RiskRow { rate: 5.9, ci: "4.6-7.3", category: "High", stage: "High Risk" },
    RiskRow { rate: 8.5, ci: "6.3-11.1", category: "High", stage: "High Risk" },
    RiskRow { rate: 12.5, ci: "8.2-17.5", category: "Very High", stage: "Very High Risk" },
    RiskRow { rate: 18.2, ci: "10.5-27.4", category: "Very High", stage: "Very High Risk" },
];

pub fn evaluate(req: &Chads2Request) -> ScoreResult<ScoreResponse> {
    let total = req.congestive_heart_failure.points(1)
        + req.hypertension.points(1)
        + req.age_75_or_older.points(1)
        + req.diabetes_mellitus.points(1)
        + req.stroke_tia_thromboembolism.points(2);

    let row = &RISK_ROWS[total as usize];

    let interpretation = match total {
        0 => format!(
            "CHADS₂ Score {total}: Low stroke risk ({}% per year, 95% CI: {}%). Consider \
             further risk stratification with CHA₂DS₂-VASc score. May consider aspirin or \
             observation based on bleeding risk and patient preferences.",
            row.rate, row.ci
        ),
        1 => format!(
            "CHADS₂ Score {total}: Low-intermediate stroke risk ({}% per year, 95% CI: {}%). \
             Consider further risk stratification with CHA₂DS₂-VASc score or anticoagulation \
             based on bleeding risk assessment.",
            row.rate, row.ci
        ),
        2 => format!(
            "CHADS₂ Score {total}: Intermediate stroke risk ({}% per year, 95% CI: {}%). \
             Anticoagulation generally recommended unless contraindicated due to bleeding \
             risk.",
            row.rate, row.ci
        ),
        _ => format!(
            "CHADS₂ Score {total}: {} stroke risk ({}% per year, 95% CI: {}%). Strong \
             recommendation for anticoagulation therapy with warfarin or direct oral \
             anticoagulants (DOACs).",
            row.category.to_lowercase(),
            row.rate,
            row.ci
        ),
    };

    Ok(ScoreResponse {
        result: json!({
            "total_score": total,
            "annual_stroke_risk_percent": row.rate,
            "stroke_risk_range": row.ci,
            "risk_category": row.category,
        }),
        unit: "points".into(),
        interpretation,
        stage: row.stage.into(),
        stage_description: format!("{} annual stroke risk", row.category),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(chf: YesNo, htn: YesNo, age: YesNo, dm: YesNo, stroke: YesNo) -> Chads2Request {
        Chads2Request {
            congestive_heart_failure: chf,
            hypertension: htn,
            age_75_or_older: age,
            diabetes_mellitus: dm,
            stroke_tia_thromboembolism: stroke,
        }
    }

    #[test]
    fn test_all_negative() {
        let res = evaluate(&req(YesNo::No, YesNo::No, YesNo::No, YesNo::No, YesNo::No)).unwrap();
        assert_eq!(res.result["total_score"], 0);
        assert_eq!(res.stage, "Low Risk");
        assert_eq!(res.result["annual_stroke_risk_percent"], 1.9);
    }

    #[test]
    fn test_stroke_counts_double() {
        let res =
            evaluate(&req(YesNo::No, YesNo::No, YesNo::No, YesNo::No, YesNo::Yes)).unwrap();
        assert_eq!(res.result["total_score"], 2);
        assert_eq!(res.stage, "Intermediate Risk");
    }

    #[test]
    fn test_maximum() {
        let res =
            evaluate(&req(YesNo::Yes, YesNo::Yes, YesNo::Yes, YesNo::Yes, YesNo::Yes)).unwrap();
        assert_eq!(res.result["total_score"], 6);
        assert_eq!(res.stage, "Very High Risk");
        assert_eq!(res.result["annual_stroke_risk_percent"], 18.2);
    }
}
