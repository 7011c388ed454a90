//! WPSS prognostic score for myelodysplastic syndromes.
//!
//! WHO classification-based Prognostic Scoring System, Malcovati 2007. Three
//! categorical components sum to 0-6; median survival figures are from the
//! original cohort.

use serde::Deserialize;
use serde_json::json;

use api_shared::ScoreResponse;

use crate::calculators::parse_request;
use crate::error::ScoreResult;
use crate::registry::{ScoreMeta, Specialty};

pub const META: ScoreMeta = ScoreMeta {
    id: "wpss_mds",
    title: "WPSS for Myelodysplastic Syndrome Prognosis",
    specialty: Specialty::Hematology,
    description: "Prognostic score for MDS from WHO morphological category, cytogenetic risk, \
                  and transfusion dependence.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhoCategory {
    /// RA, RARS, or MDS with isolated del(5q).
    RaRarsDel5q,
    /// RCMD or RCMD-RS.
    RcmdRcmdRs,
    /// RAEB-1, 2-4% blasts.
    Raeb1,
    /// RAEB-2, 5-19% blasts.
    Raeb2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Karyotype {
    Good,
    Intermediate,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransfusionRequirement {
    None,
    Regular,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WpssRequest {
    pub who_category: WhoCategory,
    pub karyotype: Karyotype,
    pub transfusion_requirement: TransfusionRequirement,
}

struct RiskRow {
    risk: &'static str,
    description: &'static str,
    median_survival_months: u32,
    median_survival_years: f64,
}

/// Indexed by total score 0..=6.
const RISK_ROWS: [RiskRow; 7] = [
    RiskRow { risk: "Very Low Risk", description: "Excellent prognosis", median_survival_months: 141, median_survival_years: 11.8 },
    RiskRow { risk: "Low Risk", description: "Good prognosis", median_survival_months: 66, median_survival_years: 5.5 },
    RiskRow { risk: "Intermediate Risk", description: "Moderate prognosis", median_survival_months: 48, median_survival_years: 4.0 },
    RiskRow { risk: "High Risk", description: "Poor prognosis", median_survival_months: 26, median_survival_years: 2.2 },
    RiskRow { risk: "High Risk", description: "Poor prognosis", median_survival_months: 26, median_survival_years: 2.2 },
    RiskRow { risk: "Very High Risk", description: "Very poor prognosis", median_survival_months: 9, median_survival_years: 0.8 },
    RiskRow { risk: "Very High Risk", description: "Very poor prognosis", median_survival_months: 9, median_survival_years: 0.8 },
];

pub fn evaluate(req: &WpssRequest) -> ScoreResult<ScoreResponse> {
    let who_score = match req.who_category {
        WhoCategory::RaRarsDel5q => 0,
        WhoCategory::RcmdRcmdRs => 1,
        WhoCategory::Raeb1 => 2,
        WhoCategory::Raeb2 => 3,
    };
    let karyotype_score = match req.karyotype {
        Karyotype::Good => 0,
        Karyotype::Intermediate => 1,
        Karyotype::Poor => 2,
    };
    let transfusion_score = match req.transfusion_requirement {
        TransfusionRequirement::None => 0,
        TransfusionRequirement::Regular => 1,
    };

    let total = who_score + karyotype_score + transfusion_score;
    let row = &RISK_ROWS[total as usize];

    Ok(ScoreResponse {
        result: json!(total),
        unit: "points".into(),
        interpretation: format!(
            "WPSS score {total} points indicates {} myelodysplastic syndrome with median \
             overall survival of {} months ({} years). {}.",
            row.risk, row.median_survival_months, row.median_survival_years, row.description
        ),
        stage: row.risk.into(),
        stage_description: row.description.into(),
    })
}

pub fn apply(input: serde_json::Value) -> ScoreResult<ScoreResponse> {
    parse_request(input).and_then(|req| evaluate(&req))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_case() {
        let res = evaluate(&WpssRequest {
            who_category: WhoCategory::RaRarsDel5q,
            karyotype: Karyotype::Good,
            transfusion_requirement: TransfusionRequirement::None,
        })
        .unwrap();
        assert_eq!(res.result, json!(0));
        assert_eq!(res.stage, "Very Low Risk");
        assert!(res.interpretation.contains("141 months"));
    }

    #[test]
    fn test_worst_case() {
        let res = evaluate(&WpssRequest {
            who_category: WhoCategory::Raeb2,
            karyotype: Karyotype::Poor,
            transfusion_requirement: TransfusionRequirement::Regular,
        })
        .unwrap();
        assert_eq!(res.result, json!(6));
        assert_eq!(res.stage, "Very High Risk");
    }

    #[test]
    fn test_scores_three_and_four_share_stage() {
        let three = evaluate(&WpssRequest {
            who_category: WhoCategory::Raeb2,
            karyotype: Karyotype::Good,
            transfusion_requirement: TransfusionRequirement::None,
        })
        .unwrap();
        let four = evaluate(&WpssRequest {
            who_category: WhoCategory::Raeb2,
            karyotype: Karyotype::Intermediate,
            transfusion_requirement: TransfusionRequirement::None,
        })
        .unwrap();
        assert_eq!(three.stage, "High Risk");
        assert_eq!(four.stage, "High Risk");
    }

    #[test]
    fn test_wire_literals() {
        let res = apply(serde_json::json!({
            "who_category": "rcmd_rcmd_rs",
            "karyotype": "intermediate",
            "transfusion_requirement": "regular",
        }))
        .unwrap();
        assert_eq!(res.result, json!(3));
    }
}
