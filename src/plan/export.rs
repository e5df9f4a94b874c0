use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::plan::model::StudyPlan;

pub const EXPORT_VERSION: &str = "1.0";

/// Single-plan export file: the plan fields plus an export stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExport {
    #[serde(flatten)]
    pub plan: StudyPlan,
    pub exported_at: DateTime<Utc>,
    pub version: String,
}

/// Bulk export file wrapping multiple plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkExport {
    pub study_plans: Vec<StudyPlan>,
    pub exported_at: DateTime<Utc>,
    pub version: String,
    pub count: usize,
}

pub fn export_plan(plan: &StudyPlan) -> PlanExport {
    PlanExport {
        plan: plan.clone(),
        exported_at: Utc::now(),
        version: EXPORT_VERSION.to_string(),
    }
}

pub fn export_plans(plans: &[StudyPlan]) -> BulkExport {
    BulkExport {
        study_plans: plans.to_vec(),
        exported_at: Utc::now(),
        version: EXPORT_VERSION.to_string(),
        count: plans.len(),
    }
}

/// Parse an import payload. Accepts the bulk `{studyPlans: [...]}` wrapper
/// (with or without the export stamp) or a single plan object; anything
/// else is an ImportFormat error and nothing is applied.
pub fn import_study_plans(json: &str) -> Result<Vec<StudyPlan>, PlanError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| PlanError::ImportFormat(format!("not valid JSON: {}", e)))?;

    if let Some(plans) = value.get("studyPlans") {
        return serde_json::from_value::<Vec<StudyPlan>>(plans.clone()).map_err(|e| {
            PlanError::ImportFormat(format!("studyPlans entries are not valid plans: {}", e))
        });
    }

    serde_json::from_value::<StudyPlan>(value)
        .map(|plan| vec![plan])
        .map_err(|e| PlanError::ImportFormat(format!("not a study plan object: {}", e)))
}

/// Render a plan as an iCalendar file: one one-hour event per scheduled
/// problem, sessions starting at 09:00 local time with each problem
/// staggered an hour after the previous one.
pub fn to_ics(plan: &StudyPlan) -> String {
    let mut out = String::new();
    out.push_str("BEGIN:VCALENDAR\r\n");
    out.push_str("VERSION:2.0\r\n");
    out.push_str("PRODID:-//studyforge//study-plan//EN\r\n");

    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for session in &plan.schedule {
        let Some(session_start) = session.date.and_hms_opt(9, 0, 0) else {
            continue;
        };
        for (i, problem) in session.problems.iter().enumerate() {
            let start = session_start + Duration::hours(i as i64);
            let end = start + Duration::hours(1);

            out.push_str("BEGIN:VEVENT\r\n");
            out.push_str(&format!("UID:{}-{}-{}\r\n", plan.id, session.id, i));
            out.push_str(&format!("DTSTAMP:{}\r\n", stamp));
            out.push_str(&format!("DTSTART:{}\r\n", start.format("%Y%m%dT%H%M%S")));
            out.push_str(&format!("DTEND:{}\r\n", end.format("%Y%m%dT%H%M%S")));
            out.push_str(&format!(
                "SUMMARY:{}\r\n",
                escape_ics_text(&problem.problem.title)
            ));
            if let Some(link) = &problem.problem.link {
                out.push_str(&format!("URL:{}\r\n", link));
            }
            out.push_str(&format!(
                "DESCRIPTION:{} ({:?})\r\n",
                escape_ics_text(&problem.problem.company),
                problem.problem.difficulty
            ));
            out.push_str("END:VEVENT\r\n");
        }
    }

    out.push_str("END:VCALENDAR\r\n");
    out
}

fn escape_ics_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}
