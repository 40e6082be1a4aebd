//! Program-wide statistics derived from the stored records.

pub mod handlers;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::interns::status::InternStatus;
use crate::models::intern::InternRow;
use crate::models::project::{ProjectRow, ProjectStatus};

/// Months covered by the onboarding trend, current month included.
pub const TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub interns_total: usize,
    pub interns_by_status: BTreeMap<&'static str, usize>,
    pub projects_by_status: BTreeMap<&'static str, usize>,
    pub certificates_issued: i64,
    pub mentors_total: i64,
    /// Mean attendance of completed interns, one decimal. `None` when no
    /// completed intern has attendance recorded.
    pub average_attendance: Option<f64>,
    /// Interns onboarded per calendar month, oldest first.
    pub monthly_onboarding: Vec<MonthCount>,
}

/// `(year, month)` of the month `back` months before `today`'s month.
fn month_before(today: NaiveDate, back: u32) -> (i32, u32) {
    let index = today.year() * 12 + today.month0() as i32 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn build_report(
    interns: &[InternRow],
    projects: &[ProjectRow],
    certificates_issued: i64,
    mentors_total: i64,
    today: NaiveDate,
) -> AnalyticsReport {
    let mut interns_by_status: BTreeMap<&'static str, usize> =
        InternStatus::ALL.iter().map(|s| (s.as_str(), 0)).collect();
    for intern in interns {
        if let Ok(status) = intern.status() {
            *interns_by_status.entry(status.as_str()).or_default() += 1;
        }
    }

    let mut projects_by_status: BTreeMap<&'static str, usize> = [ProjectStatus::Ongoing, ProjectStatus::Completed]
        .iter()
        .map(|s| (s.as_str(), 0))
        .collect();
    for project in projects {
        for status in [ProjectStatus::Ongoing, ProjectStatus::Completed] {
            if project.is(status) {
                *projects_by_status.entry(status.as_str()).or_default() += 1;
            }
        }
    }

    let attendances: Vec<f64> = interns
        .iter()
        .filter(|i| i.status().ok() == Some(InternStatus::Completed))
        .filter_map(|i| i.attendance)
        .collect();
    let average_attendance = (!attendances.is_empty()).then(|| {
        let mean = attendances.iter().sum::<f64>() / attendances.len() as f64;
        (mean * 10.0).round() / 10.0
    });

    let monthly_onboarding = (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = month_before(today, back);
            let count = interns
                .iter()
                .filter(|i| {
                    let created = i.created_at.date_naive();
                    created.year() == year && created.month() == month
                })
                .count();
            MonthCount {
                month: format!("{year:04}-{month:02}"),
                count,
            }
        })
        .collect();

    AnalyticsReport {
        interns_total: interns.len(),
        interns_by_status,
        projects_by_status,
        certificates_issued,
        mentors_total,
        average_attendance,
        monthly_onboarding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn intern(status: &str, created: (i32, u32, u32), attendance: Option<f64>) -> InternRow {
        InternRow {
            id: Uuid::new_v4(),
            name: "Intern".to_string(),
            email: "intern@lab.example.org".to_string(),
            department: "Signals".to_string(),
            skills: vec![],
            status: status.to_string(),
            mentor_id: None,
            project_title: None,
            project_description: None,
            start_date: None,
            end_date: None,
            attendance,
            remarks: None,
            created_at: Utc
                .with_ymd_and_hms(created.0, created.1, created.2, 12, 0, 0)
                .unwrap(),
        }
    }

    fn project(status: &str) -> ProjectRow {
        ProjectRow {
            id: Uuid::new_v4(),
            intern_id: Uuid::new_v4(),
            mentor_id: Uuid::new_v4(),
            title: "Project".to_string(),
            description: String::new(),
            status: status.to_string(),
            start_date: Utc::now(),
            end_date: None,
            attendance: None,
            remarks: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_month_before_crosses_year() {
        assert_eq!(month_before(today(), 0), (2024, 3));
        assert_eq!(month_before(today(), 2), (2024, 1));
        assert_eq!(month_before(today(), 3), (2023, 12));
        assert_eq!(month_before(today(), 14), (2023, 1));
    }

    #[test]
    fn test_empty_report() {
        let report = build_report(&[], &[], 0, 0, today());
        assert_eq!(report.interns_total, 0);
        assert!(report.interns_by_status.values().all(|&n| n == 0));
        assert_eq!(report.interns_by_status.len(), InternStatus::ALL.len());
        assert_eq!(report.average_attendance, None);
        assert_eq!(report.monthly_onboarding.len(), TREND_MONTHS as usize);
        assert!(report.monthly_onboarding.iter().all(|m| m.count == 0));
    }

    #[test]
    fn test_counts_and_average() {
        let interns = vec![
            intern("pending", (2024, 3, 1), None),
            intern("completed", (2024, 1, 10), Some(90.0)),
            intern("completed", (2023, 12, 5), Some(85.0)),
            intern("completed", (2023, 11, 5), None),
            intern("ongoing", (2023, 6, 5), Some(40.0)),
        ];
        let projects = vec![project("ongoing"), project("completed"), project("completed")];
        let report = build_report(&interns, &projects, 2, 3, today());

        assert_eq!(report.interns_total, 5);
        assert_eq!(report.interns_by_status["completed"], 3);
        assert_eq!(report.interns_by_status["pending"], 1);
        assert_eq!(report.interns_by_status["rejected"], 0);
        assert_eq!(report.projects_by_status["completed"], 2);
        assert_eq!(report.projects_by_status["ongoing"], 1);
        assert_eq!(report.certificates_issued, 2);
        assert_eq!(report.mentors_total, 3);
        // Ongoing attendance and completed-without-attendance are ignored.
        assert_eq!(report.average_attendance, Some(87.5));
    }

    #[test]
    fn test_monthly_onboarding_is_oldest_first() {
        let interns = vec![
            intern("pending", (2024, 3, 1), None),
            intern("pending", (2024, 3, 31), None),
            intern("pending", (2023, 12, 5), None),
            intern("pending", (2023, 9, 30), None), // outside the window
        ];
        let report = build_report(&interns, &[], 0, 0, today());
        let trend: Vec<(&str, usize)> = report
            .monthly_onboarding
            .iter()
            .map(|m| (m.month.as_str(), m.count))
            .collect();
        assert_eq!(
            trend,
            vec![
                ("2023-10", 0),
                ("2023-11", 0),
                ("2023-12", 1),
                ("2024-01", 0),
                ("2024-02", 0),
                ("2024-03", 2),
            ]
        );
    }
}
