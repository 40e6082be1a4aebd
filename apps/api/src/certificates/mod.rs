//! Completion certificates: code generation and the static HTML rendering.

pub mod handlers;
pub mod repo;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interns::status::InternStatus;
use crate::models::certificate::CertificateRow;
use crate::models::intern::InternRow;
use crate::models::project::{ProjectRow, ProjectStatus};

/// `CERT-YYYYMMDD-XXXXXXXX`: issue date plus the first eight hex digits of
/// the certificate id, upper-cased.
pub fn certificate_code(id: Uuid, issued: DateTime<Utc>) -> String {
    let hex = id.simple().to_string();
    format!(
        "CERT-{}-{}",
        issued.format("%Y%m%d"),
        hex[..8].to_ascii_uppercase()
    )
}

/// Certificates go to completed interns, for a completed project of theirs.
pub fn ensure_certifiable(intern: &InternRow, project: Option<ProjectRow>) -> Result<ProjectRow, AppError> {
    if intern.status != InternStatus::Completed.as_str() {
        return Err(AppError::Conflict(format!(
            "intern {} has status '{}', certificates are issued on completion",
            intern.id, intern.status
        )));
    }
    match project {
        Some(project) if project.intern_id == intern.id && project.is(ProjectStatus::Completed) => Ok(project),
        _ => Err(AppError::Conflict(format!(
            "intern {} has no completed project",
            intern.id
        ))),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn date_or_na(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

const CERTIFICATE_STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 0; padding: 40px; background: #eef2fb; }
    .certificate { background: white; padding: 60px; border: 10px solid #1e3a8a; max-width: 800px; margin: 0 auto; text-align: center; }
    .title { font-size: 36px; color: #1e3a8a; font-weight: bold; border-bottom: 3px solid #1e3a8a; padding-bottom: 20px; }
    .content { font-size: 18px; line-height: 1.8; margin: 30px 0; }
    .name { font-size: 28px; font-weight: bold; color: #1e3a8a; }
    .project { font-style: italic; color: #374151; }
    .footer { margin-top: 40px; border-top: 2px solid #1e3a8a; padding-top: 20px; font-size: 14px; text-align: left; }
"#;

/// Renders a self-contained HTML page. Every interpolated value is escaped.
pub fn render_certificate_html(
    certificate: &CertificateRow,
    intern: &InternRow,
    project: &ProjectRow,
) -> String {
    let attendance = project
        .attendance
        .or(intern.attendance)
        .map(|a| format!("{a}%"))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Internship Certificate {code}</title>
  <style>{style}</style>
</head>
<body>
  <div class="certificate">
    <div class="title">CERTIFICATE OF COMPLETION</div>
    <div class="content">
      <p>This is to certify that</p>
      <p class="name">{name}</p>
      <p>has successfully completed the internship project</p>
      <p class="project">{title}</p>
      <p>Department: <strong>{department}</strong></p>
      <p>Duration: {start} to {end}</p>
      <p>Attendance: <strong>{attendance}</strong></p>
    </div>
    <div class="footer">
      <p>Certificate ID: {code}</p>
      <p>Issue Date: {issued}</p>
    </div>
  </div>
</body>
</html>
"#,
        style = CERTIFICATE_STYLE,
        code = escape_html(&certificate.certificate_code),
        name = escape_html(&intern.name),
        title = escape_html(&project.title),
        department = escape_html(&intern.department),
        start = date_or_na(Some(project.start_date)),
        end = date_or_na(project.end_date.or(intern.end_date)),
        attendance = escape_html(&attendance),
        issued = certificate.issue_date.format("%Y-%m-%d"),
    )
}
