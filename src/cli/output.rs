use crate::cli::OutputFormat;
use crate::types::{DeployOperation, DeploymentReport};
use std::fmt::Write;

/// Renders a deployment report in the requested format.
pub fn render_report(report: &DeploymentReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize report: {e}\"}}")),
        OutputFormat::Text => render_text(report),
    }
}

pub fn print_report(report: &DeploymentReport, format: OutputFormat) {
    println!("{}", render_report(report, format));
}

fn render_text(report: &DeploymentReport) -> String {
    let mut out = String::new();
    let title = match report.operation {
        DeployOperation::All => "App Engine deployment complete".to_string(),
        DeployOperation::Config(kind) => format!("App Engine {kind} configuration deployed"),
    };

    let _ = writeln!(out, "✅ {title}");
    let _ = writeln!(out, "  • Deployment: {}", report.deployment_id);
    let _ = writeln!(out, "  • Environment: {}", report.mode);
    let _ = writeln!(
        out,
        "  • Project: {}",
        report.identity.project.as_deref().unwrap_or("(gcloud config)")
    );
    let _ = writeln!(
        out,
        "  • Version: {}",
        report.identity.version.as_deref().unwrap_or("(gcloud config)")
    );
    let _ = writeln!(out, "  • Files:");
    for file in &report.deployed_files {
        let _ = writeln!(out, "      {}", file.display());
    }

    let elapsed = report.completed_at - report.started_at;
    let _ = write!(out, "  • Duration: {}ms", elapsed.num_milliseconds());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfigKind, DeploymentIdentity, RuntimeMode};
    use chrono::Utc;
    use std::path::PathBuf;

    fn report(operation: DeployOperation) -> DeploymentReport {
        let now = Utc::now();
        DeploymentReport {
            deployment_id: "id-1".to_string(),
            operation,
            mode: RuntimeMode::Flexible,
            identity: DeploymentIdentity {
                project: None,
                version: Some("1".to_string()),
            },
            deployed_files: vec![PathBuf::from("stage/app.yaml")],
            started_at: now,
            completed_at: now,
        }
    }

    #[test]
    fn test_text_report_marks_ambient_project() {
        let text = render_report(&report(DeployOperation::All), OutputFormat::Text);
        assert!(text.contains("Project: (gcloud config)"));
        assert!(text.contains("Version: 1"));
        assert!(text.contains("stage/app.yaml"));
    }

    #[test]
    fn test_json_report() {
        let json = render_report(
            &report(DeployOperation::Config(ConfigKind::Cron)),
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["mode"], "flexible");
        assert_eq!(value["operation"]["config"], "cron");
        assert!(value["identity"]["project"].is_null());
    }
}
