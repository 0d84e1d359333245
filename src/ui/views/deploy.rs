use stagehand::application::DeployResult;
use stagehand::InstanceDescriptor;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::outputs::render_outputs;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_deploy_header(
    instance: &InstanceDescriptor,
    directory: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Deploy, "Stagehand Deploy");
    header.add(
        "Instance",
        format!("{} ({})", instance.name, instance.component),
    );
    header.add(
        "Target",
        format!("{} / {} / {}", instance.org, instance.app, instance.stage),
    );
    header.add("Directory", directory);
    header.render(supports_color, supports_unicode)
}

pub fn render_deploy_result(
    result: &DeployResult,
    dashboard: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let outcome = &result.outcome;
    let mut out = String::new();

    for warning in &result.warnings {
        out.push_str(&format!(
            "{} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning(warning).render(supports_color)
        ));
    }

    if result.is_success() {
        out.push_str(&format!(
            "{} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            ColoredText::success(format!("{} deployed", outcome.instance_name))
                .bold()
                .render(supports_color)
        ));
        out.push_str(&render_outputs(&outcome.outputs, supports_color));
        out.push_str(&format!(
            "\n{} {}\n",
            ColoredText::dim("Dashboard:").render(supports_color),
            dashboard
        ));
    } else {
        let detail = match &outcome.error {
            Some(error) => error.detail().to_string(),
            None => format!(
                "Deployment failed due to unknown deployment status: {}",
                outcome.status
            ),
        };
        out.push_str(&format!(
            "{} {} - deployment error\n{}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            outcome.instance_name,
            ColoredText::error(detail).render(supports_color)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use stagehand::{DeploymentOutcome, InstanceStatus};

    fn result(outcome: DeploymentOutcome) -> DeployResult {
        DeployResult {
            outcome,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn success_shows_outputs_and_dashboard() {
        let outcome = DeploymentOutcome {
            instance_name: "api".to_string(),
            status: InstanceStatus::Active,
            outputs: json!({ "url": "https://x" }).as_object().cloned().unwrap(),
            target: None,
            error: None,
        };
        let rendered = render_deploy_result(&result(outcome), "https://dash", false, false);
        assert!(rendered.contains("[OK] api deployed"));
        assert!(rendered.contains("  url: https://x"));
        assert!(rendered.contains("Dashboard: https://dash"));
    }

    #[test]
    fn failure_shows_detail() {
        let outcome = DeploymentOutcome::failed("api", "403 - forbidden");
        let rendered = render_deploy_result(&result(outcome), "https://dash", false, false);
        assert!(rendered.contains("[FAIL] api - deployment error"));
        assert!(rendered.contains("403 - forbidden"));
        assert!(!rendered.contains("Dashboard"));
    }

    #[test]
    fn unknown_status_is_named() {
        let outcome = DeploymentOutcome {
            instance_name: "api".to_string(),
            status: InstanceStatus::Unknown("removing".to_string()),
            outputs: Map::new(),
            target: None,
            error: None,
        };
        let rendered = render_deploy_result(&result(outcome), "https://dash", false, false);
        assert!(rendered.contains("unknown deployment status: removing"));
    }
}
