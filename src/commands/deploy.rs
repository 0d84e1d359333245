use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use stagehand::application::{DeployUseCase, StatusPoller};
use stagehand::domain::ports::SystemClock;

use crate::cli::ColorWhen;
use crate::ui::context::UiContext;

/// Deploy once with debugging disabled. Returns whether the instance is active.
pub fn cmd_deploy(dir: &Path, json: bool, verbose: u8, color: Option<ColorWhen>) -> Result<bool> {
    let settings = super::load_settings(json);
    let ui = UiContext::new(json, verbose, color, &settings);

    let project = super::load_project(dir, &settings)?;
    let client = super::platform_client(&settings)?;
    let dashboard = project.instance.dashboard_url(settings.platform.dev_dashboard);

    if !json {
        print!(
            "{}",
            crate::ui::views::deploy::render_deploy_header(
                &project.instance,
                &project.dir.display().to_string(),
                ui.color,
                ui.unicode,
            )
        );
    }

    let poller = StatusPoller::new(client.clone(), SystemClock::new())
        .with_poll_interval(Duration::from_millis(settings.dev.poll_interval_ms));
    let result =
        DeployUseCase::new(&poller, &client).execute(&project.instance, &project.credentials);

    if json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "command": "deploy",
            "event": "complete",
            "instance": result.outcome.instance_name,
            "status": result.outcome.status.as_str(),
            "outputs": result.outcome.outputs,
            "error": result.outcome.error,
            "warnings": result.warnings,
            "dashboard": dashboard,
        }));
    } else {
        let rendered = crate::ui::views::deploy::render_deploy_result(
            &result,
            &dashboard,
            ui.color,
            ui.unicode,
        );
        if result.is_success() {
            print!("{rendered}");
        } else {
            eprint!("{rendered}");
        }
    }

    Ok(result.is_success())
}
