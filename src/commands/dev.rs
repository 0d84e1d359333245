use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use stagehand::application::dev::{ActivityFilter, DevEvent, DevSession, FilterScope};
use stagehand::application::StatusPoller;
use stagehand::config::InstanceLoader;
use stagehand::domain::ports::SystemClock;
use stagehand::infrastructure::{subscribe, WatchFilter};

use crate::cli::{ColorWhen, FilterWhen};
use crate::ui::context::UiContext;

/// Run dev mode until the session closes. Returns whether it closed cleanly.
pub fn cmd_dev(
    dir: &Path,
    filter: Option<FilterWhen>,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
) -> Result<bool> {
    let settings = super::load_settings(json);
    let ui = UiContext::new(json, verbose, color, &settings);

    let project = super::load_project(dir, &settings)?;
    let client = super::platform_client(&settings)?;

    let scope = match filter {
        Some(FilterWhen::App) => FilterScope::App,
        None => FilterScope::Instance,
    };
    let activity = ActivityFilter::new(&project.instance, scope);
    let directory = project.dir.display().to_string();

    if !json {
        print!(
            "{}",
            crate::ui::views::dev::render_dev_header(
                &project.instance,
                &directory,
                &activity,
                &project.instance.dashboard_url(settings.platform.dev_dashboard),
                ui.color,
                ui.unicode,
            )
        );
    }
    emit(
        &ui,
        &DevEvent::Started {
            instance: project.instance.name.clone(),
            directory: directory.clone(),
            filter: activity,
        },
    );

    let poller = StatusPoller::new(client.clone(), SystemClock::new())
        .with_poll_interval(Duration::from_millis(settings.dev.poll_interval_ms));
    let loader = InstanceLoader::new(&project.dir, settings.platform.org.clone());

    let session = DevSession::new(
        project.instance,
        project.credentials,
        Arc::new(poller),
        Arc::new(loader),
        Arc::new(client),
    );

    // Every interrupt or termination signal is forwarded; the session decides between teardown and abort.
    let interrupts = session.handle();
    ctrlc::set_handler(move || interrupts.shutdown())
        .context("failed to install signal handler")?;

    let watch_filter = WatchFilter::new(&project.dir, &settings.dev.ignore)?;
    let changes = session.handle();
    let _watch = subscribe(&project.dir, watch_filter, move |path| changes.changed(path))?;
    session.handle().ready();

    let report = session.run(|event| emit(&ui, &event))?;
    Ok(report.is_success())
}

fn emit(ui: &UiContext, event: &DevEvent) {
    if ui.json {
        let _ = crate::ui::json::emit_line(&event.to_json());
        return;
    }

    let rendered = crate::ui::views::dev::render_dev_event(
        &super::timestamp(),
        event,
        ui.verbose > 0,
        ui.color,
        ui.unicode,
    );
    if rendered.is_empty() {
        return;
    }
    if crate::ui::views::dev::is_error_event(event) {
        eprint!("{rendered}");
    } else {
        print!("{rendered}");
    }
}
