use stagehand::application::dev::{ActivityFilter, CloseStatus, DevEvent};
use stagehand::InstanceDescriptor;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::outputs::render_outputs;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_dev_header(
    instance: &InstanceDescriptor,
    directory: &str,
    filter: &ActivityFilter,
    dashboard: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "Stagehand Dev Mode");
    header.add(
        "Instance",
        format!("{} ({})", instance.name, instance.component),
    );
    header.add(
        "Target",
        format!("{} / {} / {}", instance.org, instance.app, instance.stage),
    );
    header.add("Directory", directory);
    if filter.is_app_level() {
        header.add("Activity", format!("application level ({})", filter.describe()));
    }
    header.add("Dashboard", dashboard);
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

/// Whether an event belongs on stderr
pub fn is_error_event(event: &DevEvent) -> bool {
    matches!(
        event,
        DevEvent::DeployFailed { .. }
            | DevEvent::UnknownStatus { .. }
            | DevEvent::StreamWarning { .. }
            | DevEvent::Closed {
                status: CloseStatus::Error,
                ..
            }
    )
}

/// Render one event as terminal text. Returns an empty string for events
/// that are only shown in verbose mode when `verbose` is false.
pub fn render_dev_event(
    timestamp: &str,
    event: &DevEvent,
    verbose: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        DevEvent::Started { .. } => format!(
            "{} {} Dev Mode - Watching your component for changes and enabling streaming logs, if supported...\n",
            prefix,
            icon(Icon::Watch)
        ),
        DevEvent::Status { label } => format!("{} {} {}\n", prefix, icon(Icon::Progress), label),
        DevEvent::FileChanged { path } => {
            format!("{} {} Changed: {}\n", prefix, icon(Icon::Arrow), path)
        }
        DevEvent::DeployStarted { reason } if verbose => format!(
            "{} {} Deploy started ({:?})\n",
            prefix,
            icon(Icon::Deploy),
            reason
        ),
        DevEvent::DeployStarted { .. } => String::new(),
        DevEvent::Deployed { instance, outputs } => format!(
            "{} {} {} - deployment\n{}",
            prefix,
            icon(Icon::Success),
            instance,
            render_outputs(outputs, supports_color)
        ),
        DevEvent::DeployFailed { instance, detail } => format!(
            "{} {} {} - deployment error\n{}\n",
            prefix,
            icon(Icon::Error),
            instance,
            ColoredText::error(detail.as_str()).render(supports_color)
        ),
        DevEvent::UnknownStatus { status, .. } => format!(
            "{} {} {}\n",
            prefix,
            icon(Icon::Error),
            ColoredText::error(format!(
                "Deployment failed due to unknown deployment status: {}",
                status
            ))
            .render(supports_color)
        ),
        DevEvent::StreamWarning { message } => {
            format!("{} {} {}\n", prefix, icon(Icon::Warning), message)
        }
        DevEvent::Watching => format!("{} {} Watching\n", prefix, icon(Icon::Watch)),
        DevEvent::Closed { status, message } => {
            let (mark, text) = match status {
                CloseStatus::Success => (Icon::Success, ColoredText::success(message.as_str())),
                CloseStatus::Error => (Icon::Error, ColoredText::error(message.as_str())),
            };
            format!(
                "\n{} {} {}\n",
                prefix,
                icon(mark),
                text.render(supports_color)
            )
        }
    }
}
