use stagehand::{ConfigError, PlatformError, StagehandError};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Suggested next step for errors a user can fix themselves
fn fix_hint(err: &StagehandError) -> Option<String> {
    match err {
        StagehandError::Config(ConfigError::NotFound { .. }) => Some(
            "Run from a directory with serverless.yml, serverless.yaml or serverless.json, or pass -C <dir>."
                .to_string(),
        ),
        StagehandError::Config(ConfigError::MissingField { field: "org", file }) => Some(format!(
            "Add `org: <your-org>` to {}, or set SERVERLESS_ORG.",
            file.display()
        )),
        StagehandError::Config(ConfigError::MissingField { field, file }) => {
            Some(format!("Add `{}: ...` to {}.", field, file.display()))
        }
        StagehandError::Platform(PlatformError::Status { status: 401, .. })
        | StagehandError::Platform(PlatformError::Status { status: 403, .. }) => {
            Some("Check SERVERLESS_ACCESS_KEY or `access_key` in your settings.".to_string())
        }
        _ => None,
    }
}

pub(crate) fn format_error_with(
    err: &anyhow::Error,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).render(supports_color)
    );

    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }

    if let Some(hint) = err.downcast_ref::<StagehandError>().and_then(fix_hint) {
        out.push_str(&format!(
            "  {} {}\n",
            ColoredText::info("FIX:").bold().render(supports_color),
            hint
        ));
    }
    out
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        }));
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!(
        "{}",
        format_error_with(err, caps.supports_color, caps.supports_unicode)
    );
}
