use stagehand::config::SettingsWarning;

use crate::ui::primitives::icon::Icon;

pub fn render_settings_warnings(warnings: &[SettingsWarning], supports_unicode: bool) -> String {
    let icon = Icon::Warning.render(supports_unicode);
    let mut out = String::new();
    for w in warnings {
        match w.line {
            Some(line) => out.push_str(&format!(
                "{} Unknown settings key '{}' in {}:{}\n",
                icon,
                w.key,
                w.file.display(),
                line
            )),
            None => out.push_str(&format!(
                "{} Unknown settings key '{}' in {}\n",
                icon,
                w.key,
                w.file.display()
            )),
        }

        if let Some(suggestion) = &w.suggestion {
            out.push_str(&format!("   Did you mean '{}'?\n", suggestion));
        }
    }
    out
}

pub fn print_settings_warnings(warnings: &[SettingsWarning], supports_unicode: bool) {
    eprint!("{}", render_settings_warnings(warnings, supports_unicode));
}
