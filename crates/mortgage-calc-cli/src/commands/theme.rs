use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use crate::preferences::{PreferenceStore, Theme};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

/// Arguments for showing or changing the saved display theme
#[derive(Args)]
pub struct ThemeArgs {
    /// New theme; omit to show the current one
    #[arg(value_enum)]
    pub action: Option<ThemeAction>,
}

pub fn run_theme(
    args: ThemeArgs,
    store: Option<&PreferenceStore>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let store =
        store.ok_or("could not determine a configuration directory; set MORTGAGE_CALC_CONFIG_DIR")?;
    let current = store.load_theme();

    let next = match args.action {
        None => {
            return Ok(json!({
                "theme": current.as_str(),
                "path": store.path().display().to_string(),
            }))
        }
        Some(ThemeAction::Light) => Theme::Light,
        Some(ThemeAction::Dark) => Theme::Dark,
        Some(ThemeAction::Toggle) => current.toggled(),
    };

    store.save_theme(next)?;
    Ok(json!({
        "theme": next.as_str(),
        "previous": current.as_str(),
        "path": store.path().display().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(dir.path());

        let args = ThemeArgs {
            action: Some(ThemeAction::Toggle),
        };
        let value = run_theme(args, Some(&store)).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["previous"], "light");

        let value = run_theme(ThemeArgs { action: None }, Some(&store)).unwrap();
        assert_eq!(value["theme"], "dark");
    }

    #[test]
    fn test_no_store_is_error() {
        assert!(run_theme(ThemeArgs { action: None }, None).is_err());
    }
}
