use std::fmt::Write;

use crate::cli::{Cli, ConfigArgs};
use crate::config::{FileSystem, RealFileSystem, SettingKey, Settings, SettingsStore, Tier};
use crate::output::{ColorMode, ErrorOutput, display_path};
use crate::{EXIT_SUCCESS, Result};

use super::context::{normalize_extensions, report_error, resolve_folder};

/// Text to print and non-fatal warnings from a `config` invocation.
#[derive(Debug, Default)]
pub struct ConfigOutcome {
    pub output: String,
    pub warnings: Vec<String>,
}

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    let color = ColorMode::from(cli.color);
    match run_config_impl(args, RealFileSystem) {
        Ok(outcome) => {
            print!("{}", outcome.output);
            if !cli.quiet {
                let out = ErrorOutput::new(color);
                for warning in &outcome.warnings {
                    out.print_warning(warning);
                }
            }
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, color),
    }
}

/// Apply deletions and new values to one tier, then list if asked.
///
/// With no values, no deletions and no `--list`, both tiers are listed.
///
/// # Errors
/// Returns an error if the folder is missing or a settings file cannot be
/// read, parsed or written.
pub fn run_config_impl<F: FileSystem>(args: &ConfigArgs, fs: F) -> Result<ConfigOutcome> {
    let folder = resolve_folder(&args.folder)?;
    let store = SettingsStore::with_fs(fs, folder);
    let tier = if args.global { Tier::User } else { Tier::Folder };
    let mut outcome = ConfigOutcome::default();

    let has_updates = args.extensions.is_some()
        || args.ignore.is_some()
        || args.case_insensitive.is_some()
        || !args.delete.is_empty();

    if has_updates {
        let mut settings = store.load(tier)?;
        let deleted = apply_deletions(&mut settings, &args.delete, tier, &mut outcome.warnings);
        let updated = apply_values(&mut settings, args);

        if deleted || updated {
            let path = store.save(tier, &settings)?;
            writeln!(
                outcome.output,
                "Saved {} settings to {}",
                tier.label(),
                display_path(&path, None)
            )
            .ok();
        }
    }

    if args.list || !has_updates {
        outcome.output.push_str(&list_settings(&store)?);
    }

    Ok(outcome)
}

fn apply_deletions(
    settings: &mut Settings,
    keys: &[String],
    tier: Tier,
    warnings: &mut Vec<String>,
) -> bool {
    let mut changed = false;
    for raw in keys {
        match raw.parse::<SettingKey>() {
            Ok(key) if settings.delete(key) => {
                tracing::debug!(key = key.as_str(), tier = tier.label(), "deleted setting");
                changed = true;
            }
            Ok(key) => warnings.push(format!("`{key}` is not set in the {} settings", tier.label())),
            Err(message) => warnings.push(format!(
                "{message} (expected one of: {})",
                SettingKey::ALL.map(SettingKey::as_str).join(", ")
            )),
        }
    }
    changed
}

fn apply_values(settings: &mut Settings, args: &ConfigArgs) -> bool {
    let mut changed = false;
    if let Some(ref extensions) = args.extensions {
        settings.defaults.extensions = Some(normalize_extensions(extensions));
        changed = true;
    }
    if let Some(ref ignore) = args.ignore {
        settings.defaults.ignore = Some(ignore.clone());
        changed = true;
    }
    if let Some(case_insensitive) = args.case_insensitive {
        settings.defaults.case_insensitive = Some(case_insensitive);
        changed = true;
    }
    changed
}

/// Render both tiers, user first.
fn list_settings<F: FileSystem>(store: &SettingsStore<F>) -> Result<String> {
    let mut output = String::new();
    for tier in [Tier::User, Tier::Folder] {
        let location = store
            .path(tier)
            .map_or_else(|| "unavailable".to_string(), |p| display_path(&p, None));
        writeln!(output, "[{}] {location}", tier.label()).ok();

        let settings = store.load(tier)?;
        if settings.is_empty() {
            writeln!(output, "  (not set)").ok();
        }
        for (key, value) in settings.entries() {
            writeln!(output, "  {key} = {value}").ok();
        }
    }
    Ok(output)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
