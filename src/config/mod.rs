//! Credential and convention configuration.
//!
//! Two persisted values: a global API key under the user config directory,
//! and an optional per-project commit-message convention in
//! `kommit.settings.json`. Settings-file read/write failures are silently
//! tolerated; the flow falls back to re-prompting or proceeds without
//! persistence. A failure to save the API key, by contrast, is fatal.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::prompt::Prompter;

/// Per-project settings file name, looked up in the repository directory.
pub const SETTINGS_FILE: &str = "kommit.settings.json";

/// Fixed convention menu; "Other" asks for free text.
pub const CONVENTION_CHOICES: [&str; 5] = [
    "Conventional Commits",
    "Gitmoji",
    "JIRA-style",
    "Scoped Commits",
    "Other",
];

const APP_DIR: &str = "kommit";
const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Default)]
struct GlobalConfig {
    #[serde(rename = "apiKey", skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct ProjectSettings {
    #[serde(rename = "commitConvention")]
    commit_convention: Option<String>,
}

/// Global credential storage, one JSON file in the user config directory.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at an explicit path (used by tests).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config_dir>/kommit/config.json`.
    pub fn default_location() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(CONFIG_FILE)))
    }

    /// Read the stored API key. Missing or unreadable files count as
    /// "no credential stored".
    pub fn load(&self) -> Option<String> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        let config: GlobalConfig = serde_json::from_str(&data).ok()?;
        config.api_key.filter(|key| !key.is_empty())
    }

    /// Persist the API key, creating parent directories as needed.
    pub fn store(&self, api_key: &str) -> Result<(), ConfigError> {
        let config = GlobalConfig {
            api_key: Some(api_key.to_string()),
        };
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| ConfigError::SaveFailed(std::io::Error::other(e)))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::SaveFailed)?;
        }
        write_atomic(&self.path, &json).map_err(ConfigError::SaveFailed)
    }
}

/// Return the stored API key, prompting once and persisting when absent.
///
/// An empty or dismissed entry is fatal; so is a failure to persist the
/// freshly entered key.
pub fn resolve_api_key(
    store: &CredentialStore,
    prompter: &dyn Prompter,
) -> Result<String, ConfigError> {
    if let Some(key) = store.load() {
        return Ok(key);
    }

    let entered = prompter.prompt_secret("Enter your Groq API key (it's free)")?;
    let key = match entered {
        Some(key) if !key.trim().is_empty() => key.trim().to_string(),
        _ => return Err(ConfigError::MissingApiKey),
    };

    store.store(&key)?;
    println!("API key saved.");
    Ok(key)
}

/// Resolve the commit-message convention for a project.
///
/// Reads `kommit.settings.json` first; when absent or malformed, offers the
/// fixed menu and persists the choice best-effort. Returns `Ok(None)` when
/// the user dismisses the menu (the flow then proceeds without a
/// convention).
pub fn resolve_convention(
    project_dir: &Path,
    prompter: &dyn Prompter,
) -> Result<Option<String>, ConfigError> {
    let path = project_dir.join(SETTINGS_FILE);

    if let Some(existing) = read_convention(&path) {
        return Ok(Some(existing));
    }

    let items: Vec<String> = CONVENTION_CHOICES.iter().map(|s| s.to_string()).collect();
    let selected = prompter.prompt_choice(
        "Select a commit convention or choose Other to define your own",
        &items,
    )?;
    let Some(index) = selected else {
        return Ok(None);
    };

    let mut convention = items[index].clone();
    if convention == "Other" {
        let Some(custom) = prompter.prompt_text("Enter your custom commit convention")? else {
            return Ok(None);
        };
        let custom = custom.trim().to_string();
        if custom.is_empty() {
            return Ok(None);
        }
        convention = custom;
    }

    if let Err(e) = write_convention(&path, &convention) {
        debug!("could not persist convention to {}: {}", path.display(), e);
    }

    Ok(Some(convention))
}

/// Read a previously chosen convention; any failure yields `None`.
fn read_convention(path: &Path) -> Option<String> {
    let data = std::fs::read_to_string(path).ok()?;
    let settings: ProjectSettings = serde_json::from_str(&data).ok()?;
    settings.commit_convention.filter(|c| !c.trim().is_empty())
}

fn write_convention(path: &Path, convention: &str) -> std::io::Result<()> {
    let settings = ProjectSettings {
        commit_convention: Some(convention.to_string()),
    };
    let json = serde_json::to_string_pretty(&settings).map_err(std::io::Error::other)?;
    write_atomic(path, &json)
}

/// Write via a temp file in the same directory, then rename into place.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(parent.unwrap_or(Path::new(".")))?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
