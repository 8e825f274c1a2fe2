//! Editor entry points: typed configs and schema files.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use log::info;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::{
    data::panel::{Events, Panel, PanelOptions},
    schema::fields_from_schema,
    store::FileStore,
};

/// Run the configuration editor workflow for a typed config.
///
/// When `always_use_ui` is false and the config file can be parsed,
/// the parsed config is returned without launching the UI. Otherwise
/// the fields are derived from `C`'s schema and the panel opens on the
/// file; `Some` is returned only when the user saved.
///
/// # Errors
///
/// Returns errors when schema conversion, parsing, or I/O fails.
pub async fn edit<C: JsonSchema + DeserializeOwned>(
    config_path: impl AsRef<Path>,
    always_use_ui: bool,
    events: Events,
) -> anyhow::Result<Option<C>> {
    let config_path = config_path.as_ref();
    let schema = schemars::schema_for!(C);
    let schema_json = serde_json::to_value(&schema)?;

    let content = tokio::fs::read_to_string(config_path)
        .await
        .unwrap_or_default();
    let ext = config_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string();

    if let Ok(c) = to_typed::<C>(&content, &ext)
        && !always_use_ui
    {
        return Ok(Some(c));
    }

    let fields = fields_from_schema(&schema_json)?;
    let title = schema_json
        .get("title")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("Configuration")
        .to_string();

    let mut panel = Panel::new(
        PanelOptions::new(panel_id(config_path), title, fields).events(events),
        Arc::new(FileStore::new(config_path)),
    )?;
    panel.open()?;

    if !panel.saved() {
        return Ok(None);
    }

    let val = serde_json::Value::Object(panel.to_json());
    let c = match ext.as_str() {
        "json" => serde_json::from_value(val)?,
        "toml" | "tml" => {
            let content = toml::to_string_pretty(&val)?;
            toml::from_str(&content)?
        }
        _ => anyhow::bail!("unsupported config file extension: {ext}"),
    };
    Ok(Some(c))
}

/// Open the panel for a config file described by a JSON Schema file.
///
/// The schema path defaults to `<stem>-schema.json` next to the config
/// file. Returns whether the user saved.
///
/// # Errors
///
/// Returns errors when the schema is missing or invalid, or I/O fails.
pub async fn edit_with_schema(
    config_path: impl AsRef<Path>,
    schema_path: Option<PathBuf>,
    title: Option<String>,
    events: Events,
) -> anyhow::Result<bool> {
    let config_path = config_path.as_ref();
    let schema_path = schema_path.unwrap_or_else(|| default_schema_path(config_path));
    if !schema_path.exists() {
        anyhow::bail!("schema file does not exist: {}", schema_path.display());
    }
    let schema_content = tokio::fs::read_to_string(&schema_path)
        .await
        .with_context(|| format!("failed to read {}", schema_path.display()))?;
    let schema_json: serde_json::Value = serde_json::from_str(&schema_content)?;

    let fields = fields_from_schema(&schema_json)?;
    let title = title
        .or_else(|| {
            schema_json
                .get("title")
                .and_then(|t| t.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| "Configuration".to_string());

    let mut panel = Panel::new(
        PanelOptions::new(panel_id(config_path), title, fields).events(events),
        Arc::new(FileStore::new(config_path)),
    )?;
    panel.open()?;

    if panel.saved() {
        info!("configuration saved to {}", config_path.display());
    }
    Ok(panel.saved())
}

/// Derive a schema path from a config path: `app.toml` → `app-schema.json`.
pub fn default_schema_path(config: &Path) -> PathBuf {
    let stem = config
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());
    let name = format!("{stem}-schema.json");
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}

fn panel_id(config: &Path) -> String {
    config
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string())
}

fn to_typed<C: DeserializeOwned>(s: &str, ext: &str) -> anyhow::Result<C> {
    let c = match ext {
        "json" => serde_json::from_str::<C>(s)?,
        "toml" | "tml" => toml::from_str::<C>(s)?,
        _ => {
            anyhow::bail!("unsupported config file extension: {ext}");
        }
    };
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_path_is_derived_from_config_path() {
        let schema_path = default_schema_path(Path::new("config.toml"));
        assert_eq!(schema_path, PathBuf::from("config-schema.json"));

        let schema_path = default_schema_path(Path::new("conf/app.json"));
        assert_eq!(schema_path, PathBuf::from("conf/app-schema.json"));
    }

    #[test]
    fn typed_parse_honors_extension() {
        #[derive(serde::Deserialize)]
        struct Conf {
            jobs: u32,
        }

        let c: Conf = to_typed("{\"jobs\": 2}", "json").unwrap();
        assert_eq!(c.jobs, 2);

        let c: Conf = to_typed("jobs = 4\n", "toml").unwrap();
        assert_eq!(c.jobs, 4);

        assert!(to_typed::<Conf>("jobs: 4", "yaml").is_err());
    }
}
