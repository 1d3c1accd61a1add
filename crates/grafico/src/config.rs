use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use fatia::Color;
use fatia::layout::SliceInput;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Pie,
    #[strum(serialize = "Donut", serialize = "doughnut", serialize = "ring")]
    Donut,
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ChartTitle(String);

fatia::impl_string_newtype!(ChartTitle);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SliceEntry {
    pub value: f64,
    pub label: String,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub title: Option<ChartTitle>,
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub slices: Vec<SliceEntry>,
}

impl Config {
    pub fn inputs(&self) -> Vec<SliceInput> {
        self.slices
            .iter()
            .map(|entry| {
                let input = SliceInput::new(entry.value, entry.label.clone());
                match entry.color {
                    Some(color) => input.with_color(color),
                    None => input,
                }
            })
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "grafico").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("GRAFICO"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, or the built-in sample chart when there is none
/// (or it fails to parse). The window should always show *something*.
pub fn load_or_sample() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return sample_config();
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to the sample chart: {}", e);
            sample_config()
        }
    }
}

fn sample_config() -> Config {
    let slices = [
        (10.0, "a", "#fcba03"),
        (10.0, "b", "#03fc3d"),
        (20.0, "c", "#0377fc"),
        (20.0, "d", "#d703fc"),
        (20.0, "e", "#411d47"),
        (20.0, "f", "#656d73"),
    ];

    Config {
        title: Some(ChartTitle::new("Sample chart")),
        kind: ChartKind::Donut,
        slices: slices
            .into_iter()
            .map(|(value, label, color)| SliceEntry {
                value,
                label: label.to_string(),
                color: color.parse().ok(),
            })
            .collect(),
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_deserialization() {
        let cases = vec![
            ("\"pie\"", ChartKind::Pie),
            ("\"Pie\"", ChartKind::Pie),
            ("\"PIE\"", ChartKind::Pie),
            ("\"donut\"", ChartKind::Donut),
            ("\"Doughnut\"", ChartKind::Donut),
            ("\"ring\"", ChartKind::Donut),
        ];

        for (json, expected) in cases {
            let deserialized: ChartKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_slice_entry_with_hex_color() {
        let entry: SliceEntry =
            serde_json::from_str(r##"{"value": 20, "label": "c", "color": "#0377fc"}"##).unwrap();
        assert_eq!(entry.color, Some("#0377fc".parse().unwrap()));

        let bare: SliceEntry = serde_json::from_str(r#"{"value": 20, "label": "c"}"#).unwrap();
        assert!(bare.color.is_none());
    }

    #[test]
    fn test_inputs_preserve_order_and_colors() {
        let config = sample_config();
        let inputs = config.inputs();

        assert_eq!(inputs.len(), 6);
        assert_eq!(inputs[0].label.as_ref(), "a");
        assert_eq!(inputs[2].color, Some("#0377fc".parse().unwrap()));
        assert_eq!(
            inputs.iter().map(|i| i.value).sum::<f64>(),
            fatia::layout::FULL_BUDGET
        );
    }
}
