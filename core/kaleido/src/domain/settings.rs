//! 設定（settings.json）と CLI 上書きの解決
//!
//! 優先順位は CLI > settings.json > 既定値。
//! CLI 由来の不正値は InvalidArgument、settings.json 由来の不正値は Config エラーにする。

use crate::domain::persona::{Choice, Interest, Language, LearningStyle, PersonaConfig};
use common::domain::{ModelName, ProviderName};
use common::error::Error;
use common::llm::ProviderType;
use serde::Deserialize;
use std::path::PathBuf;

/// 既定で探す認証情報の環境変数（先頭優先）
pub const DEFAULT_API_KEY_ENVS: &[&str] = &["GOOGLE_API_KEY", "GEMINI_API_KEY"];

/// `<config_dir>/settings.json` の内容。全項目省略可。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default, alias = "type")]
    pub provider: Option<String>,
    #[serde(default, alias = "default_model")]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub interest: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub diagram_format: Option<String>,
    #[serde(default)]
    pub diagram_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid settings: {}", e)))
    }
}

/// ダイアグラムの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramFormat {
    #[default]
    Svg,
    Png,
}

impl DiagramFormat {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(Error::invalid_argument(format!(
                "Unknown diagram format '{}' (choose one of: svg, png)",
                other
            ))),
        }
    }

    /// 拡張子兼 `dot -T` の値
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// CLI から渡される上書き値
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub provider: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub interest: Option<String>,
    pub language: Option<String>,
    pub style: Option<String>,
    pub diagram_format: Option<String>,
    pub diagram_dir: Option<PathBuf>,
}

/// 解決済みの実行設定
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub provider: ProviderType,
    pub model: Option<String>,
    /// 認証情報を探す環境変数名（先頭優先）
    pub api_key_envs: Vec<String>,
    pub temperature: Option<f32>,
    pub persona: PersonaConfig,
    pub diagram_format: DiagramFormat,
    pub diagram_dir: PathBuf,
}

/// CLI 値 → 設定ファイル値の順に採用する。設定ファイル側の解析失敗は Config エラーに読み替える。
fn pick<T>(
    cli: Option<&str>,
    file: Option<&str>,
    parse: impl Fn(&str) -> Result<T, Error>,
) -> Result<Option<T>, Error> {
    if let Some(v) = cli {
        return parse(v).map(Some);
    }
    match file {
        Some(v) => parse(v)
            .map(Some)
            .map_err(|e| Error::config(format!("settings.json: {}", e))),
        None => Ok(None),
    }
}

fn parse_provider(s: &str) -> Result<ProviderType, Error> {
    ProviderType::from_str(s).ok_or_else(|| {
        Error::invalid_argument(format!(
            "Unknown provider: {} (available: {})",
            s,
            ProviderType::names().join(", ")
        ))
    })
}

/// settings.json と CLI 上書きから実行設定を決める
///
/// `default_diagram_dir` は `Dirs::diagrams_dir()` を渡す。
pub fn resolve_settings(
    settings: &Settings,
    overrides: &SettingsOverrides,
    default_diagram_dir: PathBuf,
) -> Result<ResolvedSettings, Error> {
    let provider = pick(
        overrides.provider.as_deref(),
        settings.provider.as_deref(),
        parse_provider,
    )?
    .unwrap_or(ProviderType::Gemini);

    let model = overrides
        .model
        .as_ref()
        .map(|m| m.to_string())
        .or_else(|| settings.model.clone())
        .filter(|m| !m.trim().is_empty());

    let api_key_envs = match settings.api_key_env.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => vec![name.to_string()],
        _ => DEFAULT_API_KEY_ENVS.iter().map(|s| s.to_string()).collect(),
    };

    if let Some(t) = settings.temperature {
        if !(0.0..=2.0).contains(&t) {
            return Err(Error::config(format!(
                "settings.json: temperature must be between 0.0 and 2.0 (got {})",
                t
            )));
        }
    }

    let persona = PersonaConfig {
        interest: pick(
            overrides.interest.as_deref(),
            settings.interest.as_deref(),
            Interest::from_slug,
        )?
        .unwrap_or_default(),
        language: pick(
            overrides.language.as_deref(),
            settings.language.as_deref(),
            Language::from_slug,
        )?
        .unwrap_or_default(),
        style: pick(
            overrides.style.as_deref(),
            settings.style.as_deref(),
            LearningStyle::from_slug,
        )?
        .unwrap_or_default(),
    };

    let diagram_format = pick(
        overrides.diagram_format.as_deref(),
        settings.diagram_format.as_deref(),
        DiagramFormat::parse,
    )?
    .unwrap_or_default();

    let diagram_dir = overrides
        .diagram_dir
        .clone()
        .or_else(|| settings.diagram_dir.clone())
        .unwrap_or(default_diagram_dir);

    Ok(ResolvedSettings {
        provider,
        model,
        api_key_envs,
        temperature: settings.temperature,
        persona,
        diagram_format,
        diagram_dir,
    })
}
