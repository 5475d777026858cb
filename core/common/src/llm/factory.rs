//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::domain::ApiKey;
use crate::error::Error;
use crate::llm::driver::LlmDriver;
use crate::llm::echo::EchoProvider;
use crate::llm::gemini::GeminiProvider;
use crate::llm::provider::LlmProvider;
use serde_json::Value;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Gemini（generateContent）
    Gemini,
    /// Echo（API を呼ばない）
    Echo,
}

impl ProviderType {
    /// 文字列からプロバイダタイプを解析
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "echo" => Some(Self::Echo),
            _ => None,
        }
    }

    /// プロバイダタイプを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Echo => "echo",
        }
    }

    /// API キーが必要か
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Gemini)
    }

    /// 利用可能なプロバイダ名
    pub fn names() -> &'static [&'static str] {
        &["gemini", "echo"]
    }
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    Gemini(GeminiProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::Gemini(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn make_request_payload(&self, instruction: &str) -> Result<Value, Error> {
        match self {
            Self::Gemini(p) => p.make_request_payload(instruction),
            Self::Echo(p) => p.make_request_payload(instruction),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::Gemini(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::Gemini(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }
}

/// プロバイダを作成する
///
/// # Arguments
/// * `provider_type` - プロバイダタイプ
/// * `model` - モデル名（オプション、デフォルト値が使用される）
/// * `api_key` - 認証情報（Gemini では必須。None なら Error::Env）
/// * `temperature` - 温度（None のとき各プロバイダのデフォルト）
pub fn create_provider(
    provider_type: ProviderType,
    model: Option<String>,
    api_key: Option<ApiKey>,
    temperature: Option<f32>,
) -> Result<AnyProvider, Error> {
    match provider_type {
        ProviderType::Gemini => {
            let api_key = api_key.ok_or_else(|| {
                Error::env("API Key missing! Set GOOGLE_API_KEY or create a .env file with your key.")
            })?;
            Ok(AnyProvider::Gemini(GeminiProvider::new(model, api_key, temperature)))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

/// ドライバーを作成する
pub fn create_driver(
    provider_type: ProviderType,
    model: Option<String>,
    api_key: Option<ApiKey>,
    temperature: Option<f32>,
) -> Result<LlmDriver<AnyProvider>, Error> {
    let provider = create_provider(provider_type, model, api_key, temperature)?;
    Ok(LlmDriver::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_from_str() {
        assert_eq!(ProviderType::from_str("gemini"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::from_str("GEMINI"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::from_str("google"), Some(ProviderType::Gemini));
        assert_eq!(ProviderType::from_str("echo"), Some(ProviderType::Echo));
        assert_eq!(ProviderType::from_str("ECHO"), Some(ProviderType::Echo));
        assert_eq!(ProviderType::from_str("gpt"), None);
    }

    #[test]
    fn test_provider_type_as_str() {
        assert_eq!(ProviderType::Gemini.as_str(), "gemini");
        assert_eq!(ProviderType::Echo.as_str(), "echo");
        assert!(ProviderType::Gemini.requires_api_key());
        assert!(!ProviderType::Echo.requires_api_key());
    }

    #[test]
    fn test_create_gemini_without_key_is_env_error() {
        let err = match create_provider(ProviderType::Gemini, None, None, None) {
            Err(e) => e,
            Ok(_) => panic!("expected missing key error"),
        };
        assert!(matches!(err, Error::Env(_)));
        assert!(err.to_string().contains("API Key missing"));
    }

    #[test]
    fn test_create_gemini_with_key() {
        let p = create_provider(ProviderType::Gemini, None, Some(ApiKey::new("k")), None).unwrap();
        assert_eq!(p.name(), "gemini");
    }

    #[test]
    fn test_create_echo_driver_without_key() {
        let driver = create_driver(ProviderType::Echo, None, None, None).unwrap();
        assert_eq!(driver.provider().name(), "echo");
        assert!(driver.query("hi").is_ok());
    }
}
