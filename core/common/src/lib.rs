//! Kaleido 共通ライブラリ
//!
//! フロントエンド（`kaleido` コマンド）から使われるエラー型・LLM プロバイダ・outbound ポートと標準アダプタを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// LLMドライバーとプロバイダ
pub mod llm;

/// Outbound ポート
pub mod ports;

/// ポートの標準実装
pub mod adapter;
