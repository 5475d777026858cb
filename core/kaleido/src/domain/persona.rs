//! 学習者ペルソナ（興味・言語・学習スタイル）
//!
//! 各選択肢は表示ラベルと、CLI・設定ファイル・REPL コマンドで使う slug を持つ。
//! ペルソナは送信のたびに読み直され、個々のターンには紐づかない。

use common::error::Error;

/// 選択肢の共通インターフェース
pub trait Choice: Sized + Copy + 'static {
    /// 選択肢の種類名（エラーメッセージ用）
    const KIND: &'static str;
    /// 全選択肢（先頭が既定値）
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;
    fn slug(&self) -> &'static str;

    /// slug から解析する（大文字小文字・`_` / 空白の違いは無視）
    fn from_slug(s: &str) -> Result<Self, Error> {
        let normalized = s.trim().to_lowercase().replace(&['_', ' '][..], "-");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == normalized)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Unknown {} '{}' (choose one of: {})",
                    Self::KIND,
                    s.trim(),
                    Self::slugs().join(", ")
                ))
            })
    }

    fn slugs() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.slug()).collect()
    }
}

/// 興味（たとえ話の題材）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interest {
    #[default]
    Bollywood,
    Cricket,
    VideoGames,
    Farming,
    Cooking,
}

impl Choice for Interest {
    const KIND: &'static str = "interest";
    const ALL: &'static [Self] = &[
        Self::Bollywood,
        Self::Cricket,
        Self::VideoGames,
        Self::Farming,
        Self::Cooking,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Bollywood => "Bollywood 🎬",
            Self::Cricket => "Cricket 🏏",
            Self::VideoGames => "Video Games 🎮",
            Self::Farming => "Farming 🚜",
            Self::Cooking => "Cooking 🍳",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Self::Bollywood => "bollywood",
            Self::Cricket => "cricket",
            Self::VideoGames => "video-games",
            Self::Farming => "farming",
            Self::Cooking => "cooking",
        }
    }
}

/// 説明に使う言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Hinglish,
    English,
    MarathiMix,
}

impl Choice for Language {
    const KIND: &'static str = "language";
    const ALL: &'static [Self] = &[Self::Hinglish, Self::English, Self::MarathiMix];

    fn label(&self) -> &'static str {
        match self {
            Self::Hinglish => "Hinglish (Hindi+English)",
            Self::English => "English",
            Self::MarathiMix => "Marathi Mix",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Self::Hinglish => "hinglish",
            Self::English => "english",
            Self::MarathiMix => "marathi-mix",
        }
    }
}

/// 学習スタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LearningStyle {
    #[default]
    StoriesAndAnalogies,
    VisualFlowcharts,
    CodeExamples,
}

impl LearningStyle {
    /// Graphviz DOT のダイアグラムを要求するスタイルか
    pub fn wants_diagram(&self) -> bool {
        matches!(self, Self::VisualFlowcharts)
    }
}

impl Choice for LearningStyle {
    const KIND: &'static str = "style";
    const ALL: &'static [Self] = &[
        Self::StoriesAndAnalogies,
        Self::VisualFlowcharts,
        Self::CodeExamples,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::StoriesAndAnalogies => "Stories & Analogies",
            Self::VisualFlowcharts => "Visual Flowcharts",
            Self::CodeExamples => "Code Examples",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Self::StoriesAndAnalogies => "stories-and-analogies",
            Self::VisualFlowcharts => "visual-flowcharts",
            Self::CodeExamples => "code-examples",
        }
    }
}

/// 学習者ペルソナ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersonaConfig {
    pub interest: Interest,
    pub language: Language,
    pub style: LearningStyle,
}
