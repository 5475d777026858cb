//! 1 セッション分の状態（会話履歴と現在のペルソナ）
//!
//! 対話ループが所有し、usecase には &mut で渡す。グローバルには置かない。

use crate::domain::history::ConversationHistory;
use crate::domain::persona::PersonaConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub history: ConversationHistory,
    pub persona: PersonaConfig,
}

impl SessionState {
    pub fn new(persona: PersonaConfig) -> Self {
        Self {
            history: ConversationHistory::new(),
            persona,
        }
    }
}
