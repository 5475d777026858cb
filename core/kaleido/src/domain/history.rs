//! 会話履歴（ConversationHistory）のドメイン型
//!
//! 挿入順＝時系列。セッション中のメモリにのみ存在し、永続化しない。

use crate::domain::chat_turn::{ChatTurn, Role};

/// 会話履歴（ChatTurn の列）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationHistory {
    turns: Vec<ChatTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(content));
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// 全ターンを破棄する（何度呼んでも空のまま）
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// 応答の付いていない user ターンの数（生成失敗で残ったもの）
    pub fn unanswered_count(&self) -> usize {
        self.turns
            .iter()
            .enumerate()
            .filter(|(i, t)| {
                t.role() == Role::User
                    && self.turns.get(i + 1).map(|n| n.role()) != Some(Role::Assistant)
            })
            .count()
    }
}
