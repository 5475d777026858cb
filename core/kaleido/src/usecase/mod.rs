//! ユースケース（ports 経由でのみ外界に触れる）

pub mod chat;
pub mod prompt;
pub mod renderer;
pub mod repl;
