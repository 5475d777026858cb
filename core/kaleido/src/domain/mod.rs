//! kaleido 固有のドメイン型（型と不変条件）

pub mod chat_turn;
pub mod command;
pub mod history;
pub mod persona;
pub mod rendered_block;
pub mod session_state;
pub mod settings;
pub use chat_turn::Role;
pub use command::{KaleidoCommand, ReplInput};
pub use persona::{Choice, Interest, Language, LearningStyle, PersonaConfig};
pub use rendered_block::{RenderedBlock, Segment};
pub use session_state::SessionState;
pub use settings::{resolve_settings, DiagramFormat, Settings, SettingsOverrides};
