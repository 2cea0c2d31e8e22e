/// Domain types for Duet
mod command;
mod conversation;
mod instruction;
mod tool_call;

pub use command::{AudioCommand, PlaybackAction};
pub use conversation::{ConversationTurn, Role};
pub use instruction::AudioInstruction;
pub use tool_call::ToolCall;
