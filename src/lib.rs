//! deskbridge — client-side bridge between a desktop assistant UI and an
//! OpenAI-compatible chat-completion API.
//!
//! This is the glue layer, not the app: no business logic beyond the three
//! contracts lives here. The embedding shell owns settings, rendering, and
//! command execution.
//!
//! Domains:
//!   - prompt.rs  — system-prompt construction from a host snapshot + policy
//!   - llm/       — chat completions, model listing, error taxonomy
//!   - extract.rs — splitting assistant output into prose and shell blocks

pub mod extract;
pub mod llm;
pub mod prompt;

pub use extract::{parse_command_blocks, strip_code_blocks};
pub use llm::{ApiError, ChatClient, ChatMessage, ChatRequest, Role};
pub use prompt::{build_system_prompt, HostContext, PromptOptions};
