//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless, props-based
//!
//! - `ChatPane`: the floating chat window (frame, log, input row)
//! - `LoginPrompt`: the floating name prompt
//!
//! Both are transient wrappers built each frame around borrowed state.
//!
//! ### Stateful, event-driven
//!
//! - `InputLine`: single-row text field, emits `InputEvent::Submit`
//! - `MessageLogState`: scroll position of the message log
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── chat_pane.rs     (chat window frame)
//! ├── login_prompt.rs  (name prompt)
//! ├── message_log.rs   (wrapped, scrollable log)
//! └── input_line.rs    (text field)
//! ```

pub mod chat_pane;
pub mod input_line;
pub mod login_prompt;
pub mod message_log;

pub use chat_pane::ChatPane;
pub use input_line::{InputEvent, InputLine};
pub use login_prompt::LoginPrompt;
pub use message_log::MessageLogState;
