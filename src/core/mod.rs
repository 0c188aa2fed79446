//! # Core Application Logic
//!
//! This module contains chatterm's business logic.
//! It knows nothing about any specific UI technology or about sockets.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Send
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐           ┌──────────────┐
//!             │    TUI     │           │  connection  │
//!             │  Adapter   │──────────▶│  (websocket) │
//!             │ (ratatui)  │           │              │
//!             └────────────┘           └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`session`]: Login phase and the message log
//! - [`geometry`]: Chat window and login panel placement
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod geometry;
pub mod session;
pub mod state;
