//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the event loop that turns key presses into sends and
//!   applies relay results and reveal ticks.
//! - [`app`]: state owned by the chat screen.
//! - [`renderer`] and [`markdown`]: view composition and frame output.
//! - [`theme`]: styles.
//!
//! [`crate::core`] owns the conversation itself; this layer presents it.

pub mod app;
pub mod chat_loop;
pub mod markdown;
pub mod renderer;
pub mod theme;
