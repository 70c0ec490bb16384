//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout and the simple overlays
//! - `dialogs`: Form overlays (meet, meet event, athlete)
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `tabs`: Tab-specific content rendering (meets, athletes)

pub mod dialogs;
pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
