//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_dashboard, filter parsing)
//! - `insights` - Insight list
//! - `options` - Filter dropdown values
//! - `serve` - Web server command
//! - `summary` - Chart series and table page

pub mod core;
pub mod insights;
pub mod options;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use core::*;
pub use insights::*;
pub use options::*;
pub use serve::*;
pub use summary::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
