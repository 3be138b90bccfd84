//! LLM-backed insight generator.
//!
//! This crate provides an [`grid_core::InsightGenerator`] that sends the
//! active alerts and facility context for a region to an OpenAI-compatible
//! chat-completions API (xAI Grok by default) and returns the narrative
//! analysis it produces.
//!
//! # Features
//!
//! - Builds the alert and facility context the model reasons over
//! - Asks for a fixed "Top 3 Affected Power Plants" section that the
//!   orchestrator can extract facility references from
//! - Distinguishes missing credentials, rejected credentials and empty answers
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use insight_brain::{InsightBrain, InsightBrainConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = InsightBrain::new(InsightBrainConfig::from_env())?;
//!     // Use the brain...
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;
mod prompt;

pub use brain::InsightBrain;
pub use config::{InsightBrainConfig, InsightBrainConfigBuilder, DEFAULT_PROMPT_FILE};
pub use prompt::{build_prompt, format_alert, format_facility, DEFAULT_SYSTEM_PROMPT};
