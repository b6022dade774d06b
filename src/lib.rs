//! Outing — activity-suggestion agent.
//!
//! A small tool-calling loop over an OpenAI-compatible chat endpoint: the
//! model may request location lookup, weather lookup, local event search, or
//! time-of-day classification; the loop executes those tools locally, feeds
//! the results back, and repeats until the model answers or the iteration
//! budget runs out.
//!
//! # Quick Start
//!
//! ```no_run
//! use outing::agent::Agent;
//! use outing::config::OutingConfig;
//! use outing::provider::create_provider;
//! use outing::tools::builtin::{all_tools, AcceptDetected};
//!
//! # async fn example() -> outing::error::Result<()> {
//! let config = OutingConfig::from_env();
//! let provider = create_provider("gpt-4o-mini", &config)?;
//! let tools = all_tools(&config, std::sync::Arc::new(AcceptDetected));
//!
//! let mut agent = Agent::new(provider, tools);
//! let answer = agent.run("Suggest something to do nearby.").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;
