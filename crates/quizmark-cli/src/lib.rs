//! quizmark CLI - Command-line interface library
//!
//! This library provides the CLI functionality for quizmark:
//! - Process: rewrite exercises in rendered HTML into quiz widgets
//! - Check: report exercise problems without writing anything
//! - Install assets: copy the quiz stylesheet and script into a site
//!
//! # Library Usage
//!
//! ```ignore
//! use quizmark_cli::{load_config, process_command};
//!
//! let config = load_config(None)?;
//! process_command(&["docs/*.html".to_string()], None, &config, true)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Rewrite pages, writing page.quiz.html next to each input
//! quizmark process site/**/*.html --inject-assets
//!
//! # Check a page for exercise problems
//! quizmark check site/index.html --format json
//!
//! # Copy assets into the built site
//! quizmark install-assets --site-dir site
//! ```

pub mod app;
pub mod assets;

pub use app::{check_command, install_assets_command, load_config, process_command};
pub use app::{run_cli, OutputFormat};
