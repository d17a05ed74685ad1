//! Settings are read from a TOML file, `settings/dev.toml` by default in
//! debug builds. See `bin/settings_demo.rs` for loading a custom path.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
