use super::Parser;

#[derive(Parser, Debug)]
pub struct Cli {
    /// Path to a settings file, without the `.toml` extension if preferred.
    #[arg(long)]
    pub settings: Option<String>,
}
