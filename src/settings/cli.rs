use super::Parser;

#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    /// Roll number / application number; prompted for when omitted.
    #[arg(long)]
    pub username: Option<String>,
}
