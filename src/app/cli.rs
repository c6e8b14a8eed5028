use clap::Parser;

/// SoundVibes - mood-based music for your terminal 🎧
#[derive(Parser, Debug)]
#[command(name = "soundvibes", version, about)]
pub struct Args {
    /// Catalog document (path or http(s) URL). Overrides config.toml
    #[arg(long, short = 'c')]
    pub catalog: Option<String>,

    /// Mood to open with (happy, sad, energetic, relaxed, inspired, stressed)
    #[arg(long, short = 'm')]
    pub mood: Option<crate::catalog::Mood>,

    /// Initial volume, 0.0 to 1.0
    #[arg(long, short = 'v')]
    pub volume: Option<f32>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
