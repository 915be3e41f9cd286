pub mod completions;
pub mod init;
pub mod pad;
pub mod preview;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::discovery::Manifest;
use crate::error::Result;
use crate::types::{Colour, PadConfig, PadOptions};

/// tpadder - Pad tile sheets with transparent gutters
#[derive(Parser, Debug)]
#[command(name = "tpadder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print extra detail about each step
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pad tile sheets and optionally write highlighted variants
    Pad(pad::PadArgs),

    /// Render side-by-side previews of original, padded and highlighted sheets
    Preview(preview::PreviewArgs),

    /// Initialize a tpadder project (generates tpadder.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Pad settings shared by the commands that transform sheets.
///
/// Anything left unset falls back to the manifest, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Tile edge length in pixels [default: 16]
    #[arg(long, short = 'b')]
    pub block_size: Option<u32>,

    /// Gutter width in pixels [default: 2]
    #[arg(long, short = 'g')]
    pub gutter: Option<u32>,

    /// Also write the highlighted outline variant (<name>_Highlighted.png)
    #[arg(long)]
    pub highlight: bool,

    /// Highlight colour as hex (#RRGGBB, #RRGGBBAA) or a name [default: white]
    #[arg(long, short = 'c')]
    pub colour: Option<String>,

    /// Manifest to read defaults from [default: ./tpadder.yaml]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SettingsArgs {
    /// Merge flags over the manifest's settings.
    pub fn resolve(&self, manifest: &Manifest) -> Result<PadOptions> {
        let base = manifest.pad_options()?;

        let colour = match &self.colour {
            Some(s) => Colour::parse(s)?,
            None => base.colour,
        };

        let config = PadConfig::new(
            self.block_size.unwrap_or(base.config.block_size),
            self.gutter.unwrap_or(base.config.gutter),
        )?;

        Ok(PadOptions {
            config,
            colour,
            highlight: self.highlight || base.highlight,
        })
    }
}
