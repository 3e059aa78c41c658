//! CLI argument parsing with clap.

use clap::Parser;

use crate::prompts::random_prompt;

/// AI image generation CLI for the Clipdrop text-to-image API.
#[derive(Parser, Debug)]
#[command(name = "clipgen", version, about)]
pub struct Cli {
    /// Text prompt describing the desired image.
    #[arg(conflicts_with_all = ["prompt_file", "surprise"])]
    pub prompt: Option<String>,

    /// Path to a file containing the prompt text.
    #[arg(short = 'p', long, conflicts_with = "surprise")]
    pub prompt_file: Option<String>,

    /// Use a random prompt.
    #[arg(long)]
    pub surprise: bool,

    /// Art style (see --list-styles). Defaults to the config file's style.
    #[arg(short, long)]
    pub style: Option<String>,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Number of images to generate. Each extra image regenerates the last.
    #[arg(
        short = 'n',
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub count: u32,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Print the available styles and exit.
    #[arg(long)]
    pub list_styles: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the prompt from the positional argument, the file flag, or
    /// `--surprise`.
    ///
    /// # Errors
    ///
    /// Returns an error if no prompt source is given, or if the file cannot
    /// be read.
    pub fn resolve_prompt(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path)
                .map(|text| text.trim_end().to_string())
        } else if self.surprise {
            Ok(random_prompt().to_string())
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide a prompt string, use -p/--prompt-file, or pass --surprise",
            ))
        }
    }
}
