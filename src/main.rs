use anyhow::Result;
use badge_icon_gen::{
    icon_gen,
    logging::{init_logging, LoggingConfig},
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "badge-icon-gen",
    about = "Render the gradient badge icons (16, 48 and 128 px) as PNG files"
)]
struct Cli {
    /// Output directory. Defaults to `icons/` next to this executable.
    #[clap(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Icon sizes to render.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        default_values_t = icon_gen::DEFAULT_SIZES
    )]
    sizes: Vec<u32>,

    /// Create the output directory if it does not exist
    #[clap(long)]
    create_dir: bool,

    /// Also write an `icons.json` manifest fragment listing the files
    #[clap(long)]
    manifest: bool,

    /// Log rendering details to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::verbose(cli.verbose));

    let output = match cli.output {
        Some(dir) => dir,
        None => icon_gen::default_output_dir()?,
    };

    let args = icon_gen::Args {
        output,
        sizes: cli.sizes,
        create_dir: cli.create_dir,
        manifest: cli.manifest,
    };

    icon_gen::generate_icons(&args)?;
    Ok(())
}
