use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use qmap_convert::config::{Config, Formats};
use qmap_convert::convert::Converter;
use qmap_convert::report::TracingReporter;

#[derive(Parser)]
#[command(
    name = "qmap-convert",
    version,
    about = "Convert Quake .map brushes and WAD2 textures into .vmf/.vmap scenes and materials"
)]
struct Cli {
    /// Quake `.map` files to convert.
    #[arg(required = true, value_name = "MAPS")]
    maps: Vec<PathBuf>,

    /// Output root. Files go under `<OUT>/<ADDON>/maps` and `<OUT>/<ADDON>/materials`.
    #[arg(long, value_name = "DIR", default_value = Config::DEFAULT_OUTPUT_ROOT)]
    out: PathBuf,

    /// Addon directory name under the output root.
    #[arg(long, value_name = "NAME", default_value = Config::DEFAULT_ADDON_NAME)]
    addon: String,

    /// WAD2 archive to search for textures. Repeat for more; earlier archives win.
    #[arg(long = "wad", value_name = "PATH", action = ArgAction::Append)]
    wads: Vec<PathBuf>,

    /// Directory of pre-extracted rasters named `<canonical id>.<RASTER_EXT>`, searched before
    /// the archives.
    #[arg(long, value_name = "DIR")]
    textures: Option<PathBuf>,

    /// Which geometry formats to write.
    #[arg(long, value_enum, default_value_t = FormatArg::Both)]
    format: FormatArg,

    /// Raster file extension, `png` or `tga`.
    #[arg(long, value_name = "EXT", default_value = Config::DEFAULT_RASTER_EXTENSION)]
    raster_ext: String,

    /// Re-extract rasters that already exist in the output.
    #[arg(long)]
    overwrite: bool,

    /// Log debug output. `RUST_LOG` takes precedence.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    Vmf,
    Vmap,
    Both,
}

impl From<FormatArg> for Formats {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Vmf => Formats {
                vmf: true,
                vmap: false,
            },
            FormatArg::Vmap => Formats {
                vmf: false,
                vmap: true,
            },
            FormatArg::Both => Formats::BOTH,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            output_root: self.out.clone(),
            addon_name: self.addon.clone(),
            archives: self.wads.clone(),
            texture_dir: self.textures.clone(),
            formats: self.format.into(),
            raster_extension: self.raster_ext.clone(),
            overwrite_rasters: self.overwrite,
            ..Config::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        let default_level = if cli.verbose { "debug" } else { "info" };
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
            )
            .init();
    }

    let config = cli.config();
    let addon_dir = config.addon_dir();
    let mut reporter = TracingReporter;

    if config.archives.is_empty() && config.texture_dir.is_none() {
        tracing::warn!("no --wad or --textures given; every texture will be missing");
    }

    let summary = Converter::new(config, &mut reporter).run(&cli.maps, &mut reporter);

    tracing::info!(output = %addon_dir.display(), "conversion finished");
    println!("{}", summary);
}
