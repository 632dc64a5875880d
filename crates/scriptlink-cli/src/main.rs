//! # scriptlink CLI Entry Point

use clap::Parser;
use scriptlink_cli::{link_module, BuildManifest, DriverConfig};
use scriptlink_linker::LinkerRegistry;
use std::path::PathBuf;

/// Single-script linker for compiled modules.
#[derive(Parser, Debug)]
#[command(name = "scriptlink", version, about)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Link a module manifest into its deployable script.
    Link(LinkArgs),
    /// List registered linkers.
    Linkers,
}

#[derive(clap::Args, Debug)]
struct LinkArgs {
    /// Build manifest (JSON) produced by the compilation stage
    #[arg(long)]
    manifest: PathBuf,

    /// Driver configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for public artifacts
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Directory for private artifacts
    #[arg(long)]
    extra_dir: Option<PathBuf>,

    /// Keep optional whitespace in generated scripts
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    scriptlink_cli::init_tracing(cli.log_json);

    let registry = LinkerRegistry::with_defaults();
    match cli.command {
        Commands::Link(args) => {
            let mut config = match &args.config {
                Some(path) => DriverConfig::load(path)?,
                None => DriverConfig::new(),
            };
            if let Some(out_dir) = args.out_dir {
                config = config.with_out_dir(out_dir);
            }
            if let Some(extra_dir) = args.extra_dir {
                config = config.with_extra_dir(extra_dir);
            }
            if args.pretty {
                config = config.with_output_compact(false);
            }

            let manifest = BuildManifest::load(&args.manifest)?;
            let summary = link_module(&manifest, &config, &registry)?;
            for path in &summary.written {
                println!("{}", path.display());
            }
        }
        Commands::Linkers => {
            for name in registry.names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
