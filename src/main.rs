use clap::{Parser, Subcommand};
use folio_collections::{collections, config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Load portfolio content collections")]
#[command(long_about = "\
Load portfolio content collections

Collections are declared in site.toml at the project root. Gallery
collections are folders of images and videos plus a JSON metadata file;
markdown collections are files with YAML frontmatter.

Project structure:

  site.toml
  public/assets/
  └── celebrities/                 # Gallery collection
      ├── maria/                   # Entry (id = folder name)
      │   ├── index.jpg            # Card image
      │   ├── 01.jpg               # Gallery images, sorted by name
      │   └── backstage.mp4        # Preview video
      └── lucia/
          └── clip.mp4             # Video-only entry
  src/content/
  ├── celebrities/celebrities.json # Titles, captions, layout hints
  └── work/
      └── spring.md                # Markdown entry

Metadata resolution (first available wins):
  Title:    JSON title → folder name
  Alt text: JSON img_alt → JSON title → folder name

Run 'folio gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Project root (holds site.toml)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory for content.json
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Number of collections to load at once (default: all CPU cores)
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    /// Log loader details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load every collection and write content.json
    Build,
    /// Load every collection without writing anything
    Check,
    /// Show the entries of one collection
    List {
        /// Collection name from site.toml
        name: String,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    init_thread_pool(cli.jobs);

    match cli.command {
        Command::Build => {
            let site = config::load_config(&cli.root)?;
            println!("==> Loading collections from {}", cli.root.display());
            let store = collections::load_collections(&cli.root, &site)?;
            output::print_store_output(&store);

            std::fs::create_dir_all(&cli.output)?;
            let store_path = cli.output.join("content.json");
            let json = serde_json::to_string_pretty(&store)?;
            std::fs::write(&store_path, json)?;
            println!("==> Wrote {}", store_path.display());
        }
        Command::Check => {
            let site = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let store = collections::load_collections(&cli.root, &site)?;
            output::print_store_output(&store);
            println!("==> Content is valid");
        }
        Command::List { name } => {
            let site = config::load_config(&cli.root)?;
            let entries = collections::load_named(&cli.root, &site, &name)?;
            output::print_collection_output(&name, &entries);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool used for collection loading.
///
/// Caps at the number of available CPU cores.
fn init_thread_pool(jobs: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = jobs.map_or(cores, |j| j.clamp(1, cores));
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings and collection counts are
/// shown, and `-v` adds per-loader detail.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("folio_collections=debug")
        } else {
            EnvFilter::new("folio_collections=info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
