use clap::{Parser, Subcommand};
use random_gal::{config, output, scan, server};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::info;

fn version_string() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        if env!("ON_RELEASE_TAG") == "true" {
            env!("CARGO_PKG_VERSION").to_string()
        } else {
            match env!("GIT_HASH") {
                "" => "dev@unknown".to_string(),
                hash => format!("dev@{hash}"),
            }
        }
    })
}

#[derive(Parser)]
#[command(name = "random-gal")]
#[command(about = "Serve a random photo gallery from a directory")]
#[command(long_about = "\
Serve a random photo gallery from a directory

Every page load draws a fresh random selection of images. Named folders
can be browsed in full. Images are embedded in the page, nothing is cached.

Directory structure:

  ./                      # --root
  ├── config.toml         # Optional, see 'random-gal gen-config'
  ├── sources/            # Random gallery pool (walked recursively)
  │   ├── dawn.jpg
  │   └── trip/harbour.png
  ├── folders/            # Each child is a gallery: /open_folder?folder=alps
  │   ├── alps/
  │   └── coast/
  └── static/             # Served verbatim under /static/
      └── folder.png      # Thumbnail for every folder on /folders")]
#[command(version = version_string())]
struct Cli {
    /// Directory to serve (holds config.toml, sources/, folders/, static/)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web server
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<IpAddr>,
        /// Port to listen on (overrides server.port)
        #[arg(long, short)]
        port: Option<u16>,
    },
    /// Scan the served directory and list what would be shown
    Check {
        /// Print the inventory as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { bind, port } => {
            let mut site_config = config::load_config(&cli.root)?;
            if let Some(bind) = bind {
                site_config.server.bind = bind;
            }
            if let Some(port) = port {
                site_config.server.port = port;
            }
            let addr = site_config.server.socket_addr();
            info!(root = %cli.root.display(), "Starting random-gal {}", version_string());
            let state = server::AppState::new(site_config, &cli.root);
            server::serve(state, addr).await?;
        }
        Command::Check { json } => {
            let site_config = config::load_config(&cli.root)?;
            let layout = site_config.layout(&cli.root);
            let inventory = scan::inventory(&layout, &site_config.scan.options())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&inventory)?);
            } else {
                output::print_check_output(&inventory, &layout, &cli.root);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_is_built_once() {
        let first = version_string();
        assert!(std::ptr::eq(first, version_string()));
        assert!(!first.is_empty());
    }
}
