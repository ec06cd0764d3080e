use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitrine_core::prelude::*;
use vitrine_fs::FileSystemThemes;
use vitrine_gzip::GzipEncoding;
use vitrine_memory::InMemoryRealms;
use vitrine_server::prelude::*;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Theme resource server for identity consoles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve theme resources and localizations over HTTP
    Serve {
        /// Directory laid out as `<type>/<name>/...`
        #[arg(long, env = "VITRINE_THEMES_DIR", default_value = "./themes")]
        themes_dir: PathBuf,

        /// JSON file with realm message overrides
        #[arg(long, env = "VITRINE_REALMS")]
        realms: Option<PathBuf>,

        /// Theme served in place of unknown themes
        #[arg(long, env = "VITRINE_DEFAULT_THEME")]
        default_theme: Option<String>,

        /// Where gzipped resources are cached. Defaults to a temp directory.
        #[arg(long, env = "VITRINE_CACHE_DIR")]
        cache_dir: Option<PathBuf>,

        /// Disable gzip caching and send `Cache-Control: no-cache`
        #[arg(long, env = "VITRINE_NO_CACHE")]
        no_cache: bool,

        /// `max-age` for resources, in seconds
        #[arg(long, env = "VITRINE_MAX_AGE", default_value_t = DEFAULT_STATIC_MAX_AGE)]
        max_age: u64,

        #[arg(short, long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Print a message template in client-side templating form
    Convert { message: String },
    /// Print the resource version token
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { message } => println!("{}", convert_message(&message)),
        Commands::Version => println!("{RESOURCES_VERSION}"),
        Commands::Serve {
            themes_dir,
            realms,
            default_theme,
            cache_dir,
            no_cache,
            max_age,
            port,
        } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();

            let mut themes = FileSystemThemes::new(&themes_dir);
            if let Some(name) = default_theme {
                themes = themes.with_default_theme(name);
            }

            let realms = match realms {
                Some(path) => {
                    let json = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read realms file {path:?}"))?;
                    InMemoryRealms::from_json(&json)
                        .with_context(|| format!("Invalid realms file {path:?}"))?
                }
                None => InMemoryRealms::new(),
            };

            let resources_version = RESOURCES_VERSION.to_string();
            let cache_dir = cache_dir.unwrap_or_else(|| std::env::temp_dir().join("vitrine-gzip"));
            let encoding = GzipEncoding::new(&cache_dir)
                .with_resources_version(&resources_version)
                .enabled(!no_cache);
            if !no_cache {
                encoding
                    .prune_stale_versions()
                    .await
                    .with_context(|| format!("Failed to prune gzip cache {cache_dir:?}"))?;
                info!("Caching gzip resources in {:?}", encoding.version_dir());
            }

            let config = VitrineServerConfig {
                resources_version,
                cache_control: if no_cache {
                    CachePolicy::NoCache
                } else {
                    CachePolicy::MaxAge(max_age)
                },
                ..Default::default()
            };
            let app = VitrineServer::new(config).build(themes, realms, encoding);

            let addr = format!("0.0.0.0:{port}");
            info!("Serving themes from {themes_dir:?} on http://{addr}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
