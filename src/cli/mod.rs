//! Command-line interface: argument definitions and dispatch.

mod cache;
mod generate;
mod serve;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use fission::cache::ResponseCache;
use fission::config::Config;
use fission::generator::{GeneratorOptions, NameGenerator};
use fission::providers::resolve_provider;

#[derive(Parser, Debug)]
#[command(name = "fission", version, about = "Business name ideation engine")]
pub struct Cli {
    /// Config file (defaults to ~/.fission/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate name suggestions for a prompt
    Generate {
        /// Description, seed name or keywords
        prompt: String,
        /// Number of names to request
        #[arg(short = 'n', long = "num-results", default_value_t = 50)]
        num_results: u32,
        /// Tone: professional, playful, bold, minimal
        #[arg(long, default_value = "professional")]
        style: String,
        /// Category focus (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Explore names related to one name
    Deeper {
        /// Name to explore
        name: String,
        /// Business context
        #[arg(long, default_value = "")]
        context: String,
        /// Dimension focus (repeatable)
        #[arg(long = "dimension")]
        dimensions: Vec<String>,
    },
    /// Inspect or maintain the response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Show record counts and size
    Stats,
    /// Delete every record
    Clear,
    /// Delete expired and unreadable records
    Purge,
}

/// Load config and dispatch the selected command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { port } => serve::cmd_serve(config, port).await,
        Commands::Generate {
            prompt,
            num_results,
            style,
            categories,
        } => generate::cmd_generate(config, prompt, num_results, style, categories).await,
        Commands::Deeper {
            name,
            context,
            dimensions,
        } => generate::cmd_deeper(config, name, context, dimensions).await,
        Commands::Cache { action } => cache::cmd_cache(&config, action),
    }
}

/// Open the configured cache directory.
pub(crate) fn open_cache(config: &Config) -> Result<Arc<ResponseCache>> {
    let dir = config.cache_dir();
    let cache = ResponseCache::open(&dir, config.cache.default_ttl_secs)
        .with_context(|| format!("Failed to open cache directory: {}", dir.display()))?;
    Ok(Arc::new(cache))
}

/// Wire cache, provider and options into a generator.
pub(crate) fn build_generator(config: &Config) -> Result<NameGenerator> {
    let cache = open_cache(config)?;
    let provider = resolve_provider(config).context("Failed to initialize provider")?;
    Ok(NameGenerator::new(
        cache,
        provider,
        GeneratorOptions::from_config(config),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_args() {
        let cli = Cli::try_parse_from([
            "fission",
            "generate",
            "rocket startup",
            "-n",
            "5",
            "--category",
            "nature",
            "--category",
            "mythology",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                prompt,
                num_results,
                style,
                categories,
            } => {
                assert_eq!(prompt, "rocket startup");
                assert_eq!(num_results, 5);
                assert_eq!(style, "professional");
                assert_eq!(categories, ["nature", "mythology"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["fission", "cache", "stats", "--json-logs", "--config", "x.json"])
                .unwrap();
        assert!(cli.json_logs);
        assert_eq!(cli.config, Some(PathBuf::from("x.json")));
        assert!(matches!(
            cli.command,
            Commands::Cache {
                action: CacheAction::Stats
            }
        ));
    }

    #[test]
    fn test_parse_deeper_defaults() {
        let cli = Cli::try_parse_from(["fission", "deeper", "Atlas"]).unwrap();
        match cli.command {
            Commands::Deeper {
                name,
                context,
                dimensions,
            } => {
                assert_eq!(name, "Atlas");
                assert!(context.is_empty());
                assert!(dimensions.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_requires_no_args() {
        let cli = Cli::try_parse_from(["fission", "serve", "--port", "9001"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { port: Some(9001) }));
        assert!(Cli::try_parse_from(["fission"]).is_err());
    }

    #[test]
    fn test_build_generator_uses_configured_cache_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.cache.dir = Some(tmp.path().join("records"));
        config.provider.api_key = Some("sk-test".into());

        let generator = build_generator(&config).unwrap();
        assert!(generator.is_available());
        assert_eq!(generator.cache().location(), tmp.path().join("records"));
        assert!(tmp.path().join("records/.gitignore").exists());
    }
}
