

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use chingho::llm::EmbedderFactory;
use chingho::{ChinghoConfig, PhraseGenerator, PhraseRequest};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Generate diverse "adjective + noun" titles for a piece of text.
#[derive(Debug, Parser)]
#[command(name = "chingho", version)]
struct Args {
    /// File holding the source text; read from stdin when omitted.
    input: Option<PathBuf>,

    /// Number of titles to return.
    #[arg(long)]
    top_k: Option<usize>,

    /// Adjectives kept after relevance filtering.
    #[arg(long)]
    adj_filter: Option<usize>,

    /// Nouns kept after relevance filtering.
    #[arg(long)]
    noun_filter: Option<usize>,

    /// TOML config file; `CHINGHO_*` variables still override it.
    #[arg(long, env = "CHINGHO_CONFIG")]
    config: Option<PathBuf>,

    /// Check the embedding service and exit.
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("chingho=info".parse()?))
        .init();

    let args = Args::parse();
    let config = ChinghoConfig::load(args.config.as_deref())?;

    if args.health {
        let embedder = EmbedderFactory::http_from_config(&config)?;
        let health = embedder.health_check().await?;
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    let source_text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            buf
        }
    };

    let request = PhraseRequest::new(source_text)
        .with_top_k(args.top_k.unwrap_or(config.default_top_k))
        .with_filter_counts(
            args.adj_filter.unwrap_or(config.default_adj_filter_count),
            args.noun_filter.unwrap_or(config.default_noun_filter_count),
        );

    let generator = PhraseGenerator::from_config(&config)?;
    let selection = generator.generate_phrases(&request).await?;
    info!("Done: {}", selection.combinations().join(", "));

    println!("{}", serde_json::to_string_pretty(&selection)?);
    Ok(())
}
