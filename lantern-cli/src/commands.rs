//! CLI command implementations.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lantern_corpus::{encode_articles, ArticleSource, DirSource};
use lantern_server::{ArticleServer, CorpusManager, ServerConfig};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Serve a corpus directory over TCP.
pub async fn serve(host: &str, port: u16, interval: u64, corpus: &Path) -> Result<()> {
    println!("{}", "Starting lantern server...".cyan());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Encoding corpus...");

    let source = Arc::new(DirSource::new(corpus));
    let manager = Arc::new(CorpusManager::bootstrap(source)?);

    spinner.finish_and_clear();

    let snapshot = manager.current().await;
    println!(
        "{} Encoded {} articles ({}x{} matrix)",
        "✓".green(),
        snapshot.article_count.to_string().cyan(),
        snapshot.matrix.num_rows(),
        snapshot.matrix.num_cols()
    );

    // The refresh task stops when this sender drops, i.e. with the
    // process.
    let (_shutdown, shutdown_rx) = watch::channel(false);
    tokio::spawn(
        manager
            .clone()
            .run_refresh_task(Duration::from_secs(interval), shutdown_rx),
    );

    let addr = format!("{host}:{port}").parse()?;
    let server = ArticleServer::new(manager, ServerConfig { addr });

    println!("{} Listening on {}:{}", "✓".green(), host, port);
    println!("  Press {} to stop", "Ctrl+C".cyan());

    server.run().await?;

    Ok(())
}

/// Inspect a corpus without serving it.
pub fn status(corpus: &Path) -> Result<()> {
    let source = DirSource::new(corpus);
    let articles = source.load_articles()?;
    let (matrix, m) = encode_articles(&articles)?;

    println!(
        "{} {} articles",
        "✓".green(),
        articles.len().to_string().cyan()
    );
    println!("  Encoded matrix: {}x{}", matrix.num_rows(), matrix.num_cols());
    println!("  Scheme dimension m = {}", m);

    Ok(())
}
