use clap::Parser;
use emby_date_sync::client::EmbyClient;
use emby_date_sync::config::Config;
use emby_date_sync::logging;
use emby_date_sync::normalizer::LibraryDateNormalizer;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "emby_date_sync")]
#[command(about = "Normalizes Emby 'Date Added' metadata to match premiere dates")]
#[command(version = "0.1.0")]
struct Cli {
    /// Specific library IDs to process (comma-separated); defaults to the
    /// configured list
    #[arg(long)]
    libraries: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(library_list) = cli.libraries {
        config.libraries = library_list.split(',').map(|s| s.trim().to_string()).collect();
    }

    info!("Starting 'Date Added' normalization for {} libraries", config.libraries.len());
    println!("🔄 Normalizing 'Date Added' across {} libraries...", config.libraries.len());

    let client = EmbyClient::new(&config)?;
    let normalizer = LibraryDateNormalizer::new(Arc::new(client));
    let reports = normalizer.run_all(&config.libraries).await;

    for report in &reports {
        println!("\n📊 Results for library {}:", report.library_id);
        println!("   Total items: {}", report.total_items);
        println!("   Updated: {}", report.updated);
        println!("   Already correct: {}", report.already_correct);
        println!("   Skipped: {}", report.skipped);
        println!("   Failures: {}", report.failures.len());
        if report.stopped_early {
            println!("   Stopped early after a run of already-correct items");
        }
        if !report.failures.is_empty() {
            println!("\n⚠️  Failures encountered:");
            for failure in &report.failures {
                println!("   - {failure}");
            }
        }
    }

    Ok(())
}
