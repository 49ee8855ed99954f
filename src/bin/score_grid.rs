// Batch scorer entry point
//
// Purpose: Score every cell of a raw metric table and write Q_OTU GeoJSON
// Usage: INPUT_PATH=cells.csv OUTPUT_PATH=q_otu.geojson cargo run --release --bin score_grid

use otu_scorer::{run_batch, BatchConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "otu_scorer=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BatchConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  INPUT_PATH: {:?}", config.input_path);
    tracing::info!("  OUTPUT_PATH: {:?}", config.output_path);
    tracing::info!("  WEIGHTS_PATH: {:?}", config.weights_path);
    tracing::info!("  SUMMARY_PATH: {:?}", config.summary_path);
    tracing::info!("  PARALLEL: {}", config.parallel);
    tracing::info!("  STRICT_WEIGHTS: {}", config.strict_weights);
    match &config.grid {
        Some(grid) => {
            tracing::info!("  GRID_BBOX: {:?}", grid.bbox);
            tracing::info!("  GRID_CELL_SIZE: {}", grid.cell_size_deg);
        }
        None => tracing::info!("  GRID: none (bounds from input table only)"),
    }

    let summary = run_batch(&config)?;

    println!("\n{}", "=".repeat(60));
    println!("Q_OTU SCORING SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Cells scored:           {}", summary.cells_scored);
    println!("  Cells with missing data: {}", summary.cells_with_missing_data);
    for (metric, count) in &summary.missing_by_metric {
        println!("    {:<16} {}", metric, count);
    }
    if let (Some(mean), Some(min), Some(max)) =
        (summary.mean_q_otu, summary.min_q_otu, summary.max_q_otu)
    {
        println!("  Q_OTU mean / min / max: {:.4} / {:.4} / {:.4}", mean, min, max);
    }
    println!("  Output: {:?}", config.output_path);

    Ok(())
}
