//! GeoJSON Output
//!
//! Serializes scored cells as a GeoJSON FeatureCollection. Each feature
//! carries `cell_id`, the four indicators (`q_vi`, `q_si`, `q_bi`,
//! `q_relief`), the final `q_otu` and `missing_data`, a JSON array of the
//! defaulted metric names. Cells without bounds get a `null` geometry.

use crate::scorer::ScoredCell;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// GeoJSON feature for a single scored cell
pub fn to_feature(cell: &ScoredCell) -> Value {
    let geometry = match &cell.bounds {
        Some(bounds) => json!({
            "type": "Polygon",
            "coordinates": [bounds.ring()],
        }),
        None => Value::Null,
    };

    let missing: Vec<&'static str> = cell.missing_data.iter().map(|k| k.as_str()).collect();

    json!({
        "type": "Feature",
        "id": cell.cell_id,
        "geometry": geometry,
        "properties": {
            "cell_id": cell.cell_id,
            "q_vi": cell.indicators.ndvi,
            "q_si": cell.indicators.soil_strength,
            "q_bi": cell.indicators.soil_quality,
            "q_relief": cell.indicators.relief_factor,
            "q_otu": cell.q_otu,
            "missing_data": missing,
        },
    })
}

pub fn to_feature_collection(cells: &[ScoredCell]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": cells.iter().map(to_feature).collect::<Vec<_>>(),
    })
}

/// Write scored cells to a GeoJSON file
pub fn write_geojson(path: &Path, cells: &[ScoredCell]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create GeoJSON file: {:?}", path))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &to_feature_collection(cells))
        .with_context(|| format!("Failed to write GeoJSON: {:?}", path))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush GeoJSON: {:?}", path))?;

    info!(path = ?path, features = cells.len(), "Wrote scored grid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BoundingBox;
    use crate::payload::{CellIndicators, MetricKey, MissingData};

    fn cell(bounds: Option<BoundingBox>, missing: &[MetricKey]) -> ScoredCell {
        ScoredCell {
            cell_id: "cell_0_0".to_string(),
            bounds,
            indicators: CellIndicators {
                ndvi: 0.8,
                soil_strength: 0.25,
                soil_quality: 0.5,
                relief_factor: 0.9,
            },
            q_otu: 0.45,
            missing_data: missing.iter().copied().collect::<MissingData>(),
        }
    }

    #[test]
    fn test_feature_properties() {
        let feature = to_feature(&cell(None, &[MetricKey::Bonitet, MetricKey::SlopeDeg]));
        let props = &feature["properties"];

        assert_eq!(feature["geometry"], Value::Null);
        assert_eq!(props["q_vi"], 0.8);
        assert_eq!(props["q_si"], 0.25);
        assert_eq!(props["q_bi"], 0.5);
        assert_eq!(props["q_relief"], 0.9);
        assert_eq!(props["q_otu"], 0.45);

        // Structured list, not a stringified one
        assert_eq!(props["missing_data"], json!(["bonitet", "slope_deg"]));
    }

    #[test]
    fn test_polygon_geometry() {
        let feature = to_feature(&cell(Some(BoundingBox::new(60.0, 45.0, 60.5, 45.5)), &[]));
        assert_eq!(feature["geometry"]["type"], "Polygon");

        let ring = &feature["geometry"]["coordinates"][0];
        assert_eq!(ring.as_array().unwrap().len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert_eq!(feature["properties"]["missing_data"], json!([]));
    }

    #[test]
    fn test_feature_collection() {
        let fc = to_feature_collection(&[cell(None, &[]), cell(None, &[])]);
        assert_eq!(fc["type"], "FeatureCollection");
        assert_eq!(fc["features"].as_array().unwrap().len(), 2);
    }
}
