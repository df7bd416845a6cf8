//! Subcommand execution.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use geo_common::{Extent, GeoJson};
use geo_projection::{geo_centroid, Projection};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::Command;

/// Read GeoJSON from `path`, or from stdin when `path` is `-`.
fn read_geojson(path: &Path) -> Result<GeoJson> {
    let object = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read GeoJSON from stdin")?;
        text.parse::<GeoJson>().context("Invalid GeoJSON on stdin")?
    } else {
        GeoJson::from_path(path).with_context(|| format!("Failed to load {}", path.display()))?
    };
    debug!(input = %path.display(), "Parsed GeoJSON");
    Ok(object)
}

pub(crate) fn run(command: &Command, projection: &mut Projection) -> Result<Value> {
    match command {
        Command::Project { lon, lat } => {
            let (x, y) = projection.project(*lon, *lat);
            Ok(json!([x, y]))
        }
        Command::Invert { x, y } => {
            let (lon, lat) = projection.invert(*x, *y);
            Ok(json!([lon, lat]))
        }
        Command::Stream { input } => {
            let object = read_geojson(input)?;
            let events = projection.project_events(&object);
            info!(events = events.len(), "Streamed geometry");
            Ok(serde_json::to_value(events)?)
        }
        Command::Centroid { input } => {
            let object = read_geojson(input)?;
            Ok(serde_json::to_value(geo_centroid(&object))?)
        }
        Command::Bounds { input } => {
            let object = read_geojson(input)?;
            Ok(serde_json::to_value(projection.projected_bounds(&object))?)
        }
        Command::Fit {
            input,
            extent,
            width,
            height,
        } => {
            let object = read_geojson(input)?;
            fit(projection, &object, *extent, *width, *height)?;
            let (tx, ty) = projection.translate();
            info!(scale = projection.scale(), translate_x = tx, translate_y = ty, "Fitted projection");
            Ok(json!({
                "scale": projection.scale(),
                "translate": [tx, ty],
            }))
        }
    }
}

fn fit(
    projection: &mut Projection,
    object: &GeoJson,
    extent: Option<Extent>,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<()> {
    match (extent, width, height) {
        (Some(extent), _, _) => projection.fit_extent(extent, object)?,
        (None, Some(w), Some(h)) => projection.fit_size(w, h, object)?,
        (None, Some(w), None) => projection.fit_width(w, object)?,
        (None, None, Some(h)) => projection.fit_height(h, object)?,
        (None, None, None) => bail!("fit needs --extent, --width or --height"),
    };
    Ok(())
}
