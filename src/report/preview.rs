use std::path::Path;

use crate::compose::{ComposedTile, RasterContext, compose_entity};
use crate::data::filter::group_by_entity;
use crate::data::record::Dataset;
use crate::foundation::error::ReportResult;
use crate::style::config::StyleConfig;

/// Compose the first `count` distinct entities into `out_dir` without building a document.
///
/// Nothing is excluded, so summary rows show up in a preview just as they appear in the
/// input.
#[tracing::instrument(skip(dataset, style, out_dir), fields(out_dir = %out_dir.display()))]
pub fn preview_tiles(
    dataset: &Dataset,
    count: usize,
    style: &StyleConfig,
    out_dir: &Path,
) -> ReportResult<Vec<ComposedTile>> {
    let entities = group_by_entity(dataset);
    let mut raster = RasterContext::new(style);
    let mut out = Vec::with_capacity(count.min(entities.len()));
    for (idx, (entity, records)) in entities.iter().take(count).enumerate() {
        let path = out_dir.join(format!("preview_{:02}.png", idx + 1));
        out.push(compose_entity(records, entity, style, &mut raster, &path)?);
    }
    tracing::info!(tiles = out.len(), "preview written");
    Ok(out)
}
