use crate::host::MemoryChart;
use crate::legend::Legend;
use crate::models::ChartDocument;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Load a chart document (`{ kind, title?, labels, series }`) from JSON.
pub fn load_chart<P: AsRef<Path>>(path: P) -> Result<ChartDocument> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading chart {}", path.display()))?;
    let doc = serde_json::from_str(&text)
        .with_context(|| format!("parsing chart {}", path.display()))?;
    Ok(doc)
}

/// Save a chart document as pretty JSON.
pub fn save_json<P: AsRef<Path>>(doc: &ChartDocument, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(doc)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save what the host chart currently shows, i.e. the projected data.
pub fn save_projection<P: AsRef<Path>>(legend: &Legend<MemoryChart>, path: P) -> Result<()> {
    save_json(&legend.chart().to_document(), path)
}
