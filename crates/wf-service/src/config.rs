//! Service configuration, read from a JSON file.
//!
//! Every field has a default, so `{}` is a valid config that uses the
//! Berkeley tile pyramid, default turn thresholds, and no graph files.
//!
//! ```json
//! {
//!   "pyramid": { "max_depth": 7, "tile_size_px": 256 },
//!   "turn_thresholds": { "straight_deg": 15.0 },
//!   "nodes_csv": "data/nodes.csv",
//!   "ways_csv": "data/ways.csv"
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use wf_route::TurnThresholds;
use wf_tiles::TilePyramid;

use crate::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub pyramid:         TilePyramid,
    pub turn_thresholds: TurnThresholds,
    pub nodes_csv:       Option<PathBuf>,
    pub ways_csv:        Option<PathBuf>,
    /// OSM extract; takes precedence over the CSV tables.  Needs the `osm`
    /// feature.
    pub osm_pbf:         Option<PathBuf>,
}

impl ServiceConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> ServiceResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: ServiceConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> ServiceResult<Self> {
        let config: ServiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServiceResult<()> {
        self.pyramid
            .validate()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        let t = &self.turn_thresholds;
        let ordered = 0.0 <= t.straight_deg
            && t.straight_deg <= t.slight_deg
            && t.slight_deg <= t.turn_deg
            && t.turn_deg <= 180.0;
        if !ordered {
            return Err(ServiceError::Config(format!(
                "turn thresholds must satisfy 0 <= straight <= slight <= turn <= 180, got {t:?}"
            )));
        }

        if self.nodes_csv.is_some() != self.ways_csv.is_some() {
            return Err(ServiceError::Config(
                "nodes_csv and ways_csv must be given together".into(),
            ));
        }
        Ok(())
    }
}
