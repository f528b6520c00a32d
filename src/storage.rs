use crate::models::PlannerData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/planner.json"))
}

/// Whole-state read. A missing file or an undecodable blob both fall back to
/// the seed state; corruption is logged but never surfaced to the user.
pub async fn load_data(path: &Path) -> PlannerData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse planner file, starting from seed: {err}");
                PlannerData::seed()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => PlannerData::seed(),
        Err(err) => {
            error!("failed to read planner file, starting from seed: {err}");
            PlannerData::seed()
        }
    }
}

/// Whole-state overwrite, fire-and-forget: a failed write is logged and
/// dropped, and the in-memory mutation stands.
pub async fn persist_data(path: &Path, data: &PlannerData) {
    let payload = match serde_json::to_vec_pretty(data) {
        Ok(payload) => payload,
        Err(err) => {
            error!("failed to serialize planner state: {err}");
            return;
        }
    };
    if let Err(err) = fs::write(path, payload).await {
        error!("failed to write planner file: {err}");
    }
}
