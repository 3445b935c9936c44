//! Dataset loading.
//!
//! The bundled sample dataset is compiled into the binary; a JSON file with
//! the same shape can be supplied instead with `--data` or `data_path`.

use crate::error::Result;
use crate::types::Dataset;
use log::debug;
use std::fs;
use std::path::Path;

/// The bundled sample dataset, as JSON.
pub const SAMPLE_DATASET: &str = include_str!("../data/sample.json");

/// Parse the bundled sample dataset.
pub fn sample() -> Result<Dataset> {
    parse(SAMPLE_DATASET)
}

/// Parse a dataset from a JSON string.
pub fn parse(json: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(json)?;
    debug!(
        "Parsed dataset: {} series, {} episodes, {} slides",
        dataset.series.len(),
        dataset.episodes.len(),
        dataset.slides.len()
    );
    Ok(dataset)
}

/// Load a dataset from a JSON file on disk.
pub fn load(path: &Path) -> Result<Dataset> {
    debug!("Loading dataset from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::types::SlideKind;

    #[test]
    fn test_sample_dataset_parses() {
        let dataset = sample().unwrap();
        assert_eq!(dataset.series.len(), 3);
        assert_eq!(dataset.episodes.len(), 6);
        assert!(dataset.find_slide(SlideKind::About).is_some());
        assert!(dataset.find_slide(SlideKind::Contact).is_some());
        assert_eq!(dataset.hosts.len(), 2);
    }

    #[test]
    fn test_every_sample_episode_has_a_series() {
        let dataset = sample().unwrap();
        for episode in &dataset.episodes {
            assert!(dataset.series_for(episode).is_some(), "{}", episode.id);
        }
    }

    #[test]
    fn test_parse_error() {
        let err = parse("{\"episodes\": 3}").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/podcast.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
