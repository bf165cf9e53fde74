//! Timed progress stages shown while a classification is in flight.
//!
//! The stages are purely presentational: the workflow holds each one
//! visible for its duration before issuing the real remote call, so the
//! user sees steady progress regardless of how fast the service answers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One named, timed phase of the progress sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Display name shown while the stage is active.
    pub name: String,
    /// How long the stage stays visible before the next one begins.
    pub duration: Duration,
}

impl Stage {
    /// Creates a stage with the given display name and duration.
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// The fixed default sequence, shown strictly in order.
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new("Visual Analysis", Duration::from_millis(2000)),
        Stage::new("Text Processing", Duration::from_millis(1500)),
        Stage::new("Classification", Duration::from_millis(1000)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sequence_order() {
        let stages = default_stages();
        let names: Vec<&str> = stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Visual Analysis", "Text Processing", "Classification"]
        );
    }

    #[test]
    fn test_default_sequence_durations() {
        let stages = default_stages();
        let total: Duration = stages.iter().map(|s| s.duration).sum();
        assert_eq!(total, Duration::from_millis(4500));
    }

    #[test]
    fn test_stage_serde_round_trip() {
        let stage = Stage::new("Visual Analysis", Duration::from_millis(2000));
        let json = serde_json::to_string(&stage).unwrap();
        let back: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stage);
    }
}
