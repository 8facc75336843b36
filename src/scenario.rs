//! Named driving conditions and their multiplicative effects.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Travel and service time multipliers for a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioFactors {
    pub travel: f64,
    pub service: f64,
}

/// Environmental condition applied to a whole solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    #[default]
    Normal,
    Peak,
    Incident,
    Storm,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Normal,
        Scenario::Peak,
        Scenario::Incident,
        Scenario::Storm,
    ];

    /// Resolves an untrusted tag. Unknown or empty tags become `Normal`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "normal" => Scenario::Normal,
            "peak" => Scenario::Peak,
            "incident" => Scenario::Incident,
            "storm" => Scenario::Storm,
            other => {
                debug!(tag = other, "unrecognized scenario, using normal");
                Scenario::Normal
            }
        }
    }

    /// Stable snake_case tag, accepted by [`Scenario::from_tag`].
    pub fn name(self) -> &'static str {
        match self {
            Scenario::Normal => "normal",
            Scenario::Peak => "peak",
            Scenario::Incident => "incident",
            Scenario::Storm => "storm",
        }
    }

    /// Travel and service multipliers for this scenario.
    pub fn factors(self) -> ScenarioFactors {
        let (travel, service) = match self {
            Scenario::Normal => (1.0, 1.0),
            Scenario::Peak => (1.33, 1.0),
            Scenario::Incident => (1.20, 1.05),
            Scenario::Storm => (1.60, 1.20),
        };
        ScenarioFactors { travel, service }
    }
}
