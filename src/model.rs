//! In-memory representation of coverage summaries and check runs, as
//! exchanged (in JSON) between the coverage build plugin, the check-run step
//! and the report renderer.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A coverage dimension. The declaration order is the canonical row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoverageEntity {
    Instruction,
    Branch,
    Line,
}

impl CoverageEntity {
    /// All entities, in rendering order.
    pub const ALL: [CoverageEntity; 3] = [
        CoverageEntity::Instruction,
        CoverageEntity::Branch,
        CoverageEntity::Line,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageEntity::Instruction => "INSTRUCTION",
            CoverageEntity::Branch => "BRANCH",
            CoverageEntity::Line => "LINE",
        }
    }

    /// Position of this entity in [`CoverageEntity::ALL`].
    pub fn index(&self) -> usize {
        match self {
            CoverageEntity::Instruction => 0,
            CoverageEntity::Branch => 1,
            CoverageEntity::Line => 2,
        }
    }

    /// Look up an entity by its wire name. Names outside the fixed set
    /// (e.g. `METHOD`, `CLASS`) yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }

    /// Short human description shown as a tooltip next to the entity name.
    pub fn tooltip(&self) -> &'static str {
        match self {
            CoverageEntity::Instruction => {
                "The Java bytecode instructions executed during testing"
            }
            CoverageEntity::Branch => {
                "The branches in conditional statements like if, switch, or loops that are executed."
            }
            CoverageEntity::Line => "The source code lines covered by the tests.",
        }
    }
}

impl std::fmt::Display for CoverageEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum coverage configured for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRule {
    pub min_coverage_ratio: f64,
}

/// Coverage rules of a view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRulesConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fail_on_violation: bool,
    /// Keyed by entity wire name; unknown names are carried but never used.
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities_rules: HashMap<String, CoverageRule>,
}

/// Observed coverage of one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageMeasurement {
    pub coverage_entity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    /// Missing when nothing was measured.
    #[serde(default)]
    pub percents: Option<f64>,
}

/// A coverage rule that was not met, as reported by the build plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub violation: String,
}

/// Per-view summary file produced by the coverage build plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummary {
    pub view: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verifications: Vec<Verification>,
    #[serde(default)]
    pub coverage_rules_config: Option<CoverageRulesConfig>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coverage_info: Vec<CoverageMeasurement>,
}

impl ViewSummary {
    pub fn has_violations(&self) -> bool {
        !self.verifications.is_empty()
    }

    /// Percents of the LINE measurement, if the view has one.
    pub fn line_percents(&self) -> Option<f64> {
        self.coverage_info
            .iter()
            .find(|c| c.coverage_entity == CoverageEntity::Line.as_str())
            .and_then(|c| c.percents)
    }
}

/// Conclusion of a created check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    Success,
    Failure,
}

/// A created check run: the input record of the summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRun {
    pub view_name: String,
    #[serde(rename = "url", alias = "reviewUrl")]
    pub review_url: String,
    #[serde(default)]
    pub coverage_rules: Option<CoverageRulesConfig>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coverage_info: Vec<CoverageMeasurement>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verifications: Vec<Verification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<Conclusion>,
}

/// Derived coverage state of one entity within a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySummary {
    pub entity: CoverageEntity,
    /// Configured minimum, in percent. `None` when no rule exists.
    pub expected: Option<f64>,
    /// Observed coverage, in percent. `None` when nothing was measured.
    pub actual: Option<f64>,
    pub is_violation: bool,
}

/// Derived state of one view, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewReport {
    pub view_name: String,
    pub review_url: String,
    /// One summary per entity, in [`CoverageEntity::ALL`] order.
    pub entities: [EntitySummary; 3],
    pub has_any_violation: bool,
}
