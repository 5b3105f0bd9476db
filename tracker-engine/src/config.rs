//! Engine configuration
//!
//! A configuration is pushed in wholesale by an external companion surface
//! (or loaded from a file by the CLI): the set of trackable activities,
//! the catalog of mergeable adjacencies and the two goal-hour settings.
//! Applying a new configuration discards the current list; any saved
//! binary state belongs to the old configuration and should be removed by
//! the caller.

use serde::{Deserialize, Serialize};

use crate::catalog::PairCatalog;
use crate::list::TrackingList;
use crate::node::TrackNode;
use crate::types::{Result, TrackerError};

/// A single trackable activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDef {
    pub name: String,
    /// Lower value = more urgent; drives split-time redistribution
    pub priority: i32,
}

/// A mergeable adjacency: `left` directly followed by `right` collapses
/// into a node named `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDef {
    pub left: String,
    pub right: String,
    pub name: String,
}

/// Complete engine configuration
///
/// The scalar goals come before the activity and pair tables so the
/// structure also serializes cleanly to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Daily goal, consumed by external notification logic only
    #[serde(default = "default_total_hours")]
    pub total_hours_goal: i32,

    /// Accumulated goal, consumed by external notification logic only
    #[serde(default = "default_total_acc_hours")]
    pub total_acc_hours_goal: i32,

    /// Activities in display/navigation order
    pub activities: Vec<ActivityDef>,

    #[serde(default)]
    pub pairs: Vec<PairDef>,
}

fn default_total_hours() -> i32 {
    8
}

fn default_total_acc_hours() -> i32 {
    40
}

impl Default for TrackerConfig {
    /// Built-in activity set, usable without any configuration file
    fn default() -> TrackerConfig {
        TrackerConfig {
            total_hours_goal: 8,
            total_acc_hours_goal: 40,
            activities: vec![
                ActivityDef { name: "hard".into(), priority: 1 },
                ActivityDef { name: "simple".into(), priority: 1 },
                ActivityDef { name: "education".into(), priority: 2 },
                ActivityDef { name: "overview".into(), priority: 3 },
                ActivityDef { name: "optimization".into(), priority: 3 },
                ActivityDef { name: "distractions".into(), priority: 4 },
            ],
            pairs: vec![
                PairDef { left: "hard".into(), right: "simple".into(), name: "work".into() },
                PairDef { left: "overview".into(), right: "optimization".into(), name: "additional".into() },
                PairDef { left: "work".into(), right: "education".into(), name: "main".into() },
                PairDef { left: "additional".into(), right: "distractions".into(), name: "secondary".into() },
            ],
        }
    }
}

impl TrackerConfig {
    /// Reject definitions the engine cannot work with. Name lengths and
    /// list size beyond the persisted index range are caller obligations
    /// and are not checked here.
    pub fn validate(&self) -> Result<()> {
        for activity in &self.activities {
            if activity.name.is_empty() {
                return Err(TrackerError::InvalidConfig(
                    "activity with an empty name".to_owned(),
                ));
            }
        }
        for pair in &self.pairs {
            if pair.name.is_empty() {
                return Err(TrackerError::InvalidConfig(format!(
                    "pair {}+{} with an empty name",
                    pair.left, pair.right
                )));
            }
        }
        Ok(())
    }
}

impl TrackingList {
    /// Build a fresh list from a configuration push
    pub fn from_config(config: &TrackerConfig) -> Result<TrackingList> {
        config.validate()?;

        let mut catalog = PairCatalog::new();
        for pair in &config.pairs {
            catalog.define(&pair.left, &pair.right, pair.name.clone());
        }
        let nodes = config
            .activities
            .iter()
            .map(|activity| TrackNode::leaf(activity.name.clone(), activity.priority))
            .collect();

        log::info!(
            "configured tracker: {} activities, {} pairs",
            config.activities.len(),
            config.pairs.len()
        );
        Ok(TrackingList::with_goals(
            nodes,
            catalog,
            config.total_hours_goal,
            config.total_acc_hours_goal,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_the_builtin_list() {
        let config = TrackerConfig::default();
        let list = TrackingList::from_config(&config).unwrap();
        assert_eq!(list.len(), 6);
        assert_eq!(list.total_height(), 6);
        assert_eq!(list.node(0).map(|n| n.name()), Some("hard"));
        assert_eq!(list.node(5).map(|n| n.priority()), Some(4));
        assert_eq!(list.catalog().len(), 4);
        assert_eq!(list.total_hours_goal(), 8);
        assert_eq!(list.total_acc_hours_goal(), 40);
    }

    #[test]
    fn test_empty_activity_name_is_rejected() {
        let mut config = TrackerConfig::default();
        config.activities[2].name.clear();
        assert!(matches!(
            TrackingList::from_config(&config),
            Err(TrackerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_goals_default_when_missing() {
        let json = r#"{ "activities": [ { "name": "alpha", "priority": 1 } ] }"#;
        let config: TrackerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.total_hours_goal, 8);
        assert_eq!(config.total_acc_hours_goal, 40);
        assert!(config.pairs.is_empty());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = TrackerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
