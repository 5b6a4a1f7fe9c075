use serde::{Deserialize, Serialize};

pub mod label;

pub use label::{CellLabel, InvalidLabel};

/// One complete, immutable view of simulation state at a point in time.
///
/// Field names match the service's JSON verbatim. A snapshot is replaced
/// wholesale on every successful fetch; it is never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid_size: u32,
    pub cell_size: f64,
    pub obstacles: Vec<Obstacle>,
    pub drones: Vec<Drone>,
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obstacle {
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    /// Opaque status token (idle/moving/charging/...). The service owns the
    /// vocabulary; the client must not validate against a closed enum.
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleObstacleRequest {
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignTaskRequest {
    pub pickup: String,
    pub drop: String,
}

/// Service-defined mutation acknowledgment. The shape is not guaranteed
/// upstream, so every field is optional and callers treat the whole thing as
/// informational only; a forced refresh is the source of truth after any
/// mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_roundtrips_through_json() {
        let snap = Snapshot {
            grid_size: 10,
            cell_size: 60.0,
            obstacles: vec![Obstacle { row: 2, col: 3 }],
            drones: vec![Drone {
                id: 1,
                x: 30.0,
                y: 30.0,
                state: "idle".to_string(),
                battery: Some(97.5),
                reward_step: Some(-0.05),
                reward_total: Some(12.0),
                task: None,
            }],
            logs: vec!["Added obstacle C4".to_string()],
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn drone_without_numeric_fields_deserializes() {
        let json = r#"{"id":2,"x":90.0,"y":30.0,"state":"charging"}"#;
        let drone: Drone = serde_json::from_str(json).unwrap();
        assert_eq!(drone.battery, None);
        assert_eq!(drone.reward_step, None);
        assert_eq!(drone.reward_total, None);
    }

    #[test]
    fn drone_state_vocabulary_is_open() {
        let json = r#"{"id":3,"x":0.0,"y":0.0,"state":"replanning-around-debris"}"#;
        let drone: Drone = serde_json::from_str(json).unwrap();
        assert_eq!(drone.state, "replanning-around-debris");
    }

    #[test]
    fn ack_tolerates_unknown_and_missing_fields() {
        let ack: Ack = serde_json::from_str(r#"{"success":true,"drone_id":1}"#).unwrap();
        assert_eq!(ack.success, Some(true));
        assert_eq!(ack.message, None);

        let bare: Ack = serde_json::from_str("{}").unwrap();
        assert_eq!(bare.success, None);
    }
}
