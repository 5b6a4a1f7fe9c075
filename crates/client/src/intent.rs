use dronedeck_protocol::CellLabel;

/// What the interaction surface can ask for. The dispatcher in
/// [`crate::gateway::Commander`] maps each intent to its remote call plus the
/// unconditional post-mutation refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ToggleObstacle(CellLabel),
    AssignTask { pickup: CellLabel, drop: CellLabel },
    Reset,
    Refresh,
}

/// Parse the task form input: exactly two whitespace-separated cell labels,
/// case-insensitive. Rejection happens here, before any remote call is made.
pub fn parse_task_input(text: &str) -> anyhow::Result<(CellLabel, CellLabel)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        [pickup, drop] => {
            let pickup: CellLabel = pickup.parse()?;
            let drop: CellLabel = drop.parse()?;
            Ok((pickup, drop))
        }
        other => anyhow::bail!(
            "expected exactly two cell labels, e.g. \"A1 G8\" (got {} token{})",
            other.len(),
            if other.len() == 1 { "" } else { "s" }
        ),
    }
}
