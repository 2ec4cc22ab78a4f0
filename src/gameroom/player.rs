use serde::Serialize;

/// Opaque per-connection handle assigned by the hosting layer.
/// The only identity a player has; doubles as the score key.
pub type ConnectionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: ConnectionId,
    pub name: String,
}
