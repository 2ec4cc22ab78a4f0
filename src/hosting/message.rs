use serde::Deserialize;

/// Inbound wire messages, one JSON text frame per request.
/// Shape validation happens here at the edge; the core only ever sees
/// well-formed identifiers, names, and exactly-three-id selections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Join { room: String, name: String },
    Select { ids: Vec<u8> },
    Hint,
    Leave,
}

/// non-empty, bounded room identifier
pub fn valid_room_id(room: &str) -> Result<&str, String> {
    if room.is_empty() {
        Err(String::from("room identifier must not be empty"))
    } else if room.len() > crate::ROOM_ID_LIMIT {
        Err(format!(
            "room identifier exceeds {} bytes",
            crate::ROOM_ID_LIMIT
        ))
    } else {
        Ok(room)
    }
}

/// non-empty after trimming, bounded display name
pub fn valid_name(name: &str) -> Result<&str, String> {
    let name = name.trim();
    if name.is_empty() {
        Err(String::from("display name must not be empty"))
    } else if name.len() > crate::NAME_LIMIT {
        Err(format!("display name exceeds {} bytes", crate::NAME_LIMIT))
    } else {
        Ok(name)
    }
}

/// exactly three distinct card ids
pub fn valid_selection(ids: &[u8]) -> Result<[u8; 3], String> {
    match *ids {
        [a, b, c] if a != b && b != c && a != c => Ok([a, b, c]),
        [_, _, _] => Err(String::from("selection must name 3 distinct cards")),
        _ => Err(String::from("selection must name exactly 3 cards")),
    }
}
