use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an item or room as sent by the game. Numeric on most
/// servers, but some send strings, so both are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(i64),
    Str(String),
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::Num(0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Num(n) => write!(f, "{n}"),
            EntityId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(v: i64) -> Self {
        EntityId::Num(v)
    }
}

impl From<&str> for EntityId {
    fn from(v: &str) -> Self {
        EntityId::Str(v.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// VML tagged
    #[serde(default)]
    pub status_line: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcEntry {
    /// VML tagged
    #[serde(default)]
    pub status_line: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopEntry {
    /// VML tagged
    #[serde(default)]
    pub name: String,
}

/// Items are sent untagged; the panel colours them itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitEntry {
    #[serde(default)]
    pub room_id: EntityId,
    pub direction: String,
}

/// Snapshot of the room the player stands in. Replaced as a whole on every
/// update, never patched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
    #[serde(default)]
    pub npcs: Vec<NpcEntry>,
    #[serde(default)]
    pub shops: Vec<ShopEntry>,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
    /// `None` when the server sends no exits at all (null or missing). The
    /// panel then hides the whole exits line, while `Some(vec![])` still
    /// shows the label.
    #[serde(default)]
    pub exits: Option<Vec<ExitEntry>>,
}

impl Default for RoomInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            players: Vec::new(),
            npcs: Vec::new(),
            shops: Vec::new(),
            items: Vec::new(),
            exits: Some(Vec::new()),
        }
    }
}

impl RoomInfo {
    pub fn from_json(s: &str) -> crate::error::AppResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a room document (JSON) from disk.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::error::AppResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn exit(&self, direction: &str) -> Option<&ExitEntry> {
        self.exits.as_deref()?.iter().find(|e| e.direction == direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_default_to_empty() {
        let room = RoomInfo::from_json(r#"{"name":"Void"}"#).unwrap();
        assert_eq!(room.name, "Void");
        assert!(room.players.is_empty());
        assert!(room.npcs.is_empty());
        assert!(room.shops.is_empty());
        assert!(room.items.is_empty());
        assert_eq!(room.exits, None);
    }

    #[test]
    fn null_exits_stay_none() {
        let room = RoomInfo::from_json(r#"{"name":"Void","exits":null}"#).unwrap();
        assert_eq!(room.exits, None);
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let room = RoomInfo::from_json(
            r#"{"items":[{"id":1,"name":"rock"}],"exits":[{"room_id":"r-2","direction":"north"}]}"#,
        )
        .unwrap();
        assert_eq!(room.items[0].id, EntityId::Num(1));
        assert_eq!(room.exit("north").unwrap().room_id, EntityId::from("r-2"));
        assert!(room.exit("south").is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let room = RoomInfo::from_json(r#"{"name":"X","area":"Town","coords":[1,2]}"#).unwrap();
        assert_eq!(room.name, "X");
    }

    #[test]
    fn load_reads_file_and_reports_missing_one() {
        let path = std::env::temp_dir().join(format!("roompanel-room-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"name":"Docks","exits":[{"room_id":4,"direction":"west"}]}"#).unwrap();
        let room = RoomInfo::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(room.name, "Docks");
        assert!(room.exit("west").is_some());

        let missing = RoomInfo::load(&path);
        assert!(matches!(missing, Err(crate::error::PanelError::Io(_))));
    }

    #[test]
    fn default_room_has_empty_exit_list() {
        let room = RoomInfo::default();
        assert_eq!(room.exits, Some(Vec::new()));
    }
}
