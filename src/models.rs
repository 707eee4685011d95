pub mod room_info;

pub use room_info::{EntityId, ExitEntry, ItemEntry, NpcEntry, PlayerEntry, RoomInfo, ShopEntry};
