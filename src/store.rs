use crate::error::AppResult;
use crate::models::RoomInfo;
use std::sync::Arc;
use tokio::sync::watch;

/// Client-side state shared between the connection (writer) and the panels
/// (readers). Only the `room_info` slice lives here for now.
pub struct Store {
    room_info: watch::Sender<Arc<RoomInfo>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(RoomInfo::default()));
        Self { room_info: tx }
    }

    pub fn room_info(&self) -> Arc<RoomInfo> {
        self.room_info.borrow().clone()
    }

    /// Replace the room slice. Subscribers are only woken when the new value
    /// differs from the current one. Returns whether it did.
    pub fn set_room_info(&self, info: RoomInfo) -> bool {
        let changed = self.room_info.send_if_modified(|current| {
            if **current == info {
                return false;
            }
            *current = Arc::new(info);
            true
        });
        if changed {
            let room = self.room_info.borrow();
            tracing::debug!(room = %room.name, subscribers = self.room_info.receiver_count(), "room info replaced");
        }
        changed
    }

    /// Parse a room document (JSON) and store it.
    pub fn apply_json(&self, json: &str) -> AppResult<bool> {
        let info = RoomInfo::from_json(json)?;
        Ok(self.set_room_info(info))
    }

    pub fn subscribe(&self) -> RoomInfoSubscription {
        RoomInfoSubscription {
            rx: self.room_info.subscribe(),
        }
    }
}

/// Receiving end of the `room_info` slice.
pub struct RoomInfoSubscription {
    rx: watch::Receiver<Arc<RoomInfo>>,
}

impl RoomInfoSubscription {
    /// Current value; marks it as seen.
    pub fn current(&mut self) -> Arc<RoomInfo> {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the next replacement. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Arc<RoomInfo>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
