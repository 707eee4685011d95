pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod panel;
pub mod renderer;
pub mod sink;
pub mod store;
pub mod theme;
pub mod view;
pub mod vml;

// Convenient re-exports (so call sites can do `roompanel::RoomPanel`, etc.)
pub use models::RoomInfo;
pub use panel::RoomPanel;
pub use sink::{ChannelSink, CommandSink, MemorySink};
pub use store::{RoomInfoSubscription, Store};
pub use theme::Theme;
