pub mod effort;
pub mod ids;
pub mod message;
pub mod node_update;
pub mod request;
pub mod serde_utils;
pub mod theme;
pub mod timeline;

pub use effort::{Effort, EffortConfig};
pub use ids::{MessageId, RunId};
pub use message::{Message, Role};
pub use node_update::{nodes, NodePayload, NodeUpdate};
pub use request::SessionRequest;
pub use theme::Theme;
pub use timeline::{Source, TimelineEntry};
