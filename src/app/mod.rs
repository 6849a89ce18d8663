pub mod controller;
pub mod effect;
pub mod navigation;
pub mod session;
pub mod state;
pub mod timeline;
pub mod update;

pub use effect::Effect;
pub use navigation::handle_key;
pub use session::{SessionState, TurnPhase};
pub use state::{ActivitySource, AppState, MetaState, UiState};
pub use timeline::{HistoryIndex, TimelineAggregator};
pub use update::update;
