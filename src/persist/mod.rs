pub mod identity;
pub mod reconciler;
pub mod snapshot;
pub mod store;

pub use identity::{load_or_create_player_id, PLAYER_ID_FILE};
pub use reconciler::{Reconciler, SavePhase, SAVE_DEBOUNCE};
pub use snapshot::PlayerSnapshot;
pub use store::{JsonFileStore, SnapshotStore, StoreError};
