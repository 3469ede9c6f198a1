pub mod models;
pub mod normalize;
mod summary;
pub mod window;

pub use models::{EventKind, RawRow, TournamentRecord};
pub use normalize::{RecordNormalizer, normalize_rows};
pub use summary::{KindSummary, RunSummary};
pub use window::window_for;
