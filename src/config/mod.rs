pub mod events;
pub mod settings;

pub use events::{UrlTemplate, templates_for};
pub use settings::AppConfig;
