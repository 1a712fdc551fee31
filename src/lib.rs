pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::AssistantConfig;
pub use crate::core::{
    catalog::Catalog,
    engine::AssistantEngine,
    selector::{select_reply, KeywordSelector},
    session::ChatSession,
};
pub use utils::error::{AssistError, Result};
