pub mod catalog;
pub mod engine;
pub mod selector;
pub mod session;

pub use crate::domain::model::{Category, Message, Provider, Sender};
pub use crate::domain::ports::{ConfigProvider, Responder};
pub use crate::utils::error::Result;
