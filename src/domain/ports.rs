use std::time::Duration;

/// Anything that turns a user utterance into an assistant reply.
pub trait Responder: Send + Sync {
    fn respond(&self, input: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn assistant_name(&self) -> &str;
    fn welcome_message(&self) -> &str;
    fn thinking_delay(&self) -> Duration;
    fn catalog_path(&self) -> Option<&str>;
}
