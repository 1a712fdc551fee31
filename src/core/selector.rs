use crate::core::catalog::{Catalog, CategoryView};
use crate::domain::model::Provider;
use crate::domain::ports::Responder;
use std::sync::Arc;

/// Providers listed per category reply.
pub const MAX_LISTED_PROVIDERS: usize = 2;

pub const GREETING_REPLY: &str = "Hi there! I'm here to help you find the perfect recycling solution. You can tell me about any waste items like plastic bottles, paper, electronics, or glass containers.";

pub const HELP_REPLY: &str = "I can help you with:\n• Finding recyclers for specific waste types\n• Getting contact information and directions\n• Learning about recycling processes\n• Discovering community programs\n\nJust describe what you want to recycle!";

pub const THANKS_REPLY: &str = "You're welcome! Every small action makes a big difference for our environment. Is there anything else I can help you recycle today?";

pub const FALLBACK_REPLY: &str = "I understand you're looking for recycling options. Could you please specify what type of waste you'd like to recycle? For example: plastic bottles, paper, electronics, glass, or metal items.";

const CLOSING_PROMPT: &str =
    "Would you like directions to any of these locations or information about other waste types?";

/// Picks a reply for `input`. Pure and total: every input maps to some reply.
///
/// Category names are matched as case-insensitive substrings in catalog order
/// and the first hit wins, ahead of the greeting/help/thanks keywords.
pub fn select_reply(input: &str, catalog: &Catalog) -> String {
    let lowered = input.to_lowercase();

    if let Some(entry) = first_mentioned(&lowered, catalog) {
        return format_category_reply(entry);
    }

    if lowered.contains("hello") || lowered.contains("hi") {
        GREETING_REPLY.to_string()
    } else if lowered.contains("help") {
        HELP_REPLY.to_string()
    } else if lowered.contains("thank") {
        THANKS_REPLY.to_string()
    } else {
        FALLBACK_REPLY.to_string()
    }
}

fn first_mentioned<'a>(lowered: &str, catalog: &'a Catalog) -> Option<CategoryView<'a>> {
    catalog
        .entries()
        .find(|entry| lowered.contains(&entry.category().name.to_lowercase()))
}

fn format_category_reply(entry: CategoryView<'_>) -> String {
    let blocks: Vec<String> = entry
        .providers()
        .take(MAX_LISTED_PROVIDERS)
        .map(format_provider)
        .collect();

    tracing::debug!(
        "Matched category '{}', listing {} provider(s)",
        entry.category().id,
        blocks.len()
    );

    format!(
        "Great! For {}, I recommend these top recyclers near you:\n\n{}\n\n{}",
        entry.category().name.to_lowercase(),
        blocks.join("\n\n"),
        CLOSING_PROMPT
    )
}

fn format_provider(provider: &Provider) -> String {
    let mut block = format!(
        "🏢 **{}**\n📍 {}\n⭐ {}/5 stars\n📞 {}\n🚗 {} km away",
        provider.name, provider.address, provider.rating, provider.phone, provider.distance_km
    );
    if provider.verified {
        block.push_str(" ✅");
    }
    block
}

/// [`Responder`] backed by the keyword rules over a shared catalog.
#[derive(Debug, Clone)]
pub struct KeywordSelector {
    catalog: Arc<Catalog>,
}

impl KeywordSelector {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Responder for KeywordSelector {
    fn respond(&self, input: &str) -> String {
        select_reply(input, &self.catalog)
    }
}
