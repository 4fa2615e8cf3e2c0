//! Generated filter-query documentation catalog.
//!
//! `QUERY_DOCS` is the output of the documentation generator run against
//! grammY's filter-query API, embedded verbatim so the server carries no
//! runtime dependency on the generator. Entries stay in generator order;
//! the tree preserves that order everywhere it lists queries.

use serde::{Deserialize, Serialize};

/// One documented filter query: a colon-delimited path of one to three
/// non-empty segments, plus its documentation string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDoc {
    pub query: String,
    pub description: String,
}

impl QueryDoc {
    pub fn new(query: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            description: description.into(),
        }
    }
}

/// Raw generator output: `(query, description)` pairs in generator order.
///
/// Invariants the generator guarantees: every query has one to three
/// non-empty segments, and every first-segment family contains its bare
/// one-segment entry.
const QUERY_DOCS: &[(&str, &str)] = &[
    ("message", "Matches any new message of any content type."),
    ("message:text", "Matches new text messages."),
    ("message:animation", "Matches new messages containing an animation (GIF or short video without sound)."),
    ("message:audio", "Matches new messages containing an audio file."),
    ("message:document", "Matches new messages containing a general file."),
    ("message:photo", "Matches new messages containing a photo."),
    ("message:sticker", "Matches new messages containing a sticker."),
    ("message:video", "Matches new messages containing a video."),
    ("message:video_note", "Matches new messages containing a video note."),
    ("message:voice", "Matches new messages containing a voice note."),
    ("message:contact", "Matches new messages containing a shared contact."),
    ("message:dice", "Matches new messages containing a dice with a random value."),
    ("message:game", "Matches new messages containing a game."),
    ("message:poll", "Matches new messages containing a native poll."),
    ("message:venue", "Matches new messages containing a venue."),
    ("message:location", "Matches new messages containing a shared location."),
    ("message:entities", "Matches new text messages that contain at least one entity."),
    ("message:entities:mention", "Matches new text messages containing a @username mention."),
    ("message:entities:hashtag", "Matches new text messages containing a #hashtag."),
    ("message:entities:bot_command", "Matches new text messages containing a /command."),
    ("message:entities:url", "Matches new text messages containing a URL."),
    ("message:entities:email", "Matches new text messages containing an email address."),
    ("message:entities:phone_number", "Matches new text messages containing a phone number."),
    ("message:entities:code", "Matches new text messages containing inline code."),
    ("message:entities:pre", "Matches new text messages containing a code block."),
    ("message:caption", "Matches new media messages that have a caption."),
    ("message:caption_entities", "Matches new media messages whose caption contains at least one entity."),
    ("message:caption_entities:mention", "Matches new media captions containing a @username mention."),
    ("message:caption_entities:hashtag", "Matches new media captions containing a #hashtag."),
    ("message:caption_entities:url", "Matches new media captions containing a URL."),
    ("message:forward_origin", "Matches new messages forwarded from another chat or user."),
    ("message:pinned_message", "Matches service messages about a newly pinned message."),
    ("message:new_chat_members", "Matches service messages about members joining the chat."),
    ("message:left_chat_member", "Matches service messages about a member leaving the chat."),
    ("edited_message", "Matches any edit to a message the bot can see."),
    ("edited_message:text", "Matches edits to text messages."),
    ("edited_message:caption", "Matches edits to media captions."),
    ("edited_message:entities", "Matches edited text messages that contain at least one entity."),
    ("edited_message:entities:url", "Matches edited text messages containing a URL."),
    ("channel_post", "Matches any new post in a channel the bot is a member of."),
    ("channel_post:text", "Matches new text posts in channels."),
    ("channel_post:photo", "Matches new channel posts containing a photo."),
    ("channel_post:video", "Matches new channel posts containing a video."),
    ("channel_post:entities", "Matches new channel text posts that contain at least one entity."),
    ("channel_post:entities:url", "Matches new channel text posts containing a URL."),
    ("edited_channel_post", "Matches any edit to a channel post."),
    ("edited_channel_post:text", "Matches edits to channel text posts."),
    ("inline_query", "Matches incoming inline queries, sent when a user types the bot's username in a text field."),
    ("chosen_inline_result", "Matches results picked from an inline query, if result feedback is enabled."),
    ("callback_query", "Matches incoming callback queries from inline keyboard buttons."),
    ("callback_query:data", "Matches callback queries that carry string data."),
    ("callback_query:game_short_name", "Matches callback queries from game buttons."),
    ("shipping_query", "Matches incoming shipping queries for invoices with flexible pricing."),
    ("pre_checkout_query", "Matches incoming pre-checkout queries, sent right before a payment completes."),
    ("poll", "Matches updates about changed states of native polls the bot sent."),
    ("poll_answer", "Matches updates about users changing their answer in non-anonymous polls."),
    ("my_chat_member", "Matches updates about the bot's own chat member status."),
    ("chat_member", "Matches updates about other chat members; must be enabled via allowed_updates."),
    ("chat_join_request", "Matches requests to join a chat the bot administers."),
];

/// Materializes the embedded catalog in generator order.
pub fn generate() -> Vec<QueryDoc> {
    QUERY_DOCS
        .iter()
        .map(|(query, description)| QueryDoc::new(*query, *description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_one_to_three_nonempty_segments() {
        for doc in generate() {
            let segments: Vec<&str> = doc.query.split(':').collect();
            assert!(
                (1..=3).contains(&segments.len()),
                "query {} has {} segments",
                doc.query,
                segments.len()
            );
            assert!(
                segments.iter().all(|segment| !segment.is_empty()),
                "query {} has an empty segment",
                doc.query
            );
        }
    }

    #[test]
    fn every_family_has_its_bare_entry() {
        let docs = generate();
        for doc in &docs {
            let first = doc.query.split(':').next().unwrap();
            assert!(
                docs.iter().any(|d| d.query == first),
                "family {} lacks a bare entry",
                first
            );
        }
    }

    #[test]
    fn queries_are_unique() {
        let docs = generate();
        for (i, doc) in docs.iter().enumerate() {
            assert!(
                !docs[..i].iter().any(|d| d.query == doc.query),
                "duplicate query {}",
                doc.query
            );
        }
    }
}
