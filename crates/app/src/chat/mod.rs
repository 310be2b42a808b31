//! Chat utilities: tokenization, inline-roll substitution, styled replies.

mod inline_rolls;
mod responder;
mod tokenizer;

pub use inline_rolls::substitute_inline_rolls;
pub use responder::{ReplyTarget, Responder};
pub use tokenizer::tokenize;
