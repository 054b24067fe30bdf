//! Resume parsing: text extraction, contact/skill fields, skill clustering.
//! Language analysis goes through the injected `nlp::LanguagePipeline`.

pub mod clustering;
pub mod fields;
pub mod handlers;
pub mod text;
