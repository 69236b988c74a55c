//! Outline documents
//!
//! - `document`: the structured-document interface the synchronizer works against
//! - `outline`: an in-memory arena implementation of that interface
//! - `org`: reading and writing outlines in Org syntax

pub mod document;
pub mod org;
pub mod outline;

pub const ROOT_LEVEL: usize = 0;
pub const ATTENTION_KEYWORD: &str = "TODO";
pub const KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "TODO",
    "DONE",
};

pub const HEADING_REGEX: &str = r"^(\*+)[ \t]+(.*)$";
pub const PROPERTY_REGEX: &str = r"^[ \t]*:([^:\s]+):(?:[ \t]+(.*?))?[ \t]*$";
pub const DRAWER_START: &str = ":PROPERTIES:";
pub const DRAWER_END: &str = ":END:";
