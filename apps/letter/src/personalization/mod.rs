// Template / personalization engine.
// Placeholder substitution, greeting/closing rewriting, recipient parsing, filename slugs.
// Everything here is pure: no I/O, no logging, warnings are returned to the caller.

pub mod greeting;
pub mod placeholder;
pub mod recipients;
pub mod slug;

pub use greeting::{
    auto_personalize_letter, get_recipient_display_name, AutoPersonalizeOptions, ClosingStyle,
    GreetingStyle, PersonalizedLetter,
};
pub use placeholder::{extract_placeholders, render_template, Placeholder, RenderedTemplate};
pub use recipients::{parse_recipients_from_text, ParsedRecipients};
pub use slug::slugify_filename;
