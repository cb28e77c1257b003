pub mod line;
pub mod recipient;

pub use line::Line;
pub use recipient::RecipientRecord;
