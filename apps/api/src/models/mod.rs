pub mod conversation;
pub mod knowledge;
pub mod lenient;
