pub mod draw_discard;
pub mod random;

pub use draw_discard::DrawDiscardBot;
pub use random::RandomBot;
