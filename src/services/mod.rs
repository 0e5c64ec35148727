pub mod dialogue;
pub mod engine;
pub mod nlu;
pub mod speech;
