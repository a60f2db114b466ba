pub mod game;
pub mod homepage;
