pub mod game;

pub use game::{Game, ImageFile, NewGame};
