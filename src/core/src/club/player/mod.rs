pub mod player;
pub mod skills;
pub mod traits;

pub use player::*;
pub use skills::*;
pub use traits::*;
