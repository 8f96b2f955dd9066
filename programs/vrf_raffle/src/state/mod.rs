pub mod events;
pub mod raffle_info;

pub use events::*;
pub use raffle_info::*;
