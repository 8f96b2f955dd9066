pub mod raffle;
pub mod randomness;

pub use raffle::*;
pub use randomness::*;
