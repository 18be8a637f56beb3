/// Instruction and transaction builders for each launch step
pub mod account;
pub mod builder;
pub mod mint;
pub mod supply;

pub use account::*;
pub use builder::*;
pub use mint::*;
pub use supply::*;
