pub mod owner;
pub mod player;
pub mod roles;
pub mod season;
pub mod team;
pub mod user;

pub use roles::{PlayerRole, StaffRole};
