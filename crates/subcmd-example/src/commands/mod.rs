pub mod echo;
pub mod pause;
pub mod upper;
