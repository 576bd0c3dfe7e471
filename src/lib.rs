pub mod animation;
pub mod arcade;
pub mod collaborators;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
