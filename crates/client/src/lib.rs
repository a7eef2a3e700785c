pub mod board;
pub mod clients;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod explorer;
pub mod page;
pub mod play;
pub mod terminal;
pub mod training;
pub mod view;
