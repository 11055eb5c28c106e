pub mod beat_board;
pub mod buffer;
pub mod commands;
pub mod config;
pub mod file_io;
pub mod presenter;
pub mod scanner;
pub mod session;
pub mod suggest;
