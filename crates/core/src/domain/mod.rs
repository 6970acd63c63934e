pub mod booking;
pub mod cart;
pub mod package;
pub mod service;
