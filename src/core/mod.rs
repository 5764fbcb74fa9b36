// Core types shared by the engine and game layers

pub mod direction;

pub use direction::Direction;
