// Engine modules: frame timing, input, deferred timers, stand-in bodies

pub mod body;
pub mod game_loop;
pub mod input;
pub mod timer;
