// Engine modules: input, physics, frame timing, render hand-off

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
