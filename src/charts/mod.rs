//! Charts module - Static chart rendering

mod prepare;
mod renderer;
mod style;

pub use renderer::{ChartError, ChartRenderer};
