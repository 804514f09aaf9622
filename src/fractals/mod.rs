pub mod basin_coloring;
pub mod common;
pub mod newtons_method;
pub mod newtons_method_core;
pub mod rotating_roots;
