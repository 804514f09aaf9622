pub mod color;
pub mod errors;
pub mod file_io;
pub mod image_utils;
pub mod interpolation;
pub mod stopwatch;
