use std::path::PathBuf;

use crate::core::{
    file_io::{build_output_path_with_date_time, FilePrefix},
    image_utils::write_image_to_file_or_panic,
};
use crate::fractals::{
    common::FractalParams,
    newtons_method::{render_frame, render_newtons_method},
};

pub fn render_fractal(
    params: &FractalParams,
    mut file_prefix: FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    match params {
        FractalParams::NewtonsMethod(inner_params) => {
            file_prefix.create_and_step_into_sub_directory("newtons_method");
            render_newtons_method(inner_params, file_prefix)
        }
    }
}

pub fn render_single_frame(
    params: &FractalParams,
    params_path: &str,
    angle: f64,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => build_output_path_with_date_time(params_path, "frame", &None).join("frame.png"),
    };
    match params {
        FractalParams::NewtonsMethod(inner_params) => {
            let rendered = render_frame(inner_params, angle)?;
            if rendered.fallback_count > 0 {
                log::warn!(
                    "{} pixels did not match any root",
                    rendered.fallback_count
                );
            }
            write_image_to_file_or_panic(output_path, |f| rendered.image.save(f));
        }
    }
    Ok(())
}
