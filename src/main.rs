use clap::Parser;
use newton_basins::cli::args::{CommandsEnum, NewtonBasinsArgs};
use newton_basins::cli::render::{render_fractal, render_single_frame};
use newton_basins::core::file_io::{
    build_output_path_with_date_time, extract_base_name, maybe_date_time_string, FilePrefix,
};
use newton_basins::fractals::common::FractalParams;

fn load_params(path: &str) -> Result<FractalParams, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("Unable to read param file `{}`: {}", path, err))?;
    Ok(serde_json::from_str(&text)?)
}

fn run(args: &NewtonBasinsArgs) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Some(CommandsEnum::Render(params)) => {
            let file_prefix = FilePrefix {
                directory_path: build_output_path_with_date_time(
                    &params.params_path,
                    "render",
                    &maybe_date_time_string(params.date_time_out),
                ),
                file_base: extract_base_name(&params.params_path).to_owned(),
            };
            render_fractal(&load_params(&params.params_path)?, file_prefix)
        }

        Some(CommandsEnum::Frame(frame)) => render_single_frame(
            &load_params(&frame.params_path)?,
            &frame.params_path,
            frame.angle,
            frame.output.as_deref(),
        ),

        None => {
            log::info!("Default command (nothing specified!). Try `render <params.json>`.");
            Ok(())
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: NewtonBasinsArgs = NewtonBasinsArgs::parse();
    if let Err(err) = run(&args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
