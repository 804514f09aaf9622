use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct NewtonBasinsArgs {
    #[command(subcommand)]
    pub command: Option<CommandsEnum>,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Render every frame described by a parameter file.
    Render(ParameterFilePath),
    /// Render a single frame at a given angle.
    Frame(FrameArgs),
}

#[derive(Debug, Args)]
pub struct ParameterFilePath {
    pub params_path: String,

    #[clap(long, short)]
    pub date_time_out: bool,
}

#[derive(Debug, Args)]
pub struct FrameArgs {
    pub params_path: String,

    /// Animation angle, in radians.
    #[clap(long, short, allow_negative_numbers = true)]
    pub angle: f64,

    /// Output image path; defaults to `out/frame/<params base name>/frame.png`.
    #[clap(long, short)]
    pub output: Option<String>,
}
