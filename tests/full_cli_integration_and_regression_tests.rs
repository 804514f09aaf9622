#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use newton_basins::{
        cli::render::render_fractal, core::file_io::FilePrefix, fractals::common::FractalParams,
    };

    fn load_tiny_params() -> FractalParams {
        serde_json::from_str(
            &std::fs::read_to_string("tests/param_files/newtons_method_tiny.json")
                .expect("Unable to read param file"),
        )
        .unwrap()
    }

    #[test]
    fn test_newtons_method_render_writes_every_frame() {
        let directory_path: PathBuf = ["out", "integration_test"].iter().collect();
        std::fs::create_dir_all(&directory_path).unwrap();
        let file_prefix = FilePrefix {
            directory_path: directory_path.clone(),
            file_base: String::from("newtons_method_tiny"),
        };

        render_fractal(&load_tiny_params(), file_prefix).unwrap();

        let render_dir = directory_path.join("newtons_method");
        assert!(render_dir.join("newtons_method_tiny.json").exists());
        for index in 0..2 {
            let frame_path = render_dir.join(format!("newtons_method_tiny-{:06}.png", index));
            let frame = image::open(&frame_path)
                .unwrap_or_else(|_| panic!("missing frame: {:?}", frame_path))
                .to_rgb8();
            assert_eq!(frame.dimensions(), (32, 24));
        }
        assert!(!render_dir.join("newtons_method_tiny-000002.png").exists());
    }
}
