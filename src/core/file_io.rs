use serde::Serialize;
use std::path::PathBuf;

pub fn extract_base_name(path: &str) -> &str {
    std::path::Path::new(path)
        .file_stem() // Get the base name component of the path
        .and_then(|name| name.to_str())
        .expect("Unable to extract base name")
}

pub fn build_output_path_with_date_time(
    params_path: &str,
    project: &str,
    datetime: &Option<String>,
) -> std::path::PathBuf {
    let mut dirs = vec!["out", project, extract_base_name(params_path)];
    if let Some(inner_datetime_str) = datetime {
        dirs.push(inner_datetime_str);
    }

    let directory_path: PathBuf = dirs.iter().collect();
    std::fs::create_dir_all(&directory_path)
        .unwrap_or_else(|_| panic!("failed to create directory: {:?}", directory_path));
    directory_path
}

pub fn date_time_string() -> String {
    use chrono::{Datelike, Local, Timelike};
    let local_time = Local::now();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        local_time.year(),
        local_time.month(),
        local_time.day(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    )
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    if enable {
        Option::Some(date_time_string())
    } else {
        Option::None
    }
}

/**
 * Store a path and prefix together, making it easily to quickly generate
 * a collection of files with the same prefix, but separate suffixes.
 */
#[derive(Debug, Clone)]
pub struct FilePrefix {
    pub directory_path: std::path::PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn with_suffix(&self, suffix: &str) -> std::path::PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }

    /// Path of the image for a single animation frame: `<base>-000042.png`.
    pub fn frame_file_name(&self, index: usize) -> std::path::PathBuf {
        self.with_suffix(&format!("-{:06}.png", index))
    }

    pub fn create_and_step_into_sub_directory(&mut self, name: &str) {
        self.directory_path.push(name);
        std::fs::create_dir_all(&self.directory_path)
            .unwrap_or_else(|_| panic!("failed to create directory: {:?}", self.directory_path));
    }
}

/// Writes `value` as pretty-printed JSON, aborting if the file cannot be written.
pub fn serialize_to_json_or_panic<T: Serialize>(filename: std::path::PathBuf, value: &T) {
    let file = std::fs::File::create(&filename)
        .unwrap_or_else(|_| panic!("failed to create file: {:?}", filename));
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)
        .unwrap_or_else(|_| panic!("failed to serialize JSON to: {:?}", filename));
    log::info!("Wrote parameter file to: {}", filename.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base_name() {
        assert_eq!(extract_base_name("demos/rotating-roots/params.json"), "params");
        assert_eq!(extract_base_name("tiny.json"), "tiny");
    }

    #[test]
    fn test_frame_file_name() {
        let prefix = FilePrefix {
            directory_path: PathBuf::from("out/render"),
            file_base: "newton-anim".to_owned(),
        };
        assert_eq!(
            prefix.frame_file_name(42),
            PathBuf::from("out/render/newton-anim-000042.png")
        );
        assert_eq!(
            prefix.with_suffix(".json"),
            PathBuf::from("out/render/newton-anim.json")
        );
    }

    #[test]
    fn test_maybe_date_time_string() {
        assert!(maybe_date_time_string(false).is_none());
        let date_time = maybe_date_time_string(true).unwrap();
        assert_eq!(date_time.len(), "20240101_120000".len());
    }
}
