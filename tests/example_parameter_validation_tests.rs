#[cfg(test)]
mod tests {
    use glob::glob;
    use newton_basins::fractals::common::FractalParams;
    use serde::de::DeserializeOwned;
    use std::any::type_name;
    use std::fs;

    fn parse_all_parameter_files_or_panic<T: DeserializeOwned>(pattern: &str) -> Vec<T> {
        let mut parsed = Vec::new();
        // For each match, ensure that we can (1) open the file and (2) parse it into the specified parameter type.
        for entry in glob(pattern).expect("Failed to read glob pattern") {
            match entry {
                Ok(path) => {
                    let content = fs::read_to_string(&path)
                        .unwrap_or_else(|_| panic!("Failed to read file: {:?}", path));

                    let result: Result<T, _> = serde_json::from_str(&content);

                    match result {
                        Ok(params) => parsed.push(params),
                        Err(err) => {
                            panic!(
                                "Failed to parse JSON file: {:?} as parameter type: `{}`.\n\n{:?}\n",
                                path,
                                type_name::<T>(),
                                err
                            );
                        }
                    }
                }
                Err(e) => panic!("Failed to read path: {:?}. Check permissions.", e),
            }
        }
        parsed
    }

    #[test]
    fn test_ensure_all_demo_files_can_be_parsed_and_validated() {
        for pattern in ["demos/**/*.json", "tests/param_files/*.json"] {
            let all_params = parse_all_parameter_files_or_panic::<FractalParams>(pattern);
            assert!(!all_params.is_empty(), "no parameter files match {}", pattern);
            for params in all_params {
                match params {
                    FractalParams::NewtonsMethod(inner) => inner
                        .validate()
                        .unwrap_or_else(|err| panic!("invalid parameters: {}", err)),
                }
            }
        }
    }
}
