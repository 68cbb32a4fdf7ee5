use std::path::PathBuf;

/// Path of a recorded backend response under `tests/data`.
pub fn get_test_file_path<P: AsRef<str>>(name: P) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name.as_ref())
}

pub fn get_test_file_contents<P: AsRef<str>>(name: P) -> String {
    let path = get_test_file_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file '{}': {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_responses_load_by_name() {
        let name = String::from("banners.json");
        assert!(get_test_file_path(&name).ends_with("tests/data/banners.json"));
        assert!(get_test_file_contents(name).contains("Summer Sale"));
        assert!(get_test_file_contents("users.json").contains("Grace Hopper"));
    }
}
