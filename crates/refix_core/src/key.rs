//! File key normalization.

use std::path::{Component, Path, PathBuf};

/// Returns the cache key for `path`.
///
/// Paths under `base_dir` are made relative to it; `.` components are
/// dropped and separators are normalized to `/`, so the same file gets the
/// same key on every platform.
pub fn file_key(path: &Path, base_dir: Option<&Path>) -> String {
    let path = without_cur_dir(path);
    let relative = base_dir
        .map(without_cur_dir)
        .and_then(|base| path.strip_prefix(&base).ok().map(Path::to_path_buf))
        .unwrap_or(path);

    let mut parts: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::RootDir => parts.push(String::new()),
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    parts.join("/")
}

/// Drops `.` components, including a leading one that `Path::components`
/// keeps.
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("src/Foo.php", None, "src/Foo.php")]
    #[case::dot_prefix("./src/Foo.php", None, "src/Foo.php")]
    #[case::inner_dot("src/./Foo.php", None, "src/Foo.php")]
    #[case::absolute("/repo/src/Foo.php", None, "/repo/src/Foo.php")]
    #[case::under_base("/repo/src/Foo.php", Some("/repo"), "src/Foo.php")]
    #[case::outside_base("/other/Foo.php", Some("/repo"), "/other/Foo.php")]
    #[case::relative_base("project/src/Foo.php", Some("project"), "src/Foo.php")]
    #[case::dot_prefixed_path("./project/src/Foo.php", Some("project"), "src/Foo.php")]
    #[case::dot_prefixed_base("project/src/Foo.php", Some("./project"), "src/Foo.php")]
    #[case::both_dot_prefixed("./project/src/Foo.php", Some("./project"), "src/Foo.php")]
    #[case::dot_base("./src/Foo.php", Some("."), "src/Foo.php")]
    fn test_file_key(#[case] path: &str, #[case] base: Option<&str>, #[case] expected: &str) {
        assert_eq!(file_key(Path::new(path), base.map(Path::new)), expected);
    }

    #[test]
    fn test_file_key_same_file_same_key() {
        let spellings = [
            file_key(Path::new("project/src/Foo.php"), Some(Path::new("project"))),
            file_key(Path::new("./project/src/Foo.php"), Some(Path::new("project"))),
            file_key(Path::new("project/src/Foo.php"), Some(Path::new("./project"))),
            file_key(Path::new("./project/./src/Foo.php"), Some(Path::new("./project/"))),
        ];

        assert!(spellings.iter().all(|key| key == "src/Foo.php"), "{:?}", spellings);
    }
}
