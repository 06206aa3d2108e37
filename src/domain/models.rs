pub const DEFAULT_EXTENSIONS: [&str; 8] = [
    "*.ts", "*.tsx", "*.js", "*.jsx", "*.css", "*.html", "*.json", "*.hbs",
];

pub const DEFAULT_EXCLUDED_DIRS: [&str; 3] = ["node_modules", "ios", "public"];

/// What to do when a matched file cannot be read for reasons other than
/// invalid UTF-8 (permissions, file vanished mid-walk, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadErrorPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone)]
pub struct ConcatConfig {
    pub root_path: String,
    pub output_path: String,
    pub extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
    pub read_error_policy: ReadErrorPolicy,
}

impl ConcatConfig {
    pub fn new(root_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            output_path: output_path.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            read_error_policy: ReadErrorPolicy::default(),
        }
    }

    pub fn with_read_error_policy(mut self, policy: ReadErrorPolicy) -> Self {
        self.read_error_policy = policy;
        self
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    Text(String),
    Undecodable,
    Unreadable(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConcatSummary {
    pub directories_visited: usize,
    pub files_written: usize,
    pub undecodable_files: usize,
    pub skipped_files: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConcatConfig::new("./web", "out.txt");

        assert_eq!(config.root_path, "./web");
        assert_eq!(config.output_path, "out.txt");
        assert_eq!(config.extensions.len(), 8);
        assert_eq!(config.extensions[0], "*.ts");
        assert_eq!(config.extensions[7], "*.hbs");
        assert_eq!(config.excluded_dirs, vec!["node_modules", "ios", "public"]);
        assert_eq!(config.read_error_policy, ReadErrorPolicy::Abort);
    }

    #[test]
    fn test_is_excluded_dir_is_exact() {
        let config = ConcatConfig::new(".", "out.txt");

        assert!(config.is_excluded_dir("node_modules"));
        assert!(config.is_excluded_dir("public"));
        assert!(!config.is_excluded_dir("node_modules_old"));
        assert!(!config.is_excluded_dir("Public"));
        assert!(!config.is_excluded_dir("src"));
    }
}
