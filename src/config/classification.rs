use serde::{Deserialize, Serialize};

/// Rules the file classifier applies to record paths.
///
/// Directory lists match whole path segments; pattern lists are globs matched
/// case-insensitively against the file name, except `exclude_patterns` which
/// match the full repo-relative path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Directory names holding third-party code
    #[serde(default = "default_vendor_dirs")]
    pub vendor_dirs: Vec<String>,

    /// Directory names holding build output or generated code
    #[serde(default = "default_generated_dirs")]
    pub generated_dirs: Vec<String>,

    /// Directory names holding tests
    #[serde(default = "default_test_dirs")]
    pub test_dirs: Vec<String>,

    /// File name globs marking generated files (e.g. `*.min.*`)
    #[serde(default = "default_generated_file_patterns")]
    pub generated_file_patterns: Vec<String>,

    /// File name globs marking test files (e.g. `test_*.py`)
    #[serde(default = "default_test_file_patterns")]
    pub test_file_patterns: Vec<String>,

    /// Additional full-path globs to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Languages checked by the minification heuristic
    #[serde(default = "default_minification_languages")]
    pub minification_languages: Vec<String>,

    /// Minimum average bytes per line for a minified file (default: 250)
    #[serde(default = "default_min_avg_line_length")]
    pub min_avg_line_length: f64,

    /// Minimum share of code lines among all lines for a minified file (default: 0.9)
    #[serde(default = "default_min_code_density")]
    pub min_code_density: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            vendor_dirs: default_vendor_dirs(),
            generated_dirs: default_generated_dirs(),
            test_dirs: default_test_dirs(),
            generated_file_patterns: default_generated_file_patterns(),
            test_file_patterns: default_test_file_patterns(),
            exclude_patterns: Vec::new(),
            minification_languages: default_minification_languages(),
            min_avg_line_length: default_min_avg_line_length(),
            min_code_density: default_min_code_density(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_vendor_dirs() -> Vec<String> {
    strings(&[
        "vendor",
        "node_modules",
        "third_party",
        "bower_components",
        "jspm_packages",
        "web_modules",
        ".nuget",
    ])
}

fn default_generated_dirs() -> Vec<String> {
    strings(&[
        "generated",
        "dist",
        "out",
        "target",
        "obj",
        "_build",
        "__pycache__",
        ".next",
        ".nuxt",
        ".cache",
    ])
}

fn default_test_dirs() -> Vec<String> {
    strings(&[
        "tests",
        "test",
        "__tests__",
        "spec",
        "testing",
        "testdata",
        "fixtures",
        "e2e",
        "__mocks__",
    ])
}

fn default_generated_file_patterns() -> Vec<String> {
    strings(&[
        "*.min.*",
        "*.bundle.js",
        "*.generated.*",
        "*.g.cs",
        "*.designer.cs",
        "*.pb.go",
        "*_pb2.py",
        "*_pb2_grpc.py",
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "cargo.lock",
        "poetry.lock",
        "pipfile.lock",
    ])
}

fn default_test_file_patterns() -> Vec<String> {
    strings(&[
        "test_*.py",
        "*_test.py",
        "conftest.py",
        "*.test.[jt]s",
        "*.test.[jt]sx",
        "*.spec.[jt]s",
        "*.spec.[jt]sx",
        "*test.java",
        "*tests.java",
        "*test.cs",
        "*tests.cs",
        "*_test.go",
        "*_test.rs",
        "*_spec.rb",
    ])
}

fn default_minification_languages() -> Vec<String> {
    strings(&["JavaScript", "TypeScript", "CSS", "HTML", "JSON"])
}

fn default_min_avg_line_length() -> f64 {
    250.0
}

fn default_min_code_density() -> f64 {
    0.9
}
