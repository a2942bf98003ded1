use glob::Pattern;

use super::{compile_patterns, matches_any};
use crate::core::{FileCategory, Result};

const CI_DIRS: &[&str] = &[
    ".github",
    ".gitlab",
    ".circleci",
    ".travis",
    ".buildkite",
    ".azure-pipelines",
];

const CI_FILES: &[&str] = &[
    ".travis.yml",
    ".travis.yaml",
    ".gitlab-ci.yml",
    ".gitlab-ci.yaml",
    "azure-pipelines.yml",
    "azure-pipelines.yaml",
    "bitbucket-pipelines.yml",
    "appveyor.yml",
    ".drone.yml",
    "cloudbuild.yaml",
    "jenkinsfile",
];

const BUILD_FILES: &[&str] = &[
    "makefile",
    "*.mk",
    "cmakelists.txt",
    "*.cmake",
    "dockerfile*",
    "docker-compose*",
    "build.gradle*",
    "settings.gradle*",
    "pom.xml",
    "build.rs",
    "meson.build",
    "justfile",
    "rakefile",
    "gulpfile.*",
    "gruntfile.*",
];

const CONFIG_DIRS: &[&str] = &[".vscode", ".idea", ".devcontainer", ".husky"];

const CONFIG_FILES: &[&str] = &[
    ".*rc",
    ".*rc.*",
    "*.config.*",
    "tsconfig*.json",
    "jsconfig*.json",
    "package.json",
    "cargo.toml",
    "pyproject.toml",
    "setup.cfg",
    "setup.py",
    "tox.ini",
    "go.mod",
    "go.sum",
    "requirements*.txt",
    "constraints*.txt",
    "gemfile",
    "composer.json",
    ".gitignore",
    ".gitattributes",
    ".gitmodules",
    ".editorconfig",
    ".env*",
];

const CONFIG_EXTENSIONS: &[&str] = &[
    ".json", ".yaml", ".yml", ".toml", ".ini", ".cfg", ".conf", ".properties", ".tf", ".tfvars",
    ".hcl", ".csproj", ".fsproj", ".sln",
];

const DOCS_DIRS: &[&str] = &["docs", "doc", "documentation", "wiki", "man"];

const DOCS_FILES: &[&str] = &[
    "readme*",
    "changelog*",
    "changes*",
    "history*",
    "contributing*",
    "license*",
    "licence*",
    "authors*",
    "maintainers*",
    "code_of_conduct*",
    "security.md",
];

const DOCS_EXTENSIONS: &[&str] = &[".md", ".rst", ".adoc", ".asciidoc", ".txt", ".tex"];

/// Filename and directory rules for the secondary file category.
///
/// Order: CI, build, config and docs by name or directory, then config and
/// docs by extension; anything else is source.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    ci_files: Vec<Pattern>,
    build_files: Vec<Pattern>,
    config_files: Vec<Pattern>,
    docs_files: Vec<Pattern>,
}

impl CategoryRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ci_files: compile_patterns(CI_FILES)?,
            build_files: compile_patterns(BUILD_FILES)?,
            config_files: compile_patterns(CONFIG_FILES)?,
            docs_files: compile_patterns(DOCS_FILES)?,
        })
    }

    /// Category for a file name inside lowercased directory segments.
    pub fn categorize(&self, name: &str, segments: &[String]) -> FileCategory {
        let in_dirs = |dirs: &[&str]| segments.iter().any(|s| dirs.contains(&s.as_str()));
        let extension = crate::core::path::extension(name);
        let has_extension = |extensions: &[&str]| {
            extension
                .as_deref()
                .is_some_and(|ext| extensions.contains(&ext))
        };

        if in_dirs(CI_DIRS) || matches_any(&self.ci_files, name) {
            FileCategory::Ci
        } else if matches_any(&self.build_files, name) {
            FileCategory::Build
        } else if in_dirs(CONFIG_DIRS) || matches_any(&self.config_files, name) {
            FileCategory::Config
        } else if in_dirs(DOCS_DIRS) || matches_any(&self.docs_files, name) {
            FileCategory::Docs
        } else if has_extension(CONFIG_EXTENSIONS) {
            FileCategory::Config
        } else if has_extension(DOCS_EXTENSIONS) {
            FileCategory::Docs
        } else {
            FileCategory::Source
        }
    }
}
