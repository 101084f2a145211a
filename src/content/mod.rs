use serde_yaml::Mapping;

pub mod content_file;
pub mod metadata;
pub mod parsing_utils;

/// A Hexo post split into its front-matter and markdown body
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePost {
    pub file_name: String,
    pub front_matter: Mapping,
    pub body: String,
}
