use serde::Deserialize;

use crate::config::Assets;
use crate::rewrite::RewriteRule;

/// Per-post directory names used by the blog before the migration
pub const LEGACY_DIRECTORIES: [&str; 11] = [
    "Bits-and-Bytes-2022-11",
    "Bits-and-Bytes-2022-12",
    "Bits-and-Bytes-2022-13",
    "Bits-and-Bytes-2022-5",
    "Bits-and-Bytes-2022-6",
    "Bits-and-Bytes-2022-7",
    "Bits-and-Bytes-2022-9",
    "serverless-blogs-revisited",
    "a-new-beginning",
    "evolving-with-agentic-ai",
    "rock-climbing-career",
];

/// Images already moved to the asset directory under their bare name
pub const LEGACY_IMAGES: [&str; 9] = [
    "codelaunch_dfw.png",
    "codelaunch.png",
    "comments.png",
    "b-n-b.jpg",
    "evolving-with-ai.png",
    "markus-spiske-code.jpeg",
    "rock-climbing.jpeg",
    "kaushik-panchal-clouds.jpeg",
    "CodeLaunch Signup.jpeg",
];

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LegacyRef {
    pub directory_name: String,
    pub file_name: String,
    pub canonical_path: String,
}

impl LegacyRef {
    pub fn legacy_path(&self) -> String {
        format!("./{}/{}", self.directory_name, self.file_name)
    }

    pub fn rule(&self) -> RewriteRule {
        RewriteRule::new(self.legacy_path(), self.canonical_path.clone())
    }
}

/// Table of legacy image references and where they live now
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<LegacyRef>,
}

impl Catalog {
    pub fn new(entries: Vec<LegacyRef>) -> Self {
        Catalog { entries }
    }

    /// Every known image under every historical directory name
    pub fn builtin(assets: &Assets) -> Self {
        let mut entries = Vec::with_capacity(LEGACY_IMAGES.len() * LEGACY_DIRECTORIES.len());
        for file_name in LEGACY_IMAGES {
            let canonical_path = assets.reference_for(file_name);
            for directory_name in LEGACY_DIRECTORIES {
                entries.push(LegacyRef {
                    directory_name: directory_name.to_string(),
                    file_name: file_name.to_string(),
                    canonical_path: canonical_path.clone(),
                });
            }
        }
        Catalog { entries }
    }

    pub fn entries(&self) -> &[LegacyRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rules(&self) -> Vec<RewriteRule> {
        self.entries.iter().map(LegacyRef::rule).collect()
    }
}
