use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use spdlog::{error, info};

use crate::batch::{file_label, FailedFile};
use crate::catalog::Catalog;
use crate::post_list::PostList;
use crate::rewrite::{apply_rules, RewriteRule, Substitution};

#[derive(Debug, Default)]
pub struct FixSummary {
    pub scanned: usize,
    pub modified: usize,
    pub substitutions: usize,
    pub failed: Vec<FailedFile>,
}

impl FixSummary {
    pub fn record(&mut self, path: &Path, outcome: &Result<Vec<Substitution>>) {
        self.scanned += 1;
        match outcome {
            Ok(subs) if subs.is_empty() => {}
            Ok(subs) => {
                self.modified += 1;
                self.substitutions += subs.len();
            }
            Err(e) => self.failed.push(FailedFile::new(path, e)),
        }
    }

    pub fn log(&self) {
        info!("=== Image Reference Summary ===");
        info!("Files scanned: {}", self.scanned);
        info!("Files modified: {}", self.modified);
        info!("References fixed: {}", self.substitutions);
        if !self.failed.is_empty() {
            error!("Failed files:");
            for failed in self.failed.iter() {
                error!("  - {}: {}", failed.file_name, failed.error);
            }
        }
    }
}

/// Fixes one migrated file in place. Files without a match are left untouched.
pub fn fix_file(path: &Path, rules: &[RewriteRule]) -> Result<Vec<Substitution>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Error reading {}", path.display()))?;

    let (fixed, substitutions) = apply_rules(&content, rules);
    if substitutions.is_empty() {
        return Ok(substitutions);
    }

    let file_name = file_label(path);
    for sub in substitutions.iter() {
        info!("Fixed {} -> {} in {}", sub.from, sub.to, file_name);
    }

    fs::write(path, fixed).with_context(|| format!("Error writing {}", path.display()))?;
    Ok(substitutions)
}

/// Scans the migrated posts of `content_dir` for legacy image references
pub struct RefFixer {
    pub content_dir: PathBuf,
    rules: Vec<RewriteRule>,
}

impl RefFixer {
    pub fn new(content_dir: PathBuf, catalog: &Catalog) -> Self {
        RefFixer {
            content_dir,
            rules: catalog.rules(),
        }
    }

    pub fn run(&self) -> Result<FixSummary> {
        info!("Fixing image references in {}", self.content_dir.display());

        if !self.content_dir.is_dir() {
            error!("Error: Content directory does not exist: {}", self.content_dir.display());
            bail!("Content directory does not exist: {}", self.content_dir.display());
        }

        let files = PostList::markdown(self.content_dir.clone()).retrieve_files()
            .with_context(|| format!("Error listing {}", self.content_dir.display()))?;

        let mut summary = FixSummary::default();
        for file in files {
            let outcome = fix_file(&file, &self.rules);
            if let Err(ref e) = outcome {
                error!("✗ Error processing {}: {:#}", file_label(&file), e);
            }
            summary.record(&file, &outcome);
        }

        summary.log();
        info!("Image reference fixing completed!");

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use tempfile::TempDir;

    use crate::catalog::LegacyRef;
    use crate::config::Assets;

    use super::*;

    fn builtin() -> Catalog {
        Catalog::builtin(&Assets::default())
    }

    #[test]
    fn test_fix_references() {
        let text = "![c](./Bits-and-Bytes-2022-12/comments.png) and ![c](./Bits-and-Bytes-2022-12/comments.png)\n\
                    ![s](./a-new-beginning/CodeLaunch Signup.jpeg)\n";
        let (fixed, subs) = apply_rules(text, &builtin().rules());
        assert_eq!(fixed, "![c](~/assets/images/blog/comments.png) and ![c](~/assets/images/blog/comments.png)\n\
                           ![s](~/assets/images/blog/CodeLaunch Signup.jpeg)\n");
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].count, 2);
    }

    #[test]
    fn test_unknown_directory_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.md");
        let text = "![c](./some-other-post/comments.png)";
        fs::write(&path, text).unwrap();

        let subs = fix_file(&path, &builtin().rules()).unwrap();
        assert!(subs.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_untouched_file_keeps_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.md");
        fs::write(&path, "---\ntitle: Clean\n---\n![x](~/assets/images/blog/x.png)\n").unwrap();

        let old = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options().write(true).open(&path).unwrap().set_modified(old).unwrap();

        let subs = fix_file(&path, &builtin().rules()).unwrap();
        assert!(subs.is_empty());
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), old);
    }

    #[test]
    fn test_run() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "![c](./Bits-and-Bytes-2022-12/comments.png)\n").unwrap();
        fs::write(dir.path().join("b.md"), "nothing to fix\n").unwrap();
        fs::write(dir.path().join("c.txt"), "./Bits-and-Bytes-2022-12/comments.png").unwrap();

        let catalog = Catalog::new(vec![LegacyRef {
            directory_name: "Bits-and-Bytes-2022-12".to_string(),
            file_name: "comments.png".to_string(),
            canonical_path: "~/assets/images/blog/comments.png".to_string(),
        }]);
        let summary = RefFixer::new(dir.path().to_path_buf(), &catalog).run().unwrap();
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.substitutions, 1);
        assert!(summary.failed.is_empty());

        assert_eq!(fs::read_to_string(dir.path().join("a.md")).unwrap(), "![c](~/assets/images/blog/comments.png)\n");
        assert_eq!(fs::read_to_string(dir.path().join("c.txt")).unwrap(), "./Bits-and-Bytes-2022-12/comments.png");
    }

    #[test]
    fn test_unreadable_file_does_not_abort() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        fs::write(dir.path().join("b.md"), "![c](./rock-climbing-career/rock-climbing.jpeg)").unwrap();

        let summary = RefFixer::new(dir.path().to_path_buf(), &builtin()).run().unwrap();
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].file_name, "a.md");
        assert_eq!(summary.modified, 1);
    }

    #[test]
    fn test_missing_content_dir() {
        let dir = TempDir::new().unwrap();
        let res = RefFixer::new(dir.path().join("missing"), &builtin()).run();
        assert!(res.is_err());
    }
}
