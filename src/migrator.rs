use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use spdlog::{error, info, warn};

use crate::batch::{file_label, FailedFile};
use crate::catalog::Catalog;
use crate::config::{Assets, Config};
use crate::content::content_file::ContentFile;
use crate::content::metadata::{normalize_meta, PostMeta};
use crate::content::parsing_utils::render_post;
use crate::images::migrate_post_images;
use crate::post_list::PostList;
use crate::rewrite::{apply_rules, RewriteRule, Substitution};
use crate::text_utils::{format_day, slugify};
use crate::util::post_date::PostDate;

/// Outcome of one successfully migrated post
#[derive(Debug)]
pub struct MigratedPost {
    pub file_name: String,
    pub slug: String,
    pub output_path: PathBuf,
    pub meta: PostMeta,
    pub images_copied: usize,
    pub image_failures: Vec<String>,
    pub warnings: Vec<String>,
    pub substitutions: Vec<Substitution>,
}

/// Totals of a migration run, filled post by post
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: Vec<FailedFile>,
    pub images_copied: usize,
    pub image_failures: usize,
    pub warnings: usize,
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub earliest: Option<PostDate>,
    pub latest: Option<PostDate>,
}

impl RunSummary {
    pub fn record(&mut self, post_path: &Path, outcome: &Result<MigratedPost>) {
        self.total += 1;

        let post = match outcome {
            Ok(post) => post,
            Err(e) => {
                self.failed.push(FailedFile::new(post_path, e));
                return;
            }
        };

        self.successful += 1;
        self.images_copied += post.images_copied;
        self.image_failures += post.image_failures.len();
        self.warnings += post.warnings.len();
        self.categories.extend(post.meta.categories.iter().cloned());
        self.tags.extend(post.meta.tags.iter().cloned());

        if let Some(date) = post.meta.publish_date {
            if self.earliest.map_or(true, |earliest| date < earliest) {
                self.earliest = Some(date);
            }
            if self.latest.map_or(true, |latest| date > latest) {
                self.latest = Some(date);
            }
        }
    }

    pub fn log(&self) {
        info!("=== Migration Summary ===");
        info!("Total files processed: {}", self.total);
        info!("Successfully migrated: {}", self.successful);
        info!("Failed: {}", self.failed.len());
        info!("Images copied: {}", self.images_copied);
        if self.image_failures > 0 {
            warn!("Images not copied: {}", self.image_failures);
        }
        if self.warnings > 0 {
            warn!("Warnings: {}", self.warnings);
        }

        if !self.failed.is_empty() {
            error!("Failed files:");
            for failed in self.failed.iter() {
                error!("  - {}: {}", failed.file_name, failed.error);
            }
        }

        info!("=== Content Statistics ===");
        info!("Categories found: {}", self.categories.len());
        if !self.categories.is_empty() {
            info!("  Categories: {}", join(&self.categories));
        }
        info!("Tags found: {}", self.tags.len());
        if !self.tags.is_empty() {
            info!("  Tags: {}", join(&self.tags));
        }
        if let (Some(earliest), Some(latest)) = (self.earliest, self.latest) {
            info!("Date range: {} to {}", format_day(&earliest.0), format_day(&latest.0));
        }
    }
}

fn join(items: &BTreeSet<String>) -> String {
    items.iter().map(String::as_str).collect::<Vec<&str>>().join(", ")
}

/// Converts a Hexo `_posts` directory into an Astro content collection
pub struct Migrator {
    pub source_dir: PathBuf,
    pub content_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub assets: Assets,
    catalog_rules: Vec<RewriteRule>,
}

impl Migrator {
    pub fn new(config: &Config) -> Self {
        Self::with_catalog(config, &config.catalog())
    }

    pub fn with_catalog(config: &Config, catalog: &Catalog) -> Self {
        Migrator {
            source_dir: config.paths.source_dir.clone(),
            content_dir: config.paths.content_dir.clone(),
            assets_dir: config.paths.assets_dir.clone(),
            assets: config.assets.clone(),
            catalog_rules: catalog.rules(),
        }
    }

    pub fn migrate_post(&self, post_path: &Path) -> Result<MigratedPost> {
        let content_file = ContentFile::from_file(post_path.to_path_buf())
            .with_context(|| format!("Error reading {}", post_path.display()))?;
        let post = content_file.parse()?;

        let slug = slugify(&post.file_name);
        if slug.is_empty() {
            bail!("Could not derive a slug from {}", post.file_name);
        }

        let normalized = normalize_meta(&post.front_matter, &post.file_name);
        let images = migrate_post_images(post_path, &slug, &self.assets_dir, &self.assets)?;

        // Images of the post first, the legacy catalog only sees what is left
        let mut rules = images.rules(&slug);
        rules.extend(self.catalog_rules.iter().cloned());
        let (body, substitutions) = apply_rules(&post.body, &rules);

        let rendered = render_post(&normalized.meta, &body)?;
        let output_path = self.content_dir.join(format!("{}.md", slug));
        fs::write(&output_path, rendered)
            .with_context(|| format!("Error writing {}", output_path.display()))?;

        info!("✓ Migrated: {} -> {}.md", post.file_name, slug);
        if !images.copied.is_empty() {
            info!("  └─ Copied {} image(s)", images.copied.len());
        }

        Ok(MigratedPost {
            file_name: post.file_name,
            slug,
            output_path,
            meta: normalized.meta,
            images_copied: images.copied.len(),
            image_failures: images.failures,
            warnings: normalized.warnings,
            substitutions,
        })
    }

    /// Migrates every post of the source directory. Only a missing source
    /// directory stops the run, failing posts are logged and counted.
    pub fn run(&self) -> Result<RunSummary> {
        info!("Starting Hexo to Astro migration...");
        info!("Source: {}", self.source_dir.display());
        info!("Target: {}", self.content_dir.display());

        if !self.source_dir.is_dir() {
            error!("Error: Source directory does not exist: {}", self.source_dir.display());
            bail!("Source directory does not exist: {}", self.source_dir.display());
        }

        fs::create_dir_all(&self.content_dir)
            .with_context(|| format!("Error creating {}", self.content_dir.display()))?;
        fs::create_dir_all(&self.assets_dir)
            .with_context(|| format!("Error creating {}", self.assets_dir.display()))?;

        let files = PostList::markdown(self.source_dir.clone()).retrieve_files()
            .with_context(|| format!("Error listing {}", self.source_dir.display()))?;
        info!("Found {} Hexo posts to migrate", files.len());

        let mut summary = RunSummary::default();
        let mut outputs: HashMap<String, String> = HashMap::new();
        for file in files {
            let outcome = self.migrate_post(&file);
            match outcome {
                Ok(ref post) => {
                    if let Some(previous) = outputs.insert(post.slug.clone(), post.file_name.clone()) {
                        warn!("{} overwrote {}.md written for {}", post.file_name, post.slug, previous);
                    }
                }
                Err(ref e) => error!("✗ Error processing {}: {:#}", file_label(&file), e),
            }
            summary.record(&file, &outcome);
        }

        summary.log();
        info!("Migration completed!");

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::config::Paths;
    use crate::content::parsing_utils::split_front_matter;
    use crate::test_data::{HEXO_POST, HEXO_POST_PLAIN, HEXO_POST_WITH_IMAGE, MALFORMED_POST};

    use super::*;

    struct Blog {
        _root: TempDir,
        config: Config,
    }

    impl Blog {
        fn new() -> Blog {
            let root = TempDir::new().unwrap();
            let paths = Paths {
                source_dir: root.path().join("source/_posts"),
                content_dir: root.path().join("src/content/blog"),
                assets_dir: root.path().join("src/assets/images/blog"),
            };
            fs::create_dir_all(&paths.source_dir).unwrap();
            fs::create_dir_all(&paths.content_dir).unwrap();
            fs::create_dir_all(&paths.assets_dir).unwrap();
            let config = Config { paths, ..Config::default() };
            Blog { _root: root, config }
        }

        fn add_post(&self, file_name: &str, content: &str) -> PathBuf {
            let path = self.config.paths.source_dir.join(file_name);
            fs::write(&path, content).unwrap();
            path
        }

        fn add_image(&self, post_dir: &str, image: &str) {
            let dir = self.config.paths.source_dir.join(post_dir);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(image), "image-bytes").unwrap();
        }

        fn output(&self, slug: &str) -> String {
            fs::read_to_string(self.config.paths.content_dir.join(format!("{}.md", slug))).unwrap()
        }
    }

    #[test]
    fn test_end_to_end() {
        let blog = Blog::new();
        blog.add_post("foo.md", HEXO_POST_WITH_IMAGE);
        blog.add_image("foo", "bar.png");
        blog.add_post("Plain Post.md", HEXO_POST_PLAIN);

        let summary = Migrator::new(&blog.config).run().unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.successful, 2);
        assert!(summary.failed.is_empty());
        assert_eq!(summary.images_copied, 1);
        assert_eq!(summary.tags, BTreeSet::from(["solo".to_string()]));
        assert!(summary.categories.is_empty());
        assert_eq!(summary.earliest.map(|d| d.to_string()), Some("2022-11-05".to_string()));
        assert_eq!(summary.latest, summary.earliest);

        let outputs = PostList::markdown(blog.config.paths.content_dir.clone()).retrieve_files().unwrap();
        assert_eq!(outputs.len(), 2);
        let images: Vec<_> = fs::read_dir(&blog.config.paths.assets_dir).unwrap().collect();
        assert_eq!(images.len(), 1);
        assert!(blog.config.paths.assets_dir.join("foo-bar.png").exists());

        let foo = blog.output("foo");
        assert!(foo.contains("![bar](~/assets/images/blog/foo-bar.png)"));
        assert!(!foo.contains("./foo/bar.png"));

        let (meta, body) = split_front_matter(Path::new("foo.md"), &foo).unwrap();
        assert_eq!(meta.get("title").and_then(|v| v.as_str()), Some("Foo"));
        assert_eq!(meta.get("publishDate").and_then(|v| v.as_str()), Some("2022-11-05T00:00:00.000Z"));
        assert_eq!(meta.get("draft").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(meta.get("published").and_then(|v| v.as_bool()), Some(false));
        assert!(body.starts_with("Look at this:"));

        let plain = blog.output("plain-post");
        let (meta, body) = split_front_matter(Path::new("plain-post.md"), &plain).unwrap();
        assert_eq!(meta.get("title").and_then(|v| v.as_str()), Some("Plain Post"));
        assert!(meta.get("publishDate").is_none());
        assert_eq!(body, HEXO_POST_PLAIN);
    }

    #[test]
    fn test_malformed_post_does_not_abort() {
        let blog = Blog::new();
        blog.add_post("a.md", HEXO_POST_PLAIN);
        blog.add_post("b.md", MALFORMED_POST);
        blog.add_post("c.md", HEXO_POST_WITH_IMAGE);
        blog.add_post("d.md", HEXO_POST);

        let summary = Migrator::new(&blog.config).run().unwrap();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.successful, 3);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].file_name, "b.md");
        assert!(summary.failed[0].error.contains("Invalid front-matter"));
        assert!(!blog.config.paths.content_dir.join("b.md").exists());
    }

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let blog = Blog::new();
        let config = Config {
            paths: Paths {
                source_dir: blog.config.paths.source_dir.join("missing"),
                content_dir: blog.config.paths.content_dir.join("untouched"),
                ..blog.config.paths.clone()
            },
            ..Config::default()
        };

        let err = Migrator::new(&config).run().unwrap_err();
        assert!(err.to_string().starts_with("Source directory does not exist"));
        assert!(!config.paths.content_dir.exists());
    }

    #[test]
    fn test_catalog_rules_apply_after_post_images() {
        let blog = Blog::new();
        blog.add_post("Bits-and-Bytes-2022-12.md", HEXO_POST);
        blog.add_image("Bits-and-Bytes-2022-12", "comments.png");

        let migrator = Migrator::new(&blog.config);
        let post = migrator.migrate_post(&blog.config.paths.source_dir.join("Bits-and-Bytes-2022-12.md")).unwrap();
        assert_eq!(post.slug, "bits-and-bytes-2022-12");
        assert_eq!(post.images_copied, 1);
        assert!(post.image_failures.is_empty());
        assert!(blog.config.paths.assets_dir.join("bits-and-bytes-2022-12-comments.png").exists());

        let output = blog.output("bits-and-bytes-2022-12");
        // copied with the post
        assert!(output.contains("![comments](~/assets/images/blog/bits-and-bytes-2022-12-comments.png)"));
        // only known from the catalog
        assert!(output.contains("![launch](~/assets/images/blog/codelaunch.png)"));
        assert_eq!(post.substitutions.len(), 2);
        assert_eq!(post.meta.categories, vec!["Bits and Bytes"]);
    }

    #[test]
    fn test_unparseable_date_is_a_warning() {
        let blog = Blog::new();
        let path = blog.add_post("odd.md", "---\ntitle: Odd\ndate: not-a-date\n---\nBody\n");

        let post = Migrator::new(&blog.config).migrate_post(&path).unwrap();
        assert_eq!(post.warnings.len(), 1);
        assert!(post.meta.publish_date.is_none());
        assert!(!blog.output("odd").contains("publishDate"));
    }
}
