use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spdlog::{error, info};

use crate::config::Assets;
use crate::rewrite::RewriteRule;

/// An image moved from a post directory to the asset directory
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub original_file_name: String,
    pub renamed_file_name: String,
    /// `./{post directory}/{original}` as written in the Hexo post
    pub legacy_reference_path: String,
    pub canonical_reference_path: String,
}

impl ImageRecord {
    /// Rules rewriting both the slug based and the directory based reference
    pub fn rules(&self, slug: &str) -> Vec<RewriteRule> {
        let slug_path = format!("./{}/{}", slug, self.original_file_name);
        let mut rules = vec![RewriteRule::new(slug_path, self.canonical_reference_path.clone())];
        if rules[0].from != self.legacy_reference_path {
            rules.push(RewriteRule::new(self.legacy_reference_path.clone(), self.canonical_reference_path.clone()));
        }
        rules
    }
}

#[derive(Debug, Default)]
pub struct ImageCopyReport {
    pub copied: Vec<ImageRecord>,
    /// One message per image that could not be copied
    pub failures: Vec<String>,
}

impl ImageCopyReport {
    pub fn rules(&self, slug: &str) -> Vec<RewriteRule> {
        self.copied.iter().flat_map(|img| img.rules(slug)).collect()
    }
}

/// Hexo keeps the images of `foo.md` in a sibling `foo/` directory
fn post_asset_dir(post_path: &Path) -> Option<(PathBuf, String)> {
    let dir_name = post_path.file_stem()?.to_str()?.to_string();
    let dir = post_path.with_file_name(&dir_name);
    Some((dir, dir_name))
}

fn list_images(dir: &Path, assets: &Assets) -> Result<Vec<String>> {
    let mut images = vec![];
    let entries = fs::read_dir(dir).with_context(|| format!("Error listing images in {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Error listing images in {}", dir.display()))?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(file_name) = entry.file_name().to_str() {
            if assets.is_image(file_name) {
                images.push(file_name.to_string());
            }
        }
    }
    images.sort();
    Ok(images)
}

/// Copies every image of the post directory to `assets_dir` as `{slug}-{file name}`.
///
/// Posts without a directory have no images. A failed copy is logged and
/// reported, the other images are still copied.
pub fn migrate_post_images(post_path: &Path, slug: &str, assets_dir: &Path, assets: &Assets) -> Result<ImageCopyReport> {
    let mut report = ImageCopyReport::default();

    let Some((image_dir, dir_name)) = post_asset_dir(post_path) else {
        return Ok(report);
    };
    if !image_dir.is_dir() {
        return Ok(report);
    }

    for image in list_images(&image_dir, assets)? {
        let renamed = format!("{}-{}", slug, image);
        let source = image_dir.join(&image);
        let target = assets_dir.join(&renamed);

        match fs::copy(&source, &target) {
            Ok(_) => {
                info!("  ✓ Copied image: {} -> {}", image, renamed);
                report.copied.push(ImageRecord {
                    legacy_reference_path: format!("./{}/{}", dir_name, image),
                    canonical_reference_path: assets.reference_for(&renamed),
                    original_file_name: image,
                    renamed_file_name: renamed,
                });
            }
            Err(e) => {
                error!("  ✗ Failed to copy image {}: {}", image, e);
                report.failures.push(format!("{}: {}", source.display(), e));
            }
        }
    }

    Ok(report)
}
