use std::{fs, io};
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::content::parsing_utils::split_front_matter;
use crate::content::SourcePost;

pub struct ContentFile {
    pub file_name: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: PathBuf) -> io::Result<ContentFile> {
        let file_name = match file_path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => return Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid post file name {}", file_path.display()))),
        };

        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            file_name,
            file_path,
            raw_content,
        })
    }

    pub fn parse(&self) -> io::Result<SourcePost> {
        let (front_matter, body) = split_front_matter(&self.file_path, &self.raw_content)?;
        Ok(SourcePost {
            file_name: self.file_name.clone(),
            front_matter,
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::test_data::HEXO_POST;

    use super::*;

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bits-and-Bytes-2022-12.md");
        fs::write(&path, HEXO_POST).unwrap();

        let post = ContentFile::from_file(path).unwrap().parse().unwrap();
        assert_eq!(post.file_name, "Bits-and-Bytes-2022-12.md");
        assert_eq!(post.front_matter.get("title").and_then(|v| v.as_str()), Some("Bits and Bytes - December 2022"));
        assert!(post.body.starts_with("A few things I found interesting"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let res = ContentFile::from_file(dir.path().join("nope.md"));
        assert_eq!(res.err().map(|e| e.kind()), Some(ErrorKind::NotFound));
    }
}
