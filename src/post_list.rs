use std::{fs, io};
use std::path::PathBuf;

pub struct PostList {
    pub root_dir: PathBuf,
    pub extension: String,
}

impl PostList {
    pub fn markdown(root_dir: PathBuf) -> Self {
        PostList {
            root_dir,
            extension: ".md".to_string(),
        }
    }

    /// Regular files of the root directory with the post extension, sorted by name
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            if let Some(file_name) = file_name.to_str() {
                if file_name.ends_with(self.extension.as_str()) {
                    posts.push(entry.path());
                }
            }
        }
        posts.sort();
        Ok(posts)
    }
}
