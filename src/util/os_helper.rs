use std::path::PathBuf;
use std::{env, io};

const EXE_DIR_VAR: &str = "${exe_dir}";

pub fn exe_dir() -> io::Result<PathBuf> {
    let exe_path = env::current_exe()?;
    match exe_path.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Err(io::Error::new(io::ErrorKind::NotFound, "Executable has no parent directory")),
    }
}

/// Replaces a leading ${exe_dir} with the directory of the running executable
pub fn expand_exe_dir(path: PathBuf) -> io::Result<PathBuf> {
    let Ok(rest) = path.strip_prefix(EXE_DIR_VAR) else {
        return Ok(path);
    };
    Ok(exe_dir()?.join(rest))
}
