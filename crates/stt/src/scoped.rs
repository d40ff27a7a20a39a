use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

const FILE_PREFIX: &str = "clarity-audio-";

/// Uploaded audio written to a temporary file for the duration of one request
///
/// The file is unlinked by `close`, or on drop if the request is abandoned
/// before that point.
pub(crate) struct ScopedAudioFile {
    file: NamedTempFile,
}

impl ScopedAudioFile {
    /// Write `bytes` to a fresh file in `dir`, or the OS temp dir
    pub async fn write(dir: Option<&Path>, suffix: &str, bytes: Vec<u8>) -> io::Result<Self> {
        let dir: Option<PathBuf> = dir.map(Path::to_path_buf);
        let suffix = suffix.to_string();

        let file = tokio::task::spawn_blocking(move || -> io::Result<NamedTempFile> {
            let mut builder = tempfile::Builder::new();
            builder.prefix(FILE_PREFIX).suffix(&suffix);

            let mut file = match dir {
                Some(dir) => builder.tempfile_in(dir)?,
                None => builder.tempfile()?,
            };

            file.write_all(&bytes)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .map_err(io::Error::other)??;

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Remove the file, reporting failures that drop would swallow
    pub fn close(self) -> io::Result<()> {
        self.file.close()
    }
}
