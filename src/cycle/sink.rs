use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::Result;

/// Append-only destination for cycle reports.
pub trait LogSink: Send + Sync {
    /// Append one complete block. Blocks must never interleave.
    fn append(&self, block: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Appends reports to a UTF-8 text file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    /// Create the sink, making sure the file can be opened for appending.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    async fn append(&self, block: &str) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(block.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::MonitorError;

    #[tokio::test]
    async fn test_appends_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("health_check_log.txt");
        std::fs::write(&path, "previous run\n").expect("seed log");

        let sink = FileSink::open(&path).await.expect("open");
        sink.append("\ncycle 1 ✅\n").await.expect("append");
        sink.append("\ncycle 2 ❌\n").await.expect("append");

        let contents = std::fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "previous run\n\ncycle 1 ✅\n\ncycle 2 ❌\n");
    }

    #[tokio::test]
    async fn test_concurrent_blocks_do_not_interleave() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.txt");
        let sink = Arc::new(FileSink::open(&path).await.expect("open"));

        let mut handles = Vec::new();
        for writer in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(tokio::spawn(async move {
                let block: String = (0..200).map(|line| format!("w{writer} l{line}\n")).collect();
                sink.append(&block).await
            }));
        }
        for handle in handles {
            handle.await.expect("join").expect("append");
        }

        let contents = std::fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 8 * 200);
        for chunk in lines.chunks(200) {
            let writer = chunk[0].split(' ').next().expect("writer tag");
            assert!(chunk.iter().all(|line| line.starts_with(&format!("{writer} "))));
        }
    }

    #[tokio::test]
    async fn test_open_fails_for_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = FileSink::open(dir.path().join("missing").join("log.txt")).await;
        assert!(matches!(result, Err(MonitorError::Io(_))));
    }
}
