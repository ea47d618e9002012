use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::domain::email::Thread;

/// Threads reach the TUI as an already-materialized JSON file; whoever
/// exported it owns storage, folders, and ordering.
pub fn load_threads(path: &Path) -> Result<Vec<Thread>> {
    let s = fs::read_to_string(path)?;
    let threads: Vec<Thread> = serde_json::from_str(&s)?;
    Ok(threads)
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn load_threads_reads_a_thread_list_file() {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("threads-test-{stamp}.json"));
        fs::write(
            &path,
            r#"[
                {"id":1,"subject":"Hi","lastActivity":"2024-01-02T09:30:00Z","emails":[
                    {"from":"a@x.com","subject":"Hi","body":"Let's meet","sentAt":"2024-01-01T00:00:00Z"}
                ]},
                {"id":2,"subject":"Empty","lastActivity":"2024-01-03T10:00:00Z","emails":[]}
            ]"#,
        )
        .expect("write test file");

        let threads = load_threads(&path);
        let _ = fs::remove_file(&path);

        let threads = threads.expect("threads should parse");
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].id, 1);
        assert!(threads[1].emails.is_empty());
    }
}
