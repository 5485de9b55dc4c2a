//! Corpus traversal
//!
//! Walks a directory tree of container files in a deterministic order
//! (entries sorted by name within each directory) so that schema
//! inference sees the same first-seen field order on every run.

use crate::document::{decode_batch, LogBatch};
use crate::error::CorpusError;
use std::fs;
use std::path::{Path, PathBuf};

/// List every regular file under `root`, depth-first, name-sorted
pub fn walk_corpus(root: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let mut files = Vec::new();
    walk_dir(root, &mut files)?;
    Ok(files)
}

fn walk_dir(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), CorpusError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk_dir(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// Load every decodable container file under `root` as a batch
///
/// Blank files are skipped silently. Files that fail to decode are
/// logged and skipped; the rest of the corpus is still processed.
pub fn load_batches(root: &Path) -> Result<Vec<LogBatch>, CorpusError> {
    let mut batches = Vec::new();
    for path in walk_corpus(root)? {
        let text = fs::read_to_string(&path)?;
        if text.trim().is_empty() {
            continue;
        }
        match decode_batch(&text) {
            Ok(batch) => batches.push(batch),
            Err(source) => {
                let err = CorpusError::Decode { path, source };
                tracing::error!(error = %err, "skipping undecodable container file");
            }
        }
    }
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_container(path: &Path, project: &str, message: &str) {
        let text = format!(
            r#"
kotlin.git-branch: "master"
kotlin.git-commit: "abc123"
kup-builds-with-no-diagnostics-found: []
failed-kup-builds: []
compilation-diagnostics-log:
  {project}:
    - location: "src/A.kt:1"
      name: IE_DIAGNOSTIC
      message: "{message}"
"#
        );
        fs::write(path, text).unwrap();
    }

    #[test]
    fn walk_is_name_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.yaml"), "x").unwrap();
        fs::write(dir.path().join("a.yaml"), "x").unwrap();
        fs::create_dir(dir.path().join("0-nested")).unwrap();
        fs::write(dir.path().join("0-nested/c.yaml"), "x").unwrap();

        let files = walk_corpus(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["0-nested/c.yaml", "a.yaml", "b.yaml"]);
    }

    #[test]
    fn load_skips_blank_and_undecodable_files() {
        let dir = tempfile::tempdir().unwrap();
        write_container(&dir.path().join("a.yaml"), "proj-a", "KLEKLE x:1 KLEKLE");
        fs::write(dir.path().join("blank.yaml"), "   \n").unwrap();
        fs::write(dir.path().join("broken.yaml"), "not: [valid").unwrap();
        write_container(&dir.path().join("z.yaml"), "proj-z", "KLEKLE x:2 KLEKLE");

        let batches = load_batches(dir.path()).unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].entries[0].project, "proj-a");
        assert_eq!(batches[1].entries[0].project, "proj-z");
    }
}
