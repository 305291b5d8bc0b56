use anyhow::{Context, Result};
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

/// One filesystem object met during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(PathBuf),
    Dir(PathBuf),
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File(p) | Entry::Dir(p) => p,
        }
    }
}

/// Depth-first traversal below a root.
///
/// Every entry is yielded, directories included; `descend` then decides per
/// directory whether the walk enters it. Failures to read an entry surface
/// as `Err` items instead of silently ending the walk.
pub struct Walk<F> {
    stack: Vec<ReadDir>,
    descend: F,
}

/// Start a walk at `root`. Fails immediately if the root itself cannot be
/// read.
pub fn walk<P, F>(root: P, descend: F) -> Result<Walk<F>>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> bool,
{
    let root = root.as_ref();
    let first =
        fs::read_dir(root).with_context(|| format!("failed to read directory {:?}", root))?;
    Ok(Walk {
        stack: vec![first],
        descend,
    })
}

/// All files below `root`, descending into every directory.
pub fn walk_files<P: AsRef<Path>>(root: P) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    let inner = walk(root, |_| true)?;
    Ok(inner.filter_map(|entry| match entry {
        Ok(Entry::File(path)) => Some(Ok(path)),
        Ok(Entry::Dir(_)) => None,
        Err(err) => Some(Err(err)),
    }))
}

impl<F: FnMut(&Path) -> bool> Iterator for Walk<F> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dir = self.stack.last_mut()?;
            match dir.next() {
                Some(Ok(entry)) => {
                    let path = entry.path();
                    let file_type = match entry.file_type() {
                        Ok(t) => t,
                        Err(err) => {
                            return Some(
                                Err(err).with_context(|| format!("failed to stat {:?}", path)),
                            )
                        }
                    };
                    if file_type.is_dir() {
                        if (self.descend)(&path) {
                            match fs::read_dir(&path) {
                                Ok(rd) => self.stack.push(rd),
                                Err(err) => {
                                    return Some(Err(err).with_context(|| {
                                        format!("failed to read directory {:?}", path)
                                    }))
                                }
                            }
                        }
                        return Some(Ok(Entry::Dir(path)));
                    }
                    return Some(Ok(Entry::File(path)));
                }
                Some(Err(err)) => {
                    return Some(Err(err).context("failed to read directory entry"))
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
