//! Solution directory: historical solutions in, new solutions out.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::solver::{Group, Solution};

/// Reads one solution: one group per line, `#` lines skipped.
///
/// ```
/// use u_partition::io::read_solution;
///
/// let solution = read_solution("# week 3\nb a\nc d e\n".as_bytes()).unwrap();
/// assert_eq!(solution.len(), 2);
/// assert!(solution.shares_group("a", "b"));
/// ```
pub fn read_solution<R: BufRead>(reader: R) -> Result<Solution> {
    let mut groups = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }
        let group = Group::new(line.split_whitespace());
        if !group.is_empty() {
            groups.push(group);
        }
    }
    Ok(Solution::new(groups))
}

/// A directory of numbered solution files.
///
/// Files named by a non-negative integer (`0`, `1`, …) are the run history,
/// ordered numerically. A run that asked for a single solution takes the
/// next number. A run that asked for more, however many it found, uses
/// `<next>_0`, `<next>_1`, … which are kept out of the history.
#[derive(Debug, Clone)]
pub struct SolutionStore {
    dir: PathBuf,
}

impl SolutionStore {
    /// Opens `dir`, creating it if it does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Numbered solution files, oldest first.
    fn numbered(&self) -> Result<Vec<(u64, PathBuf)>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if let Ok(number) = name.parse::<u64>() {
                entries.push((number, entry.path()));
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// All historical solutions, oldest first.
    pub fn history(&self) -> Result<Vec<Solution>> {
        let mut history = Vec::new();
        for (_, path) in self.numbered()? {
            history.push(read_solution(BufReader::new(File::open(&path)?))?);
        }
        tracing::debug!(dir = %self.dir.display(), solutions = history.len(), "history loaded");
        Ok(history)
    }

    /// Number for the next solution file.
    pub fn next_name(&self) -> Result<u64> {
        Ok(self.numbered()?.last().map_or(0, |(n, _)| n + 1))
    }

    /// Writes the solutions of a run that requested `solution_limit`
    /// solutions and returns the created paths.
    ///
    /// Only a run limited to one solution extends the history.
    pub fn write(&self, solutions: &[Solution], solution_limit: usize) -> Result<Vec<PathBuf>> {
        let base = self.next_name()?;
        let as_history = solution_limit == 1 && solutions.len() == 1;
        let mut paths = Vec::with_capacity(solutions.len());
        for (i, solution) in solutions.iter().enumerate() {
            let name = if as_history {
                base.to_string()
            } else {
                format!("{base}_{i}")
            };
            let path = self.dir.join(name);
            fs::write(&path, solution.to_string())?;
            tracing::info!(path = %path.display(), groups = solution.len(), "solution written");
            paths.push(path);
        }
        Ok(paths)
    }
}
