//! File adapter: problems, session states, solutions and the pose-id ledger,
//! each keyed by problem number under the configured directories.

use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::problem::{Problem, Solution};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PoseLedger {
    ids: Vec<String>,
}

pub struct Workspace {
    config: EditorConfig,
}

impl Workspace {
    pub fn new(config: EditorConfig) -> Self {
        Workspace { config }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn problem_path(&self, problem: u32) -> PathBuf {
        self.config.problems_dir.join(format!("{}.problem", problem))
    }
    pub fn state_path(&self, problem: u32) -> PathBuf {
        self.config.states_dir.join(format!("{}.state", problem))
    }
    pub fn solution_path(&self, problem: u32) -> PathBuf {
        self.config.solutions_dir.join(format!("{}.solution", problem))
    }
    pub fn ledger_path(&self, problem: u32) -> PathBuf {
        self.config.poses_dir.join(format!("{}.id", problem))
    }

    pub fn load_problem(&self, problem: u32) -> Result<Problem> {
        let text = read_text(&self.problem_path(problem))?;
        Problem::from_json_str(&text)
    }

    /// `Ok(None)` when no state was saved for this problem.
    pub fn load_state(&self, problem: u32) -> Result<Option<Session>> {
        let path = self.state_path(problem);
        let text = match read_text(&path) {
            Ok(t) => t,
            Err(Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| Error::parse("state", e))?;
        let session = Session::from_state_json(value, self.config.transform()?)?;
        tracing::debug!(path = %path.display(), vertices = session.graph().vertex_count(), "state loaded");
        Ok(Some(session))
    }

    /// Saved state if present, otherwise the problem under the configured transform.
    pub fn open_session(&self, problem: u32) -> Result<Session> {
        if let Some(session) = self.load_state(problem)? {
            return Ok(session);
        }
        let p = self.load_problem(problem)?;
        Session::from_problem(&p, self.config.transform()?)
    }

    pub fn save_state(&self, problem: u32, session: &Session) -> Result<PathBuf> {
        let path = self.state_path(problem);
        let bytes = to_pretty_bytes("state", &session.to_state_json()?)?;
        write_atomic(&path, &bytes)?;
        tracing::info!(path = %path.display(), "state saved");
        Ok(path)
    }

    /// Returns whether a state file was removed.
    pub fn remove_state(&self, problem: u32) -> Result<bool> {
        let path = self.state_path(problem);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(Error::Io {
                operation: "remove",
                path,
                source,
            }),
        }
    }

    pub fn write_solution(&self, problem: u32, solution: &Solution) -> Result<PathBuf> {
        let path = self.solution_path(problem);
        write_atomic(&path, solution.to_json_string()?.as_bytes())?;
        tracing::info!(path = %path.display(), vertices = solution.vertices.len(), "solution written");
        Ok(path)
    }

    pub fn read_solution(&self, problem: u32) -> Result<Solution> {
        Solution::from_json_str(&read_text(&self.solution_path(problem))?)
    }

    pub fn record_pose_id(&self, problem: u32, id: &str) -> Result<()> {
        let path = self.ledger_path(problem);
        let mut ledger = self.read_ledger(&path)?;
        ledger.ids.push(id.to_string());
        write_atomic(&path, &to_pretty_bytes("pose ledger", &ledger)?)
    }

    /// Most recently recorded pose id, if any.
    pub fn last_pose_id(&self, problem: u32) -> Result<Option<String>> {
        let ledger = self.read_ledger(&self.ledger_path(problem))?;
        Ok(ledger.ids.last().cloned())
    }

    fn read_ledger(&self, path: &Path) -> Result<PoseLedger> {
        match read_text(path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| Error::parse("pose ledger", e)),
            Err(Error::NotFound { .. }) => Ok(PoseLedger::default()),
            Err(e) => Err(e),
        }
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            Error::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                operation: "read",
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn to_pretty_bytes<T: Serialize>(what: &'static str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|e| Error::parse(what, e))
}

/// Temp file + rename, creating parent directories as needed.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp_path = PathBuf::from(temp);
    let io_err = |operation: &'static str| {
        let p = temp_path.clone();
        move |source: std::io::Error| Error::Io {
            operation,
            path: p,
            source,
        }
    };
    let mut file = File::create(&temp_path).map_err(io_err("create"))?;
    file.write_all(bytes).map_err(io_err("write"))?;
    file.sync_all().map_err(io_err("sync"))?;
    fs::rename(&temp_path, path).map_err(|source| Error::Io {
        operation: "rename",
        path: path.to_path_buf(),
        source,
    })
}
