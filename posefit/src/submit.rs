//! Contract with the remote judging service. Transport lives outside this
//! crate; implementors of [`JudgeService`] carry it.

use crate::error::{Error, Result};
use crate::problem::Solution;
use crate::store::Workspace;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmitReply {
    Accepted { id: String },
    Rejected { error: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictState {
    Pending,
    Valid,
    Invalid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub state: VerdictState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislikes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub trait JudgeService {
    fn post_solution(&self, problem: u32, solution: &Solution) -> Result<SubmitReply>;
    fn solution_status(&self, problem: u32, solution_id: &str) -> Result<Verdict>;
}

/// Posts the written solution for `problem` and records the returned id.
pub fn submit_solution<S: JudgeService + ?Sized>(ws: &Workspace, service: &S, problem: u32) -> Result<String> {
    let solution = ws.read_solution(problem)?;
    match service.post_solution(problem, &solution)? {
        SubmitReply::Accepted { id } => {
            ws.record_pose_id(problem, &id)?;
            tracing::info!(problem, id = %id, "solution submitted");
            Ok(id)
        }
        SubmitReply::Rejected { error } => Err(Error::Remote { message: error }),
    }
}

/// Verdict for the most recently submitted solution of `problem`.
pub fn check_solution<S: JudgeService + ?Sized>(ws: &Workspace, service: &S, problem: u32) -> Result<Verdict> {
    let id = ws.last_pose_id(problem)?.ok_or_else(|| Error::NotFound {
        path: ws.ledger_path(problem),
    })?;
    service.solution_status(problem, &id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_shapes() {
        let ok: SubmitReply = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(ok, SubmitReply::Accepted { id: "abc".into() });
        let err: SubmitReply = serde_json::from_str(r#"{"error":"bad pose"}"#).unwrap();
        assert_eq!(err, SubmitReply::Rejected { error: "bad pose".into() });
    }

    #[test]
    fn verdict_states() {
        let v: Verdict = serde_json::from_str(r#"{"state":"VALID","dislikes":12}"#).unwrap();
        assert_eq!(v.state, VerdictState::Valid);
        assert_eq!(v.dislikes, Some(12));
        let p: Verdict = serde_json::from_str(r#"{"state":"PENDING"}"#).unwrap();
        assert_eq!(p.state, VerdictState::Pending);
    }
}
