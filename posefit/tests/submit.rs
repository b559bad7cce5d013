use posefit::config::EditorConfig;
use posefit::problem::Solution;
use posefit::store::Workspace;
use posefit::submit::{check_solution, submit_solution, JudgeService, SubmitReply, Verdict, VerdictState};
use posefit::{Error, Result};
use std::cell::RefCell;

struct FakeJudge {
    reply: SubmitReply,
    posted: RefCell<Vec<(u32, Solution)>>,
    queried: RefCell<Vec<String>>,
}

impl FakeJudge {
    fn new(reply: SubmitReply) -> Self {
        FakeJudge {
            reply,
            posted: RefCell::new(Vec::new()),
            queried: RefCell::new(Vec::new()),
        }
    }
}

impl JudgeService for FakeJudge {
    fn post_solution(&self, problem: u32, solution: &Solution) -> Result<SubmitReply> {
        self.posted.borrow_mut().push((problem, solution.clone()));
        Ok(self.reply.clone())
    }
    fn solution_status(&self, _problem: u32, solution_id: &str) -> Result<Verdict> {
        self.queried.borrow_mut().push(solution_id.to_string());
        Ok(Verdict {
            state: VerdictState::Valid,
            dislikes: Some(3),
            error: None,
        })
    }
}

fn workspace_with_solution() -> (tempfile::TempDir, Workspace) {
    let dir = tempfile::tempdir().unwrap();
    let ws = Workspace::new(EditorConfig::rooted(dir.path()));
    ws.write_solution(4, &Solution { vertices: vec![[1, 2], [3, 4]] }).unwrap();
    (dir, ws)
}

#[test]
fn accepted_submission_is_recorded_and_checked() {
    let (_dir, ws) = workspace_with_solution();
    let judge = FakeJudge::new(SubmitReply::Accepted { id: "pose-1".into() });
    assert_eq!(submit_solution(&ws, &judge, 4).unwrap(), "pose-1");
    assert_eq!(judge.posted.borrow()[0].1.vertices, vec![[1, 2], [3, 4]]);
    assert_eq!(ws.last_pose_id(4).unwrap().as_deref(), Some("pose-1"));
    let verdict = check_solution(&ws, &judge, 4).unwrap();
    assert_eq!(verdict.state, VerdictState::Valid);
    assert_eq!(judge.queried.borrow().as_slice(), ["pose-1".to_string()]);
}

#[test]
fn rejected_submission_records_nothing() {
    let (_dir, ws) = workspace_with_solution();
    let judge = FakeJudge::new(SubmitReply::Rejected { error: "pose overlaps".into() });
    assert!(matches!(submit_solution(&ws, &judge, 4), Err(Error::Remote { .. })));
    assert_eq!(ws.last_pose_id(4).unwrap(), None);
    assert!(matches!(check_solution(&ws, &judge, 4), Err(Error::NotFound { .. })));
}

#[test]
fn missing_solution_is_not_posted() {
    let (_dir, ws) = workspace_with_solution();
    let judge = FakeJudge::new(SubmitReply::Accepted { id: "x".into() });
    assert!(matches!(submit_solution(&ws, &judge, 5), Err(Error::NotFound { .. })));
    assert!(judge.posted.borrow().is_empty());
}
