//! Optional post-processing of fetched issues.
//!
//! A [`Postprocessor`] runs on every issue an [`IssueSource`](super::IssueSource)
//! produces. The [`Anonymizer`] replaces real data with values drawn from
//! fixed pools so the dashboard can be shown without leaking tickets.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::model::{Issue, Status};

/// A stage applied to each transformed issue.
pub trait Postprocessor: Send + Sync {
    fn apply(&self, issue: Issue) -> Issue;
}

const PROJECT_CODES: &[&str] = &["ABC", "DEF", "GHI", "JKL"];

const SUBJECTS: &[&str] = &[
    "Can't login!",
    "Issue with customer",
    "HTTP 500 error on checkout",
    "URGENT: DEADLOCK ERRORS",
];

const STATUSES: &[Status] = &[
    Status::New,
    Status::InProgress,
    Status::OnHold,
    Status::Solved,
];

const ASSIGNEES: &[&str] = &[
    "John Doe",
    "Jane Doe",
    "Walter White",
    "Jesse Pinkman",
    "Leslie Pollos",
];

/// Range of the synthetic ids.
const ID_RANGE: std::ops::Range<u32> = 100_000..300_000;

/// Replaces every field of an issue with synthetic data.
#[derive(Debug, Default, Clone, Copy)]
pub struct Anonymizer;

impl Anonymizer {
    pub fn new() -> Self {
        Self
    }
}

impl Postprocessor for Anonymizer {
    fn apply(&self, _issue: Issue) -> Issue {
        let mut rng = rand::rng();
        Issue::new(
            rng.random_range(ID_RANGE),
            pick(&mut rng, PROJECT_CODES).unwrap_or_default(),
            pick(&mut rng, SUBJECTS).unwrap_or_default(),
            STATUSES.choose(&mut rng).copied().unwrap_or_default(),
            pick(&mut rng, ASSIGNEES).unwrap_or_default(),
        )
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> Option<&'static str> {
    pool.choose(rng).copied()
}
