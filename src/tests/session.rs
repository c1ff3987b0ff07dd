use super::manual_clock;
use crate::{
    auction::{BidPolicy, InvalidArgument},
    config::Config,
    event::{LoggedBid, Offset},
    ledger::{BidReader, BidRecorder, LedgerError},
    progress::FollowerId,
    session::{BidFollower, BidSession, SessionError},
};
use anyhow::{bail, Result};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Remembers the offsets it was handed
struct Recording {
    id: &'static str,
    seen: Arc<Mutex<Vec<Offset>>>,
    fail_at: Option<Offset>,
}

impl Recording {
    fn new(id: &'static str) -> (Self, Arc<Mutex<Vec<Offset>>>) {
        let seen = Arc::new(Mutex::new(vec![]));
        (
            Self {
                id,
                seen: seen.clone(),
                fail_at: None,
            },
            seen,
        )
    }

    fn failing_once_at(mut self, offset: Offset) -> Self {
        self.fail_at = Some(offset);
        self
    }
}

impl BidFollower for Recording {
    fn get_follower_id(&self) -> FollowerId {
        self.id.to_owned()
    }

    fn handle_bid(&mut self, bid: &LoggedBid) -> Result<()> {
        if self.fail_at == Some(bid.offset) {
            self.fail_at = None;
            bail!("view not ready");
        }
        self.seen.lock().push(bid.offset);
        Ok(())
    }
}

fn new_session(policy: BidPolicy) -> BidSession {
    let (_, clock) = manual_clock();
    BidSession::with_clock(
        Config {
            bid_policy: policy,
            ..Config::default()
        },
        clock,
    )
}

#[test]
fn place_and_query_bids() -> Result<()> {
    let session = new_session(BidPolicy::Strict);

    session.place_bid("p1", 50.0)?;
    session.place_bid("p1", 30.0)?;
    session.place_bid("p2", 1000.0)?;

    assert_eq!(session.highest_bid("p1"), 50.0);
    assert_eq!(session.highest_bid("p2"), 1000.0);
    assert_eq!(session.highest_bid("p3"), 0.0);
    assert_eq!(session.reader().len(), 3);

    Ok(())
}

#[test]
fn strict_session_rejects_negative_bid() {
    let session = new_session(BidPolicy::Strict);

    assert!(matches!(
        session.place_bid("p1", -5.0),
        Err(SessionError::Ledger(LedgerError::InvalidArgument(
            InvalidArgument::NegativeAmount(_)
        )))
    ));
    assert_eq!(session.highest_bid("p1"), 0.0);
}

#[test]
fn lenient_session_accepts_negative_bid() -> Result<()> {
    let session = new_session(BidPolicy::Lenient);

    session.place_bid("p1", -5.0)?;
    assert_eq!(session.highest_bid("p1"), -5.0);

    Ok(())
}

#[test]
fn recorder_handle_writes_into_the_session() -> Result<()> {
    let session = new_session(BidPolicy::Strict);

    session.recorder().record_bid("p1", 12.5)?;

    assert_eq!(session.highest_bid("p1"), 12.5);

    Ok(())
}

#[test]
fn followers_see_every_bid_once() -> Result<()> {
    let mut session = new_session(BidPolicy::Strict);
    session.place_bid("p1", 1.0)?;

    let (follower, seen) = Recording::new("product-view");
    session.register_follower(follower)?;

    session.place_bid("p2", 2.0)?;
    assert_eq!(session.dispatch()?, 2);
    assert_eq!(session.dispatch()?, 0);

    session.place_bid("p1", 3.0)?;
    assert_eq!(session.dispatch()?, 1);

    assert_eq!(*seen.lock(), vec![0, 1, 2]);

    Ok(())
}

#[test]
fn duplicate_follower_is_refused() -> Result<()> {
    let mut session = new_session(BidPolicy::Strict);

    session.register_follower(Recording::new("nav").0)?;

    assert!(matches!(
        session.register_follower(Recording::new("nav").0),
        Err(SessionError::DuplicateFollower(id)) if id == "nav"
    ));

    Ok(())
}

#[test]
fn failing_follower_retries_from_the_failed_bid() -> Result<()> {
    let mut session = new_session(BidPolicy::Strict);
    for amount in [1.0, 2.0, 3.0] {
        session.place_bid("p1", amount)?;
    }

    let (flaky, flaky_seen) = Recording::new("flaky");
    let (steady, steady_seen) = Recording::new("steady");
    session.register_follower(flaky.failing_once_at(1))?;
    session.register_follower(steady)?;

    match session.dispatch() {
        Err(SessionError::Follower { id, .. }) => assert_eq!(id, "flaky"),
        other => panic!("expected follower failure, got {other:?}"),
    }
    assert_eq!(*flaky_seen.lock(), vec![0]);
    assert_eq!(*steady_seen.lock(), vec![0, 1, 2]);

    assert_eq!(session.dispatch()?, 2);
    assert_eq!(*flaky_seen.lock(), vec![0, 1, 2]);

    Ok(())
}

#[test]
fn reregistered_follower_resumes() -> Result<()> {
    let mut session = new_session(BidPolicy::Strict);
    session.place_bid("p1", 1.0)?;

    let (follower, seen) = Recording::new("dashboard");
    session.register_follower(follower)?;
    session.dispatch()?;

    assert!(session.unregister_follower("dashboard"));
    assert!(!session.unregister_follower("dashboard"));
    session.place_bid("p1", 2.0)?;

    let (follower, seen_again) = Recording::new("dashboard");
    session.register_follower(follower)?;
    session.dispatch()?;

    assert_eq!(*seen.lock(), vec![0]);
    assert_eq!(*seen_again.lock(), vec![1]);

    Ok(())
}

#[test]
fn rewound_follower_replays_the_ledger() -> Result<()> {
    let mut session = new_session(BidPolicy::Strict);
    session.place_bid("p1", 1.0)?;
    session.place_bid("p2", 2.0)?;

    let (follower, seen) = Recording::new("history");
    session.register_follower(follower)?;
    session.dispatch()?;

    session.rewind_follower("history")?;
    assert_eq!(session.dispatch()?, 2);

    assert_eq!(*seen.lock(), vec![0, 1, 0, 1]);

    Ok(())
}
