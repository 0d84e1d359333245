//! Property tests for the dev-mode coordinator.

use std::path::PathBuf;

use proptest::prelude::*;

use stagehand::application::dev::{Command, Coordinator, DeployReason, Trigger};
use stagehand::{DeploymentOutcome, InstanceStatus};

#[derive(Debug, Clone)]
enum Step {
    Ready,
    Change(u8),
    Finish(InstanceStatus),
    Shutdown,
}

fn status() -> impl Strategy<Value = InstanceStatus> {
    prop_oneof![
        Just(InstanceStatus::Active),
        Just(InstanceStatus::Error),
        Just(InstanceStatus::Unknown("mystery".to_string())),
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => Just(Step::Ready),
        6 => any::<u8>().prop_map(Step::Change),
        4 => status().prop_map(Step::Finish),
        1 => Just(Step::Shutdown),
    ]
}

fn outcome(status: InstanceStatus) -> DeploymentOutcome {
    let mut outcome = DeploymentOutcome::failed("api", "scripted");
    if status != InstanceStatus::Error {
        outcome.error = None;
    }
    outcome.status = status;
    outcome
}

/// Drives a coordinator the way the session does: a finish is only
/// delivered while a deploy is actually in flight.
#[derive(Default)]
struct Driver {
    coordinator: Coordinator,
    in_flight: usize,
    max_in_flight: usize,
    closes: usize,
    /// Index of the last change the coordinator promised to deploy
    pending_change: Option<usize>,
    /// Index of the last change covered by a reloading deploy start
    covered_change: Option<usize>,
    changes: usize,
}

impl Driver {
    fn apply(&mut self, step: Step) {
        let trigger = match step {
            Step::Ready => Trigger::Ready,
            Step::Change(n) => {
                if self.coordinator.accepts_changes() {
                    self.pending_change = Some(self.changes);
                }
                self.changes += 1;
                Trigger::Changed(PathBuf::from(format!("src/{n}.js")))
            }
            Step::Finish(status) => {
                if self.in_flight == 0 {
                    return;
                }
                self.in_flight -= 1;
                Trigger::DeployFinished(outcome(status))
            }
            Step::Shutdown => Trigger::Shutdown,
        };

        for command in self.coordinator.handle(trigger) {
            match command {
                Command::Deploy(reason) => {
                    self.in_flight += 1;
                    self.max_in_flight = self.max_in_flight.max(self.in_flight);
                    if reason.reloads_config() {
                        self.covered_change = self.pending_change;
                    }
                }
                Command::Close(_) => self.closes += 1,
                _ => {}
            }
        }
    }

    /// Let every in-flight deploy settle successfully
    fn settle(&mut self) {
        for _ in 0..8 {
            self.apply(Step::Finish(InstanceStatus::Active));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: There is never more than one deploy in flight.
    #[test]
    fn property_single_flight(steps in proptest::collection::vec(step(), 0..64)) {
        let mut driver = Driver::default();
        for step in steps {
            driver.apply(step);
            prop_assert!(driver.in_flight <= 1);
        }
        driver.settle();
        prop_assert!(driver.max_in_flight <= 1);
    }

    /// PROPERTY: The last accepted change is always picked up by a deploy
    /// that starts after it, unless the session is shutting down.
    #[test]
    fn property_last_change_is_deployed(steps in proptest::collection::vec(step(), 0..64)) {
        let steps: Vec<_> = steps
            .into_iter()
            .filter(|s| !matches!(s, Step::Shutdown))
            .collect();

        let mut driver = Driver::default();
        for step in steps {
            driver.apply(step);
        }
        driver.settle();

        prop_assert_eq!(driver.in_flight, 0);
        prop_assert_eq!(driver.covered_change, driver.pending_change);
    }

    /// PROPERTY: A session closes at most once and nothing runs after close.
    #[test]
    fn property_closes_once(steps in proptest::collection::vec(step(), 0..64)) {
        let mut driver = Driver::default();
        for step in steps {
            driver.apply(step);
        }
        driver.apply(Step::Shutdown);
        driver.settle();
        driver.apply(Step::Shutdown);

        prop_assert!(driver.coordinator.is_closed());
        prop_assert_eq!(driver.closes, 1);

        let after = driver.coordinator.handle(Trigger::Changed(PathBuf::from("late.js")));
        prop_assert!(after.is_empty());
    }

    /// PROPERTY: The teardown deploy is the last deploy of a graceful close.
    #[test]
    fn property_teardown_is_last(steps in proptest::collection::vec(step(), 0..32)) {
        let mut coordinator = Coordinator::new();
        let mut in_flight = false;
        let mut last_reason = None;

        let mut feed = |coordinator: &mut Coordinator, trigger: Trigger, in_flight: &mut bool| {
            for command in coordinator.handle(trigger) {
                if let Command::Deploy(reason) = command {
                    *in_flight = true;
                    last_reason = Some(reason);
                }
            }
        };

        for step in steps {
            match step {
                Step::Ready => feed(&mut coordinator, Trigger::Ready, &mut in_flight),
                Step::Change(n) => feed(
                    &mut coordinator,
                    Trigger::Changed(PathBuf::from(n.to_string())),
                    &mut in_flight,
                ),
                Step::Finish(status) if in_flight => {
                    in_flight = false;
                    feed(&mut coordinator, Trigger::DeployFinished(outcome(status)), &mut in_flight);
                }
                Step::Finish(_) | Step::Shutdown => {}
            }
        }

        feed(&mut coordinator, Trigger::Shutdown, &mut in_flight);
        for _ in 0..4 {
            if in_flight {
                in_flight = false;
                feed(
                    &mut coordinator,
                    Trigger::DeployFinished(outcome(InstanceStatus::Active)),
                    &mut in_flight,
                );
            }
        }

        prop_assert!(coordinator.is_closed());
        prop_assert_eq!(last_reason, Some(DeployReason::Teardown));
    }
}
