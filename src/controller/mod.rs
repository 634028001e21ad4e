//! # Display Controller
//!
//! Turns bus messages and liveness events into screens on the sign.
//!
//! ## State
//!
//! | Field | Changed by |
//! |-------|------------|
//! | `mode` | never (startup) |
//! | `member_count` | presence count updates |
//! | `laser_active` | laser operation status |
//!
//! ## Home Screen
//!
//! After every interruption (alarm, doorbell, ...) the sign falls back to the
//! home screen: the running laser timer in lasercutter mode while a job is
//! active, the idle screen otherwise. Interruptions are sent together with
//! the home screen as one multi-page screen, so the sign returns on its own.
//!
//! ## Concurrency
//!
//! The controller is a plain struct driven through `&mut self`. Whoever owns
//! it serializes all handlers; see [`crate::app`].

pub mod clock;
mod topic;

pub use topic::{Mode, Topic};

use chrono::NaiveDateTime;
use tracing::{debug, error, info, warn};

use crate::screen::{self, LaserFinishedPattern, ScreenCommand};
use crate::session::DeviceSession;

/// Mutable application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    mode: Mode,
    pub member_count: i64,
    pub laser_active: bool,
}

impl AppState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            member_count: 0,
            laser_active: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// Event-driven owner of the sign session and the application state.
pub struct Controller<S> {
    session: S,
    state: AppState,
    laser_finished_pattern: Option<LaserFinishedPattern>,
    now: fn() -> NaiveDateTime,
}

impl<S: DeviceSession> Controller<S> {
    pub fn new(
        mode: Mode,
        session: S,
        laser_finished_pattern: Option<LaserFinishedPattern>,
    ) -> Self {
        Self {
            session,
            state: AppState::new(mode),
            laser_finished_pattern,
            now: clock::wall_clock,
        }
    }

    /// Replace the wall clock, e.g. with a fixed time in tests.
    pub fn with_clock(mut self, now: fn() -> NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Push the host's wall-clock time to the sign.
    pub fn sync_clock(&mut self) {
        let now = (self.now)();
        self.session.set_date(&now);
    }

    /// The sign came back: restore its clock and home screen.
    pub fn on_alive(&mut self) {
        info!("sign is alive, restoring date and home screen");
        self.sync_clock();
        let home = self.home_screen();
        self.session.send_screen(&home);
    }

    /// Dispatch one bus message.
    pub fn handle(&mut self, topic: &str, payload: &str) {
        let Some(topic) = Topic::parse(topic) else {
            debug!(topic, "ignoring message on unknown topic");
            return;
        };

        info!(topic = topic.as_str(), payload, "received message");

        if topic.is_laser() && self.state.mode != Mode::Lasercutter {
            debug!(topic = topic.as_str(), "laser topic ignored outside lasercutter mode");
            return;
        }

        match topic {
            Topic::MemberCount => self.on_member_count(payload),
            Topic::PizzaReady => self.interrupt(screen::pizza_timer()),
            Topic::Donation => self.interrupt(screen::donation()),
            Topic::Alarm => self.interrupt(screen::alarm(payload)),
            Topic::NewMember => self.interrupt(screen::new_member_registration(payload)),
            Topic::DoorBell => {
                if payload == "pressed" {
                    self.interrupt(screen::door_bell());
                }
            }
            Topic::Message => {
                if !payload.is_empty() {
                    self.interrupt(screen::public_service_announcement(payload));
                }
            }
            Topic::NowPlaying => {
                if !payload.is_empty() {
                    self.interrupt(screen::now_playing(payload));
                }
            }
            Topic::LaserOperation => self.on_laser_operation(payload),
            Topic::LaserDuration => self.on_laser_duration(payload),
            Topic::LaserFinished => self.on_laser_finished(payload),
        }
    }

    fn home_screen(&self) -> ScreenCommand {
        if self.state.mode == Mode::Lasercutter && self.state.laser_active {
            screen::laser_operation()
        } else {
            screen::idle(self.state.member_count)
        }
    }

    /// Show `screen` once, then fall back to the home screen.
    fn interrupt(&mut self, screen: ScreenCommand) {
        let home = self.home_screen();
        self.session.send_screens(&[screen, home]);
    }

    fn on_member_count(&mut self, payload: &str) {
        let Some(count) = parse_number(Topic::MemberCount, payload) else {
            return;
        };
        self.state.member_count = count;

        if !self.state.laser_active {
            let home = self.home_screen();
            self.session.send_screen(&home);
        }
    }

    fn on_laser_operation(&mut self, payload: &str) {
        let active = payload == "active";
        let was_active = self.state.laser_active;
        self.state.laser_active = active;

        if active && !was_active {
            info!("laser job started, using sign clock as timer");
            match clock::sentinel(0, clock::SENTINEL_START_SECS) {
                Some(start) => self.session.set_date(&start),
                None => error!("cannot compute timer start"),
            }
            self.session.send_screen(&screen::laser_operation());
        }
    }

    fn on_laser_duration(&mut self, payload: &str) {
        let Some(duration) = parse_number(Topic::LaserDuration, payload) else {
            return;
        };

        if let Some(correction) = clock::drift_correction(duration) {
            debug!(duration, "correcting sign clock drift");
            self.session.set_date(&correction);
        }
    }

    fn on_laser_finished(&mut self, payload: &str) {
        if payload.is_empty() {
            return;
        }
        let Some(duration) = parse_number(Topic::LaserFinished, payload) else {
            return;
        };
        let Some(pattern) = self.laser_finished_pattern else {
            error!("no laserFinishedPattern configured, skipping laser finished screen");
            return;
        };

        self.interrupt(screen::laser_finished(duration, pattern));
        self.sync_clock();
    }
}

fn parse_number(topic: Topic, payload: &str) -> Option<i64> {
    match payload.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(topic = topic.as_str(), payload, error = %e, "dropping malformed number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::frame;
    use crate::session::testing::RecordingSession;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(18, 42, 11)
            .unwrap()
    }

    fn controller(mode: Mode) -> Controller<RecordingSession> {
        Controller::new(
            mode,
            RecordingSession::default(),
            Some(LaserFinishedPattern::PeelOffRight),
        )
        .with_clock(fixed_now)
    }

    fn joined(screens: &[ScreenCommand]) -> Vec<u8> {
        frame::store_screen(&frame::join_pages(screens.iter().map(ScreenCommand::as_bytes)))
    }

    fn single(screen: &ScreenCommand) -> Vec<u8> {
        frame::store_screen(screen.as_bytes())
    }

    fn date(at: &NaiveDateTime) -> Vec<u8> {
        frame::set_date(at).unwrap()
    }

    #[test]
    fn test_member_count_updates_idle() {
        let mut c = controller(Mode::Default);
        c.handle("sensor/space/member/present", "5");

        assert_eq!(c.state().member_count, 5);
        assert_eq!(c.session().sent, vec![single(&screen::idle(5))]);
    }

    #[test]
    fn test_malformed_count_is_dropped() {
        let mut c = controller(Mode::Default);
        c.handle("sensor/space/member/present", "4");
        c.handle("sensor/space/member/present", "many");

        assert_eq!(c.state().member_count, 4);
        assert_eq!(c.session().sent.len(), 1);
    }

    #[test]
    fn test_interruptions_fall_back_to_idle() {
        let mut c = controller(Mode::Default);
        c.handle("sensor/space/member/present", "2");
        c.handle("psa/pizza", "");
        c.handle("psa/donation", "1");
        c.handle("psa/alarm", "Feuer!");
        c.handle("psa/newMember", "neo");

        let idle = screen::idle(2);
        assert_eq!(
            c.session().sent[1..].to_vec(),
            vec![
                joined(&[screen::pizza_timer(), idle.clone()]),
                joined(&[screen::donation(), idle.clone()]),
                joined(&[screen::alarm("Feuer!"), idle.clone()]),
                joined(&[screen::new_member_registration("neo"), idle]),
            ]
        );
    }

    #[test]
    fn test_doorbell_only_when_pressed() {
        let mut c = controller(Mode::Default);
        c.handle("sensor/door/bell", "released");
        assert!(c.session().sent.is_empty());

        c.handle("sensor/door/bell", "pressed");
        assert_eq!(
            c.session().sent,
            vec![joined(&[screen::door_bell(), screen::idle(0)])]
        );
    }

    #[test]
    fn test_empty_messages_ignored() {
        let mut c = controller(Mode::Default);
        c.handle("psa/message", "");
        c.handle("psa/nowPlaying", "");
        assert!(c.session().sent.is_empty());

        c.handle("psa/message", "Plenum um 20 Uhr");
        c.handle("psa/nowPlaying", "Kraftwerk - Computerwelt");
        assert_eq!(
            c.session().sent,
            vec![
                joined(&[screen::public_service_announcement("Plenum um 20 Uhr"), screen::idle(0)]),
                joined(&[screen::now_playing("Kraftwerk - Computerwelt"), screen::idle(0)]),
            ]
        );
    }

    #[test]
    fn test_unknown_topic_ignored() {
        let mut c = controller(Mode::Default);
        c.handle("sensor/space/temperature", "21");
        assert!(c.session().sent.is_empty());
    }

    #[test]
    fn test_laser_topics_ignored_in_default_mode() {
        let mut c = controller(Mode::Default);
        c.handle("project/laser/operation", "active");
        c.handle("project/laser/finished", "120");
        assert!(!c.state().laser_active);
        assert!(c.session().sent.is_empty());
    }

    #[test]
    fn test_laser_activation_sets_sentinel_clock() {
        let mut c = controller(Mode::Lasercutter);
        c.handle("project/laser/operation", "active");

        assert!(c.state().laser_active);
        let start = clock::sentinel(0, 2).unwrap();
        assert_eq!(
            c.session().sent,
            vec![date(&start), single(&screen::laser_operation())]
        );
        assert_eq!(
            c.session().sent[0],
            b"\x01Z00\x02EB\x00\x20\x01\x31\x00\x00\x00\x00\x04".to_vec()
        );
    }

    #[test]
    fn test_repeated_active_does_not_reset_timer() {
        let mut c = controller(Mode::Lasercutter);
        c.handle("project/laser/operation", "active");
        c.handle("project/laser/operation", "active");
        assert_eq!(c.session().sent.len(), 2);

        c.handle("project/laser/operation", "inactive");
        assert!(!c.state().laser_active);
        assert_eq!(c.session().sent.len(), 2);
    }

    #[test]
    fn test_laser_screen_is_home_while_active() {
        let mut c = controller(Mode::Lasercutter);
        c.handle("project/laser/operation", "active");
        c.handle("sensor/space/member/present", "9");
        assert_eq!(c.state().member_count, 9);
        assert_eq!(c.session().sent.len(), 2);

        c.handle("psa/pizza", "");
        assert_eq!(
            c.session().sent[2],
            joined(&[screen::pizza_timer(), screen::laser_operation()])
        );
    }

    #[test]
    fn test_duration_drift_correction() {
        let mut c = controller(Mode::Lasercutter);
        c.handle("project/laser/duration", "117");
        assert!(c.session().sent.is_empty());

        c.handle("project/laser/duration", "177");
        let corrected = clock::sentinel(3, 0).unwrap();
        assert_eq!(c.session().sent, vec![date(&corrected)]);

        c.handle("project/laser/duration", "abc");
        assert_eq!(c.session().sent.len(), 1);
    }

    #[test]
    fn test_laser_finished_shows_summary_and_resets_clock() {
        let mut c = controller(Mode::Lasercutter);
        c.handle("sensor/space/member/present", "3");
        c.handle("project/laser/finished", "");
        assert_eq!(c.session().sent.len(), 1);

        c.handle("project/laser/finished", "50");
        assert_eq!(
            c.session().sent[1..].to_vec(),
            vec![
                joined(&[
                    screen::laser_finished(50, LaserFinishedPattern::PeelOffRight),
                    screen::idle(3)
                ]),
                date(&fixed_now()),
            ]
        );
    }

    #[test]
    fn test_laser_finished_leaves_laser_flag() {
        let mut c = controller(Mode::Lasercutter);
        c.handle("project/laser/operation", "active");
        c.handle("project/laser/finished", "700");
        assert!(c.state().laser_active);
        assert_eq!(
            c.session().sent[2],
            joined(&[
                screen::laser_finished(700, LaserFinishedPattern::PeelOffRight),
                screen::laser_operation()
            ])
        );
    }

    #[test]
    fn test_alive_restores_clock_and_home() {
        let mut c = controller(Mode::Default);
        c.handle("sensor/space/member/present", "1");
        c.on_alive();

        assert_eq!(
            c.session().sent[1..].to_vec(),
            vec![date(&fixed_now()), single(&screen::idle(1))]
        );
    }

    #[test]
    fn test_alive_in_laser_job_restores_timer_screen() {
        let mut c = controller(Mode::Lasercutter);
        c.handle("project/laser/operation", "active");
        c.on_alive();
        assert_eq!(c.session().sent[3], single(&screen::laser_operation()));
    }
}
