//! # Screen Tests
//!
//! Composed screens and datagrams checked byte for byte through the public
//! API. Delivery is exercised against a local UDP socket standing in for
//! the sign.

use std::net::UdpSocket;
use std::time::Duration;

use chrono::NaiveDate;
use ledboard::protocol::commands::{self, FRAME, Pause, Special};
use ledboard::protocol::{field, frame, text};
use ledboard::screen::{self, LaserFinishedPattern, ScreenArgs, ScreenCommand, ScreenKind};
use ledboard::session::{DeviceSession, UdpSession};
use pretty_assertions::assert_eq;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Local socket playing the sign, plus a session pointed at it.
fn sign_and_session() -> (UdpSocket, UdpSession) {
    let sign = UdpSocket::bind("127.0.0.1:0").unwrap();
    sign.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
    let port = sign.local_addr().unwrap().port();
    let session = UdpSession::connect("127.0.0.1", port).unwrap();
    (sign, session)
}

fn count(screen: &ScreenCommand, needle: &[u8]) -> usize {
    screen
        .as_bytes()
        .windows(needle.len())
        .filter(|w| *w == needle)
        .count()
}

fn contains(screen: &ScreenCommand, needle: &[u8]) -> bool {
    count(screen, needle) > 0
}

/// True if every needle occurs, each one after the previous.
fn contains_in_order(screen: &ScreenCommand, needles: &[&[u8]]) -> bool {
    let mut rest = screen.as_bytes();
    for needle in needles {
        match rest.windows(needle.len()).position(|w| w == *needle) {
            Some(at) => rest = &rest[at + needle.len()..],
            None => return false,
        }
    }
    true
}

fn user_text_screens(args: &ScreenArgs) -> Vec<(ScreenKind, ScreenCommand)> {
    [
        ScreenKind::Alarm,
        ScreenKind::PublicServiceAnnouncement,
        ScreenKind::NowPlaying,
        ScreenKind::NewMemberRegistration,
    ]
    .into_iter()
    .map(|kind| (kind, kind.compose(args).unwrap()))
    .collect()
}

fn receive(sign: &UdpSocket) -> Vec<u8> {
    let mut buf = [0u8; 4096];
    let (len, _) = sign.recv_from(&mut buf).unwrap();
    buf[..len].to_vec()
}

// ============================================================================
// CODEC
// ============================================================================

#[test]
fn test_field_encoding_covers_decimal_range() {
    for v in 0..=99i64 {
        let expected = ((v / 10) * 16 + v % 10) as u8;
        assert_eq!(field::encode(v).unwrap(), expected, "value {}", v);
    }
    assert!(field::encode(100).is_err());
}

#[test]
fn test_sanitize_replaces_every_umlaut() {
    let once = text::sanitize("Grüße aus Köln, Jäger Müller");
    assert_eq!(once, "Gruesze aus Koeln, Jaeger Mueller");
    assert_eq!(text::sanitize(&once), once);
}

#[test]
fn test_date_datagram_golden() {
    let at = NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(18, 42, 11)
        .unwrap();
    let datagram = frame::set_date(&at).unwrap();

    assert_eq!(
        datagram,
        b"\x01Z00\x02EB\x24\x20\x05\x17\x18\x42\x00\x00\x04".to_vec()
    );
}

// ============================================================================
// SCREENS
// ============================================================================

#[test]
fn test_door_bell_datagram_golden() {
    let datagram = frame::store_screen(screen::door_bell().as_bytes());

    assert_eq!(
        datagram,
        b"\x01Z00\x02A\x0FETAA\x06\x0AI8\x06\x0AO8\x1A4\x071\x1C1! DOORBELL !\x070\x0E010\x04"
            .to_vec()
    );
}

#[test]
fn test_idle_shows_clock_fields_then_count() {
    let idle = screen::idle(5);

    let year = commands::special(Special::Year4);
    let month = commands::special(Special::Month);
    let day = commands::special(Special::Day);
    let hour = commands::special(Special::Hour);
    let minute = commands::special(Special::Minute);
    let second = commands::special(Special::Second);

    assert!(contains_in_order(&idle, &[
        year.as_slice(),
        month.as_slice(),
        day.as_slice(),
        hour.as_slice(),
        minute.as_slice(),
        second.as_slice(),
        b"humans present: 5".as_slice(),
    ]));
    assert!(idle.as_bytes().ends_with(&commands::pause(Pause::Seconds4, 9999)));
}

#[test]
fn test_short_laser_job_skips_congratulations() {
    let finished = screen::laser_finished(50, LaserFinishedPattern::PeelOffLeft);

    assert!(!contains(&finished, b"Congratulations!"));
    assert!(contains_in_order(&finished, &[b"Laser-Job finished:".as_slice(), b"50s"]));
}

#[test]
fn test_long_laser_job_blinks_three_times() {
    let finished = screen::laser_finished(3725, LaserFinishedPattern::PeelOffRight);

    assert_eq!(count(&finished, b"Congratulations!"), 3);
    assert!(contains_in_order(&finished, &[b"Laser-Job finished:".as_slice(), b"1h 2m 5s"]));
}

#[test]
fn test_user_text_is_sanitized_everywhere() {
    let args = ScreenArgs {
        text: "Tschüß".to_string(),
        ..ScreenArgs::default()
    };

    for (kind, composed) in user_text_screens(&args) {
        assert!(contains(&composed, b"Tschuesz"), "{} kept raw text", kind);
        assert!(
            !composed.as_bytes().iter().any(|b| *b >= 0x80),
            "{} has non-ASCII bytes",
            kind
        );
    }
}

#[test]
fn test_user_text_cannot_add_commands() {
    let plain = ScreenArgs {
        text: "abc".to_string(),
        ..ScreenArgs::default()
    };
    let hostile = ScreenArgs {
        text: "a\x04b\x0Cc\x01Z00\x02EB\u{C2}".to_string(),
        ..ScreenArgs::default()
    };

    for ((kind, expected), (_, composed)) in
        user_text_screens(&plain).into_iter().zip(user_text_screens(&hostile))
    {
        let datagram = frame::store_screen(composed.as_bytes());

        assert_eq!(count(&composed, &[FRAME]), count(&expected, &[FRAME]), "{}", kind);
        assert_eq!(
            datagram.iter().filter(|b| **b == commands::END).count(),
            1,
            "{} ends early",
            kind
        );
        assert_eq!(count(&composed, &[0x01]), 0, "{} carries a header byte", kind);
        assert_eq!(count(&composed, &[commands::HALF_SPACE]), 0, "{}", kind);
        assert!(contains(&composed, b"a b c Z00 EB?"), "{}", kind);
    }
}

#[test]
fn test_every_screen_frames_cleanly() {
    let args = ScreenArgs {
        laser_finished_pattern: Some(LaserFinishedPattern::PeelOffRight),
        ..ScreenArgs::default()
    };

    for kind in ScreenKind::ALL {
        let composed = kind.compose(&args).unwrap();
        assert!(!composed.is_empty(), "{} is empty", kind);

        let datagram = frame::store_screen(composed.as_bytes());
        assert!(datagram.starts_with(frame::SCREEN_HEADER));
        assert_eq!(datagram.last(), Some(&commands::END));
        // END only appears as the terminator
        assert_eq!(
            datagram.iter().filter(|b| **b == commands::END).count(),
            1,
            "{} contains a stray terminator",
            kind
        );
    }
}

// ============================================================================
// SESSION
// ============================================================================

#[test]
fn test_send_screens_is_one_datagram() {
    let (sign, mut session) = sign_and_session();

    let alarm = screen::alarm("Fenster offen");
    let home = screen::idle(2);
    session.send_screens(&[alarm.clone(), home.clone()]);

    let mut expected_screen = alarm.as_bytes().to_vec();
    expected_screen.push(FRAME);
    expected_screen.extend_from_slice(home.as_bytes());

    assert_eq!(receive(&sign), frame::store_screen(&expected_screen));
}

#[test]
fn test_send_single_screen_matches_send_screen() {
    let (sign, mut session) = sign_and_session();
    let donation = screen::donation();

    session.send_screens(std::slice::from_ref(&donation));
    let joined = receive(&sign);

    session.send_screen(&donation);
    let single = receive(&sign);

    assert_eq!(joined, single);
}

#[test]
fn test_set_date_reaches_sign() {
    let (sign, mut session) = sign_and_session();
    let at = NaiveDate::from_ymd_opt(2000, 1, 31)
        .unwrap()
        .and_hms_opt(0, 0, 2)
        .unwrap();

    session.set_date(&at);

    assert_eq!(
        receive(&sign),
        b"\x01Z00\x02EB\x00\x20\x01\x31\x00\x00\x00\x00\x04".to_vec()
    );
}
