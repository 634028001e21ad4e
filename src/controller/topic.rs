//! Bus topics and which mode listens to them.

use serde::Deserialize;

/// Operating mode, chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Space status sign
    Default,
    /// Space status sign next to the laser cutter, with job timer
    Lasercutter,
}

/// Every topic the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    MemberCount,
    PizzaReady,
    Donation,
    Alarm,
    NewMember,
    DoorBell,
    Message,
    NowPlaying,
    LaserOperation,
    LaserDuration,
    LaserFinished,
}

const COMMON: [Topic; 8] = [
    Topic::MemberCount,
    Topic::PizzaReady,
    Topic::Donation,
    Topic::Alarm,
    Topic::NewMember,
    Topic::DoorBell,
    Topic::Message,
    Topic::NowPlaying,
];

const LASER: [Topic; 3] = [
    Topic::LaserOperation,
    Topic::LaserDuration,
    Topic::LaserFinished,
];

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::MemberCount => "sensor/space/member/present",
            Topic::PizzaReady => "psa/pizza",
            Topic::Donation => "psa/donation",
            Topic::Alarm => "psa/alarm",
            Topic::NewMember => "psa/newMember",
            Topic::DoorBell => "sensor/door/bell",
            Topic::Message => "psa/message",
            Topic::NowPlaying => "psa/nowPlaying",
            Topic::LaserOperation => "project/laser/operation",
            Topic::LaserDuration => "project/laser/duration",
            Topic::LaserFinished => "project/laser/finished",
        }
    }

    pub fn parse(topic: &str) -> Option<Topic> {
        COMMON
            .into_iter()
            .chain(LASER)
            .find(|t| t.as_str() == topic)
    }

    /// True for topics only handled in [`Mode::Lasercutter`].
    pub fn is_laser(self) -> bool {
        LASER.contains(&self)
    }
}

impl Mode {
    /// Topics to subscribe to in this mode.
    pub fn topics(self) -> Vec<Topic> {
        let mut topics = COMMON.to_vec();
        if self == Mode::Lasercutter {
            topics.extend(LASER);
        }
        topics
    }
}
