use crate::{normalize_platform, DayOfWeek};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySlot {
    pub hour: u8,
    pub engagement: f64,
}

const fn slot(hour: u8, engagement: f64) -> DaySlot {
    DaySlot { hour, engagement }
}

/// Industry-standard posting windows for one platform. `daily` is indexed
/// Monday first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformHeuristic {
    pub platform: &'static str,
    pub peak_day: DayOfWeek,
    pub daily: [DaySlot; 7],
}

impl PlatformHeuristic {
    pub fn day(&self, day: DayOfWeek) -> DaySlot {
        self.daily[day.index()]
    }

    pub fn peak(&self) -> DaySlot {
        self.day(self.peak_day)
    }
}

const INSTAGRAM: PlatformHeuristic = PlatformHeuristic {
    platform: "instagram",
    peak_day: DayOfWeek::Wednesday,
    daily: [
        slot(11, 62.0),
        slot(11, 64.0),
        slot(11, 68.0),
        slot(12, 63.0),
        slot(10, 60.0),
        slot(10, 52.0),
        slot(10, 50.0),
    ],
};

const FACEBOOK: PlatformHeuristic = PlatformHeuristic {
    platform: "facebook",
    peak_day: DayOfWeek::Wednesday,
    daily: [
        slot(9, 55.0),
        slot(9, 57.0),
        slot(13, 60.0),
        slot(13, 58.0),
        slot(11, 54.0),
        slot(12, 45.0),
        slot(12, 44.0),
    ],
};

const TWITTER: PlatformHeuristic = PlatformHeuristic {
    platform: "twitter",
    peak_day: DayOfWeek::Wednesday,
    daily: [
        slot(9, 50.0),
        slot(9, 53.0),
        slot(9, 56.0),
        slot(9, 54.0),
        slot(9, 50.0),
        slot(10, 38.0),
        slot(10, 36.0),
    ],
};

const LINKEDIN: PlatformHeuristic = PlatformHeuristic {
    platform: "linkedin",
    peak_day: DayOfWeek::Tuesday,
    daily: [
        slot(10, 58.0),
        slot(10, 64.0),
        slot(10, 62.0),
        slot(10, 60.0),
        slot(9, 50.0),
        slot(10, 30.0),
        slot(10, 28.0),
    ],
};

const TIKTOK: PlatformHeuristic = PlatformHeuristic {
    platform: "tiktok",
    peak_day: DayOfWeek::Thursday,
    daily: [
        slot(19, 60.0),
        slot(9, 62.0),
        slot(19, 63.0),
        slot(19, 66.0),
        slot(17, 64.0),
        slot(11, 61.0),
        slot(16, 59.0),
    ],
};

const YOUTUBE: PlatformHeuristic = PlatformHeuristic {
    platform: "youtube",
    peak_day: DayOfWeek::Friday,
    daily: [
        slot(14, 55.0),
        slot(14, 56.0),
        slot(15, 58.0),
        slot(15, 60.0),
        slot(15, 63.0),
        slot(11, 62.0),
        slot(11, 60.0),
    ],
};

const PINTEREST: PlatformHeuristic = PlatformHeuristic {
    platform: "pinterest",
    peak_day: DayOfWeek::Saturday,
    daily: [
        slot(20, 50.0),
        slot(20, 51.0),
        slot(20, 52.0),
        slot(20, 54.0),
        slot(15, 55.0),
        slot(20, 58.0),
        slot(20, 53.0),
    ],
};

const GENERIC: PlatformHeuristic = PlatformHeuristic {
    platform: "generic",
    peak_day: DayOfWeek::Wednesday,
    daily: [
        slot(12, 50.0),
        slot(12, 52.0),
        slot(12, 55.0),
        slot(12, 53.0),
        slot(12, 50.0),
        slot(11, 45.0),
        slot(11, 44.0),
    ],
};

pub const KNOWN_PLATFORMS: [&PlatformHeuristic; 7] = [
    &INSTAGRAM, &FACEBOOK, &TWITTER, &LINKEDIN, &TIKTOK, &YOUTUBE, &PINTEREST,
];

/// Unknown platforms get the generic table.
pub fn for_platform(platform: &str) -> &'static PlatformHeuristic {
    let lookup = normalize_platform(platform);
    KNOWN_PLATFORMS
        .iter()
        .copied()
        .find(|heuristic| heuristic.platform == lookup)
        .unwrap_or(&GENERIC)
}
