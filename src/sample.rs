use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{EngagementEvent, EventKind, HistoricalPost, PostStatus};

const DEFAULT_POST_COUNT: usize = 40;

/// Longest history the generator will produce.
pub const MAX_SAMPLE_DAYS: u32 = 3_650;

const COMMENT_POOL: [&str; 12] = [
    "Loving the #NewLaunch, the packaging looks incredible",
    "Where can I buy this? Need it for my studio",
    "Great tutorial, the lighting setup tips were helpful",
    "Shipping took forever and the box arrived broken",
    "Is the #NewLaunch available in europe yet?",
    "This recipe is a keeper, made it twice already",
    "Not a fan of the new logo honestly",
    "Best coffee in town #MorningRitual",
    "The giveaway was a scam, never got anything",
    "Can you do a video about camera settings?",
    "Interesting take on sustainable packaging",
    "Okay",
];

pub fn generate_sample_events(seed: u64, days: u32, now: DateTime<Utc>) -> Vec<EngagementEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut events = Vec::new();
    let days = days.min(MAX_SAMPLE_DAYS);

    for day in 0..days {
        let Some(day_start) = now.checked_sub_signed(Duration::days((days - day) as i64)) else {
            continue;
        };
        let likes = rng.gen_range(3..25);
        let comments = rng.gen_range(0..6);
        let shares = rng.gen_range(0..5);

        for idx in 0..(likes + comments + shares) {
            let kind = if idx < likes {
                EventKind::Like
            } else if idx < likes + comments {
                EventKind::Comment
            } else {
                EventKind::Share
            };
            let offset = Duration::minutes(rng.gen_range(0..(24 * 60)));
            let mut event = EngagementEvent::new(
                kind,
                (day_start + offset).to_rfc3339_opts(SecondsFormat::Secs, true),
                format!("post_{}", rng.gen_range(0..8)),
            );
            event.author = Some(format!("user_{}", rng.gen_range(0..200)));
            if kind == EventKind::Comment {
                let text = COMMENT_POOL[rng.gen_range(0..COMMENT_POOL.len())];
                event.text = Some(text.to_string());
            }
            events.push(event);
        }
    }

    events
}

pub fn generate_sample_posts(
    seed: u64,
    platforms: &[String],
    now: DateTime<Utc>,
) -> Vec<HistoricalPost> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut posts = Vec::new();
    if platforms.is_empty() {
        return posts;
    }

    for idx in 0..DEFAULT_POST_COUNT {
        let platform = platforms[idx % platforms.len()].clone();
        let hours_ago = rng.gen_range(1..(60 * 24));
        let Some(scheduled) = now.checked_sub_signed(Duration::hours(hours_ago)) else {
            continue;
        };
        let status = if rng.gen::<f64>() < 0.85 {
            PostStatus::Published
        } else {
            PostStatus::Scheduled
        };
        let engagement_score = if status == PostStatus::Published {
            Some(rng.gen_range(20..95))
        } else {
            None
        };
        posts.push(HistoricalPost {
            platforms: vec![platform],
            scheduled_time: scheduled.to_rfc3339_opts(SecondsFormat::Secs, true),
            engagement_score,
            status,
        });
    }

    posts
}
