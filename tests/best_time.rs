use chrono::{FixedOffset, Offset, Utc};
use engagement_insights::best_time::{
    for_platform, BestTimeCalculator, BestTimeConfig, Confidence, DayBreakdown,
};
use engagement_insights::config::EngineConfig;
use engagement_insights::{best_posting_times, DayOfWeek, HistoricalPost, PostStatus};

fn calculator() -> BestTimeCalculator {
    BestTimeCalculator::new(BestTimeConfig::default(), Utc.fix())
}

fn instagram_posts(count: usize) -> Vec<HistoricalPost> {
    (0..count)
        .map(|idx| {
            HistoricalPost::published(
                &["instagram"],
                format!("2024-01-{:02}T10:00:00Z", idx + 1),
                60,
            )
        })
        .collect()
}

#[test]
fn no_posts_falls_back_to_static_table_with_low_confidence() {
    let result = calculator().calculate("instagram", &[]);

    assert_eq!(result.confidence, Confidence::Low);
    assert_eq!(result.posts_analyzed, 0);
    assert_eq!(result.recommended_day, DayOfWeek::Wednesday);
    assert_eq!(result.recommended_hour, 11);
    assert_eq!(result.engagement_score, 68);
    assert_eq!(result.daily_breakdown.len(), 7);
    assert_eq!(
        result.daily_breakdown[&DayOfWeek::Sunday],
        DayBreakdown {
            hour: 10,
            engagement_score: 50
        }
    );
}

#[test]
fn confidence_tiers_follow_post_count() {
    let calculator = calculator();

    assert_eq!(
        calculator.calculate("instagram", &instagram_posts(5)).confidence,
        Confidence::High
    );
    assert_eq!(
        calculator.calculate("instagram", &instagram_posts(4)).confidence,
        Confidence::Medium
    );
    assert_eq!(
        calculator.calculate("instagram", &instagram_posts(0)).confidence,
        Confidence::Low
    );
}

#[test]
fn medium_confidence_uses_static_peak() {
    let result = calculator().calculate("linkedin", &[HistoricalPost::published(
        &["linkedin"],
        "2024-01-06T22:00:00Z",
        95,
    )]);

    assert_eq!(result.confidence, Confidence::Medium);
    assert_eq!(result.posts_analyzed, 1);
    assert_eq!(result.recommended_day, DayOfWeek::Tuesday);
    assert_eq!(result.recommended_hour, 10);
    assert_eq!(result.engagement_score, 64);
    assert_eq!(result.daily_breakdown.len(), 7);
}

#[test]
fn empirical_day_and_hour_are_chosen_independently() {
    let posts = vec![
        HistoricalPost::published(&["instagram"], "2024-01-01T09:00:00Z", 40),
        HistoricalPost::published(&["instagram"], "2024-01-01T18:00:00Z", 95),
        HistoricalPost::published(&["instagram"], "2024-01-02T09:00:00Z", 80),
        HistoricalPost::published(&["instagram"], "2024-01-09T09:00:00Z", 70),
        HistoricalPost::published(&["instagram"], "2024-01-05T18:00:00Z", 50),
    ];

    let result = calculator().calculate("instagram", &posts);

    assert_eq!(result.confidence, Confidence::High);
    assert_eq!(result.posts_analyzed, 5);
    assert_eq!(result.recommended_day, DayOfWeek::Tuesday);
    assert_eq!(result.engagement_score, 75);
    // Tuesday's own best hour is 9, but 18 has the best mean overall.
    assert_eq!(result.recommended_hour, 18);

    let breakdown = &result.daily_breakdown;
    assert_eq!(breakdown.len(), 7);
    assert_eq!(
        breakdown[&DayOfWeek::Monday],
        DayBreakdown {
            hour: 18,
            engagement_score: 95
        }
    );
    assert_eq!(
        breakdown[&DayOfWeek::Tuesday],
        DayBreakdown {
            hour: 9,
            engagement_score: 75
        }
    );
    assert_eq!(
        breakdown[&DayOfWeek::Friday],
        DayBreakdown {
            hour: 18,
            engagement_score: 50
        }
    );
    let static_wednesday = for_platform("instagram").day(DayOfWeek::Wednesday);
    assert_eq!(
        breakdown[&DayOfWeek::Wednesday],
        DayBreakdown {
            hour: static_wednesday.hour,
            engagement_score: 68
        }
    );
}

#[test]
fn only_published_scored_parseable_posts_for_the_platform_count() {
    let mut posts = instagram_posts(4);
    posts.push(HistoricalPost {
        platforms: vec!["instagram".to_string()],
        scheduled_time: "2024-02-01T10:00:00Z".to_string(),
        engagement_score: Some(90),
        status: PostStatus::Scheduled,
    });
    posts.push(HistoricalPost {
        platforms: vec!["instagram".to_string()],
        scheduled_time: "2024-02-02T10:00:00Z".to_string(),
        engagement_score: None,
        status: PostStatus::Published,
    });
    posts.push(HistoricalPost::published(&["instagram"], "soon", 90));
    posts.push(HistoricalPost::published(&["facebook"], "2024-02-03T10:00:00Z", 90));

    let result = calculator().calculate("instagram", &posts);

    assert_eq!(result.posts_analyzed, 4);
    assert_eq!(result.confidence, Confidence::Medium);
}

#[test]
fn scores_are_rounded_and_clamped() {
    let mut posts = instagram_posts(5);
    for post in posts.iter_mut() {
        post.engagement_score = Some(150);
    }
    assert_eq!(calculator().calculate("instagram", &posts).engagement_score, 100);

    for post in posts.iter_mut() {
        post.engagement_score = Some(-20);
    }
    let result = calculator().calculate("instagram", &posts);
    assert_eq!(result.engagement_score, 0);
    assert!(result
        .daily_breakdown
        .values()
        .all(|entry| entry.engagement_score <= 100));
}

#[test]
fn utc_offset_moves_day_and_hour() {
    let posts: Vec<HistoricalPost> = (0..5)
        .map(|_| HistoricalPost::published(&["twitter"], "2024-01-01T23:30:00Z", 70))
        .collect();
    let plus_one = FixedOffset::east_opt(3600).expect("valid offset");

    let shifted = BestTimeCalculator::new(BestTimeConfig::default(), plus_one)
        .calculate("twitter", &posts);

    assert_eq!(shifted.recommended_day, DayOfWeek::Tuesday);
    assert_eq!(shifted.recommended_hour, 0);
}

#[test]
fn jitter_is_bounded_and_reproducible() {
    let config = BestTimeConfig {
        fallback_jitter: 7.0,
        ..BestTimeConfig::default()
    };
    let calculator = BestTimeCalculator::new(config, Utc.fix());
    let posts = instagram_posts(2);

    let first = calculator.calculate("instagram", &posts);
    let second = calculator.calculate("instagram", &posts);

    assert_eq!(first, second);
    assert!(first.engagement_score >= 61 && first.engagement_score <= 75);
    assert_eq!(calculator.calculate("instagram", &[]).engagement_score, 68);
}

#[test]
fn platforms_are_case_insensitive_and_default_to_configured_plus_seen() {
    let config = EngineConfig::default();
    let posts = vec![HistoricalPost::published(&["TikTok"], "2024-01-01T19:00:00Z", 80)];

    let requested = best_posting_times(&posts, &["INSTAGRAM".to_string()], &config);
    assert_eq!(requested.keys().collect::<Vec<_>>(), vec!["instagram"]);

    let all = best_posting_times(&posts, &[], &config);
    assert_eq!(
        all.keys().map(|key| key.as_str()).collect::<Vec<_>>(),
        vec!["facebook", "instagram", "linkedin", "tiktok", "twitter"]
    );
    assert_eq!(all["tiktok"].posts_analyzed, 1);
    assert_eq!(all["tiktok"].confidence, Confidence::Medium);
    assert!(all.values().all(|result| result.daily_breakdown.len() == 7));
}

#[test]
fn unknown_platform_uses_generic_table() {
    let result = calculator().calculate("mastodon", &[]);

    assert_eq!(result.platform, "mastodon");
    assert_eq!(result.confidence, Confidence::Low);
    assert_eq!(result.recommended_day, DayOfWeek::Wednesday);
    assert_eq!(result.recommended_hour, 12);
    assert_eq!(for_platform("X").platform, "twitter");
}

#[test]
fn platform_aliases_match_posts_and_requests() {
    let posts: Vec<HistoricalPost> = (0..5)
        .map(|idx| {
            HistoricalPost::published(&["X"], format!("2024-01-{:02}T09:00:00Z", idx + 1), 60)
        })
        .collect();

    let result = calculator().calculate("twitter", &posts);
    assert_eq!(result.posts_analyzed, 5);
    assert_eq!(result.confidence, Confidence::High);

    let config = EngineConfig::default();
    let by_alias = best_posting_times(&posts, &["x".to_string()], &config);
    assert_eq!(by_alias.keys().map(|key| key.as_str()).collect::<Vec<_>>(), vec!["twitter"]);
    assert_eq!(by_alias["twitter"].posts_analyzed, 5);

    let defaults = best_posting_times(&posts, &[], &config);
    assert!(!defaults.contains_key("x"));
    assert_eq!(defaults["twitter"].confidence, Confidence::High);
    assert!(HistoricalPost::published(&["IG"], "2024-01-01T09:00:00Z", 1).targets("instagram"));
}

#[test]
fn unbounded_jitter_saturates_instead_of_failing() {
    for jitter in [f64::INFINITY, f64::NAN, 1e12] {
        let config = BestTimeConfig {
            fallback_jitter: jitter,
            ..BestTimeConfig::default()
        };
        let result =
            BestTimeCalculator::new(config, Utc.fix()).calculate("instagram", &instagram_posts(2));
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.engagement_score <= 100);
    }
}
