use engagement_insights::forecast::TrendDirection;
use engagement_insights::recommendations::{
    generate_recommendations, Priority, RecommendationConfig, RecommendationInputs,
    RecommendationKind, RecommendationStatus, TITLE_DECLINING_LIKES, TITLE_ENGAGEMENT,
    TITLE_SENTIMENT, TITLE_SHARE_RATE, TITLE_TRENDING,
};
use engagement_insights::sentiment::KeywordFrequency;
use engagement_insights::EngagementTotals;

fn keyword(term: &str, count: u64) -> KeywordFrequency {
    KeywordFrequency {
        term: term.to_string(),
        count,
    }
}

fn totals(likes: u64, comments: u64, shares: u64) -> EngagementTotals {
    EngagementTotals {
        likes,
        comments,
        shares,
    }
}

#[test]
fn all_rules_fire_in_fixed_order() {
    let trending = vec![
        keyword("#newlaunch", 5),
        keyword("camera", 4),
        keyword("tripod", 3),
        keyword("lens", 2),
    ];
    let inputs = RecommendationInputs {
        average_sentiment: -1.0,
        totals: totals(100, 2, 40),
        likes_trend: TrendDirection::Down,
        trending: &trending,
    };

    let recommendations = generate_recommendations(&inputs, &RecommendationConfig::default());

    let titles: Vec<&str> = recommendations
        .iter()
        .map(|recommendation| recommendation.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            TITLE_SENTIMENT,
            TITLE_ENGAGEMENT,
            TITLE_DECLINING_LIKES,
            TITLE_TRENDING,
            TITLE_SHARE_RATE
        ]
    );

    let kinds: Vec<(RecommendationKind, Priority)> = recommendations
        .iter()
        .map(|recommendation| (recommendation.kind, recommendation.priority))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (RecommendationKind::Warning, Priority::High),
            (RecommendationKind::Info, Priority::Medium),
            (RecommendationKind::Warning, Priority::High),
            (RecommendationKind::Success, Priority::Medium),
            (RecommendationKind::Success, Priority::Low),
        ]
    );
    assert!(recommendations
        .iter()
        .all(|recommendation| recommendation.status == RecommendationStatus::Active));

    let trending_message = &recommendations[3].message;
    assert!(trending_message.contains("#newlaunch, camera, tripod"));
    assert!(!trending_message.contains("lens"));
}

#[test]
fn healthy_account_gets_no_recommendations() {
    let inputs = RecommendationInputs {
        average_sentiment: 1.5,
        totals: totals(100, 12, 10),
        likes_trend: TrendDirection::Up,
        trending: &[],
    };

    assert!(generate_recommendations(&inputs, &RecommendationConfig::default()).is_empty());
}

#[test]
fn thresholds_are_strict() {
    let config = RecommendationConfig::default();
    let at_threshold = RecommendationInputs {
        average_sentiment: 0.0,
        totals: totals(100, 5, 30),
        likes_trend: TrendDirection::Stable,
        trending: &[],
    };
    assert!(generate_recommendations(&at_threshold, &config).is_empty());

    let below = RecommendationInputs {
        totals: totals(100, 4, 31),
        ..at_threshold
    };
    let titles: Vec<String> = generate_recommendations(&below, &config)
        .into_iter()
        .map(|recommendation| recommendation.title)
        .collect();
    assert_eq!(titles, vec![TITLE_ENGAGEMENT, TITLE_SHARE_RATE]);
}

#[test]
fn caller_owns_status_transitions() {
    let inputs = RecommendationInputs {
        average_sentiment: -2.0,
        totals: totals(10, 10, 0),
        likes_trend: TrendDirection::Stable,
        trending: &[],
    };
    let recommendation = generate_recommendations(&inputs, &RecommendationConfig::default())
        .into_iter()
        .next()
        .expect("sentiment warning");

    let dismissed = recommendation.clone().with_status(RecommendationStatus::Dismissed);

    assert_eq!(recommendation.status, RecommendationStatus::Active);
    assert_eq!(dismissed.status, RecommendationStatus::Dismissed);
    assert_eq!(dismissed.title, recommendation.title);
    assert_eq!(
        RecommendationStatus::from_str("Applied"),
        Some(RecommendationStatus::Applied)
    );
    assert_eq!(RecommendationStatus::from_str("archived"), None);
}
