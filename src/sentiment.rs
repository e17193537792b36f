use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::keywords::extract_keywords;

/// AFINN-style polarity weights on a -5..=5 scale.
const LEXICON: &[(&str, i32)] = &[
    ("amazing", 4),
    ("awesome", 4),
    ("beautiful", 3),
    ("best", 3),
    ("better", 2),
    ("brilliant", 4),
    ("cool", 1),
    ("congrats", 2),
    ("congratulations", 2),
    ("cute", 2),
    ("delighted", 3),
    ("enjoy", 2),
    ("enjoyed", 2),
    ("excellent", 3),
    ("excited", 3),
    ("exciting", 3),
    ("fantastic", 4),
    ("fun", 4),
    ("glad", 3),
    ("good", 3),
    ("gorgeous", 3),
    ("great", 3),
    ("happy", 3),
    ("helpful", 2),
    ("impressive", 3),
    ("incredible", 3),
    ("inspiring", 3),
    ("interesting", 2),
    ("like", 2),
    ("liked", 2),
    ("love", 3),
    ("loved", 3),
    ("lovely", 3),
    ("loves", 3),
    ("loving", 2),
    ("nice", 3),
    ("outstanding", 5),
    ("perfect", 3),
    ("recommend", 2),
    ("superb", 5),
    ("thank", 2),
    ("thanks", 2),
    ("useful", 2),
    ("win", 4),
    ("wonderful", 4),
    ("wow", 4),
    ("yes", 1),
    ("angry", -3),
    ("annoyed", -2),
    ("annoying", -2),
    ("awful", -3),
    ("bad", -3),
    ("boring", -3),
    ("broken", -1),
    ("confused", -2),
    ("confusing", -2),
    ("disappointed", -2),
    ("disappointing", -2),
    ("dislike", -2),
    ("fail", -2),
    ("failed", -2),
    ("fake", -3),
    ("hate", -3),
    ("hated", -3),
    ("horrible", -3),
    ("lame", -2),
    ("mess", -2),
    ("no", -1),
    ("poor", -2),
    ("problem", -2),
    ("sad", -2),
    ("scam", -2),
    ("slow", -1),
    ("spam", -2),
    ("stupid", -2),
    ("terrible", -3),
    ("ugly", -3),
    ("unhappy", -2),
    ("useless", -2),
    ("waste", -1),
    ("worse", -3),
    ("worst", -3),
    ("wrong", -2),
];

pub fn word_weight(word: &str) -> Option<i32> {
    LEXICON
        .iter()
        .find(|(term, _)| *term == word)
        .map(|(_, weight)| *weight)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSentiment {
    pub score: i32,
    pub comparative: f64,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

pub fn score_text(text: &str) -> TextSentiment {
    let tokens = tokenize(text);
    let mut score = 0;
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for token in &tokens {
        if let Some(weight) = word_weight(token) {
            score += weight;
            if weight > 0 {
                positive.push(token.clone());
            } else if weight < 0 {
                negative.push(token.clone());
            }
        }
    }

    let comparative = if tokens.is_empty() {
        0.0
    } else {
        score as f64 / tokens.len() as f64
    };

    TextSentiment {
        score,
        comparative,
        positive,
        negative,
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|ch: char| !(ch.is_ascii_alphabetic() || ch == '\''))
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFrequency {
    pub term: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub average_score: f64,
    pub distribution: SentimentDistribution,
    pub trending: Vec<KeywordFrequency>,
    pub analyzed: usize,
}

/// Scores every non-empty comment and collects the most frequent topic
/// terms across them.
pub fn summarize_comments(texts: &[&str], trending_limit: usize) -> SentimentSummary {
    let comments: Vec<&str> = texts
        .iter()
        .copied()
        .filter(|text| !text.trim().is_empty())
        .collect();

    let mut distribution = SentimentDistribution::default();
    let mut total = 0i64;
    for text in &comments {
        let score = score_text(text).score;
        total += score as i64;
        if score > 0 {
            distribution.positive += 1;
        } else if score < 0 {
            distribution.negative += 1;
        } else {
            distribution.neutral += 1;
        }
    }

    let average_score = if comments.is_empty() {
        0.0
    } else {
        total as f64 / comments.len() as f64
    };

    SentimentSummary {
        average_score,
        distribution,
        trending: trending_keywords(&comments, trending_limit),
        analyzed: comments.len(),
    }
}

/// Descending by count; ties keep first-seen order.
pub fn trending_keywords(texts: &[&str], limit: usize) -> Vec<KeywordFrequency> {
    let mut frequencies: IndexMap<String, u64> = IndexMap::new();
    for text in texts {
        for term in extract_keywords(text) {
            *frequencies.entry(term).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<KeywordFrequency> = frequencies
        .into_iter()
        .map(|(term, count)| KeywordFrequency { term, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}
