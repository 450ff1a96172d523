use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::tree::{NodeId, Tree};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicMatch {
    pub node: NodeId,
    pub score: i64,
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Best fuzzy matches of `query` against every topic name, highest score
/// first; ties keep document order.
pub fn search_topics(tree: &Tree, query: &str, limit: usize) -> Vec<TopicMatch> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut matches = tree
        .iter()
        .filter_map(|node| {
            fuzzy_match_score(&matcher, &node.name, query).map(|score| TopicMatch {
                node: node.id,
                score,
            })
        })
        .collect::<Vec<_>>();

    matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.node.cmp(&b.node)));
    matches.truncate(limit);
    matches
}
