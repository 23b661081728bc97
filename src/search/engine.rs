use super::index::{FieldIndex, SearchIndex};
use super::tokenizer::tokenize_query;
use super::types::{BoolMode, SearchHit, SearchOptions};
use std::collections::HashMap;

/// Weight of a prefix-expanded match relative to an exact one.
const EXPANSION_WEIGHT: f64 = 0.15;

impl SearchIndex {
    /// Runs `query` against every indexed field and returns hits by
    /// descending score. Equal scores keep document insertion order.
    ///
    /// An empty query, or one made only of stop words, matches nothing.
    pub fn search(&self, query: &str, options: SearchOptions) -> Vec<SearchHit> {
        let tokens = tokenize_query(query);
        if tokens.is_empty() || self.refs.is_empty() {
            return Vec::new();
        }

        let mut totals: HashMap<usize, f64> = HashMap::new();
        for index in &self.field_indexes {
            for (doc, score) in self.field_search(index, &tokens, options) {
                *totals.entry(doc).or_insert(0.0) += score;
            }
        }

        let mut ranked: Vec<(usize, f64)> = totals
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .map(|(doc, score)| SearchHit {
                reference: self.refs[doc].clone(),
                score,
            })
            .collect()
    }

    fn field_search(
        &self,
        index: &FieldIndex,
        tokens: &[String],
        options: SearchOptions,
    ) -> HashMap<usize, f64> {
        let mut scores: Option<HashMap<usize, f64>> = None;
        let mut matched: HashMap<usize, usize> = HashMap::new();

        for token in tokens {
            let token_scores = self.token_scores(index, token, options.expand);
            // Only exact matches count towards coordination.
            if let Some(docs) = index.postings.get(token) {
                for doc in docs.keys() {
                    *matched.entry(*doc).or_insert(0) += 1;
                }
            }

            scores = Some(match (scores, options.bool_mode) {
                (None, _) => token_scores,
                (Some(acc), BoolMode::And) => acc
                    .into_iter()
                    .filter_map(|(doc, score)| token_scores.get(&doc).map(|s| (doc, score + s)))
                    .collect(),
                (Some(mut acc), BoolMode::Or) => {
                    for (doc, score) in token_scores {
                        *acc.entry(doc).or_insert(0.0) += score;
                    }
                    acc
                }
            });

            if options.bool_mode == BoolMode::And && scores.as_ref().is_some_and(HashMap::is_empty) {
                break;
            }
        }

        // Coordination: reward documents that match more of the query exactly.
        // Documents reached only through expansion keep their score.
        let query_len = tokens.len() as f64;
        let mut scores = scores.unwrap_or_default();
        for (doc, score) in scores.iter_mut() {
            if let Some(hits) = matched.get(doc) {
                *score *= *hits as f64 / query_len;
            }
        }
        scores
    }

    /// Scores of every document matching `token` in one field, including
    /// tokens it prefixes when `expand` is set.
    fn token_scores(&self, index: &FieldIndex, token: &str, expand: bool) -> HashMap<usize, f64> {
        let mut scores = HashMap::new();
        let token_len = token.chars().count() as f64;

        let keys: Vec<(&String, &HashMap<usize, u32>)> = if expand {
            index
                .postings
                .range(token.to_string()..)
                .take_while(|(key, _)| key.starts_with(token))
                .collect()
        } else {
            index
                .postings
                .get_key_value(token)
                .into_iter()
                .collect()
        };

        for (key, docs) in keys {
            let idf = self.idf(docs.len());
            let penalty = if key == token {
                1.0
            } else {
                let key_len = key.chars().count() as f64;
                (1.0 - (key_len - token_len) / key_len) * EXPANSION_WEIGHT
            };

            for (doc, count) in docs {
                let tf = (*count as f64).sqrt();
                let length = index.lengths.get(*doc).copied().unwrap_or(0);
                let norm = if length == 0 {
                    1.0
                } else {
                    1.0 / (length as f64).sqrt()
                };
                *scores.entry(*doc).or_insert(0.0) += tf * idf * norm * penalty;
            }
        }
        scores
    }

    fn idf(&self, document_frequency: usize) -> f64 {
        let total = self.refs.len() as f64;
        1.0 + (total / (document_frequency as f64 + 1.0)).ln()
    }
}
