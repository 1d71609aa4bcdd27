// file: src/ranking/ranker.rs
// description: ranks arbitrary items by embedding similarity to a persona query
// reference: one batched embedding call per ranking, stable ordering on ties

use crate::embedding::Embedder;
use crate::error::{PipelineError, Result};
use crate::models::{PersonaContext, RankedItem};
use crate::ranking::cosine_similarity;
use std::cmp::Ordering;
use std::time::Instant;
use tracing::debug;

pub struct SemanticRanker<'a> {
    embedder: &'a dyn Embedder,
}

impl<'a> SemanticRanker<'a> {
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self { embedder }
    }

    pub fn embed_query(&self, context: &PersonaContext) -> Result<Vec<f32>> {
        let query = context.query_text();
        debug!("Embedding query: {}", query);

        self.embedder
            .embed(&[query])?
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::Ranking("embedder returned no query vector".to_string()))
    }

    /// Scores every item against `query` and sorts by descending similarity.
    ///
    /// `project` maps an item to the text that gets embedded. Items with equal
    /// scores keep their input order.
    pub fn rank<T, F>(&self, query: &[f32], items: Vec<T>, project: F) -> Result<Vec<RankedItem<T>>>
    where
        F: Fn(&T) -> String,
    {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<String> = items.iter().map(&project).collect();
        let started = Instant::now();
        let vectors = self.embedder.embed(&texts)?;
        debug!(
            "Embedded {} items in {:.2}s",
            texts.len(),
            started.elapsed().as_secs_f64()
        );

        if vectors.len() != items.len() {
            return Err(PipelineError::Ranking(format!(
                "embedder returned {} vectors for {} items",
                vectors.len(),
                items.len()
            )));
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != query.len()) {
            return Err(PipelineError::Ranking(format!(
                "embedding dimension {} does not match query dimension {}",
                bad.len(),
                query.len()
            )));
        }

        let mut ranked: Vec<RankedItem<T>> = items
            .into_iter()
            .zip(vectors.iter())
            .map(|(item, vector)| RankedItem::new(item, cosine_similarity(query, vector)))
            .collect();

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashingEmbedder;
    use std::cell::Cell;

    struct CountingEmbedder {
        inner: HashingEmbedder,
        calls: Cell<usize>,
    }

    impl Embedder for CountingEmbedder {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.set(self.calls.get() + 1);
            self.inner.embed(texts)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    /// Returns the same vector for every text so every score ties.
    struct ConstantEmbedder;

    impl Embedder for ConstantEmbedder {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    struct ShortEmbedder;

    impl Embedder for ShortEmbedder {
        fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(vec![vec![1.0, 0.0]])
        }

        fn name(&self) -> &str {
            "short"
        }
    }

    #[test]
    fn test_empty_items_skip_embedding() {
        let embedder = CountingEmbedder {
            inner: HashingEmbedder::new(32),
            calls: Cell::new(0),
        };
        let ranker = SemanticRanker::new(&embedder);

        let ranked = ranker.rank(&[1.0; 32], Vec::<String>::new(), |s| s.clone()).unwrap();
        assert!(ranked.is_empty());
        assert_eq!(embedder.calls.get(), 0);
    }

    #[test]
    fn test_single_batch_and_permutation() {
        let embedder = CountingEmbedder {
            inner: HashingEmbedder::new(256),
            calls: Cell::new(0),
        };
        let ranker = SemanticRanker::new(&embedder);
        let query = ranker
            .embed_query(&PersonaContext::new("Chef", "prepare a vegetarian buffet"))
            .unwrap();

        let items = vec![
            "Tax filing deadlines".to_string(),
            "Vegetarian buffet recipes for a chef".to_string(),
            "Quarterly sales figures".to_string(),
        ];
        let ranked = ranker.rank(&query, items.clone(), |s| s.clone()).unwrap();

        assert_eq!(embedder.calls.get(), 2);
        assert_eq!(ranked.len(), items.len());
        assert_eq!(ranked[0].item, "Vegetarian buffet recipes for a chef");
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        let mut returned: Vec<String> = ranked.into_iter().map(RankedItem::into_item).collect();
        let mut expected = items;
        returned.sort();
        expected.sort();
        assert_eq!(returned, expected);
    }

    #[test]
    fn test_query_text_itself_scores_highest() {
        let embedder = HashingEmbedder::new(128);
        let ranker = SemanticRanker::new(&embedder);
        let context = PersonaContext::new("Student", "review organic chemistry");
        let query = ranker.embed_query(&context).unwrap();

        let items = vec![
            "Reaction kinetics overview".to_string(),
            context.query_text(),
            "Organic compounds".to_string(),
        ];
        let ranked = ranker.rank(&query, items, |s| s.clone()).unwrap();

        assert_eq!(ranked[0].item, context.query_text());
        assert!((ranked[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranker = SemanticRanker::new(&ConstantEmbedder);
        let ranked = ranker
            .rank(&[1.0, 0.0], vec!["first", "second", "third"], |s| s.to_string())
            .unwrap();

        let order: Vec<&str> = ranked.iter().map(|r| r.item).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_projection_is_used_for_scoring() {
        let embedder = HashingEmbedder::new(256);
        let ranker = SemanticRanker::new(&embedder);
        let query = embedder.embed(&["castle tour".to_string()]).unwrap().remove(0);

        let ranked = ranker
            .rank(&query, vec![1u32, 2u32], |n| {
                if *n == 2 { "castle tour".to_string() } else { "budget".to_string() }
            })
            .unwrap();

        assert_eq!(ranked[0].item, 2);
    }

    #[test]
    fn test_vector_count_mismatch_is_error() {
        let ranker = SemanticRanker::new(&ShortEmbedder);
        let result = ranker.rank(&[1.0, 0.0], vec!["a", "b"], |s| s.to_string());
        assert!(matches!(result, Err(PipelineError::Ranking(_))));
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let embedder = HashingEmbedder::new(8);
        let ranker = SemanticRanker::new(&embedder);
        let result = ranker.rank(&[1.0, 0.0], vec!["a"], |s| s.to_string());
        assert!(matches!(result, Err(PipelineError::Ranking(_))));
    }
}
