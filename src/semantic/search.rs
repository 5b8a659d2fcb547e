//! Top-k nearest neighbour retrieval over embedding vectors.

use rayon::prelude::*;

use super::SemanticSearchError;

/// One corpus entry matched by a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Position of the matched vector in the corpus
    pub corpus_id: usize,
    /// Cosine similarity between query and corpus vector
    pub score: f32,
}

/// Rank the corpus against every query.
///
/// Returns one result group per query, each holding at most `top_k` hits
/// sorted by score descending. Equal scores keep the lower corpus index first.
pub fn semantic_search(
    queries: &[Vec<f32>],
    corpus: &[Vec<f32>],
    top_k: usize,
) -> Result<Vec<Vec<SearchHit>>, SemanticSearchError> {
    if corpus.is_empty() {
        return Err(SemanticSearchError::NoEmbeddings);
    }

    let dimension = corpus[0].len();
    if let Some(bad) = queries
        .iter()
        .chain(corpus.iter())
        .find(|v| v.len() != dimension)
    {
        return Err(SemanticSearchError::DimensionMismatch {
            expected: dimension,
            actual: bad.len(),
        });
    }

    let groups = queries
        .par_iter()
        .map(|query| {
            let mut hits: Vec<SearchHit> = corpus
                .iter()
                .enumerate()
                .map(|(corpus_id, candidate)| SearchHit {
                    corpus_id,
                    score: cosine_similarity(query, candidate),
                })
                .collect();

            hits.sort_by(|a, b| {
                b.score
                    .total_cmp(&a.score)
                    .then_with(|| a.corpus_id.cmp(&b.corpus_id))
            });
            hits.truncate(top_k);
            hits
        })
        .collect();

    Ok(groups)
}

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        // Identical vectors
        let v1 = vec![1.0, 0.0, 0.0];
        let v2 = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&v1, &v2) - 1.0).abs() < 0.001);

        // Orthogonal vectors
        let v3 = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&v1, &v3) - 0.0).abs() < 0.001);

        // Opposite vectors
        let v4 = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&v1, &v4) - (-1.0)).abs() < 0.001);

        // Zero vector never divides by zero
        assert_eq!(cosine_similarity(&v1, &[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_self_search_ranks_query_first() {
        let corpus = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.9, 0.1, 0.0],
            vec![0.5, 0.5, 0.0],
        ];

        let groups = semantic_search(&corpus[..1], &corpus, 3).unwrap();
        assert_eq!(groups.len(), 1);

        let ids: Vec<usize> = groups[0].iter().map(|h| h.corpus_id).collect();
        assert_eq!(ids, vec![0, 2, 3]);
        assert!(groups[0].windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_prefer_lower_index() {
        let corpus = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0]];
        let query = vec![vec![2.0, 0.0]];

        let groups = semantic_search(&query, &corpus, 2).unwrap();
        let ids: Vec<usize> = groups[0].iter().map(|h| h.corpus_id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_one_group_per_query() {
        let corpus = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let groups = semantic_search(&corpus, &corpus, 5).unwrap();

        assert_eq!(groups.len(), 2);
        // top_k larger than the corpus returns the whole corpus
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1][0].corpus_id, 1);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let corpus = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
        let err = semantic_search(&corpus[..1], &corpus, 3).unwrap_err();
        assert!(matches!(
            err,
            SemanticSearchError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let err = semantic_search(&[vec![1.0]], &[], 3).unwrap_err();
        assert!(matches!(err, SemanticSearchError::NoEmbeddings));
    }
}
