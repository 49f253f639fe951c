//! Outcast detection: the noun least related to the rest of a list.
//!
//! The outcast of `x1..xn` is the noun maximizing the sum of its distances
//! to all the others. Pairwise distances go through the WordNet query cache,
//! so the quadratic scan costs each distinct pair one SAP run at most.

use taxograph_core::GraphError;

use crate::WordNet;

/// Outcast detector borrowing a loaded WordNet.
pub struct Outcast<'w> {
    wordnet: &'w WordNet,
}

impl<'w> Outcast<'w> {
    pub fn new(wordnet: &'w WordNet) -> Self {
        Self { wordnet }
    }

    /// The noun with the maximum summed distance to all others. Ties keep
    /// the first maximum. Errors on an empty list or an unknown noun.
    pub fn outcast(&self, nouns: &[&str]) -> Result<String, GraphError> {
        if nouns.is_empty() {
            return Err(GraphError::InvalidArgument {
                message: "outcast requires at least one noun".to_string(),
            });
        }

        let mut best: Option<(&str, i64)> = None;

        for (i, &noun_a) in nouns.iter().enumerate() {
            let mut total = 0i64;
            for (j, &noun_b) in nouns.iter().enumerate() {
                if i == j {
                    continue;
                }
                total += self.wordnet.distance(noun_a, noun_b)?;
            }

            tracing::debug!(noun = noun_a, total, "outcast candidate");
            if best.map_or(true, |(_, best_total)| total > best_total) {
                best = Some((noun_a, total));
            }
        }

        // `nouns` is non-empty, so a best candidate always exists.
        best.map(|(noun, _)| noun.to_string())
            .ok_or_else(|| GraphError::InvalidArgument {
                message: "no outcast candidate".to_string(),
            })
    }
}
