//! Selection policy: which scanned entries end up on the page.
//!
//! - **Gallery**: an unbiased shuffle of every candidate, truncated to a fixed
//!   count. No entry can appear twice because the shuffle is a permutation.
//! - **Folder**: every candidate, in scan order.
//!
//! When a gallery has fewer candidates than requested, [`Shortfall`] decides:
//! `Clamp` shows what there is, `Reject` returns
//! [`SelectError::InsufficientCandidates`].
//!
//! The generator is passed in. The server owns a single [`StdRng`](rand::rngs::StdRng)
//! seeded once at startup and lends it out for the duration of one call.
//! None of this is suitable for anything security-sensitive.

use crate::types::CatalogEntry;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    #[error("gallery needs {needed} images but only {available} were found")]
    InsufficientCandidates { needed: usize, available: usize },
}

/// Reaction to a gallery with fewer candidates than its size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shortfall {
    #[default]
    Clamp,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Gallery { count: usize, shortfall: Shortfall },
    Folder,
}

/// Narrow `entries` according to `selection`.
pub fn select<R: Rng + ?Sized>(
    mut entries: Vec<CatalogEntry>,
    selection: &Selection,
    rng: &mut R,
) -> Result<Vec<CatalogEntry>, SelectError> {
    match *selection {
        Selection::Folder => Ok(entries),
        Selection::Gallery { count, shortfall } => {
            if entries.len() < count && shortfall == Shortfall::Reject {
                return Err(SelectError::InsufficientCandidates {
                    needed: count,
                    available: entries.len(),
                });
            }
            entries.shuffle(rng);
            entries.truncate(count);
            Ok(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn candidates(n: usize) -> Vec<CatalogEntry> {
        (0..n)
            .map(|i| CatalogEntry::image(format!("sources/{i:03}.jpg")))
            .collect()
    }

    fn gallery(count: usize, shortfall: Shortfall) -> Selection {
        Selection::Gallery { count, shortfall }
    }

    #[test]
    fn gallery_returns_exactly_four_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = candidates(10);
        let picked = select(pool.clone(), &gallery(4, Shortfall::Clamp), &mut rng).unwrap();

        assert_eq!(picked.len(), 4);
        let unique: HashSet<_> = picked.iter().map(|e| e.path.clone()).collect();
        assert_eq!(unique.len(), 4);
        assert!(picked.iter().all(|e| pool.contains(e)));
    }

    #[test]
    fn gallery_with_exact_count_returns_all() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select(candidates(4), &gallery(4, Shortfall::Reject), &mut rng).unwrap();
        let unique: HashSet<_> = picked.iter().map(|e| e.path.clone()).collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn gallery_clamps_when_short() {
        let mut rng = StdRng::seed_from_u64(3);
        for available in 0..4 {
            let picked =
                select(candidates(available), &gallery(4, Shortfall::Clamp), &mut rng).unwrap();
            assert_eq!(picked.len(), available);
        }
    }

    #[test]
    fn gallery_rejects_when_short() {
        let mut rng = StdRng::seed_from_u64(3);
        for available in 0..4 {
            let err = select(candidates(available), &gallery(4, Shortfall::Reject), &mut rng)
                .unwrap_err();
            assert_eq!(
                err,
                SelectError::InsufficientCandidates {
                    needed: 4,
                    available
                }
            );
        }
    }

    #[test]
    fn same_seed_same_selection() {
        let selection = gallery(4, Shortfall::Clamp);
        let a = select(candidates(20), &selection, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = select(candidates(20), &selection, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shared_generator_advances_between_calls() {
        let mut rng = StdRng::seed_from_u64(42);
        let selection = gallery(4, Shortfall::Clamp);
        let draws: HashSet<Vec<CatalogEntry>> = (0..8)
            .map(|_| select(candidates(20), &selection, &mut rng).unwrap())
            .collect();
        assert!(draws.len() > 1, "generator must not be reseeded per call");
    }

    #[test]
    fn gallery_reaches_every_candidate() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            for e in select(candidates(8), &gallery(4, Shortfall::Clamp), &mut rng).unwrap() {
                seen.insert(e.path);
            }
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn folder_returns_all_in_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let pool = candidates(7);
        let picked = select(pool.clone(), &Selection::Folder, &mut rng).unwrap();
        assert_eq!(picked, pool);
    }

    #[test]
    fn folder_with_no_entries() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select(Vec::new(), &Selection::Folder, &mut rng).unwrap().is_empty());
    }
}
