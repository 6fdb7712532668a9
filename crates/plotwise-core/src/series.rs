//! Append-only chunked numeric series with per-chunk extents.
//!
//! A [`SeriesStore`] holds one named data axis as an ordered list of chunks.
//! Every chunk carries its own min/max/length, recomputed on each mutation,
//! so range queries can skip whole chunks without touching their values.
//!
//! # Example
//!
//! ```
//! use plotwise_core::SeriesStore;
//!
//! let mut store = SeriesStore::new("temperature");
//! store.push(vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
//! store.push(vec![5.0, 6.0]).unwrap();
//! assert_eq!(store.min(), Some(0.0));
//! assert_eq!(store.max(), Some(6.0));
//! assert_eq!(store.len(), 7);
//! ```

use crate::error::{ChartError, Result};

/// Min/max of a chunk. NaN values are ignored; an all-NaN chunk yields NaN.
fn chunk_extent(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::NAN;
    let mut hi = f64::NAN;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}

/// Location of a value inside a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPosition {
    /// Chunk index
    pub chunk: usize,
    /// Offset within the chunk
    pub offset: usize,
    /// Global index across all chunks
    pub global: usize,
}

/// One named data axis stored as append-only chunks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStore {
    key: String,
    index_key: Option<String>,
    chunks: Vec<Vec<f64>>,
    chunk_min: Vec<f64>,
    chunk_max: Vec<f64>,
    chunk_len: Vec<usize>,
    total_len: usize,
}

impl SeriesStore {
    /// Create an empty store.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Mark this store as depending on the independent-variable series `key`.
    pub fn with_index_key(mut self, key: impl Into<String>) -> Self {
        self.index_key = Some(key.into());
        self
    }

    /// Registry key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key of the shared independent-variable series, if any.
    pub fn index_key(&self) -> Option<&str> {
        self.index_key.as_deref()
    }

    /// Number of live values.
    pub const fn len(&self) -> usize {
        self.total_len
    }

    /// True when the store holds no values.
    pub const fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Number of chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Values of chunk `index`.
    pub fn chunk(&self, index: usize) -> Option<&[f64]> {
        self.chunks.get(index).map(Vec::as_slice)
    }

    /// `(min, max)` of chunk `index`.
    pub fn chunk_bounds(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.chunk_min.get(index)?, *self.chunk_max.get(index)?))
    }

    /// Length of chunk `index`.
    pub fn chunk_len(&self, index: usize) -> Option<usize> {
        self.chunk_len.get(index).copied()
    }

    /// Append `values` as a new chunk.
    pub fn push(&mut self, values: impl Into<Vec<f64>>) -> Result<()> {
        let values = values.into();
        if values.is_empty() {
            return Err(ChartError::EmptyChunk {
                key: self.key.clone(),
            });
        }

        let (lo, hi) = chunk_extent(&values);
        self.chunk_min.push(lo);
        self.chunk_max.push(hi);
        self.chunk_len.push(values.len());
        self.total_len += values.len();
        self.chunks.push(values);
        Ok(())
    }

    /// Append `values`, then drop the oldest data until at most `max_size`
    /// values remain.
    ///
    /// Whole chunks go first; if the cut lands mid-chunk, that chunk's head
    /// is truncated and its extent recomputed.
    pub fn stream(&mut self, values: impl Into<Vec<f64>>, max_size: usize) -> Result<()> {
        self.push(values)?;
        self.trim_to(max_size);
        Ok(())
    }

    fn trim_to(&mut self, max_size: usize) {
        let mut excess = self.total_len.saturating_sub(max_size);
        if excess == 0 {
            return;
        }

        let whole = self
            .chunk_len
            .iter()
            .scan(0usize, |acc, &len| {
                *acc += len;
                Some(*acc)
            })
            .take_while(|&cumulative| cumulative <= excess)
            .count();
        let dropped: usize = self.chunk_len[..whole].iter().sum();
        self.chunks.drain(..whole);
        self.chunk_min.drain(..whole);
        self.chunk_max.drain(..whole);
        self.chunk_len.drain(..whole);
        self.total_len -= dropped;
        excess -= dropped;

        if excess > 0 {
            if let Some(head) = self.chunks.first_mut() {
                head.drain(..excess);
                let (lo, hi) = chunk_extent(head);
                self.chunk_min[0] = lo;
                self.chunk_max[0] = hi;
                self.chunk_len[0] = head.len();
                self.total_len -= excess;
            }
        }
    }

    /// Drop every chunk.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.chunk_min.clear();
        self.chunk_max.clear();
        self.chunk_len.clear();
        self.total_len = 0;
    }

    /// Smallest live value, `None` when the store is empty.
    pub fn min(&self) -> Option<f64> {
        self.chunk_min.iter().copied().reduce(f64::min)
    }

    /// Largest live value, `None` when the store is empty.
    pub fn max(&self) -> Option<f64> {
        self.chunk_max.iter().copied().reduce(f64::max)
    }

    /// Locate `global_index` by walking chunk lengths.
    pub fn position_of(&self, global_index: usize) -> Option<ChunkPosition> {
        if global_index >= self.total_len {
            return None;
        }
        let mut start = 0;
        for (chunk, &len) in self.chunk_len.iter().enumerate() {
            if global_index < start + len {
                return Some(ChunkPosition {
                    chunk,
                    offset: global_index - start,
                    global: global_index,
                });
            }
            start += len;
        }
        None
    }

    /// Value at `global_index`, found by a linear scan over chunks.
    pub fn value_at(&self, global_index: usize) -> Option<f64> {
        let pos = self.position_of(global_index)?;
        self.chunks[pos.chunk].get(pos.offset).copied()
    }

    /// Same contract as [`value_at`](Self::value_at), using a binary search
    /// over cumulative chunk offsets.
    pub fn value_at_bisect(&self, global_index: usize) -> Option<f64> {
        if global_index >= self.total_len {
            return None;
        }
        let ends: Vec<usize> = self
            .chunk_len
            .iter()
            .scan(0usize, |acc, &len| {
                *acc += len;
                Some(*acc)
            })
            .collect();
        let chunk = ends.partition_point(|&end| end <= global_index);
        let start = if chunk == 0 { 0 } else { ends[chunk - 1] };
        self.chunks.get(chunk)?.get(global_index - start).copied()
    }

    /// [`value_at`](Self::value_at) reporting a missing index as an error.
    pub fn try_value_at(&self, global_index: usize) -> Result<f64> {
        self.value_at(global_index)
            .ok_or_else(|| ChartError::IndexOutOfRange {
                key: self.key.clone(),
                index: global_index,
                len: self.total_len,
            })
    }

    /// Indices of chunks whose `[min, max]` overlaps `[min, max]`.
    ///
    /// When `allowed` is given only those chunk indices are considered, in
    /// the order supplied.
    pub fn chunks_in_range(&self, min: f64, max: f64, allowed: Option<&[usize]>) -> Vec<usize> {
        let overlaps = |i: usize| match self.chunk_bounds(i) {
            Some((lo, hi)) => lo <= max && hi >= min,
            None => false,
        };
        match allowed {
            Some(indices) => indices.iter().copied().filter(|&i| overlaps(i)).collect(),
            None => (0..self.chunks.len()).filter(|&i| overlaps(i)).collect(),
        }
    }

    /// First position at or after `start` whose value lies in `[min, max]`.
    pub fn next_index(&self, start: usize, min: f64, max: f64) -> Option<ChunkPosition> {
        let first = self.position_of(start)?;
        let mut global = start - first.offset;
        for chunk in first.chunk..self.chunks.len() {
            let len = self.chunk_len[chunk];
            let (lo, hi) = (self.chunk_min[chunk], self.chunk_max[chunk]);
            if lo <= max && hi >= min {
                let skip = if chunk == first.chunk { first.offset } else { 0 };
                let hit = self.chunks[chunk]
                    .iter()
                    .enumerate()
                    .skip(skip)
                    .find(|(_, v)| (min..=max).contains(*v));
                if let Some((offset, _)) = hit {
                    return Some(ChunkPosition {
                        chunk,
                        offset,
                        global: global + offset,
                    });
                }
            }
            global += len;
        }
        None
    }

    /// Iterate live values oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.chunks.iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn store_with(chunks: &[&[f64]]) -> SeriesStore {
        let mut s = SeriesStore::new("s");
        for c in chunks {
            s.push(c.to_vec()).unwrap();
        }
        s
    }

    #[test]
    fn test_push_tracks_extents() {
        let s = store_with(&[&[0.0, 1.0, 2.0, 3.0, 4.0], &[5.0, 6.0]]);
        assert_eq!(s.min(), Some(0.0));
        assert_eq!(s.max(), Some(6.0));
        assert_eq!(s.len(), 7);
        assert_eq!(s.chunk_count(), 2);
        assert_eq!(s.chunk_bounds(1), Some((5.0, 6.0)));
    }

    #[test]
    fn test_push_empty_chunk_fails() {
        let mut s = SeriesStore::new("empty");
        let err = s.push(Vec::new()).unwrap_err();
        assert_eq!(err, ChartError::EmptyChunk { key: "empty".into() });
        assert!(s.is_empty());
        assert_eq!(s.chunk_count(), 0);
    }

    #[test]
    fn test_empty_store_has_no_extent() {
        let s = SeriesStore::new("s");
        assert_eq!(s.min(), None);
        assert_eq!(s.max(), None);
        assert_eq!(s.value_at(0), None);
    }

    #[test]
    fn test_stream_drops_whole_then_partial_chunk() {
        let mut s = store_with(&[&[0.0, 1.0, 2.0, 3.0, 4.0], &[5.0, 6.0]]);
        s.stream(vec![7.0, 8.0, 9.0], 5).unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(s.min(), Some(5.0));
        assert_eq!(s.chunk_count(), 2);
    }

    #[test]
    fn test_stream_truncates_head_chunk() {
        let mut s = store_with(&[&[10.0, -3.0, 2.0, 4.0]]);
        s.stream(vec![1.0], 3).unwrap();
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![2.0, 4.0, 1.0]);
        assert_eq!(s.chunk_bounds(0), Some((2.0, 4.0)));
        assert_eq!(s.min(), Some(1.0));
        assert_eq!(s.max(), Some(4.0));
    }

    #[test]
    fn test_stream_with_zero_capacity_empties() {
        let mut s = store_with(&[&[1.0, 2.0]]);
        s.stream(vec![3.0], 0).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.min(), None);
    }

    #[test]
    fn test_clear() {
        let mut s = store_with(&[&[1.0], &[2.0]]);
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.chunk_count(), 0);
    }

    #[test]
    fn test_value_at_crosses_chunks() {
        let s = store_with(&[&[0.0, 1.0], &[2.0], &[3.0, 4.0, 5.0]]);
        assert_eq!(s.value_at(0), Some(0.0));
        assert_eq!(s.value_at(2), Some(2.0));
        assert_eq!(s.value_at(5), Some(5.0));
        assert_eq!(s.value_at(6), None);
        assert!(matches!(
            s.try_value_at(6),
            Err(ChartError::IndexOutOfRange { index: 6, len: 6, .. })
        ));
    }

    #[test]
    fn test_chunks_in_range() {
        let s = store_with(&[&[0.0, 5.0], &[10.0, 15.0], &[20.0, 25.0]]);
        assert_eq!(s.chunks_in_range(4.0, 11.0, None), vec![0, 1]);
        assert_eq!(s.chunks_in_range(16.0, 19.0, None), Vec::<usize>::new());
        assert_eq!(s.chunks_in_range(0.0, 100.0, Some(&[2, 0])), vec![2, 0]);
        assert_eq!(s.chunks_in_range(0.0, 100.0, Some(&[7])), Vec::<usize>::new());
    }

    #[test]
    fn test_next_index_skips_disjoint_chunks() {
        let s = store_with(&[&[0.0, 1.0], &[50.0, 60.0], &[2.0, 3.0]]);
        let hit = s.next_index(0, 2.5, 3.5).unwrap();
        assert_eq!(hit, ChunkPosition { chunk: 2, offset: 1, global: 5 });
        let hit = s.next_index(1, 0.0, 1.0).unwrap();
        assert_eq!(hit.global, 1);
        assert_eq!(s.next_index(2, 0.0, 1.0), None);
    }

    #[test]
    fn test_index_key() {
        let s = SeriesStore::new("y").with_index_key("x");
        assert_eq!(s.index_key(), Some("x"));
        assert_eq!(SeriesStore::new("x").index_key(), None);
    }

    #[test]
    fn test_nan_values_ignored_in_extent() {
        let s = store_with(&[&[f64::NAN, 3.0, 1.0]]);
        assert_eq!(s.min(), Some(1.0));
        assert_eq!(s.max(), Some(3.0));
    }

    proptest! {
        #[test]
        fn prop_aggregates_match_live_values(
            ops in prop::collection::vec(
                (prop::collection::vec(-1e6f64..1e6, 1..20), prop::option::of(1usize..60)),
                1..20,
            )
        ) {
            let mut s = SeriesStore::new("p");
            for (values, cap) in ops {
                match cap {
                    Some(max_size) => s.stream(values, max_size).unwrap(),
                    None => s.push(values).unwrap(),
                }
            }
            let live: Vec<f64> = s.iter().collect();
            prop_assert_eq!(s.len(), live.len());
            let chunk_sum: usize = (0..s.chunk_count()).filter_map(|i| s.chunk_len(i)).sum();
            prop_assert_eq!(s.len(), chunk_sum);
            prop_assert_eq!(s.min(), live.iter().copied().reduce(f64::min));
            prop_assert_eq!(s.max(), live.iter().copied().reduce(f64::max));
        }

        #[test]
        fn prop_stream_keeps_most_recent(
            chunks in prop::collection::vec(prop::collection::vec(-100f64..100.0, 1..10), 1..10),
            max_size in 0usize..40,
        ) {
            let mut s = SeriesStore::new("p");
            let mut all = Vec::new();
            for c in chunks {
                all.extend_from_slice(&c);
                s.stream(c, max_size).unwrap();
            }
            let keep = all.len().min(max_size);
            let expected = all[all.len() - keep..].to_vec();
            prop_assert!(s.len() <= max_size);
            prop_assert_eq!(s.iter().collect::<Vec<_>>(), expected);
        }

        #[test]
        fn prop_bisect_matches_linear(
            chunks in prop::collection::vec(prop::collection::vec(-10f64..10.0, 1..8), 1..8),
            probe in 0usize..80,
        ) {
            let mut s = SeriesStore::new("p");
            for c in chunks {
                s.push(c).unwrap();
            }
            prop_assert_eq!(s.value_at(probe), s.value_at_bisect(probe));
        }
    }
}
