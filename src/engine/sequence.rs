//! The data being sorted and its rendered snapshot.
//!
//! A [`Sequence`] holds the filtered input followed by one sentinel bar.
//! Algorithms only ever see the real prefix; renderers always receive the
//! full slice, sentinel included, so the vertical scale has headroom above
//! the largest real value.

use serde::{Deserialize, Serialize};

/// Filtered values plus a trailing sentinel.
///
/// The length is fixed once constructed: elements are swapped or
/// overwritten in place, never inserted or removed. Serializes as the plain
/// list of real values and deserializes through [`Sequence::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<u32>", from = "Vec<Option<u32>>")]
pub struct Sequence {
    /// Real values followed by the sentinel. Never empty.
    values: Vec<u32>,
}

impl Sequence {
    /// Largest storable value; leaves room for the sentinel above it.
    pub const MAX_VALUE: u32 = u32::MAX - 1;

    /// Build a sequence from raw input, dropping `None` and zero entries.
    ///
    /// Values above [`Self::MAX_VALUE`] are clamped to it. The sentinel is
    /// `max(filtered) + 1`, where the max of nothing is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use sortviz::engine::Sequence;
    ///
    /// let seq = Sequence::from_raw(&[Some(5), Some(3), Some(0), Some(8), None, Some(1)]);
    /// assert_eq!(seq.values(), &[5, 3, 8, 1]);
    /// assert_eq!(seq.rendered(), &[5, 3, 8, 1, 9]);
    /// ```
    #[must_use]
    pub fn from_raw(raw: &[Option<u32>]) -> Self {
        let mut values: Vec<u32> = raw
            .iter()
            .flatten()
            .copied()
            .filter(|&v| v != 0)
            .map(|v| v.min(Self::MAX_VALUE))
            .collect();
        let max = values.iter().copied().max().unwrap_or(0);
        values.push(max + 1);
        Self { values }
    }

    /// Build a sequence from plain values (zeros are still filtered).
    #[must_use]
    pub fn from_values(values: &[u32]) -> Self {
        let raw: Vec<Option<u32>> = values.iter().copied().map(Some).collect();
        Self::from_raw(&raw)
    }

    /// Number of real (sortable) elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() - 1
    }

    /// Whether there are no real elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at a real index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a real index; adapters index within `len()`.
    #[must_use]
    pub fn get(&self, index: usize) -> u32 {
        self.values()[index]
    }

    /// Overwrite a real element. The value is clamped like input values.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a real index.
    pub fn set(&mut self, index: usize, value: u32) {
        let len = self.len();
        self.values[..len][index] = value.min(Self::MAX_VALUE);
    }

    /// Swap two real elements.
    ///
    /// # Panics
    ///
    /// Panics if either index is not a real index.
    pub fn swap(&mut self, a: usize, b: usize) {
        let len = self.len();
        self.values[..len].swap(a, b);
    }

    /// The real elements, without the sentinel.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values[..self.len()]
    }

    /// Everything a frame draws: real elements followed by the sentinel.
    #[must_use]
    pub fn rendered(&self) -> &[u32] {
        &self.values
    }

    /// The sentinel value.
    #[must_use]
    pub fn sentinel(&self) -> u32 {
        self.values[self.values.len() - 1]
    }

    /// Whether the real elements are non-decreasing.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.values().windows(2).all(|w| w[0] <= w[1])
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::from_raw(&[])
    }
}

impl From<Vec<Option<u32>>> for Sequence {
    fn from(raw: Vec<Option<u32>>) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<Sequence> for Vec<u32> {
    fn from(mut sequence: Sequence) -> Self {
        sequence.values.pop();
        sequence.values
    }
}

/// Indices drawn in the highlight colour for one frame.
///
/// At most the pair currently being compared or swapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    first: Option<usize>,
    second: Option<usize>,
}

impl Highlight {
    /// No highlighted bars.
    pub const NONE: Self = Self {
        first: None,
        second: None,
    };

    /// Highlight a single bar.
    #[must_use]
    pub const fn single(index: usize) -> Self {
        Self {
            first: Some(index),
            second: None,
        }
    }

    /// Highlight the pair being compared or swapped.
    #[must_use]
    pub const fn pair(a: usize, b: usize) -> Self {
        Self {
            first: Some(a),
            second: Some(b),
        }
    }

    /// Whether `index` is highlighted.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.first == Some(index) || self.second == Some(index)
    }

    /// Whether nothing is highlighted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    /// Highlighted indices in order of insertion.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.first.into_iter().chain(self.second)
    }
}

/// One rendered snapshot: the sequence at this instant plus its highlight.
///
/// Produced once per step and handed straight to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Values to draw, sentinel included.
    pub values: &'a [u32],
    /// Bars to draw in the highlight colour.
    pub highlight: Highlight,
}

impl<'a> Frame<'a> {
    /// Snapshot a sequence with the given highlight.
    #[must_use]
    pub fn of(sequence: &'a Sequence, highlight: Highlight) -> Self {
        Self {
            values: sequence.rendered(),
            highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_and_sentinel() {
        let seq = Sequence::from_raw(&[Some(5), Some(3), Some(0), Some(8), None, Some(1)]);
        assert_eq!(seq.values(), &[5, 3, 8, 1]);
        assert_eq!(seq.rendered(), &[5, 3, 8, 1, 9]);
        assert_eq!(seq.sentinel(), 9);
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_empty_input_gets_unit_sentinel() {
        let seq = Sequence::from_raw(&[]);
        assert!(seq.is_empty());
        assert_eq!(seq.rendered(), &[1]);
        assert_eq!(seq.sentinel(), 1);
    }

    #[test]
    fn test_all_filtered_input() {
        let seq = Sequence::from_raw(&[Some(0), None, Some(0)]);
        assert!(seq.is_empty());
        assert_eq!(seq.rendered(), &[1]);
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Sequence::default(), Sequence::from_values(&[]));
    }

    #[test]
    fn test_oversized_values_clamped_below_sentinel() {
        let seq = Sequence::from_values(&[u32::MAX, 7]);
        assert_eq!(seq.values(), &[Sequence::MAX_VALUE, 7]);
        assert_eq!(seq.sentinel(), u32::MAX);
        assert!(seq.sentinel() > seq.values()[0]);

        let mut seq = Sequence::from_values(&[3, 1]);
        seq.set(0, u32::MAX);
        assert_eq!(seq.get(0), Sequence::MAX_VALUE);
    }

    #[test]
    fn test_deserialize_filters_and_recomputes_sentinel() {
        let seq: Sequence = serde_json::from_str("[5, 0, 3, null]").unwrap();
        assert_eq!(seq.values(), &[5, 3]);
        assert_eq!(seq.sentinel(), 6);
    }

    #[test]
    fn test_deserialize_empty_list() {
        let seq: Sequence = serde_json::from_str("[]").unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.rendered(), &[1]);
    }

    #[test]
    fn test_deserialize_rejects_struct_form() {
        assert!(serde_json::from_str::<Sequence>(r#"{"values":[]}"#).is_err());
    }

    #[test]
    fn test_serialize_omits_sentinel() {
        let seq = Sequence::from_values(&[4, 2]);
        assert_eq!(serde_json::to_string(&seq).unwrap(), "[4,2]");
        let back: Sequence = serde_json::from_str("[4,2]").unwrap();
        assert_eq!(back, seq);
    }

    #[test]
    fn test_swap_and_set_touch_real_elements_only() {
        let mut seq = Sequence::from_values(&[4, 2, 7]);
        seq.swap(0, 1);
        assert_eq!(seq.values(), &[2, 4, 7]);
        seq.set(2, 1);
        assert_eq!(seq.values(), &[2, 4, 1]);
        assert_eq!(seq.sentinel(), 8);
    }

    #[test]
    #[should_panic]
    fn test_swap_into_sentinel_panics() {
        let mut seq = Sequence::from_values(&[4, 2]);
        seq.swap(0, 2);
    }

    #[test]
    fn test_is_sorted_ignores_sentinel() {
        assert!(Sequence::from_values(&[1, 2, 2, 9]).is_sorted());
        assert!(!Sequence::from_values(&[3, 1]).is_sorted());
        assert!(Sequence::default().is_sorted());
    }

    #[test]
    fn test_highlight_pair() {
        let h = Highlight::pair(2, 3);
        assert!(h.contains(2));
        assert!(h.contains(3));
        assert!(!h.contains(4));
        assert_eq!(h.indices().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_highlight_none_and_single() {
        assert!(Highlight::NONE.is_empty());
        assert!(!Highlight::NONE.contains(0));
        let h = Highlight::single(1);
        assert!(!h.is_empty());
        assert_eq!(h.indices().count(), 1);
    }

    #[test]
    fn test_frame_includes_sentinel() {
        let seq = Sequence::from_values(&[3, 1]);
        let frame = Frame::of(&seq, Highlight::pair(0, 1));
        assert_eq!(frame.values, &[3, 1, 4]);
        assert!(frame.highlight.contains(1));
    }
}
