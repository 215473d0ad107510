/*
ENSnano, a 3d graphical application for DNA nanostructures.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use super::{Strand, StrandId, StrandSetId, StrandType};
use ahash::RandomState;
use std::collections::HashMap;
use std::fmt;

mod edit;
mod formating;
pub use formating::*;

/// The strands of one direction of a virtual helix.
///
/// A `StrandSet` maintains two index structures over the strands it owns:
///
/// * `strand_array` maps each base index of the helix to the strand occupying it, if any.
/// * `strand_heap` is the list of strands sorted by their low index. Two consecutive strands never
/// overlap but there can be gaps between them.
///
/// Both structures are kept consistent by every modification, see `check_invariants`.
#[derive(Clone)]
pub struct StrandSet {
    id: StrandSetId,
    strand_array: Vec<Option<StrandId>>,
    strand_heap: Vec<StrandId>,
    strands: HashMap<StrandId, Strand, RandomState>,
}

/// The reasons for which a modification of a strand set can be refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrandSetError {
    /// The requested interval intersects an existing strand or exceeds the bounds of the helix.
    Overlap { low: usize, high: usize },
    /// The strand is not a member of the strand set.
    NotInSet,
    /// The strand cannot be split at this index.
    SplitRejected { idx: usize },
    /// The strands are not adjacent or are connected by a cross-over.
    NotMergeable,
    /// One of the ends is already connected, or the two ends belong to the same strand.
    XoverRejected,
    NoSuchStrandSet(StrandSetId),
    NoSuchStrand,
}

impl fmt::Display for StrandSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap { low, high } => {
                write!(f, "Interval [{}, {}] overlaps an existing strand", low, high)
            }
            Self::NotInSet => write!(f, "Strand not in set"),
            Self::SplitRejected { idx } => write!(f, "Strand cannot be split at {}", idx),
            Self::NotMergeable => write!(f, "Strands cannot be merged"),
            Self::XoverRejected => write!(f, "Cross-over cannot be made"),
            Self::NoSuchStrandSet(id) => write!(f, "No strand set {}", id),
            Self::NoSuchStrand => write!(f, "No such strand"),
        }
    }
}

impl std::error::Error for StrandSetError {}

impl StrandSet {
    pub fn new(id: StrandSetId, initial_size: usize) -> Self {
        Self {
            id,
            strand_array: vec![None; initial_size],
            strand_heap: Vec::new(),
            strands: Default::default(),
        }
    }

    /// An empty strand set with the same identifier and the same length as self.
    pub fn simple_copy(&self) -> Self {
        Self::new(self.id, self.length())
    }

    pub fn id(&self) -> StrandSetId {
        self.id
    }

    pub fn id_num(&self) -> usize {
        self.id.id_num
    }

    pub fn is_forward(&self) -> bool {
        self.id.is_fwd
    }

    pub fn is_reverse(&self) -> bool {
        !self.id.is_fwd
    }

    /// Forward strands are drawn from left to right.
    pub fn is_drawn_5_to_3(&self) -> bool {
        self.is_forward()
    }

    pub fn strand_type(&self) -> StrandType {
        self.id.strand_type()
    }

    /// "forward" or "reverse"
    pub fn strand_filter(&self) -> &'static str {
        if self.is_forward() {
            "forward"
        } else {
            "reverse"
        }
    }

    /// The identifier of the strand set of opposite direction on the same helix.
    pub fn complement_id(&self) -> StrandSetId {
        self.id.complement()
    }

    /// Number of bases of the helix
    pub fn length(&self) -> usize {
        self.strand_array.len()
    }

    pub fn max_base_idx(&self) -> usize {
        self.length().saturating_sub(1)
    }

    pub fn strand_count(&self) -> usize {
        self.strand_heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strand_heap.is_empty()
    }

    /// The strands of self, sorted by low index.
    pub fn strands(&self) -> impl Iterator<Item = &Strand> {
        self.strand_heap.iter().map(move |id| self.owned(*id))
    }

    pub fn get(&self, id: StrandId) -> Option<&Strand> {
        self.strands.get(&id)
    }

    /// The strand occupying base `idx`, if any.
    pub fn strand_at(&self, idx: usize) -> Option<&Strand> {
        self.strand_array
            .get(idx)
            .copied()
            .flatten()
            .map(|id| self.owned(id))
    }

    /// True if `id` is the strand found at both ends of its interval.
    pub fn is_strand_in_set(&self, id: StrandId) -> bool {
        if let Some(strand) = self.strands.get(&id) {
            let (low, high) = strand.idxs();
            self.strand_array.get(low) == Some(&Some(id))
                && self.strand_array.get(high) == Some(&Some(id))
        } else {
            false
        }
    }

    /// Return the bounds of the empty region containing `idx`.
    ///
    /// The region is bounded by the neighbouring strands, or by the bounds of the helix.
    /// Return `None` if `idx` is occupied or outside of the helix.
    pub fn bounds_of_empty_region_containing(&self, idx: usize) -> Option<(usize, usize)> {
        if idx >= self.length() || self.strand_array[idx].is_some() {
            return None;
        }
        if self.strand_heap.is_empty() {
            return Some((0, self.max_base_idx()));
        }
        // strand_heap[i - 1] is the strand on the low side and strand_heap[i] the one on the high
        // side.
        let i = self.insertion_point(idx);
        let low_idx = if i == 0 {
            0
        } else {
            self.owned(self.strand_heap[i - 1]).high_idx() + 1
        };
        let high_idx = if i == self.strand_heap.len() {
            self.max_base_idx()
        } else {
            self.owned(self.strand_heap[i]).low_idx() - 1
        };
        Some((low_idx, high_idx))
    }

    /// True if a strand could be created on the interval `[low_idx, high_idx]`.
    pub fn can_insert(&self, low_idx: usize, high_idx: usize) -> bool {
        low_idx <= high_idx
            && self
                .bounds_of_empty_region_containing(low_idx)
                .map(|(low, high)| low <= low_idx && high >= high_idx)
                .unwrap_or(false)
    }

    /// The high index of the last strand, or 0 if there are no strands.
    pub fn index_of_rightmost_nonempty_base(&self) -> usize {
        self.strand_heap
            .last()
            .map(|id| self.owned(*id).high_idx())
            .unwrap_or(0)
    }

    /// Return true if a strand intersects the interval `[low_idx, high_idx]`.
    pub fn has_strand_in_range(&self, low_idx: usize, high_idx: usize) -> bool {
        if self.strand_at(low_idx).is_some() {
            return true;
        }
        let mut i = self.insertion_point(low_idx);
        while let Some(id) = self.strand_heap.get(i) {
            let strand = self.owned(*id);
            if strand.low_idx() > high_idx {
                return false;
            } else if low_idx <= strand.high_idx() {
                return true;
            }
            i += 1;
        }
        false
    }

    /// The strands intersecting `[low_idx, high_idx]`, sorted by low index.
    pub fn overlapping_strands(&self, low_idx: usize, high_idx: usize) -> Vec<&Strand> {
        let mut ret = Vec::new();
        let mut i = if let Some(strand) = self.strand_at(low_idx) {
            ret.push(strand);
            self.heap_position(strand.id())
                .map(|pos| pos + 1)
                .unwrap_or_else(|| panic!("{} indexed by {} but not in heap", strand, self))
        } else {
            self.insertion_point(low_idx)
        };
        while let Some(id) = self.strand_heap.get(i) {
            let strand = self.owned(*id);
            if strand.low_idx() > high_idx {
                break;
            } else if low_idx <= strand.high_idx() {
                ret.push(strand);
            }
            i += 1;
        }
        ret
    }

    /// The strands immediately before and after `id` in the strand set.
    pub fn neighbors(
        &self,
        id: StrandId,
    ) -> Result<(Option<&Strand>, Option<&Strand>), StrandSetError> {
        let i = self.heap_position(id).ok_or(StrandSetError::NotInSet)?;
        let low = if i == 0 {
            None
        } else {
            Some(self.owned(self.strand_heap[i - 1]))
        };
        let high = self.strand_heap.get(i + 1).map(|id| self.owned(*id));
        Ok((low, high))
    }

    /// True if there is a strand at `idx` and it has no cross-over at `idx`.
    pub fn has_strand_at_and_no_xover(&self, idx: usize) -> bool {
        self.strand_at(idx)
            .map(|s| !s.has_xover_at(idx))
            .unwrap_or(false)
    }

    /// True if there is no strand at `idx` or if the strand at `idx` has no cross-over there.
    pub fn has_no_strand_at_or_no_xover(&self, idx: usize) -> bool {
        self.strand_at(idx)
            .map(|s| !s.has_xover_at(idx))
            .unwrap_or(true)
    }

    /// Make sure the base index is strictly inside the strand, and not right next to its 3' end.
    pub fn strand_can_be_split(strand: &Strand, idx: usize) -> bool {
        if idx == strand.low_idx() || idx == strand.high_idx() {
            false
        } else if strand.low_idx() > idx || idx > strand.high_idx() {
            false
        } else {
            (idx as isize - strand.idx3p() as isize).abs() > 1
        }
    }

    /// Panics if the lookup table and the sorted list of strands are not consistent.
    pub fn check_invariants(&self) {
        assert_eq!(
            self.strand_heap.len(),
            self.strands.len(),
            "{}: heap and owned strands differ",
            self
        );
        let mut expected = vec![None; self.length()];
        let mut previous: Option<&Strand> = None;
        for id in self.strand_heap.iter() {
            let strand = self.owned(*id);
            assert_eq!(strand.strand_set_id(), self.id, "{} is not in {}", strand, self);
            if let Some(prev) = previous {
                assert!(
                    prev.high_idx() < strand.low_idx(),
                    "{}: {} and {} are not sorted or overlap",
                    self,
                    prev,
                    strand
                );
            }
            for slot in expected
                .iter_mut()
                .take(strand.high_idx() + 1)
                .skip(strand.low_idx())
            {
                *slot = Some(*id);
            }
            previous = Some(strand);
        }
        assert_eq!(
            expected, self.strand_array,
            "{}: lookup table inconsistent with strands",
            self
        );
    }

    // Index structure maintainance, used by the commands
    //============================================================================================

    pub(crate) fn get_mut(&mut self, id: StrandId) -> Option<&mut Strand> {
        self.strands.get_mut(&id)
    }

    /// Insert a strand in the lookup table and in the sorted list of strands.
    pub(crate) fn add_to_strand_list(&mut self, strand: Strand) {
        let id = strand.id();
        let (low, high) = strand.idxs();
        log::trace!("{}: add {}", self, strand);
        for slot in self.strand_array[low..=high].iter_mut() {
            debug_assert!(slot.is_none(), "adding {} over an occupied base", strand);
            *slot = Some(id);
        }
        let i = self.insertion_point(low);
        self.strand_heap.insert(i, id);
        if self.strands.insert(id, strand).is_some() {
            panic!("{}: strand {:?} added twice", self, id);
        }
    }

    /// Remove a strand from the lookup table and from the sorted list of strands.
    pub(crate) fn remove_from_strand_list(&mut self, id: StrandId) -> Strand {
        let i = self
            .heap_position(id)
            .unwrap_or_else(|| panic!("{}: removing strand {:?} that is not in set", self, id));
        self.strand_heap.remove(i);
        let strand = self
            .strands
            .remove(&id)
            .unwrap_or_else(|| panic!("{}: strand {:?} not owned", self, id));
        log::trace!("{}: remove {}", self, strand);
        let (low, high) = strand.idxs();
        for slot in self.strand_array[low..=high].iter_mut() {
            *slot = None;
        }
        strand
    }

    /// Grow or shrink the helix at both ends.
    ///
    /// Callers must make sure that no strand lies on a truncated region. When the helix grows or
    /// shrinks on its low side, the bounds of the strands are shifted accordingly.
    pub(crate) fn resize(&mut self, delta_low: isize, delta_high: isize) {
        let new_length = self.length() as isize + delta_low + delta_high;
        let new_length = new_length.max(0) as usize;
        for strand in self.strands.values_mut() {
            let shifted_low = strand.low_idx() as isize + delta_low;
            let shifted_high = strand.high_idx() as isize + delta_low;
            strand.shift(delta_low);
            if shifted_low < 0 || shifted_high >= new_length as isize {
                log::warn!(
                    "Resizing {} truncates strand {} (delta_low = {}, delta_high = {})",
                    self.id,
                    strand,
                    delta_low,
                    delta_high
                );
            }
        }
        let mut strand_array = vec![None; new_length];
        for id in self.strand_heap.iter() {
            let strand = &self.strands[id];
            for slot in strand_array
                .iter_mut()
                .take(strand.high_idx() + 1)
                .skip(strand.low_idx())
            {
                *slot = Some(*id);
            }
        }
        self.strand_array = strand_array;
    }

    /// Position of the first strand of the heap whose low index is not lower than `idx`.
    fn insertion_point(&self, idx: usize) -> usize {
        self.strand_heap
            .partition_point(|id| self.owned(*id).low_idx() < idx)
    }

    fn heap_position(&self, id: StrandId) -> Option<usize> {
        let strand = self.strands.get(&id)?;
        let i = self.insertion_point(strand.low_idx());
        if self.strand_heap.get(i) == Some(&id) {
            Some(i)
        } else {
            None
        }
    }

    fn owned(&self, id: StrandId) -> &Strand {
        self.strands
            .get(&id)
            .unwrap_or_else(|| panic!("{}: strand {:?} indexed but not owned", self, id))
    }
    //============================================================================================
}

impl fmt::Display for StrandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for StrandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrandSet")
            .field("id", &self.id)
            .field("length", &self.length())
            .field("strands", &self.strands().collect::<Vec<_>>())
            .finish()
    }
}

/// Two strand sets are equal if they have the same length and the same strands.
impl PartialEq for StrandSet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.strand_array == other.strand_array
            && self.strand_heap == other.strand_heap
            && self.strands == other.strands
    }
}

impl Eq for StrandSet {}
