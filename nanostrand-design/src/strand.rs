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
use super::OligoId;
use std::fmt;

/// The identifier of a strand. Identifiers are allocated by the `Part` and are never reused, so
/// that an undone command can re-create a strand with the same identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrandId(pub usize);

/// The direction of the strands of a `StrandSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrandType {
    Fwd,
    Rev,
}

impl StrandType {
    pub fn from_is_fwd(is_fwd: bool) -> Self {
        if is_fwd {
            Self::Fwd
        } else {
            Self::Rev
        }
    }

    pub fn is_fwd(self) -> bool {
        self == Self::Fwd
    }
}

/// Identifies one of the two strand sets of a virtual helix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrandSetId {
    /// The identifier of the virtual helix
    pub id_num: usize,
    pub is_fwd: bool,
}

impl StrandSetId {
    pub fn fwd(id_num: usize) -> Self {
        Self {
            id_num,
            is_fwd: true,
        }
    }

    pub fn rev(id_num: usize) -> Self {
        Self {
            id_num,
            is_fwd: false,
        }
    }

    /// The strand set on the same helix with the opposite direction
    pub fn complement(self) -> Self {
        Self {
            is_fwd: !self.is_fwd,
            ..self
        }
    }

    pub fn strand_type(self) -> StrandType {
        StrandType::from_is_fwd(self.is_fwd)
    }
}

impl fmt::Display for StrandSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fwd {
            write!(f, "<fwd_StrandSet({})>", self.id_num)
        } else {
            write!(f, "<rev_StrandSet({})>", self.id_num)
        }
    }
}

/// The location of a strand: the strand set that owns it and its identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StrandAddress {
    pub set: StrandSetId,
    pub strand: StrandId,
}

/// A directed interval of a virtual helix.
///
/// The bounds of a strand are inclusive. Forward strands go from their low index (5') to their
/// high index (3'), reverse strands go from their high index (5') to their low index (3').
///
/// Cross-overs are stored on the strand ends: a strand whose 3' end is connected to the 5' end of
/// an other strand holds the address of that strand in `connection_3p`, and the other strand holds
/// its address in `connection_5p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strand {
    id: StrandId,
    set: StrandSetId,
    low_idx: usize,
    high_idx: usize,
    connection_low: Option<StrandAddress>,
    connection_high: Option<StrandAddress>,
    oligo: OligoId,
    color: u32,
    sequence: Option<String>,
}

impl Strand {
    pub(crate) fn new(
        id: StrandId,
        set: StrandSetId,
        low_idx: usize,
        high_idx: usize,
        oligo: OligoId,
        color: u32,
    ) -> Self {
        assert!(
            low_idx <= high_idx,
            "strand bounds must be ordered, got {} > {}",
            low_idx,
            high_idx
        );
        Self {
            id,
            set,
            low_idx,
            high_idx,
            connection_low: None,
            connection_high: None,
            oligo,
            color,
            sequence: None,
        }
    }

    pub fn id(&self) -> StrandId {
        self.id
    }

    pub fn strand_set_id(&self) -> StrandSetId {
        self.set
    }

    pub fn address(&self) -> StrandAddress {
        StrandAddress {
            set: self.set,
            strand: self.id,
        }
    }

    /// The identifier of the virtual helix on which the strand lies
    pub fn id_num(&self) -> usize {
        self.set.id_num
    }

    pub fn is_forward(&self) -> bool {
        self.set.is_fwd
    }

    pub fn strand_type(&self) -> StrandType {
        self.set.strand_type()
    }

    pub fn low_idx(&self) -> usize {
        self.low_idx
    }

    pub fn high_idx(&self) -> usize {
        self.high_idx
    }

    pub fn idxs(&self) -> (usize, usize) {
        (self.low_idx, self.high_idx)
    }

    /// Number of bases of the strand
    pub fn length(&self) -> usize {
        self.high_idx - self.low_idx + 1
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.low_idx <= idx && idx <= self.high_idx
    }

    pub fn idx5p(&self) -> usize {
        if self.is_forward() {
            self.low_idx
        } else {
            self.high_idx
        }
    }

    pub fn idx3p(&self) -> usize {
        if self.is_forward() {
            self.high_idx
        } else {
            self.low_idx
        }
    }

    pub fn connection_low(&self) -> Option<StrandAddress> {
        self.connection_low
    }

    pub fn connection_high(&self) -> Option<StrandAddress> {
        self.connection_high
    }

    pub fn connection_5p(&self) -> Option<StrandAddress> {
        if self.is_forward() {
            self.connection_low
        } else {
            self.connection_high
        }
    }

    pub fn connection_3p(&self) -> Option<StrandAddress> {
        if self.is_forward() {
            self.connection_high
        } else {
            self.connection_low
        }
    }

    /// True if one of the strand's ends is at `idx` and is connected to an other strand.
    pub fn has_xover_at(&self, idx: usize) -> bool {
        (idx == self.low_idx && self.connection_low.is_some())
            || (idx == self.high_idx && self.connection_high.is_some())
    }

    pub fn oligo(&self) -> OligoId {
        self.oligo
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    /// The sequence of the strand, in the 5' -> 3' direction
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    /// The `(id_num, is_fwd, idx5p)` triple describing the 5' end of the strand in a dump.
    pub fn dump5p(&self) -> (usize, bool, usize) {
        (self.id_num(), self.is_forward(), self.idx5p())
    }

    pub fn snapshot(&self) -> StrandSnapshot {
        StrandSnapshot {
            address: self.address(),
            low_idx: self.low_idx,
            high_idx: self.high_idx,
        }
    }

    pub(crate) fn set_connection_low(&mut self, connection: Option<StrandAddress>) {
        self.connection_low = connection;
    }

    pub(crate) fn set_connection_high(&mut self, connection: Option<StrandAddress>) {
        self.connection_high = connection;
    }

    pub(crate) fn set_connection_5p(&mut self, connection: Option<StrandAddress>) {
        if self.is_forward() {
            self.connection_low = connection
        } else {
            self.connection_high = connection
        }
    }

    pub(crate) fn set_connection_3p(&mut self, connection: Option<StrandAddress>) {
        if self.is_forward() {
            self.connection_high = connection
        } else {
            self.connection_low = connection
        }
    }

    pub(crate) fn set_oligo(&mut self, oligo: OligoId) {
        self.oligo = oligo;
    }

    pub(crate) fn set_color(&mut self, color: u32) {
        self.color = color;
    }

    pub(crate) fn set_sequence(&mut self, sequence: Option<String>) {
        self.sequence = sequence;
    }

    pub(crate) fn shift(&mut self, delta: isize) {
        self.low_idx = shift_idx(self.low_idx, delta);
        self.high_idx = shift_idx(self.high_idx, delta);
    }
}

fn shift_idx(idx: usize, delta: isize) -> usize {
    (idx as isize + delta).max(0) as usize
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_forward() {
            write!(f, "[H{}: {} -> {}]", self.id_num(), self.low_idx, self.high_idx)
        } else {
            write!(f, "[H{}: {} <- {}]", self.id_num(), self.low_idx, self.high_idx)
        }
    }
}

/// The bounds of a strand at the moment a notification was emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrandSnapshot {
    pub address: StrandAddress,
    pub low_idx: usize,
    pub high_idx: usize,
}
