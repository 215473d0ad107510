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
use super::{PartId, StrandSet, StrandSetId};

/// The axis along which two complementary `StrandSet`s are defined.
///
/// A virtual helix that is not registered in a part has no number and no part.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualHelix {
    id_num: Option<usize>,
    origin: (f64, f64),
    part: Option<PartId>,
    fwd_strandset: StrandSet,
    rev_strandset: StrandSet,
}

impl VirtualHelix {
    /// Create an unregistered virtual helix whose strand sets are identified by `reserved_id`.
    pub fn new(reserved_id: usize, origin: (f64, f64), length: usize) -> Self {
        Self {
            id_num: None,
            origin,
            part: None,
            fwd_strandset: StrandSet::new(StrandSetId::fwd(reserved_id), length),
            rev_strandset: StrandSet::new(StrandSetId::rev(reserved_id), length),
        }
    }

    /// The number of the virtual helix, `None` if the helix is not registered in a part.
    pub fn id_num(&self) -> Option<usize> {
        self.id_num
    }

    /// The identifier that the strand sets of self use.
    pub fn reserved_id(&self) -> usize {
        self.fwd_strandset.id_num()
    }

    pub fn part(&self) -> Option<PartId> {
        self.part
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn length(&self) -> usize {
        self.fwd_strandset.length()
    }

    pub fn max_base_idx(&self) -> usize {
        self.fwd_strandset.max_base_idx()
    }

    pub fn strand_set(&self, is_fwd: bool) -> &StrandSet {
        if is_fwd {
            &self.fwd_strandset
        } else {
            &self.rev_strandset
        }
    }

    pub fn fwd_strand_set(&self) -> &StrandSet {
        &self.fwd_strandset
    }

    pub fn rev_strand_set(&self) -> &StrandSet {
        &self.rev_strandset
    }

    pub fn strand_sets(&self) -> (&StrandSet, &StrandSet) {
        (&self.fwd_strandset, &self.rev_strandset)
    }

    pub fn has_strands(&self) -> bool {
        !self.fwd_strandset.is_empty() || !self.rev_strandset.is_empty()
    }

    pub(crate) fn strand_set_mut(&mut self, is_fwd: bool) -> &mut StrandSet {
        if is_fwd {
            &mut self.fwd_strandset
        } else {
            &mut self.rev_strandset
        }
    }

    pub(crate) fn set_id_num(&mut self, id_num: Option<usize>) {
        self.id_num = id_num
    }

    pub(crate) fn set_part(&mut self, part: Option<PartId>) {
        self.part = part
    }

    pub(crate) fn resize(&mut self, delta_low: isize, delta_high: isize) {
        self.fwd_strandset.resize(delta_low, delta_high);
        self.rev_strandset.resize(delta_low, delta_high);
    }
}
