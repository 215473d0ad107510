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
//! Oligos are the maximal chains of strands linked by cross-overs.
//!
//! Strands do not own an oligo object, they only carry the identifier of the oligo they belong
//! to. Commands that change the topology (split, merge, cross-overs, removal) re-assign oligo
//! identifiers along the chains that they affect, and remember the previous identifiers so that
//! the change can be undone.

use super::{Part, PartNotification, StrandAddress};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OligoId(pub usize);

/// The previous oligo of each strand whose oligo was re-assigned.
pub(crate) type OligoChanges = Vec<(StrandAddress, OligoId)>;

impl Part {
    /// The strands of the oligo containing `start`, in the 5' -> 3' direction.
    ///
    /// If the oligo is cyclic, the returned chain starts at `start`.
    pub fn oligo_chain(&self, start: StrandAddress) -> Vec<StrandAddress> {
        if self.strand(start).is_none() {
            return vec![];
        }
        let mut first = start;
        while let Some(prev) = self.strand(first).and_then(|s| s.connection_5p()) {
            if prev == start {
                break;
            }
            first = prev;
        }
        let mut ret = vec![first];
        let mut current = first;
        while let Some(next) = self.strand(current).and_then(|s| s.connection_3p()) {
            if next == first {
                break;
            }
            ret.push(next);
            current = next;
        }
        ret
    }

    /// The strands downstream of `start` (`start` included), following 3' connections.
    pub(crate) fn downstream_chain(&self, start: StrandAddress) -> Vec<StrandAddress> {
        let mut ret = vec![];
        let mut current = Some(start);
        while let Some(addr) = current {
            if self.strand(addr).is_none() || ret.contains(&addr) {
                break;
            }
            ret.push(addr);
            current = self.strand(addr).and_then(|s| s.connection_3p());
        }
        ret
    }

    /// Give `oligo` to every strand of `chain` and return the previous oligos.
    pub(crate) fn assign_oligo(
        &mut self,
        chain: &[StrandAddress],
        oligo: OligoId,
    ) -> OligoChanges {
        let mut ret = Vec::with_capacity(chain.len());
        for addr in chain.iter() {
            if let Some(strand) = self.strand_mut(*addr) {
                ret.push((*addr, strand.oligo()));
                strand.set_oligo(oligo);
            }
        }
        for addr in chain.iter() {
            self.notify(PartNotification::OligoChanged {
                strand: *addr,
                oligo,
            });
        }
        ret
    }

    pub(crate) fn restore_oligos(&mut self, changes: &[(StrandAddress, OligoId)]) {
        for (addr, oligo) in changes.iter().rev() {
            if let Some(strand) = self.strand_mut(*addr) {
                strand.set_oligo(*oligo);
            }
            self.notify(PartNotification::OligoChanged {
                strand: *addr,
                oligo: *oligo,
            });
        }
    }
}
