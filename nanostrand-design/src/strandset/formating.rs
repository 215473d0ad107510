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
use super::{StrandSet, StrandSetError};
use crate::{Part, PartError, Parameters, StrandAddress, StrandSetId, UndoStack};

/// A cross-over as it is saved: `(id_num, is_fwd, idx3p, peer_id_num, peer_is_fwd, peer_idx5p)`.
///
/// The first three fields describe the 3' end of the strand that owns the cross-over, the last
/// three fields the 5' end of the strand it is connected to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XoverRecord(pub usize, pub bool, pub usize, pub usize, pub bool, pub usize);

impl XoverRecord {
    pub fn prime5_end(&self) -> (StrandSetId, usize) {
        (
            StrandSetId {
                id_num: self.0,
                is_fwd: self.1,
            },
            self.2,
        )
    }

    pub fn prime3_end(&self) -> (StrandSetId, usize) {
        (
            StrandSetId {
                id_num: self.3,
                is_fwd: self.4,
            },
            self.5,
        )
    }
}

/// The saved content of a virtual helix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VirtualHelixDump {
    pub id_num: usize,
    pub origin: (f64, f64),
    pub length: usize,
    pub fwd_idxs: Vec<(usize, usize)>,
    pub fwd_colors: Vec<u32>,
    pub rev_idxs: Vec<(usize, usize)>,
    pub rev_colors: Vec<u32>,
}

/// The saved content of a part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartDump {
    pub name: String,
    pub virtual_helices: Vec<VirtualHelixDump>,
    #[serde(default)]
    pub xovers: Vec<XoverRecord>,
}

impl StrandSet {
    /// The bounds and the colors of the strands of self, sorted by low index.
    ///
    /// Every strand connected on its 3' end adds a record to `xovers`.
    pub fn dump(
        &self,
        part: &Part,
        xovers: &mut Vec<XoverRecord>,
    ) -> (Vec<(usize, usize)>, Vec<u32>) {
        let mut idxs = Vec::with_capacity(self.strand_count());
        let mut colors = Vec::with_capacity(self.strand_count());
        for strand in self.strands() {
            idxs.push(strand.idxs());
            colors.push(strand.color());
            if let Some(peer) = strand.connection_3p().and_then(|addr| part.strand(addr)) {
                let (peer_id_num, peer_is_fwd, peer_idx5p) = peer.dump5p();
                xovers.push(XoverRecord(
                    strand.id_num(),
                    strand.is_forward(),
                    strand.idx3p(),
                    peer_id_num,
                    peer_is_fwd,
                    peer_idx5p,
                ));
            }
        }
        (idxs, colors)
    }

    /// For each base of the helix, `[in_id_num, in_idx, out_id_num, out_idx]`: the base that
    /// precedes it (5' side) and the one that follows it (3' side) on its strand, `-1` where there
    /// is none.
    pub fn legacy_array(&self, part: &Part) -> Vec<[isize; 4]> {
        let num = self.id_num() as isize;
        let mut ret = vec![[-1; 4]; self.length()];
        // step from a base to the next base in the 5' -> 3' direction
        let step: isize = if self.is_forward() { 1 } else { -1 };
        for strand in self.strands() {
            let xover5p = strand
                .connection_5p()
                .and_then(|addr| part.strand(addr))
                .map(|s| [s.id_num() as isize, s.idx3p() as isize]);
            let xover3p = strand
                .connection_3p()
                .and_then(|addr| part.strand(addr))
                .map(|s| [s.id_num() as isize, s.idx5p() as isize]);
            for idx in strand.low_idx()..=strand.high_idx() {
                let base = &mut ret[idx];
                let i = idx as isize;
                let incoming = if idx == strand.idx5p() {
                    xover5p
                } else {
                    Some([num, i - step])
                };
                let outgoing = if idx == strand.idx3p() {
                    xover3p
                } else {
                    Some([num, i + step])
                };
                if let Some([id, pos]) = incoming {
                    base[0] = id;
                    base[1] = pos;
                }
                if let Some([id, pos]) = outgoing {
                    base[2] = id;
                    base[3] = pos;
                }
            }
        }
        ret
    }
}

impl Part {
    pub fn dump(&self) -> PartDump {
        let mut xovers = Vec::new();
        let mut virtual_helices = Vec::with_capacity(self.nb_virtual_helices());
        for (id_num, vh) in self.virtual_helices() {
            let (fwd_idxs, fwd_colors) = vh.fwd_strand_set().dump(self, &mut xovers);
            let (rev_idxs, rev_colors) = vh.rev_strand_set().dump(self, &mut xovers);
            virtual_helices.push(VirtualHelixDump {
                id_num: *id_num,
                origin: vh.origin(),
                length: vh.length(),
                fwd_idxs,
                fwd_colors,
                rev_idxs,
                rev_colors,
            });
        }
        PartDump {
            name: self.name().to_string(),
            virtual_helices,
            xovers,
        }
    }

    /// Rebuild a part from its dump. None of the modifications are recorded.
    pub fn from_dump(dump: &PartDump, parameters: Parameters) -> Result<Self, PartError> {
        let mut part = Part::new(dump.name.clone(), parameters);
        let mut undo_stack = UndoStack::new();
        for vh in dump.virtual_helices.iter() {
            part.create_virtual_helix(
                &mut undo_stack,
                vh.origin,
                Some(vh.length),
                Some(vh.id_num),
                false,
            )?;
            let sets = [
                (StrandSetId::fwd(vh.id_num), &vh.fwd_idxs, &vh.fwd_colors),
                (StrandSetId::rev(vh.id_num), &vh.rev_idxs, &vh.rev_colors),
            ];
            for (set, idxs, colors) in sets.iter() {
                for (n, (low, high)) in idxs.iter().enumerate() {
                    let free = part
                        .strand_set(*set)
                        .map(|s| s.can_insert(*low, *high))
                        .unwrap_or(false);
                    if !free {
                        log::warn!("{}: saved strand [{}, {}] overlaps", set, low, high);
                        return Err(StrandSetError::Overlap {
                            low: *low,
                            high: *high,
                        }
                        .into());
                    }
                    part.create_deserialized_strand(
                        &mut undo_stack,
                        *set,
                        *low,
                        *high,
                        colors.get(n).copied(),
                        false,
                    )?;
                }
            }
        }
        for xover in dump.xovers.iter() {
            let prime5 = part.address_at(xover.prime5_end())?;
            let prime3 = part.address_at(xover.prime3_end())?;
            part.create_xover(&mut undo_stack, prime5, prime3, false)?;
        }
        log::info!(
            "Loaded part {} with {} helices and {} xovers",
            part.name(),
            part.nb_virtual_helices(),
            dump.xovers.len()
        );
        Ok(part)
    }

    fn address_at(
        &self,
        (set, idx): (StrandSetId, usize),
    ) -> Result<StrandAddress, StrandSetError> {
        self.strand_set(set)
            .ok_or(StrandSetError::NoSuchStrandSet(set))?
            .strand_at(idx)
            .map(|s| s.address())
            .ok_or(StrandSetError::NoSuchStrand)
    }
}
