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
//! This modules defines the types used by the interactive components of nanostrand to request
//! modifications of a part.

use nanostrand_design::{StrandAddress, StrandSetId};

mod tools;
pub use tools::*;

#[derive(Debug, Clone, PartialEq)]
/// An operation that can be performed on a part
pub enum DesignOperation {
    /// Create a virtual helix. If `id_num` is `None`, the first free number is used.
    AddVirtualHelix {
        origin: (f64, f64),
        length: Option<usize>,
        id_num: Option<usize>,
    },
    /// Remove a virtual helix and all the strands on it
    RmVirtualHelix { id_num: usize },
    /// Grow or shrink a virtual helix at both ends
    ResizeVirtualHelix {
        id_num: usize,
        delta_low: isize,
        delta_high: isize,
    },
    CreateStrand {
        set: StrandSetId,
        low_idx: usize,
        high_idx: usize,
    },
    RmStrand { strand: StrandAddress },
    /// Delete all the strands of a strand set
    RmAllStrands { set: StrandSetId },
    /// Split a strand, the base at `idx` becoming the low end of the high fragment.
    SplitStrand {
        strand: StrandAddress,
        idx: usize,
        update_sequence: bool,
    },
    /// Merge two adjacent strands, the result keeping the oligo and the color of `priority`
    MergeStrands {
        priority: StrandAddress,
        other: StrandAddress,
    },
    /// Make a cross-over from the 3' end of `prime5` to the 5' end of `prime3`
    Xover {
        prime5: StrandAddress,
        prime3: StrandAddress,
    },
    RmXover { prime5: StrandAddress },
    ApplySequence {
        strand: StrandAddress,
        sequence: Option<String>,
    },
    ChangeColor { strand: StrandAddress, color: u32 },
}

impl DesignOperation {
    /// A description of self of display in the GUI
    pub fn description(&self) -> String {
        match self {
            Self::AddVirtualHelix { origin, .. } => {
                format!("Add helix at ({:.2}, {:.2})", origin.0, origin.1)
            }
            Self::RmVirtualHelix { id_num } => format!("Remove helix {}", id_num),
            Self::ResizeVirtualHelix { id_num, .. } => format!("Resize helix {}", id_num),
            Self::CreateStrand {
                set,
                low_idx,
                high_idx,
            } => format!("Create strand {}[{}, {}]", set, low_idx, high_idx),
            Self::RmStrand { .. } => String::from("Remove strand"),
            Self::RmAllStrands { set } => format!("Remove all strands of {}", set),
            Self::SplitStrand { idx, .. } => format!("Split strand at {}", idx),
            Self::MergeStrands { .. } => String::from("Merge strands"),
            Self::Xover { .. } => String::from("Create xover"),
            Self::RmXover { .. } => String::from("Remove xover"),
            Self::ApplySequence { sequence, .. } => {
                if sequence.is_some() {
                    String::from("Apply sequence")
                } else {
                    String::from("Clear sequence")
                }
            }
            Self::ChangeColor { color, .. } => format!("Change color to {:#010X}", color),
        }
    }

    /// False for the operations that are not recorded on the undo stack
    pub fn is_undoable(&self) -> bool {
        !matches!(self, Self::ResizeVirtualHelix { .. })
    }
}
