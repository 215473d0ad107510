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
//! The modifications of the strand sets of a part.
//!
//! Every function of this module validates its request before building any command, so that a
//! refused request leaves the part and the undo stack untouched.

use super::{StrandSet, StrandSetError};
use crate::commands::{
    ApplySequenceCommand, CreateStrandCommand, CreateXoverCommand, MergeCommand,
    RemoveStrandCommand, RemoveXoverCommand, SetColorCommand, SplitCommand, UndoCommand,
    UndoStack,
};
use crate::{Part, Strand, StrandAddress, StrandSetId};

impl Part {
    fn existing_strand_set(&self, set: StrandSetId) -> Result<&StrandSet, StrandSetError> {
        self.strand_set(set)
            .ok_or(StrandSetError::NoSuchStrandSet(set))
    }

    /// The strand at `address`, if it is a member of its strand set.
    fn member(&self, address: StrandAddress) -> Result<&Strand, StrandSetError> {
        let set = self.existing_strand_set(address.set)?;
        if set.is_strand_in_set(address.strand) {
            set.get(address.strand).ok_or(StrandSetError::NotInSet)
        } else {
            Err(StrandSetError::NotInSet)
        }
    }

    fn existing_strand(&self, address: StrandAddress) -> Result<&Strand, StrandSetError> {
        self.existing_strand_set(address.set)?;
        self.strand(address).ok_or(StrandSetError::NoSuchStrand)
    }

    /// Create a strand on the interval `[low_idx, high_idx]` of `set`.
    ///
    /// Fails with `Overlap` if the interval intersects an existing strand or exceeds the bounds
    /// of the helix.
    pub fn create_strand(
        &mut self,
        undo_stack: &mut UndoStack,
        set: StrandSetId,
        low_idx: usize,
        high_idx: usize,
        use_undostack: bool,
    ) -> Result<StrandAddress, StrandSetError> {
        if !self.existing_strand_set(set)?.can_insert(low_idx, high_idx) {
            log::debug!("{}: cannot create [{}, {}]", set, low_idx, high_idx);
            return Err(StrandSetError::Overlap {
                low: low_idx,
                high: high_idx,
            });
        }
        let command = CreateStrandCommand::new(self, set, low_idx, high_idx);
        let address = command.address();
        let commands: Vec<Box<dyn UndoCommand>> = vec![Box::new(command)];
        undo_stack.exec_command_list(self, commands, "Create strand", use_undostack);
        Ok(address)
    }

    /// Create a strand read from a saved design.
    ///
    /// The input is trusted: only the bounds of the helix are checked, not the occupancy.
    pub fn create_deserialized_strand(
        &mut self,
        undo_stack: &mut UndoStack,
        set: StrandSetId,
        low_idx: usize,
        high_idx: usize,
        color: Option<u32>,
        use_undostack: bool,
    ) -> Result<StrandAddress, StrandSetError> {
        let length = self.existing_strand_set(set)?.length();
        if low_idx > high_idx || high_idx >= length {
            return Err(StrandSetError::Overlap {
                low: low_idx,
                high: high_idx,
            });
        }
        let mut command = CreateStrandCommand::new(self, set, low_idx, high_idx);
        if let Some(color) = color {
            command = command.with_color(color);
        }
        let address = command.address();
        let commands: Vec<Box<dyn UndoCommand>> = vec![Box::new(command)];
        undo_stack.exec_command_list(self, commands, "Create strand", use_undostack);
        Ok(address)
    }

    /// Remove a strand. If the strand has a sequence, the sequence of its oligo is cleared first.
    pub fn remove_strand(
        &mut self,
        undo_stack: &mut UndoStack,
        address: StrandAddress,
        use_undostack: bool,
    ) -> Result<(), StrandSetError> {
        let has_sequence = self.member(address)?.sequence().is_some();
        let mut commands: Vec<Box<dyn UndoCommand>> = Vec::with_capacity(2);
        if has_sequence {
            commands.push(Box::new(ApplySequenceCommand::new(self, address, None)));
        }
        commands.push(Box::new(RemoveStrandCommand::new(self, address)));
        undo_stack.exec_command_list(self, commands, "Remove strand", use_undostack);
        Ok(())
    }

    /// Remove every strand of `set`, each removal being a distinct entry of the history.
    pub fn remove_all_strands(
        &mut self,
        undo_stack: &mut UndoStack,
        set: StrandSetId,
        use_undostack: bool,
    ) -> Result<(), StrandSetError> {
        let addresses: Vec<StrandAddress> = self
            .existing_strand_set(set)?
            .strands()
            .map(|s| s.address())
            .collect();
        for address in addresses.into_iter() {
            self.remove_strand(undo_stack, address, use_undostack)?;
        }
        Ok(())
    }

    /// Remove every strand of `set` as a single entry of the history.
    pub fn remove_strand_set(
        &mut self,
        undo_stack: &mut UndoStack,
        set: StrandSetId,
        use_undostack: bool,
    ) -> Result<(), StrandSetError> {
        self.existing_strand_set(set)?;
        if use_undostack {
            undo_stack.begin_macro("Delete StrandSet");
        }
        let result = self.remove_all_strands(undo_stack, set, use_undostack);
        if use_undostack {
            undo_stack.end_macro();
        }
        result
    }

    /// Split a strand at `idx` and return the addresses of the fragments `[low, idx - 1]` and
    /// `[idx, high]`.
    pub fn split_strand(
        &mut self,
        undo_stack: &mut UndoStack,
        address: StrandAddress,
        idx: usize,
        update_sequence: bool,
        use_undostack: bool,
    ) -> Result<(StrandAddress, StrandAddress), StrandSetError> {
        let strand = self.member(address)?;
        if !StrandSet::strand_can_be_split(strand, idx) {
            log::debug!("{} cannot be split at {}", strand, idx);
            return Err(StrandSetError::SplitRejected { idx });
        }
        let command = SplitCommand::new(self, address, idx, update_sequence);
        let fragments = command.fragments();
        let commands: Vec<Box<dyn UndoCommand>> = vec![Box::new(command)];
        undo_stack.exec_command_list(self, commands, "Split strand", use_undostack);
        Ok(fragments)
    }

    /// True if the two strands are adjacent strands of the same set and are not connected to
    /// each other.
    pub fn strands_can_be_merged(&self, a: StrandAddress, b: StrandAddress) -> bool {
        if a.set != b.set || a.strand == b.strand {
            return false;
        }
        match (self.member(a), self.member(b)) {
            (Ok(a), Ok(b)) => {
                let (lower, higher) = if a.low_idx() < b.low_idx() {
                    (a, b)
                } else {
                    (b, a)
                };
                lower.high_idx() + 1 == higher.low_idx()
                    && lower.connection_high().is_none()
                    && higher.connection_low().is_none()
                    && lower.connection_low() != Some(higher.address())
            }
            _ => false,
        }
    }

    /// Merge two adjacent strands. The merged strand keeps the oligo and the color of `priority`.
    pub fn merge_strands(
        &mut self,
        undo_stack: &mut UndoStack,
        priority: StrandAddress,
        other: StrandAddress,
        use_undostack: bool,
    ) -> Result<StrandAddress, StrandSetError> {
        let priority_low = self.member(priority)?.low_idx();
        let other_low = self.member(other)?.low_idx();
        if !self.strands_can_be_merged(priority, other) {
            return Err(StrandSetError::NotMergeable);
        }
        let (lower, higher) = if priority_low < other_low {
            (priority, other)
        } else {
            (other, priority)
        };
        let command = MergeCommand::new(self, lower, higher, priority.strand);
        let merged = command.merged_address();
        let commands: Vec<Box<dyn UndoCommand>> = vec![Box::new(command)];
        undo_stack.exec_command_list(self, commands, "Merge strands", use_undostack);
        Ok(merged)
    }

    /// Connect the 3' end of `prime5` to the 5' end of `prime3`.
    pub fn create_xover(
        &mut self,
        undo_stack: &mut UndoStack,
        prime5: StrandAddress,
        prime3: StrandAddress,
        use_undostack: bool,
    ) -> Result<(), StrandSetError> {
        let free_3p = self.existing_strand(prime5)?.connection_3p().is_none();
        let free_5p = self.existing_strand(prime3)?.connection_5p().is_none();
        if prime5 == prime3 || !free_3p || !free_5p {
            return Err(StrandSetError::XoverRejected);
        }
        let commands: Vec<Box<dyn UndoCommand>> =
            vec![Box::new(CreateXoverCommand::new(prime5, prime3))];
        undo_stack.exec_command_list(self, commands, "Create xover", use_undostack);
        Ok(())
    }

    /// Remove the cross-over leaving the 3' end of `prime5`.
    pub fn remove_xover(
        &mut self,
        undo_stack: &mut UndoStack,
        prime5: StrandAddress,
        use_undostack: bool,
    ) -> Result<(), StrandSetError> {
        if self.existing_strand(prime5)?.connection_3p().is_none() {
            return Err(StrandSetError::XoverRejected);
        }
        let commands: Vec<Box<dyn UndoCommand>> =
            vec![Box::new(RemoveXoverCommand::new(self, prime5))];
        undo_stack.exec_command_list(self, commands, "Remove xover", use_undostack);
        Ok(())
    }

    /// Set, or clear if `sequence` is `None`, the sequence of the oligo of `strand`.
    pub fn apply_sequence(
        &mut self,
        undo_stack: &mut UndoStack,
        strand: StrandAddress,
        sequence: Option<String>,
        use_undostack: bool,
    ) -> Result<(), StrandSetError> {
        self.existing_strand(strand)?;
        let commands: Vec<Box<dyn UndoCommand>> =
            vec![Box::new(ApplySequenceCommand::new(self, strand, sequence))];
        undo_stack.exec_command_list(self, commands, "Apply sequence", use_undostack);
        Ok(())
    }

    pub fn set_strand_color(
        &mut self,
        undo_stack: &mut UndoStack,
        strand: StrandAddress,
        color: u32,
        use_undostack: bool,
    ) -> Result<(), StrandSetError> {
        self.existing_strand(strand)?;
        let commands: Vec<Box<dyn UndoCommand>> =
            vec![Box::new(SetColorCommand::new(self, strand, color))];
        undo_stack.exec_command_list(self, commands, "Change color", use_undostack);
        Ok(())
    }
}
