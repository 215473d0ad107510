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
use super::UndoCommand;
use crate::{Part, PartNotification, StrandAddress};

/// Set or clear the sequence of every strand of an oligo.
///
/// The sequence is read in the 5' -> 3' direction of the oligo, each strand receiving as many
/// bases as its length. If the sequence is too short, the remaining bases are unknown (`?`).
#[derive(Debug)]
pub struct ApplySequenceCommand {
    /// For each strand of the oligo, its sequence before and after the command
    changes: Vec<(StrandAddress, Option<String>, Option<String>)>,
    text: String,
}

impl ApplySequenceCommand {
    pub fn new(part: &Part, strand: StrandAddress, sequence: Option<String>) -> Self {
        let chain = part.oligo_chain(strand);
        let mut bases = sequence.as_ref().map(|s| s.chars());
        let mut changes = Vec::with_capacity(chain.len());
        for addr in chain.into_iter() {
            if let Some(strand) = part.strand(addr) {
                let old = strand.sequence().map(String::from);
                let new = bases.as_mut().map(|bases| {
                    (0..strand.length())
                        .map(|_| bases.next().unwrap_or('?'))
                        .collect::<String>()
                });
                changes.push((addr, old, new));
            }
        }
        let text = if sequence.is_some() {
            String::from("Apply sequence")
        } else {
            String::from("Clear sequence")
        };
        Self { changes, text }
    }

    fn apply(&self, part: &mut Part, use_new: bool) {
        for (addr, old, new) in self.changes.iter() {
            let sequence = if use_new { new } else { old };
            part.expect_strand_mut(*addr).set_sequence(sequence.clone());
            part.notify(PartNotification::StrandSequenceChanged(*addr));
        }
    }
}

impl UndoCommand for ApplySequenceCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        self.apply(part, true)
    }

    fn undo(&mut self, part: &mut Part) {
        self.apply(part, false)
    }
}

/// Change the color of a strand.
#[derive(Debug)]
pub struct SetColorCommand {
    strand: StrandAddress,
    old_color: u32,
    new_color: u32,
    text: String,
}

impl SetColorCommand {
    pub fn new(part: &Part, strand: StrandAddress, color: u32) -> Self {
        let old_color = part.strand(strand).map(|s| s.color()).unwrap_or(color);
        Self {
            strand,
            old_color,
            new_color: color,
            text: format!("Change color to {:#010X}", color),
        }
    }

    fn set(&self, part: &mut Part, color: u32) {
        part.expect_strand_mut(self.strand).set_color(color);
        part.notify(PartNotification::StrandColorChanged {
            strand: self.strand,
            color,
        });
    }
}

impl UndoCommand for SetColorCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        self.set(part, self.new_color)
    }

    fn undo(&mut self, part: &mut Part) {
        self.set(part, self.old_color)
    }
}
