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
//! Reversible modifications of a `Part`.
//!
//! Every modification of a part is performed by an `UndoCommand`. A command captures, when it is
//! constructed or first executed, all the information needed to revert its effect. Commands are
//! executed through an `UndoStack` that records them so that they can be undone and redone.

use super::Part;
use std::fmt;

mod create_strand;
mod merge;
mod remove_strand;
mod sequence;
mod split;
mod undo_stack;
mod virtual_helix;
mod xover;

pub use create_strand::CreateStrandCommand;
pub use merge::MergeCommand;
pub use remove_strand::RemoveStrandCommand;
pub use sequence::{ApplySequenceCommand, SetColorCommand};
pub use split::SplitCommand;
pub use undo_stack::UndoStack;
pub use virtual_helix::{CreateVirtualHelixCommand, RemoveVirtualHelixCommand};
pub use xover::{CreateXoverCommand, RemoveXoverCommand};

/// A reversible modification of a part.
///
/// `redo` applies the modification and `undo` reverts it. A command is always undone on the
/// state it produced, and redone on the state that preceded it.
pub trait UndoCommand: fmt::Debug {
    /// A description of the command, meant to be displayed to the user.
    fn text(&self) -> &str;
    fn redo(&mut self, part: &mut Part);
    fn undo(&mut self, part: &mut Part);
}

/// A group of commands that are done and undone as one.
#[derive(Debug)]
pub struct MacroCommand {
    text: String,
    children: Vec<Box<dyn UndoCommand>>,
}

impl MacroCommand {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Add an already executed command to self
    pub(crate) fn push_executed(&mut self, command: Box<dyn UndoCommand>) {
        self.children.push(command)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn UndoCommand> {
        self.children.iter().map(|c| c.as_ref())
    }
}

impl UndoCommand for MacroCommand {
    fn text(&self) -> &str {
        &self.text
    }

    fn redo(&mut self, part: &mut Part) {
        for child in self.children.iter_mut() {
            child.redo(part)
        }
    }

    fn undo(&mut self, part: &mut Part) {
        for child in self.children.iter_mut().rev() {
            child.undo(part)
        }
    }
}
