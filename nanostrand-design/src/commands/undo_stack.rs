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
use super::{MacroCommand, UndoCommand};
use crate::Part;

/// The history of the commands executed on a part.
///
/// There is no global undo stack: every function that modifies a part takes the stack on which
/// the modification must be recorded.
#[derive(Debug, Default)]
pub struct UndoStack {
    undo_stack: Vec<Box<dyn UndoCommand>>,
    redo_stack: Vec<Box<dyn UndoCommand>>,
    /// The macros that have been begun but not ended, innermost last.
    open_macros: Vec<MacroCommand>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute `command` and record it.
    ///
    /// If a macro is open, the command becomes part of it. Otherwise it becomes the most recent
    /// entry of the history and the redo history is discarded.
    pub fn push(&mut self, part: &mut Part, mut command: Box<dyn UndoCommand>) {
        log::debug!("do {}", command.text());
        command.redo(part);
        self.record(command);
    }

    /// Open a macro. Until the matching `end_macro`, pushed commands are grouped in a single
    /// entry of the history.
    pub fn begin_macro<S: Into<String>>(&mut self, text: S) {
        self.open_macros.push(MacroCommand::new(text))
    }

    /// Close the innermost open macro. Empty macros are discarded.
    pub fn end_macro(&mut self) {
        if let Some(macro_command) = self.open_macros.pop() {
            if !macro_command.is_empty() {
                self.record(Box::new(macro_command))
            }
        } else {
            log::error!("end_macro called without matching begin_macro");
        }
    }

    /// Revert the most recent entry of the history. Return false if there was nothing to undo.
    pub fn undo(&mut self, part: &mut Part) -> bool {
        if !self.open_macros.is_empty() {
            log::warn!("Cannot undo while a macro is open");
            return false;
        }
        if let Some(mut command) = self.undo_stack.pop() {
            log::debug!("undo {}", command.text());
            command.undo(part);
            self.redo_stack.push(command);
            true
        } else {
            false
        }
    }

    /// Re-apply the most recently undone entry. Return false if there was nothing to redo.
    pub fn redo(&mut self, part: &mut Part) -> bool {
        if !self.open_macros.is_empty() {
            log::warn!("Cannot redo while a macro is open");
            return false;
        }
        if let Some(mut command) = self.redo_stack.pop() {
            log::debug!("redo {}", command.text());
            command.redo(part);
            self.undo_stack.push(command);
            true
        } else {
            false
        }
    }

    /// Execute a list of commands.
    ///
    /// If `use_undostack` is true, the commands are pushed inside a macro described by `desc`.
    /// Otherwise each command is executed once and forgotten.
    pub fn exec_command_list(
        &mut self,
        part: &mut Part,
        commands: Vec<Box<dyn UndoCommand>>,
        desc: &str,
        use_undostack: bool,
    ) {
        if use_undostack {
            self.begin_macro(desc);
            for command in commands.into_iter() {
                self.push(part, command);
            }
            self.end_macro();
        } else {
            for mut command in commands.into_iter() {
                log::debug!("do {} (not recorded)", command.text());
                command.redo(part);
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_text(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.text())
    }

    pub fn redo_text(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.text())
    }

    /// Number of entries that can be undone
    pub fn count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_in_macro(&self) -> bool {
        !self.open_macros.is_empty()
    }

    /// Forget the whole history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_macros.clear();
    }

    fn record(&mut self, command: Box<dyn UndoCommand>) {
        if let Some(parent) = self.open_macros.last_mut() {
            parent.push_executed(command)
        } else {
            self.undo_stack.push(command);
            self.redo_stack.clear();
        }
    }
}
