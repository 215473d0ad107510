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
//! A `Document` is a part together with the history of its modifications and the tools used to
//! edit it.

use super::controller::{Controller, ErrOperation, OkOperation};
use nanostrand_design::{
    Parameters, Part, PartDump, PartError, PartObserver, StrandSetId, UndoStack,
};
use nanostrand_interactor::{DesignOperation, ToolDispatcher, ToolEvent, ToolKind};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub struct Document {
    part: Part,
    undo_stack: UndoStack,
    controller: Controller,
    tools: ToolDispatcher,
}

/// An error that occured while reading or writing a document
#[derive(Debug)]
pub enum ParseDumpError {
    Json(serde_json::Error),
    Io(std::io::Error),
    /// The file was read but describes an invalid part
    InvalidPart(PartError),
}

impl From<serde_json::Error> for ParseDumpError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for ParseDumpError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<PartError> for ParseDumpError {
    fn from(e: PartError) -> Self {
        Self::InvalidPart(e)
    }
}

impl fmt::Display for ParseDumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "Json error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::InvalidPart(e) => write!(f, "Invalid part: {}", e),
        }
    }
}

impl std::error::Error for ParseDumpError {}

impl Document {
    pub fn new<S: Into<String>>(name: S, parameters: Parameters) -> Self {
        Self::with_part(Part::new(name, parameters))
    }

    fn with_part(part: Part) -> Self {
        Self {
            part,
            undo_stack: UndoStack::new(),
            controller: Default::default(),
            tools: Default::default(),
        }
    }

    pub fn part(&self) -> &Part {
        &self.part
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }

    pub fn subscribe(&mut self, observer: Arc<Mutex<dyn PartObserver + Send>>) {
        self.part.subscribe(observer)
    }

    pub fn apply_operation(
        &mut self,
        operation: DesignOperation,
    ) -> Result<OkOperation, ErrOperation> {
        let ret = self
            .controller
            .apply_operation(&mut self.part, &mut self.undo_stack, operation);
        self.tools.update_selection(&self.part);
        ret
    }

    /// Number of operations successfully applied since the document was created
    pub fn nb_applied_operations(&self) -> usize {
        self.controller.nb_applied()
    }

    pub fn undo(&mut self) -> bool {
        let ret = self.undo_stack.undo(&mut self.part);
        self.tools.update_selection(&self.part);
        ret
    }

    pub fn redo(&mut self) -> bool {
        let ret = self.undo_stack.redo(&mut self.part);
        self.tools.update_selection(&self.part);
        ret
    }

    pub fn tools(&self) -> &ToolDispatcher {
        &self.tools
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool)
    }

    /// Forward a pointer event to the active tool and apply the operation that it triggers.
    ///
    /// Return `None` if the event did not trigger any operation.
    pub fn on_tool_event(
        &mut self,
        event: ToolEvent,
        set: StrandSetId,
        idx: usize,
    ) -> Option<Result<OkOperation, ErrOperation>> {
        let operation = self.tools.handle(event, set, idx, &self.part)?;
        Some(self.apply_operation(operation))
    }

    // Persistence
    //============================================================================================

    pub fn to_json(&self) -> Result<String, ParseDumpError> {
        Ok(serde_json::to_string_pretty(&self.part.dump())?)
    }

    /// Read a document from its json representation. The history of the document is empty.
    pub fn from_json(json: &str, parameters: Parameters) -> Result<Self, ParseDumpError> {
        let dump: PartDump = serde_json::from_str(json)?;
        let part = Part::from_dump(&dump, parameters)?;
        Ok(Self::with_part(part))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ParseDumpError> {
        use std::io::Write;
        let json_content = self.to_json()?;
        let mut f = std::fs::File::create(path)?;
        f.write_all(json_content.as_bytes())?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P, parameters: Parameters) -> Result<Self, ParseDumpError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, parameters)
    }

    /// Read the parameters stored in a json file.
    pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<Parameters, ParseDumpError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Parameters::from_json_str(&json)?)
    }
    //============================================================================================
}
