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
//! Default values used when creating helices and strands.

use super::StrandSetId;

/// Parameters of a part.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Parameters {
    /// Number of bases of a newly created virtual helix.
    pub default_helix_length: usize,
    /// Color of the strands lying on the scaffold strand set of a helix.
    pub scaffold_color: u32,
    /// Colors given in turn to new staple strands.
    pub staple_colors: [u32; 12],
    /// Whether modifications requested without explicit preference are recorded on the undo
    /// stack.
    #[serde(default = "default_use_undostack")]
    pub use_undostack: bool,
}

fn default_use_undostack() -> bool {
    true
}

impl Default for Parameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Parameters {
    pub const DEFAULT: Parameters = Parameters {
        // two turns of a honeycomb lattice
        default_helix_length: 42,
        scaffold_color: 0xFF_0066CC,
        staple_colors: [
            0xFF_CC0000,
            0xFF_F74308,
            0xFF_F7931E,
            0xFF_AAAA00,
            0xFF_57BB00,
            0xFF_007200,
            0xFF_03B6A2,
            0xFF_1700DE,
            0xFF_7300DE,
            0xFF_B8056C,
            0xFF_333333,
            0xFF_888888,
        ],
        use_undostack: true,
    };

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The scaffold runs 5' -> 3' on the forward strand set of even helices and on the reverse
    /// strand set of odd helices.
    pub fn is_scaffold(set: StrandSetId) -> bool {
        (set.id_num % 2 == 0) == set.is_fwd
    }

    /// The color given to the `n`-th strand created in `set`.
    pub fn color_for(&self, set: StrandSetId, n: usize) -> u32 {
        if Self::is_scaffold(set) {
            self.scaffold_color
        } else {
            self.staple_colors[n % self.staple_colors.len()]
        }
    }

    pub fn formated_string(&self) -> String {
        use std::fmt::Write;
        let mut ret = String::new();
        writeln!(&mut ret, "  Default helix length: {}", self.default_helix_length)
            .unwrap_or_default();
        writeln!(&mut ret, "  Scaffold color: {:#010X}", self.scaffold_color).unwrap_or_default();
        writeln!(&mut ret, "  #Staple colors: {}", self.staple_colors.len()).unwrap_or_default();
        writeln!(&mut ret, "  Use undo stack: {}", self.use_undostack).unwrap_or_default();
        ret
    }
}
