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
use nanostrand::design::Parameters;
use nanostrand::Document;
use std::env;
use std::path::PathBuf;

/// Print a summary of a saved design.
///
/// Usage: `nanostrand <design.json> [parameters.json]`
fn main() {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().collect();
    let path = if args.len() >= 2 {
        PathBuf::from(&args[1])
    } else {
        let program = args.first().map(String::as_str).unwrap_or("nanostrand");
        eprintln!("Usage: {} <design.json> [parameters.json]", program);
        std::process::exit(2);
    };
    let parameters = if let Some(param_path) = args.get(2) {
        match Document::load_parameters(param_path) {
            Ok(parameters) => parameters,
            Err(e) => {
                log::error!("Could not read parameters: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Parameters::DEFAULT
    };

    let document = match Document::load(&path, parameters) {
        Ok(document) => document,
        Err(e) => {
            log::error!("Could not load {:?}: {}", path, e);
            std::process::exit(1);
        }
    };
    let part = document.part();
    println!("Part {}", part.name());
    print!("{}", part.parameters().formated_string());
    for (id_num, vh) in part.virtual_helices() {
        let (fwd, rev) = vh.strand_sets();
        println!(
            "  helix {}: length {}, {} forward strands, {} reverse strands",
            id_num,
            vh.length(),
            fwd.strand_count(),
            rev.strand_count()
        );
    }
    println!("  {} cross-overs", part.dump().xovers.len());
}
