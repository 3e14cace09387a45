// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The main binary.

use clap::Parser;

fn main() {
    // Returning Result from main prints the debug representation of the
    // error; print the display representation instead.
    if let Err(e) = noema_combine::NoemaCombine::parse().run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
