//! Prints the calculated new-moon table for Jerusalem, then the Crucifixion
//! candidates around 30 CE.
//!
//! ```sh
//! cargo run --example local_moons
//! ```

use abib_core::prelude::*;
use abib_core::{calculate_crucifixion_dates, calculate_new_moons};

struct Stdout;

impl OutputWriter for Stdout {
    fn write(&mut self, text: &str) {
        print!("{text}");
    }
}

fn main() -> anyhow::Result<()> {
    let mut out = Stdout;
    let dir = BuiltinDirectory;
    let name = "Jerusalem, Israel";
    let location = dir.get(name)?;

    calculate_new_moons(&mut out, 2024, location, name)?;
    calculate_crucifixion_dates(&mut out, 26, Some(36))?;

    Ok(())
}
