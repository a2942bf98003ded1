use anyhow::Result;
use colored::*;
use std::io::Write;

use crate::cocomo::PRESETS;

/// Print the COCOMO preset table.
pub fn list_presets(w: &mut impl Write) -> Result<()> {
    writeln!(
        w,
        "{}",
        format!(
            "{:<18} {:>5} {:>5} {:>5} {:>5} {:>9} {:>8} {:>5}  {}",
            "PRESET", "A", "B", "C", "D", "WAGE", "OVERHEAD", "EAF", "DESCRIPTION"
        )
        .bold()
    )?;
    for preset in PRESETS {
        writeln!(
            w,
            "{:<18} {:>5.2} {:>5.2} {:>5.2} {:>5.2} {:>9.0} {:>8.1} {:>5.1}  {}",
            preset.name,
            preset.a,
            preset.b,
            preset.c,
            preset.d,
            preset.avg_wage,
            preset.overhead,
            preset.eaf,
            preset.description
        )?;
    }
    Ok(())
}
