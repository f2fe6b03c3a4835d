//! Rendering extraction results on stdout

use std::io::{self, Write};

use html2data::Extraction;
use serde::Serialize;

/// One value per line, each name's first value prefixed with `name:\t`
/// when `print_names` is set
pub fn write_text(out: &mut impl Write, texts: &Extraction, print_names: bool) -> io::Result<()> {
    for (name, values) in texts {
        if print_names {
            write!(out, "{name}:\t")?;
        }
        for value in values {
            writeln!(out, "{value}")?;
        }
    }
    Ok(())
}

/// Each container's values under an `i:` header line
pub fn write_nested_text(
    out: &mut impl Write,
    containers: &[Extraction],
    print_names: bool,
) -> io::Result<()> {
    for (i, texts) in containers.iter().enumerate() {
        writeln!(out, "{i}:")?;
        write_text(out, texts, print_names)?;
    }
    Ok(())
}

/// Serialize as a single JSON line
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}
