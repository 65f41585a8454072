use std::fmt::Write as _;
use std::path::Path;

/// Renders the buffer as a C header the firmware includes directly:
/// an include guard, a `BUFFER_SIZE` define and a `volatile uint16_t`
/// array with one value per line.
pub fn render_header(buffer: &[u16], guard: &str, array_name: &str) -> String {
    // "    65535,\n" is the longest line
    let mut out = String::with_capacity(128 + buffer.len() * 11);

    // Writing into a String cannot fail
    let _ = writeln!(out, "#ifndef {}", guard);
    let _ = writeln!(out, "#define {}", guard);
    let _ = writeln!(out, "#include <stdint.h>");
    let _ = writeln!(out);
    let _ = writeln!(out, "#define BUFFER_SIZE {}", buffer.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "volatile uint16_t {}[{}] = {{", array_name, buffer.len());

    if let Some((last, rest)) = buffer.split_last() {
        for value in rest {
            let _ = writeln!(out, "    {},", value);
        }
        let _ = writeln!(out, "    {}", last);
    }

    let _ = writeln!(out, "}};");
    let _ = writeln!(out);
    let _ = writeln!(out, "#endif");
    out
}

pub fn write_header(
    path: &Path,
    buffer: &[u16],
    guard: &str,
    array_name: &str,
) -> std::io::Result<()> {
    std::fs::write(path, render_header(buffer, guard, array_name))
}
