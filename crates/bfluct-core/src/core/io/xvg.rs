use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header block of a two-column xvg report.
///
/// The Grace-style header names the computed quantity and the axis labels so
/// the table can be plotted directly by common trajectory-analysis tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XvgHeader<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

/// Writes a per-atom table as a two-column xvg time-series-style file.
///
/// Column 1 is the 1-based atom index, column 2 the value formatted with
/// `decimals` digits after the decimal point.
pub fn write_table(
    writer: &mut impl Write,
    header: &XvgHeader,
    values: &[f64],
    decimals: usize,
) -> io::Result<()> {
    writeln!(writer, "# Result of the {} calculation:", header.title)?;
    writeln!(writer, "@    title \"{}\"", header.title)?;
    writeln!(writer, "@    xaxis label \"{}\"", header.x_label)?;
    writeln!(writer, "@    yaxis label \"{}\"", header.y_label)?;
    writeln!(writer, "@type xy")?;
    for (index, value) in values.iter().enumerate() {
        writeln!(writer, "{}\t{:.decimals$}", index + 1, value)?;
    }
    Ok(())
}

/// Path-based variant of [`write_table`].
pub fn write_table_to_path<P: AsRef<Path>>(
    path: P,
    header: &XvgHeader,
    values: &[f64],
    decimals: usize,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer, header, values, decimals)?;
    writer.flush()
}
