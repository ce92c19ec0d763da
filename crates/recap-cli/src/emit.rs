use std::io::Write;

use recap_digest::Summary;

/// Write the rendered summary to `out`. Writes nothing for an empty summary.
pub fn emit<W: Write>(summary: &Summary, out: &mut W) -> std::io::Result<()> {
    if summary.is_empty() {
        return Ok(());
    }
    out.write_all(summary.render().as_bytes())?;
    out.flush()
}
