//! CSV export of output rows.
//!
//! Header line as-is, then one line per row with every field wrapped in
//! double quotes, `\n` terminated.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportResult;
use crate::models::OutputRows;

/// Default file name for downloads.
pub const EXPORT_FILE_NAME: &str = "analysis_result.csv";

pub(crate) fn write_csv<H, R>(headers: &[H], records: &[R]) -> ExportResult<String>
where
    H: AsRef<[u8]>,
    R: AsRef<[String]>,
{
    let mut out = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut out);
        writer.write_record(headers)?;
        writer.flush()?;
    }
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut out);
        for record in records {
            writer.write_record(record.as_ref())?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(out)?)
}

/// Render output rows as CSV text.
pub fn export_csv(rows: &OutputRows) -> ExportResult<String> {
    write_csv(rows.headers(), &rows.records())
}
