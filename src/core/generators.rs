use crate::domain::model::{DirectoryRecord, OutputFormat};
use crate::utils::error::{DirectoryError, Result};
use csv::{QuoteStyle, Writer, WriterBuilder};

const CISCO_TITLE: &str = "Hamvoip Directory";
const CISCO_PROMPT: &str = "Please select number to dial…";
const FANVIL_RING: &str = "Default";

/// Render one output file. Pure: the same records always give the same bytes.
pub fn render(format: OutputFormat, records: &[DirectoryRecord]) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Users => users_csv(records),
        OutputFormat::Cisco => Ok(cisco_xml(records).into_bytes()),
        OutputFormat::Yealink => yealink_csv(records),
        OutputFormat::Fanvil => fanvil_csv(records),
        OutputFormat::Other => other_csv(records),
        OutputFormat::Dapnet => dapnet_csv(records),
    }
}

fn sorted<'a>(records: impl Iterator<Item = &'a DirectoryRecord>) -> Vec<&'a DirectoryRecord> {
    let mut rows: Vec<_> = records.collect();
    rows.sort_by_key(|r| r.extension_number());
    rows
}

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| DirectoryError::IoError(e.into_error()))
}

fn record_csv(rows: Vec<&DirectoryRecord>) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["extension", "callsign", "name"])?;
    for row in rows {
        writer.serialize(row)?;
    }
    finish(writer)
}

pub fn users_csv(records: &[DirectoryRecord]) -> Result<Vec<u8>> {
    record_csv(sorted(records.iter().filter(|r| r.is_user())))
}

pub fn other_csv(records: &[DirectoryRecord]) -> Result<Vec<u8>> {
    record_csv(sorted(records.iter().filter(|r| r.is_other())))
}

pub fn dapnet_csv(records: &[DirectoryRecord]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["extension", "callsign"])?;
    for row in sorted(records.iter().filter(|r| r.is_user() && r.has_callsign())) {
        writer.write_record([row.extension.as_str(), row.callsign.as_str()])?;
    }
    finish(writer)
}

pub fn yealink_csv(records: &[DirectoryRecord]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record([
        "display_name",
        "office_number",
        "mobile_number",
        "other_number",
        "line",
        "ring",
        "group",
    ])?;
    for row in sorted(records.iter()) {
        let display = row.display_name();
        writer.write_record([display.as_str(), row.extension.as_str(), "", "", "", "", ""])?;
    }
    finish(writer)
}

pub fn fanvil_csv(records: &[DirectoryRecord]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(["name", "work", "mobile", "other", "ring", "groups"])?;
    for row in sorted(records.iter()) {
        let display = row.display_name();
        writer.write_record([display.as_str(), row.extension.as_str(), "", "", FANVIL_RING, ""])?;
    }
    finish(writer)
}

/// Cisco IP phone directory XML, in document order.
pub fn cisco_xml(records: &[DirectoryRecord]) -> String {
    let mut xml = String::from("<CiscoIPPhoneDirectory>\n");
    xml.push_str(&format!("<Title>{}</Title>\n", CISCO_TITLE));
    xml.push_str(&format!("<Prompt>{}</Prompt>\n", CISCO_PROMPT));
    for record in records {
        xml.push_str("<DirectoryEntry>\n");
        xml.push_str(&format!("<Name>{}</Name>\n", escape_xml(&record.display_name())));
        xml.push_str(&format!("<Telephone>{}</Telephone>\n", escape_xml(&record.extension)));
        xml.push_str("</DirectoryEntry>\n");
    }
    xml.push_str("</CiscoIPPhoneDirectory>\n");
    xml
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
