//! XML record source.
//!
//! The export is a document with a `data` root element holding a sequence
//! of `post` elements; each `post` is one raw record whose child elements
//! are fields. A field value may be literal text or a CDATA section;
//! CDATA takes precedence when both are structurally present.
//!
//! Unlike the CSV side, structural problems here are fatal for the whole
//! flow: an export missing its `data` root or containing zero `post`
//! elements yields [`Blog2MdError::MalformedXml`] rather than an empty
//! record list, because an empty result would be indistinguishable from
//! "no posts".

use crate::error::Blog2MdError;
use crate::pipeline::input::SourceFormat;
use crate::pipeline::source::RawRecord;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// Root element expected at the top of the export.
const ROOT_ELEMENT: &str = "data";
/// Element holding one record.
const RECORD_ELEMENT: &str = "post";

/// Parse XML export text into raw records, one per `post` element.
pub fn parse(text: &str) -> Result<Vec<RawRecord>, Blog2MdError> {
    let mut reader = Reader::from_str(text);

    expect_root(&mut reader)?;

    let mut records = Vec::new();
    loop {
        match reader.read_event().map_err(syntax_error)? {
            Event::Start(e) => {
                let name = element_name(e.name().as_ref());
                if name == RECORD_ELEMENT {
                    records.push(read_post(&mut reader)?);
                } else {
                    // Tolerate unknown siblings of <post> (export tools add
                    // summary blocks); skip the whole subtree.
                    skip_subtree(&mut reader, &name)?;
                }
            }
            // A self-closing <post/> is a record with no fields at all.
            Event::Empty(e) if element_name(e.name().as_ref()) == RECORD_ELEMENT => {
                records.push(RawRecord::new(SourceFormat::Xml));
            }
            Event::Empty(_) | Event::Text(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::End(_) => break, // </data>
            Event::Eof => {
                return Err(Blog2MdError::MalformedXml {
                    detail: format!("unexpected end of document inside <{ROOT_ELEMENT}>"),
                })
            }
            _ => {}
        }
    }

    if records.is_empty() {
        return Err(Blog2MdError::MalformedXml {
            detail: format!("no <{RECORD_ELEMENT}> elements under the <{ROOT_ELEMENT}> root"),
        });
    }

    debug!("Parsed {} posts from XML export", records.len());
    Ok(records)
}

/// Consume prologue events and verify the root element is `<data>`.
fn expect_root(reader: &mut Reader<&[u8]>) -> Result<(), Blog2MdError> {
    loop {
        match reader.read_event().map_err(syntax_error)? {
            Event::Start(e) => {
                let name = element_name(e.name().as_ref());
                if name == ROOT_ELEMENT {
                    return Ok(());
                }
                return Err(Blog2MdError::MalformedXml {
                    detail: format!("expected <{ROOT_ELEMENT}> root, found <{name}>"),
                });
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Text(t) if t.iter().all(|b| b.is_ascii_whitespace()) => {}
            Event::Eof => {
                return Err(Blog2MdError::MalformedXml {
                    detail: format!("document has no <{ROOT_ELEMENT}> root element"),
                })
            }
            other => {
                return Err(Blog2MdError::MalformedXml {
                    detail: format!("unexpected content before <{ROOT_ELEMENT}> root: {other:?}"),
                })
            }
        }
    }
}

/// Read the children of one `<post>` element into a raw record.
fn read_post(reader: &mut Reader<&[u8]>) -> Result<RawRecord, Blog2MdError> {
    let mut rec = RawRecord::new(SourceFormat::Xml);
    loop {
        match reader.read_event().map_err(syntax_error)? {
            Event::Start(e) => {
                let name = element_name(e.name().as_ref());
                let value = read_field_value(reader, &name)?;
                rec.fields.push((name, value));
            }
            // Self-closing field, e.g. <Tags/>: present with an empty value.
            Event::Empty(e) => {
                let name = element_name(e.name().as_ref());
                rec.fields.push((name, String::new()));
            }
            Event::Text(_) | Event::Comment(_) | Event::CData(_) => {}
            Event::End(_) => return Ok(rec), // </post>
            Event::Eof => {
                return Err(Blog2MdError::MalformedXml {
                    detail: format!("unexpected end of document inside <{RECORD_ELEMENT}>"),
                })
            }
            _ => {}
        }
    }
}

/// Read the content of one field element until its matching end tag.
///
/// Literal text and CDATA sections are accumulated separately; CDATA wins
/// when both are present, otherwise whichever is present is the value.
fn read_field_value(reader: &mut Reader<&[u8]>, field: &str) -> Result<String, Blog2MdError> {
    let mut text = String::new();
    let mut cdata: Option<String> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event().map_err(syntax_error)? {
            Event::Text(t) => {
                let piece = t.unescape().map_err(syntax_error)?;
                text.push_str(&piece);
            }
            Event::CData(c) => {
                let piece = String::from_utf8_lossy(&c.into_inner()).into_owned();
                cdata.get_or_insert_with(String::new).push_str(&piece);
            }
            Event::Start(_) => depth += 1,
            Event::Empty(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::End(_) => {
                if depth == 0 {
                    return Ok(cdata.unwrap_or(text));
                }
                depth -= 1;
            }
            Event::Eof => {
                return Err(Blog2MdError::MalformedXml {
                    detail: format!("unexpected end of document inside <{field}>"),
                })
            }
            _ => {}
        }
    }
}

/// Skip a whole element subtree, matching nested tags of any name.
fn skip_subtree(reader: &mut Reader<&[u8]>, element: &str) -> Result<(), Blog2MdError> {
    let mut depth = 0usize;
    loop {
        match reader.read_event().map_err(syntax_error)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Event::Eof => {
                return Err(Blog2MdError::MalformedXml {
                    detail: format!("unexpected end of document inside <{element}>"),
                })
            }
            _ => {}
        }
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn syntax_error(e: impl std::fmt::Display) -> Blog2MdError {
    Blog2MdError::MalformedXml {
        detail: e.to_string(),
    }
}
