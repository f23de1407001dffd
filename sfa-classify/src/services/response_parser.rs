//! Classify XML response parser
//!
//! Only three places in the document matter:
//! - `classify/response/@code`: overall status
//! - `classify/recommendations/lcc/mostRecent/@sfa`: call-number fragment
//! - `classify/works/work/@owi` and `@wi`: candidate works
//!
//! Element names are compared by local name, so the service's default
//! namespace (or any prefix) is ignored.

use crate::error::{ClassifyError, ClassifyResult};
use crate::types::{ClassificationResponse, ResponseStatus, WorkCandidate};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const ROOT: &str = "classify";
const STATUS_PATH: &[&str] = &["classify", "response"];
const SFA_PATH: &[&str] = &["classify", "recommendations", "lcc", "mostRecent"];
const WORK_PATH: &[&str] = &["classify", "works", "work"];

/// Parse a classify response body
///
/// Fails when the document is malformed, the root element is not
/// `classify`, or the status code is missing.
pub fn parse_response(body: &str) -> ClassifyResult<ClassificationResponse> {
    let mut reader = Reader::from_str(body);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut saw_root = false;
    let mut code: Option<String> = None;
    let mut sfa: Option<String> = None;
    let mut works = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ClassifyError::Parse(format!("malformed XML: {}", e)))?;

        match event {
            Event::Start(ref e) => {
                path.push(local_name(e));
                check_root(&path, &mut saw_root)?;
                visit(e, &path, &mut code, &mut sfa, &mut works)?;
            }
            Event::Empty(ref e) => {
                path.push(local_name(e));
                check_root(&path, &mut saw_root)?;
                visit(e, &path, &mut code, &mut sfa, &mut works)?;
                path.pop();
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Eof => {
                if !path.is_empty() {
                    return Err(ClassifyError::Parse(format!(
                        "truncated document inside <{}>",
                        path.join("/")
                    )));
                }
                break;
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err(ClassifyError::Parse("empty document".to_string()));
    }

    let code = code.ok_or_else(|| ClassifyError::Parse("missing response code".to_string()))?;

    Ok(ClassificationResponse {
        status: ResponseStatus::from_code(&code),
        works,
        sfa: sfa.filter(|s| !s.trim().is_empty()),
    })
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn check_root(path: &[String], saw_root: &mut bool) -> ClassifyResult<()> {
    if path.len() == 1 {
        if path[0] != ROOT {
            return Err(ClassifyError::Parse(format!(
                "unexpected root element <{}>",
                path[0]
            )));
        }
        *saw_root = true;
    }
    Ok(())
}

fn visit(
    e: &BytesStart<'_>,
    path: &[String],
    code: &mut Option<String>,
    sfa: &mut Option<String>,
    works: &mut Vec<WorkCandidate>,
) -> ClassifyResult<()> {
    if path_is(path, STATUS_PATH) {
        if code.is_none() {
            *code = attribute(e, "code")?;
        }
    } else if path_is(path, SFA_PATH) {
        if sfa.is_none() {
            *sfa = attribute(e, "sfa")?;
        }
    } else if path_is(path, WORK_PATH) {
        works.push(WorkCandidate {
            owi: attribute(e, "owi")?.unwrap_or_default(),
            wi: attribute(e, "wi")?.unwrap_or_default(),
        });
    }
    Ok(())
}

fn path_is(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

fn attribute(e: &BytesStart<'_>, name: &str) -> ClassifyResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ClassifyError::Parse(format!("bad attribute: {}", e)))?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|e| ClassifyError::Parse(format!("bad attribute value: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
