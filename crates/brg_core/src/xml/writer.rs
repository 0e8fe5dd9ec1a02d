//! Serialize element trees and write them to disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::element::Element;
use super::indent::indent;

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Serialize a tree with an XML declaration.
///
/// Whitespace is written exactly as stored; call [`indent`] first for a
/// pretty layout. Elements with neither text nor children are written
/// self-closing.
pub fn to_xml_string(root: &Element) -> String {
    let mut xml = String::from(DECLARATION);
    write_element(root, &mut xml);
    xml
}

fn write_element(elem: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&elem.tag);
    for (name, value) in &elem.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    let text = elem.text.as_deref().unwrap_or_default();
    if text.is_empty() && elem.children.is_empty() {
        out.push_str(" />");
    } else {
        out.push('>');
        out.push_str(&escape_text(text));
        for child in &elem.children {
            write_element(child, out);
        }
        out.push_str("</");
        out.push_str(&elem.tag);
        out.push('>');
    }

    if let Some(tail) = &elem.tail {
        out.push_str(&escape_text(tail));
    }
}

/// Indent a tree, then write it to `path`.
///
/// The document is written to a temp file beside the target and renamed
/// into place, so a failed write never leaves a truncated document.
pub fn write_document(root: &mut Element, path: &Path) -> io::Result<()> {
    indent(root);
    let xml = to_xml_string(root);
    atomic_write(path, xml.as_bytes())
}

fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    let written = fs::File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
        .replace('\t', "&#09;")
}
