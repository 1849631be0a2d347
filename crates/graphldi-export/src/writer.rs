//! Streaming writer for the interchange document
//!
//! Names handed to the writer must already be escaped (see
//! [`crate::names::NameResolver`]); kinds, property values and the
//! delimiter are escaped here.

use std::io::Write;

use graphldi_core::{Attributes, SOURCE_FILE, SOURCE_LINE, SOURCE_PATH};

use crate::names::escape;

/// Where an element or dependency was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub line: Option<String>,
    pub source_file: Option<String>,
}

impl Location {
    /// Elements carry a source file only.
    pub fn of_node(attributes: &Attributes) -> Self {
        Location {
            line: None,
            source_file: source_file(attributes),
        }
    }

    pub fn of_edge(attributes: &Attributes) -> Self {
        Location {
            line: attributes.text(SOURCE_LINE),
            source_file: source_file(attributes),
        }
    }
}

/// `Source.Path/Source.File`, or `Source.File` alone without a path.
fn source_file(attributes: &Attributes) -> Option<String> {
    let file = attributes.text(SOURCE_FILE)?;
    Some(match attributes.text(SOURCE_PATH) {
        Some(dir) => join_path(&dir, &file),
        None => file,
    })
}

fn join_path(dir: &str, file: &str) -> String {
    if file.starts_with('/') {
        file.to_string()
    } else if dir.ends_with('/') {
        format!("{}{}", dir, file)
    } else {
        format!("{}/{}", dir, file)
    }
}

/// Writes the document front to back. Every opened tag is closed by the
/// matching `end_*`/`finish` call; nothing is ever rewritten.
pub struct DocumentWriter<W: Write> {
    out: W,
    in_element: bool,
}

impl<W: Write> DocumentWriter<W> {
    /// Write the declaration and open the root tag.
    pub fn begin(mut out: W, delimiter: char) -> std::io::Result<Self> {
        writeln!(out, "<?xml version=\"1.0\" ?>")?;
        writeln!(out, "<ldi delimiter=\"{}\">", escape(&delimiter.to_string()))?;
        Ok(DocumentWriter {
            out,
            in_element: false,
        })
    }

    pub fn start_element(
        &mut self,
        name: &str,
        kind: &str,
        location: &Location,
    ) -> std::io::Result<()> {
        debug_assert!(!self.in_element, "element blocks do not nest");
        writeln!(self.out, "    <element")?;
        writeln!(self.out, "        name=\"{}\"", name)?;
        writeln!(self.out, "        type=\"{}\"", escape(kind))?;
        writeln!(self.out, "    >")?;
        self.write_location(location)?;
        self.in_element = true;
        Ok(())
    }

    /// Write one dependency of the open element on `provider`.
    pub fn write_uses(
        &mut self,
        provider: &str,
        kind: &str,
        location: &Location,
    ) -> std::io::Result<()> {
        debug_assert!(self.in_element, "dependencies belong to an element");
        writeln!(self.out, "        <uses")?;
        writeln!(self.out, "            provider=\"{}\"", provider)?;
        writeln!(self.out, "            kind=\"{}\"", escape(kind))?;
        writeln!(self.out, "        >")?;
        self.write_location(location)?;
        writeln!(self.out, "        </uses>")
    }

    pub fn end_element(&mut self) -> std::io::Result<()> {
        debug_assert!(self.in_element, "no element to close");
        self.in_element = false;
        writeln!(self.out, "    </element>")
    }

    /// Close the root tag, flush, and hand back the sink.
    pub fn finish(mut self) -> std::io::Result<W> {
        if self.in_element {
            self.end_element()?;
        }
        writeln!(self.out, "</ldi>")?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_location(&mut self, location: &Location) -> std::io::Result<()> {
        if let Some(line) = &location.line {
            writeln!(
                self.out,
                "            <property name=\"linenumber\">{}</property>",
                escape(line)
            )?;
        }
        if let Some(file) = &location.source_file {
            writeln!(
                self.out,
                "            <property name=\"sourcefile\">{}</property>",
                escape(file)
            )?;
        }
        Ok(())
    }
}
