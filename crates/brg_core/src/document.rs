//! Output document preparation.
//!
//! Decides which tree new blocks go into and where it will be written:
//! a fresh document, an existing `ProjectData` document with its old
//! blocks removed, or a fresh document redirected to a timestamped file
//! when the existing one cannot be reused.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::PipelineSettings;
use crate::error::{BlockGenError, Result};
use crate::models::{MalformedDocumentPolicy, SchemaMode};
use crate::xml::{parse_document, Element};

/// Tag of the collection element inside a `ProjectData` document.
pub const BLOCKS_TAG: &str = "blocks";
/// Tag of one block element.
pub const BLOCK_TAG: &str = "Block";

/// How the prepared document came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOrigin {
    /// No usable file existed; a new document was created.
    Fresh,
    /// An existing document was reused after removing its old blocks.
    Merged { removed_blocks: usize },
    /// The existing document could not be reused and was left untouched.
    /// Output goes to a new timestamped path instead.
    Redirected { original: PathBuf },
}

/// A document ready to receive blocks.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub root: Element,
    /// Where the finished document will be written.
    pub output_path: PathBuf,
    pub origin: DocumentOrigin,
    schema: SchemaMode,
}

impl PreparedDocument {
    fn fresh(schema: SchemaMode, output_path: PathBuf, origin: DocumentOrigin) -> Self {
        let mut root = Element::new(schema.root_tag());
        if schema == SchemaMode::ProjectData {
            root.append_child(Element::new(BLOCKS_TAG));
        }
        Self {
            root,
            output_path,
            origin,
            schema,
        }
    }

    /// The element new blocks are appended to.
    ///
    /// For `ProjectData` documents this is the `blocks` child, created if
    /// it went missing; in the legacy layout it is the root itself.
    pub fn blocks_container_mut(&mut self) -> &mut Element {
        match self.schema {
            SchemaMode::LegacyRoot => &mut self.root,
            SchemaMode::ProjectData => blocks_container(&mut self.root),
        }
    }

    /// Append a block element, keeping insertion order.
    pub fn push_block(&mut self, block: Element) {
        self.blocks_container_mut().append_child(block);
    }

    /// Number of block elements currently in the container.
    pub fn block_count(&self) -> usize {
        let container = match self.schema {
            SchemaMode::LegacyRoot => Some(&self.root),
            SchemaMode::ProjectData => self.root.find_child(BLOCKS_TAG),
        };
        container.map_or(0, |c| c.children_named(BLOCK_TAG).count())
    }
}

fn blocks_container(root: &mut Element) -> &mut Element {
    match root.children.iter().position(|c| c.is_named(BLOCKS_TAG)) {
        Some(idx) => &mut root.children[idx],
        None => root.append_child(Element::new(BLOCKS_TAG)),
    }
}

/// Prepare the output document for `output_path`.
pub fn prepare_document(output_path: &Path, settings: &PipelineSettings) -> Result<PreparedDocument> {
    prepare_document_at(output_path, settings, Local::now())
}

/// Prepare the output document using `now` for any redirect filename.
pub fn prepare_document_at(
    output_path: &Path,
    settings: &PipelineSettings,
    now: DateTime<Local>,
) -> Result<PreparedDocument> {
    let schema = settings.schema;

    if schema == SchemaMode::LegacyRoot || !output_path.exists() {
        return Ok(PreparedDocument::fresh(
            schema,
            output_path.to_path_buf(),
            DocumentOrigin::Fresh,
        ));
    }

    let content =
        fs::read_to_string(output_path).map_err(|e| BlockGenError::read(output_path, e))?;

    let mut root = match parse_document(&content) {
        Ok(root) => root,
        Err(message) => match settings.malformed_document {
            MalformedDocumentPolicy::Abort => {
                return Err(BlockGenError::MalformedDocument {
                    path: output_path.to_path_buf(),
                    message,
                });
            }
            MalformedDocumentPolicy::Redirect => {
                tracing::warn!(
                    "'{}' is not well-formed XML ({}). A new XML file will be created.",
                    output_path.display(),
                    message
                );
                return Ok(redirect(schema, output_path, now));
            }
        },
    };

    // A root in any namespace, default or prefixed, is not ours.
    if !root.is_named(schema.root_tag()) {
        tracing::warn!(
            "The root tag of '{}' is invalid. A new XML file will be created.",
            output_path.display()
        );
        return Ok(redirect(schema, output_path, now));
    }

    let removed_blocks = blocks_container(&mut root).remove_children_matching(BLOCK_TAG);
    tracing::debug!(
        "Reusing '{}', removed {} existing blocks",
        output_path.display(),
        removed_blocks
    );

    Ok(PreparedDocument {
        root,
        output_path: output_path.to_path_buf(),
        origin: DocumentOrigin::Merged { removed_blocks },
        schema,
    })
}

fn redirect(schema: SchemaMode, original: &Path, now: DateTime<Local>) -> PreparedDocument {
    let redirected = fallback_path(original, now);
    tracing::info!("Writing to '{}' instead", redirected.display());
    PreparedDocument::fresh(
        schema,
        redirected,
        DocumentOrigin::Redirected {
            original: original.to_path_buf(),
        },
    )
}

/// `output-YYYYmmdd-HHMMSS.xml` in the same directory as `original`.
pub fn fallback_path(original: &Path, now: DateTime<Local>) -> PathBuf {
    let name = format!("output-{}.xml", now.format("%Y%m%d-%H%M%S"));
    match original.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn settings() -> PipelineSettings {
        PipelineSettings::default()
    }

    #[test]
    fn missing_file_gives_fresh_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");

        let mut doc = prepare_document(&path, &settings()).unwrap();
        assert_eq!(doc.origin, DocumentOrigin::Fresh);
        assert_eq!(doc.output_path, path);
        assert_eq!(doc.root.tag, "ProjectData");
        assert_eq!(doc.blocks_container_mut().tag, BLOCKS_TAG);
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn existing_blocks_are_removed_and_siblings_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");
        fs::write(
            &path,
            "<ProjectData><settings>keep</settings><blocks>\
             <Block><id>old-1</id></Block><marker>m</marker><Block><id>old-2</id></Block>\
             </blocks></ProjectData>",
        )
        .unwrap();

        let mut doc = prepare_document(&path, &settings()).unwrap();
        assert_eq!(doc.origin, DocumentOrigin::Merged { removed_blocks: 2 });
        assert_eq!(doc.output_path, path);
        assert_eq!(doc.root.child_text("settings"), Some("keep"));

        let container = doc.blocks_container_mut();
        assert_eq!(container.children.len(), 1);
        assert_eq!(container.children[0].tag, "marker");
    }

    #[test]
    fn missing_blocks_child_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");
        fs::write(&path, "<ProjectData><meta/></ProjectData>").unwrap();

        let mut doc = prepare_document(&path, &settings()).unwrap();
        assert_eq!(doc.origin, DocumentOrigin::Merged { removed_blocks: 0 });
        doc.push_block(Element::new(BLOCK_TAG));
        assert_eq!(doc.root.children.len(), 2);
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn wrong_root_redirects_and_leaves_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");
        let original = "<Session><blocks/></Session>";
        fs::write(&path, original).unwrap();

        let doc = prepare_document_at(&path, &settings(), fixed_now()).unwrap();
        assert_eq!(
            doc.output_path,
            dir.path().join("output-20240309-140507.xml")
        );
        assert_eq!(
            doc.origin,
            DocumentOrigin::Redirected {
                original: path.clone()
            }
        );
        assert_eq!(doc.root.tag, "ProjectData");
        assert_eq!(doc.block_count(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn namespaced_root_redirects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");
        let original = r#"<ProjectData xmlns="urn:other"><blocks/></ProjectData>"#;
        fs::write(&path, original).unwrap();

        let doc = prepare_document_at(&path, &settings(), fixed_now()).unwrap();
        assert_eq!(
            doc.origin,
            DocumentOrigin::Redirected {
                original: path.clone()
            }
        );
        assert_eq!(
            doc.output_path,
            dir.path().join("output-20240309-140507.xml")
        );
        assert_eq!(doc.root.namespace, None);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn foreign_blocks_survive_merge() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");
        fs::write(
            &path,
            r#"<ProjectData><blocks><Block/><ext:Block xmlns:ext="urn:ext">keep</ext:Block></blocks></ProjectData>"#,
        )
        .unwrap();

        let mut doc = prepare_document(&path, &settings()).unwrap();
        assert_eq!(doc.origin, DocumentOrigin::Merged { removed_blocks: 1 });
        assert_eq!(doc.block_count(), 0);

        let container = doc.blocks_container_mut();
        assert_eq!(container.children.len(), 1);
        assert_eq!(container.children[0].tag, "ext:Block");
        assert_eq!(container.children[0].text.as_deref(), Some("keep"));
    }

    #[test]
    fn malformed_document_aborts_by_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");
        fs::write(&path, "<ProjectData><blocks>").unwrap();

        let err = prepare_document(&path, &settings()).unwrap_err();
        assert!(matches!(err, BlockGenError::MalformedDocument { .. }));
    }

    #[test]
    fn malformed_document_can_redirect() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");
        fs::write(&path, "<ProjectData><blocks>").unwrap();

        let settings = PipelineSettings {
            malformed_document: MalformedDocumentPolicy::Redirect,
            ..PipelineSettings::default()
        };
        let doc = prepare_document_at(&path, &settings, fixed_now()).unwrap();
        assert!(matches!(doc.origin, DocumentOrigin::Redirected { .. }));
        assert_eq!(
            doc.output_path,
            dir.path().join("output-20240309-140507.xml")
        );
    }

    #[test]
    fn legacy_schema_never_merges() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.xml");
        fs::write(&path, "not even xml").unwrap();

        let settings = PipelineSettings {
            schema: SchemaMode::LegacyRoot,
            ..PipelineSettings::default()
        };
        let mut doc = prepare_document(&path, &settings).unwrap();
        assert_eq!(doc.origin, DocumentOrigin::Fresh);
        assert_eq!(doc.root.tag, "Root");
        assert!(doc.root.children.is_empty());

        doc.push_block(Element::new(BLOCK_TAG));
        assert_eq!(doc.root.children[0].tag, BLOCK_TAG);
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn fallback_path_without_parent() {
        assert_eq!(
            fallback_path(Path::new("output.xml"), fixed_now()),
            PathBuf::from("output-20240309-140507.xml")
        );
    }
}
