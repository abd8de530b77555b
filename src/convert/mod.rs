//! Conversion between the model and an HTML-shaped view
//!
//! Downcasting renders the model as a [`ViewNode`] tree; upcasting reads a
//! view tree (usually parsed from HTML) back into a model [`Fragment`].

pub mod downcast;
pub mod html;
pub mod upcast;
pub mod view;

pub use downcast::{downcast_document, downcast_table};
pub use upcast::upcast;
pub use view::{ViewElement, ViewNode};

use crate::editor::Editor;
use crate::markup::MarkupError;
use crate::model::Fragment;

/// View tree of the editor's document
pub fn view_of(editor: &Editor) -> Vec<ViewNode> {
    downcast_document(editor.document())
}

/// HTML of the editor's document
pub fn get_html(editor: &Editor) -> String {
    html::stringify(&view_of(editor))
}

/// Parse HTML into a model fragment using the editor's schema
pub fn html_to_fragment(editor: &Editor, source: &str) -> Result<Fragment, MarkupError> {
    let view = html::parse(source)?;
    Ok(upcast(&view, editor.schema()))
}

/// Replace the editor's content with HTML (not undoable)
pub fn set_html(editor: &mut Editor, source: &str) -> Result<(), MarkupError> {
    let fragment = html_to_fragment(editor, source)?;
    editor.set_content(&fragment);
    tracing::debug!("convert: loaded {} top-level nodes from html", fragment.nodes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::table_editor;
    use crate::config::EngineConfig;

    #[test]
    fn test_bare_table_upcast() {
        let mut editor = table_editor(EngineConfig::default());
        set_html(&mut editor, "<table><tbody><tr><td>foo</td></tr></tbody></table>").unwrap();
        assert_eq!(
            editor.get_data(),
            "<table><tableRow><tableCell>foo</tableCell></tableRow></table>"
        );
    }

    #[test]
    fn test_downcast_headings() {
        let mut editor = table_editor(EngineConfig::default());
        editor
            .set_data(
                "<table headingColumns=\"1\" headingRows=\"1\">\
                 <tableRow><tableCell>a</tableCell><tableCell>b</tableCell></tableRow>\
                 <tableRow><tableCell>c</tableCell><tableCell>d</tableCell></tableRow>\
                 </table>",
            )
            .unwrap();
        assert_eq!(
            get_html(&editor),
            "<figure class=\"table\"><table>\
             <thead><tr><th scope=\"row\">a</th><th>b</th></tr></thead>\
             <tbody><tr><th>c</th><td>d</td></tr></tbody>\
             </table></figure>"
        );
    }
}
