//! Final pass over a merged component.
//!
//! After the last merge the template may still hold extension points nobody
//! filled. Finalization turns each of them into a plain container so its
//! default content renders, drops the extendable marker, and removes the
//! empty `//` padding lines section splitters leave at the top of a script.
//! The output carries no inheritance markup, so finalizing it again changes
//! nothing.

use crate::config::Vocabulary;
use crate::core::Result;
use crate::markup::serialize_nodes;
use crate::resolver::merge::{
    assemble_component, non_template_markup, parse_template, retag_open_points,
};
use crate::sfc::split_into_sections;

const MERGED_ORIGIN: &str = "<merged>";

/// Produce the final component source from merged output.
///
/// A source whose template is not marked extendable and whose script has no
/// padding is returned as is.
///
/// # Errors
///
/// [`InheritError::Parse`](crate::core::InheritError::Parse) if the merged
/// source or its template cannot be parsed.
pub fn finalize(merged_source: &str, vocab: &Vocabulary) -> Result<String> {
    let mut descriptor = split_into_sections(merged_source, MERGED_ORIGIN)?;

    let mut stripped = false;
    if let Some(script) = descriptor.script.as_mut()
        && let Some(content) = strip_comment_padding(&script.content)
    {
        tracing::trace!("Stripped comment padding from merged script");
        script.content = content;
        stripped = true;
    }

    let extendable =
        descriptor.template.as_ref().is_some_and(|t| t.attrs.contains(&vocab.extendable_attr));
    if !extendable && !stripped {
        return Ok(merged_source.to_string());
    }

    let Some(mut template) = descriptor.template.take() else {
        let mut out = non_template_markup(&descriptor, vocab);
        out.push('\n');
        return Ok(out);
    };

    if extendable {
        let mut tree = parse_template(&template.content, MERGED_ORIGIN)?;
        let open = retag_open_points(&mut tree, vocab);
        tracing::debug!("Finalized {open} open extension point(s)");
        template.content = serialize_nodes(&tree);
        template.attrs.remove(&vocab.extendable_attr);
    }

    Ok(assemble_component(&template, &descriptor, vocab))
}

/// Script content with leading `//` padding lines removed, keeping the
/// newline that follows `<script>`. `None` if there was nothing to strip.
fn strip_comment_padding(content: &str) -> Option<String> {
    let lead = if content.starts_with("\r\n") {
        2
    } else if content.starts_with('\n') {
        1
    } else {
        0
    };

    let mut rest = &content[lead..];
    let mut stripped = false;
    while let Some(end) = rest.find('\n') {
        if rest[..end].trim() != "//" {
            break;
        }
        rest = &rest[end + 1..];
        stripped = true;
    }

    stripped.then(|| format!("{}{rest}", &content[..lead]))
}
