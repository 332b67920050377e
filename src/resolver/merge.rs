//! Structural template merging.
//!
//! A derived component fills its base's extension points by declaring
//! extension blocks inside an `extensions` container:
//!
//! ```text
//! <!-- Base.vue -->                     <!-- Child.vue -->
//! <template>                            <template extends="./Base.vue">
//!   <header>                              <extensions>
//!     <extension-point name="title">        <extension point="title">
//!       Default title                         <h1>Child title</h1>
//!     </extension-point>                    </extension>
//!   </header>                             </extensions>
//! </template>                           </template>
//! ```
//!
//! Merging happens on parsed trees, never on text. A filled point takes the
//! block's children and is retagged to the container tag; an unfilled point
//! is left untouched so a further descendant, or the finalizer, can deal with
//! it.

use std::collections::{HashMap, HashSet};

use crate::config::Vocabulary;
use crate::core::{InheritError, Result};
use crate::markup::{Element, Node, find_all_by_tag_name, for_each_by_tag_name_mut};
use crate::markup::{parse_markup, serialize_nodes};
use crate::sfc::{
    ComponentDescriptor, Section, block_to_markup, descriptor_to_non_template_markup,
    split_into_sections,
};

/// Extension block contents keyed by the point they target.
pub type ExtensionBlocks = HashMap<String, Vec<Node>>;

/// Collect the extension blocks declared in a derived component's template.
///
/// Blocks are the direct children of every extensions container, in document
/// order. A block without a point reference is discarded.
///
/// # Errors
///
/// [`InheritError::DuplicateExtension`] when two blocks target the same point.
pub fn collect_extension_blocks(
    nodes: &[Node],
    vocab: &Vocabulary,
    origin: &str,
) -> Result<ExtensionBlocks> {
    let mut blocks = ExtensionBlocks::new();

    for container in find_all_by_tag_name(nodes, &vocab.extensions_tag) {
        let declared = container
            .children
            .iter()
            .filter_map(Node::as_element)
            .filter(|el| el.name == vocab.extension_tag);

        for block in declared {
            let Some(point) = block.attrs.get(&vocab.point_ref_attr).filter(|p| !p.is_empty())
            else {
                tracing::warn!(
                    "Discarding <{}> in {origin}: missing '{}' attribute",
                    vocab.extension_tag,
                    vocab.point_ref_attr
                );
                continue;
            };
            if blocks.contains_key(point) {
                return Err(InheritError::DuplicateExtension {
                    point: point.to_string(),
                    file: origin.to_string(),
                });
            }
            blocks.insert(point.to_string(), block.children.clone());
        }
    }

    Ok(blocks)
}

/// Splice extension blocks into the matching extension points of `nodes`.
///
/// Returns the names of the points that were filled. Points with no block stay
/// open, and extension points introduced by a block's own content are left
/// open for the next level down.
pub fn fill_extension_points(
    nodes: &mut [Node],
    blocks: &ExtensionBlocks,
    vocab: &Vocabulary,
) -> Vec<String> {
    let mut filled = Vec::new();

    for_each_by_tag_name_mut(nodes, &vocab.extension_point_tag, &mut |point| {
        let Some(name) = point.attrs.get(&vocab.point_name_attr).map(str::to_string) else {
            return true;
        };
        match blocks.get(&name) {
            Some(children) => {
                tracing::debug!("Filling extension point '{name}'");
                point.children = children.clone();
                close_point(point, vocab);
                filled.push(name);
                false
            }
            None => {
                tracing::debug!("Extension point '{name}' left open");
                true
            }
        }
    });

    filled
}

/// Retag every remaining extension point so its default content renders.
///
/// Returns the number of points rewritten.
pub fn retag_open_points(nodes: &mut [Node], vocab: &Vocabulary) -> usize {
    let mut count = 0;
    for_each_by_tag_name_mut(nodes, &vocab.extension_point_tag, &mut |point| {
        tracing::trace!(
            "Finalizing open extension point '{}'",
            point.attrs.get(&vocab.point_name_attr).unwrap_or_default()
        );
        close_point(point, vocab);
        count += 1;
        true
    });
    count
}

fn close_point(point: &mut Element, vocab: &Vocabulary) {
    point.retag(&vocab.container_tag);
    point.attrs.remove(&vocab.point_name_attr);
    point.self_closing = false;
}

/// Merge a derived component onto its fully resolved base.
///
/// The result's template is the base template with the current component's
/// extension blocks spliced in, marked extendable; every other section comes
/// from the current component.
///
/// # Errors
///
/// [`InheritError::Parse`] when either template cannot be parsed or the base
/// has no template, and [`InheritError::DuplicateExtension`] from
/// [`collect_extension_blocks`].
pub fn merge_component(
    base_source: &str,
    base_origin: &str,
    current: &ComponentDescriptor,
    current_origin: &str,
    vocab: &Vocabulary,
) -> Result<String> {
    let base = split_into_sections(base_source, base_origin)?;
    let base_template = base.template.ok_or_else(|| InheritError::Parse {
        file: base_origin.to_string(),
        reason: "base component has no <template> section".to_string(),
    })?;

    let mut base_tree = parse_template(&base_template.content, base_origin)?;
    let current_tree = match &current.template {
        Some(template) => parse_template(&template.content, current_origin)?,
        None => Vec::new(),
    };

    let blocks = collect_extension_blocks(&current_tree, vocab, current_origin)?;
    let filled: HashSet<String> =
        fill_extension_points(&mut base_tree, &blocks, vocab).into_iter().collect();
    for point in blocks.keys().filter(|point| !filled.contains(*point)) {
        tracing::warn!(
            "Discarding extension for '{point}' in {current_origin}: {base_origin} has no such extension point"
        );
    }

    let mut attrs = base_template.attrs;
    attrs.remove(&vocab.extends_attr);
    attrs.insert(vocab.extendable_attr.as_str(), None);

    let template = Section {
        kind: base_template.kind,
        attrs,
        content: serialize_nodes(&base_tree),
    };
    Ok(assemble_component(&template, current, vocab))
}

/// Template followed by the descriptor's non-template sections, newline
/// separated with a trailing newline.
pub(crate) fn assemble_component(
    template: &Section,
    descriptor: &ComponentDescriptor,
    vocab: &Vocabulary,
) -> String {
    let rest = non_template_markup(descriptor, vocab);
    let mut out = block_to_markup(Some(template));
    out.push('\n');
    if !rest.is_empty() {
        out.push_str(&rest);
        out.push('\n');
    }
    out
}

/// Non-template sections of `descriptor`. Extension blocks and extensions
/// containers only take effect inside a template, so top-level ones are
/// dropped.
pub(crate) fn non_template_markup(descriptor: &ComponentDescriptor, vocab: &Vocabulary) -> String {
    let skipped = [vocab.extension_tag.as_str(), vocab.extensions_tag.as_str()];
    for block in descriptor.custom_blocks.iter().filter(|b| skipped.contains(&b.kind.as_str())) {
        tracing::warn!(
            "Discarding top-level <{}> block: extension blocks must be declared inside <{}>",
            block.kind,
            vocab.extensions_tag
        );
    }
    descriptor_to_non_template_markup(descriptor, &skipped)
}

pub(crate) fn parse_template(content: &str, origin: &str) -> Result<Vec<Node>> {
    parse_markup(content).map_err(|e| InheritError::Parse {
        file: origin.to_string(),
        reason: format!("template markup: {e}"),
    })
}
