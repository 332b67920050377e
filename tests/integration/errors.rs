//! Failures anywhere in a chain abort the whole resolution.

use anyhow::Result;
use sfc_inherit::test_utils::ComponentTree;
use sfc_inherit::{FsLoader, InheritError, InheritanceResolver, ResolveOptions};
use std::sync::Arc;

fn resolver() -> InheritanceResolver<FsLoader> {
    InheritanceResolver::new(Arc::new(ResolveOptions::default()), FsLoader)
}

#[tokio::test]
async fn test_missing_ancestor_reports_path() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Root.vue", "<template extends=\"./Gone.vue\"></template>")?;
    let leaf = tree.write("Leaf.vue", "<template extends=\"./Root.vue\"></template>")?;

    let err = resolver().resolve_component_file(&leaf).await.unwrap_err();
    match err {
        InheritError::Io(file_error) => {
            assert_eq!(file_error.file_path, tree.path().join("Gone.vue"));
            assert_eq!(file_error.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_duplicate_extension_blocks() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Base.vue", "<template><extension-point name=\"a\"/></template>")?;
    let child = tree.write(
        "Child.vue",
        "<template extends=\"./Base.vue\"><extensions><extension point=\"a\">1</extension><extension point=\"a\">2</extension></extensions></template>",
    )?;

    let err = resolver().resolve_component_file(&child).await.unwrap_err();
    assert!(matches!(err, InheritError::DuplicateExtension { point, .. } if point == "a"));
    Ok(())
}

#[tokio::test]
async fn test_circular_chain() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("A.vue", "<template extends=\"./B.vue\"></template>")?;
    tree.write("B.vue", "<template extends=\"./C.vue\"></template>")?;
    tree.write("C.vue", "<template extends=\"./B.vue\"></template>")?;

    let err = resolver().resolve_component_file(&tree.path().join("A.vue")).await.unwrap_err();
    match err {
        InheritError::CircularInheritance {
            chain,
        } => {
            assert!(chain.ends_with("B.vue"));
            assert_eq!(chain.matches(" -> ").count(), 3);
        }
        other => panic!("expected CircularInheritance, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_self_reference_through_inline_source() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Loop.vue", "<template extends=\"./Loop.vue\"></template>")?;

    let err = resolver()
        .resolve("<template extends=\"./Loop.vue\"></template>", tree.path())
        .await
        .unwrap_err();
    assert!(matches!(err, InheritError::CircularInheritance { .. }));
    Ok(())
}

#[tokio::test]
async fn test_malformed_ancestor_is_parse_error() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Base.vue", "<template><div><!-- unterminated</template>")?;
    let child = tree.write("Child.vue", "<template extends=\"./Base.vue\"></template>")?;

    let err = resolver().resolve_component_file(&child).await.unwrap_err();
    match err {
        InheritError::Parse {
            file,
            ..
        } => assert!(file.ends_with("Base.vue")),
        other => panic!("expected Parse error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_empty_extends_is_invalid_reference() -> Result<()> {
    let tree = ComponentTree::new()?;
    let child = tree.write("Child.vue", "<template extends=\"\"></template>")?;

    let err = resolver().resolve_component_file(&child).await.unwrap_err();
    assert!(matches!(err, InheritError::InvalidReference { .. }));
    Ok(())
}
