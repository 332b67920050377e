//! Merge semantics across single and multi-level inheritance chains.

use anyhow::Result;
use sfc_inherit::finalizer::finalize;
use sfc_inherit::test_utils::{ComponentTree, MemoryLoader, init_test_logging};
use sfc_inherit::{FsLoader, InheritanceResolver, ResolveOptions, Vocabulary, resolve_component};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ROOT: &str = r#"<template>
  <div class="page">
    <header><extension-point name="header"><h1>Default header</h1></extension-point></header>
    <main><extension-point name="content"><p>Default content</p></extension-point></main>
  </div>
</template>

<script>
export default { name: 'Root' }
</script>

<style>
.page { color: black; }
</style>
"#;

const CHILD: &str = r#"<template extends="../layouts/Root.vue">
  <extensions>
    <extension point="content"><p>Child content</p></extension>
  </extensions>
</template>

<script>
export default { name: 'Child' }
</script>
"#;

fn resolver() -> InheritanceResolver<FsLoader> {
    InheritanceResolver::new(Arc::new(ResolveOptions::default()), FsLoader)
}

#[tokio::test]
async fn test_single_level_merge() -> Result<()> {
    init_test_logging(None);
    let tree = ComponentTree::new()?;
    tree.write("layouts/Root.vue", ROOT)?;
    let child = tree.write("views/Child.vue", CHILD)?;

    let resolved = resolver().resolve_component_file(&child).await?;

    assert_eq!(
        resolved.source,
        "<template>\n  <div class=\"page\">\n    <header><template><h1>Default header</h1></template></header>\n    <main><template><p>Child content</p></template></main>\n  </div>\n</template>\n<script>\nexport default { name: 'Child' }\n</script>\n"
    );
    assert_eq!(resolved.ancestor_paths, [tree.path().join("layouts/Root.vue")]);
    Ok(())
}

#[tokio::test]
async fn test_unfilled_points_show_default_content() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("layouts/Root.vue", ROOT)?;
    let child = tree.write(
        "views/Empty.vue",
        "<template extends=\"../layouts/Root.vue\"></template>\n",
    )?;

    let resolved = resolver().resolve_component_file(&child).await?;

    assert!(resolved.source.contains("<template><h1>Default header</h1></template>"));
    assert!(resolved.source.contains("<template><p>Default content</p></template>"));
    assert!(!resolved.source.contains("extension-point"));
    Ok(())
}

#[tokio::test]
async fn test_three_level_chain() -> Result<()> {
    let tree = ComponentTree::new()?;
    let root = tree.write("layouts/Root.vue", ROOT)?;
    let mid = tree.write(
        "layouts/Mid.vue",
        r#"<template extends="./Root.vue">
  <extensions>
    <extension point="header"><nav>Mid nav</nav></extension>
  </extensions>
</template>
"#,
    )?;
    let leaf = tree.write(
        "views/Leaf.vue",
        r#"<template extends="../layouts/Mid.vue">
  <extensions>
    <extension point="content"><article>Leaf article</article></extension>
  </extensions>
</template>
"#,
    )?;

    let resolved = resolver().resolve_component_file(&leaf).await?;

    assert!(resolved.source.contains("<header><template><nav>Mid nav</nav></template></header>"));
    assert!(resolved.source.contains("<main><template><article>Leaf article</article></template></main>"));
    assert!(!resolved.source.contains("Default"));
    assert_eq!(resolved.ancestor_paths, [root, mid]);
    Ok(())
}

#[tokio::test]
async fn test_intermediate_level_can_introduce_points() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Root.vue", ROOT)?;
    tree.write(
        "Mid.vue",
        r#"<template extends="./Root.vue">
  <extensions>
    <extension point="content"><section><extension-point name="body">Mid body</extension-point></section></extension>
  </extensions>
</template>
"#,
    )?;
    let leaf = tree.write(
        "Leaf.vue",
        r#"<template extends="./Mid.vue">
  <extensions>
    <extension point="body">Leaf body</extension>
  </extensions>
</template>
"#,
    )?;

    let resolved = resolver().resolve_component_file(&leaf).await?;
    assert!(resolved.source.contains("<main><template><section><template>Leaf body</template></section></template></main>"));
    Ok(())
}

#[tokio::test]
async fn test_point_filled_by_intermediate_is_closed() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Root.vue", ROOT)?;
    tree.write(
        "Mid.vue",
        "<template extends=\"./Root.vue\"><extensions><extension point=\"content\">Mid</extension></extensions></template>",
    )?;
    let leaf = tree.write(
        "Leaf.vue",
        "<template extends=\"./Mid.vue\"><extensions><extension point=\"content\">Leaf</extension></extensions></template>",
    )?;

    let resolved = resolver().resolve_component_file(&leaf).await?;
    assert!(resolved.source.contains("<main><template>Mid</template></main>"));
    assert!(!resolved.source.contains("Leaf"));
    Ok(())
}

#[tokio::test]
async fn test_non_template_sections_come_from_most_derived() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Root.vue", ROOT)?;
    tree.write(
        "Mid.vue",
        r#"<template extends="./Root.vue"></template>
<docs>Mid docs</docs>
<script>export default { name: 'Mid' }</script>
<style>.mid {}</style>
"#,
    )?;
    let leaf = tree.write(
        "Leaf.vue",
        r#"<template extends="./Mid.vue"></template>
<style scoped>.leaf {}</style>
"#,
    )?;

    let resolved = resolver().resolve_component_file(&leaf).await?;

    assert!(resolved.source.ends_with("</template>\n<style scoped=\"\">.leaf {}</style>\n"));
    for ancestor_only in ["Root'", "Mid'", ".page", ".mid", "Mid docs", "<script>"] {
        assert!(!resolved.source.contains(ancestor_only), "leaked {ancestor_only}");
    }
    Ok(())
}

#[tokio::test]
async fn test_derived_template_markup_outside_extensions_is_dropped() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Root.vue", ROOT)?;
    let child = tree.write(
        "Child.vue",
        "<template extends=\"./Root.vue\"><p>stray</p><extensions></extensions></template>",
    )?;

    let resolved = resolver().resolve_component_file(&child).await?;
    assert!(!resolved.source.contains("stray"));
    assert!(!resolved.source.contains("extensions"));
    Ok(())
}

#[tokio::test]
async fn test_custom_vocabulary_is_erased() -> Result<()> {
    let vocabulary = Vocabulary {
        extension_point_tag: "slot-point".to_string(),
        extensions_tag: "overrides".to_string(),
        extension_tag: "override".to_string(),
        point_name_attr: "id".to_string(),
        point_ref_attr: "for".to_string(),
        extendable_attr: "open".to_string(),
        extends_attr: "inherits".to_string(),
        container_tag: "div".to_string(),
    };
    let options = ResolveOptions {
        vocabulary,
        ..ResolveOptions::default()
    };
    let tree = ComponentTree::new()?;
    tree.write(
        "Base.vue",
        "<template><slot-point id=\"a\">A</slot-point><slot-point id=\"b\">B</slot-point></template>",
    )?;
    let child = tree.write(
        "Child.vue",
        "<template inherits=\"./Base.vue\"><overrides><override for=\"a\">new A</override></overrides></template>",
    )?;

    let resolved = InheritanceResolver::new(Arc::new(options), FsLoader)
        .resolve_component_file(&child)
        .await?;

    assert_eq!(resolved.source, "<template><div>new A</div><div>B</div></template>\n");
    Ok(())
}

#[tokio::test]
async fn test_finalized_output_is_stable() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("layouts/Root.vue", ROOT)?;
    let child = tree.write("views/Child.vue", CHILD)?;

    let resolved = resolver().resolve_component_file(&child).await?;
    let again = finalize(&resolved.source, &Vocabulary::default())?;
    assert_eq!(again, resolved.source);
    Ok(())
}

#[tokio::test]
async fn test_root_component_is_returned_unchanged() -> Result<()> {
    let tree = ComponentTree::new()?;
    let root = tree.write("Root.vue", ROOT)?;

    let resolved = resolver().resolve_component_file(&root).await?;
    assert_eq!(resolved.source, ROOT);
    assert!(resolved.ancestor_paths.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_resolutions_share_options() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("Root.vue", ROOT)?;
    let mut leaves = Vec::new();
    for i in 0..8 {
        leaves.push(tree.write(
            format!("Leaf{i}.vue"),
            &format!(
                "<template extends=\"./Root.vue\"><extensions><extension point=\"content\">leaf {i}</extension></extensions></template>"
            ),
        )?);
    }

    let resolver = resolver();
    let mut tasks = tokio::task::JoinSet::new();
    for (i, leaf) in leaves.into_iter().enumerate() {
        let resolver = resolver.clone();
        tasks.spawn(async move { (i, resolver.resolve_component_file(&leaf).await) });
    }

    while let Some(joined) = tasks.join_next().await {
        let (i, resolved) = joined?;
        let resolved = resolved?;
        assert!(resolved.source.contains(&format!("<template>leaf {i}</template>")));
    }
    Ok(())
}

#[tokio::test]
async fn test_host_entry_point_with_memory_loader() -> Result<()> {
    let loader = MemoryLoader::new().with_file("/app/layouts/Root.vue", ROOT);

    let resolved = resolve_component(
        CHILD,
        Path::new("/app/views"),
        Arc::new(ResolveOptions::default()),
        loader,
    )
    .await?;

    assert_eq!(resolved.ancestor_paths, [PathBuf::from("/app/layouts/Root.vue")]);
    assert!(resolved.source.contains("<p>Child content</p>"));
    assert!(resolved.source.contains("<h1>Default header</h1>"));
    assert!(resolved.source.contains("name: 'Child'"));
    assert!(!resolved.source.contains("extension"));
    Ok(())
}

#[tokio::test]
async fn test_non_ascii_content_survives_merge() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write(
        "Base.vue",
        "<template><h1>Привет</h1><extension-point name=\"body\"><p>é</p></extension-point><footer>日本語</footer></template>\n",
    )?;
    let child = tree.write(
        "Child.vue",
        "<template extends=\"./Base.vue\"><extensions><extension point=\"body\">Ünïcode <b>ß</b></extension></extensions></template>\n<i18n>{ \"ru\": \"Пока\" }</i18n>\n",
    )?;

    let resolved = resolver().resolve_component_file(&child).await?;
    assert_eq!(
        resolved.source,
        "<template><h1>Привет</h1><template>Ünïcode <b>ß</b></template><footer>日本語</footer></template>\n<i18n>{ \"ru\": \"Пока\" }</i18n>\n"
    );
    Ok(())
}
