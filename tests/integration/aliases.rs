//! Alias resolution through `extends`, configured in code and in
//! `sfc-inherit.toml`.

use anyhow::Result;
use sfc_inherit::config::ConfigFile;
use sfc_inherit::test_utils::ComponentTree;
use sfc_inherit::{AliasMode, AliasTable, FsLoader, InheritanceResolver, ResolveOptions, Vocabulary};
use std::sync::Arc;

const BASE: &str =
    "<template><extension-point name=\"body\">base body</extension-point></template>\n";

fn child(reference: &str) -> String {
    format!(
        "<template extends=\"{reference}\"><extensions><extension point=\"body\">child body</extension></extensions></template>\n"
    )
}

#[tokio::test]
async fn test_prefix_alias() -> Result<()> {
    let tree = ComponentTree::new()?;
    let base = tree.write("src/shared/layouts/Base.vue", BASE)?;
    let leaf = tree.write("src/views/deep/Leaf.vue", &child("@/layouts/Base.vue"))?;

    let aliases = AliasTable::new(AliasMode::Prefix, [("@", tree.path().join("src/shared"))])?;
    let options = ResolveOptions::new(Vocabulary::default(), aliases);
    let resolved =
        InheritanceResolver::new(Arc::new(options), FsLoader).resolve_component_file(&leaf).await?;

    assert_eq!(resolved.ancestor_paths, [base]);
    assert_eq!(resolved.source, "<template><template>child body</template></template>\n");
    Ok(())
}

#[tokio::test]
async fn test_pattern_alias() -> Result<()> {
    let tree = ComponentTree::new()?;
    let base = tree.write("vendor/ui/v2/Base.vue", BASE)?;
    let leaf = tree.write("app/Leaf.vue", &child("ui:v2/Base.vue"))?;

    let aliases =
        AliasTable::new(AliasMode::Pattern, [(r"^ui:(v\d+)", tree.path().join("vendor/ui/v2"))])?;
    let options = ResolveOptions::new(Vocabulary::default(), aliases);
    let resolved =
        InheritanceResolver::new(Arc::new(options), FsLoader).resolve_component_file(&leaf).await?;

    assert_eq!(resolved.ancestor_paths, [base]);
    Ok(())
}

#[tokio::test]
async fn test_ancestor_relative_reference_uses_ancestor_directory() -> Result<()> {
    let tree = ComponentTree::new()?;
    let root = tree.write("lib/base/Root.vue", BASE)?;
    let mid = tree.write("lib/Mid.vue", "<template extends=\"./base/Root.vue\"></template>")?;
    let leaf = tree.write("app/pages/Leaf.vue", &child("~/Mid.vue"))?;

    let aliases = AliasTable::new(AliasMode::Prefix, [("~", tree.path().join("lib"))])?;
    let options = ResolveOptions::new(Vocabulary::default(), aliases);
    let resolved =
        InheritanceResolver::new(Arc::new(options), FsLoader).resolve_component_file(&leaf).await?;

    assert_eq!(resolved.ancestor_paths, [root, mid]);
    Ok(())
}

#[tokio::test]
async fn test_aliases_from_config_file() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write("sfc-inherit.toml", "alias_mode = \"prefix\"\n\n[aliases]\n\"#\" = \"components\"\n")?;
    let base = tree.write("components/Base.vue", BASE)?;
    let leaf = tree.write("pages/Leaf.vue", &child("#/Base.vue"))?;

    let config = ConfigFile::load_with_optional(None, &tree.path().join("pages")).await?;
    let options = config.into_options(Vec::new(), None)?;
    let resolved =
        InheritanceResolver::new(Arc::new(options), FsLoader).resolve_component_file(&leaf).await?;

    assert_eq!(resolved.ancestor_paths, [base]);
    Ok(())
}

#[tokio::test]
async fn test_pattern_alias_expands_capture_groups() -> Result<()> {
    let tree = ComponentTree::new()?;
    let base = tree.write("vendor/ui/Base.vue", BASE)?;
    let leaf = tree.write("app/Leaf.vue", &child("~ui/Base.vue"))?;

    let target = format!("{}/vendor/$1/", tree.path().display());
    let aliases = AliasTable::new(AliasMode::Pattern, [(r"^~(\w+)/", target)])?;
    let options = ResolveOptions::new(Vocabulary::default(), aliases);
    let resolved =
        InheritanceResolver::new(Arc::new(options), FsLoader).resolve_component_file(&leaf).await?;

    assert_eq!(resolved.ancestor_paths, [base]);
    assert_eq!(resolved.source, "<template><template>child body</template></template>\n");
    Ok(())
}

#[tokio::test]
async fn test_config_aliases_tried_in_written_order() -> Result<()> {
    let tree = ComponentTree::new()?;
    tree.write(
        "sfc-inherit.toml",
        "alias_mode = \"pattern\"\n\n[aliases]\n\"^@ui/\" = \"design/\"\n\"^@\" = \"app\"\n",
    )?;
    let base = tree.write("design/Base.vue", BASE)?;
    let leaf = tree.write("pages/Leaf.vue", &child("@ui/Base.vue"))?;

    let config = ConfigFile::load_with_optional(None, &tree.path().join("pages")).await?;
    let options = config.into_options(Vec::new(), None)?;
    let resolved =
        InheritanceResolver::new(Arc::new(options), FsLoader).resolve_component_file(&leaf).await?;

    assert_eq!(resolved.ancestor_paths, [base]);
    Ok(())
}
