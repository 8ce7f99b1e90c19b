mod common;

use kodegen_bundler_manifest::bundler::{
    Error, Inclusion, Layout, ManifestBuilder, RecordMode, SettingsBuilder,
    platform::windows::nsis::{NSI_TEMPLATE, NsisCommands, render_nsi_script},
};
use std::path::Path;

fn skins_tree(root: &Path) {
    common::touch_all(
        root,
        &[
            "skins/default/xui/en/a.xml",
            "skins/default/xui/en/b.xml",
            "skins/default/textures/t.png",
            "skins/default/textures/.svn/entries",
        ],
    );
}

#[test]
fn test_skins_manifest_drives_nsis_script() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    skins_tree(src.path());

    let mut m = ManifestBuilder::new(src.path(), dst.path(), RecordMode::Copy);
    m.exclude("*.svn*").unwrap();
    m.prefix("skins", |m| {
        m.require("*/xui/*/*.xml")?;
        m.require("*/textures/*")?;
        Ok(())
    })
    .unwrap();
    let manifest = m.finish().unwrap();

    assert_eq!(manifest.mappings().len(), 3);
    assert!(dst.path().join("skins/default/xui/en/a.xml").is_file());
    assert!(!dst.path().join("skins/default/textures/.svn").exists());

    let commands = NsisCommands::from_manifest(&manifest).unwrap();
    let settings = SettingsBuilder::new()
        .source_root(src.path())
        .dest_root(dst.path())
        .layout(Layout::Windows)
        .version("2.1.0.13828")
        .build()
        .unwrap();
    let script = render_nsi_script(
        &settings,
        NSI_TEMPLATE,
        &commands,
        Path::new("Second_Life_2-1-0-13828_Setup.exe"),
    )
    .unwrap();

    assert!(script.contains("SetOutPath \"$INSTDIR\\skins\\default\\xui\\en\""));
    assert!(script.contains("Delete \"$INSTDIR\\skins\\default\\textures\\t.png\""));
    assert!(script.contains("RMDir \"$INSTDIR\\skins\""));
    assert!(!script.contains("{{"));

    let again = render_nsi_script(
        &settings,
        NSI_TEMPLATE,
        &commands,
        Path::new("Second_Life_2-1-0-13828_Setup.exe"),
    )
    .unwrap();
    assert_eq!(script, again);
}

#[test]
fn test_optional_miss_and_required_miss() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    skins_tree(src.path());

    let mut m = ManifestBuilder::new(src.path(), dst.path(), RecordMode::DeclareOnly);
    assert_eq!(m.optional("fonts/*.ttf").unwrap(), Inclusion::NotFound);
    match m.require("gpu_table.txt") {
        Err(Error::MissingRequired { pattern, .. }) => assert_eq!(pattern, "gpu_table.txt"),
        other => panic!("expected a missing gpu_table.txt, got {other:?}"),
    }
}

#[test]
fn test_unclosed_scope_fails_at_finish() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();

    let mut m = ManifestBuilder::new(src.path(), dst.path(), RecordMode::DeclareOnly);
    m.enter_scope("skins", "skins");
    assert!(matches!(m.finish(), Err(Error::ScopeImbalance(_))));
}
