//! macOS application bundle.

use super::common;
use crate::bundler::{
    error::Result,
    manifest::{Inclusion, ManifestBuilder},
    settings::Settings,
};

pub(super) const EXECUTABLE_SCRIPTS: &[&str] = &["Contents/MacOS/update_install"];

const LIBDIR: &str = "../../libraries/universal-darwin/lib_release";

const TRANSLATIONS: &[&str] = &[
    "English.lproj",
    "German.lproj",
    "Japanese.lproj",
    "Korean.lproj",
    "da.lproj",
    "es.lproj",
    "fr.lproj",
    "hu.lproj",
    "it.lproj",
    "nl.lproj",
    "pl.lproj",
    "pt.lproj",
    "ru.lproj",
    "tr.lproj",
    "uk.lproj",
    "zh-Hans.lproj",
];

/// Runtime libraries that come with a shared llcommon.
const LLCOMMON_DEPS: &[&str] = &[
    "libapr-1.0.3.7.dylib",
    "libaprutil-1.0.3.8.dylib",
    "libexpat.0.5.0.dylib",
    "libexception_handler.dylib",
];

pub(super) fn construct(m: &mut ManifestBuilder, settings: &Settings) -> Result<()> {
    let cfg = settings.build().configuration.as_str();

    // The bundle produced by the build is the root of the staged tree.
    m.require_as(&format!("{cfg}/Kokua.app"), "")?;

    m.scope("", "Contents", |m| {
        m.scope(LIBDIR, "MacOS", |m| {
            for lib in [
                "libndofdev.dylib",
                "libalut.0.dylib",
                "libopenal.1.dylib",
                "libopenjpeg.1.4.dylib",
            ] {
                m.require(lib)?;
            }
            Ok(())
        })?;

        m.require_as(
            "../viewer_components/updater/scripts/darwin/update_install",
            "MacOS/update_install",
        )?;
        m.require_as("packaging/mac/Info.plist", "Info.plist")?;

        m.scope("", "Resources", |m| construct_resources(m, settings))
    })
}

fn construct_resources(m: &mut ManifestBuilder, settings: &Settings) -> Result<()> {
    let cfg = settings.build().configuration.as_str();

    // A bundle is always complete, even for development builds.
    common::construct(m, true)?;

    m.prefix("cursors_mac", |m| {
        m.require("*.tif")?;
        Ok(())
    })?;

    m.require_as("licenses-mac.txt", "licenses.txt")?;
    m.require("featuretable_mac.txt")?;
    m.require("viewer.icns")?;

    m.scope("packaging/mac", "", |m| {
        m.require("SecondLife.nib")?;
        for lproj in TRANSLATIONS {
            m.require(lproj)?;
        }
        Ok(())
    })?;

    // voice client
    for file in [
        "libalut.dylib",
        "libopenal.dylib",
        "libortp.dylib",
        "libvivoxsdk.dylib",
        "SLVoice",
    ] {
        m.require_as(&format!("vivox-runtime/universal-darwin/{file}"), file)?;
    }

    // Freshly built libraries are preferred over the prebuilt ones.
    let mut shared_llcommon = false;
    for lib in ["llkdu", "llcommon"] {
        let libfile = format!("lib{lib}.dylib");
        let built = format!("../{lib}/{cfg}/{libfile}");
        let prebuilt = format!("{LIBDIR}/{libfile}");
        let found = m.include_first_existing(&[built.as_str(), prebuilt.as_str()], &libfile)?;
        if lib == "llcommon" {
            shared_llcommon = found != Inclusion::NotFound;
        }
    }

    if shared_llcommon {
        for lib in LLCOMMON_DEPS {
            m.require_as(&format!("{LIBDIR}/{lib}"), lib)?;
        }
    }

    m.optional_as(&format!("{cfg}/libfmodwrapper.dylib"), "libfmodwrapper.dylib")?;

    m.require_as(
        &format!("../mac_crash_logger/{cfg}/mac-crash-logger.app"),
        "mac-crash-logger.app",
    )?;
    m.require_as(&format!("../mac_updater/{cfg}/mac-updater.app"), "mac-updater.app")?;
    m.require_as(&format!("../llplugin/slplugin/{cfg}/SLPlugin.app"), "SLPlugin.app")?;

    m.scope("", "llplugin", |m| {
        m.require_as(
            &format!("../media_plugins/webkit/{cfg}/media_plugin_webkit.dylib"),
            "media_plugin_webkit.dylib",
        )?;
        m.require_as(&format!("{LIBDIR}/libllqtwebkit.dylib"), "libllqtwebkit.dylib")?;
        Ok(())
    })?;

    // grid and channel arguments read at launch
    m.put_in_file(&settings.flags_list(), "arguments.txt")?;
    Ok(())
}
