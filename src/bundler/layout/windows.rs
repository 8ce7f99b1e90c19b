//! Windows package tree.

use super::common;
use crate::bundler::{
    error::Result,
    manifest::{Inclusion, ManifestBuilder},
    settings::Settings,
};

/// Media framework libraries shipped next to the viewer.
const GSTREAMER_LIBS: &[&str] = &[
    "avcodec-gpl-52.dll",
    "avdevice-gpl-52.dll",
    "avfilter-gpl-1.dll",
    "avformat-gpl-52.dll",
    "avutil-gpl-50.dll",
    "iconv.dll",
    "liba52-0.dll",
    "libbz2.dll",
    "libcelt-0.dll",
    "libdca-0.dll",
    "libexpat-1.dll",
    "libfaad-2.dll",
    "libFLAC-8.dll",
    "libgcrypt-11.dll",
    "libgio-2.0-0.dll",
    "libglib-2.0-0.dll",
    "libgmodule-2.0-0.dll",
    "libgnutls-26.dll",
    "libgobject-2.0-0.dll",
    "libgpg-error-0.dll",
    "libgstapp-0.10.dll",
    "libgstaudio-0.10.dll",
    "libgstbase-0.10.dll",
    "libgstcontroller-0.10.dll",
    "libgstdataprotocol-0.10.dll",
    "libgstfft-0.10.dll",
    "libgstinterfaces-0.10.dll",
    "libgstnet-0.10.dll",
    "libgstnetbuffer-0.10.dll",
    "libgstpbutils-0.10.dll",
    "libgstphotography-0.10.dll",
    "libgstreamer-0.10.dll",
    "libgstriff-0.10.dll",
    "libgstrtp-0.10.dll",
    "libgstrtsp-0.10.dll",
    "libgstsdp-0.10.dll",
    "libgstsignalprocessor-0.10.dll",
    "libgsttag-0.10.dll",
    "libgstvideo-0.10.dll",
    "libgthread-2.0-0.dll",
    "libmms-0.dll",
    "libmpeg2-0.dll",
    "libneon-27.dll",
    "libogg-0.dll",
    "liboil-0.3-0.dll",
    "libsoup-2.4-1.dll",
    "libtasn1-3.dll",
    "libtheora-0.dll",
    "libtheoradec-1.dll",
    "libvorbis-0.dll",
    "libvorbisenc-2.dll",
    "libvorbisfile-3.dll",
    "libwavpack-1.dll",
    "libx264-67.dll",
    "libxml2-2.dll",
    "libxml2.dll",
    "SDL.dll",
    "xvidcore.dll",
    "z.dll",
];

const RELEASE_LIBS: &str = "../../libraries/i686-win32/lib/release";

pub(super) fn construct(m: &mut ManifestBuilder, settings: &Settings) -> Result<()> {
    let build = settings.build();
    let cfg = build.configuration.as_str();
    let debug = build.is_debug();

    common::construct(m, build.is_packaging())?;

    if build.is_packaging() {
        m.require_as(&format!("{cfg}/kokua-bin.exe"), &settings.final_exe())?;
    }

    // plugin host
    m.require_as(&format!("../llplugin/slplugin/{cfg}/slplugin.exe"), "slplugin.exe")?;
    m.require_as(
        "../viewer_components/updater/scripts/windows/update_install.bat",
        "update_install.bat",
    )?;

    m.scope(&format!("../sharedlibs/{cfg}"), "", |m| {
        m.optional("llkdu.dll")?;

        // Missing llcommon means it was linked statically.
        if m.optional("llcommon.dll")? != Inclusion::NotFound {
            m.require("libapr-1.dll")?;
            m.require("libaprutil-1.dll")?;
            m.require("libapriconv-1.dll")?;
        }

        m.optional("fmod.dll")?;
        m.require(if debug { "openjpegd.dll" } else { "openjpeg.dll" })?;

        if debug {
            m.require("msvcr80d.dll")?;
            m.require("msvcp80d.dll")?;
            m.require("Microsoft.VC80.DebugCRT.manifest")?;
        } else {
            m.require("msvcr80.dll")?;
            m.require("msvcp80.dll")?;
            m.require("Microsoft.VC80.CRT.manifest")?;
        }

        m.scope("vivox-runtime/i686-win32", "", |m| {
            for lib in ["wrap_oal.dll", "SLVoice.exe", "vivoxsdk.dll", "ortp.dll"] {
                m.require(lib)?;
            }
            Ok(())
        })?;

        m.optional(if debug {
            "libtcmalloc_minimal-debug.dll"
        } else {
            "libtcmalloc_minimal.dll"
        })?;
        Ok(())
    })?;

    m.scope("lib/gstreamer-plugins", "", |m| {
        m.require_as("*.dll", "lib/gstreamer-plugins/*.dll")?;
        Ok(())
    })?;

    m.scope(RELEASE_LIBS, "", |m| {
        for lib in GSTREAMER_LIBS {
            m.require(lib)?;
        }
        Ok(())
    })?;

    m.require_as("licenses-win32.txt", "licenses.txt")?;
    m.require("featuretable.txt")?;
    m.require("featuretable_xp.txt")?;

    // minidump generation for crash reports
    m.require("dbghelp.dll")?;

    m.scope(RELEASE_LIBS, "", |m| {
        m.require("openal32.dll")?;
        m.require("alut.dll")?;
        Ok(())
    })?;

    for (plugin_dir, plugin) in [
        ("quicktime", "media_plugin_quicktime.dll"),
        ("webkit", "media_plugin_webkit.dll"),
        ("winmmshim", "winmm.dll"),
        ("gstreamer010", "media_plugin_gstreamer010.dll"),
    ] {
        m.scope(&format!("../media_plugins/{plugin_dir}/{cfg}"), "llplugin", |m| {
            m.require(plugin)?;
            Ok(())
        })?;
    }

    construct_qt_runtime(m, debug)?;

    // crash logger and updater come from sibling projects
    m.require_as(
        &format!("../win_crash_logger/{cfg}/windows-crash-logger.exe"),
        "win_crash_logger.exe",
    )?;
    m.require_as(&format!("../win_updater/{cfg}/windows-updater.exe"), "updater.exe")?;
    Ok(())
}

/// Qt runtime used by the web media plugin, debug or release flavour.
fn construct_qt_runtime(m: &mut ManifestBuilder, debug: bool) -> Result<()> {
    let (lib_dir, suffix) = if debug { ("debug", "d4") } else { ("release", "4") };

    m.scope(&format!("../../libraries/i686-win32/lib/{lib_dir}"), "llplugin", |m| {
        m.require("libeay32.dll")?;
        for lib in ["qtcore", "qtgui", "qtnetwork", "qtopengl", "qtwebkit", "qtxmlpatterns"] {
            m.require(&format!("{lib}{suffix}.dll"))?;
        }
        m.require("ssleay32.dll")?;

        m.prefix("imageformats", |m| {
            for format in ["qgif", "qico", "qjpeg", "qmng", "qsvg", "qtiff"] {
                m.require(&format!("{format}{suffix}.dll"))?;
            }
            Ok(())
        })?;

        m.prefix("codecs", |m| {
            for codec in ["qcncodecs", "qjpcodecs", "qkrcodecs", "qtwcodecs"] {
                m.require(&format!("{codec}{suffix}.dll"))?;
            }
            Ok(())
        })
    })
}
