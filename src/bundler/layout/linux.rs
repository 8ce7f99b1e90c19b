//! Linux package tree.

use super::common;
use crate::bundler::{error::Result, manifest::ManifestBuilder, settings::Settings};

pub(super) const EXECUTABLE_SCRIPTS: &[&str] = &["kokua", "bin/update_install"];

/// `(source, destination)` pairs from `linux_tools`.
const TOOLS: &[(&str, &str)] = &[
    ("client-readme.txt", "README-linux.txt"),
    ("client-readme-voice.txt", "README-linux-voice.txt"),
    ("client-readme-joystick.txt", "README-linux-joystick.txt"),
    ("wrapper.sh", "kokua"),
    ("handle_secondlifeprotocol.sh", "etc/handle_secondlifeprotocol.sh"),
    ("register_secondlifeprotocol.sh", "etc/register_secondlifeprotocol.sh"),
    ("register_hopprotocol.sh", "etc/register_hopprotocol.sh"),
    ("refresh_desktop_app_entry.sh", "etc/refresh_desktop_app_entry.sh"),
    ("launch_url.sh", "etc/launch_url.sh"),
    ("install.sh", "install.sh"),
];

/// Shared part of both Linux architectures.
pub(super) fn construct(m: &mut ManifestBuilder, settings: &Settings) -> Result<()> {
    common::construct(m, settings.build().is_packaging())?;

    m.require_as("licenses-linux.txt", "licenses.txt")?;
    m.require("res/kokua_icon.png")?;

    m.scope("linux_tools", "", |m| {
        for (src, dst) in TOOLS {
            m.require_as(src, dst)?;
        }
        Ok(())
    })?;

    // grid and channel arguments read by the wrapper script
    m.put_in_file(&settings.flags_list(), "etc/gridargs.dat")?;

    m.require_as("kokua-bin", "bin/do-not-directly-run-kokua-bin")?;
    m.require_as(
        "../linux_crash_logger/linux-crash-logger",
        "bin/linux-crash-logger.bin",
    )?;
    m.require_as("../linux_updater/linux-updater", "bin/linux-updater.bin")?;
    m.require_as("../llplugin/slplugin/SLPlugin", "bin/SLPlugin")?;

    m.prefix("res-sdl", |m| {
        m.require("*")?;
        Ok(())
    })?;

    m.require_as(
        "../viewer_components/updater/scripts/linux/update_install",
        "bin/update_install",
    )?;

    m.scope("", "bin/llplugin", |m| {
        m.require_as(
            "../media_plugins/webkit/libmedia_plugin_webkit.so",
            "libmedia_plugin_webkit.so",
        )?;
        m.require_as(
            "../media_plugins/gstreamer010/libmedia_plugin_gstreamer010.so",
            "libmedia_plugin_gstreamer.so",
        )?;
        Ok(())
    })?;

    m.require("featuretable_linux.txt")?;
    Ok(())
}

pub(super) fn construct_i686(m: &mut ManifestBuilder) -> Result<()> {
    // A freshly built libllkdu wins over the prebuilt one.
    m.include_first_existing(
        &[
            "../llkdu/libllkdu.so",
            "../../libraries/i686-linux/lib_release_client/libllkdu.so",
        ],
        "bin/libllkdu.so",
    )?;

    // Missing llcommon means it was linked statically.
    m.optional_as("../llcommon/libllcommon.so", "lib/libllcommon.so")?;

    m.scope("../../libraries/i686-linux/lib_release_client", "lib", |m| {
        m.require("libapr-1.so.0")?;
        m.require("libaprutil-1.so.0")?;
        m.require_as("libbreakpad_client.so.0.0.0", "libbreakpad_client.so.0")?;
        m.require("libdb-4.2.so")?;
        m.require("libcrypto.so.0.9.7")?;
        m.require("libexpat.so.1")?;
        m.require("libssl.so.0.9.7")?;
        m.require("libSDL-1.2.so.0")?;
        m.require("libopenjpeg.so.2")?;
        m.require_as("libalut.so.0.1.0", "libalut.so.0")?;
        m.require_as("libopenal.so.1.12.854", "libopenal.so.1")?;
        m.optional("libkdu.so")?;
        m.optional("libfmod-3.75.so")?;
        Ok(())
    })?;

    construct_voice(m, "lib")
}

pub(super) fn construct_x86_64(m: &mut ManifestBuilder) -> Result<()> {
    // valgrind suppressions
    m.require("secondlife-i686.supp")?;

    m.optional_as("../llcommon/libllcommon.so", "lib64/libllcommon.so")?;

    m.scope("../../libraries/x86_64-linux/lib_release_client", "lib64", |m| {
        m.require("libapr-1.so.0")?;
        m.require("libaprutil-1.so.0")?;
        m.require_as("libbreakpad_client.so.0.0.0", "libbreakpad_client.so.0")?;
        m.require("libdb-4.2.so")?;
        m.require_as("libcares.so.2.0.0", "libcares.so.2")?;
        m.require_as("libcurl.so.4.2.0", "libcurl.so.4")?;
        m.require("libcrypto.so.1.0.0")?;
        m.require("libssl.so.1.0.0")?;
        m.require("libexpat.so.1")?;
        m.require_as("libSDL-1.2.so.0.11.3", "libSDL-1.2.so.0")?;
        m.require("libjpeg.so.7")?;
        m.require("libpng12.so.0")?;
        m.require("libopenjpeg.so.2")?;
        m.require("libxml2.so.2.7.8")?;
        m.require("libz.so.1.2.5")?;
        m.require("libz.so.1")?;
        m.require("libz.so")?;
        m.require_as("libopenal.so.1.12.854", "libopenal.so.1")?;
        m.require_as("libalut.so.0.1.0", "libalut.so.0")?;
        Ok(())
    })?;

    construct_voice(m, "lib32")?;

    // 32-bit runtime the voice client needs
    m.scope(
        "../../libraries/x86_64-linux/lib_release_client/32bit-compat",
        "lib32",
        |m| {
            m.require("*.so*")?;
            Ok(())
        },
    )
}

/// The voice client is 32-bit on both architectures.
fn construct_voice(m: &mut ManifestBuilder, lib_dir: &str) -> Result<()> {
    m.scope("vivox-runtime/i686-linux", "bin", |m| {
        m.require("SLVoice")?;
        Ok(())
    })?;
    m.scope("vivox-runtime/i686-linux", lib_dir, |m| {
        m.require("libortp.so")?;
        m.require("libvivoxsdk.so")?;
        Ok(())
    })
}
