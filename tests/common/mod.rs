//! Shared source tree for integration tests.

#![allow(dead_code)]

use std::{fs, path::Path};

/// Checkout of a 64-bit Linux viewer build, relative to the checkout root.
pub const LINUX_TREE: &[&str] = &[
    "scripts/messages/message_template.msg",
    "etc/message.xml",
    "indra/newview/licenses-linux.txt",
    "indra/newview/res/kokua_icon.png",
    "indra/newview/linux_tools/client-readme.txt",
    "indra/newview/linux_tools/client-readme-voice.txt",
    "indra/newview/linux_tools/client-readme-joystick.txt",
    "indra/newview/linux_tools/wrapper.sh",
    "indra/newview/linux_tools/handle_secondlifeprotocol.sh",
    "indra/newview/linux_tools/register_secondlifeprotocol.sh",
    "indra/newview/linux_tools/register_hopprotocol.sh",
    "indra/newview/linux_tools/refresh_desktop_app_entry.sh",
    "indra/newview/linux_tools/launch_url.sh",
    "indra/newview/linux_tools/install.sh",
    "indra/newview/kokua-bin",
    "indra/linux_crash_logger/linux-crash-logger",
    "indra/linux_updater/linux-updater",
    "indra/llplugin/slplugin/SLPlugin",
    "indra/newview/res-sdl/arrow.BMP",
    "indra/newview/res-sdl/cursors/hand.BMP",
    "indra/viewer_components/updater/scripts/linux/update_install",
    "indra/media_plugins/webkit/libmedia_plugin_webkit.so",
    "indra/media_plugins/gstreamer010/libmedia_plugin_gstreamer010.so",
    "indra/newview/featuretable_linux.txt",
    "indra/newview/secondlife-i686.supp",
    "libraries/x86_64-linux/lib_release_client/libapr-1.so.0",
    "libraries/x86_64-linux/lib_release_client/libaprutil-1.so.0",
    "libraries/x86_64-linux/lib_release_client/libbreakpad_client.so.0.0.0",
    "libraries/x86_64-linux/lib_release_client/libdb-4.2.so",
    "libraries/x86_64-linux/lib_release_client/libcares.so.2.0.0",
    "libraries/x86_64-linux/lib_release_client/libcurl.so.4.2.0",
    "libraries/x86_64-linux/lib_release_client/libcrypto.so.1.0.0",
    "libraries/x86_64-linux/lib_release_client/libssl.so.1.0.0",
    "libraries/x86_64-linux/lib_release_client/libexpat.so.1",
    "libraries/x86_64-linux/lib_release_client/libSDL-1.2.so.0.11.3",
    "libraries/x86_64-linux/lib_release_client/libjpeg.so.7",
    "libraries/x86_64-linux/lib_release_client/libpng12.so.0",
    "libraries/x86_64-linux/lib_release_client/libopenjpeg.so.2",
    "libraries/x86_64-linux/lib_release_client/libxml2.so.2.7.8",
    "libraries/x86_64-linux/lib_release_client/libz.so.1.2.5",
    "libraries/x86_64-linux/lib_release_client/libz.so.1",
    "libraries/x86_64-linux/lib_release_client/libz.so",
    "libraries/x86_64-linux/lib_release_client/libopenal.so.1.12.854",
    "libraries/x86_64-linux/lib_release_client/libalut.so.0.1.0",
    "libraries/x86_64-linux/lib_release_client/32bit-compat/libstdc++.so.6",
    "indra/newview/vivox-runtime/i686-linux/SLVoice",
    "indra/newview/vivox-runtime/i686-linux/libortp.so",
    "indra/newview/vivox-runtime/i686-linux/libvivoxsdk.so",
];

/// Resource files a packaging run additionally requires.
pub const RESOURCES: &[&str] = &[
    "indra/newview/app_settings/settings.xml",
    "indra/newview/app_settings/shaders/class1/lighting/lightF.glsl",
    "indra/newview/app_settings/windlight/skies/Default.xml",
    "indra/newview/character/avatar_lad.xml",
    "indra/newview/fonts/DejaVuSans.ttf",
    "indra/newview/skins/paths.xml",
    "indra/newview/skins/default/textures/textures.xml",
    "indra/newview/skins/default/textures/icons/arrow.png",
    "indra/newview/skins/default/xui/en/floater_about.xml",
    "indra/newview/gpu_table.txt",
];

/// Creates every file of `files` under `root`.
pub fn touch_all(root: &Path, files: &[&str]) {
    for rel in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }
}

/// Full Linux build tree; returns the viewer source directory.
pub fn linux_checkout(root: &Path) -> std::path::PathBuf {
    touch_all(root, LINUX_TREE);
    touch_all(root, RESOURCES);
    root.join("indra/newview")
}
