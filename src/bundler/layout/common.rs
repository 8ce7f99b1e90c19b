//! Resources shared by every platform.

use crate::bundler::{error::Result, manifest::ManifestBuilder};

/// Declares the viewer resources common to all layouts.
///
/// Message templates are always staged; the remaining resource trees only
/// when `packaging`, since build-time copies take them from the source tree.
pub(super) fn construct(m: &mut ManifestBuilder, packaging: bool) -> Result<()> {
    m.exclude("*.svn*")?;
    m.require_as(
        "../../scripts/messages/message_template.msg",
        "app_settings/message_template.msg",
    )?;
    m.require_as("../../etc/message.xml", "app_settings/message.xml")?;

    if !packaging {
        return Ok(());
    }

    m.prefix("app_settings", |m| {
        m.exclude("logcontrol.xml")?;
        m.exclude("logcontrol-dev.xml")?;
        for pattern in ["*.pem", "*.ini", "*.xml", "*.db2"] {
            m.optional(pattern)?;
        }
        m.require("shaders")?;
        m.require("windlight")?;
        Ok(())
    })?;

    m.prefix("character", |m| {
        for pattern in ["*.llm", "*.xml", "*.tga"] {
            m.optional(pattern)?;
        }
        Ok(())
    })?;

    m.prefix("fonts", |m| {
        m.optional("*.ttf")?;
        m.optional("*.txt")?;
        Ok(())
    })?;

    m.prefix("skins", |m| {
        m.require("paths.xml")?;
        m.prefix("*/textures", |m| {
            for pattern in [
                "*/*.tga", "*/*.j2c", "*/*.jpg", "*/*.png", "*.tga", "*.j2c", "*.jpg", "*.png",
            ] {
                m.optional(pattern)?;
            }
            m.require("textures.xml")?;
            Ok(())
        })?;
        m.optional("*/xui/*/*.xml")?;
        m.optional("*/xui/*/widgets/*.xml")?;
        m.optional("*/*.xml")?;

        // loading screen and other local pages
        m.prefix("*/html", |m| {
            m.optional("*.png")?;
            m.optional("*/*/*.html")?;
            m.optional("*/*/*.gif")?;
            Ok(())
        })
    })?;

    m.prefix("local_assets", |m| {
        m.optional("*.j2c")?;
        m.optional("*.tga")?;
        Ok(())
    })?;

    m.require("gpu_table.txt")?;
    Ok(())
}
