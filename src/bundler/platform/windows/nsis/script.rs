//! NSIS installer script generation.
//!
//! Fills the installer template with the version block, the grid/channel
//! block and the install/uninstall directives derived from the manifest.

use super::{commands::NsisCommands, template::NSI_TEMPLATE, utils};
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
};
use handlebars::Handlebars;
use regex::Regex;
use std::{
    borrow::Cow,
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Placeholders every installer template carries exactly once.
pub const PLACEHOLDERS: &[&str] = &[
    "version_vars",
    "source",
    "grid_vars",
    "install_files",
    "delete_files",
];

/// `!define` block naming the executable and version strings.
pub fn version_vars(settings: &Settings) -> String {
    let package = settings.package();
    format!(
        "!define INSTEXE  \"{}\"\n\
         !define VERSION \"{}\"\n\
         !define VERSION_LONG \"{}\"\n\
         !define VERSION_DASHES \"{}\"\n",
        settings.final_exe(),
        package.version_short(),
        package.version_dots(),
        package.version_dashes(),
    )
}

/// Output file, install flags and the names that keep channels and grids
/// installed side by side.
pub fn grid_vars(settings: &Settings, out_file: &Path) -> String {
    let channel = settings.channel();
    let product = settings.product_name();
    let oneword = settings.package().product_oneword();
    let urlname = oneword.to_lowercase();

    let (instname, shortcut, urlname, caption, uninstall_settings) =
        if !channel.is_default_channel() {
            (
                format!("{oneword}{}", settings.channel_oneword()),
                channel.channel.clone(),
                urlname,
                format!("{} ${{VERSION}}", channel.channel),
                true,
            )
        } else if !channel.is_default_grid() {
            let grid_caps = channel.grid.to_uppercase();
            (
                format!("{oneword}{grid_caps}"),
                format!("{product} ({grid_caps})"),
                format!("{urlname}{}", channel.grid),
                format!("{product} {} ${{VERSION}}", channel.grid),
                true,
            )
        } else {
            (
                format!("{oneword}Viewer2"),
                format!("{product} Viewer 2"),
                urlname,
                format!("{product} ${{VERSION}}"),
                false,
            )
        };

    let mut vars = format!(
        "OutFile \"{}\"\n\
         !define INSTFLAGS \"{}\"\n\
         !define INSTNAME   \"{instname}\"\n\
         !define SHORTCUT   \"{shortcut}\"\n\
         !define URLNAME   \"{urlname}\"\n",
        out_file.display(),
        utils::escape_quotes(&settings.flags_list()),
    );
    if uninstall_settings {
        vars.push_str("!define UNINSTALL_SETTINGS 1\n");
    }
    vars.push_str(&format!("Caption \"{caption}\"\n"));
    vars
}

/// Fails unless each placeholder occurs exactly once in `template`.
pub fn check_placeholders(template: &str) -> Result<()> {
    for placeholder in PLACEHOLDERS {
        let pattern = Regex::new(&format!(r"\{{\{{\{{?\s*{placeholder}\s*\}}?\}}\}}"))?;
        let count = pattern.find_iter(template).count();
        if count != 1 {
            return Err(Error::UnresolvedPlaceholder {
                placeholder: placeholder.to_string(),
                count,
            });
        }
    }
    Ok(())
}

/// Renders the installer script text.
///
/// The same settings, commands and template always render the same text.
pub fn render_nsi_script(
    settings: &Settings,
    template: &str,
    commands: &NsisCommands,
    out_file: &Path,
) -> Result<String> {
    check_placeholders(template)?;

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);
    handlebars.register_template_string("installer.nsi", template)?;

    let mut data = BTreeMap::new();
    data.insert("version_vars", version_vars(settings));
    data.insert("source", settings.source_root().display().to_string());
    data.insert("grid_vars", grid_vars(settings, out_file));
    data.insert("install_files", commands.install_commands());
    data.insert("delete_files", commands.uninstall_commands());

    Ok(handlebars.render("installer.nsi", &data)?)
}

/// Template text: the configured file, or the built-in one.
async fn load_template(settings: &Settings) -> Result<Cow<'static, str>> {
    match &settings.nsis().template {
        Some(path) => {
            log::debug!("Using NSIS template {}", path.display());
            let text = tokio::fs::read_to_string(path)
                .await
                .fs_context("reading NSIS template", path)?;
            Ok(Cow::Owned(text))
        }
        None => Ok(Cow::Borrowed(NSI_TEMPLATE)),
    }
}

/// Writes the installer script into the staging root.
///
/// Returns the path of the written `.nsi` file.
pub async fn generate_nsi_script(
    settings: &Settings,
    commands: &NsisCommands,
    out_file: &Path,
) -> Result<PathBuf> {
    let template = load_template(settings).await?;
    let content = render_nsi_script(settings, &template, commands, out_file)?;

    let nsi_path = settings.dest_root().join(format!(
        "{}_setup_tmp.nsi",
        settings.package().product_oneword().to_lowercase()
    ));
    utils::write_utf8_bom(&nsi_path, &content).await?;
    log::debug!("Wrote installer script {}", nsi_path.display());

    Ok(nsi_path)
}
