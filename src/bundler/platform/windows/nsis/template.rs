//! Built-in NSI script template.
//!
//! Rendered with Handlebars. Every placeholder appears exactly once:
//! `version_vars`, `grid_vars` (which carries `OutFile`), `source`,
//! `install_files` and `delete_files`.

/// Installer script used when no template file is configured.
pub const NSI_TEMPLATE: &str = r#";;; Viewer installer script, generated by the manifest bundler.
;;; Compile with the Unicode build of makensis.

SetCompressor /SOLID lzma
SetOverwrite on
RequestExecutionLevel admin
XPStyle on
CRCCheck on

{{version_vars}}
{{grid_vars}}

!define VIEWER_SOURCE "{{source}}"

Name "${SHORTCUT}"
BrandingText "${SHORTCUT} ${VERSION_LONG}"
InstallDir "$PROGRAMFILES\${INSTNAME}"
InstallDirRegKey HKLM "SOFTWARE\Linden Research, Inc.\${INSTNAME}" ""
UninstallText "This will uninstall ${SHORTCUT} ${VERSION_LONG} from your system."
ShowInstDetails show
ShowUninstDetails show
DirText "Choose the folder to install ${SHORTCUT} into."

Page directory
Page instfiles
UninstPage uninstConfirm
UninstPage instfiles

Section ""
  SetShellVarContext all

  ;; Remove files left by the previous version before installing.
  Call RemoveOldFiles

{{install_files}}

  ;; Shortcuts and registry keys
  SetOutPath "$INSTDIR"
  CreateDirectory "$SMPROGRAMS\${INSTNAME}"
  CreateShortCut "$SMPROGRAMS\${INSTNAME}\${SHORTCUT}.lnk" "$INSTDIR\${INSTEXE}" "${INSTFLAGS}"
  CreateShortCut "$SMPROGRAMS\${INSTNAME}\Uninstall ${SHORTCUT}.lnk" "$INSTDIR\uninst.exe" ""
  CreateShortCut "$DESKTOP\${SHORTCUT}.lnk" "$INSTDIR\${INSTEXE}" "${INSTFLAGS}"

  WriteRegStr HKLM "SOFTWARE\Linden Research, Inc.\${INSTNAME}" "" "$INSTDIR"
  WriteRegStr HKLM "SOFTWARE\Linden Research, Inc.\${INSTNAME}" "Version" "${VERSION_LONG}"
  WriteRegStr HKLM "SOFTWARE\Linden Research, Inc.\${INSTNAME}" "Flags" "${INSTFLAGS}"
  WriteRegStr HKLM "SOFTWARE\Linden Research, Inc.\${INSTNAME}" "Exe" "${INSTEXE}"
  WriteRegStr HKLM "Software\Microsoft\Windows\CurrentVersion\Uninstall\${INSTNAME}" "DisplayName" "${INSTNAME} (remove only)"
  WriteRegStr HKLM "Software\Microsoft\Windows\CurrentVersion\Uninstall\${INSTNAME}" "UninstallString" '"$INSTDIR\uninst.exe"'

  WriteRegStr HKEY_CLASSES_ROOT "${URLNAME}" "(default)" "URL:Second Life"
  WriteRegStr HKEY_CLASSES_ROOT "${URLNAME}" "URL Protocol" ""
  WriteRegStr HKEY_CLASSES_ROOT "${URLNAME}\shell\open\command" "" '"$INSTDIR\${INSTEXE}" ${INSTFLAGS} -url "%1"'

  WriteUninstaller "$INSTDIR\uninst.exe"
SectionEnd

Function RemoveOldFiles
  Delete "$INSTDIR\*.glsl"
  Delete "$INSTDIR\*.dll"
  Delete "$INSTDIR\*.exe"
FunctionEnd

Section Uninstall
  SetShellVarContext all

  Delete "$SMPROGRAMS\${INSTNAME}\*.*"
  RMDir "$SMPROGRAMS\${INSTNAME}"
  Delete "$DESKTOP\${SHORTCUT}.lnk"

  DeleteRegKey HKLM "SOFTWARE\Linden Research, Inc.\${INSTNAME}"
  DeleteRegKey HKLM "SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall\${INSTNAME}"
  DeleteRegKey HKEY_CLASSES_ROOT "${URLNAME}"

{{delete_files}}

  Delete "$INSTDIR\uninst.exe"
  RMDir "$INSTDIR"

!ifdef UNINSTALL_SETTINGS
  ;; Per-channel settings live next to the shared ones.
  Delete "$APPDATA\SecondLife\user_settings\settings_${INSTNAME}.xml"
!endif
SectionEnd
"#;
