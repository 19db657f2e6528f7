//! Module artifact naming rules

use std::path::{Component, Path};

/// Suffix every module in the repository carries
pub const MODULE_SUFFIX: &str = ".omod";

/// Final path component of an archive entry name
///
/// Both `/` and `\` count as separators, whatever the host platform.
pub fn module_basename(entry_name: &str) -> &str {
    entry_name
        .rsplit(&['/', '\\'][..])
        .next()
        .unwrap_or(entry_name)
}

/// Returns true if the entry name carries the module suffix
pub fn is_module_artifact(entry_name: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        suffix_start(entry_name)
            .and_then(|start| entry_name.get(start..))
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(MODULE_SUFFIX))
    } else {
        entry_name.ends_with(MODULE_SUFFIX)
    }
}

/// File name under which an archive entry is stored in the repository
///
/// Returns `None` for entries that are not modules. When matching ignores
/// case, the suffix is normalised to lowercase.
pub fn stored_module_name(entry_name: &str, case_insensitive: bool) -> Option<String> {
    if !is_module_artifact(entry_name, case_insensitive) {
        return None;
    }

    let basename = module_basename(entry_name);
    let stem = suffix_start(basename).and_then(|start| basename.get(..start))?;
    Some(format!("{stem}{MODULE_SUFFIX}"))
}

/// Returns true if `name` joined onto a directory stays directly inside it
///
/// Rejects anything that is not exactly one normal path component, such as
/// `..` or a drive-relative `C:name` on Windows.
pub fn is_contained_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn suffix_start(name: &str) -> Option<usize> {
    name.len().checked_sub(MODULE_SUFFIX.len())
}
