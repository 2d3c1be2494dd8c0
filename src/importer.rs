//! Discovery of the modules inside a package directory.
//!
//! Every regular file (or symlink to one) directly inside the package
//! directory that ends in `.rs` and does not start with `__` is a test module.
//! The module is then looked up in the [`Registry`] under
//! `<package>.<file stem>`.

use std::{fs, path::Path};

use crate::{
    Error, Result,
    registry::{Module, Namespace, Registry},
};

const SOURCE_EXTENSION: &str = ".rs";
const RESERVED_PREFIX: &str = "__";

fn is_module_file(file_name: &str) -> bool {
    file_name.ends_with(SOURCE_EXTENSION)
        && file_name.len() > SOURCE_EXTENSION.len()
        && !file_name.starts_with(RESERVED_PREFIX)
}

/// List the module file stems of `dir` in lexicographic order.
pub fn module_stems(dir: &Path) -> Result<Vec<String>> {
    let read_dir_err = |source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut stems = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        // follows symlinks
        match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_file() => (),
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(file = ?entry.path(), %err, "skipping unreadable entry");
                continue;
            }
        }

        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            tracing::warn!(file = ?entry.path(), "skipping file with a non utf-8 name");
            continue;
        };
        if let Some(stem) = file_name
            .strip_suffix(SOURCE_EXTENSION)
            .filter(|_| is_module_file(file_name))
        {
            stems.push(stem.to_string());
        }
    }

    stems.sort();
    Ok(stems)
}

/// Import every module of `package`.
///
/// Fails without importing anything if `package` is a plain module.
pub fn import_modules(registry: &Registry, package: &Namespace) -> Result<Vec<Module>> {
    let dir = match (package.is_package(), package.dir()) {
        (true, Some(dir)) => dir,
        _ => return Err(Error::NotAPackage(package.name().to_string())),
    };

    let stems = module_stems(dir)?;
    tracing::debug!(package = package.name(), modules = stems.len(), "discovered modules");
    stems
        .iter()
        .map(|stem| registry.import(&format!("{}.{stem}", package.name())))
        .collect()
}
