use std::path::Path;

use nest_constants::PACKAGE_FILE_EXT;
use nest_utils::file_name_string;

/// Decides whether a directory is a package root.
pub trait PackagePredicate: Send + Sync {
    fn is_package(&self, dir: &Path) -> bool;
}

impl<F> PackagePredicate for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn is_package(&self, dir: &Path) -> bool {
        self(dir)
    }
}

/// A package is a directory holding `<dirname>.upp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UppFilePredicate;

impl PackagePredicate for UppFilePredicate {
    fn is_package(&self, dir: &Path) -> bool {
        let name = file_name_string(dir);
        !name.is_empty() && dir.join(format!("{name}.{PACKAGE_FILE_EXT}")).is_file()
    }
}

/// Every existing directory is a package.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyDirectory;

impl PackagePredicate for AnyDirectory {
    fn is_package(&self, dir: &Path) -> bool {
        dir.is_dir()
    }
}
