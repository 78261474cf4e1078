pub mod assembly;
pub mod cache;
pub mod hub;
pub mod predicate;
pub mod settings;
pub mod shared;

pub use assembly::Assembly;
pub use cache::PackageCache;
pub use predicate::{AnyDirectory, PackagePredicate, UppFilePredicate};
pub use settings::AssemblySettings;
pub use shared::SharedAssembly;
