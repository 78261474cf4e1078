pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Package directory resolver for build assemblies";
pub const BIN_NAME: &str = "nest";

/// Vars name used when none (or an empty one) is given.
pub const DEFAULT_VARS_NAME: &str = "default";
/// Reserved vars name: package names must be full directory paths.
pub const EXTERNAL_VARS_NAME: &str = "[external]";

pub const VAR_FILE_EXT: &str = "var";
pub const PACKAGE_FILE_EXT: &str = "upp";

// Variable keys
pub const UPP_VAR: &str = "UPP";
pub const UPPHUB_VAR: &str = "UPPHUB";
pub const OUTPUT_VAR: &str = "OUTPUT";
pub const INCLUDE_VAR: &str = "INCLUDE";

pub const HUB_POINTER_FILE: &str = "UppHub.path";
pub const DEFAULT_HUB_DIR: &str = "UppHub";
pub const DEFAULT_OUT_DIR: &str = "upp.out";

pub const CONFIG_DIR_ENV: &str = "NEST_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = "nest";

pub const COMMANDS: &[(&str, &str, &[&str])] = &[
    ("resolve", "Resolves package names to directories", &["r"]),
    ("dirs", "Lists the package search paths in order", &[]),
    ("get", "Prints the value of a variable", &[]),
    ("set", "Sets a variable and saves the var file", &[]),
    ("unset", "Removes a variable and saves the var file", &[]),
    ("vars", "Lists all variables of the active var file", &["ls"]),
    ("hub", "Shows or sets the hub directory", &[]),
    ("id", "Prints the assembly id", &[]),
    ("out", "Prints the output directory", &[]),
    (
        "help",
        "Shows help information for nest or a specific command",
        &[],
    ),
];
pub const EXAMPLES: &[(&str, &str)] = &[
    ("nest resolve Core", "Find the directory of package Core"),
    ("nest --vars MyApps dirs", "Show search paths of var set MyApps"),
    ("nest set UPP /src/uppsrc:/src/apps", "Configure search paths"),
    ("nest --nest /src/mine resolve App", "Resolve with a main nest"),
    ("nest hub --set ~/UppHub", "Point the hub at a directory"),
    ("nest vars --json", "Dump variables as JSON"),
];
