//! Shell integration: the wrapper function users put in their shell rc.
//!
//! ```sh
//! eval "$(cdbm init bash)"
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::CdbmError;

/// Shells cdbm can generate a wrapper for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
}

impl FromStr for Shell {
    type Err = CdbmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            other => Err(CdbmError::UnsupportedShell(other.to_string())),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
        }
    }
}

/// Management verbs and global flags that run the binary directly instead of
/// jumping. Other single-dash words are bookmark names (`-x` is valid).
const PASSTHROUGH: &str = "add|list|ls|show|edit|delete|rm|init|help|--*|-h|-V";

/// The `cdbm` shell function for `shell`.
///
/// Management verbs go straight to the binary. Anything else is treated as a
/// bookmark name: the binary prints a `cd` command on stdout, and it is only
/// `eval`ed when the binary exits successfully.
pub fn init_script(shell: Shell) -> String {
    // bash and zsh share the same function syntax.
    format!(
        r#"# cdbm shell integration ({shell})
cdbm() {{
    if [ "$#" -eq 0 ]; then
        command cdbm
        return
    fi
    case "$1" in
        {passthrough})
            command cdbm "$@"
            ;;
        *)
            if [ "$1" = "cd" ]; then
                shift
            fi
            local __cdbm_cmd
            __cdbm_cmd="$(command cdbm cd "$@")" || return
            eval "$__cdbm_cmd"
            ;;
    esac
}}
"#,
        shell = shell,
        passthrough = PASSTHROUGH
    )
}
