mod sysvinit;

pub use sysvinit::{initd_script, INITD_TEMPLATE};

use crate::error::{InstallError, Result};
use crate::paths;

/// Values substituted into an init.d script template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptContext {
    /// Directory the service is started from, as split from the executable path
    pub dir: String,
    /// Account the service runs as
    pub user: String,
    /// Full path to the executable
    pub command: String,
    /// init.d script identifier (executable base name)
    pub script_name: String,
}

impl ScriptContext {
    /// Build a context for `script_name` living in `dir`
    ///
    /// `dir` is used verbatim, so it is expected to carry its trailing `/`;
    /// the command path is `dir` followed by `script_name`.
    pub fn new(dir: &str, script_name: &str, user: &str) -> Self {
        Self {
            dir: dir.to_string(),
            user: user.to_string(),
            command: format!("{}{}", dir, script_name),
            script_name: script_name.to_string(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "dir" => Some(&self.dir),
            "user" => Some(&self.user),
            "cmd" => Some(&self.command),
            "name" => Some(&self.script_name),
            "pid_dir" => Some(paths::PID_DIR),
            "log_dir" => Some(paths::LOG_DIR),
            _ => None,
        }
    }
}

fn is_placeholder(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

/// Render `template`, replacing `{key}` placeholders from `ctx`
///
/// Only braces around a bare lowercase identifier are placeholders; any other
/// brace (shell function bodies, usage strings) is copied through untouched.
pub fn render(template: &str, ctx: &ScriptContext) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 128);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) if is_placeholder(&after[..close]) => {
                let key = &after[..close];
                let value = ctx.lookup(key).ok_or_else(|| {
                    InstallError::TemplateRender(format!("unknown placeholder {{{}}}", key))
                })?;
                out.push_str(value);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}
