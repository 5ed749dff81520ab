use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use initd::init;
use initd::register::{self, RegisterFlags};
use initd::Installer;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let flags = RegisterFlags::from_env();
    let installer = Installer::default();

    // Exits when -install is given
    register::register(&flags, &installer);

    let (dir, name) = installer.locate_executable();
    let user = if flags.run_as_user.is_empty() {
        "<user>"
    } else {
        flags.run_as_user.as_str()
    };
    let script = init::initd_script(&dir, &name, user).context("Failed to render init.d script")?;

    println!(
        "# Run with -install -installRunAsUser <user> to write {}",
        installer.initd_path(&name).display()
    );
    print!("{}", script);

    Ok(())
}
