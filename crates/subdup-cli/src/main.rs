pub mod cli;
pub mod error;
pub mod io;
pub mod run;

pub use cli::Cli;

use clap::Parser;

fn main() {
    #[cfg(unix)]
    install_sigpipe_default();

    let cli = Cli::parse();

    if let Err(e) = run::run(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Resets `SIGPIPE` to its default disposition (`SIG_DFL`).
///
/// Rust's runtime ignores `SIGPIPE`, so a pipeline like
/// `subdup whole.out | head` would surface as an `Err(BrokenPipe)` from a
/// write rather than terminating the process the way standard Unix tools
/// do. Restoring the default disposition lets the kernel end the process
/// silently when the pipe closes.
#[cfg(unix)]
fn install_sigpipe_default() {
    // SAFETY: signal() is called during single-threaded startup, before any
    // other threads exist, and SIG_DFL is a valid SIGPIPE handler. There is
    // no safe standard-library equivalent, so this is the one unsafe block
    // in the workspace.
    #[allow(unsafe_code)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
}
