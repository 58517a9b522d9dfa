use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for aphrodite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests, deny and doc in sequence
    Check,
    /// Check formatting of every crate
    Fmt,
    /// Lint every target with warnings denied
    Clippy,
    /// Run the workspace tests
    Test,
    /// Run the math kernel timing benchmark in release mode
    Bench,
    /// Check licenses, bans and sources with cargo-deny
    Deny,
    /// Build rustdoc for the workspace crates
    Doc,
    /// Build the entire workspace
    Build,
}

impl Commands {
    fn cargo_args(&self) -> &'static [&'static str] {
        match self {
            Commands::Check => &[],
            Commands::Fmt => &["fmt", "--all", "--", "--check"],
            Commands::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            Commands::Test => &["test", "--workspace"],
            Commands::Bench => &["bench", "-p", "aphrodite-math", "--bench", "bench_transforms"],
            Commands::Deny => &["deny", "check", "licenses", "bans", "sources"],
            Commands::Doc => &["doc", "--workspace", "--no-deps"],
            Commands::Build => &["build", "--workspace"],
        }
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed ({status})", args[0]);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for step in [
                Commands::Fmt,
                Commands::Clippy,
                Commands::Test,
                Commands::Deny,
                Commands::Doc,
            ] {
                cargo(step.cargo_args())?;
            }
        }
        other => cargo(other.cargo_args())?,
    }

    Ok(())
}
