use clap::Parser;

use anthem::cli::Cli;
use anthem::driver::run;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (output, diagnostics) = run(&cli)?;
    println!("{output}");
    for warning in diagnostics.warnings() {
        eprintln!("warning: {warning}");
    }
    Ok(())
}
