use crate::cli::CleanArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use pdbkit::workflows::clean;
use tracing::info;

pub fn run(args: CleanArgs) -> Result<()> {
    let config = PartialConfig::load(&args.read)?;
    let read_options = config.read_options(&args.read);
    let write_options = config.write_options(&args.write, read_options.naming);
    info!(?read_options, ?write_options, "Resolved cleaning policies.");

    let summary = clean::clean_file(&args.input, &args.output, &read_options, &write_options)?;

    println!(
        "✓ Cleaned {} residue(s) to: {}",
        summary.residues,
        args.output.display()
    );
    println!(
        "  Renamed {} residue(s) and {} terminal oxygen(s); filled {} element(s).",
        summary.renamed_residues, summary.renamed_atoms, summary.filled_elements
    );
    Ok(())
}
