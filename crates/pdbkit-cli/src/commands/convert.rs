use crate::cli::ConvertArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use pdbkit::workflows::convert;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    let config = PartialConfig::load(&args.read)?;
    let read_options = config.read_options(&args.read);
    let write_options = config.write_options(&args.write, read_options.naming);
    info!(?read_options, ?write_options, "Resolved conversion policies.");

    let summary = convert::convert(&args.input, &args.output, &read_options, &write_options)?;

    println!(
        "✓ Wrote {} atom(s), {} terminator(s) to: {}",
        summary.atoms,
        summary.ters,
        args.output.display()
    );
    if summary.models > 1 && !write_options.keep_models {
        println!(
            "  {} models were merged; pass --keep-models to keep MODEL/ENDMDL records.",
            summary.models
        );
    }
    if !summary.omitted_sections.is_empty() {
        let omitted: Vec<_> = summary
            .omitted_sections
            .iter()
            .map(|(section, count)| format!("{} ({})", section, count))
            .collect();
        println!("  Not written: {}", omitted.join(", "));
    }
    Ok(())
}
