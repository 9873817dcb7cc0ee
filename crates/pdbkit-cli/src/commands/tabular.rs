use crate::cli::TabularArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use pdbkit::workflows::tabular;
use tracing::info;

pub fn run(args: TabularArgs) -> Result<()> {
    let config = PartialConfig::load(&args.read)?;
    let read_options = config.read_options(&args.read);
    let write_options = config.write_options(&args.write, read_options.naming);
    info!("Building {} from {}.", args.output.display(), args.input.display());

    let document = tabular::csv_to_pdb(&args.input, &args.output, &read_options, &write_options)?;

    println!(
        "✓ Wrote {} atom(s), {} terminator(s) to: {}",
        document.atoms.len(),
        document.ters.len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ReadPolicyArgs, WritePolicyArgs};
    use crate::error::CliError;
    use pdbkit::workflows::tabular::IngestError;
    use std::fs;
    use tempfile::tempdir;

    fn args(input: std::path::PathBuf, output: std::path::PathBuf) -> TabularArgs {
        TabularArgs {
            input,
            output,
            read: ReadPolicyArgs::default(),
            write: WritePolicyArgs::default(),
        }
    }

    #[test]
    fn run_writes_the_pdb_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("rows.csv");
        let output = dir.path().join("out.pdb");
        fs::write(&input, "ATOM,1,CA,ALA,A,5,1.0,2.0,3.0,1.00,20.00\n").unwrap();

        run(args(input, output.clone())).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains(
            "ATOM      1  CA  ALA A   5       1.000   2.000   3.000  1.00 20.00"
        ));
    }

    #[test]
    fn bad_rows_are_reported_as_ingest_errors() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("rows.csv");
        fs::write(&input, "ATOM,1,CA,ALA,A,five,1.0,2.0,3.0,1.00,20.00\n").unwrap();

        let result = run(args(input, dir.path().join("out.pdb")));
        assert!(matches!(result, Err(CliError::Ingest(IngestError::Tabular { .. }))));
    }
}
