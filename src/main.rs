use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use san_audit_tools::commands;
use san_audit_tools::commands::generate_mef3::{GenerateOptions, ReportFormat};
use san_audit_tools::mef3::trailer::DEFAULT_OUTPUT_TAG_PATH;
use san_audit_tools::utils::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "san-audit")]
#[command(about = "SAN switch access-compliance tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug diagnostics on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert raw userconfig dumps into MEF3 audit files
    ///
    /// Scans RAW_DIR recursively for *.userconfig.txt files (also .gz/.zst)
    /// and writes one {customer}-SAN_{host}_{ts}.mef3 file per dump.
    GenerateMef3 {
        /// Directory containing raw dumps
        raw_dir: PathBuf,

        /// Directory for MEF3 output (created if missing)
        mef3_out_dir: PathBuf,

        /// Identity table (default: gecos.txt next to the executable)
        #[arg(long, env = "SAN_AUDIT_GECOS")]
        gecos: Option<PathBuf>,

        /// Value of the #o: tag in the trailer
        #[arg(long, default_value = DEFAULT_OUTPUT_TAG_PATH)]
        output_tag_path: String,

        /// Convert files concurrently
        #[arg(long)]
        parallel: bool,

        /// Report failing files and keep converting the rest
        #[arg(long)]
        continue_on_error: bool,

        /// Write a per-account identity resolution report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Report format (auto-detected from the report extension if not specified)
        #[arg(long, value_enum)]
        report_format: Option<ReportFormat>,
    },

    /// Build the SAN inventory YAML from a hostname/IP list
    Inventory {
        /// Host list (CSV, TSV, semicolon or column separated)
        hosts_file: PathBuf,

        /// Output inventory YAML
        output: PathBuf,

        /// Customer name recorded on every host
        #[arg(long)]
        customer: String,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::GenerateMef3 {
            raw_dir,
            mef3_out_dir,
            gecos,
            output_tag_path,
            parallel,
            continue_on_error,
            report,
            report_format,
        } => {
            let mut options = GenerateOptions::new(raw_dir, mef3_out_dir);
            if let Some(gecos) = gecos {
                options.identity_table = gecos;
            }
            options.output_tag_path = output_tag_path;
            options.parallel = parallel;
            options.continue_on_error = continue_on_error;
            options.report = report;
            options.report_format = report_format;

            commands::generate_mef3::run(&options).map(|_| ())
        }
        Commands::Inventory {
            hosts_file,
            output,
            customer,
        } => commands::inventory::run(&hosts_file, &output, &customer).map(|_| ()),
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "san-audit", &mut std::io::stdout());
            Ok(())
        }
    }
}
