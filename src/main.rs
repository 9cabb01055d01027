mod cli;
mod config;
mod logging;

use cli::Args;
use config::Settings;
use ossprey_scan::prelude::*;
use serde_json::json;
use std::process;

/// Identifier of the finding injected by `--dry-run-malicious`
const DRY_RUN_FINDING_ID: &str = "OSSPREY-DRY-RUN";

fn main() {
    let args = Args::parse_args();

    if let Err(e) = logging::init_tracing(args.verbose) {
        eprintln!("⚠️  {}", e);
    }

    let settings = match Settings::resolve(&args) {
        Ok(settings) => settings,
        Err(e) => {
            report_error(&e);
            process::exit(ExitCode::InvalidArguments.as_i32());
        }
    };

    let code = match run(&settings) {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            match exit_code_for(&e) {
                ExitCode::ApplicationError if settings.soft_error => {
                    eprintln!("⚠️  --soft-error is set, exiting successfully");
                    ExitCode::Success
                }
                code => code,
            }
        }
    };

    process::exit(code.as_i32());
}

fn run(settings: &Settings) -> Result<ExitCode> {
    // Fail before scanning when the service cannot be reached anyway
    let validator_config = if settings.dry_run {
        None
    } else {
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(ScanError::missing_api_key)?;
        Some(ValidatorConfig::new(&settings.url, api_key)?)
    };

    let reporter = StderrProgressReporter::new();

    let scanner =
        FilesystemScanner::new(settings.mode).with_exclusions(settings.exclude_paths.clone());
    let use_case = BuildInventoryUseCase::new(
        scanner,
        FileSystemReader::new(),
        HostEnvironmentProbe::new(),
        &reporter,
    );
    let mut inventory =
        use_case.execute(InventoryRequest::new(settings.project_path.clone()))?;

    let formatter = CompactInventoryFormatter::new();

    match validator_config {
        None => {
            if settings.dry_run_malicious {
                inject_synthetic_finding(&mut inventory);
            }
            reporter.report("🧪 Dry run: the inventory was not submitted");
        }
        Some(config) => {
            let sleeper = InterruptibleSleeper::new();
            let transport = HttpScanTransport::new(sleeper.clone())?;
            let validator = RemoteValidator::new(config, transport, sleeper)?;

            reporter.report_waiting("Waiting for the scanning service verdict...");
            let verdict = validator
                .validate(&formatter.to_compact(&inventory))?
                .ok_or_else(|| anyhow::anyhow!("No verdict was returned by the scanning service"))?;
            reporter.report("📥 Verdict received");
            formatter.merge_verdict(&mut inventory, &verdict)?;
        }
    }

    let presenter: Box<dyn OutputPresenter> = match &settings.output {
        Some(path) => Box::new(FileSystemWriter::new(path.clone())),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&formatter.format(&inventory)?)?;

    if inventory.has_findings() {
        for finding in inventory.findings() {
            reporter.report_warning(&format!(
                "WARNING: malware detected: {}",
                describe_finding(finding)
            ));
        }
        return Ok(ExitCode::MaliciousPackageDetected);
    }

    reporter.report_completion("✅ No malware found");
    Ok(ExitCode::Success)
}

fn inject_synthetic_finding(inventory: &mut Inventory) {
    let target = inventory
        .components()
        .next()
        .map(|c| c.identity().to_string());
    inventory.add_finding(json!({
        "id": DRY_RUN_FINDING_ID,
        "description": "Synthetic finding injected by --dry-run-malicious",
        "package": target,
    }));
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ScanError>() {
        Some(ScanError::Configuration { .. }) => ExitCode::InvalidArguments,
        _ => ExitCode::ApplicationError,
    }
}

fn report_error(error: &anyhow::Error) {
    eprintln!("\n❌ An error occurred:\n");
    eprintln!("{}", error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("\nCaused by: {}", err);
        source = err.source();
    }

    eprintln!();
}
