use clap::Parser;
use samur_activations::app::render::render;
use samur_activations::core::Storage;
use samur_activations::utils::error::{ActivationError, ErrorSeverity};
use samur_activations::utils::{logger, validation::Validate};
use samur_activations::{
    activations_query, ActivationsView, CancelToken, CliConfig, LocalStorage, SparqlClient,
};

fn exit_with(e: &ActivationError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 130,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.print_query {
        println!("{}", activations_query().trim());
        return Ok(());
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let client = SparqlClient::from_config(&config).unwrap_or_else(|e| exit_with(&e));
    tracing::info!("🚀 Fetching activations from {}", client.endpoint());

    let (cancel_handle, cancel_token) = CancelToken::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_handle.cancel();
        }
    });

    let mut view = ActivationsView::new(client);
    let state = view
        .mount(cancel_token)
        .await
        .unwrap_or_else(|e| exit_with(&e));

    let output = render(config.format, state, view.records()).unwrap_or_else(|e| exit_with(&e));

    match &config.output_path {
        Some(path) => {
            let written = LocalStorage::new(".")
                .write_file(path, output.as_bytes())
                .await
                .unwrap_or_else(|e| exit_with(&e));
            tracing::info!("📁 Output saved to: {}", written);
        }
        None => print!("{}", output),
    }

    Ok(())
}
