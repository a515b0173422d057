use std::process::ExitCode;

use fdpricer::PricerConfig;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = match PricerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        spot = cfg.params.spot,
        time_steps = cfg.params.time_steps,
        space_steps = cfg.params.space_steps,
        upper_boundary = ?cfg.upper_boundary,
        "pricing"
    );

    match cfg.engine().solve() {
        Ok(solution) => match solution.value_at(cfg.params.spot) {
            Ok(value) => {
                tracing::info!(
                    max_layer_iterations = solution.max_layer_iterations(),
                    total_iterations = solution.total_iterations(),
                    "penalty iterations"
                );
                println!("V(S = {}, t = 0) = {value:.10}", cfg.params.spot);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("interpolation failed: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!("pricing failed: {e}");
            ExitCode::FAILURE
        }
    }
}
