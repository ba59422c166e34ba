use barflow::config::ImportConfig;
use barflow::{report, runner};

fn main() {
    dotenv::dotenv().ok();

    // Logs to stderr so stdout stays clean for shell pipelines
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = match ImportConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🚀 Starting daily-bar import...");
    log::info!("📁 Data directory: {}", config.data_dir.display());
    log::info!("💾 Database: {}", config.db_path.display());
    log::info!("   Commit policy: {}", config.commit_policy);
    log::info!("   Pragma profile: {}", config.pragma_profile.as_str());

    let summary = match runner::run_import(&config) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🎉 Import complete!");
    log::info!("📊 Total records written: {}", summary.records_written);
    log::info!("❌ Total rejected: {}", summary.records_rejected);
    log::info!("⏱️  Duration: {:.1} seconds", summary.elapsed_secs);
    log::info!("🚀 Speed: {:.0} records/second", summary.records_per_sec);

    if let Some(path) = &config.report_path {
        if let Err(e) = report::append_run_report(path, &summary) {
            log::error!("⚠️  Failed to write run report: {}", e);
        }
    }
}
