use clap::Parser;
use resume_etl::core::ProfileSource;
use resume_etl::utils::error::{ErrorSeverity, Result};
use resume_etl::utils::{logger, validation::Validate};
use resume_etl::{
    CachedReferenceList, CliConfig, EtlEngine, FileProfileSource, HttpProfileSource,
    LocalStorage, ProfileSourceSetting, ResumePipeline, Settings,
};
use std::time::Duration;

async fn run<P: ProfileSource>(settings: Settings, profiles: P) -> Result<String> {
    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let institutions =
        CachedReferenceList::new(&settings.universities_cache, &settings.universities_url)
            .with_max_age_days(settings.cache_max_age_days)
            .with_timeout(timeout);

    // 創建存儲和管道
    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = ResumePipeline::new(storage, profiles, institutions, settings);

    EtlEngine::new(pipeline).run().await
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting resume-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 解析並驗證配置
    let settings = match config.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let result = match settings.profile_source.clone() {
        ProfileSourceSetting::File(path) => run(settings, FileProfileSource::new(path)).await,
        ProfileSourceSetting::Http(endpoint) => {
            run(settings, HttpProfileSource::new(endpoint, timeout)).await
        }
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Resume context generated successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Resume ETL failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
