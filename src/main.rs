use std::sync::Arc;
use std::time::Duration;

use checkmyroom::analysis::run_analysis;
use checkmyroom::gemini::{GeminiClient, VisionModel};
use checkmyroom::local_store::FileStore;
use checkmyroom::{cli, config, error, report, scanner, server};
use checkmyroom_common::checklist::{BuildingType, ContractType};
use checkmyroom_common::controller::history_entry;
use checkmyroom_common::{render_markdown, AnalysisKind, AnalysisRequest, ChecklistBoard, HistoryStore};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use dialoguer::MultiSelect;
use error::{AppError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            let model: Option<Arc<dyn VisionModel>> = match config::api_key_from_env() {
                Some(key) => Some(Arc::new(GeminiClient::new(key, &config)?)),
                None => {
                    tracing::warn!("GEMINI_API_KEY가 없어 분석 요청은 500으로 응답합니다");
                    None
                }
            };
            server::serve(server::AppState::new(model, config), &bind).await?;
        }

        Commands::Analyze { kind, paths, room, no_history } => {
            analyze(&config, kind, &paths, room.as_deref(), no_history).await?;
        }

        Commands::Checklist { contract, building, toggle, reset } => {
            checklist(contract, building, toggle, reset)?;
        }

        Commands::History { clear, show } => {
            let mut history = HistoryStore::new(FileStore::open_default()?);

            if clear {
                history.clear()?;
                println!("✔ 히스토리를 모두 삭제했습니다");
                return Ok(());
            }

            let items = history.load();
            if items.is_empty() {
                println!("저장된 히스토리가 없습니다");
                return Ok(());
            }

            match show {
                Some(n) => {
                    let item = n
                        .checked_sub(1)
                        .and_then(|idx| items.get(idx))
                        .ok_or_else(|| AppError::Cli(format!("{}번 항목이 없습니다", n)))?;
                    println!("{}\n", report::history_line(n, item));
                    let mut out = report::Rendered::default();
                    report::render_segments(&render_markdown(&item.detail), &mut out);
                    println!("{}", out.body);
                }
                None => {
                    for (idx, item) in items.iter().enumerate() {
                        println!("{}", report::history_line(idx + 1, item));
                    }
                }
            }
        }

        Commands::Config { set_model, show } => {
            let mut config = config;

            if let Some(model) = set_model {
                config.model = model;
                config.save_to(&Config::config_path()?)?;
                println!("✔ 모델을 {} 로 설정했습니다", config.model);
            } else if !show {
                println!("--show 로 설정을 표시하거나 --set-model 로 모델을 바꿀 수 있습니다.");
            }

            if show {
                println!("설정:");
                println!("  파일: {}", Config::config_path()?.display());
                println!("  모델: {}", config.model);
                println!("  API: {}", config.api_base);
                println!("  바인드 주소: {}", config.bind);
                println!("  최대 이미지 크기: {}px", config.max_image_size);
                println!("  타임아웃: {}초", config.timeout_seconds);
                println!("  temperature: {}", config.temperature);
                println!(
                    "  {}: {}",
                    config::API_KEY_ENV,
                    if config::api_key_from_env().is_some() { "설정됨" } else { "미설정" }
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "checkmyroom=debug,tower_http=debug"
    } else {
        "checkmyroom=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn analyze(
    config: &Config,
    kind: AnalysisKind,
    paths: &[PathBuf],
    room: Option<&str>,
    no_history: bool,
) -> Result<()> {
    let api_key = config::api_key_from_env().ok_or(AppError::MissingApiKey)?;

    println!("[1/2] 사진 읽는 중...");
    let images = scanner::collect_images(paths)?;
    if images.is_empty() {
        let joined: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        return Err(AppError::NoImagesFound(joined.join(", ")));
    }
    let payloads = images
        .iter()
        .map(|p| scanner::encode_image(p, config.max_image_size))
        .collect::<Result<Vec<_>>>()?;
    println!("✔ 사진 {}장\n", payloads.len());

    let request = AnalysisRequest { images: payloads, kind };
    let client = GeminiClient::new(api_key, config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .map_err(|e| AppError::Cli(e.to_string()))?,
    );
    spinner.set_message(format!("[2/2] AI 분석 중... ({})", client.model()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcome = run_analysis(&client, &request).await;
    spinner.finish_and_clear();

    let result = outcome?;
    println!("✔ 분석 완료\n");
    report::render_result(&result).print();

    if !no_history {
        if let Some(entry) = history_entry(&result, room.unwrap_or_default()) {
            let mut history = HistoryStore::new(FileStore::open_default()?);
            history.append(entry)?;
            println!("\n✔ 히스토리에 저장했습니다");
        }
    }

    Ok(())
}

fn checklist(
    contract: Option<ContractType>,
    building: Option<BuildingType>,
    toggle: bool,
    reset: bool,
) -> Result<()> {
    let mut board = ChecklistBoard::load(FileStore::open_default()?);

    if contract.is_some() || building.is_some() {
        let current = board.selection();
        board.select(
            contract.unwrap_or(current.contract),
            building.unwrap_or(current.building),
        )?;
    }

    if reset {
        board.reset()?;
        println!("✔ 체크 상태를 초기화했습니다");
    }

    let selection = board.selection();
    let items = board.items();

    if toggle {
        let labels: Vec<&str> = items.iter().map(|i| i.text).collect();
        let defaults: Vec<bool> = items.iter().map(|i| board.is_checked(i.id)).collect();
        let chosen = MultiSelect::new()
            .with_prompt(format!("{} {} 체크리스트 (스페이스: 체크, 엔터: 저장)", selection.contract, selection.building))
            .items(&labels)
            .defaults(&defaults)
            .interact()
            .map_err(|e| AppError::Cli(e.to_string()))?;

        for (idx, item) in items.iter().enumerate() {
            if chosen.contains(&idx) != board.is_checked(item.id) {
                board.toggle(item.id)?;
            }
        }
    }

    println!("📋 {} {} 체크리스트\n", selection.contract, selection.building);
    for item in items {
        let mark = if board.is_checked(item.id) { "☑" } else { "☐" };
        println!("{} {}", mark, item.text);
        if let Some(tip) = item.tip {
            println!("    💡 {}", tip);
        }
    }
    let progress = board.progress();
    println!("\n진행률 {}/{} ({}%)", progress.checked, progress.total, progress.percent);

    Ok(())
}
