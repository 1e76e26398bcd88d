use card_catalog::app::export::export_view;
use card_catalog::app::render::{render_detail, render_grid, render_sets};
use card_catalog::app::session::{ReadlineInput, Session, TerminalConfirm};
use card_catalog::config::{Command, FilterArgs, LogFormat};
use card_catalog::domain::ports::{AutoConfirm, ConfigProvider};
use card_catalog::utils::error::{CatalogError, ErrorSeverity};
use card_catalog::utils::logger;
use card_catalog::{Catalog, CardId, Category, CliConfig, DeleteOutcome, LocalStorage, Settings};
use clap::Parser;

fn apply_filters(catalog: &mut Catalog, filter: &FilterArgs, settings: &Settings) {
    let category = filter
        .category
        .as_deref()
        .or_else(|| settings.default_category());
    if let Some(category) = category {
        catalog.select_category(Category::parse(category));
    }
    if let Some(term) = &filter.search {
        catalog.search(term);
    }
}

async fn run(config: CliConfig, settings: Settings) -> Result<(), CatalogError> {
    let source = settings.open_source()?;
    let mut catalog = Catalog::new();

    // 載入失敗時顯示空白列表，不中斷後續輸出
    let load_error = catalog.load(source.as_ref()).await.err();
    if let Some(e) = &load_error {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    }

    match &config.command {
        Command::List(filter) => {
            apply_filters(&mut catalog, filter, &settings);
            print!("{}", render_grid(catalog.view()));
        }
        Command::Sets => print!("{}", render_sets(&catalog.view().sets)),
        Command::Show { id } => {
            if load_error.is_none() {
                let card = catalog.require_card(&CardId::new(id.as_str()))?;
                print!("{}", render_detail(card, settings.bar_width()));
            }
        }
        Command::Delete { id, yes } => {
            let id = CardId::new(id.as_str());
            let outcome = if *yes {
                catalog.delete_card(&id, &mut AutoConfirm(true))
            } else {
                catalog.delete_card(&id, &mut TerminalConfirm::new())
            };

            match outcome {
                DeleteOutcome::Deleted(card) => {
                    println!("🗑️ Deleted {} (not saved, reload restores it)", card.name);
                }
                DeleteOutcome::Cancelled => println!("Nothing deleted"),
                DeleteOutcome::NotFound => {
                    return Err(CatalogError::CardNotFound { id: id.to_string() })
                }
            }
            print!("{}", render_grid(catalog.view()));
        }
        Command::Browse => {
            if let Some(category) = settings.default_category() {
                catalog.select_category(Category::parse(category));
            }
            Session::new(
                &mut catalog,
                ReadlineInput::new()?,
                TerminalConfirm::new(),
                std::io::stdout(),
                settings.bar_width(),
            )
            .run()?;
        }
        Command::Export {
            filter,
            format,
            output,
        } => {
            apply_filters(&mut catalog, filter, &settings);
            let output_path = output
                .clone()
                .unwrap_or_else(|| settings.export_path().to_string());
            let storage = LocalStorage::new(output_path.clone());
            let format = format.unwrap_or(settings.export_format);
            let file_name = export_view(&storage, catalog.view(), format).await?;
            println!("📁 Output saved to: {}/{}", output_path, file_name);
        }
    }

    match load_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::debug!("CLI config: {:?}", config);

    let settings = match Settings::load(&config) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config, settings).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        // 載入錯誤已在 run 中告知使用者
        if !e.is_data_load() {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        }

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}
