use anyhow::Result;
use card_catalog::app::export::export_view;
use card_catalog::config::{ExportFormat, Settings};
use card_catalog::domain::ports::AutoConfirm;
use card_catalog::{CardId, Catalog, Category, CliConfig, DeleteOutcome, FileSource, LocalStorage};
use clap::Parser;
use tempfile::TempDir;

const CARDS: &str = r#"{
    "cards": [
        {"id": 1, "name": "Abra", "set": "A", "setNumber": "43/102", "price": 10},
        {"id": 2, "name": "Zed", "set": "B", "setNumber": "B-2", "price": 5},
        {"id": 3, "name": "Kadabra", "set": "A", "setNumber": "32/102", "price": 7,
         "psaGrade": "10",
         "population": {"total": 30, "psa10": 10, "psa9": 20, "psa8": 0, "psa7": 0, "psa6Lower": 0}}
    ]
}"#;

async fn loaded_catalog(dir: &TempDir) -> Result<Catalog> {
    let path = dir.path().join("cards.json");
    tokio::fs::write(&path, CARDS).await?;

    let mut catalog = Catalog::new();
    catalog.load(&FileSource::new(path.to_str().unwrap())).await?;
    Ok(catalog)
}

fn ids(catalog: &Catalog) -> Vec<&str> {
    catalog.view().cards.iter().map(|c| c.id.as_str()).collect()
}

#[tokio::test]
async fn test_category_and_search_flow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut catalog = loaded_catalog(&temp_dir).await?;

    assert_eq!(ids(&catalog), vec!["1", "2", "3"]);

    catalog.select_category(Category::parse("A"));
    assert_eq!(ids(&catalog), vec!["1", "3"]);
    assert_eq!(catalog.view().summary.count, 2);
    assert_eq!(catalog.view().summary.total_value, 17.0);

    catalog.select_category(Category::All);
    catalog.search("AB");
    assert_eq!(ids(&catalog), vec!["1", "3"]);

    catalog.search("102");
    catalog.select_category(Category::parse("B"));
    assert!(ids(&catalog).is_empty());
    assert_eq!(catalog.view().summary.average(), 0.0);

    Ok(())
}

#[tokio::test]
async fn test_delete_flow_updates_every_view() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut catalog = loaded_catalog(&temp_dir).await?;

    let cancelled = catalog.delete_card(&CardId::from(2), &mut AutoConfirm(false));
    assert_eq!(cancelled, DeleteOutcome::Cancelled);
    assert_eq!(catalog.view().sets, vec!["A", "B"]);

    let deleted = catalog.delete_card(&CardId::from(2), &mut AutoConfirm(true));
    assert!(matches!(deleted, DeleteOutcome::Deleted(_)));
    assert_eq!(catalog.view().sets, vec!["A"]);
    assert_eq!(ids(&catalog), vec!["1", "3"]);
    assert_eq!(catalog.view().summary.total_value, 17.0);

    let again = catalog.delete_card(&CardId::from(2), &mut AutoConfirm(true));
    assert_eq!(again, DeleteOutcome::NotFound);
    assert_eq!(ids(&catalog), vec!["1", "3"]);

    Ok(())
}

#[tokio::test]
async fn test_deletions_are_not_durable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut catalog = loaded_catalog(&temp_dir).await?;
    catalog.delete_card(&CardId::from(1), &mut AutoConfirm(true));
    assert_eq!(catalog.store().len(), 2);

    let reloaded = loaded_catalog(&temp_dir).await?;
    assert_eq!(reloaded.store().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_missing_file_surfaces_data_load_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("missing.json");

    let mut catalog = Catalog::new();
    let err = catalog
        .load(&FileSource::new(path.to_str().unwrap()))
        .await
        .unwrap_err();

    assert!(err.is_data_load());
    assert!(catalog.view().cards.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_export_filtered_view() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut catalog = loaded_catalog(&temp_dir).await?;
    catalog.select_category(Category::parse("A"));

    let out_dir = temp_dir.path().join("out");
    let storage = LocalStorage::new(out_dir.to_str().unwrap().to_string());

    let csv_name = export_view(&storage, catalog.view(), ExportFormat::Csv).await?;
    let csv = tokio::fs::read_to_string(out_dir.join(csv_name)).await?;
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Kadabra"));
    assert!(!csv.contains("Zed"));

    let json_name = export_view(&storage, catalog.view(), ExportFormat::Json).await?;
    let mut reloaded = Catalog::new();
    let count = reloaded
        .load(&FileSource::new(out_dir.join(json_name).to_str().unwrap()))
        .await?;
    assert_eq!(count, 2);
    assert_eq!(reloaded.view().sets, vec!["A"]);

    Ok(())
}

#[tokio::test]
async fn test_settings_from_toml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let cards_path = temp_dir.path().join("cards.json");
    tokio::fs::write(&cards_path, CARDS).await?;

    let normalized = cards_path.to_str().unwrap().replace('\\', "/");
    let config_path = temp_dir.path().join("catalog.toml");
    tokio::fs::write(
        &config_path,
        format!(
            r#"
[source]
location = "{}"

[display]
default_category = "B"
bar_width = 20

[export]
format = "json"
"#,
            normalized
        ),
    )
    .await?;

    let cli = CliConfig::try_parse_from([
        "card-catalog",
        "--config",
        config_path.to_str().unwrap(),
        "sets",
    ])?;
    let settings = Settings::load(&cli)?;
    assert_eq!(settings.bar_width, 20);
    assert_eq!(settings.export_format, ExportFormat::Json);
    assert_eq!(settings.default_category.as_deref(), Some("B"));

    let source = settings.open_source()?;
    let mut catalog = Catalog::new();
    catalog.load(source.as_ref()).await?;
    assert_eq!(catalog.store().len(), 3);

    Ok(())
}
