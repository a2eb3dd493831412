//! Save and load command handlers. These copy the table between the working CSV file and any other
//! CSV file.

use crate::args::PathArgs;
use crate::backup::PRE_LOAD;
use crate::codec;
use crate::commands::{open_app, persist_app, plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;

/// Writes the table to `args.path()`, replacing that file if it exists.
///
/// # Returns
///
/// The path that was written.
///
/// # Errors
///
/// - Returns a `File` error if the file cannot be written.
pub async fn save(config: Config, args: PathArgs) -> Result<Out<PathBuf>> {
    let app = open_app(&config).await?;
    codec::save(args.path(), app.records())
        .await
        .with_context(|| format!("Failed to save file {}", args.path().display()))
        .pub_result(ErrorType::File)?;
    Ok(Out::new(
        "File saved successfully.",
        args.path().to_path_buf(),
    ))
}

/// Replaces the table with the rows read from `args.path()`. Lines that do not have eight fields
/// are skipped. The working file is copied to the backups directory before it is overwritten.
///
/// If `args.path()` cannot be read the table is left unchanged.
///
/// # Returns
///
/// The number of rows loaded.
pub async fn load(config: Config, args: PathArgs) -> Result<Out<usize>> {
    let records = codec::load(args.path())
        .await
        .with_context(|| format!("Load failed for {}", args.path().display()))
        .pub_result(ErrorType::File)?;

    let mut app = open_app(&config).await?;
    if let Some(backup) = config
        .backup()
        .snapshot(PRE_LOAD)
        .await
        .pub_result(ErrorType::File)?
    {
        debug!("Copied the previous table to {}", backup.display());
    }

    let count = records.len();
    app.replace_all(records);
    persist_app(&config, &app).await?;
    Ok(Out::new(
        format!(
            "Loaded {count} row{} from {}",
            plural(count),
            args.path().display()
        ),
        count,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use crate::model::Record;
    use crate::test::TestEnv;
    use crate::utils;

    #[tokio::test]
    async fn test_save() {
        let env = TestEnv::new().await;
        let path = env.path("export.csv");
        let out = save(env.config(), PathArgs::new(&path)).await.unwrap();
        assert_eq!(out.message(), "File saved successfully.");
        assert_eq!(out.structure(), Some(&path));
        assert_eq!(codec::load(&path).await.unwrap(), Record::examples());
    }

    #[tokio::test]
    async fn test_save_failure() {
        let env = TestEnv::new().await;
        let path = env.path("missing").join("export.csv");
        let e = save(env.config(), PathArgs::new(&path)).await.unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::File));
        assert!(format!("{e:#}").contains("Failed to save file"));
    }

    #[tokio::test]
    async fn test_load_replaces_table() {
        let env = TestEnv::new().await;
        let path = env.path("import.csv");
        let text = "Category,Item,Material,Description,Quantity,Unit Cost,Cost,Notes\n\
            Garden,Hose,Rubber,25 ft,2,$19.99,$39.98,\n\
            too,few,fields\n\
            Garden,Rake,Steel,,1,$15.00,$15.00,\"sturdy, long\"\n";
        utils::write(&path, text).await.unwrap();

        let out = load(env.config(), PathArgs::new(&path)).await.unwrap();
        assert_eq!(out.structure(), Some(&2));
        assert!(out.message().starts_with("Loaded 2 rows"));

        let records = env.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].item, "Hose");
        assert_eq!(records[1].notes, "sturdy, long");

        let mut backups = tokio::fs::read_dir(env.config().backups()).await.unwrap();
        let entry = backups.next_entry().await.unwrap().unwrap();
        assert!(entry.file_name().to_string_lossy().starts_with("pre-load."));
        assert_eq!(
            codec::load(&entry.path()).await.unwrap(),
            Record::examples()
        );
    }

    #[tokio::test]
    async fn test_load_keeps_stored_cost() {
        let env = TestEnv::new().await;
        let path = env.path("import.csv");
        let text = "header\nA,B,C,D,2,$3.00,$999.00,n\n";
        utils::write(&path, text).await.unwrap();
        load(env.config(), PathArgs::new(&path)).await.unwrap();
        assert_eq!(env.records().await[0].cost, "$999.00");
    }

    #[tokio::test]
    async fn test_load_missing_file_leaves_table() {
        let env = TestEnv::new().await;
        let e = load(env.config(), PathArgs::new(env.path("nope.csv")))
            .await
            .unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::File));
        assert!(format!("{e:#}").contains("Load failed"));
        assert_eq!(env.records().await, Record::examples());
    }
}
