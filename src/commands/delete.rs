//! Delete command handlers.

use crate::args::{ClearArgs, DeleteArgs};
use crate::backup::PRE_CLEAR;
use crate::commands::{open_app, persist_app, select_row, Out};
use crate::error::{ErrorType, IntoResult};
use crate::form::Prompter;
use crate::model::Record;
use crate::{Config, Result};

/// Deletes the row numbered `args.row()` (starting at 1).
///
/// Unless `--yes` is given the user is asked to confirm first, and the row is kept if they say no
/// or dismiss the question.
///
/// # Errors
///
/// - Returns a `Selection` error if the row does not exist.
/// - Returns an error if the working file cannot be read or written.
pub async fn delete<P: Prompter>(
    config: Config,
    args: DeleteArgs,
    prompter: &mut P,
) -> Result<Out<Record>> {
    let mut app = open_app(&config).await?;
    select_row(&mut app, args.row())?;

    if !args.yes()
        && prompter
            .confirm("Are you sure you want to delete the selected entry?")
            .pub_result(ErrorType::Input)?
            != Some(true)
    {
        return Ok("Nothing was deleted".into());
    }

    let deleted = app.delete_selected().pub_result(ErrorType::Selection)?;
    persist_app(&config, &app).await?;
    Ok(Out::new(
        format!("Deleted row {}: '{}'", args.row(), deleted.item),
        deleted,
    ))
}

/// Deletes every row. The working file is copied to the backups directory first.
///
/// Unless `--yes` is given the user is asked to confirm first.
///
/// # Returns
///
/// The number of rows deleted.
pub async fn clear<P: Prompter>(
    config: Config,
    args: ClearArgs,
    prompter: &mut P,
) -> Result<Out<usize>> {
    let mut app = open_app(&config).await?;
    let count = app.store().count();
    if count == 0 {
        return Ok(Out::new("The table is already empty", 0));
    }

    let question = format!("Are you sure you want to delete all {count} entries?");
    if !args.yes() && prompter.confirm(&question).pub_result(ErrorType::Input)? != Some(true) {
        return Ok("Nothing was deleted".into());
    }

    config
        .backup()
        .snapshot(PRE_CLEAR)
        .await
        .pub_result(ErrorType::File)?;
    app.clear();
    persist_app(&config, &app).await?;
    Ok(Out::new(
        format!("Deleted {count} entr{}", if count == 1 { "y" } else { "ies" }),
        count,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use crate::test::{ScriptedPrompter, TestEnv};

    #[tokio::test]
    async fn test_delete_confirmed() {
        let env = TestEnv::new().await;
        let mut prompter = ScriptedPrompter::accept_all();
        let out = delete(env.config(), DeleteArgs::new(2, false), &mut prompter)
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().item, "Desk Chair");
        assert_eq!(
            prompter.questions(),
            &["Are you sure you want to delete the selected entry?"]
        );

        let records = env.records().await;
        let mut expected = Record::examples();
        expected.remove(1);
        assert_eq!(records, expected);
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let env = TestEnv::new().await;
        let mut prompter = ScriptedPrompter::decline_all();
        let out = delete(env.config(), DeleteArgs::new(1, false), &mut prompter)
            .await
            .unwrap();
        assert!(out.structure().is_none());
        assert_eq!(env.records().await, Record::examples());
    }

    #[tokio::test]
    async fn test_delete_yes_skips_question() {
        let env = TestEnv::new().await;
        let mut prompter = ScriptedPrompter::decline_all();
        delete(env.config(), DeleteArgs::new(3, true), &mut prompter)
            .await
            .unwrap();
        assert!(prompter.questions().is_empty());
        assert_eq!(env.records().await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_row() {
        let env = TestEnv::new().await;
        let mut prompter = ScriptedPrompter::accept_all();
        let e = delete(env.config(), DeleteArgs::new(0, true), &mut prompter)
            .await
            .unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::Selection));
        assert_eq!(env.records().await.len(), 3);
    }

    #[tokio::test]
    async fn test_clear_takes_backup() {
        let env = TestEnv::new().await;
        let mut prompter = ScriptedPrompter::accept_all();
        let out = clear(env.config(), ClearArgs::default(), &mut prompter)
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&3));
        assert_eq!(out.message(), "Deleted 3 entries");
        assert!(env.records().await.is_empty());

        let mut backups = tokio::fs::read_dir(env.config().backups()).await.unwrap();
        let entry = backups.next_entry().await.unwrap().unwrap();
        assert!(entry
            .file_name()
            .to_string_lossy()
            .starts_with("pre-clear."));
        let saved = crate::codec::load(&entry.path()).await.unwrap();
        assert_eq!(saved, Record::examples());
    }

    #[tokio::test]
    async fn test_clear_declined() {
        let env = TestEnv::new().await;
        let mut prompter = ScriptedPrompter::dismiss_all();
        clear(env.config(), ClearArgs::default(), &mut prompter)
            .await
            .unwrap();
        assert_eq!(env.records().await, Record::examples());
    }

    #[tokio::test]
    async fn test_clear_empty_table() {
        let env = TestEnv::with_records(&[]).await;
        let mut prompter = ScriptedPrompter::accept_all();
        let out = clear(env.config(), ClearArgs::new(true), &mut prompter)
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&0));
        assert!(prompter.questions().is_empty());
    }
}
