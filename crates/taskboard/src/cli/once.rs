/*
[INPUT]:  FetchController for the configured subject
[OUTPUT]: Grouped task list printed to stdout, error exit on fetch failure
[POS]:    CLI one-shot mode
[UPDATE]: When changing the printed listing format
*/

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use taskboard::{BoardView, DisplayItem, FetchController, item_label};
use tracing::info;

/// Run the initial load to completion and print the grouped list
pub async fn run_once(mut controller: FetchController) -> Result<()> {
    controller.on_initial_load();
    let view = controller.settle().await;

    if let Some(reason) = view.transient_error.as_deref() {
        bail!("fetch tasks failed: {reason}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(&mut out, &view).context("write task listing")?;
    out.flush().context("flush stdout")?;
    info!(rows = view.items.len(), "listing printed");
    Ok(())
}

fn write_listing<W: Write>(out: &mut W, view: &BoardView) -> io::Result<()> {
    if view.is_empty {
        writeln!(out, "No tasks yet")?;
        return Ok(());
    }
    for item in &view.items {
        match item {
            DisplayItem::Header(label) => writeln!(out, "## {label}")?,
            DisplayItem::Item(record) => writeln!(out, "- {}", item_label(record))?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use taskboard::project;
    use taskboard_adapter::{StaticTaskSource, TaskRecord};

    fn render(view: &BoardView) -> String {
        let mut buf = Vec::new();
        write_listing(&mut buf, view).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn listing_prints_headers_and_rows() {
        let items = project(&[
            TaskRecord::new("1", "ship it", Some("done")),
            TaskRecord::new("2", "triage", None),
        ]);
        let view = BoardView {
            items,
            ..BoardView::default()
        };
        assert_eq!(
            render(&view),
            "## Unknown Status\n- [2] triage\n## Done\n- [1] ship it\n"
        );
    }

    #[test]
    fn empty_listing_says_so() {
        let view = BoardView {
            is_empty: true,
            ..BoardView::default()
        };
        assert_eq!(render(&view), "No tasks yet\n");
    }

    #[tokio::test]
    async fn failed_fetch_is_an_error() {
        let controller =
            FetchController::new(Arc::new(StaticTaskSource::failing("boom")), "");
        let err = run_once(controller).await.expect_err("should fail");
        assert!(err.to_string().contains("boom"));
    }
}
