use std::io::Write;

use anyhow::{Context, Result};
use chatroster_core::constants::LABEL_CONTACTS;
use chatroster_core::{
    CoreConfig, EngineStats, ForeignHandle, ReconciliationEngine, RecordingRenderer, RenderCall, RowPatch,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::script::{Action, Script};

/// A step the engine refused, with the reason.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedStep {
    pub index: usize,
    pub event: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySummary {
    pub stats: EngineStats,
    pub chats: usize,
    pub contacts: usize,
    pub ordering_enabled: bool,
    pub archived_visible: bool,
    pub chat_order: Vec<ForeignHandle>,
    pub contact_order: Vec<ForeignHandle>,
    pub rejected: Vec<RejectedStep>,
}

#[derive(Debug)]
pub struct ReplayReport {
    pub calls: Vec<RenderCall>,
    pub summary: ReplaySummary,
}

/// Feed every script step to a fresh engine and collect the renderer
/// transcript. Events are applied as one burst between `flush` steps, and
/// the run always ends with a flush.
pub fn replay(script: Script, config: CoreConfig) -> Result<ReplayReport> {
    let Script {
        mut backend, events, ..
    } = script;
    let mut engine = ReconciliationEngine::new(config, RecordingRenderer::new());
    let mut rejected = Vec::new();

    info!(steps = events.len(), "replaying script");
    for (index, step) in events.iter().enumerate() {
        let action = step
            .to_action()
            .with_context(|| format!("Step {} ({}) is invalid", index, step.name()))?;
        debug!(index, event = step.name(), "replay step");

        match action {
            Action::Session(event) => {
                if let Err(err) = engine.dispatch(event, &backend) {
                    warn!(index, error = %err, "event rejected");
                    rejected.push(RejectedStep {
                        index,
                        event: step.name(),
                        reason: err.to_string(),
                    });
                }
            }
            Action::ShowWindow { chat, window } => {
                engine.show_chat_window(chat, window);
            }
            Action::ClosePreview { chat } => {
                engine.close_chat_preview(chat, &mut backend);
            }
            Action::ToggleArchived => engine.toggle_archived(),
            Action::SetArchivedVisible(visible) => {
                engine.set_archived_visible(visible);
            }
            Action::Flush => {
                engine.flush();
            }
        }
    }
    engine.flush();

    let summary = ReplaySummary {
        stats: engine.stats(),
        chats: engine.chats().len(),
        contacts: engine.contacts().len(),
        ordering_enabled: engine.ordering_enabled(),
        archived_visible: engine.archived_visible(),
        chat_order: engine.chat_order(),
        contact_order: engine.contact_order(),
        rejected,
    };
    let calls = engine.into_renderer().drain();
    Ok(ReplayReport { calls, summary })
}

fn handle_list(handles: &[ForeignHandle]) -> String {
    handles.iter().map(|h| h.to_string()).collect::<Vec<_>>().join(", ")
}

fn describe_patch(patch: &RowPatch) -> String {
    match patch {
        RowPatch::Title(title) => format!("title = {:?}", title),
        RowPatch::UnreadCount(count) => format!("unread = {}", count),
        RowPatch::Tooltip(text) => format!("tooltip = {:?}", text),
        RowPatch::PreviewerCount(count) => format!("previewers = {}", count),
        RowPatch::ConnectionIndicator(state) => format!("connection = {:?}", state),
        RowPatch::PresenceIndicator(status) => format!("presence = {:?}", status),
        RowPatch::SenderFirstName { user, first_name } => format!("sender {} = {:?}", user, first_name),
    }
}

/// One human-readable line per renderer callback.
pub fn describe_call(call: &RenderCall) -> String {
    match call {
        RenderCall::ChatOrder { rows, summary } => format!(
            "chat order [{}] {} (active {}, inactive {}, archived {})",
            handle_list(rows),
            summary.label(),
            summary.active,
            summary.inactive,
            summary.archived,
        ),
        RenderCall::ContactOrder { rows } => format!("contact order [{}] {}", handle_list(rows), LABEL_CONTACTS),
        RenderCall::Patch {
            list,
            handle,
            widget,
            patch,
        } => format!("patch {} {} {}: {}", list, handle, widget, describe_patch(patch)),
        RenderCall::WindowPatch { handle, window, patch } => {
            format!("window {} of {}: {}", window, handle, describe_patch(patch))
        }
        RenderCall::Destroyed { list, handle, window } => match window {
            Some(window) => format!("destroyed {} {} (closed {})", list, handle, window),
            None => format!("destroyed {} {}", list, handle),
        },
    }
}

/// Write the transcript followed by the summary, as text or JSON lines.
pub fn write_transcript(report: &ReplayReport, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        for call in &report.calls {
            writeln!(out, "{}", serde_json::to_string(call)?)?;
        }
        writeln!(
            out,
            "{}",
            serde_json::to_string(&serde_json::json!({ "summary": report.summary }))?
        )?;
        return Ok(());
    }

    for call in &report.calls {
        writeln!(out, "{}", describe_call(call))?;
    }
    let summary = &report.summary;
    let stats = &summary.stats;
    writeln!(out, "---")?;
    writeln!(
        out,
        "events {} | chat rebuilds {} | contact rebuilds {} | patches {} | suppressed {} | absorbed {}",
        stats.events, stats.chat_rebuilds, stats.contact_rebuilds, stats.patches, stats.suppressed, stats.absorbed_unknown,
    )?;
    writeln!(
        out,
        "chats {} | contacts {} | ordering {} | archived {}",
        summary.chats,
        summary.contacts,
        if summary.ordering_enabled { "enabled" } else { "gated" },
        if summary.archived_visible { "shown" } else { "hidden" },
    )?;
    for rejected in &summary.rejected {
        writeln!(out, "rejected step {} ({}): {}", rejected.index, rejected.event, rejected.reason)?;
    }
    Ok(())
}
