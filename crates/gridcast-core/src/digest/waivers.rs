// Waiver wire activity report.

use super::{separator, ReportContext};
use crate::model::{Transaction, TransactionKind};
use crate::recommend::PlayerTag;

/// Who made a transaction: the creator's display name, else the owner of
/// the first roster involved, else "Unknown".
pub fn creator_name(ctx: &ReportContext<'_>, txn: &Transaction) -> String {
    if let Some(id) = txn.creator_id.as_deref().filter(|id| !id.is_empty()) {
        return ctx.user_name(id);
    }
    match txn.roster_ids.first() {
        Some(&rid) => match ctx.roster(rid).and_then(|r| r.owner_id.as_deref()) {
            Some(owner) => ctx.user_name(owner),
            None => format!("Roster {rid}"),
        },
        None => "Unknown".to_string(),
    }
}

pub fn render(ctx: &ReportContext<'_>) -> String {
    let mut out = vec![format!("📥 Waiver Activity — Week {}", ctx.week), String::new()];

    let reported: Vec<&Transaction> = ctx
        .snapshot
        .transactions
        .iter()
        .filter(|t| t.kind.is_reported())
        .collect();
    if reported.is_empty() {
        out.push("No waiver transactions found.".to_string());
        return out.join("\n");
    }

    for txn in reported {
        let creator = creator_name(ctx, txn);
        for pid in txn.adds.keys() {
            let tag = PlayerTag::resolve(ctx.players(), pid);
            let annotation = match ctx.ros.get(pid) {
                Some(score) if *score != 0.0 => format!(" — ROS: {score:.1}"),
                _ => String::new(),
            };
            out.push(format!(
                "➕ {:25} ({}) added by {creator}{annotation}",
                tag.name, tag.position
            ));
        }
        for pid in txn.drops.keys() {
            let tag = PlayerTag::resolve(ctx.players(), pid);
            out.push(format!("➖ {:25} ({}) dropped by {creator}", tag.name, tag.position));
        }
        if txn.kind == TransactionKind::Trade {
            out.push(format!("🔄 Trade executed by {creator}"));
        }
        out.push(separator());
    }
    out.join("\n")
}
