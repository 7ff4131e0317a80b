use std::path::Path;

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::key::load_answer_key;
use crate::matcher::{key_item_for, matches_key};
use crate::model::{
    Acceptance, AnswerKey, CheckResult, CheckSummary, Discrepancy, DiscrepancyReason,
    GradedStatus, ItemTally, ResponseRow,
};
use crate::responses::{group_by_item, load_responses};

/// Both inputs, fully read before any reconciliation starts.
pub struct CheckInput {
    pub key: AnswerKey,
    pub rows: Vec<ResponseRow>,
}

/// Resolve input paths under `root` and read them. The response table is
/// checked first, then the answer key; either missing aborts the run.
pub fn load_inputs(root: &Path, config: &CheckConfig) -> Result<CheckInput, CheckError> {
    let responses_path = config.paths.responses_under(root);
    let key_path = config.paths.answer_key_under(root);

    if !responses_path.exists() {
        return Err(CheckError::ResponsesMissing { path: responses_path });
    }
    if !key_path.exists() {
        return Err(CheckError::KeyMissing { path: key_path });
    }

    let rows = load_responses(&responses_path)?;
    let key = load_answer_key(&key_path, &config.scale)?;
    if key.is_empty() {
        tracing::warn!(scale = %config.scale, "answer key has no entries for scale");
    }

    Ok(CheckInput { key, rows })
}

/// Re-grade every row against the key. Returns discrepancies in group
/// order (sorted item code), file order within a group.
pub fn run(config: &CheckConfig, input: &CheckInput) -> Result<CheckResult, CheckError> {
    let empty = Acceptance::default();
    let mut summary = CheckSummary::default();
    let mut discrepancies = Vec::new();
    let mut items = Vec::new();

    for (item, rows) in group_by_item(&input.rows) {
        let key_item = key_item_for(item, &config.naming);
        let acceptance = key_item.as_deref().and_then(|k| input.key.get(k));

        if acceptance.is_none() {
            summary.unkeyed_items += 1;
            match key_item.as_deref() {
                Some(k) => tracing::warn!(item, key_item = k, "no answer key entry; checking against empty key"),
                None => tracing::warn!(
                    item,
                    prefix = %config.naming.item_prefix,
                    "item code lacks naming prefix; checking against empty key"
                ),
            }
        }
        let allowed = acceptance.unwrap_or(&empty);

        let mut tally = ItemTally {
            item: item.to_string(),
            key_item: key_item.clone(),
            keyed: acceptance.is_some(),
            ..ItemTally::default()
        };

        for row in rows {
            let response = row.response.trim();
            let status = row.status()?;
            let matched = matches_key(response, allowed);
            summary.rows_checked += 1;

            let reason = match status {
                GradedStatus::Correct => {
                    summary.correct += 1;
                    *tally.correct.entry(response.to_string()).or_insert(0) += 1;
                    (!matched).then_some(DiscrepancyReason::CountedCorrectNotInKey)
                }
                GradedStatus::Incorrect => {
                    summary.incorrect += 1;
                    *tally.incorrect.entry(response.to_string()).or_insert(0) += 1;
                    matched.then_some(DiscrepancyReason::CountedIncorrectMatchesKey)
                }
                GradedStatus::NotApplicable => {
                    summary.not_applicable += 1;
                    tally.not_applicable += 1;
                    None
                }
            };

            if let Some(reason) = reason {
                tracing::debug!(item, line = row.line, response, %status, %reason, "discrepancy");
                discrepancies.push(Discrepancy {
                    item: item.to_string(),
                    response: response.to_string(),
                    reason,
                });
            }
        }

        items.push(tally);
    }

    summary.discrepancies = discrepancies.len();
    tracing::info!(
        rows = summary.rows_checked,
        discrepancies = summary.discrepancies,
        unkeyed_items = summary.unkeyed_items,
        "check complete"
    );

    Ok(CheckResult {
        scale: config.scale.clone(),
        summary,
        discrepancies,
        items,
    })
}
