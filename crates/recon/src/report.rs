use std::io::{self, Write};

use crate::model::{CheckResult, ItemTally};

/// Human-readable report, as printed by the default invocation.
pub fn write_report<W: Write>(out: &mut W, result: &CheckResult) -> io::Result<()> {
    writeln!(out, "Checked responses against answer key")?;
    if result.discrepancies.is_empty() {
        writeln!(out, "No mismatches detected; counts align with acceptance rules.")?;
        return Ok(());
    }

    writeln!(out, "Found potential mismatches:")?;
    for d in &result.discrepancies {
        writeln!(out, " - {}: '{}' -> {}", d.item, d.response, d.reason)?;
    }
    Ok(())
}

/// Per-item breakdown of which responses were counted correct / incorrect.
pub fn write_item_tallies<W: Write>(out: &mut W, result: &CheckResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Per-item responses ({} rows, {} correct, {} incorrect, {} NA):",
        result.summary.rows_checked,
        result.summary.correct,
        result.summary.incorrect,
        result.summary.not_applicable,
    )?;
    for tally in &result.items {
        write_tally(out, tally)?;
    }
    Ok(())
}

fn write_tally<W: Write>(out: &mut W, tally: &ItemTally) -> io::Result<()> {
    let key = match (&tally.key_item, tally.keyed) {
        (Some(k), true) => k.clone(),
        (Some(k), false) => format!("{k} (not in key)"),
        (None, _) => "(no key mapping)".to_string(),
    };
    writeln!(out, "{} -> {}", tally.item, key)?;
    writeln!(out, "  correct:   {}", format_counts(&tally.correct))?;
    writeln!(out, "  incorrect: {}", format_counts(&tally.incorrect))?;
    if tally.not_applicable > 0 {
        writeln!(out, "  NA rows:   {}", tally.not_applicable)?;
    }
    Ok(())
}

fn format_counts(counts: &std::collections::BTreeMap<String, usize>) -> String {
    if counts.is_empty() {
        return "-".into();
    }
    counts
        .iter()
        .map(|(resp, n)| format!("'{resp}' x{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckSummary, Discrepancy, DiscrepancyReason};
    use std::collections::BTreeMap;

    fn result(discrepancies: Vec<Discrepancy>) -> CheckResult {
        CheckResult {
            scale: "CRT".into(),
            summary: CheckSummary::default(),
            discrepancies,
            items: Vec::new(),
        }
    }

    fn render(result: &CheckResult) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn no_mismatches() {
        assert_eq!(
            render(&result(Vec::new())),
            "Checked responses against answer key\n\
             No mismatches detected; counts align with acceptance rules.\n"
        );
    }

    #[test]
    fn mismatch_lines() {
        let out = render(&result(vec![
            Discrepancy {
                item: "crt_1_num".into(),
                response: "99".into(),
                reason: DiscrepancyReason::CountedCorrectNotInKey,
            },
            Discrepancy {
                item: "crt_2_num".into(),
                response: "".into(),
                reason: DiscrepancyReason::CountedCorrectNotInKey,
            },
            Discrepancy {
                item: "crt_3_num".into(),
                response: "4".into(),
                reason: DiscrepancyReason::CountedIncorrectMatchesKey,
            },
        ]));
        assert_eq!(
            out,
            "Checked responses against answer key\n\
             Found potential mismatches:\n \
             - crt_1_num: '99' -> counted correct but not in key\n \
             - crt_2_num: '' -> counted correct but not in key\n \
             - crt_3_num: '4' -> counted incorrect but matches key\n"
        );
    }

    #[test]
    fn tallies_render_mapping_and_counts() {
        let mut correct = BTreeMap::new();
        correct.insert("5".to_string(), 2);
        correct.insert("0.05".to_string(), 1);
        let mut r = result(Vec::new());
        r.summary.rows_checked = 4;
        r.summary.correct = 3;
        r.summary.not_applicable = 1;
        r.items = vec![
            ItemTally {
                item: "crt_1_num".into(),
                key_item: Some("CRT_1".into()),
                keyed: true,
                correct,
                incorrect: BTreeMap::new(),
                not_applicable: 1,
            },
            ItemTally {
                item: "bat_num".into(),
                ..ItemTally::default()
            },
        ];

        let mut buf = Vec::new();
        write_item_tallies(&mut buf, &r).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "\nPer-item responses (4 rows, 3 correct, 0 incorrect, 1 NA):\n\
             crt_1_num -> CRT_1\n\
             \x20 correct:   '0.05' x1, '5' x2\n\
             \x20 incorrect: -\n\
             \x20 NA rows:   1\n\
             bat_num -> (no key mapping)\n\
             \x20 correct:   -\n\
             \x20 incorrect: -\n"
        );
    }
}
