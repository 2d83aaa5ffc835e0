// Sequential append planner: one batch, forward-moving cursor.
//
// Every offset derives from the lengths of texts inserted earlier in
// the same batch, and the service applies a batch in list order, so
// the accumulated cursor always equals the true post-edit position.
// No mid-batch re-read is needed.

use crate::plan::{utf16_len, DocumentPosition, EditOperation, TextStyle};
use crate::report::{ReportContent, REPORT_HEADING};

/// The planned batch plus the cursor position after the last insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialPlan {
    pub ops: Vec<EditOperation>,
    pub end_cursor: DocumentPosition,
}

/// Plan the bullet-format report as a single batch appended at
/// `insertion_point` (the current end of the document).
pub fn plan_bullet_append(
    insertion_point: DocumentPosition,
    content: &ReportContent,
) -> SequentialPlan {
    let mut ops = Vec::new();
    let mut cursor = insertion_point;

    // The page break lands one offset before the content start. It
    // precedes everything else in the batch, so later growth never
    // touches it.
    ops.push(EditOperation::InsertPageBreak { at: insertion_point.saturating_sub(1) });

    ops.push(EditOperation::InsertText { at: cursor, text: REPORT_HEADING.to_string() });
    let heading_len = utf16_len(REPORT_HEADING);
    ops.push(EditOperation::SetTextStyle {
        start: cursor,
        end: cursor + heading_len,
        style: TextStyle::heading(),
    });
    cursor += heading_len;

    for (bucket, block) in content.sections.ordered() {
        let title_text = format!("{}\n", bucket.title());
        let title_len = utf16_len(&title_text);
        ops.push(EditOperation::InsertText { at: cursor, text: title_text });
        cursor += title_len;

        // An empty block still gets its newline and bullet range so
        // the section structure survives a zero-item bucket.
        let bullet_text = format!("{}\n", block.joined());
        let bullet_len = utf16_len(&bullet_text);
        ops.push(EditOperation::InsertText { at: cursor, text: bullet_text });
        ops.push(EditOperation::CreateBullets { start: cursor, end: cursor + bullet_len });
        cursor += bullet_len;
    }

    SequentialPlan { ops, end_cursor: cursor }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportSections;
    use crate::summary::tags::parse_summary;
    use crate::types::PeriodLabels;

    fn content_from(blob: &str) -> ReportContent {
        ReportContent {
            period: PeriodLabels { from: "01-06-2026".into(), to: "07-06-2026".into() },
            sections: ReportSections::from_summary(&parse_summary(blob)),
        }
    }

    fn bullet_section_len(block_joined: &str, title: &str) -> u32 {
        // Title line plus newline, then joined lines plus newline.
        utf16_len(title) + 1 + utf16_len(block_joined) + 1
    }

    #[test]
    fn emits_the_expected_operation_sequence() {
        let blob = "<completed>-• fix login bug</completed>\
            <inprogress>-• refactor cache</inprogress><new></new>";
        let plan = plan_bullet_append(100, &content_from(blob));

        assert_eq!(plan.ops.len(), 12);
        assert_eq!(plan.ops[0], EditOperation::InsertPageBreak { at: 99 });
        assert_eq!(
            plan.ops[1],
            EditOperation::InsertText { at: 100, text: "Weekly Status Report\n".into() }
        );
        assert_eq!(
            plan.ops[2],
            EditOperation::SetTextStyle { start: 100, end: 121, style: TextStyle::heading() }
        );

        // Section 1: title at 121, bullets over the inserted lines.
        assert_eq!(
            plan.ops[3],
            EditOperation::InsertText { at: 121, text: "1. Tasks completed 100%:\n".into() }
        );
        assert_eq!(
            plan.ops[4],
            EditOperation::InsertText { at: 146, text: "fix login bug\n".into() }
        );
        assert_eq!(plan.ops[5], EditOperation::CreateBullets { start: 146, end: 160 });

        // Section 2.
        assert_eq!(
            plan.ops[6],
            EditOperation::InsertText { at: 160, text: "2. Tasks continue to work on:\n".into() }
        );
        assert_eq!(
            plan.ops[7],
            EditOperation::InsertText { at: 190, text: "refactor cache\n".into() }
        );
        assert_eq!(plan.ops[8], EditOperation::CreateBullets { start: 190, end: 205 });

        // Section 3 is empty: a lone newline still carries the bullet
        // range.
        assert_eq!(
            plan.ops[9],
            EditOperation::InsertText { at: 205, text: "3. New tasks started:\n".into() }
        );
        assert_eq!(plan.ops[10], EditOperation::InsertText { at: 227, text: "\n".into() });
        assert_eq!(plan.ops[11], EditOperation::CreateBullets { start: 227, end: 228 });

        assert_eq!(plan.end_cursor, 228);
    }

    #[test]
    fn end_cursor_matches_the_length_arithmetic() {
        let blob = "<completed>- a\n- bb</completed><inprogress>- ccc</inprogress><new>- déjà-vu 🆕</new>";
        let content = content_from(blob);
        let plan = plan_bullet_append(42, &content);

        let expected = 42
            + utf16_len(REPORT_HEADING)
            + content
                .sections
                .ordered()
                .iter()
                .map(|(bucket, block)| bullet_section_len(&block.joined(), bucket.title()))
                .sum::<u32>();
        assert_eq!(plan.end_cursor, expected);
    }

    #[test]
    fn every_offset_lies_between_insertion_point_and_end_cursor() {
        let blob = "<completed>- a</completed><inprogress>- b</inprogress><new>- c</new>";
        let insertion_point = 500;
        let plan = plan_bullet_append(insertion_point, &content_from(blob));

        for op in &plan.ops {
            match op {
                // The page break is the one op placed before the
                // content start, by convention.
                EditOperation::InsertPageBreak { at } => assert_eq!(*at, insertion_point - 1),
                EditOperation::InsertText { at, .. } => {
                    assert!(*at >= insertion_point && *at <= plan.end_cursor)
                }
                EditOperation::SetTextStyle { start, end, .. }
                | EditOperation::CreateBullets { start, end } => {
                    assert!(*start >= insertion_point && *end <= plan.end_cursor);
                    assert!(start < end);
                }
                EditOperation::InsertTable { .. } => panic!("bullet plan emits no tables"),
            }
        }
    }

    #[test]
    fn all_empty_sections_still_yield_a_structurally_valid_plan() {
        let plan = plan_bullet_append(10, &content_from("no tags at all"));

        assert_eq!(plan.ops.len(), 12);
        let bullet_ranges: Vec<_> = plan
            .ops
            .iter()
            .filter_map(|op| match op {
                EditOperation::CreateBullets { start, end } => Some(end - start),
                _ => None,
            })
            .collect();
        // Each empty section inserts exactly one newline.
        assert_eq!(bullet_ranges, [1, 1, 1]);
        assert_eq!(plan.end_cursor, 10 + utf16_len(REPORT_HEADING) + bullet_section_lens());
    }

    fn bullet_section_lens() -> u32 {
        ["1. Tasks completed 100%:", "2. Tasks continue to work on:", "3. New tasks started:"]
            .iter()
            .map(|title| utf16_len(title) + 2)
            .sum()
    }

    #[test]
    fn cursor_counts_utf16_units_for_non_ascii_lines() {
        let blob = "<completed>- naïve café 🙂</completed>";
        let plan = plan_bullet_append(0, &content_from(blob));
        // "naïve café 🙂\n" is 13 chars but 14 UTF-16 units.
        let bullet_insert = plan.ops.iter().find_map(|op| match op {
            EditOperation::InsertText { at, text } if text.starts_with("naïve") => {
                Some((*at, utf16_len(text)))
            }
            _ => None,
        });
        let (at, len) = bullet_insert.expect("bullet insert should be planned");
        assert_eq!(len, 14);
        assert_eq!(plan.end_cursor, at + len + utf16_len("2. Tasks continue to work on:\n") + 1 + utf16_len("3. New tasks started:\n") + 1);
    }
}
